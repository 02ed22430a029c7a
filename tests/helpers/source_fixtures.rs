//! Common source code fixtures for tests.

pub const NESTED_CLASS_FUNCTION: &str = r#"class Person {
  someFunction(p) {
    function inner(q) {
      return q;
    }
  }
}"#;

pub const REACT_COMPONENT: &str = r#"export function Profile({ user }: Props) {
  const [open, setOpen] = useState(false);
  const title = user.firstName + " " + user.lastName;
  if (open && title) {
    track("open");
  }
  return <Card title={title} onClick={() => setOpen(!open)} />;
}"#;

pub const SERVICE_CLASS: &str = r#"export class UserService {
  private cache = new Map<string, User>();

  async load(id: string): Promise<User> {
    const cached = this.cache.get(id);
    const response = await this.http.get(`/users/${id}`);
    const user = {
      id,
      name: response.data.name,
    };
    return user;
  }
}"#;

pub const VUE_COMPONENT: &str = r#"<template>
  <div>{{ count }}</div>
</template>
<script lang="ts">
export default {
  data() {
    const count = 0;
    return { count };
  },
};
</script>"#;
