mod tests_context;
mod tests_embedded;
mod tests_message;
mod tests_no_hang;
mod tests_priority;
mod tests_scenarios;
mod tests_selections;
mod tests_transform;
