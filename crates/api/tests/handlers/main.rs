#[path = "../test_utils.rs"]
mod test_utils;

mod appointment_test;
mod auth_test;
mod availability_test;
mod health_test;
mod middleware_test;
