//! Integration tests

mod e2e_test;
mod engine_test;
mod scheduler_test;
