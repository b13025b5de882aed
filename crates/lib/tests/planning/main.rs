//! End-to-end planning tests against a real temporary directory.

mod common;
mod execution_tests;
mod idempotency_tests;
mod merge_tests;
mod simulation_tests;
