pub mod attempt_executor;
