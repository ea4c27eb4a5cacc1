pub mod gateway;
pub mod jwt;
pub mod progress;
pub mod run_registry;
