pub mod gateways;
pub mod repositories;
