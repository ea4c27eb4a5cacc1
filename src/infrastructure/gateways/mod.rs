pub mod green_api;
pub mod simulated;

pub use green_api::{GreenApiClient, GreenApiConfig};
pub use simulated::{SimulatedGateway, SimulatedGatewayConfig};
