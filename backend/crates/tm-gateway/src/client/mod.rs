#[allow(clippy::module_inception)]
mod client;
mod error;

pub use client::GatewayClient;
pub use error::{GatewayError, Result as GatewayResult};
