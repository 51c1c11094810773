//! Movie Gateway Adapters.
//!
//! Implementations of the MovieGateway port.
//!
//! ## Available Adapters
//!
//! - `RestMovieGateway` - The FlickPick REST API over HTTPS
//! - `MockMovieGateway` - In-process simulated server for testing

mod dto;
mod mock_gateway;
mod rest_gateway;

pub use mock_gateway::{GatewayCall, GatewayOperation, MockMovieGateway};
pub use rest_gateway::{RestGatewayConfig, RestMovieGateway, DEFAULT_BASE_URL};
