// Core modules
pub mod api;
pub mod config;
pub mod error;
pub mod execution;
pub mod handler;
pub mod indicators;
pub mod models;
pub mod strategy;

// Re-export commonly used types
pub use api::{AlpacaClient, MarketDataSource, OrderGateway};
pub use config::Settings;
pub use error::{BrokerError, InvocationError, ServiceError};
pub use handler::Trader;
pub use models::*;
pub use strategy::Strategy;
