// src/kuru/mod.rs
pub mod abi;
pub mod config;
pub mod market_service;
pub mod models;
pub mod swap_service;

pub use config::Config;
pub use market_service::{KuruMarketService, MarketService};
pub use models::SwapQuote;
pub use swap_service::{SwapExecution, SwapService};
