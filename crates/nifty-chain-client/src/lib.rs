//! HTTP client library for the Nifty Option Chain API.
//!
//! This crate provides a typed HTTP client for the option chain backend:
//! the raw daily feed, the change-in-open-interest compartment analysis and
//! the index price series.
//!
//! # Example
//!
//! ```no_run
//! use nifty_chain_client::{NiftyClient, SortOrder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), nifty_chain_client::Error> {
//!     let client = NiftyClient::with_base_url("http://localhost:8080")?;
//!
//!     let analysis = client.refresh_analysis("id", Some(SortOrder::Asc)).await?;
//!     println!("ATM: {:?}", analysis.nifty_atm);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::{ClientConfig, NiftyClient};
pub use error::Error;
pub use types::*;
