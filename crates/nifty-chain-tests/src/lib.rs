//! Integration tests for the Nifty Option Chain API.
//!
//! These tests require the API server to be running. Configure the server URL
//! via the `API_BASE_URL` environment variable (default: `http://localhost:8080`).

use nifty_chain_client::{AnalysisResponse, ClientConfig, NiftyClient};
use std::time::Duration;

/// Gets the API base URL from environment or uses default.
#[must_use]
pub fn get_api_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// Creates a test client configured for the API.
///
/// # Errors
/// Returns error if client creation fails.
pub fn create_test_client() -> Result<NiftyClient, nifty_chain_client::Error> {
    NiftyClient::new(ClientConfig {
        base_url: get_api_url(),
        timeout: Duration::from_secs(10),
    })
}

/// Asserts that every strike in every compartment carries one entry per
/// observed time label.
pub fn assert_dense(analysis: &AnalysisResponse) {
    for compartment in analysis.compartments() {
        for (strike, series) in compartment {
            assert_eq!(
                series.len(),
                analysis.inserted_time_list.len(),
                "strike {strike} is missing time labels"
            );
            for label in &analysis.inserted_time_list {
                assert!(series.contains_key(label), "strike {strike} lacks {label}");
            }
        }
    }
}
