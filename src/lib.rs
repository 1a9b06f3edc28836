//! # Nifty Option Chain Backend - REST API Server
//!
//! A REST API backend that serves the stored NIFTY option chain for the
//! current trading day and reshapes it into change-in-open-interest
//! compartments around the at-the-money strike.
//! Built with [Axum](https://crates.io/crates/axum) for async HTTP handling and
//! provides OpenAPI/Swagger documentation via [utoipa](https://crates.io/crates/utoipa).
//!
//! ## Key Features
//!
//! - **Compartment Analysis**: Calls and puts on each side of the ATM strike,
//!   each strike carrying a dense series of change in open interest keyed by
//!   observation time.
//!
//! - **Pluggable Storage**: PostgreSQL through `sqlx`, or an in-memory store
//!   seeded from a JSON snapshot.
//!
//! - **OpenAPI Documentation**: Auto-generated Swagger UI for API exploration
//!   and testing at `/swagger-ui/`.
//!
//! - **Structured Logging**: Request tracing with `tower-http`.
//!
//! ## Compartments
//!
//! With a strike step of 50 and three strikes per compartment:
//!
//! ```text
//! compartment1  calls  atm - 200 < strike <= atm
//! compartment2  calls  atm < strike <= atm + 150
//! compartment3  puts   atm - 200 < strike <= atm
//! compartment4  puts   atm < strike <= atm + 150
//! ```
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Route handlers and router configuration |
//! | [`calendar`] | Trading day and time labels |
//! | [`compartment`] | Compartment bucketing and series alignment |
//! | [`config`] | TOML configuration |
//! | [`db`] | Storage traits, PostgreSQL and in-memory stores |
//! | [`error`] | API error types with `IntoResponse` implementation |
//! | [`models`] | Domain records and response DTOs with OpenAPI schemas |
//! | [`sort`] | Sort field and direction parsing |
//! | [`state`] | Application state management |
//! | [`strike`] | ATM strike rounding |
//!
//! ## API Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/nifty/refresh/{sortBy}[/{orderBy}]` | Today's calls and puts, latest first |
//! | GET | `/nifty/refreshAnalysis/{sortBy}[/{orderBy}]` | Compartment analysis |
//! | GET | `/nifty/refreshIndexes` | Today's NIFTY and BANKNIFTY prices |
//!
//! ## Example Usage
//!
//! ```bash
//! # In-memory store seeded from a snapshot
//! CONFIG_PATH=config.toml cargo run
//!
//! # PostgreSQL
//! DATABASE_URL=postgres://localhost/nifty cargo run
//!
//! curl http://localhost:8080/nifty/refreshAnalysis/id/ASC
//! ```

pub mod api;
pub mod calendar;
pub mod compartment;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod sort;
pub mod state;
pub mod strike;
