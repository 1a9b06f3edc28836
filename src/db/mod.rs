//! Storage for option chain observations and index prices.

mod memory;
mod postgres;
mod schema;
mod store;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use schema::*;
pub use store::{NiftyService, SpotPriceService, StoreError};
