//! Database layer: filter construction, geometry helpers and the
//! Postgres-backed stores.

pub mod chairs;
pub mod estates;
pub mod filter;
pub mod geometry;
pub mod traits;

pub use chairs::PgChairStore;
pub use estates::PgEstateStore;
pub use filter::{escape_like_pattern, BindValue, Comparison, FilterSet};
pub use traits::{ChairStore, EstateStore};
