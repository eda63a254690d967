//! Storage seams
//!
//! Services depend on these traits rather than on the pool directly,
//! which keeps the query layer swappable in tests.

use async_trait::async_trait;

use crate::{
    db::filter::{BindValue, FilterSet},
    models::{Chair, Coordinate, Estate, NewChair, NewEstate},
    Result,
};

#[async_trait]
pub trait ChairStore: Send + Sync {
    /// Total rows matching the filters.
    async fn count(&self, filters: &FilterSet) -> Result<i64>;

    /// One page of matching rows, ranked by popularity then id.
    async fn page(&self, filters: &FilterSet, limit: i64, offset: i64) -> Result<Vec<Chair>>;

    /// The cheapest in-stock chairs, up to `limit`.
    async fn cheapest(&self, limit: i64) -> Result<Vec<Chair>>;

    async fn get(&self, id: i64) -> Result<Option<Chair>>;

    async fn insert_batch(&self, rows: &[NewChair]) -> Result<()>;

    /// Atomically decrement stock if any remains; returns affected rows.
    async fn decrement_stock(&self, id: i64) -> Result<u64>;
}

#[async_trait]
pub trait EstateStore: Send + Sync {
    async fn count(&self, filters: &FilterSet) -> Result<i64>;

    async fn page(&self, filters: &FilterSet, limit: i64, offset: i64) -> Result<Vec<Estate>>;

    /// The cheapest estates by rent, up to `limit`.
    async fn cheapest(&self, limit: i64) -> Result<Vec<Estate>>;

    async fn get(&self, id: i64) -> Result<Option<Estate>>;

    async fn insert_batch(&self, rows: &[NewEstate]) -> Result<()>;

    /// Estates whose location falls inside the polygon, ranked by
    /// popularity then id, capped at `limit`.
    async fn contained_by(&self, polygon: &[Coordinate], limit: i64) -> Result<Vec<Estate>>;

    /// Estates whose door admits a `width` x `height` x `depth` object
    /// in at least one orientation.
    async fn fitting_door(
        &self,
        width: i64,
        height: i64,
        depth: i64,
        limit: i64,
    ) -> Result<Vec<Estate>>;
}

/// Bind the accumulated filter values onto a query in placeholder order.
pub(crate) fn bind_values<'q, O>(
    mut query: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    binds: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for bind in binds {
        query = match bind {
            BindValue::Int(v) => query.bind(*v),
            BindValue::Text(v) => query.bind(v),
        };
    }
    query
}

pub(crate) fn bind_scalar_values<'q, O>(
    mut query: sqlx::query::QueryScalar<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    binds: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for bind in binds {
        query = match bind {
            BindValue::Int(v) => query.bind(*v),
            BindValue::Text(v) => query.bind(v),
        };
    }
    query
}
