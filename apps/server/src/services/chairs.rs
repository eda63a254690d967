//! Chair catalog service

use std::sync::Arc;

use serde::Deserialize;

use crate::{
    cache::TopNCache,
    conditions::ChairSearchCondition,
    db::{ChairStore, FilterSet},
    models::{Chair, ChairSearchResponse, NewChair},
    services::{page_offset, parse_paging, present},
    Error, Result,
};

/// Raw query parameters of the chair search endpoint. Range fields
/// carry bucket indices; empty strings count as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChairSearchParams {
    pub price_range_id: Option<String>,
    pub height_range_id: Option<String>,
    pub width_range_id: Option<String>,
    pub depth_range_id: Option<String>,
    pub kind: Option<String>,
    pub color: Option<String>,
    pub features: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

pub struct ChairService<S: ChairStore> {
    store: S,
    conditions: Arc<ChairSearchCondition>,
    low_priced: TopNCache<Chair>,
    low_priced_limit: i64,
}

impl<S: ChairStore> ChairService<S> {
    pub fn new(store: S, conditions: Arc<ChairSearchCondition>, low_priced_limit: i64) -> Self {
        Self {
            store,
            conditions,
            low_priced: TopNCache::new(),
            low_priced_limit,
        }
    }

    pub fn conditions(&self) -> &ChairSearchCondition {
        &self.conditions
    }

    /// Faceted search over the chair catalog.
    ///
    /// At least one facet must be supplied; the availability predicate
    /// is appended only after that check, so it can never satisfy the
    /// requirement on its own.
    pub async fn search(&self, params: &ChairSearchParams) -> Result<ChairSearchResponse> {
        let mut filters = FilterSet::new();

        if let Some(raw) = present(&params.price_range_id) {
            filters.range("price", self.conditions.price.bucket(raw)?);
        }
        if let Some(raw) = present(&params.height_range_id) {
            filters.range("height", self.conditions.height.bucket(raw)?);
        }
        if let Some(raw) = present(&params.width_range_id) {
            filters.range("width", self.conditions.width.bucket(raw)?);
        }
        if let Some(raw) = present(&params.depth_range_id) {
            filters.range("depth", self.conditions.depth.bucket(raw)?);
        }
        if let Some(kind) = present(&params.kind) {
            filters.equals("kind", kind);
        }
        if let Some(color) = present(&params.color) {
            filters.equals("color", color);
        }
        if let Some(features) = present(&params.features) {
            filters.feature_list("features", features);
        }

        if filters.is_empty() {
            return Err(Error::InvalidArgument(
                "no search condition supplied".to_string(),
            ));
        }

        let (page, per_page) = parse_paging(params.page.as_deref(), params.per_page.as_deref())?;
        let offset = page_offset(page, per_page)?;

        filters.greater_than("stock", 0);

        let count = self.store.count(&filters).await?;
        let chairs = self.store.page(&filters, per_page, offset).await?;

        Ok(ChairSearchResponse { count, chairs })
    }

    /// Single chair by id; sold-out chairs are indistinguishable from
    /// absent ones.
    pub async fn detail(&self, id: i64) -> Result<Chair> {
        match self.store.get(id).await? {
            Some(chair) if chair.stock > 0 => Ok(chair),
            _ => Err(Error::NotFound(format!("chair {id}"))),
        }
    }

    /// Lookup without the availability check.
    pub async fn find(&self, id: i64) -> Result<Option<Chair>> {
        self.store.get(id).await
    }

    /// Purchase one unit. The decrement is conditional on remaining
    /// stock, so concurrent buyers cannot oversell.
    pub async fn buy(&self, id: i64) -> Result<()> {
        let affected = self.store.decrement_stock(id).await?;
        if affected == 0 {
            return Err(Error::NotFound(format!("chair {id}")));
        }
        Ok(())
    }

    /// Cached cheapest-in-stock snapshot.
    pub fn low_priced(&self) -> Arc<Vec<Chair>> {
        self.low_priced.get()
    }

    pub async fn refresh_low_priced(&self) -> Result<()> {
        let chairs = self.store.cheapest(self.low_priced_limit).await?;
        self.low_priced.set(chairs);
        Ok(())
    }

    /// Bulk-insert a CSV upload and refresh the cached snapshot.
    pub async fn ingest(&self, data: &[u8]) -> Result<()> {
        let rows: Vec<NewChair> = super::ingest::parse_rows(data)?;
        self.store.insert_batch(&rows).await?;
        self.refresh_low_priced().await
    }
}
