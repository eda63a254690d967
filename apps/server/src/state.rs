//! Shared application state

use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::{
    conditions::SearchConditions,
    config::Config,
    db::{PgChairStore, PgEstateStore},
    services::{ChairService, EstateService},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pool: PgPool,
    pub chairs: Arc<ChairService<PgChairStore>>,
    pub estates: Arc<EstateService<PgEstateStore>>,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        // Missing or malformed condition catalogs are fatal; the search
        // endpoints cannot function without them.
        let conditions = SearchConditions::load(&config.catalog)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect(&config.database.url)
            .await
            .context("Failed to connect to database")?;

        let chairs = Arc::new(ChairService::new(
            PgChairStore::new(pool.clone()),
            Arc::new(conditions.chair),
            config.search.low_priced_limit,
        ));
        let estates = Arc::new(EstateService::new(
            PgEstateStore::new(pool.clone()),
            Arc::new(conditions.estate),
            config.search.low_priced_limit,
            config.search.area_search_limit,
        ));

        // Warm the snapshots so the first requests are not served from
        // empty caches. An empty or unreachable datastore at boot is
        // not fatal; /initialize rebuilds them.
        if let Err(e) = chairs.refresh_low_priced().await {
            tracing::warn!(error = %e, "Could not warm chair snapshot at startup");
        }
        if let Err(e) = estates.refresh_low_priced().await {
            tracing::warn!(error = %e, "Could not warm estate snapshot at startup");
        }

        Ok(Self {
            config: Arc::new(config),
            pool,
            chairs,
            estates,
        })
    }
}
