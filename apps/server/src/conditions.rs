//! Search condition catalogs
//!
//! Named bucket tables and categorical value lists, loaded once at
//! startup from JSON fixtures and immutable afterwards. Buckets are
//! addressed by their position in the table; that position is the only
//! identifier clients ever see.
//!
//! The wire format marks an unconstrained bound with `-1`. Internally
//! a bound is `Option<i64>`; the serde adapter below keeps the external
//! format stable while removing the sentinel from the type system.

use crate::{config::CatalogConfig, Error, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// A half-open numeric interval `[min, max)` selectable by index.
/// `None` on either side means that side is unconstrained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub id: i64,
    #[serde(with = "open_bound")]
    pub min: Option<i64>,
    #[serde(with = "open_bound")]
    pub max: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeCondition {
    pub prefix: String,
    pub suffix: String,
    pub ranges: Vec<Bucket>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListCondition {
    pub list: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChairSearchCondition {
    pub width: RangeCondition,
    pub height: RangeCondition,
    pub depth: RangeCondition,
    pub price: RangeCondition,
    pub color: ListCondition,
    pub feature: ListCondition,
    pub kind: ListCondition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstateSearchCondition {
    pub door_width: RangeCondition,
    pub door_height: RangeCondition,
    pub rent: RangeCondition,
    pub feature: ListCondition,
}

impl RangeCondition {
    /// Resolve a caller-supplied bucket index to its bucket.
    ///
    /// Rejects non-integer, negative and out-of-range indices; on
    /// success returns the stored bucket unchanged.
    pub fn bucket(&self, raw_id: &str) -> Result<&Bucket> {
        let index: i64 = raw_id
            .parse()
            .map_err(|_| Error::InvalidArgument(format!("invalid range id: {raw_id}")))?;
        if index < 0 {
            return Err(Error::InvalidArgument(format!(
                "range id out of bounds: {index}"
            )));
        }
        self.ranges.get(index as usize).ok_or_else(|| {
            Error::InvalidArgument(format!("range id out of bounds: {index}"))
        })
    }
}

/// Both catalogs' condition tables, loaded at startup.
#[derive(Debug, Clone)]
pub struct SearchConditions {
    pub chair: ChairSearchCondition,
    pub estate: EstateSearchCondition,
}

impl SearchConditions {
    /// Load condition catalogs from the configured fixture files.
    /// A load failure is fatal to process startup.
    pub fn load(config: &CatalogConfig) -> anyhow::Result<Self> {
        let chair = load_file(&config.chair_conditions_path)
            .context("failed to load chair condition catalog")?;
        let estate = load_file(&config.estate_conditions_path)
            .context("failed to load estate condition catalog")?;
        Ok(Self { chair, estate })
    }
}

fn load_file<T: serde::de::DeserializeOwned>(path: &str) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

/// Serde adapter for the `-1 = unconstrained` wire convention.
mod open_bound {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.unwrap_or(-1))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Ok(if raw == -1 { None } else { Some(raw) })
    }
}
