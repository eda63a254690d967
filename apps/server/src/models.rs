//! Domain rows and wire types

use serde::{Deserialize, Serialize};

/// A furniture catalog row.
///
/// `popularity` and `stock` drive ranking and availability but are
/// never serialized to clients.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Chair {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub thumbnail: String,
    pub price: i64,
    pub height: i64,
    pub width: i64,
    pub depth: i64,
    pub color: String,
    pub features: String,
    pub kind: String,
    #[serde(skip_serializing)]
    pub popularity: i64,
    #[serde(skip_serializing)]
    pub stock: i64,
}

/// A rental property catalog row.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Estate {
    pub id: i64,
    pub thumbnail: String,
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub rent: i64,
    pub door_height: i64,
    pub door_width: i64,
    pub features: String,
    #[serde(skip_serializing)]
    pub popularity: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Polygon payload for the area search: an ordered, implicitly closed
/// ring of at least one vertex.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coordinates {
    pub coordinates: Vec<Coordinate>,
}

#[derive(Debug, Serialize)]
pub struct ChairSearchResponse {
    pub count: i64,
    pub chairs: Vec<Chair>,
}

#[derive(Debug, Serialize)]
pub struct ChairListResponse {
    pub chairs: Vec<Chair>,
}

#[derive(Debug, Serialize)]
pub struct EstateSearchResponse {
    pub count: i64,
    pub estates: Vec<Estate>,
}

#[derive(Debug, Serialize)]
pub struct EstateListResponse {
    pub estates: Vec<Estate>,
}

#[derive(Debug, Serialize)]
pub struct InitializeResponse {
    pub language: &'static str,
}

/// Body for endpoints that record a contact address (buy, req_doc).
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub email: String,
}

/// Chair bulk-ingest row; fields are positional in CSV column order.
#[derive(Debug, Clone, Deserialize)]
pub struct NewChair {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub thumbnail: String,
    pub price: i64,
    pub height: i64,
    pub width: i64,
    pub depth: i64,
    pub color: String,
    pub features: String,
    pub kind: String,
    pub popularity: i64,
    pub stock: i64,
}

/// Estate bulk-ingest row; fields are positional in CSV column order.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEstate {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub thumbnail: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rent: i64,
    pub door_height: i64,
    pub door_width: i64,
    pub features: String,
    pub popularity: i64,
}
