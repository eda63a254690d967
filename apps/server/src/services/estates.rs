//! Estate catalog service

use std::sync::Arc;

use serde::Deserialize;

use crate::{
    cache::TopNCache,
    conditions::EstateSearchCondition,
    db::{EstateStore, FilterSet},
    models::{Chair, Coordinates, Estate, EstateSearchResponse, NewEstate},
    services::{page_offset, parse_paging, present},
    Error, Result,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstateSearchParams {
    pub door_height_range_id: Option<String>,
    pub door_width_range_id: Option<String>,
    pub rent_range_id: Option<String>,
    pub features: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

pub struct EstateService<S: EstateStore> {
    store: S,
    conditions: Arc<EstateSearchCondition>,
    low_priced: TopNCache<Estate>,
    low_priced_limit: i64,
    area_search_limit: i64,
}

impl<S: EstateStore> EstateService<S> {
    pub fn new(
        store: S,
        conditions: Arc<EstateSearchCondition>,
        low_priced_limit: i64,
        area_search_limit: i64,
    ) -> Self {
        Self {
            store,
            conditions,
            low_priced: TopNCache::new(),
            low_priced_limit,
            area_search_limit,
        }
    }

    pub fn conditions(&self) -> &EstateSearchCondition {
        &self.conditions
    }

    /// Faceted search over the estate catalog. At least one facet must
    /// be supplied.
    pub async fn search(&self, params: &EstateSearchParams) -> Result<EstateSearchResponse> {
        let mut filters = FilterSet::new();

        if let Some(raw) = present(&params.door_height_range_id) {
            filters.range("door_height", self.conditions.door_height.bucket(raw)?);
        }
        if let Some(raw) = present(&params.door_width_range_id) {
            filters.range("door_width", self.conditions.door_width.bucket(raw)?);
        }
        if let Some(raw) = present(&params.rent_range_id) {
            filters.range("rent", self.conditions.rent.bucket(raw)?);
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

        let count = self.store.count(&filters).await?;
        let estates = self.store.page(&filters, per_page, offset).await?;

        Ok(EstateSearchResponse { count, estates })
    }

    pub async fn detail(&self, id: i64) -> Result<Estate> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("estate {id}")))
    }

    /// Estates located inside the supplied polygon, capped at the
    /// configured limit. The count reflects the returned rows only.
    pub async fn area_search(&self, polygon: &Coordinates) -> Result<EstateSearchResponse> {
        if polygon.coordinates.is_empty() {
            return Err(Error::InvalidArgument(
                "polygon must have at least one vertex".to_string(),
            ));
        }
        let estates = self
            .store
            .contained_by(&polygon.coordinates, self.area_search_limit)
            .await?;
        Ok(EstateSearchResponse {
            count: estates.len() as i64,
            estates,
        })
    }

    /// Estates whose door admits the given chair in some orientation.
    pub async fn fitting_chair(&self, chair: &Chair) -> Result<Vec<Estate>> {
        self.store
            .fitting_door(chair.width, chair.height, chair.depth, self.low_priced_limit)
            .await
    }

    /// Cached cheapest-by-rent snapshot.
    pub fn low_priced(&self) -> Arc<Vec<Estate>> {
        self.low_priced.get()
    }

    pub async fn refresh_low_priced(&self) -> Result<()> {
        let estates = self.store.cheapest(self.low_priced_limit).await?;
        self.low_priced.set(estates);
        Ok(())
    }

    pub async fn ingest(&self, data: &[u8]) -> Result<()> {
        let rows: Vec<NewEstate> = super::ingest::parse_rows(data)?;
        self.store.insert_batch(&rows).await?;
        self.refresh_low_priced().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockEstateStore {
        estates: Mutex<Vec<Estate>>,
        contained: Mutex<Vec<Estate>>,
    }

    fn estate(id: i64, rent: i64) -> Estate {
        Estate {
            id,
            thumbnail: String::new(),
            name: format!("estate {id}"),
            description: String::new(),
            latitude: 35.0,
            longitude: 139.0,
            address: String::new(),
            rent,
            door_height: 190,
            door_width: 80,
            features: String::new(),
            popularity: 0,
        }
    }

    #[async_trait]
    impl EstateStore for MockEstateStore {
        async fn count(&self, _filters: &FilterSet) -> Result<i64> {
            Ok(self.estates.lock().unwrap().len() as i64)
        }

        async fn page(&self, _filters: &FilterSet, limit: i64, offset: i64) -> Result<Vec<Estate>> {
            let estates = self.estates.lock().unwrap();
            Ok(estates
                .iter()
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect())
        }

        async fn cheapest(&self, limit: i64) -> Result<Vec<Estate>> {
            let mut estates = self.estates.lock().unwrap().clone();
            estates.sort_by_key(|e| (e.rent, e.id));
            estates.truncate(limit as usize);
            Ok(estates)
        }

        async fn get(&self, id: i64) -> Result<Option<Estate>> {
            Ok(self.estates.lock().unwrap().iter().find(|e| e.id == id).cloned())
        }

        async fn insert_batch(&self, rows: &[NewEstate]) -> Result<()> {
            let mut estates = self.estates.lock().unwrap();
            for row in rows {
                let mut e = estate(row.id, row.rent);
                e.name = row.name.clone();
                estates.push(e);
            }
            Ok(())
        }

        async fn contained_by(&self, _polygon: &[Coordinate], limit: i64) -> Result<Vec<Estate>> {
            let mut rows = self.contained.lock().unwrap().clone();
            rows.truncate(limit as usize);
            Ok(rows)
        }

        async fn fitting_door(
            &self,
            width: i64,
            height: i64,
            _depth: i64,
            limit: i64,
        ) -> Result<Vec<Estate>> {
            let mut rows: Vec<Estate> = self
                .estates
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.door_width >= width && e.door_height >= height)
                .cloned()
                .collect();
            rows.truncate(limit as usize);
            Ok(rows)
        }
    }

    fn test_conditions() -> Arc<EstateSearchCondition> {
        Arc::new(
            serde_json::from_str(
                r#"{
                    "doorWidth": {"prefix": "", "suffix": "cm", "ranges": [{"id": 0, "min": -1, "max": 80}]},
                    "doorHeight": {"prefix": "", "suffix": "cm", "ranges": [{"id": 0, "min": -1, "max": 80}]},
                    "rent": {"prefix": "", "suffix": "yen", "ranges": [{"id": 0, "min": -1, "max": 50000}, {"id": 1, "min": 50000, "max": 100000}]},
                    "feature": {"list": ["parking"]}
                }"#,
            )
            .unwrap(),
        )
    }

    fn service_with(estates: Vec<Estate>, contained: Vec<Estate>) -> EstateService<MockEstateStore> {
        let store = MockEstateStore {
            estates: Mutex::new(estates),
            contained: Mutex::new(contained),
        };
        EstateService::new(store, test_conditions(), 20, 50)
    }

    #[tokio::test]
    async fn search_without_any_facet_is_rejected() {
        let service = service_with(vec![estate(1, 40000)], vec![]);
        let params = EstateSearchParams {
            page: Some("0".into()),
            per_page: Some("10".into()),
            ..Default::default()
        };
        assert!(matches!(
            service.search(&params).await,
            Err(Error::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn search_with_rent_bucket_returns_results() {
        let service = service_with(vec![estate(1, 40000), estate(2, 45000)], vec![]);
        let params = EstateSearchParams {
            rent_range_id: Some("0".into()),
            page: Some("0".into()),
            per_page: Some("10".into()),
            ..Default::default()
        };
        let resp = service.search(&params).await.unwrap();
        assert_eq!(resp.count, 2);
        assert_eq!(resp.estates.len(), 2);
    }

    #[tokio::test]
    async fn huge_page_window_rejects_instead_of_overflowing() {
        let service = service_with(vec![estate(1, 40000)], vec![]);
        let params = EstateSearchParams {
            rent_range_id: Some("0".into()),
            page: Some(i64::MAX.to_string()),
            per_page: Some("2".into()),
            ..Default::default()
        };
        assert!(matches!(
            service.search(&params).await,
            Err(Error::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn area_search_rejects_empty_polygon() {
        let service = service_with(vec![], vec![]);
        let polygon = Coordinates {
            coordinates: vec![],
        };
        assert!(matches!(
            service.area_search(&polygon).await,
            Err(Error::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn area_search_count_matches_returned_rows() {
        let service = service_with(vec![], vec![estate(1, 1), estate(2, 2), estate(3, 3)]);
        let polygon = Coordinates {
            coordinates: vec![Coordinate {
                latitude: 35.0,
                longitude: 139.0,
            }],
        };
        let resp = service.area_search(&polygon).await.unwrap();
        assert_eq!(resp.count, 3);
        assert_eq!(resp.estates.len(), 3);
    }

    #[tokio::test]
    async fn detail_of_unknown_estate_is_not_found() {
        let service = service_with(vec![estate(1, 40000)], vec![]);
        assert_eq!(service.detail(1).await.unwrap().id, 1);
        assert!(matches!(service.detail(9).await, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn low_priced_snapshot_orders_by_rent() {
        let service = service_with(vec![estate(1, 90000), estate(2, 30000)], vec![]);
        service.refresh_low_priced().await.unwrap();
        let snapshot = service.low_priced();
        assert_eq!(snapshot.iter().map(|e| e.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[tokio::test]
    async fn ingest_refreshes_low_priced_snapshot() {
        let service = service_with(vec![], vec![]);
        let csv = "1,Sun Heights,d,t,addr,35.6,139.7,80000,200,90,parking,42\n\
                   2,Moon Court,d,t,addr,35.7,139.8,30000,180,75,,7";
        service.ingest(csv.as_bytes()).await.unwrap();
        let snapshot = service.low_priced();
        assert_eq!(snapshot[0].id, 2);
    }
}
