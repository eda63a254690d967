//! Postgres estate store

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    db::{
        filter::FilterSet,
        geometry::{bounding_box, polygon_literal},
        traits::{bind_scalar_values, bind_values, EstateStore},
    },
    models::{Coordinate, Estate, NewEstate},
    Result,
};

#[derive(Debug, Clone)]
pub struct PgEstateStore {
    pool: PgPool,
}

impl PgEstateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn count_sql(clause: &str) -> String {
    format!("SELECT COUNT(*) FROM estate WHERE {clause}")
}

fn page_sql(clause: &str, next_placeholder: usize) -> String {
    format!(
        "SELECT * FROM estate WHERE {clause} \
         ORDER BY popularity DESC, id ASC LIMIT ${next_placeholder} OFFSET ${}",
        next_placeholder + 1
    )
}

// Bounding-box prefilter narrows the candidate set cheaply before the
// exact polygon containment test runs. `@>` treats the polygon as a
// closed region: a point exactly on an edge or vertex counts as
// contained, so a degenerate single-point ring still matches an estate
// at that precise location.
const CONTAINED_BY_SQL: &str = "SELECT * FROM estate \
     WHERE latitude BETWEEN $1 AND $2 \
       AND longitude BETWEEN $3 AND $4 \
       AND $5::polygon @> point(latitude, longitude) \
     ORDER BY popularity DESC, id ASC LIMIT $6";

// All six orientations of a (width, height, depth) object against the
// two door dimensions.
const FITTING_DOOR_SQL: &str = "SELECT * FROM estate \
     WHERE (door_width >= $1 AND door_height >= $2) \
        OR (door_width >= $1 AND door_height >= $3) \
        OR (door_width >= $2 AND door_height >= $1) \
        OR (door_width >= $2 AND door_height >= $3) \
        OR (door_width >= $3 AND door_height >= $1) \
        OR (door_width >= $3 AND door_height >= $2) \
     ORDER BY popularity DESC, id ASC LIMIT $4";

#[async_trait]
impl EstateStore for PgEstateStore {
    async fn count(&self, filters: &FilterSet) -> Result<i64> {
        let (clause, binds) = filters.build()?;
        let sql = count_sql(&clause);
        let query = bind_scalar_values(sqlx::query_scalar::<_, i64>(&sql), &binds);
        Ok(query.fetch_one(&self.pool).await?)
    }

    async fn page(&self, filters: &FilterSet, limit: i64, offset: i64) -> Result<Vec<Estate>> {
        let (clause, binds) = filters.build()?;
        let sql = page_sql(&clause, binds.len() + 1);
        let query = bind_values(sqlx::query_as::<_, Estate>(&sql), &binds)
            .bind(limit)
            .bind(offset);
        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn cheapest(&self, limit: i64) -> Result<Vec<Estate>> {
        let rows = sqlx::query_as::<_, Estate>(
            "SELECT * FROM estate ORDER BY rent ASC, id ASC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get(&self, id: i64) -> Result<Option<Estate>> {
        let row = sqlx::query_as::<_, Estate>("SELECT * FROM estate WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_batch(&self, rows: &[NewEstate]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let mut builder = sqlx::QueryBuilder::new(
            "INSERT INTO estate \
             (id, name, description, thumbnail, address, latitude, longitude, \
              rent, door_height, door_width, features, popularity) ",
        );
        builder.push_values(rows, |mut b, row| {
            b.push_bind(row.id)
                .push_bind(row.name.clone())
                .push_bind(row.description.clone())
                .push_bind(row.thumbnail.clone())
                .push_bind(row.address.clone())
                .push_bind(row.latitude)
                .push_bind(row.longitude)
                .push_bind(row.rent)
                .push_bind(row.door_height)
                .push_bind(row.door_width)
                .push_bind(row.features.clone())
                .push_bind(row.popularity);
        });
        builder.build().execute(&self.pool).await?;
        Ok(())
    }

    async fn contained_by(&self, polygon: &[Coordinate], limit: i64) -> Result<Vec<Estate>> {
        let Some(bbox) = bounding_box(polygon) else {
            return Ok(Vec::new());
        };
        let rows = sqlx::query_as::<_, Estate>(CONTAINED_BY_SQL)
            .bind(bbox.min_latitude)
            .bind(bbox.max_latitude)
            .bind(bbox.min_longitude)
            .bind(bbox.max_longitude)
            .bind(polygon_literal(polygon))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn fitting_door(
        &self,
        width: i64,
        height: i64,
        depth: i64,
        limit: i64,
    ) -> Result<Vec<Estate>> {
        let rows = sqlx::query_as::<_, Estate>(FITTING_DOOR_SQL)
            .bind(width)
            .bind(height)
            .bind(depth)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::Bucket;

    #[test]
    fn page_sql_ranks_by_popularity_then_id() {
        let mut filters = FilterSet::new();
        filters.range(
            "rent",
            &Bucket {
                id: 0,
                min: None,
                max: Some(50000),
            },
        );
        let (clause, binds) = filters.build().unwrap();
        assert_eq!(
            page_sql(&clause, binds.len() + 1),
            "SELECT * FROM estate WHERE rent < $1 \
             ORDER BY popularity DESC, id ASC LIMIT $2 OFFSET $3"
        );
    }

    #[test]
    fn containment_sql_binds_polygon_as_parameter() {
        assert!(CONTAINED_BY_SQL.contains("$5::polygon @> point(latitude, longitude)"));
        assert!(CONTAINED_BY_SQL.contains("latitude BETWEEN $1 AND $2"));
    }

    #[test]
    fn fitting_door_covers_all_orientations() {
        assert_eq!(FITTING_DOOR_SQL.matches("door_width >=").count(), 6);
        assert_eq!(FITTING_DOOR_SQL.matches(" OR ").count(), 5);
    }
}
