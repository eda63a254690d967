//! Postgres chair store

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    db::{
        filter::FilterSet,
        traits::{bind_scalar_values, bind_values, ChairStore},
    },
    models::{Chair, NewChair},
    Result,
};

#[derive(Debug, Clone)]
pub struct PgChairStore {
    pool: PgPool,
}

impl PgChairStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn count_sql(clause: &str) -> String {
    format!("SELECT COUNT(*) FROM chair WHERE {clause}")
}

fn page_sql(clause: &str, next_placeholder: usize) -> String {
    format!(
        "SELECT * FROM chair WHERE {clause} \
         ORDER BY popularity DESC, id ASC LIMIT ${next_placeholder} OFFSET ${}",
        next_placeholder + 1
    )
}

#[async_trait]
impl ChairStore for PgChairStore {
    async fn count(&self, filters: &FilterSet) -> Result<i64> {
        let (clause, binds) = filters.build()?;
        let sql = count_sql(&clause);
        let query = bind_scalar_values(sqlx::query_scalar::<_, i64>(&sql), &binds);
        Ok(query.fetch_one(&self.pool).await?)
    }

    async fn page(&self, filters: &FilterSet, limit: i64, offset: i64) -> Result<Vec<Chair>> {
        let (clause, binds) = filters.build()?;
        let sql = page_sql(&clause, binds.len() + 1);
        let query = bind_values(sqlx::query_as::<_, Chair>(&sql), &binds)
            .bind(limit)
            .bind(offset);
        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn cheapest(&self, limit: i64) -> Result<Vec<Chair>> {
        let rows = sqlx::query_as::<_, Chair>(
            "SELECT * FROM chair WHERE stock > 0 ORDER BY price ASC, id ASC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get(&self, id: i64) -> Result<Option<Chair>> {
        let row = sqlx::query_as::<_, Chair>("SELECT * FROM chair WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_batch(&self, rows: &[NewChair]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let mut builder = sqlx::QueryBuilder::new(
            "INSERT INTO chair \
             (id, name, description, thumbnail, price, height, width, depth, \
              color, features, kind, popularity, stock) ",
        );
        builder.push_values(rows, |mut b, row| {
            b.push_bind(row.id)
                .push_bind(row.name.clone())
                .push_bind(row.description.clone())
                .push_bind(row.thumbnail.clone())
                .push_bind(row.price)
                .push_bind(row.height)
                .push_bind(row.width)
                .push_bind(row.depth)
                .push_bind(row.color.clone())
                .push_bind(row.features.clone())
                .push_bind(row.kind.clone())
                .push_bind(row.popularity)
                .push_bind(row.stock);
        });
        builder.build().execute(&self.pool).await?;
        Ok(())
    }

    async fn decrement_stock(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("UPDATE chair SET stock = stock - 1 WHERE id = $1 AND stock > 0")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
