use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::error::SyncResult;

use super::store::NewsRecordStore;
use super::types::{NewsRecord, NewsRecordInput};

pub struct PgNewsStore {
    pool: PgPool,
}

impl PgNewsStore {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

#[async_trait]
impl NewsRecordStore for PgNewsStore {
    async fn get_latest_by_source(&self, source_id: i32, limit: i64) -> SyncResult<Vec<NewsRecord>> {
        let rows = sqlx::query_as::<_, NewsRecord>(
            r#"
            SELECT id, orig_id AS origin_id, title, url, source_id, created_at
            FROM news.news_infos
            WHERE source_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(source_id)
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert(&self, record: &NewsRecordInput) -> SyncResult<i64> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO news.news_infos (orig_id, title, url, source_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&record.origin_id)
        .bind(&record.title)
        .bind(&record.url)
        .bind(record.source_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn batch_insert(&self, records: &[NewsRecordInput]) -> SyncResult<()> {
        if records.is_empty() { return Ok(()); }
        let origin_ids: Vec<String> = records.iter().map(|r| r.origin_id.clone()).collect();
        let titles: Vec<String> = records.iter().map(|r| r.title.clone()).collect();
        let urls: Vec<String> = records.iter().map(|r| r.url.clone()).collect();
        let source_ids: Vec<i32> = records.iter().map(|r| r.source_id).collect();
        sqlx::query(
            r#"
            INSERT INTO news.news_infos (orig_id, title, url, source_id, created_at)
            SELECT o, t, u, s, $5
            FROM UNNEST($1::TEXT[], $2::TEXT[], $3::TEXT[], $4::INT4[]) AS x(o, t, u, s)
            "#,
        )
        .bind(origin_ids)
        .bind(titles)
        .bind(urls)
        .bind(source_ids)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;
    use std::time::Duration;

    #[tokio::test]
    async fn empty_batch_never_touches_the_database() {
        // nothing listens on port 1; any query would fail
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy("postgres://u:p@127.0.0.1:1/news").unwrap();
        let store = PgNewsStore::new(pool);
        assert!(store.batch_insert(&[]).await.is_ok());
        assert!(store.get_latest_by_source(1, 5).await.is_err());
    }
}
