use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::error::SyncResult;

use super::store::PushRecordStore;
use super::types::{PushRecord, PushRecordInput};

pub struct PgPushStore {
    pool: PgPool,
}

impl PgPushStore {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

#[async_trait]
impl PushRecordStore for PgPushStore {
    async fn insert(&self, push: &PushRecordInput) -> SyncResult<i64> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO news.pushinfo_latest
                (source_id, source_name, news_info_id, news_type, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(push.source_id)
        .bind(&push.source_name)
        .bind(push.news_record_id)
        .bind(&push.news_type)
        .bind(push.status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn batch_insert(&self, pushes: &[PushRecordInput]) -> SyncResult<()> {
        if pushes.is_empty() { return Ok(()); }
        let source_ids: Vec<i32> = pushes.iter().map(|p| p.source_id).collect();
        let source_names: Vec<String> = pushes.iter().map(|p| p.source_name.clone()).collect();
        let news_ids: Vec<i64> = pushes.iter().map(|p| p.news_record_id).collect();
        let news_types: Vec<String> = pushes.iter().map(|p| p.news_type.clone()).collect();
        let statuses: Vec<i32> = pushes.iter().map(|p| p.status).collect();
        sqlx::query(
            r#"
            INSERT INTO news.pushinfo_latest
                (source_id, source_name, news_info_id, news_type, status, created_at)
            SELECT s, sn, n, t, st, $6
            FROM UNNEST($1::INT4[], $2::TEXT[], $3::INT8[], $4::TEXT[], $5::INT4[]) AS x(s, sn, n, t, st)
            "#,
        )
        .bind(source_ids)
        .bind(source_names)
        .bind(news_ids)
        .bind(news_types)
        .bind(statuses)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_by_type(&self, news_type: &str) -> SyncResult<Vec<PushRecord>> {
        let rows = sqlx::query_as::<_, PushRecord>(
            r#"
            SELECT id, source_id, source_name, news_info_id AS news_record_id,
                   news_type, status, created_at
            FROM news.pushinfo_latest
            WHERE news_type = $1
            "#,
        )
        .bind(news_type)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn delete_by_source_and_type(&self, source_id: i32, news_type: &str) -> SyncResult<u64> {
        let res = sqlx::query("DELETE FROM news.pushinfo_latest WHERE source_id = $1 AND news_type = $2")
            .bind(source_id)
            .bind(news_type)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;
    use std::time::Duration;

    #[tokio::test]
    async fn empty_batch_never_touches_the_database() {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy("postgres://u:p@127.0.0.1:1/news").unwrap();
        let store = PgPushStore::new(pool);
        assert!(store.batch_insert(&[]).await.is_ok());
        assert!(store.get_by_type("news").await.is_err());
    }
}
