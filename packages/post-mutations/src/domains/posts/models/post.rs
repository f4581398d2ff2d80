use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::PgPool;

use crate::common::PostId;
use crate::domains::posts::models::PostCoreData;
use crate::kernel::{BaseCustomPostApi, BasePostMetaStore};

/// Custom post - core fields owned by the post store
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostRecord {
    pub id: PostId,
    pub title: Option<String>,
    pub content: String,
    pub status: String,
    pub permalink: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl PostRecord {
    /// Find post by ID
    pub async fn find_by_id(id: PostId, pool: &PgPool) -> Result<Option<Self>> {
        let post = sqlx::query_as::<_, PostRecord>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(post)
    }

    /// Insert a new post (returns inserted record)
    pub async fn create(data: PostCoreData, pool: &PgPool) -> Result<Self> {
        let id = PostId::new();
        let permalink = format!("/posts/{}", id);
        let post = sqlx::query_as::<_, PostRecord>(
            r#"
            INSERT INTO posts (id, title, content, status, permalink)
            VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, 'draft'), $5)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.content)
        .bind(data.status.map(|s| s.to_string()))
        .bind(permalink)
        .fetch_one(pool)
        .await?;
        Ok(post)
    }

    /// Apply core-field changes; absent fields keep their stored value
    pub async fn update_core(id: PostId, data: PostCoreData, pool: &PgPool) -> Result<Self> {
        let post = sqlx::query_as::<_, PostRecord>(
            r#"
            UPDATE posts
            SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                status = COALESCE($4, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.content)
        .bind(data.status.map(|s| s.to_string()))
        .fetch_one(pool)
        .await?;
        Ok(post)
    }

    /// Stored status string for a post, if it exists
    pub async fn status_of(id: PostId, pool: &PgPool) -> Result<Option<String>> {
        let status = sqlx::query_scalar::<_, String>("SELECT status FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(status)
    }

    /// Permalink for a post, if it exists and has one
    pub async fn permalink_of(id: PostId, pool: &PgPool) -> Result<Option<String>> {
        let permalink =
            sqlx::query_scalar::<_, Option<String>>("SELECT permalink FROM posts WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?;
        Ok(permalink.flatten())
    }
}

// =============================================================================
// Post Metadata (key-value, keyed by post id)
// =============================================================================

/// Metadata entry attached to a post
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostMeta {
    pub post_id: PostId,
    pub meta_key: String,
    pub meta_value: JsonValue,
}

impl PostMeta {
    /// Read one metadata entry
    pub async fn get(post_id: PostId, key: &str, pool: &PgPool) -> Result<Option<JsonValue>> {
        let value = sqlx::query_scalar::<_, JsonValue>(
            "SELECT meta_value FROM post_meta WHERE post_id = $1 AND meta_key = $2",
        )
        .bind(post_id)
        .bind(key)
        .fetch_optional(pool)
        .await?;
        Ok(value)
    }

    /// Upsert one metadata entry
    pub async fn set(post_id: PostId, key: &str, value: JsonValue, pool: &PgPool) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO post_meta (post_id, meta_key, meta_value)
            VALUES ($1, $2, $3)
            ON CONFLICT (post_id, meta_key) DO UPDATE
            SET meta_value = EXCLUDED.meta_value, updated_at = NOW()
            "#,
        )
        .bind(post_id)
        .bind(key)
        .bind(value)
        .execute(pool)
        .await?;
        Ok(())
    }
}

// =============================================================================
// Trait adapters
// =============================================================================

/// Postgres-backed post store (production collaborator)
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseCustomPostApi for PgPostStore {
    async fn create(&self, data: PostCoreData) -> Result<PostId> {
        let post = PostRecord::create(data, &self.pool).await?;
        Ok(post.id)
    }

    async fn update(&self, post_id: PostId, data: PostCoreData) -> Result<()> {
        PostRecord::update_core(post_id, data, &self.pool).await?;
        Ok(())
    }

    async fn status(&self, post_id: PostId) -> Result<Option<String>> {
        PostRecord::status_of(post_id, &self.pool).await
    }

    async fn permalink(&self, post_id: PostId) -> Result<Option<String>> {
        PostRecord::permalink_of(post_id, &self.pool).await
    }
}

#[async_trait]
impl BasePostMetaStore for PgPostStore {
    async fn get(&self, post_id: PostId, key: &str) -> Result<Option<JsonValue>> {
        PostMeta::get(post_id, key, &self.pool).await
    }

    async fn set(&self, post_id: PostId, key: &str, value: JsonValue) -> Result<()> {
        PostMeta::set(post_id, key, value, &self.pool).await
    }
}
