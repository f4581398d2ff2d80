use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{CategoryId, PostId};
use crate::kernel::BaseCategoryApi;

/// Taxonomy category with an optional parent (self-referential hierarchy)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub slug: String,
    pub display_name: Option<String>,
    pub parent_category_id: Option<CategoryId>, // Self-referential FK for hierarchy
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Category {
    /// Find category by ID
    pub async fn find_by_id(id: CategoryId, pool: &PgPool) -> Result<Option<Self>> {
        let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(category)
    }

    /// Find or create category by slug
    pub async fn find_or_create(
        slug: &str,
        display_name: Option<String>,
        parent: Option<CategoryId>,
        pool: &PgPool,
    ) -> Result<Self> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (slug, display_name, parent_category_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (slug) DO UPDATE
            SET display_name = COALESCE(EXCLUDED.display_name, categories.display_name)
            RETURNING *
            "#,
        )
        .bind(slug)
        .bind(display_name)
        .bind(parent)
        .fetch_one(pool)
        .await?;
        Ok(category)
    }

    /// Parent category id, if the category exists and has one
    pub async fn parent_of(id: CategoryId, pool: &PgPool) -> Result<Option<CategoryId>> {
        let parent = sqlx::query_scalar::<_, Option<CategoryId>>(
            "SELECT parent_category_id FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(parent.flatten())
    }

    /// Find all child categories of a parent
    pub async fn find_children(parent_id: CategoryId, pool: &PgPool) -> Result<Vec<Self>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE parent_category_id = $1 ORDER BY slug",
        )
        .bind(parent_id)
        .fetch_all(pool)
        .await?;
        Ok(categories)
    }

    /// Replace the categories attached to a post.
    /// Duplicate ids in the input collapse in the join table.
    pub async fn set_for_post(
        post_id: PostId,
        categories: &[CategoryId],
        pool: &PgPool,
    ) -> Result<()> {
        sqlx::query("DELETE FROM post_categories WHERE post_id = $1")
            .bind(post_id)
            .execute(pool)
            .await?;

        for category_id in categories {
            sqlx::query(
                r#"
                INSERT INTO post_categories (post_id, category_id)
                VALUES ($1, $2)
                ON CONFLICT (post_id, category_id) DO NOTHING
                "#,
            )
            .bind(post_id)
            .bind(category_id)
            .execute(pool)
            .await?;
        }
        Ok(())
    }

    /// Find all categories attached to a post
    pub async fn find_for_post(post_id: PostId, pool: &PgPool) -> Result<Vec<Self>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT c.*
            FROM categories c
            INNER JOIN post_categories pc ON pc.category_id = c.id
            WHERE pc.post_id = $1
            ORDER BY c.slug
            "#,
        )
        .bind(post_id)
        .fetch_all(pool)
        .await?;
        Ok(categories)
    }
}

// =============================================================================
// Trait adapter
// =============================================================================

/// Postgres-backed category store (production collaborator)
pub struct PgCategoryStore {
    pool: PgPool,
}

impl PgCategoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseCategoryApi for PgCategoryStore {
    async fn parents(&self, category: CategoryId) -> Result<Vec<CategoryId>> {
        // Single-parent schema: zero or one ancestors per lookup
        let parent = Category::parent_of(category, &self.pool).await?;
        Ok(parent.into_iter().collect())
    }

    async fn set_post_categories(
        &self,
        post_id: PostId,
        categories: &[CategoryId],
    ) -> Result<()> {
        Category::set_for_post(post_id, categories, &self.pool).await
    }
}
