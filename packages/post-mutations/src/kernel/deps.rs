//! Mutation dependencies (using traits for testability)
//!
//! Central dependency container injected into the orchestrator functions.
//! Replaces the legacy facade singletons with explicit construction.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::kernel::{
    BaseCategoryApi, BaseCustomPostApi, BaseExtensionBus, BasePostMetaStore, BaseTranslator,
};

/// Collaborators and configuration available to every mutation.
#[derive(Clone)]
pub struct MutationDeps {
    pub categories: Arc<dyn BaseCategoryApi>,
    pub posts: Arc<dyn BaseCustomPostApi>,
    pub meta: Arc<dyn BasePostMetaStore>,
    pub translator: Arc<dyn BaseTranslator>,
    pub bus: Arc<dyn BaseExtensionBus>,
    pub config: SiteConfig,
}

impl MutationDeps {
    /// Wire the Postgres-backed collaborators onto a shared pool.
    /// Translation and extension filtering stay caller-supplied.
    pub fn from_pool(
        pool: sqlx::PgPool,
        translator: Arc<dyn BaseTranslator>,
        bus: Arc<dyn BaseExtensionBus>,
        config: SiteConfig,
    ) -> Self {
        let posts = Arc::new(crate::domains::posts::models::PgPostStore::new(pool.clone()));
        Self {
            categories: Arc::new(crate::domains::categories::PgCategoryStore::new(pool)),
            posts: posts.clone(),
            meta: posts,
            translator,
            bus,
            config,
        }
    }

    /// Create new MutationDeps with the given collaborators.
    pub fn new(
        categories: Arc<dyn BaseCategoryApi>,
        posts: Arc<dyn BaseCustomPostApi>,
        meta: Arc<dyn BasePostMetaStore>,
        translator: Arc<dyn BaseTranslator>,
        bus: Arc<dyn BaseExtensionBus>,
        config: SiteConfig,
    ) -> Self {
        Self {
            categories,
            posts,
            meta,
            translator,
            bus,
            config,
        }
    }
}
