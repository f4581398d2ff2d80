// Trait definitions for the external collaborators this layer calls into.
//
// These are INFRASTRUCTURE traits only - no business logic. The mutation
// rules (validation, clamping, expansion) are domain functions that use
// these traits.
//
// Naming convention: Base* for trait names (e.g., BaseCategoryApi)

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::common::{CategoryId, PostId};
use crate::domains::posts::models::PostCoreData;

// =============================================================================
// Category API (taxonomy hierarchy + post associations)
// =============================================================================

#[async_trait]
pub trait BaseCategoryApi: Send + Sync {
    /// Parents of a category; empty for a root. Single-parent taxonomies
    /// return at most one element.
    async fn parents(&self, category: CategoryId) -> Result<Vec<CategoryId>>;

    /// Replace the category associations of a post.
    async fn set_post_categories(
        &self,
        post_id: PostId,
        categories: &[CategoryId],
    ) -> Result<()>;
}

// =============================================================================
// Custom Post API (core post storage)
// =============================================================================

#[async_trait]
pub trait BaseCustomPostApi: Send + Sync {
    /// Persist a new post and return its id.
    async fn create(&self, data: PostCoreData) -> Result<PostId>;

    /// Apply core-field changes to an existing post.
    async fn update(&self, post_id: PostId, data: PostCoreData) -> Result<()>;

    /// Raw stored status string; `None` when no such post exists.
    ///
    /// Returned verbatim - callers decide whether the value is one of the
    /// statuses this layer considers live.
    async fn status(&self, post_id: PostId) -> Result<Option<String>>;

    /// Public URL of the post, when it has one.
    async fn permalink(&self, post_id: PostId) -> Result<Option<String>>;
}

// =============================================================================
// Post Metadata Store (key-value, keyed by post id)
// =============================================================================

#[async_trait]
pub trait BasePostMetaStore: Send + Sync {
    /// Read one metadata entry.
    async fn get(&self, post_id: PostId, key: &str) -> Result<Option<JsonValue>>;

    /// Upsert one metadata entry. Each call stands alone - there is no
    /// transactional grouping across keys.
    async fn set(&self, post_id: PostId, key: &str, value: JsonValue) -> Result<()>;
}

// =============================================================================
// Translator (opaque string producer)
// =============================================================================

pub trait BaseTranslator: Send + Sync {
    /// Map source text to the deployment locale.
    fn translate(&self, text: &str) -> String;
}

// =============================================================================
// Extension Bus (named-event filter overrides)
// =============================================================================

pub trait BaseExtensionBus: Send + Sync {
    /// Offer `value` to external overrides registered for `event` and
    /// return whatever comes back. With no override registered the
    /// default value passes through unchanged.
    fn filter(&self, event: &str, value: JsonValue) -> JsonValue;

    /// Boolean filter convenience; falls back to `default` when the
    /// override returns a non-boolean.
    fn filter_bool(&self, event: &str, default: bool) -> bool {
        self.filter(event, JsonValue::Bool(default))
            .as_bool()
            .unwrap_or(default)
    }

    /// String filter convenience; falls back to `default` when the
    /// override returns a non-string.
    fn filter_string(&self, event: &str, default: String) -> String {
        match self.filter(event, JsonValue::String(default.clone())) {
            JsonValue::String(s) => s,
            _ => default,
        }
    }
}
