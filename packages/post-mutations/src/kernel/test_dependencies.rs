// Mock collaborator implementations for testing
//
// In-memory stand-ins for the external stores, injectable into
// MutationDeps. Each mock records the calls it receives so tests can
// assert on interaction, not just state.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{
    BaseCategoryApi, BaseCustomPostApi, BaseExtensionBus, BasePostMetaStore, BaseTranslator,
    MutationDeps,
};
use crate::common::{CategoryId, PostId};
use crate::config::SiteConfig;
use crate::domains::posts::models::{PostCoreData, PostStatus};

// =============================================================================
// Mock Category API
// =============================================================================

#[derive(Default)]
pub struct MockCategoryApi {
    parents: Mutex<HashMap<CategoryId, Vec<CategoryId>>>,
    lookups: Mutex<Vec<CategoryId>>,
    post_categories: Mutex<HashMap<PostId, Vec<CategoryId>>>,
}

impl MockCategoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single parent edge
    pub fn with_parent(self, child: CategoryId, parent: CategoryId) -> Self {
        self.parents
            .lock()
            .unwrap()
            .entry(child)
            .or_default()
            .push(parent);
        self
    }

    /// Register several parents at once (multi-parent taxonomies)
    pub fn with_parents(self, child: CategoryId, parents: Vec<CategoryId>) -> Self {
        self.parents
            .lock()
            .unwrap()
            .entry(child)
            .or_default()
            .extend(parents);
        self
    }

    /// Every category that was looked up, in order
    pub fn lookups(&self) -> Vec<CategoryId> {
        self.lookups.lock().unwrap().clone()
    }

    /// Categories most recently set for a post
    pub fn categories_for(&self, post_id: PostId) -> Option<Vec<CategoryId>> {
        self.post_categories.lock().unwrap().get(&post_id).cloned()
    }
}

#[async_trait]
impl BaseCategoryApi for MockCategoryApi {
    async fn parents(&self, category: CategoryId) -> Result<Vec<CategoryId>> {
        self.lookups.lock().unwrap().push(category);
        Ok(self
            .parents
            .lock()
            .unwrap()
            .get(&category)
            .cloned()
            .unwrap_or_default())
    }

    async fn set_post_categories(
        &self,
        post_id: PostId,
        categories: &[CategoryId],
    ) -> Result<()> {
        self.post_categories
            .lock()
            .unwrap()
            .insert(post_id, categories.to_vec());
        Ok(())
    }
}

// =============================================================================
// Mock Custom Post API
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct StoredPost {
    pub title: Option<String>,
    pub content: String,
    pub status: String,
    pub permalink: Option<String>,
}

#[derive(Default)]
pub struct MockCustomPostApi {
    posts: Mutex<HashMap<PostId, StoredPost>>,
    created: Mutex<Vec<PostId>>,
}

impl MockCustomPostApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing post with the given stored status
    pub fn with_post(self, post_id: PostId, status: &str) -> Self {
        self.posts.lock().unwrap().insert(
            post_id,
            StoredPost {
                status: status.to_string(),
                permalink: Some(format!("/posts/{}", post_id)),
                ..Default::default()
            },
        );
        self
    }

    /// Ids of posts created through the trait, in order
    pub fn created(&self) -> Vec<PostId> {
        self.created.lock().unwrap().clone()
    }

    pub fn stored(&self, post_id: PostId) -> Option<StoredPost> {
        self.posts.lock().unwrap().get(&post_id).cloned()
    }
}

#[async_trait]
impl BaseCustomPostApi for MockCustomPostApi {
    async fn create(&self, data: PostCoreData) -> Result<PostId> {
        let post_id = PostId::new();
        self.posts.lock().unwrap().insert(
            post_id,
            StoredPost {
                title: data.title,
                content: data.content.unwrap_or_default(),
                status: data.status.unwrap_or(PostStatus::Draft).to_string(),
                permalink: Some(format!("/posts/{}", post_id)),
            },
        );
        self.created.lock().unwrap().push(post_id);
        Ok(post_id)
    }

    async fn update(&self, post_id: PostId, data: PostCoreData) -> Result<()> {
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .get_mut(&post_id)
            .ok_or_else(|| anyhow::anyhow!("Post not found: {}", post_id))?;
        if let Some(title) = data.title {
            post.title = Some(title);
        }
        if let Some(content) = data.content {
            post.content = content;
        }
        if let Some(status) = data.status {
            post.status = status.to_string();
        }
        Ok(())
    }

    async fn status(&self, post_id: PostId) -> Result<Option<String>> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .get(&post_id)
            .map(|p| p.status.clone()))
    }

    async fn permalink(&self, post_id: PostId) -> Result<Option<String>> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .get(&post_id)
            .and_then(|p| p.permalink.clone()))
    }
}

// =============================================================================
// Mock Post Metadata Store
// =============================================================================

#[derive(Default)]
pub struct MockPostMetaStore {
    entries: Mutex<HashMap<(PostId, String), JsonValue>>,
    writes: Mutex<Vec<(PostId, String)>>,
}

impl MockPostMetaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a metadata entry (previous state for update tests)
    pub fn with_entry(self, post_id: PostId, key: &str, value: JsonValue) -> Self {
        self.entries
            .lock()
            .unwrap()
            .insert((post_id, key.to_string()), value);
        self
    }

    /// Keys written through the trait, in order
    pub fn writes(&self) -> Vec<(PostId, String)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn entry(&self, post_id: PostId, key: &str) -> Option<JsonValue> {
        self.entries
            .lock()
            .unwrap()
            .get(&(post_id, key.to_string()))
            .cloned()
    }
}

#[async_trait]
impl BasePostMetaStore for MockPostMetaStore {
    async fn get(&self, post_id: PostId, key: &str) -> Result<Option<JsonValue>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(&(post_id, key.to_string()))
            .cloned())
    }

    async fn set(&self, post_id: PostId, key: &str, value: JsonValue) -> Result<()> {
        self.writes
            .lock()
            .unwrap()
            .push((post_id, key.to_string()));
        self.entries
            .lock()
            .unwrap()
            .insert((post_id, key.to_string()), value);
        Ok(())
    }
}

// =============================================================================
// Null Translator (identity)
// =============================================================================

pub struct NullTranslator;

impl BaseTranslator for NullTranslator {
    fn translate(&self, text: &str) -> String {
        text.to_string()
    }
}

// =============================================================================
// Static Extension Bus (canned overrides)
// =============================================================================

#[derive(Default)]
pub struct StaticExtensionBus {
    overrides: Mutex<HashMap<String, JsonValue>>,
    events: Mutex<Vec<String>>,
}

impl StaticExtensionBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a canned override for an event
    pub fn with_override(self, event: &str, value: JsonValue) -> Self {
        self.overrides
            .lock()
            .unwrap()
            .insert(event.to_string(), value);
        self
    }

    /// Events that were offered for filtering, in order
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl BaseExtensionBus for StaticExtensionBus {
    fn filter(&self, event: &str, value: JsonValue) -> JsonValue {
        self.events.lock().unwrap().push(event.to_string());
        self.overrides
            .lock()
            .unwrap()
            .get(event)
            .cloned()
            .unwrap_or(value)
    }
}

// =============================================================================
// Wiring helper
// =============================================================================

impl MutationDeps {
    /// Deps wired to fresh mocks with every feature enabled.
    /// Returns the mock handles alongside for assertions.
    pub fn for_tests() -> (
        Self,
        Arc<MockCategoryApi>,
        Arc<MockCustomPostApi>,
        Arc<MockPostMetaStore>,
    ) {
        Self::for_tests_with(
            MockCategoryApi::new(),
            MockCustomPostApi::new(),
            MockPostMetaStore::new(),
        )
    }

    /// Deps wired to the given mocks with every feature enabled.
    pub fn for_tests_with(
        categories: MockCategoryApi,
        posts: MockCustomPostApi,
        meta: MockPostMetaStore,
    ) -> (
        Self,
        Arc<MockCategoryApi>,
        Arc<MockCustomPostApi>,
        Arc<MockPostMetaStore>,
    ) {
        let categories = Arc::new(categories);
        let posts = Arc::new(posts);
        let meta = Arc::new(meta);
        let deps = MutationDeps::new(
            categories.clone(),
            posts.clone(),
            meta.clone(),
            Arc::new(NullTranslator),
            Arc::new(StaticExtensionBus::new()),
            SiteConfig::all_enabled(),
        );
        (deps, categories, posts, meta)
    }
}
