//! Post mutation orchestrator
//!
//! Drives the create/update lifecycle: build core data (status clamped) ->
//! validate (accumulating) -> persist -> categories -> metadata side
//! effects -> change log -> success message. Post types customize the
//! pipeline through `PostMutationHooks` instead of subclassing anything.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::info;

use crate::common::PostId;
use crate::domains::categories::maybe_add_parent_categories;
use crate::domains::posts::errors::MutationError;
use crate::domains::posts::filter_events;
use crate::domains::posts::models::{meta_keys, PostCoreData, PostFormData, PostStatus};
use crate::domains::posts::validation::{self, CategoryRequirement};
use crate::domains::posts::moderation;
use crate::kernel::MutationDeps;

// =============================================================================
// Capability hooks (per-post-type customization)
// =============================================================================

/// Override points for a post type.
///
/// Defaults describe the common post type; listing-style or announcement
/// post types override the ones they need.
#[async_trait]
pub trait PostMutationHooks: Send + Sync {
    /// Not all post types support a title
    fn supports_title(&self) -> bool {
        true
    }

    fn featured_image_mandatory(&self) -> bool {
        false
    }

    /// Whether this post type records references to other posts
    fn collect_references(&self) -> bool {
        true
    }

    /// Whether this post type shows the volunteers-needed input
    fn collect_volunteer_inputs(&self) -> bool {
        false
    }

    /// Category rule for this post type. By default a submitted category
    /// list means at least one entry is required.
    fn category_requirement(&self, form: &PostFormData) -> Option<CategoryRequirement> {
        form.categories
            .as_ref()
            .map(|_| CategoryRequirement::AtLeastOne)
    }

    /// Extra content checks layered after the built-in rules.
    async fn extra_content_checks(
        &self,
        _form: &PostFormData,
        _deps: &MutationDeps,
        _errors: &mut Vec<String>,
    ) -> Result<()> {
        Ok(())
    }

    /// Extra update-only checks layered after the built-in rules.
    async fn extra_update_checks(
        &self,
        _post_id: PostId,
        _form: &PostFormData,
        _deps: &MutationDeps,
        _errors: &mut Vec<String>,
    ) -> Result<()> {
        Ok(())
    }

    /// Runs after core fields and side effects have persisted.
    async fn after_persist(
        &self,
        _post_id: PostId,
        _form: &PostFormData,
        _deps: &MutationDeps,
    ) -> Result<()> {
        Ok(())
    }
}

/// The common post type: every default left in place.
pub struct DefaultPostMutationHooks;

impl PostMutationHooks for DefaultPostMutationHooks {}

// =============================================================================
// Outcome
// =============================================================================

/// Result of a create/update mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The mutation persisted; `message` is the author-facing success text.
    Completed { post_id: PostId, message: String },
    /// Validation failed; nothing was persisted.
    Rejected { errors: Vec<String> },
}

// =============================================================================
// Orchestrators
// =============================================================================

/// Create a post from validated form data.
pub async fn create_post(
    form: &PostFormData,
    hooks: &dyn PostMutationHooks,
    deps: &MutationDeps,
) -> Result<MutationOutcome, MutationError> {
    let mut errors = Vec::new();
    validation::validate_content(form, hooks, deps, &mut errors);
    hooks.extra_content_checks(form, deps, &mut errors).await?;
    if !errors.is_empty() {
        return Ok(MutationOutcome::Rejected { errors });
    }

    let data = build_create_data(form, hooks, deps);
    let post_id = deps.posts.create(data).await?;

    apply_categories(post_id, form, deps).await?;
    persist_side_effects(post_id, form, deps).await?;
    hooks.after_persist(post_id, form, deps).await?;

    info!(post_id = %post_id, "Created custom post");

    let message = success_message(post_id, deps).await?;
    Ok(MutationOutcome::Completed { post_id, message })
}

/// Update a post from validated form data.
pub async fn update_post(
    post_id: PostId,
    form: &PostFormData,
    hooks: &dyn PostMutationHooks,
    deps: &MutationDeps,
) -> Result<MutationOutcome, MutationError> {
    let mut errors = Vec::new();
    validation::validate_update(post_id, deps, &mut errors).await?;
    if errors.is_empty() {
        // Field validation only runs against a post that still exists
        validation::validate_content(form, hooks, deps, &mut errors);
        validation::validate_update_content(form, post_id, deps, &mut errors);
        hooks.extra_content_checks(form, deps, &mut errors).await?;
        hooks
            .extra_update_checks(post_id, form, deps, &mut errors)
            .await?;
    }
    if !errors.is_empty() {
        return Ok(MutationOutcome::Rejected { errors });
    }

    // Diff against stored metadata before the side effects overwrite it
    let log = update_log(post_id, form, deps).await?;

    let data = build_update_data(form, hooks, deps);
    deps.posts.update(post_id, data).await?;

    apply_categories(post_id, form, deps).await?;
    persist_side_effects(post_id, form, deps).await?;
    hooks.after_persist(post_id, form, deps).await?;

    info!(post_id = %post_id, log = %log, "Updated custom post");

    let message = success_message(post_id, deps).await?;
    Ok(MutationOutcome::Completed { post_id, message })
}

// =============================================================================
// Core data
// =============================================================================

fn build_create_data(
    form: &PostFormData,
    hooks: &dyn PostMutationHooks,
    deps: &MutationDeps,
) -> PostCoreData {
    PostCoreData {
        title: if hooks.supports_title() {
            form.title.clone()
        } else {
            None
        },
        content: form.content.clone(),
        status: Some(moderation::create_status(
            form.status,
            deps.config.moderation_enabled,
        )),
    }
}

fn build_update_data(
    form: &PostFormData,
    hooks: &dyn PostMutationHooks,
    deps: &MutationDeps,
) -> PostCoreData {
    PostCoreData {
        title: if hooks.supports_title() {
            form.title.clone()
        } else {
            None
        },
        content: form.content.clone(),
        // Absent means "leave the stored status alone"; a supplied value
        // goes back through the clamp
        status: form
            .status
            .map(|status| moderation::update_status(status, deps.config.moderation_enabled)),
    }
}

// =============================================================================
// Side effects
// =============================================================================

/// Attach the submitted categories, expanded with their ancestors when the
/// deployment opts in through the extension bus.
async fn apply_categories(
    post_id: PostId,
    form: &PostFormData,
    deps: &MutationDeps,
) -> Result<()> {
    let include_parents = deps
        .bus
        .filter_bool(filter_events::ADD_PARENT_CATEGORIES, false);
    let categories = maybe_add_parent_categories(
        form.categories.clone(),
        include_parents,
        deps.categories.as_ref(),
    )
    .await?;
    if let Some(categories) = categories {
        deps.categories
            .set_post_categories(post_id, &categories)
            .await?;
    }
    Ok(())
}

/// Auxiliary metadata writes. Each one is an independent upsert - there is
/// no transactional grouping, so a failure part-way leaves earlier writes
/// in place.
async fn persist_side_effects(
    post_id: PostId,
    form: &PostFormData,
    deps: &MutationDeps,
) -> Result<()> {
    if let Some(references) = &form.references {
        deps.meta
            .set(post_id, meta_keys::REFERENCES, serde_json::json!(references))
            .await?;
    }

    if deps.config.categories_enabled {
        let topics = form.topics.clone().unwrap_or_default();
        deps.meta
            .set(post_id, meta_keys::TOPICS, serde_json::json!(topics))
            .await?;
    }

    if deps.config.volunteering_enabled && deps.config.volunteer_inputs_enabled {
        if let Some(volunteers_needed) = form.volunteers_needed {
            deps.meta
                .set(
                    post_id,
                    meta_keys::VOLUNTEERS_NEEDED,
                    serde_json::json!(volunteers_needed),
                )
                .await?;
        }
    }

    if deps.config.applies_to_enabled {
        let applies_to = form.applies_to.clone().unwrap_or_default();
        deps.meta
            .set(post_id, meta_keys::APPLIES_TO, serde_json::json!(applies_to))
            .await?;
    }

    Ok(())
}

// =============================================================================
// Change log + success message
// =============================================================================

/// What changed in this update, for the structured log entry. Currently
/// tracks references added since the last save.
async fn update_log(
    post_id: PostId,
    form: &PostFormData,
    deps: &MutationDeps,
) -> Result<JsonValue> {
    let mut log = serde_json::Map::new();

    if let Some(references) = &form.references {
        let previous: Vec<PostId> = match deps.meta.get(post_id, meta_keys::REFERENCES).await? {
            Some(value) => serde_json::from_value(value)?,
            None => Vec::new(),
        };
        let new_references: Vec<PostId> = references
            .iter()
            .filter(|r| !previous.contains(r))
            .copied()
            .collect();
        log.insert("new-references".to_string(), serde_json::json!(new_references));
    }

    Ok(JsonValue::Object(log))
}

/// Author-facing success text, driven by where the post landed.
async fn success_message(post_id: PostId, deps: &MutationDeps) -> Result<String> {
    let status = deps
        .posts
        .status(post_id)
        .await?
        .as_deref()
        .and_then(|s| s.parse::<PostStatus>().ok());

    let message = match status {
        Some(PostStatus::Published) => {
            let permalink = deps.posts.permalink(post_id).await?.unwrap_or_default();
            format!(
                r#"<a href="{}">{}</a>."#,
                permalink,
                deps.translator.translate("Click here to view it")
            )
        }
        Some(PostStatus::Draft) => deps
            .translator
            .translate("The status is still \u{201c}Draft\u{201d}, so it won't be online."),
        Some(PostStatus::Pending) => deps
            .translator
            .translate("Now waiting for approval from the admins."),
        None => String::new(),
    };

    Ok(deps
        .bus
        .filter_string(filter_events::SUCCESS_MESSAGE, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{MockCategoryApi, MockCustomPostApi, MockPostMetaStore, StaticExtensionBus};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_rejected_mutation_persists_nothing() {
        let (deps, _categories, posts, meta) = MutationDeps::for_tests();
        let form = PostFormData::builder().status(PostStatus::Published).build();

        let outcome = create_post(&form, &DefaultPostMutationHooks, &deps)
            .await
            .unwrap();
        match outcome {
            MutationOutcome::Rejected { errors } => assert!(!errors.is_empty()),
            other => panic!("expected rejection, got {:?}", other),
        }
        assert!(posts.created().is_empty());
        assert!(meta.writes().is_empty());
    }

    #[tokio::test]
    async fn test_create_clamps_published_to_pending_under_moderation() {
        let (deps, _categories, posts, _meta) = MutationDeps::for_tests();
        let form = PostFormData::builder()
            .title("Coat drive")
            .content("Drop off at the center.")
            .status(PostStatus::Published)
            .build();

        let outcome = create_post(&form, &DefaultPostMutationHooks, &deps)
            .await
            .unwrap();
        let MutationOutcome::Completed { post_id, message } = outcome else {
            panic!("expected completion");
        };
        assert_eq!(posts.stored(post_id).unwrap().status, "pending");
        assert_eq!(message, "Now waiting for approval from the admins.");
    }

    #[tokio::test]
    async fn test_unmoderated_create_publishes_with_permalink_message() {
        let (mut deps, _categories, posts, _meta) = MutationDeps::for_tests();
        deps.config.moderation_enabled = false;
        let form = PostFormData::builder()
            .title("Coat drive")
            .content("Drop off at the center.")
            .status(PostStatus::Published)
            .build();

        let outcome = create_post(&form, &DefaultPostMutationHooks, &deps)
            .await
            .unwrap();
        let MutationOutcome::Completed { post_id, message } = outcome else {
            panic!("expected completion");
        };
        assert_eq!(posts.stored(post_id).unwrap().status, "publish");
        assert!(message.contains(&format!("/posts/{}", post_id)));
        assert!(message.contains("Click here to view it"));
    }

    #[tokio::test]
    async fn test_success_message_overridable_via_bus() {
        let (mut deps, ..) = MutationDeps::for_tests();
        deps.bus = Arc::new(StaticExtensionBus::new().with_override(
            filter_events::SUCCESS_MESSAGE,
            serde_json::json!("All set!"),
        ));
        let form = PostFormData::builder()
            .title("Coat drive")
            .content("Drop off at the center.")
            .build();

        let outcome = create_post(&form, &DefaultPostMutationHooks, &deps)
            .await
            .unwrap();
        let MutationOutcome::Completed { message, .. } = outcome else {
            panic!("expected completion");
        };
        assert_eq!(message, "All set!");
    }

    #[tokio::test]
    async fn test_update_on_trashed_post_short_circuits() {
        let post_id = PostId::new();
        let (deps, _categories, posts, _meta) = MutationDeps::for_tests_with(
            MockCategoryApi::new(),
            MockCustomPostApi::new().with_post(post_id, "trash"),
            MockPostMetaStore::new(),
        );
        // A form that would also fail field validation
        let form = PostFormData::builder().status(PostStatus::Published).build();

        let outcome = update_post(post_id, &form, &DefaultPostMutationHooks, &deps)
            .await
            .unwrap();
        let MutationOutcome::Rejected { errors } = outcome else {
            panic!("expected rejection");
        };
        // Only the precondition error; field validation was skipped
        assert_eq!(errors.len(), 1);
        assert_eq!(posts.stored(post_id).unwrap().status, "trash");
    }

    #[tokio::test]
    async fn test_update_logs_only_new_references() {
        let post_id = PostId::new();
        let old_ref = PostId::new();
        let new_ref = PostId::new();
        let (deps, _categories, _posts, meta) = MutationDeps::for_tests_with(
            MockCategoryApi::new(),
            MockCustomPostApi::new().with_post(post_id, "publish"),
            MockPostMetaStore::new().with_entry(
                post_id,
                meta_keys::REFERENCES,
                serde_json::json!([old_ref]),
            ),
        );
        let form = PostFormData::builder()
            .references(vec![old_ref, new_ref])
            .build();

        let log = update_log(post_id, &form, &deps).await.unwrap();
        assert_eq!(log["new-references"], serde_json::json!([new_ref]));

        // The side-effect write then replaces the stored list wholesale
        persist_side_effects(post_id, &form, &deps).await.unwrap();
        assert_eq!(
            meta.entry(post_id, meta_keys::REFERENCES),
            Some(serde_json::json!([old_ref, new_ref]))
        );
    }
}
