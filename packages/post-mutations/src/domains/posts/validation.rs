//! Validation rules for post create/update mutations
//!
//! Rules accumulate human-readable messages into a shared list and never
//! short-circuit each other - a submission with several problems reports
//! all of them in one pass. A non-empty list after validation means the
//! mutation must not persist anything.

use anyhow::Result;

use crate::common::PostId;
use crate::domains::posts::commands::PostMutationHooks;
use crate::domains::posts::filter_events;
use crate::domains::posts::models::{PostFormData, PostStatus};
use crate::kernel::MutationDeps;

/// How many categories a post type demands, when it demands any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryRequirement {
    AtLeastOne,
    ExactlyOne,
}

/// Content rules, applied to both create and update submissions.
///
/// The title rule always runs; the remaining rules only apply once the
/// post is meant to leave draft.
pub fn validate_content(
    form: &PostFormData,
    hooks: &dyn PostMutationHooks,
    deps: &MutationDeps,
    errors: &mut Vec<String>,
) {
    if hooks.supports_title() && form.title.as_deref().unwrap_or("").is_empty() {
        errors.push(deps.translator.translate("The title cannot be empty"));
    }

    if form.status == Some(PostStatus::Draft) {
        return;
    }

    if form.content.as_deref().unwrap_or("").is_empty() {
        errors.push(deps.translator.translate("The content cannot be empty"));
    }

    if hooks.featured_image_mandatory() && form.featured_image.is_none() {
        errors.push(
            deps.translator
                .translate("The featured image has not been set"),
        );
    }

    if let Some(requirement) = hooks.category_requirement(form) {
        let messages = category_error_messages(deps);
        let count = form.categories.as_ref().map(Vec::len).unwrap_or(0);
        if count == 0 {
            match requirement {
                CategoryRequirement::AtLeastOne => errors.push(messages.empty_categories),
                CategoryRequirement::ExactlyOne => errors.push(messages.empty_category),
            }
        } else if count > 1 && requirement == CategoryRequirement::ExactlyOne {
            errors.push(messages.only_one);
        }
    }
}

/// Update-only content rule: a post cannot reference itself.
pub fn validate_update_content(
    form: &PostFormData,
    post_id: PostId,
    deps: &MutationDeps,
    errors: &mut Vec<String>,
) {
    if let Some(references) = &form.references {
        if references.contains(&post_id) {
            errors.push(
                deps.translator
                    .translate("The post cannot be a response to itself"),
            );
        }
    }
}

/// Update precondition: the stored status must be one this layer still
/// considers live. Anything else (trashed, missing) rejects the update
/// with a single error; callers skip the remaining update validation.
pub async fn validate_update(
    post_id: PostId,
    deps: &MutationDeps,
    errors: &mut Vec<String>,
) -> Result<()> {
    let stored = deps.posts.status(post_id).await?;
    let live = stored
        .as_deref()
        .map(|s| s.parse::<PostStatus>().is_ok())
        .unwrap_or(false);
    if !live {
        errors.push(
            deps.translator
                .translate("Hmmmmm, this post seems to have been deleted..."),
        );
    }
    Ok(())
}

/// Category validation messages, overridable through the extension bus.
struct CategoryErrorMessages {
    empty_categories: String,
    empty_category: String,
    only_one: String,
}

fn category_error_messages(deps: &MutationDeps) -> CategoryErrorMessages {
    let defaults = serde_json::json!({
        "empty-categories": deps.translator.translate("The categories have not been set"),
        "empty-category": deps.translator.translate("The category has not been set"),
        "only-one": deps.translator.translate("Only one category can be selected"),
    });
    let filtered = deps
        .bus
        .filter(filter_events::CATEGORY_VALIDATION_ERRORS, defaults.clone());

    // Malformed overrides fall back key by key
    let pick = |key: &str| {
        filtered
            .get(key)
            .and_then(|v| v.as_str())
            .or_else(|| defaults.get(key).and_then(|v| v.as_str()))
            .unwrap_or_default()
            .to_string()
    };

    CategoryErrorMessages {
        empty_categories: pick("empty-categories"),
        empty_category: pick("empty-category"),
        only_one: pick("only-one"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::CategoryId;
    use crate::domains::posts::commands::DefaultPostMutationHooks;
    use crate::kernel::{MockCustomPostApi, MockPostMetaStore, StaticExtensionBus};
    use crate::kernel::MockCategoryApi;
    use std::sync::Arc;

    struct SingleCategoryHooks;

    impl PostMutationHooks for SingleCategoryHooks {
        fn category_requirement(&self, form: &PostFormData) -> Option<CategoryRequirement> {
            form.categories
                .as_ref()
                .map(|_| CategoryRequirement::ExactlyOne)
        }
    }

    #[test]
    fn test_draft_skips_content_and_category_rules() {
        let (deps, ..) = crate::kernel::MutationDeps::for_tests();
        let form = PostFormData::builder()
            .title("A title")
            .status(PostStatus::Draft)
            .categories(vec![])
            .build();

        let mut errors = Vec::new();
        validate_content(&form, &DefaultPostMutationHooks, &deps, &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_missing_title_reported_even_for_draft() {
        let (deps, ..) = crate::kernel::MutationDeps::for_tests();
        let form = PostFormData::builder().status(PostStatus::Draft).build();

        let mut errors = Vec::new();
        validate_content(&form, &DefaultPostMutationHooks, &deps, &mut errors);
        assert_eq!(errors, vec!["The title cannot be empty"]);
    }

    #[test]
    fn test_multiple_violations_all_reported() {
        let (deps, ..) = crate::kernel::MutationDeps::for_tests();
        let form = PostFormData::builder()
            .status(PostStatus::Published)
            .categories(vec![])
            .build();

        let mut errors = Vec::new();
        validate_content(&form, &DefaultPostMutationHooks, &deps, &mut errors);
        assert_eq!(
            errors,
            vec![
                "The title cannot be empty",
                "The content cannot be empty",
                "The categories have not been set",
            ]
        );
    }

    #[test]
    fn test_exactly_one_rejects_two_categories() {
        let (deps, ..) = crate::kernel::MutationDeps::for_tests();
        let form = PostFormData::builder()
            .title("A title")
            .content("Some content")
            .status(PostStatus::Published)
            .categories(vec![CategoryId::new(), CategoryId::new()])
            .build();

        let mut errors = Vec::new();
        validate_content(&form, &SingleCategoryHooks, &deps, &mut errors);
        assert_eq!(errors, vec!["Only one category can be selected"]);
    }

    #[test]
    fn test_exactly_one_message_for_empty_selection() {
        let (deps, ..) = crate::kernel::MutationDeps::for_tests();
        let form = PostFormData::builder()
            .title("A title")
            .content("Some content")
            .status(PostStatus::Published)
            .categories(vec![])
            .build();

        let mut errors = Vec::new();
        validate_content(&form, &SingleCategoryHooks, &deps, &mut errors);
        assert_eq!(errors, vec!["The category has not been set"]);
    }

    #[test]
    fn test_category_messages_overridable_via_bus() {
        let (mut deps, ..) = crate::kernel::MutationDeps::for_tests();
        deps.bus = Arc::new(StaticExtensionBus::new().with_override(
            filter_events::CATEGORY_VALIDATION_ERRORS,
            serde_json::json!({ "empty-categories": "Pick a topic first" }),
        ));
        let form = PostFormData::builder()
            .title("A title")
            .content("Some content")
            .status(PostStatus::Published)
            .categories(vec![])
            .build();

        let mut errors = Vec::new();
        validate_content(&form, &DefaultPostMutationHooks, &deps, &mut errors);
        assert_eq!(errors, vec!["Pick a topic first"]);
    }

    #[test]
    fn test_self_reference_rejected() {
        let (deps, ..) = crate::kernel::MutationDeps::for_tests();
        let post_id = PostId::new();
        let other = PostId::new();
        let form = PostFormData::builder()
            .references(vec![post_id, other])
            .build();

        let mut errors = Vec::new();
        validate_update_content(&form, post_id, &deps, &mut errors);
        assert_eq!(errors, vec!["The post cannot be a response to itself"]);

        let form = PostFormData::builder().references(vec![other]).build();
        let mut errors = Vec::new();
        validate_update_content(&form, post_id, &deps, &mut errors);
        assert!(errors.is_empty());
    }

    #[tokio::test]
    async fn test_update_precondition_rejects_trashed_post() {
        let post_id = PostId::new();
        let (deps, ..) = crate::kernel::MutationDeps::for_tests_with(
            MockCategoryApi::new(),
            MockCustomPostApi::new().with_post(post_id, "trash"),
            MockPostMetaStore::new(),
        );

        let mut errors = Vec::new();
        validate_update(post_id, &deps, &mut errors).await.unwrap();
        assert_eq!(errors.len(), 1);
    }

    #[tokio::test]
    async fn test_update_precondition_accepts_live_statuses() {
        for status in ["draft", "pending", "publish"] {
            let post_id = PostId::new();
            let (deps, ..) = crate::kernel::MutationDeps::for_tests_with(
                MockCategoryApi::new(),
                MockCustomPostApi::new().with_post(post_id, status),
                MockPostMetaStore::new(),
            );

            let mut errors = Vec::new();
            validate_update(post_id, &deps, &mut errors).await.unwrap();
            assert!(errors.is_empty(), "status {} should be live", status);
        }
    }
}
