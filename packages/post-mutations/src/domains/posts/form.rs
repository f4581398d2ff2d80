//! Form-surface intake
//!
//! Builds `PostFormData` from the raw JSON submission produced by the
//! form/module layer. Field values are read by named input identifier;
//! collection inputs that are switched on for the deployment fall back to
//! empty lists when the author submitted nothing.

use anyhow::{Context, Result};
use serde_json::Value as JsonValue;

use crate::common::Id;
use crate::config::SiteConfig;
use crate::domains::posts::commands::PostMutationHooks;
use crate::domains::posts::models::{PostFormData, PostStatus};

/// Named form input identifiers.
pub mod inputs {
    pub const TITLE: &str = "title";
    pub const CONTENT: &str = "content";
    pub const STATUS: &str = "status";
    pub const KEEP_AS_DRAFT: &str = "keep-as-draft";
    pub const FEATURED_IMAGE: &str = "featured-image";
    pub const CATEGORIES: &str = "categories";
    pub const REFERENCES: &str = "references";
    pub const TOPICS: &str = "topics";
    pub const VOLUNTEERS_NEEDED: &str = "volunteers-needed";
    pub const APPLIES_TO: &str = "applies-to";
}

/// Build the form data for one mutation from a raw submission.
///
/// Status derivation depends on the deployment: moderated sites expose an
/// explicit draft/pending/publish select; non-moderated sites expose only
/// a keep-as-draft flag, so the outcome is draft or publish.
pub fn form_data_from_submission(
    submission: &JsonValue,
    hooks: &dyn PostMutationHooks,
    config: &SiteConfig,
) -> Result<PostFormData> {
    let mut form = PostFormData::default();

    if hooks.supports_title() {
        form.title = string_input(submission, inputs::TITLE);
    }
    form.content = string_input(submission, inputs::CONTENT);
    form.featured_image = id_input(submission, inputs::FEATURED_IMAGE)?;
    form.categories = id_list_input(submission, inputs::CATEGORIES)?;

    form.status = if config.moderation_enabled {
        match string_input(submission, inputs::STATUS) {
            Some(raw) => Some(
                raw.parse::<PostStatus>()
                    .with_context(|| format!("{} is not a submittable status", raw))?,
            ),
            None => None,
        }
    } else {
        let keep_as_draft = submission
            .get(inputs::KEEP_AS_DRAFT)
            .and_then(JsonValue::as_bool)
            .unwrap_or(false);
        Some(if keep_as_draft {
            PostStatus::Draft
        } else {
            PostStatus::Published
        })
    };

    if config.references_enabled && hooks.collect_references() {
        form.references = Some(id_list_input(submission, inputs::REFERENCES)?.unwrap_or_default());
    }

    if config.categories_enabled {
        form.topics = Some(id_list_input(submission, inputs::TOPICS)?.unwrap_or_default());
    }

    if config.volunteering_enabled
        && config.volunteer_inputs_enabled
        && hooks.collect_volunteer_inputs()
    {
        form.volunteers_needed = submission
            .get(inputs::VOLUNTEERS_NEEDED)
            .and_then(JsonValue::as_i64)
            .map(|v| v as i32);
    }

    if config.applies_to_enabled {
        form.applies_to = Some(id_list_input(submission, inputs::APPLIES_TO)?.unwrap_or_default());
    }

    Ok(form)
}

fn string_input(submission: &JsonValue, name: &str) -> Option<String> {
    submission
        .get(name)
        .and_then(JsonValue::as_str)
        .map(ToString::to_string)
}

fn id_input<T>(submission: &JsonValue, name: &str) -> Result<Option<Id<T>>> {
    match submission.get(name) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .with_context(|| format!("{} must be an id", name)),
    }
}

fn id_list_input<T>(submission: &JsonValue, name: &str) -> Result<Option<Vec<Id<T>>>> {
    match submission.get(name) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .with_context(|| format!("{} must be a list of ids", name)),
    }
}
