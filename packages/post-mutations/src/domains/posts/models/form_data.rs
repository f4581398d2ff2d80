use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::common::{CategoryId, MediaItemId, PostId};
use crate::domains::posts::models::PostStatus;

/// Submitted form data for one create/update mutation.
///
/// Built once per request from the raw submission (see
/// `domains::posts::form`) and never persisted as-is. `None` means the
/// field was not part of the submission, which several rules distinguish
/// from an empty value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct PostFormData {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<PostStatus>,
    pub featured_image: Option<MediaItemId>,
    pub categories: Option<Vec<CategoryId>>,
    pub references: Option<Vec<PostId>>,
    pub topics: Option<Vec<CategoryId>>,
    pub volunteers_needed: Option<i32>,
    pub applies_to: Option<Vec<CategoryId>>,
}

/// Core post fields handed to the post store.
///
/// On update, `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default)]
pub struct PostCoreData {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<PostStatus>,
}
