//! Moderation status clamping
//!
//! Maps whatever status the author asked for onto one the deployment
//! permits. Moderated sites hold everything that is not a draft for admin
//! review; non-moderated sites only ever produce drafts or published posts.

use crate::domains::posts::models::PostStatus;

/// Clamp the requested status for a create mutation. An absent request
/// falls to the deployment default (pending review, or straight to
/// published without moderation).
pub fn create_status(requested: Option<PostStatus>, moderation_enabled: bool) -> PostStatus {
    clamp(requested, moderation_enabled)
}

/// Clamp a status supplied in an update payload. Callers skip this when
/// the update carries no status at all.
pub fn update_status(requested: PostStatus, moderation_enabled: bool) -> PostStatus {
    clamp(Some(requested), moderation_enabled)
}

fn clamp(requested: Option<PostStatus>, moderation_enabled: bool) -> PostStatus {
    match (requested, moderation_enabled) {
        (Some(PostStatus::Draft), _) => PostStatus::Draft,
        (Some(PostStatus::Pending), true) => PostStatus::Pending,
        // Publishing directly requires admin action on a moderated site
        (Some(PostStatus::Published), true) | (None, true) => PostStatus::Pending,
        // Without moderation there is no pending state to land in
        (_, false) => PostStatus::Published,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PostStatus::*;

    #[test]
    fn test_moderated_never_yields_published() {
        assert_eq!(create_status(Some(Published), true), Pending);
        assert_eq!(create_status(Some(Pending), true), Pending);
        assert_eq!(create_status(Some(Draft), true), Draft);
        assert_eq!(create_status(None, true), Pending);
    }

    #[test]
    fn test_unmoderated_yields_only_draft_or_published() {
        assert_eq!(create_status(Some(Draft), false), Draft);
        assert_eq!(create_status(Some(Pending), false), Published);
        assert_eq!(create_status(Some(Published), false), Published);
        assert_eq!(create_status(None, false), Published);
    }

    #[test]
    fn test_update_applies_the_same_table() {
        assert_eq!(update_status(Published, true), Pending);
        assert_eq!(update_status(Pending, false), Published);
        assert_eq!(update_status(Draft, true), Draft);
    }
}
