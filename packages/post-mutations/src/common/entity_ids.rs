//! Typed ID definitions for the entities this crate touches.

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for custom post entities.
pub struct CustomPost;

/// Marker type for taxonomy category entities.
pub struct Category;

/// Marker type for media library entities (featured images).
pub struct MediaItem;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for custom posts.
pub type PostId = Id<CustomPost>;

/// Typed ID for taxonomy categories.
pub type CategoryId = Id<Category>;

/// Typed ID for media items.
pub type MediaItemId = Id<MediaItem>;
