pub mod form_data;
pub mod post;
pub mod status;

pub use form_data::{PostCoreData, PostFormData};
pub use post::{PgPostStore, PostMeta, PostRecord};
pub use status::PostStatus;

/// Metadata keys this layer writes, keyed by post id.
pub mod meta_keys {
    pub const REFERENCES: &str = "references";
    pub const TOPICS: &str = "topics";
    pub const VOLUNTEERS_NEEDED: &str = "volunteers-needed";
    pub const APPLIES_TO: &str = "applies-to";
}
