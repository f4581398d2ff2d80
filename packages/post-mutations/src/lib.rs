// Community post mutation pipeline
//
// Site-specific create/update rules for custom posts: validation,
// moderation-status clamping, parent-category expansion, and auxiliary
// metadata side effects. Persistence, category hierarchy, translation,
// and extension filtering live behind collaborator traits in `kernel`.

pub mod common;
pub mod config;
pub mod db;
pub mod domains;
pub mod kernel;

pub use config::SiteConfig;
pub use domains::posts::commands::{
    create_post, update_post, DefaultPostMutationHooks, MutationOutcome, PostMutationHooks,
};
pub use domains::posts::errors::MutationError;
pub use kernel::MutationDeps;
