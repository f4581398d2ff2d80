pub mod commands;
pub mod errors;
pub mod form;
pub mod models;
pub mod moderation;
pub mod validation;

// Re-export commands
pub use commands::{
    create_post, update_post, DefaultPostMutationHooks, MutationOutcome, PostMutationHooks,
};

// Re-export errors and models
pub use errors::MutationError;
pub use models::{PostFormData, PostStatus};
pub use validation::CategoryRequirement;

/// Named events offered to the extension bus for overrides.
pub mod filter_events {
    /// bool - whether ancestor categories are auto-added when tagging
    pub const ADD_PARENT_CATEGORIES: &str = "post-mutations:add-parent-categories";
    /// map - category validation error messages (`empty-categories`,
    /// `empty-category`, `only-one`)
    pub const CATEGORY_VALIDATION_ERRORS: &str = "post-mutations:categories-validation:error";
    /// string - the final success message shown to the author
    pub const SUCCESS_MESSAGE: &str = "post-mutations:success-message";
}
