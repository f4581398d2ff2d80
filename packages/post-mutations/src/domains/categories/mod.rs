pub mod expand;
pub mod models;

pub use expand::maybe_add_parent_categories;
pub use models::category::{Category, PgCategoryStore};
