//! Kernel module - collaborator interfaces and dependency wiring.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::MutationDeps;
pub use test_dependencies::{
    MockCategoryApi, MockCustomPostApi, MockPostMetaStore, NullTranslator, StaticExtensionBus,
};
pub use traits::*;
