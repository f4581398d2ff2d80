//! Parent-category expansion
//!
//! When a post is filed under nested categories, the deployment can opt in
//! (via the extension bus) to tagging the post with every ancestor category
//! as well, so the post surfaces on ancestor category pages.

use anyhow::Result;

use crate::common::CategoryId;
use crate::kernel::BaseCategoryApi;

/// Append the ancestors of each submitted category.
///
/// The list is walked by index; parents found along the way are appended
/// and later visited for their own parents, so an A -> B -> C chain yields
/// `[A, B, C]`. A category reachable through two paths appears twice -
/// downstream association upserts tolerate the duplicates. Termination
/// relies on the category graph being acyclic, which the store's
/// parent-pointer schema is expected to guarantee.
///
/// An absent list passes through as absent - callers distinguish "no
/// categories submitted" from "empty selection".
pub async fn maybe_add_parent_categories(
    categories: Option<Vec<CategoryId>>,
    include_parents: bool,
    categories_api: &dyn BaseCategoryApi,
) -> Result<Option<Vec<CategoryId>>> {
    let Some(mut categories) = categories else {
        return Ok(None);
    };
    if !include_parents {
        return Ok(Some(categories));
    }

    let mut i = 0;
    while i < categories.len() {
        let cat = categories[i];
        i += 1;

        let parents = categories_api.parents(cat).await?;
        categories.extend(parents);
    }

    Ok(Some(categories))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::MockCategoryApi;

    #[tokio::test]
    async fn test_absent_input_passes_through() {
        let api = MockCategoryApi::new();
        let out = maybe_add_parent_categories(None, true, &api).await.unwrap();
        assert_eq!(out, None);
        assert!(api.lookups().is_empty());
    }

    #[tokio::test]
    async fn test_identity_when_parents_not_requested() {
        let a = CategoryId::new();
        let b = CategoryId::new();
        let api = MockCategoryApi::new().with_parent(a, b);

        let out = maybe_add_parent_categories(Some(vec![a]), false, &api)
            .await
            .unwrap();
        assert_eq!(out, Some(vec![a]));
        assert!(api.lookups().is_empty());
    }

    #[tokio::test]
    async fn test_empty_list_stays_empty() {
        let api = MockCategoryApi::new();
        let out = maybe_add_parent_categories(Some(vec![]), true, &api)
            .await
            .unwrap();
        assert_eq!(out, Some(vec![]));
    }

    #[tokio::test]
    async fn test_chain_expands_in_append_order() {
        // A -> B -> C, C is a root
        let a = CategoryId::new();
        let b = CategoryId::new();
        let c = CategoryId::new();
        let api = MockCategoryApi::new().with_parent(a, b).with_parent(b, c);

        let out = maybe_add_parent_categories(Some(vec![a]), true, &api)
            .await
            .unwrap();
        assert_eq!(out, Some(vec![a, b, c]));
        // Every element was visited, including appended parents
        assert_eq!(api.lookups(), vec![a, b, c]);
    }

    #[tokio::test]
    async fn test_diamond_keeps_both_parents() {
        // A has two parents (improbable but representable upstream)
        let a = CategoryId::new();
        let b = CategoryId::new();
        let c = CategoryId::new();
        let api = MockCategoryApi::new().with_parents(a, vec![b, c]);

        let out = maybe_add_parent_categories(Some(vec![a]), true, &api)
            .await
            .unwrap();
        assert_eq!(out, Some(vec![a, b, c]));
    }

    #[tokio::test]
    async fn test_shared_ancestor_is_not_deduplicated() {
        // A -> C and B -> C: C appears once per path
        let a = CategoryId::new();
        let b = CategoryId::new();
        let c = CategoryId::new();
        let api = MockCategoryApi::new().with_parent(a, c).with_parent(b, c);

        let out = maybe_add_parent_categories(Some(vec![a, b]), true, &api)
            .await
            .unwrap();
        assert_eq!(out, Some(vec![a, b, c, c]));
    }
}
