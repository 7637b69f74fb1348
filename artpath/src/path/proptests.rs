//! Property-based tests for path derivations.
//!
//! The flavour module has its own properties for root splitting. This module
//! focuses on the path object.

use super::ArtifactoryPath;
use crate::config::RootRegistry;
use proptest::prelude::*;

// Plain components that the parser keeps verbatim
fn component_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,12}(\\.[a-z]{1,4})?"
}

fn components_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(component_strategy(), 0..6)
}

fn url(repo: &str, components: &[String]) -> String {
    format!("http://host/artifactory/{repo}/{}", components.join("/"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Rendering and re-parsing gives back the same path
    #[test]
    fn display_round_trips(repo in component_strategy(), components in components_strategy()) {
        let registry = RootRegistry::new();
        let path = ArtifactoryPath::new(&registry, &url(&repo, &components));
        let reparsed = ArtifactoryPath::new(&registry, &path.to_string());
        prop_assert_eq!(reparsed, path);
    }

    // The anchor is always the first component of an absolute path
    #[test]
    fn anchor_is_first_part(repo in component_strategy(), components in components_strategy()) {
        let registry = RootRegistry::new();
        let path = ArtifactoryPath::new(&registry, &url(&repo, &components));
        prop_assert!(path.is_absolute());
        prop_assert_eq!(path.parts()[0].as_str(), path.anchor());
        prop_assert_eq!(path.parts().len(), components.len() + 1);
    }

    // Joining then taking the parent undoes the join
    #[test]
    fn parent_of_join(repo in component_strategy(), components in components_strategy(), extra in component_strategy()) {
        let registry = RootRegistry::new();
        let path = ArtifactoryPath::new(&registry, &url(&repo, &components));
        prop_assert_eq!((&path / extra.as_str()).parent(), path);
    }

    // Joining a path relative to an ancestor back onto the ancestor is identity
    #[test]
    fn relative_to_then_join(
        repo in component_strategy(),
        base in components_strategy(),
        rest in components_strategy(),
    ) {
        let registry = RootRegistry::new();
        let mut all = base.clone();
        all.extend(rest.iter().cloned());

        let ancestor = ArtifactoryPath::new(&registry, &url(&repo, &base));
        let path = ArtifactoryPath::new(&registry, &url(&repo, &all));
        let rel = path.relative_to_path(&ancestor).unwrap();

        prop_assert!(!rel.is_absolute());
        prop_assert_eq!(rel.parts().len(), rest.len());
        prop_assert_eq!(ancestor.join_path(&rel), path);
    }

    // Parents terminate at the anchor
    #[test]
    fn parents_end_at_anchor(repo in component_strategy(), components in prop::collection::vec(component_strategy(), 1..6)) {
        let registry = RootRegistry::new();
        let path = ArtifactoryPath::new(&registry, &url(&repo, &components));
        let parents: Vec<_> = path.parents().collect();
        prop_assert_eq!(parents.len(), components.len());
        let last = parents.last().unwrap();
        prop_assert_eq!(last.to_string(), last.anchor());
    }
}
