//! Containment path assembly.

use super::ids::IdRegistry;
use super::{CLUSTER_TYPE, NODE_TYPE};

/// Join the ancestors of a node into `node<id>/node<id>/...`, most distant first.
///
/// Ancestors not yet registered are assigned ids as a side effect. An empty
/// chain yields an empty string, meaning the node sits directly under the root.
pub fn assemble_path(registry: &mut IdRegistry, ancestors: &[String]) -> String {
    ancestors
        .iter()
        .map(|parent| format!("{}{}", NODE_TYPE, registry.get_or_create(parent).uid))
        .collect::<Vec<_>>()
        .join("/")
}

/// Full containment path of a node below the cluster root
pub fn containment_path(ancestor_path: &str, type_label: &str, uid: u32) -> String {
    if ancestor_path.is_empty() {
        format!("/{}/{}{}", CLUSTER_TYPE, type_label, uid)
    } else {
        format!("/{}/{}/{}{}", CLUSTER_TYPE, ancestor_path, type_label, uid)
    }
}

/// Containment path of the cluster root
pub fn root_path() -> String {
    format!("/{}", CLUSTER_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::INSTANCE_TYPE;

    fn chain(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_assemble_path_resolves_ids() {
        let mut registry = IdRegistry::new();
        let path = assemble_path(&mut registry, &chain(&["sw-top", "sw-mid", "sw-leaf"]));

        assert_eq!(path, "node1/node2/node3");
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_assemble_path_is_idempotent() {
        let mut registry = IdRegistry::new();
        let ancestors = chain(&["sw-top", "sw-leaf"]);

        let first = assemble_path(&mut registry, &ancestors);
        let second = assemble_path(&mut registry, &ancestors);

        assert_eq!(first, second);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_empty_chain_is_empty_path() {
        let mut registry = IdRegistry::new();
        assert_eq!(assemble_path(&mut registry, &[]), "");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_containment_path_collapses_without_ancestors() {
        assert_eq!(containment_path("", INSTANCE_TYPE, 1), "/cluster/instance1");
        assert_eq!(containment_path("node1/node2", INSTANCE_TYPE, 3), "/cluster/node1/node2/instance3");
        assert_eq!(root_path(), "/cluster");
    }
}
