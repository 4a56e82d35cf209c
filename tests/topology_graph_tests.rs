#[cfg(test)]
mod topology_graph_tests {
    use std::collections::{BTreeSet, HashMap};
    use std::io::Write;

    use flextopo::engine::LocalContext;
    use flextopo::error::TopologyError;
    use flextopo::graph::{GraphBuilder, JsonGraph};
    use flextopo::orchestrator::generate_topology;
    use flextopo::topology::{InstanceRecord, SnapshotSource, TopologyQuery};

    fn record(id: &str, chain: &[&str]) -> InstanceRecord {
        InstanceRecord::new(id, chain.iter().map(|n| n.to_string()).collect())
    }

    /// (source, target, containment) for every edge
    fn edge_set(graph: &JsonGraph) -> BTreeSet<(String, String, String)> {
        graph
            .graph
            .edges
            .iter()
            .map(|e| {
                (
                    e.source.clone(),
                    e.target.clone(),
                    e.metadata.edge_containment().unwrap_or_default().to_string(),
                )
            })
            .collect()
    }

    fn uid_of(graph: &JsonGraph, label: &str) -> String {
        graph.node_by_label(label).expect("node exists").id.clone()
    }

    /// Assert exactly one "contains" and one "in" edge between parent and child
    fn assert_linked(graph: &JsonGraph, parent: &str, child: &str) {
        let contains: Vec<_> = graph.edges_between(parent, child).collect();
        let inside: Vec<_> = graph.edges_between(child, parent).collect();
        assert_eq!(contains.len(), 1, "{} -> {}", parent, child);
        assert_eq!(inside.len(), 1, "{} -> {}", child, parent);
        assert_eq!(contains[0].metadata.edge_containment(), Some("contains"));
        assert_eq!(inside[0].metadata.edge_containment(), Some("in"));
    }

    #[test]
    fn test_two_level_chain() {
        let mut builder = GraphBuilder::new();
        let graph = builder.build(&[record("i-0abc", &["sw-top", "sw-leaf"])]);

        assert_eq!(graph.graph.nodes.len(), 4);
        assert_eq!(uid_of(&graph, "cluster"), "0");
        assert_eq!(uid_of(&graph, "sw-top"), "1");
        assert_eq!(uid_of(&graph, "sw-leaf"), "2");
        assert_eq!(uid_of(&graph, "i-0abc"), "3");

        assert_eq!(graph.graph.edges.len(), 6);
        assert_linked(&graph, "0", "1");
        assert_linked(&graph, "1", "2");
        assert_linked(&graph, "2", "3");

        let instance = graph.node("3").unwrap();
        assert_eq!(instance.metadata.containment_path(), Some("/cluster/node1/node2/instance3"));
        assert_eq!(instance.metadata.get("type").and_then(|v| v.as_str()), Some("instance"));
    }

    #[test]
    fn test_empty_chain_attaches_to_root() {
        let mut builder = GraphBuilder::new();
        let graph = builder.build(&[record("i-lonely", &[])]);

        assert_eq!(graph.graph.nodes.len(), 2);
        assert_eq!(uid_of(&graph, "i-lonely"), "1");
        assert_eq!(graph.graph.edges.len(), 2);
        assert_linked(&graph, "0", "1");
        assert_eq!(graph.node("1").unwrap().metadata.containment_path(), Some("/cluster/instance1"));
    }

    #[test]
    fn test_shared_prefix_is_created_once() {
        let mut builder = GraphBuilder::new();
        let graph = builder.build(&[
            record("i-1", &["sw-top", "sw-a"]),
            record("i-2", &["sw-top", "sw-b"]),
        ]);

        assert_eq!(graph.graph.nodes.len(), 6);
        assert_eq!(graph.graph.nodes.iter().filter(|n| n.label == "sw-top").count(), 1);

        let top = uid_of(&graph, "sw-top");
        let a = uid_of(&graph, "sw-a");
        let b = uid_of(&graph, "sw-b");
        assert_linked(&graph, "0", &top);
        assert_linked(&graph, &top, &a);
        assert_linked(&graph, &top, &b);
        assert_linked(&graph, &a, &uid_of(&graph, "i-1"));
        assert_linked(&graph, &b, &uid_of(&graph, "i-2"));

        let children = graph
            .graph
            .edges
            .iter()
            .filter(|e| e.source == top && e.metadata.edge_containment() == Some("contains"))
            .count();
        assert_eq!(children, 2);
        assert_eq!(graph.graph.edges.len(), 10);
    }

    #[test]
    fn test_zero_instances_is_empty_result() {
        let mut snapshot = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(snapshot, "{{\"Instances\": []}}").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("graph.json");

        let mut builder = GraphBuilder::new();
        let mut engine = LocalContext::new();
        let err = generate_topology(
            &mut builder,
            &SnapshotSource::new(snapshot.path()),
            &TopologyQuery::default(),
            &mut engine,
            "first",
            Some(&output),
        )
        .unwrap_err();

        assert!(matches!(err, TopologyError::EmptyResult { .. }));
        assert!(!output.exists());
        assert!(engine.loaded().is_none());
    }

    #[test]
    fn test_repeated_relations_are_not_duplicated() {
        let mut builder = GraphBuilder::new();
        let graph = builder.build(&[
            record("i-1", &["sw-top", "sw-mid", "sw-a"]),
            record("i-2", &["sw-top", "sw-mid", "sw-a"]),
            record("i-3", &["sw-top", "sw-mid", "sw-b"]),
        ]);

        let mut counts: HashMap<(String, String), usize> = HashMap::new();
        for edge in &graph.graph.edges {
            *counts.entry((edge.source.clone(), edge.target.clone())).or_default() += 1;
        }
        assert!(counts.values().all(|&count| count == 1));

        // root, top, mid, a, b, three instances
        assert_eq!(graph.graph.nodes.len(), 8);
        assert_eq!(graph.graph.edges.len(), 2 * 7);
    }

    #[test]
    fn test_ids_increase_in_first_appearance_order() {
        let mut builder = GraphBuilder::new();
        let graph = builder.build(&[
            record("i-1", &["n-1", "n-2"]),
            record("i-2", &["n-3", "n-1"]),
        ]);

        let order = ["n-1", "n-2", "i-1", "n-3", "i-2"];
        for (expected, label) in order.iter().enumerate() {
            assert_eq!(uid_of(&graph, label), (expected + 1).to_string(), "{}", label);
        }
        assert_eq!(graph.node("0").unwrap().label, "cluster");
    }

    #[test]
    fn test_serialized_graph_round_trips() {
        let mut builder = GraphBuilder::new();
        let mut first = record("i-1", &["sw-top", "sw-a"]);
        first.availability_zone = Some("us-east-2a".to_string());
        first.instance_type = Some("p4d.24xlarge".to_string());
        first.zone_id = Some("use2-az1".to_string());
        first.group_name = Some("ml-group".to_string());
        let graph = builder.build(&[first, record("i-2", &["sw-top", "sw-b"]), record("i-3", &[])]);

        let bytes = graph.to_bytes().unwrap();
        let parsed = JsonGraph::from_slice(&bytes).unwrap();

        let ids = |g: &JsonGraph| g.graph.nodes.iter().map(|n| n.id.clone()).collect::<BTreeSet<_>>();
        assert_eq!(ids(&parsed), ids(&graph));
        for node in &graph.graph.nodes {
            assert_eq!(parsed.node(&node.id), Some(node));
        }
        assert_eq!(edge_set(&parsed), edge_set(&graph));
        assert_eq!(parsed.graph.edges.len(), graph.graph.edges.len());

        let instance = parsed.node_by_label("i-1").unwrap();
        assert_eq!(instance.metadata.get("zone_id").and_then(|v| v.as_str()), Some("use2-az1"));
        assert_eq!(instance.metadata.get("group").and_then(|v| v.as_str()), Some("ml-group"));
    }

    #[test]
    fn test_snapshot_to_engine() {
        let json = r#"{
            "Instances": [
                {"InstanceId": "i-1", "GroupName": "g1", "AvailabilityZone": "us-east-2a",
                 "NetworkNodes": ["nn-top", "nn-mid", "nn-leaf-1"]},
                {"InstanceId": "i-2", "GroupName": "g1", "AvailabilityZone": "us-east-2a",
                 "NetworkNodes": ["nn-top", "nn-mid", "nn-leaf-2"]},
                {"InstanceId": "i-3", "GroupName": "g2", "AvailabilityZone": "us-east-2b",
                 "NetworkNodes": ["nn-top", "nn-other", "nn-leaf-3"]}
            ]
        }"#;
        let mut snapshot = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(snapshot, "{}", json).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("graph.json");

        let source = SnapshotSource::new(snapshot.path()).with_region("us-east-2");
        let mut builder = GraphBuilder::new();
        let mut engine = LocalContext::new();
        let summary = generate_topology(
            &mut builder,
            &source,
            &TopologyQuery::new(Some("g1"), None),
            &mut engine,
            "first",
            Some(&output),
        )
        .unwrap();

        // root, nn-top, nn-mid, two leaves, two instances
        assert_eq!(summary.instance_count, 2);
        assert_eq!(summary.node_count, 7);
        assert_eq!(summary.edge_count, 12);

        let saved = JsonGraph::from_slice(&std::fs::read(&output).unwrap()).unwrap();
        assert_eq!(saved.graph.nodes.len(), 7);
        assert!(saved.node_by_label("nn-other").is_none());
        assert_eq!(engine.loaded().unwrap().node_count, 7);
    }

    #[test]
    fn test_builder_is_reusable_across_runs() {
        let mut builder = GraphBuilder::new();
        let first = builder.build(&[record("i-1", &["sw-x", "sw-y"])]);
        let second = builder.build(&[record("i-1", &["sw-x", "sw-y"])]);

        assert_eq!(first, second);
    }
}
