use std::path::Path;

#[test]
fn demos_load_and_validate() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos");
    for name in ["ring.yaml"] {
        let doc = gn_project::load(&root.join(name))
            .unwrap_or_else(|e| panic!("Failed to load {name}: {e}"));
        assert_eq!(doc.stations.len(), 2);
        assert_eq!(doc.pipe("P-2").map(|p| p.oriented()), Some(("AS-2", "V-1")));
    }
}
