mod common;

use gn_project::{load, load_json, load_yaml, save_json, save_yaml};

#[test]
fn roundtrip_yaml() {
    let doc = common::small_network();
    let path = std::env::temp_dir().join("gn_project_roundtrip.yaml");
    save_yaml(&path, &doc).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(doc, loaded);
}

#[test]
fn roundtrip_json() {
    let mut doc = common::small_network();
    doc.optimizer = Some(gn_project::OptimizerDef {
        population_size: Some(12),
        seed: Some(9),
        ..Default::default()
    });
    let path = std::env::temp_dir().join("gn_project_roundtrip.json");
    save_json(&path, &doc).unwrap();
    let loaded = load_json(&path).unwrap();
    assert_eq!(doc, loaded);
    assert_eq!(load(&path).unwrap(), doc);
}

#[test]
fn unknown_extension_is_rejected() {
    let path = std::env::temp_dir().join("gn_project_roundtrip.toml");
    assert!(matches!(
        load(&path),
        Err(gn_project::ProjectError::UnknownFormat { .. })
    ));
}

#[test]
fn defaults_fill_optional_fields() {
    let yaml = r#"
version: 1
name: defaults
fluid: { code: 2, temperature_c: 15.0 }
nodes:
  - { id: AS-1, kind: { type: Station } }
  - { id: U-1, kind: { type: User } }
pipes:
  - id: P-1
    from: AS-1
    to: U-1
    sections: [ { length_m: 100.0, diameter_mm: 100.0 } ]
    bends: [ { count: 1, angle_deg: 45.0 } ]
users:
  - { id: U-1, pipe: P-1, demand_m3_min: 10.0, min_pressure_kpa: 400.0 }
stations:
  - id: AS-1
    pipe: P-1
    pressure_kpa: 650.0
    compressors: { count: 1, max_flow_m3_min: 50.0, min_degree_pct: 60.0 }
"#;
    let doc: gn_project::NetworkDoc = serde_yaml::from_str(yaml).unwrap();
    gn_project::validate_network(&doc).unwrap();
    let pipe = &doc.pipes[0];
    assert_eq!(pipe.direction, 1);
    assert_eq!(pipe.sections[0].roughness_mm, 0.1);
    assert_eq!(pipe.bends[0].radius_ratio, 1.5);
    assert!(doc.valves.is_empty());
    assert!(doc.optimizer.is_none());
}
