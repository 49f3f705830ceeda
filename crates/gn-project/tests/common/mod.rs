// Shared fixture for the document tests.

use gn_project::*;

pub fn small_network() -> NetworkDoc {
    NetworkDoc {
        version: 1,
        name: "Single line".to_string(),
        fluid: FluidDef {
            code: 1,
            temperature_c: 20.0,
        },
        nodes: vec![
            NodeDef {
                id: "AS-1".to_string(),
                kind: NodeKind::Station,
            },
            NodeDef {
                id: "V-1".to_string(),
                kind: NodeKind::Fitting,
            },
            NodeDef {
                id: "U-1".to_string(),
                kind: NodeKind::User,
            },
        ],
        pipes: vec![
            PipeDef {
                id: "P-1".to_string(),
                from: "AS-1".to_string(),
                to: "V-1".to_string(),
                direction: 1,
                sections: vec![SectionDef {
                    length_m: 300.0,
                    diameter_mm: 150.0,
                    roughness_mm: 0.1,
                }],
                bends: vec![BendDef {
                    count: 2,
                    angle_deg: 90.0,
                    radius_ratio: 1.5,
                }],
            },
            PipeDef {
                id: "P-2".to_string(),
                from: "V-1".to_string(),
                to: "U-1".to_string(),
                direction: 1,
                sections: vec![SectionDef {
                    length_m: 200.0,
                    diameter_mm: 150.0,
                    roughness_mm: 0.1,
                }],
                bends: vec![],
            },
        ],
        valves: vec![],
        reducers: vec![],
        limit_flow_valves: vec![],
        limit_drop_valves: vec![],
        limit_pressure_valves: vec![LimitPressureDef {
            id: "V-1".to_string(),
            pipe: "P-2".to_string(),
            set_pressure_kpa: 600.0,
            flow_direction: None,
        }],
        users: vec![UserDef {
            id: "U-1".to_string(),
            pipe: "P-2".to_string(),
            demand_m3_min: 60.0,
            min_pressure_kpa: 500.0,
        }],
        stations: vec![StationDef {
            id: "AS-1".to_string(),
            pipe: "P-1".to_string(),
            pressure_kpa: 700.0,
            compressors: CompressorsDef {
                count: 3,
                max_flow_m3_min: 100.0,
                min_degree_pct: 70.0,
            },
            power: None,
        }],
        optimizer: None,
    }
}
