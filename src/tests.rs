//!
//! # Integration Tests
//!
//! Document-to-layout scenarios exercising the parser, registries,
//! synthesis, and assembly together.
//!

use crate::components::ComponentRegistry;
use crate::design::Layout;
use crate::error::{RfError, RfResult};
use crate::pdk::{LayerSpec, PdkRegistry};
use crate::ser::{SerializationFormat, SerdeFile};
use crate::yaml::{parse_design, validate_document};

fn assemble_str(doc: &str) -> RfResult<Layout> {
    let doc: serde_yaml::Value = serde_yaml::from_str(doc).unwrap();
    let components = ComponentRegistry::with_builtins();
    let pdks = PdkRegistry::with_builtins();
    let mut design = parse_design(doc, &components, &pdks)?;
    design.assemble()
}

#[test]
fn cpw_line_document() -> RfResult<()> {
    let layout = assemble_str(
        r#"
        name: cpw_test
        technology: generic
        components:
          - name: cpw1
            type: cpw_line
            parameters:
              length: 100.0
              width: 10.0
              gap: 5.0
              ground_width: 10.0
        "#,
    )?;
    assert_eq!(layout.cells.len(), 1);
    let cell = &layout.cells[0];
    assert_eq!(cell.name, "cpw1");
    // Center conductor plus both grounds, all on the default layer
    assert_eq!(cell.elems.len(), 3);
    for elem in &cell.elems {
        assert_eq!(elem.layer, LayerSpec(1, 0));
    }
    assert!(cell.ports.contains_key("in"));
    assert!(cell.ports.contains_key("out"));
    Ok(())
}

#[test]
fn wilkinson_document_ports() -> RfResult<()> {
    let layout = assemble_str(
        r#"
        name: divider_test
        technology: generic
        components:
          - name: div1
            type: wilkinson_divider
            parameters:
              radius: 100.0
              width: 10.0
              isolation_resistor_width: 5.0
              isolation_resistor_length: 20.0
        "#,
    )?;
    let cell = &layout.cells[0];
    let names: Vec<&str> = cell.ports.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["in", "out1", "out2"]);
    Ok(())
}

#[test]
fn mim_capacitor_document() -> RfResult<()> {
    let layout = assemble_str(
        r#"
        name: cap_test
        technology: generic
        components:
          - name: cap1
            type: mim_capacitor
            position: [500.0, 500.0]
            parameters:
              width: 20.0
              length: 30.0
        "#,
    )?;
    let cell = &layout.cells[0];
    // Bottom plate, dielectric, and top plate
    assert_eq!(cell.elems.len(), 3);
    assert_eq!(cell.elems[0].layer, LayerSpec(2, 0));
    assert_eq!(cell.elems[1].layer, LayerSpec(3, 0));
    assert_eq!(cell.elems[2].layer, LayerSpec(1, 0));
    // Ports land in the global frame
    let p1 = &cell.ports["p1"];
    assert_eq!(p1.loc.x, 515.);
    assert_eq!(p1.loc.y, 511.);
    assert!(cell.ports.contains_key("p2"));
    Ok(())
}

#[test]
fn cells_follow_document_order() -> RfResult<()> {
    let layout = assemble_str(
        r#"
        name: ordered
        technology: generic
        components:
          - {name: a, type: microstrip_line, parameters: {length: 10.0, width: 2.0}}
          - {name: b, type: microstrip_line, parameters: {length: 10.0, width: 2.0}}
          - {name: c, type: microstrip_line, parameters: {length: 10.0, width: 2.0}}
        "#,
    )?;
    let names: Vec<&str> = layout.cells.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    Ok(())
}

#[test]
fn document_assembly_is_idempotent() -> RfResult<()> {
    let doc = r#"
        name: twice
        technology: generic
        components:
          - name: spiral1
            type: spiral_inductor
            position: [250.0, 250.0]
            rotation: 30.0
            parameters:
              n_turns: 3.5
              width: 5.0
              spacing: 10.0
              inner_radius: 20.0
        "#;
    let first = assemble_str(doc)?;
    let second = assemble_str(doc)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn unknown_technology_fails_the_parse() {
    let result = assemble_str(
        r#"
        name: missing_tech
        technology: sky130
        components: []
        "#,
    );
    assert!(matches!(result, Err(RfError::UnknownTechnology(_))));
}

#[test]
fn symbolic_layers_in_documents() -> RfResult<()> {
    let layout = assemble_str(
        r#"
        name: named_layers
        technology: generic
        components:
          - name: line1
            type: microstrip_line
            parameters:
              length: 50.0
              width: 5.0
              layer: metal2
        "#,
    )?;
    assert_eq!(layout.cells[0].elems[0].layer, LayerSpec(2, 0));
    Ok(())
}

#[test]
fn bad_parameters_abort_assembly() {
    let result = assemble_str(
        r#"
        name: bad_params
        technology: generic
        components:
          - name: line1
            type: microstrip_line
            parameters:
              length: -50.0
              width: 5.0
        "#,
    );
    assert!(matches!(result, Err(RfError::Parameter(_))));
}

#[test]
fn layout_serde_round_trip() -> RfResult<()> {
    let layout = assemble_str(
        r#"
        name: round_trip
        technology: generic
        components:
          - name: ring1
            type: rat_race_coupler
            position: [1000.0, 1000.0]
            parameters: {radius: 60.0, width: 6.0}
        "#,
    )?;
    for fmt in [SerializationFormat::Json, SerializationFormat::Yaml] {
        let s = fmt.to_string(&layout)?;
        let back: Layout = fmt.from_str(&s)?;
        assert_eq!(back, layout);
    }
    Ok(())
}

#[test]
fn layout_file_round_trip() -> RfResult<()> {
    let layout = assemble_str(
        r#"
        name: file_round_trip
        technology: generic
        components:
          - name: c1
            type: branch_line_coupler
            parameters: {size: 80.0, width: 8.0}
        "#,
    )?;
    let dir = std::env::temp_dir();
    let path = dir.join("rf21_layout_roundtrip.json");
    layout.save(SerializationFormat::Json, &path)?;
    let back = Layout::open(&path, SerializationFormat::Json)?;
    assert_eq!(back, layout);
    std::fs::remove_file(&path)?;
    Ok(())
}

#[test]
fn full_component_sweep() -> RfResult<()> {
    // One instance of every built-in type, assembled together
    let layout = assemble_str(
        r#"
        name: sweep
        technology: generic
        components:
          - {name: t1, type: microstrip_line, parameters: {length: 100.0, width: 10.0}}
          - {name: t2, type: tapered_microstrip_line, parameters: {length: 50.0, width_in: 10.0, width_out: 4.0}}
          - {name: t3, type: curved_microstrip_line, parameters: {radius: 50.0, width: 10.0}}
          - {name: t4, type: cpw_line, parameters: {length: 100.0, width: 10.0, gap: 5.0}}
          - {name: t5, type: cpw_bend, parameters: {radius: 50.0, width: 10.0, gap: 5.0}}
          - {name: t6, type: cpw_taper, parameters: {length: 40.0, width_in: 10.0, width_out: 4.0, gap_in: 5.0, gap_out: 2.0}}
          - {name: p1, type: spiral_inductor, parameters: {n_turns: 3.5, width: 5.0, spacing: 10.0, inner_radius: 20.0}}
          - {name: p2, type: symmetric_inductor, parameters: {n_turns: 4.0, width: 5.0, spacing: 10.0, inner_radius: 20.0}}
          - {name: p3, type: solenoid_inductor, parameters: {n_turns: 4, width: 2.0, length: 100.0, diameter: 20.0}}
          - {name: p4, type: mim_capacitor, parameters: {width: 20.0, length: 30.0}}
          - {name: p5, type: interdigitated_capacitor, parameters: {n_fingers: 5, finger_length: 50.0, finger_width: 4.0, finger_spacing: 3.0}}
          - {name: p6, type: parallel_plate_capacitor, parameters: {width: 10.0, length: 40.0, plate_spacing: 4.0}}
          - {name: s1, type: wilkinson_divider, parameters: {radius: 100.0, width: 10.0, isolation_resistor_width: 5.0, isolation_resistor_length: 20.0}}
          - {name: s2, type: branch_line_coupler, parameters: {size: 80.0, width: 8.0}}
          - {name: s3, type: rat_race_coupler, parameters: {radius: 60.0, width: 6.0}}
        "#,
    )?;
    assert_eq!(layout.cells.len(), 15);
    // Per-type polygon counts
    let counts: Vec<usize> = layout.cells.iter().map(|c| c.elems.len()).collect();
    assert_eq!(counts, vec![1, 1, 1, 3, 3, 3, 2, 2, 11, 3, 7, 2, 6, 4, 5]);
    assert_eq!(layout.num_elems(), 54);
    Ok(())
}

#[test]
fn validation_runs_without_registries() {
    // Schema checking is advisory and independent of parsing
    let doc: serde_yaml::Value = serde_yaml::from_str(
        r#"
        technology: generic
        components:
          - type: anything_at_all
        "#,
    )
    .unwrap();
    let errors = validate_document(&doc);
    assert_eq!(errors.len(), 2);
    assert!(errors.contains(&"Missing required field: name".to_string()));
    assert!(errors.contains(&"Component 0: Missing required field: name".to_string()));
}
