//!
//! # Design-Document Loading
//!
//! Parses declarative YAML design documents into [Design]s: serde-shaped
//! document structs, the advisory schema checker, and the file loader.
//!

// Std-Lib
use std::collections::BTreeMap;
use std::path::Path;

// Crates.io
use serde::{Deserialize, Serialize};

// Local Imports
use crate::components::{Component, ComponentRegistry, Connection};
use crate::design::Design;
use crate::error::{RfError, RfResult};
use crate::geom::Point;
use crate::pdk::PdkRegistry;

fn default_design_name() -> String {
    "unnamed_design".to_string()
}
fn default_technology() -> String {
    "generic".to_string()
}
fn default_units() -> String {
    "um".to_string()
}
fn default_params() -> serde_yaml::Value {
    serde_yaml::Value::Null
}

/// # Design Document
///
/// The serde shape of a top-level YAML design document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DesignDoc {
    /// Design Name
    #[serde(default = "default_design_name")]
    pub name: String,
    /// Technology Name
    #[serde(default = "default_technology")]
    pub technology: String,
    /// Distance Units
    #[serde(default = "default_units")]
    pub units: String,
    /// Free-Form Metadata
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_yaml::Value>,
    /// Component Entries
    #[serde(default)]
    pub components: Vec<ComponentDoc>,
}

/// # Component Document Entry
///
/// The serde shape of one entry in a document's `components` list. The
/// parameter map is left opaque here; the [ComponentRegistry] decoder for
/// `type` gives it shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentDoc {
    /// Instance Name. Defaults to "{type}_unnamed" if omitted.
    #[serde(default)]
    pub name: Option<String>,
    /// Component Type-Tag
    #[serde(rename = "type")]
    pub kind: String,
    /// Placement Location (x, y)
    #[serde(default)]
    pub position: Option<(f64, f64)>,
    /// Rotation (degrees)
    #[serde(default)]
    pub rotation: f64,
    /// Open Parameter Map, decoded per-type
    #[serde(default = "default_params")]
    pub parameters: serde_yaml::Value,
    /// Logical Connections
    #[serde(default)]
    pub connections: Vec<Connection>,
}

/// Parse an already-loaded YAML document into a [Design], decoding each
/// component's parameters through `components` and binding the technology's
/// PDK from `pdks`. The first failing component aborts the parse.
pub fn parse_design(
    doc: serde_yaml::Value,
    components: &ComponentRegistry,
    pdks: &PdkRegistry,
) -> RfResult<Design> {
    let doc: DesignDoc =
        serde_yaml::from_value(doc).map_err(|e| RfError::Schema(e.to_string()))?;

    let mut design = Design::new(doc.name, doc.technology);
    design.units = doc.units;
    design.metadata = doc.metadata;
    for entry in doc.components {
        let kind = components.decode(&entry.kind, entry.parameters)?;
        let name = entry
            .name
            .unwrap_or_else(|| format!("{}_unnamed", entry.kind));
        let mut component = Component::new(name, kind);
        if let Some((x, y)) = entry.position {
            component.loc = Point::new(x, y);
        }
        component.rotation = entry.rotation;
        component.connections = entry.connections;
        design.add_component(component);
    }
    design.bind_pdk(pdks)?;
    Ok(design)
}

/// Load a [Design] from the YAML file at `path`
pub fn load_design(
    path: impl AsRef<Path>,
    components: &ComponentRegistry,
    pdks: &PdkRegistry,
) -> RfResult<Design> {
    let file = std::io::BufReader::new(std::fs::File::open(path)?);
    let doc: serde_yaml::Value = serde_yaml::from_reader(file)?;
    parse_design(doc, components, pdks)
}

/// Check `doc` against the document schema, returning every violation found
/// rather than stopping at the first. An empty list means the document is
/// well-shaped; it says nothing about parameter validity, which is the
/// per-type decoders' job.
pub fn validate_document(doc: &serde_yaml::Value) -> Vec<String> {
    let mut errors = Vec::new();
    let mapping = match doc.as_mapping() {
        Some(mapping) => mapping,
        None => {
            errors.push("Document must be a mapping".to_string());
            return errors;
        }
    };
    for field in ["name", "technology"] {
        if !mapping.contains_key(&serde_yaml::Value::from(field)) {
            errors.push(format!("Missing required field: {}", field));
        }
    }
    match mapping.get(&serde_yaml::Value::from("components")) {
        None => errors.push("Missing required field: components".to_string()),
        Some(serde_yaml::Value::Sequence(components)) => {
            for (i, component) in components.iter().enumerate() {
                for error in validate_component(component) {
                    errors.push(format!("Component {}: {}", i, error));
                }
            }
        }
        Some(_) => errors.push("Components must be a list".to_string()),
    }
    errors
}

/// Check one component entry, returning every violation found
fn validate_component(component: &serde_yaml::Value) -> Vec<String> {
    let mut errors = Vec::new();
    let mapping = match component.as_mapping() {
        Some(mapping) => mapping,
        None => {
            errors.push("must be a mapping".to_string());
            return errors;
        }
    };
    for field in ["name", "type"] {
        if !mapping.contains_key(&serde_yaml::Value::from(field)) {
            errors.push(format!("Missing required field: {}", field));
        }
    }
    if let Some(position) = mapping.get(&serde_yaml::Value::from("position")) {
        match position.as_sequence() {
            Some(seq) if seq.len() == 2 => (),
            _ => errors.push("Position must be a pair of (x, y)".to_string()),
        }
    }
    if let Some(connections) = mapping.get(&serde_yaml::Value::from("connections")) {
        match connections.as_sequence() {
            Some(seq) => {
                for (i, connection) in seq.iter().enumerate() {
                    match connection.as_mapping() {
                        Some(conn) => {
                            for field in ["port", "target", "target_port"] {
                                if !conn.contains_key(&serde_yaml::Value::from(field)) {
                                    errors.push(format!(
                                        "Connection {}: Missing required field: {}",
                                        i, field
                                    ));
                                }
                            }
                        }
                        None => errors.push(format!("Connection {} must be a mapping", i)),
                    }
                }
            }
            None => errors.push("Connections must be a list".to_string()),
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registries() -> (ComponentRegistry, PdkRegistry) {
        (
            ComponentRegistry::with_builtins(),
            PdkRegistry::with_builtins(),
        )
    }

    #[test]
    fn parse_a_minimal_document() -> RfResult<()> {
        let doc: serde_yaml::Value = serde_yaml::from_str(
            r#"
            name: test_design
            technology: generic
            components:
              - name: line1
                type: microstrip_line
                position: [100.0, 50.0]
                rotation: 90.0
                parameters:
                  length: 200.0
                  width: 10.0
            "#,
        )
        .unwrap();
        let (components, pdks) = registries();
        let design = parse_design(doc, &components, &pdks)?;
        assert_eq!(design.name, "test_design");
        assert_eq!(design.technology, "generic");
        assert_eq!(design.units, "um");
        assert!(design.pdk.is_some());
        assert_eq!(design.components.len(), 1);
        let comp = &design.components[0];
        assert_eq!(comp.name, "line1");
        assert_eq!(comp.loc, Point::new(100., 50.));
        assert_eq!(comp.rotation, 90.);
        Ok(())
    }
    #[test]
    fn document_defaults_apply() -> RfResult<()> {
        let doc: serde_yaml::Value = serde_yaml::from_str(
            r#"
            components:
              - type: microstrip_line
                parameters: {length: 10.0, width: 2.0}
            "#,
        )
        .unwrap();
        let (components, pdks) = registries();
        let design = parse_design(doc, &components, &pdks)?;
        assert_eq!(design.name, "unnamed_design");
        assert_eq!(design.technology, "generic");
        let comp = &design.components[0];
        assert_eq!(comp.name, "microstrip_line_unnamed");
        assert_eq!(comp.loc, Point::new(0., 0.));
        assert_eq!(comp.rotation, 0.);
        Ok(())
    }
    #[test]
    fn connections_carry_through() -> RfResult<()> {
        let doc: serde_yaml::Value = serde_yaml::from_str(
            r#"
            name: connected
            technology: generic
            components:
              - name: line1
                type: microstrip_line
                parameters: {length: 10.0, width: 2.0}
                connections:
                  - port: out
                    target: line2
                    target_port: in
              - name: line2
                type: microstrip_line
                position: [10.0, 0.0]
                parameters: {length: 10.0, width: 2.0}
            "#,
        )
        .unwrap();
        let (components, pdks) = registries();
        let design = parse_design(doc, &components, &pdks)?;
        let conns = &design.components[0].connections;
        assert_eq!(conns.len(), 1);
        assert_eq!(conns[0].port, "out");
        assert_eq!(conns[0].target, "line2");
        assert_eq!(conns[0].target_port, "in");
        Ok(())
    }
    #[test]
    fn unknown_type_aborts_the_parse() {
        let doc: serde_yaml::Value = serde_yaml::from_str(
            r#"
            name: bad
            technology: generic
            components:
              - name: x1
                type: flux_capacitor
                parameters: {}
            "#,
        )
        .unwrap();
        let (components, pdks) = registries();
        assert!(matches!(
            parse_design(doc, &components, &pdks),
            Err(RfError::UnknownType(_))
        ));
    }
    #[test]
    fn malformed_document_is_a_schema_error() {
        let doc: serde_yaml::Value = serde_yaml::from_str("components: 42").unwrap();
        let (components, pdks) = registries();
        assert!(matches!(
            parse_design(doc, &components, &pdks),
            Err(RfError::Schema(_))
        ));
    }
    #[test]
    fn validation_reports_all_errors() {
        let doc: serde_yaml::Value = serde_yaml::from_str(
            r#"
            components:
              - type: microstrip_line
                position: [1.0]
              - name: ok
                type: microstrip_line
                connections:
                  - port: out
            "#,
        )
        .unwrap();
        let errors = validate_document(&doc);
        assert!(errors.contains(&"Missing required field: name".to_string()));
        assert!(errors.contains(&"Missing required field: technology".to_string()));
        assert!(errors.contains(&"Component 0: Missing required field: name".to_string()));
        assert!(errors.contains(&"Component 0: Position must be a pair of (x, y)".to_string()));
        assert!(errors
            .contains(&"Component 1: Connection 0: Missing required field: target".to_string()));
    }
    #[test]
    fn validation_accepts_a_good_document() {
        let doc: serde_yaml::Value = serde_yaml::from_str(
            r#"
            name: good
            technology: generic
            components:
              - name: line1
                type: microstrip_line
                position: [0.0, 0.0]
                parameters: {length: 10.0, width: 2.0}
            "#,
        )
        .unwrap();
        assert!(validate_document(&doc).is_empty());
    }
}
