//! Serialized page snapshots.
//!
//! A page's canvas is saved as a JSON array of elements in paint order:
//!
//! ```json
//! [{"id":"a1","x":10,"y":10,"width":30,"height":20,"selected":false,"shape_type":"rectangle"}]
//! ```
//!
//! Older pages stored the elements as an object keyed by id. That form is
//! still accepted on import (key order is paint order) but never written.
//! A page that was never drawn on has an empty string for its canvas data.
//!
//! Coordinates are held as `f32`. Pages saved by other clients may carry
//! full double-precision pointer offsets; those are narrowed to the nearest
//! `f32` on import, so a load/save cycle can change digits past roughly the
//! seventh significant figure.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{Element, SketchError, SketchResult};

/// Accepted on-disk layouts of a snapshot.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SnapshotDocument {
    /// Current layout: an ordered list.
    List(Vec<Element>),
    /// Legacy layout: an object keyed by element id.
    Keyed(Map<String, Value>),
}

impl SnapshotDocument {
    fn into_elements(self) -> SketchResult<Vec<Element>> {
        match self {
            SnapshotDocument::List(elements) => Ok(elements),
            SnapshotDocument::Keyed(map) => map
                .into_iter()
                .map(|(key, value)| {
                    let element: Element = serde_json::from_value(value)?;
                    if element.id.as_str() == key {
                        Ok(element)
                    } else {
                        Err(SketchError::InvalidSnapshot(format!(
                            "element keyed as {key} has id {}",
                            element.id
                        )))
                    }
                })
                .collect(),
        }
    }
}

/// Serialize elements as a snapshot.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn snapshot_to_json(elements: &[Element]) -> SketchResult<String> {
    serde_json::to_string(elements).map_err(SketchError::Serialization)
}

/// Parse a snapshot in either the list or the legacy keyed layout.
///
/// Blank input yields an empty page.
///
/// # Errors
///
/// Returns [`SketchError::Serialization`] for malformed JSON or elements,
/// and [`SketchError::InvalidSnapshot`] when a keyed entry disagrees with
/// its element's id.
pub fn snapshot_from_json(json: &str) -> SketchResult<Vec<Element>> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    let document: SnapshotDocument = serde_json::from_str(json)?;
    let elements = document.into_elements()?;
    tracing::debug!("Parsed snapshot with {} elements", elements.len());
    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GenericKind, Point, Shape};

    #[test]
    fn test_blank_input_is_empty_page() {
        assert!(snapshot_from_json("").expect("empty").is_empty());
        assert!(snapshot_from_json("  \n").expect("blank").is_empty());
        assert!(snapshot_from_json("[]").expect("list").is_empty());
    }

    #[test]
    fn test_list_layout_roundtrip() {
        let elements = vec![
            Element::generic(GenericKind::Ellipse, 3.0, 4.0)
                .with_id("e")
                .with_size(-8.0, 2.0),
            Element::linear(0.0, 0.0, [Point::new(0.0, 0.0), Point::new(5.0, 5.0)]).with_id("l"),
            Element::text(9.0, 9.0, "a\nb").with_id("t"),
        ];
        let json = snapshot_to_json(&elements).expect("serialize");
        assert!(json.starts_with('['));
        assert_eq!(snapshot_from_json(&json).expect("parse"), elements);
    }

    #[test]
    fn test_keyed_layout_keeps_key_order() {
        let json = r#"{
            "z": {"id":"z","x":0,"y":0,"width":1,"height":1,"selected":false,"shape_type":"rectangle"},
            "a": {"id":"a","x":0,"y":0,"width":0,"height":0,"selected":false,"shape_type":"text","text":"hi"}
        }"#;
        let elements = snapshot_from_json(json).expect("parse");
        let ids: Vec<_> = elements.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a"]);
        assert_eq!(
            elements[1].shape,
            Shape::Text {
                text: "hi".to_string()
            }
        );
    }

    #[test]
    fn test_keyed_layout_rejects_mismatched_id() {
        let json = r#"{"k":{"id":"other","x":0,"y":0,"width":0,"height":0,"selected":false,"shape_type":"ellipse"}}"#;
        assert!(matches!(
            snapshot_from_json(json),
            Err(SketchError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_double_precision_coordinates_narrow_to_f32() {
        let json = r#"[{"id":"r","x":10.123456789,"y":-0.333333333333,"width":1e-9,"height":0.1,"selected":false,"shape_type":"rectangle"}]"#;
        let elements = snapshot_from_json(json).expect("parse");
        let rect = &elements[0];
        assert!((f64::from(rect.x) - 10.123_456_789).abs() < 1e-5);
        assert!((f64::from(rect.y) + 0.333_333_333_333).abs() < 1e-6);

        // A second cycle is stable once narrowed.
        let saved = snapshot_to_json(&elements).expect("save");
        assert_eq!(snapshot_from_json(&saved).expect("reload"), elements);
    }

    #[test]
    fn test_malformed_snapshot_is_error() {
        assert!(matches!(
            snapshot_from_json(r#"[{"id":"x","shape_type":"hexagon"}]"#),
            Err(SketchError::Serialization(_))
        ));
        assert!(snapshot_from_json("not json").is_err());
    }
}
