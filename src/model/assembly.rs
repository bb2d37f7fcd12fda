//! Diagram and assembly records returned by the assemblies search API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::geometry::Point;

/// Rectangular region of a diagram, in the image's native pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    /// Diagram this region belongs to.
    pub diagram_id: String,
    /// Upper-left corner.
    pub top_left: Point,
    /// Lower-right corner.
    pub bottom_right: Point,
}

/// A selectable part with its hotspot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assembly {
    /// Assembly identifier.
    pub id: String,
    /// Human-readable label.
    #[serde(default)]
    pub description: Option<String>,
    /// Suggested quantity; absent in most payloads.
    #[serde(default)]
    pub quantity: Option<u32>,
    /// Region on a diagram; assemblies without one are never drawn.
    #[serde(default)]
    pub hotspot: Option<Hotspot>,
}

impl Assembly {
    /// Returns `true` when this assembly has a hotspot on the given diagram.
    #[must_use]
    pub fn is_on_diagram(&self, diagram_id: &str) -> bool {
        self.hotspot
            .as_ref()
            .is_some_and(|h| h.diagram_id == diagram_id)
    }
}

/// Diagram metadata as keyed in the search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramRecord {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Raster image location.
    pub url: String,
}

/// A diagram with its identifier attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    /// Identifier (the key in the response's `diagrams` map).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Raster image location.
    pub url: String,
}

/// Body of a successful `assemblies.v2.search` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Diagrams keyed by id.
    #[serde(default)]
    pub diagrams: BTreeMap<String, DiagramRecord>,
    /// Assemblies keyed by id.
    #[serde(default)]
    pub assemblies: BTreeMap<String, Assembly>,
}

impl SearchResponse {
    /// Looks up a diagram by id.
    #[must_use]
    pub fn diagram(&self, id: &str) -> Option<Diagram> {
        self.diagrams.get(id).map(|record| Diagram {
            id: id.to_string(),
            name: record.name.clone(),
            url: record.url.clone(),
        })
    }

    /// Looks up an assembly by id.
    #[must_use]
    pub fn assembly(&self, id: &str) -> Option<&Assembly> {
        self.assemblies.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "diagrams": { "D1": { "name": "Front suspension", "url": "https://img/d1.png" } },
        "assemblies": {
            "A1": {
                "id": "A1",
                "description": "Strut",
                "hotspot": {
                    "diagram_id": "D1",
                    "top_left": { "x": 10, "y": 20 },
                    "bottom_right": { "x": 30, "y": 40 }
                }
            },
            "A2": { "id": "A2", "description": "Bolt", "quantity": 4 }
        }
    }"#;

    #[test]
    fn parses_search_response() {
        let response: SearchResponse = serde_json::from_str(SAMPLE).unwrap();
        let diagram = response.diagram("D1").unwrap();
        assert_eq!(diagram.name, "Front suspension");
        assert_eq!(diagram.url, "https://img/d1.png");

        let strut = response.assembly("A1").unwrap();
        assert!(strut.is_on_diagram("D1"));
        assert_eq!(strut.quantity, None);
        assert_eq!(
            strut.hotspot.as_ref().unwrap().bottom_right,
            Point::new(30.0, 40.0)
        );

        let bolt = response.assembly("A2").unwrap();
        assert!(!bolt.is_on_diagram("D1"));
        assert_eq!(bolt.quantity, Some(4));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let response: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.diagrams.is_empty());
        assert!(response.assemblies.is_empty());
        assert!(response.diagram("D1").is_none());
    }
}
