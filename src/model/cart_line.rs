//! Cart line item.

use serde::{Deserialize, Serialize};

/// One selected part and its desired quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Assembly identifier; unique within a cart.
    pub id: String,
    /// Human-readable label, if the catalog provided one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Desired quantity.
    pub quantity: u32,
}

impl CartLine {
    /// Creates a line with the given id, optional description and quantity.
    pub fn new(id: impl Into<String>, description: Option<String>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            description,
            quantity,
        }
    }

    /// Returns a copy of this line with a different quantity.
    #[must_use]
    pub fn with_quantity(&self, quantity: u32) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }

    /// Label to show for this line.
    ///
    /// Falls back to `Unclassified Part (ID: <id>)` when the description is
    /// missing or empty.
    #[must_use]
    pub fn label(&self) -> String {
        match self.description.as_deref() {
            Some(description) if !description.is_empty() => description.to_string(),
            _ => format!("Unclassified Part (ID: {})", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_uses_description() {
        let line = CartLine::new("A1", Some("Front bumper".into()), 1);
        assert_eq!(line.label(), "Front bumper");
    }

    #[test]
    fn label_falls_back_for_missing_or_empty_description() {
        let missing = CartLine::new("A1", None, 1);
        let empty = CartLine::new("B2", Some(String::new()), 1);
        assert_eq!(missing.label(), "Unclassified Part (ID: A1)");
        assert_eq!(empty.label(), "Unclassified Part (ID: B2)");
    }

    #[test]
    fn missing_description_is_omitted_from_json() {
        let json = serde_json::to_string(&CartLine::new("A1", None, 3)).unwrap();
        assert_eq!(json, r#"{"id":"A1","quantity":3}"#);
    }
}
