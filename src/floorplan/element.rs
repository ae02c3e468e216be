use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::json::{field_text, scalar_text};

pub const DEFAULT_ELEMENT_SIZE: f64 = 60.0;

/// A length as supplied by the layout producer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum LengthValue {
    Px(f64),
    Literal(String),
    Auto,
}

impl LengthValue {
    /// Numbers become pixels, strings pass through untouched (so `"10%"` or
    /// `"4rem"` reach the stylesheet as written) and anything else is `auto`.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(number) => number.as_f64().map(Self::Px).unwrap_or(Self::Auto),
            Value::String(text) => Self::Literal(text.clone()),
            _ => Self::Auto,
        }
    }

    /// The first key present wins, even when its value is `null`.
    fn resolve(object: &Map<String, Value>, keys: &[&str], default: f64) -> Self {
        keys.iter()
            .find_map(|key| object.get(*key))
            .map(Self::from_json)
            .unwrap_or(Self::Px(default))
    }

    pub fn to_css(&self) -> String {
        match self {
            Self::Px(px) => format!("{px}px"),
            Self::Literal(text) => text.clone(),
            Self::Auto => "auto".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Rect,
    Circle,
}

impl Shape {
    pub fn border_radius(&self) -> &'static str {
        match self {
            Self::Rect => "6px",
            Self::Circle => "50%",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    Table {
        id: Option<String>,
        number: Option<String>,
    },
    Decoration {
        kind: Option<String>,
    },
}

impl ElementKind {
    /// `type: "table"`, `is_table: true` or the mere presence of a
    /// `table_id` / `table_number` key marks a table.
    fn classify(object: &Map<String, Value>) -> Self {
        let declared_type = object.get("type").and_then(Value::as_str);
        let is_table = declared_type == Some("table")
            || object.get("is_table").and_then(Value::as_bool) == Some(true)
            || object.contains_key("table_id")
            || object.contains_key("table_number");

        if is_table {
            let id = match object.get("table_id") {
                Some(value) => scalar_text(value),
                None => object.get("id").and_then(scalar_text),
            }
            .filter(|id| !id.is_empty());
            let number = object
                .get("table_number")
                .and_then(scalar_text)
                .filter(|number| !number.is_empty());
            Self::Table { id, number }
        } else {
            Self::Decoration {
                kind: field_text(object, "type"),
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanonicalElement {
    pub kind: ElementKind,
    pub left: LengthValue,
    pub top: LengthValue,
    pub width: LengthValue,
    pub height: LengthValue,
    pub label: String,
    pub shape: Shape,
}

impl CanonicalElement {
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let kind = ElementKind::classify(object);
        let label = element_label(object, &kind);
        let shape = if object.get("shape").and_then(Value::as_str) == Some("circle") {
            Shape::Circle
        } else {
            Shape::Rect
        };

        Self {
            left: LengthValue::resolve(object, &["left", "x"], 0.0),
            top: LengthValue::resolve(object, &["top", "y"], 0.0),
            width: LengthValue::resolve(object, &["width", "w"], DEFAULT_ELEMENT_SIZE),
            height: LengthValue::resolve(object, &["height", "h"], DEFAULT_ELEMENT_SIZE),
            kind,
            label,
            shape,
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(self.kind, ElementKind::Table { .. })
    }

    pub fn table_id(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Table { id, .. } => id.as_deref(),
            ElementKind::Decoration { .. } => None,
        }
    }

    pub fn table_number(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Table { number, .. } => number.as_deref(),
            ElementKind::Decoration { .. } => None,
        }
    }
}

pub fn table_display_text(reference: &str) -> String {
    format!("Table {reference}")
}

fn element_label(object: &Map<String, Value>, kind: &ElementKind) -> String {
    let named = field_text(object, "label").or_else(|| field_text(object, "name"));
    match kind {
        ElementKind::Table { number, .. } => number
            .as_deref()
            .map(table_display_text)
            .or(named)
            .or_else(|| {
                field_text(object, "id")
                    .or_else(|| field_text(object, "table_id"))
                    .map(|id| table_display_text(&id))
            })
            .unwrap_or_default(),
        ElementKind::Decoration { kind } => named.or_else(|| kind.clone()).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn element(value: Value) -> CanonicalElement {
        CanonicalElement::from_object(value.as_object().expect("object fixture"))
    }

    #[test]
    fn null_position_resolves_to_auto_not_fallback() {
        let el = element(json!({"left": null, "x": 5}));
        assert_eq!(el.left, LengthValue::Auto);
    }

    #[test]
    fn table_id_prefers_table_id_over_id() {
        let el = element(json!({"type": "table", "id": "a", "table_id": "b"}));
        assert_eq!(el.table_id(), Some("b"));
        assert_eq!(el.label, "Table a");
    }

    #[test]
    fn decoration_label_falls_back_to_type() {
        let el = element(json!({"type": "plant"}));
        assert_eq!(el.label, "plant");
        let el = element(json!({"type": "plant", "name": "Ficus"}));
        assert_eq!(el.label, "Ficus");
    }

    #[test]
    fn px_output_drops_trailing_zero_fraction() {
        assert_eq!(LengthValue::Px(10.0).to_css(), "10px");
        assert_eq!(LengthValue::Px(10.5).to_css(), "10.5px");
    }
}
