use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::floorplan::element::CanonicalElement;

pub const DEFAULT_LAYOUT_WIDTH: f64 = 800.0;
pub const DEFAULT_LAYOUT_HEIGHT: f64 = 600.0;

/// Which of the accepted payload shapes produced the layout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LayoutSource {
    Absent,
    Array,
    Elements,
    NestedLayout,
    Items,
    ObjectValues,
    Scalar,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanonicalLayout {
    pub width: f64,
    pub height: f64,
    pub elements: Vec<CanonicalElement>,
    pub source: LayoutSource,
}

impl CanonicalLayout {
    fn empty(source: LayoutSource) -> Self {
        Self {
            width: DEFAULT_LAYOUT_WIDTH,
            height: DEFAULT_LAYOUT_HEIGHT,
            elements: vec![],
            source,
        }
    }

    /// `false` only when no floor plan was supplied at all.
    pub fn is_available(&self) -> bool {
        self.source != LayoutSource::Absent
    }
}

/// Turns whatever the API sent as a floor plan into a [`CanonicalLayout`].
///
/// Never fails: unknown shapes degrade to an empty element list. Shapes are
/// tried in order and the first match wins:
///
/// 1. a bare array of elements
/// 2. `{ elements: [...], width?, height? }`
/// 3. `{ layout: { elements: [...], width?, height? } }`
/// 4. `{ items: [...], width?, height? }`
/// 5. an object whose object-valued members are the elements
pub fn normalize(raw: Option<&Value>) -> CanonicalLayout {
    let layout = match raw {
        None | Some(Value::Null) => CanonicalLayout::empty(LayoutSource::Absent),
        Some(Value::Array(items)) => CanonicalLayout {
            elements: collect_elements(items),
            ..CanonicalLayout::empty(LayoutSource::Array)
        },
        Some(Value::Object(object)) => normalize_object(object),
        Some(_) => CanonicalLayout::empty(LayoutSource::Scalar),
    };
    tracing::debug!(
        source = ?layout.source,
        elements = layout.elements.len(),
        width = layout.width,
        height = layout.height,
        "normalized floor plan"
    );
    layout
}

fn normalize_object(object: &Map<String, Value>) -> CanonicalLayout {
    if let Some(items) = object.get("elements").and_then(Value::as_array) {
        return sized(object, collect_elements(items), LayoutSource::Elements);
    }

    if let Some(nested) = object.get("layout").and_then(Value::as_object) {
        if let Some(items) = nested.get("elements").and_then(Value::as_array) {
            return sized(nested, collect_elements(items), LayoutSource::NestedLayout);
        }
    }

    if let Some(items) = object.get("items").and_then(Value::as_array) {
        return sized(object, collect_elements(items), LayoutSource::Items);
    }

    let elements = object
        .values()
        .filter_map(Value::as_object)
        .map(CanonicalElement::from_object)
        .collect();
    sized(object, elements, LayoutSource::ObjectValues)
}

fn sized(
    dimensions: &Map<String, Value>,
    elements: Vec<CanonicalElement>,
    source: LayoutSource,
) -> CanonicalLayout {
    CanonicalLayout {
        width: positive_dimension(dimensions.get("width")).unwrap_or(DEFAULT_LAYOUT_WIDTH),
        height: positive_dimension(dimensions.get("height")).unwrap_or(DEFAULT_LAYOUT_HEIGHT),
        elements,
        source,
    }
}

fn collect_elements(items: &[Value]) -> Vec<CanonicalElement> {
    let elements: Vec<CanonicalElement> = items
        .iter()
        .filter_map(Value::as_object)
        .map(CanonicalElement::from_object)
        .collect();
    if elements.len() != items.len() {
        tracing::warn!(
            skipped = items.len() - elements.len(),
            "ignored non-object floor plan entries"
        );
    }
    elements
}

/// Numbers and numeric strings (`"640"`, `"640px"`) above zero.
fn positive_dimension(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text
            .trim()
            .trim_end_matches("px")
            .trim()
            .parse::<f64>()
            .ok(),
        _ => None,
    }?;
    (parsed.is_finite() && parsed > 0.0).then_some(parsed)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn dimensions_reject_non_positive_and_garbage() {
        assert_eq!(positive_dimension(Some(&json!(0))), None);
        assert_eq!(positive_dimension(Some(&json!(-5))), None);
        assert_eq!(positive_dimension(Some(&json!("wide"))), None);
        assert_eq!(positive_dimension(Some(&json!("640px"))), Some(640.0));
        assert_eq!(positive_dimension(Some(&json!(1024))), Some(1024.0));
    }
}
