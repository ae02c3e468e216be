use serde_json::json;

use tablesite_lib::floorplan::{
    element::{ElementKind, LengthValue},
    normalizer::{normalize, LayoutSource, DEFAULT_LAYOUT_HEIGHT, DEFAULT_LAYOUT_WIDTH},
};

#[test]
fn absent_layout_uses_defaults_and_is_unavailable() {
    for raw in [None, Some(json!(null))] {
        let layout = normalize(raw.as_ref());
        assert!(layout.elements.is_empty());
        assert_eq!(layout.width, 800.0);
        assert_eq!(layout.height, 600.0);
        assert!(!layout.is_available());
    }
}

#[test]
fn every_accepted_shape_yields_elements_and_positive_size() {
    let shapes = vec![
        (json!([{"type": "table", "id": 1}]), LayoutSource::Array),
        (
            json!({"elements": [{"type": "table", "id": 1}], "width": 1000}),
            LayoutSource::Elements,
        ),
        (
            json!({"layout": {"elements": [{"type": "table", "id": 1}], "height": 400}}),
            LayoutSource::NestedLayout,
        ),
        (json!({"items": [{"type": "table", "id": 1}]}), LayoutSource::Items),
        (json!({"t1": {"type": "table", "id": 1}}), LayoutSource::ObjectValues),
    ];

    for (raw, expected_source) in shapes {
        let layout = normalize(Some(&raw));
        assert_eq!(layout.source, expected_source, "shape {raw}");
        assert_eq!(layout.elements.len(), 1, "shape {raw}");
        assert!(layout.width > 0.0 && layout.height > 0.0, "shape {raw}");
        assert!(layout.is_available());
    }
}

#[test]
fn bare_array_ignores_dimensions() {
    let layout = normalize(Some(&json!([{"label": "Bar"}])));
    assert_eq!(layout.width, DEFAULT_LAYOUT_WIDTH);
    assert_eq!(layout.height, DEFAULT_LAYOUT_HEIGHT);
}

#[test]
fn elements_shape_reads_dimensions_from_top_level() {
    let layout = normalize(Some(&json!({
        "width": 1200,
        "height": 700,
        "elements": []
    })));
    assert_eq!(layout.source, LayoutSource::Elements);
    assert_eq!(layout.width, 1200.0);
    assert_eq!(layout.height, 700.0);
    assert!(layout.elements.is_empty());
    assert!(layout.is_available());
}

#[test]
fn nested_layout_reads_dimensions_from_nested_object() {
    let layout = normalize(Some(&json!({
        "width": 50,
        "layout": {"width": 900, "height": 450, "elements": [{"x": 1}]}
    })));
    assert_eq!(layout.source, LayoutSource::NestedLayout);
    assert_eq!(layout.width, 900.0);
    assert_eq!(layout.height, 450.0);
}

#[test]
fn top_level_elements_win_over_nested_layout() {
    let layout = normalize(Some(&json!({
        "elements": [{"label": "outer"}],
        "layout": {"elements": [{"label": "inner-a"}, {"label": "inner-b"}]}
    })));
    assert_eq!(layout.source, LayoutSource::Elements);
    assert_eq!(layout.elements.len(), 1);
    assert_eq!(layout.elements[0].label, "outer");
}

#[test]
fn object_values_fallback_keeps_property_order_and_skips_scalars() {
    let layout = normalize(Some(&json!({
        "width": 640,
        "zeta": {"table_number": 9},
        "alpha": {"type": "wall"},
        "note": "not an element",
        "mid": {"table_number": 2}
    })));
    assert_eq!(layout.source, LayoutSource::ObjectValues);
    assert_eq!(layout.width, 640.0);
    let labels: Vec<&str> = layout.elements.iter().map(|el| el.label.as_str()).collect();
    assert_eq!(labels, vec!["Table 9", "wall", "Table 2"]);
}

#[test]
fn invalid_dimensions_fall_back_to_defaults() {
    let layout = normalize(Some(&json!({
        "elements": [],
        "width": -10,
        "height": "tall"
    })));
    assert_eq!(layout.width, DEFAULT_LAYOUT_WIDTH);
    assert_eq!(layout.height, DEFAULT_LAYOUT_HEIGHT);
}

#[test]
fn non_object_array_entries_are_dropped() {
    let layout = normalize(Some(&json!([1, "two", {"table_id": "t-3"}, null])));
    assert_eq!(layout.elements.len(), 1);
    assert_eq!(layout.elements[0].table_id(), Some("t-3"));
}

#[test]
fn scalar_layout_is_available_but_empty() {
    let layout = normalize(Some(&json!("floor-plan-v2")));
    assert_eq!(layout.source, LayoutSource::Scalar);
    assert!(layout.is_available());
    assert!(layout.elements.is_empty());
}

#[test]
fn classification_is_resolved_once_into_tagged_kinds() {
    let layout = normalize(Some(&json!([
        {"type": "table", "id": 7},
        {"is_table": true, "name": "Patio"},
        {"table_id": null},
        {"table_number": 12},
        {"type": "wall", "id": 8},
        {"is_table": "yes"}
    ])));

    let kinds: Vec<&ElementKind> = layout.elements.iter().map(|el| &el.kind).collect();
    assert_eq!(
        kinds,
        vec![
            &ElementKind::Table {
                id: Some("7".to_string()),
                number: None
            },
            &ElementKind::Table {
                id: None,
                number: None
            },
            &ElementKind::Table {
                id: None,
                number: None
            },
            &ElementKind::Table {
                id: None,
                number: Some("12".to_string())
            },
            &ElementKind::Decoration {
                kind: Some("wall".to_string())
            },
            &ElementKind::Decoration { kind: None },
        ]
    );
}

#[test]
fn label_precedence_for_tables() {
    let layout = normalize(Some(&json!([
        {"table_number": 4, "label": "Window"},
        {"type": "table", "label": "Window", "id": 3},
        {"type": "table", "name": "Corner"},
        {"type": "table", "id": 5},
        {"type": "table", "table_id": "t-6"},
        {"type": "table"}
    ])));
    let labels: Vec<&str> = layout.elements.iter().map(|el| el.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["Table 4", "Window", "Corner", "Table 5", "Table t-6", ""]
    );
}

#[test]
fn geometry_defaults_and_aliases() {
    let layout = normalize(Some(&json!([
        {"type": "table", "id": 1},
        {"type": "table", "id": 2, "left": 5, "x": 99, "w": 30, "height": "25%"}
    ])));

    let first = &layout.elements[0];
    assert_eq!(first.left, LengthValue::Px(0.0));
    assert_eq!(first.top, LengthValue::Px(0.0));
    assert_eq!(first.width, LengthValue::Px(60.0));
    assert_eq!(first.height, LengthValue::Px(60.0));

    let second = &layout.elements[1];
    assert_eq!(second.left, LengthValue::Px(5.0));
    assert_eq!(second.width, LengthValue::Px(30.0));
    assert_eq!(second.height, LengthValue::Literal("25%".to_string()));
}
