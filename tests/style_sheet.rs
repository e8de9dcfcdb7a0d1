use egui::Color32;
use egui_graphs_styles::{
    ArrowShape, FillType, LineType, Style, StyleError, StyleManager, StyleSheet,
    DEFAULT_STYLE_NAME,
};
use petgraph::stable_graph::StableGraph;

const SHEET: &str = r#"{
    "node_styles": [
        { "name": "default", "back_radius": 2.0 },
        {
            "name": "service",
            "fill_type": "gradient",
            "base_color": [0, 0, 255, 255],
            "font_bold": true
        },
        { "name": "broken", "back_radius": -5.0, "effect_type": "none" }
    ],
    "edge_styles": [
        { "name": "call", "line_type": "curved", "line_width": 2.0 },
        {
            "name": "async",
            "dashed": true,
            "dash_pattern": [4.0, 2.0],
            "dst_shape": "arrow_open"
        }
    ],
    "default_edge_style": "call"
}"#;

#[test]
fn test_load_sheet() {
    let manager = StyleManager::from_json(SHEET).unwrap();

    assert_eq!(manager.default_node_style().back_radius(), 2.0);

    let service = manager.node_style("service").unwrap();
    assert_eq!(service.fill_type(), FillType::Gradient);
    assert_eq!(service.base_color(), Color32::BLUE);
    assert!(service.font_bold());

    let broken = manager.node_style("broken").unwrap();
    assert_eq!(broken.back_radius(), 4.0);
    assert!(!broken.effect_enabled());

    let call = manager.default_edge_style();
    assert_eq!(call.name(), "call");
    assert_eq!(call.line_type(), LineType::Curved);
    assert_eq!(call.line_width(), 2.0);

    let async_edge = manager.edge_style("async").unwrap();
    assert!(async_edge.dashed());
    assert_eq!(async_edge.dash_pattern(), &[4.0, 2.0]);
    assert_eq!(async_edge.dst_shape(), ArrowShape::ArrowOpen);

    // the built-in default edge style was adopted as `call`
    assert!(manager.edge_style(DEFAULT_STYLE_NAME).is_none());
    assert_eq!(manager.edge_styles().count(), 2);
}

#[test]
fn test_sheet_round_trip() {
    let manager = StyleManager::from_json(SHEET).unwrap();
    let json = manager.to_json().unwrap();

    let sheet = StyleSheet::from_json(&json).unwrap();
    assert_eq!(sheet, manager.to_sheet());
    assert_eq!(sheet.default_edge_style.as_deref(), Some("call"));

    let reloaded = StyleManager::from_sheet(&sheet).unwrap();
    assert_eq!(reloaded.to_sheet(), sheet);
}

#[test]
fn test_styles_bound_to_graph_elements() {
    let mut g: StableGraph<&str, ()> = StableGraph::new();
    let api = g.add_node("api");
    let db = g.add_node("db");
    let query = g.add_edge(api, db, ());

    let mut manager = StyleManager::from_json(SHEET).unwrap();
    manager.bind_node(api, "service").unwrap();
    manager.bind_edge(query, "async").unwrap();

    assert_eq!(manager.style_for_node(api).name(), "service");
    assert_eq!(manager.style_for_node(db).name(), DEFAULT_STYLE_NAME);
    assert_eq!(manager.style_for_edge(query).name(), "async");

    manager.remove_edge_style("async").unwrap();
    assert_eq!(manager.style_for_edge(query).name(), "call");

    assert!(matches!(
        manager.bind_edge(query, "async"),
        Err(StyleError::NotFound { .. })
    ));
}
