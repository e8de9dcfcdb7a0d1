use egui::Color32;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::events::{
    EdgeStyleProperty, Event, Observers, PayloadEdgeStyle, PayloadStyleModified,
};
use crate::style::{check_size, fuzzy_eq, fuzzy_eq_slice, Owned, Style, StyleCore, StyleTarget};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineType {
    #[default]
    Straight,
    Curved,
    Ortho,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowShape {
    #[default]
    None,
    Arrow,
    ArrowOpen,
    Circle,
    CircleOpen,
    Rect,
    RectOpen,
}

/// Stores properties of an [`EdgeStyle`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeStyleProps {
    pub line_type: LineType,
    pub line_color: Color32,
    pub line_width: f32,
    pub arrow_size: f32,
    pub src_shape: ArrowShape,
    pub dst_shape: ArrowShape,
    pub dashed: bool,
    /// Alternating dash and gap lengths, in units of line width.
    pub dash_pattern: Vec<f32>,
}

impl Default for EdgeStyleProps {
    fn default() -> Self {
        Self {
            line_type: LineType::default(),
            line_color: Color32::BLACK,
            line_width: 1.,
            arrow_size: 4.,
            src_shape: ArrowShape::None,
            dst_shape: ArrowShape::Arrow,
            dashed: false,
            dash_pattern: vec![2., 2.],
        }
    }
}

/// Visual attributes of graph edges.
///
/// Changes to the line or its arrows are followed by [`Event::StyleModified`],
/// which is enough for renderers that simply redraw the edge.
#[derive(Debug)]
pub struct EdgeStyle {
    core: StyleCore,
    props: EdgeStyleProps,
}

impl Style for EdgeStyle {
    fn new(name: &str) -> Self {
        Self {
            core: StyleCore::new(name),
            props: EdgeStyleProps::default(),
        }
    }

    fn name(&self) -> &str {
        self.core.name()
    }

    fn set_name(&mut self, name: &str) {
        self.core.rename_unowned(StyleTarget::Edge, name);
    }

    fn target(&self) -> StyleTarget {
        StyleTarget::Edge
    }

    fn observers(&self) -> &Observers {
        self.core.observers()
    }

    fn duplicate(&self, name: &str) -> Self {
        Self {
            core: StyleCore::new(name),
            props: self.props.clone(),
        }
    }
}

impl Owned for EdgeStyle {
    fn core_mut(&mut self) -> &mut StyleCore {
        &mut self.core
    }
}

impl EdgeStyle {
    pub fn props(&self) -> &EdgeStyleProps {
        &self.props
    }

    /// Pushes every field of `props` through its setter.
    pub fn apply(&mut self, props: &EdgeStyleProps) {
        self.set_line_type(props.line_type);
        self.set_line_color(props.line_color);
        self.set_line_width(props.line_width);
        self.set_arrow_size(props.arrow_size);
        self.set_src_shape(props.src_shape);
        self.set_dst_shape(props.dst_shape);
        self.set_dashed(props.dashed);
        self.set_dash_pattern(&props.dash_pattern);
    }

    pub fn line_type(&self) -> LineType {
        self.props.line_type
    }

    pub fn set_line_type(&mut self, line_type: LineType) {
        if self.props.line_type != line_type {
            self.props.line_type = line_type;
            self.changed(EdgeStyleProperty::LineType);
        }
    }

    pub fn line_color(&self) -> Color32 {
        self.props.line_color
    }

    pub fn set_line_color(&mut self, line_color: Color32) {
        if self.props.line_color != line_color {
            self.props.line_color = line_color;
            self.changed(EdgeStyleProperty::LineColor);
        }
    }

    pub fn line_width(&self) -> f32 {
        self.props.line_width
    }

    pub fn set_line_width(&mut self, line_width: f32) {
        if !check_size(self.name(), "line width", line_width) {
            return;
        }
        if !fuzzy_eq(self.props.line_width, line_width) {
            self.props.line_width = line_width;
            self.changed(EdgeStyleProperty::LineWidth);
        }
    }

    pub fn arrow_size(&self) -> f32 {
        self.props.arrow_size
    }

    pub fn set_arrow_size(&mut self, arrow_size: f32) {
        if !check_size(self.name(), "arrow size", arrow_size) {
            return;
        }
        if !fuzzy_eq(self.props.arrow_size, arrow_size) {
            self.props.arrow_size = arrow_size;
            self.changed(EdgeStyleProperty::ArrowSize);
        }
    }

    pub fn src_shape(&self) -> ArrowShape {
        self.props.src_shape
    }

    pub fn set_src_shape(&mut self, src_shape: ArrowShape) {
        if self.props.src_shape != src_shape {
            self.props.src_shape = src_shape;
            self.changed(EdgeStyleProperty::SrcShape);
        }
    }

    pub fn dst_shape(&self) -> ArrowShape {
        self.props.dst_shape
    }

    pub fn set_dst_shape(&mut self, dst_shape: ArrowShape) {
        if self.props.dst_shape != dst_shape {
            self.props.dst_shape = dst_shape;
            self.changed(EdgeStyleProperty::DstShape);
        }
    }

    pub fn dashed(&self) -> bool {
        self.props.dashed
    }

    pub fn set_dashed(&mut self, dashed: bool) {
        if self.props.dashed != dashed {
            self.props.dashed = dashed;
            self.changed(EdgeStyleProperty::Dashed);
        }
    }

    pub fn dash_pattern(&self) -> &[f32] {
        &self.props.dash_pattern
    }

    /// Patterns with a negative or non finite segment are logged and ignored.
    pub fn set_dash_pattern(&mut self, dash_pattern: &[f32]) {
        if let Some(bad) = dash_pattern.iter().find(|s| **s < 0. || !s.is_finite()) {
            warn!(
                "edge style `{}`: invalid dash pattern segment {bad}",
                self.name()
            );
            return;
        }
        if !fuzzy_eq_slice(&self.props.dash_pattern, dash_pattern) {
            self.props.dash_pattern = dash_pattern.to_vec();
            self.changed(EdgeStyleProperty::DashPattern);
        }
    }

    fn changed(&self, property: EdgeStyleProperty) {
        let style = self.core.name().to_string();
        self.core.emit(&Event::EdgeStyle(PayloadEdgeStyle {
            style: style.clone(),
            property,
        }));

        if property.modifies_style() {
            self.core
                .emit(&Event::StyleModified(PayloadStyleModified { style }));
        }
    }
}
