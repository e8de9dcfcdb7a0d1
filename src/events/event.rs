use serde::{Deserialize, Serialize};

use crate::StyleTarget;

/// Node style fields that can emit a change notification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NodeStyleProperty {
    BackRadius,
    BackOpacity,
    FillType,
    BackColor,
    BaseColor,
    BorderColor,
    BorderWidth,
    EffectType,
    EffectEnabled,
    EffectColor,
    EffectRadius,
    EffectOffset,
    FontPointSize,
    FontBold,
}

/// Edge style fields that can emit a change notification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EdgeStyleProperty {
    LineType,
    LineColor,
    LineWidth,
    ArrowSize,
    SrcShape,
    DstShape,
    Dashed,
    DashPattern,
}

impl EdgeStyleProperty {
    /// Whether a change of this property is followed by [`Event::StyleModified`].
    pub fn modifies_style(self) -> bool {
        !matches!(self, Self::Dashed | Self::DashPattern)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadNodeStyle {
    pub style: String,
    pub property: NodeStyleProperty,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadEdgeStyle {
    pub style: String,
    pub property: EdgeStyleProperty,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadStyleModified {
    pub style: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadStyleRenamed {
    pub target: StyleTarget,
    pub old: String,
    pub new: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadStyleAdded {
    pub target: StyleTarget,
    pub style: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadStyleRemoved {
    pub target: StyleTarget,
    pub style: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadDefaultStyleChanged {
    pub target: StyleTarget,
    pub style: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    NodeStyle(PayloadNodeStyle),
    EdgeStyle(PayloadEdgeStyle),
    /// Coarse signal sent after edge style changes that alter how the edge is drawn.
    StyleModified(PayloadStyleModified),
    StyleRenamed(PayloadStyleRenamed),
    StyleAdded(PayloadStyleAdded),
    StyleRemoved(PayloadStyleRemoved),
    DefaultStyleChanged(PayloadDefaultStyleChanged),
}

impl Event {
    /// Name of the style the event is about.
    pub fn style(&self) -> &str {
        match self {
            Event::NodeStyle(p) => &p.style,
            Event::EdgeStyle(p) => &p.style,
            Event::StyleModified(p) => &p.style,
            Event::StyleRenamed(p) => &p.new,
            Event::StyleAdded(p) => &p.style,
            Event::StyleRemoved(p) => &p.style,
            Event::DefaultStyleChanged(p) => &p.style,
        }
    }
}
