use egui::Color32;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::events::{Event, NodeStyleProperty, Observers, PayloadNodeStyle};
use crate::style::{check_finite, check_size, fuzzy_eq, Owned, Style, StyleCore, StyleTarget};

/// Lowest background radius still accepted, anything in between is stored as `0`.
const BACK_RADIUS_TOLERANCE: f32 = -0.000_01;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillType {
    #[default]
    Solid,
    /// From the base color to the background color.
    Gradient,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    None,
    #[default]
    Shadow,
    Glow,
}

/// Stores properties of a [`NodeStyle`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeStyleProps {
    pub back_radius: f32,
    pub back_opacity: f32,
    pub fill_type: FillType,
    pub back_color: Color32,
    pub base_color: Color32,
    pub border_color: Color32,
    pub border_width: f32,
    pub effect_type: EffectType,
    pub effect_enabled: bool,
    pub effect_color: Color32,
    pub effect_radius: f32,
    pub effect_offset: f32,
    /// Values `<= 0` mean the renderer's default size.
    pub font_point_size: i32,
    pub font_bold: bool,
}

impl Default for NodeStyleProps {
    fn default() -> Self {
        Self {
            back_radius: 4.,
            back_opacity: 0.8,
            fill_type: FillType::default(),
            back_color: Color32::WHITE,
            base_color: Color32::from_rgb(230, 230, 230),
            border_color: Color32::BLACK,
            border_width: 1.,
            effect_type: EffectType::default(),
            effect_enabled: true,
            effect_color: Color32::from_rgba_unmultiplied(0, 0, 0, 127),
            effect_radius: 3.,
            effect_offset: 4.,
            font_point_size: -1,
            font_bold: false,
        }
    }
}

/// Visual attributes of graph nodes.
#[derive(Debug)]
pub struct NodeStyle {
    core: StyleCore,
    props: NodeStyleProps,
}

impl Style for NodeStyle {
    fn new(name: &str) -> Self {
        Self {
            core: StyleCore::new(name),
            props: NodeStyleProps::default(),
        }
    }

    fn name(&self) -> &str {
        self.core.name()
    }

    fn set_name(&mut self, name: &str) {
        self.core.rename_unowned(StyleTarget::Node, name);
    }

    fn target(&self) -> StyleTarget {
        StyleTarget::Node
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

impl Owned for NodeStyle {
    fn core_mut(&mut self) -> &mut StyleCore {
        &mut self.core
    }
}

impl NodeStyle {
    pub fn props(&self) -> &NodeStyleProps {
        &self.props
    }

    /// Pushes every field of `props` through its setter.
    ///
    /// Rejected values keep the current ones, each changed field notifies once.
    /// An effect type of [`EffectType::None`] wins over `props.effect_enabled`.
    pub fn apply(&mut self, props: &NodeStyleProps) {
        self.set_back_radius(props.back_radius);
        self.set_back_opacity(props.back_opacity);
        self.set_fill_type(props.fill_type);
        self.set_back_color(props.back_color);
        self.set_base_color(props.base_color);
        self.set_border_color(props.border_color);
        self.set_border_width(props.border_width);
        self.set_effect_type(props.effect_type);
        if props.effect_type != EffectType::None {
            self.set_effect_enabled(props.effect_enabled);
        }
        self.set_effect_color(props.effect_color);
        self.set_effect_radius(props.effect_radius);
        self.set_effect_offset(props.effect_offset);
        self.set_font_point_size(props.font_point_size);
        self.set_font_bold(props.font_bold);
    }

    pub fn back_radius(&self) -> f32 {
        self.props.back_radius
    }

    /// Negative radius is logged and ignored.
    pub fn set_back_radius(&mut self, back_radius: f32) {
        if !check_finite(self.name(), "background radius", back_radius) {
            return;
        }
        if back_radius < BACK_RADIUS_TOLERANCE {
            warn!(
                "node style `{}`: background radius can't be < 0, got {back_radius}",
                self.name()
            );
            return;
        }

        let back_radius = back_radius.max(0.);
        if !fuzzy_eq(self.props.back_radius, back_radius) {
            self.props.back_radius = back_radius;
            self.changed(NodeStyleProperty::BackRadius);
        }
    }

    pub fn back_opacity(&self) -> f32 {
        self.props.back_opacity
    }

    pub fn set_back_opacity(&mut self, back_opacity: f32) {
        if !check_finite(self.name(), "background opacity", back_opacity) {
            return;
        }
        if !fuzzy_eq(self.props.back_opacity, back_opacity) {
            self.props.back_opacity = back_opacity;
            self.changed(NodeStyleProperty::BackOpacity);
        }
    }

    pub fn fill_type(&self) -> FillType {
        self.props.fill_type
    }

    pub fn set_fill_type(&mut self, fill_type: FillType) {
        if self.props.fill_type != fill_type {
            self.props.fill_type = fill_type;
            self.changed(NodeStyleProperty::FillType);
        }
    }

    pub fn back_color(&self) -> Color32 {
        self.props.back_color
    }

    pub fn set_back_color(&mut self, back_color: Color32) {
        if self.props.back_color != back_color {
            self.props.back_color = back_color;
            self.changed(NodeStyleProperty::BackColor);
        }
    }

    pub fn base_color(&self) -> Color32 {
        self.props.base_color
    }

    pub fn set_base_color(&mut self, base_color: Color32) {
        if self.props.base_color != base_color {
            self.props.base_color = base_color;
            self.changed(NodeStyleProperty::BaseColor);
        }
    }

    pub fn border_color(&self) -> Color32 {
        self.props.border_color
    }

    pub fn set_border_color(&mut self, border_color: Color32) {
        if self.props.border_color != border_color {
            self.props.border_color = border_color;
            self.changed(NodeStyleProperty::BorderColor);
        }
    }

    pub fn border_width(&self) -> f32 {
        self.props.border_width
    }

    pub fn set_border_width(&mut self, border_width: f32) {
        if !check_size(self.name(), "border width", border_width) {
            return;
        }
        if !fuzzy_eq(self.props.border_width, border_width) {
            self.props.border_width = border_width;
            self.changed(NodeStyleProperty::BorderWidth);
        }
    }

    pub fn effect_type(&self) -> EffectType {
        self.props.effect_type
    }

    /// Also switches the effect on for any type but [`EffectType::None`], and
    /// off for [`EffectType::None`], whatever the enabled flag was before.
    pub fn set_effect_type(&mut self, effect_type: EffectType) {
        self.set_effect_enabled(effect_type != EffectType::None);

        if self.props.effect_type != effect_type {
            self.props.effect_type = effect_type;
            self.changed(NodeStyleProperty::EffectType);
        }
    }

    pub fn effect_enabled(&self) -> bool {
        self.props.effect_enabled
    }

    pub fn set_effect_enabled(&mut self, effect_enabled: bool) {
        if self.props.effect_enabled != effect_enabled {
            self.props.effect_enabled = effect_enabled;
            self.changed(NodeStyleProperty::EffectEnabled);
        }
    }

    pub fn effect_color(&self) -> Color32 {
        self.props.effect_color
    }

    pub fn set_effect_color(&mut self, effect_color: Color32) {
        if self.props.effect_color != effect_color {
            self.props.effect_color = effect_color;
            self.changed(NodeStyleProperty::EffectColor);
        }
    }

    pub fn effect_radius(&self) -> f32 {
        self.props.effect_radius
    }

    /// Negative radius is silently ignored.
    pub fn set_effect_radius(&mut self, effect_radius: f32) {
        if effect_radius < 0. || !effect_radius.is_finite() {
            return;
        }
        if !fuzzy_eq(self.props.effect_radius, effect_radius) {
            self.props.effect_radius = effect_radius;
            self.changed(NodeStyleProperty::EffectRadius);
        }
    }

    pub fn effect_offset(&self) -> f32 {
        self.props.effect_offset
    }

    pub fn set_effect_offset(&mut self, effect_offset: f32) {
        if !check_finite(self.name(), "effect offset", effect_offset) {
            return;
        }
        if !fuzzy_eq(self.props.effect_offset, effect_offset) {
            self.props.effect_offset = effect_offset;
            self.changed(NodeStyleProperty::EffectOffset);
        }
    }

    pub fn font_point_size(&self) -> i32 {
        self.props.font_point_size
    }

    pub fn set_font_point_size(&mut self, font_point_size: i32) {
        if self.props.font_point_size != font_point_size {
            self.props.font_point_size = font_point_size;
            self.changed(NodeStyleProperty::FontPointSize);
        }
    }

    pub fn font_bold(&self) -> bool {
        self.props.font_bold
    }

    pub fn set_font_bold(&mut self, font_bold: bool) {
        if self.props.font_bold != font_bold {
            self.props.font_bold = font_bold;
            self.changed(NodeStyleProperty::FontBold);
        }
    }

    fn changed(&self, property: NodeStyleProperty) {
        self.core.emit(&Event::NodeStyle(PayloadNodeStyle {
            style: self.core.name().to_string(),
            property,
        }));
    }
}
