//! Conversions from styles to egui drawing primitives.

use egui::{Color32, FontFamily, FontId, Pos2, Shape, Stroke};

use crate::{EdgeStyle, EffectType, FillType, NodeStyle};

impl NodeStyle {
    pub fn border_stroke(&self) -> Stroke {
        Stroke::new(self.border_width(), self.border_color())
    }

    /// Background color with the background opacity applied.
    pub fn fill_color(&self) -> Color32 {
        with_opacity(self.back_color(), self.back_opacity())
    }

    /// Start and end colors of the background gradient, `None` for solid fills.
    pub fn gradient_colors(&self) -> Option<(Color32, Color32)> {
        match self.fill_type() {
            FillType::Solid => None,
            FillType::Gradient => Some((
                with_opacity(self.base_color(), self.back_opacity()),
                self.fill_color(),
            )),
        }
    }

    /// Label font, `default_size` is used when no point size is set.
    ///
    /// egui has no bold weight for the builtin families, so [`NodeStyle::font_bold`]
    /// is left for custom font setups to interpret.
    pub fn font_id(&self, default_size: f32) -> FontId {
        let size = if self.font_point_size() > 0 {
            self.font_point_size() as f32
        } else {
            default_size
        };
        FontId::new(size, FontFamily::Proportional)
    }

    /// Color of the drop shadow or glow, `None` when no effect is drawn.
    pub fn effect_draw_color(&self) -> Option<Color32> {
        if !self.effect_enabled() || self.effect_type() == EffectType::None {
            return None;
        }
        Some(self.effect_color())
    }
}

impl EdgeStyle {
    pub fn stroke(&self) -> Stroke {
        Stroke::new(self.line_width(), self.line_color())
    }

    /// Dash and gap lengths scaled by the line width.
    ///
    /// `None` means a solid line: the style is not dashed or the pattern has no
    /// visible length. Odd patterns are repeated once to get dash/gap pairs.
    pub fn dash_lengths(&self) -> Option<(Vec<f32>, Vec<f32>)> {
        if !self.dashed() {
            return None;
        }

        let pattern = self.dash_pattern();
        let total: f32 = pattern.iter().sum::<f32>() * self.line_width();
        if total <= 0. {
            return None;
        }

        let mut segments: Vec<f32> = pattern.iter().map(|s| s * self.line_width()).collect();
        if segments.len() % 2 == 1 {
            segments.extend_from_within(..);
        }

        Some(
            segments
                .chunks_exact(2)
                .map(|pair| (pair[0], pair[1]))
                .unzip(),
        )
    }

    /// Shapes drawing `path` with this style's stroke and dashes.
    pub fn line_shapes(&self, path: &[Pos2]) -> Vec<Shape> {
        if path.len() < 2 {
            return vec![];
        }

        match self.dash_lengths() {
            Some((dashes, gaps)) => {
                Shape::dashed_line_with_offset(path, self.stroke(), &dashes, &gaps, 0.)
            }
            None => vec![Shape::line(path.to_vec(), self.stroke())],
        }
    }
}

fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    color.gamma_multiply(opacity.clamp(0., 1.))
}
