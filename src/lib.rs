mod display;
mod edge_style;
mod errors;
mod manager;
mod node_style;
mod sheet;
mod style;

pub mod events;

pub use self::edge_style::{ArrowShape, EdgeStyle, EdgeStyleProps, LineType};
pub use self::errors::StyleError;
pub use self::manager::{StyleManager, DEFAULT_STYLE_NAME};
pub use self::node_style::{EffectType, FillType, NodeStyle, NodeStyleProps};
pub use self::sheet::{NamedEdgeStyle, NamedNodeStyle, StyleSheet};
pub use self::style::{Style, StyleTarget};
