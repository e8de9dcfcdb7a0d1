use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    EdgeStyleProps, NodeStyleProps, Style, StyleError, StyleManager, StyleTarget,
    DEFAULT_STYLE_NAME,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedNodeStyle {
    pub name: String,
    #[serde(flatten)]
    pub props: NodeStyleProps,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedEdgeStyle {
    pub name: String,
    #[serde(flatten)]
    pub props: EdgeStyleProps,
}

/// Serializable description of a [`StyleManager`] content.
///
/// Every field may be omitted, missing style attributes take their default
/// values:
///
/// ```json
/// {
///   "node_styles": [{ "name": "warning", "back_color": [255, 200, 0, 255] }],
///   "edge_styles": [{ "name": "dep", "dashed": true, "dst_shape": "arrow_open" }],
///   "default_edge_style": "dep"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSheet {
    pub node_styles: Vec<NamedNodeStyle>,
    pub edge_styles: Vec<NamedEdgeStyle>,
    pub default_node_style: Option<String>,
    pub default_edge_style: Option<String>,
}

impl StyleSheet {
    /// # Errors
    ///
    /// [`StyleError::Sheet`] if `json` is not a valid sheet.
    pub fn from_json(json: &str) -> Result<Self, StyleError> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// [`StyleError::Sheet`] if serialization fails.
    pub fn to_json(&self) -> Result<String, StyleError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn check_unique(&self) -> Result<(), StyleError> {
        let mut seen = HashSet::new();
        if let Some(dup) = self.node_styles.iter().find(|s| !seen.insert(&s.name)) {
            return Err(StyleError::DuplicateName {
                target: StyleTarget::Node,
                name: dup.name.clone(),
            });
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.edge_styles.iter().find(|s| !seen.insert(&s.name)) {
            return Err(StyleError::DuplicateName {
                target: StyleTarget::Edge,
                name: dup.name.clone(),
            });
        }

        Ok(())
    }
}

impl StyleManager {
    /// Builds a manager holding exactly the styles of the sheet.
    ///
    /// When the sheet has no [`DEFAULT_STYLE_NAME`] entry but its default is
    /// listed, the built-in default takes that name, so that sheets written by
    /// [`StyleManager::to_sheet`] load back into the same set of styles.
    ///
    /// # Errors
    ///
    /// See [`StyleManager::apply_sheet`].
    pub fn from_sheet(sheet: &StyleSheet) -> Result<Self, StyleError> {
        let mut manager = Self::new();

        if let Some(name) = &sheet.default_node_style {
            let listed = sheet.node_styles.iter().any(|s| &s.name == name);
            let builtin = sheet.node_styles.iter().any(|s| s.name == DEFAULT_STYLE_NAME);
            if listed && !builtin {
                manager.rename_node_style(DEFAULT_STYLE_NAME, name)?;
            }
        }
        if let Some(name) = &sheet.default_edge_style {
            let listed = sheet.edge_styles.iter().any(|s| &s.name == name);
            let builtin = sheet.edge_styles.iter().any(|s| s.name == DEFAULT_STYLE_NAME);
            if listed && !builtin {
                manager.rename_edge_style(DEFAULT_STYLE_NAME, name)?;
            }
        }

        manager.apply_sheet(sheet)?;
        Ok(manager)
    }

    /// # Errors
    ///
    /// [`StyleError::Sheet`] for invalid JSON, otherwise see [`StyleManager::apply_sheet`].
    pub fn from_json(json: &str) -> Result<Self, StyleError> {
        Self::from_sheet(&StyleSheet::from_json(json)?)
    }

    /// Updates styles with the same name and creates the missing ones.
    ///
    /// Values go through the regular setters, so invalid ones are logged and
    /// skipped and subscribers are notified of every change.
    ///
    /// # Errors
    ///
    /// [`StyleError::DuplicateName`] if the sheet names a style twice,
    /// [`StyleError::NotFound`] if a default refers to a style that exists
    /// neither in the sheet nor in the manager. Nothing is changed on error.
    pub fn apply_sheet(&mut self, sheet: &StyleSheet) -> Result<(), StyleError> {
        sheet.check_unique()?;
        if let Some(name) = &sheet.default_node_style {
            let in_sheet = sheet.node_styles.iter().any(|s| &s.name == name);
            if self.node_style(name).is_none() && !in_sheet {
                return Err(StyleError::NotFound {
                    target: StyleTarget::Node,
                    name: name.clone(),
                });
            }
        }
        if let Some(name) = &sheet.default_edge_style {
            let in_sheet = sheet.edge_styles.iter().any(|s| &s.name == name);
            if self.edge_style(name).is_none() && !in_sheet {
                return Err(StyleError::NotFound {
                    target: StyleTarget::Edge,
                    name: name.clone(),
                });
            }
        }

        for entry in &sheet.node_styles {
            match self.node_style_mut(&entry.name) {
                Some(style) => style.apply(&entry.props),
                None => self.create_node_style(&entry.name)?.apply(&entry.props),
            }
        }
        for entry in &sheet.edge_styles {
            match self.edge_style_mut(&entry.name) {
                Some(style) => style.apply(&entry.props),
                None => self.create_edge_style(&entry.name)?.apply(&entry.props),
            }
        }

        if let Some(name) = &sheet.default_node_style {
            self.set_default_node_style(name)?;
        }
        if let Some(name) = &sheet.default_edge_style {
            self.set_default_edge_style(name)?;
        }

        debug!(
            "style sheet applied: {} node styles, {} edge styles",
            sheet.node_styles.len(),
            sheet.edge_styles.len()
        );
        Ok(())
    }

    pub fn to_sheet(&self) -> StyleSheet {
        StyleSheet {
            node_styles: self
                .node_styles()
                .map(|s| NamedNodeStyle {
                    name: s.name().to_string(),
                    props: s.props().clone(),
                })
                .collect(),
            edge_styles: self
                .edge_styles()
                .map(|s| NamedEdgeStyle {
                    name: s.name().to_string(),
                    props: s.props().clone(),
                })
                .collect(),
            default_node_style: Some(self.default_node_style().name().to_string()),
            default_edge_style: Some(self.default_edge_style().name().to_string()),
        }
    }

    /// # Errors
    ///
    /// [`StyleError::Sheet`] if serialization fails.
    pub fn to_json(&self) -> Result<String, StyleError> {
        self.to_sheet().to_json()
    }
}

#[cfg(test)]
mod tests {
    use egui::Color32;

    use super::*;
    use crate::ArrowShape;

    #[test]
    fn test_empty_sheet() {
        let sheet = StyleSheet::from_json("{}").unwrap();
        assert_eq!(sheet, StyleSheet::default());

        let manager = StyleManager::from_sheet(&sheet).unwrap();
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_default_entry_configures_existing_default() {
        let manager = StyleManager::from_json(
            r#"{ "node_styles": [{ "name": "default", "back_radius": 9.0 }] }"#,
        )
        .unwrap();
        assert_eq!(manager.node_styles().count(), 1);
        assert_eq!(manager.default_node_style().back_radius(), 9.);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let manager = StyleManager::from_json(
            r#"{ "edge_styles": [{ "name": "e", "line_width": -2.0, "arrow_size": 7.0 }] }"#,
        )
        .unwrap();
        let style = manager.edge_style("e").unwrap();
        assert_eq!(style.line_width(), 1.);
        assert_eq!(style.arrow_size(), 7.);
    }

    #[test]
    fn test_duplicate_entries_rejected() {
        let err = StyleManager::from_json(
            r#"{ "edge_styles": [{ "name": "e" }, { "name": "e" }] }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            StyleError::DuplicateName {
                target: StyleTarget::Edge,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_default_leaves_manager_untouched() {
        let mut manager = StyleManager::new();
        let sheet = StyleSheet::from_json(
            r#"{ "node_styles": [{ "name": "n" }], "default_node_style": "missing" }"#,
        )
        .unwrap();

        assert!(matches!(
            manager.apply_sheet(&sheet),
            Err(StyleError::NotFound { .. })
        ));
        assert!(manager.node_style("n").is_none());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            StyleSheet::from_json("{ node_styles"),
            Err(StyleError::Sheet(_))
        ));
        assert!(matches!(
            StyleSheet::from_json(r#"{ "edge_styles": [{ "name": "e", "dst_shape": "star" }] }"#),
            Err(StyleError::Sheet(_))
        ));
    }

    #[test]
    fn test_to_sheet_and_back() {
        let mut manager = StyleManager::new();
        let style = manager.create_edge_style("dep").unwrap();
        style.set_dashed(true);
        style.set_dst_shape(ArrowShape::ArrowOpen);
        style.set_line_color(Color32::from_rgb(10, 20, 30));
        manager.set_default_edge_style("dep").unwrap();

        let json = manager.to_json().unwrap();
        let loaded = StyleManager::from_json(&json).unwrap();

        assert_eq!(loaded.to_sheet(), manager.to_sheet());
        assert_eq!(loaded.default_edge_style().name(), "dep");
        assert!(loaded.edge_style(DEFAULT_STYLE_NAME).is_some());
    }

    #[test]
    fn test_renamed_default_round_trip() {
        let mut manager = StyleManager::new();
        manager.rename_node_style(DEFAULT_STYLE_NAME, "base").unwrap();
        manager.default_node_style_mut().set_border_width(2.);
        manager.create_node_style("accent").unwrap();

        let loaded = StyleManager::from_json(&manager.to_json().unwrap()).unwrap();

        assert_eq!(loaded.to_sheet(), manager.to_sheet());
        assert_eq!(loaded.default_node_style().name(), "base");
        assert_eq!(loaded.default_node_style().border_width(), 2.);
        assert!(loaded.node_style(DEFAULT_STYLE_NAME).is_none());
    }

    #[test]
    fn test_removed_default_round_trip() {
        let mut manager = StyleManager::new();
        manager.create_edge_style("x").unwrap().set_dashed(true);
        manager.set_default_edge_style("x").unwrap();
        manager.remove_edge_style(DEFAULT_STYLE_NAME).unwrap();

        let loaded = StyleManager::from_json(&manager.to_json().unwrap()).unwrap();

        assert_eq!(loaded.to_sheet(), manager.to_sheet());
        assert_eq!(loaded.edge_styles().count(), 1);
        assert!(loaded.default_edge_style().dashed());
    }
}
