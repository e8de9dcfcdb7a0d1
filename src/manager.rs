use std::collections::HashMap;
use std::hash::Hash;

use log::debug;
use petgraph::stable_graph::{EdgeIndex, NodeIndex};

use crate::events::{
    Event, EventSink, Observers, PayloadDefaultStyleChanged, PayloadStyleAdded,
    PayloadStyleRemoved, SubscriptionId,
};
use crate::style::Owned;
use crate::{EdgeStyle, NodeStyle, Style, StyleError, StyleTarget};

/// Name of the default styles every [`StyleManager`] starts with.
pub const DEFAULT_STYLE_NAME: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct StyleKey(u64);

#[derive(Debug)]
struct Entry<S> {
    key: StyleKey,
    style: S,
}

/// Uniquely named styles of one kind, one of them being the default.
///
/// Bindings refer to styles by key so that they survive renames.
#[derive(Debug)]
struct StyleSet<S: Style + Owned, K> {
    target: StyleTarget,
    next_key: u64,
    default: Entry<S>,
    others: Vec<Entry<S>>,
    bindings: HashMap<K, StyleKey>,
}

impl<S: Style + Owned, K: Copy + Eq + Hash> StyleSet<S, K> {
    fn new(target: StyleTarget, parent: &Observers) -> Self {
        let mut default = S::new(DEFAULT_STYLE_NAME);
        default.core_mut().set_parent(Some(parent.clone()));

        Self {
            target,
            next_key: 1,
            default: Entry {
                key: StyleKey(0),
                style: default,
            },
            others: Vec::new(),
            bindings: HashMap::new(),
        }
    }

    fn iter(&self) -> impl Iterator<Item = &Entry<S>> {
        std::iter::once(&self.default).chain(self.others.iter())
    }

    fn len(&self) -> usize {
        self.others.len() + 1
    }

    fn find(&self, name: &str) -> Option<&Entry<S>> {
        self.iter().find(|e| e.style.name() == name)
    }

    fn get(&self, name: &str) -> Option<&S> {
        self.find(name).map(|e| &e.style)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut S> {
        if self.default.style.name() == name {
            return Some(&mut self.default.style);
        }
        self.others
            .iter_mut()
            .find(|e| e.style.name() == name)
            .map(|e| &mut e.style)
    }

    fn not_found(&self, name: &str) -> StyleError {
        StyleError::NotFound {
            target: self.target,
            name: name.to_string(),
        }
    }

    fn ensure_free(&self, name: &str) -> Result<(), StyleError> {
        if self.find(name).is_some() {
            return Err(StyleError::DuplicateName {
                target: self.target,
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn insert(&mut self, mut style: S, parent: &Observers) -> Result<&mut S, StyleError> {
        self.ensure_free(style.name())?;

        style.core_mut().set_parent(Some(parent.clone()));
        let key = StyleKey(self.next_key);
        self.next_key += 1;

        debug!("{} style `{}` added", self.target, style.name());
        parent.notify(&Event::StyleAdded(PayloadStyleAdded {
            target: self.target,
            style: style.name().to_string(),
        }));

        self.others.push(Entry { key, style });
        let last = self.others.len() - 1;
        Ok(&mut self.others[last].style)
    }

    fn remove(&mut self, name: &str, parent: &Observers) -> Result<S, StyleError> {
        if self.default.style.name() == name {
            return Err(StyleError::DefaultStyle {
                target: self.target,
                name: name.to_string(),
            });
        }
        let pos = self
            .others
            .iter()
            .position(|e| e.style.name() == name)
            .ok_or_else(|| self.not_found(name))?;

        let Entry { key, mut style } = self.others.remove(pos);
        self.bindings.retain(|_, bound| *bound != key);
        style.core_mut().set_parent(None);

        debug!("{} style `{name}` removed", self.target);
        parent.notify(&Event::StyleRemoved(PayloadStyleRemoved {
            target: self.target,
            style: name.to_string(),
        }));

        Ok(style)
    }

    fn rename(&mut self, old: &str, new: &str) -> Result<(), StyleError> {
        if old == new {
            return if self.find(old).is_some() {
                Ok(())
            } else {
                Err(self.not_found(old))
            };
        }
        self.ensure_free(new)?;
        if self.find(old).is_none() {
            return Err(self.not_found(old));
        }

        let target = self.target;
        if let Some(style) = self.get_mut(old) {
            style.core_mut().rename(target, new);
        }
        Ok(())
    }

    fn set_default(&mut self, name: &str, parent: &Observers) -> Result<(), StyleError> {
        if self.default.style.name() == name {
            return Ok(());
        }
        let pos = self
            .others
            .iter()
            .position(|e| e.style.name() == name)
            .ok_or_else(|| self.not_found(name))?;

        let next = self.others.remove(pos);
        let previous = std::mem::replace(&mut self.default, next);
        self.others.insert(0, previous);

        debug!("default {} style is now `{name}`", self.target);
        parent.notify(&Event::DefaultStyleChanged(PayloadDefaultStyleChanged {
            target: self.target,
            style: name.to_string(),
        }));

        Ok(())
    }

    fn bind(&mut self, idx: K, name: &str) -> Result<(), StyleError> {
        let key = self.find(name).ok_or_else(|| self.not_found(name))?.key;
        self.bindings.insert(idx, key);
        Ok(())
    }

    fn unbind(&mut self, idx: K) -> bool {
        self.bindings.remove(&idx).is_some()
    }

    fn style_for(&self, idx: K) -> &S {
        self.bindings
            .get(&idx)
            .and_then(|key| self.iter().find(|e| e.key == *key))
            .map_or(&self.default.style, |e| &e.style)
    }
}

/// Owns node and edge styles and re-broadcasts their notifications.
///
/// Both kinds start with a style called [`DEFAULT_STYLE_NAME`], which is used
/// for every element without an explicit binding. Names are unique per kind;
/// a node style and an edge style may share a name.
///
/// Subscribers of the manager receive every event of the styles it owns, plus
/// [`Event::StyleAdded`], [`Event::StyleRemoved`] and [`Event::DefaultStyleChanged`].
/// Dropping the manager drops its styles.
#[derive(Debug)]
pub struct StyleManager {
    observers: Observers,
    nodes: StyleSet<NodeStyle, NodeIndex>,
    edges: StyleSet<EdgeStyle, EdgeIndex>,
}

impl Default for StyleManager {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleManager {
    pub fn new() -> Self {
        let observers = Observers::new();
        Self {
            nodes: StyleSet::new(StyleTarget::Node, &observers),
            edges: StyleSet::new(StyleTarget::Edge, &observers),
            observers,
        }
    }

    pub fn observers(&self) -> &Observers {
        &self.observers
    }

    pub fn subscribe(&self, sink: impl EventSink + 'static) -> SubscriptionId {
        self.observers.subscribe(sink)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Number of node and edge styles, defaults included.
    pub fn len(&self) -> usize {
        self.nodes.len() + self.edges.len()
    }

    /// Always `false`, the default styles can't be removed.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// # Errors
    ///
    /// [`StyleError::DuplicateName`] if a node style with this name exists.
    pub fn create_node_style(&mut self, name: &str) -> Result<&mut NodeStyle, StyleError> {
        self.nodes.insert(NodeStyle::new(name), &self.observers)
    }

    /// Takes ownership of `style`; its existing subscribers are kept.
    ///
    /// # Errors
    ///
    /// [`StyleError::DuplicateName`] if a node style with this name exists.
    pub fn add_node_style(&mut self, style: NodeStyle) -> Result<&mut NodeStyle, StyleError> {
        self.nodes.insert(style, &self.observers)
    }

    pub fn node_style(&self, name: &str) -> Option<&NodeStyle> {
        self.nodes.get(name)
    }

    pub fn node_style_mut(&mut self, name: &str) -> Option<&mut NodeStyle> {
        self.nodes.get_mut(name)
    }

    /// Default style first.
    pub fn node_styles(&self) -> impl Iterator<Item = &NodeStyle> {
        self.nodes.iter().map(|e| &e.style)
    }

    /// Detaches the style and drops every binding to it.
    ///
    /// # Errors
    ///
    /// [`StyleError::NotFound`] for unknown names, [`StyleError::DefaultStyle`]
    /// for the current default.
    pub fn remove_node_style(&mut self, name: &str) -> Result<NodeStyle, StyleError> {
        self.nodes.remove(name, &self.observers)
    }

    /// # Errors
    ///
    /// [`StyleError::NotFound`] if `old` is unknown, [`StyleError::DuplicateName`]
    /// if `new` is taken.
    pub fn rename_node_style(&mut self, old: &str, new: &str) -> Result<(), StyleError> {
        self.nodes.rename(old, new)
    }

    pub fn default_node_style(&self) -> &NodeStyle {
        &self.nodes.default.style
    }

    pub fn default_node_style_mut(&mut self) -> &mut NodeStyle {
        &mut self.nodes.default.style
    }

    /// # Errors
    ///
    /// [`StyleError::NotFound`] for unknown names.
    pub fn set_default_node_style(&mut self, name: &str) -> Result<(), StyleError> {
        self.nodes.set_default(name, &self.observers)
    }

    /// # Errors
    ///
    /// [`StyleError::NotFound`] for unknown names.
    pub fn bind_node(&mut self, idx: NodeIndex, name: &str) -> Result<(), StyleError> {
        self.nodes.bind(idx, name)
    }

    pub fn unbind_node(&mut self, idx: NodeIndex) -> bool {
        self.nodes.unbind(idx)
    }

    /// Bound style of the node or the default one.
    pub fn style_for_node(&self, idx: NodeIndex) -> &NodeStyle {
        self.nodes.style_for(idx)
    }

    /// # Errors
    ///
    /// [`StyleError::DuplicateName`] if an edge style with this name exists.
    pub fn create_edge_style(&mut self, name: &str) -> Result<&mut EdgeStyle, StyleError> {
        self.edges.insert(EdgeStyle::new(name), &self.observers)
    }

    /// Takes ownership of `style`; its existing subscribers are kept.
    ///
    /// # Errors
    ///
    /// [`StyleError::DuplicateName`] if an edge style with this name exists.
    pub fn add_edge_style(&mut self, style: EdgeStyle) -> Result<&mut EdgeStyle, StyleError> {
        self.edges.insert(style, &self.observers)
    }

    pub fn edge_style(&self, name: &str) -> Option<&EdgeStyle> {
        self.edges.get(name)
    }

    pub fn edge_style_mut(&mut self, name: &str) -> Option<&mut EdgeStyle> {
        self.edges.get_mut(name)
    }

    /// Default style first.
    pub fn edge_styles(&self) -> impl Iterator<Item = &EdgeStyle> {
        self.edges.iter().map(|e| &e.style)
    }

    /// Detaches the style and drops every binding to it.
    ///
    /// # Errors
    ///
    /// [`StyleError::NotFound`] for unknown names, [`StyleError::DefaultStyle`]
    /// for the current default.
    pub fn remove_edge_style(&mut self, name: &str) -> Result<EdgeStyle, StyleError> {
        self.edges.remove(name, &self.observers)
    }

    /// # Errors
    ///
    /// [`StyleError::NotFound`] if `old` is unknown, [`StyleError::DuplicateName`]
    /// if `new` is taken.
    pub fn rename_edge_style(&mut self, old: &str, new: &str) -> Result<(), StyleError> {
        self.edges.rename(old, new)
    }

    pub fn default_edge_style(&self) -> &EdgeStyle {
        &self.edges.default.style
    }

    pub fn default_edge_style_mut(&mut self) -> &mut EdgeStyle {
        &mut self.edges.default.style
    }

    /// # Errors
    ///
    /// [`StyleError::NotFound`] for unknown names.
    pub fn set_default_edge_style(&mut self, name: &str) -> Result<(), StyleError> {
        self.edges.set_default(name, &self.observers)
    }

    /// # Errors
    ///
    /// [`StyleError::NotFound`] for unknown names.
    pub fn bind_edge(&mut self, idx: EdgeIndex, name: &str) -> Result<(), StyleError> {
        self.edges.bind(idx, name)
    }

    pub fn unbind_edge(&mut self, idx: EdgeIndex) -> bool {
        self.edges.unbind(idx)
    }

    /// Bound style of the edge or the default one.
    pub fn style_for_edge(&self, idx: EdgeIndex) -> &EdgeStyle {
        self.edges.style_for(idx)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use egui::Color32;

    use super::*;

    fn recorded(manager: &StyleManager) -> Rc<RefCell<Vec<Event>>> {
        let got = Rc::new(RefCell::new(Vec::new()));
        let got_sink = got.clone();
        manager.subscribe(move |e: Event| got_sink.borrow_mut().push(e));
        got
    }

    #[test]
    fn test_starts_with_defaults() {
        let manager = StyleManager::new();
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.default_node_style().name(), DEFAULT_STYLE_NAME);
        assert_eq!(manager.default_edge_style().name(), DEFAULT_STYLE_NAME);
        assert!(manager.node_style(DEFAULT_STYLE_NAME).is_some());
    }

    #[test]
    fn test_duplicate_names_rejected_per_kind() {
        let mut manager = StyleManager::new();
        manager.create_node_style("bold").unwrap();
        manager.create_edge_style("bold").unwrap();

        let err = manager.create_node_style("bold").unwrap_err();
        assert!(matches!(
            err,
            StyleError::DuplicateName {
                target: StyleTarget::Node,
                ..
            }
        ));
        assert_eq!(err.to_string(), "a node style named `bold` already exists");
        assert!(manager.create_edge_style(DEFAULT_STYLE_NAME).is_err());
    }

    #[test]
    fn test_owned_style_events_reach_manager() {
        let mut manager = StyleManager::new();
        let got = recorded(&manager);

        manager
            .create_edge_style("thick")
            .unwrap()
            .set_line_width(4.);
        manager.default_node_style_mut().set_back_radius(10.);

        let styles: Vec<String> = got.borrow().iter().map(|e| e.style().to_string()).collect();
        assert_eq!(styles, vec!["thick", "thick", "thick", "default"]);
        assert!(matches!(got.borrow()[0], Event::StyleAdded(_)));
    }

    #[test]
    fn test_remove_detaches_and_unbinds() {
        let mut manager = StyleManager::new();
        manager.create_node_style("red").unwrap();
        manager.bind_node(NodeIndex::new(3), "red").unwrap();
        assert_eq!(manager.style_for_node(NodeIndex::new(3)).name(), "red");

        let got = recorded(&manager);
        let mut removed = manager.remove_node_style("red").unwrap();
        assert_eq!(manager.style_for_node(NodeIndex::new(3)).name(), DEFAULT_STYLE_NAME);

        removed.set_back_color(Color32::RED);
        assert_eq!(got.borrow().len(), 1);
        assert!(matches!(got.borrow()[0], Event::StyleRemoved(_)));
    }

    #[test]
    fn test_default_cannot_be_removed() {
        let mut manager = StyleManager::new();
        assert!(matches!(
            manager.remove_edge_style(DEFAULT_STYLE_NAME),
            Err(StyleError::DefaultStyle { .. })
        ));
        assert!(matches!(
            manager.remove_edge_style("missing"),
            Err(StyleError::NotFound { .. })
        ));
    }

    #[test]
    fn test_set_default() {
        let mut manager = StyleManager::new();
        manager.create_node_style("dark").unwrap();
        let got = recorded(&manager);

        manager.set_default_node_style("dark").unwrap();
        manager.set_default_node_style("dark").unwrap();
        assert_eq!(manager.default_node_style().name(), "dark");
        assert_eq!(got.borrow().len(), 1);

        // the previous default is an ordinary style now
        manager.remove_node_style(DEFAULT_STYLE_NAME).unwrap();
        assert!(manager.set_default_node_style("missing").is_err());
    }

    #[test]
    fn test_bindings_survive_rename() {
        let mut manager = StyleManager::new();
        manager.create_edge_style("a").unwrap();
        manager.create_edge_style("b").unwrap();
        manager.bind_edge(EdgeIndex::new(0), "a").unwrap();

        assert!(manager.rename_edge_style("a", "b").is_err());
        manager.rename_edge_style("a", "c").unwrap();
        assert_eq!(manager.style_for_edge(EdgeIndex::new(0)).name(), "c");
        assert!(manager.edge_style("a").is_none());

        assert!(manager.unbind_edge(EdgeIndex::new(0)));
        assert!(!manager.unbind_edge(EdgeIndex::new(0)));
        assert_eq!(manager.style_for_edge(EdgeIndex::new(0)).name(), DEFAULT_STYLE_NAME);
    }

    #[test]
    fn test_owned_styles_are_renamed_through_manager() {
        let mut manager = StyleManager::new();
        manager.create_node_style("a").unwrap();
        let got = recorded(&manager);

        manager
            .node_style_mut("a")
            .unwrap()
            .set_name(DEFAULT_STYLE_NAME);
        manager.default_node_style_mut().set_name("a");
        assert!(got.borrow().is_empty());

        let names: Vec<&str> = manager.node_styles().map(|s| s.name()).collect();
        assert_eq!(names, vec![DEFAULT_STYLE_NAME, "a"]);

        manager.rename_node_style(DEFAULT_STYLE_NAME, "base").unwrap();
        assert_eq!(manager.default_node_style().name(), "base");
        assert!(matches!(got.borrow()[0], Event::StyleRenamed(_)));

        // detached styles are free to be renamed again
        let mut removed = manager.remove_node_style("a").unwrap();
        removed.set_name("b");
        assert_eq!(removed.name(), "b");
    }

    #[test]
    fn test_bind_unknown_style() {
        let mut manager = StyleManager::new();
        assert!(matches!(
            manager.bind_node(NodeIndex::new(0), "nope"),
            Err(StyleError::NotFound { .. })
        ));
    }

    #[test]
    fn test_add_keeps_style_subscribers() {
        let style = NodeStyle::new("own");
        let hits = Rc::new(RefCell::new(0));
        let hits_sink = hits.clone();
        style.subscribe(move |_: Event| *hits_sink.borrow_mut() += 1);

        let mut manager = StyleManager::new();
        let got = recorded(&manager);
        manager.add_node_style(style).unwrap().set_font_bold(true);

        assert_eq!(*hits.borrow(), 1);
        assert_eq!(got.borrow().len(), 2);
        assert_eq!(manager.node_styles().count(), 2);
    }
}
