use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::events::{Event, EventSink, Observers, PayloadStyleRenamed, SubscriptionId};

/// Kind of graph element a style applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleTarget {
    Node,
    Edge,
}

impl fmt::Display for StyleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleTarget::Node => write!(f, "node"),
            StyleTarget::Edge => write!(f, "edge"),
        }
    }
}

/// Named bundle of visual attributes applied to a graph element.
///
/// Every change made through a setter is delivered synchronously to the
/// style's subscribers and, when the style is owned by a
/// [`StyleManager`](crate::StyleManager), to the manager's subscribers.
pub trait Style {
    fn new(name: &str) -> Self
    where
        Self: Sized;

    fn name(&self) -> &str;

    /// Emits [`Event::StyleRenamed`] if the name actually changes.
    ///
    /// Styles owned by a [`StyleManager`](crate::StyleManager) keep their name:
    /// the call is logged and ignored, rename them through the manager which
    /// keeps names unique.
    fn set_name(&mut self, name: &str);

    fn target(&self) -> StyleTarget;

    fn observers(&self) -> &Observers;

    fn subscribe(&self, sink: impl EventSink + 'static) -> SubscriptionId
    where
        Self: Sized,
    {
        self.observers().subscribe(sink)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers().unsubscribe(id)
    }

    /// Copies every attribute into a new style called `name`.
    ///
    /// The copy starts with no subscribers and no owner.
    fn duplicate(&self, name: &str) -> Self
    where
        Self: Sized;
}

/// Access to the shared state of a style, reserved to its owning context.
pub(crate) trait Owned {
    fn core_mut(&mut self) -> &mut StyleCore;
}

/// State shared by every style kind: name, subscribers and the owner link.
#[derive(Debug)]
pub(crate) struct StyleCore {
    name: String,
    observers: Observers,
    parent: Option<Observers>,
}

impl StyleCore {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            observers: Observers::new(),
            parent: None,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn observers(&self) -> &Observers {
        &self.observers
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Observers>) {
        self.parent = parent;
    }

    pub(crate) fn is_owned(&self) -> bool {
        self.parent.is_some()
    }

    pub(crate) fn rename_unowned(&mut self, target: StyleTarget, name: &str) {
        if self.is_owned() {
            warn!(
                "{target} style `{}` is owned by a style manager, rename it there",
                self.name
            );
            return;
        }
        self.rename(target, name);
    }

    pub(crate) fn rename(&mut self, target: StyleTarget, name: &str) {
        if self.name == name {
            return;
        }

        let old = std::mem::replace(&mut self.name, name.to_string());
        self.emit(&Event::StyleRenamed(PayloadStyleRenamed {
            target,
            old,
            new: self.name.clone(),
        }));
    }

    pub(crate) fn emit(&self, event: &Event) {
        self.observers.notify(event);
        if let Some(parent) = &self.parent {
            parent.notify(event);
        }
    }
}

/// Tolerance based float equality.
///
/// Both values are offset by one before the relative comparison so that values
/// close to zero do not end up being compared with a vanishing tolerance.
pub(crate) fn fuzzy_eq(a: f32, b: f32) -> bool {
    let (a, b) = (1. + a, 1. + b);
    (a - b).abs() * 100_000. <= a.abs().min(b.abs())
}

pub(crate) fn fuzzy_eq_slice(a: &[f32], b: &[f32]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(a, b)| fuzzy_eq(*a, *b))
}

/// Logs and returns `false` for values that can't be stored in a float field.
pub(crate) fn check_finite(style: &str, field: &str, value: f32) -> bool {
    if value.is_finite() {
        return true;
    }

    warn!("style `{style}`: {field} must be finite, got {value}");
    false
}

/// Logs and returns `false` for values that can't be stored in a size field.
pub(crate) fn check_size(style: &str, field: &str, value: f32) -> bool {
    if !check_finite(style, field, value) {
        return false;
    }
    if value < 0. {
        warn!("style `{style}`: {field} can't be < 0, got {value}");
        return false;
    }

    true
}
