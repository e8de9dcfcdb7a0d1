use std::{cell::RefCell, fmt, rc::Rc};

use super::{Event, EventSink};

/// Returned by [`Observers::subscribe`], used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Registry {
    next_id: u64,
    sinks: Vec<(SubscriptionId, Rc<dyn EventSink>)>,
}

/// Ordered list of event sinks.
///
/// This is a handle: clones share the same list. A style keeps its own list and
/// a clone of its parent's list, so that the parent hears about every change of
/// the styles it owns.
///
/// A sink that captures a clone of the list it is subscribed to forms a
/// reference cycle and is never dropped. Capture a [`Weak`](std::rc::Weak)
/// reference instead.
#[derive(Clone, Default)]
pub struct Observers {
    registry: Rc<RefCell<Registry>>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, sink: impl EventSink + 'static) -> SubscriptionId {
        let mut registry = self.registry.borrow_mut();
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry.sinks.push((id, Rc::new(sink)));
        id
    }

    /// Returns `false` if the subscription was not found.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry.borrow_mut();
        let before = registry.sinks.len();
        registry.sinks.retain(|(sub, _)| *sub != id);
        registry.sinks.len() != before
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Delivers the event to every sink in subscription order before returning.
    ///
    /// Sinks subscribed while delivering only receive later events.
    pub fn notify(&self, event: &Event) {
        let sinks: Vec<Rc<dyn EventSink>> = self
            .registry
            .borrow()
            .sinks
            .iter()
            .map(|(_, sink)| sink.clone())
            .collect();

        for sink in sinks {
            sink.send(event.clone());
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.len())
            .finish()
    }
}
