use super::Event;

/// Receiver of style events.
///
/// Implemented for closures `Fn(Event)` and, with the `events` feature, for
/// `crossbeam::channel::Sender<Event>`.
pub trait EventSink {
    fn send(&self, event: Event);
}

impl<F> EventSink for F
where
    F: Fn(Event),
{
    fn send(&self, event: Event) {
        self(event);
    }
}

#[cfg(feature = "events")]
impl EventSink for crossbeam::channel::Sender<Event> {
    fn send(&self, event: Event) {
        // receiver gone means nobody listens anymore
        let _ = crossbeam::channel::Sender::send(self, event);
    }
}
