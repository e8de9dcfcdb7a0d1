mod event;
mod observers;
mod sink;

pub use event::{
    EdgeStyleProperty, Event, NodeStyleProperty, PayloadDefaultStyleChanged, PayloadEdgeStyle,
    PayloadNodeStyle, PayloadStyleAdded, PayloadStyleModified, PayloadStyleRemoved,
    PayloadStyleRenamed,
};
pub use observers::{Observers, SubscriptionId};
pub use sink::EventSink;
