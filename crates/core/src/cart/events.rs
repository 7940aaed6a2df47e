//! Cart change notifications.
//!
//! Listeners are registered on a specific [`CartStore`](super::CartStore)
//! rather than on a process-wide emitter, so each store (and each test) sees
//! only its own subscribers.

use core::fmt;

use crate::types::ItemId;

/// A change that was applied to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// One of an item was added; `quantity` is the entry's new quantity.
    ItemAdded { item_id: ItemId, quantity: u32 },
    /// An entry was removed.
    ItemRemoved { item_id: ItemId },
    /// An entry's quantity was replaced.
    QuantityChanged { item_id: ItemId, quantity: u32 },
    /// Every entry was removed.
    Cleared,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&CartEvent) + Send>;

/// Subscribers of a single store, called in subscription order.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| *existing != id);
        self.entries.len() != before
    }

    pub(crate) fn emit(&mut self, event: &CartEvent) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn test_emit_in_subscription_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut listeners = Listeners::default();

        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            listeners.subscribe(Box::new(move |_| seen.lock().unwrap().push(tag)));
        }
        listeners.emit(&CartEvent::Cleared);

        assert_eq!(*seen.lock().unwrap(), ["first", "second"]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut listeners = Listeners::default();
        let id = listeners.subscribe(Box::new(|_| {}));
        assert_eq!(listeners.len(), 1);
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        assert_eq!(listeners.len(), 0);
    }
}
