//! Subscribe/notify plumbing for session events.
//!
//! Delivery is synchronous: by the time a store operation returns, every
//! subscribed observer has seen the events it produced, in order.

use std::cell::RefCell;
use std::rc::Rc;

use wordplay_core::SessionEvent;

/// Anything that reacts to session transitions (reward signal, UI, logs).
pub trait SessionObserver {
    fn on_event(&mut self, event: &SessionEvent);
}

impl<F> SessionObserver for F
where
    F: FnMut(&SessionEvent),
{
    fn on_event(&mut self, event: &SessionEvent) {
        self(event)
    }
}

/// Observer handle shared between the subscriber and the registry.
pub type SharedObserver = Rc<RefCell<dyn SessionObserver>>;

/// Wrap a closure as a [`SharedObserver`].
pub fn observer_fn<F>(f: F) -> SharedObserver
where
    F: FnMut(&SessionEvent) + 'static,
{
    Rc::new(RefCell::new(f))
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Handed out when there is no store to subscribe to. Never fires.
    /// Id 0 is reserved for it; live subscriptions are numbered from 1.
    pub const DETACHED: SubscriptionId = SubscriptionId(0);

    pub fn is_detached(self) -> bool {
        self == Self::DETACHED
    }
}

pub(crate) struct ObserverRegistry {
    next_id: u64,
    entries: Vec<(SubscriptionId, SharedObserver)>,
}

impl Default for ObserverRegistry {
    fn default() -> Self {
        Self {
            next_id: 1,
            entries: Vec::new(),
        }
    }
}

impl ObserverRegistry {
    pub(crate) fn subscribe(&mut self, observer: SharedObserver) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Clone out the current subscribers so delivery runs without holding
    /// the registry borrow (observers may subscribe or unsubscribe).
    pub(crate) fn snapshot(&self) -> Vec<SharedObserver> {
        self.entries.iter().map(|(_, o)| o.clone()).collect()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Deliver one event to every observer, in subscription order.
///
/// The scope queues events raised from inside an observer, so an observer
/// is never handed a second event while it is still running. One that is
/// borrowed elsewhere (held by its owner) is skipped with a warning.
pub(crate) fn deliver(observers: &[SharedObserver], event: &SessionEvent) {
    for observer in observers {
        match observer.try_borrow_mut() {
            Ok(mut observer) => observer.on_event(event),
            Err(_) => tracing::warn!(
                session_id = %event.session_id,
                "Observer is borrowed elsewhere, skipping delivery"
            ),
        }
    }
}
