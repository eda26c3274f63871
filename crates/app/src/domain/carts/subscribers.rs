//! Cart subscriber registry.

use std::{
    cell::RefCell,
    fmt::{Debug, Formatter, Result as FmtResult},
    rc::{Rc, Weak},
};

use crate::domain::carts::models::CartSnapshot;

type Listener = Rc<dyn Fn(&CartSnapshot)>;

/// Identifies one registered subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

/// Ordered set of listeners, notified synchronously in registration order.
#[derive(Default)]
pub(crate) struct Subscribers {
    registry: Rc<RefCell<Registry>>,
}

impl Subscribers {
    pub(crate) fn subscribe(&self, listener: Listener) -> Subscription {
        let mut registry = self.registry.borrow_mut();

        let id = SubscriptionId(registry.next_id);

        registry.next_id += 1;
        registry.listeners.push((id, listener));

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    pub(crate) fn notify(&self, snapshot: &CartSnapshot) {
        // Release the registry before calling out so listeners may
        // subscribe or unsubscribe while being notified.
        let listeners: Vec<Listener> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            listener(snapshot);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

impl Debug for Subscribers {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Subscribers")
            .field("len", &self.len())
            .finish()
    }
}

/// Handle returned by [`CartStore::subscribe`](crate::domain::carts::CartStore::subscribe).
///
/// Dropping the handle keeps the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
pub struct Subscription {
    id: SubscriptionId,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Registry id of this subscription.
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Deregister this listener. Other listeners are unaffected, and a no-op
    /// once the store is gone.
    pub fn unsubscribe(self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .listeners
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl Debug for Subscription {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
