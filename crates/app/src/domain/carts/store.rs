//! Cart store.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    rc::Rc,
};

use tracing::{debug, warn};

use crate::domain::carts::{
    models::{CartItem, CartSnapshot, CourseId},
    storage::CartStorage,
    subscribers::{Subscribers, Subscription},
};

/// Storage key the cart is persisted under unless another is given.
pub const DEFAULT_CART_KEY: &str = "cart";

/// The cart for one client session.
///
/// Every mutation is applied in memory, written through to storage and then
/// announced to subscribers before it returns. Storage failures never fail a
/// mutation: the in-memory cart stays authoritative and
/// [`CartStore::persistence_degraded`] reports the problem.
pub struct CartStore<S> {
    storage: S,
    key: String,
    items: Vec<CartItem>,
    subscribers: Subscribers,
    persistence_degraded: bool,
}

impl<S: CartStorage> CartStore<S> {
    /// Load the cart persisted under [`DEFAULT_CART_KEY`].
    pub fn open(storage: S) -> Self {
        Self::open_with_key(storage, DEFAULT_CART_KEY)
    }

    /// Load the cart persisted under `key`, starting empty when nothing
    /// usable is stored.
    pub fn open_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let mut persistence_degraded = false;

        let items = match storage.get(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CartItem>>(&raw) {
                Ok(items) => dedupe(items),
                Err(error) => {
                    warn!(%key, "discarding malformed persisted cart: {error}");

                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(error) => {
                warn!(%key, "cart storage unreadable, starting empty: {error}");

                persistence_degraded = true;

                Vec::new()
            }
        };

        debug!(%key, items = items.len(), "opened cart");

        Self {
            storage,
            key,
            items,
            subscribers: Subscribers::default(),
            persistence_degraded,
        }
    }

    /// Add `item`, replacing any entry with the same course id in place.
    pub fn add_item(&mut self, item: CartItem) {
        upsert(&mut self.items, item);

        self.commit();
    }

    /// Remove the entry for `course_id`. Removing an absent course is not an error.
    pub fn remove_item(&mut self, course_id: &CourseId) {
        self.items.retain(|item| item.course_id != *course_id);

        self.commit();
    }

    /// Empty the cart, e.g. after a successful checkout.
    pub fn clear(&mut self) {
        self.items.clear();

        self.commit();
    }

    /// Owned copy of the current items, in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.items.clone()
    }

    /// Number of distinct items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Whether `course_id` is in the cart.
    #[must_use]
    pub fn contains(&self, course_id: &CourseId) -> bool {
        self.items.iter().any(|item| item.course_id == *course_id)
    }

    /// Sum of effective prices in pence/cents.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.snapshot().total()
    }

    /// Copy of the current cart.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
        }
    }

    /// Whether the most recent load or write against storage failed.
    #[must_use]
    pub fn persistence_degraded(&self) -> bool {
        self.persistence_degraded
    }

    /// Register `listener` to receive a snapshot after every mutation.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&CartSnapshot) + 'static,
    {
        self.subscribers.subscribe(Rc::new(listener))
    }

    fn commit(&mut self) {
        self.persist();

        self.subscribers.notify(&self.snapshot());
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.items)
            .map_err(|error| error.to_string())
            .and_then(|raw| {
                self.storage
                    .set(&self.key, &raw)
                    .map_err(|error| error.to_string())
            });

        match result {
            Ok(()) => self.persistence_degraded = false,
            Err(error) => {
                warn!(key = %self.key, "cart not persisted, keeping it in memory: {error}");

                self.persistence_degraded = true;
            }
        }
    }
}

impl<S> Debug for CartStore<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("items", &self.items)
            .field("subscribers", &self.subscribers)
            .field("persistence_degraded", &self.persistence_degraded)
            .finish_non_exhaustive()
    }
}

fn upsert(items: &mut Vec<CartItem>, item: CartItem) {
    match items
        .iter_mut()
        .find(|existing| existing.course_id == item.course_id)
    {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}

/// Collapse duplicate course ids the way repeated adds would.
fn dedupe(raw: Vec<CartItem>) -> Vec<CartItem> {
    let mut items = Vec::with_capacity(raw.len());

    for item in raw {
        upsert(&mut items, item);
    }

    items
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use testresult::TestResult;

    use crate::domain::carts::{
        CartStorageError,
        storage::MemoryStorage,
    };

    use super::*;

    fn item(id: u64, price: u64) -> CartItem {
        CartItem {
            course_id: CourseId::Numeric(id),
            title: format!("Course {id}"),
            price,
            sale_price: None,
            slug: format!("course-{id}"),
            featured_image: None,
        }
    }

    struct FailingStorage;

    impl CartStorage for FailingStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, CartStorageError> {
            Err(CartStorageError::Unavailable)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), CartStorageError> {
            Err(CartStorageError::Unavailable)
        }
    }

    #[test]
    fn new_cart_is_empty() {
        let store = CartStore::open(MemoryStorage::new());

        assert_eq!(store.item_count(), 0);
        assert!(store.items().is_empty());
        assert!(!store.persistence_degraded());
    }

    #[test]
    fn adding_the_same_course_twice_keeps_one_updated_entry() {
        let mut store = CartStore::open(MemoryStorage::new());

        store.add_item(item(1, 100_00));
        store.add_item(item(1, 80_00));

        assert_eq!(store.item_count(), 1);
        assert_eq!(store.items(), vec![item(1, 80_00)]);
    }

    #[test]
    fn replacing_an_item_keeps_its_position() {
        let mut store = CartStore::open(MemoryStorage::new());

        store.add_item(item(1, 10_00));
        store.add_item(item(2, 20_00));
        store.add_item(item(1, 15_00));

        assert_eq!(store.items(), vec![item(1, 15_00), item(2, 20_00)]);
    }

    #[test]
    fn removing_leaves_the_remaining_items_in_order() {
        let mut store = CartStore::open(MemoryStorage::new());

        store.add_item(item(1, 10_00));
        store.add_item(item(2, 20_00));
        store.remove_item(&CourseId::Numeric(1));

        assert_eq!(store.items(), vec![item(2, 20_00)]);
        assert_eq!(store.item_count(), 1);
        assert!(!store.contains(&CourseId::Numeric(1)));
        assert!(store.contains(&CourseId::Numeric(2)));
    }

    #[test]
    fn removing_an_absent_course_is_a_no_op() {
        let mut store = CartStore::open(MemoryStorage::new());

        store.add_item(item(1, 10_00));
        store.remove_item(&CourseId::from("not-in-cart"));

        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn items_returns_a_detached_copy() {
        let mut store = CartStore::open(MemoryStorage::new());

        store.add_item(item(1, 10_00));

        let mut items = store.items();
        items.clear();

        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn clear_empties_the_cart() {
        let mut store = CartStore::open(MemoryStorage::new());

        store.add_item(item(1, 10_00));
        store.add_item(item(2, 20_00));
        store.clear();

        assert_eq!(store.item_count(), 0);
        assert_eq!(store.total(), 0);
    }

    #[test]
    fn subscriber_is_notified_once_per_mutation_until_unsubscribed() {
        let mut store = CartStore::open(MemoryStorage::new());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let subscription = {
            let seen = Rc::clone(&seen);

            store.subscribe(move |snapshot| seen.borrow_mut().push(snapshot.clone()))
        };

        store.add_item(item(1, 10_00));

        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(
            seen.borrow().first().map(|snapshot| snapshot.items.clone()),
            Some(vec![item(1, 10_00)])
        );

        subscription.unsubscribe();
        store.add_item(item(2, 20_00));

        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn every_mutation_notifies_including_no_op_removals() {
        let mut store = CartStore::open(MemoryStorage::new());
        let calls = Rc::new(Cell::new(0));

        let _subscription = {
            let calls = Rc::clone(&calls);

            store.subscribe(move |_| calls.set(calls.get() + 1))
        };

        store.add_item(item(1, 10_00));
        store.remove_item(&CourseId::Numeric(9));
        store.clear();

        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn cart_survives_a_reload_from_the_same_storage() {
        let storage = MemoryStorage::new();

        {
            let mut store = CartStore::open(storage.clone());

            store.add_item(item(1, 10_00));
        }

        let reloaded = CartStore::open(storage);

        assert_eq!(reloaded.items(), vec![item(1, 10_00)]);
    }

    #[test]
    fn carts_under_different_keys_are_independent() {
        let storage = MemoryStorage::new();

        let mut first = CartStore::open_with_key(storage.clone(), "cart:a");
        first.add_item(item(1, 10_00));

        let second = CartStore::open_with_key(storage, "cart:b");

        assert_eq!(second.item_count(), 0);
    }

    #[test]
    fn malformed_persisted_cart_is_discarded() -> TestResult {
        let storage = MemoryStorage::new();

        storage.set(DEFAULT_CART_KEY, "{not json")?;

        let store = CartStore::open(storage);

        assert_eq!(store.item_count(), 0);
        assert!(!store.persistence_degraded());

        Ok(())
    }

    #[test]
    fn persisted_duplicates_are_collapsed_on_load() -> TestResult {
        let storage = MemoryStorage::new();

        storage.set(
            DEFAULT_CART_KEY,
            &serde_json::to_string(&[item(1, 10_00), item(2, 20_00), item(1, 12_00)])?,
        )?;

        let store = CartStore::open(storage);

        assert_eq!(store.items(), vec![item(1, 12_00), item(2, 20_00)]);

        Ok(())
    }

    #[test]
    fn unavailable_storage_degrades_silently() {
        let mut store = CartStore::open(FailingStorage);
        let calls = Rc::new(Cell::new(0));

        let _subscription = {
            let calls = Rc::clone(&calls);

            store.subscribe(move |_| calls.set(calls.get() + 1))
        };

        assert!(store.persistence_degraded());

        store.add_item(item(1, 10_00));

        assert_eq!(store.item_count(), 1);
        assert_eq!(calls.get(), 1);
        assert!(store.persistence_degraded());
    }

    #[test]
    fn quota_exceeded_keeps_the_cart_in_memory() {
        let storage = MemoryStorage::with_quota(2);
        let mut store = CartStore::open(storage.clone());

        store.add_item(item(1, 10_00));

        assert_eq!(store.item_count(), 1);
        assert!(store.persistence_degraded());
        assert!(CartStore::open(storage).items().is_empty());
    }

    #[test]
    fn degraded_flag_clears_after_a_successful_write() {
        let storage = MemoryStorage::with_quota(400);
        let mut store = CartStore::open(storage);

        for id in 0..10 {
            store.add_item(item(id, 10_00));
        }

        assert!(store.persistence_degraded());

        store.clear();

        assert!(!store.persistence_degraded());
    }

    #[test]
    fn total_sums_effective_prices() {
        let mut store = CartStore::open(MemoryStorage::new());

        store.add_item(CartItem {
            sale_price: Some(50_00),
            ..item(1, 75_00)
        });
        store.add_item(item(2, 25_00));

        assert_eq!(store.total(), 75_00);
    }
}
