use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, PoisonError, RwLock};

use whippet_core::TenantId;

/// Tenant-isolated key/value store backing the in-memory repositories.
///
/// Listing returns values in first-insertion order.
pub trait TenantStore<K, V>: Send + Sync {
    fn get(&self, tenant_id: TenantId, key: &K) -> Option<V>;
    /// Insert or replace; returns the previous value.
    fn upsert(&self, tenant_id: TenantId, key: K, value: V) -> Option<V>;
    /// Insert only when the key is absent; returns whether it was inserted.
    fn insert_new(&self, tenant_id: TenantId, key: K, value: V) -> bool;
    /// Replace only when the key is present; returns whether it was replaced.
    fn replace(&self, tenant_id: TenantId, key: K, value: V) -> bool;
    fn remove(&self, tenant_id: TenantId, key: &K) -> Option<V>;
    fn list(&self, tenant_id: TenantId) -> Vec<V>;
    /// Drop every record of a tenant.
    fn clear_tenant(&self, tenant_id: TenantId);
}

impl<K, V, S> TenantStore<K, V> for Arc<S>
where
    S: TenantStore<K, V> + ?Sized,
{
    fn get(&self, tenant_id: TenantId, key: &K) -> Option<V> {
        (**self).get(tenant_id, key)
    }

    fn upsert(&self, tenant_id: TenantId, key: K, value: V) -> Option<V> {
        (**self).upsert(tenant_id, key, value)
    }

    fn insert_new(&self, tenant_id: TenantId, key: K, value: V) -> bool {
        (**self).insert_new(tenant_id, key, value)
    }

    fn replace(&self, tenant_id: TenantId, key: K, value: V) -> bool {
        (**self).replace(tenant_id, key, value)
    }

    fn remove(&self, tenant_id: TenantId, key: &K) -> Option<V> {
        (**self).remove(tenant_id, key)
    }

    fn list(&self, tenant_id: TenantId) -> Vec<V> {
        (**self).list(tenant_id)
    }

    fn clear_tenant(&self, tenant_id: TenantId) {
        (**self).clear_tenant(tenant_id)
    }
}

#[derive(Debug)]
struct Slot<V> {
    seq: u64,
    value: V,
}

#[derive(Debug)]
struct Inner<K, V> {
    next_seq: u64,
    rows: HashMap<(TenantId, K), Slot<V>>,
}

/// In-memory tenant-isolated store for tests/dev.
///
/// A panic while holding the lock leaves the map consistent (every mutation is a single
/// map operation), so poisoning is ignored.
#[derive(Debug)]
pub struct InMemoryTenantStore<K, V> {
    inner: RwLock<Inner<K, V>>,
}

impl<K, V> InMemoryTenantStore<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_seq: 0,
                rows: HashMap::new(),
            }),
        }
    }
}

impl<K, V> Default for InMemoryTenantStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> Inner<K, V> {
    fn insert_slot(&mut self, tenant_id: TenantId, key: K, value: V) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.rows.insert((tenant_id, key), Slot { seq, value });
    }
}

impl<K, V> TenantStore<K, V> for InMemoryTenantStore<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, tenant_id: TenantId, key: &K) -> Option<V> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .rows
            .get(&(tenant_id, key.clone()))
            .map(|slot| slot.value.clone())
    }

    fn upsert(&self, tenant_id: TenantId, key: K, value: V) -> Option<V> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match inner.rows.get_mut(&(tenant_id, key.clone())) {
            Some(slot) => Some(std::mem::replace(&mut slot.value, value)),
            None => {
                inner.insert_slot(tenant_id, key, value);
                None
            }
        }
    }

    fn insert_new(&self, tenant_id: TenantId, key: K, value: V) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.rows.contains_key(&(tenant_id, key.clone())) {
            return false;
        }
        inner.insert_slot(tenant_id, key, value);
        true
    }

    fn replace(&self, tenant_id: TenantId, key: K, value: V) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match inner.rows.get_mut(&(tenant_id, key)) {
            Some(slot) => {
                slot.value = value;
                true
            }
            None => false,
        }
    }

    fn remove(&self, tenant_id: TenantId, key: &K) -> Option<V> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner
            .rows
            .remove(&(tenant_id, key.clone()))
            .map(|slot| slot.value)
    }

    fn list(&self, tenant_id: TenantId) -> Vec<V> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut slots: Vec<&Slot<V>> = inner
            .rows
            .iter()
            .filter_map(|((t, _k), slot)| if *t == tenant_id { Some(slot) } else { None })
            .collect();
        slots.sort_by_key(|slot| slot.seq);
        slots.into_iter().map(|slot| slot.value.clone()).collect()
    }

    fn clear_tenant(&self, tenant_id: TenantId) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.rows.retain(|(t, _k), _slot| *t != tenant_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn tenants_do_not_see_each_other() {
        let store = InMemoryTenantStore::<u32, &'static str>::new();
        let a = TenantId::new();
        let b = TenantId::new();

        store.upsert(a, 1, "a1");
        store.upsert(b, 1, "b1");

        assert_eq!(store.get(a, &1), Some("a1"));
        assert_eq!(store.get(b, &1), Some("b1"));
        assert_eq!(store.list(a), vec!["a1"]);

        store.clear_tenant(a);
        assert!(store.list(a).is_empty());
        assert_eq!(store.list(b), vec!["b1"]);
    }

    #[test]
    fn insert_new_and_replace_respect_presence() {
        let store = InMemoryTenantStore::<u32, i32>::new();
        let t = TenantId::new();

        assert!(!store.replace(t, 1, 10));
        assert!(store.insert_new(t, 1, 10));
        assert!(!store.insert_new(t, 1, 11));
        assert!(store.replace(t, 1, 12));
        assert_eq!(store.get(t, &1), Some(12));
        assert_eq!(store.upsert(t, 1, 13), Some(12));
        assert_eq!(store.remove(t, &1), Some(13));
        assert_eq!(store.remove(t, &1), None);
    }

    #[test]
    fn list_keeps_first_insertion_order() {
        let store = InMemoryTenantStore::<u32, u32>::new();
        let t = TenantId::new();
        for k in [5, 3, 9, 1] {
            store.upsert(t, k, k);
        }
        store.upsert(t, 3, 33);
        assert_eq!(store.list(t), vec![5, 33, 9, 1]);
    }

    proptest! {
        #[test]
        fn list_matches_distinct_keys(keys in proptest::collection::vec(0u16..50, 0..40)) {
            let store = InMemoryTenantStore::<u16, u16>::new();
            let t = TenantId::new();
            let mut expected: Vec<u16> = Vec::new();
            for k in keys {
                store.upsert(t, k, k);
                if !expected.contains(&k) {
                    expected.push(k);
                }
            }
            prop_assert_eq!(store.list(t), expected);
        }
    }
}
