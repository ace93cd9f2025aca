use alloc::sync::Arc;
use alloc::vec::Vec;

use parking_lot::Mutex;
use parking_lot::MutexGuard;

use crate::collection::Associative;
use crate::collection::Collection;
use crate::collection::Container;
use crate::collection::Sequence;
use crate::error::Result;

macro_rules! shared_lock {
    ($wrapper:ident, $param:ident) => {
        impl<$param> $wrapper<$param> {
            /// Wraps `inner` behind a new lock.
            pub fn new(inner: $param) -> Self {
                Self {
                    inner: Arc::new(Mutex::new(inner)),
                }
            }

            /// Wraps a container whose lock is shared with other views.
            pub fn with_mutex(inner: Arc<Mutex<$param>>) -> Self {
                Self { inner }
            }

            /// Returns the shared lock.
            pub fn mutex(&self) -> &Arc<Mutex<$param>> {
                &self.inner
            }

            /// Acquires the lock. Hold the guard to iterate or to make
            /// several calls atomic.
            pub fn lock(&self) -> MutexGuard<'_, $param> {
                self.inner.lock()
            }
        }

        impl<$param> Clone for $wrapper<$param> {
            /// Returns another handle on the same container and lock.
            fn clone(&self) -> Self {
                Self {
                    inner: Arc::clone(&self.inner),
                }
            }
        }

        impl<$param: Container> Container for $wrapper<$param> {
            fn len(&self) -> usize {
                self.inner.lock().len()
            }
        }
    };
}

/// A [`Collection`] whose every call runs under a shared lock.
///
/// Single calls are atomic. Iteration is not: take [`lock`](Self::lock) and
/// iterate through the guard.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use std::thread;
///
/// use chain_hash::collection::Collection;
/// use chain_hash::views::synchronized::SynchronizedCollection;
///
/// let shared = SynchronizedCollection::new(Vec::new());
/// let handles = (0..4)
///     .map(|i| {
///         let shared = shared.clone();
///         thread::spawn(move || shared.add(i).unwrap())
///     })
///     .collect::<Vec<_>>();
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// let guard = shared.lock();
/// assert_eq!(guard.iter().sum::<i32>(), 6);
/// ```
pub struct SynchronizedCollection<C> {
    inner: Arc<Mutex<C>>,
}

shared_lock!(SynchronizedCollection, C);

impl<C: Collection> SynchronizedCollection<C> {
    /// Returns `true` if an element equal to `item` is present.
    pub fn contains(&self, item: &C::Item) -> bool {
        self.inner.lock().contains(item)
    }

    /// Adds `item`.
    pub fn add(&self, item: C::Item) -> Result<bool> {
        self.inner.lock().add(item)
    }

    /// Removes one element equal to `item`.
    pub fn remove_item(&self, item: &C::Item) -> Result<bool> {
        self.inner.lock().remove_item(item)
    }

    /// Removes every element.
    pub fn clear(&self) -> Result<()> {
        self.inner.lock().clear()
    }

    /// Adds every item under one acquisition of the lock.
    pub fn add_all<I>(&self, items: I) -> Result<bool>
    where
        I: IntoIterator<Item = C::Item>,
    {
        self.inner.lock().add_all(items)
    }

    /// Returns `true` if every item is present.
    pub fn contains_all<'i, I>(&self, items: I) -> bool
    where
        I: IntoIterator<Item = &'i C::Item>,
        C::Item: 'i,
    {
        self.inner.lock().contains_all(items)
    }

    /// Copies the elements out under the lock.
    pub fn to_vec(&self) -> Vec<C::Item>
    where
        C::Item: Clone,
    {
        self.inner.lock().iter().cloned().collect()
    }
}

/// A [`Sequence`] whose every call runs under a shared lock.
pub struct SynchronizedList<L> {
    inner: Arc<Mutex<L>>,
}

shared_lock!(SynchronizedList, L);

impl<L> SynchronizedList<L>
where
    L: Sequence,
    L::Item: Clone,
{
    /// Returns a clone of the element at `index`.
    pub fn at(&self, index: usize) -> Result<L::Item> {
        self.inner.lock().at(index).cloned()
    }

    /// Replaces the element at `index`.
    pub fn replace_at(&self, index: usize, item: L::Item) -> Result<L::Item> {
        self.inner.lock().replace_at(index, item)
    }

    /// Inserts `item` before `index`.
    pub fn insert_at(&self, index: usize, item: L::Item) -> Result<()> {
        self.inner.lock().insert_at(index, item)
    }

    /// Removes the element at `index`.
    pub fn remove_at(&self, index: usize) -> Result<L::Item> {
        self.inner.lock().remove_at(index)
    }

    /// Appends `item`.
    pub fn add(&self, item: L::Item) -> Result<bool> {
        self.inner.lock().add(item)
    }

    /// Removes the first element equal to `item`.
    pub fn remove_item(&self, item: &L::Item) -> Result<bool> {
        self.inner.lock().remove_item(item)
    }

    /// Removes every element.
    pub fn clear(&self) -> Result<()> {
        self.inner.lock().clear()
    }

    /// Returns `true` if an element equal to `item` is present.
    pub fn contains(&self, item: &L::Item) -> bool {
        self.inner.lock().contains(item)
    }

    /// Returns the index of the first element equal to `item`.
    pub fn index_of(&self, item: &L::Item) -> Option<usize> {
        self.inner.lock().index_of(item)
    }

    /// Returns the index of the last element equal to `item`.
    pub fn last_index_of(&self, item: &L::Item) -> Option<usize> {
        self.inner.lock().last_index_of(item)
    }

    /// Copies the elements out under the lock.
    pub fn to_vec(&self) -> Vec<L::Item> {
        self.inner.lock().to_vec()
    }
}

/// An [`Associative`] container whose every call runs under a shared lock.
///
/// # Examples
///
/// ```rust
/// use chain_hash::HashMap;
/// use chain_hash::collection::Container;
/// use chain_hash::views::synchronized::SynchronizedMap;
///
/// let map: SynchronizedMap<HashMap<&str, i32>> = SynchronizedMap::new(HashMap::new());
/// map.put(Some("a"), 1).unwrap();
///
/// let keys = map.key_set();
/// assert!(keys.contains(&Some("a")));
/// assert_eq!(keys.remove(&Some("a")), Ok(true));
/// assert!(map.is_empty());
/// ```
pub struct SynchronizedMap<M> {
    inner: Arc<Mutex<M>>,
}

shared_lock!(SynchronizedMap, M);

impl<M: Associative> SynchronizedMap<M> {
    /// Returns a clone of the value mapped to `key`.
    pub fn get(&self, key: &M::Key) -> Option<M::Value>
    where
        M::Value: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Returns `true` if `key` is mapped.
    pub fn contains_key(&self, key: &M::Key) -> bool {
        self.inner.lock().contains_key(key)
    }

    /// Returns `true` if some key maps to `value`.
    pub fn contains_value(&self, value: &M::Value) -> bool {
        self.inner.lock().contains_value(value)
    }

    /// Maps `key` to `value`.
    pub fn put(&self, key: M::Key, value: M::Value) -> Result<Option<M::Value>> {
        self.inner.lock().put(key, value)
    }

    /// Removes the mapping for `key`.
    pub fn remove_key(&self, key: &M::Key) -> Result<Option<M::Value>> {
        self.inner.lock().remove_key(key)
    }

    /// Removes every mapping.
    pub fn clear(&self) -> Result<()> {
        self.inner.lock().clear()
    }

    /// Puts every pair under one acquisition of the lock.
    pub fn put_all<I>(&self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (M::Key, M::Value)>,
    {
        self.inner.lock().put_all(entries)
    }

    /// Returns a view of the keys that shares this map's lock.
    pub fn key_set(&self) -> SynchronizedKeySet<M> {
        SynchronizedKeySet {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Returns a view of the values that shares this map's lock.
    pub fn values(&self) -> SynchronizedValues<M> {
        SynchronizedValues {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Returns a view of the mappings that shares this map's lock.
    pub fn entry_set(&self) -> SynchronizedEntrySet<M> {
        SynchronizedEntrySet {
            inner: Arc::clone(&self.inner),
        }
    }
}

// Views derived from a map hold the map's own lock, never a second one.
macro_rules! map_view {
    ($view:ident) => {
        impl<M> $view<M> {
            /// Acquires the map's lock.
            pub fn lock(&self) -> MutexGuard<'_, M> {
                self.inner.lock()
            }

            /// Returns the map's lock.
            pub fn mutex(&self) -> &Arc<Mutex<M>> {
                &self.inner
            }
        }

        impl<M> Clone for $view<M> {
            fn clone(&self) -> Self {
                Self {
                    inner: Arc::clone(&self.inner),
                }
            }
        }

        impl<M: Container> Container for $view<M> {
            fn len(&self) -> usize {
                self.inner.lock().len()
            }
        }
    };
}

/// The keys of a [`SynchronizedMap`], guarded by the map's lock.
pub struct SynchronizedKeySet<M> {
    inner: Arc<Mutex<M>>,
}

map_view!(SynchronizedKeySet);

impl<M: Associative> SynchronizedKeySet<M> {
    /// Returns `true` if the map contains `key`.
    pub fn contains(&self, key: &M::Key) -> bool {
        self.inner.lock().contains_key(key)
    }

    /// Removes `key` and its value from the map.
    pub fn remove(&self, key: &M::Key) -> Result<bool> {
        self.inner
            .lock()
            .remove_key(key)
            .map(|previous| previous.is_some())
    }

    /// Copies the keys out under the lock.
    pub fn to_vec(&self) -> Vec<M::Key>
    where
        M::Key: Clone,
    {
        self.inner.lock().entries().map(|(k, _)| k.clone()).collect()
    }
}

/// The values of a [`SynchronizedMap`], guarded by the map's lock.
pub struct SynchronizedValues<M> {
    inner: Arc<Mutex<M>>,
}

map_view!(SynchronizedValues);

impl<M: Associative> SynchronizedValues<M> {
    /// Returns `true` if some key maps to `value`.
    pub fn contains(&self, value: &M::Value) -> bool {
        self.inner.lock().contains_value(value)
    }

    /// Copies the values out under the lock.
    pub fn to_vec(&self) -> Vec<M::Value>
    where
        M::Value: Clone,
    {
        self.inner.lock().entries().map(|(_, v)| v.clone()).collect()
    }
}

/// The mappings of a [`SynchronizedMap`], guarded by the map's lock.
pub struct SynchronizedEntrySet<M> {
    inner: Arc<Mutex<M>>,
}

map_view!(SynchronizedEntrySet);

impl<M: Associative> SynchronizedEntrySet<M> {
    /// Returns `true` if `key` is mapped to `value`.
    pub fn contains(&self, key: &M::Key, value: &M::Value) -> bool
    where
        M::Value: PartialEq,
    {
        self.inner.lock().get(key) == Some(value)
    }

    /// Removes the mapping for `key` if it maps to `value`.
    pub fn remove(&self, key: &M::Key, value: &M::Value) -> Result<bool>
    where
        M::Value: PartialEq,
    {
        let mut map = self.inner.lock();
        if map.get(key) != Some(value) {
            return Ok(false);
        }
        map.remove_key(key).map(|previous| previous.is_some())
    }

    /// Copies the mappings out under the lock.
    pub fn to_vec(&self) -> Vec<(M::Key, M::Value)>
    where
        M::Key: Clone,
        M::Value: Clone,
    {
        self.inner
            .lock()
            .entries()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::VecDeque;
    use alloc::vec;
    use std::sync::Barrier;
    use std::thread;

    use super::*;
    use crate::HashMap;
    use crate::HashSet;
    use crate::error::Failure;

    #[test]
    fn test_collection_delegates() {
        let set: SynchronizedCollection<HashSet<i32>> = SynchronizedCollection::new(HashSet::new());
        assert_eq!(set.add(Some(1)), Ok(true));
        assert_eq!(set.add(Some(1)), Ok(false));
        assert_eq!(set.add_all([Some(2), None]), Ok(true));
        assert!(set.contains(&None));
        assert!(set.contains_all(&[Some(1), Some(2)]));
        assert_eq!(set.len(), 3);
        assert_eq!(set.remove_item(&None), Ok(true));
        set.clear().unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_views_share_one_lock() {
        let shared = Arc::new(Mutex::new(VecDeque::from([1, 2, 3])));
        let list = SynchronizedList::with_mutex(Arc::clone(&shared));
        let other = SynchronizedList::with_mutex(Arc::clone(&shared));
        assert!(Arc::ptr_eq(list.mutex(), other.mutex()));

        list.add(4).unwrap();
        assert_eq!(other.at(3), Ok(4));
        assert_eq!(other.replace_at(0, 10), Ok(1));
        assert_eq!(list.index_of(&10), Some(0));
        assert_eq!(list.at(9), Err(Failure::IndexOutOfBounds { index: 9, len: 4 }));

        {
            let guard = list.lock();
            assert!(shared.try_lock().is_none());
            assert_eq!(guard.iter().copied().collect::<Vec<_>>(), vec![10, 2, 3, 4]);
        }
        assert!(shared.try_lock().is_some());
    }

    #[test]
    fn test_list_positional_calls() {
        let list = SynchronizedList::new(vec![1, 2, 2]);
        list.insert_at(0, 0).unwrap();
        assert_eq!(list.remove_at(3), Ok(2));
        assert_eq!(list.last_index_of(&2), Some(2));
        assert!(list.remove_item(&0).unwrap());
        assert!(list.contains(&1));
        assert_eq!(list.to_vec(), vec![1, 2]);
        list.clear().unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_map_and_key_set() {
        let map = SynchronizedMap::new(HashMap::<i32, i32>::new());
        map.put_all([(Some(1), 10), (Some(2), 20)]).unwrap();
        assert_eq!(map.put(Some(1), 11), Ok(Some(10)));
        assert_eq!(map.get(&Some(1)), Some(11));
        assert!(map.contains_key(&Some(2)));
        assert!(map.contains_value(&20));

        let keys = map.key_set();
        let mut copied = keys.to_vec();
        copied.sort();
        assert_eq!(copied, vec![Some(1), Some(2)]);
        assert_eq!(keys.remove(&Some(2)), Ok(true));
        assert_eq!(keys.len(), 1);
        assert_eq!(map.remove_key(&Some(1)), Ok(Some(11)));
        map.clear().unwrap();
        assert!(keys.is_empty());
    }

    #[test]
    fn test_map_views_share_the_map_lock() {
        let map = SynchronizedMap::new(HashMap::<i32, i32>::new());
        map.put_all([(Some(1), 10), (None, 20)]).unwrap();

        let keys = map.key_set();
        let values = map.values();
        let entries = map.entry_set();
        assert!(Arc::ptr_eq(map.mutex(), keys.mutex()));
        assert!(Arc::ptr_eq(map.mutex(), values.mutex()));
        assert!(Arc::ptr_eq(map.mutex(), entries.mutex()));

        {
            let _guard = values.lock();
            assert!(map.mutex().try_lock().is_none());
            assert!(keys.mutex().try_lock().is_none());
        }

        assert!(values.contains(&20));
        let mut copied = values.to_vec();
        copied.sort();
        assert_eq!(copied, vec![10, 20]);

        assert!(entries.contains(&None, &20));
        assert!(!entries.contains(&Some(1), &20));
        assert_eq!(entries.remove(&Some(1), &99), Ok(false));
        assert_eq!(entries.remove(&Some(1), &10), Ok(true));
        assert_eq!(entries.to_vec(), vec![(None, 20)]);
        assert_eq!(values.len(), 1);
        assert_eq!(keys.len(), 1);
    }

    #[test]
    fn test_concurrent_adds() {
        const THREADS: usize = 8;
        const PER_THREAD: i32 = 256;

        let list = SynchronizedList::new(Vec::new());
        let barrier = Arc::new(Barrier::new(THREADS));
        let handles = (0..THREADS)
            .map(|t| {
                let list = list.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..PER_THREAD {
                        list.add(t as i32 * PER_THREAD + i).unwrap();
                    }
                })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut values = list.to_vec();
        values.sort();
        assert_eq!(values, (0..THREADS as i32 * PER_THREAD).collect::<Vec<_>>());
    }
}
