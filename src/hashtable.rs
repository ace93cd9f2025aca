use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Display;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::mem;

use parking_lot::Mutex;
use parking_lot::MutexGuard;

use crate::DefaultHashBuilder;
use crate::bucket_store;
use crate::bucket_store::BucketStore;
use crate::bucket_store::DEFAULT_LOAD_FACTOR;
use crate::bucket_store::Entry as StoreEntry;
use crate::bucket_store::Growth;
use crate::bucket_store::RawCursor;
use crate::collection::Associative;
use crate::error::Failure;
use crate::error::Result;
use crate::error::or_panic;

/// Bucket count used when no capacity is given.
pub const DEFAULT_CAPACITY: usize = 11;

fn copy_capacity(len: usize) -> usize {
    if len < 6 {
        DEFAULT_CAPACITY
    } else {
        (len.saturating_mul(4) / 3).saturating_add(DEFAULT_CAPACITY)
    }
}

fn non_null<T>(value: Option<T>) -> Result<T> {
    value.ok_or(Failure::IllegalNull)
}

struct Table<K, V, S> {
    store: BucketStore<(K, V)>,
    // Lowest and highest bucket ever written since the last growth.
    bounds: Option<(usize, usize)>,
    hash_builder: S,
}

impl<K, V, S> Table<K, V, S> {
    fn iter(&self) -> bucket_store::Iter<'_, (K, V)> {
        let (first, last) = self.bounds.unwrap_or((0, 0));
        self.store.iter_span(first, last)
    }

    fn cursor(&self) -> RawCursor {
        match self.bounds {
            Some((first, last)) => RawCursor::descending(&self.store, first, last),
            None => RawCursor::exhausted(&self.store),
        }
    }

    fn widen(&mut self, bucket: usize) {
        self.bounds = Some(match self.bounds {
            Some((first, last)) => (first.min(bucket), last.max(bucket)),
            None => (bucket, bucket),
        });
    }
}

impl<K, V, S> Table<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn get(&self, key: &K) -> Option<&V> {
        let hash = self.hash_builder.hash_one(key);
        self.store.find(hash, |(k, _)| k == key).map(|(_, v)| v)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hash_builder.hash_one(&key);
        let capacity = self.store.capacity();
        match self.store.entry(hash, |(k, _)| *k == key) {
            StoreEntry::Occupied(mut entry) => {
                return Some(mem::replace(&mut entry.get_mut().1, value));
            }
            StoreEntry::Vacant(entry) => {
                entry.insert((key, value));
            }
        }
        if self.store.capacity() == capacity {
            let bucket = self.store.bucket_index(hash);
            self.widen(bucket);
        } else {
            self.bounds = self.store.occupied_span();
        }
        None
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let hash = self.hash_builder.hash_one(key);
        self.store.remove(hash, |(k, _)| k == key).map(|(_, v)| v)
    }

    fn replace(&mut self, key: &K, value: V) -> Option<V> {
        let hash = self.hash_builder.hash_one(key);
        self.store
            .find_mut(hash, |(k, _)| k == key)
            .map(|(_, slot)| mem::replace(slot, value))
    }
}

/// A hash table whose every operation runs under one coarse lock.
///
/// `Hashtable` never stores a null key or value: every write takes
/// `impl Into<Option<_>>` arguments and fails with
/// [`Failure::IllegalNull`] on `None` before touching the table. Reads clone
/// values out of the lock; hold [`lock`](Hashtable::lock) to work with
/// references or to make several steps atomic.
///
/// The table tracks the lowest and highest bucket it has written to and
/// only scans that span when enumerating, from the highest bucket down.
/// The span widens on insertion and is recomputed when the table grows,
/// but removals never narrow it. Capacity grows to `capacity * 2 + 1`.
///
/// The lock is shared with the [`key_set`](Hashtable::key_set),
/// [`values`](Hashtable::values) and [`entry_set`](Hashtable::entry_set)
/// views and their iterators.
///
/// # Examples
///
/// ```rust
/// use chain_hash::Failure;
/// use chain_hash::Hashtable;
///
/// let table: Hashtable<&str, i32> = Hashtable::new();
/// assert_eq!(table.put("a", 1), Ok(None));
/// assert_eq!(table.put("a", 2), Ok(Some(1)));
/// assert_eq!(table.put(None, 3), Err(Failure::IllegalNull));
/// assert_eq!(table.put("b", None), Err(Failure::IllegalNull));
/// assert_eq!(table.get(&"a"), Some(2));
/// assert_eq!(table.len(), 1);
/// ```
pub struct Hashtable<K, V, S = DefaultHashBuilder> {
    table: Arc<Mutex<Table<K, V, S>>>,
}

impl<K, V, S> Hashtable<K, V, S> {
    /// Acquires the table's lock for the lifetime of the returned guard.
    pub fn lock(&self) -> HashtableGuard<'_, K, V, S> {
        HashtableGuard {
            table: self.table.lock(),
        }
    }

    /// Returns the number of mappings.
    pub fn len(&self) -> usize {
        self.table.lock().store.len()
    }

    /// Returns `true` if the table holds no mappings.
    pub fn is_empty(&self) -> bool {
        self.table.lock().store.is_empty()
    }

    /// Returns the number of buckets.
    pub fn capacity(&self) -> usize {
        self.table.lock().store.capacity()
    }

    /// Returns the configured load factor.
    pub fn load_factor(&self) -> f32 {
        self.table.lock().store.load_factor()
    }

    /// Returns the lowest and highest bucket enumeration scans, or `None`
    /// if nothing has ever been stored.
    pub fn occupied_bounds(&self) -> Option<(usize, usize)> {
        self.table.lock().bounds
    }

    /// Removes every mapping. The enumeration span is kept.
    pub fn clear(&self) {
        self.table.lock().store.clear()
    }

    /// Returns a weakly consistent enumeration of the keys.
    ///
    /// The enumeration locks once per step and never fails: mappings added
    /// or removed meanwhile may or may not be seen.
    pub fn keys(&self) -> Keys<K, V, S> {
        Keys {
            inner: Enumeration::new(&self.table),
        }
    }

    /// Returns a weakly consistent enumeration of the values; see
    /// [`keys`](Hashtable::keys).
    pub fn elements(&self) -> Elements<K, V, S> {
        Elements {
            inner: Enumeration::new(&self.table),
        }
    }

    /// Returns a view of the keys backed by this table.
    pub fn key_set(&self) -> KeySet<K, V, S> {
        KeySet {
            table: Arc::clone(&self.table),
        }
    }

    /// Returns a view of the values backed by this table.
    pub fn values(&self) -> ValuesView<K, V, S> {
        ValuesView {
            table: Arc::clone(&self.table),
        }
    }

    /// Returns a view of the mappings backed by this table.
    pub fn entry_set(&self) -> EntrySet<K, V, S> {
        EntrySet {
            table: Arc::clone(&self.table),
        }
    }

    /// Collects bucket and chain statistics.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> bucket_store::DebugStats {
        self.table.lock().store.debug_stats()
    }

    /// Returns the chain-length histogram.
    #[cfg(any(test, feature = "stats"))]
    pub fn chain_histogram(&self) -> Vec<usize> {
        self.table.lock().store.chain_histogram()
    }
}

impl<K, V, S> Hashtable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates an empty table with the given capacity, load factor and hasher
    /// builder.
    pub fn try_with_capacity_load_factor_and_hasher(
        capacity: usize,
        load_factor: f32,
        hash_builder: S,
    ) -> Result<Self> {
        let store = BucketStore::with_config(capacity, load_factor, Growth::DoublePlusOne)?;
        Ok(Self {
            table: Arc::new(Mutex::new(Table {
                store,
                bounds: None,
                hash_builder,
            })),
        })
    }

    /// Creates an empty table with the default capacity and the given
    /// hasher builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hash_builder)
    }

    /// Creates an empty table with `capacity` buckets and the given hasher
    /// builder.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`MAX_CAPACITY`](crate::MAX_CAPACITY).
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        or_panic(Self::try_with_capacity_load_factor_and_hasher(
            capacity,
            DEFAULT_LOAD_FACTOR,
            hash_builder,
        ))
    }

    /// Maps `key` to `value`, returning the previous value.
    pub fn put(&self, key: impl Into<Option<K>>, value: impl Into<Option<V>>) -> Result<Option<V>> {
        let key = non_null(key.into())?;
        let value = non_null(value.into())?;
        Ok(self.table.lock().insert(key, value))
    }

    /// Replaces the value of an existing mapping, returning the old value.
    /// Absent keys are left absent.
    pub fn replace(&self, key: &K, value: impl Into<Option<V>>) -> Result<Option<V>> {
        let value = non_null(value.into())?;
        Ok(self.table.lock().replace(key, value))
    }

    /// Copies every mapping of `source` into the table.
    ///
    /// The whole source is checked for null keys and values first; on
    /// failure nothing is written.
    pub fn put_all<M, KI, VI>(&self, source: &M) -> Result<()>
    where
        M: Associative<Key = KI, Value = VI> + ?Sized,
        KI: Clone + Into<Option<K>>,
        VI: Clone + Into<Option<V>>,
    {
        let mut pairs = Vec::with_capacity(source.len());
        for (key, value) in source.entries() {
            pairs.push((non_null(key.clone().into())?, non_null(value.clone().into())?));
        }
        let mut table = self.table.lock();
        for (key, value) in pairs {
            table.insert(key, value);
        }
        Ok(())
    }

    /// Returns a clone of the value mapped to `key`.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.table.lock().get(key).cloned()
    }

    /// Returns `true` if `key` is mapped.
    pub fn contains_key(&self, key: &K) -> bool {
        self.table.lock().get(key).is_some()
    }

    /// Returns `true` if some key maps to `value`.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.table.lock().iter().any(|(_, v)| v == value)
    }

    /// Removes `key`, returning its value.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.table.lock().remove(key)
    }
}

impl<K, V, S> Hashtable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates an empty table with 11 buckets and load factor 0.75.
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates an empty table with `capacity` buckets.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }

    /// Creates an empty table with `capacity` buckets and the given load
    /// factor.
    ///
    /// # Panics
    ///
    /// Panics on an invalid capacity or load factor.
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f32) -> Self {
        or_panic(Self::try_with_capacity_and_load_factor(capacity, load_factor))
    }

    /// Creates an empty table with `capacity` buckets and the given load
    /// factor.
    pub fn try_with_capacity_and_load_factor(capacity: usize, load_factor: f32) -> Result<Self> {
        Self::try_with_capacity_load_factor_and_hasher(capacity, load_factor, S::default())
    }

    /// Creates a table holding a copy of every mapping in `source`.
    ///
    /// The copy starts with 11 buckets for sources of fewer than six
    /// mappings and `len * 4 / 3 + 11` otherwise. Fails if the source holds
    /// a null key or value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::Failure;
    /// use chain_hash::HashMap;
    /// use chain_hash::Hashtable;
    ///
    /// let mut map: HashMap<i32, i32> = (0..12).map(|i| (i, i)).collect();
    /// let table: Hashtable<i32, i32> = Hashtable::from_map(&map).unwrap();
    /// assert_eq!(table.capacity(), 27);
    ///
    /// map.insert(None, 0);
    /// assert_eq!(Hashtable::<i32, i32>::from_map(&map).err(), Some(Failure::IllegalNull));
    /// ```
    pub fn from_map<M, KI, VI>(source: &M) -> Result<Self>
    where
        M: Associative<Key = KI, Value = VI> + ?Sized,
        KI: Clone + Into<Option<K>>,
        VI: Clone + Into<Option<V>>,
    {
        let table = Self::with_capacity(copy_capacity(source.len()));
        table.put_all(source)?;
        Ok(table)
    }
}

impl<K, V, S> Default for Hashtable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Clone for Hashtable<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    /// Copies the mappings into a new table with its own lock.
    fn clone(&self) -> Self {
        let table = self.table.lock();
        Self {
            table: Arc::new(Mutex::new(Table {
                store: table.store.clone(),
                bounds: table.bounds,
                hash_builder: table.hash_builder.clone(),
            })),
        }
    }
}

impl<K, V, S> PartialEq for Hashtable<K, V, S>
where
    K: Hash + Eq + Clone,
    V: PartialEq + Clone,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.table, &other.table) {
            return true;
        }
        // Never hold both locks: two threads comparing in opposite order
        // would deadlock.
        let snapshot = self
            .table
            .lock()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect::<Vec<_>>();
        let other = other.table.lock();
        snapshot.len() == other.store.len()
            && snapshot.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S> Eq for Hashtable<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Eq + Clone,
    S: BuildHasher,
{
}

impl<K, V, S> Debug for Hashtable<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table.lock();
        f.debug_map()
            .entries(table.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl<K, V, S> Display for Hashtable<K, V, S>
where
    K: Display,
    V: Display,
{
    /// Renders the mappings as `{k=v, k=v}` in enumeration order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table.lock();
        f.write_str("{")?;
        for (index, (k, v)) in table.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}={v}")?;
        }
        f.write_str("}")
    }
}

/// Exclusive access to a [`Hashtable`], returned by [`Hashtable::lock`].
///
/// Every table handle, view and iterator blocks until the guard is dropped.
pub struct HashtableGuard<'a, K, V, S> {
    table: MutexGuard<'a, Table<K, V, S>>,
}

impl<K, V, S> HashtableGuard<'_, K, V, S> {
    /// Returns the number of mappings.
    pub fn len(&self) -> usize {
        self.table.store.len()
    }

    /// Returns `true` if the table holds no mappings.
    pub fn is_empty(&self) -> bool {
        self.table.store.is_empty()
    }

    /// Iterates over the mappings in enumeration order.
    pub fn iter(&self) -> GuardIter<'_, K, V> {
        GuardIter {
            inner: self.table.iter(),
        }
    }
}

impl<K, V, S> HashtableGuard<'_, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns the value mapped to `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.table.get(key)
    }

    /// Returns `true` if `key` is mapped.
    pub fn contains_key(&self, key: &K) -> bool {
        self.table.get(key).is_some()
    }

    /// Maps `key` to `value`; see [`Hashtable::put`].
    pub fn put(&mut self, key: impl Into<Option<K>>, value: impl Into<Option<V>>) -> Result<Option<V>> {
        let key = non_null(key.into())?;
        let value = non_null(value.into())?;
        Ok(self.table.insert(key, value))
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.table.remove(key)
    }
}

/// Borrowing iterator over a locked [`Hashtable`].
pub struct GuardIter<'a, K, V> {
    inner: bucket_store::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for GuardIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

struct Enumeration<K, V, S> {
    table: Arc<Mutex<Table<K, V, S>>>,
    raw: RawCursor,
}

impl<K, V, S> Enumeration<K, V, S> {
    fn new(table: &Arc<Mutex<Table<K, V, S>>>) -> Self {
        let raw = table.lock().cursor();
        Self {
            table: Arc::clone(table),
            raw,
        }
    }

    fn step<R>(&mut self, project: impl FnOnce(&K, &V) -> R) -> Option<R> {
        let table = self.table.lock();
        self.raw.next_unchecked(&table.store).map(|(k, v)| project(k, v))
    }
}

/// Weakly consistent key enumeration, returned by [`Hashtable::keys`].
pub struct Keys<K, V, S> {
    inner: Enumeration<K, V, S>,
}

impl<K: Clone, V, S> Iterator for Keys<K, V, S> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.step(|k, _| k.clone())
    }
}

/// Weakly consistent value enumeration, returned by [`Hashtable::elements`].
pub struct Elements<K, V, S> {
    inner: Enumeration<K, V, S>,
}

impl<K, V: Clone, S> Iterator for Elements<K, V, S> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.inner.step(|_, v| v.clone())
    }
}

// Shared machinery of the fail-fast view iterators. Each step takes the lock,
// checks the modification counter, and fuses at the end or after the first
// failure.
struct TableCursor<K, V, S> {
    table: Arc<Mutex<Table<K, V, S>>>,
    raw: RawCursor,
    done: bool,
}

impl<K, V, S> TableCursor<K, V, S> {
    fn new(table: &Arc<Mutex<Table<K, V, S>>>) -> Self {
        let raw = table.lock().cursor();
        Self {
            table: Arc::clone(table),
            raw,
            done: false,
        }
    }

    // The counter is compared before looking for the next mapping, so a
    // table emptied behind the cursor still reports the conflict.
    fn step<R>(&mut self, project: impl FnOnce(&K, &V) -> R) -> Option<Result<R>> {
        if self.done {
            return None;
        }
        let table = self.table.lock();
        match self.raw.next(&table.store) {
            Ok((k, v)) => Some(Ok(project(k, v))),
            Err(Failure::NoSuchElement) => {
                self.done = true;
                None
            }
            Err(failure) => {
                self.done = true;
                Some(Err(failure))
            }
        }
    }

    fn remove(&mut self) -> Result<(K, V)> {
        let mut table = self.table.lock();
        self.raw.remove(&mut table.store)
    }

    fn set_value(&mut self, value: V) -> Result<V> {
        let mut table = self.table.lock();
        let (_, slot) = self.raw.current_mut(&mut table.store)?;
        Ok(mem::replace(slot, value))
    }
}

macro_rules! view_common {
    ($view:ident) => {
        impl<K, V, S> $view<K, V, S> {
            /// Returns the number of mappings in the backing table.
            pub fn len(&self) -> usize {
                self.table.lock().store.len()
            }

            /// Returns `true` if the backing table is empty.
            pub fn is_empty(&self) -> bool {
                self.table.lock().store.is_empty()
            }

            /// Removes every mapping from the backing table.
            pub fn clear(&self) {
                self.table.lock().store.clear()
            }
        }

        impl<K, V, S> Clone for $view<K, V, S> {
            fn clone(&self) -> Self {
                Self {
                    table: Arc::clone(&self.table),
                }
            }
        }
    };
}

/// The keys of a [`Hashtable`], sharing its storage and lock.
pub struct KeySet<K, V, S = DefaultHashBuilder> {
    table: Arc<Mutex<Table<K, V, S>>>,
}

view_common!(KeySet);

impl<K, V, S> KeySet<K, V, S> {
    /// Returns a fail-fast iterator over the keys.
    pub fn iter(&self) -> KeySetIter<K, V, S> {
        KeySetIter {
            cursor: TableCursor::new(&self.table),
        }
    }
}

impl<K, V, S> KeySet<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns `true` if the table maps `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.table.lock().get(key).is_some()
    }

    /// Removes `key` and its value from the table.
    pub fn remove(&self, key: &K) -> bool {
        self.table.lock().remove(key).is_some()
    }
}

/// The values of a [`Hashtable`], sharing its storage and lock.
pub struct ValuesView<K, V, S = DefaultHashBuilder> {
    table: Arc<Mutex<Table<K, V, S>>>,
}

view_common!(ValuesView);

impl<K, V, S> ValuesView<K, V, S> {
    /// Returns a fail-fast iterator over the values.
    pub fn iter(&self) -> ValuesIter<K, V, S> {
        ValuesIter {
            cursor: TableCursor::new(&self.table),
        }
    }

    /// Returns `true` if some key maps to `value`.
    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.table.lock().iter().any(|(_, v)| v == value)
    }
}

/// The mappings of a [`Hashtable`], sharing its storage and lock.
pub struct EntrySet<K, V, S = DefaultHashBuilder> {
    table: Arc<Mutex<Table<K, V, S>>>,
}

view_common!(EntrySet);

impl<K, V, S> EntrySet<K, V, S> {
    /// Returns a fail-fast iterator over cloned `(key, value)` pairs.
    pub fn iter(&self) -> EntrySetIter<K, V, S> {
        EntrySetIter {
            cursor: TableCursor::new(&self.table),
        }
    }
}

impl<K, V, S> EntrySet<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    /// Returns `true` if the table maps `key` to `value`.
    pub fn contains(&self, key: &K, value: &V) -> bool {
        self.table.lock().get(key) == Some(value)
    }
}

/// Fail-fast iterator over the keys of a [`Hashtable`].
///
/// Yields `Err(ConcurrentModification)` once if the table changed behind the
/// iterator, then ends.
pub struct KeySetIter<K, V, S> {
    cursor: TableCursor<K, V, S>,
}

impl<K, V, S> KeySetIter<K, V, S> {
    /// Removes the mapping whose key was yielded last.
    pub fn remove(&mut self) -> Result<K> {
        self.cursor.remove().map(|(k, _)| k)
    }
}

impl<K: Clone, V, S> Iterator for KeySetIter<K, V, S> {
    type Item = Result<K>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.step(|k, _| k.clone())
    }
}

/// Fail-fast iterator over the values of a [`Hashtable`].
pub struct ValuesIter<K, V, S> {
    cursor: TableCursor<K, V, S>,
}

impl<K, V, S> ValuesIter<K, V, S> {
    /// Removes the mapping whose value was yielded last.
    pub fn remove(&mut self) -> Result<V> {
        self.cursor.remove().map(|(_, v)| v)
    }
}

impl<K, V: Clone, S> Iterator for ValuesIter<K, V, S> {
    type Item = Result<V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.step(|_, v| v.clone())
    }
}

/// Fail-fast iterator over the mappings of a [`Hashtable`].
pub struct EntrySetIter<K, V, S> {
    cursor: TableCursor<K, V, S>,
}

impl<K, V, S> EntrySetIter<K, V, S> {
    /// Removes the mapping yielded last.
    pub fn remove(&mut self) -> Result<(K, V)> {
        self.cursor.remove()
    }

    /// Replaces the value of the mapping yielded last. `None` is rejected
    /// with [`Failure::IllegalNull`].
    pub fn set_value(&mut self, value: impl Into<Option<V>>) -> Result<V> {
        let value = non_null(value.into())?;
        self.cursor.set_value(value)
    }
}

impl<K: Clone, V: Clone, S> Iterator for EntrySetIter<K, V, S> {
    type Item = Result<(K, V)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.step(|k, v| (k.clone(), v.clone()))
    }
}
