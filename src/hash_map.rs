use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::mem;

use crate::DefaultHashBuilder;
use crate::bucket_store::BucketStore;
use crate::bucket_store::DEFAULT_LOAD_FACTOR;
use crate::bucket_store::Entry as StoreEntry;
use crate::bucket_store::Growth;
use crate::bucket_store::OccupiedEntry as StoreOccupied;
use crate::bucket_store::RawCursor;
use crate::bucket_store::VacantEntry as StoreVacant;
use crate::collection::Associative;
use crate::collection::Container;
use crate::error::Result;
use crate::error::or_panic;

/// Bucket count used when no capacity is given.
pub const DEFAULT_CAPACITY: usize = 16;

/// Initial capacity of a map copied from a source with `len` entries.
pub(crate) fn copy_capacity(len: usize) -> usize {
    if len < 6 { 11 } else { len.saturating_mul(2) }
}

/// A hash map using separate chaining, with the `None` key as a regular key.
///
/// `HashMap<K, V, S>` stores `Option<K>` keys next to their values in a
/// [`BucketStore`] and hashes them with the builder `S`. The `None` key hashes
/// to zero, so it always lives in bucket zero; there is at most one of it.
///
/// Key parameters accept anything convertible into `Option<K>`, so both
/// `map.insert(1, v)` and `map.insert(None, v)` work, and iterators yield
/// `Option<&K>` keys.
///
/// Capacity doubles whenever the population exceeds
/// `capacity * load_factor`, and never shrinks.
///
/// # Examples
///
/// ```rust
/// use chain_hash::HashMap;
///
/// let mut map: HashMap<&str, i32> = HashMap::new();
/// assert_eq!(map.insert("one", 1), None);
/// assert_eq!(map.insert(None, 0), None);
/// assert_eq!(map.insert("one", 11), Some(1));
///
/// assert_eq!(map.get(&"one"), Some(&11));
/// assert_eq!(map.get(None), Some(&0));
/// assert_eq!(map.len(), 2);
/// ```
pub struct HashMap<K, V, S = DefaultHashBuilder> {
    store: BucketStore<(Option<K>, V)>,
    hash_builder: S,
}

impl<K, V, S> Clone for HashMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            hash_builder: self.hash_builder.clone(),
        }
    }
}

impl<K, V, S> Debug for HashMap<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in self.store.iter() {
            map.entry(k, v);
        }
        map.finish()
    }
}

impl<K, V, S> HashMap<K, V, S> {
    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the number of buckets.
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Returns the configured load factor.
    pub fn load_factor(&self) -> f32 {
        self.store.load_factor()
    }

    /// Returns the population above which the map grows.
    pub fn threshold(&self) -> usize {
        self.store.threshold()
    }

    /// Returns a reference to the map's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes every entry, keeping the capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map: HashMap<i32, &str> = HashMap::new();
    /// map.insert(1, "a");
    /// let capacity = map.capacity();
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), capacity);
    /// ```
    pub fn clear(&mut self) {
        self.store.clear()
    }

    /// Iterates over `(key, value)` pairs in bucket order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.store.iter(),
        }
    }

    /// Iterates over the keys.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.store.iter(),
        }
    }

    /// Iterates over the values.
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: self.store.iter(),
        }
    }

    /// Iterates mutably over the values. Not a structural modification.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.store.iter_mut(),
        }
    }

    /// Removes every entry, yielding the removed pairs.
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        Drain {
            inner: self.store.drain(),
        }
    }

    /// Keeps only the entries for which `keep` returns `true`.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(Option<&K>, &mut V) -> bool,
    {
        self.store.retain(|(k, v)| keep(k.as_ref(), v))
    }

    /// Creates a fail-fast cursor positioned before the first entry.
    ///
    /// The cursor does not borrow the map; hand it the map on every step. A
    /// structural modification made through anything but the cursor's own
    /// [`remove`](Cursor::remove) makes the next step fail with
    /// [`Failure::ConcurrentModification`](crate::Failure::ConcurrentModification).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::Failure;
    /// use chain_hash::HashMap;
    ///
    /// let mut map: HashMap<i32, &str> = HashMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    ///
    /// let mut cursor = map.cursor();
    /// map.remove(&1);
    /// assert_eq!(cursor.next(&map), Err(Failure::ConcurrentModification));
    /// ```
    pub fn cursor(&self) -> Cursor {
        Cursor {
            raw: RawCursor::new(&self.store),
        }
    }

    /// Collects bucket and chain statistics.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> crate::bucket_store::DebugStats {
        self.store.debug_stats()
    }

    /// Returns the chain-length histogram of the underlying store.
    #[cfg(any(test, feature = "stats"))]
    pub fn chain_histogram(&self) -> alloc::vec::Vec<usize> {
        self.store.chain_histogram()
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a map with the given capacity, load factor and hasher builder.
    ///
    /// Fails when `capacity` exceeds [`MAX_CAPACITY`](crate::MAX_CAPACITY) or
    /// the load factor is not a positive number. A capacity of zero is
    /// rounded up to one bucket.
    pub fn try_with_capacity_load_factor_and_hasher(
        capacity: usize,
        load_factor: f32,
        hash_builder: S,
    ) -> Result<Self> {
        Ok(Self {
            store: BucketStore::with_config(capacity, load_factor, Growth::Double)?,
            hash_builder,
        })
    }

    /// Creates an empty map with the given hasher builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hash_builder)
    }

    /// Creates an empty map with `capacity` buckets and the given hasher
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

    fn hash_key(&self, key: Option<&K>) -> u64 {
        match key {
            Some(key) => self.hash_builder.hash_one(key),
            None => 0,
        }
    }

    /// Maps `key` to `value`, returning the value previously mapped to `key`.
    ///
    /// Replacing the value of an existing key is not a structural
    /// modification.
    pub fn insert(&mut self, key: impl Into<Option<K>>, value: V) -> Option<V> {
        let key = key.into();
        let hash = self.hash_key(key.as_ref());
        match self.store.entry(hash, |(k, _)| *k == key) {
            StoreEntry::Occupied(mut entry) => Some(mem::replace(&mut entry.get_mut().1, value)),
            StoreEntry::Vacant(entry) => {
                entry.insert((key, value));
                None
            }
        }
    }

    /// Returns the value mapped to `key`.
    pub fn get<'q>(&self, key: impl Into<Option<&'q K>>) -> Option<&V>
    where
        K: 'q,
    {
        let key = key.into();
        let hash = self.hash_key(key);
        self.store
            .find(hash, |(k, _)| k.as_ref() == key)
            .map(|(_, v)| v)
    }

    /// Returns the stored key and value for `key`.
    pub fn get_key_value<'q>(&self, key: impl Into<Option<&'q K>>) -> Option<(Option<&K>, &V)>
    where
        K: 'q,
    {
        let key = key.into();
        let hash = self.hash_key(key);
        self.store
            .find(hash, |(k, _)| k.as_ref() == key)
            .map(|(k, v)| (k.as_ref(), v))
    }

    /// Returns a mutable reference to the value mapped to `key`.
    pub fn get_mut<'q>(&mut self, key: impl Into<Option<&'q K>>) -> Option<&mut V>
    where
        K: 'q,
    {
        let key = key.into();
        let hash = self.hash_key(key);
        self.store
            .find_mut(hash, |(k, _)| k.as_ref() == key)
            .map(|(_, v)| v)
    }

    /// Returns `true` if `key` is mapped, including to a value that is itself
    /// "empty".
    pub fn contains_key<'q>(&self, key: impl Into<Option<&'q K>>) -> bool
    where
        K: 'q,
    {
        self.get(key).is_some()
    }

    /// Returns `true` if any key maps to `value`. Scans every chain.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|candidate| candidate == value)
    }

    /// Removes `key`, returning the value it was mapped to.
    pub fn remove<'q>(&mut self, key: impl Into<Option<&'q K>>) -> Option<V>
    where
        K: 'q,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes `key`, returning the stored key and its value.
    pub fn remove_entry<'q>(&mut self, key: impl Into<Option<&'q K>>) -> Option<(Option<K>, V)>
    where
        K: 'q,
    {
        let key = key.into();
        let hash = self.hash_key(key);
        self.store.remove(hash, |(k, _)| k.as_ref() == key)
    }

    /// Returns the entry for `key` for in-place manipulation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut letters: HashMap<char, u32> = HashMap::new();
    /// for ch in "a short treatise on fungi".chars() {
    ///     *letters.entry(ch).or_insert(0) += 1;
    /// }
    /// assert_eq!(letters.get(&'s'), Some(&2));
    /// assert_eq!(letters.get(&'t'), Some(&3));
    /// ```
    pub fn entry(&mut self, key: impl Into<Option<K>>) -> Entry<'_, K, V> {
        let key = key.into();
        let hash = self.hash_key(key.as_ref());
        match self.store.entry(hash, |(k, _)| *k == key) {
            StoreEntry::Occupied(entry) => Entry::Occupied(OccupiedEntry { inner: entry }),
            StoreEntry::Vacant(entry) => Entry::Vacant(VacantEntry { inner: entry, key }),
        }
    }

    /// Copies every mapping of `source` into this map.
    ///
    /// If the combined population could exceed the threshold the map first
    /// grows once to twice that population, then puts each pair.
    pub fn put_all<M>(&mut self, source: &M)
    where
        M: Associative<Key = Option<K>, Value = V> + ?Sized,
        K: Clone,
        V: Clone,
    {
        if source.is_empty() {
            return;
        }
        self.store.reserve_total(self.len() + source.len());
        for (key, value) in source.entries() {
            self.insert(key.clone(), value.clone());
        }
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates an empty map with the default capacity and load factor.
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates an empty map with `capacity` buckets.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`MAX_CAPACITY`](crate::MAX_CAPACITY).
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }

    /// Creates an empty map with `capacity` buckets and the given load
    /// factor.
    ///
    /// # Panics
    ///
    /// Panics on an invalid capacity or load factor; see
    /// [`try_with_capacity_and_load_factor`](Self::try_with_capacity_and_load_factor).
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f32) -> Self {
        or_panic(Self::try_with_capacity_and_load_factor(capacity, load_factor))
    }

    /// Creates an empty map with `capacity` buckets and the given load
    /// factor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::Failure;
    /// use chain_hash::HashMap;
    ///
    /// let map = HashMap::<i32, i32>::try_with_capacity_and_load_factor(0, 0.75).unwrap();
    /// assert_eq!(map.capacity(), 1);
    ///
    /// let err = HashMap::<i32, i32>::try_with_capacity_and_load_factor(8, 0.0);
    /// assert_eq!(err.err(), Some(Failure::InvalidLoadFactor));
    /// ```
    pub fn try_with_capacity_and_load_factor(capacity: usize, load_factor: f32) -> Result<Self> {
        Self::try_with_capacity_load_factor_and_hasher(capacity, load_factor, S::default())
    }

    /// Creates a map holding a copy of every mapping in `source`.
    ///
    /// The copy starts with 11 buckets for sources of fewer than six
    /// entries and twice the source's population otherwise.
    pub fn from_map<M>(source: &M) -> Self
    where
        M: Associative<Key = Option<K>, Value = V> + ?Sized,
        K: Clone,
        V: Clone,
    {
        let mut map = Self::with_capacity(copy_capacity(source.len()));
        map.put_all(source);
        map
    }
}

impl<K, V, S> Default for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> PartialEq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S> Eq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> Extend<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, S> Container for HashMap<K, V, S> {
    fn len(&self) -> usize {
        self.store.len()
    }
}

impl<K, V, S> Associative for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    type Entries<'a>
        = Entries<'a, K, V>
    where
        Self: 'a;
    type Key = Option<K>;
    type Value = V;

    fn get(&self, key: &Option<K>) -> Option<&V> {
        HashMap::get(self, key.as_ref())
    }

    fn contains_key(&self, key: &Option<K>) -> bool {
        HashMap::contains_key(self, key.as_ref())
    }

    fn put(&mut self, key: Option<K>, value: V) -> Result<Option<V>> {
        Ok(self.insert(key, value))
    }

    fn remove_key(&mut self, key: &Option<K>) -> Result<Option<V>> {
        Ok(HashMap::remove(self, key.as_ref()))
    }

    fn clear(&mut self) -> Result<()> {
        HashMap::clear(self);
        Ok(())
    }

    fn entries(&self) -> Self::Entries<'_> {
        Entries {
            inner: self.store.iter(),
        }
    }
}

/// A fail-fast cursor over a [`HashMap`], created by [`HashMap::cursor`].
///
/// Keys, values and entries are projections of the same traversal; mix
/// [`next`](Cursor::next), [`next_key`](Cursor::next_key) and
/// [`next_value`](Cursor::next_value) freely. A cursor must only be used with
/// the map that created it.
#[derive(Clone, Debug)]
pub struct Cursor {
    raw: RawCursor,
}

impl Cursor {
    /// Returns `true` if another entry remains.
    pub fn has_next<K, V, S>(&mut self, map: &HashMap<K, V, S>) -> bool {
        self.raw.has_next(&map.store)
    }

    /// Steps to the next entry.
    ///
    /// Fails with `ConcurrentModification` if the map changed structurally
    /// behind the cursor, and with `NoSuchElement` past the end.
    pub fn next<'a, K, V, S>(&mut self, map: &'a HashMap<K, V, S>) -> Result<(Option<&'a K>, &'a V)> {
        self.raw.next(&map.store).map(|(k, v)| (k.as_ref(), v))
    }

    /// Steps to the next entry and returns its key.
    pub fn next_key<'a, K, V, S>(&mut self, map: &'a HashMap<K, V, S>) -> Result<Option<&'a K>> {
        self.next(map).map(|(k, _)| k)
    }

    /// Steps to the next entry and returns its value.
    pub fn next_value<'a, K, V, S>(&mut self, map: &'a HashMap<K, V, S>) -> Result<&'a V> {
        self.next(map).map(|(_, v)| v)
    }

    /// Replaces the value of the entry most recently stepped over. Not a
    /// structural modification.
    pub fn set_value<K, V, S>(&self, map: &mut HashMap<K, V, S>, value: V) -> Result<V> {
        let (_, slot) = self.raw.current_mut(&mut map.store)?;
        Ok(mem::replace(slot, value))
    }

    /// Removes the entry most recently stepped over.
    ///
    /// The cursor stays valid. Fails with `IllegalState` if there is no such
    /// entry, or it was already removed.
    pub fn remove<K, V, S>(&mut self, map: &mut HashMap<K, V, S>) -> Result<(Option<K>, V)> {
        self.raw.remove(&mut map.store)
    }
}

/// A view into a single entry in the map, which may either be vacant or
/// occupied.
pub enum Entry<'a, K, V> {
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V>),
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),
}

impl<'a, K, V> Entry<'a, K, V> {
    /// Ensures a value is in the entry by inserting the default if empty, and
    /// returns a mutable reference to the value in the entry.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Ensures a value is in the entry by inserting the result of the default
    /// function if empty.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts into the map.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns the entry's key.
    pub fn key(&self) -> Option<&K> {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K, V: Default> Entry<'a, K, V> {
    /// Ensures a value is in the entry by inserting the default value if
    /// empty.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(V::default)
    }
}

/// A view into a vacant entry in a [`HashMap`].
pub struct VacantEntry<'a, K, V> {
    inner: StoreVacant<'a, (Option<K>, V)>,
    key: Option<K>,
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    /// Returns the key that would be used when inserting.
    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    /// Takes ownership of the key.
    pub fn into_key(self) -> Option<K> {
        self.key
    }

    /// Inserts the value, a structural modification that may grow the map.
    pub fn insert(self, value: V) -> &'a mut V {
        &mut self.inner.insert((self.key, value)).1
    }
}

/// A view into an occupied entry in a [`HashMap`].
pub struct OccupiedEntry<'a, K, V> {
    inner: StoreOccupied<'a, (Option<K>, V)>,
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    /// Returns the stored key.
    pub fn key(&self) -> Option<&K> {
        self.inner.get().0.as_ref()
    }

    /// Returns the value.
    pub fn get(&self) -> &V {
        &self.inner.get().1
    }

    /// Returns the value mutably.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.inner.get_mut().1
    }

    /// Converts the entry into a mutable reference with the map's lifetime.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.inner.into_mut().1
    }

    /// Replaces the value, returning the old one.
    pub fn insert(&mut self, value: V) -> V {
        mem::replace(self.get_mut(), value)
    }

    /// Removes the entry, returning its value.
    pub fn remove(self) -> V {
        self.inner.remove().1
    }

    /// Removes the entry, returning its key and value.
    pub fn remove_entry(self) -> (Option<K>, V) {
        self.inner.remove()
    }
}

/// Iterator over `(key, value)` pairs.
pub struct Iter<'a, K, V> {
    inner: crate::bucket_store::Iter<'a, (Option<K>, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (Option<&'a K>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_ref(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Iterator over stored `(&Option<K>, &V)` pairs, used by the
/// [`Associative`] implementation.
pub struct Entries<'a, K, V> {
    inner: crate::bucket_store::Iter<'a, (Option<K>, V)>,
}

impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = (&'a Option<K>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Iterator over keys.
pub struct Keys<'a, K, V> {
    inner: crate::bucket_store::Iter<'a, (Option<K>, V)>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = Option<&'a K>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k.as_ref())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// Iterator over values.
pub struct Values<'a, K, V> {
    inner: crate::bucket_store::Iter<'a, (Option<K>, V)>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

/// Mutable iterator over values.
pub struct ValuesMut<'a, K, V> {
    inner: crate::bucket_store::IterMut<'a, (Option<K>, V)>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Draining iterator returned by [`HashMap::drain`].
pub struct Drain<'a, K, V> {
    inner: crate::bucket_store::Drain<'a, (Option<K>, V)>,
}

impl<K, V> Iterator for Drain<'_, K, V> {
    type Item = (Option<K>, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Owning iterator over a [`HashMap`].
pub struct IntoIter<K, V> {
    inner: crate::bucket_store::IntoIter<(Option<K>, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (Option<K>, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, S> IntoIterator for HashMap<K, V, S> {
    type IntoIter = IntoIter<K, V>;
    type Item = (Option<K>, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.store.into_iter(),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashMap<K, V, S> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (Option<&'a K>, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::hash::BuildHasher;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;
    use crate::Failure;

    #[derive(Clone)]
    struct SipHashBuilder {
        k1: u64,
        k2: u64,
    }

    impl BuildHasher for SipHashBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new_with_keys(self.k1, self.k2)
        }
    }

    impl Default for SipHashBuilder {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k1: rng.try_next_u64().unwrap_or(0),
                k2: rng.try_next_u64().unwrap_or(0),
            }
        }
    }

    type Map<K, V> = HashMap<K, V, SipHashBuilder>;

    #[test]
    fn test_new_and_with_hasher() {
        let map: Map<i32, String> = HashMap::new();
        assert!(map.is_empty());
        assert_eq!(map.capacity(), DEFAULT_CAPACITY);
        assert_eq!(map.threshold(), 12);

        let map2 = HashMap::<i32, String, _>::with_hasher(SipHashBuilder::default());
        assert!(map2.is_empty());
        assert_eq!(map2.len(), 0);
    }

    #[test]
    fn test_invalid_configuration() {
        assert_eq!(
            Map::<i32, i32>::try_with_capacity_and_load_factor(crate::MAX_CAPACITY + 1, 0.75)
                .err(),
            Some(Failure::InvalidCapacity {
                requested: crate::MAX_CAPACITY + 1
            })
        );
        assert_eq!(
            Map::<i32, i32>::try_with_capacity_and_load_factor(4, f32::NAN).err(),
            Some(Failure::InvalidLoadFactor)
        );
        assert_eq!(Map::<i32, i32>::with_capacity(0).capacity(), 1);
    }

    #[test]
    #[should_panic(expected = "load factor must be a positive number")]
    fn test_infallible_constructor_panics() {
        let _ = Map::<i32, i32>::with_capacity_and_load_factor(4, -0.5);
    }

    #[test]
    fn test_insert_and_get() {
        let mut map: Map<i32, String> = HashMap::new();

        assert_eq!(map.insert(1, "hello".to_string()), None);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), Some(&"hello".to_string()));
        assert_eq!(map.get(&2), None);

        assert_eq!(
            map.insert(1, "world".to_string()),
            Some("hello".to_string())
        );
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), Some(&"world".to_string()));
    }

    #[test]
    fn test_null_key() {
        let mut map: Map<i32, &str> = HashMap::new();
        assert!(!map.contains_key(None));
        assert_eq!(map.insert(None, "nothing"), None);
        assert_eq!(map.insert(0, "zero"), None);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(None), Some(&"nothing"));
        assert_eq!(map.get(&0), Some(&"zero"));
        assert_eq!(map.insert(None, "still nothing"), Some("nothing"));
        assert_eq!(map.len(), 2);

        assert_eq!(map.keys().filter(|k| k.is_none()).count(), 1);
        assert_eq!(map.remove(None), Some("still nothing"));
        assert!(!map.contains_key(None));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_get_mut_and_contains_value() {
        let mut map: Map<i32, i32> = HashMap::new();
        map.insert(1, 10);
        if let Some(v) = map.get_mut(&1) {
            *v += 5;
        }
        assert!(map.contains_value(&15));
        assert!(!map.contains_value(&10));
        assert_eq!(map.get_key_value(&1), Some((Some(&1), &15)));
    }

    #[test]
    fn test_remove_entry() {
        let mut map: Map<String, i32> = HashMap::new();
        map.insert("a".to_string(), 1);
        assert_eq!(map.remove_entry(&"a".to_string()), Some((Some("a".to_string()), 1)));
        assert_eq!(map.remove(&"a".to_string()), None);
        assert!(map.is_empty());
    }

    #[test]
    fn test_growth_invariant() {
        let mut map: Map<i32, i32> = HashMap::with_capacity(1);
        for i in 0..500 {
            let was_new = !map.contains_key(&i);
            let before = map.len();
            map.insert(i, i * 2);
            assert_eq!(map.len(), before + usize::from(was_new));
            assert!(map.len() <= map.threshold());
        }
        for i in 0..500 {
            assert_eq!(map.get(&i), Some(&(i * 2)));
        }
        let stats = map.debug_stats();
        assert_eq!(stats.len, 500);
        assert_eq!(map.chain_histogram().iter().sum::<usize>(), map.capacity());
    }

    #[test]
    fn test_growth_doubles() {
        let mut map: Map<i32, i32> = HashMap::with_capacity(4);
        for i in 0..4 {
            map.insert(i, i);
        }
        assert_eq!(map.capacity(), 8);
    }

    #[test]
    fn test_entry_api() {
        let mut map: Map<i32, i32> = HashMap::new();

        *map.entry(1).or_insert(10) += 1;
        assert_eq!(map.get(&1), Some(&11));

        map.entry(1).and_modify(|v| *v *= 2).or_insert(0);
        assert_eq!(map.get(&1), Some(&22));

        assert_eq!(*map.entry(None).or_default(), 0);
        assert_eq!(map.entry(None).key(), None);
        assert_eq!(map.entry(2).key(), Some(&2));

        match map.entry(1) {
            Entry::Occupied(mut entry) => {
                assert_eq!(entry.key(), Some(&1));
                assert_eq!(entry.insert(5), 22);
                assert_eq!(entry.remove_entry(), (Some(1), 5));
            }
            Entry::Vacant(_) => panic!("expected occupied entry"),
        }

        match map.entry(3) {
            Entry::Vacant(entry) => {
                assert_eq!(entry.key(), Some(&3));
                *entry.insert(30) += 1;
            }
            Entry::Occupied(_) => panic!("expected vacant entry"),
        }
        assert_eq!(map.get(&3), Some(&31));
    }

    #[test]
    fn test_iterators() {
        let mut map: Map<i32, i32> = HashMap::new();
        for i in 0..10 {
            map.insert(i, i * 10);
        }
        map.insert(None, -1);

        let mut keys = map.keys().collect::<Vec<_>>();
        keys.sort();
        assert_eq!(keys[0], None);
        assert_eq!(keys.len(), 11);

        let mut values = map.values().copied().collect::<Vec<_>>();
        values.sort();
        assert_eq!(values[0], -1);

        for v in map.values_mut() {
            *v += 1;
        }
        assert_eq!(map.get(&9), Some(&91));
        assert_eq!(map.iter().len(), 11);
        assert_eq!((&map).into_iter().count(), 11);
    }

    #[test]
    fn test_retain_and_drain() {
        let mut map: Map<i32, i32> = (0..20).map(|i| (i, i)).collect();
        map.retain(|k, _| k.is_some_and(|k| k % 2 == 0));
        assert_eq!(map.len(), 10);

        let mut drained = map.drain().collect::<Vec<_>>();
        drained.sort();
        assert_eq!(drained[0], (Some(0), 0));
        assert_eq!(drained.len(), 10);
        assert!(map.is_empty());
    }

    #[test]
    fn test_cursor_fail_fast() {
        let mut map: Map<i32, &str> = HashMap::new();
        map.insert(1, "a");
        map.insert(2, "b");

        let mut cursor = map.cursor();
        map.remove(&1);
        assert_eq!(cursor.next(&map), Err(Failure::ConcurrentModification));

        let mut cursor = map.cursor();
        map.insert(3, "c");
        assert_eq!(cursor.next_key(&map), Err(Failure::ConcurrentModification));
    }

    #[test]
    fn test_cursor_value_replacement_is_not_structural() {
        let mut map: Map<i32, &str> = HashMap::new();
        map.insert(1, "a");
        map.insert(2, "b");

        let mut cursor = map.cursor();
        map.insert(1, "z");
        assert!(cursor.next(&map).is_ok());
        assert!(cursor.set_value(&mut map, "y").is_ok());
        assert!(cursor.next(&map).is_ok());
        assert_eq!(cursor.next(&map), Err(Failure::NoSuchElement));
        assert!(!cursor.has_next(&map));
    }

    #[test]
    fn test_cursor_remove() {
        let mut map: Map<i32, i32> = (0..50).map(|i| (i, i)).collect();
        let mut other = map.cursor();
        let mut cursor = map.cursor();

        assert_eq!(cursor.remove(&mut map), Err(Failure::IllegalState));
        while cursor.has_next(&map) {
            let value = *cursor.next_value(&map).unwrap();
            if value % 5 != 0 {
                cursor.remove(&mut map).unwrap();
            }
        }
        assert_eq!(map.len(), 10);
        assert!(map.keys().all(|k| k.is_some_and(|k| k % 5 == 0)));
        assert_eq!(other.next(&map), Err(Failure::ConcurrentModification));
    }

    #[test]
    fn test_put_all_and_from_map() {
        let source: Map<i32, i32> = (0..40).map(|i| (i, -i)).collect();

        let mut target: Map<i32, i32> = HashMap::new();
        target.insert(1000, 0);
        target.put_all(&source);
        assert_eq!(target.len(), 41);
        assert_eq!(target.capacity(), 82);
        assert_eq!(target.get(&39), Some(&-39));

        let copy: Map<i32, i32> = HashMap::from_map(&source);
        assert_eq!(copy.capacity(), 80);
        assert_eq!(copy, source);

        let small: Map<i32, i32> = (0..3).map(|i| (i, i)).collect();
        assert_eq!(Map::<i32, i32>::from_map(&small).capacity(), 11);
    }

    #[test]
    fn test_associative_impl() {
        fn fill<M: Associative<Key = Option<i32>, Value = i32>>(map: &mut M) {
            map.put(Some(1), 1).unwrap();
            map.put(None, 0).unwrap();
            map.put_all([(Some(2), 2), (Some(3), 3)]).unwrap();
        }

        let mut map: Map<i32, i32> = HashMap::new();
        fill(&mut map);
        assert_eq!(Associative::get(&map, &None), Some(&0));
        assert!(Associative::contains_key(&map, &Some(3)));
        assert!(Associative::contains_value(&map, &2));
        assert_eq!(map.remove_key(&Some(1)), Ok(Some(1)));
        assert_eq!(map.entries().count(), 3);
        Associative::clear(&mut map).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_clone_eq_and_debug() {
        let mut map: Map<i32, i32> = HashMap::new();
        map.insert(1, 2);
        let copy = map.clone();
        assert_eq!(map, copy);
        map.insert(1, 3);
        assert_ne!(map, copy);
        assert_eq!(alloc::format!("{:?}", copy), "{Some(1): 2}");
    }

    #[test]
    fn test_collision_handling() {
        #[derive(Clone, Default)]
        struct Constant;

        impl BuildHasher for Constant {
            type Hasher = SipHasher;

            fn build_hasher(&self) -> Self::Hasher {
                SipHasher::new_with_keys(0, 0)
            }
        }

        #[derive(PartialEq, Eq)]
        struct Collides(u32);

        impl Hash for Collides {
            fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
                0u8.hash(state);
            }
        }

        let mut map: HashMap<Collides, u32, Constant> = HashMap::new();
        for i in 0..32 {
            map.insert(Collides(i), i);
        }
        for i in 0..32 {
            assert_eq!(map.get(&Collides(i)), Some(&i));
        }
        assert_eq!(map.remove(&Collides(7)), Some(7));
        assert_eq!(map.len(), 31);
        let values = {
            let mut values = map.values().copied().collect::<Vec<_>>();
            values.sort();
            values
        };
        assert_eq!(values.len(), 31);
        assert!(!values.contains(&7));
        assert_eq!(vec![0, 1], values[..2].to_vec());
    }
}
