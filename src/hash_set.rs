use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::DefaultHashBuilder;
use crate::collection::Associative;
use crate::collection::Collection;
use crate::collection::Container;
use crate::error::Result;
use crate::hash_map;
use crate::hash_map::HashMap;
use crate::hash_map::copy_capacity;

/// A hash set whose elements are the keys of a [`HashMap`] with `()` values.
///
/// Like the map, the set accepts one `None` element, and its iterators yield
/// `Option<&T>`. The set's size is always the backing map's size.
///
/// # Examples
///
/// ```rust
/// use chain_hash::HashSet;
///
/// let mut set: HashSet<&str> = HashSet::new();
/// assert!(set.insert("a"));
/// assert!(!set.insert("a"));
/// assert!(set.insert(None));
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(None));
/// ```
pub struct HashSet<T, S = DefaultHashBuilder> {
    map: HashMap<T, (), S>,
}

impl<T, S> Clone for HashSet<T, S>
where
    T: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
        }
    }
}

impl<T, S> PartialEq for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|v| other.contains(v))
    }
}

impl<T, S> Eq for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
}

impl<T, S> Debug for HashSet<T, S>
where
    T: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> HashSet<T, S> {
    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the number of buckets in the backing map.
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.map.clear()
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.map.keys(),
        }
    }

    /// Removes every element, yielding them.
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain {
            inner: self.map.drain(),
        }
    }

    /// Keeps only the elements for which `keep` returns `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = (1..=4).collect();
    /// set.retain(|x| x.is_some_and(|x| x % 2 == 0));
    /// assert_eq!(set.len(), 2);
    /// assert!(set.contains(&2));
    /// assert!(set.contains(&4));
    /// ```
    pub fn retain(&mut self, mut keep: impl FnMut(Option<&T>) -> bool) {
        self.map.retain(|k, _| keep(k))
    }

    /// Creates a fail-fast cursor over the elements; see
    /// [`HashMap::cursor`].
    pub fn cursor(&self) -> Cursor {
        Cursor {
            inner: self.map.cursor(),
        }
    }

    /// Collects bucket and chain statistics of the backing map.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> crate::bucket_store::DebugStats {
        self.map.debug_stats()
    }

    /// Returns the chain-length histogram of the backing map.
    #[cfg(any(test, feature = "stats"))]
    pub fn chain_histogram(&self) -> alloc::vec::Vec<usize> {
        self.map.chain_histogram()
    }
}

impl<T, S> HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Creates an empty set with the given capacity, load factor and hasher
    /// builder.
    pub fn try_with_capacity_load_factor_and_hasher(
        capacity: usize,
        load_factor: f32,
        hash_builder: S,
    ) -> Result<Self> {
        Ok(Self {
            map: HashMap::try_with_capacity_load_factor_and_hasher(
                capacity,
                load_factor,
                hash_builder,
            )?,
        })
    }

    /// Creates an empty set with the given hasher builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            map: HashMap::with_hasher(hash_builder),
        }
    }

    /// Creates an empty set with `capacity` buckets and the given hasher
    /// builder.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`MAX_CAPACITY`](crate::MAX_CAPACITY).
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, hash_builder),
        }
    }

    /// Adds `value`, returning `true` if it was not already present.
    pub fn insert(&mut self, value: impl Into<Option<T>>) -> bool {
        self.map.insert(value, ()).is_none()
    }

    /// Returns `true` if the set contains `value`.
    pub fn contains<'q>(&self, value: impl Into<Option<&'q T>>) -> bool
    where
        T: 'q,
    {
        self.map.contains_key(value)
    }

    /// Removes `value`, returning `true` if it was present.
    pub fn remove<'q>(&mut self, value: impl Into<Option<&'q T>>) -> bool
    where
        T: 'q,
    {
        self.map.remove(value).is_some()
    }

    /// Removes and returns the stored element equal to `value`.
    pub fn take<'q>(&mut self, value: impl Into<Option<&'q T>>) -> Option<Option<T>>
    where
        T: 'q,
    {
        self.map.remove_entry(value).map(|(k, _)| k)
    }

    /// Returns `true` if the sets have no element in common.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashSet;
    ///
    /// let a: HashSet<i32> = [1, 2, 3].into_iter().collect();
    /// let mut b: HashSet<i32> = HashSet::new();
    /// assert!(a.is_disjoint(&b));
    /// b.insert(4);
    /// assert!(a.is_disjoint(&b));
    /// b.insert(1);
    /// assert!(!a.is_disjoint(&b));
    /// ```
    pub fn is_disjoint(&self, other: &HashSet<T, S>) -> bool {
        if self.len() <= other.len() {
            self.iter().all(|v| !other.contains(v))
        } else {
            other.iter().all(|v| !self.contains(v))
        }
    }

    /// Returns `true` if every element of `self` is in `other`.
    pub fn is_subset(&self, other: &HashSet<T, S>) -> bool {
        self.len() <= other.len() && self.iter().all(|v| other.contains(v))
    }

    /// Returns `true` if every element of `other` is in `self`.
    pub fn is_superset(&self, other: &HashSet<T, S>) -> bool {
        other.is_subset(self)
    }

    /// Visits the elements of `self`, then those of `other` not in `self`.
    pub fn union<'a>(&'a self, other: &'a HashSet<T, S>) -> Union<'a, T, S> {
        Union {
            iter: self.iter(),
            other_iter: other.iter(),
            set: self,
        }
    }

    /// Visits the elements present in both sets.
    pub fn intersection<'a>(&'a self, other: &'a HashSet<T, S>) -> Intersection<'a, T, S> {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        Intersection {
            iter: small.iter(),
            other: large,
        }
    }

    /// Visits the elements of `self` that are not in `other`.
    pub fn difference<'a>(&'a self, other: &'a HashSet<T, S>) -> Difference<'a, T, S> {
        Difference {
            iter: self.iter(),
            other,
        }
    }

    /// Visits the elements in exactly one of the sets.
    pub fn symmetric_difference<'a>(
        &'a self,
        other: &'a HashSet<T, S>,
    ) -> SymmetricDifference<'a, T, S> {
        SymmetricDifference {
            iter: self.difference(other).chain(other.difference(self)),
        }
    }
}

impl<T, S> HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates an empty set with the default capacity and load factor.
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates an empty set with `capacity` buckets.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }

    /// Creates an empty set with `capacity` buckets and the given load
    /// factor.
    pub fn try_with_capacity_and_load_factor(capacity: usize, load_factor: f32) -> Result<Self> {
        Self::try_with_capacity_load_factor_and_hasher(capacity, load_factor, S::default())
    }

    /// Creates a set holding every distinct element of `source`.
    ///
    /// Sizing follows [`HashMap::from_map`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashSet;
    ///
    /// let set: HashSet<i32> = HashSet::from_collection(&vec![1, 2, 2, 3]);
    /// assert_eq!(set.len(), 3);
    /// assert_eq!(set.capacity(), 11);
    /// ```
    pub fn from_collection<C>(source: &C) -> Self
    where
        C: Collection + ?Sized,
        C::Item: Clone + Into<Option<T>>,
    {
        let mut set = Self::with_capacity(copy_capacity(source.len()));
        for item in source.iter() {
            set.insert(item.clone());
        }
        set
    }
}

impl<T, S> Default for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> Container for HashSet<T, S> {
    fn len(&self) -> usize {
        self.map.len()
    }
}

impl<T, S> Collection for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = Option<T>;
    type Iter<'a>
        = Elements<'a, T>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        Elements {
            inner: self.map.entries(),
        }
    }

    fn contains(&self, item: &Option<T>) -> bool {
        HashSet::contains(self, item.as_ref())
    }

    fn add(&mut self, item: Option<T>) -> Result<bool> {
        Ok(self.insert(item))
    }

    fn remove_item(&mut self, item: &Option<T>) -> Result<bool> {
        Ok(HashSet::remove(self, item.as_ref()))
    }

    fn clear(&mut self) -> Result<()> {
        HashSet::clear(self);
        Ok(())
    }
}

/// A fail-fast cursor over a [`HashSet`], created by [`HashSet::cursor`].
#[derive(Clone, Debug)]
pub struct Cursor {
    inner: hash_map::Cursor,
}

impl Cursor {
    /// Returns `true` if another element remains.
    pub fn has_next<T, S>(&mut self, set: &HashSet<T, S>) -> bool {
        self.inner.has_next(&set.map)
    }

    /// Steps to the next element.
    pub fn next<'a, T, S>(&mut self, set: &'a HashSet<T, S>) -> Result<Option<&'a T>> {
        self.inner.next_key(&set.map)
    }

    /// Removes the element most recently stepped over.
    pub fn remove<T, S>(&mut self, set: &mut HashSet<T, S>) -> Result<Option<T>> {
        self.inner.remove(&mut set.map).map(|(k, _)| k)
    }
}

/// Iterator over the elements of a [`HashSet`].
pub struct Iter<'a, T> {
    inner: hash_map::Keys<'a, T, ()>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = Option<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Iterator over the stored `Option<T>` elements, used by the
/// [`Collection`] implementation.
pub struct Elements<'a, T> {
    inner: hash_map::Entries<'a, T, ()>,
}

impl<'a, T> Iterator for Elements<'a, T> {
    type Item = &'a Option<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Draining iterator returned by [`HashSet::drain`].
pub struct Drain<'a, T> {
    inner: hash_map::Drain<'a, T, ()>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = Option<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Owning iterator over a [`HashSet`].
pub struct IntoIter<T> {
    inner: hash_map::IntoIter<T, ()>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = Option<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T, S> IntoIterator for HashSet<T, S> {
    type IntoIter = IntoIter<T>;
    type Item = Option<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.map.into_iter(),
        }
    }
}

impl<'a, T, S> IntoIterator for &'a HashSet<T, S> {
    type IntoIter = Iter<'a, T>;
    type Item = Option<&'a T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, S> FromIterator<T> for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T, S> Extend<T> for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

/// An iterator over the union of two sets.
pub struct Union<'a, T, S> {
    iter: Iter<'a, T>,
    other_iter: Iter<'a, T>,
    set: &'a HashSet<T, S>,
}

impl<'a, T, S> Iterator for Union<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = Option<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(v) = self.iter.next() {
            return Some(v);
        }
        loop {
            let v = self.other_iter.next()?;
            if !self.set.contains(v) {
                return Some(v);
            }
        }
    }
}

/// An iterator over the intersection of two sets.
pub struct Intersection<'a, T, S> {
    iter: Iter<'a, T>,
    other: &'a HashSet<T, S>,
}

impl<'a, T, S> Iterator for Intersection<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = Option<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let v = self.iter.next()?;
            if self.other.contains(v) {
                return Some(v);
            }
        }
    }
}

/// An iterator over the difference of two sets.
pub struct Difference<'a, T, S> {
    iter: Iter<'a, T>,
    other: &'a HashSet<T, S>,
}

impl<'a, T, S> Iterator for Difference<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = Option<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let v = self.iter.next()?;
            if !self.other.contains(v) {
                return Some(v);
            }
        }
    }
}

/// An iterator over the symmetric difference of two sets.
pub struct SymmetricDifference<'a, T, S> {
    iter: core::iter::Chain<Difference<'a, T, S>, Difference<'a, T, S>>,
}

impl<'a, T, S> Iterator for SymmetricDifference<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = Option<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}
