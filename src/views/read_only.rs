use core::ops::Range;

use crate::collection::Associative;
use crate::collection::Collection;
use crate::collection::Container;
use crate::collection::Sequence;
use crate::collection::SubList;
use crate::error::Failure;
use crate::error::Result;

/// A read-only view of a [`Collection`].
pub struct ReadOnlyCollection<'a, C: ?Sized> {
    inner: &'a C,
}

impl<'a, C: ?Sized> ReadOnlyCollection<'a, C> {
    /// Wraps `inner`.
    pub fn new(inner: &'a C) -> Self {
        Self { inner }
    }
}

impl<C: ?Sized> Clone for ReadOnlyCollection<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: ?Sized> Copy for ReadOnlyCollection<'_, C> {}

impl<C: Container + ?Sized> Container for ReadOnlyCollection<'_, C> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<C: Collection + ?Sized> Collection for ReadOnlyCollection<'_, C> {
    type Item = C::Item;
    type Iter<'b>
        = C::Iter<'b>
    where
        Self: 'b;

    fn iter(&self) -> Self::Iter<'_> {
        self.inner.iter()
    }

    fn contains(&self, item: &C::Item) -> bool {
        self.inner.contains(item)
    }

    fn add(&mut self, _item: C::Item) -> Result<bool> {
        Err(Failure::MutationRejected)
    }

    fn remove_item(&mut self, _item: &C::Item) -> Result<bool> {
        Err(Failure::MutationRejected)
    }

    fn clear(&mut self) -> Result<()> {
        Err(Failure::MutationRejected)
    }

    fn add_all<I>(&mut self, _items: I) -> Result<bool>
    where
        I: IntoIterator<Item = C::Item>,
    {
        Err(Failure::MutationRejected)
    }
}

/// A read-only view of a [`Sequence`].
///
/// # Examples
///
/// ```rust
/// use chain_hash::Failure;
/// use chain_hash::collection::Sequence;
/// use chain_hash::views::read_only::ReadOnlyList;
///
/// let list = vec!['a', 'b', 'c'];
/// let mut view = ReadOnlyList::new(&list);
/// assert_eq!(view.at(1), Ok(&'b'));
/// assert_eq!(view.replace_at(1, 'z'), Err(Failure::MutationRejected));
///
/// let mut tail = view.sub_list(1..3).unwrap();
/// assert_eq!(tail.remove_at(0), Err(Failure::MutationRejected));
/// assert_eq!(tail.to_vec(), vec!['b', 'c']);
/// ```
pub struct ReadOnlyList<'a, L: ?Sized> {
    inner: &'a L,
}

impl<'a, L: Sequence + ?Sized> ReadOnlyList<'a, L> {
    /// Wraps `inner`.
    pub fn new(inner: &'a L) -> Self {
        Self { inner }
    }

    /// Returns a window over `range`. The window is read-only as well, and
    /// so is every window taken from it.
    pub fn sub_list(&self, range: Range<usize>) -> Result<SubList<'a, L>> {
        SubList::new(self.inner, range)
    }
}

impl<L: ?Sized> Clone for ReadOnlyList<'_, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L: ?Sized> Copy for ReadOnlyList<'_, L> {}

impl<L: Container + ?Sized> Container for ReadOnlyList<'_, L> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<L: Sequence + ?Sized> Collection for ReadOnlyList<'_, L> {
    type Item = L::Item;
    type Iter<'b>
        = L::Iter<'b>
    where
        Self: 'b;

    fn iter(&self) -> Self::Iter<'_> {
        self.inner.iter()
    }

    fn contains(&self, item: &L::Item) -> bool {
        self.inner.contains(item)
    }

    fn add(&mut self, _item: L::Item) -> Result<bool> {
        Err(Failure::MutationRejected)
    }

    fn remove_item(&mut self, _item: &L::Item) -> Result<bool> {
        Err(Failure::MutationRejected)
    }

    fn clear(&mut self) -> Result<()> {
        Err(Failure::MutationRejected)
    }

    fn add_all<I>(&mut self, _items: I) -> Result<bool>
    where
        I: IntoIterator<Item = L::Item>,
    {
        Err(Failure::MutationRejected)
    }
}

impl<L: Sequence + ?Sized> Sequence for ReadOnlyList<'_, L> {
    fn at(&self, index: usize) -> Result<&L::Item> {
        self.inner.at(index)
    }

    fn replace_at(&mut self, _index: usize, _item: L::Item) -> Result<L::Item> {
        Err(Failure::MutationRejected)
    }

    fn insert_at(&mut self, _index: usize, _item: L::Item) -> Result<()> {
        Err(Failure::MutationRejected)
    }

    fn remove_at(&mut self, _index: usize) -> Result<L::Item> {
        Err(Failure::MutationRejected)
    }

    fn is_random_access(&self) -> bool {
        self.inner.is_random_access()
    }

    fn overwrite<I>(&mut self, _items: I) -> Result<()>
    where
        I: IntoIterator<Item = L::Item>,
    {
        Err(Failure::MutationRejected)
    }

    fn overwrite_from<I>(&mut self, _offset: usize, _items: I) -> Result<()>
    where
        I: IntoIterator<Item = L::Item>,
    {
        Err(Failure::MutationRejected)
    }

    fn index_of(&self, item: &L::Item) -> Option<usize> {
        self.inner.index_of(item)
    }

    fn last_index_of(&self, item: &L::Item) -> Option<usize> {
        self.inner.last_index_of(item)
    }
}

/// A read-only view of an [`Associative`] container.
pub struct ReadOnlyMap<'a, M: ?Sized> {
    inner: &'a M,
}

impl<'a, M: ?Sized> ReadOnlyMap<'a, M> {
    /// Wraps `inner`.
    pub fn new(inner: &'a M) -> Self {
        Self { inner }
    }
}

impl<M: ?Sized> Clone for ReadOnlyMap<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ?Sized> Copy for ReadOnlyMap<'_, M> {}

impl<M: Container + ?Sized> Container for ReadOnlyMap<'_, M> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<M: Associative + ?Sized> Associative for ReadOnlyMap<'_, M> {
    type Entries<'b>
        = M::Entries<'b>
    where
        Self: 'b;
    type Key = M::Key;
    type Value = M::Value;

    fn get(&self, key: &M::Key) -> Option<&M::Value> {
        self.inner.get(key)
    }

    fn contains_key(&self, key: &M::Key) -> bool {
        self.inner.contains_key(key)
    }

    fn contains_value(&self, value: &M::Value) -> bool {
        self.inner.contains_value(value)
    }

    fn put(&mut self, _key: M::Key, _value: M::Value) -> Result<Option<M::Value>> {
        Err(Failure::MutationRejected)
    }

    fn remove_key(&mut self, _key: &M::Key) -> Result<Option<M::Value>> {
        Err(Failure::MutationRejected)
    }

    fn clear(&mut self) -> Result<()> {
        Err(Failure::MutationRejected)
    }

    fn entries(&self) -> Self::Entries<'_> {
        self.inner.entries()
    }

    fn put_all<I>(&mut self, _entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (M::Key, M::Value)>,
    {
        Err(Failure::MutationRejected)
    }
}
