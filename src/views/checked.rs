use alloc::vec::Vec;

use crate::collection::Associative;
use crate::collection::Collection;
use crate::collection::Container;
use crate::collection::Sequence;
use crate::error::Failure;
use crate::error::Result;
use crate::value::TypeToken;
use crate::value::Typed;

fn check<T: Typed + ?Sized>(item: &T, expected: TypeToken) -> Result<()> {
    match item.runtime_type() {
        Some(found) if found == expected => Ok(()),
        Some(found) => Err(Failure::TypeMismatch {
            expected: expected.name(),
            found: found.name(),
        }),
        None => Err(Failure::TypeMismatch {
            expected: expected.name(),
            found: "null",
        }),
    }
}

// Validates the whole batch before anything is forwarded.
fn check_all<T: Typed>(items: impl IntoIterator<Item = T>, expected: TypeToken) -> Result<Vec<T>> {
    let items = items.into_iter().collect::<Vec<_>>();
    for item in &items {
        check(item, expected)?;
    }
    Ok(items)
}

/// A [`Collection`] view that only admits items of one runtime type.
///
/// # Examples
///
/// ```rust
/// use chain_hash::Failure;
/// use chain_hash::TypeToken;
/// use chain_hash::Value;
/// use chain_hash::collection::Collection;
/// use chain_hash::collection::Container;
/// use chain_hash::views::checked::CheckedCollection;
///
/// let mut list: Vec<Value> = Vec::new();
/// let mut view = CheckedCollection::new(&mut list, TypeToken::of::<i32>());
///
/// let batch = [Value::from(1), Value::from(2), Value::from("x")];
/// assert!(matches!(view.add_all(batch), Err(Failure::TypeMismatch { .. })));
/// assert!(view.is_empty());
///
/// assert_eq!(view.add(Value::from(3)), Ok(true));
/// assert_eq!(list.len(), 1);
/// ```
pub struct CheckedCollection<'a, C: ?Sized> {
    inner: &'a mut C,
    token: TypeToken,
}

impl<'a, C: ?Sized> CheckedCollection<'a, C> {
    /// Wraps `inner`, admitting only items of type `token`.
    pub fn new(inner: &'a mut C, token: TypeToken) -> Self {
        Self { inner, token }
    }

    /// Returns the admitted element type.
    pub fn element_type(&self) -> TypeToken {
        self.token
    }
}

impl<C: Container + ?Sized> Container for CheckedCollection<'_, C> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<C> Collection for CheckedCollection<'_, C>
where
    C: Collection + ?Sized,
    C::Item: Typed,
{
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

    fn add(&mut self, item: C::Item) -> Result<bool> {
        check(&item, self.token)?;
        self.inner.add(item)
    }

    fn remove_item(&mut self, item: &C::Item) -> Result<bool> {
        self.inner.remove_item(item)
    }

    fn clear(&mut self) -> Result<()> {
        self.inner.clear()
    }

    fn add_all<I>(&mut self, items: I) -> Result<bool>
    where
        I: IntoIterator<Item = C::Item>,
    {
        let items = check_all(items, self.token)?;
        self.inner.add_all(items)
    }
}

/// A [`Sequence`] view that only admits items of one runtime type.
pub struct CheckedList<'a, L: ?Sized> {
    inner: &'a mut L,
    token: TypeToken,
}

impl<'a, L: ?Sized> CheckedList<'a, L> {
    /// Wraps `inner`, admitting only items of type `token`.
    pub fn new(inner: &'a mut L, token: TypeToken) -> Self {
        Self { inner, token }
    }

    /// Returns the admitted element type.
    pub fn element_type(&self) -> TypeToken {
        self.token
    }
}

impl<L: Container + ?Sized> Container for CheckedList<'_, L> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<L> Collection for CheckedList<'_, L>
where
    L: Sequence + ?Sized,
    L::Item: Typed,
{
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

    fn add(&mut self, item: L::Item) -> Result<bool> {
        check(&item, self.token)?;
        self.inner.add(item)
    }

    fn remove_item(&mut self, item: &L::Item) -> Result<bool> {
        self.inner.remove_item(item)
    }

    fn clear(&mut self) -> Result<()> {
        self.inner.clear()
    }

    fn add_all<I>(&mut self, items: I) -> Result<bool>
    where
        I: IntoIterator<Item = L::Item>,
    {
        let items = check_all(items, self.token)?;
        self.inner.add_all(items)
    }
}

impl<L> Sequence for CheckedList<'_, L>
where
    L: Sequence + ?Sized,
    L::Item: Typed,
{
    fn at(&self, index: usize) -> Result<&L::Item> {
        self.inner.at(index)
    }

    fn replace_at(&mut self, index: usize, item: L::Item) -> Result<L::Item> {
        check(&item, self.token)?;
        self.inner.replace_at(index, item)
    }

    fn insert_at(&mut self, index: usize, item: L::Item) -> Result<()> {
        check(&item, self.token)?;
        self.inner.insert_at(index, item)
    }

    fn remove_at(&mut self, index: usize) -> Result<L::Item> {
        self.inner.remove_at(index)
    }

    fn is_random_access(&self) -> bool {
        self.inner.is_random_access()
    }

    fn overwrite<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = L::Item>,
    {
        let items = check_all(items, self.token)?;
        self.inner.overwrite(items)
    }

    fn overwrite_from<I>(&mut self, offset: usize, items: I) -> Result<()>
    where
        I: IntoIterator<Item = L::Item>,
    {
        let items = check_all(items, self.token)?;
        self.inner.overwrite_from(offset, items)
    }
}

/// An [`Associative`] view that only admits keys and values of one runtime
/// type each.
pub struct CheckedMap<'a, M: ?Sized> {
    inner: &'a mut M,
    key_token: TypeToken,
    value_token: TypeToken,
}

impl<'a, M: ?Sized> CheckedMap<'a, M> {
    /// Wraps `inner`, admitting only `key_token` keys and `value_token`
    /// values.
    pub fn new(inner: &'a mut M, key_token: TypeToken, value_token: TypeToken) -> Self {
        Self {
            inner,
            key_token,
            value_token,
        }
    }

    /// Returns the admitted key type.
    pub fn key_type(&self) -> TypeToken {
        self.key_token
    }

    /// Returns the admitted value type.
    pub fn value_type(&self) -> TypeToken {
        self.value_token
    }
}

impl<M: Container + ?Sized> Container for CheckedMap<'_, M> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<M> Associative for CheckedMap<'_, M>
where
    M: Associative + ?Sized,
    M::Key: Typed,
    M::Value: Typed,
{
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

    fn put(&mut self, key: M::Key, value: M::Value) -> Result<Option<M::Value>> {
        check(&key, self.key_token)?;
        check(&value, self.value_token)?;
        self.inner.put(key, value)
    }

    fn remove_key(&mut self, key: &M::Key) -> Result<Option<M::Value>> {
        self.inner.remove_key(key)
    }

    fn clear(&mut self) -> Result<()> {
        self.inner.clear()
    }

    fn entries(&self) -> Self::Entries<'_> {
        self.inner.entries()
    }

    fn put_all<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (M::Key, M::Value)>,
    {
        let entries = entries.into_iter().collect::<Vec<_>>();
        for (key, value) in &entries {
            check(key, self.key_token)?;
            check(value, self.value_token)?;
        }
        self.inner.put_all(entries)
    }
}
