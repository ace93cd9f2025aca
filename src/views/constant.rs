use core::iter::Empty;
use core::iter::Once;
use core::iter::RepeatN;
use core::marker::PhantomData;

use crate::collection::Associative;
use crate::collection::Collection;
use crate::collection::Container;
use crate::collection::Sequence;
use crate::error::Failure;
use crate::error::Result;
use crate::error::check_index;

// Every constant container refuses the same set of writes.
macro_rules! reject_collection_writes {
    ($item:ty) => {
        fn add(&mut self, _item: $item) -> Result<bool> {
            Err(Failure::MutationRejected)
        }

        fn remove_item(&mut self, _item: &$item) -> Result<bool> {
            Err(Failure::MutationRejected)
        }

        fn clear(&mut self) -> Result<()> {
            Err(Failure::MutationRejected)
        }

        fn add_all<I>(&mut self, _items: I) -> Result<bool>
        where
            I: IntoIterator<Item = $item>,
        {
            Err(Failure::MutationRejected)
        }
    };
}

macro_rules! reject_sequence_writes {
    ($item:ty) => {
        fn replace_at(&mut self, _index: usize, _item: $item) -> Result<$item> {
            Err(Failure::MutationRejected)
        }

        fn insert_at(&mut self, _index: usize, _item: $item) -> Result<()> {
            Err(Failure::MutationRejected)
        }

        fn remove_at(&mut self, _index: usize) -> Result<$item> {
            Err(Failure::MutationRejected)
        }

        fn overwrite<I>(&mut self, _items: I) -> Result<()>
        where
            I: IntoIterator<Item = $item>,
        {
            Err(Failure::MutationRejected)
        }

        fn overwrite_from<I>(&mut self, _offset: usize, _items: I) -> Result<()>
        where
            I: IntoIterator<Item = $item>,
        {
            Err(Failure::MutationRejected)
        }
    };
}

macro_rules! reject_map_writes {
    ($key:ty, $value:ty) => {
        fn put(&mut self, _key: $key, _value: $value) -> Result<Option<$value>> {
            Err(Failure::MutationRejected)
        }

        fn remove_key(&mut self, _key: &$key) -> Result<Option<$value>> {
            Err(Failure::MutationRejected)
        }

        fn clear(&mut self) -> Result<()> {
            Err(Failure::MutationRejected)
        }

        fn put_all<I>(&mut self, _entries: I) -> Result<()>
        where
            I: IntoIterator<Item = ($key, $value)>,
        {
            Err(Failure::MutationRejected)
        }
    };
}

/// A list with no elements.
pub struct EmptyCollection<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> EmptyCollection<T> {
    /// Creates the empty list.
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for EmptyCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for EmptyCollection<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EmptyCollection<T> {}

impl<T> core::fmt::Debug for EmptyCollection<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("[]")
    }
}

impl<T> Container for EmptyCollection<T> {
    fn len(&self) -> usize {
        0
    }
}

impl<T: PartialEq> Collection for EmptyCollection<T> {
    type Item = T;
    type Iter<'a>
        = Empty<&'a T>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        core::iter::empty()
    }

    fn contains(&self, _item: &T) -> bool {
        false
    }

    reject_collection_writes!(T);
}

impl<T: PartialEq> Sequence for EmptyCollection<T> {
    fn at(&self, index: usize) -> Result<&T> {
        Err(Failure::IndexOutOfBounds { index, len: 0 })
    }

    fn is_random_access(&self) -> bool {
        true
    }

    reject_sequence_writes!(T);
}

/// A map with no mappings.
pub struct EmptyMap<K, V> {
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V> EmptyMap<K, V> {
    /// Creates the empty map.
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<K, V> Default for EmptyMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for EmptyMap<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for EmptyMap<K, V> {}

impl<K, V> core::fmt::Debug for EmptyMap<K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("{}")
    }
}

impl<K, V> Container for EmptyMap<K, V> {
    fn len(&self) -> usize {
        0
    }
}

impl<K: PartialEq, V: PartialEq> Associative for EmptyMap<K, V> {
    type Entries<'a>
        = Empty<(&'a K, &'a V)>
    where
        Self: 'a;
    type Key = K;
    type Value = V;

    fn get(&self, _key: &K) -> Option<&V> {
        None
    }

    fn entries(&self) -> Self::Entries<'_> {
        core::iter::empty()
    }

    reject_map_writes!(K, V);
}

/// A list holding exactly one element.
///
/// The element may be "null" when `T` is an `Option`; lookups compare with
/// `==`, so `None` finds `None`.
///
/// # Examples
///
/// ```rust
/// use chain_hash::Failure;
/// use chain_hash::collection::Collection;
/// use chain_hash::collection::Sequence;
/// use chain_hash::views::constant::Singleton;
///
/// let mut one = Singleton::new(None::<i32>);
/// assert!(one.contains(&None));
/// assert_eq!(one.at(0), Ok(&None));
/// assert_eq!(one.add(Some(1)), Err(Failure::MutationRejected));
/// ```
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Singleton<T> {
    item: T,
}

impl<T> Singleton<T> {
    /// Creates a list holding `item`.
    pub const fn new(item: T) -> Self {
        Self { item }
    }

    /// Returns the element.
    pub fn get(&self) -> &T {
        &self.item
    }
}

impl<T> Container for Singleton<T> {
    fn len(&self) -> usize {
        1
    }
}

impl<T: PartialEq> Collection for Singleton<T> {
    type Item = T;
    type Iter<'a>
        = Once<&'a T>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        core::iter::once(&self.item)
    }

    fn contains(&self, item: &T) -> bool {
        self.item == *item
    }

    reject_collection_writes!(T);
}

impl<T: PartialEq> Sequence for Singleton<T> {
    fn at(&self, index: usize) -> Result<&T> {
        check_index(index, 1)?;
        Ok(&self.item)
    }

    fn is_random_access(&self) -> bool {
        true
    }

    reject_sequence_writes!(T);
}

/// A map holding exactly one mapping.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct SingletonMap<K, V> {
    key: K,
    value: V,
}

impl<K, V> SingletonMap<K, V> {
    /// Creates a map holding `key` mapped to `value`.
    pub const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

impl<K, V> Container for SingletonMap<K, V> {
    fn len(&self) -> usize {
        1
    }
}

impl<K: PartialEq, V: PartialEq> Associative for SingletonMap<K, V> {
    type Entries<'a>
        = Once<(&'a K, &'a V)>
    where
        Self: 'a;
    type Key = K;
    type Value = V;

    fn get(&self, key: &K) -> Option<&V> {
        (self.key == *key).then_some(&self.value)
    }

    fn contains_value(&self, value: &V) -> bool {
        self.value == *value
    }

    fn entries(&self) -> Self::Entries<'_> {
        core::iter::once((&self.key, &self.value))
    }

    reject_map_writes!(K, V);
}

/// A list of `n` copies of one element, stored once.
///
/// # Examples
///
/// ```rust
/// use chain_hash::collection::Sequence;
/// use chain_hash::views::constant::Copies;
///
/// let dashes = Copies::new(3, '-');
/// assert_eq!(dashes.to_vec(), vec!['-', '-', '-']);
/// assert!(dashes.at(3).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Copies<T> {
    len: usize,
    item: T,
}

impl<T> Copies<T> {
    /// Creates a list of `len` copies of `item`.
    pub const fn new(len: usize, item: T) -> Self {
        Self { len, item }
    }
}

impl<T> Container for Copies<T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<T: PartialEq> Collection for Copies<T> {
    type Item = T;
    type Iter<'a>
        = RepeatN<&'a T>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        core::iter::repeat_n(&self.item, self.len)
    }

    fn contains(&self, item: &T) -> bool {
        self.len > 0 && self.item == *item
    }

    reject_collection_writes!(T);
}

impl<T: PartialEq> Sequence for Copies<T> {
    fn at(&self, index: usize) -> Result<&T> {
        check_index(index, self.len)?;
        Ok(&self.item)
    }

    fn is_random_access(&self) -> bool {
        true
    }

    fn index_of(&self, item: &T) -> Option<usize> {
        self.contains(item).then_some(0)
    }

    fn last_index_of(&self, item: &T) -> Option<usize> {
        self.contains(item).then(|| self.len - 1)
    }

    reject_sequence_writes!(T);
}
