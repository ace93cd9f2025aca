use alloc::collections::LinkedList;
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::iter::Skip;
use core::iter::Take;
use core::mem;
use core::ops::Range;

use crate::error::Failure;
use crate::error::Result;
use crate::error::check_index;

/// Anything with a size.
pub trait Container {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An iterable group of elements that may support insertion and removal.
///
/// Mutating methods return `Result` because views may refuse them: read-only
/// and constant containers fail with [`Failure::MutationRejected`], checked
/// views with [`Failure::TypeMismatch`].
pub trait Collection: Container {
    /// The element type.
    type Item: PartialEq;

    /// Borrowing iterator over the elements.
    type Iter<'a>: Iterator<Item = &'a Self::Item>
    where
        Self: 'a;

    /// Iterates over the elements.
    fn iter(&self) -> Self::Iter<'_>;

    /// Returns `true` if an element equal to `item` is present.
    fn contains(&self, item: &Self::Item) -> bool {
        self.iter().any(|candidate| candidate == item)
    }

    /// Adds `item`, returning `true` if the collection changed.
    fn add(&mut self, item: Self::Item) -> Result<bool>;

    /// Removes one element equal to `item`, returning `true` if one was found.
    fn remove_item(&mut self, item: &Self::Item) -> Result<bool>;

    /// Removes every element.
    fn clear(&mut self) -> Result<()>;

    /// Adds every item in order, returning `true` if the collection changed.
    fn add_all<I>(&mut self, items: I) -> Result<bool>
    where
        I: IntoIterator<Item = Self::Item>,
    {
        let mut changed = false;
        for item in items {
            changed |= self.add(item)?;
        }
        Ok(changed)
    }

    /// Returns `true` if every item is present.
    fn contains_all<'i, I>(&self, items: I) -> bool
    where
        I: IntoIterator<Item = &'i Self::Item>,
        Self::Item: 'i,
    {
        items.into_iter().all(|item| self.contains(item))
    }
}

/// An ordered collection with positional access.
pub trait Sequence: Collection {
    /// Returns the element at `index`.
    fn at(&self, index: usize) -> Result<&Self::Item>;

    /// Replaces the element at `index`, returning the previous one.
    fn replace_at(&mut self, index: usize, item: Self::Item) -> Result<Self::Item>;

    /// Inserts `item` before `index`; `index == len` appends.
    fn insert_at(&mut self, index: usize, item: Self::Item) -> Result<()>;

    /// Removes and returns the element at `index`.
    fn remove_at(&mut self, index: usize) -> Result<Self::Item>;

    /// Returns `true` if [`at`](Sequence::at) runs in constant time.
    fn is_random_access(&self) -> bool;

    /// Writes `items` over the elements front to back, stopping at whichever
    /// runs out first.
    fn overwrite<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = Self::Item>,
    {
        self.overwrite_from(0, items)
    }

    /// Like [`overwrite`](Sequence::overwrite), starting at `offset`.
    ///
    /// Sequential containers override this to write in a single pass.
    fn overwrite_from<I>(&mut self, offset: usize, items: I) -> Result<()>
    where
        I: IntoIterator<Item = Self::Item>,
    {
        let len = self.len();
        check_insert_index(offset, len)?;
        for (index, item) in (offset..len).zip(items) {
            self.replace_at(index, item)?;
        }
        Ok(())
    }

    /// Returns the index of the first element equal to `item`.
    fn index_of(&self, item: &Self::Item) -> Option<usize> {
        self.iter().position(|candidate| candidate == item)
    }

    /// Returns the index of the last element equal to `item`.
    fn last_index_of(&self, item: &Self::Item) -> Option<usize> {
        let mut found = None;
        for (index, candidate) in self.iter().enumerate() {
            if candidate == item {
                found = Some(index);
            }
        }
        found
    }

    /// Copies the elements into a `Vec`.
    fn to_vec(&self) -> Vec<Self::Item>
    where
        Self::Item: Clone,
    {
        self.iter().cloned().collect()
    }
}

/// A key to value mapping.
pub trait Associative: Container {
    /// The key type.
    type Key: PartialEq;

    /// The value type.
    type Value: PartialEq;

    /// Borrowing iterator over the mappings.
    type Entries<'a>: Iterator<Item = (&'a Self::Key, &'a Self::Value)>
    where
        Self: 'a;

    /// Returns the value mapped to `key`.
    fn get(&self, key: &Self::Key) -> Option<&Self::Value>;

    /// Returns `true` if `key` is mapped.
    fn contains_key(&self, key: &Self::Key) -> bool {
        self.get(key).is_some()
    }

    /// Returns `true` if some key maps to `value`.
    fn contains_value(&self, value: &Self::Value) -> bool {
        self.entries().any(|(_, candidate)| candidate == value)
    }

    /// Maps `key` to `value`, returning the previous value.
    fn put(&mut self, key: Self::Key, value: Self::Value) -> Result<Option<Self::Value>>;

    /// Removes the mapping for `key`, returning its value.
    fn remove_key(&mut self, key: &Self::Key) -> Result<Option<Self::Value>>;

    /// Removes every mapping.
    fn clear(&mut self) -> Result<()>;

    /// Iterates over the mappings.
    fn entries(&self) -> Self::Entries<'_>;

    /// Puts every pair in order.
    fn put_all<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (Self::Key, Self::Value)>,
    {
        for (key, value) in entries {
            self.put(key, value)?;
        }
        Ok(())
    }
}

fn check_insert_index(index: usize, len: usize) -> Result<()> {
    if index <= len {
        Ok(())
    } else {
        Err(Failure::IndexOutOfBounds { index, len })
    }
}

fn check_range(range: &Range<usize>, len: usize) -> Result<()> {
    if range.end > len {
        Err(Failure::IndexOutOfBounds {
            index: range.end,
            len,
        })
    } else if range.start > range.end {
        Err(Failure::IndexOutOfBounds {
            index: range.start,
            len: range.end,
        })
    } else {
        Ok(())
    }
}

impl<T> Container for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<T: PartialEq> Collection for Vec<T> {
    type Item = T;
    type Iter<'a>
        = core::slice::Iter<'a, T>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.as_slice().iter()
    }

    fn contains(&self, item: &T) -> bool {
        self.as_slice().contains(item)
    }

    fn add(&mut self, item: T) -> Result<bool> {
        self.push(item);
        Ok(true)
    }

    fn remove_item(&mut self, item: &T) -> Result<bool> {
        match self.as_slice().iter().position(|candidate| candidate == item) {
            Some(index) => {
                Vec::remove(self, index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn clear(&mut self) -> Result<()> {
        Vec::clear(self);
        Ok(())
    }

    fn add_all<I>(&mut self, items: I) -> Result<bool>
    where
        I: IntoIterator<Item = T>,
    {
        let before = Vec::len(self);
        self.extend(items);
        Ok(Vec::len(self) != before)
    }
}

impl<T: PartialEq> Sequence for Vec<T> {
    fn at(&self, index: usize) -> Result<&T> {
        self.as_slice().get(index).ok_or(Failure::IndexOutOfBounds {
            index,
            len: Vec::len(self),
        })
    }

    fn replace_at(&mut self, index: usize, item: T) -> Result<T> {
        check_index(index, Vec::len(self))?;
        Ok(mem::replace(&mut self[index], item))
    }

    fn insert_at(&mut self, index: usize, item: T) -> Result<()> {
        check_insert_index(index, Vec::len(self))?;
        Vec::insert(self, index, item);
        Ok(())
    }

    fn remove_at(&mut self, index: usize) -> Result<T> {
        check_index(index, Vec::len(self))?;
        Ok(Vec::remove(self, index))
    }

    fn is_random_access(&self) -> bool {
        true
    }

    fn overwrite<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        self.overwrite_from(0, items)
    }

    fn overwrite_from<I>(&mut self, offset: usize, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        check_insert_index(offset, self.len())?;
        for (slot, item) in self.as_mut_slice()[offset..].iter_mut().zip(items) {
            *slot = item;
        }
        Ok(())
    }
}

impl<T> Container for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

impl<T: PartialEq> Collection for VecDeque<T> {
    type Item = T;
    type Iter<'a>
        = alloc::collections::vec_deque::Iter<'a, T>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        VecDeque::iter(self)
    }

    fn contains(&self, item: &T) -> bool {
        VecDeque::contains(self, item)
    }

    fn add(&mut self, item: T) -> Result<bool> {
        self.push_back(item);
        Ok(true)
    }

    fn remove_item(&mut self, item: &T) -> Result<bool> {
        match VecDeque::iter(self).position(|candidate| candidate == item) {
            Some(index) => Ok(VecDeque::remove(self, index).is_some()),
            None => Ok(false),
        }
    }

    fn clear(&mut self) -> Result<()> {
        VecDeque::clear(self);
        Ok(())
    }
}

impl<T: PartialEq> Sequence for VecDeque<T> {
    fn at(&self, index: usize) -> Result<&T> {
        VecDeque::get(self, index).ok_or(Failure::IndexOutOfBounds {
            index,
            len: VecDeque::len(self),
        })
    }

    fn replace_at(&mut self, index: usize, item: T) -> Result<T> {
        let len = VecDeque::len(self);
        match VecDeque::get_mut(self, index) {
            Some(slot) => Ok(mem::replace(slot, item)),
            None => Err(Failure::IndexOutOfBounds { index, len }),
        }
    }

    fn insert_at(&mut self, index: usize, item: T) -> Result<()> {
        check_insert_index(index, VecDeque::len(self))?;
        VecDeque::insert(self, index, item);
        Ok(())
    }

    fn remove_at(&mut self, index: usize) -> Result<T> {
        let len = VecDeque::len(self);
        VecDeque::remove(self, index).ok_or(Failure::IndexOutOfBounds { index, len })
    }

    fn is_random_access(&self) -> bool {
        true
    }
}

impl<T> Container for LinkedList<T> {
    fn len(&self) -> usize {
        LinkedList::len(self)
    }
}

impl<T: PartialEq> Collection for LinkedList<T> {
    type Item = T;
    type Iter<'a>
        = alloc::collections::linked_list::Iter<'a, T>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        LinkedList::iter(self)
    }

    fn contains(&self, item: &T) -> bool {
        LinkedList::contains(self, item)
    }

    fn add(&mut self, item: T) -> Result<bool> {
        self.push_back(item);
        Ok(true)
    }

    fn remove_item(&mut self, item: &T) -> Result<bool> {
        match LinkedList::iter(self).position(|candidate| candidate == item) {
            Some(index) => self.remove_at(index).map(|_| true),
            None => Ok(false),
        }
    }

    fn clear(&mut self) -> Result<()> {
        LinkedList::clear(self);
        Ok(())
    }
}

impl<T: PartialEq> Sequence for LinkedList<T> {
    fn at(&self, index: usize) -> Result<&T> {
        LinkedList::iter(self)
            .nth(index)
            .ok_or(Failure::IndexOutOfBounds {
                index,
                len: LinkedList::len(self),
            })
    }

    fn replace_at(&mut self, index: usize, item: T) -> Result<T> {
        let len = LinkedList::len(self);
        match self.iter_mut().nth(index) {
            Some(slot) => Ok(mem::replace(slot, item)),
            None => Err(Failure::IndexOutOfBounds { index, len }),
        }
    }

    fn insert_at(&mut self, index: usize, item: T) -> Result<()> {
        check_insert_index(index, LinkedList::len(self))?;
        let mut tail = self.split_off(index);
        self.push_back(item);
        self.append(&mut tail);
        Ok(())
    }

    fn remove_at(&mut self, index: usize) -> Result<T> {
        check_index(index, LinkedList::len(self))?;
        let mut tail = self.split_off(index);
        let removed = tail.pop_front();
        self.append(&mut tail);
        removed.ok_or(Failure::IndexOutOfBounds {
            index,
            len: LinkedList::len(self),
        })
    }

    fn is_random_access(&self) -> bool {
        false
    }

    fn overwrite<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        self.overwrite_from(0, items)
    }

    fn overwrite_from<I>(&mut self, offset: usize, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        check_insert_index(offset, self.len())?;
        for (slot, item) in self.iter_mut().skip(offset).zip(items) {
            *slot = item;
        }
        Ok(())
    }
}

/// A shared window onto `list[offset..offset + len]`.
///
/// The window cannot mutate its list; every write fails with
/// [`Failure::MutationRejected`]. Windows nest without copying.
pub struct SubList<'a, L: ?Sized> {
    list: &'a L,
    offset: usize,
    len: usize,
}

impl<'a, L> SubList<'a, L>
where
    L: Sequence + ?Sized,
{
    /// Creates a window over `range`, which must lie within the list.
    pub fn new(list: &'a L, range: Range<usize>) -> Result<Self> {
        check_range(&range, list.len())?;
        Ok(Self {
            list,
            offset: range.start,
            len: range.end - range.start,
        })
    }

    /// Narrows the window to `range`, relative to this window.
    pub fn sub_list(&self, range: Range<usize>) -> Result<SubList<'a, L>> {
        check_range(&range, self.len)?;
        Ok(SubList {
            list: self.list,
            offset: self.offset + range.start,
            len: range.end - range.start,
        })
    }
}

impl<L> Container for SubList<'_, L>
where
    L: Sequence + ?Sized,
{
    fn len(&self) -> usize {
        self.len
    }
}

impl<'a, L> Collection for SubList<'a, L>
where
    L: Sequence + ?Sized,
{
    type Item = L::Item;
    type Iter<'b>
        = Take<Skip<L::Iter<'b>>>
    where
        Self: 'b;

    fn iter(&self) -> Self::Iter<'_> {
        Collection::iter(&*self.list)
            .skip(self.offset)
            .take(self.len)
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

impl<'a, L> Sequence for SubList<'a, L>
where
    L: Sequence + ?Sized,
{
    fn at(&self, index: usize) -> Result<&L::Item> {
        check_index(index, self.len)?;
        self.list.at(self.offset + index)
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
        self.list.is_random_access()
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
}

/// An exclusive window onto `list[offset..offset + len]`.
///
/// Positional writes, insertions and removals go straight through to the
/// backing list and move the window's end accordingly.
pub struct SubListMut<'a, L: ?Sized> {
    list: &'a mut L,
    offset: usize,
    len: usize,
}

impl<'a, L> SubListMut<'a, L>
where
    L: Sequence + ?Sized,
{
    /// Creates a window over `range`, which must lie within the list.
    pub fn new(list: &'a mut L, range: Range<usize>) -> Result<Self> {
        check_range(&range, list.len())?;
        Ok(Self {
            list,
            offset: range.start,
            len: range.end - range.start,
        })
    }
}

impl<L> Container for SubListMut<'_, L>
where
    L: Sequence + ?Sized,
{
    fn len(&self) -> usize {
        self.len
    }
}

impl<'a, L> Collection for SubListMut<'a, L>
where
    L: Sequence + ?Sized,
{
    type Item = L::Item;
    type Iter<'b>
        = Take<Skip<L::Iter<'b>>>
    where
        Self: 'b;

    fn iter(&self) -> Self::Iter<'_> {
        Collection::iter(&*self.list)
            .skip(self.offset)
            .take(self.len)
    }

    fn add(&mut self, item: L::Item) -> Result<bool> {
        self.list.insert_at(self.offset + self.len, item)?;
        self.len += 1;
        Ok(true)
    }

    fn remove_item(&mut self, item: &L::Item) -> Result<bool> {
        match self.index_of(item) {
            Some(index) => self.remove_at(index).map(|_| true),
            None => Ok(false),
        }
    }

    fn clear(&mut self) -> Result<()> {
        while self.len > 0 {
            self.list.remove_at(self.offset)?;
            self.len -= 1;
        }
        Ok(())
    }
}

impl<'a, L> Sequence for SubListMut<'a, L>
where
    L: Sequence + ?Sized,
{
    fn at(&self, index: usize) -> Result<&L::Item> {
        check_index(index, self.len)?;
        self.list.at(self.offset + index)
    }

    fn replace_at(&mut self, index: usize, item: L::Item) -> Result<L::Item> {
        check_index(index, self.len)?;
        self.list.replace_at(self.offset + index, item)
    }

    fn insert_at(&mut self, index: usize, item: L::Item) -> Result<()> {
        check_insert_index(index, self.len)?;
        self.list.insert_at(self.offset + index, item)?;
        self.len += 1;
        Ok(())
    }

    fn remove_at(&mut self, index: usize) -> Result<L::Item> {
        check_index(index, self.len)?;
        let removed = self.list.remove_at(self.offset + index)?;
        self.len -= 1;
        Ok(removed)
    }

    fn is_random_access(&self) -> bool {
        self.list.is_random_access()
    }

    fn overwrite_from<I>(&mut self, offset: usize, items: I) -> Result<()>
    where
        I: IntoIterator<Item = L::Item>,
    {
        check_insert_index(offset, self.len)?;
        let items = items.into_iter().take(self.len - offset);
        self.list.overwrite_from(self.offset + offset, items)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn exercise<S: Sequence<Item = i32>>(seq: &mut S) {
        seq.add_all([1, 2, 3]).unwrap();
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.at(1), Ok(&2));
        assert_eq!(
            seq.at(3),
            Err(Failure::IndexOutOfBounds { index: 3, len: 3 })
        );

        assert_eq!(seq.replace_at(0, 10), Ok(1));
        seq.insert_at(3, 4).unwrap();
        seq.insert_at(0, 0).unwrap();
        assert_eq!(seq.to_vec(), vec![0, 10, 2, 3, 4]);
        assert_eq!(
            seq.insert_at(9, 9),
            Err(Failure::IndexOutOfBounds { index: 9, len: 5 })
        );

        assert_eq!(seq.remove_at(1), Ok(10));
        assert_eq!(seq.remove_item(&3), Ok(true));
        assert_eq!(seq.remove_item(&3), Ok(false));
        assert!(seq.contains(&4));
        assert!(seq.contains_all(&[0, 2]));
        assert_eq!(seq.to_vec(), vec![0, 2, 4]);

        seq.add(2).unwrap();
        assert_eq!(seq.index_of(&2), Some(1));
        assert_eq!(seq.last_index_of(&2), Some(3));
        assert_eq!(seq.index_of(&7), None);

        seq.overwrite([9, 8]).unwrap();
        assert_eq!(seq.to_vec(), vec![9, 8, 4, 2]);

        Collection::clear(seq).unwrap();
        assert!(seq.is_empty());
    }

    #[test]
    fn test_vec_sequence() {
        let mut list = Vec::new();
        exercise(&mut list);
        assert!(list.is_random_access());
    }

    #[test]
    fn test_vec_deque_sequence() {
        let mut list = VecDeque::new();
        exercise(&mut list);
        assert!(list.is_random_access());
    }

    #[test]
    fn test_linked_list_sequence() {
        let mut list = LinkedList::new();
        exercise(&mut list);
        assert!(!list.is_random_access());
    }

    #[test]
    fn test_sub_list_window() {
        let list = vec![0, 1, 2, 3, 4, 5];
        let window = SubList::new(&list, 1..5).unwrap();
        assert_eq!(window.len(), 4);
        assert_eq!(window.to_vec(), vec![1, 2, 3, 4]);
        assert_eq!(window.at(0), Ok(&1));
        assert_eq!(
            window.at(4),
            Err(Failure::IndexOutOfBounds { index: 4, len: 4 })
        );

        let inner = window.sub_list(1..3).unwrap();
        assert_eq!(inner.to_vec(), vec![2, 3]);

        let mut inner = inner;
        assert_eq!(inner.add(7), Err(Failure::MutationRejected));
        assert_eq!(inner.replace_at(0, 7), Err(Failure::MutationRejected));

        assert!(SubList::new(&list, 2..7).is_err());
        #[allow(clippy::reversed_empty_ranges)]
        let reversed = SubList::new(&list, 4..2);
        assert!(reversed.is_err());
    }

    #[test]
    fn test_sub_list_mut_writes_through() {
        let mut list = LinkedList::from([0, 1, 2, 3, 4]);
        {
            let mut window = SubListMut::new(&mut list, 1..4).unwrap();
            window.replace_at(0, 10).unwrap();
            window.add(11).unwrap();
            assert_eq!(window.len(), 4);
            assert_eq!(window.remove_at(1), Ok(2));
            assert_eq!(window.to_vec(), vec![10, 3, 11]);
        }
        assert_eq!(list.into_iter().collect::<Vec<_>>(), vec![0, 10, 3, 11, 4]);

        let mut list = vec![0, 1, 2, 3];
        let mut window = SubListMut::new(&mut list, 1..3).unwrap();
        Collection::clear(&mut window).unwrap();
        assert!(window.is_empty());
        assert_eq!(list, vec![0, 3]);
    }

    // Counts positional writes so a bulk write can be shown to bypass them.
    struct Tally {
        list: LinkedList<i32>,
        replaced: usize,
    }

    impl Container for Tally {
        fn len(&self) -> usize {
            self.list.len()
        }
    }

    impl Collection for Tally {
        type Item = i32;
        type Iter<'a>
            = alloc::collections::linked_list::Iter<'a, i32>
        where
            Self: 'a;

        fn iter(&self) -> Self::Iter<'_> {
            self.list.iter()
        }

        fn add(&mut self, item: i32) -> Result<bool> {
            Collection::add(&mut self.list, item)
        }

        fn remove_item(&mut self, item: &i32) -> Result<bool> {
            self.list.remove_item(item)
        }

        fn clear(&mut self) -> Result<()> {
            Collection::clear(&mut self.list)
        }
    }

    impl Sequence for Tally {
        fn at(&self, index: usize) -> Result<&i32> {
            self.list.at(index)
        }

        fn replace_at(&mut self, index: usize, item: i32) -> Result<i32> {
            self.replaced += 1;
            self.list.replace_at(index, item)
        }

        fn insert_at(&mut self, index: usize, item: i32) -> Result<()> {
            self.list.insert_at(index, item)
        }

        fn remove_at(&mut self, index: usize) -> Result<i32> {
            self.list.remove_at(index)
        }

        fn is_random_access(&self) -> bool {
            false
        }

        fn overwrite_from<I>(&mut self, offset: usize, items: I) -> Result<()>
        where
            I: IntoIterator<Item = i32>,
        {
            self.list.overwrite_from(offset, items)
        }
    }

    #[test]
    fn test_sub_list_mut_overwrite_is_one_pass() {
        let mut tally = Tally {
            list: (0..8).collect(),
            replaced: 0,
        };
        {
            let mut window = SubListMut::new(&mut tally, 2..6).unwrap();
            window.overwrite([20, 30, 40, 50, 60, 70]).unwrap();
            assert_eq!(window.to_vec(), vec![20, 30, 40, 50]);
        }
        assert_eq!(tally.replaced, 0);
        assert_eq!(tally.to_vec(), vec![0, 1, 20, 30, 40, 50, 6, 7]);

        {
            let mut window = SubListMut::new(&mut tally, 1..7).unwrap();
            let mut inner = SubListMut::new(&mut window, 2..5).unwrap();
            inner.overwrite([-1, -2]).unwrap();
        }
        assert_eq!(tally.replaced, 0);
        assert_eq!(tally.to_vec(), vec![0, 1, 20, -1, -2, 50, 6, 7]);
    }

    #[test]
    fn test_overwrite_from_bounds() {
        let mut list = LinkedList::from([0, 1, 2, 3]);
        list.overwrite_from(2, [9, 9, 9]).unwrap();
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![0, 1, 9, 9]);
        assert_eq!(list.overwrite_from(4, [5]), Ok(()));
        assert_eq!(
            list.overwrite_from(5, [5]),
            Err(Failure::IndexOutOfBounds { index: 5, len: 4 })
        );

        let mut deque = VecDeque::from([0, 1, 2]);
        deque.overwrite_from(1, [7]).unwrap();
        assert_eq!(deque, VecDeque::from([0, 7, 2]));

        let mut vec = vec![0, 1, 2, 3, 4];
        let mut window = SubListMut::new(&mut vec, 1..4).unwrap();
        assert_eq!(
            window.overwrite_from(4, [1]),
            Err(Failure::IndexOutOfBounds { index: 4, len: 3 })
        );
        window.overwrite_from(1, [8, 8, 8]).unwrap();
        assert_eq!(vec, vec![0, 1, 8, 8, 4]);

        let list = vec![1, 2, 3];
        let mut window = SubList::new(&list, 0..2).unwrap();
        assert_eq!(window.overwrite_from(0, [5]), Err(Failure::MutationRejected));
    }
}
