use alloc::vec::Vec;
use core::cmp::Ordering;

use rand::Rng;

use crate::collection::Collection;
use crate::collection::Sequence;
use crate::collection::SubListMut;
use crate::error::Failure;
use crate::error::Result;

// Positions handed to `at` below always lie inside the sequence.
fn item_at<L: Sequence + ?Sized>(list: &L, index: usize) -> &L::Item {
    match list.at(index) {
        Ok(item) => item,
        Err(_) => unreachable!("index {index} lies within the sequence"),
    }
}

/// Searches a sorted sequence for `key`.
///
/// Returns the index of a matching element, or `-(insertion_point) - 1` if
/// there is none. An empty sequence yields `-1`. Random-access sequences are
/// bisected; others are scanned once from the front.
///
/// # Examples
///
/// ```rust
/// use chain_hash::algorithms::binary_search;
///
/// let list = vec![1, 3, 5, 7];
/// assert_eq!(binary_search(&list, &5), 2);
/// let miss = binary_search(&list, &4);
/// assert_eq!(-(miss + 1), 2);
/// ```
pub fn binary_search<L>(list: &L, key: &L::Item) -> isize
where
    L: Sequence + ?Sized,
    L::Item: Ord,
{
    binary_search_by(list, |element| element.cmp(key))
}

/// Searches a sorted sequence with a comparator that orders each element
/// against the target, like [`slice::binary_search_by`].
///
/// The result follows [`binary_search`].
pub fn binary_search_by<L, F>(list: &L, mut compare: F) -> isize
where
    L: Sequence + ?Sized,
    F: FnMut(&L::Item) -> Ordering,
{
    let len = list.len();
    if len == 0 {
        return -1;
    }

    if !list.is_random_access() {
        for (index, element) in list.iter().enumerate() {
            match compare(element) {
                Ordering::Less => {}
                Ordering::Equal => return index as isize,
                Ordering::Greater => return -(index as isize) - 1,
            }
        }
        return -(len as isize) - 1;
    }

    let mut low = 0isize;
    let mut high = len as isize - 1;
    let mut mid = len as isize;
    let mut last = Ordering::Greater;
    while low <= high {
        mid = (low + high) >> 1;
        last = compare(item_at(list, mid as usize));
        match last {
            Ordering::Less => low = mid + 1,
            Ordering::Equal => return mid,
            Ordering::Greater => high = mid - 1,
        }
    }
    // The target sorts before `mid` if the last comparison was greater.
    if last == Ordering::Greater {
        -mid - 1
    } else {
        -mid - 2
    }
}

/// Sorts a sequence in place; equal elements keep their order.
pub fn sort<L>(list: &mut L) -> Result<()>
where
    L: Sequence + ?Sized,
    L::Item: Ord + Clone,
{
    let mut items = list.to_vec();
    items.sort();
    list.overwrite(items)
}

/// Sorts a sequence in place with a comparator; equal elements keep their
/// order.
pub fn sort_by<L, F>(list: &mut L, compare: F) -> Result<()>
where
    L: Sequence + ?Sized,
    L::Item: Clone,
    F: FnMut(&L::Item, &L::Item) -> Ordering,
{
    let mut items = list.to_vec();
    items.sort_by(compare);
    list.overwrite(items)
}

/// Swaps the elements at `i` and `j`.
pub fn swap<L>(list: &mut L, i: usize, j: usize) -> Result<()>
where
    L: Sequence + ?Sized,
    L::Item: Clone,
{
    let len = list.len();
    for index in [i, j] {
        if index >= len {
            return Err(Failure::IndexOutOfBounds { index, len });
        }
    }
    if i != j {
        let first = item_at(list, i).clone();
        let second = list.replace_at(j, first)?;
        list.replace_at(i, second)?;
    }
    Ok(())
}

/// Reverses the order of the elements.
pub fn reverse<L>(list: &mut L) -> Result<()>
where
    L: Sequence + ?Sized,
    L::Item: Clone,
{
    let len = list.len();
    if len < 2 {
        return Ok(());
    }
    if list.is_random_access() {
        for i in 0..len / 2 {
            swap(list, i, len - 1 - i)?;
        }
        Ok(())
    } else {
        let mut items = list.to_vec();
        items.reverse();
        list.overwrite(items)
    }
}

/// Moves every element `distance` positions towards the end, wrapping
/// around. Negative distances rotate towards the front.
///
/// # Examples
///
/// ```rust
/// use std::collections::LinkedList;
///
/// use chain_hash::algorithms::rotate;
///
/// let mut list = vec![1, 2, 3, 4, 5];
/// rotate(&mut list, 2).unwrap();
/// assert_eq!(list, vec![4, 5, 1, 2, 3]);
///
/// let mut linked = LinkedList::from([1, 2, 3, 4, 5]);
/// rotate(&mut linked, -1).unwrap();
/// assert_eq!(linked, LinkedList::from([2, 3, 4, 5, 1]));
/// ```
pub fn rotate<L>(list: &mut L, distance: isize) -> Result<()>
where
    L: Sequence + ?Sized,
    L::Item: Clone,
{
    let size = list.len();
    if size == 0 {
        return Ok(());
    }
    let distance = distance.rem_euclid(size as isize) as usize;
    if distance == 0 {
        return Ok(());
    }

    if list.is_random_access() {
        // Follow each cycle, carrying the displaced element along.
        let mut carried = item_at(list, 0).clone();
        let mut index = 0;
        let mut start = 0;
        for _ in 0..size {
            index = (index + distance) % size;
            carried = list.replace_at(index, carried)?;
            if index == start {
                start += 1;
                index = start;
                if start < size {
                    carried = item_at(list, start).clone();
                }
            }
        }
        Ok(())
    } else {
        let divide = (size - distance) % size;
        reverse(&mut SubListMut::new(&mut *list, 0..divide)?)?;
        reverse(&mut SubListMut::new(&mut *list, divide..size)?)?;
        reverse(list)
    }
}

/// Shuffles the sequence with `rng` using Fisher-Yates, from the last index
/// down.
pub fn shuffle_with<L, R>(list: &mut L, rng: &mut R) -> Result<()>
where
    L: Sequence + ?Sized,
    L::Item: Clone,
    R: Rng + ?Sized,
{
    let len = list.len();
    if list.is_random_access() {
        for i in (1..len).rev() {
            let j = rng.random_range(0..=i);
            swap(list, i, j)?;
        }
        Ok(())
    } else {
        let mut items = list.to_vec();
        for i in (1..len).rev() {
            let j = rng.random_range(0..=i);
            items.swap(i, j);
        }
        list.overwrite(items)
    }
}

/// Shuffles the sequence with the thread-local generator.
#[cfg(feature = "std")]
pub fn shuffle<L>(list: &mut L) -> Result<()>
where
    L: Sequence + ?Sized,
    L::Item: Clone,
{
    shuffle_with(list, &mut rand::rng())
}

/// Returns the start of the first occurrence of `needle` in `list`, or `-1`.
/// An empty needle matches at `0`.
///
/// # Examples
///
/// ```rust
/// use chain_hash::algorithms::index_of_sub_list;
///
/// assert_eq!(index_of_sub_list(&vec![1, 2, 3, 4], &vec![3, 4]), 2);
/// assert_eq!(index_of_sub_list(&vec![1, 2], &vec![]), 0);
/// assert_eq!(index_of_sub_list(&vec![1, 2], &vec![9]), -1);
/// ```
pub fn index_of_sub_list<L, N>(list: &L, needle: &N) -> isize
where
    L: Sequence + ?Sized,
    N: Sequence<Item = L::Item> + ?Sized,
{
    let size = list.len();
    let needle_len = needle.len();
    if needle_len > size {
        return -1;
    }
    if needle_len == 0 {
        return 0;
    }

    let Some(mut index) = list.index_of(item_at(needle, 0)) else {
        return -1;
    };
    while size - index >= needle_len {
        if list.iter().skip(index).take(needle_len).eq(needle.iter()) {
            return index as isize;
        }
        index += 1;
    }
    -1
}

/// Returns the start of the last occurrence of `needle` in `list`, or `-1`.
/// An empty needle matches at `list.len()`.
pub fn last_index_of_sub_list<L, N>(list: &L, needle: &N) -> isize
where
    L: Sequence + ?Sized,
    N: Sequence<Item = L::Item> + ?Sized,
{
    let size = list.len();
    let needle_len = needle.len();
    if needle_len > size {
        return -1;
    }
    if needle_len == 0 {
        return size as isize;
    }

    let Some(mut end) = list.last_index_of(item_at(needle, needle_len - 1)) else {
        return -1;
    };
    while end + 1 >= needle_len {
        let start = end + 1 - needle_len;
        if list.iter().skip(start).take(needle_len).eq(needle.iter()) {
            return start as isize;
        }
        if end == 0 {
            break;
        }
        end -= 1;
    }
    -1
}

/// Sets every element to a clone of `item`.
pub fn fill<L>(list: &mut L, item: L::Item) -> Result<()>
where
    L: Sequence + ?Sized,
    L::Item: Clone,
{
    let len = list.len();
    list.overwrite(core::iter::repeat_n(item, len))
}

/// Copies `source` over the front of `dest`.
///
/// Fails with `IndexOutOfBounds` if `source` is longer than `dest`.
pub fn copy<D, S>(dest: &mut D, source: &S) -> Result<()>
where
    D: Sequence + ?Sized,
    S: Collection<Item = D::Item> + ?Sized,
    D::Item: Clone,
{
    if source.len() > dest.len() {
        return Err(Failure::IndexOutOfBounds {
            index: source.len(),
            len: dest.len(),
        });
    }
    dest.overwrite(source.iter().cloned())
}

/// Replaces every element equal to `old` with a clone of `new`. Returns
/// `true` if anything was replaced.
pub fn replace_all<L>(list: &mut L, old: &L::Item, new: &L::Item) -> Result<bool>
where
    L: Sequence + ?Sized,
    L::Item: Clone,
{
    let positions = list
        .iter()
        .enumerate()
        .filter(|(_, item)| *item == old)
        .map(|(index, _)| index)
        .collect::<Vec<_>>();
    for &index in &positions {
        list.replace_at(index, new.clone())?;
    }
    Ok(!positions.is_empty())
}

/// Returns the smallest element; the first of several equal ones.
pub fn min<C>(collection: &C) -> Result<&C::Item>
where
    C: Collection + ?Sized,
    C::Item: Ord,
{
    collection.iter().min().ok_or(Failure::NoSuchElement)
}

/// Returns the largest element; the last of several equal ones.
pub fn max<C>(collection: &C) -> Result<&C::Item>
where
    C: Collection + ?Sized,
    C::Item: Ord,
{
    collection.iter().max().ok_or(Failure::NoSuchElement)
}

/// Returns the smallest element according to `compare`.
pub fn min_by<C, F>(collection: &C, mut compare: F) -> Result<&C::Item>
where
    C: Collection + ?Sized,
    F: FnMut(&C::Item, &C::Item) -> Ordering,
{
    collection
        .iter()
        .min_by(|a, b| compare(a, b))
        .ok_or(Failure::NoSuchElement)
}

/// Returns the largest element according to `compare`.
pub fn max_by<C, F>(collection: &C, mut compare: F) -> Result<&C::Item>
where
    C: Collection + ?Sized,
    F: FnMut(&C::Item, &C::Item) -> Ordering,
{
    collection
        .iter()
        .max_by(|a, b| compare(a, b))
        .ok_or(Failure::NoSuchElement)
}

/// Counts the elements equal to `item`.
pub fn frequency<C>(collection: &C, item: &C::Item) -> usize
where
    C: Collection + ?Sized,
{
    collection.iter().filter(|candidate| *candidate == item).count()
}

/// Returns `true` if the collections have no element in common.
pub fn disjoint<A, B>(a: &A, b: &B) -> bool
where
    A: Collection + ?Sized,
    B: Collection<Item = A::Item> + ?Sized,
{
    // Check the smaller side against the larger one.
    if a.len() <= b.len() {
        !a.iter().any(|item| b.contains(item))
    } else {
        !b.iter().any(|item| a.contains(item))
    }
}

/// Adds every item to `collection`, returning `true` if it changed.
pub fn add_all<C, I>(collection: &mut C, items: I) -> Result<bool>
where
    C: Collection + ?Sized,
    I: IntoIterator<Item = C::Item>,
{
    collection.add_all(items)
}
