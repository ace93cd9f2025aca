use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::mem;
use core::ops::Range;

use crate::error::Failure;
use crate::error::Result;

/// Largest bucket count a store may be configured with.
pub const MAX_CAPACITY: usize = i32::MAX as usize;

/// Load factor used by every container when none is given.
pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;

/// Only the low 31 bits of a hash select a bucket.
const HASH_MASK: u64 = 0x7FFF_FFFF;

/// How the bucket count grows once the population exceeds the threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Growth {
    /// `max(1, capacity * 2)`.
    Double,
    /// `capacity * 2 + 1`, which keeps odd bucket counts odd.
    DoublePlusOne,
}

impl Growth {
    fn next_capacity(self, capacity: usize) -> usize {
        let next = match self {
            Growth::Double => capacity.saturating_mul(2).max(1),
            Growth::DoublePlusOne => capacity.saturating_mul(2).saturating_add(1),
        };
        next.min(MAX_CAPACITY)
    }
}

#[inline]
fn threshold_for(capacity: usize, load_factor: f32) -> usize {
    (capacity as f32 * load_factor) as usize
}

fn empty_buckets<T>(capacity: usize) -> Vec<Link<T>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, || None);
    buckets
}

struct Node<T> {
    hash: u64,
    value: T,
    next: Link<T>,
}

type Link<T> = Option<Box<Node<T>>>;

// Unlinks one node at a time so long chains never recurse through `Box::drop`.
fn drop_chain<T>(mut link: Link<T>) {
    while let Some(mut node) = link {
        link = node.next.take();
    }
}

fn chain_len<T>(mut link: &Link<T>) -> usize {
    let mut len = 0;
    while let Some(node) = link {
        len += 1;
        link = &node.next;
    }
    len
}

fn clone_chain<T: Clone>(mut source: &Link<T>) -> Link<T> {
    let mut head: Link<T> = None;
    let mut tail = &mut head;
    while let Some(node) = source {
        let copy = Box::new(Node {
            hash: node.hash,
            value: node.value.clone(),
            next: None,
        });
        tail = &mut tail.insert(copy).next;
        source = &node.next;
    }
    head
}

#[cfg(any(test, feature = "stats"))]
/// Debug statistics for a bucket store.
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of entries in the store
    pub len: usize,
    /// Number of buckets allocated
    pub buckets: usize,
    /// Number of buckets holding at least one entry
    pub occupied_buckets: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Population that triggers the next growth
    pub threshold: usize,
    /// Configured load factor
    pub load_factor: f32,
    /// Entries per bucket (len / buckets)
    pub fill_ratio: f64,
    /// Structural modification counter
    pub mod_count: u64,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Bucket Store Debug Statistics ===");
        println!(
            "Population: {}/{} (load factor {:.2}, growth at {})",
            self.len, self.buckets, self.load_factor, self.threshold
        );
        println!(
            "Bucket Usage: {}/{} ({:.2}% occupied)",
            self.occupied_buckets,
            self.buckets,
            if self.buckets == 0 {
                0.0
            } else {
                self.occupied_buckets as f64 / self.buckets as f64 * 100.0
            }
        );
        println!(
            "Chains: longest {}, {:.2} entries per bucket",
            self.longest_chain, self.fill_ratio
        );
        println!("Structural modifications: {}", self.mod_count);
    }
}

/// A separately chained hash store.
///
/// `BucketStore<T>` keeps its values in an array of buckets, each the head of
/// a singly linked chain of nodes. Like a raw table it knows nothing about
/// keys: every operation takes the value's 64-bit hash and an equality
/// predicate. The hash is cached on the node so growth can redistribute
/// without rehashing.
///
/// New nodes are pushed at the head of their chain. Capacity only ever grows,
/// and every structural change bumps a modification counter that cursors use
/// to detect interference.
///
/// # Examples
///
/// ```rust
/// use chain_hash::bucket_store::BucketStore;
/// use chain_hash::bucket_store::Entry;
/// use chain_hash::bucket_store::Growth;
///
/// let mut store = BucketStore::with_config(4, 0.75, Growth::Double).unwrap();
/// let hash = 42u64;
/// match store.entry(hash, |&v: &u32| v == 7) {
///     Entry::Vacant(entry) => {
///         entry.insert(7);
///     }
///     Entry::Occupied(_) => unreachable!(),
/// }
/// assert_eq!(store.find(hash, |&v| v == 7), Some(&7));
/// assert_eq!(store.mod_count(), 1);
/// ```
pub struct BucketStore<T> {
    buckets: Vec<Link<T>>,
    len: usize,
    threshold: usize,
    load_factor: f32,
    growth: Growth,
    mod_count: u64,
}

impl<T> BucketStore<T> {
    /// Creates a store with `capacity` buckets (at least one).
    ///
    /// Fails with [`Failure::InvalidCapacity`] when `capacity` exceeds
    /// [`MAX_CAPACITY`] and with [`Failure::InvalidLoadFactor`] when the load
    /// factor is not a positive number.
    pub fn with_config(capacity: usize, load_factor: f32, growth: Growth) -> Result<Self> {
        if capacity > MAX_CAPACITY {
            return Err(Failure::InvalidCapacity {
                requested: capacity,
            });
        }
        if load_factor.is_nan() || load_factor <= 0.0 {
            return Err(Failure::InvalidLoadFactor);
        }

        let capacity = capacity.max(1);
        Ok(Self {
            buckets: empty_buckets(capacity),
            len: 0,
            threshold: threshold_for(capacity, load_factor),
            load_factor,
            growth,
            mod_count: 0,
        })
    }

    /// Returns the number of values in the store.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the store holds no values.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the population above which the store grows.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Returns the configured load factor.
    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }

    /// Returns the growth policy.
    pub fn growth(&self) -> Growth {
        self.growth
    }

    /// Returns the structural modification counter.
    pub fn mod_count(&self) -> u64 {
        self.mod_count
    }

    /// Maps a hash to the bucket it lives in.
    #[inline]
    pub fn bucket_index(&self, hash: u64) -> usize {
        (hash & HASH_MASK) as usize % self.buckets.len()
    }

    /// Returns the lowest and highest occupied bucket indices.
    pub fn occupied_span(&self) -> Option<(usize, usize)> {
        let first = self.buckets.iter().position(Option::is_some)?;
        let last = self.buckets.iter().rposition(Option::is_some)?;
        Some((first, last))
    }

    fn bump(&mut self) {
        self.mod_count = self.mod_count.wrapping_add(1);
    }

    fn position(&self, hash: u64, mut eq: impl FnMut(&T) -> bool) -> Option<(usize, usize)> {
        let bucket = self.bucket_index(hash);
        let mut link = &self.buckets[bucket];
        let mut depth = 0;
        while let Some(node) = link {
            if node.hash == hash && eq(&node.value) {
                return Some((bucket, depth));
            }
            link = &node.next;
            depth += 1;
        }
        None
    }

    fn node(&self, bucket: usize, depth: usize) -> Option<&Node<T>> {
        let mut node = self.buckets.get(bucket)?.as_deref()?;
        for _ in 0..depth {
            node = node.next.as_deref()?;
        }
        Some(node)
    }

    fn node_mut(&mut self, bucket: usize, depth: usize) -> Option<&mut Node<T>> {
        let mut node = self.buckets.get_mut(bucket)?.as_deref_mut()?;
        for _ in 0..depth {
            node = node.next.as_deref_mut()?;
        }
        Some(node)
    }

    fn unlink(&mut self, bucket: usize, depth: usize) -> Option<T> {
        let mut link = self.buckets.get_mut(bucket)?;
        for _ in 0..depth {
            link = &mut link.as_mut()?.next;
        }
        let node = link.take()?;
        let Node { value, next, .. } = *node;
        *link = next;
        self.len -= 1;
        self.bump();
        Some(value)
    }

    fn insert_new(&mut self, hash: u64, value: T) -> &mut T {
        self.len += 1;
        if self.len > self.threshold {
            let mut capacity = self.buckets.len();
            while self.len > threshold_for(capacity, self.load_factor) {
                let next = self.growth.next_capacity(capacity);
                if next == capacity {
                    break;
                }
                capacity = next;
            }
            self.resize(capacity);
        }
        self.bump();

        let index = self.bucket_index(hash);
        let slot = &mut self.buckets[index];
        let next = slot.take();
        &mut slot.insert(Box::new(Node { hash, value, next })).value
    }

    // Redistributes every node by its cached hash. Not structural on its own.
    fn resize(&mut self, capacity: usize) {
        let old = mem::replace(&mut self.buckets, empty_buckets(capacity));
        for mut link in old {
            while let Some(mut node) = link {
                link = node.next.take();
                let index = self.bucket_index(node.hash);
                node.next = self.buckets[index].take();
                self.buckets[index] = Some(node);
            }
        }
        self.threshold = threshold_for(capacity, self.load_factor);
    }

    /// Grows ahead of a bulk insertion that could bring the population to
    /// `total`.
    ///
    /// When `total` exceeds the threshold the store is resized to
    /// `total * 2` buckets in one step. A resize counts as one structural
    /// modification. Returns `true` if the store grew.
    pub fn reserve_total(&mut self, total: usize) -> bool {
        if total <= self.threshold {
            return false;
        }
        let capacity = total.saturating_mul(2).clamp(1, MAX_CAPACITY);
        if capacity <= self.buckets.len() {
            return false;
        }
        self.resize(capacity);
        self.bump();
        true
    }

    /// Finds a value by hash and equality predicate.
    pub fn find(&self, hash: u64, mut eq: impl FnMut(&T) -> bool) -> Option<&T> {
        let mut link = &self.buckets[self.bucket_index(hash)];
        while let Some(node) = link {
            if node.hash == hash && eq(&node.value) {
                return Some(&node.value);
            }
            link = &node.next;
        }
        None
    }

    /// Finds a value mutably by hash and equality predicate.
    pub fn find_mut(&mut self, hash: u64, eq: impl FnMut(&T) -> bool) -> Option<&mut T> {
        let (bucket, depth) = self.position(hash, eq)?;
        self.node_mut(bucket, depth).map(|node| &mut node.value)
    }

    /// Returns the entry for `hash`/`eq`, occupied or vacant.
    pub fn entry(&mut self, hash: u64, eq: impl FnMut(&T) -> bool) -> Entry<'_, T> {
        match self.position(hash, eq) {
            Some((bucket, depth)) => Entry::Occupied(OccupiedEntry {
                store: self,
                bucket,
                depth,
            }),
            None => Entry::Vacant(VacantEntry { store: self, hash }),
        }
    }

    /// Removes and returns the value matching `hash`/`eq`.
    pub fn remove(&mut self, hash: u64, eq: impl FnMut(&T) -> bool) -> Option<T> {
        let (bucket, depth) = self.position(hash, eq)?;
        self.unlink(bucket, depth)
    }

    /// Removes every value. Clearing an empty store is not a structural
    /// modification. Capacity is kept.
    pub fn clear(&mut self) {
        if self.len == 0 {
            return;
        }
        for link in &mut self.buckets {
            drop_chain(link.take());
        }
        self.len = 0;
        self.bump();
    }

    /// Keeps only the values for which `keep` returns `true`, preserving the
    /// order of the survivors within each chain.
    pub fn retain(&mut self, mut keep: impl FnMut(&mut T) -> bool) {
        let mut removed = 0;
        for slot in &mut self.buckets {
            let mut chain = slot.take();
            let mut kept: Link<T> = None;
            let mut tail = &mut kept;
            while let Some(mut node) = chain {
                chain = node.next.take();
                if keep(&mut node.value) {
                    tail = &mut tail.insert(node).next;
                } else {
                    removed += 1;
                }
            }
            *slot = kept;
        }
        if removed > 0 {
            self.len -= removed;
            self.bump();
        }
    }

    /// Iterates over every value, bucket by bucket from index zero.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            buckets: &self.buckets,
            range: 0..self.buckets.len(),
            descending: false,
            node: None,
            remaining: self.len,
        }
    }

    /// Iterates over the buckets `first..=last` from `last` down to `first`.
    ///
    /// The caller asserts that every value lives inside the span; the
    /// iterator's length is the store's population.
    pub fn iter_span(&self, first: usize, last: usize) -> Iter<'_, T> {
        let end = last.saturating_add(1).min(self.buckets.len());
        Iter {
            buckets: &self.buckets,
            range: first.min(end)..end,
            descending: true,
            node: None,
            remaining: self.len,
        }
    }

    /// Iterates mutably over every value.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            buckets: self.buckets.iter_mut(),
            node: None,
            remaining: self.len,
        }
    }

    /// Removes every value, yielding them in iteration order.
    pub fn drain(&mut self) -> Drain<'_, T> {
        let capacity = self.buckets.len();
        let buckets = mem::replace(&mut self.buckets, empty_buckets(capacity));
        let remaining = mem::take(&mut self.len);
        if remaining > 0 {
            self.bump();
        }
        Drain {
            inner: IntoIter {
                buckets: buckets.into_iter(),
                link: None,
                remaining,
            },
            _marker: PhantomData,
        }
    }

    /// Returns one bucket count per chain length: `histogram[n]` is the
    /// number of buckets whose chain holds exactly `n` values.
    #[cfg(any(test, feature = "stats"))]
    pub fn chain_histogram(&self) -> Vec<usize> {
        let mut histogram = Vec::new();
        for link in &self.buckets {
            let len = chain_len(link);
            if histogram.len() <= len {
                histogram.resize(len + 1, 0);
            }
            histogram[len] += 1;
        }
        histogram
    }

    /// Pretty-prints the chain-length histogram using stdout.
    #[cfg(all(any(test, feature = "stats"), feature = "std"))]
    pub fn print_chain_histogram(&self) {
        let histogram = self.chain_histogram();
        let max = histogram.iter().copied().max().unwrap_or(0);
        println!("chain histogram ({} entries):", self.len);
        for (len, &count) in histogram.iter().enumerate() {
            let width = if max == 0 { 0 } else { count * 60 / max };
            println!("{:>3} | {} ({})", len, "#".repeat(width.max(usize::from(count > 0))), count);
        }
    }

    /// Collects statistics about the store's buckets and chains.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        let mut occupied_buckets = 0;
        let mut longest_chain = 0;
        for link in &self.buckets {
            let len = chain_len(link);
            if len > 0 {
                occupied_buckets += 1;
            }
            longest_chain = longest_chain.max(len);
        }

        DebugStats {
            len: self.len,
            buckets: self.buckets.len(),
            occupied_buckets,
            longest_chain,
            threshold: self.threshold,
            load_factor: self.load_factor,
            fill_ratio: self.len as f64 / self.buckets.len() as f64,
            mod_count: self.mod_count,
        }
    }
}

impl<T> Drop for BucketStore<T> {
    fn drop(&mut self) {
        for link in &mut self.buckets {
            drop_chain(link.take());
        }
    }
}

impl<T: Clone> Clone for BucketStore<T> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.iter().map(clone_chain).collect(),
            len: self.len,
            threshold: self.threshold,
            load_factor: self.load_factor,
            growth: self.growth,
            mod_count: 0,
        }
    }
}

impl<T: Debug> Debug for BucketStore<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> IntoIterator for BucketStore<T> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(mut self) -> Self::IntoIter {
        let remaining = mem::take(&mut self.len);
        IntoIter {
            buckets: mem::take(&mut self.buckets).into_iter(),
            link: None,
            remaining,
        }
    }
}

impl<'a, T> IntoIterator for &'a BucketStore<T> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A view into a single position in the store, which may be vacant or
/// occupied.
pub enum Entry<'a, T> {
    /// A value matching the predicate exists.
    Occupied(OccupiedEntry<'a, T>),
    /// No value matches the predicate.
    Vacant(VacantEntry<'a, T>),
}

/// An occupied position in a [`BucketStore`].
pub struct OccupiedEntry<'a, T> {
    store: &'a mut BucketStore<T>,
    bucket: usize,
    depth: usize,
}

impl<'a, T> OccupiedEntry<'a, T> {
    /// Returns the bucket holding this value.
    pub fn bucket(&self) -> usize {
        self.bucket
    }

    /// Returns a reference to the value.
    pub fn get(&self) -> &T {
        match self.store.node(self.bucket, self.depth) {
            Some(node) => &node.value,
            None => unreachable!("occupied entry points at a missing node"),
        }
    }

    /// Returns a mutable reference to the value. Not a structural change.
    pub fn get_mut(&mut self) -> &mut T {
        match self.store.node_mut(self.bucket, self.depth) {
            Some(node) => &mut node.value,
            None => unreachable!("occupied entry points at a missing node"),
        }
    }

    /// Converts the entry into a mutable reference with the store's lifetime.
    pub fn into_mut(self) -> &'a mut T {
        match self.store.node_mut(self.bucket, self.depth) {
            Some(node) => &mut node.value,
            None => unreachable!("occupied entry points at a missing node"),
        }
    }

    /// Unlinks and returns the value.
    pub fn remove(self) -> T {
        match self.store.unlink(self.bucket, self.depth) {
            Some(value) => value,
            None => unreachable!("occupied entry points at a missing node"),
        }
    }
}

/// A vacant position in a [`BucketStore`].
pub struct VacantEntry<'a, T> {
    store: &'a mut BucketStore<T>,
    hash: u64,
}

impl<'a, T> VacantEntry<'a, T> {
    /// Returns the hash the entry was looked up with.
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Inserts `value`, growing the store first when the new population
    /// exceeds the threshold.
    pub fn insert(self, value: T) -> &'a mut T {
        self.store.insert_new(self.hash, value)
    }
}

/// A fail-fast traversal position that does not borrow its store.
///
/// The cursor remembers the modification counter it was created against and
/// refuses to step once the store's counter differs, unless the difference
/// came from the cursor's own [`remove`](RawCursor::remove).
#[derive(Clone, Debug)]
pub struct RawCursor {
    buckets: Range<usize>,
    descending: bool,
    next: Option<(usize, usize)>,
    last: Option<(usize, usize)>,
    expected_mod_count: u64,
}

impl RawCursor {
    /// Creates a cursor visiting every bucket from index zero upwards.
    pub fn new<T>(store: &BucketStore<T>) -> Self {
        Self {
            buckets: 0..store.capacity(),
            descending: false,
            next: None,
            last: None,
            expected_mod_count: store.mod_count,
        }
    }

    /// Creates a cursor visiting buckets `first..=last` from `last` down.
    pub fn descending<T>(store: &BucketStore<T>, first: usize, last: usize) -> Self {
        let end = last.saturating_add(1).min(store.capacity());
        Self {
            buckets: first.min(end)..end,
            descending: true,
            next: None,
            last: None,
            expected_mod_count: store.mod_count,
        }
    }

    /// Creates a cursor that yields nothing.
    pub fn exhausted<T>(store: &BucketStore<T>) -> Self {
        Self {
            buckets: 0..0,
            descending: false,
            next: None,
            last: None,
            expected_mod_count: store.mod_count,
        }
    }

    fn seek<T>(&mut self, store: &BucketStore<T>) -> Option<(usize, usize)> {
        loop {
            if let Some((bucket, depth)) = self.next {
                if store.node(bucket, depth).is_some() {
                    return self.next;
                }
                self.next = None;
            }
            let bucket = if self.descending {
                self.buckets.next_back()?
            } else {
                self.buckets.next()?
            };
            self.next = Some((bucket, 0));
        }
    }

    fn check<T>(&self, store: &BucketStore<T>) -> Result<()> {
        if store.mod_count == self.expected_mod_count {
            Ok(())
        } else {
            Err(Failure::ConcurrentModification)
        }
    }

    /// Returns `true` if another value remains.
    pub fn has_next<T>(&mut self, store: &BucketStore<T>) -> bool {
        self.seek(store).is_some()
    }

    /// Steps to the next value.
    pub fn next<'a, T>(&mut self, store: &'a BucketStore<T>) -> Result<&'a T> {
        self.check(store)?;
        self.next_unchecked(store).ok_or(Failure::NoSuchElement)
    }

    /// Steps to the next value without comparing modification counters.
    ///
    /// Weakly consistent: values moved by a foreign change may be skipped or
    /// seen twice, but the step never fails.
    pub fn next_unchecked<'a, T>(&mut self, store: &'a BucketStore<T>) -> Option<&'a T> {
        let (bucket, depth) = self.seek(store)?;
        let node = store.node(bucket, depth)?;
        self.last = Some((bucket, depth));
        self.next = Some((bucket, depth + 1));
        Some(&node.value)
    }

    /// Returns the value most recently yielded, mutably.
    pub fn current_mut<'a, T>(&self, store: &'a mut BucketStore<T>) -> Result<&'a mut T> {
        self.check(store)?;
        let (bucket, depth) = self.last.ok_or(Failure::IllegalState)?;
        store
            .node_mut(bucket, depth)
            .map(|node| &mut node.value)
            .ok_or(Failure::IllegalState)
    }

    /// Removes the value most recently yielded and keeps the cursor valid.
    pub fn remove<T>(&mut self, store: &mut BucketStore<T>) -> Result<T> {
        self.check(store)?;
        let (bucket, depth) = self.last.take().ok_or(Failure::IllegalState)?;
        let value = store.unlink(bucket, depth).ok_or(Failure::IllegalState)?;
        if self.next == Some((bucket, depth + 1)) {
            self.next = Some((bucket, depth));
        }
        self.expected_mod_count = store.mod_count;
        Ok(value)
    }
}

/// Iterator over the values of a [`BucketStore`].
pub struct Iter<'a, T> {
    buckets: &'a [Link<T>],
    range: Range<usize>,
    descending: bool,
    node: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.node {
                self.node = node.next.as_deref();
                self.remaining = self.remaining.saturating_sub(1);
                return Some(&node.value);
            }
            let bucket = if self.descending {
                self.range.next_back()?
            } else {
                self.range.next()?
            };
            self.node = self.buckets[bucket].as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets,
            range: self.range.clone(),
            descending: self.descending,
            node: self.node,
            remaining: self.remaining,
        }
    }
}

/// Mutable iterator over the values of a [`BucketStore`].
pub struct IterMut<'a, T> {
    buckets: core::slice::IterMut<'a, Link<T>>,
    node: Option<&'a mut Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.node.take() {
                let Node { value, next, .. } = node;
                self.node = next.as_deref_mut();
                self.remaining = self.remaining.saturating_sub(1);
                return Some(value);
            }
            self.node = self.buckets.next()?.as_deref_mut();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator over the values of a [`BucketStore`].
pub struct IntoIter<T> {
    buckets: alloc::vec::IntoIter<Link<T>>,
    link: Link<T>,
    remaining: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.link.take() {
                let Node { value, next, .. } = *node;
                self.link = next;
                self.remaining = self.remaining.saturating_sub(1);
                return Some(value);
            }
            self.link = self.buckets.next()?;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        for _ in self.by_ref() {}
    }
}

/// Draining iterator returned by [`BucketStore::drain`].
pub struct Drain<'a, T> {
    inner: IntoIter<T>,
    _marker: PhantomData<&'a mut BucketStore<T>>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}

impl<T> FusedIterator for Drain<'_, T> {}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;
    use core::hash::BuildHasher;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;

    struct HashState {
        k0: u64,
        k1: u64,
    }

    impl HashState {
        fn new() -> Self {
            let mut rng = OsRng;
            Self {
                k0: rng.try_next_u64().unwrap_or(0),
                k1: rng.try_next_u64().unwrap_or(0),
            }
        }

        fn hash(&self, value: u64) -> u64 {
            struct Keys(u64, u64);
            impl BuildHasher for Keys {
                type Hasher = SipHasher;

                fn build_hasher(&self) -> Self::Hasher {
                    SipHasher::new_with_keys(self.0, self.1)
                }
            }
            Keys(self.k0, self.k1).hash_one(value)
        }
    }

    fn insert(store: &mut BucketStore<u64>, state: &HashState, value: u64) -> bool {
        match store.entry(state.hash(value), |&v| v == value) {
            Entry::Vacant(entry) => {
                entry.insert(value);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    fn store(capacity: usize) -> BucketStore<u64> {
        BucketStore::with_config(capacity, DEFAULT_LOAD_FACTOR, Growth::Double).unwrap()
    }

    #[test]
    fn test_invalid_config() {
        assert_eq!(
            BucketStore::<u64>::with_config(MAX_CAPACITY + 1, 0.75, Growth::Double).err(),
            Some(Failure::InvalidCapacity {
                requested: MAX_CAPACITY + 1
            })
        );
        assert_eq!(
            BucketStore::<u64>::with_config(4, 0.0, Growth::Double).err(),
            Some(Failure::InvalidLoadFactor)
        );
        assert_eq!(
            BucketStore::<u64>::with_config(4, -1.0, Growth::Double).err(),
            Some(Failure::InvalidLoadFactor)
        );
        assert_eq!(
            BucketStore::<u64>::with_config(4, f32::NAN, Growth::Double).err(),
            Some(Failure::InvalidLoadFactor)
        );
    }

    #[test]
    fn test_zero_capacity_rounds_up() {
        let store = store(0);
        assert_eq!(store.capacity(), 1);
        assert_eq!(store.threshold(), 0);
    }

    #[test]
    fn test_insert_find_remove() {
        let state = HashState::new();
        let mut store = store(16);

        for i in 0..100 {
            assert!(insert(&mut store, &state, i));
        }
        assert!(!insert(&mut store, &state, 5));
        assert_eq!(store.len(), 100);

        for i in 0..100 {
            assert_eq!(store.find(state.hash(i), |&v| v == i), Some(&i));
        }
        assert_eq!(store.find(state.hash(1000), |&v| v == 1000), None);

        assert_eq!(store.remove(state.hash(42), |&v| v == 42), Some(42));
        assert_eq!(store.remove(state.hash(42), |&v| v == 42), None);
        assert_eq!(store.len(), 99);
    }

    #[test]
    fn test_growth_keeps_population_under_threshold() {
        let state = HashState::new();
        let mut store = store(1);

        for i in 0..1000 {
            insert(&mut store, &state, i);
            assert!(store.len() <= store.threshold());
        }
        assert!(store.capacity() >= 1000);
        for i in 0..1000 {
            assert!(store.find(state.hash(i), |&v| v == i).is_some());
        }
    }

    #[test]
    fn test_growth_policies() {
        let mut doubled = store(1);
        let mut odd = BucketStore::with_config(11, 0.75, Growth::DoublePlusOne).unwrap();
        let state = HashState::new();

        insert(&mut doubled, &state, 1);
        assert_eq!(doubled.capacity(), 2);

        for i in 0..9 {
            insert(&mut odd, &state, i);
        }
        assert_eq!(odd.capacity(), 23);
    }

    #[test]
    fn test_tiny_load_factor_still_grows_past_population() {
        let state = HashState::new();
        let mut store = BucketStore::with_config(1, 0.1, Growth::Double).unwrap();
        for i in 0..20 {
            insert(&mut store, &state, i);
            assert!(store.len() <= store.threshold());
        }
    }

    #[test]
    fn test_mod_count_tracks_structural_changes() {
        let state = HashState::new();
        let mut store = store(16);

        insert(&mut store, &state, 1);
        insert(&mut store, &state, 2);
        assert_eq!(store.mod_count(), 2);

        *store.find_mut(state.hash(1), |&v| v == 1).unwrap() = 1;
        assert_eq!(store.mod_count(), 2);

        store.remove(state.hash(1), |&v| v == 1);
        assert_eq!(store.mod_count(), 3);

        store.clear();
        assert_eq!(store.mod_count(), 4);
        store.clear();
        assert_eq!(store.mod_count(), 4);
    }

    #[test]
    fn test_cursor_detects_foreign_removal() {
        let state = HashState::new();
        let mut store = store(16);
        insert(&mut store, &state, 1);
        insert(&mut store, &state, 2);

        let mut cursor = RawCursor::new(&store);
        store.remove(state.hash(1), |&v| v == 1);
        assert_eq!(cursor.next(&store), Err(Failure::ConcurrentModification));
    }

    #[test]
    fn test_cursor_remove_stays_valid() {
        let state = HashState::new();
        let mut store = BucketStore::with_config(1, 100.0, Growth::Double).unwrap();
        for i in 0..10 {
            insert(&mut store, &state, i);
        }

        let mut cursor = RawCursor::new(&store);
        assert_eq!(cursor.remove(&mut store), Err(Failure::IllegalState));

        let mut seen = Vec::new();
        while cursor.has_next(&store) {
            let value = *cursor.next(&store).unwrap();
            seen.push(value);
            if value % 2 == 0 {
                assert_eq!(cursor.remove(&mut store), Ok(value));
                assert_eq!(cursor.remove(&mut store), Err(Failure::IllegalState));
            }
        }
        seen.sort_unstable();
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
        assert_eq!(store.len(), 5);
        assert!(store.iter().all(|v| v % 2 == 1));
        assert_eq!(cursor.next(&store), Err(Failure::NoSuchElement));
    }

    #[test]
    fn test_descending_cursor_and_span() {
        let mut store = store(8);
        for value in [1u64, 3, 6] {
            match store.entry(value, |&v| v == value) {
                Entry::Vacant(entry) => {
                    entry.insert(value);
                }
                Entry::Occupied(_) => unreachable!(),
            }
        }
        assert_eq!(store.occupied_span(), Some((1, 6)));

        let mut cursor = RawCursor::descending(&store, 1, 6);
        let mut order = Vec::new();
        while cursor.has_next(&store) {
            order.push(*cursor.next(&store).unwrap());
        }
        assert_eq!(order, vec![6, 3, 1]);
        assert_eq!(store.iter_span(1, 6).copied().collect::<Vec<_>>(), vec![6, 3, 1]);
    }

    #[test]
    fn test_reserve_total() {
        let mut store = store(16);
        assert!(!store.reserve_total(12));
        assert!(store.reserve_total(13));
        assert_eq!(store.capacity(), 26);
        assert_eq!(store.mod_count(), 1);
    }

    #[test]
    fn test_retain_drain_and_clone() {
        let state = HashState::new();
        let mut store = store(4);
        for i in 0..50 {
            insert(&mut store, &state, i);
        }

        let copy = store.clone();
        assert_eq!(
            copy.iter().copied().collect::<Vec<_>>(),
            store.iter().copied().collect::<Vec<_>>()
        );

        store.retain(|v| *v < 25);
        assert_eq!(store.len(), 25);

        let mut drained = store.drain().collect::<Vec<_>>();
        drained.sort_unstable();
        assert_eq!(drained, (0..25).collect::<Vec<_>>());
        assert!(store.is_empty());
        assert_eq!(copy.len(), 50);
    }

    #[test]
    fn test_iter_mut_and_into_iter() {
        let state = HashState::new();
        let mut store = store(8);
        for i in 0..10 {
            insert(&mut store, &state, i);
        }
        for value in store.iter_mut() {
            *value += 100;
        }
        let mut values = store.into_iter().collect::<Vec<_>>();
        values.sort_unstable();
        assert_eq!(values, (100..110).collect::<Vec<_>>());
    }

    #[test]
    fn test_long_chain_drop() {
        let mut store = BucketStore::with_config(1, 1.0e9, Growth::Double).unwrap();
        for i in 0..10_000u64 {
            match store.entry(7, |&v| v == i) {
                Entry::Vacant(entry) => {
                    entry.insert(i);
                }
                Entry::Occupied(_) => unreachable!(),
            }
        }
        assert_eq!(store.debug_stats().longest_chain, 10_000);
        drop(store);
    }

    #[test]
    fn test_debug_stats_and_histogram() {
        let mut store = store(4);
        for value in [0u64, 4, 1] {
            match store.entry(value, |&v| v == value) {
                Entry::Vacant(entry) => {
                    entry.insert(value);
                }
                Entry::Occupied(_) => unreachable!(),
            }
        }
        let stats = store.debug_stats();
        assert_eq!(stats.len, 3);
        assert_eq!(stats.buckets, 4);
        assert_eq!(stats.occupied_buckets, 2);
        assert_eq!(stats.longest_chain, 2);
        assert_eq!(store.chain_histogram(), vec![2, 1, 1]);
    }
}
