#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Generic algorithms over [`Sequence`](collection::Sequence) containers.
///
/// Searching, sorting, rotation, shuffling and sub-sequence matching, each
/// choosing between an indexed and a sequential strategy based on
/// [`is_random_access`](collection::Sequence::is_random_access).
pub mod algorithms;

/// The separately chained hash store backing every map and set in this crate.
pub mod bucket_store;

/// Capability traits shared by containers and views.
///
/// [`Container`](collection::Container), [`Collection`](collection::Collection),
/// [`Sequence`](collection::Sequence) and
/// [`Associative`](collection::Associative), implemented for the standard
/// sequences, for this crate's maps and sets, and for sub-list windows.
pub mod collection;

mod error;

/// A hash map built on the [`BucketStore`](bucket_store::BucketStore).
///
/// Keys are `Option<K>`: the `None` key is a regular, hashable key that always
/// lands in bucket zero.
pub mod hash_map;

/// A hash set that stores its elements as the keys of a
/// [`HashMap`](hash_map::HashMap).
pub mod hash_set;

/// A thread-safe hash table guarded by one coarse lock.
#[cfg(feature = "std")]
pub mod hashtable;

/// Dynamically typed values and runtime type tokens.
pub mod value;

/// Decorators that restrict or extend another container's contract.
pub mod views;

pub use bucket_store::DEFAULT_LOAD_FACTOR;
pub use bucket_store::MAX_CAPACITY;
pub use error::Failure;
pub use error::Result;
pub use hash_map::Entry;
pub use hash_map::HashMap;
pub use hash_set::HashSet;
#[cfg(feature = "std")]
pub use hashtable::Hashtable;
pub use value::TypeToken;
pub use value::Value;

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        /// Hash builder used when a container is created without one.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else {
        /// Hash builder used when a container is created without one.
        ///
        /// Without `std` there is no per-process seed, so foldhash runs with
        /// its fixed seed.
        pub type DefaultHashBuilder = foldhash::fast::FixedState;
    }
}
