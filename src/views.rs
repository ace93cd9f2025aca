//! Each view forwards to a container it does not own and adds exactly one
//! contract on top:
//!
//! * [`read_only`] views reject every write with
//!   [`Failure::MutationRejected`](crate::Failure::MutationRejected).
//! * [`checked`] views validate the runtime type of every inserted item.
//! * [`synchronized`] views serialize every call through a shared lock.
//! * [`constant`] containers are fixed, allocation-free and immutable.
//!
//! # Examples
//!
//! ```rust
//! use chain_hash::Failure;
//! use chain_hash::collection::Collection;
//! use chain_hash::views::read_only::ReadOnlyList;
//!
//! let list = vec![1, 2, 3];
//! let mut view = ReadOnlyList::new(&list);
//! assert_eq!(view.add(4), Err(Failure::MutationRejected));
//! assert!(view.contains(&2));
//! assert_eq!(list.len(), 3);
//! ```

/// Fixed containers: empty, singleton and n-copies.
pub mod constant;

/// Views that validate the runtime type of inserted items.
pub mod checked;

/// Views that reject every mutation.
pub mod read_only;

/// Views that serialize access through a shared lock.
#[cfg(feature = "std")]
pub mod synchronized;
