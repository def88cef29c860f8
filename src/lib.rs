//! # `mooring` - Cursors That Survive Vector Mutation
//!
//! A contiguous growable array, [`SemistableVec`], whose position handles
//! ([`Cursor`]) remain valid across insertions, erasures, and buffer
//! reallocations. Storage stays a single contiguous block with the same
//! asymptotics as `Vec<T>`; only the handles gain stability.
//!
//! ## Why?
//!
//! `Vec<T>` invalidates every outstanding reference, pointer, and index the
//! moment you insert or erase in the middle, or push past capacity. Code
//! that wants to *keep pointing at an element* while the sequence churns —
//! selections in an editor buffer, pinned entries in a work queue, peer
//! positions in a simulation — usually gives up contiguity (linked lists,
//! slot maps) or gives up stability (recomputing indices after every edit).
//!
//! A semistable vector keeps the contiguous buffer and moves the adjustment
//! work into the handles: a [`Cursor`] that designated element *e* before a
//! mutation designates *e* after it, provided *e* itself was not erased.
//! Past-the-end cursors keep designating the past-the-end position. Plain
//! `&T` and `*const T` enjoy no such stability — hence *semi*stable.
//!
//! ## How it works
//!
//! Every shifting or relocating mutation publishes a small immutable
//! forwarding record — where the buffer now lives, the first position
//! affected, and the signed shift — onto a singly-linked chain. A cursor is
//! an index plus an anchor into that chain; before any observing operation
//! it walks the suffix published since its last use and rewrites its index.
//! The walk is idempotent and each record is visited at most once per
//! cursor.
//!
//! The container retains the two records behind the chain tail and recycles
//! their storage once nothing else can observe them, fusing adjacent
//! records when a single record expresses both. The result: with no
//! cursors outstanding, memory overhead is a couple of descriptors no
//! matter how many mutations run; a long-parked cursor keeps exactly the
//! history it still needs.
//!
//! ## Guarantees
//!
//! - **Safe Rust throughout**: element access is gated through the
//!   container borrow (`cursor.get(&vec)`), so a stale cursor degrades to
//!   `None` or an unspecified in-bounds element, never undefined behavior.
//! - **Iterative teardown**: dropping a container or a long-parked cursor
//!   unwinds the descriptor chain in a loop, not by recursion, so deep
//!   histories cannot overflow the stack.
//! - **Single-threaded by construction**: containers and cursors are
//!   `!Send` and `!Sync`; the compiler rejects cross-thread use instead of
//!   leaving it to a documentation contract.
//!
//! ## Example
//!
//! ```rust
//! use mooring::SemistableVec;
//!
//! let mut v: SemistableVec<i32> = (0..10).collect();
//! let c = v.cursor(5);
//! let end = v.cursor_end();
//!
//! v.remove(0);
//! v.insert(0, -1);
//! v.push(10);
//!
//! assert_eq!(c.get(&v), Some(&5));
//! assert_eq!(end, v.cursor_end());
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

mod cursor;
mod epoch;
mod vec;

pub use cursor::Cursor;
pub use vec::SemistableVec;
