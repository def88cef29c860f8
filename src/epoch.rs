//! Forwarding descriptors for the epoch chain.
//!
//! Every mutation that shifts or relocates elements publishes one `Epoch`:
//! a record of where the buffer lived afterwards (`data`), the first
//! position the mutation affected (`index`), and the signed shift applied to
//! positions at or beyond it (`offset`). Descriptors form a singly-linked
//! chain through `next`; cursors hold a counted reference to the descriptor
//! they last caught up to and walk forward lazily.
//!
//! Ownership rules:
//! - The container holds the tail plus up to two retained predecessors.
//! - Cursors hold whichever descriptor they are anchored at.
//! - A descriptor whose last reference drops is reclaimed immediately, and
//!   teardown of a long chain must not recurse (see `Drop` below).

use core::cell::{Cell, RefCell};
use std::rc::Rc;

/// Counted handle to a descriptor in the chain.
pub(crate) type EpochRef<T> = Rc<Epoch<T>>;

/// One forwarding step: positions `>= index` move by `offset` and re-anchor
/// at `next`.
///
/// Fields are `Cell`s because a descriptor's storage is re-initialized in
/// place when the container has proven (by refcount) that nothing else can
/// observe it; between publish and recycling the fields are never written.
pub(crate) struct Epoch<T> {
    /// Base pointer of the element buffer in force when this step was
    /// published. Only ever dereferenced through the owning container.
    pub(crate) data: Cell<*mut T>,
    /// First position affected by the recorded mutation.
    pub(crate) index: Cell<usize>,
    /// Signed shift: positive for insertion, negative for erasure, zero for
    /// a pure reallocation.
    pub(crate) offset: Cell<isize>,
    /// The next, strictly later step, or `None` for the chain tail.
    pub(crate) next: RefCell<Option<EpochRef<T>>>,
    /// True while some earlier descriptor's `next` points at this one.
    ///
    /// Together with a strong count of exactly 2 this proves the two owners
    /// of a retained descriptor are the container slot and a predecessor
    /// link, i.e. that no cursor is anchored here and fusion may rewrite the
    /// descriptor in place.
    pub(crate) has_prev: Cell<bool>,
}

impl<T> Epoch<T> {
    pub(crate) fn new(data: *mut T, index: usize, offset: isize) -> Self {
        Self {
            data: Cell::new(data),
            index: Cell::new(index),
            offset: Cell::new(offset),
            next: RefCell::new(None),
            has_prev: Cell::new(false),
        }
    }

    /// A descriptor belonging to no chain, for cursors created without a
    /// container.
    pub(crate) fn detached() -> EpochRef<T> {
        Rc::new(Self::new(core::ptr::null_mut(), 0, 0))
    }

    /// Re-initializes a recycled descriptor as a fresh, unlinked step.
    ///
    /// The caller must have proven exclusive ownership; the old successor
    /// link (if any) is severed here so the successor no longer counts a
    /// predecessor.
    pub(crate) fn reinit(&self, data: *mut T, index: usize, offset: isize) {
        if let Some(succ) = self.next.borrow_mut().take() {
            succ.has_prev.set(false);
        }
        debug_assert!(!self.has_prev.get());
        self.data.set(data);
        self.index.set(index);
        self.offset.set(offset);
    }

    /// Attempts to absorb the immediately following step `later` into
    /// `self`, so that one descriptor expresses both.
    ///
    /// Permitted exactly when a single `(data, index, offset)` triple is
    /// equivalent to applying both steps in order:
    /// - `self` erased or merely reallocated (`offset <= 0`) and `later`
    ///   starts at the same position; or
    /// - `self` inserted (`offset > 0`) and `later` starts inside or
    ///   immediately after the inserted span.
    ///
    /// On success the result adopts `later`'s buffer base and successor,
    /// keeps `self`'s starting position, and sums the offsets. `later` is
    /// left unlinked (its successor transfers here, so the successor still
    /// counts exactly one predecessor). The caller must have proven that no
    /// cursor is anchored at either descriptor.
    pub(crate) fn try_fuse(&self, later: &Epoch<T>) -> bool {
        let index = self.index.get();
        let offset = self.offset.get();
        let later_index = later.index.get();
        let fusible = if offset <= 0 {
            later_index == index
        } else {
            later_index >= index && later_index <= index + offset.unsigned_abs()
        };
        if !fusible {
            return false;
        }
        self.data.set(later.data.get());
        self.offset.set(offset + later.offset.get());
        let succ = later.next.borrow_mut().take();
        *self.next.borrow_mut() = succ;
        later.has_prev.set(false);
        true
    }
}

impl<T> Drop for Epoch<T> {
    fn drop(&mut self) {
        // Unlink successors in a loop while each is sole-owned. Dropping a
        // long chain through the default recursive path would overflow the
        // stack once one mutation-heavy container (or one long-lived cursor
        // pinning its history) goes away.
        let mut next = self.next.get_mut().take();
        while let Some(succ) = next {
            succ.has_prev.set(false);
            next = match Rc::try_unwrap(succ) {
                Ok(mut succ) => succ.next.get_mut().take(),
                Err(_) => None,
            };
        }
    }
}
