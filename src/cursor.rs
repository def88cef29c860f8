//! `Cursor` — a position handle that survives container mutation.
//!
//! A cursor is a pair of a logical index and an anchor into the epoch chain.
//! Both may be stale: before any observing operation the cursor *catches up*,
//! walking the chain suffix published since it was last used and rewriting
//! its index into the current buffer's coordinate system. The walk is
//! idempotent and touches each published step at most once per cursor.
//!
//! Element access is gated through the container, the same way token-gated
//! collections route access through their capability: `get` takes `&vec` and
//! `get_mut` takes `&mut vec`, so the borrow checker guarantees the buffer
//! is alive and not mid-mutation. A cursor on its own can be moved, cloned,
//! compared, and shifted, but never dereferenced.

use core::cell::{Cell, RefCell};
use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};
use std::rc::Rc;

use crate::epoch::{Epoch, EpochRef};
use crate::vec::SemistableVec;

/// A mutation-stable handle to a position in a [`SemistableVec`].
///
/// Cursors created before an insertion, erasure, or reallocation keep
/// designating the same element afterwards, as long as that element itself
/// was not erased. A past-the-end cursor keeps designating the past-the-end
/// position. Plain references and raw pointers enjoy no such stability.
///
/// A cursor whose element has been erased, or one used with a container it
/// did not come from, yields an unspecified in-bounds element or `None` —
/// never undefined behavior.
pub struct Cursor<T> {
    idx: Cell<usize>,
    pe: RefCell<EpochRef<T>>,
}

impl<T> Cursor<T> {
    pub(crate) fn new(idx: usize, pe: EpochRef<T>) -> Self {
        Self {
            idx: Cell::new(idx),
            pe: RefCell::new(pe),
        }
    }

    /// Walks forward along the chain, translating `idx` step by step and
    /// re-anchoring at the current tail. Idempotent.
    fn update(&self) {
        let mut pe = self.pe.borrow_mut();
        let mut idx = self.idx.get();
        loop {
            let next = match &*pe.next.borrow() {
                Some(next) => Rc::clone(next),
                None => break,
            };
            if idx >= next.index.get() {
                idx = idx.wrapping_add_signed(next.offset.get());
            }
            *pe = next;
        }
        self.idx.set(idx);
    }

    /// The position this cursor currently designates, in the coordinates of
    /// the container's present buffer.
    ///
    /// Catching up is performed first, so repeated calls are stable until
    /// the container mutates again.
    pub fn position(&self) -> usize {
        self.update();
        self.idx.get()
    }

    /// Returns a reference to the designated element, or `None` if the
    /// position is past the end of `vec`.
    pub fn get<'a>(&self, vec: &'a SemistableVec<T>) -> Option<&'a T> {
        self.update();
        vec.as_slice().get(self.idx.get())
    }

    /// Returns a mutable reference to the designated element, or `None` if
    /// the position is past the end of `vec`.
    pub fn get_mut<'a>(&self, vec: &'a mut SemistableVec<T>) -> Option<&'a mut T> {
        self.update();
        vec.as_mut_slice().get_mut(self.idx.get())
    }

    /// The raw address of the designated element after catching up.
    ///
    /// Safe to produce and compare; dereferencing is subject to the usual
    /// raw-pointer rules and additionally meaningless once the element has
    /// been erased or the container dropped. For `k` within bounds,
    /// `(cursor.clone() + k).as_ptr()` equals `cursor.as_ptr().wrapping_add(k)`.
    pub fn as_ptr(&self) -> *const T {
        self.update();
        let pe = self.pe.borrow();
        pe.data.get().wrapping_add(self.idx.get())
    }

    /// Mutable-pointer form of [`Cursor::as_ptr`].
    pub fn as_mut_ptr(&self) -> *mut T {
        self.update();
        let pe = self.pe.borrow();
        pe.data.get().wrapping_add(self.idx.get())
    }

    /// Shifts this cursor by `n` positions (negative `n` moves backward).
    ///
    /// Catch-up happens first, then the shift; moving a cursor before the
    /// first position leaves it unusable until shifted back into range.
    pub fn advance(&mut self, n: isize) {
        self.update();
        self.idx.set(self.idx.get().wrapping_add_signed(n));
    }

    /// Number of published forwarding steps this cursor has not yet applied.
    ///
    /// Zero for a freshly created or just-used cursor. Does not catch up, so
    /// it can be used to observe how much history a parked cursor is
    /// keeping alive.
    pub fn lag(&self) -> usize {
        let mut n = 0;
        let mut cur = Rc::clone(&self.pe.borrow());
        loop {
            let next = match &*cur.next.borrow() {
                Some(next) => Rc::clone(next),
                None => break,
            };
            n += 1;
            cur = next;
        }
        n
    }
}

impl<T> Clone for Cursor<T> {
    fn clone(&self) -> Self {
        Self::new(self.idx.get(), Rc::clone(&self.pe.borrow()))
    }
}

impl<T> Default for Cursor<T> {
    /// A singular cursor tied to no container; usable only as a placeholder
    /// until overwritten.
    fn default() -> Self {
        Self::new(0, Epoch::detached())
    }
}

impl<T> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position())
            .field("lag", &self.lag())
            .finish()
    }
}

impl<T> PartialEq for Cursor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.position() == other.position()
    }
}

impl<T> Eq for Cursor<T> {}

impl<T> PartialOrd for Cursor<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Cursor<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.position().cmp(&other.position())
    }
}

impl<T> Add<isize> for &Cursor<T> {
    type Output = Cursor<T>;

    fn add(self, n: isize) -> Cursor<T> {
        self.update();
        Cursor::new(
            self.idx.get().wrapping_add_signed(n),
            Rc::clone(&self.pe.borrow()),
        )
    }
}

impl<T> Add<isize> for Cursor<T> {
    type Output = Cursor<T>;

    fn add(self, n: isize) -> Cursor<T> {
        &self + n
    }
}

impl<T> Sub<isize> for &Cursor<T> {
    type Output = Cursor<T>;

    fn sub(self, n: isize) -> Cursor<T> {
        self + n.wrapping_neg()
    }
}

impl<T> Sub<isize> for Cursor<T> {
    type Output = Cursor<T>;

    fn sub(self, n: isize) -> Cursor<T> {
        &self - n
    }
}

impl<T> AddAssign<isize> for Cursor<T> {
    fn add_assign(&mut self, n: isize) {
        self.advance(n);
    }
}

impl<T> SubAssign<isize> for Cursor<T> {
    fn sub_assign(&mut self, n: isize) {
        self.advance(n.wrapping_neg());
    }
}

impl<T> Sub<&Cursor<T>> for &Cursor<T> {
    type Output = isize;

    /// Signed distance between two cursors of the same container.
    fn sub(self, other: &Cursor<T>) -> isize {
        #[allow(clippy::cast_possible_wrap)]
        let distance = self.position().wrapping_sub(other.position()) as isize;
        distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cursor_is_inert() {
        let c: Cursor<u8> = Cursor::default();
        assert_eq!(c.position(), 0);
        assert_eq!(c.lag(), 0);
        assert!(c.as_ptr().is_null());
    }

    #[test]
    fn clone_shares_anchor_but_not_index() {
        let v: SemistableVec<i32> = (0..4).collect();
        let a = v.cursor(1);
        let mut b = a.clone();
        b.advance(2);
        assert_eq!(a.position(), 1);
        assert_eq!(b.position(), 3);
    }

    #[test]
    fn arithmetic_is_anchored_at_the_tail() {
        let mut v: SemistableVec<i32> = (0..8).collect();
        let c = v.cursor(2);
        v.insert(0, -1);
        let d = &c + 1;
        assert_eq!(d.lag(), 0);
        assert_eq!(d.position(), 4);
        assert_eq!(d.get(&v), Some(&3));
    }

    #[test]
    fn distance_and_ordering() {
        let v: SemistableVec<i32> = (0..10).collect();
        let a = v.cursor(2);
        let b = v.cursor(7);
        assert_eq!(&b - &a, 5);
        assert_eq!(&a - &b, -5);
        assert!(a < b);
        assert!(b > a);
        assert!(a <= a.clone());
        assert_eq!(a, v.cursor(2));
    }
}
