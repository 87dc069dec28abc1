//! Fixed-capacity segments and the arena that owns them
//!
//! A segment is an array block whose live elements occupy `front + 1 ..= back - 1`.
//! Both cursors start at the center of the block and grow outward, so a freshly
//! centered segment can absorb `capacity / 2` pushes on either side before the deque
//! has to link a neighbor.
//!
//! ```text
//!            front   back
//!              v       v
//!   [ . . . . | a b c d | . . . . ]
//!   0                             capacity
//! ```
//!
//! Segments never check their own bounds. The chain checks the exhaustion predicates
//! before delegating a push or pop.
//!
//! Neighbors are linked through [`SegmentId`] handles into a [`SegmentArena`] rather
//! than through references, which keeps unlinking a plain index update and lets drained
//! segments be pooled for reuse.

use core::mem;
use core::ops::{Index, IndexMut};

/// Handle to a segment slot in a [`SegmentArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SegmentId(usize);

impl SegmentId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

pub(crate) struct Segment<T> {
    cells: Box<[Option<T>]>,
    front: isize,
    back: usize,
    pub(crate) prev: Option<SegmentId>,
    pub(crate) next: Option<SegmentId>,
}

impl<T> Segment<T> {
    fn new(capacity: usize, front: isize, back: usize) -> Self {
        Self {
            cells: (0..capacity).map(|_| None).collect(),
            front,
            back,
            prev: None,
            next: None,
        }
    }

    fn reset(&mut self, front: isize, back: usize) {
        debug_assert!(self.cells.iter().all(Option::is_none));
        self.front = front;
        self.back = back;
        self.prev = None;
        self.next = None;
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// No free slot left below `front`.
    #[inline]
    pub(crate) fn front_exhausted(&self) -> bool {
        self.front < 0
    }

    /// No free slot left at or above `back`.
    #[inline]
    pub(crate) fn back_exhausted(&self) -> bool {
        self.back >= self.capacity()
    }

    /// Every element has been popped off the front side.
    #[inline]
    pub(crate) fn front_drained(&self) -> bool {
        self.front >= self.capacity() as isize - 1
    }

    /// Every element has been popped off the back side.
    #[inline]
    pub(crate) fn back_drained(&self) -> bool {
        self.back == 0
    }

    #[inline]
    pub(crate) fn push_back(&mut self, value: T) {
        self.cells[self.back] = Some(value);
        self.back += 1;
    }

    #[inline]
    pub(crate) fn push_front(&mut self, value: T) {
        self.cells[self.front as usize] = Some(value);
        self.front -= 1;
    }

    #[inline]
    pub(crate) fn pop_back(&mut self) -> Option<T> {
        self.back -= 1;
        self.cells[self.back].take()
    }

    #[inline]
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        self.front += 1;
        self.cells[self.front as usize].take()
    }

    /// Element right after the `front` cursor, if any.
    #[inline]
    pub(crate) fn front_value(&self) -> Option<&T> {
        self.cells.get((self.front + 1) as usize)?.as_ref()
    }

    /// Element right before the `back` cursor, if any.
    #[inline]
    pub(crate) fn back_value(&self) -> Option<&T> {
        self.cells.get(self.back.checked_sub(1)?)?.as_ref()
    }

    /// Number of live elements between the cursors.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        (self.back as isize - self.front - 1).max(0) as usize
    }

    fn vacate(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = None;
        }
    }
}

/// Slot storage for the segments of one deque
///
/// Vacated slots are recycled through a free list, and up to `max_spare` drained
/// segments keep their cell buffers so relinking does not allocate.
pub(crate) struct SegmentArena<T> {
    slots: Vec<Option<Segment<T>>>,
    vacant: Vec<usize>,
    spare: Vec<Segment<T>>,
    segment_capacity: usize,
    max_spare: usize,
    live: usize,
}

impl<T> SegmentArena<T> {
    pub(crate) fn new(segment_capacity: usize, max_spare: usize) -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
            spare: Vec::with_capacity(max_spare),
            segment_capacity,
            max_spare,
            live: 0,
        }
    }

    /// Place a segment with the given cursors into a free slot.
    ///
    /// Returns the new handle and whether the segment came from the spare pool.
    pub(crate) fn allocate(&mut self, front: isize, back: usize) -> (SegmentId, bool) {
        let (segment, reused) = match self.spare.pop() {
            Some(mut segment) => {
                segment.reset(front, back);
                (segment, true)
            }
            None => (Segment::new(self.segment_capacity, front, back), false),
        };

        let index = match self.vacant.pop() {
            Some(index) => {
                self.slots[index] = Some(segment);
                index
            }
            None => {
                self.slots.push(Some(segment));
                self.slots.len() - 1
            }
        };
        self.live += 1;
        (SegmentId(index), reused)
    }

    /// Allocate a segment with both cursors at the center.
    pub(crate) fn allocate_centered(&mut self) -> (SegmentId, bool) {
        let half = self.segment_capacity / 2;
        self.allocate(half as isize - 1, half)
    }

    /// Take a drained segment out of its slot.
    ///
    /// Returns `true` if the segment was pooled, `false` if it was freed or the
    /// handle was already vacant.
    pub(crate) fn release(&mut self, id: SegmentId) -> bool {
        let Some(mut segment) = self.slots.get_mut(id.0).and_then(Option::take) else {
            return false;
        };
        debug_assert_eq!(segment.len(), 0, "released a segment holding elements");
        self.vacant.push(id.0);
        self.live -= 1;

        if self.spare.len() < self.max_spare {
            segment.prev = None;
            segment.next = None;
            self.spare.push(segment);
            true
        } else {
            false
        }
    }

    /// Drop every live element and vacate all slots, pooling what the spare
    /// budget allows.
    ///
    /// Returns the number of segments that were live.
    pub(crate) fn reset(&mut self) -> usize {
        let unlinked = self.live;
        for mut segment in mem::take(&mut self.slots).into_iter().flatten() {
            if self.spare.len() < self.max_spare {
                segment.vacate();
                self.spare.push(segment);
            }
        }
        self.vacant.clear();
        self.live = 0;
        unlinked
    }

    #[inline]
    pub(crate) fn live(&self) -> usize {
        self.live
    }

    #[cfg(test)]
    pub(crate) fn spare(&self) -> usize {
        self.spare.len()
    }

    #[inline]
    pub(crate) fn segment_capacity(&self) -> usize {
        self.segment_capacity
    }

    /// Bytes held by linked and pooled segment buffers.
    pub(crate) fn footprint_bytes(&self) -> usize {
        (self.live + self.spare.len()) * self.segment_capacity * mem::size_of::<Option<T>>()
    }
}

impl<T> Index<SegmentId> for SegmentArena<T> {
    type Output = Segment<T>;

    fn index(&self, id: SegmentId) -> &Segment<T> {
        match self.slots.get(id.0) {
            Some(Some(segment)) => segment,
            _ => panic!("segment handle {} refers to a vacant slot", id.0),
        }
    }
}

impl<T> IndexMut<SegmentId> for SegmentArena<T> {
    fn index_mut(&mut self, id: SegmentId) -> &mut Segment<T> {
        match self.slots.get_mut(id.0) {
            Some(Some(segment)) => segment,
            _ => panic!("segment handle {} refers to a vacant slot", id.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_cursors() {
        let mut arena: SegmentArena<u8> = SegmentArena::new(8, 1);
        let (id, reused) = arena.allocate_centered();
        assert!(!reused);

        let segment = &arena[id];
        assert_eq!(segment.capacity(), 8);
        assert_eq!(segment.front, 3);
        assert_eq!(segment.back, 4);
        assert_eq!(segment.len(), 0);
        assert!(!segment.front_exhausted());
        assert!(!segment.back_exhausted());
    }

    #[test]
    fn test_segment_push_pop_both_sides() {
        let mut arena = SegmentArena::new(4, 0);
        let (id, _) = arena.allocate_centered();
        let segment = &mut arena[id];

        segment.push_back(2);
        segment.push_back(3);
        assert!(segment.back_exhausted());
        segment.push_front(1);
        segment.push_front(0);
        assert!(segment.front_exhausted());
        assert_eq!(segment.len(), 4);

        assert_eq!(segment.front_value(), Some(&0));
        assert_eq!(segment.back_value(), Some(&3));
        assert_eq!(segment.pop_front(), Some(0));
        assert_eq!(segment.pop_back(), Some(3));
        assert_eq!(segment.pop_front(), Some(1));
        assert_eq!(segment.pop_front(), Some(2));
        assert_eq!(segment.front_value(), None);
        assert_eq!(segment.len(), 0);
        assert!(!segment.front_drained());

        segment.push_back(4);
        assert_eq!(segment.pop_front(), Some(4));
        assert!(segment.front_drained());
    }

    #[test]
    fn test_back_drained_segment() {
        let mut arena = SegmentArena::new(4, 0);
        let (id, _) = arena.allocate(-1, 0);
        let segment = &mut arena[id];
        assert!(segment.back_drained());
        assert_eq!(segment.back_value(), None);

        segment.push_back('x');
        assert!(!segment.back_drained());
        assert_eq!(segment.pop_back(), Some('x'));
        assert!(segment.back_drained());
    }

    #[test]
    fn test_release_pools_up_to_budget() {
        let mut arena: SegmentArena<u32> = SegmentArena::new(4, 1);
        let (a, _) = arena.allocate_centered();
        let (b, _) = arena.allocate_centered();
        assert_eq!(arena.live(), 2);

        assert!(arena.release(a));
        assert!(!arena.release(b));
        assert!(!arena.release(b));
        assert_eq!(arena.live(), 0);
        assert_eq!(arena.spare(), 1);

        let (c, reused) = arena.allocate(3, 4);
        assert!(reused);
        assert_eq!(arena.spare(), 0);
        assert_eq!(arena[c].front, 3);
        assert_eq!(arena[c].back, 4);
        // Vacated slots are recycled before the slot vector grows
        assert!(c.index() < 2);
    }

    #[test]
    fn test_reset_drops_elements() {
        use std::rc::Rc;

        let marker = Rc::new(());
        let mut arena = SegmentArena::new(4, 2);
        let (id, _) = arena.allocate_centered();
        arena[id].push_back(Rc::clone(&marker));
        arena[id].push_front(Rc::clone(&marker));
        assert_eq!(Rc::strong_count(&marker), 3);

        let (_, _) = arena.allocate_centered();
        assert_eq!(arena.reset(), 2);
        assert_eq!(Rc::strong_count(&marker), 1);
        assert_eq!(arena.live(), 0);
        assert_eq!(arena.spare(), 2);
        assert_eq!(arena.reset(), 0);
    }

    #[test]
    #[should_panic(expected = "vacant slot")]
    fn test_index_vacant_handle_panics() {
        let mut arena: SegmentArena<u8> = SegmentArena::new(4, 0);
        let (id, _) = arena.allocate_centered();
        arena.release(id);
        let _ = &arena[id];
    }
}
