//=========================================================================
// Candidate List
//=========================================================================
//
// Per-tick list of objects the pointer may hit.
//
// Scene logic fills the list before every engine call; the engine clears it
// on the way out. Entries are snapshots of the fields hit-testing and
// dispatch need, so the list never borrows from the object registry.
//
//=========================================================================

//=== External Dependencies ===============================================

use arrayvec::ArrayVec;
use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::error::{Capacity, CoreError, CoreResult};
use crate::core::object::{InteractiveObject, MouseBox, ObjectId, ScriptId};

//=== Constants ===========================================================

/// Maximum number of candidates per tick.
pub const MAX_CANDIDATES: usize = 30;

/// Priority bands scanned by the hit test (0 first).
pub const PRIORITY_LEVELS: u8 = 10;

//=== Candidate ===========================================================

/// Hit-test view of one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub id: ObjectId,
    pub priority: u8,
    pub mouse_box: MouseBox,
    pub on_enter: Option<ScriptId>,
    pub on_leave: Option<ScriptId>,
}

impl Candidate {
    pub fn from_object(id: ObjectId, object: &InteractiveObject) -> Self {
        Self {
            id,
            priority: object.priority,
            mouse_box: object.mouse_box,
            on_enter: object.on_enter,
            on_leave: object.on_leave,
        }
    }
}

//=== CandidateList =======================================================

#[derive(Debug, Clone, Default)]
pub struct CandidateList {
    entries: ArrayVec<Candidate, MAX_CANDIDATES>,
}

impl CandidateList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `object` under `id`.
    ///
    /// # Errors
    ///
    /// [`CoreError::CapacityExceeded`] once [`MAX_CANDIDATES`] entries are
    /// queued; the list is left unchanged.
    pub fn add(&mut self, id: ObjectId, object: &InteractiveObject) -> CoreResult<()> {
        self.entries
            .try_push(Candidate::from_object(id, object))
            .map_err(|_| {
                warn!("Candidate list full, rejecting object {}", id);
                CoreError::CapacityExceeded {
                    resource: Capacity::CandidateList,
                    capacity: MAX_CANDIDATES,
                }
            })
    }

    /// Topmost candidate under `(x, y)`.
    ///
    /// Bands are scanned from priority 0 upward; inside a band the first
    /// entry in insertion order wins.
    pub fn hit_test(&self, x: u32, y: u32) -> Option<Candidate> {
        (0..PRIORITY_LEVELS).find_map(|level| {
            self.entries
                .iter()
                .find(|c| c.priority == level && c.mouse_box.contains(x, y))
                .copied()
        })
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.entries.iter()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn object(priority: u8, x1: u32, y1: u32, x2: u32, y2: u32) -> InteractiveObject {
        InteractiveObject::new(0)
            .with_priority(priority)
            .with_mouse_box(MouseBox::new(x1, y1, x2, y2))
    }

    #[test]
    fn lower_priority_number_wins() {
        let mut list = CandidateList::new();
        list.add(1, &object(2, 0, 0, 100, 100)).unwrap();
        list.add(2, &object(1, 0, 0, 100, 100)).unwrap();

        assert_eq!(list.hit_test(50, 50).map(|c| c.id), Some(2));
    }

    #[test]
    fn insertion_order_breaks_ties() {
        let mut list = CandidateList::new();
        list.add(1, &object(3, 0, 0, 100, 100)).unwrap();
        list.add(2, &object(3, 0, 0, 100, 100)).unwrap();

        assert_eq!(list.hit_test(50, 50).map(|c| c.id), Some(1));
    }

    #[test]
    fn miss_returns_none() {
        let mut list = CandidateList::new();
        list.add(1, &object(0, 10, 10, 20, 20)).unwrap();

        assert!(list.hit_test(21, 15).is_none());
    }

    #[test]
    fn priority_outside_bands_is_never_hit() {
        let mut list = CandidateList::new();
        list.add(1, &object(PRIORITY_LEVELS, 0, 0, 100, 100)).unwrap();

        assert!(list.hit_test(50, 50).is_none());
    }

    #[test]
    fn thirty_first_candidate_is_rejected() {
        let mut list = CandidateList::new();
        for id in 0..MAX_CANDIDATES as ObjectId {
            list.add(id + 1, &object(0, 0, 0, 1, 1)).unwrap();
        }

        let result = list.add(99, &object(0, 0, 0, 1, 1));

        assert_eq!(
            result,
            Err(CoreError::CapacityExceeded {
                resource: Capacity::CandidateList,
                capacity: MAX_CANDIDATES,
            })
        );
        assert_eq!(list.len(), MAX_CANDIDATES);
        assert!(list.iter().all(|c| c.id != 99));
    }

    #[test]
    fn snapshot_copies_scripts() {
        let obj = object(0, 0, 0, 1, 1).with_scripts(Some(5), Some(6), Some(7));
        let candidate = Candidate::from_object(4, &obj);

        assert_eq!(candidate.on_enter, Some(5));
        assert_eq!(candidate.on_leave, Some(6));
    }
}
