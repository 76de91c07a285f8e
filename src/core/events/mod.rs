//=========================================================================
// Global Event Queue
//=========================================================================
//
// Fixed pool of delayed, named events.
//
// Architecture:
// ```text
//   issue_event(id, delay) ──► [slot 0 .. slot 19]  ◄── tick(): delay -= 1
//                                     │
//               check_for_event(obj) ─┘  first active slot whose id matches
//                                        a local subscription is cleared and
//                                        the subscription's script is pushed
//                                        onto the object's call stack
// ```
//
// A slot is free iff its delay is 0. The countdown reaching 0 therefore
// frees the slot implicitly; nothing "fires" on its own. Matching is what
// starts scripts, and only while the delay is still running.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::error::{Capacity, CoreError, CoreResult};
use crate::core::object::{EventId, InteractiveObject, LocalEvent, LogicMode};

//=== Constants ===========================================================

/// Number of concurrently pending global events.
pub const EVENT_POOL_SLOTS: usize = 20;

//=== ScriptControl =======================================================

/// Tells the script interpreter whether to keep running the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptControl {
    Continue,
    Stop,
}

//=== PendingEvent ========================================================

/// One pool slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingEvent {
    pub event: EventId,
    pub delay: u32,
}

impl PendingEvent {
    /// Free slots are exactly those with no remaining delay.
    pub fn is_free(&self) -> bool {
        self.delay == 0
    }

    fn matches(&self, event: EventId) -> bool {
        !self.is_free() && self.event == event
    }

    fn release(&mut self) {
        self.delay = 0;
    }
}

//=== GlobalEventQueue ====================================================

/// Bounded delayed-event scheduler.
#[derive(Debug, Clone, Default)]
pub struct GlobalEventQueue {
    slots: [PendingEvent; EVENT_POOL_SLOTS],
}

impl GlobalEventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Issuing ----------------------------------------------------------

    /// Stores `event` in the lowest free slot with `delay` ticks to run.
    ///
    /// The same event id may be pending in several slots at once; each one
    /// is matched independently. A zero delay leaves the slot free.
    ///
    /// # Errors
    ///
    /// [`CoreError::CapacityExceeded`] when all slots are occupied. The
    /// pool is sized for the game's worst case, so this is a data error.
    pub fn issue_event(&mut self, event: EventId, delay: u32) -> CoreResult<()> {
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.is_free())
            .ok_or(CoreError::CapacityExceeded {
                resource: Capacity::EventPool,
                capacity: EVENT_POOL_SLOTS,
            })?;

        *slot = PendingEvent { event, delay };
        trace!("Issued event {} with delay {}", event, delay);
        Ok(())
    }

    //--- Countdown --------------------------------------------------------

    /// Advances every running countdown by one tick.
    pub fn tick(&mut self) {
        for slot in self.slots.iter_mut().filter(|slot| !slot.is_free()) {
            slot.delay -= 1;
        }
    }

    //--- Matching ---------------------------------------------------------

    /// Services every local subscription of `object`.
    ///
    /// Each armed subscription consumes at most one pending slot (the
    /// lowest matching one) and pushes one stack frame. Several
    /// subscriptions may fire in the same call.
    ///
    /// # Errors
    ///
    /// [`CoreError::StackOverflow`] if the object has no stack frame left.
    /// The slot that could not be started stays pending.
    pub fn check_for_event(&mut self, object: &mut InteractiveObject) -> CoreResult<()> {
        for index in 0..object.events.len() {
            if let Some(local) = object.events[index] {
                self.start_matching(object, local)?;
            }
        }
        Ok(())
    }

    /// Variant called from a running script.
    ///
    /// A non-zero `pause` parks the object in [`LogicMode::PauseForEvent`]
    /// for that many ticks without scanning. Otherwise the first armed
    /// subscription (in slot order) with a pending match is started and the
    /// caller is told to stop; with no match the caller continues.
    pub fn check_for_event_interactive(
        &mut self,
        object: &mut InteractiveObject,
        pause: u32,
    ) -> CoreResult<ScriptControl> {
        if pause != 0 {
            object.pause = pause;
            object.logic = LogicMode::PauseForEvent;
            return Ok(ScriptControl::Stop);
        }

        for index in 0..object.events.len() {
            if let Some(local) = object.events[index] {
                if self.start_matching(object, local)? {
                    return Ok(ScriptControl::Stop);
                }
            }
        }

        Ok(ScriptControl::Continue)
    }

    /// True iff `event` is pending in some slot.
    pub fn event_valid(&self, event: EventId) -> bool {
        self.slots.iter().any(|slot| slot.matches(event))
    }

    //--- Persistence ------------------------------------------------------

    /// Raw pool contents, for an external save system.
    pub fn slots(&self) -> &[PendingEvent; EVENT_POOL_SLOTS] {
        &self.slots
    }

    /// Replaces the pool contents with a previously saved snapshot.
    pub fn restore_slots(&mut self, slots: [PendingEvent; EVENT_POOL_SLOTS]) {
        self.slots = slots;
    }

    /// Number of occupied slots.
    pub fn pending_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_free()).count()
    }

    //--- Internal Helpers -------------------------------------------------

    fn start_matching(
        &mut self,
        object: &mut InteractiveObject,
        local: LocalEvent,
    ) -> CoreResult<bool> {
        let Some(slot) = self.slots.iter_mut().find(|slot| slot.matches(local.event)) else {
            return Ok(false);
        };

        object.start_script(local.script)?;
        slot.release();

        debug!(
            "Event {} started script {} on object {}",
            local.event, local.script, object.id
        );
        Ok(true)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::object::SCRIPT_LEVELS;

    fn subscriber(id: u32, subscriptions: &[(EventId, u32)]) -> InteractiveObject {
        let mut obj = InteractiveObject::new(id);
        for (slot, &(event, script)) in subscriptions.iter().enumerate() {
            obj.set_event(slot, event, script);
        }
        obj
    }

    //=====================================================================
    // Issue / Tick
    //=====================================================================

    #[test]
    fn issue_uses_lowest_free_slot() {
        let mut queue = GlobalEventQueue::new();
        queue.issue_event(1, 5).unwrap();
        queue.issue_event(2, 5).unwrap();
        queue.slots[0].release();
        queue.issue_event(3, 5).unwrap();

        assert_eq!(queue.slots()[0], PendingEvent { event: 3, delay: 5 });
        assert_eq!(queue.slots()[1].event, 2);
    }

    #[test]
    fn twenty_first_event_exceeds_capacity() {
        let mut queue = GlobalEventQueue::new();
        for event in 0..EVENT_POOL_SLOTS as EventId {
            queue.issue_event(event + 1, 10).unwrap();
        }

        assert_eq!(
            queue.issue_event(99, 10),
            Err(CoreError::CapacityExceeded {
                resource: Capacity::EventPool,
                capacity: EVENT_POOL_SLOTS,
            })
        );
    }

    #[test]
    fn expired_slot_is_reused() {
        let mut queue = GlobalEventQueue::new();
        for event in 0..EVENT_POOL_SLOTS as EventId {
            queue.issue_event(event + 1, if event == 7 { 1 } else { 10 }).unwrap();
        }
        queue.tick();

        queue.issue_event(99, 3).unwrap();
        assert_eq!(queue.slots()[7], PendingEvent { event: 99, delay: 3 });
    }

    #[test]
    fn tick_counts_down_and_stops_at_zero() {
        let mut queue = GlobalEventQueue::new();
        queue.issue_event(4, 3).unwrap();
        queue.issue_event(5, 10).unwrap();

        for _ in 0..5 {
            queue.tick();
        }

        assert_eq!(queue.slots()[0], PendingEvent { event: 4, delay: 0 });
        assert_eq!(queue.slots()[1], PendingEvent { event: 5, delay: 5 });
    }

    #[test]
    fn event_valid_until_countdown_expires() {
        let mut queue = GlobalEventQueue::new();
        queue.issue_event(8, 2).unwrap();

        assert!(queue.event_valid(8));
        queue.tick();
        assert!(queue.event_valid(8));
        queue.tick();
        assert!(!queue.event_valid(8));
    }

    #[test]
    fn zero_delay_issue_leaves_slot_free() {
        let mut queue = GlobalEventQueue::new();
        queue.issue_event(8, 0).unwrap();

        assert!(!queue.event_valid(8));
        assert_eq!(queue.pending_count(), 0);
    }

    //=====================================================================
    // check_for_event
    //=====================================================================

    #[test]
    fn match_clears_slot_and_pushes_frame() {
        let mut queue = GlobalEventQueue::new();
        queue.issue_event(10, 4).unwrap();
        let mut obj = subscriber(1, &[(10, 500)]);

        queue.check_for_event(&mut obj).unwrap();

        assert!(queue.slots()[0].is_free());
        assert_eq!(queue.slots()[0].event, 10, "id is kept, only delay clears");
        assert_eq!(obj.logic, LogicMode::Script);
        assert_eq!(obj.stack.level(), 1);
        assert_eq!(obj.stack.current().script_id, 500);
        assert_eq!(obj.stack.current().program_counter, 500);
    }

    #[test]
    fn every_matching_subscription_fires() {
        let mut queue = GlobalEventQueue::new();
        queue.issue_event(10, 4).unwrap();
        queue.issue_event(11, 4).unwrap();
        let mut obj = subscriber(1, &[(10, 500), (11, 600)]);

        queue.check_for_event(&mut obj).unwrap();

        assert_eq!(obj.stack.level(), 2);
        assert_eq!(obj.stack.frame(1).unwrap().script_id, 500);
        assert_eq!(obj.stack.frame(2).unwrap().script_id, 600);
        assert_eq!(queue.pending_count(), 0);
    }

    #[test]
    fn duplicate_events_are_consumed_one_at_a_time() {
        let mut queue = GlobalEventQueue::new();
        queue.issue_event(10, 4).unwrap();
        queue.issue_event(10, 4).unwrap();
        let mut obj = subscriber(1, &[(10, 500)]);

        queue.check_for_event(&mut obj).unwrap();
        assert_eq!(obj.stack.level(), 1);
        assert!(queue.slots()[0].is_free());
        assert!(queue.event_valid(10));

        queue.check_for_event(&mut obj).unwrap();
        assert_eq!(obj.stack.level(), 2);
        assert!(!queue.event_valid(10));
    }

    #[test]
    fn unmatched_object_is_untouched() {
        let mut queue = GlobalEventQueue::new();
        queue.issue_event(10, 4).unwrap();
        let mut obj = subscriber(1, &[(12, 500)]);

        queue.check_for_event(&mut obj).unwrap();

        assert_eq!(obj.logic, LogicMode::Idle);
        assert_eq!(obj.stack.level(), 0);
        assert!(queue.event_valid(10));
    }

    #[test]
    fn expired_event_no_longer_matches() {
        let mut queue = GlobalEventQueue::new();
        queue.issue_event(10, 1).unwrap();
        queue.tick();
        let mut obj = subscriber(1, &[(10, 500)]);

        queue.check_for_event(&mut obj).unwrap();
        assert_eq!(obj.stack.level(), 0);
    }

    #[test]
    fn full_stack_overflows_and_keeps_event_pending() {
        let mut queue = GlobalEventQueue::new();
        queue.issue_event(10, 4).unwrap();
        let mut obj = subscriber(1, &[(10, 500)]);
        for script in 1..SCRIPT_LEVELS as u32 {
            obj.stack.push(script).unwrap();
        }

        let result = queue.check_for_event(&mut obj);

        assert_eq!(
            result,
            Err(CoreError::StackOverflow {
                capacity: SCRIPT_LEVELS
            })
        );
        assert!(queue.event_valid(10));
    }

    //=====================================================================
    // check_for_event_interactive
    //=====================================================================

    #[test]
    fn interactive_pause_parks_object_without_scanning() {
        let mut queue = GlobalEventQueue::new();
        queue.issue_event(10, 4).unwrap();
        let mut obj = subscriber(1, &[(10, 500)]);

        let control = queue.check_for_event_interactive(&mut obj, 25).unwrap();

        assert_eq!(control, ScriptControl::Stop);
        assert_eq!(obj.logic, LogicMode::PauseForEvent);
        assert_eq!(obj.pause, 25);
        assert!(queue.event_valid(10));
        assert_eq!(obj.stack.level(), 0);
    }

    #[test]
    fn interactive_stops_at_first_match() {
        let mut queue = GlobalEventQueue::new();
        queue.issue_event(11, 4).unwrap();
        queue.issue_event(10, 4).unwrap();
        let mut obj = subscriber(1, &[(10, 500), (11, 600)]);

        let control = queue.check_for_event_interactive(&mut obj, 0).unwrap();

        assert_eq!(control, ScriptControl::Stop);
        assert_eq!(obj.stack.level(), 1);
        assert_eq!(obj.stack.current().script_id, 500);
        assert!(queue.event_valid(11), "second subscription not serviced");
    }

    #[test]
    fn interactive_without_match_continues() {
        let mut queue = GlobalEventQueue::new();
        let mut obj = subscriber(1, &[(10, 500)]);

        let control = queue.check_for_event_interactive(&mut obj, 0).unwrap();

        assert_eq!(control, ScriptControl::Continue);
        assert_eq!(obj.logic, LogicMode::Idle);
    }

    //=====================================================================
    // Persistence
    //=====================================================================

    #[test]
    fn restore_slots_round_trips_pool() {
        let mut queue = GlobalEventQueue::new();
        queue.issue_event(3, 9).unwrap();
        let saved = *queue.slots();

        let mut restored = GlobalEventQueue::new();
        restored.restore_slots(saved);

        assert!(restored.event_valid(3));
        assert_eq!(restored.pending_count(), 1);
    }
}
