//=========================================================================
// Event Collector
//=========================================================================
//
// Drains the platform channel once per tick.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → PointerSample → TickControl
//
// Every pointer message received since the last tick is folded into one
// sample. Polling is bounded so a flooded channel cannot stall a tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::{PlatformEvent, PointerSample};

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    sample: PointerSample,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            sample: PointerSample::default(),
        }
    }

    /// Collects pending platform events (bounded to prevent starvation).
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        const MAX_EVENTS_PER_FRAME: usize = 100;

        self.sample = PointerSample::default();
        let mut drained = 0;

        while drained < MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(PlatformEvent::Pointer(sample)) => {
                    self.sample.merge(sample);
                    drained += 1;
                }
                Ok(PlatformEvent::WindowClosed) => return TickControl::Exit,
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_EVENTS_PER_FRAME {
            warn!("Event queue backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    /// Pointer input collected by the last [`collect_frame`](Self::collect_frame).
    pub(crate) fn sample(&self) -> PointerSample {
        self.sample
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pointer::PointerFlags;
    use crossbeam_channel::unbounded;

    fn pointer(position: Option<(u16, u16)>, flags: PointerFlags) -> PlatformEvent {
        PlatformEvent::Pointer(PointerSample::new(position, flags))
    }

    #[test]
    fn collect_handles_empty_queue() {
        let (_tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        let result = collector.collect_frame();

        assert_eq!(result, TickControl::Continue);
        assert!(collector.sample().is_empty());
    }

    #[test]
    fn collect_merges_multiple_samples() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(pointer(Some((10, 20)), PointerFlags::LEFT_DOWN)).unwrap();
        tx.send(pointer(Some((30, 40)), PointerFlags::LEFT_UP)).unwrap();
        tx.send(pointer(None, PointerFlags::WHEEL_UP)).unwrap();

        let result = collector.collect_frame();

        assert_eq!(result, TickControl::Continue);
        assert_eq!(collector.sample().position, Some((30, 40)));
        assert_eq!(
            collector.sample().flags,
            PointerFlags::LEFT_DOWN | PointerFlags::LEFT_UP | PointerFlags::WHEEL_UP
        );
    }

    #[test]
    fn collect_returns_exit_on_window_closed() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    fn collect_clears_previous_sample() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(pointer(Some((1, 1)), PointerFlags::RIGHT_DOWN)).unwrap();
        collector.collect_frame();
        assert!(!collector.sample().is_empty());

        collector.collect_frame();
        assert!(collector.sample().is_empty());
    }

    #[test]
    fn collect_is_bounded_per_frame() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        for i in 0..150u16 {
            tx.send(pointer(Some((i, i)), PointerFlags::empty())).unwrap();
        }

        collector.collect_frame();
        assert_eq!(collector.sample().position, Some((99, 99)));

        collector.collect_frame();
        assert_eq!(collector.sample().position, Some((149, 149)));
    }

    #[test]
    fn collect_returns_exit_on_disconnect() {
        let (tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        drop(tx);

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }
}
