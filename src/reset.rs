//! Timed hard-reset pulse sequencing.
//!
//! A long press asks for a hardware reset of the downstream device: the
//! reset line is asserted, held for a fixed window and released again. The
//! sequencer owns the line and is advanced by polling, so the window is
//! measured with loop timestamps rather than a blocking wait.

use crate::hal::ResetLine;
use crate::time::Ticks;

/// How long the reset line stays asserted, in milliseconds.
pub const RESET_PULSE_MS: u32 = 2000;

/// Pulse state of the reset sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetPulse {
    /// Line released, nothing in flight.
    Idle,
    /// Line asserted since `started_at`.
    Pulsing {
        /// Timestamp of the (latest) trigger.
        started_at: Ticks,
    },
}

/// Drives the hard-reset line for a fixed window, then restores it.
pub struct ResetSequencer<R: ResetLine> {
    line: R,
    pulse: ResetPulse,
    width_ms: u32,
}

impl<R: ResetLine> ResetSequencer<R> {
    /// Creates a sequencer and releases the line.
    pub fn new(line: R) -> Self {
        Self::with_width(line, RESET_PULSE_MS)
    }

    /// Creates a sequencer with a custom pulse width.
    pub fn with_width(mut line: R, width_ms: u32) -> Self {
        line.set_active(false);
        Self {
            line,
            pulse: ResetPulse::Idle,
            width_ms,
        }
    }

    /// Asserts the line and starts the pulse window at `now`.
    ///
    /// At most one pulse is ever in flight. Triggering while pulsing does
    /// not queue a second pulse; it overwrites the timestamp, restarting
    /// the window from `now`.
    pub fn trigger(&mut self, now: Ticks) {
        self.line.set_active(true);
        self.pulse = ResetPulse::Pulsing { started_at: now };
    }

    /// Advances the pulse window.
    ///
    /// Returns true exactly once, on the poll where the window has elapsed
    /// and the line was released.
    pub fn poll(&mut self, now: Ticks) -> bool {
        match self.pulse {
            ResetPulse::Idle => false,
            ResetPulse::Pulsing { started_at } => {
                if now.since(started_at) > self.width_ms {
                    self.line.set_active(false);
                    self.pulse = ResetPulse::Idle;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// True while the line is asserted.
    pub fn is_pulsing(&self) -> bool {
        matches!(self.pulse, ResetPulse::Pulsing { .. })
    }

    /// Current pulse state.
    pub fn pulse(&self) -> ResetPulse {
        self.pulse
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    #[derive(Clone)]
    struct TestLine(Rc<RefCell<Vec<bool>>>);

    impl TestLine {
        fn new() -> Self {
            TestLine(Rc::new(RefCell::new(Vec::new())))
        }

        fn levels(&self) -> Vec<bool> {
            self.0.borrow().clone()
        }
    }

    impl ResetLine for TestLine {
        fn set_active(&mut self, active: bool) {
            self.0.borrow_mut().push(active);
        }
    }

    #[test]
    fn construction_releases_the_line() {
        let line = TestLine::new();
        let sequencer = ResetSequencer::new(line.clone());

        assert!(!sequencer.is_pulsing());
        assert_eq!(line.levels(), [false]);
    }

    #[test]
    fn pulse_releases_after_the_window() {
        let line = TestLine::new();
        let mut sequencer = ResetSequencer::new(line.clone());

        sequencer.trigger(Ticks(0));
        assert!(sequencer.is_pulsing());
        assert_eq!(line.levels(), [false, true]);

        assert!(!sequencer.poll(Ticks(1999)));
        assert!(!sequencer.poll(Ticks(2000)));
        assert!(sequencer.is_pulsing());

        assert!(sequencer.poll(Ticks(2001)));
        assert!(!sequencer.is_pulsing());
        assert_eq!(line.levels(), [false, true, false]);

        // Completion reports once; later polls stay quiet.
        assert!(!sequencer.poll(Ticks(2002)));
    }

    #[test]
    fn retrigger_restarts_the_window() {
        let line = TestLine::new();
        let mut sequencer = ResetSequencer::new(line.clone());

        sequencer.trigger(Ticks(0));
        assert!(!sequencer.poll(Ticks(1000)));

        sequencer.trigger(Ticks(1000));
        // 2000 ms after the first trigger the window has not elapsed.
        assert!(!sequencer.poll(Ticks(2001)));
        assert!(sequencer.is_pulsing());

        // It elapses 2000 ms after the second trigger.
        assert!(sequencer.poll(Ticks(3001)));
        assert_eq!(sequencer.pulse(), ResetPulse::Idle);
    }

    #[test]
    fn idle_poll_is_a_no_op() {
        let line = TestLine::new();
        let mut sequencer = ResetSequencer::new(line.clone());

        assert!(!sequencer.poll(Ticks(5000)));
        assert_eq!(line.levels(), [false]);
    }
}
