//! Shared test infrastructure for reset-pixel integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use reset_pixel::hal::{DigitalInput, PixelLink, ResetLine, SerialPort};
use reset_pixel::time::{Clock, Ticks};
use reset_pixel::Controller;

// ============================================================================
// Mock Clock
// ============================================================================

/// Mock millisecond clock with controllable time
pub struct MockClock {
    now: Cell<u32>,
}

impl MockClock {
    pub fn new() -> Self {
        Self { now: Cell::new(0) }
    }

    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }

    pub fn set(&self, ms: u32) {
        self.now.set(ms);
    }
}

impl Clock for MockClock {
    fn now(&self) -> Ticks {
        Ticks(self.now.get())
    }
}

// ============================================================================
// Mock Button Pin
// ============================================================================

/// Mock button input pin; the test keeps a clone as its handle
#[derive(Clone)]
pub struct MockPin {
    level: Rc<Cell<bool>>,
}

impl MockPin {
    /// Creates a pin reading high: released, on pull-up wiring.
    pub fn released() -> Self {
        Self {
            level: Rc::new(Cell::new(true)),
        }
    }

    pub fn press(&self) {
        self.level.set(false);
    }

    pub fn release(&self) {
        self.level.set(true);
    }
}

impl DigitalInput for MockPin {
    fn is_high(&mut self) -> bool {
        self.level.get()
    }
}

// ============================================================================
// Mock Reset Line
// ============================================================================

/// Mock reset line recording every level change
#[derive(Clone)]
pub struct MockResetLine {
    active: Rc<Cell<bool>>,
    history: Rc<RefCell<Vec<bool>>>,
}

impl MockResetLine {
    pub fn new() -> Self {
        Self {
            active: Rc::new(Cell::new(false)),
            history: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn history(&self) -> Vec<bool> {
        self.history.borrow().clone()
    }
}

impl ResetLine for MockResetLine {
    fn set_active(&mut self, active: bool) {
        self.active.set(active);
        self.history.borrow_mut().push(active);
    }
}

// ============================================================================
// Mock Pixel Link
// ============================================================================

/// Mock pixel link recording every transmitted frame
#[derive(Clone)]
pub struct MockLink {
    frames: Rc<RefCell<Vec<[u8; 3]>>>,
}

impl MockLink {
    pub fn new() -> Self {
        Self {
            frames: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn last_frame(&self) -> Option<[u8; 3]> {
        self.frames.borrow().last().copied()
    }

    pub fn frames(&self) -> Vec<[u8; 3]> {
        self.frames.borrow().clone()
    }
}

impl PixelLink for MockLink {
    fn write(&mut self, frame: [u8; 3]) {
        self.frames.borrow_mut().push(frame);
    }
}

// ============================================================================
// Mock Serial Port
// ============================================================================

/// Mock serial port; the test queues bytes through its handle
#[derive(Clone)]
pub struct MockSerial {
    pending: Rc<RefCell<VecDeque<u8>>>,
}

impl MockSerial {
    pub fn new() -> Self {
        Self {
            pending: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    pub fn send(&self, bytes: &[u8]) {
        self.pending.borrow_mut().extend(bytes.iter().copied());
    }
}

impl SerialPort for MockSerial {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        let mut pending = self.pending.borrow_mut();
        let mut count = 0;
        while count < buf.len() {
            match pending.pop_front() {
                Some(byte) => {
                    buf[count] = byte;
                    count += 1;
                }
                None => break,
            }
        }
        count
    }
}

// ============================================================================
// Rig
// ============================================================================

pub type TestController<'c> =
    Controller<'c, MockClock, MockPin, MockResetLine, MockLink, MockLink, MockSerial>;

/// Handles the test keeps for steering and observing the mocks
pub struct Handles {
    pub pin: MockPin,
    pub reset: MockResetLine,
    pub external: MockLink,
    pub onboard: MockLink,
    pub serial: MockSerial,
}

/// Builds a controller over a full set of mocks
pub fn build(clock: &MockClock) -> (TestController<'_>, Handles) {
    let pin = MockPin::released();
    let reset = MockResetLine::new();
    let external = MockLink::new();
    let onboard = MockLink::new();
    let serial = MockSerial::new();

    let controller = Controller::new(
        clock,
        pin.clone(),
        reset.clone(),
        external.clone(),
        onboard.clone(),
        serial.clone(),
    );

    (
        controller,
        Handles {
            pin,
            reset,
            external,
            onboard,
            serial,
        },
    )
}

/// Advances time and polls once per simulated millisecond
pub fn run_for(controller: &mut TestController<'_>, clock: &MockClock, ms: u32) {
    for _ in 0..ms {
        clock.advance(1);
        controller.poll();
    }
}
