//! Button debouncing and gesture classification.
//!
//! [`Debouncer`] turns a noisy raw input into a clean boolean; [`Button`]
//! sits on top of one and classifies presses into short and long gestures.
//! Both advance only when fed samples, so they can be driven by a real pin
//! in the loop or by synthetic timestamps in tests.

use crate::time::Ticks;

/// Debounce window a new raw level must hold before it is accepted, in
/// milliseconds.
pub const DEBOUNCE_MS: u32 = 10;

/// Hold time that turns a press into a long press, in milliseconds.
pub const LONG_PRESS_MS: u32 = 1000;

/// Internal debounce state over raw samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum DebounceState {
    /// Raw input agrees with the stable value.
    Stable,
    /// Raw input flipped to `level` and is waiting out the debounce window.
    Settling { level: bool, since: Ticks },
}

/// Debounces a noisy digital input.
///
/// The stable value changes only after the raw input has held a new level
/// for the full debounce window; glitches shorter than the window never
/// register.
pub struct Debouncer {
    stable: bool,
    state: DebounceState,
    rose: bool,
    fell: bool,
    window_ms: u32,
}

impl Debouncer {
    /// Creates a debouncer stable at `initial`, with the default window.
    pub fn new(initial: bool) -> Self {
        Self::with_window(initial, DEBOUNCE_MS)
    }

    /// Creates a debouncer with a custom debounce window.
    pub fn with_window(initial: bool, window_ms: u32) -> Self {
        Self {
            stable: initial,
            state: DebounceState::Stable,
            rose: false,
            fell: false,
            window_ms,
        }
    }

    /// Feeds one raw sample taken at `now`.
    pub fn update(&mut self, raw: bool, now: Ticks) {
        self.rose = false;
        self.fell = false;

        match self.state {
            DebounceState::Stable => {
                if raw != self.stable {
                    self.state = DebounceState::Settling { level: raw, since: now };
                }
            }
            DebounceState::Settling { level, since } => {
                if raw != level {
                    // Bounced back before the window elapsed; no transition.
                    self.state = DebounceState::Stable;
                } else if now.since(since) >= self.window_ms {
                    self.stable = raw;
                    self.rose = raw;
                    self.fell = !raw;
                    self.state = DebounceState::Stable;
                }
            }
        }
    }

    /// Current stable value.
    pub fn value(&self) -> bool {
        self.stable
    }

    /// True for the one update where the stable value went high.
    pub fn rose(&self) -> bool {
        self.rose
    }

    /// True for the one update where the stable value went low.
    pub fn fell(&self) -> bool {
        self.fell
    }
}

/// Classifies debounced presses into short and long gestures.
///
/// Samples are the logical *pressed* boolean; wiring polarity is the
/// caller's concern. The initial stable state is released: on power-up the
/// pull keeps the input at its released level until sampling proves
/// otherwise.
pub struct Button {
    debouncer: Debouncer,
    pressed_at: Option<Ticks>,
    short_presses: u8,
    long_press_fired: bool,
    long_press_pending: bool,
    long_press_ms: u32,
}

impl Button {
    /// Creates a button with the default gesture thresholds.
    pub fn new() -> Self {
        Self::with_long_press(LONG_PRESS_MS)
    }

    /// Creates a button with a custom long-press threshold.
    pub fn with_long_press(long_press_ms: u32) -> Self {
        Self {
            debouncer: Debouncer::new(false),
            pressed_at: None,
            short_presses: 0,
            long_press_fired: false,
            long_press_pending: false,
            long_press_ms,
        }
    }

    /// Feeds one raw pressed sample taken at `now`.
    pub fn update(&mut self, pressed: bool, now: Ticks) {
        self.debouncer.update(pressed, now);

        if self.debouncer.rose() {
            self.pressed_at = Some(now);
            self.long_press_fired = false;
        }

        if self.debouncer.fell() {
            // A release before the long-press threshold completes a short
            // press; a release after it just rearms the long-press latch.
            if !self.long_press_fired {
                self.short_presses = self.short_presses.saturating_add(1);
            }
            self.pressed_at = None;
            self.long_press_fired = false;
        }

        if let Some(at) = self.pressed_at {
            if !self.long_press_fired && now.since(at) >= self.long_press_ms {
                self.long_press_fired = true;
                self.long_press_pending = true;
            }
        }
    }

    /// Current debounced pressed state.
    pub fn is_pressed(&self) -> bool {
        self.debouncer.value()
    }

    /// Number of short presses completed since the last call.
    ///
    /// Reading clears the count.
    pub fn short_press_count(&mut self) -> u8 {
        core::mem::take(&mut self.short_presses)
    }

    /// True exactly once per continuous press that exceeds the long-press
    /// threshold.
    ///
    /// Does not re-fire while the button stays held; rearms on release.
    pub fn is_long_press(&mut self) -> bool {
        core::mem::take(&mut self.long_press_pending)
    }
}

impl Default for Button {
    fn default() -> Self {
        Self::new()
    }
}
