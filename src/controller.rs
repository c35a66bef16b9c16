//! The cooperative control loop.
//!
//! [`Controller`] owns every piece of persistent state (button pipeline,
//! reset sequencer, command reader, both pixel channels and the stored idle
//! color) and advances all of them one step per [`poll`](Controller::poll).
//! Nothing in an iteration blocks; the only wait is the fixed sleep between
//! iterations in [`run`](Controller::run). A blocking step anywhere would
//! stall debouncing, the reset window and serial ingestion all at once.

use embedded_hal::delay::DelayNs;
use palette::Srgb;

use crate::button::Button;
use crate::command::{CommandReader, ParseOutcome};
use crate::hal::{DigitalInput, PixelLink, ResetLine, SerialPort};
use crate::pixel::{ChannelOrder, PixelChannel};
use crate::reset::ResetSequencer;
use crate::time::Clock;
use crate::{COLOR_IDLE_DEFAULT, COLOR_OFF, COLOR_PRESSED, COLOR_READY, COLOR_RESETTING, COLOR_STARTUP};

/// Sleep between loop iterations, in milliseconds.
pub const LOOP_DELAY_MS: u32 = 1;

/// Largest serial chunk consumed per iteration, in bytes.
const SERIAL_CHUNK: usize = 32;

/// Owns all loop state and runs the fixed iteration order.
///
/// One instance per device: one button, two LED outputs (the external
/// indicator in GRB order, the onboard indicator in RGB order), one reset
/// line and one serial command channel. The clock is borrowed so tests can
/// hold on to it and steer time.
pub struct Controller<'c, C, B, R, E, O, S>
where
    C: Clock,
    B: DigitalInput,
    R: ResetLine,
    E: PixelLink,
    O: PixelLink,
    S: SerialPort,
{
    clock: &'c C,
    button_pin: B,
    button: Button,
    reset: ResetSequencer<R>,
    reader: CommandReader,
    serial: S,
    external: PixelChannel<E>,
    onboard: PixelChannel<O>,
    idle_color: Srgb<u8>,
}

impl<'c, C, B, R, E, O, S> Controller<'c, C, B, R, E, O, S>
where
    C: Clock,
    B: DigitalInput,
    R: ResetLine,
    E: PixelLink,
    O: PixelLink,
    S: SerialPort,
{
    /// Creates the controller and shows the startup indicators.
    ///
    /// The external LED flashes the startup color, the onboard LED shows
    /// ready, and the reset line starts released. The first `poll` replaces
    /// the startup flash with the idle color.
    pub fn new(
        clock: &'c C,
        button_pin: B,
        reset_line: R,
        external_link: E,
        onboard_link: O,
        serial: S,
    ) -> Self {
        let mut external = PixelChannel::new(external_link, ChannelOrder::Grb);
        let mut onboard = PixelChannel::new(onboard_link, ChannelOrder::Rgb);
        external.show(COLOR_STARTUP);
        onboard.show(COLOR_READY);

        Self {
            clock,
            button_pin,
            button: Button::new(),
            reset: ResetSequencer::new(reset_line),
            reader: CommandReader::new(),
            serial,
            external,
            onboard,
            idle_color: COLOR_IDLE_DEFAULT,
        }
    }

    /// Runs one loop iteration without blocking.
    pub fn poll(&mut self) {
        let now = self.clock.now();

        // Button pipeline. Pull-up wiring: pressed reads low.
        let pressed = !self.button_pin.is_high();
        self.button.update(pressed, now);

        // External LED: red override while held, stored idle color
        // otherwise. Retransmitted every iteration.
        let color = if self.button.is_pressed() {
            COLOR_PRESSED
        } else {
            self.idle_color
        };
        self.external.show(color);

        // Short presses are classified but bound to no action.
        let _ = self.button.short_press_count();

        // Long press: clear the stored idle color, black the external LED
        // and fire the reset pulse. Clearing the color is part of the
        // gesture, not a side effect of the pulse.
        if self.button.is_long_press() {
            self.idle_color = COLOR_OFF;
            self.external.show(COLOR_OFF);
            self.reset.trigger(now);
            self.onboard.show(COLOR_RESETTING);
        }

        // Reset window bookkeeping.
        if self.reset.poll(now) {
            self.onboard.show(COLOR_READY);
        }

        // Serial ingestion: one bounded non-blocking read per iteration.
        let mut chunk = [0u8; SERIAL_CHUNK];
        let count = self.serial.read(&mut chunk);
        if count > 0 {
            if let Some(outcome) = self.reader.push(&chunk[..count]) {
                self.apply(outcome);
            }
        }
    }

    fn apply(&mut self, outcome: ParseOutcome) {
        match outcome {
            ParseOutcome::Color(color) => {
                #[cfg(feature = "defmt")]
                defmt::info!(
                    "R:{=u8} G:{=u8} B:{=u8}",
                    color.red,
                    color.green,
                    color.blue
                );

                self.idle_color = color;
                // While held the red override wins; the new color shows on
                // release. Released, it takes effect immediately.
                if !self.button.is_pressed() {
                    self.external.show(color);
                }
            }
            ParseOutcome::DiscardedNoComma => {}
            ParseOutcome::Failed(_error) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("command rejected: {}", _error);
            }
        }
    }

    /// Runs the loop forever with the fixed per-iteration sleep.
    pub fn run<D: DelayNs>(mut self, delay: &mut D) -> ! {
        loop {
            self.poll();
            delay.delay_ms(LOOP_DELAY_MS);
        }
    }

    /// The stored idle color the external LED shows while released.
    pub fn idle_color(&self) -> Srgb<u8> {
        self.idle_color
    }

    /// Current debounced button state.
    pub fn is_pressed(&self) -> bool {
        self.button.is_pressed()
    }

    /// True while a reset pulse is in flight.
    pub fn is_reset_pulsing(&self) -> bool {
        self.reset.is_pulsing()
    }

    /// Last frame transmitted on the external LED output.
    pub fn external_frame(&self) -> [u8; 3] {
        self.external.frame()
    }

    /// Last frame transmitted on the onboard LED output.
    pub fn onboard_frame(&self) -> [u8; 3] {
        self.onboard.frame()
    }
}
