//! Hardware trait seams.
//!
//! The control loop talks to the outside world exclusively through these
//! traits. They are infallible by design: implementations should handle any
//! hardware errors internally, since the loop has no error path it could
//! route them through.
//!
//! Pin setup, pull configuration and clock bring-up happen before the loop
//! starts and are not modeled here.

/// Trait for abstracting the raw button input pin.
///
/// The reference wiring is a momentary switch to ground with the internal
/// pull-up enabled, so the pin reads high while released.
pub trait DigitalInput {
    /// Returns true while the pin reads a logic-high level.
    fn is_high(&mut self) -> bool;
}

/// Trait for abstracting the hard-reset output line.
///
/// The line is active-low on the reference hardware: asserted means driven
/// to ground. Implementations map `active` to the electrical level so the
/// control logic only reasons about asserted/released.
pub trait ResetLine {
    /// Drives the line to its asserted (`true`) or released (`false`) state.
    fn set_active(&mut self, active: bool);
}

/// Trait for abstracting one addressable-LED data line.
///
/// Implement this for your transmission hardware (bit-banged GPIO, RMT, PIO,
/// SPI). [`BitBangLink`](crate::pixel::BitBangLink) is the portable
/// reference implementation.
pub trait PixelLink {
    /// Pushes one 3-byte frame, already in the device's channel order.
    fn write(&mut self, frame: [u8; 3]);
}

/// Trait for abstracting the byte-oriented serial command channel.
///
/// This is the data channel, independent from any console or debug output.
pub trait SerialPort {
    /// Reads pending bytes into `buf` without blocking.
    ///
    /// Returns the number of bytes read, 0 when nothing is pending. Must
    /// never wait for data to arrive.
    fn read(&mut self, buf: &mut [u8]) -> usize;
}
