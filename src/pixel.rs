//! Addressable-LED frame encoding and the bit-banged reference driver.
//!
//! A pixel device takes its color as a 24-bit serial stream on a single data
//! line. [`PixelChannel`] turns an [`Srgb<u8>`] color into the device's byte
//! order and hands the frame to a [`PixelLink`]; [`BitBangLink`] is a
//! [`PixelLink`] that clocks the frame out on a plain GPIO with the
//! single-wire pulse timing.

use crate::hal::PixelLink;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use palette::Srgb;

/// High time of a one bit, in nanoseconds.
pub const T1H_NS: u32 = 800;
/// Low time of a one bit, in nanoseconds.
pub const T1L_NS: u32 = 450;
/// High time of a zero bit, in nanoseconds.
pub const T0H_NS: u32 = 450;
/// Low time of a zero bit, in nanoseconds.
pub const T0L_NS: u32 = 800;
/// Idle-low hold after a frame so the device latches it, in nanoseconds.
pub const LATCH_NS: u32 = 60_000;

/// Byte order expected by a pixel device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelOrder {
    /// Green, red, blue, the common WS2812 wiring.
    Grb,
    /// Red, green, blue.
    Rgb,
}

impl ChannelOrder {
    /// Arranges a color's channels into a wire frame.
    #[inline]
    pub fn encode(self, color: Srgb<u8>) -> [u8; 3] {
        match self {
            ChannelOrder::Grb => [color.green, color.red, color.blue],
            ChannelOrder::Rgb => [color.red, color.green, color.blue],
        }
    }
}

/// One LED output: a transmission link, its declared channel order and its
/// 3-byte output frame.
///
/// The frame is rebuilt from the requested color immediately before every
/// transmission; the control logic never reads it back.
pub struct PixelChannel<L: PixelLink> {
    link: L,
    order: ChannelOrder,
    frame: [u8; 3],
}

impl<L: PixelLink> PixelChannel<L> {
    /// Creates a channel. Nothing is transmitted until the first `show`.
    pub fn new(link: L, order: ChannelOrder) -> Self {
        Self {
            link,
            order,
            frame: [0; 3],
        }
    }

    /// Encodes `color` into the output frame and transmits it.
    pub fn show(&mut self, color: Srgb<u8>) {
        self.frame = self.order.encode(color);
        self.link.write(self.frame);
    }

    /// Returns the last transmitted frame.
    pub fn frame(&self) -> [u8; 3] {
        self.frame
    }

    /// Returns the channel order this output was declared with.
    pub fn order(&self) -> ChannelOrder {
        self.order
    }
}

/// Bit-banged [`PixelLink`] over a plain GPIO output.
///
/// Serializes each frame as 24 high-then-low pulse pairs, most significant
/// bit first, byte 0 first. A one bit is a long high and a short low, a zero
/// bit the reverse; both last ~1.25 µs. The whole frame runs inside a
/// critical section: the device treats any overlong low as a latch, so the
/// 24-bit transmission must not be interrupted mid-stream.
pub struct BitBangLink<P: OutputPin, D: DelayNs> {
    pin: P,
    delay: D,
}

impl<P: OutputPin, D: DelayNs> BitBangLink<P, D> {
    /// Creates a link over an already-configured output pin.
    ///
    /// The delay source must resolve single-digit-microsecond waits; a
    /// cycle-counting delay is the usual choice.
    pub fn new(pin: P, delay: D) -> Self {
        Self { pin, delay }
    }

    fn pulse(&mut self, high_ns: u32, low_ns: u32) {
        let _ = self.pin.set_high();
        self.delay.delay_ns(high_ns);
        let _ = self.pin.set_low();
        self.delay.delay_ns(low_ns);
    }
}

impl<P: OutputPin, D: DelayNs> PixelLink for BitBangLink<P, D> {
    fn write(&mut self, frame: [u8; 3]) {
        critical_section::with(|_| {
            for byte in frame {
                for bit in (0..8).rev() {
                    if (byte >> bit) & 1 == 1 {
                        self.pulse(T1H_NS, T1L_NS);
                    } else {
                        self.pulse(T0H_NS, T0L_NS);
                    }
                }
            }
        });
        // Latch hold can be interrupted without consequence.
        self.delay.delay_ns(LATCH_NS);
    }
}
