#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Controller`**: owns all loop state and runs one iteration per `poll()`
//! - **`Button`** / **`Debouncer`**: raw pin samples in, debounced state and gesture events out
//! - **`ResetSequencer`**: timed assert/release of the hard-reset line
//! - **`CommandReader`**: serial bytes in, validated color commands out
//! - **`PixelChannel`** / **`BitBangLink`**: channel-ordered frames onto a single-wire LED
//! - **`Clock`** and the `hal` traits: the fixed seam to the hardware
//!
//! Colors are `palette::Srgb<u8>` throughout; 8-bit channels are the native
//! unit of both the wire protocol and the LED devices.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod button;
pub mod command;
pub mod controller;
pub mod hal;
pub mod pixel;
pub mod reset;
pub mod time;

pub use button::{Button, DEBOUNCE_MS, Debouncer, LONG_PRESS_MS};
pub use command::{CommandReader, LINE_CAPACITY, ParseError, ParseOutcome};
pub use controller::{Controller, LOOP_DELAY_MS};
pub use hal::{DigitalInput, PixelLink, ResetLine, SerialPort};
pub use pixel::{BitBangLink, ChannelOrder, PixelChannel};
pub use reset::{RESET_PULSE_MS, ResetPulse, ResetSequencer};
pub use time::{Clock, Ticks};

/// Black / off.
pub const COLOR_OFF: Srgb<u8> = Srgb::new(0, 0, 0);

/// Idle color the external LED shows until a serial command replaces it.
pub const COLOR_IDLE_DEFAULT: Srgb<u8> = Srgb::new(0, 10, 0);

/// Override shown on the external LED while the button is held.
pub const COLOR_PRESSED: Srgb<u8> = Srgb::new(255, 0, 0);

/// Onboard indicator while the reset pulse is in flight.
pub const COLOR_RESETTING: Srgb<u8> = Srgb::new(0, 200, 0);

/// Onboard indicator while the system is ready.
pub const COLOR_READY: Srgb<u8> = Srgb::new(30, 0, 0);

/// External LED startup flash before the first loop iteration.
pub const COLOR_STARTUP: Srgb<u8> = Srgb::new(10, 10, 10);
