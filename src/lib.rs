//! Soft power switching for an ATX power supply.
//!
//! A single push button and two jumpers drive the PSU enable line and a turbo latch.
//! The last power and turbo state are kept in a small byte store so they survive a
//! power loss when the "remember last state" jumper allows it.
//!
//! All hardware access goes through [`Outputs`], [`Storage`], an `embedded_hal` input pin
//! and a blocking delay, so the state machine in [`switch`] runs unchanged on the
//! target and in host tests.
#![cfg_attr(not(test), no_std)]

// must come first, the macros are used by the modules below
#[macro_use]
mod fmt;

pub mod consts;
pub mod hold;
pub mod io;
pub mod mirror;
pub mod persist;
pub mod state;
pub mod switch;

pub use hold::{Gesture, HoldTimer};
pub use io::{Button, Outputs, Storage};
pub use mirror::{MirroredStorage, Region};
pub use persist::Persistence;
pub use state::{Jumpers, Mode, PowerState, TurboState};
pub use switch::{SoftSwitch, Transition};
