// Device state record and boot-time configuration

use core::convert::Infallible;

use embedded_hal::digital::v2::InputPin;

use crate::io::infallible;

/// Whether the PSU enable output is asserted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
  #[default]
  Off,
  On,
}

impl PowerState {
  /// Decodes a persisted byte. Every non-zero value means on, erased storage included.
  pub const fn from_byte(byte: u8) -> Self {
    if byte != 0 {
      Self::On
    } else {
      Self::Off
    }
  }

  pub const fn to_byte(self) -> u8 {
    match self {
      Self::Off => 0,
      Self::On => 1,
    }
  }

  pub const fn is_on(self) -> bool {
    matches!(self, Self::On)
  }
}

/// Level of the turbo latch output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TurboState(pub bool);

impl TurboState {
  pub const OFF: Self = Self(false);
  pub const ON: Self = Self(true);

  /// Decodes a persisted byte with the same non-zero rule as [`PowerState::from_byte`].
  pub const fn from_byte(byte: u8) -> Self {
    Self(byte != 0)
  }

  pub const fn to_byte(self) -> u8 {
    self.0 as u8
  }

  pub const fn is_on(self) -> bool {
    self.0
  }

  #[must_use]
  pub const fn inverted(self) -> Self {
    Self(!self.0)
  }
}

/// How a press is interpreted while the supply is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
  /// Any press switches off.
  Instant,
  /// Long hold switches off, medium hold toggles turbo.
  Atx,
}

/// Jumper settings, sampled once at boot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Jumpers {
  pub atx_mode: bool,
  pub remember_last_state: bool,
}

impl Jumpers {
  /// Samples both jumper pins.
  ///
  /// # Semantics
  /// The pins are pulled up. An open jumper reads high and enables its feature,
  /// a jumper bridged to ground disables it.
  pub fn read<A, R>(atx_pin: &A, remember_pin: &R) -> Self
  where
    A: InputPin<Error = Infallible>,
    R: InputPin<Error = Infallible>,
  {
    Self {
      atx_mode: infallible(atx_pin.is_high()),
      remember_last_state: infallible(remember_pin.is_high()),
    }
  }

  pub const fn mode(&self) -> Mode {
    if self.atx_mode {
      Mode::Atx
    } else {
      Mode::Instant
    }
  }
}
