//! Hold-time measurement of an off-request gesture in ATX mode.

use crate::consts::{HOLD_GUARD, POWERDOWN_THRESHOLD, TURBO_THRESHOLD};

/// What a finished hold means.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
  /// Up to [`TURBO_THRESHOLD`] ticks. Ignored.
  Short,
  /// Strictly between the turbo and power-down thresholds. Toggles turbo.
  Turbo,
  /// [`POWERDOWN_THRESHOLD`] ticks or more. Power-down, if any, already happened while held.
  Long,
}

impl Gesture {
  pub const fn classify(ticks: u16) -> Self {
    if ticks <= TURBO_THRESHOLD {
      Self::Short
    } else if ticks < POWERDOWN_THRESHOLD {
      Self::Turbo
    } else {
      Self::Long
    }
  }
}

/// Counts hold polls. One tick per [`HOLD_POLL`](crate::consts::HOLD_POLL).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoldTimer {
  ticks: u16,
}

impl HoldTimer {
  pub const fn new() -> Self {
    Self { ticks: 0 }
  }

  /// Counts one poll and returns the new value.
  /// Restarts from zero on reaching [`HOLD_GUARD`].
  pub fn tick(&mut self) -> u16 {
    self.ticks += 1;
    if self.ticks == HOLD_GUARD {
      trace!("hold counter reached guard, restarting");
      self.ticks = 0;
    }
    self.ticks
  }

  pub const fn ticks(&self) -> u16 {
    self.ticks
  }

  /// The power-down threshold must be exceeded, reaching it exactly is not enough.
  pub const fn exceeds_powerdown(&self) -> bool {
    self.ticks > POWERDOWN_THRESHOLD
  }

  pub const fn gesture(&self) -> Gesture {
    Gesture::classify(self.ticks)
  }
}
