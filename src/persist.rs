// Read/write discipline for the persisted power and turbo bytes

use crate::consts::{POWER_STATE_ADDR, TURBO_STATE_ADDR};
use crate::io::Storage;
use crate::state::{PowerState, TurboState};

/// Storage gated by the "remember last state" jumper.
///
/// When the jumper disables persistence the store is never read or written.
pub struct Persistence<S> {
  storage: S,
  enabled: bool,
}

impl<S: Storage> Persistence<S> {
  pub fn new(storage: S, enabled: bool) -> Self {
    Self { storage, enabled }
  }

  /// Restores the last saved state, turbo byte first.
  /// Returns `None` without touching the store when persistence is off.
  pub fn load(&mut self) -> Option<(PowerState, TurboState)> {
    if !self.enabled {
      return None;
    }

    let turbo_byte = self.storage.read_byte(TURBO_STATE_ADDR);
    let power_byte = self.storage.read_byte(POWER_STATE_ADDR);
    debug!("persisted bytes: power={=u8:#x} turbo={=u8:#x}", power_byte, turbo_byte);

    Some((PowerState::from_byte(power_byte), TurboState::from_byte(turbo_byte)))
  }

  pub fn save_power(&mut self, power: PowerState) {
    if self.enabled {
      self.storage.write_byte(POWER_STATE_ADDR, power.to_byte());
    }
  }

  pub fn save_turbo(&mut self, turbo: TurboState) {
    if self.enabled {
      self.storage.write_byte(TURBO_STATE_ADDR, turbo.to_byte());
    }
  }

  pub fn into_inner(self) -> S {
    self.storage
  }
}
