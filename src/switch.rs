//! The button state machine.
//!
//! Two coarse states follow [`PowerState`]. While off, a press switches the supply on.
//! While on, a press starts an off-request gesture whose meaning depends on the
//! [`Mode`] selected by the jumpers:
//!
//! - [`Mode::Instant`]: the press switches off right away.
//! - [`Mode::Atx`]: the hold is measured in [`HOLD_POLL`] ticks. Holding past
//!   [`POWERDOWN_THRESHOLD`](crate::consts::POWERDOWN_THRESHOLD) switches off while the
//!   button is still down, releasing after more than
//!   [`TURBO_THRESHOLD`](crate::consts::TURBO_THRESHOLD) (but before the power-down threshold) toggles
//!   the turbo latch, anything shorter is ignored.
//!
//! Every state change is written to the outputs and, when enabled, to storage before
//! the machine goes on.

use core::convert::Infallible;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::InputPin;
use fugit::MillisDurationU32;

use crate::consts::{HOLD_POLL, IDLE_POLL, OFF_REQUEST_DEBOUNCE, POWER_ON_DEBOUNCE, SETTLE_DELAY};
use crate::hold::{Gesture, HoldTimer};
use crate::io::{Button, Outputs, Storage};
use crate::persist::Persistence;
use crate::state::{Jumpers, Mode, PowerState, TurboState};

/// Outcome of one [`SoftSwitch::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
  PoweredOn,
  PoweredOff,
  TurboToggled,
  /// A press while on that changed nothing.
  Ignored,
}

pub struct SoftSwitch<P, O, S, D> {
  button: Button<P>,
  outputs: O,
  persistence: Persistence<S>,
  delay: D,
  jumpers: Jumpers,
  power: PowerState,
  turbo: TurboState,
}

impl<P, O, S, D> SoftSwitch<P, O, S, D>
where
  P: InputPin<Error = Infallible>,
  O: Outputs,
  S: Storage,
  D: DelayMs<u32>,
{
  /// Brings outputs and state to their starting point.
  ///
  /// Waits [`SETTLE_DELAY`] first. With the remember jumper open, the saved turbo and
  /// power state are restored and applied to the outputs, otherwise both outputs are
  /// left at their reset level (off).
  pub fn boot(button: P, jumpers: Jumpers, mut outputs: O, storage: S, mut delay: D) -> Self {
    delay.delay_ms(SETTLE_DELAY.to_millis());

    let mut persistence = Persistence::new(storage, jumpers.remember_last_state);
    let (power, turbo) = match persistence.load() {
      Some((power, turbo)) => {
        outputs.set_turbo(turbo.is_on());
        if power.is_on() {
          outputs.set_power(true);
        }
        (power, turbo)
      }
      None => (PowerState::Off, TurboState::OFF),
    };

    info!("boot: {} power={} turbo={}", jumpers, power, turbo);

    Self {
      button: Button::new(button),
      outputs,
      persistence,
      delay,
      jumpers,
      power,
      turbo,
    }
  }

  /// Runs one state cycle: waits for the next press and handles it to completion,
  /// including the matching release.
  pub fn step(&mut self) -> Transition {
    let transition = match self.power {
      PowerState::Off => self.power_on_press(),
      PowerState::On => self.off_request(),
    };
    info!("{} -> power={} turbo={}", transition, self.power, self.turbo);
    transition
  }

  pub fn run(&mut self) -> ! {
    loop {
      self.step();
    }
  }

  pub fn power(&self) -> PowerState {
    self.power
  }

  pub fn turbo(&self) -> TurboState {
    self.turbo
  }

  pub fn jumpers(&self) -> Jumpers {
    self.jumpers
  }

  /// Hands back the collaborators.
  pub fn release(self) -> (P, O, S, D) {
    (self.button.into_inner(), self.outputs, self.persistence.into_inner(), self.delay)
  }

  fn power_on_press(&mut self) -> Transition {
    self.button.wait_for_press(&mut self.delay, IDLE_POLL);
    self.set_power(PowerState::On);
    self.sleep(POWER_ON_DEBOUNCE);
    self.button.wait_for_release(&mut self.delay, IDLE_POLL);
    Transition::PoweredOn
  }

  fn off_request(&mut self) -> Transition {
    self.button.wait_for_press(&mut self.delay, IDLE_POLL);

    match self.jumpers.mode() {
      Mode::Instant => {
        self.set_power(PowerState::Off);
        self.sleep(OFF_REQUEST_DEBOUNCE);
        self.button.wait_for_release(&mut self.delay, HOLD_POLL);
        Transition::PoweredOff
      }
      Mode::Atx => self.measure_hold(),
    }
  }

  fn measure_hold(&mut self) -> Transition {
    self.sleep(OFF_REQUEST_DEBOUNCE);

    let mut hold = HoldTimer::new();
    while self.button.is_pressed() {
      hold.tick();
      if hold.exceeds_powerdown() && self.power.is_on() {
        info!("held for {=u16} ticks, powering down", hold.ticks());
        self.set_power(PowerState::Off);
      }
      self.sleep(HOLD_POLL);
    }

    let gesture = hold.gesture();
    debug!("released after {=u16} ticks: {}", hold.ticks(), gesture);

    if !self.power.is_on() {
      return Transition::PoweredOff;
    }

    match gesture {
      Gesture::Turbo => {
        self.set_turbo(self.turbo.inverted());
        Transition::TurboToggled
      }
      Gesture::Short | Gesture::Long => Transition::Ignored,
    }
  }

  fn set_power(&mut self, power: PowerState) {
    self.power = power;
    self.outputs.set_power(power.is_on());
    self.persistence.save_power(power);
  }

  fn set_turbo(&mut self, turbo: TurboState) {
    self.turbo = turbo;
    self.outputs.set_turbo(turbo.is_on());
    self.persistence.save_turbo(turbo);
  }

  fn sleep(&mut self, duration: MillisDurationU32) {
    self.delay.delay_ms(duration.to_millis());
  }
}
