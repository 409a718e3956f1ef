use embedded_hal::digital::v2::OutputPin;
use rp_pico::hal;
use softpower::io::infallible;
use softpower::Outputs;

use crate::consts::*;

pub type PsOnPin = hal::gpio::Pin<hal::gpio::pin::bank0::Gpio19, hal::gpio::PushPullOutput>;
pub type TurboPin = hal::gpio::Pin<hal::gpio::pin::bank0::Gpio18, hal::gpio::PushPullOutput>;
pub type LedPin = hal::gpio::Pin<hal::gpio::pin::bank0::Gpio25, hal::gpio::PushPullOutput>;

/// PS_ON and turbo lines of the board, with the onboard LED following PS_ON.
pub struct PicoOutputs {
  ps_on: PsOnPin,
  turbo: TurboPin,
  led: LedPin,
}

impl PicoOutputs {
  pub fn new(ps_on: PsOnPin, turbo: TurboPin, led: LedPin) -> Self {
    Self { ps_on, turbo, led }
  }
}

impl Outputs for PicoOutputs {
  fn set_power(&mut self, on: bool) {
    let state = match on {
      true => GPIO_PS_ON_ACTIVE_POLARITY,
      false => !GPIO_PS_ON_ACTIVE_POLARITY,
    };
    infallible(self.ps_on.set_state(state));

    if cfg!(feature = "status-led") {
      infallible(self.led.set_state(on.into()));
    }
  }

  fn set_turbo(&mut self, on: bool) {
    let state = match on {
      true => GPIO_TURBO_ACTIVE_POLARITY,
      false => !GPIO_TURBO_ACTIVE_POLARITY,
    };
    infallible(self.turbo.set_state(state));
  }
}
