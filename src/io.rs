//! Collaborator interfaces between the state machine and the hardware.

use core::convert::Infallible;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::InputPin;
use fugit::MillisDurationU32;

/// Unwraps a HAL result that cannot fail.
#[inline]
pub fn infallible<T>(result: Result<T, Infallible>) -> T {
  match result {
    Ok(value) => value,
    Err(never) => match never {},
  }
}

/// The two driven lines.
pub trait Outputs {
  /// Asserts (`true`) or releases the PSU enable line.
  fn set_power(&mut self, on: bool);

  /// Drives the turbo latch.
  fn set_turbo(&mut self, on: bool);
}

/// Byte addressable non-volatile store.
///
/// Both operations block until done. No checksum or wear levelling is expected;
/// a never-written cell returns whatever the medium holds.
pub trait Storage {
  fn read_byte(&mut self, addr: u8) -> u8;

  fn write_byte(&mut self, addr: u8, value: u8);
}

impl<T: Outputs + ?Sized> Outputs for &mut T {
  fn set_power(&mut self, on: bool) {
    (**self).set_power(on)
  }

  fn set_turbo(&mut self, on: bool) {
    (**self).set_turbo(on)
  }
}

impl<T: Storage + ?Sized> Storage for &mut T {
  fn read_byte(&mut self, addr: u8) -> u8 {
    (**self).read_byte(addr)
  }

  fn write_byte(&mut self, addr: u8, value: u8) {
    (**self).write_byte(addr, value)
  }
}

/// Active-low push button on a pulled-up input.
pub struct Button<P> {
  pin: P,
}

impl<P> Button<P>
where
  P: InputPin<Error = Infallible>,
{
  pub fn new(pin: P) -> Self {
    Self { pin }
  }

  pub fn is_pressed(&self) -> bool {
    infallible(self.pin.is_low())
  }

  /// Blocks until the button is down (falling edge), sampling every `poll`.
  pub fn wait_for_press<D: DelayMs<u32>>(&self, delay: &mut D, poll: MillisDurationU32) {
    while !self.is_pressed() {
      delay.delay_ms(poll.to_millis());
    }
  }

  /// Blocks until the button is up again (rising edge), sampling every `poll`.
  pub fn wait_for_release<D: DelayMs<u32>>(&self, delay: &mut D, poll: MillisDurationU32) {
    while self.is_pressed() {
      delay.delay_ms(poll.to_millis());
    }
  }

  pub fn into_inner(self) -> P {
    self.pin
  }
}
