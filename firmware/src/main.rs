#![no_std]
#![no_main]
mod consts;
mod flash;
mod outputs;

use panic_halt as _;

#[rtic::app(device = rp_pico::hal::pac, peripherals = true)]
mod app {

  use defmt::*;
  use defmt_rtt as _;
  use rp_pico::hal::clocks::init_clocks_and_plls;
  use rp_pico::hal::watchdog::Watchdog;
  use rp_pico::hal::{self, Clock, Sio};
  use rp_pico::XOSC_CRYSTAL_FREQ;
  use softpower::{Jumpers, SoftSwitch};

  use crate::consts::*;
  use crate::flash::{FlashStorage, StateSector};
  use crate::outputs::PicoOutputs;

  type ButtonPin = hal::gpio::Pin<hal::gpio::pin::bank0::Gpio20, hal::gpio::PullUpInput>;
  type Switch = SoftSwitch<ButtonPin, PicoOutputs, FlashStorage, cortex_m::delay::Delay>;

  #[shared]
  struct Shared {}

  #[local]
  struct Local {
    switch: Switch,
  }

  #[init]
  fn init(c: init::Context) -> (Shared, Local, init::Monotonics) {
    // Soft-reset does not release the hardware spinlocks
    // Release them now to avoid a deadlock after debug or watchdog reset
    unsafe {
      hal::sio::spinlock_reset();
    }
    info!("Initializing Raspberry Pi Pico.");

    let mut resets = c.device.RESETS;
    let mut watchdog = Watchdog::new(c.device.WATCHDOG);
    let clocks = unwrap!(init_clocks_and_plls(
      XOSC_CRYSTAL_FREQ,
      c.device.XOSC,
      c.device.CLOCKS,
      c.device.PLL_SYS,
      c.device.PLL_USB,
      &mut resets,
      &mut watchdog,
    )
    .ok());

    let sio = Sio::new(c.device.SIO);
    let pins = rp_pico::Pins::new(c.device.IO_BANK0, c.device.PADS_BANK0, sio.gpio_bank0, &mut resets);

    // outputs are driven to their released levels here, restored state is applied after the settle delay
    let ps_on = pins.gpio19.into_push_pull_output_in_state(!GPIO_PS_ON_ACTIVE_POLARITY);
    let turbo = pins.gpio18.into_push_pull_output_in_state(!GPIO_TURBO_ACTIVE_POLARITY);
    let led = pins.led.into_push_pull_output();

    let button = pins.gpio20.into_pull_up_input();
    let atx_jumper = pins.gpio21.into_pull_up_input();
    let remember_jumper = pins.gpio22.into_pull_up_input();
    let jumpers = Jumpers::read(&atx_jumper, &remember_jumper);

    let delay = cortex_m::delay::Delay::new(c.core.SYST, clocks.system_clock.freq().to_Hz());
    let storage = FlashStorage::new(StateSector);

    let switch = SoftSwitch::boot(button, jumpers, PicoOutputs::new(ps_on, turbo, led), storage, delay);

    info!("Initialization successful, polling the power button from idle");

    (Shared {}, Local { switch }, init::Monotonics())
  }

  #[idle(local = [switch])]
  fn idle(c: idle::Context) -> ! {
    c.local.switch.run()
  }
}
