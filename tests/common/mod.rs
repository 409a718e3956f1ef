//! Simulated board: a millisecond clock advanced only by the delay, a button scripted
//! against that clock, and recording outputs and storage.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::InputPin;
use softpower::{Jumpers, Outputs, SoftSwitch, Storage};

/// Time allowed past the last scripted release before a wait is considered stuck.
const IDLE_LIMIT_MS: u64 = 60_000;

#[derive(Default)]
pub struct Sim {
  now: Cell<u64>,
  /// Half-open `[start, end)` intervals during which the button is down.
  presses: RefCell<Vec<(u64, u64)>>,
}

impl Sim {
  pub fn new() -> Rc<Self> {
    Rc::new(Self::default())
  }

  pub fn now(&self) -> u64 {
    self.now.get()
  }

  /// Schedules a press `gap` ms from now lasting `duration` ms. Returns the press time.
  pub fn press_after(&self, gap: u64, duration: u64) -> u64 {
    let start = self.now() + gap;
    self.presses.borrow_mut().push((start, start + duration));
    start
  }

  /// Schedules a press that an ATX hold measurement counts as exactly `ticks` ticks.
  pub fn hold_after(&self, gap: u64, ticks: u64) -> u64 {
    self.press_after(gap, hold_ms(ticks))
  }

  fn pressed(&self) -> bool {
    let now = self.now();
    self.presses.borrow().iter().any(|&(start, end)| start <= now && now < end)
  }

  fn advance(&self, ms: u32) {
    let now = self.now() + u64::from(ms);
    let last = self.presses.borrow().iter().map(|&(_, end)| end).max().unwrap_or(0);
    assert!(
      now <= last + IDLE_LIMIT_MS,
      "still waiting at {now} ms, last scripted release was at {last} ms"
    );
    self.now.set(now);
  }
}

/// Press length for a hold of `ticks` polls: the first poll happens after the 10 ms
/// debounce, then one every 10 ms.
pub fn hold_ms(ticks: u64) -> u64 {
  ticks * 10 + 5
}

pub struct SimButton(pub Rc<Sim>);

impl InputPin for SimButton {
  type Error = Infallible;

  fn is_high(&self) -> Result<bool, Infallible> {
    Ok(!self.0.pressed())
  }

  fn is_low(&self) -> Result<bool, Infallible> {
    Ok(self.0.pressed())
  }
}

pub struct SimDelay(pub Rc<Sim>);

impl DelayMs<u32> for SimDelay {
  fn delay_ms(&mut self, ms: u32) {
    self.0.advance(ms);
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line {
  Power,
  Turbo,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Change {
  pub at: u64,
  pub line: Line,
  pub on: bool,
}

pub struct SimOutputs {
  sim: Rc<Sim>,
  pub power: bool,
  pub turbo: bool,
  pub changes: Vec<Change>,
}

impl SimOutputs {
  pub fn new(sim: &Rc<Sim>) -> Self {
    Self {
      sim: sim.clone(),
      power: false,
      turbo: false,
      changes: Vec::new(),
    }
  }

  pub fn changes_of(&self, line: Line) -> Vec<Change> {
    self.changes.iter().copied().filter(|c| c.line == line).collect()
  }

  fn record(&mut self, line: Line, on: bool) {
    self.changes.push(Change {
      at: self.sim.now(),
      line,
      on,
    });
  }
}

impl Outputs for SimOutputs {
  fn set_power(&mut self, on: bool) {
    self.power = on;
    self.record(Line::Power, on);
  }

  fn set_turbo(&mut self, on: bool) {
    self.turbo = on;
    self.record(Line::Turbo, on);
  }
}

pub struct SimStorage {
  pub bytes: [u8; 256],
  pub reads: Vec<u8>,
  /// `(address, value)` in write order.
  pub writes: Vec<(u8, u8)>,
}

impl SimStorage {
  pub fn zeroed() -> Self {
    Self::filled(0)
  }

  /// Fresh device: never written cells read as erased.
  pub fn erased() -> Self {
    Self::filled(0xff)
  }

  pub fn filled(byte: u8) -> Self {
    Self {
      bytes: [byte; 256],
      reads: Vec::new(),
      writes: Vec::new(),
    }
  }

  pub fn with(mut self, addr: u8, value: u8) -> Self {
    self.bytes[addr as usize] = value;
    self
  }
}

impl Storage for SimStorage {
  fn read_byte(&mut self, addr: u8) -> u8 {
    self.reads.push(addr);
    self.bytes[addr as usize]
  }

  fn write_byte(&mut self, addr: u8, value: u8) {
    self.writes.push((addr, value));
    self.bytes[addr as usize] = value;
  }
}

pub type SimSwitch = SoftSwitch<SimButton, SimOutputs, SimStorage, SimDelay>;

pub fn jumpers(atx_mode: bool, remember_last_state: bool) -> Jumpers {
  Jumpers {
    atx_mode,
    remember_last_state,
  }
}

pub fn boot(sim: &Rc<Sim>, jumpers: Jumpers, storage: SimStorage) -> SimSwitch {
  SoftSwitch::boot(
    SimButton(sim.clone()),
    jumpers,
    SimOutputs::new(sim),
    storage,
    SimDelay(sim.clone()),
  )
}

/// Boots, then presses once to reach the on state.
pub fn boot_powered_on(sim: &Rc<Sim>, jumpers: Jumpers, storage: SimStorage) -> SimSwitch {
  let mut switch = boot(sim, jumpers, storage);
  sim.press_after(50, 80);
  switch.step();
  assert!(switch.power().is_on());
  switch
}

/// Powers the simulated board down and up again with the same storage.
pub fn reboot(sim: &Rc<Sim>, switch: SimSwitch) -> SimSwitch {
  let jumpers = switch.jumpers();
  let (_, _, mut storage, _) = switch.release();
  storage.reads.clear();
  storage.writes.clear();
  boot(sim, jumpers, storage)
}

pub fn outputs(switch: SimSwitch) -> SimOutputs {
  switch.release().1
}

pub fn storage(switch: SimSwitch) -> SimStorage {
  switch.release().2
}
