//! Byte store on the last sector of the onboard QSPI flash.
//!
//! The sector is mirrored in RAM by [`MirroredStorage`]. Changing a byte erases and
//! reprograms the whole sector through `rp2040-flash`, which runs the sequence from RAM
//! and restores fast XIP through boot2 afterwards.

use defmt::*;
use rp2040_flash::flash;
use softpower::{MirroredStorage, Region};

use crate::consts::*;

const XIP_BASE: u32 = 0x1000_0000;
const SECTOR_LEN: usize = FLASH_SECTOR_SIZE as usize;

/// The state sector at [`STATE_SECTOR_OFFSET`].
pub struct StateSector;

impl Region<SECTOR_LEN> for StateSector {
  /// A never written sector reads 0xff.
  fn load(&mut self, buf: &mut [u8; SECTOR_LEN]) {
    let base = (XIP_BASE + STATE_SECTOR_OFFSET) as *const u8;
    for (i, byte) in buf.iter_mut().enumerate() {
      // SAFETY: the state sector is inside the XIP window and outside the program image (see memory.x).
      *byte = unsafe { core::ptr::read_volatile(base.add(i)) };
    }
  }

  fn store(&mut self, buf: &[u8; SECTOR_LEN]) {
    debug!("rewriting state sector at {=u32:#x}", STATE_SECTOR_OFFSET);
    cortex_m::interrupt::free(|_| {
      // SAFETY: interrupts are off and core 1 is never started, so nothing executes from
      // flash while it is written. The buffer is sector aligned and sized and lives in RAM.
      unsafe { flash::flash_range_erase_and_program(STATE_SECTOR_OFFSET, buf, true) }
    });
  }
}

pub type FlashStorage = MirroredStorage<StateSector, SECTOR_LEN>;
