// Definitions valid for one particular electrical setup

use embedded_hal::digital::v2::PinState;

/// According to the ATX specification, PS_ON must be pulled to ground to activate the PSU.
pub const GPIO_PS_ON_ACTIVE_POLARITY: PinState = PinState::Low;

/// Whether to drive the turbo pin to high or low voltage while turbo is latched.
///
/// # Semantics
/// If this is set to high, the Pin will be driven to 3.3V to activate the connected device,
/// otherwise, it will be driven to Ground.
pub const GPIO_TURBO_ACTIVE_POLARITY: PinState = PinState::High;

/// Size of the QSPI flash on the Pico board.
pub const FLASH_SIZE: u32 = 2 * 1024 * 1024;

/// Smallest erasable unit of the flash.
pub const FLASH_SECTOR_SIZE: u32 = 4096;

/// The last sector holds the persisted state. `memory.x` keeps the program out of it.
pub const STATE_SECTOR_OFFSET: u32 = FLASH_SIZE - FLASH_SECTOR_SIZE;
