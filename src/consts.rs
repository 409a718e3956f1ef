// Timing and storage layout of the soft power switch

use fugit::MillisDurationU32;

/// Wait after reset before any output is touched, so the PSU is not switched on while
/// the board supply is still coming up.
pub const SETTLE_DELAY: MillisDurationU32 = MillisDurationU32::millis(100);

/// Debounce after the press that powers the supply on.
pub const POWER_ON_DEBOUNCE: MillisDurationU32 = MillisDurationU32::millis(100);

/// Debounce after the press that starts an off-request gesture.
/// Shorter than [`POWER_ON_DEBOUNCE`]: a spurious power-on must be harder to trigger.
pub const OFF_REQUEST_DEBOUNCE: MillisDurationU32 = MillisDurationU32::millis(10);

/// Sampling period while waiting for an edge outside of a hold gesture.
pub const IDLE_POLL: MillisDurationU32 = MillisDurationU32::millis(1);

/// Sampling period while a hold gesture is measured. One poll is one [`HoldTimer`](crate::HoldTimer) tick.
pub const HOLD_POLL: MillisDurationU32 = MillisDurationU32::millis(10);

/// Hold polls per second.
pub const HOLD_POLLS_PER_SECOND: u16 = (1000 / HOLD_POLL.ticks()) as u16;

/// Seconds a hold must last (in ATX mode) to toggle the turbo latch.
pub const ATX_TURBO_TIME_S: u16 = 1;

/// Seconds a hold must last (in ATX mode) to switch the supply off.
pub const ATX_POWERDOWN_TIME_S: u16 = 5;

/// Hold ticks that must be exceeded for a turbo toggle.
pub const TURBO_THRESHOLD: u16 = ATX_TURBO_TIME_S * HOLD_POLLS_PER_SECOND;

/// Hold ticks that must be exceeded to power down.
pub const POWERDOWN_THRESHOLD: u16 = ATX_POWERDOWN_TIME_S * HOLD_POLLS_PER_SECOND;

/// The hold counter restarts from zero when it reaches this value instead of overflowing.
pub const HOLD_GUARD: u16 = 65530;

/// Storage address of the power state byte.
pub const POWER_STATE_ADDR: u8 = 1;

/// Storage address of the turbo state byte.
pub const TURBO_STATE_ADDR: u8 = 2;
