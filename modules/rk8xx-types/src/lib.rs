//! Register map of the Rockchip RK816 and RK805 power management ICs.
//!
//! Only the regulator-related part of the map is described here: version
//! identification, power channel enables, and buck/LDO voltage selection.

#![no_std]

mod flags;
pub mod regs;

pub use flags::*;

/// Each sleep-mode register sits right after its active-mode twin.
pub const SLP_REG_OFFSET: u8 = 1;

/// Selector field width of bucks 1 and 2.
pub const BUCK_VSEL_MASK: u8 = 0x3f;
/// Selector field width of buck 4.
pub const BUCK4_VSEL_MASK: u8 = 0x1f;
/// Selector field width of every LDO.
pub const LDO_VSEL_MASK: u8 = 0x1f;

/// Low nibble of [`regs::rk816::CHIP_VER`].
pub const CHIP_VERSION_MASK: u8 = 0x0f;
/// Silicon revision that needs [`DcdcEn2::DVS_CONFIRM`] after each DVS write.
pub const TYPE_ES2: u8 = 0x5;
