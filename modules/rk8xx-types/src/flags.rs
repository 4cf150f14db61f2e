bitflags::bitflags! {
    /// Bits of a buck's mode register (the on-selector register for bucks
    /// 1, 2 and 4, the config register for buck 3).
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct BuckCtrl: u8 {
        /// Forced PWM. Cleared means automatic power-save.
        const PWM_MODE      = 1 << 7;
    }
}

bitflags::bitflags! {
    /// `RK816_DCDC_EN_REG2`.
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct DcdcEn2: u8 {
        /// Latches a pending buck voltage change on ES2 silicon.
        const DVS_CONFIRM   = 1 << 7;
    }
}

impl core::fmt::Debug for BuckCtrl {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "BuckCtrl({:#04x})", self.bits())
    }
}

impl core::fmt::Debug for DcdcEn2 {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "DcdcEn2({:#04x})", self.bits())
    }
}

/// Write mask covering an enable bit and its shadow copy four bits up.
pub const fn enable_write_mask(bit: u8) -> u8 {
    bit | (bit << 4)
}
