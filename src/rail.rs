// Copyright 2025 The Axvisor Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Per-rail operations.

use rk8xx_if::{CpuClockDivider, PmicError, PmicResult, RailId, RegisterAccess, RegulatorMode};
use rk8xx_types::{BuckCtrl, SLP_REG_OFFSET, enable_write_mask};

use crate::{CurveFamily, RegulatorDesc, Rk8xx, sequencer};

/// One output rail of a bound PMIC.
pub struct Rail<'a, B, C> {
    pmic: &'a Rk8xx<B, C>,
    desc: &'static RegulatorDesc,
}

impl<'a, B: RegisterAccess, C: CpuClockDivider> Rail<'a, B, C> {
    pub(crate) fn new(pmic: &'a Rk8xx<B, C>, desc: &'static RegulatorDesc) -> Self {
        Self { pmic, desc }
    }

    pub fn desc(&self) -> &'static RegulatorDesc {
        self.desc
    }

    pub fn id(&self) -> RailId {
        self.desc.id
    }

    pub fn name(&self) -> &'static str {
        self.desc.name
    }

    pub fn family(&self) -> CurveFamily {
        self.desc.family
    }

    pub fn list_voltage(&self, selector: u32) -> PmicResult<u32> {
        self.desc.family.list_voltage(selector)
    }

    pub fn get_voltage_sel(&self) -> PmicResult<u8> {
        match self.desc.vsel_reg {
            Some(reg) => Ok(self.pmic.chip().read(reg)? & self.desc.vsel_mask),
            None => Ok(0),
        }
    }

    /// Output voltage in microvolts, read back from hardware.
    pub fn get_voltage(&self) -> PmicResult<u32> {
        let sel = self.get_voltage_sel()?;
        self.list_voltage(sel as u32)
    }

    /// Program the lowest curve voltage at or below `min_uv` that does not
    /// exceed `max_uv`, returning the selector written.
    pub fn set_voltage(&self, min_uv: u32, max_uv: u32) -> PmicResult<u8> {
        let desc = self.desc;
        let selector = desc.family.select(min_uv, max_uv).inspect_err(|_| {
            warn!("{}: no selector for [{min_uv}, {max_uv}] uV", desc.name);
        })?;
        debug!(
            "{}: [{min_uv}, {max_uv}] uV -> selector {selector:#04x}",
            desc.name
        );

        match (desc.family, desc.vsel_reg) {
            (CurveFamily::BuckFixed, _) | (_, None) => {}
            (CurveFamily::BuckMain, Some(_)) => {
                sequencer::set_dvs_voltage(self.pmic, desc, selector, min_uv)?
            }
            (_, Some(reg)) => self.pmic.chip().set_bits(reg, desc.vsel_mask, selector)?,
        }
        Ok(selector)
    }

    /// Program the voltage used while the system is suspended.
    pub fn set_suspend_voltage(&self, uv: u32) -> PmicResult {
        let desc = self.desc;
        let selector = desc.family.select(uv, uv)?;
        let Some(reg) = desc.vsel_reg else {
            return Ok(());
        };
        self.pmic
            .chip()
            .set_bits(reg + SLP_REG_OFFSET, desc.vsel_mask, selector)?;
        Ok(())
    }

    /// Time a buck needs to move between two selectors.
    pub fn set_voltage_time_sel(&self, old: u32, new: u32) -> PmicResult<u32> {
        if !self.desc.family.is_buck() {
            return Err(PmicError::Unsupported);
        }
        self.desc.family.ramp_delay_us(old, new)
    }

    pub fn is_enabled(&self) -> PmicResult<bool> {
        let val = self.pmic.chip().read(self.desc.enable_reg)?;
        Ok(val & self.desc.enable_mask != 0)
    }

    /// Set the active bit together with its write-enable shadow bit.
    pub fn enable(&self) -> PmicResult {
        let mask = enable_write_mask(self.desc.enable_mask);
        self.pmic
            .chip()
            .set_bits(self.desc.enable_reg, mask, mask)?;
        Ok(())
    }

    /// Clear the active bit; the shadow bit must stay set for the write to
    /// take effect.
    pub fn disable(&self) -> PmicResult {
        let m = self.desc.enable_mask;
        self.pmic
            .chip()
            .set_bits(self.desc.enable_reg, enable_write_mask(m), m << 4)?;
        Ok(())
    }

    pub fn set_suspend_enable(&self) -> PmicResult {
        self.write_sleep_enable(true)
    }

    pub fn set_suspend_disable(&self) -> PmicResult {
        self.write_sleep_enable(false)
    }

    fn write_sleep_enable(&self, on: bool) -> PmicResult {
        let data = self.pmic.data();
        let reg = if self.desc.family.is_buck() {
            data.slp_dcdc_en_reg
        } else {
            data.slp_ldo_en_reg
        };
        let bit = 1 << data.sleep_index(self.desc);
        let chip = self.pmic.chip();
        if on {
            chip.set_bits(reg, bit, bit)?;
        } else {
            chip.clear_bits(reg, bit)?;
        }
        Ok(())
    }

    pub fn get_mode(&self) -> PmicResult<RegulatorMode> {
        let reg = self.mode_reg()?;
        let ctrl = BuckCtrl::from_bits_truncate(self.pmic.chip().read(reg)?);
        Ok(if ctrl.contains(BuckCtrl::PWM_MODE) {
            RegulatorMode::Fast
        } else {
            RegulatorMode::Normal
        })
    }

    pub fn set_mode(&self, mode: RegulatorMode) -> PmicResult {
        let reg = self.mode_reg()?;
        self.write_mode(reg, mode)
    }

    pub fn set_suspend_mode(&self, mode: RegulatorMode) -> PmicResult {
        let reg = self.mode_reg()?;
        self.write_mode(reg + SLP_REG_OFFSET, mode)
    }

    fn mode_reg(&self) -> PmicResult<u8> {
        self.desc.mode_reg.ok_or(PmicError::Unsupported)
    }

    fn write_mode(&self, reg: u8, mode: RegulatorMode) -> PmicResult {
        let val = match mode {
            RegulatorMode::Fast => BuckCtrl::PWM_MODE,
            RegulatorMode::Normal => BuckCtrl::empty(),
            _ => {
                warn!("{}: mode {mode:?} not supported", self.desc.name);
                return Err(PmicError::InvalidArgument);
            }
        };
        self.pmic
            .chip()
            .set_bits(reg, BuckCtrl::PWM_MODE.bits(), val.bits())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rk8xx_if::BusError;
    use rk8xx_regmap::Access;
    use rk8xx_types::regs::{rk805, rk816};

    use crate::{rk805_id, rk816_id, testing::fresh_pmic};
    use super::*;

    #[test]
    fn ldo_set_writes_rounded_selector() {
        let (pmic, chip, _) = fresh_pmic("rk816");
        let ldo1 = pmic.rail(rk816_id::LDO1).unwrap();
        assert_eq!(ldo1.set_voltage(1_650_000, 1_650_000), Ok(8));
        assert_eq!(chip.with_bus(|f| f.peek(rk816::LDO1_ON_VSEL)), 8);
        assert_eq!(ldo1.get_voltage(), Ok(1_600_000));
    }

    #[test]
    fn ldo_set_out_of_range_writes_nothing() {
        let (pmic, chip, _) = fresh_pmic("rk816");
        let ldo2 = pmic.rail(rk816_id::LDO2).unwrap();
        chip.with_bus(|f| f.take_log());
        assert_eq!(
            ldo2.set_voltage(3_450_000, 3_450_000),
            Err(PmicError::InvalidArgument)
        );
        assert!(chip.with_bus(|f| f.log().is_empty()));
    }

    #[test]
    fn ldo_set_keeps_upper_bits() {
        let (pmic, chip, _) = fresh_pmic("rk805");
        chip.with_bus(|f| f.poke(rk805::LDO3_ON_VSEL, 0xe0));
        let ldo3 = pmic.rail(rk805_id::LDO3).unwrap();
        ldo3.set_voltage(3_300_000, 3_300_000).unwrap();
        assert_eq!(chip.with_bus(|f| f.peek(rk805::LDO3_ON_VSEL)), 0xe0 | 25);
        assert_eq!(chip.with_bus(|f| f.writes_to(rk805::LDO3_ON_VSEL)), 1);
    }

    #[test]
    fn fixed_buck_never_touches_hardware() {
        let (pmic, chip, clk) = fresh_pmic("rk816");
        let dcdc3 = pmic.rail(rk816_id::DCDC3).unwrap();
        chip.with_bus(|f| f.fail_reads(rk816::CHIP_VER, BusError::Nack));
        assert_eq!(dcdc3.set_voltage(3_000_000, 500_000), Ok(0));
        assert_eq!(dcdc3.set_suspend_voltage(900_000), Ok(()));
        assert_eq!(dcdc3.get_voltage(), Ok(1_200_000));
        assert!(chip.with_bus(|f| f.log().is_empty()));
        assert!(clk.calls().is_empty());
    }

    #[test]
    fn buck_low_set_and_clamped_readback() {
        let (pmic, chip, clk) = fresh_pmic("rk816");
        let dcdc4 = pmic.rail(rk816_id::DCDC4).unwrap();
        assert_eq!(dcdc4.set_voltage(3_300_000, 3_500_000), Ok(25));
        assert_eq!(chip.with_bus(|f| f.writes_to(rk816::BUCK4_ON_VSEL)), 1);
        chip.with_bus(|f| f.poke(rk816::BUCK4_ON_VSEL, 0x1f));
        assert_eq!(dcdc4.get_voltage(), Ok(3_500_000));
        assert!(clk.calls().is_empty());
    }

    #[test]
    fn cpu_buck_goes_through_sequencer() {
        let (pmic, chip, clk) = fresh_pmic("rk816");
        let dcdc1 = pmic.rail(rk816_id::DCDC1).unwrap();
        assert_eq!(dcdc1.set_voltage(1_600_000, 1_800_000), Ok(0x3b));
        assert_eq!(chip.with_bus(|f| f.peek(rk816::BUCK1_ON_VSEL)), 0x3b);
        assert_eq!(clk.calls(), [4, 1]);
        assert_eq!(dcdc1.get_voltage(), Ok(1_450_000));
    }

    #[test]
    fn suspend_voltage_uses_sleep_register() {
        let (pmic, chip, _) = fresh_pmic("rk816");
        let dcdc2 = pmic.rail(rk816_id::DCDC2).unwrap();
        dcdc2.set_suspend_voltage(900_000).unwrap();
        assert_eq!(chip.with_bus(|f| f.peek(rk816::BUCK2_ON_VSEL + 1)), 15);
        assert_eq!(chip.with_bus(|f| f.writes_to(rk816::BUCK2_ON_VSEL)), 0);
        // no readback verification
        let log = chip.with_bus(|f| f.take_log());
        assert!(!log.contains(&Access::Read(rk816::CHIP_VER)));
    }

    #[test]
    fn enable_then_disable_leaves_shadow_bit() {
        let (pmic, chip, _) = fresh_pmic("rk816");
        let dcdc2 = pmic.rail(rk816_id::DCDC2).unwrap();
        dcdc2.enable().unwrap();
        assert_eq!(chip.with_bus(|f| f.peek(rk816::DCDC_EN_REG1)), 0x22);
        assert_eq!(dcdc2.is_enabled(), Ok(true));
        dcdc2.disable().unwrap();
        assert_eq!(chip.with_bus(|f| f.peek(rk816::DCDC_EN_REG1)), 0x20);
        assert_eq!(dcdc2.is_enabled(), Ok(false));
    }

    #[test]
    fn enable_leaves_other_rails_alone() {
        let (pmic, chip, _) = fresh_pmic("rk816");
        chip.with_bus(|f| f.poke(rk816::LDO_EN_REG2, 0x11));
        pmic.rail(rk816_id::LDO6).unwrap().enable().unwrap();
        assert_eq!(chip.with_bus(|f| f.peek(rk816::LDO_EN_REG2)), 0x33);
        pmic.rail(rk816_id::LDO5).unwrap().disable().unwrap();
        assert_eq!(chip.with_bus(|f| f.peek(rk816::LDO_EN_REG2)), 0x32);
    }

    #[test]
    fn suspend_enable_bits() {
        let (pmic, chip, _) = fresh_pmic("rk816");
        for id in [rk816_id::DCDC4, rk816_id::LDO6, rk816_id::LDO1] {
            pmic.rail(id).unwrap().set_suspend_enable().unwrap();
        }
        assert_eq!(chip.with_bus(|f| f.peek(rk816::SLP_DCDC_EN)), 0x08);
        assert_eq!(chip.with_bus(|f| f.peek(rk816::SLP_LDO_EN)), 0x21);
        let ldo1 = pmic.rail(rk816_id::LDO1).unwrap();
        ldo1.set_suspend_disable().unwrap();
        assert_eq!(chip.with_bus(|f| f.peek(rk816::SLP_LDO_EN)), 0x20);
    }

    #[test]
    fn suspend_disable_clears_only_its_bit() {
        let (pmic, chip, _) = fresh_pmic("rk805");
        chip.with_bus(|f| f.poke(rk805::SLP_DCDC_EN, 0x0f));
        let dcdc2 = pmic.rail(rk805_id::DCDC2).unwrap();
        dcdc2.set_suspend_disable().unwrap();
        assert_eq!(chip.with_bus(|f| f.peek(rk805::SLP_DCDC_EN)), 0x0d);
        assert_eq!(chip.with_bus(|f| f.writes_to(rk805::SLP_DCDC_EN)), 1);
    }

    #[test]
    fn mode_round_trip() {
        let (pmic, chip, _) = fresh_pmic("rk816");
        chip.with_bus(|f| f.poke(rk816::BUCK1_ON_VSEL, 0x12));
        let dcdc1 = pmic.rail(rk816_id::DCDC1).unwrap();
        assert_eq!(dcdc1.get_mode(), Ok(RegulatorMode::Normal));
        dcdc1.set_mode(RegulatorMode::Fast).unwrap();
        assert_eq!(chip.with_bus(|f| f.peek(rk816::BUCK1_ON_VSEL)), 0x92);
        assert_eq!(dcdc1.get_mode(), Ok(RegulatorMode::Fast));
        // the selector field is untouched by mode changes
        assert_eq!(dcdc1.get_voltage_sel(), Ok(0x12));
    }

    #[test]
    fn fixed_buck_mode_uses_config_register() {
        let (pmic, chip, _) = fresh_pmic("rk805");
        let dcdc3 = pmic.rail(rk805_id::DCDC3).unwrap();
        dcdc3.set_mode(RegulatorMode::Fast).unwrap();
        dcdc3.set_suspend_mode(RegulatorMode::Fast).unwrap();
        assert_eq!(chip.with_bus(|f| f.peek(rk805::BUCK3_CONFIG)), 0x80);
        assert_eq!(chip.with_bus(|f| f.peek(rk805::BUCK3_CONFIG + 1)), 0x80);
        dcdc3.set_suspend_mode(RegulatorMode::Normal).unwrap();
        assert_eq!(chip.with_bus(|f| f.peek(rk805::BUCK3_CONFIG + 1)), 0);
    }

    #[test]
    fn unsupported_modes() {
        let (pmic, chip, _) = fresh_pmic("rk816");
        let dcdc2 = pmic.rail(rk816_id::DCDC2).unwrap();
        assert_eq!(
            dcdc2.set_mode(RegulatorMode::Idle),
            Err(PmicError::InvalidArgument)
        );
        assert_eq!(
            dcdc2.set_suspend_mode(RegulatorMode::Standby),
            Err(PmicError::InvalidArgument)
        );
        let ldo1 = pmic.rail(rk816_id::LDO1).unwrap();
        assert_eq!(ldo1.get_mode(), Err(PmicError::Unsupported));
        assert_eq!(
            ldo1.set_mode(RegulatorMode::Fast),
            Err(PmicError::Unsupported)
        );
        assert_eq!(chip.with_bus(|f| f.writes().count()), 0);
    }

    #[test]
    fn ramp_time_for_bucks_only() {
        let (pmic, _, _) = fresh_pmic("rk816");
        let dcdc1 = pmic.rail(rk816_id::DCDC1).unwrap();
        assert_eq!(dcdc1.set_voltage_time_sel(0, 8), Ok(16));
        let ldo1 = pmic.rail(rk816_id::LDO1).unwrap();
        assert_eq!(ldo1.set_voltage_time_sel(0, 8), Err(PmicError::Unsupported));
    }

    #[test]
    fn bus_errors_propagate() {
        let (pmic, chip, _) = fresh_pmic("rk816");
        chip.with_bus(|f| f.fail_reads(rk816::LDO_EN_REG1, BusError::ArbitrationLost));
        let ldo2 = pmic.rail(rk816_id::LDO2).unwrap();
        assert_eq!(
            ldo2.is_enabled(),
            Err(PmicError::Transport(BusError::ArbitrationLost))
        );
        assert_eq!(
            ldo2.enable(),
            Err(PmicError::Transport(BusError::ArbitrationLost))
        );
    }
}
