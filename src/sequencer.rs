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

//! Dynamic voltage scaling of bucks 1 and 2.
//!
//! The new selector is written and read back until the register holds it.
//! ES2 silicon additionally needs a DVS confirm after every write. On other
//! revisions, buck 1 feeds the CPU and the CPU clock is slowed down for the
//! duration of the change.

use rk8xx_if::{CpuClockDivider, PmicError, PmicResult, RegisterAccess};
use rk8xx_regmap::ChipHandle;
use rk8xx_types::{DcdcEn2, regs::rk816};

use crate::{RegulatorDesc, Rk8xx};

/// Write/readback attempts before giving up.
pub const DVS_RETRY_BUDGET: usize = 100;

pub const CPU_DIV_NORMAL: u32 = 1;
pub const CPU_DIV_HALF: u32 = 2;
pub const CPU_DIV_QUARTER: u32 = 4;

/// Targets above this need the slower CPU clock during the change.
const CPU_DIV_THRESHOLD_UV: u32 = 1_000_000;

pub(crate) fn set_dvs_voltage<B, C>(
    pmic: &Rk8xx<B, C>,
    desc: &RegulatorDesc,
    selector: u8,
    min_uv: u32,
) -> PmicResult
where
    B: RegisterAccess,
    C: CpuClockDivider,
{
    let es2 = pmic.is_es2()?;
    let bracket = desc.id == pmic.data().dcdc1_id && !es2;

    if bracket {
        pmic.set_cpu_divider(if min_uv > CPU_DIV_THRESHOLD_UV {
            CPU_DIV_QUARTER
        } else {
            CPU_DIV_HALF
        });
    }

    let ret = converge(pmic.chip(), desc, selector, es2);

    if bracket {
        pmic.set_cpu_divider(CPU_DIV_NORMAL);
    }

    if let Err(e) = &ret {
        error!(
            "rk8xx-regulator: {} set voltage {} uV failed: {e}",
            desc.name, min_uv
        );
    }
    ret
}

fn converge<B: RegisterAccess>(
    chip: &ChipHandle<B>,
    desc: &RegulatorDesc,
    selector: u8,
    es2: bool,
) -> PmicResult {
    let reg = desc
        .vsel_reg
        .ok_or(PmicError::BadTable("dvs rail without selector register"))?;
    let mut actual = 0;

    for attempt in 1..=DVS_RETRY_BUDGET {
        chip.set_bits(reg, desc.vsel_mask, selector)?;
        if es2 {
            chip.set_bits(
                rk816::DCDC_EN_REG2,
                DcdcEn2::DVS_CONFIRM.bits(),
                DcdcEn2::DVS_CONFIRM.bits(),
            )?;
        }
        actual = chip.read(reg)? & desc.vsel_mask;
        if actual == selector {
            if attempt > 1 {
                warn!(
                    "{}: selector {selector:#04x} latched after {attempt} writes",
                    desc.name
                );
            }
            return Ok(());
        }
    }

    Err(PmicError::ConvergenceTimeout {
        expected: selector,
        actual,
    })
}

#[cfg(test)]
mod tests {
    use rk8xx_if::BusError;
    use rk8xx_regmap::Access;
    use rk8xx_types::TYPE_ES2;

    use crate::{rk816_id, testing::fresh_pmic};
    use super::*;

    #[test]
    fn es2_confirms_every_write_without_divider() {
        let (pmic, chip, clk) = fresh_pmic("rk816");
        chip.with_bus(|f| f.poke(rk816::CHIP_VER, 0x40 | TYPE_ES2));
        let desc = pmic.data().desc(rk816_id::DCDC1).unwrap();

        set_dvs_voltage(&pmic, desc, 0x1f, 1_100_000).unwrap();

        assert_eq!(chip.with_bus(|f| f.peek(rk816::BUCK1_ON_VSEL)), 0x1f);
        assert_eq!(chip.with_bus(|f| f.peek(rk816::DCDC_EN_REG2)) & 0x80, 0x80);
        assert!(clk.calls().is_empty());
    }

    #[test]
    fn es2_confirm_follows_selector_write() {
        let (pmic, chip, _) = fresh_pmic("rk816");
        chip.with_bus(|f| f.poke(rk816::CHIP_VER, TYPE_ES2));
        let desc = pmic.data().desc(rk816_id::DCDC2).unwrap();
        chip.with_bus(|f| f.take_log());

        set_dvs_voltage(&pmic, desc, 0x08, 812_500).unwrap();

        let log = chip.with_bus(|f| f.take_log());
        assert_eq!(
            log,
            [
                Access::Read(rk816::CHIP_VER),
                Access::Read(rk816::BUCK2_ON_VSEL),
                Access::Write(rk816::BUCK2_ON_VSEL, 0x08),
                Access::Read(rk816::DCDC_EN_REG2),
                Access::Write(rk816::DCDC_EN_REG2, 0x80),
                Access::Read(rk816::BUCK2_ON_VSEL),
            ]
        );
    }

    #[test]
    fn cpu_rail_is_bracketed_by_divider() {
        let (pmic, _, clk) = fresh_pmic("rk816");
        let desc = pmic.data().desc(rk816_id::DCDC1).unwrap();

        set_dvs_voltage(&pmic, desc, 0x1f, 1_100_000).unwrap();
        assert_eq!(clk.calls(), [CPU_DIV_QUARTER, CPU_DIV_NORMAL]);

        let (pmic, _, clk) = fresh_pmic("rk816");
        set_dvs_voltage(&pmic, desc, 0x0f, 900_000).unwrap();
        assert_eq!(clk.calls(), [CPU_DIV_HALF, CPU_DIV_NORMAL]);
    }

    #[test]
    fn exactly_one_volt_uses_half_divider() {
        let (pmic, _, clk) = fresh_pmic("rk816");
        let desc = pmic.data().desc(rk816_id::DCDC1).unwrap();
        set_dvs_voltage(&pmic, desc, 23, 1_000_000).unwrap();
        assert_eq!(clk.calls(), [CPU_DIV_HALF, CPU_DIV_NORMAL]);
    }

    #[test]
    fn second_buck_is_not_bracketed() {
        let (pmic, chip, clk) = fresh_pmic("rk816");
        let desc = pmic.data().desc(rk816_id::DCDC2).unwrap();
        set_dvs_voltage(&pmic, desc, 0x1f, 1_100_000).unwrap();
        assert!(clk.calls().is_empty());
        assert_eq!(chip.with_bus(|f| f.writes_to(rk816::DCDC_EN_REG2)), 0);
    }

    #[test]
    fn retries_until_selector_latches() {
        let (pmic, chip, _) = fresh_pmic("rk816");
        chip.with_bus(|f| f.stick(rk816::BUCK1_ON_VSEL, 3));
        let desc = pmic.data().desc(rk816_id::DCDC1).unwrap();

        set_dvs_voltage(&pmic, desc, 0x20, 1_112_500).unwrap();
        assert_eq!(chip.with_bus(|f| f.writes_to(rk816::BUCK1_ON_VSEL)), 4);
        assert_eq!(chip.with_bus(|f| f.peek(rk816::BUCK1_ON_VSEL)), 0x20);
    }

    #[test]
    fn stuck_register_times_out_and_restores_clock() {
        let (pmic, chip, clk) = fresh_pmic("rk816");
        chip.with_bus(|f| {
            f.poke(rk816::BUCK1_ON_VSEL, 0x0a);
            f.stick(rk816::BUCK1_ON_VSEL, usize::MAX);
        });
        let desc = pmic.data().desc(rk816_id::DCDC1).unwrap();

        assert_eq!(
            set_dvs_voltage(&pmic, desc, 0x20, 1_112_500),
            Err(PmicError::ConvergenceTimeout {
                expected: 0x20,
                actual: 0x0a
            })
        );
        assert_eq!(
            chip.with_bus(|f| f.writes_to(rk816::BUCK1_ON_VSEL)),
            DVS_RETRY_BUDGET
        );
        assert_eq!(clk.calls(), [CPU_DIV_QUARTER, CPU_DIV_NORMAL]);
    }

    #[test]
    fn bus_error_still_restores_clock() {
        let (pmic, chip, clk) = fresh_pmic("rk816");
        chip.with_bus(|f| f.fail_writes(rk816::BUCK1_ON_VSEL, BusError::Nack));
        let desc = pmic.data().desc(rk816_id::DCDC1).unwrap();

        assert_eq!(
            set_dvs_voltage(&pmic, desc, 0x10, 912_500),
            Err(PmicError::Transport(BusError::Nack))
        );
        assert_eq!(clk.calls(), [CPU_DIV_HALF, CPU_DIV_NORMAL]);
    }

    #[test]
    fn unreadable_version_aborts_before_divider() {
        let (pmic, chip, clk) = fresh_pmic("rk816");
        chip.with_bus(|f| f.fail_reads(rk816::CHIP_VER, BusError::Timeout));
        let desc = pmic.data().desc(rk816_id::DCDC1).unwrap();

        assert_eq!(
            set_dvs_voltage(&pmic, desc, 0x10, 912_500),
            Err(PmicError::Transport(BusError::Timeout))
        );
        assert!(clk.calls().is_empty());
        assert_eq!(chip.with_bus(|f| f.writes().count()), 0);
    }

    #[test]
    fn failing_divider_does_not_block_dvs() {
        let chip = ChipHandle::new(rk8xx_regmap::RegisterFile::new());
        let clk = crate::testing::RecordingClock::failing();
        let pmic = Rk8xx::bind(Some("rk816"), chip.clone(), clk.clone()).unwrap();
        let desc = pmic.data().desc(rk816_id::DCDC1).unwrap();

        set_dvs_voltage(&pmic, desc, 0x10, 912_500).unwrap();
        assert_eq!(clk.calls(), [CPU_DIV_HALF, CPU_DIV_NORMAL]);
        assert_eq!(chip.read(rk816::BUCK1_ON_VSEL), Ok(0x10));
    }
}
