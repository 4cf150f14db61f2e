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

use rk8xx_if::RailId;
use rk8xx_types::{
    BUCK_VSEL_MASK, BUCK4_VSEL_MASK, LDO_VSEL_MASK,
    regs::{rk805, rk816},
};

use crate::CurveFamily;

/// LDOs need 400 µs after enable before they are in regulation.
const LDO_ENABLE_TIME_US: u32 = 400;

/// Static description of one output rail.
#[derive(Debug)]
pub struct RegulatorDesc {
    pub name: &'static str,
    pub supply_name: &'static str,
    pub id: RailId,
    pub family: CurveFamily,
    pub n_voltages: u32,
    /// Active-mode selector register; the sleep selector follows it.
    /// `None` for the fixed buck.
    pub vsel_reg: Option<u8>,
    pub vsel_mask: u8,
    /// Register holding the PWM mode bit, bucks only.
    pub mode_reg: Option<u8>,
    pub enable_reg: u8,
    pub enable_mask: u8,
    pub enable_time_us: u32,
}

impl RegulatorDesc {
    const fn buck_main(
        name: &'static str,
        supply_name: &'static str,
        id: RailId,
        vsel_reg: u8,
        enable_reg: u8,
        enable_bit: u8,
    ) -> Self {
        Self {
            name,
            supply_name,
            id,
            family: CurveFamily::BuckMain,
            n_voltages: CurveFamily::BuckMain.n_voltages(),
            vsel_reg: Some(vsel_reg),
            vsel_mask: BUCK_VSEL_MASK,
            mode_reg: Some(vsel_reg),
            enable_reg,
            enable_mask: 1 << enable_bit,
            enable_time_us: 0,
        }
    }

    const fn buck_fixed(
        name: &'static str,
        supply_name: &'static str,
        id: RailId,
        config_reg: u8,
        enable_reg: u8,
        enable_bit: u8,
    ) -> Self {
        Self {
            name,
            supply_name,
            id,
            family: CurveFamily::BuckFixed,
            n_voltages: CurveFamily::BuckFixed.n_voltages(),
            vsel_reg: None,
            vsel_mask: 0,
            mode_reg: Some(config_reg),
            enable_reg,
            enable_mask: 1 << enable_bit,
            enable_time_us: 0,
        }
    }

    const fn buck_low(
        name: &'static str,
        supply_name: &'static str,
        id: RailId,
        vsel_reg: u8,
        enable_reg: u8,
        enable_bit: u8,
    ) -> Self {
        Self {
            name,
            supply_name,
            id,
            family: CurveFamily::BuckLow,
            n_voltages: CurveFamily::BuckLow.n_voltages(),
            vsel_reg: Some(vsel_reg),
            vsel_mask: BUCK4_VSEL_MASK,
            mode_reg: Some(vsel_reg),
            enable_reg,
            enable_mask: 1 << enable_bit,
            enable_time_us: 0,
        }
    }

    const fn ldo(
        name: &'static str,
        supply_name: &'static str,
        id: RailId,
        vsel_reg: u8,
        enable_reg: u8,
        enable_bit: u8,
    ) -> Self {
        Self {
            name,
            supply_name,
            id,
            family: CurveFamily::Ldo,
            n_voltages: CurveFamily::Ldo.n_voltages(),
            vsel_reg: Some(vsel_reg),
            vsel_mask: LDO_VSEL_MASK,
            mode_reg: None,
            enable_reg,
            enable_mask: 1 << enable_bit,
            enable_time_us: LDO_ENABLE_TIME_US,
        }
    }
}

pub mod rk816_id {
    use rk8xx_if::RailId;

    pub const DCDC1: RailId = RailId::new(0);
    pub const DCDC2: RailId = RailId::new(1);
    pub const DCDC3: RailId = RailId::new(2);
    pub const DCDC4: RailId = RailId::new(3);
    pub const LDO1: RailId = RailId::new(4);
    pub const LDO2: RailId = RailId::new(5);
    pub const LDO3: RailId = RailId::new(6);
    pub const LDO4: RailId = RailId::new(7);
    pub const LDO5: RailId = RailId::new(8);
    pub const LDO6: RailId = RailId::new(9);
}

pub mod rk805_id {
    use rk8xx_if::RailId;

    pub const DCDC1: RailId = RailId::new(0);
    pub const DCDC2: RailId = RailId::new(1);
    pub const DCDC3: RailId = RailId::new(2);
    pub const DCDC4: RailId = RailId::new(3);
    pub const LDO1: RailId = RailId::new(4);
    pub const LDO2: RailId = RailId::new(5);
    pub const LDO3: RailId = RailId::new(6);
}

#[rustfmt::skip]
pub(crate) static RK816_DESCS: [RegulatorDesc; 10] = [
    RegulatorDesc::buck_main("RK816_DCDC1", "vcc1", rk816_id::DCDC1, rk816::BUCK1_ON_VSEL, rk816::DCDC_EN_REG1, 0),
    RegulatorDesc::buck_main("RK816_DCDC2", "vcc2", rk816_id::DCDC2, rk816::BUCK2_ON_VSEL, rk816::DCDC_EN_REG1, 1),
    RegulatorDesc::buck_fixed("RK816_DCDC3", "vcc3", rk816_id::DCDC3, rk816::BUCK3_CONFIG, rk816::DCDC_EN_REG1, 2),
    RegulatorDesc::buck_low("RK816_DCDC4", "vcc4", rk816_id::DCDC4, rk816::BUCK4_ON_VSEL, rk816::DCDC_EN_REG1, 3),
    RegulatorDesc::ldo("RK816_LDO1", "vcc5", rk816_id::LDO1, rk816::LDO1_ON_VSEL, rk816::LDO_EN_REG1, 0),
    RegulatorDesc::ldo("RK816_LDO2", "vcc6", rk816_id::LDO2, rk816::LDO2_ON_VSEL, rk816::LDO_EN_REG1, 1),
    RegulatorDesc::ldo("RK816_LDO3", "vcc7", rk816_id::LDO3, rk816::LDO3_ON_VSEL, rk816::LDO_EN_REG1, 2),
    RegulatorDesc::ldo("RK816_LDO4", "vcc8", rk816_id::LDO4, rk816::LDO4_ON_VSEL, rk816::LDO_EN_REG1, 3),
    RegulatorDesc::ldo("RK816_LDO5", "vcc9", rk816_id::LDO5, rk816::LDO5_ON_VSEL, rk816::LDO_EN_REG2, 0),
    RegulatorDesc::ldo("RK816_LDO6", "vcc10", rk816_id::LDO6, rk816::LDO6_ON_VSEL, rk816::LDO_EN_REG2, 1),
];

pub(crate) static RK816_OF_MATCH: [&str; 10] = [
    "RK816_DCDC1",
    "RK816_DCDC2",
    "RK816_DCDC3",
    "RK816_DCDC4",
    "RK816_LDO1",
    "RK816_LDO2",
    "RK816_LDO3",
    "RK816_LDO4",
    "RK816_LDO5",
    "RK816_LDO6",
];

#[rustfmt::skip]
pub(crate) static RK805_DESCS: [RegulatorDesc; 7] = [
    RegulatorDesc::buck_main("RK805_DCDC1", "vcc1", rk805_id::DCDC1, rk805::BUCK1_ON_VSEL, rk805::DCDC_EN, 0),
    RegulatorDesc::buck_main("RK805_DCDC2", "vcc2", rk805_id::DCDC2, rk805::BUCK2_ON_VSEL, rk805::DCDC_EN, 1),
    RegulatorDesc::buck_fixed("RK805_DCDC3", "vcc3", rk805_id::DCDC3, rk805::BUCK3_CONFIG, rk805::DCDC_EN, 2),
    RegulatorDesc::buck_low("RK805_DCDC4", "vcc4", rk805_id::DCDC4, rk805::BUCK4_ON_VSEL, rk805::DCDC_EN, 3),
    RegulatorDesc::ldo("RK805_LDO1", "vcc5", rk805_id::LDO1, rk805::LDO1_ON_VSEL, rk805::LDO_EN, 0),
    RegulatorDesc::ldo("RK805_LDO2", "vcc6", rk805_id::LDO2, rk805::LDO2_ON_VSEL, rk805::LDO_EN, 1),
    RegulatorDesc::ldo("RK805_LDO3", "vcc7", rk805_id::LDO3, rk805::LDO3_ON_VSEL, rk805::LDO_EN, 2),
];

pub(crate) static RK805_OF_MATCH: [&str; 7] = [
    "RK805_DCDC1",
    "RK805_DCDC2",
    "RK805_DCDC3",
    "RK805_DCDC4",
    "RK805_LDO1",
    "RK805_LDO2",
    "RK805_LDO3",
];
