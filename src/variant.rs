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

use core::fmt;

use rk8xx_if::{PmicError, PmicResult, RailId};
use rk8xx_types::regs::{rk805, rk816};

use crate::{
    CurveFamily, RegulatorDesc,
    desc::{RK805_DESCS, RK805_OF_MATCH, RK816_DESCS, RK816_OF_MATCH, rk805_id, rk816_id},
};

/// The PMIC models this driver binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipVariant {
    Rk816,
    Rk805,
}

impl ChipVariant {
    /// Match the platform-supplied chip name exactly.
    pub fn from_chip_name(name: &str) -> PmicResult<Self> {
        match name {
            "rk816" => Ok(Self::Rk816),
            "rk805" => Ok(Self::Rk805),
            _ => Err(PmicError::InvalidArgument),
        }
    }

    pub const fn chip_name(self) -> &'static str {
        match self {
            Self::Rk816 => "rk816",
            Self::Rk805 => "rk805",
        }
    }

    pub fn data(self) -> &'static VariantData {
        match self {
            Self::Rk816 => &RK816_DATA,
            Self::Rk805 => &RK805_DATA,
        }
    }
}

impl fmt::Display for ChipVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.chip_name())
    }
}

/// Everything that differs between the supported chips.
#[derive(Debug)]
pub struct VariantData {
    pub dcdc1_id: RailId,
    pub ldo1_id: RailId,
    pub slp_dcdc_en_reg: u8,
    pub slp_ldo_en_reg: u8,
    pub descs: &'static [RegulatorDesc],
    /// Device-tree names, in the same index space as `descs`.
    pub of_match: &'static [&'static str],
}

static RK816_DATA: VariantData = VariantData {
    dcdc1_id: rk816_id::DCDC1,
    ldo1_id: rk816_id::LDO1,
    slp_dcdc_en_reg: rk816::SLP_DCDC_EN,
    slp_ldo_en_reg: rk816::SLP_LDO_EN,
    descs: &RK816_DESCS,
    of_match: &RK816_OF_MATCH,
};

static RK805_DATA: VariantData = VariantData {
    dcdc1_id: rk805_id::DCDC1,
    ldo1_id: rk805_id::LDO1,
    slp_dcdc_en_reg: rk805::SLP_DCDC_EN,
    slp_ldo_en_reg: rk805::SLP_LDO_EN,
    descs: &RK805_DESCS,
    of_match: &RK805_OF_MATCH,
};

impl VariantData {
    pub fn num_regulators(&self) -> usize {
        self.descs.len()
    }

    pub fn desc(&self, id: RailId) -> PmicResult<&'static RegulatorDesc> {
        self.descs.get(id.index()).ok_or(PmicError::InvalidArgument)
    }

    pub fn desc_by_name(&self, name: &str) -> Option<&'static RegulatorDesc> {
        self.descs
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
    }

    /// Bit position of `desc` in the sleep-enable register of its kind.
    pub fn sleep_index(&self, desc: &RegulatorDesc) -> u8 {
        let base = if desc.family.is_buck() {
            self.dcdc1_id
        } else {
            self.ldo1_id
        };
        desc.id.raw() - base.raw()
    }

    /// Check the tables before anything relies on positional lookups.
    ///
    /// Every id must sit at its own index (so each appears exactly once),
    /// the match table must name the same rails, and the register layout
    /// must fit each family.
    pub fn validate(&self) -> PmicResult {
        if self.descs.len() != self.of_match.len() {
            return Err(PmicError::BadTable("match table length differs"));
        }
        for (i, (desc, name)) in self.descs.iter().zip(self.of_match).enumerate() {
            if desc.id.index() != i {
                return Err(PmicError::BadTable("rail id out of place"));
            }
            if desc.name != *name {
                return Err(PmicError::BadTable("match name differs from descriptor"));
            }
            if desc.n_voltages != desc.family.n_voltages() {
                return Err(PmicError::BadTable("selector count differs from curve"));
            }
            if desc.enable_mask.count_ones() != 1 || desc.enable_mask > 0x08 {
                return Err(PmicError::BadTable("enable mask must be one low-nibble bit"));
            }
            let fixed = desc.family == CurveFamily::BuckFixed;
            if fixed == desc.vsel_reg.is_some() {
                return Err(PmicError::BadTable("selector register does not fit family"));
            }
            if desc.family.is_buck() != desc.mode_reg.is_some() {
                return Err(PmicError::BadTable("mode register does not fit family"));
            }
            let base = if desc.family.is_buck() {
                self.dcdc1_id
            } else {
                self.ldo1_id
            };
            if desc.id < base || desc.id.raw() - base.raw() >= 8 {
                return Err(PmicError::BadTable("rail outside its sleep-enable register"));
            }
        }
        let first = |buck: bool| self.descs.iter().find(|d| d.family.is_buck() == buck);
        if first(true).map(|d| d.id) != Some(self.dcdc1_id)
            || first(false).map(|d| d.id) != Some(self.ldo1_id)
        {
            return Err(PmicError::BadTable("first buck or ldo id mismatch"));
        }
        Ok(())
    }
}
