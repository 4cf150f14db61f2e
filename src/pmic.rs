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

use rk8xx_if::{CpuClockDivider, PmicError, PmicResult, RailId, RegisterAccess};
use rk8xx_regmap::ChipHandle;
use rk8xx_types::{CHIP_VERSION_MASK, TYPE_ES2, regs::rk816};
use spin::Mutex;

use crate::{ChipVariant, Rail, VariantData};

/// A PMIC bound to one chip variant.
///
/// Created once at probe time and passed by reference to every rail
/// operation; the variant cannot change afterwards.
pub struct Rk8xx<B, C> {
    variant: ChipVariant,
    data: &'static VariantData,
    chip: ChipHandle<B>,
    clk: Mutex<C>,
}

impl<B: RegisterAccess, C: CpuClockDivider> Rk8xx<B, C> {
    /// Bind to the chip named by the platform data.
    ///
    /// Fails with [`PmicError::InvalidArgument`] when the name is missing or
    /// unknown. No register is touched.
    pub fn bind(chip_name: Option<&str>, chip: ChipHandle<B>, clk: C) -> PmicResult<Self> {
        let Some(name) = chip_name else {
            error!("rk8xx-regulator: invalid platform data");
            return Err(PmicError::InvalidArgument);
        };
        let variant = ChipVariant::from_chip_name(name).inspect_err(|_| {
            error!("rk8xx-regulator: failed to match device data for {name:?}");
        })?;
        let data = variant.data();
        data.validate()?;
        info!("rk8xx-regulator: compatible {variant}");
        Ok(Self {
            variant,
            data,
            chip,
            clk: Mutex::new(clk),
        })
    }

    pub fn variant(&self) -> ChipVariant {
        self.variant
    }

    pub fn data(&self) -> &'static VariantData {
        self.data
    }

    pub fn chip(&self) -> &ChipHandle<B> {
        &self.chip
    }

    pub fn rail(&self, id: RailId) -> PmicResult<Rail<'_, B, C>> {
        Ok(Rail::new(self, self.data.desc(id)?))
    }

    pub fn rail_by_name(&self, name: &str) -> PmicResult<Rail<'_, B, C>> {
        self.data
            .desc_by_name(name)
            .map(|desc| Rail::new(self, desc))
            .ok_or(PmicError::InvalidArgument)
    }

    pub fn rails(&self) -> impl Iterator<Item = Rail<'_, B, C>> {
        self.data.descs.iter().map(move |d| Rail::new(self, d))
    }

    /// Whether the silicon is the ES2 revision.
    pub fn is_es2(&self) -> PmicResult<bool> {
        let ver = self.chip.read(rk816::CHIP_VER)? & CHIP_VERSION_MASK;
        Ok(ver == TYPE_ES2)
    }

    /// Best effort: a failure is logged and otherwise ignored.
    pub(crate) fn set_cpu_divider(&self, div: u32) {
        if let Err(e) = self.clk.lock().set_divider(div) {
            warn!("rk8xx-regulator: cpu clock divider {div} not applied: {e}");
        }
    }
}
