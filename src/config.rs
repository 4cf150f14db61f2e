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

//! Board description in TOML.
//!
//! A board file names the PMIC and lists the rails the board wires up,
//! standing in for the device-tree `regulators` node:
//!
//! ```toml
//! chip = "rk816"
//!
//! [[regulators]]
//! name = "RK816_DCDC1"
//! min_microvolt = 750000
//! max_microvolt = 1450000
//! always_on = true
//!
//! [regulators.suspend]
//! enabled = false
//! ```

use alloc::{string::String, vec::Vec};

use rk8xx_if::{
    DeviceTree, InitData, PmicError, PmicResult, RegulatorMatch, RegulatorMode, SuspendState,
};
use serde::Deserialize;

use crate::driver::{PlatformData, REGULATORS_NODE};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardConfig {
    pub chip: Option<String>,
    pub regulators: Option<Vec<RailConfig>>,
}

/// One rail sub-node.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RailConfig {
    /// Matched case-insensitively against the chip's rail names.
    pub name: String,
    /// Node name handed to the host; defaults to `name` in lower case.
    pub of_node: Option<String>,
    pub min_microvolt: Option<u32>,
    pub max_microvolt: Option<u32>,
    #[serde(default)]
    pub always_on: bool,
    #[serde(default)]
    pub boot_on: bool,
    pub suspend: Option<SuspendConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuspendConfig {
    pub enabled: Option<bool>,
    pub microvolt: Option<u32>,
    pub mode: Option<ModeConfig>,
}

/// A suspend mode, by name or as the raw `REGULATOR_MODE_*` value a
/// device tree would carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ModeConfig {
    Named(ModeName),
    Raw(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeName {
    Fast,
    Normal,
}

impl TryFrom<ModeConfig> for RegulatorMode {
    type Error = PmicError;

    fn try_from(mode: ModeConfig) -> PmicResult<Self> {
        match mode {
            ModeConfig::Named(ModeName::Fast) => Ok(RegulatorMode::Fast),
            ModeConfig::Named(ModeName::Normal) => Ok(RegulatorMode::Normal),
            ModeConfig::Raw(raw) => RegulatorMode::try_from(raw),
        }
    }
}

impl BoardConfig {
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn platform_data(&self) -> PlatformData<'_> {
        PlatformData {
            chip_name: self.chip.as_deref(),
        }
    }
}

impl RailConfig {
    pub fn of_node(&self) -> String {
        self.of_node
            .clone()
            .unwrap_or_else(|| self.name.to_ascii_lowercase())
    }

    pub fn init_data(&self) -> PmicResult<InitData> {
        if let (Some(min), Some(max)) = (self.min_microvolt, self.max_microvolt) {
            if min > max {
                warn!("{}: min {min} uV above max {max} uV", self.name);
                return Err(PmicError::InvalidArgument);
            }
        }
        Ok(InitData {
            min_microvolt: self.min_microvolt,
            max_microvolt: self.max_microvolt,
            always_on: self.always_on,
            boot_on: self.boot_on,
            suspend: self.suspend.as_ref().map(|s| SuspendState {
                enabled: s.enabled,
                microvolt: s.microvolt,
                mode: s.mode.and_then(|mode| self.suspend_mode(mode)),
            }),
        })
    }

    /// An unknown raw mode is dropped with a warning, leaving the rail's
    /// suspend mode untouched.
    fn suspend_mode(&self, mode: ModeConfig) -> Option<RegulatorMode> {
        RegulatorMode::try_from(mode)
            .inspect_err(|_| warn!("{}: invalid suspend mode {mode:?}", self.name))
            .ok()
    }
}

impl DeviceTree for BoardConfig {
    /// The board file has a single `regulators` list.
    type Node = ();

    fn child_by_name(&self, name: &str) -> Option<()> {
        (name == REGULATORS_NODE && self.regulators.is_some()).then_some(())
    }

    fn match_regulators(&self, _: &(), matches: &mut [RegulatorMatch]) -> PmicResult<usize> {
        let mut found = 0;
        for rail in self.regulators.iter().flatten() {
            let Some(m) = matches
                .iter_mut()
                .find(|m| m.name.eq_ignore_ascii_case(&rail.name))
            else {
                warn!("board: no rail named {} on this chip, ignored", rail.name);
                continue;
            };
            if m.is_configured() {
                warn!("board: {} listed twice", rail.name);
                return Err(PmicError::InvalidArgument);
            }
            m.init_data = Some(rail.init_data()?);
            m.of_node = Some(rail.of_node());
            found += 1;
        }
        Ok(found)
    }
}
