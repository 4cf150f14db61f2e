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

//! Voltage regulator driver for the Rockchip RK816 and RK805 PMICs.
//!
//! [`Rk8xx`] binds one chip variant and hands out [`Rail`]s, which map
//! voltage windows onto register selectors and drive enable, mode and
//! suspend state. [`Rk8xxRegulatorDriver`] performs probe and removal
//! against a host regulator framework.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[macro_use]
extern crate log;

mod config;
mod curve;
mod desc;
mod driver;
mod pmic;
mod rail;
mod registry;
mod sequencer;
mod variant;

#[cfg(test)]
mod testing;

pub use config::*;
pub use curve::CurveFamily;
pub use desc::{RegulatorDesc, rk805_id, rk816_id};
pub use driver::*;
pub use pmic::Rk8xx;
pub use rail::Rail;
pub use registry::*;
pub use sequencer::{CPU_DIV_HALF, CPU_DIV_NORMAL, CPU_DIV_QUARTER, DVS_RETRY_BUDGET};
pub use variant::{ChipVariant, VariantData};

#[doc(no_inline)]
pub use rk8xx_if::{
    BusError, CpuClockDivider, DeviceTree, InitData, PmicError, PmicResult, RailId, RegisterAccess,
    RegulatorConfig, RegulatorHost, RegulatorMatch, RegulatorMode, SuspendState,
};
#[doc(no_inline)]
pub use rk8xx_regmap::{ChipHandle, RegisterFile};
