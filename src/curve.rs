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

//! Selector <-> microvolt mapping for each rail family.
//!
//! Everything here is pure: no register access, no logging.

use rk8xx_if::{PmicError, PmicResult};

const LDO_BASE_UV: u32 = 800_000;
const LDO_STEP_UV: u32 = 100_000;
const LDO_MAX_UV: u32 = 3_400_000;
const LDO_N_VOLTAGES: u32 = 27;

const BUCK_FINE_BASE_UV: u32 = 712_500;
const BUCK_FINE_STEP_UV: u32 = 12_500;
const BUCK_FINE_MAX_UV: u32 = 1_450_000;
const BUCK_FINE_LAST_SEL: u32 = 0x3b;
const BUCK_COARSE_BASE_UV: u32 = 1_800_000;
const BUCK_COARSE_STEP_UV: u32 = 200_000;
const BUCK_COARSE_FIRST_SEL: u32 = 0x3c;
const BUCK_COARSE_LAST_SEL: u32 = 0x3e;
const BUCK_TOP_UV: u32 = 2_300_000;
const BUCK_TOP_SEL: u32 = 0x3f;

const BUCK_FIXED_UV: u32 = 1_200_000;

const BUCK_LOW_BASE_UV: u32 = 800_000;
const BUCK_LOW_STEP_UV: u32 = 100_000;
const BUCK_LOW_MAX_UV: u32 = 3_500_000;
const BUCK_LOW_LAST_SEL: u32 = 0x1b;

/// Slew rate used to estimate buck ramp time: 12.5 mV every 2 µs.
const BUCK_RAMP_UV_PER_2US: u32 = 12_500;

/// Voltage curve of a rail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveFamily {
    /// Bucks 1 and 2: fine, coarse and top segment over a 6-bit selector.
    BuckMain,
    /// Buck 3: fixed 1.2 V, no selector.
    BuckFixed,
    /// Buck 4: 100 mV steps over a 5-bit selector, clamped at 0x1b.
    BuckLow,
    /// 100 mV steps from 800 mV to 3.4 V.
    Ldo,
}

impl CurveFamily {
    /// Number of selector values the register field can hold.
    pub const fn n_voltages(self) -> u32 {
        match self {
            CurveFamily::BuckMain => 64,
            CurveFamily::BuckFixed => 1,
            CurveFamily::BuckLow => 32,
            CurveFamily::Ldo => LDO_N_VOLTAGES,
        }
    }

    pub const fn is_buck(self) -> bool {
        !matches!(self, CurveFamily::Ldo)
    }

    /// Voltage, in microvolts, that `selector` programs.
    pub fn list_voltage(self, selector: u32) -> PmicResult<u32> {
        match self {
            CurveFamily::BuckMain => Ok(if selector <= BUCK_FINE_LAST_SEL {
                BUCK_FINE_BASE_UV + selector * BUCK_FINE_STEP_UV
            } else if selector <= BUCK_COARSE_LAST_SEL {
                BUCK_COARSE_BASE_UV + (selector - BUCK_COARSE_FIRST_SEL) * BUCK_COARSE_STEP_UV
            } else {
                BUCK_TOP_UV
            }),
            CurveFamily::BuckFixed => Ok(BUCK_FIXED_UV),
            CurveFamily::BuckLow => {
                let selector = selector.min(BUCK_LOW_LAST_SEL);
                Ok(BUCK_LOW_BASE_UV + selector * BUCK_LOW_STEP_UV)
            }
            CurveFamily::Ldo => {
                if selector >= LDO_N_VOLTAGES {
                    return Err(PmicError::InvalidArgument);
                }
                Ok(LDO_BASE_UV + selector * LDO_STEP_UV)
            }
        }
    }

    /// Pick the selector for a request of `[min_uv, max_uv]`.
    ///
    /// The selector is derived from `min_uv` alone, rounding down onto the
    /// curve; the request fails if the resulting voltage is above `max_uv`.
    pub fn select(self, min_uv: u32, max_uv: u32) -> PmicResult<u8> {
        let selector = match self {
            CurveFamily::BuckFixed => return Ok(0),
            CurveFamily::BuckMain => {
                if min_uv < BUCK_FINE_BASE_UV {
                    0
                } else if min_uv <= BUCK_FINE_MAX_UV {
                    (min_uv - BUCK_FINE_BASE_UV) / BUCK_FINE_STEP_UV
                } else if min_uv < BUCK_COARSE_BASE_UV {
                    BUCK_FINE_LAST_SEL
                } else if min_uv < BUCK_TOP_UV {
                    BUCK_COARSE_FIRST_SEL + (min_uv - BUCK_COARSE_BASE_UV) / BUCK_COARSE_STEP_UV
                } else if min_uv == BUCK_TOP_UV {
                    BUCK_TOP_SEL
                } else {
                    return Err(PmicError::InvalidArgument);
                }
            }
            CurveFamily::BuckLow => {
                if min_uv < BUCK_LOW_BASE_UV {
                    0
                } else if min_uv <= BUCK_LOW_MAX_UV {
                    (min_uv - BUCK_LOW_BASE_UV) / BUCK_LOW_STEP_UV
                } else {
                    return Err(PmicError::InvalidArgument);
                }
            }
            CurveFamily::Ldo => {
                if min_uv < LDO_BASE_UV {
                    0
                } else if min_uv <= LDO_MAX_UV {
                    (min_uv - LDO_BASE_UV) / LDO_STEP_UV
                } else {
                    return Err(PmicError::InvalidArgument);
                }
            }
        };

        if self.list_voltage(selector)? > max_uv {
            return Err(PmicError::InvalidArgument);
        }
        Ok(selector as u8)
    }

    /// Microseconds a buck needs to slew from `old` to `new` selector.
    pub fn ramp_delay_us(self, old: u32, new: u32) -> PmicResult<u32> {
        let old_uv = self.list_voltage(old)?;
        let new_uv = self.list_voltage(new)?;
        Ok((old_uv.abs_diff(new_uv) * 2).div_ceil(BUCK_RAMP_UV_PER_2US))
    }
}
