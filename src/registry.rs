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

//! A minimal in-crate regulator framework.
//!
//! Keeps every registered rail with its machine constraints and can apply
//! those constraints to the hardware once probe is done.

use alloc::string::{String, ToString};

use id_arena::Arena;
use rk8xx_if::{
    CpuClockDivider, InitData, PmicResult, RailId, RegisterAccess, RegulatorConfig, RegulatorHost,
};

use crate::Rk8xx;

pub type RegisteredId = id_arena::Id<RegisteredRail>;

#[derive(Debug, Clone)]
pub struct RegisteredRail {
    pub id: RailId,
    pub name: &'static str,
    pub supply_name: &'static str,
    pub of_node: String,
    pub n_voltages: u32,
    pub init_data: InitData,
    live: bool,
}

impl RegisteredRail {
    pub fn is_live(&self) -> bool {
        self.live
    }
}

#[derive(Default)]
pub struct Registry {
    rails: Arena<RegisteredRail>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: RegisteredId) -> Option<&RegisteredRail> {
        self.rails.get(id)
    }

    /// Rails that are registered and not yet removed, in registration order.
    pub fn live(&self) -> impl Iterator<Item = (RegisteredId, &RegisteredRail)> {
        self.rails.iter().filter(|(_, r)| r.live)
    }

    /// Program every live rail according to its constraints: the minimum
    /// voltage first, then enable for `always_on` and `boot_on` rails, then
    /// the suspend state.
    pub fn apply_constraints<B, C>(&self, pmic: &Rk8xx<B, C>) -> PmicResult
    where
        B: RegisterAccess,
        C: CpuClockDivider,
    {
        for (_, reg) in self.live() {
            let rail = pmic.rail(reg.id)?;
            let init = &reg.init_data;

            if let Some(min) = init.min_microvolt {
                let max = init.max_microvolt.unwrap_or(u32::MAX);
                let sel = rail.set_voltage(min, max)?;
                info!("{}: {} uV", reg.name, rail.list_voltage(sel as u32)?);
            }
            if init.always_on || init.boot_on {
                rail.enable()?;
            }

            let Some(suspend) = &init.suspend else {
                continue;
            };
            match suspend.enabled {
                Some(true) => rail.set_suspend_enable()?,
                Some(false) => rail.set_suspend_disable()?,
                None => {}
            }
            if let Some(uv) = suspend.microvolt {
                rail.set_suspend_voltage(uv)?;
            }
            if let Some(mode) = suspend.mode {
                rail.set_suspend_mode(mode)?;
            }
        }
        Ok(())
    }
}

impl RegulatorHost for Registry {
    type Handle = RegisteredId;

    fn register(&mut self, config: RegulatorConfig<'_>) -> PmicResult<RegisteredId> {
        Ok(self.rails.alloc(RegisteredRail {
            id: config.id,
            name: config.name,
            supply_name: config.supply_name,
            of_node: config.of_node.to_string(),
            n_voltages: config.n_voltages,
            init_data: config.init_data.clone(),
            live: true,
        }))
    }

    fn unregister(&mut self, handle: RegisteredId) {
        if let Some(rail) = self.rails.get_mut(handle) {
            debug!("{}: unregistered", rail.name);
            rail.live = false;
        }
    }

    fn rail_id(&self, handle: &RegisteredId) -> RailId {
        self.rails[*handle].id
    }
}
