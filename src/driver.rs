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

//! Probe and removal of the regulator device.

use alloc::vec::Vec;

use rk8xx_if::{
    CpuClockDivider, DeviceTree, PmicError, PmicResult, RailId, RegisterAccess, RegulatorConfig,
    RegulatorHost, RegulatorMatch,
};
use rk8xx_regmap::ChipHandle;

use crate::{Rail, Rk8xx};

/// Name of the child node holding one sub-node per rail.
pub const REGULATORS_NODE: &str = "regulators";

/// Platform data handed down by the parent MFD device.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformData<'a> {
    pub chip_name: Option<&'a str>,
}

/// A probed regulator device: the bound PMIC plus every rail that was
/// registered with the host.
pub struct Rk8xxRegulatorDriver<B, C, H: RegulatorHost> {
    pmic: Rk8xx<B, C>,
    /// Registered rails in creation order.
    handles: Vec<H::Handle>,
}

impl<B, C, H> Rk8xxRegulatorDriver<B, C, H>
where
    B: RegisterAccess,
    C: CpuClockDivider,
    H: RegulatorHost,
{
    pub fn probe<D: DeviceTree>(
        pdata: PlatformData<'_>,
        chip: ChipHandle<B>,
        clk: C,
        dt: &D,
        host: &mut H,
    ) -> PmicResult<Self> {
        let pmic = Rk8xx::bind(pdata.chip_name, chip, clk)?;
        let data = pmic.data();

        let Some(node) = dt.child_by_name(REGULATORS_NODE) else {
            error!("rk8xx-regulator: {REGULATORS_NODE} node not found");
            return Err(PmicError::NoDevice);
        };

        let mut matches: Vec<_> = data
            .of_match
            .iter()
            .map(|&name| RegulatorMatch::new(name))
            .collect();
        let found = dt.match_regulators(&node, &mut matches).inspect_err(|e| {
            error!("rk8xx-regulator: error parsing regulator init data: {e}");
        })?;
        debug!(
            "rk8xx-regulator: {found} of {} rails described",
            matches.len()
        );

        let mut handles = Vec::new();
        handles
            .try_reserve_exact(data.num_regulators())
            .map_err(|_| PmicError::AllocationFailure)?;

        for (desc, m) in data.descs.iter().zip(&matches) {
            let Some((of_node, init_data)) = m.binding() else {
                debug!("{}: {}", desc.name, PmicError::NotConfigured);
                continue;
            };
            let config = RegulatorConfig {
                id: desc.id,
                name: desc.name,
                supply_name: desc.supply_name,
                n_voltages: desc.n_voltages,
                of_node,
                init_data,
            };
            match host.register(config) {
                Ok(handle) => {
                    info!("rk8xx-regulator: registered {}", desc.name);
                    handles.push(handle);
                }
                Err(e) => {
                    error!("rk8xx-regulator: failed to register {}: {e}", desc.name);
                    unregister_all(host, handles);
                    return Err(e);
                }
            }
        }

        Ok(Self { pmic, handles })
    }

    pub fn pmic(&self) -> &Rk8xx<B, C> {
        &self.pmic
    }

    pub fn handles(&self) -> &[H::Handle] {
        &self.handles
    }

    /// The rail a host handle was registered for.
    pub fn rail_of(&self, host: &H, handle: &H::Handle) -> PmicResult<Rail<'_, B, C>> {
        let id: RailId = host.rail_id(handle);
        self.pmic.rail(id)
    }

    pub fn remove(self, host: &mut H) {
        unregister_all(host, self.handles);
    }
}

fn unregister_all<H: RegulatorHost>(host: &mut H, mut handles: Vec<H::Handle>) {
    while let Some(handle) = handles.pop() {
        host.unregister(handle);
    }
}
