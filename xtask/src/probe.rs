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

use std::{collections::BTreeSet, fs, path::Path};

use anyhow::{Context, Result, anyhow};
use colored::*;
use log::info;
use rk8xx_regmap::{Access, ChipHandle, RegisterFile};
use rk8xx_regulator::{
    BoardConfig, BusError, CpuClockDivider, PmicError, Registry, Rk8xxRegulatorDriver,
};
use rk8xx_types::{TYPE_ES2, regs::rk816};

/// Stands in for the CPU clock tree.
struct HostClock;

impl CpuClockDivider for HostClock {
    fn set_divider(&mut self, div: u32) -> Result<(), BusError> {
        info!("cpu clock divider -> {div}");
        Ok(())
    }
}

type HostDriver = Rk8xxRegulatorDriver<RegisterFile, HostClock, Registry>;

pub fn run(board: &Path, es2: bool, trace: bool) -> Result<()> {
    let text = fs::read_to_string(board)
        .with_context(|| format!("Failed to read {}", board.display()))?;
    let cfg = BoardConfig::from_toml(&text)
        .with_context(|| format!("Failed to parse {}", board.display()))?;

    let chip = ChipHandle::new(RegisterFile::new());
    if es2 {
        chip.with_bus(|f| f.poke(rk816::CHIP_VER, TYPE_ES2));
    }

    let mut registry = Registry::new();
    let driver = HostDriver::probe(
        cfg.platform_data(),
        chip.clone(),
        HostClock,
        &cfg,
        &mut registry,
    )
    .map_err(|e| anyhow!("probe failed: {e} (errno {})", e.to_errno()))?;
    println!(
        "{}",
        format!(
            "=== {} bound, {} of {} rails registered ===",
            driver.pmic().variant(),
            driver.handles().len(),
            driver.pmic().data().num_regulators()
        )
        .bold()
        .cyan()
    );

    registry
        .apply_constraints(driver.pmic())
        .context("Failed to apply board constraints")?;

    for (_, reg) in registry.live() {
        let rail = driver.pmic().rail(reg.id)?;
        let state = if rail.is_enabled()? {
            "on".green()
        } else {
            "off".red()
        };
        let mode = match rail.get_mode() {
            Ok(mode) => format!("{mode:?}"),
            Err(PmicError::Unsupported) => "-".to_string(),
            Err(e) => return Err(e.into()),
        };
        println!(
            "  {:<12} {:<14} {:>8} uV  {:<3}  mode {}",
            reg.name.bold(),
            reg.of_node,
            rail.get_voltage()?,
            state,
            mode
        );
    }

    chip.with_bus(|f| {
        let written: BTreeSet<u8> = f.writes().map(|(reg, _)| reg).collect();
        println!("\n{}", "registers written:".bold());
        for reg in written {
            println!("  {reg:#04x} = {:#04x}", f.peek(reg));
        }
        if trace {
            println!("\n{}", "bus trace:".bold());
            for access in f.log() {
                match access {
                    Access::Read(reg) => println!("  {} {reg:#04x}", "R".dimmed()),
                    Access::Write(reg, val) => {
                        println!("  {} {reg:#04x} <- {val:#04x}", "W".yellow())
                    }
                }
            }
        }
    });

    driver.remove(&mut registry);
    Ok(())
}
