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

use anyhow::{Result, anyhow};
use colored::*;
use rk8xx_regulator::{ChipVariant, RegulatorDesc};

/// Voltages printed per line.
const PER_LINE: u32 = 8;

pub fn run(chip: ChipVariant, only: Option<&str>) -> Result<()> {
    let data = chip.data();
    data.validate()?;

    let descs: Vec<&RegulatorDesc> = match only {
        Some(name) => vec![
            data.desc_by_name(name)
                .ok_or_else(|| anyhow!("{chip} has no rail named '{name}'"))?,
        ],
        None => data.descs.iter().collect(),
    };

    println!(
        "{}",
        format!("=== {chip}: {} rails ===", data.num_regulators())
            .bold()
            .cyan()
    );
    for desc in descs {
        print_rail(desc)?;
    }
    Ok(())
}

fn print_rail(desc: &RegulatorDesc) -> Result<()> {
    println!(
        "\n{} ({:?}, supply {})",
        desc.name.bold(),
        desc.family,
        desc.supply_name
    );
    match desc.vsel_reg {
        Some(reg) => println!(
            "  vsel {reg:#04x} / sleep {:#04x}, mask {:#04x}, {} selectors",
            reg + 1,
            desc.vsel_mask,
            desc.n_voltages
        ),
        None => println!("  {}", "fixed output, no selector register".yellow()),
    }
    println!(
        "  enable {:#04x} bit {:#04x}{}",
        desc.enable_reg,
        desc.enable_mask,
        match desc.mode_reg {
            Some(reg) => format!(", mode {reg:#04x}"),
            None => String::new(),
        }
    );
    if desc.enable_time_us > 0 {
        println!("  enable time {} us", desc.enable_time_us);
    }

    for start in (0..desc.n_voltages).step_by(PER_LINE as usize) {
        let row = (start..(start + PER_LINE).min(desc.n_voltages))
            .map(|sel| -> Result<String> {
                Ok(format!("{:>8}", desc.family.list_voltage(sel)?))
            })
            .collect::<Result<Vec<_>>>()?;
        println!("  {}  {}", format!("{start:#04x}").dimmed(), row.join(" "));
    }
    Ok(())
}
