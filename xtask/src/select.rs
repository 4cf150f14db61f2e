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

use anyhow::{Context, Result, anyhow};
use colored::*;
use rk8xx_regulator::ChipVariant;

pub fn run(chip: ChipVariant, rail: &str, min: u32, max: Option<u32>) -> Result<()> {
    let desc = chip
        .data()
        .desc_by_name(rail)
        .ok_or_else(|| anyhow!("{chip} has no rail named '{rail}'"))?;
    let max = max.unwrap_or(min);

    let sel = desc
        .family
        .select(min, max)
        .with_context(|| format!("{}: no selector for [{min}, {max}] uV", desc.name))?;
    let uv = desc.family.list_voltage(sel as u32)?;

    println!(
        "{}: [{min}, {max}] uV -> selector {} = {} uV",
        desc.name.bold(),
        format!("{sel:#04x}").green(),
        uv.to_string().green()
    );
    if uv != min {
        let note = format!("rounded down by {} uV", min.abs_diff(uv));
        println!("  {}", note.yellow());
    }
    if let Some(reg) = desc.vsel_reg {
        println!(
            "  writes {sel:#04x} into register {reg:#04x} under mask {:#04x}",
            desc.vsel_mask
        );
    } else {
        println!("  {}", "fixed rail, nothing is written".yellow());
    }
    Ok(())
}
