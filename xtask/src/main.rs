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

#![cfg_attr(target_os = "none", no_main)]
#![cfg(not(target_os = "none"))]

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use rk8xx_regulator::ChipVariant;

mod probe;
mod select;
mod table;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Host tooling for the RK8xx regulator driver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every rail of a chip with its registers and voltage table
    Table(TableArgs),
    /// Compute the selector a voltage request programs
    Select(SelectArgs),
    /// Probe a board file against an in-memory PMIC and dump the result
    Probe(ProbeArgs),
}

#[derive(Parser)]
struct TableArgs {
    /// Chip name (rk816 or rk805)
    #[arg(long, value_parser = parse_chip)]
    chip: ChipVariant,
    /// Only print the rail with this name
    #[arg(long)]
    rail: Option<String>,
}

#[derive(Parser)]
struct SelectArgs {
    #[arg(long, value_parser = parse_chip)]
    chip: ChipVariant,
    /// Rail name, e.g. RK816_DCDC1 (case-insensitive)
    #[arg(long)]
    rail: String,
    /// Lower bound of the request in microvolts
    #[arg(long)]
    min: u32,
    /// Upper bound in microvolts, defaults to `min`
    #[arg(long)]
    max: Option<u32>,
}

#[derive(Parser)]
struct ProbeArgs {
    /// Board configuration file (e.g., configs/board/rk816-evb.toml)
    #[arg(long)]
    board: PathBuf,
    /// Report ES2 silicon in the chip version register
    #[arg(long)]
    es2: bool,
    /// Also print the raw register accesses
    #[arg(long)]
    trace: bool,
}

fn parse_chip(name: &str) -> Result<ChipVariant> {
    ChipVariant::from_chip_name(name)
        .map_err(|_| anyhow!("unknown chip '{name}', expected rk816 or rk805"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Table(args) => table::run(args.chip, args.rail.as_deref())?,
        Commands::Select(args) => select::run(args.chip, &args.rail, args.min, args.max)?,
        Commands::Probe(args) => probe::run(&args.board, args.es2, args.trace)?,
    }

    Ok(())
}
