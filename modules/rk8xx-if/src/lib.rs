//! Interfaces between the RK8xx regulator driver and the world around it.
//!
//! The driver never talks to an I2C controller, a clock tree or a regulator
//! framework directly. Each of those is a collaborator expressed as a trait
//! here, so the selector math and sequencing can run against real hardware
//! or against an in-memory register file.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod error;

pub use error::*;

use alloc::string::String;

/// Dense per-chip rail identifier (`DCDC1` is 0 on both supported chips).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::From,
    derive_more::Into,
    derive_more::Display,
)]
pub struct RailId(u8);

impl RailId {
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Operating modes understood by the regulator framework.
///
/// Values follow `REGULATOR_MODE_*` from the kernel headers.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegulatorMode {
    /// Forced PWM.
    Fast = 0x1,
    /// Automatic PFM/PWM (power save).
    Normal = 0x2,
    Idle = 0x4,
    Standby = 0x8,
}

impl TryFrom<u32> for RegulatorMode {
    type Error = PmicError;

    fn try_from(raw: u32) -> PmicResult<Self> {
        match raw {
            0x1 => Ok(Self::Fast),
            0x2 => Ok(Self::Normal),
            0x4 => Ok(Self::Idle),
            0x8 => Ok(Self::Standby),
            _ => Err(PmicError::InvalidArgument),
        }
    }
}

/// Byte-wide register access to the PMIC.
///
/// Implementations may block. Serialization across rails is done by the
/// chip handle that owns the implementation, not by the implementation.
pub trait RegisterAccess: Send {
    fn read(&mut self, reg: u8) -> Result<u8, BusError>;

    fn write(&mut self, reg: u8, val: u8) -> Result<(), BusError>;
}

/// The CPU clock divider that brackets DVS on the CPU rail.
pub trait CpuClockDivider: Send {
    /// Program the CPU clock divider, `1` being the normal rate.
    fn set_divider(&mut self, div: u32) -> Result<(), BusError>;
}

/// Suspend-state configuration attached to a rail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuspendState {
    pub enabled: Option<bool>,
    pub microvolt: Option<u32>,
    pub mode: Option<RegulatorMode>,
}

/// Machine constraints for one rail (`regulator_init_data`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitData {
    pub min_microvolt: Option<u32>,
    pub max_microvolt: Option<u32>,
    pub always_on: bool,
    pub boot_on: bool,
    pub suspend: Option<SuspendState>,
}

/// One entry of a device-tree regulator match table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegulatorMatch {
    pub name: &'static str,
    pub init_data: Option<InitData>,
    pub of_node: Option<String>,
}

impl RegulatorMatch {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            init_data: None,
            of_node: None,
        }
    }

    /// Both init data and a node were found, so the rail can be registered.
    pub fn is_configured(&self) -> bool {
        self.binding().is_some()
    }

    /// The node name and init data, when the rail is configured.
    pub fn binding(&self) -> Option<(&str, &InitData)> {
        Some((self.of_node.as_deref()?, self.init_data.as_ref()?))
    }
}

/// Device-tree lookups the driver needs at probe time.
pub trait DeviceTree {
    type Node;

    /// Find a direct child of the PMIC node.
    fn child_by_name(&self, name: &str) -> Option<Self::Node>;

    /// Fill `matches` from the children of `node`, returning how many were
    /// found.
    fn match_regulators(&self, node: &Self::Node, matches: &mut [RegulatorMatch])
    -> PmicResult<usize>;
}

/// Everything the framework receives when a rail is registered.
#[derive(Debug, Clone, Copy)]
pub struct RegulatorConfig<'a> {
    pub id: RailId,
    pub name: &'static str,
    pub supply_name: &'static str,
    pub n_voltages: u32,
    pub of_node: &'a str,
    pub init_data: &'a InitData,
}

/// The host regulator framework.
pub trait RegulatorHost {
    type Handle;

    fn register(&mut self, config: RegulatorConfig<'_>) -> PmicResult<Self::Handle>;

    fn unregister(&mut self, handle: Self::Handle);

    /// The descriptor id a handle was registered with.
    fn rail_id(&self, handle: &Self::Handle) -> RailId;
}
