use alloc::{collections::btree_map::BTreeMap, vec::Vec};

use rk8xx_if::{BusError, RegisterAccess};

/// One bus transaction seen by a [`RegisterFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read(u8),
    Write(u8, u8),
}

/// An in-memory stand-in for the PMIC's 256 byte register space.
///
/// Records every access and can be told to fail reads or writes of a given
/// register, or to drop writes to a register so that it never reads back
/// what was written.
#[derive(Debug, Clone)]
pub struct RegisterFile {
    regs: [u8; 256],
    log: Vec<Access>,
    read_faults: BTreeMap<u8, BusError>,
    write_faults: BTreeMap<u8, BusError>,
    stuck: BTreeMap<u8, usize>,
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    pub fn new() -> Self {
        Self {
            regs: [0; 256],
            log: Vec::new(),
            read_faults: BTreeMap::new(),
            write_faults: BTreeMap::new(),
            stuck: BTreeMap::new(),
        }
    }

    /// Current content of `reg`, without logging an access.
    pub fn peek(&self, reg: u8) -> u8 {
        self.regs[reg as usize]
    }

    /// Set `reg` directly, as the hardware would after reset.
    pub fn poke(&mut self, reg: u8, val: u8) {
        self.regs[reg as usize] = val;
    }

    pub fn fail_reads(&mut self, reg: u8, err: BusError) {
        self.read_faults.insert(reg, err);
    }

    pub fn fail_writes(&mut self, reg: u8, err: BusError) {
        self.write_faults.insert(reg, err);
    }

    /// Silently drop the next `count` writes to `reg`.
    pub fn stick(&mut self, reg: u8, count: usize) {
        self.stuck.insert(reg, count);
    }

    pub fn clear_faults(&mut self) {
        self.read_faults.clear();
        self.write_faults.clear();
        self.stuck.clear();
    }

    pub fn log(&self) -> &[Access] {
        &self.log
    }

    pub fn take_log(&mut self) -> Vec<Access> {
        core::mem::take(&mut self.log)
    }

    /// `(reg, value)` of every logged write, oldest first.
    pub fn writes(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.log.iter().filter_map(|a| match *a {
            Access::Write(reg, val) => Some((reg, val)),
            Access::Read(_) => None,
        })
    }

    pub fn writes_to(&self, reg: u8) -> usize {
        self.writes().filter(|&(r, _)| r == reg).count()
    }
}

impl RegisterAccess for RegisterFile {
    fn read(&mut self, reg: u8) -> Result<u8, BusError> {
        self.log.push(Access::Read(reg));
        if let Some(&err) = self.read_faults.get(&reg) {
            return Err(err);
        }
        Ok(self.regs[reg as usize])
    }

    fn write(&mut self, reg: u8, val: u8) -> Result<(), BusError> {
        self.log.push(Access::Write(reg, val));
        if let Some(&err) = self.write_faults.get(&reg) {
            return Err(err);
        }
        if let Some(left) = self.stuck.get_mut(&reg) {
            if *left > 0 {
                *left -= 1;
                return Ok(());
            }
        }
        self.regs[reg as usize] = val;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stuck_register_drops_writes() {
        let mut f = RegisterFile::new();
        f.stick(0x2f, 2);
        f.write(0x2f, 1).unwrap();
        f.write(0x2f, 2).unwrap();
        assert_eq!(f.peek(0x2f), 0);
        f.write(0x2f, 3).unwrap();
        assert_eq!(f.peek(0x2f), 3);
        assert_eq!(f.writes_to(0x2f), 3);
    }

    #[test]
    fn faults_are_per_register() {
        let mut f = RegisterFile::new();
        f.fail_writes(0x24, BusError::Timeout);
        assert_eq!(f.write(0x24, 0x80), Err(BusError::Timeout));
        assert_eq!(f.write(0x23, 0x11), Ok(()));
        f.clear_faults();
        assert_eq!(f.write(0x24, 0x80), Ok(()));
        assert_eq!(f.peek(0x24), 0x80);
    }
}
