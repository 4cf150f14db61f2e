use alloc::sync::Arc;

use rk8xx_if::{BusError, RegisterAccess};
use spin::Mutex;

/// Shared handle to one physical PMIC.
///
/// Every rail of the chip goes through the same handle, and every primitive
/// takes the handle's lock, so accesses from different rails never
/// interleave. [`ChipHandle::set_bits`] holds the lock across its
/// read-modify-write.
pub struct ChipHandle<B>(Arc<Mutex<B>>);

impl<B> Clone for ChipHandle<B> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<B: RegisterAccess> ChipHandle<B> {
    pub fn new(bus: B) -> Self {
        Self(Arc::new(Mutex::new(bus)))
    }

    pub fn read(&self, reg: u8) -> Result<u8, BusError> {
        let val = self.0.lock().read(reg);
        trace!("rk8xx read {reg:#04x} -> {val:x?}");
        val
    }

    pub fn write(&self, reg: u8, val: u8) -> Result<(), BusError> {
        trace!("rk8xx write {reg:#04x} <- {val:#04x}");
        self.0.lock().write(reg, val)
    }

    /// Replace the bits selected by `mask` with the same bits of `val`.
    pub fn set_bits(&self, reg: u8, mask: u8, val: u8) -> Result<(), BusError> {
        let mut bus = self.0.lock();
        let old = bus.read(reg)?;
        let new = (old & !mask) | (val & mask);
        trace!("rk8xx update {reg:#04x}: {old:#04x} -> {new:#04x}");
        bus.write(reg, new)
    }

    pub fn clear_bits(&self, reg: u8, mask: u8) -> Result<(), BusError> {
        self.set_bits(reg, mask, 0)
    }

    /// Run `f` with exclusive access to the underlying bus.
    pub fn with_bus<R>(&self, f: impl FnOnce(&mut B) -> R) -> R {
        f(&mut self.0.lock())
    }
}
