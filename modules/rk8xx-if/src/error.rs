use axerrno::LinuxError;

/// Kernel-internal "operation not supported".
///
/// Not a userspace errno, so [`LinuxError`] has no variant for it.
pub const ENOTSUPP: i32 = 524;

/// Failure reported by the register transport (I2C/regmap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BusError {
    /// The device did not acknowledge its address or a data byte.
    #[error("no acknowledge from device")]
    Nack,
    /// Another master won arbitration.
    #[error("bus arbitration lost")]
    ArbitrationLost,
    /// The transfer did not complete in time.
    #[error("bus timeout")]
    Timeout,
    /// Any other transport failure, carrying the raw negative errno.
    #[error("bus error {0}")]
    Other(i32),
}

impl BusError {
    pub fn to_errno(self) -> i32 {
        match self {
            BusError::Nack => -LinuxError::EREMOTEIO.code(),
            BusError::ArbitrationLost => -LinuxError::EAGAIN.code(),
            BusError::Timeout => -LinuxError::ETIMEDOUT.code(),
            BusError::Other(code) if code < 0 => code,
            BusError::Other(_) => -LinuxError::EIO.code(),
        }
    }
}

/// The error type for regulator operation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PmicError {
    /// Voltage or selector outside the representable range, unsupported
    /// mode, or unknown chip name.
    #[error("invalid argument")]
    InvalidArgument,
    /// Register read or write failed on the bus.
    #[error("register transport error: {0}")]
    Transport(#[from] BusError),
    /// The rail has no device-tree binding.
    #[error("regulator has no device-tree binding")]
    NotConfigured,
    /// The handle table could not be allocated.
    #[error("not enough memory")]
    AllocationFailure,
    /// The host framework rejected a descriptor.
    #[error("regulator registration rejected ({0})")]
    Registration(i32),
    /// The selector register never read back the written value.
    #[error("selector {expected:#04x} did not latch, last readback {actual:#04x}")]
    ConvergenceTimeout { expected: u8, actual: u8 },
    /// The rail family does not implement this operation.
    #[error("operation not supported by this rail")]
    Unsupported,
    /// The parent device has no `regulators` node.
    #[error("no regulators node")]
    NoDevice,
    /// A static descriptor table failed validation.
    #[error("malformed descriptor table: {0}")]
    BadTable(&'static str),
}

impl PmicError {
    /// Negative errno handed back to the regulator framework.
    pub fn to_errno(self) -> i32 {
        match self {
            PmicError::InvalidArgument | PmicError::BadTable(_) => -LinuxError::EINVAL.code(),
            PmicError::Transport(e) => e.to_errno(),
            PmicError::NotConfigured => -LinuxError::ENODEV.code(),
            PmicError::AllocationFailure => -LinuxError::ENOMEM.code(),
            PmicError::Registration(code) if code < 0 => code,
            PmicError::Registration(_) => -LinuxError::EINVAL.code(),
            PmicError::ConvergenceTimeout { .. } => -LinuxError::ETIMEDOUT.code(),
            PmicError::Unsupported => -ENOTSUPP,
            PmicError::NoDevice => -LinuxError::ENXIO.code(),
        }
    }
}

/// A specialized `Result` type for regulator operations.
pub type PmicResult<T = ()> = Result<T, PmicError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errno_values_match_linux() {
        assert_eq!(PmicError::InvalidArgument.to_errno(), -22);
        assert_eq!(PmicError::BadTable("x").to_errno(), -22);
        assert_eq!(PmicError::NotConfigured.to_errno(), -19);
        assert_eq!(PmicError::Unsupported.to_errno(), -524);
        assert_eq!(BusError::Nack.to_errno(), -121);
        assert_eq!(BusError::ArbitrationLost.to_errno(), -11);
        assert_eq!(BusError::Timeout.to_errno(), -110);
        assert_eq!(BusError::Other(3).to_errno(), -5);
    }

    #[test]
    fn transport_errno_is_verbatim() {
        assert_eq!(PmicError::from(BusError::Other(-71)).to_errno(), -71);
        let nack = PmicError::from(BusError::Nack);
        assert_eq!(nack.to_errno(), -LinuxError::EREMOTEIO.code());
    }

    #[test]
    fn taxonomy_errno() {
        let cases = [
            (PmicError::InvalidArgument, LinuxError::EINVAL),
            (PmicError::NoDevice, LinuxError::ENXIO),
            (PmicError::AllocationFailure, LinuxError::ENOMEM),
        ];
        for (err, errno) in cases {
            assert_eq!(err.to_errno(), -errno.code());
        }
        assert_eq!(PmicError::Registration(-16).to_errno(), -16);
        assert_eq!(
            PmicError::ConvergenceTimeout {
                expected: 1,
                actual: 2
            }
            .to_errno(),
            -LinuxError::ETIMEDOUT.code()
        );
    }

    #[test]
    fn convergence_message() {
        let e = PmicError::ConvergenceTimeout {
            expected: 0x20,
            actual: 0x1f,
        };
        assert_eq!(
            e.to_string(),
            "selector 0x20 did not latch, last readback 0x1f"
        );
    }
}
