//! Unified error type for ksigaction operations.
//!
//! Kernel rejections are returned as [`Error::Os`] with the errno exactly as
//! the kernel reported it; the layer never reinterprets them.

use crate::errno::Errno;

/// Unified error type for ksigaction operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A POSIX errno from a failed syscall.
    Os(Errno),
    /// The restorer probe found no signal-return trampoline to reuse.
    ///
    /// Installing a handler without one on an architecture that requires it
    /// would crash the process on the first delivered signal.
    RestorerUnavailable,
}

impl Error {
    /// Convert a raw syscall return value to `Result`.
    ///
    /// Syscalls return negative values on failure (negated errno).
    /// Non-negative values indicate success.
    #[inline]
    pub fn from_syscall(ret: i64) -> Result<u64, Error> {
        Errno::from_syscall(ret).map_err(Error::Os)
    }

    /// The kernel errno carried by this error, if any.
    pub fn errno(&self) -> Option<Errno> {
        match self {
            Error::Os(e) => Some(*e),
            Error::RestorerUnavailable => None,
        }
    }
}

impl From<Errno> for Error {
    fn from(e: Errno) -> Self {
        Error::Os(e)
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Os(e) => write!(f, "{}", e),
            Error::RestorerUnavailable => {
                write!(f, "no signal restorer installed for the probe signal")
            }
        }
    }
}

impl std::error::Error for Error {}
