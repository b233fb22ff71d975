//! POSIX errno values
//!
//! Numbers come from `libc` for the build target, since several
//! architectures (mips, sparc, alpha) renumber part of the table.

use core::fmt;

/// Error numbers returned by the signal syscalls
///
/// Only the values the signal conformance paths assert on get a name.
/// Everything else is kept verbatim in [`Errno::Other`], so a kernel
/// result is never rewritten on its way to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Errno {
    /// Operation not permitted
    EPERM,
    /// No such process
    ESRCH,
    /// Interrupted system call
    EINTR,
    /// Resource temporarily unavailable
    EAGAIN,
    /// Out of memory
    ENOMEM,
    /// Bad address
    EFAULT,
    /// Invalid argument
    EINVAL,
    /// Function not implemented
    ENOSYS,
    /// Any other kernel error number
    Other(i32),
}

impl Errno {
    /// Convert a raw syscall return value to Result
    ///
    /// Syscalls return negative errno on error, non-negative on success.
    pub fn from_syscall(ret: i64) -> Result<u64, Errno> {
        if ret >= 0 {
            Ok(ret as u64)
        } else {
            Err(Errno::from_raw(-ret as i32))
        }
    }

    /// Convert raw errno value to Errno enum
    pub fn from_raw(val: i32) -> Errno {
        match val {
            libc::EPERM => Errno::EPERM,
            libc::ESRCH => Errno::ESRCH,
            libc::EINTR => Errno::EINTR,
            libc::EAGAIN => Errno::EAGAIN,
            libc::ENOMEM => Errno::ENOMEM,
            libc::EFAULT => Errno::EFAULT,
            libc::EINVAL => Errno::EINVAL,
            libc::ENOSYS => Errno::ENOSYS,
            other => Errno::Other(other),
        }
    }

    /// The positive errno number
    pub fn raw(self) -> i32 {
        match self {
            Errno::EPERM => libc::EPERM,
            Errno::ESRCH => libc::ESRCH,
            Errno::EINTR => libc::EINTR,
            Errno::EAGAIN => libc::EAGAIN,
            Errno::ENOMEM => libc::ENOMEM,
            Errno::EFAULT => libc::EFAULT,
            Errno::EINVAL => libc::EINVAL,
            Errno::ENOSYS => libc::ENOSYS,
            Errno::Other(val) => val,
        }
    }

    /// Symbolic name, or `errno <n>` for unnamed values
    pub fn name(self) -> &'static str {
        match self {
            Errno::EPERM => "EPERM",
            Errno::ESRCH => "ESRCH",
            Errno::EINTR => "EINTR",
            Errno::EAGAIN => "EAGAIN",
            Errno::ENOMEM => "ENOMEM",
            Errno::EFAULT => "EFAULT",
            Errno::EINVAL => "EINVAL",
            Errno::ENOSYS => "ENOSYS",
            Errno::Other(_) => "errno",
        }
    }

    /// Read the calling thread's `errno`
    pub fn last() -> Errno {
        let raw = std::io::Error::last_os_error()
            .raw_os_error()
            .unwrap_or(libc::EINVAL);
        Errno::from_raw(raw)
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = std::io::Error::from_raw_os_error(self.raw());
        match self {
            Errno::Other(val) => write!(f, "errno {}: {}", val, text),
            named => write!(f, "{}: {}", named.name(), text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_values_round_trip() {
        for errno in [Errno::EFAULT, Errno::EINVAL, Errno::ENOSYS, Errno::EPERM] {
            assert_eq!(Errno::from_raw(errno.raw()), errno);
        }
    }

    #[test]
    fn unknown_values_are_kept() {
        let errno = Errno::from_raw(libc::EBADF);
        assert_eq!(errno, Errno::Other(libc::EBADF));
        assert_eq!(errno.raw(), libc::EBADF);
    }

    #[test]
    fn from_syscall_splits_on_sign() {
        assert_eq!(Errno::from_syscall(0), Ok(0));
        assert_eq!(Errno::from_syscall(-(libc::EFAULT as i64)), Err(Errno::EFAULT));
    }

    #[test]
    fn display_names_the_error() {
        let text = Errno::EINVAL.to_string();
        assert!(text.starts_with("EINVAL: "), "unexpected: {}", text);
    }
}
