//! Fail-fast wrappers for calls that must succeed
//!
//! A test uses these for setup steps that are not the behavior under test.
//! Any failure means the test itself is broken, so the process exits at once
//! with a `TBROK` line naming the caller's file and line, the call with its
//! arguments, and the kernel's error. A return value outside the documented
//! result space gets its own "Invalid ... return value" line: that is a bug
//! in this layer, not a kernel verdict. A kernel without the syscall at all
//! yields `TCONF`, so the harness can skip instead of fail.
//!
//! To assert an *expected* failure, call [`crate::signal`] directly.

use core::fmt;
use core::panic::Location;

use libc::c_int;

use crate::errno::Errno;
use crate::error::Error;
use crate::sentinel::{Addr, Arg};
use crate::signal;
use crate::types::{SigAction, SigSet};

/// Exit status for a broken test
pub const TBROK: i32 = 2;
/// Exit status for a configuration the test can't run on
pub const TCONF: i32 = 32;

/// The syscall that failed, with its arguments as passed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Sigaction {
        signum: c_int,
        act: usize,
        oact: usize,
        sigsetsize: usize,
    },
    Sigprocmask {
        how: c_int,
        set: usize,
        oset: usize,
        sigsetsize: usize,
    },
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Call::Sigaction {
                signum,
                act,
                oact,
                sigsetsize,
            } => write!(
                f,
                "rt_sigaction({}, {}, {}, {})",
                signum,
                Addr(act),
                Addr(oact),
                sigsetsize
            ),
            Call::Sigprocmask {
                how,
                set,
                oset,
                sigsetsize,
            } => write!(
                f,
                "rt_sigprocmask({}, {}, {}, {})",
                how,
                Addr(set),
                Addr(oset),
                sigsetsize
            ),
        }
    }
}

/// Why a fail-fast call gave up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The kernel (or the restorer probe) rejected the call
    Rejected(Error),
    /// The kernel does not implement the syscall
    Unsupported,
    /// A success value other than 0
    Anomaly(u64),
}

/// A terminal diagnostic
#[derive(Debug, Clone, Copy)]
pub struct Broken {
    pub location: &'static Location<'static>,
    pub call: Call,
    pub outcome: Outcome,
}

impl Broken {
    pub fn exit_code(&self) -> i32 {
        match self.outcome {
            Outcome::Unsupported => TCONF,
            Outcome::Rejected(_) | Outcome::Anomaly(_) => TBROK,
        }
    }

    /// Print the diagnostic and terminate the process
    pub fn abort(self) -> ! {
        log::logger().flush();
        eprintln!("{}", self);
        std::process::exit(self.exit_code())
    }
}

impl fmt::Display for Broken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = self.location.file();
        let line = self.location.line();
        match self.outcome {
            Outcome::Rejected(err) => {
                write!(f, "TBROK: {}:{}: {} failed: {}", file, line, self.call, err)
            }
            Outcome::Unsupported => write!(
                f,
                "TCONF: {}:{}: {} not supported by this kernel",
                file, line, self.call
            ),
            Outcome::Anomaly(ret) => write!(
                f,
                "TBROK: {}:{}: Invalid {} return value {}",
                file, line, self.call, ret
            ),
        }
    }
}

/// Classify a result; `None` means the call succeeded as documented
pub fn classify(result: Result<u64, Error>) -> Option<Outcome> {
    match result {
        Ok(0) => None,
        Ok(ret) => Some(Outcome::Anomaly(ret)),
        Err(Error::Os(Errno::ENOSYS)) => Some(Outcome::Unsupported),
        Err(err) => Some(Outcome::Rejected(err)),
    }
}

fn check(location: &'static Location<'static>, call: Call, result: Result<u64, Error>) -> u64 {
    match classify(result) {
        None => 0,
        Some(outcome) => Broken {
            location,
            call,
            outcome,
        }
        .abort(),
    }
}

/// [`signal::install_signal_action`], exiting the process on any failure
///
/// # Safety
/// Same contract as [`signal::install_signal_action`].
#[track_caller]
pub unsafe fn install_signal_action_or_abort(
    signum: c_int,
    act: Arg<&SigAction>,
    oact: Arg<&mut SigAction>,
    sigsetsize: usize,
) -> u64 {
    let location = Location::caller();
    let call = Call::Sigaction {
        signum,
        act: act.addr(),
        oact: oact.addr(),
        sigsetsize,
    };
    let result = signal::install_signal_action(signum, act, oact, sigsetsize);
    check(location, call, result)
}

/// [`signal::set_signal_mask`], exiting the process on any failure
#[track_caller]
pub fn set_signal_mask_or_abort(
    how: c_int,
    set: Arg<&SigSet>,
    oset: Arg<&mut SigSet>,
    sigsetsize: usize,
) -> u64 {
    let location = Location::caller();
    let call = Call::Sigprocmask {
        how,
        set: set.addr(),
        oset: oset.addr(),
        sigsetsize,
    };
    let result = signal::set_signal_mask(how, set, oset, sigsetsize);
    check(location, call, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentinel::INVALID_SA_PTR;

    fn sigaction_call() -> Call {
        Call::Sigaction {
            signum: 10,
            act: INVALID_SA_PTR,
            oact: 0,
            sigsetsize: 8,
        }
    }

    #[test]
    fn success_is_not_classified() {
        assert_eq!(classify(Ok(0)), None);
    }

    #[test]
    fn kernel_rejection_reports_errno() {
        let broken = Broken {
            location: Location::caller(),
            call: sigaction_call(),
            outcome: classify(Err(Error::Os(Errno::EFAULT))).unwrap(),
        };
        let text = broken.to_string();
        assert!(text.starts_with("TBROK: src/safe.rs:"), "{}", text);
        let expected = format!(
            "rt_sigaction(10, {:#x}, (nil), 8) failed: EFAULT",
            INVALID_SA_PTR
        );
        assert!(text.contains(&expected), "{}", text);
        assert_eq!(broken.exit_code(), TBROK);
    }

    #[test]
    fn anomaly_is_distinct_from_rejection() {
        let broken = Broken {
            location: Location::caller(),
            call: sigaction_call(),
            outcome: classify(Ok(3)).unwrap(),
        };
        let text = broken.to_string();
        assert!(text.contains("Invalid rt_sigaction("), "{}", text);
        assert!(text.ends_with("return value 3"), "{}", text);
        assert!(!text.contains("failed"));
        assert_eq!(broken.exit_code(), TBROK);
    }

    #[test]
    fn enosys_is_a_configuration_problem() {
        let broken = Broken {
            location: Location::caller(),
            call: Call::Sigprocmask {
                how: 0,
                set: 0x1000,
                oset: 0,
                sigsetsize: 8,
            },
            outcome: classify(Err(Error::Os(Errno::ENOSYS))).unwrap(),
        };
        assert!(broken.to_string().starts_with("TCONF: "));
        assert!(broken.to_string().contains("rt_sigprocmask(0, 0x1000, (nil), 8)"));
        assert_eq!(broken.exit_code(), TCONF);
    }

    #[test]
    fn restorer_failure_is_broken() {
        let outcome = classify(Err(Error::RestorerUnavailable)).unwrap();
        assert_eq!(outcome, Outcome::Rejected(Error::RestorerUnavailable));
    }
}
