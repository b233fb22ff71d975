//! Fixed-label restorers for sparc
//!
//! sparc's `rt_sigaction` takes the trampoline as its own argument instead of
//! reading `sa_restorer`. The kernel resumes at `restorer + 8` (the `ret`
//! convention skips the call and its delay slot), so the label address minus
//! 8 is what gets passed.
//!
//! Contract: syscall number in `%g1`, trap `ta 0x6d` on sparc64 and
//! `ta 0x10` on sparc32.

use core::arch::global_asm;

use crate::restorer::Trampoline;
use crate::types::SigAction;
#[cfg(target_arch = "sparc")]
use crate::types::SA_SIGINFO;

/// `__NR_rt_sigreturn` on sparc
const RT_SIGRETURN: usize = 101;
/// `__NR_sigreturn` on sparc
#[cfg(target_arch = "sparc")]
const SIGRETURN: usize = 216;

/// Offset the kernel adds to the stub address before returning into it
const RETURN_OFFSET: usize = 8;

#[cfg(target_arch = "sparc64")]
const TRAP: &str = "ta 0x6d";
#[cfg(target_arch = "sparc")]
const TRAP: &str = "ta 0x10";

#[cfg(target_arch = "sparc64")]
global_asm!(
    ".text",
    ".align 4",
    ".global __ksigaction_rt_sigreturn_stub",
    ".type __ksigaction_rt_sigreturn_stub, #function",
    "__ksigaction_rt_sigreturn_stub:",
    "mov {nr}, %g1",
    "ta 0x6d",
    nr = const RT_SIGRETURN,
);

#[cfg(target_arch = "sparc")]
global_asm!(
    ".text",
    ".align 4",
    ".global __ksigaction_rt_sigreturn_stub",
    ".type __ksigaction_rt_sigreturn_stub, #function",
    "__ksigaction_rt_sigreturn_stub:",
    "mov {rt_nr}, %g1",
    "ta 0x10",
    ".global __ksigaction_sigreturn_stub",
    ".type __ksigaction_sigreturn_stub, #function",
    "__ksigaction_sigreturn_stub:",
    "mov {nr}, %g1",
    "ta 0x10",
    rt_nr = const RT_SIGRETURN,
    nr = const SIGRETURN,
);

extern "C" {
    fn __ksigaction_rt_sigreturn_stub();
    #[cfg(target_arch = "sparc")]
    fn __ksigaction_sigreturn_stub();
}

/// Stub for handlers that take a `siginfo_t`
pub fn rt_trampoline() -> Trampoline {
    Trampoline {
        entry: __ksigaction_rt_sigreturn_stub as *const () as usize,
        trap: TRAP,
        nr_register: "%g1",
        nr: RT_SIGRETURN,
    }
}

/// Stub for classic one-argument handlers
#[cfg(target_arch = "sparc")]
pub fn trampoline() -> Trampoline {
    Trampoline {
        entry: __ksigaction_sigreturn_stub as *const () as usize,
        trap: TRAP,
        nr_register: "%g1",
        nr: SIGRETURN,
    }
}

/// Stub selection for an action on sparc32: `SA_SIGINFO` takes the rt stub
#[cfg(target_arch = "sparc")]
pub fn trampoline_for(act: Option<&SigAction>) -> Trampoline {
    match act {
        Some(act) if act.flags & SA_SIGINFO != 0 => rt_trampoline(),
        _ => trampoline(),
    }
}

/// sparc64 only has the rt frame
#[cfg(target_arch = "sparc64")]
pub fn trampoline_for(_act: Option<&SigAction>) -> Trampoline {
    rt_trampoline()
}

/// Value of the extra `rt_sigaction` argument
pub fn stub_argument(act: Option<&SigAction>) -> usize {
    trampoline_for(act).entry.wrapping_sub(RETURN_OFFSET)
}
