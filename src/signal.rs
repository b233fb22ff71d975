//! Signal disposition and mask syscalls
//!
//! These are the entry points conformance tests call when they expect a
//! particular outcome, failure included. The kernel's answer comes back
//! unchanged: `Ok` with the raw return value, or [`Error::Os`] with the errno.
//! For calls that simply must succeed, see [`crate::safe`].

use libc::c_int;
use log::debug;

use crate::arch::{Abi, SignalAbi};
use crate::error::Error;
use crate::sentinel::{Arg, Passthrough};
use crate::syscall;
use crate::translate;
use crate::types::{SigAction, SigSet};

/// Install and/or query a signal disposition with raw `rt_sigaction`
///
/// # Arguments
/// * `signum` - Signal number, passed to the kernel unchecked
/// * `act` - New action, [`Arg::Null`] to query, or [`Arg::Invalid`]
/// * `oact` - Where to store the old action, [`Arg::Null`], or [`Arg::Invalid`]
/// * `sigsetsize` - Forwarded as is; anything but [`crate::SIGSET_SIZE`] is
///   rejected by the kernel with `EINVAL`
///
/// # Returns
/// * `Ok(ret)` with the kernel's return value (0)
/// * `Err(Error::Os(errno))` when the kernel rejects the call
/// * `Err(..)` when the restorer this architecture requires can't be found
///
/// `oact` is only written when the syscall succeeds. [`Arg::Invalid`] is
/// never dereferenced, in either position.
///
/// # Safety
/// `act.handler` becomes the code the kernel jumps to on delivery. It must be
/// `SIG_DFL`, `SIG_IGN`, or an async-signal-safe `extern "C"` function whose
/// signature matches `act.flags` (three arguments with `SA_SIGINFO`).
///
/// # Example
/// ```ignore
/// extern "C" fn handler(_sig: c_int) {}
///
/// let act = SigAction::new(handler);
/// let mut old = SigAction::default();
/// unsafe {
///     install_signal_action(libc::SIGUSR1, Arg::Ref(&act), Arg::Ref(&mut old), SIGSET_SIZE)?;
/// }
/// ```
pub unsafe fn install_signal_action(
    signum: c_int,
    act: Arg<&SigAction>,
    oact: Arg<&mut SigAction>,
    sigsetsize: usize,
) -> Result<u64, Error> {
    let act_mode = Passthrough::of(&act);
    let oact_mode = Passthrough::of(&oact);

    let mut kact = <Abi as SignalAbi>::Action::default();
    let mut koact = <Abi as SignalAbi>::Action::default();

    let new = match act {
        Arg::Ref(new) => {
            kact = translate::to_kernel::<Abi>(new)?;
            Some(new)
        }
        Arg::Null | Arg::Invalid => None,
    };
    let stub = Abi::stub_argument(new);

    let ret = syscall::rt_sigaction(
        signum,
        act_mode.pointer(&mut kact) as *const _,
        oact_mode.pointer(&mut koact),
        sigsetsize,
        stub,
    );
    debug!(
        "rt_sigaction({}, {:?}, {:?}, {}) = {}",
        signum, act_mode, oact_mode, sigsetsize, ret
    );
    let value = Error::from_syscall(ret)?;

    if let Arg::Ref(out) = oact {
        translate::from_kernel(&koact, out);
    }
    Ok(value)
}

/// Change and/or query the calling thread's signal mask with raw `rt_sigprocmask`
///
/// Arguments follow [`install_signal_action`]: `how` and `sigsetsize` are
/// passed through unchecked and [`Arg::Invalid`] is forwarded as
/// `(void *)-1`. The kernel checks `sigsetsize` before touching either set,
/// so an oversized value cannot make it read past a [`SigSet`].
pub fn set_signal_mask(
    how: c_int,
    set: Arg<&SigSet>,
    mut oset: Arg<&mut SigSet>,
    sigsetsize: usize,
) -> Result<u64, Error> {
    let ret = unsafe { syscall::rt_sigprocmask(how, set.as_ptr(), oset.as_mut_ptr(), sigsetsize) };
    debug!(
        "rt_sigprocmask({}, {:#x}, {:#x}, {}) = {}",
        how,
        set.addr(),
        oset.addr(),
        sigsetsize,
        ret
    );
    Error::from_syscall(ret)
}
