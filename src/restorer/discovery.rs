//! Restorer discovery on x86_64
//!
//! The x86_64 kernel has no fallback trampoline: every handler must be
//! installed with `SA_RESTORER` and a valid restorer, or the process dies on
//! the first signal. libc already provides one (`__restore_rt`) and attaches
//! it to everything it installs, including what the Rust runtime sets up at
//! startup. The probe reads that address back from the kernel.
//!
//! The probe signal's disposition is only read, or briefly replaced and then
//! put back; racing probes all find the same libc trampoline, so whichever
//! publishes first wins and the others read its value.
//! Threads racing through the transient-handler fallback can save each
//! other's no-op handler, leaving the probe signal on it afterwards.

use core::ptr;

use conquer_once::spin::OnceCell;
use libc::c_int;
use log::{debug, trace, warn};

use crate::abi::{DefaultKernelSigaction, KernelAction};
use crate::errno::Errno;
use crate::error::Error;
use crate::restorer::Trampoline;
use crate::syscall;
use crate::types::{SA_RESTORER, SIGSET_SIZE};

/// Signal whose kernel disposition is inspected
///
/// The Rust runtime sets it to `SIG_IGN` through libc before `main`.
pub const PROBE_SIGNAL: c_int = libc::SIGPIPE;

/// `__NR_rt_sigreturn` on x86_64
const RT_SIGRETURN: usize = 15;

static RESTORER: OnceCell<usize> = OnceCell::uninit();

pub fn is_resolved() -> bool {
    RESTORER.is_initialized()
}

/// Cached restorer address, probing the kernel on first use
pub fn resolve() -> Result<usize, Error> {
    if let Some(addr) = RESTORER.get() {
        return Ok(*addr);
    }

    let addr = probe()?;
    if RESTORER.try_init_once(|| addr).is_err() {
        trace!("restorer already published by another thread");
    }
    Ok(RESTORER.get().copied().unwrap_or(addr))
}

/// The discovered trampoline with its calling convention
pub fn trampoline() -> Result<Trampoline, Error> {
    Ok(Trampoline {
        entry: resolve()?,
        trap: "syscall",
        nr_register: "rax",
        nr: RT_SIGRETURN,
    })
}

fn probe() -> Result<usize, Error> {
    if let Some(addr) = read_restorer()? {
        debug!("restorer {:#x} found on signal {}", addr, PROBE_SIGNAL);
        return Ok(addr);
    }

    debug!(
        "signal {} carries no restorer, installing a transient libc handler",
        PROBE_SIGNAL
    );
    match with_transient_handler(read_restorer)? {
        Some(addr) => {
            debug!("restorer {:#x} found after libc install", addr);
            Ok(addr)
        }
        None => Err(Error::RestorerUnavailable),
    }
}

/// Read the probe signal's disposition straight from the kernel
fn read_restorer() -> Result<Option<usize>, Error> {
    let mut old = DefaultKernelSigaction::default();
    let ret = unsafe {
        syscall::rt_sigaction::<DefaultKernelSigaction>(
            PROBE_SIGNAL,
            ptr::null(),
            &mut old,
            SIGSET_SIZE,
            None,
        )
    };
    Error::from_syscall(ret)?;
    trace!("probe read {:?}", old);

    match old.restorer() {
        Some(addr) if addr != 0 && old.flags() & SA_RESTORER != 0 => Ok(Some(addr)),
        _ => Ok(None),
    }
}

extern "C" fn transient_handler(_sig: c_int) {}

/// Run `f` while libc's `sigaction` has a no-op handler on the probe signal
fn with_transient_handler<T>(f: impl FnOnce() -> Result<T, Error>) -> Result<T, Error> {
    let mut transient: libc::sigaction = unsafe { core::mem::zeroed() };
    transient.sa_sigaction = transient_handler as *const () as usize;
    let mut saved: libc::sigaction = unsafe { core::mem::zeroed() };

    if unsafe { libc::sigaction(PROBE_SIGNAL, &transient, &mut saved) } != 0 {
        return Err(Error::Os(Errno::last()));
    }

    let result = f();

    if unsafe { libc::sigaction(PROBE_SIGNAL, &saved, ptr::null_mut()) } != 0 {
        warn!(
            "could not restore disposition of signal {}: {}",
            PROBE_SIGNAL,
            Errno::last()
        );
    }
    result
}
