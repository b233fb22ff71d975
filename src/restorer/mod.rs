//! Signal-return trampolines
//!
//! When a handler returns, the kernel transfers control to a "restorer" that
//! must issue `rt_sigreturn` to restore the interrupted context. How this
//! layer obtains one depends on the architecture:
//!
//! - x86_64 ([`discovery`]): the kernel refuses to deliver without
//!   `SA_RESTORER`, and libc already ships a trampoline. Its address is read
//!   back from the kernel once and cached for the process lifetime.
//! - sparc ([`sparc`]): stubs at fixed assembly labels, handed to the kernel
//!   as an extra `rt_sigaction` argument rather than through the record.
//! - arc ([`arc`]): a naked function issuing the trap, forced into the record.
//! - everything else: nothing is forced; the caller's restorer is forwarded.

use core::fmt;

use crate::arch::{Abi, SignalAbi};
use crate::error::Error;

#[cfg(target_arch = "x86_64")]
pub mod discovery;

#[cfg(any(target_arch = "sparc", target_arch = "sparc64"))]
pub mod sparc;

#[cfg(target_arch = "arc")]
pub mod arc;

/// How the restorer for the build target is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestorerStrategy {
    /// Read back from the kernel and cached (x86_64)
    SelfDiscovery,
    /// Assembly stub at a named label, passed as a syscall argument (sparc)
    FixedLabel,
    /// Naked function forced into the record (arc)
    InlineStub,
    /// The kernel needs nothing from this layer
    NotRequired,
}

impl fmt::Display for RestorerStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RestorerStrategy::SelfDiscovery => "self-discovery",
            RestorerStrategy::FixedLabel => "fixed-label",
            RestorerStrategy::InlineStub => "inline-stub",
            RestorerStrategy::NotRequired => "not-required",
        };
        f.write_str(name)
    }
}

/// An opaque block of code that re-enters the kernel via `rt_sigreturn`
///
/// Only the entry address matters to the kernel. The remaining fields
/// document the calling convention the code was written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trampoline {
    /// Entry address handed to the kernel
    pub entry: usize,
    /// Instruction that enters the kernel
    pub trap: &'static str,
    /// Register that holds the syscall number
    pub nr_register: &'static str,
    /// Syscall number loaded into `nr_register`
    pub nr: usize,
}

/// Restorer this layer forces into outgoing records, if any
///
/// On x86_64 the first call runs the discovery probe; a failure there is
/// returned to every installer until a later call succeeds.
pub fn resolve() -> Result<Option<usize>, Error> {
    Abi::forced_restorer()
}

/// Whether [`resolve`] can answer without touching the kernel
pub fn is_resolved() -> bool {
    Abi::restorer_resolved()
}
