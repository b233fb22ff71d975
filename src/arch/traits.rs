//! The per-architecture signal ABI interface.
//!
//! Exactly one implementation is selected at build time (see
//! [`crate::arch::Abi`]). Everything that differs between architectures for
//! `rt_sigaction` sits behind this trait: the kernel record layout, where the
//! restorer comes from and how many arguments the syscall takes.

use libc::c_ulong;

use crate::abi::KernelAction;
use crate::error::Error;
use crate::restorer::{RestorerStrategy, Trampoline};
use crate::types::SigAction;

pub trait SignalAbi {
    /// Kernel `struct sigaction` layout.
    type Action: KernelAction;

    /// Architecture name as reported by diagnostics.
    const NAME: &'static str;

    /// How the signal-return trampoline is obtained.
    const STRATEGY: RestorerStrategy;

    /// Argument count of `rt_sigaction` (5 when a trampoline selector is passed).
    const SYSCALL_ARGS: usize;

    /// Flag bits OR-ed into every outgoing record.
    const FORCED_FLAGS: c_ulong;

    /// Restorer written into every outgoing record, overriding the caller's.
    ///
    /// `None` means the caller's restorer (if the layout has the field) is
    /// forwarded untouched.
    fn forced_restorer() -> Result<Option<usize>, Error>;

    /// Trampoline selector passed as the extra syscall argument.
    #[inline]
    fn stub_argument(_act: Option<&SigAction>) -> Option<usize> {
        None
    }

    /// Whether the restorer is known without asking the kernel.
    #[inline]
    fn restorer_resolved() -> bool {
        true
    }

    /// The trampoline this ABI would use for `act`, if any.
    fn trampoline(act: Option<&SigAction>) -> Result<Option<Trampoline>, Error>;
}
