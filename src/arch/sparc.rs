//! sparc / sparc64 signal ABI
//!
//! The record keeps its `sa_restorer` slot, but the kernel takes the
//! trampoline from the extra `rt_sigaction` argument, so nothing is forced
//! into the record itself.

use libc::c_ulong;

use crate::abi::DefaultKernelSigaction;
use crate::arch::SignalAbi;
use crate::error::Error;
use crate::restorer::{sparc, RestorerStrategy, Trampoline};
use crate::types::SigAction;

pub struct Sparc;

impl SignalAbi for Sparc {
    type Action = DefaultKernelSigaction;

    #[cfg(target_arch = "sparc64")]
    const NAME: &'static str = "sparc64";
    #[cfg(target_arch = "sparc")]
    const NAME: &'static str = "sparc";
    const STRATEGY: RestorerStrategy = RestorerStrategy::FixedLabel;
    const SYSCALL_ARGS: usize = 5;
    const FORCED_FLAGS: c_ulong = 0;

    fn forced_restorer() -> Result<Option<usize>, Error> {
        Ok(None)
    }

    fn stub_argument(act: Option<&SigAction>) -> Option<usize> {
        Some(sparc::stub_argument(act))
    }

    fn trampoline(act: Option<&SigAction>) -> Result<Option<Trampoline>, Error> {
        Ok(Some(sparc::trampoline_for(act)))
    }
}
