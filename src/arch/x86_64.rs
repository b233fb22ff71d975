//! x86_64 signal ABI
//!
//! The kernel will not deliver to a handler installed without `SA_RESTORER`
//! (there is no vDSO fallback for 64-bit frames), so every outgoing record
//! carries the restorer found by [`crate::restorer::discovery`].

use libc::c_ulong;

use crate::abi::DefaultKernelSigaction;
use crate::arch::SignalAbi;
use crate::error::Error;
use crate::restorer::{discovery, RestorerStrategy, Trampoline};
use crate::types::{SigAction, SA_RESTORER};

pub struct X86_64;

impl SignalAbi for X86_64 {
    type Action = DefaultKernelSigaction;

    const NAME: &'static str = "x86_64";
    const STRATEGY: RestorerStrategy = RestorerStrategy::SelfDiscovery;
    const SYSCALL_ARGS: usize = 4;
    const FORCED_FLAGS: c_ulong = SA_RESTORER;

    fn forced_restorer() -> Result<Option<usize>, Error> {
        discovery::resolve().map(Some)
    }

    fn restorer_resolved() -> bool {
        discovery::is_resolved()
    }

    fn trampoline(_act: Option<&SigAction>) -> Result<Option<Trampoline>, Error> {
        discovery::trampoline().map(Some)
    }
}
