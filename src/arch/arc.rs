//! arc signal ABI
//!
//! Every outgoing record gets `SA_RESTORER` and the address of the naked
//! stub in [`crate::restorer::arc`].

use libc::c_ulong;

use crate::abi::DefaultKernelSigaction;
use crate::arch::SignalAbi;
use crate::error::Error;
use crate::restorer::{arc, RestorerStrategy, Trampoline};
use crate::types::{SigAction, SA_RESTORER};

pub struct Arc;

impl SignalAbi for Arc {
    type Action = DefaultKernelSigaction;

    const NAME: &'static str = "arc";
    const STRATEGY: RestorerStrategy = RestorerStrategy::InlineStub;
    const SYSCALL_ARGS: usize = 4;
    const FORCED_FLAGS: c_ulong = SA_RESTORER;

    fn forced_restorer() -> Result<Option<usize>, Error> {
        Ok(Some(arc::trampoline().entry))
    }

    fn trampoline(_act: Option<&SigAction>) -> Result<Option<Trampoline>, Error> {
        Ok(Some(arc::trampoline()))
    }
}
