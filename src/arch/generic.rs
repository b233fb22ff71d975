//! Signal ABIs that need nothing from this layer
//!
//! These kernels either fall back to a vDSO trampoline or honor a
//! caller-supplied restorer, so records are forwarded as the caller built
//! them. They differ only in record layout.

use libc::c_ulong;

use crate::abi::{DefaultKernelSigaction, MipsKernelSigaction, NoRestorerKernelSigaction};
use crate::arch::SignalAbi;
use crate::error::Error;
use crate::restorer::{RestorerStrategy, Trampoline};
use crate::types::SigAction;

/// Layout with `sa_restorer` (arm, aarch64, x86, powerpc, s390x, ...)
pub struct Generic;

/// Layout without `sa_restorer` (riscv, loongarch, hexagon)
pub struct NoRestorer;

/// mips: 32-bit flags first, no `sa_restorer`
pub struct Mips;

macro_rules! passthrough_abi {
    ($abi:ty, $action:ty, $name:expr) => {
        impl SignalAbi for $abi {
            type Action = $action;

            const NAME: &'static str = $name;
            const STRATEGY: RestorerStrategy = RestorerStrategy::NotRequired;
            const SYSCALL_ARGS: usize = 4;
            const FORCED_FLAGS: c_ulong = 0;

            fn forced_restorer() -> Result<Option<usize>, Error> {
                Ok(None)
            }

            fn trampoline(_act: Option<&SigAction>) -> Result<Option<Trampoline>, Error> {
                Ok(None)
            }
        }
    };
}

passthrough_abi!(Generic, DefaultKernelSigaction, "generic");
passthrough_abi!(NoRestorer, NoRestorerKernelSigaction, "generic-no-restorer");
passthrough_abi!(Mips, MipsKernelSigaction, "mips");
