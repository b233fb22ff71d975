//! Caller record <-> kernel record translation
//!
//! Forward translation copies handler, flags and mask verbatim. When the ABI
//! forces a restorer, `FORCED_FLAGS` is OR-ed in and the forced address
//! replaces whatever the caller put in `restorer`. Otherwise the caller's
//! restorer is forwarded (and silently dropped by layouts without the field).
//!
//! Reverse translation copies handler, flags and mask back, and the restorer
//! only when the layout has one. Signal numbers are never checked here.

use log::trace;

use crate::abi::KernelAction;
use crate::arch::SignalAbi;
use crate::error::Error;
use crate::types::SigAction;

/// Build the kernel record for a new action
///
/// Fails only when the ABI's restorer cannot be resolved.
pub fn to_kernel<A: SignalAbi>(act: &SigAction) -> Result<A::Action, Error> {
    let kact = match A::forced_restorer()? {
        Some(restorer) => A::Action::build(
            act.handler,
            act.flags | A::FORCED_FLAGS,
            act.mask,
            restorer,
        ),
        None => A::Action::build(act.handler, act.flags, act.mask, act.restorer),
    };
    trace!("{}: {:?} -> {:?}", A::NAME, act, kact);
    Ok(kact)
}

/// Copy a kernel record reported as the old action back to the caller
pub fn from_kernel<K: KernelAction>(kact: &K, out: &mut SigAction) {
    out.handler = kact.handler();
    out.flags = kact.flags();
    out.mask = kact.mask();
    if let Some(restorer) = kact.restorer() {
        out.restorer = restorer;
    }
}
