//! Raw kernel signal ABI layer
//!
//! This crate calls `rt_sigaction` and `rt_sigprocmask` directly instead of
//! going through libc's `sigaction()` and `sigprocmask()`, so conformance
//! tests see exactly what the kernel does with their arguments: struct
//! layouts, `sigsetsize` checks, and pointer validation included.
//!
//! The pieces, leaf to root:
//!
//! - [`abi`]: the kernel's `struct sigaction` layouts
//! - [`restorer`]: where the signal-return trampoline comes from
//! - [`translate`]: caller record <-> kernel record
//! - [`syscall`]: the raw syscalls
//! - [`sentinel`]: the deliberately invalid pointer, forwarded untouched
//! - [`safe`]: fail-fast wrappers for calls that must succeed
//!
//! [`arch::Abi`] picks the layout, restorer strategy and syscall arity for the
//! build target.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ksigaction::{install_signal_action, Arg, Errno, SIGSET_SIZE};
//!
//! // The kernel, not this layer, rejects the bad pointer.
//! let ret = unsafe {
//!     install_signal_action(libc::SIGUSR1, Arg::Invalid, Arg::Null, SIGSET_SIZE)
//! };
//! assert_eq!(ret.unwrap_err().errno(), Some(Errno::EFAULT));
//! ```

#![cfg_attr(
    any(target_arch = "sparc", target_arch = "sparc64", target_arch = "arc"),
    feature(asm_experimental_arch)
)]

#[cfg(not(any(target_os = "linux", target_os = "android")))]
compile_error!("ksigaction drives Linux signal syscalls directly and only builds for Linux");

// Re-export all public APIs
pub use errno::Errno;
pub use error::Error;
pub use safe::{install_signal_action_or_abort, set_signal_mask_or_abort};
pub use sentinel::{Arg, INVALID_SA_PTR};
pub use signal::{install_signal_action, set_signal_mask};
pub use types::*;

pub mod abi;
pub mod arch;
pub mod errno;
pub mod error;
pub mod logger;
pub mod restorer;
pub mod safe;
pub mod sentinel;
pub mod signal;
pub mod syscall;
pub mod translate;
pub mod types;
