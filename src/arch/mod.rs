//! Architecture selection for the kernel signal ABI.
//!
//! This module exports [`Abi`], the build target's [`SignalAbi`]
//! implementation. Code outside this module should go through the trait
//! rather than naming an architecture type.
//!
//! # Supported Architectures
//!
//! - `x86_64`: restorer discovered from libc and forced into every record
//! - `sparc`, `sparc64`: fixed-label stubs passed as a fifth syscall argument
//! - `arc`: naked-function stub forced into every record
//! - everything else: one of the [`generic`] layouts, nothing forced

pub mod generic;
pub mod traits;
pub use traits::*;

#[cfg(target_arch = "x86_64")]
pub mod x86_64;
#[cfg(target_arch = "x86_64")]
pub use self::x86_64::X86_64 as Abi;

#[cfg(any(target_arch = "sparc", target_arch = "sparc64"))]
pub mod sparc;
#[cfg(any(target_arch = "sparc", target_arch = "sparc64"))]
pub use self::sparc::Sparc as Abi;

#[cfg(target_arch = "arc")]
pub mod arc;
#[cfg(target_arch = "arc")]
pub use self::arc::Arc as Abi;

#[cfg(any(target_arch = "mips", target_arch = "mips64"))]
pub use self::generic::Mips as Abi;

#[cfg(any(
    target_arch = "riscv32",
    target_arch = "riscv64",
    target_arch = "loongarch64",
    target_arch = "hexagon"
))]
pub use self::generic::NoRestorer as Abi;

#[cfg(not(any(
    target_arch = "x86_64",
    target_arch = "sparc",
    target_arch = "sparc64",
    target_arch = "arc",
    target_arch = "mips",
    target_arch = "mips64",
    target_arch = "riscv32",
    target_arch = "riscv64",
    target_arch = "loongarch64",
    target_arch = "hexagon"
)))]
pub use self::generic::Generic as Abi;
