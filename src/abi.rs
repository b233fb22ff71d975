//! Kernel-visible `struct sigaction` layouts
//!
//! The record `rt_sigaction` reads and writes is not libc's `struct
//! sigaction`. Its field order, the presence of `sa_restorer` and the width of
//! `sa_flags` depend on the architecture:
//!
//! | Layout                        | Order                    | Targets                |
//! |-------------------------------|--------------------------|------------------------|
//! | [`DefaultKernelSigaction`]    | handler, flags, restorer, mask | x86, arm, sparc, arc |
//! | [`NoRestorerKernelSigaction`] | handler, flags, mask     | riscv, loongarch, hexagon |
//! | [`MipsKernelSigaction`]       | flags (32-bit), handler, mask | mips, mips64      |
//!
//! Which one is in use is decided by [`crate::arch::Abi`].

use core::mem::{offset_of, size_of};
use libc::{c_uint, c_ulong};

use crate::types::{SigSet, SIGSET_SIZE};

/// Accessors shared by every kernel `sigaction` layout
pub trait KernelAction: Copy + Default + core::fmt::Debug {
    /// Whether the layout carries an `sa_restorer` field
    const HAS_RESTORER: bool;

    /// Assemble a record; `restorer` is dropped on layouts without the field
    fn build(handler: usize, flags: c_ulong, mask: SigSet, restorer: usize) -> Self;

    fn handler(&self) -> usize;

    fn flags(&self) -> c_ulong;

    fn mask(&self) -> SigSet;

    /// `None` on layouts without a restorer field
    fn restorer(&self) -> Option<usize>;
}

/// Generic kernel `struct sigaction` with `__ARCH_HAS_SA_RESTORER`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultKernelSigaction {
    pub handler: usize,
    pub flags: c_ulong,
    pub restorer: usize,
    pub mask: SigSet,
}

impl KernelAction for DefaultKernelSigaction {
    const HAS_RESTORER: bool = true;

    fn build(handler: usize, flags: c_ulong, mask: SigSet, restorer: usize) -> Self {
        DefaultKernelSigaction {
            handler,
            flags,
            restorer,
            mask,
        }
    }

    fn handler(&self) -> usize {
        self.handler
    }

    fn flags(&self) -> c_ulong {
        self.flags
    }

    fn mask(&self) -> SigSet {
        self.mask
    }

    fn restorer(&self) -> Option<usize> {
        Some(self.restorer)
    }
}

/// Generic kernel `struct sigaction` without `__ARCH_HAS_SA_RESTORER`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRestorerKernelSigaction {
    pub handler: usize,
    pub flags: c_ulong,
    pub mask: SigSet,
}

impl KernelAction for NoRestorerKernelSigaction {
    const HAS_RESTORER: bool = false;

    fn build(handler: usize, flags: c_ulong, mask: SigSet, _restorer: usize) -> Self {
        NoRestorerKernelSigaction {
            handler,
            flags,
            mask,
        }
    }

    fn handler(&self) -> usize {
        self.handler
    }

    fn flags(&self) -> c_ulong {
        self.flags
    }

    fn mask(&self) -> SigSet {
        self.mask
    }

    fn restorer(&self) -> Option<usize> {
        None
    }
}

/// mips kernel `struct sigaction`: 32-bit flags ahead of the handler
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct MipsKernelSigaction {
    pub flags: c_uint,
    pub handler: usize,
    pub mask: SigSet,
}

impl KernelAction for MipsKernelSigaction {
    const HAS_RESTORER: bool = false;

    fn build(handler: usize, flags: c_ulong, mask: SigSet, _restorer: usize) -> Self {
        MipsKernelSigaction {
            // the kernel field is an unsigned int, upper bits never reach it
            flags: flags as c_uint,
            handler,
            mask,
        }
    }

    fn handler(&self) -> usize {
        self.handler
    }

    fn flags(&self) -> c_ulong {
        self.flags as c_ulong
    }

    fn mask(&self) -> SigSet {
        self.mask
    }

    fn restorer(&self) -> Option<usize> {
        None
    }
}

const WORD: usize = size_of::<usize>();

const _: () = {
    assert!(size_of::<c_ulong>() == WORD);

    assert!(offset_of!(DefaultKernelSigaction, handler) == 0);
    assert!(offset_of!(DefaultKernelSigaction, flags) == WORD);
    assert!(offset_of!(DefaultKernelSigaction, restorer) == 2 * WORD);
    assert!(offset_of!(DefaultKernelSigaction, mask) == 3 * WORD);
    assert!(size_of::<DefaultKernelSigaction>() == 3 * WORD + SIGSET_SIZE);

    assert!(offset_of!(NoRestorerKernelSigaction, mask) == 2 * WORD);
    assert!(size_of::<NoRestorerKernelSigaction>() == 2 * WORD + SIGSET_SIZE);

    assert!(offset_of!(MipsKernelSigaction, flags) == 0);
    assert!(offset_of!(MipsKernelSigaction, handler) == WORD);
    assert!(offset_of!(MipsKernelSigaction, mask) == 2 * WORD);
};
