//! Pointer arguments with a deliberately invalid value
//!
//! Error-path tests need the kernel, not this layer, to reject a bad pointer.
//! [`Arg::Invalid`] stands for `(void *)-1`: it is forwarded to the syscall as
//! that address and is never read, written or copied through.

use core::fmt;

/// The reserved invalid address, `(void *)-1`
pub const INVALID_SA_PTR: usize = usize::MAX;

/// A pointer argument: null, the invalid sentinel, or a real reference
#[derive(Debug)]
pub enum Arg<R> {
    Null,
    Invalid,
    Ref(R),
}

impl<R> Arg<R> {
    pub fn is_null(&self) -> bool {
        matches!(self, Arg::Null)
    }
}

impl<T> Arg<&T> {
    /// Address as it would be seen by the kernel
    pub fn addr(&self) -> usize {
        match self {
            Arg::Null => 0,
            Arg::Invalid => INVALID_SA_PTR,
            Arg::Ref(r) => *r as *const T as usize,
        }
    }

    /// Raw pointer for the syscall, without touching the pointee
    pub fn as_ptr(&self) -> *const T {
        self.addr() as *const T
    }
}

impl<T> Arg<&mut T> {
    /// Address as it would be seen by the kernel
    pub fn addr(&self) -> usize {
        match self {
            Arg::Null => 0,
            Arg::Invalid => INVALID_SA_PTR,
            Arg::Ref(r) => &**r as *const T as usize,
        }
    }

    /// Raw pointer for the syscall, without touching the pointee
    pub fn as_mut_ptr(&mut self) -> *mut T {
        match self {
            Arg::Null => core::ptr::null_mut(),
            Arg::Invalid => INVALID_SA_PTR as *mut T,
            Arg::Ref(r) => &mut **r as *mut T,
        }
    }
}

impl<T> From<Option<T>> for Arg<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(r) => Arg::Ref(r),
            None => Arg::Null,
        }
    }
}

/// Formats an address the way the diagnostics print pointer arguments
pub(crate) struct Addr(pub usize);

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => write!(f, "(nil)"),
            addr => write!(f, "{:#x}", addr),
        }
    }
}

/// Kernel-side counterpart of an [`Arg`], chosen before any translation
///
/// The translator only builds a kernel record for `Buffer`; the sentinel and
/// null cases carry their address straight to the syscall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Passthrough {
    Null,
    Invalid,
    Buffer,
}

impl Passthrough {
    pub(crate) fn of<R>(arg: &Arg<R>) -> Self {
        match arg {
            Arg::Null => Passthrough::Null,
            Arg::Invalid => Passthrough::Invalid,
            Arg::Ref(_) => Passthrough::Buffer,
        }
    }

    /// The pointer to pass for this argument, given the translated buffer
    pub(crate) fn pointer<K>(self, buffer: *mut K) -> *mut K {
        match self {
            Passthrough::Null => core::ptr::null_mut(),
            Passthrough::Invalid => INVALID_SA_PTR as *mut K,
            Passthrough::Buffer => buffer,
        }
    }
}
