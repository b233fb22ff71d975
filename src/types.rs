//! Caller-facing signal types and constants
//!
//! [`SigAction`] is the record a test fills in. It is never handed to the
//! kernel directly; see [`crate::abi`] for the layouts the kernel reads.

use core::fmt;
use libc::{c_int, c_ulong, c_void, siginfo_t};

use crate::errno::Errno;
use crate::error::Error;

// Signal handler special values
/// Default action for the signal
pub const SIG_DFL: usize = 0;
/// Ignore the signal
pub const SIG_IGN: usize = 1;

// rt_sigprocmask "how" values
pub const SIG_BLOCK: c_int = libc::SIG_BLOCK;
pub const SIG_UNBLOCK: c_int = libc::SIG_UNBLOCK;
pub const SIG_SETMASK: c_int = libc::SIG_SETMASK;

// sigaction flags
pub const SA_NOCLDSTOP: c_ulong = libc::SA_NOCLDSTOP as c_ulong;
pub const SA_NOCLDWAIT: c_ulong = libc::SA_NOCLDWAIT as c_ulong;
pub const SA_SIGINFO: c_ulong = libc::SA_SIGINFO as c_ulong;
pub const SA_ONSTACK: c_ulong = libc::SA_ONSTACK as c_ulong;
pub const SA_RESTART: c_ulong = libc::SA_RESTART as c_ulong;
pub const SA_NODEFER: c_ulong = libc::SA_NODEFER as c_ulong;
pub const SA_RESETHAND: c_ulong = libc::SA_RESETHAND as c_ulong;
/// Restorer field is valid (not exported by libc on every target)
pub const SA_RESTORER: c_ulong = 0x0400_0000;

/// Highest signal number the kernel's `sigset_t` covers (`_NSIG`)
#[cfg(any(target_arch = "mips", target_arch = "mips64"))]
pub const NSIG: usize = 128;
#[cfg(not(any(target_arch = "mips", target_arch = "mips64")))]
pub const NSIG: usize = 64;

const BITS_PER_WORD: usize = c_ulong::BITS as usize;

/// Number of words in the kernel `sigset_t`
pub const SIGSET_WORDS: usize = NSIG / BITS_PER_WORD;

/// Byte width of the kernel `sigset_t`: the only `sigsetsize` the kernel accepts
pub const SIGSET_SIZE: usize = core::mem::size_of::<SigSet>();

/// Kernel-width signal set
///
/// Layout matches the kernel's `sigset_t`, so a `SigSet` can be passed to
/// `rt_sigprocmask` as is and copied into a kernel `sigaction` verbatim.
#[repr(C)]
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct SigSet {
    words: [c_ulong; SIGSET_WORDS],
}

impl SigSet {
    pub const fn empty() -> Self {
        SigSet {
            words: [0; SIGSET_WORDS],
        }
    }

    pub const fn full() -> Self {
        SigSet {
            words: [c_ulong::MAX; SIGSET_WORDS],
        }
    }

    /// Build a set from signal numbers, as `sigemptyset` + `sigaddset`
    pub fn from_signals(signals: &[c_int]) -> Result<Self, Error> {
        let mut set = SigSet::empty();
        for &sig in signals {
            set.add(sig)?;
        }
        Ok(set)
    }

    pub fn add(&mut self, sig: c_int) -> Result<(), Error> {
        let (word, bit) = Self::slot(sig)?;
        self.words[word] |= 1 << bit;
        Ok(())
    }

    pub fn remove(&mut self, sig: c_int) -> Result<(), Error> {
        let (word, bit) = Self::slot(sig)?;
        self.words[word] &= !(1 << bit);
        Ok(())
    }

    /// Returns false for signal numbers outside `1..=NSIG`
    pub fn contains(&self, sig: c_int) -> bool {
        match Self::slot(sig) {
            Ok((word, bit)) => self.words[word] & (1 << bit) != 0,
            Err(_) => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    pub fn words(&self) -> &[c_ulong; SIGSET_WORDS] {
        &self.words
    }

    /// Signal `sig` lives at bit `sig - 1`
    fn slot(sig: c_int) -> Result<(usize, usize), Error> {
        if sig < 1 || sig as usize > NSIG {
            return Err(Error::Os(Errno::EINVAL));
        }
        let bit = (sig - 1) as usize;
        Ok((bit / BITS_PER_WORD, bit % BITS_PER_WORD))
    }
}

impl fmt::Debug for SigSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigSet(")?;
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                write!(f, ":")?;
            }
            write!(f, "{:#x}", word)?;
        }
        write!(f, ")")
    }
}

/// Signal action as the caller describes it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigAction {
    /// Handler function pointer, SIG_DFL, or SIG_IGN
    pub handler: usize,
    /// Raw `SA_*` bits, passed through unchecked
    pub flags: c_ulong,
    /// Signals to block during handler execution
    pub mask: SigSet,
    /// Caller-supplied restorer, 0 when unset
    ///
    /// Replaced by the layer's own trampoline on architectures that require
    /// one, and ignored on layouts without a restorer field.
    pub restorer: usize,
}

impl Default for SigAction {
    fn default() -> Self {
        SigAction {
            handler: SIG_DFL,
            flags: 0,
            mask: SigSet::empty(),
            restorer: 0,
        }
    }
}

impl SigAction {
    /// Create a new signal action with a handler function
    pub fn new(handler: extern "C" fn(c_int)) -> Self {
        SigAction {
            handler: handler as *const () as usize,
            ..SigAction::default()
        }
    }

    /// Create a signal action with a three-argument handler and `SA_SIGINFO`
    pub fn with_siginfo(handler: extern "C" fn(c_int, *mut siginfo_t, *mut c_void)) -> Self {
        SigAction {
            handler: handler as *const () as usize,
            flags: SA_SIGINFO,
            ..SigAction::default()
        }
    }

    /// Create a signal action that ignores the signal
    pub fn ignore() -> Self {
        SigAction {
            handler: SIG_IGN,
            ..SigAction::default()
        }
    }

    /// Create a signal action with default behavior
    pub fn default_action() -> Self {
        SigAction::default()
    }

    /// OR `flags` into the bits already set, so chained calls accumulate
    pub fn flags(mut self, flags: c_ulong) -> Self {
        self.flags |= flags;
        self
    }

    pub fn mask(mut self, mask: SigSet) -> Self {
        self.mask = mask;
        self
    }

    pub fn restorer(mut self, restorer: usize) -> Self {
        self.restorer = restorer;
        self
    }
}
