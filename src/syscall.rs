//! Raw syscall primitives
//!
//! Signal syscalls are issued here without going through libc's `sigaction`
//! or `sigprocmask`, so nothing rewrites their arguments or results.
//!
//! - x86_64: `syscall`, number in RAX, arguments in RDI, RSI, RDX, R10, R8
//! - aarch64: `svc #0`, number in X8, arguments in X0..X4
//! - everything else: `libc::syscall`, whose `-1`/`errno` result is folded
//!   back into the kernel's negative-errno convention
//!
//! All functions return the kernel value untouched: zero or positive on
//! success, `-errno` on failure.

use libc::c_int;

/// Syscall numbers for the build target
pub mod nr {
    pub const RT_SIGACTION: usize = libc::SYS_rt_sigaction as usize;
    pub const RT_SIGPROCMASK: usize = libc::SYS_rt_sigprocmask as usize;
}

/// Raw syscall functions - use the typed wrappers below when possible
pub mod raw {
    #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
    use core::arch::asm;

    #[cfg(target_arch = "x86_64")]
    #[inline(always)]
    pub unsafe fn syscall4(num: usize, arg1: usize, arg2: usize, arg3: usize, arg4: usize) -> i64 {
        let ret: i64;
        asm!(
            "syscall",
            inlateout("rax") num as i64 => ret,
            in("rdi") arg1,
            in("rsi") arg2,
            in("rdx") arg3,
            in("r10") arg4,
            lateout("rcx") _,
            lateout("r11") _,
            options(nostack, preserves_flags),
        );
        ret
    }

    #[cfg(target_arch = "x86_64")]
    #[inline(always)]
    pub unsafe fn syscall5(
        num: usize,
        arg1: usize,
        arg2: usize,
        arg3: usize,
        arg4: usize,
        arg5: usize,
    ) -> i64 {
        let ret: i64;
        asm!(
            "syscall",
            inlateout("rax") num as i64 => ret,
            in("rdi") arg1,
            in("rsi") arg2,
            in("rdx") arg3,
            in("r10") arg4,
            in("r8") arg5,
            lateout("rcx") _,
            lateout("r11") _,
            options(nostack, preserves_flags),
        );
        ret
    }

    #[cfg(target_arch = "aarch64")]
    #[inline(always)]
    pub unsafe fn syscall4(num: usize, arg1: usize, arg2: usize, arg3: usize, arg4: usize) -> i64 {
        let ret: i64;
        asm!(
            "svc #0",
            in("x8") num,
            inlateout("x0") arg1 as i64 => ret,
            in("x1") arg2,
            in("x2") arg3,
            in("x3") arg4,
            options(nostack),
        );
        ret
    }

    #[cfg(target_arch = "aarch64")]
    #[inline(always)]
    pub unsafe fn syscall5(
        num: usize,
        arg1: usize,
        arg2: usize,
        arg3: usize,
        arg4: usize,
        arg5: usize,
    ) -> i64 {
        let ret: i64;
        asm!(
            "svc #0",
            in("x8") num,
            inlateout("x0") arg1 as i64 => ret,
            in("x1") arg2,
            in("x2") arg3,
            in("x3") arg4,
            in("x4") arg5,
            options(nostack),
        );
        ret
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    #[inline]
    pub unsafe fn syscall4(num: usize, arg1: usize, arg2: usize, arg3: usize, arg4: usize) -> i64 {
        let ret = libc::syscall(num as libc::c_long, arg1, arg2, arg3, arg4);
        from_libc(ret as i64)
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    #[inline]
    pub unsafe fn syscall5(
        num: usize,
        arg1: usize,
        arg2: usize,
        arg3: usize,
        arg4: usize,
        arg5: usize,
    ) -> i64 {
        let ret = libc::syscall(num as libc::c_long, arg1, arg2, arg3, arg4, arg5);
        from_libc(ret as i64)
    }

    /// `libc::syscall` reports failure as -1 with errno set
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    fn from_libc(ret: i64) -> i64 {
        if ret == -1 {
            -(crate::errno::Errno::last().raw() as i64)
        } else {
            ret
        }
    }
}

/// `rt_sigaction(sig, act, oact, [stub,] sigsetsize)`
///
/// With `Some(stub)` the trampoline selector goes between `oact` and
/// `sigsetsize`, as sparc expects; with `None` the call takes four arguments.
///
/// # Safety
/// `act` and `oact` must each be null, [`crate::INVALID_SA_PTR`], or point to
/// a kernel `sigaction` record of the layout the running kernel expects.
pub unsafe fn rt_sigaction<K>(
    sig: c_int,
    act: *const K,
    oact: *mut K,
    sigsetsize: usize,
    stub: Option<usize>,
) -> i64 {
    match stub {
        Some(stub) => raw::syscall5(
            nr::RT_SIGACTION,
            sig as usize,
            act as usize,
            oact as usize,
            stub,
            sigsetsize,
        ),
        None => raw::syscall4(
            nr::RT_SIGACTION,
            sig as usize,
            act as usize,
            oact as usize,
            sigsetsize,
        ),
    }
}

/// `rt_sigprocmask(how, set, oset, sigsetsize)`
///
/// # Safety
/// `set` and `oset` must each be null, [`crate::INVALID_SA_PTR`], or valid
/// for `sigsetsize` bytes.
pub unsafe fn rt_sigprocmask<S>(how: c_int, set: *const S, oset: *mut S, sigsetsize: usize) -> i64 {
    raw::syscall4(
        nr::RT_SIGPROCMASK,
        how as usize,
        set as usize,
        oset as usize,
        sigsetsize,
    )
}
