//! Inline-stub restorer for arc
//!
//! Contract: syscall number in `r8`, kernel entry through `trap_s 0`. The
//! stub is a naked function so the compiler can neither inline it nor add a
//! prologue that would disturb the signal frame.

use crate::restorer::Trampoline;

/// `__NR_rt_sigreturn` on arc (asm-generic numbering)
const RT_SIGRETURN: usize = 139;

#[unsafe(naked)]
#[no_mangle]
pub extern "C" fn __ksigaction_restore_rt() -> ! {
    core::arch::naked_asm!(
        "mov r8, {nr}",
        "trap_s 0",
        nr = const RT_SIGRETURN,
    )
}

pub fn trampoline() -> Trampoline {
    Trampoline {
        entry: __ksigaction_restore_rt as *const () as usize,
        trap: "trap_s 0",
        nr_register: "r8",
        nr: RT_SIGRETURN,
    }
}
