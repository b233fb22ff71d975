//! rt_sigaction against the running kernel
//!
//! Dispositions are process-wide and the harness runs tests on parallel
//! threads, so every test that touches one holds `SERIAL`.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Mutex, MutexGuard};

use ksigaction::arch::{Abi, SignalAbi};
use ksigaction::{
    install_signal_action, install_signal_action_or_abort, Arg, Errno, SigAction, SigSet,
    NSIG, SA_NODEFER, SA_RESTART, SA_SIGINFO, SIGSET_SIZE, SIG_DFL, SIG_IGN,
};
use libc::{c_int, c_void, siginfo_t};

static SERIAL: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

static DELIVERED: AtomicI32 = AtomicI32::new(0);

extern "C" fn record(sig: c_int) {
    DELIVERED.store(sig, Ordering::SeqCst);
}

extern "C" fn record_info(sig: c_int, _info: *mut siginfo_t, _ctx: *mut c_void) {
    DELIVERED.store(sig, Ordering::SeqCst);
}

fn restore_default(sig: c_int) {
    let dfl = SigAction::default_action();
    unsafe { install_signal_action_or_abort(sig, Arg::Ref(&dfl), Arg::Null, SIGSET_SIZE) };
}

/// Install `act` on `sig`, aborting the test binary on failure
fn install(sig: c_int, act: &SigAction) {
    unsafe { install_signal_action_or_abort(sig, Arg::Ref(act), Arg::Null, SIGSET_SIZE) };
}

/// Current disposition of `sig`, left unchanged
fn query(sig: c_int) -> SigAction {
    let mut cur = SigAction::default();
    unsafe { install_signal_action_or_abort(sig, Arg::Null, Arg::Ref(&mut cur), SIGSET_SIZE) };
    cur
}

/// Reset `sig` to `SIG_DFL` and return what was installed
fn take(sig: c_int) -> SigAction {
    let dfl = SigAction::default_action();
    let mut old = SigAction::default();
    let ret =
        unsafe { install_signal_action(sig, Arg::Ref(&dfl), Arg::Ref(&mut old), SIGSET_SIZE) };
    assert_eq!(ret, Ok(0), "signal {}", sig);
    old
}

fn errno_of(result: Result<u64, ksigaction::Error>) -> Option<Errno> {
    result.err().and_then(|e| e.errno())
}

/// Signals a handler may be installed on without disturbing the harness
fn catchable() -> Vec<c_int> {
    vec![
        libc::SIGUSR1,
        libc::SIGUSR2,
        libc::SIGALRM,
        libc::SIGCHLD,
        libc::SIGWINCH,
        libc::SIGRTMIN() + 4,
        libc::SIGRTMAX(),
    ]
}

#[test]
fn test_installed_handler_runs() {
    let _guard = serial();
    println!("Testing handler delivery through raw rt_sigaction...");

    let act = SigAction::new(record);
    let ret =
        unsafe { install_signal_action(libc::SIGUSR1, Arg::Ref(&act), Arg::Null, SIGSET_SIZE) };
    assert_eq!(ret, Ok(0));

    DELIVERED.store(0, Ordering::SeqCst);
    assert_eq!(unsafe { libc::raise(libc::SIGUSR1) }, 0);
    assert_eq!(DELIVERED.load(Ordering::SeqCst), libc::SIGUSR1, "handler did not run");

    restore_default(libc::SIGUSR1);
    println!("✅ Handler delivery test passed");
}

#[test]
fn test_siginfo_handler_runs() {
    let _guard = serial();

    let act = SigAction::with_siginfo(record_info);
    let ret =
        unsafe { install_signal_action(libc::SIGUSR2, Arg::Ref(&act), Arg::Null, SIGSET_SIZE) };
    assert_eq!(ret, Ok(0));

    DELIVERED.store(0, Ordering::SeqCst);
    assert_eq!(unsafe { libc::raise(libc::SIGUSR2) }, 0);
    assert_eq!(DELIVERED.load(Ordering::SeqCst), libc::SIGUSR2);

    restore_default(libc::SIGUSR2);
}

#[test]
fn test_old_action_round_trip() {
    let _guard = serial();
    println!("Testing install / read-back round trip...");

    let mask = SigSet::from_signals(&[libc::SIGALRM, libc::SIGTERM]).unwrap();
    let cases = [
        SigAction::new(record).flags(SA_RESTART).mask(mask),
        SigAction::new(record).flags(SA_NODEFER),
        SigAction::with_siginfo(record_info).flags(SA_RESTART).mask(mask),
        SigAction::ignore().mask(mask),
    ];

    for sig in catchable() {
        for act in &cases {
            install(sig, act);
            let old = take(sig);

            assert_eq!(old.handler, act.handler, "signal {}", sig);
            assert_eq!(old.flags, act.flags | Abi::FORCED_FLAGS, "signal {}", sig);
            assert_eq!(old.mask, act.mask, "signal {}", sig);
        }
    }
    println!("✅ Round trip test passed");
}

#[test]
fn test_query_leaves_disposition_alone() {
    let _guard = serial();

    let act = SigAction::ignore();
    install(libc::SIGWINCH, &act);

    for _ in 0..2 {
        let mut cur = SigAction::default();
        let ret = unsafe {
            install_signal_action(libc::SIGWINCH, Arg::Null, Arg::Ref(&mut cur), SIGSET_SIZE)
        };
        assert_eq!(ret, Ok(0));
        assert_eq!(cur.handler, SIG_IGN);
    }

    restore_default(libc::SIGWINCH);
}

#[test]
fn test_invalid_new_action_faults() {
    let _guard = serial();
    println!("Testing sentinel as new action...");

    for sig in catchable() {
        let ret = unsafe { install_signal_action(sig, Arg::Invalid, Arg::Null, SIGSET_SIZE) };
        assert_eq!(errno_of(ret), Some(Errno::EFAULT), "signal {}", sig);
    }
    println!("✅ Sentinel new action test passed");
}

#[test]
fn test_invalid_new_action_leaves_old_buffer_untouched() {
    let _guard = serial();

    let marker = SigAction {
        handler: 0x1111,
        flags: 0x2222,
        mask: SigSet::full(),
        restorer: 0x3333,
    };
    let mut old = marker;
    let ret = unsafe {
        install_signal_action(libc::SIGUSR1, Arg::Invalid, Arg::Ref(&mut old), SIGSET_SIZE)
    };
    assert_eq!(errno_of(ret), Some(Errno::EFAULT));
    assert_eq!(old, marker, "old action written on a failed call");
}

#[test]
fn test_invalid_old_action_faults() {
    let _guard = serial();

    let act = SigAction::new(record).flags(SA_RESTART);
    let before = act;
    let ret = unsafe {
        install_signal_action(libc::SIGALRM, Arg::Ref(&act), Arg::Invalid, SIGSET_SIZE)
    };
    assert_eq!(errno_of(ret), Some(Errno::EFAULT));
    assert_eq!(act, before);

    // The kernel installs before it copies the old action out
    restore_default(libc::SIGALRM);
}

#[test]
fn test_wrong_sigsetsize_is_einval() {
    let _guard = serial();
    println!("Testing sigsetsize mismatch...");

    let sizes = [
        0,
        1,
        SIGSET_SIZE - 1,
        SIGSET_SIZE + 1,
        2 * SIGSET_SIZE,
        128,
        usize::MAX,
    ];
    let actions = [
        SigAction::new(record),
        SigAction::new(record).flags(SA_RESTART | SA_NODEFER),
        SigAction::with_siginfo(record_info),
        SigAction::ignore(),
    ];

    for sig in catchable() {
        for &size in &sizes {
            for act in &actions {
                let mut old = SigAction::default();
                let ret =
                    unsafe { install_signal_action(sig, Arg::Ref(act), Arg::Ref(&mut old), size) };
                assert_eq!(errno_of(ret), Some(Errno::EINVAL), "signal {} size {}", sig, size);
            }
            let ret = unsafe { install_signal_action(sig, Arg::Null, Arg::Null, size) };
            assert_eq!(errno_of(ret), Some(Errno::EINVAL), "signal {} size {}", sig, size);
        }
    }
    println!("✅ sigsetsize mismatch test passed");
}

#[test]
fn test_bad_signal_numbers_are_einval() {
    let _guard = serial();

    let act = SigAction::new(record);
    for sig in [0, -1, NSIG as c_int + 1, c_int::MAX] {
        let ret = unsafe { install_signal_action(sig, Arg::Ref(&act), Arg::Null, SIGSET_SIZE) };
        assert_eq!(errno_of(ret), Some(Errno::EINVAL), "signal {}", sig);
    }

    for sig in [libc::SIGKILL, libc::SIGSTOP] {
        let ret = unsafe { install_signal_action(sig, Arg::Ref(&act), Arg::Null, SIGSET_SIZE) };
        assert_eq!(errno_of(ret), Some(Errno::EINVAL), "signal {}", sig);

        // Querying them is fine
        let mut cur = SigAction::default();
        let ret =
            unsafe { install_signal_action(sig, Arg::Null, Arg::Ref(&mut cur), SIGSET_SIZE) };
        assert_eq!(ret, Ok(0));
        assert_eq!(cur.handler, SIG_DFL);
    }
}

#[test]
fn test_mask_never_holds_unblockable_signals() {
    let _guard = serial();

    let act = SigAction::new(record).mask(SigSet::full());
    install(libc::SIGUSR2, &act);

    let cur = query(libc::SIGUSR2);
    assert!(!cur.mask.contains(libc::SIGKILL));
    assert!(!cur.mask.contains(libc::SIGSTOP));
    assert!(cur.mask.contains(libc::SIGUSR1));

    restore_default(libc::SIGUSR2);
}

#[test]
fn test_flags_include_siginfo_bit() {
    let _guard = serial();

    let act = SigAction::with_siginfo(record_info);
    install(libc::SIGUSR1, &act);
    let cur = query(libc::SIGUSR1);
    assert_ne!(cur.flags & SA_SIGINFO, 0);

    restore_default(libc::SIGUSR1);
}

#[cfg(target_arch = "x86_64")]
mod restorer {
    use super::*;
    use ksigaction::restorer::{self, discovery};
    use ksigaction::SA_RESTORER;

    #[test]
    fn test_restorer_reported_back() {
        let _guard = serial();
        println!("Testing restorer read-back...");

        // A caller-supplied restorer is overridden
        let act = SigAction::new(record).restorer(0xbad0_0000);
        install(libc::SIGUSR1, &act);
        let old = take(libc::SIGUSR1);

        let resolved = restorer::resolve().unwrap().unwrap();
        assert_eq!(old.restorer, resolved);
        assert_ne!(old.restorer, act.restorer);
        assert_ne!(old.flags & SA_RESTORER, 0);
        println!("✅ Restorer read-back test passed");
    }

    #[test]
    fn test_restorer_resolution_is_idempotent() {
        let _guard = serial();
        let first = discovery::resolve().unwrap();
        let from_threads: Vec<usize> = (0..8)
            .map(|_| std::thread::spawn(|| discovery::resolve().unwrap()))
            .collect::<Vec<_>>()
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect();

        assert!(restorer::is_resolved());
        for addr in from_threads {
            assert_eq!(addr, first);
        }
        assert_eq!(discovery::resolve().unwrap(), first);
    }

    #[test]
    fn test_sigpipe_disposition_survives_resolution() {
        let _guard = serial();

        let before = query(discovery::PROBE_SIGNAL);
        discovery::resolve().unwrap();
        let after = query(discovery::PROBE_SIGNAL);
        assert_eq!(before.handler, after.handler);
    }
}
