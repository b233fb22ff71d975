use std::mem::size_of;
use std::sync::atomic::{AtomicI32, Ordering};

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use ksigaction::abi::KernelAction;
use ksigaction::arch::{Abi, SignalAbi};
use ksigaction::{
    install_signal_action, logger, restorer, Arg, SigAction, NSIG, SA_RESTORER, SIGSET_SIZE,
};
use libc::c_int;

/// Show the kernel signal ABI this build targets and check it against the running kernel.
#[derive(Parser)]
#[command(name = "ksigaction-probe", version)]
struct Cli {
    /// Install a handler on SIGNAL, raise it, and read the disposition back.
    #[arg(long, value_name = "SIGNAL")]
    check: Option<c_int>,

    /// Log level (error, warn, info, debug, trace); overrides KSIGACTION_LOG.
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.log_level.as_deref() {
        Some(name) => {
            let level = logger::parse_level(name)
                .ok_or_else(|| anyhow!("unknown log level {:?}", name))?;
            logger::init_with_level(level)
        }
        None => logger::init(),
    }
    .map_err(|e| anyhow!("{}", e))?;

    describe()?;

    if let Some(sig) = cli.check {
        self_check(sig)?;
    }
    Ok(())
}

fn describe() -> Result<()> {
    type Action = <Abi as SignalAbi>::Action;

    println!("architecture:      {}", Abi::NAME);
    println!("kernel record:     {}", std::any::type_name::<Action>());
    println!("record size:       {} bytes", size_of::<Action>());
    println!("restorer field:    {}", <Action as KernelAction>::HAS_RESTORER);
    println!("sigsetsize:        {} bytes ({} signals)", SIGSET_SIZE, NSIG);
    println!("rt_sigaction args: {}", Abi::SYSCALL_ARGS);
    println!("forced flags:      {:#x}", Abi::FORCED_FLAGS);
    println!("restorer strategy: {}", Abi::STRATEGY);

    match Abi::trampoline(None)? {
        Some(t) => println!(
            "trampoline:        {:#x} ({} with {} = {})",
            t.entry, t.trap, t.nr_register, t.nr
        ),
        None => println!("trampoline:        none required"),
    }
    println!("restorer cached:   {}", restorer::is_resolved());
    Ok(())
}

static DELIVERED: AtomicI32 = AtomicI32::new(0);

extern "C" fn record_delivery(sig: c_int) {
    DELIVERED.store(sig, Ordering::SeqCst);
}

fn self_check(sig: c_int) -> Result<()> {
    println!();
    println!("Checking signal {}...", sig);

    let act = SigAction::new(record_delivery);
    let mut previous = SigAction::default();
    unsafe { install_signal_action(sig, Arg::Ref(&act), Arg::Ref(&mut previous), SIGSET_SIZE) }
        .map_err(|e| anyhow!("install failed: {}", e))?;

    if unsafe { libc::raise(sig) } != 0 {
        bail!("raise({}) failed: {}", sig, std::io::Error::last_os_error());
    }
    let seen = DELIVERED.load(Ordering::SeqCst);

    let mut current = SigAction::default();
    let restored = unsafe {
        install_signal_action(sig, Arg::Ref(&previous), Arg::Ref(&mut current), SIGSET_SIZE)
    };
    restored.map_err(|e| anyhow!("restoring the previous disposition failed: {}", e))?;

    if seen != sig {
        bail!("handler did not run (saw signal {})", seen);
    }
    println!("  handler ran");

    if current.handler != act.handler {
        bail!(
            "read back handler {:#x}, installed {:#x}",
            current.handler,
            act.handler
        );
    }
    println!("  read back handler {:#x}, flags {:#x}", current.handler, current.flags);

    if Abi::FORCED_FLAGS & SA_RESTORER != 0 {
        let forced = restorer::resolve()?;
        if forced != Some(current.restorer) {
            bail!(
                "kernel reports restorer {:#x}, layer resolved {:?}",
                current.restorer,
                forced
            );
        }
        println!("  restorer {:#x} matches", current.restorer);
    }

    println!("✅ signal {} check passed", sig);
    Ok(())
}
