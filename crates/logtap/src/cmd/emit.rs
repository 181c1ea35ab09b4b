use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use logtap_forward::Forwarder;
use logtap_wire::LogRecord;
use tracing::info;

use crate::cmd::EmitArgs;
use crate::exit::{forward_error, CliError, CliResult, SUCCESS};

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

pub fn run(args: EmitArgs) -> CliResult<i32> {
    let forwarder =
        Forwarder::bind(&args.path).map_err(|err| forward_error("bind failed", err))?;
    info!(path = ?args.path, "endpoint bound; forwarding stdin lines");

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    if args.wait {
        info!("waiting for a consumer to attach");
        while running.load(Ordering::SeqCst) && !forwarder.is_connected() {
            std::thread::sleep(WAIT_POLL_INTERVAL);
        }
    }

    let stdin = std::io::stdin();
    let mut emitted = 0usize;
    let mut forwarded = 0usize;

    for line in stdin.lock().lines() {
        if !running.load(Ordering::SeqCst) {
            break;
        }
        let line = line.map_err(|err| CliError::new(crate::exit::INTERNAL, err.to_string()))?;

        let record = LogRecord::new(args.severity, args.level, args.group, args.color, line);
        emitted += 1;
        if forwarder.send(&record) {
            forwarded += 1;
        }
    }

    info!(emitted, forwarded, "stdin exhausted");
    Ok(SUCCESS)
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}
