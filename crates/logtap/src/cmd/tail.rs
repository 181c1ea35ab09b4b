use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use logtap_forward::{attach, ForwardError};
use logtap_wire::WireError;
use tracing::info;

use crate::cmd::TailArgs;
use crate::exit::{forward_error, CliError, CliResult, SUCCESS};
use crate::output::{print_record, OutputFormat};

const RETRY_INTERVAL: Duration = Duration::from_millis(250);

pub fn run(args: TailArgs, format: OutputFormat) -> CliResult<i32> {
    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    let mut printed = 0usize;

    while running.load(Ordering::SeqCst) {
        let mut subscription = match attach(&args.path) {
            Ok(subscription) => subscription,
            Err(_) if args.retry => {
                std::thread::sleep(RETRY_INTERVAL);
                continue;
            }
            Err(err) => return Err(forward_error("attach failed", err)),
        };
        info!(path = ?args.path, "attached to producer");

        while running.load(Ordering::SeqCst) {
            let record = match subscription.next_record() {
                Ok(record) => record,
                Err(ForwardError::Wire(WireError::ConnectionClosed)) => {
                    info!("producer disconnected");
                    break;
                }
                Err(err) => return Err(forward_error("receive failed", err)),
            };

            print_record(&record, format);
            printed = printed.saturating_add(1);

            if let Some(count) = args.count {
                if printed >= count {
                    return Ok(SUCCESS);
                }
            }
        }

        if !args.retry {
            break;
        }
    }

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
