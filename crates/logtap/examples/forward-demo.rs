//! Minimal producer — taps a stderr log sink and forwards records.
//!
//! Run with:
//!   cargo run --example forward-demo
//!
//! In another terminal:
//!   cargo run -- tail /tmp/logtap-demo.sock

use std::time::Duration;

use logtap::forward::{Forwarder, ForwardingSink, LogSink};
use logtap::wire::{severity, LogRecord};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sock_path = std::env::temp_dir().join("logtap-demo.sock");

    let forwarder = Forwarder::bind(&sock_path)?;
    eprintln!("Forwarding on {}", sock_path.display());

    // The "host" sink: what the application would have done anyway.
    let sink = ForwardingSink::new(
        |record: &LogRecord| eprintln!("[local] {}", record.text),
        forwarder,
    );

    for i in 0..30 {
        let record = LogRecord::new(
            severity::MESSAGE,
            0,
            0,
            0xFFFF_FFFF,
            format!("demo record {i}"),
        );
        sink.emit(&record);
        if sink.forwarder().is_connected() {
            eprintln!("[local] (consumer attached)");
        }
        std::thread::sleep(Duration::from_millis(500));
    }

    Ok(())
}
