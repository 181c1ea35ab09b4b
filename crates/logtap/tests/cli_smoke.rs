#![cfg(unix)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use logtap::forward::{attach, Forwarder, Subscription};
use logtap::wire::LogRecord;

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = PathBuf::from(format!(
        "/tmp/logtap-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn attach_within(path: &Path, timeout: Duration) -> Subscription {
    let start = Instant::now();
    loop {
        match attach(path) {
            Ok(subscription) => return subscription,
            Err(err) => {
                assert!(
                    start.elapsed() < timeout,
                    "attach timed out: {err}"
                );
                std::thread::sleep(Duration::from_millis(25));
            }
        }
    }
}

#[test]
fn version_prints_crate_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_logtap"))
        .arg("version")
        .output()
        .expect("version command should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn emit_forwards_stdin_lines_to_attached_consumer() {
    let dir = unique_temp_dir("emit");
    let sock_path = dir.join("emit.sock");

    let mut child = Command::new(env!("CARGO_BIN_EXE_logtap"))
        .arg("--log-level")
        .arg("error")
        .arg("emit")
        .arg(&sock_path)
        .arg("--wait")
        .arg("--severity")
        .arg("1")
        .arg("--color")
        .arg("0xAABBCCDD")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("emit command should start");

    let mut subscription = attach_within(&sock_path, Duration::from_secs(5));

    let mut stdin = child.stdin.take().expect("child stdin should be piped");
    stdin
        .write_all(b"hello\nworld\n")
        .expect("writing to child stdin should succeed");
    drop(stdin);

    let first = subscription
        .next_record()
        .expect("first record should arrive");
    assert_eq!(first.text, "hello");
    assert_eq!(first.severity, 1);
    assert_eq!(first.color, 0xAABB_CCDD);

    let second = subscription
        .next_record()
        .expect("second record should arrive");
    assert_eq!(second.text, "world");

    let status = child.wait().expect("emit command should exit");
    assert!(status.success());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn tail_prints_count_records_and_exits() {
    let dir = unique_temp_dir("tail");
    let sock_path = dir.join("tail.sock");

    let forwarder = Forwarder::bind(&sock_path).expect("bind should succeed");

    let child = Command::new(env!("CARGO_BIN_EXE_logtap"))
        .arg("--log-level")
        .arg("error")
        .arg("--format")
        .arg("raw")
        .arg("tail")
        .arg(&sock_path)
        .arg("--count")
        .arg("2")
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("tail command should start");

    for text in ["one", "two"] {
        let record = LogRecord::new(0, 0, 0, 0, text);
        let start = Instant::now();
        while !forwarder.send(&record) {
            assert!(
                start.elapsed() < Duration::from_secs(5),
                "tail should attach and accept records"
            );
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    let output = child
        .wait_with_output()
        .expect("tail command should exit after --count records");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "one\ntwo\n");

    drop(forwarder);
    let _ = std::fs::remove_dir_all(&dir);
}
