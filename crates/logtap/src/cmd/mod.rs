use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod emit;
pub mod tail;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Attach to a producer's endpoint and print received records.
    Tail(TailArgs),
    /// Bind an endpoint and forward stdin lines as records (demo producer).
    Emit(EmitArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Tail(args) => tail::run(args, format),
        Command::Emit(args) => emit::run(args),
        Command::Version(args) => version::run(args),
    }
}

fn default_path() -> PathBuf {
    logtap_transport::default_socket_path()
}

#[derive(Args, Debug)]
pub struct TailArgs {
    /// Endpoint path to attach to.
    #[arg(default_value_os_t = default_path())]
    pub path: PathBuf,
    /// Exit after receiving N records.
    #[arg(long)]
    pub count: Option<usize>,
    /// Keep retrying when the producer is absent or disconnects.
    #[arg(long)]
    pub retry: bool,
}

#[derive(Args, Debug)]
pub struct EmitArgs {
    /// Endpoint path to bind.
    #[arg(default_value_os_t = default_path())]
    pub path: PathBuf,
    /// Severity value for emitted records.
    #[arg(long, default_value = "0")]
    pub severity: i32,
    /// Verbosity level for emitted records.
    #[arg(long, default_value = "0")]
    pub level: i32,
    /// Group value for emitted records.
    #[arg(long, default_value = "0")]
    pub group: i32,
    /// Color value (decimal or 0x-prefixed hex).
    #[arg(long, default_value = "0xFFFFFFFF", value_parser = parse_color)]
    pub color: u32,
    /// Wait for a consumer to attach before reading stdin.
    #[arg(long)]
    pub wait: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

fn parse_color(value: &str) -> Result<u32, String> {
    let parsed = if let Some(hex) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else {
        value.parse()
    };
    parsed.map_err(|err| format!("invalid color value {value:?}: {err}"))
}
