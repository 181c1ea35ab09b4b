use std::io::{IsTerminal, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use logtap_wire::{severity, LogRecord};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct RecordOutput<'a> {
    severity: i32,
    severity_name: &'a str,
    level: i32,
    group: i32,
    color: String,
    text: &'a str,
    timestamp: String,
}

pub fn print_record(record: &LogRecord, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = RecordOutput {
                severity: record.severity,
                severity_name: severity::name(record.severity),
                level: record.level,
                group: record.group,
                color: color_hex(record.color),
                text: &record.text,
                timestamp: now_unix_seconds(),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["SEVERITY", "LEVEL", "GROUP", "COLOR", "TEXT"])
                .add_row(vec![
                    severity::name(record.severity).to_string(),
                    record.level.to_string(),
                    record.group.to_string(),
                    color_hex(record.color),
                    record.text.clone(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "[{}] level={} group={} color={} {}",
                severity::name(record.severity),
                record.level,
                record.group,
                color_hex(record.color),
                record.text
            );
        }
        OutputFormat::Raw => {
            let mut out = std::io::stdout();
            let _ = out.write_all(record.text.as_bytes());
            let _ = out.write_all(b"\n");
            let _ = out.flush();
        }
    }
}

fn color_hex(color: u32) -> String {
    format!("0x{color:08X}")
}

fn now_unix_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}
