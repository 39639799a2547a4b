//! CLI display utilities for formatting output

use prettytable::{format, Cell, Row, Table};
use std::io::Write;

use crate::queue::QueueStats;

/// Render queue statistics as a two-column table
pub fn stats_table(stats: &QueueStats) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);

    let mut add = |key: &str, value: String| {
        table.add_row(Row::new(vec![
            Cell::new(key).style_spec("b"),
            Cell::new(&value).style_spec("r"),
        ]));
    };

    add("read position", stats.read_position.to_string());
    add("write position", stats.write_position.to_string());
    add("records", stats.len.to_string());
    add(
        "capacity",
        match stats.capacity {
            0 => "unbounded".to_string(),
            n if stats.is_full() => format!("{} (full)", n),
            n => n.to_string(),
        },
    );
    add("reset on empty", yes_no(stats.reset_on_empty).to_string());
    add("backend", stats.store.backend.to_string());
    add(
        "store keys",
        stats
            .store
            .approximate_keys
            .map(|n| format!("~{}", n))
            .unwrap_or_else(|| "-".to_string()),
    );
    add(
        "disk usage",
        stats
            .store
            .disk_space_bytes
            .map(human_bytes)
            .unwrap_or_else(|| "-".to_string()),
    );

    table
}

/// Write a payload to `out` followed by a newline
///
/// Payloads are raw bytes; they are written unmodified.
pub fn write_payload(out: &mut dyn Write, payload: &[u8]) -> std::io::Result<()> {
    out.write_all(payload)?;
    out.write_all(b"\n")?;
    out.flush()
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn human_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}
