//! JSON and table output.

use std::io::{self, Write};

use chrono::SecondsFormat;
use rhcc_forecast::{ClassifiedForecast, ContactMethod, LocalSchedule};
use serde::Serialize;

/// 12-hour clock, e.g. "03:04:05 PM"
const TIME_FORMAT: &str = "%I:%M:%S %p";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonRow {
    timestamp: String,
    contact_method: ContactMethod,
}

/// Write one `{timestamp, contactMethod}` object per forecast, UTC, source order.
pub fn write_json<W: Write>(entries: &[ClassifiedForecast], out: &mut W) -> anyhow::Result<()> {
    let rows: Vec<JsonRow> = entries
        .iter()
        .map(|entry| JsonRow {
            timestamp: entry
                .forecast
                .time
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            contact_method: entry.method,
        })
        .collect();

    serde_json::to_writer(&mut *out, &rows)?;
    writeln!(out)?;
    Ok(())
}

/// Write the day-grouped schedule as a bordered table.
pub fn write_table<W: Write>(schedule: &LocalSchedule, out: &mut W) -> io::Result<()> {
    let time_header = format!("Time ({})", schedule.timezone_abbreviation);
    let headers: [Vec<&str>; 3] = [
        vec!["Date"],
        vec![time_header.as_str()],
        vec!["Contact", "Method"],
    ];

    let body: Vec<[String; 3]> = schedule
        .rows
        .iter()
        .map(|row| {
            [
                row.date_label.clone().unwrap_or_default(),
                row.local_time.format(TIME_FORMAT).to_string(),
                row.method.to_string(),
            ]
        })
        .collect();

    let mut widths = [0usize; 3];
    for (i, lines) in headers.iter().enumerate() {
        for line in lines {
            widths[i] = widths[i].max(line.chars().count());
        }
    }
    for cells in &body {
        for (i, cell) in cells.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let border = border_line(&widths);

    writeln!(out, "{}", border)?;
    let header_height = headers.iter().map(Vec::len).max().unwrap_or(1);
    for line in 0..header_height {
        let cells: Vec<&str> = headers
            .iter()
            .map(|h| h.get(line).copied().unwrap_or(""))
            .collect();
        write_row(out, &widths, &cells)?;
    }
    writeln!(out, "{}", border)?;

    for (i, (row, cells)) in schedule.rows.iter().zip(&body).enumerate() {
        if i > 0 && row.starts_group() {
            writeln!(out, "{}", border)?;
        }
        let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
        write_row(out, &widths, &cells)?;
    }

    if !body.is_empty() {
        writeln!(out, "{}", border)?;
    }
    Ok(())
}

fn border_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line
}

fn write_row<W: Write>(out: &mut W, widths: &[usize], cells: &[&str]) -> io::Result<()> {
    write!(out, "|")?;
    for (cell, width) in cells.iter().zip(widths) {
        write!(out, " {:<width$} |", cell, width = *width)?;
    }
    writeln!(out)
}
