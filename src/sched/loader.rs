//! Tabular process input.
//!
//! A process table is comma separated text whose header names the columns. The
//! `pid`, `arrival` and `burst` columns are required, header matching ignores case
//! and surrounding whitespace, and any extra column is ignored. Cells may be
//! wrapped in double quotes, in which case commas inside them do not split the row:
//!
//! ```text
//! PID, Arrival, Burst
//! 1,   0,       5
//! 2,   1,       3
//! ```
//!
//! A table is accepted or rejected as a whole: on the first malformed row nothing
//! is handed back to the caller.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::debug;

use super::{Pid, Process, Ticks};
use crate::error::Result;
use crate::{parse_err, value_err};

pub const REQUIRED_COLUMNS: [&str; 3] = ["pid", "arrival", "burst"];

fn normalize(cell: &str) -> &str {
    cell.trim().trim_matches('"').trim()
}

/// Split a row on commas that are not inside a double quoted cell.
fn split_row(line: &str) -> Vec<&str> {
    let mut cells = vec![];
    let mut quoted = false;
    let mut start = 0;
    for (i, c) in line.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ',' if !quoted => {
                cells.push(&line[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    cells.push(&line[start..]);
    cells
}

/// Positions of the required columns within a row.
struct Header {
    pid: usize,
    arrival: usize,
    burst: usize,
}

impl Header {
    fn parse(line: &str) -> Result<Self> {
        let line = line.trim_start_matches('\u{feff}');
        let names: Vec<String> =
            split_row(line).into_iter().map(|c| normalize(c).to_lowercase()).collect();
        let position = |column: &str| {
            names.iter().position(|name| name == column).ok_or_else(|| {
                parse_err!(
                    "missing required column '{}', expected columns: {}",
                    column,
                    REQUIRED_COLUMNS.join(", ")
                )
            })
        };
        Ok(Self { pid: position("pid")?, arrival: position("arrival")?, burst: position("burst")? })
    }
}

fn cell<T: FromStr>(cells: &[&str], index: usize, column: &str, line_no: usize) -> Result<T> {
    let raw = cells
        .get(index)
        .map(|c| normalize(c))
        .ok_or_else(|| parse_err!("line {}: missing value for column '{}'", line_no, column))?;
    raw.parse::<T>().map_err(|_| {
        parse_err!(
            "line {}, column '{}': '{}' is not a valid non-negative integer",
            line_no,
            column,
            raw
        )
    })
}

/// Parse a whole process table.
pub fn parse_process_table(text: &str) -> Result<Vec<Process>> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());
    let Some((_, header)) = lines.next() else {
        return Err(parse_err!(
            "empty process table, expected columns: {}",
            REQUIRED_COLUMNS.join(", ")
        ));
    };
    let header = Header::parse(header)?;

    let mut processes = vec![];
    for (line_no, line) in lines {
        let cells = split_row(line);
        let pid: Pid = cell(&cells, header.pid, "pid", line_no)?;
        let arrival: Ticks = cell(&cells, header.arrival, "arrival", line_no)?;
        let burst: Ticks = cell(&cells, header.burst, "burst", line_no)?;
        if pid == 0 {
            return Err(value_err!("line {}, column 'pid': pid must be positive", line_no));
        }
        if burst == 0 {
            return Err(value_err!("line {}, column 'burst': burst must be positive", line_no));
        }
        processes.push(Process::new(pid, arrival, burst));
    }
    debug!("parsed {} processes from table", processes.len());
    Ok(processes)
}

pub fn load_process_table(path: impl AsRef<Path>) -> Result<Vec<Process>> {
    let text = fs::read_to_string(path)?;
    parse_process_table(&text)
}

/// The caller-owned working set of processes, filled manually or from tables.
#[derive(Debug, Clone, Default)]
pub struct ProcessTable {
    processes: Vec<Process>,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, process: Process) -> Result<()> {
        if process.pid == 0 {
            return Err(value_err!("pid must be positive"));
        }
        if process.burst_time == 0 {
            return Err(value_err!("P{} has a zero burst time", process.pid));
        }
        self.processes.push(process);
        Ok(())
    }

    /// Append every row of `text`, returning how many were added. On error the
    /// table is left exactly as it was.
    pub fn extend_from_csv(&mut self, text: &str) -> Result<usize> {
        let batch = parse_process_table(text)?;
        let added = batch.len();
        self.processes.extend(batch);
        Ok(added)
    }

    pub fn clear(&mut self) {
        self.processes.clear()
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Fresh copies of the records, ready to be handed to a scheduler.
    pub fn to_processes(&self) -> Vec<Process> {
        self.processes.clone()
    }
}
