use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use std::thread;
use std::time::Duration;

use colored::Colorize;

use crate::errors::Result;
use crate::process::ProcessRecord;

/// Poll interval for the live follow loop.
const FOLLOW_POLL: Duration = Duration::from_secs(1);

/// Which log stream to read.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogKind {
    All,
    Out,
    Error,
}

/// Tail content for one record, one string per stream. A stream that was not
/// selected or whose file does not exist is empty.
#[derive(Clone, Debug, Default)]
pub struct LogContent {
    pub out: String,
    pub error: String,
}

/// Read the last `lines` non-empty lines of the selected stream(s).
pub fn tail(record: &ProcessRecord, lines: usize, kind: LogKind) -> LogContent {
    let mut content = LogContent::default();

    if kind != LogKind::Error {
        content.out = read_tail(&record.log_file, lines);
    }
    if kind != LogKind::Out {
        content.error = read_tail(&record.error_log_file, lines);
    }

    content
}

/// Truncate both log files of a record. Files that do not exist are left
/// alone rather than created.
pub fn flush(record: &ProcessRecord) -> Result<()> {
    for path in [&record.log_file, &record.error_log_file] {
        if path.exists() {
            fs::write(path, "")?;
        }
    }
    Ok(())
}

/// Flush every record's logs, swallowing per-record failures.
pub fn flush_all<'a>(records: impl IntoIterator<Item = &'a ProcessRecord>) {
    for record in records {
        if let Err(err) = flush(record) {
            log::warn!("could not flush logs for {}: {err}", record.name);
        }
    }
}

/// Watch both log files for growth and stream newly appended bytes, error
/// lines prefixed distinctly. Runs until the process is interrupted; there is
/// no natural termination.
pub fn follow(record: &ProcessRecord) {
    let err_prefix = "[ERR] ".red().to_string();
    let mut out_pos = file_len(&record.log_file);
    let mut err_pos = file_len(&record.error_log_file);

    loop {
        out_pos = drain_appended(&record.log_file, out_pos, "");
        err_pos = drain_appended(&record.error_log_file, err_pos, &err_prefix);
        thread::sleep(FOLLOW_POLL);
    }
}

fn read_tail(path: &Path, lines: usize) -> String {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return String::new(),
    };

    let mut recent: Vec<&str> = content
        .lines()
        .filter(|line| !line.is_empty())
        .rev()
        .take(lines)
        .collect();
    recent.reverse();
    recent.join("\n")
}

fn file_len(path: &Path) -> u64 {
    fs::metadata(path).map(|meta| meta.len()).unwrap_or(0)
}

/// Print the byte range appended since `pos`, line by line with `prefix`.
/// Returns the new position; a shrunken file (flushed mid-follow) resets it.
fn drain_appended(path: &Path, pos: u64, prefix: &str) -> u64 {
    let len = file_len(path);
    if len < pos {
        return len;
    }
    if len == pos {
        return pos;
    }

    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => return pos,
    };
    if file.seek(SeekFrom::Start(pos)).is_err() {
        return pos;
    }

    let mut chunk = String::new();
    if file.take(len - pos).read_to_string(&mut chunk).is_err() {
        return pos;
    }

    for line in chunk.lines() {
        println!("{prefix}{line}");
    }

    len
}
