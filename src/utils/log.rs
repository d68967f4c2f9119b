use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Directory all log files are written to, relative to the working directory.
pub const LOG_DIR: &str = "logs";

/// Log file used by the filterbank when debug logging is enabled.
pub const FILTERBANK_LOG: &str = "gammatone.log";

fn log_path(log_dir: &Path, filename: &str) -> io::Result<PathBuf> {
    if !log_dir.exists() {
        fs::create_dir_all(log_dir)?;
    }
    Ok(log_dir.join(filename))
}

/// Appends a timestamped entry to `logs/<filename>`.
///
/// # Arguments
///
/// * `filename` - The name of the log file (created under `logs/`)
/// * `message` - The message to log
pub fn log_to_file(filename: &str, message: &str) -> io::Result<()> {
    log_to_file_in(Path::new(LOG_DIR), filename, message)
}

fn log_to_file_in(log_dir: &Path, filename: &str, message: &str) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path(log_dir, filename)?)?;

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");

    writeln!(file, "\n--- Log entry at {} ---", timestamp)?;
    writeln!(file, "{}", message)?;
    writeln!(file, "--- End of entry ---\n")?;
    file.flush()?;

    Ok(())
}

/// Same as [`log_to_file`] with a framed header line.
pub fn log_with_header(filename: &str, header: &str, message: &str) -> io::Result<()> {
    log_with_header_in(Path::new(LOG_DIR), filename, header, message)
}

fn log_with_header_in(
    log_dir: &Path,
    filename: &str,
    header: &str,
    message: &str,
) -> io::Result<()> {
    let formatted_message = format!(
        "===== {} =====\n{}\n====================",
        header, message
    );
    log_to_file_in(log_dir, filename, &formatted_message)
}

/// Appends a row to `logs/<filename>`, writing `headers` first if the file is new.
pub fn log_csv(filename: &str, headers: &[&str], data: &[&str]) -> io::Result<()> {
    log_csv_in(Path::new(LOG_DIR), filename, headers, data)
}

fn log_csv_in(log_dir: &Path, filename: &str, headers: &[&str], data: &[&str]) -> io::Result<()> {
    let path = log_path(log_dir, filename)?;
    let file_exists = path.exists();

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    if !file_exists && !headers.is_empty() {
        writeln!(file, "{}", headers.join(","))?;
    }
    writeln!(file, "{}", data.join(","))?;
    file.flush()?;

    Ok(())
}

/// Logging never fails the computation; errors are reported on stderr.
pub(crate) fn debug_log(header: &str, message: &str) {
    if let Err(e) = log_with_header(FILTERBANK_LOG, header, message) {
        eprintln!("Failed to write to log file {}: {}", FILTERBANK_LOG, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("gammatone-logs-{}-{}", name, std::process::id()))
    }

    #[test]
    fn csv_header_written_once() {
        let dir = scratch_dir("csv");
        log_csv_in(&dir, "run.csv", &["a", "b"], &["1", "2"]).unwrap();
        log_csv_in(&dir, "run.csv", &["a", "b"], &["3", "4"]).unwrap();

        let contents = fs::read_to_string(dir.join("run.csv")).unwrap();
        fs::remove_dir_all(&dir).ok();
        assert_eq!(contents, "a,b\n1,2\n3,4\n");
    }

    #[test]
    fn entries_are_framed() {
        let dir = scratch_dir("framed");
        log_with_header_in(&dir, "run.log", "apply", "channels: 4").unwrap();

        let contents = fs::read_to_string(dir.join("run.log")).unwrap();
        fs::remove_dir_all(&dir).ok();
        assert!(contents.contains("===== apply ====="));
        assert!(contents.contains("channels: 4"));
        assert!(contents.contains("--- End of entry ---"));
    }

    #[test]
    fn missing_directory_is_created() {
        let dir = scratch_dir("nested").join("deeper");
        log_to_file_in(&dir, "run.log", "hello").unwrap();

        assert!(dir.join("run.log").exists());
        fs::remove_dir_all(dir.parent().unwrap()).ok();
    }
}
