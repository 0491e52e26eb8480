use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use env_logger::Target;
use log::{LevelFilter, debug, warn};

const LOG_FILE_NAME: &str = "kcost.log";

/// Initialize the logger with file and stderr output
///
/// Reports go to stdout, so log records never do. When the log file cannot
/// be created (read-only root filesystem, `HOME=/` inside a pod) records go
/// to stderr only and the command carries on.
///
/// # Arguments
///
/// * `verbose` - Enable debug level logging
/// * `quiet` - Suppress stderr output (logs still written to file)
///
/// # Platform-specific log locations
///
/// * **macOS**: `~/Library/Application Support/io.kcost.kcost/kcost.log`
/// * **Linux**: `~/.local/share/kcost/kcost.log`
/// * **Windows**: `C:\Users\<User>\AppData\Local\kcost\kcost\data\kcost.log`
///
pub fn init_logger(verbose: bool, quiet: bool) {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let opened = default_log_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))
        .and_then(|dir| open_log_file(&dir));

    let (log_file, log_path) = match opened {
        Ok((path, file)) => (Some(file), Ok(path)),
        Err(e) => (None, Err(e)),
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log_level)
        // kube and its HTTP stack are chatty at debug
        .filter_module("kube_client", LevelFilter::Warn)
        .filter_module("hyper_util", LevelFilter::Warn)
        .format_timestamp_secs()
        .target(log_target(log_file, quiet));

    // a second init (tests) keeps the first logger
    if builder.try_init().is_err() {
        return;
    }

    match log_path {
        Ok(path) => debug!("Logging to: {}", path.display()),
        Err(e) => warn!("Log file unavailable, logging to stderr only: {}", e),
    }
}

fn default_log_dir() -> Option<PathBuf> {
    ProjectDirs::from("io", "kcost", "kcost").map(|dirs| dirs.data_local_dir().to_path_buf())
}

/// Create `dir` if needed and open the log file in append mode
pub fn open_log_file(dir: &Path) -> io::Result<(PathBuf, File)> {
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE_NAME);
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;
    Ok((path, file))
}

/// Where records go given the log file (if any) and `--quiet`
fn log_target(log_file: Option<File>, quiet: bool) -> Target {
    match (log_file, quiet) {
        (Some(file), true) => Target::Pipe(Box::new(file)),
        (Some(file), false) => Target::Pipe(Box::new(Tee {
            stderr: io::stderr(),
            file,
        })),
        (None, true) => Target::Pipe(Box::new(io::sink())),
        (None, false) => Target::Stderr,
    }
}

/// Copies every record to stderr and the log file
struct Tee {
    stderr: io::Stderr,
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stderr.write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stderr.flush()?;
        self.file.flush()
    }
}
