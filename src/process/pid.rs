use std::fs;
use std::io;
use std::path::Path;

use nix::sys::signal::kill;
use nix::unistd::Pid;

/// Check whether `pid` refers to a running OS process.
///
/// Probes with signal 0. Any failure is treated as not-running, including
/// EPERM, where the process may in fact exist but cannot be signalled.
/// Zombies still answer the probe but are dead for supervision purposes, so
/// they count as not-running too.
pub fn running(pid: Option<i32>) -> bool {
    let Some(pid) = pid else { return false };
    if pid <= 0 {
        // PID 0 addresses the caller's own process group, negative values
        // address process groups; neither names a single process.
        return false;
    }
    if kill(Pid::from_raw(pid), None).is_err() {
        return false;
    }
    !is_zombie(pid)
}

/// A defunct process still occupies its slot in the process table until the
/// parent reaps it; its state field in /proc/<pid>/stat reads `Z`.
#[cfg(target_os = "linux")]
fn is_zombie(pid: i32) -> bool {
    match fs::read_to_string(format!("/proc/{pid}/stat")) {
        // The state field follows the parenthesised comm, which may itself
        // contain parentheses; split on the last one.
        Ok(stat) => stat
            .rsplit(')')
            .next()
            .map(|rest| rest.trim_start().starts_with('Z'))
            .unwrap_or(false),
        Err(_) => false,
    }
}

#[cfg(not(target_os = "linux"))]
fn is_zombie(_pid: i32) -> bool {
    false
}

/// Write a plain-text pid file, creating parent directories on demand.
pub fn write(path: &Path, pid: i32) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, pid.to_string())
}

/// Remove a pid file, ignoring a file that is already gone.
pub fn remove(path: &Path) {
    if let Err(err) = fs::remove_file(path) {
        if err.kind() != io::ErrorKind::NotFound {
            log::warn!("failed to remove pid file {}: {err}", path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_own_pid_is_running() {
        assert!(running(Some(std::process::id() as i32)));
    }

    #[test]
    fn test_absent_pid_is_never_running() {
        assert!(!running(None));
    }

    #[test]
    fn test_non_positive_pid_is_never_running() {
        assert!(!running(Some(0)));
        assert!(!running(Some(-1)));
    }

    #[test]
    fn test_stale_pid_is_not_running() {
        // PID far above the default pid_max, very unlikely to be in use.
        assert!(!running(Some(999_999_999)));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_zombie_counts_as_dead() {
        let mut child = Command::new("true").spawn().unwrap();
        let pid = child.id() as i32;

        // Give the child time to exit; unreaped it sits in the process
        // table as a zombie and still answers signal 0.
        thread::sleep(Duration::from_millis(200));
        assert!(!running(Some(pid)));

        let _ = child.wait();
    }

    #[test]
    fn test_write_and_remove_pid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pids").join("web.pid");

        write(&path, 1234).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1234");

        remove(&path);
        assert!(!path.exists());

        // Removing twice must not panic.
        remove(&path);
    }
}
