use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "MINDER_HOME";

/// The data directory holding the registry, log files and pid files.
///
/// Constructed once per invocation and passed into the store, supervisor and
/// log manager so tests can point each at an isolated directory without
/// touching the process environment.
#[derive(Clone, Debug)]
pub struct Home {
    root: PathBuf,
}

impl Home {
    /// Resolve the data directory from `MINDER_HOME`, falling back to
    /// `~/.minder`.
    pub fn resolve() -> Self {
        let root = match env::var_os(HOME_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => home::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".minder"),
        };
        Home { root }
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Home { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn processes_file(&self) -> PathBuf {
        self.root.join("processes.json")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    pub fn pids_dir(&self) -> PathBuf {
        self.root.join("pids")
    }

    pub fn log_file(&self, name: &str) -> PathBuf {
        self.logs_dir().join(format!("{name}-out.log"))
    }

    pub fn error_log_file(&self, name: &str) -> PathBuf {
        self.logs_dir().join(format!("{name}-error.log"))
    }

    pub fn pid_file(&self, name: &str) -> PathBuf {
        self.pids_dir().join(format!("{name}.pid"))
    }

    /// Create the directory layout if it is missing.
    pub fn ensure(&self) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::create_dir_all(self.logs_dir())?;
        fs::create_dir_all(self.pids_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_derive_from_name() {
        let home = Home::at("/tmp/minder-test");
        assert_eq!(
            home.log_file("web"),
            PathBuf::from("/tmp/minder-test/logs/web-out.log")
        );
        assert_eq!(
            home.error_log_file("web"),
            PathBuf::from("/tmp/minder-test/logs/web-error.log")
        );
        assert_eq!(
            home.pid_file("web"),
            PathBuf::from("/tmp/minder-test/pids/web.pid")
        );
    }

    #[test]
    fn test_ensure_creates_layout() {
        let dir = tempfile::tempdir().unwrap();
        let home = Home::at(dir.path().join("deep").join("home"));
        home.ensure().unwrap();
        assert!(home.logs_dir().is_dir());
        assert!(home.pids_dir().is_dir());
    }
}
