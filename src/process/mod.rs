pub mod id;
pub mod pid;
pub mod store;

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Mutex;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{DateTime, Utc};
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::helpers;
use crate::home::Home;

use store::Store;

/// Grace window between SIGTERM and the deferred SIGKILL.
pub const STOP_GRACE: Duration = Duration::from_secs(3);
/// Settle delay between the stop and start phases of a restart, giving the OS
/// time to release ports and other resources.
pub const RESTART_SETTLE: Duration = Duration::from_millis(500);

/// The default interpreter; receives the script as its first argument.
pub const DEFAULT_INTERPRETER: &str = "sh";

pub type Env = BTreeMap<String, String>;

/// Force-kill timers scheduled by `stop`. They are not awaited by the stop
/// operation itself; the binary joins them once, right before exiting.
static DEFERRED_KILLS: Lazy<Mutex<Vec<JoinHandle<()>>>> = Lazy::new(|| Mutex::new(Vec::new()));

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Online,
    Stopped,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Online => "online",
            Status::Stopped => "stopped",
        }
    }
}

/// The persisted description of one managed process.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRecord {
    pub id: String,
    pub name: String,
    pub script: String,
    pub interpreter: String,
    #[serde(default)]
    pub args: Vec<String>,
    pub cwd: PathBuf,
    #[serde(default)]
    pub env: Env,
    #[serde(default)]
    pub watch: bool,
    pub pid: Option<i32>,
    pub status: Status,
    pub restarts: u64,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub stopped_at: Option<DateTime<Utc>>,
    pub log_file: PathBuf,
    pub error_log_file: PathBuf,
    pub pid_file: PathBuf,
}

impl ProcessRecord {
    fn launch_spec(&self) -> LaunchSpec {
        LaunchSpec {
            name: Some(self.name.clone()),
            script: self.script.clone(),
            args: self.args.clone(),
            interpreter: self.interpreter.clone(),
            cwd: Some(self.cwd.clone()),
            env: self.env.clone(),
            watch: self.watch,
        }
    }
}

/// The immutable description used to (re)start a record.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchSpec {
    #[serde(default)]
    pub name: Option<String>,
    pub script: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_interpreter")]
    pub interpreter: String,
    #[serde(default)]
    pub cwd: Option<PathBuf>,
    #[serde(default)]
    pub env: Env,
    #[serde(default)]
    pub watch: bool,
}

fn default_interpreter() -> String {
    DEFAULT_INTERPRETER.to_string()
}

impl LaunchSpec {
    pub fn new(script: impl Into<String>) -> Self {
        LaunchSpec {
            name: None,
            script: script.into(),
            args: Vec::new(),
            interpreter: default_interpreter(),
            cwd: None,
            env: Env::new(),
            watch: false,
        }
    }

    pub fn resolved_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => helpers::name_from_script(&self.script),
        }
    }
}

/// A record with liveness re-derived from the OS at read time.
#[derive(Clone, Debug)]
pub struct ProcessView {
    pub record: ProcessRecord,
    pub running: bool,
    pub uptime: Option<chrono::Duration>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ConfigFile {
    Apps { apps: Vec<LaunchSpec> },
    Single(LaunchSpec),
}

/// Start, track, stop and restart managed processes on top of the registry
/// store and the liveness prober. Every operation is a single pass: load the
/// registry, act, persist, return.
pub struct Supervisor {
    store: Store,
}

impl Supervisor {
    pub fn new(home: Home) -> Self {
        Supervisor {
            store: Store::new(home),
        }
    }

    pub fn home(&self) -> &Home {
        self.store.home()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Start a process from a launch spec.
    ///
    /// Fails with [`Error::DuplicateRunning`] when the name already belongs
    /// to a live record. A dead record with the same name is updated in
    /// place, keeping its id, creation time and restart counter.
    pub fn start(&self, spec: &LaunchSpec) -> Result<ProcessRecord> {
        let home = self.store.home();
        home.ensure()?;

        let name = spec.resolved_name();
        let mut records = self.store.load();

        let existing = records.values().find(|r| r.name == name).cloned();
        if let Some(prior) = &existing {
            if pid::running(prior.pid) {
                return Err(Error::DuplicateRunning {
                    name,
                    pid: prior.pid.unwrap_or_default(),
                });
            }
        }

        let cwd = match &spec.cwd {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => std::env::current_dir()?.join(path),
            None => std::env::current_dir()?,
        };
        let script = resolve_script(&spec.script, &cwd);

        let mut record = ProcessRecord {
            id: existing
                .as_ref()
                .map(|r| r.id.clone())
                .unwrap_or_else(|| id::generate(&records)),
            name: name.clone(),
            script,
            interpreter: spec.interpreter.clone(),
            args: spec.args.clone(),
            cwd,
            env: spec.env.clone(),
            watch: spec.watch,
            pid: None,
            status: Status::Online,
            restarts: existing.as_ref().map(|r| r.restarts).unwrap_or(0),
            created_at: existing
                .as_ref()
                .map(|r| r.created_at)
                .unwrap_or_else(Utc::now),
            started_at: Some(Utc::now()),
            stopped_at: None,
            log_file: home.log_file(&name),
            error_log_file: home.error_log_file(&name),
            pid_file: home.pid_file(&name),
        };

        let child_pid = spawn_detached(&record)?;
        record.pid = Some(child_pid);
        pid::write(&record.pid_file, child_pid)?;

        records.insert(record.id.clone(), record.clone());
        self.store.save(&records)?;

        log::info!("started {} (pid {child_pid})", record.name);
        Ok(record)
    }

    /// Stop a process by name or id.
    ///
    /// Sends SIGTERM and schedules a SIGKILL after the grace window on a
    /// background timer that is not awaited here, so this returns before the
    /// child is confirmed dead. The record is marked stopped regardless.
    pub fn stop(&self, name_or_id: &str) -> Result<ProcessRecord> {
        let mut records = self.store.load();
        let id = resolve(&records, name_or_id)
            .ok_or_else(|| Error::NotFound(name_or_id.to_string()))?;

        let record = records
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound(name_or_id.to_string()))?;

        if pid::running(record.pid) {
            if let Some(target) = record.pid {
                // Already-dead targets are fine; the probe above raced.
                let _ = kill(Pid::from_raw(target), Signal::SIGTERM);
                defer_force_kill(target);
            }
        }

        record.status = Status::Stopped;
        record.pid = None;
        record.stopped_at = Some(Utc::now());
        pid::remove(&record.pid_file);

        let stopped = record.clone();
        self.store.save(&records)?;

        log::info!("stopped {}", stopped.name);
        Ok(stopped)
    }

    /// Stop, wait for the settle delay, then start again with the original
    /// launch spec. Increments the restart counter by one relative to the
    /// record as it was before this call.
    pub fn restart(&self, name_or_id: &str) -> Result<ProcessRecord> {
        let records = self.store.load();
        let id = resolve(&records, name_or_id)
            .ok_or_else(|| Error::NotFound(name_or_id.to_string()))?;
        let prior = records
            .get(&id)
            .ok_or_else(|| Error::NotFound(name_or_id.to_string()))?
            .clone();

        // A process that is already dead must not prevent the restart.
        if let Err(err) = self.stop(&id) {
            log::warn!("ignoring stop failure during restart of {}: {err}", prior.name);
        }

        thread::sleep(RESTART_SETTLE);

        let mut started = self.start(&prior.launch_spec())?;

        let mut records = self.store.load();
        if let Some(record) = records.get_mut(&started.id) {
            record.restarts = prior.restarts + 1;
            started = record.clone();
        }
        self.store.save(&records)?;

        log::info!("restarted {} (restarts={})", started.name, started.restarts);
        Ok(started)
    }

    /// Stop every record, swallowing individual failures so one bad record
    /// does not abort the batch. Returns the records that were targeted.
    pub fn stop_all(&self) -> Vec<ProcessRecord> {
        let ids: Vec<String> = self.store.load().keys().cloned().collect();
        let mut stopped = Vec::new();

        for id in ids {
            match self.stop(&id) {
                Ok(record) => stopped.push(record),
                Err(err) => log::warn!("could not stop {id}: {err}"),
            }
        }

        stopped
    }

    /// Best-effort stop, then delete the record from the registry.
    pub fn remove(&self, name_or_id: &str) -> Result<ProcessRecord> {
        let records = self.store.load();
        let id = resolve(&records, name_or_id)
            .ok_or_else(|| Error::NotFound(name_or_id.to_string()))?;

        if let Err(err) = self.stop(&id) {
            log::warn!("ignoring stop failure during removal of {id}: {err}");
        }

        let mut records = self.store.load();
        let removed = records
            .remove(&id)
            .ok_or_else(|| Error::NotFound(name_or_id.to_string()))?;
        self.store.save(&records)?;

        log::info!("removed {}", removed.name);
        Ok(removed)
    }

    /// Every record, with liveness re-derived from the OS.
    ///
    /// A record whose cached status says online but whose process is gone is
    /// reported as stopped with no pid. The correction applies to the
    /// returned view only; nothing is persisted here.
    pub fn list(&self) -> Vec<ProcessView> {
        self.store.load().into_values().map(reconcile).collect()
    }

    /// A single record by name or id, with the same read-time liveness
    /// re-derivation as `list`.
    pub fn describe(&self, name_or_id: &str) -> Result<ProcessView> {
        let records = self.store.load();
        let id = resolve(&records, name_or_id)
            .ok_or_else(|| Error::NotFound(name_or_id.to_string()))?;
        let record = records
            .get(&id)
            .ok_or_else(|| Error::NotFound(name_or_id.to_string()))?
            .clone();

        Ok(reconcile(record))
    }

    /// Start every launch spec listed in a JSON config file (an `apps` array
    /// or a single spec object). Individual failures are logged and the
    /// corresponding spec skipped; only successfully started records are
    /// returned.
    pub fn start_from_config(&self, path: &Path) -> Result<Vec<ProcessRecord>> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let raw = std::fs::read_to_string(path)?;
        let config: ConfigFile = serde_json::from_str(&raw)?;
        let specs = match config {
            ConfigFile::Apps { apps } => apps,
            ConfigFile::Single(spec) => vec![spec],
        };

        let mut started = Vec::new();
        for spec in &specs {
            match self.start(spec) {
                Ok(record) => started.push(record),
                Err(err) => {
                    log::error!("could not start {}: {err}", spec.resolved_name());
                    eprintln!(
                        "{} Could not start {}: {err}",
                        *helpers::FAIL,
                        spec.resolved_name()
                    );
                }
            }
        }

        Ok(started)
    }
}

/// Find the single record whose name or id equals the argument.
fn resolve(records: &BTreeMap<String, ProcessRecord>, name_or_id: &str) -> Option<String> {
    records
        .iter()
        .find(|(id, record)| record.name == name_or_id || id.as_str() == name_or_id)
        .map(|(id, _)| id.clone())
}

fn reconcile(mut record: ProcessRecord) -> ProcessView {
    let running = pid::running(record.pid);

    if record.status == Status::Online && !running {
        record.status = Status::Stopped;
        record.pid = None;
    }

    let uptime = match (running, record.started_at) {
        (true, Some(started_at)) => Some(Utc::now() - started_at),
        _ => None,
    };

    ProcessView {
        record,
        running,
        uptime,
    }
}

fn resolve_script(script: &str, cwd: &Path) -> String {
    let path = Path::new(script);
    if path.is_absolute() {
        script.to_string()
    } else {
        cwd.join(path).to_string_lossy().into_owned()
    }
}

/// Spawn the child detached from this process's lifetime: new session via
/// setsid, stdin null, stdout/stderr appended to the record's log files.
fn spawn_detached(record: &ProcessRecord) -> Result<i32> {
    use std::os::unix::process::CommandExt;

    // Names may contain separators, putting the log files below logs/.
    if let Some(parent) = record.log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let out = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&record.log_file)?;
    let err = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&record.error_log_file)?;

    // The default interpreter receives the script as its first argument;
    // any other interpreter is invoked with the provided args only.
    let mut cmd = Command::new(&record.interpreter);
    if record.interpreter == DEFAULT_INTERPRETER {
        cmd.arg(&record.script);
    }
    cmd.args(&record.args)
        .current_dir(&record.cwd)
        .envs(load_dotenv(&record.cwd))
        .envs(&record.env)
        .stdin(Stdio::null())
        .stdout(Stdio::from(out))
        .stderr(Stdio::from(err));

    unsafe {
        cmd.pre_exec(|| {
            libc::setsid();
            Ok(())
        });
    }

    let child = cmd.spawn().map_err(|source| Error::LaunchFailure {
        program: record.interpreter.clone(),
        source,
    })?;

    // The handle is dropped on purpose: this CLI exits within milliseconds
    // and the detached child is re-parented to init.
    Ok(child.id() as i32)
}

/// Load `.env` from the launch directory; entries sit beneath the record's
/// explicit env in the child environment.
fn load_dotenv(dir: &Path) -> Env {
    let env_file = dir.join(".env");
    let mut vars = Env::new();

    if env_file.is_file() {
        match dotenvy::from_path_iter(&env_file) {
            Ok(iter) => {
                for item in iter {
                    match item {
                        Ok((key, value)) => {
                            vars.insert(key, value);
                        }
                        Err(err) => log::warn!("failed to parse .env entry: {err}"),
                    }
                }
            }
            Err(err) => log::warn!("failed to read {}: {err}", env_file.display()),
        }
    }

    vars
}

fn defer_force_kill(target: i32) {
    let handle = thread::spawn(move || {
        thread::sleep(STOP_GRACE);
        if pid::running(Some(target)) {
            let _ = kill(Pid::from_raw(target), Signal::SIGKILL);
        }
    });

    if let Ok(mut kills) = DEFERRED_KILLS.lock() {
        kills.push(handle);
    }
}

/// Wait for any pending force-kill timers. Called once by the binary just
/// before exit, mirroring the original's lingering event-loop timer; the
/// stop operation itself never waits on these.
pub fn join_deferred() {
    let handles: Vec<JoinHandle<()>> = match DEFERRED_KILLS.lock() {
        Ok(mut kills) => kills.drain(..).collect(),
        Err(_) => return,
    };

    for handle in handles {
        let _ = handle.join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::sys::wait::waitpid;
    use std::fs;
    use tempfile::TempDir;

    fn test_home() -> (TempDir, Home) {
        let dir = tempfile::tempdir().unwrap();
        let home = Home::at(dir.path());
        (dir, home)
    }

    fn write_script(dir: &TempDir, name: &str, body: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn spec(name: &str, script: &str) -> LaunchSpec {
        let mut spec = LaunchSpec::new(script);
        spec.name = Some(name.to_string());
        spec
    }

    /// Reap a direct child so the liveness probe stops seeing its zombie.
    /// Production never needs this: the CLI exits right away and init reaps
    /// the detached child.
    fn reap(pid: i32) {
        let _ = waitpid(Pid::from_raw(pid), None);
    }

    #[test]
    fn test_start_reports_online_and_alive() {
        let (dir, home) = test_home();
        let script = write_script(&dir, "app.sh", "sleep 30\n");
        let sup = Supervisor::new(home);

        let record = sup.start(&spec("app", &script)).unwrap();
        assert_eq!(record.status, Status::Online);
        assert!(pid::running(record.pid));
        assert!(record.pid_file.exists());

        sup.remove("app").unwrap();
    }

    #[test]
    fn test_duplicate_start_fails_while_live() {
        let (dir, home) = test_home();
        let script = write_script(&dir, "app.sh", "sleep 30\n");
        let sup = Supervisor::new(home);

        sup.start(&spec("app", &script)).unwrap();
        let err = sup.start(&spec("app", &script)).unwrap_err();
        assert!(matches!(err, Error::DuplicateRunning { .. }));

        sup.remove("app").unwrap();
    }

    #[test]
    fn test_stop_marks_stopped_immediately() {
        let (dir, home) = test_home();
        let script = write_script(&dir, "app.sh", "sleep 30\n");
        let sup = Supervisor::new(home);

        let started = sup.start(&spec("app", &script)).unwrap();
        let stopped = sup.stop("app").unwrap();
        assert_eq!(stopped.status, Status::Stopped);
        assert_eq!(stopped.pid, None);
        assert!(stopped.stopped_at.is_some());
        assert!(!started.pid_file.exists());

        // Describe right after stop agrees, whether or not the OS process
        // has actually exited yet.
        let view = sup.describe("app").unwrap();
        assert!(!view.running);
        assert_eq!(view.record.pid, None);

        reap(started.pid.unwrap());
        sup.remove("app").unwrap();
    }

    #[test]
    fn test_stop_unknown_name_is_not_found() {
        let (_dir, home) = test_home();
        let sup = Supervisor::new(home);

        assert!(matches!(sup.stop("ghost"), Err(Error::NotFound(_))));
        assert!(matches!(sup.remove("ghost"), Err(Error::NotFound(_))));
        assert!(matches!(sup.describe("ghost"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_restart_increments_counter_and_changes_pid() {
        let (dir, home) = test_home();
        let script = write_script(&dir, "app.sh", "sleep 30\n");
        let sup = Supervisor::new(home);

        let first = sup.start(&spec("app", &script)).unwrap();
        assert_eq!(first.restarts, 0);

        let second = sup.restart("app").unwrap();
        assert_eq!(second.restarts, 1);
        assert_eq!(second.id, first.id);
        assert_ne!(second.pid, first.pid);
        assert!(pid::running(second.pid));

        // The counter moves only through restart, not through start/stop.
        let persisted = sup.describe("app").unwrap();
        assert_eq!(persisted.record.restarts, 1);

        reap(first.pid.unwrap());
        sup.remove("app").unwrap();
    }

    #[test]
    fn test_restart_unknown_name_is_not_found() {
        let (_dir, home) = test_home();
        let sup = Supervisor::new(home);
        assert!(matches!(sup.restart("ghost"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_remove_excludes_record_from_list() {
        let (dir, home) = test_home();
        let script = write_script(&dir, "app.sh", "sleep 30\n");
        let sup = Supervisor::new(home);

        let record = sup.start(&spec("app", &script)).unwrap();
        sup.remove("app").unwrap();

        assert!(sup.list().iter().all(|v| v.record.id != record.id));
        assert!(matches!(sup.describe("app"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_list_corrects_externally_dead_process_without_persisting() {
        let (dir, home) = test_home();
        let script = write_script(&dir, "app.sh", "exit 0\n");
        let sup = Supervisor::new(home);

        let record = sup.start(&spec("app", &script)).unwrap();
        reap(record.pid.unwrap());

        let views = sup.list();
        assert_eq!(views.len(), 1);
        assert!(!views[0].running);
        assert_eq!(views[0].record.status, Status::Stopped);
        assert_eq!(views[0].record.pid, None);
        assert_eq!(views[0].uptime, None);

        // The correction is a read-time view only; the stored record still
        // carries the stale online status.
        let stored = sup.store().load();
        assert_eq!(stored[&record.id].status, Status::Online);
        assert_eq!(stored[&record.id].pid, record.pid);

        sup.remove("app").unwrap();
    }

    #[test]
    fn test_stop_all_targets_every_record() {
        let (dir, home) = test_home();
        let script = write_script(&dir, "app.sh", "sleep 30\n");
        let sup = Supervisor::new(home);

        let a = sup.start(&spec("one", &script)).unwrap();
        let b = sup.start(&spec("two", &script)).unwrap();

        let stopped = sup.stop_all();
        assert_eq!(stopped.len(), 2);
        assert!(stopped.iter().all(|r| r.status == Status::Stopped));

        reap(a.pid.unwrap());
        reap(b.pid.unwrap());
        sup.remove("one").unwrap();
        sup.remove("two").unwrap();
    }

    #[test]
    fn test_dead_record_name_can_be_reused_by_start() {
        let (dir, home) = test_home();
        let script = write_script(&dir, "app.sh", "sleep 30\n");
        let sup = Supervisor::new(home);

        let first = sup.start(&spec("app", &script)).unwrap();
        sup.stop("app").unwrap();
        reap(first.pid.unwrap());

        let second = sup.start(&spec("app", &script)).unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(second.restarts, 0);
        assert_eq!(sup.list().len(), 1);

        sup.remove("app").unwrap();
    }

    #[test]
    fn test_resolution_accepts_name_or_id() {
        let (dir, home) = test_home();
        let script = write_script(&dir, "app.sh", "sleep 30\n");
        let sup = Supervisor::new(home);

        let record = sup.start(&spec("app", &script)).unwrap();
        assert_eq!(sup.describe(&record.id).unwrap().record.name, "app");
        assert_eq!(sup.describe("app").unwrap().record.id, record.id);

        sup.remove(&record.id).unwrap();
    }

    #[test]
    fn test_start_from_config_skips_failing_spec() {
        let (dir, home) = test_home();
        let script = write_script(&dir, "app.sh", "sleep 30\n");
        let sup = Supervisor::new(home);

        let config = dir.path().join("apps.json");
        let contents = serde_json::json!({
            "apps": [
                { "name": "first", "script": script },
                { "name": "second", "script": script, "interpreter": "/does/not/exist" },
                { "name": "third", "script": script },
            ]
        });
        fs::write(&config, contents.to_string()).unwrap();

        let started = sup.start_from_config(&config).unwrap();
        let names: Vec<&str> = started.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["first", "third"]);

        for record in &started {
            sup.remove(&record.id).unwrap();
        }
    }

    #[test]
    fn test_start_from_config_missing_file() {
        let (dir, home) = test_home();
        let sup = Supervisor::new(home);
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            sup.start_from_config(&missing),
            Err(Error::ConfigNotFound(_))
        ));
    }

    #[test]
    fn test_start_from_config_rejects_invalid_json() {
        let (dir, home) = test_home();
        let sup = Supervisor::new(home);

        let config = dir.path().join("apps.json");
        fs::write(&config, "{oops").unwrap();
        assert!(matches!(
            sup.start_from_config(&config),
            Err(Error::ConfigParse(_))
        ));
    }

    #[test]
    fn test_log_output_is_captured_and_tailed() {
        let (dir, home) = test_home();
        let script = write_script(
            &dir,
            "app.sh",
            "echo 'tick 1'\necho 'tick 2'\necho 'tick 3'\nsleep 30\n",
        );
        let sup = Supervisor::new(home);

        let record = sup.start(&spec("app1", &script)).unwrap();
        thread::sleep(Duration::from_millis(400));

        let content = crate::logs::tail(&record, 2, crate::logs::LogKind::All);
        assert_eq!(content.out, "tick 2\ntick 3");
        assert_eq!(content.error, "");

        sup.stop("app1").unwrap();
        let view = sup.describe("app1").unwrap();
        assert!(!view.running);

        reap(record.pid.unwrap());
        sup.remove("app1").unwrap();
    }
}
