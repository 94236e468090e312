use std::process::{Command, Stdio};

use colored::Colorize;

use crate::errors::{Error, Result};
use crate::helpers;

/// One named shell step of an installation recipe.
#[derive(Clone, Debug)]
pub struct CommandStep {
    pub title: String,
    pub command: String,
    /// Interactive steps inherit the caller's terminal and resolve on exit.
    pub interactive: bool,
}

impl CommandStep {
    pub fn new(title: impl Into<String>, command: impl Into<String>) -> Self {
        CommandStep {
            title: title.into(),
            command: command.into(),
            interactive: false,
        }
    }

    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Report what would run without executing anything.
    pub dry_run: bool,
    /// Stream step output instead of capturing it.
    pub verbose: bool,
    /// Record failures and keep going instead of stopping at the first one.
    pub continue_on_error: bool,
}

#[derive(Clone, Debug)]
pub struct StepResult {
    pub title: String,
    pub success: bool,
    pub output: String,
    pub error: Option<String>,
}

/// Outcome of a full run: per-step results plus summary counts. A run that
/// stopped early still carries the results collected up to and including the
/// failing step.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub success: bool,
    pub results: Vec<StepResult>,
    pub success_count: usize,
    pub fail_count: usize,
}

/// Execute a single step. Non-zero exit and spawn failures surface as
/// [`Error::CommandFailure`].
pub fn execute(step: &CommandStep, options: &RunOptions) -> Result<StepResult> {
    if options.dry_run {
        println!("{} [dry-run] {}", *helpers::INFO, step.command.yellow());
        return Ok(StepResult {
            title: step.title.clone(),
            success: true,
            output: String::new(),
            error: None,
        });
    }

    if step.interactive {
        println!("{} {}", *helpers::INFO, step.title.cyan());
        println!("  {}", step.command.dimmed());

        let status = Command::new("sh")
            .arg("-c")
            .arg(&step.command)
            .status()
            .map_err(|err| Error::CommandFailure {
                title: step.title.clone(),
                detail: err.to_string(),
            })?;

        if !status.success() {
            return Err(Error::CommandFailure {
                title: step.title.clone(),
                detail: format!("exited with {}", status.code().unwrap_or(-1)),
            });
        }

        println!("{} {}", *helpers::SUCCESS, step.title.green());
        return Ok(StepResult {
            title: step.title.clone(),
            success: true,
            output: String::new(),
            error: None,
        });
    }

    if options.verbose {
        let status = Command::new("sh")
            .arg("-c")
            .arg(&step.command)
            .status()
            .map_err(|err| Error::CommandFailure {
                title: step.title.clone(),
                detail: err.to_string(),
            })?;

        if !status.success() {
            println!("{} {}", *helpers::FAIL, step.title.red());
            return Err(Error::CommandFailure {
                title: step.title.clone(),
                detail: format!("exited with {}", status.code().unwrap_or(-1)),
            });
        }

        println!("{} {}", *helpers::SUCCESS, step.title.green());
        return Ok(StepResult {
            title: step.title.clone(),
            success: true,
            output: String::new(),
            error: None,
        });
    }

    let output = Command::new("sh")
        .arg("-c")
        .arg(&step.command)
        .stdin(Stdio::null())
        .output()
        .map_err(|err| Error::CommandFailure {
            title: step.title.clone(),
            detail: err.to_string(),
        })?;

    if !output.status.success() {
        println!("{} {}", *helpers::FAIL, step.title.red());
        return Err(Error::CommandFailure {
            title: step.title.clone(),
            detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    println!("{} {}", *helpers::SUCCESS, step.title.green());
    Ok(StepResult {
        title: step.title.clone(),
        success: true,
        output: String::from_utf8_lossy(&output.stdout).into_owned(),
        error: None,
    })
}

/// Run steps in order. Later steps may depend on earlier ones, so nothing
/// runs in parallel. On failure the run stops at that step unless
/// `continue_on_error` is set, in which case the failure is recorded and the
/// next step runs.
pub fn run(steps: &[CommandStep], options: &RunOptions) -> RunReport {
    let mut results = Vec::with_capacity(steps.len());
    let mut success_count = 0;
    let mut fail_count = 0;

    for step in steps {
        match execute(step, options) {
            Ok(result) => {
                success_count += 1;
                results.push(result);
            }
            Err(err) => {
                fail_count += 1;
                results.push(StepResult {
                    title: step.title.clone(),
                    success: false,
                    output: String::new(),
                    error: Some(err.to_string()),
                });

                if !options.continue_on_error {
                    break;
                }
            }
        }
    }

    RunReport {
        success: fail_count == 0,
        results,
        success_count,
        fail_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(title: &str, command: &str) -> CommandStep {
        CommandStep::new(title, command)
    }

    #[test]
    fn test_run_all_steps_succeed() {
        let steps = [step("first", "true"), step("second", "true")];
        let report = run(&steps, &RunOptions::default());

        assert!(report.success);
        assert_eq!(report.success_count, 2);
        assert_eq!(report.fail_count, 0);
        assert_eq!(report.results.len(), 2);
    }

    #[test]
    fn test_captured_output_is_returned() {
        let result = execute(&step("echo", "echo hello"), &RunOptions::default()).unwrap();
        assert!(result.success);
        assert_eq!(result.output.trim(), "hello");
    }

    #[test]
    fn test_failure_stops_the_run_by_default() {
        let steps = [
            step("first", "true"),
            step("boom", "exit 3"),
            step("never", "true"),
        ];
        let report = run(&steps, &RunOptions::default());

        assert!(!report.success);
        assert_eq!(report.success_count, 1);
        assert_eq!(report.fail_count, 1);
        // The failing step is recorded; the one after it never ran.
        assert_eq!(report.results.len(), 2);
        assert!(!report.results[1].success);
        assert!(report.results[1].error.is_some());
    }

    #[test]
    fn test_continue_on_error_runs_every_step() {
        let steps = [
            step("first", "true"),
            step("boom", "false"),
            step("after", "true"),
        ];
        let options = RunOptions {
            continue_on_error: true,
            ..Default::default()
        };
        let report = run(&steps, &options);

        assert!(!report.success);
        assert_eq!(report.success_count, 2);
        assert_eq!(report.fail_count, 1);
        assert_eq!(report.results.len(), 3);
        assert!(report.results[2].success);
    }

    #[test]
    fn test_dry_run_executes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("ran");
        let steps = [step("touch", &format!("touch {}", marker.display()))];

        let options = RunOptions {
            dry_run: true,
            ..Default::default()
        };
        let report = run(&steps, &options);

        assert!(report.success);
        assert_eq!(report.success_count, 1);
        assert!(!marker.exists());
    }

    #[test]
    fn test_failure_detail_carries_stderr() {
        let err = execute(
            &step("boom", "echo oops >&2; exit 1"),
            &RunOptions::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("oops"));
    }
}
