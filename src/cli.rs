use std::path::PathBuf;

use colored::Colorize;
use macros_rs::{crashln, string, ternary};
use serde_json::json;

use minder::{
    helpers::{self, ColoredString},
    home::Home,
    logs::{self, LogKind},
    process::{LaunchSpec, ProcessView, Supervisor},
};

use tabled::{
    settings::{
        object::{Columns, Rows, Segment},
        style::{BorderColor, Style},
        themes::Colorization,
        Color, Modify, Rotate,
    },
    Table, Tabled,
};
use tabled::settings::style::On;

fn supervisor() -> Supervisor {
    Supervisor::new(Home::resolve())
}

fn table_border() -> BorderColor<On, On, On, On> {
    BorderColor::filled(Color::new("\x1b[38;2;45;55;72m", "\x1b[39m"))
}

fn status_cell(view: &ProcessView) -> ColoredString {
    ternary!(view.running, "● online".green(), "○ stopped".red()).into()
}

fn uptime_of(view: &ProcessView) -> String {
    match (view.running, view.record.started_at) {
        (true, Some(started)) => helpers::format_duration(started),
        _ => string!("-"),
    }
}

fn pid_of(view: &ProcessView) -> String {
    view.record
        .pid
        .map(|pid| pid.to_string())
        .unwrap_or_else(|| string!("-"))
}

pub fn start(
    script: &String,
    name: &Option<String>,
    interpreter: &String,
    cwd: &Option<PathBuf>,
    watch: bool,
) {
    let mut spec = LaunchSpec::new(script.as_str());
    spec.name = name.clone();
    spec.interpreter = interpreter.clone();
    spec.cwd = cwd.clone();
    spec.watch = watch;

    match supervisor().start(&spec) {
        Ok(record) => {
            println!("{} Started ({}) ✓", *helpers::SUCCESS, record.name);
            println!("  pid: {}", record.pid.unwrap_or_default());
            println!("  log: {}", record.log_file.display());
        }
        Err(err) => crashln!("{} {err}", *helpers::FAIL),
    }
}

pub fn stop(name: &String) {
    match supervisor().stop(name) {
        Ok(record) => println!("{} Stopped ({}) ✓", *helpers::SUCCESS, record.name),
        Err(err) => crashln!("{} {err}", *helpers::FAIL),
    }
}

pub fn restart(name: &String) {
    println!("{} Restarting ({name})", *helpers::SUCCESS);
    match supervisor().restart(name) {
        Ok(record) => {
            println!("{} Restarted ({}) ✓", *helpers::SUCCESS, record.name);
            println!("  pid: {}", record.pid.unwrap_or_default());
            println!("  restarts: {}", record.restarts);
        }
        Err(err) => crashln!("{} {err}", *helpers::FAIL),
    }
}

pub fn stop_all() {
    let stopped = supervisor().stop_all();
    println!("{} Stopped {} process(es)", *helpers::SUCCESS, stopped.len());
}

pub fn remove(name: &String) {
    match supervisor().remove(name) {
        Ok(record) => println!("{} Removed ({}) ✓", *helpers::SUCCESS, record.name),
        Err(err) => crashln!("{} {err}", *helpers::FAIL),
    }
}

pub fn list(format: &String) {
    #[derive(Tabled)]
    struct ListItem {
        id: String,
        name: String,
        pid: String,
        status: ColoredString,
        restarts: u64,
        uptime: String,
    }

    let views = supervisor().list();

    if views.is_empty() {
        println!("{} No processes found", *helpers::SUCCESS);
        println!("   Start one with `minder start <script>`");
        return;
    }

    match format.as_str() {
        "json" => {
            let items: Vec<serde_json::Value> = views
                .iter()
                .map(|view| {
                    json!({
                        "id": view.record.id,
                        "name": view.record.name,
                        "pid": view.record.pid,
                        "status": view.record.status.as_str(),
                        "restarts": view.record.restarts,
                        "uptime": view.uptime.map(|d| d.num_milliseconds()),
                    })
                })
                .collect();
            match serde_json::to_string(&items) {
                Ok(encoded) => println!("{encoded}"),
                Err(err) => crashln!("{} {err}", *helpers::FAIL),
            }
        }
        _ => {
            let items: Vec<ListItem> = views
                .iter()
                .map(|view| ListItem {
                    id: view.record.id.clone(),
                    name: view.record.name.clone(),
                    pid: pid_of(view),
                    status: status_cell(view),
                    restarts: view.record.restarts,
                    uptime: uptime_of(view),
                })
                .collect();

            let table = Table::new(&items)
                .with(Style::rounded().remove_verticals())
                .with(Modify::new(Segment::all()).with(table_border()))
                .with(Colorization::exact([Color::FG_BRIGHT_CYAN], Rows::first()))
                .to_string();
            println!("{table}");
        }
    }
}

pub fn describe(name: &String, format: &String) {
    #[derive(Tabled)]
    struct Info {
        #[tabled(rename = "error log path ")]
        log_error: String,
        #[tabled(rename = "out log path")]
        log_out: String,
        #[tabled(rename = "exec cwd")]
        path: String,
        interpreter: String,
        #[tabled(rename = "script command ")]
        command: String,
        #[tabled(rename = "created at")]
        created_at: String,
        restarts: u64,
        uptime: String,
        pid: String,
        id: String,
        name: String,
        status: ColoredString,
    }

    let view = match supervisor().describe(name) {
        Ok(view) => view,
        Err(err) => crashln!("{} {err}", *helpers::FAIL),
    };

    match format.as_str() {
        "json" => {
            let item = json!({
                "id": view.record.id,
                "name": view.record.name,
                "script": view.record.script,
                "interpreter": view.record.interpreter,
                "args": view.record.args,
                "cwd": view.record.cwd,
                "pid": view.record.pid,
                "status": view.record.status.as_str(),
                "running": view.running,
                "restarts": view.record.restarts,
                "uptime": view.uptime.map(|d| d.num_milliseconds()),
                "createdAt": view.record.created_at,
                "startedAt": view.record.started_at,
                "stoppedAt": view.record.stopped_at,
                "logFile": view.record.log_file,
                "errorLogFile": view.record.error_log_file,
            });
            match serde_json::to_string(&item) {
                Ok(encoded) => println!("{encoded}"),
                Err(err) => crashln!("{} {err}", *helpers::FAIL),
            }
        }
        _ => {
            let data = vec![Info {
                log_error: format!("{}  ", view.record.error_log_file.display()),
                log_out: format!("{}  ", view.record.log_file.display()),
                path: format!("{}  ", view.record.cwd.display()),
                interpreter: view.record.interpreter.clone(),
                command: format!("{} {}", view.record.script, view.record.args.join(" ")),
                created_at: view.record.created_at.to_rfc3339(),
                restarts: view.record.restarts,
                uptime: uptime_of(&view),
                pid: pid_of(&view),
                id: view.record.id.clone(),
                name: view.record.name.clone(),
                status: status_cell(&view),
            }];

            let table = Table::new(&data)
                .with(Rotate::Left)
                .with(Style::modern().remove_horizontals())
                .with(Colorization::exact([Color::FG_CYAN], Columns::first()))
                .with(Modify::new(Segment::all()).with(table_border()))
                .to_string();

            println!(
                "{}\n{table}",
                format!("Describing process with name ({name})")
                    .on_bright_white()
                    .black()
            );
            println!(
                " {}",
                format!("Use `minder logs {name} [--lines <num>]` to display logs").white()
            );
        }
    }
}

pub fn logs(name: &String, lines: &usize, follow: bool, errors_only: bool) {
    let view = match supervisor().describe(name) {
        Ok(view) => view,
        Err(err) => crashln!("{} {err}", *helpers::FAIL),
    };

    println!(
        "{}",
        format!("Showing last {lines} lines for ({name}) (change the value with --lines option)")
            .yellow()
    );

    let kind = ternary!(errors_only, LogKind::Error, LogKind::All);
    let content = logs::tail(&view.record, *lines, kind);

    if !content.error.is_empty() {
        println!("{}", "\n--- Errors ---".bright_red());
        println!("{}", content.error);
    }
    if !content.out.is_empty() {
        println!("{}", "\n--- Output ---".bright_green());
        println!("{}", content.out);
    }
    if content.out.is_empty() && content.error.is_empty() {
        println!("{}", format!("No logs found for {name}").bright_black());
    }

    if follow {
        println!(
            "{}",
            format!("\nFollowing logs for ({name}) (press Ctrl+C to exit)").yellow()
        );
        logs::follow(&view.record);
    }
}

pub fn flush(name: &Option<String>) {
    let sup = supervisor();

    match name {
        Some(name) => {
            let view = match sup.describe(name) {
                Ok(view) => view,
                Err(err) => crashln!("{} {err}", *helpers::FAIL),
            };
            match logs::flush(&view.record) {
                Ok(()) => println!("{} Flushed logs for ({name}) ✓", *helpers::SUCCESS),
                Err(err) => crashln!("{} {err}", *helpers::FAIL),
            }
        }
        None => {
            let records = sup.store().load();
            logs::flush_all(records.values());
            println!("{} Flushed all logs ✓", *helpers::SUCCESS);
        }
    }
}

pub fn startfile(config: &PathBuf) {
    match supervisor().start_from_config(config) {
        Ok(started) => {
            println!("{} Started {} process(es)", *helpers::SUCCESS, started.len());
            for record in &started {
                println!(
                    "   - {} (pid {})",
                    record.name.cyan(),
                    record.pid.unwrap_or_default()
                );
            }
        }
        Err(err) => crashln!("{} {err}", *helpers::FAIL),
    }
}

pub fn info() {
    let sup = supervisor();
    let views = sup.list();
    let online = views.iter().filter(|view| view.running).count();

    println!("{} Process manager", *helpers::INFO);
    println!("   Home:      {}", sup.home().root().display());
    println!("   Logs:      {}", sup.home().logs_dir().display());
    println!("   Pids:      {}", sup.home().pids_dir().display());
    println!(
        "   Processes: {} total, {} online",
        views.len().to_string().yellow(),
        online.to_string().green()
    );
}
