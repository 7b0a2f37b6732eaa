use checklist_cli::cli::{Cli, Command};
use checklist_core::config::{self, Palette};
use checklist_core::error::AppError;
use checklist_core::model::{Filter, Task};
use checklist_core::session::Session;
use clap::{CommandFactory, Parser};
use std::io::{self, BufRead};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

fn status_label(completed: bool) -> &'static str {
    if completed { "completed" } else { "pending" }
}

fn created_display(raw: &str) -> String {
    match OffsetDateTime::parse(raw, &Rfc3339) {
        Ok(parsed) => parsed
            .format(&format_description!("[year]-[month]-[day] [hour]:[minute]"))
            .unwrap_or_else(|_| raw.to_string()),
        Err(_) => raw.to_string(),
    }
}

#[derive(Tabled)]
struct TaskRow {
    id: u64,
    task: String,
    status: &'static str,
    created: String,
}

fn empty_message(filter: Filter) -> &'static str {
    match filter {
        Filter::All => "no tasks yet, add one to get started",
        Filter::Pending => "no pending tasks",
        Filter::Completed => "no completed tasks",
    }
}

fn render_list(session: &Session, json: bool, palette: &Palette) {
    if json {
        let payload: Vec<serde_json::Value> = session
            .filtered()
            .map(|task| {
                serde_json::json!({
                    "id": task.id,
                    "text": task.text,
                    "completed": task.completed,
                    "createdAt": task.created_at,
                })
            })
            .collect();
        println!("{}", serde_json::Value::Array(payload));
        return;
    }

    let rows: Vec<TaskRow> = session
        .filtered()
        .map(|task| TaskRow {
            id: task.id,
            task: task.text.clone(),
            status: status_label(task.completed),
            created: created_display(&task.created_at),
        })
        .collect();

    if rows.is_empty() {
        println!("{}", palette.muted(empty_message(session.filter())));
    } else {
        let mut table = Table::new(rows);
        table.with(Style::sharp());
        println!("{}", table);
    }

    let stats = session.stats();
    println!(
        "{}",
        palette.accent(&format!(
            "{} tasks, {} completed",
            stats.total, stats.completed
        ))
    );
}

fn print_task_json(task: &Task) {
    let json = serde_json::json!({
        "id": task.id,
        "text": task.text,
        "completed": task.completed,
        "createdAt": task.created_at,
    });
    println!("{}", json);
}

fn report_storage(session: &Session) {
    if let Some(err) = session.storage_error() {
        eprintln!("WARNING: {}", err);
    }
}

fn run_command(cli: Cli, session: &mut Session, palette: &Palette) -> Result<(), AppError> {
    match cli.command {
        Command::Add { text } => {
            let text = match text {
                Some(value) if !value.trim().is_empty() => value,
                _ => return Err(AppError::invalid_input("task text is required")),
            };

            let task = session.add(&text)?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Added task: {} ({})", task.text, task.id);
            }
        }
        Command::Toggle { id } => match session.toggle(id) {
            Some(task) => {
                if cli.json {
                    print_task_json(&task);
                } else {
                    println!(
                        "Toggled task: {} ({}) - {}",
                        task.text,
                        task.id,
                        status_label(task.completed)
                    );
                }
            }
            None => {
                if cli.json {
                    println!("null");
                } else {
                    println!("No task with id {}", id);
                }
            }
        },
        Command::Delete { id } => match session.delete(id) {
            Some(task) => {
                if cli.json {
                    print_task_json(&task);
                } else {
                    println!("Deleted task: {} ({})", task.text, task.id);
                }
            }
            None => {
                if cli.json {
                    println!("null");
                } else {
                    println!("No task with id {}", id);
                }
            }
        },
        Command::Clear => {
            let removed = session.clear_completed();
            if cli.json {
                println!("{}", serde_json::json!({ "cleared": removed }));
            } else if removed == 0 {
                println!("No completed tasks to clear");
            } else {
                println!("Cleared {} completed tasks", removed);
            }
        }
        Command::Filter { filter } => {
            session.set_filter(filter.into());
            render_list(session, cli.json, palette);
        }
        Command::List { filter } => {
            if let Some(filter) = filter {
                session.set_filter(filter.into());
            }
            render_list(session, cli.json, palette);
        }
        Command::Stats => {
            let stats = session.stats();
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({ "total": stats.total, "completed": stats.completed })
                );
            } else {
                println!("{} tasks, {} completed", stats.total, stats.completed);
            }
        }
    }

    Ok(())
}

fn command_mutates(command: &Command) -> bool {
    matches!(
        command,
        Command::Add { .. } | Command::Toggle { .. } | Command::Delete { .. } | Command::Clear
    )
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(current.clone());
                current.clear();
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn run_interactive() -> Result<(), AppError> {
    let config_load = config::load_config_with_fallback();
    if let Some(err) = config_load.error {
        eprintln!("WARNING: {}", err);
    }
    let palette = config::palette_for_theme(config_load.config.theme.as_deref());
    let aliases = config_load.config.aliases;

    let mut session = Session::open_default()?;
    report_storage(&session);
    render_list(&session, false, &palette);

    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("checklist".to_string());
        match aliases.get(&args[0]) {
            Some(expansion) => {
                match split_command_line(expansion) {
                    Ok(expanded) => argv.extend(expanded),
                    Err(err) => {
                        eprintln!("ERROR: {}", err);
                        continue;
                    }
                }
                argv.extend(args.into_iter().skip(1));
            }
            None => argv.extend(args),
        }

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        let json = cli.json;
        let rerender = command_mutates(&cli.command) && !json;
        match run_command(cli, &mut session, &palette) {
            Ok(()) => {
                if rerender {
                    render_list(&session, false, &palette);
                }
            }
            Err(err) => eprintln!("ERROR: {}", err),
        }
        report_storage(&session);
    }

    if let Err(err) = session.flush() {
        eprintln!("WARNING: {}", err);
    }

    Ok(())
}

fn run_once(cli: Cli) -> Result<(), AppError> {
    let config_load = config::load_config_with_fallback();
    if let Some(err) = config_load.error {
        eprintln!("WARNING: {}", err);
    }
    let palette = config::palette_for_theme(config_load.config.theme.as_deref());

    let mut session = Session::open_default()?;
    let result = run_command(cli, &mut session, &palette);
    report_storage(&session);
    result
}

fn main() {
    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive() {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
        Err(err) => {
            // --help and --version land here
            let _ = err.print();
            return;
        }
    };

    if let Err(err) = run_once(cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
