//! Terminal host for the roster.
//!
//! # Responsibility
//! - Drive `RosterController` from line commands on stdin.
//! - Print the table and status messages to stdout.
//!
//! Commands: `list`, `add <name>|<id>|<email>|<contact>`, `edit <index>`,
//! `delete <index>`, `reset`, `help`, `quit`. While editing, `add` submits
//! the update.

use log::{error, info, warn};
use roster_core::{
    open_controller, CommandOutcome, RosterCommand, RosterConfig, RosterController, RosterView,
    SqliteKeyValueStore, StudentFields, TableRow, TableView,
};
use std::io::{self, BufRead, Write};

const HELP: &str = "commands: list | add <name>|<id>|<email>|<contact> | edit <index> | delete <index> | reset | quit";

struct TerminalView<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> RosterView for TerminalView<R, W> {
    fn notify(&mut self, message: &str) {
        report_output(writeln!(self.output, "* {message}"));
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        report_output(
            write!(self.output, "{prompt} [y/N] ").and_then(|()| self.output.flush()),
        );
        let mut answer = String::new();
        if let Err(err) = self.input.read_line(&mut answer) {
            warn!("event=cli_input module=cli status=error error={err}");
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }

    fn render(&mut self, table: &TableView) {
        report_output(write_table(&mut self.output, table));
    }
}

/// View callbacks cannot fail, so write errors are logged and dropped.
fn report_output(result: io::Result<()>) {
    if let Err(err) = result {
        warn!("event=cli_output module=cli status=error error={err}");
    }
}

fn write_table(out: &mut impl Write, table: &TableView) -> io::Result<()> {
    for row in table.rows() {
        match row {
            TableRow::Placeholder { message } => writeln!(out, "  ({message})")?,
            TableRow::Data { index, cells, .. } => writeln!(
                out,
                "  [{index}] {:<24} {:<8} {:<28} {}",
                cells[0], cells[1], cells[2], cells[3]
            )?,
        }
    }
    Ok(())
}

fn parse_fields(args: &str) -> StudentFields {
    let mut parts = args.splitn(4, '|');
    let mut next = || parts.next().unwrap_or_default().to_string();
    let name = next();
    let student_id = next();
    let email = next();
    let contact = next();
    StudentFields::new(name, student_id, email, contact)
}

fn parse_command(line: &str) -> Result<Option<RosterCommand>, String> {
    let (verb, args) = line
        .trim()
        .split_once(' ')
        .unwrap_or((line.trim(), ""));
    let index = || {
        args.trim()
            .parse::<usize>()
            .map_err(|_| format!("`{verb}` expects a row index, got `{}`", args.trim()))
    };
    match verb {
        "add" | "submit" => Ok(Some(RosterCommand::Submit(parse_fields(args)))),
        "edit" => Ok(Some(RosterCommand::Edit(index()?))),
        "delete" => Ok(Some(RosterCommand::Delete(index()?))),
        "reset" => Ok(Some(RosterCommand::Reset)),
        "list" | "" => Ok(None),
        other => Err(format!("unknown command `{other}`; {HELP}")),
    }
}

fn run(
    controller: &mut RosterController<SqliteKeyValueStore>,
    view: &mut TerminalView<impl BufRead, impl Write>,
) -> io::Result<()> {
    controller.start(view);
    loop {
        write!(view.output, "{}> ", controller.submit_label())?;
        view.output.flush()?;
        let mut line = String::new();
        if view.input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        match line.trim() {
            "quit" | "exit" => return Ok(()),
            "help" => {
                writeln!(view.output, "{HELP}")?;
                continue;
            }
            _ => {}
        }

        match parse_command(&line) {
            Ok(Some(command)) => match controller.dispatch(command, view) {
                Ok(CommandOutcome::EditStarted(index)) => {
                    let form = controller.form();
                    writeln!(
                        view.output,
                        "  editing [{index}]: {}|{}|{}|{}",
                        form.name, form.student_id, form.email, form.contact
                    )?;
                }
                Ok(_) => {}
                Err(err) => error!("event=cli_command module=cli status=error error={err}"),
            },
            Ok(None) => write_table(&mut view.output, &controller.table())?,
            Err(message) => writeln!(view.output, "{message}")?,
        }
    }
}

fn main() {
    if std::env::args().any(|arg| arg == "--version") {
        println!("roster_core ping={}", roster_core::ping());
        println!("roster_core version={}", roster_core::core_version());
        return;
    }

    let config = RosterConfig::from_env();
    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = roster_core::init_logging(&config.log_level, &log_dir.to_string_lossy()) {
            eprintln!("logging disabled: {err}");
        }
    }

    let mut controller = match open_controller(&config) {
        Ok(controller) => controller,
        Err(err) => {
            eprintln!("failed to open roster at `{}`: {err}", config.db_path.display());
            std::process::exit(1);
        }
    };
    info!(
        "event=cli_start module=cli status=ok count={}",
        controller.store().len()
    );

    let stdin = io::stdin();
    let mut view = TerminalView {
        input: stdin.lock(),
        output: io::stdout(),
    };
    if let Err(err) = run(&mut controller, &mut view) {
        eprintln!("roster session ended with error: {err}");
        std::process::exit(1);
    }
}
