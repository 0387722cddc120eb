use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use minirel::{Command, Database, Outcome, RowSet, parser};

/// In-memory relational store with a line-command interface.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script file of commands to run instead of an interactive session
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Skip confirmation prompts for drop_table and delete
    #[arg(short = 'y', long)]
    yes: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut db = Database::new();

    if let Some(ref path) = args.script {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                eprintln!("cannot read script '{}': {}", path.display(), err);
                return;
            }
        };
        // Scripts never prompt
        for line in source.lines() {
            if !run_line(&mut db, line, true) {
                break;
            }
        }
        return;
    }

    println!("minirel (type 'help' for commands, 'exit' to leave)");
    repl(&mut db, args.yes);
}

/// The interactive read loop: one command per line, executed to completion
/// before the next is read.
fn repl(db: &mut Database, assume_yes: bool) {
    let stdin = io::stdin();
    loop {
        print!("db> ");
        io::stdout().flush().unwrap();

        let Some(Ok(line)) = stdin.lock().lines().next() else {
            break; // EOF
        };
        if !run_line(db, &line, assume_yes) {
            break;
        }
    }
}

/// Parses, optionally confirms, executes and renders one line.
/// Returns false when the session should end.
fn run_line(db: &mut Database, line: &str, assume_yes: bool) -> bool {
    let line = line.trim();
    if line.is_empty() {
        return true;
    }

    let command = match parser::parse(line) {
        Ok(command) => command,
        Err(err) => {
            println!("error: {}", err);
            return true;
        }
    };

    if !assume_yes {
        if let Some(action) = confirmation_prompt(&command) {
            if !confirm(&action) {
                println!("cancelled");
                return true;
            }
        }
    }

    match db.execute(command) {
        Ok(Outcome::Exit) => false,
        Ok(outcome) => {
            render(&outcome);
            true
        }
        Err(err) => {
            println!("error: {}", err);
            true
        }
    }
}

/// Destructive commands ask before running.
fn confirmation_prompt(command: &Command) -> Option<String> {
    match command {
        Command::DropTable { name } => Some(format!("drop table '{}'", name)),
        Command::Delete { table, .. } => Some(format!("delete rows from '{}'", table)),
        _ => None,
    }
}

fn confirm(action: &str) -> bool {
    print!("really {}? [y/N] ", action);
    io::stdout().flush().unwrap();

    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn render(outcome: &Outcome) {
    match outcome {
        Outcome::TableCreated(schema) => println!("created table {}", schema),
        Outcome::Tables(schemas) => {
            if schemas.is_empty() {
                println!("no tables defined");
            } else {
                for schema in schemas {
                    println!("  - {}", schema);
                }
            }
        }
        Outcome::TableDropped(name) => println!("dropped table '{}'", name),
        Outcome::Inserted(set) => render_row_set(set),
        Outcome::Rows(set) => {
            if set.rows.is_empty() {
                println!("no rows found");
            } else {
                render_row_set(set);
            }
        }
        Outcome::Updated(count) => println!("{} row(s) updated", count),
        Outcome::Deleted(count) => println!("{} row(s) deleted", count),
        Outcome::Help => print_help(),
        Outcome::Exit => {}
    }
}

/// Prints a row set as an aligned text table.
fn render_row_set(set: &RowSet) {
    let mut widths: Vec<usize> = set.columns.iter().map(|c| c.len()).collect();
    let rows: Vec<Vec<String>> = set
        .rows
        .iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();

    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    for (&width, name) in widths.iter().zip(&set.columns) {
        print!("{:<1$}  ", name, width);
    }
    println!();
    println!("{}", "-".repeat(widths.iter().sum::<usize>() + 2 * widths.len()));
    for row in &rows {
        for (&width, cell) in widths.iter().zip(row) {
            print!("{:<1$}  ", cell, width);
        }
        println!();
    }
}

fn print_help() {
    let commands = [
        (
            "create_table <table> <col:type> ...",
            "define a table (types: int, str, bool)",
        ),
        ("list_tables", "list defined tables"),
        ("drop_table <table>", "remove a table and its rows"),
        (
            "insert into <table> values (<v>, ...)",
            "add a row (ID is assigned automatically)",
        ),
        (
            "select from <table> [where <col> = <v>]",
            "show matching rows",
        ),
        (
            "update <table> set <col> = <v> where <col> = <v>",
            "change matching rows",
        ),
        (
            "delete from <table> where <col> = <v>",
            "remove matching rows",
        ),
        ("help", "show this summary"),
        ("exit | quit", "end the session"),
    ];

    println!("commands:");
    for (usage, description) in commands {
        println!("  {:<48} - {}", usage, description);
    }
}
