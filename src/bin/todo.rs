// Binary entry point for the command-line front end.
use anyhow::{Result, bail};
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use todotxt::cli::print_help;
use todotxt::config::Config;
use todotxt::context::StandardContext;
use todotxt::controller::IndicatorController;

struct Args {
    file: Option<PathBuf>,
    root: Option<PathBuf>,
    verbose: bool,
    command: Vec<String>,
}

fn parse_args(raw: &[String]) -> Result<Option<Args>> {
    let mut args = Args {
        file: None,
        root: None,
        verbose: false,
        command: Vec::new(),
    };

    let mut i = 0;
    while i < raw.len() {
        match raw[i].as_str() {
            "--help" | "-h" => return Ok(None),
            flag @ ("--file" | "-f" | "--root" | "-r") => {
                let Some(value) = raw.get(i + 1) else {
                    bail!("{} needs a path", flag);
                };
                let target = if matches!(flag, "--file" | "-f") {
                    &mut args.file
                } else {
                    &mut args.root
                };
                *target = Some(PathBuf::from(value));
                i += 1; // Also consumed the value
            }
            "--verbose" | "-v" => args.verbose = true,
            _ => {
                // Everything from the first positional on belongs to the command.
                args.command = raw[i..].to_vec();
                break;
            }
        }
        i += 1;
    }
    Ok(Some(args))
}

fn init_logging(level: LevelFilter) {
    let config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();
    // A second logger (or no terminal) is not worth failing the command over.
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn run(args: Args) -> Result<()> {
    let ctx = StandardContext::new(args.root);
    let config = Config::load_or_default(&ctx)?;
    init_logging(if args.verbose {
        LevelFilter::Debug
    } else {
        config.log_level_filter()
    });

    let mut controller = IndicatorController::open(&ctx, config, args.file)?;

    let (cmd, rest) = match args.command.split_first() {
        Some((cmd, rest)) => (cmd.as_str(), rest.join(" ")),
        None => ("list", String::new()),
    };

    match cmd {
        "list" | "ls" => {
            for entry in controller.entries() {
                let mark = if entry.enabled { "[ ]" } else { "[x]" };
                println!("{} {}", mark, entry.label);
            }
        }
        "add" | "a" => {
            if !controller.add(&rest)? {
                bail!("Nothing to add: the line is blank");
            }
        }
        "do" => {
            if controller.check_off(&rest)? == 0 {
                bail!("No entry reads exactly '{}'", rest);
            }
        }
        "done" => {
            if controller.complete_text(&rest)? == 0 {
                bail!("No item has the text '{}'", rest);
            }
        }
        "rm" | "del" => {
            let n = controller.remove(&rest)?;
            println!("Removed {} item(s)", n);
        }
        "archive" => {
            let n = controller.archive()?;
            println!("Removed {} completed item(s)", n);
        }
        "sort" => controller.sort()?,
        "edit" => controller.edit()?,
        "export" => {
            println!("{}", serde_json::to_string_pretty(controller.list.items())?);
        }
        "path" => {
            if let Some(p) = controller.path() {
                println!("{}", p.display());
            }
        }
        "help" => print_help("todo"),
        other => bail!("Unknown command '{}'. See 'todo --help'.", other),
    }
    Ok(())
}

fn main() -> ExitCode {
    let raw: Vec<String> = env::args().skip(1).collect();

    let args = match parse_args(&raw) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_help("todo");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
