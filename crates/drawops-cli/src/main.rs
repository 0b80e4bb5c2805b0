use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use drawops_cli::commands::{self, SanitizeOptions};
use std::path::PathBuf;

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .value_name("PATH")
        .value_parser(value_parser!(PathBuf))
        .help("TOML file overriding the default limits")
}

fn cli() -> Command {
    Command::new("drawops")
        .version(drawops_sanitize::VERSION)
        .about("Recover bounded drawing operations from model output")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Write logs to stderr as JSON lines"),
        )
        .subcommand(
            Command::new("sanitize")
                .about("Sanitize a raw model response into {\"operations\": [...]}")
                .arg(
                    Arg::new("file")
                        .value_name("FILE")
                        .value_parser(value_parser!(PathBuf))
                        .help("Response text to read; stdin when omitted or '-'"),
                )
                .arg(config_arg())
                .arg(
                    Arg::new("report")
                        .long("report")
                        .action(ArgAction::SetTrue)
                        .help("Print the full report, including dropped candidates"),
                )
                .arg(
                    Arg::new("pretty")
                        .long("pretty")
                        .action(ArgAction::SetTrue)
                        .help("Indent the JSON output"),
                ),
        )
        .subcommand(
            Command::new("prompt")
                .about("Print the instruction text for a user request")
                .arg(
                    Arg::new("text")
                        .value_name("TEXT")
                        .required(true)
                        .help("What the user asked to draw"),
                )
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("limits")
                .about("Print the effective limits as TOML")
                .arg(config_arg()),
        )
}

fn run(matches: &ArgMatches) -> Result<()> {
    let Some((name, args)) = matches.subcommand() else {
        return Ok(());
    };
    let limits = commands::load_limits(args.get_one::<PathBuf>("config").map(PathBuf::as_path))?;

    let output = match name {
        "sanitize" => {
            let raw = commands::read_input(args.get_one::<PathBuf>("file").map(PathBuf::as_path))?;
            let options = SanitizeOptions {
                report: args.get_flag("report"),
                pretty: args.get_flag("pretty"),
            };
            commands::sanitize(&raw, limits, options)?
        }
        "prompt" => {
            let text = args
                .get_one::<String>("text")
                .context("missing prompt text")?;
            commands::prompt(text, &limits)
        }
        "limits" => commands::limits(&limits)?,
        other => anyhow::bail!("unknown subcommand {other}"),
    };

    println!("{}", output.trim_end());
    Ok(())
}

fn main() {
    let matches = cli().get_matches();
    drawops_cli::init_tracing(matches.get_flag("log-json"));

    if let Err(e) = run(&matches) {
        tracing::error!(error = %e, "command failed");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
