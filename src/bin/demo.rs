//! Demonstration binary for `subcmd`
//!
//! Registers a few subcommands and wires dispatch errors to process exit
//! codes. Also exercised end-to-end by the CLI integration tests.

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use subcmd::{CommandSet, Failure, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

/// Print a greeting, using leftover arguments as extra recipients
struct Greet;

impl Subcommand for Greet {
    fn flags(&self, command: Command) -> Command {
        command
            .arg(
                Arg::new("greeting")
                    .long("greeting")
                    .value_name("WORD")
                    .default_value("hello")
                    .help("Greeting word to use"),
            )
            .arg(
                Arg::new("name")
                    .long("name")
                    .value_name("NAME")
                    .default_value("world")
                    .help("Who to greet"),
            )
    }

    fn run(&self, matches: &ArgMatches, args: &[String]) -> Result<()> {
        let greeting = matches
            .get_one::<String>("greeting")
            .map_or("hello", String::as_str);
        let name = matches
            .get_one::<String>("name")
            .map_or("world", String::as_str);

        println!("{greeting}, {name}!");
        for extra in args {
            println!("{greeting}, {extra}!");
        }
        Ok(())
    }
}

/// Copy a source to a target; both flags are required at registration
struct Copy;

impl Subcommand for Copy {
    fn flags(&self, command: Command) -> Command {
        command
            .arg(
                Arg::new("source")
                    .long("source")
                    .value_name("PATH")
                    .help("Source path to copy from"),
            )
            .arg(
                Arg::new("target")
                    .long("target")
                    .value_name("PATH")
                    .help("Target path to copy to"),
            )
    }

    fn run(&self, matches: &ArgMatches, _args: &[String]) -> Result<()> {
        let source = matches
            .get_one::<String>("source")
            .map_or("", String::as_str);
        let target = matches
            .get_one::<String>("target")
            .map_or("", String::as_str);

        println!("copying {source} -> {target}");
        Ok(())
    }
}

/// Always fail, demonstrating handler-chosen exit codes
struct Fail;

impl Subcommand for Fail {
    fn flags(&self, command: Command) -> Command {
        command
            .arg(
                Arg::new("code")
                    .long("code")
                    .value_name("CODE")
                    .value_parser(clap::value_parser!(i32))
                    .default_value("3")
                    .help("Exit code to fail with"),
            )
            .arg(
                Arg::new("show-usage")
                    .long("show-usage")
                    .action(ArgAction::SetTrue)
                    .help("Also print this subcommand's usage"),
            )
    }

    fn run(&self, matches: &ArgMatches, _args: &[String]) -> Result<()> {
        let code = matches.get_one::<i32>("code").copied().unwrap_or(3);
        let mut failure = Failure::new(code, "bad input");
        if matches.get_flag("show-usage") {
            failure = failure.with_help();
        }
        Err(failure.into())
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_target(false).with_env_filter(filter).init();

    let global = Command::new("subcmd-demo").arg(
        Arg::new("verbose")
            .long("verbose")
            .action(ArgAction::SetTrue)
            .help("Enable verbose logging output"),
    );

    let mut commands = CommandSet::new("subcmd-demo")
        .with_global_flags(global)
        .with_post_parse_hook(|matches| {
            if matches.get_flag("verbose") {
                debug!("verbose output enabled");
            }
        });

    commands.register("greet", "Print a greeting", Greet, &[]);
    commands.register("copy", "Copy a source to a target", Copy, &["source", "target"]);
    commands.register("fail", "Always fail, with a configurable exit code", Fail, &[]);

    if let Err(err) = commands.parse_and_run_from_env() {
        std::process::exit(err.exit_code());
    }
}
