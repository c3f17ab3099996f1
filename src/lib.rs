//! # `subcmd`
//!
//! `subcmd` is a small library for registering and dispatching subcommands
//! in command-line programs: `tool status`, `tool pull --tag v1`, and so on.
//! Each subcommand owns its flag set and may declare flags the invoker must
//! explicitly supply.
//!
//! ## Features
//! - Ordered registry with unique names; registration order drives the usage
//!   listing.
//! - Flag definition and parsing delegated to clap's builder API; handlers
//!   read parsed values from `ArgMatches`.
//! - Required-flag enforcement against the flags actually supplied on the
//!   command line.
//! - Help interception: `-h`/`--help` renders the subcommand usage without
//!   running the handler.
//! - Handler failures map to process exit codes (`Failure` picks the code,
//!   anything else exits -1); usage errors map to exit code 1.
//! - Swappable output sinks, so tests capture usage and diagnostics in
//!   memory.
//!
//! ## Usage
//!
//! ```no_run
//! use clap::{Arg, ArgMatches, Command};
//! use subcmd::{CommandSet, Subcommand};
//!
//! struct Pull;
//!
//! impl Subcommand for Pull {
//!     fn flags(&self, command: Command) -> Command {
//!         command.arg(Arg::new("tag").long("tag").help("Git reference to pull"))
//!     }
//!
//!     fn run(&self, matches: &ArgMatches, args: &[String]) -> anyhow::Result<()> {
//!         let tag = matches.get_one::<String>("tag").map_or("main", String::as_str);
//!         println!("pulling {tag}: {args:?}");
//!         Ok(())
//!     }
//! }
//!
//! let mut commands = CommandSet::new("tool");
//! commands.register("pull", "Fetch components from a repository", Pull, &["tag"]);
//! if let Err(err) = commands.parse_and_run_from_env() {
//!     std::process::exit(err.exit_code());
//! }
//! ```

pub mod command;
pub mod dispatch;
pub mod error;
pub mod sink;

pub use command::{Registration, Subcommand};
pub use dispatch::CommandSet;
pub use error::{DispatchError, Failure};
pub use sink::{MemorySink, Sink, StdSink};
