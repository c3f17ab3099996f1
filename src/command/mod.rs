//! Subcommand handler contract and registration records

use anyhow::Result;
use clap::ArgMatches;

/// A subcommand handler: flag definitions plus the runnable body
///
/// Implementations register their flags on the command they are given and
/// read the parsed values back from the [`ArgMatches`] passed to `run`.
///
/// `flags` must be safe to call more than once on distinct commands: the
/// usage renderer derives help text from a throwaway flag set, separate from
/// the one used for the real parse.
///
/// # Example
/// ```
/// use clap::{Arg, ArgMatches, Command};
/// use subcmd::Subcommand;
///
/// struct Greet;
///
/// impl Subcommand for Greet {
///     fn flags(&self, command: Command) -> Command {
///         command.arg(Arg::new("name").long("name").default_value("world"))
///     }
///
///     fn run(&self, matches: &ArgMatches, _args: &[String]) -> anyhow::Result<()> {
///         println!("hello, {}", matches.get_one::<String>("name").unwrap());
///         Ok(())
///     }
/// }
/// ```
pub trait Subcommand {
    /// Define this subcommand's flags on the given flag set
    ///
    /// The default implementation defines no flags.
    #[inline]
    fn flags(&self, command: clap::Command) -> clap::Command {
        command
    }

    /// Run the subcommand with its parsed flags and leftover positional
    /// arguments
    ///
    /// # Errors
    ///
    /// Return a [`crate::Failure`] to choose the process exit code and
    /// optionally request that usage be printed; any other error exits
    /// with code -1.
    fn run(&self, matches: &ArgMatches, args: &[String]) -> Result<()>;
}

/// A registered subcommand: name, description, handler, required flags
///
/// Immutable once registered; lives as long as the owning
/// [`crate::CommandSet`].
pub struct Registration {
    name: String,
    description: String,
    command: Box<dyn Subcommand>,
    required_flags: Vec<String>,
}

impl Registration {
    pub(crate) fn new(
        name: String,
        description: String,
        command: Box<dyn Subcommand>,
        required_flags: Vec<String>,
    ) -> Self {
        Self {
            name,
            description,
            command,
            required_flags,
        }
    }

    /// The name this subcommand is matched by, verbatim
    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The one-line description shown in the top-level usage listing
    #[must_use]
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Flags that must be explicitly supplied for this subcommand to run
    #[must_use]
    #[inline]
    pub fn required_flags(&self) -> &[String] {
        &self.required_flags
    }

    pub(crate) fn handler(&self) -> &dyn Subcommand {
        self.command.as_ref()
    }
}
