//! Subcommand registry and dispatch
//!
//! [`CommandSet`] owns the ordered collection of registered subcommands and
//! drives the whole cycle: match the first positional token, parse the rest
//! against the matched subcommand's flag set, enforce required flags, then
//! invoke the handler. Flag definition and parsing are delegated to clap;
//! process exit stays with the embedding program, which maps
//! [`DispatchError::exit_code`] to `process::exit`.

mod usage;

use crate::command::{Registration, Subcommand};
use crate::error::{DispatchError, Failure};
use crate::sink::{Sink, StdSink};
use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{Arg, ArgMatches};
use std::sync::Arc;
use tracing::debug;

/// Hidden trailing positional that collects leftover arguments for the
/// handler. Handlers define named flags only; positionals are delivered
/// through `Subcommand::run`.
const LEFTOVER_ARGS: &str = "args";

type PostParseHook = Box<dyn Fn(&ArgMatches)>;

/// An ordered registry of subcommands plus the state of one dispatch cycle
///
/// Construct one per program (or per test), register subcommands during
/// initialization, then `parse` and `run` exactly once per invocation.
/// Parsing again resets the dispatch state.
///
/// # Example
/// ```no_run
/// use subcmd::CommandSet;
/// # use clap::ArgMatches;
/// # struct Status;
/// # impl subcmd::Subcommand for Status {
/// #     fn run(&self, _: &ArgMatches, _: &[String]) -> anyhow::Result<()> { Ok(()) }
/// # }
///
/// let mut commands = CommandSet::new("tool");
/// commands.register("status", "Show current status", Status, &[]);
/// if let Err(err) = commands.parse_and_run_from_env() {
///     std::process::exit(err.exit_code());
/// }
/// ```
pub struct CommandSet {
    program: String,
    global: Option<clap::Command>,
    commands: Vec<Registration>,
    default_command: Option<String>,
    post_parse_hook: Option<PostParseHook>,
    sink: Arc<dyn Sink>,

    // State of the current parse cycle
    matched: Option<usize>,
    matches: Option<ArgMatches>,
    args: Vec<String>,
    help_requested: bool,
}

impl CommandSet {
    /// Create an empty command set for the named program
    #[must_use]
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
            global: None,
            commands: Vec::new(),
            default_command: None,
            post_parse_hook: None,
            sink: Arc::new(StdSink::new()),
            matched: None,
            matches: None,
            args: Vec::new(),
            help_requested: false,
        }
    }

    /// Attach the program's global flag set
    ///
    /// The set is owned by the caller's configuration; the dispatcher reads
    /// it when rendering top-level usage and when splitting global flags
    /// from the subcommand invocation in [`Self::parse_global`].
    #[must_use]
    pub fn with_global_flags(mut self, flags: clap::Command) -> Self {
        self.global = Some(flags);
        self
    }

    /// Redirect normal and error/usage output to the given sink
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = sink;
        self
    }

    /// Subcommand to substitute when no arguments are given
    #[must_use]
    pub fn with_default_command<S: Into<String>>(mut self, name: S) -> Self {
        self.default_command = Some(name.into());
        self
    }

    /// Hook invoked by [`Self::parse_global`] after global-flag parsing and
    /// before subcommand dispatch, so the caller can branch on global flags
    #[must_use]
    pub fn with_post_parse_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ArgMatches) + 'static,
    {
        self.post_parse_hook = Some(Box::new(hook));
        self
    }

    /// Register a subcommand under a unique name
    ///
    /// Registration order is preserved and determines the usage listing
    /// order. `required_flags` names flags the invoker must explicitly
    /// supply for the subcommand to run.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already registered. A duplicate name is a
    /// programming mistake in the embedding program, not a runtime
    /// condition.
    pub fn register<S, D>(
        &mut self,
        name: S,
        description: D,
        command: impl Subcommand + 'static,
        required_flags: &[&str],
    ) where
        S: Into<String>,
        D: Into<String>,
    {
        let name = name.into();
        assert!(
            self.lookup(&name).is_none(),
            "subcommand '{name}' is already registered"
        );
        self.commands.push(Registration::new(
            name,
            description.into(),
            Box::new(command),
            required_flags.iter().map(|flag| (*flag).to_owned()).collect(),
        ));
    }

    /// Find a registration by exact, case-sensitive name
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Registration> {
        self.commands.iter().find(|reg| reg.name() == name)
    }

    /// The subcommand matched by the last parse, if any
    #[must_use]
    pub fn matched(&self) -> Option<&Registration> {
        self.matched.map(|idx| &self.commands[idx])
    }

    /// Positional arguments left over after flag parsing
    #[must_use]
    pub fn leftover_args(&self) -> &[String] {
        &self.args
    }

    /// Whether the last parse saw a help flag for the matched subcommand
    #[must_use]
    pub const fn help_requested(&self) -> bool {
        self.help_requested
    }

    /// Match `args` against the registered subcommands
    ///
    /// `args[0]` selects the subcommand; the rest is parsed against its flag
    /// set. On success the dispatch state is ready for [`Self::run`].
    ///
    /// A help flag (`-h`/`--help`) short-circuits: the match is recorded,
    /// required-flag validation is skipped, and `run` will render the
    /// subcommand usage instead of invoking the handler.
    ///
    /// With an empty registry this is a silent no-op: the program is using
    /// only global flags.
    ///
    /// # Errors
    ///
    /// Returns a usage error (exit code 1) after writing the relevant usage
    /// text to the error sink:
    /// - [`DispatchError::NoSubcommand`] when `args` is empty and no default
    ///   command is configured
    /// - [`DispatchError::UnknownSubcommand`] when `args[0]` matches nothing
    /// - [`DispatchError::InvalidArguments`] when the flag adapter rejects
    ///   the subcommand's arguments
    /// - [`DispatchError::MissingFlags`] when a required flag was not
    ///   explicitly supplied
    pub fn parse(&mut self, args: &[String]) -> Result<(), DispatchError> {
        if self.commands.is_empty() {
            return Ok(());
        }

        self.matched = None;
        self.matches = None;
        self.args.clear();
        self.help_requested = false;

        let args = if args.is_empty() {
            match &self.default_command {
                Some(name) => vec![name.clone()],
                None => {
                    self.usage();
                    return Err(DispatchError::NoSubcommand);
                }
            }
        } else {
            args.to_vec()
        };

        let name = &args[0];
        let Some(idx) = self.commands.iter().position(|reg| reg.name() == name.as_str()) else {
            self.usage();
            return Err(DispatchError::UnknownSubcommand { name: name.clone() });
        };

        let flag_set = self.commands[idx]
            .handler()
            .flags(clap::Command::new(name.clone()).no_binary_name(true))
            .arg(
                Arg::new(LEFTOVER_ARGS)
                    .num_args(0..)
                    .trailing_var_arg(true)
                    .value_name("ARGS")
                    .hide(true),
            );

        let matches = match flag_set.try_get_matches_from(&args[1..]) {
            Ok(matches) => matches,
            Err(err) if err.kind() == ErrorKind::DisplayHelp => {
                debug!(subcommand = %name, "help requested");
                self.matched = Some(idx);
                self.help_requested = true;
                return Ok(());
            }
            Err(err) => {
                let message = err.to_string();
                self.sink
                    .err_line(message.lines().next().unwrap_or("invalid arguments"));
                let text = self.render_subcommand_usage(&self.commands[idx]);
                self.sink.err(&text);
                return Err(DispatchError::invalid_arguments(name.clone(), message));
            }
        };

        let leftover: Vec<String> = matches
            .get_many::<String>(LEFTOVER_ARGS)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        let missing: Vec<String> = self.commands[idx]
            .required_flags()
            .iter()
            .filter(|flag| !explicitly_set(&matches, flag))
            .cloned()
            .collect();
        if !missing.is_empty() {
            let text = self.render_subcommand_usage(&self.commands[idx]);
            self.sink.err(&text);
            return Err(DispatchError::MissingFlags {
                command: name.clone(),
                missing,
            });
        }

        debug!(subcommand = %name, leftover = leftover.len(), "matched subcommand");
        self.args = leftover;
        self.matches = Some(matches);
        self.matched = Some(idx);
        Ok(())
    }

    /// Invoke the matched subcommand's handler
    ///
    /// A no-op when nothing matched (empty registry, or a parse that already
    /// failed). If help was requested, renders the subcommand usage and
    /// returns without calling into the handler.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Handler`] when the handler fails, after
    /// writing `FATAL: <message>` to the error sink. A handler returning a
    /// [`Failure`] chooses the exit code and whether usage is rendered after
    /// the diagnostic; any other error maps to exit code -1.
    pub fn run(&self) -> Result<(), DispatchError> {
        let Some(idx) = self.matched else {
            return Ok(());
        };
        let reg = &self.commands[idx];

        if self.help_requested {
            let text = self.render_subcommand_usage(reg);
            self.sink.err(&text);
            return Ok(());
        }

        let Some(matches) = self.matches.as_ref() else {
            return Ok(());
        };

        if let Err(err) = reg.handler().run(matches, &self.args) {
            let failure = err.downcast_ref::<Failure>();
            let code = failure.map_or(-1, |f| f.code);
            let help = failure.is_some_and(|f| f.help);

            self.sink.err_line(&format!("FATAL: {err}"));
            if help {
                let text = self.render_subcommand_usage(reg);
                self.sink.err(&text);
            }
            return Err(DispatchError::Handler {
                code,
                message: err.to_string(),
            });
        }
        Ok(())
    }

    /// Parse `args` and run the matched subcommand
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`Self::parse`] or [`Self::run`].
    pub fn parse_and_run(&mut self, args: &[String]) -> Result<(), DispatchError> {
        self.parse(args)?;
        self.run()
    }

    /// Parse the program's global flags first, then dispatch the remainder
    ///
    /// The global flag set runs in external-subcommand mode: flags before
    /// the first free token are parsed as global flags, and everything from
    /// that token on is handed to [`Self::parse`] untouched. The post-parse
    /// hook, if configured, sees the global matches before dispatch.
    ///
    /// A global `--help` renders top-level usage and matches nothing; a
    /// global `--version` (when the flag set defines a version) writes the
    /// version text to the normal output stream.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidArguments`] when the global flag set
    /// rejects the arguments, plus anything [`Self::parse`] returns.
    pub fn parse_global(&mut self, args: &[String]) -> Result<(), DispatchError> {
        let global = self
            .global
            .clone()
            .unwrap_or_else(|| clap::Command::new(self.program.clone()))
            .no_binary_name(true)
            .allow_external_subcommands(true)
            .external_subcommand_value_parser(clap::value_parser!(String));

        let matches = match global.try_get_matches_from(args) {
            Ok(matches) => matches,
            Err(err) if err.kind() == ErrorKind::DisplayHelp => {
                self.usage();
                return Ok(());
            }
            Err(err) if err.kind() == ErrorKind::DisplayVersion => {
                self.sink.out(&err.to_string());
                return Ok(());
            }
            Err(err) => {
                let message = err.to_string();
                self.sink
                    .err_line(message.lines().next().unwrap_or("invalid arguments"));
                self.usage();
                return Err(DispatchError::invalid_arguments(
                    self.program.clone(),
                    message,
                ));
            }
        };

        let rest: Vec<String> = match matches.subcommand() {
            Some((name, sub)) => std::iter::once(name.to_owned())
                .chain(
                    sub.get_many::<String>("")
                        .map(|values| values.cloned().collect::<Vec<_>>())
                        .unwrap_or_default(),
                )
                .collect(),
            None => Vec::new(),
        };

        if let Some(hook) = &self.post_parse_hook {
            hook(&matches);
        }

        self.parse(&rest)
    }

    /// [`Self::parse_global`] over the real process arguments
    ///
    /// # Errors
    ///
    /// See [`Self::parse_global`].
    pub fn parse_from_env(&mut self) -> Result<(), DispatchError> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        self.parse_global(&args)
    }

    /// Parse the real process arguments and run the matched subcommand
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`Self::parse_from_env`] or
    /// [`Self::run`].
    pub fn parse_and_run_from_env(&mut self) -> Result<(), DispatchError> {
        self.parse_from_env()?;
        self.run()
    }
}

/// Whether the invoker explicitly supplied `flag` on the command line.
/// A name the handler never defined cannot have been supplied.
fn explicitly_set(matches: &ArgMatches, flag: &str) -> bool {
    if matches.try_contains_id(flag).is_err() {
        return false;
    }
    matches.value_source(flag) == Some(ValueSource::CommandLine)
}
