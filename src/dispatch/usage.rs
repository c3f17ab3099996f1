//! Usage rendering for the command set and individual subcommands
//!
//! Help text is re-derived on demand: flag sets are stateful, single-use
//! definitions, so rendering always builds a fresh throwaway set and never
//! touches the one used for the real parse. Per-flag default-value text
//! comes from the flag adapter's own help renderer.

use super::CommandSet;
use crate::command::Registration;
use crate::sink::Sink as _;

impl CommandSet {
    /// Render the top-level usage to the error sink
    ///
    /// With an empty registry this is the program's single-command usage
    /// line plus its global flag defaults. Otherwise it is the `<COMMAND>`
    /// placeholder line, the registered subcommands in registration order,
    /// the global flag defaults (only when the caller defined any), and a
    /// hint pointing at per-subcommand help.
    pub fn usage(&self) {
        let text = self.render_usage();
        self.sink.err(&text);
    }

    /// Render one subcommand's usage to the error sink
    ///
    /// Does nothing if `name` is not registered.
    pub fn subcommand_usage(&self, name: &str) {
        if let Some(reg) = self.lookup(name) {
            let text = self.render_subcommand_usage(reg);
            self.sink.err(&text);
        }
    }

    fn render_usage(&self) -> String {
        if self.commands.is_empty() {
            let mut single = self
                .global
                .clone()
                .unwrap_or_else(|| clap::Command::new(self.program.clone()))
                .name(self.program.clone());
            return single.render_help().to_string();
        }

        let global_flags = self
            .global
            .as_ref()
            .is_some_and(|global| global.get_arguments().next().is_some());

        let mut top = clap::Command::new(self.program.clone())
            .subcommand_required(true)
            .disable_help_subcommand(true);
        if let Some(global) = &self.global {
            for arg in global.get_arguments() {
                top = top.arg(arg.clone());
            }
        }
        if !global_flags {
            top = top.disable_help_flag(true);
        }
        for reg in &self.commands {
            top = top.subcommand(
                clap::Command::new(reg.name().to_owned()).about(reg.description().to_owned()),
            );
        }

        let mut text = top.render_help().to_string();
        if !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&format!(
            "\nRun '{} <command> --help' for more information on a command.\n",
            self.program
        ));
        text
    }

    /// Description, flag defaults (when the handler defines any flags), and
    /// the required-flag names as a single joined line.
    pub(crate) fn render_subcommand_usage(&self, reg: &Registration) -> String {
        let mut text = format!("{}\n", reg.description());

        // Only the handler's own flags; the help flag is not part of them.
        let mut flag_set = reg.handler().flags(
            clap::Command::new(format!("{} {}", self.program, reg.name()))
                .disable_help_flag(true),
        );
        if flag_set.get_arguments().next().is_some() {
            text.push_str(&flag_set.render_help().to_string());
        }

        if !reg.required_flags().is_empty() {
            text.push_str(&format!(
                "\nRequired flags: {}\n",
                reg.required_flags().join(", ")
            ));
        }
        text
    }
}
