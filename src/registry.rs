/*!
# Paisley: Command Registry.

The registry owns every registered [`Command`] (insertion order preserved,
for the benefit of whoever renders help listings), plus one distinguished
"global" command carrying the program-wide options that apply no matter
which sub-command matches.

It also knows how to turn a matched command into a [`ParserConfig`] — the
merge of global and per-command option schemas described below — and how to
resolve an input token back to a definition.
*/

use crate::{
	Command,
	CommandBuilder,
	Error,
	ParserConfig,
};
use tracing::debug;



#[derive(Debug)]
/// # Command Registry.
pub struct Registry {
	/// # Registered Commands.
	///
	/// Insertion-ordered; lookups scan, listings iterate.
	commands: Vec<Command>,

	/// # Global Command.
	///
	/// The command-like container for program-wide options (help, version,
	/// plugin contributions). Never registered, always consulted.
	global: Command,
}

impl Registry {
	#[must_use]
	/// # New Registry.
	pub fn new(program: &str) -> Self {
		Self {
			commands: Vec::new(),
			global: CommandBuilder::new(program, "")
				.with_usage("<command> [options]")
				.build(),
		}
	}

	#[must_use]
	/// # Registered Commands.
	pub fn commands(&self) -> &[Command] { &self.commands }

	#[must_use]
	/// # Global Command.
	pub fn global(&self) -> &Command { &self.global }

	/// # Global Command (Mutable).
	///
	/// Crate-internal; the program uses this to accumulate program-wide
	/// options during its own construction phase.
	pub(crate) fn global_mut(&mut self) -> &mut Command { &mut self.global }

	#[must_use]
	/// # Number of Commands.
	pub fn len(&self) -> usize { self.commands.len() }

	#[must_use]
	/// # Empty?
	pub fn is_empty(&self) -> bool { self.commands.is_empty() }

	/// # Register a Command.
	///
	/// ## Errors
	///
	/// Returns [`Error::DuplicateCommand`] if a command already claimed the
	/// canonical name.
	pub fn register(&mut self, command: Command) -> Result<(), Error> {
		if self.commands.iter().any(|c| c.name() == command.name()) {
			return Err(Error::DuplicateCommand(command.name().to_owned()));
		}

		debug!(command = command.name(), "registered command");
		self.commands.push(command);
		Ok(())
	}

	#[must_use]
	/// # Resolve a Token.
	///
	/// Exact name match first, then alias match, then fallback to whichever
	/// command is flagged as the default, if any.
	pub fn resolve(&self, token: &str) -> Option<&Command> {
		self.commands.iter().find(|c| c.name() == token)
			.or_else(||
				self.commands.iter().find(|c| c.aliases().iter().any(|a| a == token))
			)
			.or_else(|| self.default_command())
	}

	#[must_use]
	/// # Default Command.
	pub fn default_command(&self) -> Option<&Command> {
		self.commands.iter().find(|c| c.is_default())
	}

	#[must_use]
	/// # Build Parser Configuration.
	///
	/// Merge the global command's option specs with the matched command's
	/// (when there is one, and it isn't the global command itself) into one
	/// [`ParserConfig`]:
	/// * every option's alias list lands in the alias table, as do all
	///   registered commands' own names/aliases;
	/// * defaults come along unless the owning command opts out;
	/// * boolean-kind, non-negated options become boolean names;
	/// * negated options become negatable names, and *also* boolean names
	///   unless a value-taking sibling shares an alias with them (forcing
	///   boolean there would clobber the sibling's value).
	pub fn parser_config(&self, matched: Option<&Command>) -> ParserConfig {
		let mut owners: Vec<&Command> = vec![&self.global];
		if let Some(cmd) = matched {
			if ! std::ptr::eq(cmd, &self.global) { owners.push(cmd); }
		}

		self.merged_config(&owners)
	}

	#[must_use]
	/// # Build Resolution Configuration.
	///
	/// Same merge, but over *every* registered command. Used for the
	/// pre-resolution scan, where no command has matched yet: any declared
	/// boolean ahead of the command token must already be known not to
	/// consume it.
	pub fn resolution_config(&self) -> ParserConfig {
		let mut owners: Vec<&Command> = vec![&self.global];
		owners.extend(self.commands.iter());

		self.merged_config(&owners)
	}

	/// # Merge Option Specs Into a Configuration.
	fn merged_config(&self, owners: &[&Command]) -> ParserConfig {
		let all: Vec<(&Command, &crate::OptionSpec)> = owners.iter()
			.flat_map(|c| c.options().iter().map(move |o| (*c, o)))
			.collect();

		let mut config = ParserConfig::default();
		for (idx, (owner, option)) in all.iter().enumerate() {
			config = config.with_alias(option.name(), option.aliases().to_vec());

			if let Some(default) = option.default() {
				if ! owner.ignore_option_defaults() {
					config = config.with_default(option.name(), default.clone());
				}
			}

			if ! option.is_boolean() { continue; }

			if option.is_negated() {
				config = config.with_negatable(option.name());

				let clashes = all.iter()
					.enumerate()
					.any(|(other_idx, (_, other))|
						other_idx != idx &&
						! other.is_boolean() &&
						other.aliases().iter().any(|a| option.aliases().contains(a))
					);
				if ! clashes { config = config.with_boolean(option.name()); }
			}
			else { config = config.with_boolean(option.name()); }
		}

		// Every registered command's name/aliases are parser-level aliases
		// too, so tokens spelled either way resolve the same.
		for cmd in std::iter::once(&self.global).chain(self.commands.iter()) {
			if ! cmd.name().is_empty() {
				config = config.with_alias(cmd.name(), cmd.aliases().to_vec());
			}
		}

		config
	}
}
