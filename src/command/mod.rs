/*!
# Paisley: Commands.

A [`Command`] is an immutable definition — matchable names, positional
argument specs, option specs, handler — produced by a [`CommandBuilder`].
All the accumulation happens on the builder; once built, a command only
ever gets *read* (registration aside, where the registry takes ownership).
*/

mod option;
pub(crate) mod pattern;

use crate::{
	Error,
	Tools,
};
pub use option::{
	OptionKind,
	OptionSpec,
};
use futures::future::BoxFuture;
use serde_json::{
	Map,
	Value,
};
use std::fmt;



/// # Handler Failure.
///
/// Whatever a command handler throws; kept separate from [`Error`] so the
/// program can always tell user failures apart from library ones.
pub type HandlerError = crate::BoxError;

/// # Handler Future.
pub type HandlerFuture = BoxFuture<'static, Result<(), HandlerError>>;

/// # Handler Callback.
type Action = Box<dyn Fn(Invocation) -> HandlerFuture + Send + Sync>;

/// # Default-Command Marker.
///
/// A command aliased to this sentinel matches when no other command does.
const DEFAULT_MARKER: &str = "!";



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Positional Argument Specification.
///
/// One `<name>` / `[name]` group from a command's raw pattern.
pub struct ArgSpec {
	/// # Bare Identifier.
	pub name: String,

	/// # Required?
	///
	/// `true` for the angle-bracket form.
	pub required: bool,

	/// # Variadic?
	///
	/// Only meaningful on the last argument, where it soaks up every
	/// remaining positional token.
	pub variadic: bool,
}



/// # Shaped Handler Input.
///
/// What a command handler actually receives: positional values shaped to
/// the command's argument specs, the flag mapping, and the program's
/// capability snapshot.
pub struct Invocation {
	/// # Shaped Positional Values.
	///
	/// One entry per declared argument spec; absent optionals are `Null`
	/// and a variadic tail arrives as a single array.
	pub args: Vec<Value>,

	/// # Flag Mapping.
	pub flags: Map<String, Value>,

	/// # Capability Snapshot.
	pub tools: Tools,
}

impl fmt::Debug for Invocation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Invocation")
			.field("args", &self.args)
			.field("flags", &self.flags)
			.field("tools", &self.tools)
			.finish()
	}
}



/// # Command Definition.
///
/// Immutable once built; see [`CommandBuilder`] for construction.
pub struct Command {
	/// # Canonical Matching Token.
	name: String,

	/// # Raw Pattern.
	raw: String,

	/// # Description.
	description: String,

	/// # Alternate Matching Tokens.
	aliases: Vec<String>,

	/// # Positional Argument Specs.
	args: Vec<ArgSpec>,

	/// # Option Specs.
	///
	/// Unique by canonical name; later declarations replace earlier ones.
	options: Vec<OptionSpec>,

	/// # Usage Examples.
	examples: Vec<String>,

	/// # Usage Override.
	usage: String,

	/// # Version String.
	version: Option<String>,

	/// # Allow Undeclared Options?
	allow_unknown_options: bool,

	/// # Skip Option Defaults?
	ignore_option_defaults: bool,

	/// # Handler.
	action: Option<Action>,
}

impl fmt::Debug for Command {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Command")
			.field("name", &self.name)
			.field("raw", &self.raw)
			.field("aliases", &self.aliases)
			.field("args", &self.args)
			.field("options", &self.options)
			.field("implemented", &self.action.is_some())
			.finish()
	}
}

impl Command {
	#[must_use]
	/// # Canonical Name.
	pub fn name(&self) -> &str { &self.name }

	#[must_use]
	/// # Raw Pattern.
	pub fn raw(&self) -> &str { &self.raw }

	#[must_use]
	/// # Description.
	pub fn description(&self) -> &str { &self.description }

	#[must_use]
	/// # Aliases.
	pub fn aliases(&self) -> &[String] { &self.aliases }

	#[must_use]
	/// # Positional Argument Specs.
	pub fn args(&self) -> &[ArgSpec] { &self.args }

	#[must_use]
	/// # Option Specs.
	pub fn options(&self) -> &[OptionSpec] { &self.options }

	#[must_use]
	/// # Usage Examples.
	pub fn examples(&self) -> &[String] { &self.examples }

	#[must_use]
	/// # Usage Text.
	///
	/// The explicit usage override if set, the raw pattern otherwise.
	pub fn usage(&self) -> &str {
		if self.usage.is_empty() { &self.raw }
		else { &self.usage }
	}

	#[must_use]
	/// # Version String.
	pub fn version(&self) -> Option<&str> { self.version.as_deref() }

	#[must_use]
	/// # Allows Undeclared Options?
	pub const fn allow_unknown_options(&self) -> bool { self.allow_unknown_options }

	#[must_use]
	/// # Skips Option Defaults?
	pub const fn ignore_option_defaults(&self) -> bool { self.ignore_option_defaults }

	#[must_use]
	/// # Default Command?
	///
	/// A nameless command — or one carrying the `!` marker alias — catches
	/// tokens nothing else claims.
	pub fn is_default(&self) -> bool {
		self.name.is_empty() || self.aliases.iter().any(|a| a == DEFAULT_MARKER)
	}

	#[must_use]
	/// # Has a Handler?
	pub const fn is_implemented(&self) -> bool { self.action.is_some() }

	#[must_use]
	/// # Matches a Token?
	pub fn matches(&self, token: &str) -> bool {
		self.name == token || self.aliases.iter().any(|a| a == token)
	}

	#[must_use]
	/// # Declares an Option?
	///
	/// Dotted names match on their root segment.
	pub fn has_option(&self, name: &str) -> bool {
		self.options.iter().any(|o| o.matches(name))
	}

	/// # Attach a Handler.
	///
	/// Registration-time counterpart to the builder's action methods, used
	/// for the program-level handler on the global command.
	pub(crate) fn set_action(&mut self, action: Action) {
		self.action = Some(action);
	}

	/// # Add/Replace an Option.
	///
	/// Registration-time accumulation for the global command (version/help
	/// keys, plugin contributions); user commands get theirs through the
	/// builder. Same canonical name replaces, except that negated and
	/// non-negated declarations may coexist (that pairing is how
	/// `--thing <x>` / `--no-thing` works).
	pub(crate) fn push_option(&mut self, option: OptionSpec) {
		self.options.retain(|o|
			o.name() != option.name() ||
			o.is_negated() != option.is_negated()
		);
		self.options.push(option);
	}

	#[must_use]
	/// # Shape Positional Values.
	///
	/// Line parsed positionals up against the declared argument specs: one
	/// value per spec, `Null` where input ran out, and the whole remaining
	/// tail as one array for a variadic spec.
	///
	/// A command with no specs at all passes everything through untouched
	/// (that's what lets a program-level handler see its positionals).
	pub fn shape_args(&self, parsed: &[Value]) -> Vec<Value> {
		if self.args.is_empty() { return parsed.to_vec(); }

		self.args.iter()
			.enumerate()
			.map(|(idx, spec)|
				if spec.variadic {
					Value::Array(parsed.get(idx..).unwrap_or_default().to_vec())
				}
				else {
					parsed.get(idx).cloned().unwrap_or(Value::Null)
				}
			)
			.collect()
	}

	/// # Validate Parsed Input.
	///
	/// Check the parsed positionals and flags against this command's specs
	/// (and the global command's option set, for the unknown-option rule).
	/// Inspection only; the parsed result is never mutated.
	///
	/// ## Errors
	///
	/// Returns [`Error::MissingArgument`] when fewer positional values were
	/// supplied than required specs, [`Error::UnknownOption`] when an
	/// undeclared flag shows up (unless this command allows them), and
	/// [`Error::MissingOptionValue`] when a required-value option resolved
	/// to a bare boolean or nothing at all.
	pub fn validate(
		&self,
		args: &[Value],
		flags: &Map<String, Value>,
		global: &Command,
	) -> Result<(), Error> {
		let required = self.args.iter().filter(|a| a.required).count();
		if args.len() < required {
			return Err(Error::MissingArgument(self.raw.clone()));
		}

		if ! self.allow_unknown_options {
			for key in flags.keys() {
				if ! self.has_option(key) && ! global.has_option(key) {
					return Err(Error::UnknownOption(dashed(key)));
				}
			}
		}

		for option in &self.options {
			if ! option.is_required() { continue; }

			// A same-named negated sibling makes an explicit false fine.
			let has_negated = self.options.iter().any(|o|
				o.is_negated() &&
				o.aliases().iter().any(|a| a == option.name())
			);

			let root = option.name().split('.').next().unwrap_or(option.name());
			match flags.get(root) {
				Some(Value::Bool(true)) | None =>
					return Err(Error::MissingOptionValue(option.raw().to_owned())),
				Some(Value::Bool(false)) if ! has_negated =>
					return Err(Error::MissingOptionValue(option.raw().to_owned())),
				_ => {},
			}
		}

		Ok(())
	}

	/// # Execute.
	///
	/// Run the handler with a shaped invocation, waiting out asynchronous
	/// ones.
	///
	/// ## Errors
	///
	/// Returns [`Error::NotImplemented`] when no handler was attached, or
	/// [`Error::Handler`] wrapping whatever the handler itself raised.
	pub(crate) async fn execute(&self, invocation: Invocation) -> Result<(), Error> {
		let Some(action) = self.action.as_ref() else {
			return Err(Error::NotImplemented(self.name.clone()));
		};

		action(invocation).await.map_err(Error::Handler)
	}
}



/// # Dash a Key.
///
/// Re-dash a bare key for error-message purposes: one dash for a single
/// character, two for anything longer.
fn dashed(key: &str) -> String {
	if key.chars().count() == 1 { format!("-{key}") }
	else { format!("--{key}") }
}



/// # Command Builder.
///
/// The one-stop construction site for [`Command`] definitions. Chain the
/// `with_*` methods, then [`build`](CommandBuilder::build).
///
/// ## Examples
///
/// ```
/// use paisley::{CommandBuilder, OptionSpec};
///
/// let cmd = CommandBuilder::new("add <...files>", "Stage files.")
///     .with_alias("a")
///     .with_option(OptionSpec::new("-v, --verbose", "Be chatty."))
///     .with_action(|invocation| {
///         println!("adding {:?}", invocation.args);
///         Ok(())
///     })
///     .build();
///
/// assert_eq!(cmd.name(), "add");
/// assert!(cmd.matches("a"));
/// assert!(cmd.args()[0].variadic);
/// ```
pub struct CommandBuilder {
	/// # Raw Pattern.
	raw: String,

	/// # Description.
	description: String,

	/// # Aliases.
	aliases: Vec<String>,

	/// # Option Specs.
	options: Vec<OptionSpec>,

	/// # Usage Examples.
	examples: Vec<String>,

	/// # Usage Override.
	usage: String,

	/// # Version String.
	version: Option<String>,

	/// # Allow Undeclared Options?
	allow_unknown_options: bool,

	/// # Skip Option Defaults?
	ignore_option_defaults: bool,

	/// # Handler.
	action: Option<Action>,
}

impl fmt::Debug for CommandBuilder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CommandBuilder")
			.field("raw", &self.raw)
			.field("aliases", &self.aliases)
			.field("options", &self.options)
			.field("implemented", &self.action.is_some())
			.finish()
	}
}

impl CommandBuilder {
	#[must_use]
	/// # New Builder.
	///
	/// `raw` is the full pattern — name plus bracketed positional arguments
	/// — e.g. `cp <src> [dest]`.
	pub fn new(raw: &str, description: &str) -> Self {
		Self {
			raw: raw.to_owned(),
			description: description.to_owned(),
			aliases: Vec::new(),
			options: Vec::new(),
			examples: Vec::new(),
			usage: String::new(),
			version: None,
			allow_unknown_options: false,
			ignore_option_defaults: false,
			action: None,
		}
	}

	#[must_use]
	/// # With Alias.
	pub fn with_alias(mut self, alias: &str) -> Self {
		self.aliases.push(alias.to_owned());
		self
	}

	#[must_use]
	/// # With Option.
	///
	/// Declarations sharing a canonical name replace their predecessors,
	/// except that a negated declaration may sit alongside a non-negated
	/// one with the same name.
	pub fn with_option(mut self, option: OptionSpec) -> Self {
		self.options.retain(|o|
			o.name() != option.name() ||
			o.is_negated() != option.is_negated()
		);
		self.options.push(option);
		self
	}

	#[must_use]
	/// # Mark as Default Command.
	///
	/// The default command catches input tokens no other command claims.
	pub fn with_default(mut self) -> Self {
		self.aliases.push(DEFAULT_MARKER.to_owned());
		self
	}

	#[must_use]
	/// # With Example.
	pub fn with_example(mut self, example: &str) -> Self {
		self.examples.push(example.to_owned());
		self
	}

	#[must_use]
	/// # With Usage Text.
	pub fn with_usage(mut self, usage: &str) -> Self {
		usage.trim().clone_into(&mut self.usage);
		self
	}

	#[must_use]
	/// # With Version String.
	pub fn with_version(mut self, version: &str) -> Self {
		self.version = Some(version.to_owned());
		self
	}

	#[must_use]
	/// # Allow Undeclared Options.
	pub const fn with_allow_unknown_options(mut self, yes: bool) -> Self {
		self.allow_unknown_options = yes;
		self
	}

	#[must_use]
	/// # Skip Option Defaults.
	pub const fn with_ignore_option_defaults(mut self, yes: bool) -> Self {
		self.ignore_option_defaults = yes;
		self
	}

	#[must_use]
	/// # With (Synchronous) Handler.
	pub fn with_action<F>(mut self, action: F) -> Self
	where F: Fn(Invocation) -> Result<(), HandlerError> + Send + Sync + 'static {
		self.action = Some(Box::new(move |invocation| {
			let done: HandlerFuture = Box::pin(futures::future::ready(action(invocation)));
			done
		}));
		self
	}

	#[must_use]
	/// # With Asynchronous Handler.
	pub fn with_action_async<F>(mut self, action: F) -> Self
	where F: Fn(Invocation) -> HandlerFuture + Send + Sync + 'static {
		self.action = Some(Box::new(action));
		self
	}

	#[must_use]
	/// # Build!
	///
	/// Derive the matchable name and positional specs from the raw pattern
	/// and seal the definition.
	pub fn build(self) -> Command {
		let name = pattern::remove_brackets(&self.raw).to_owned();
		let args = pattern::find_all_brackets(&self.raw);

		Command {
			name,
			raw: self.raw,
			description: self.description,
			aliases: self.aliases,
			args,
			options: self.options,
			examples: self.examples,
			usage: self.usage,
			version: self.version,
			allow_unknown_options: self.allow_unknown_options,
			ignore_option_defaults: self.ignore_option_defaults,
			action: self.action,
		}
	}
}
