/*!
# Paisley: Program.

The [`Program`] is the orchestrator tying everything else together: it owns
the command [`Registry`](crate::Registry), the capability [`Tools`], the
lifecycle observers, the plugin set, and the command-source queue, and its
async [`run`](Program::run) walks one full dispatch: bootstrap, parse,
resolve, validate, execute.

Nothing here prints. Version strings, usage text, and failure messages are
all surfaced as values (or events) for the embedding application to render
however it likes.
*/

use crate::{
	BootstrapMode,
	Command,
	CommandSource,
	Error,
	Event,
	HandlerError,
	HandlerFuture,
	Invocation,
	Observer,
	OptionSpec,
	ParserConfig,
	Plugin,
	Registry,
	Tools,
	UnknownHandler,
	event::Observers,
	plugin::PluginSet,
};
use serde_json::Value;
use std::{
	fmt,
	sync::Arc,
};
use tracing::{
	debug,
	warn,
};



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Run Outcome.
///
/// What a completed [`Program::run`] amounted to. Library errors never make
/// it this far; they come back as `Err` instead.
pub enum Outcome {
	/// # Handler Ran Successfully.
	Completed,

	/// # Handler Failed (Captured).
	///
	/// Only produced when error capturing is on; the failure itself went
	/// out as an [`Event::Error`].
	Failed,

	/// # Nothing Matched.
	NotFound,
}



/// # Program.
///
/// Built with `with_*` chaining, then driven by [`run`](Program::run).
///
/// ## Examples
///
/// ```
/// use paisley::{CommandBuilder, Program};
///
/// let mut program = Program::new("demo")
///     .with_version("1.0.0");
///
/// program.register(
///     CommandBuilder::new("greet <name>", "Say hello.")
///         .with_action(|invocation| {
///             let name = invocation.args[0].as_str().unwrap_or("world");
///             println!("hello, {name}!");
///             Ok(())
///         })
///         .build()
/// ).unwrap();
///
/// let outcome = futures::executor::block_on(
///     program.run(["greet", "rust"])
/// ).unwrap();
/// assert_eq!(outcome, paisley::Outcome::Completed);
/// ```
pub struct Program {
	/// # Program Name.
	name: String,

	/// # Version String.
	version: Option<String>,

	/// # Command Registry.
	registry: Registry,

	/// # Capability Snapshot.
	tools: Tools,

	/// # Lifecycle Observers.
	observers: Observers,

	/// # Plugin Set.
	plugins: PluginSet,

	/// # Plugins Bootstrapped?
	bootstrapped: bool,

	/// # Plugin Bootstrap Mode.
	bootstrap_mode: BootstrapMode,

	/// # Pending Command Sources.
	sources: Vec<Box<dyn CommandSource>>,

	/// # Capture Handler Failures?
	capture_errors: bool,

	/// # Stop Parsing at First Positional?
	stop_early: bool,

	/// # Separate Double-Dash Bucket?
	double_dash: bool,

	/// # Unknown-Flag Callback.
	unknown: Option<UnknownHandler>,
}

impl fmt::Debug for Program {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Program")
			.field("name", &self.name)
			.field("version", &self.version)
			.field("registry", &self.registry)
			.field("tools", &self.tools)
			.field("plugins", &self.plugins)
			.field("sources", &self.sources.len())
			.field("capture_errors", &self.capture_errors)
			.finish()
	}
}

impl Program {
	#[must_use]
	/// # New Program.
	pub fn new(name: &str) -> Self {
		Self {
			name: name.to_owned(),
			version: None,
			registry: Registry::new(name),
			tools: Tools::default(),
			observers: Observers::default(),
			plugins: PluginSet::default(),
			bootstrapped: false,
			bootstrap_mode: BootstrapMode::default(),
			sources: Vec::new(),
			capture_errors: false,
			stop_early: false,
			double_dash: false,
			unknown: None,
		}
	}

	#[must_use]
	/// # With Version String.
	///
	/// Stores the version and declares a global `-v, --version` boolean so
	/// the flag parses (and survives unknown-option checks) everywhere.
	/// Rendering is the caller's business; see [`version`](Program::version).
	pub fn with_version(mut self, version: &str) -> Self {
		self.version = Some(version.to_owned());
		self.registry.global_mut().push_option(
			OptionSpec::new("-v, --version", "Show the program version.")
		);
		self
	}

	#[must_use]
	/// # With Help Flag.
	///
	/// Declares a global `-h, --help` boolean. As with the version, the
	/// crate only makes the flag parseable; rendering is external.
	pub fn with_help(mut self) -> Self {
		self.registry.global_mut().push_option(
			OptionSpec::new("-h, --help", "Show usage information.")
		);
		self
	}

	#[must_use]
	/// # With Program-Wide Option.
	pub fn with_option(mut self, option: OptionSpec) -> Self {
		self.registry.global_mut().push_option(option);
		self
	}

	#[must_use]
	/// # With (Synchronous) Program Handler.
	///
	/// A handler on the program itself runs whenever no registered command
	/// matches, catch-all style. Its positionals arrive unshaped.
	pub fn with_action<F>(mut self, action: F) -> Self
	where F: Fn(Invocation) -> Result<(), HandlerError> + Send + Sync + 'static {
		self.registry.global_mut().set_action(Box::new(move |invocation| {
			let done: HandlerFuture = Box::pin(futures::future::ready(action(invocation)));
			done
		}));
		self
	}

	#[must_use]
	/// # With Asynchronous Program Handler.
	pub fn with_action_async<F>(mut self, action: F) -> Self
	where F: Fn(Invocation) -> HandlerFuture + Send + Sync + 'static {
		self.registry.global_mut().set_action(Box::new(action));
		self
	}

	#[must_use]
	/// # With Tool.
	pub fn with_tool<T: std::any::Any + Send + Sync>(mut self, key: &str, value: T) -> Self {
		self.tools.insert(key, value);
		self
	}

	#[must_use]
	/// # With Plugin.
	pub fn with_plugin<P: Plugin + 'static>(mut self, plugin: P) -> Self {
		self.plugins.register(Box::new(plugin));
		self
	}

	#[must_use]
	/// # With Plugin Bootstrap Mode.
	pub const fn with_bootstrap(mut self, mode: BootstrapMode) -> Self {
		self.bootstrap_mode = mode;
		self
	}

	#[must_use]
	/// # With Command Source.
	pub fn with_command_source<S: CommandSource + 'static>(mut self, source: S) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	#[must_use]
	/// # Capture Handler Failures.
	///
	/// When set, a failing handler produces [`Event::Error`] and
	/// [`Outcome::Failed`] instead of bubbling up as
	/// [`Error::Handler`].
	pub const fn with_capture_errors(mut self, yes: bool) -> Self {
		self.capture_errors = yes;
		self
	}

	#[must_use]
	/// # Stop Parsing at First Positional.
	pub const fn with_stop_early(mut self, yes: bool) -> Self {
		self.stop_early = yes;
		self
	}

	#[must_use]
	/// # Separate Double-Dash Bucket.
	pub const fn with_double_dash(mut self, yes: bool) -> Self {
		self.double_dash = yes;
		self
	}

	#[must_use]
	/// # With Unknown-Flag Callback.
	pub fn with_unknown(mut self, cb: UnknownHandler) -> Self {
		self.unknown = Some(cb);
		self
	}

	#[must_use]
	/// # Program Name.
	pub fn name(&self) -> &str { &self.name }

	#[must_use]
	/// # Version String.
	pub fn version(&self) -> Option<&str> { self.version.as_deref() }

	#[must_use]
	/// # Command Registry.
	pub const fn registry(&self) -> &Registry { &self.registry }

	#[must_use]
	/// # Capability Snapshot.
	pub const fn tools(&self) -> &Tools { &self.tools }

	/// # Subscribe to Lifecycle Events.
	pub fn subscribe(&mut self, observer: Observer) {
		self.observers.subscribe(observer);
	}

	/// # Register a Command.
	///
	/// ## Errors
	///
	/// Returns [`Error::DuplicateCommand`] if the canonical name is taken.
	pub fn register(&mut self, command: Command) -> Result<(), Error> {
		let name = command.name().to_owned();
		self.registry.register(command)?;
		self.observers.emit(&Event::Registered { command: name });
		Ok(())
	}

	/// # Run!
	///
	/// One complete dispatch: bootstrap plugins (first run only), drain
	/// command sources, parse `argv`, resolve a command, validate, execute.
	///
	/// ## Errors
	///
	/// Library errors — duplicate or unloadable commands, missing arguments,
	/// unknown options, valueless required options, a matched command with
	/// no handler — always come back as `Err`. Handler failures do too,
	/// wrapped in [`Error::Handler`], unless error capturing is on.
	pub async fn run<I>(&mut self, argv: I) -> Result<Outcome, Error>
	where I: IntoIterator, I::Item: Into<String> {
		self.bootstrap().await;
		self.drain_sources().await?;

		let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
		self.observers.emit(&Event::BeforeRun);

		// First pass: every command's declarations at once, just enough to
		// pull the leading positional out for command resolution. The union
		// matters: a declared boolean ahead of the command token must not
		// swallow it as a value.
		let peek = crate::parse(
			argv.iter().cloned(),
			&self.apply_tweaks(self.registry.resolution_config()),
		);
		let token: Option<String> = peek.args.first().map(token_text);

		let Some(cmd) = token.as_deref()
			.and_then(|t| self.registry.resolve(t))
			.or_else(|| self.registry.default_command())
			.or_else(||
				// A handler on the program itself serves as a last resort.
				if self.registry.global().is_implemented() {
					Some(self.registry.global())
				}
				else { None }
			)
		else {
			debug!(token = token.as_deref(), "no command matched");
			self.observers.emit(&Event::NoMatch);
			self.observers.emit(&Event::AfterRun);
			return Ok(Outcome::NotFound);
		};

		// Second pass: the real parse, with the matched command's option
		// declarations merged in.
		let config = self.apply_tweaks(self.registry.parser_config(Some(cmd)));
		let mut parsed = crate::parse(argv, &config);

		// The command's own token is routing, not data.
		if parsed.args.first().map(token_text).as_deref().is_some_and(|t| cmd.matches(t)) {
			parsed.args.remove(0);
		}

		cmd.validate(&parsed.args, &parsed.flags, self.registry.global())?;

		debug!(command = cmd.name(), "dispatching");
		self.observers.emit(&Event::Dispatch { command: cmd.name().to_owned() });

		let invocation = Invocation {
			args: cmd.shape_args(&parsed.args),
			flags: parsed.flags,
			tools: self.tools.clone(),
		};

		match cmd.execute(invocation).await {
			Ok(()) => {
				self.observers.emit(&Event::AfterRun);
				Ok(Outcome::Completed)
			},
			Err(Error::Handler(e)) if self.capture_errors => {
				warn!(command = cmd.name(), error = %e, "handler failed");
				self.observers.emit(&Event::Error { message: e.to_string() });
				self.observers.emit(&Event::AfterRun);
				Ok(Outcome::Failed)
			},
			Err(e) => Err(e),
		}
	}

	/// # Bootstrap Plugins.
	///
	/// Runs every registered plugin's setup pass (once per program, however
	/// many times `run` is called) and folds the contributions in, in
	/// registration order. Contributed commands that collide with existing
	/// names are dropped with a warning rather than failing the run.
	async fn bootstrap(&mut self) {
		if self.bootstrapped || self.plugins.is_empty() { return; }
		self.bootstrapped = true;

		let contributions = self.plugins.bootstrap(self.bootstrap_mode).await;
		debug!(plugins = contributions.len(), "bootstrapped plugins");

		for contribution in contributions {
			self.tools.merge(contribution.tools);
			for option in contribution.global_options {
				self.registry.global_mut().push_option(option);
			}
			for command in contribution.commands {
				if let Err(e) = self.register(command) {
					warn!(error = %e, "skipped plugin command");
				}
			}
		}
	}

	/// # Drain Command Sources.
	///
	/// Load and register every queued source's commands. Sources run once;
	/// a source queued between runs gets picked up by the next one.
	///
	/// ## Errors
	///
	/// Returns [`Error::Source`] when a load fails, or
	/// [`Error::DuplicateCommand`] when a yielded name is already taken.
	async fn drain_sources(&mut self) -> Result<(), Error> {
		if self.sources.is_empty() { return Ok(()); }

		let sources = std::mem::take(&mut self.sources);
		for source in sources {
			let commands = source.load().await.map_err(Error::Source)?;
			debug!(commands = commands.len(), "loaded command source");
			for command in commands { self.register(command)?; }
		}

		Ok(())
	}

	/// # Apply Program-Level Parser Tweaks.
	fn apply_tweaks(&self, config: ParserConfig) -> ParserConfig {
		let mut config = config
			.with_stop_early(self.stop_early)
			.with_double_dash(self.double_dash);
		if let Some(cb) = &self.unknown {
			config = config.with_unknown(Arc::clone(cb));
		}
		config
	}
}



/// # Positional Token Text.
///
/// Positional values may have been numerically coerced; resolution wants
/// the textual form back.
fn token_text(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}



#[cfg(test)]
mod test {
	use super::*;
	use crate::{
		BoxError,
		CommandBuilder,
		Contribution,
	};
	use futures::{
		executor::block_on,
		future::BoxFuture,
	};
	use std::sync::{
		Arc,
		Mutex,
	};

	/// # Shared Value Recorder.
	type Recorder<T> = Arc<Mutex<Vec<T>>>;

	/// # Record a Value.
	fn record<T>(recorder: &Recorder<T>, value: T) {
		if let Ok(mut r) = recorder.lock() { r.push(value); }
	}

	/// # Recorded Values.
	fn recorded<T: Clone>(recorder: &Recorder<T>) -> Vec<T> {
		recorder.lock().map(|r| r.clone()).unwrap_or_default()
	}

	#[test]
	fn t_dispatch() {
		let seen: Recorder<Vec<Value>> = Recorder::default();
		let seen2 = Arc::clone(&seen);

		let mut program = Program::new("test");
		program.register(
			CommandBuilder::new("add <...files>", "")
				.with_action(move |invocation| {
					record(&seen2, invocation.args);
					Ok(())
				})
				.build()
		).expect("Registration failed.");

		let outcome = block_on(program.run(["add", "a.txt", "b.txt"]))
			.expect("Run failed.");
		assert_eq!(outcome, Outcome::Completed);

		// The routing token is gone; the variadic tail arrived as one array.
		assert_eq!(
			recorded(&seen),
			vec![vec![Value::Array(vec!["a.txt".into(), "b.txt".into()])]],
		);
	}

	#[test]
	fn t_flag_before_command() {
		let seen: Recorder<Vec<Value>> = Recorder::default();
		let seen2 = Arc::clone(&seen);

		let mut program = Program::new("test");
		program.register(
			CommandBuilder::new("add <...files>", "")
				.with_option(crate::OptionSpec::new("--verbose", ""))
				.with_action(move |invocation| {
					assert_eq!(
						invocation.flags["verbose"], true,
						"The leading flag should still parse.",
					);
					record(&seen2, invocation.args);
					Ok(())
				})
				.build()
		).expect("Registration failed.");

		// A command-declared flag ahead of the command token must not eat
		// it during resolution.
		let outcome = block_on(program.run(["--verbose", "add", "a.txt"]))
			.expect("Run failed.");
		assert_eq!(outcome, Outcome::Completed);
		assert_eq!(
			recorded(&seen),
			vec![vec![Value::Array(vec!["a.txt".into()])]],
		);
	}

	#[test]
	fn t_event_order() {
		let seen: Recorder<Event> = Recorder::default();
		let seen2 = Arc::clone(&seen);

		let mut program = Program::new("test");
		program.subscribe(Box::new(move |e| record(&seen2, e.clone())));

		program.register(
			CommandBuilder::new("go", "").with_action(|_| Ok(())).build()
		).expect("Registration failed.");

		let outcome = block_on(program.run(["go"])).expect("Run failed.");
		assert_eq!(outcome, Outcome::Completed);

		assert_eq!(
			recorded(&seen),
			vec![
				Event::Registered { command: "go".to_owned() },
				Event::BeforeRun,
				Event::Dispatch { command: "go".to_owned() },
				Event::AfterRun,
			],
		);
	}

	#[test]
	fn t_not_found() {
		let seen: Recorder<Event> = Recorder::default();
		let seen2 = Arc::clone(&seen);

		let mut program = Program::new("test");
		program.subscribe(Box::new(move |e| record(&seen2, e.clone())));
		program.register(
			CommandBuilder::new("go", "").with_action(|_| Ok(())).build()
		).expect("Registration failed.");

		let outcome = block_on(program.run(["nope"])).expect("Run failed.");
		assert_eq!(outcome, Outcome::NotFound);
		assert!(recorded(&seen).contains(&Event::NoMatch));
	}

	#[test]
	fn t_default_command() {
		let seen: Recorder<Vec<Value>> = Recorder::default();
		let seen2 = Arc::clone(&seen);

		let mut program = Program::new("test");
		program.register(
			CommandBuilder::new("fallback [thing]", "")
				.with_default()
				.with_action(move |invocation| {
					record(&seen2, invocation.args);
					Ok(())
				})
				.build()
		).expect("Registration failed.");

		let outcome = block_on(program.run(["whatever"])).expect("Run failed.");
		assert_eq!(outcome, Outcome::Completed);

		// The unmatched token is data for the default command, not routing.
		assert_eq!(
			recorded(&seen),
			vec![vec![Value::String("whatever".to_owned())]],
		);
	}

	#[test]
	fn t_program_action() {
		let seen: Recorder<Vec<Value>> = Recorder::default();
		let seen2 = Arc::clone(&seen);

		// No commands at all; the program handler is the catch-all.
		let mut program = Program::new("sum")
			.with_action(move |invocation| {
				record(&seen2, invocation.args);
				Ok(())
			});

		let outcome = block_on(program.run(["5", "3"])).expect("Run failed.");
		assert_eq!(outcome, Outcome::Completed);

		// Unshaped, numerically-coerced positionals, straight through.
		assert_eq!(recorded(&seen), vec![vec![Value::from(5), Value::from(3)]]);

		// A registered command still wins when it matches.
		let mut program = Program::new("sum")
			.with_action(|_| Err("should not run".into()));
		program.register(
			CommandBuilder::new("go", "").with_action(|_| Ok(())).build()
		).expect("Registration failed.");

		let outcome = block_on(program.run(["go"])).expect("Run failed.");
		assert_eq!(outcome, Outcome::Completed);
	}

	#[test]
	fn t_capture_errors() {
		/// # Always-Failing Handler.
		fn fail(_: Invocation) -> Result<(), BoxError> {
			Err("boom".into())
		}

		// Uncaptured, handler failures bubble up.
		let mut program = Program::new("test");
		program.register(
			CommandBuilder::new("go", "").with_action(fail).build()
		).expect("Registration failed.");
		assert!(matches!(
			block_on(program.run(["go"])),
			Err(Error::Handler(_)),
		));

		// Captured, they become an event and a Failed outcome.
		let seen: Recorder<Event> = Recorder::default();
		let seen2 = Arc::clone(&seen);

		let mut program = Program::new("test").with_capture_errors(true);
		program.subscribe(Box::new(move |e| record(&seen2, e.clone())));
		program.register(
			CommandBuilder::new("go", "").with_action(fail).build()
		).expect("Registration failed.");

		let outcome = block_on(program.run(["go"])).expect("Run failed.");
		assert_eq!(outcome, Outcome::Failed);
		assert!(recorded(&seen).contains(
			&Event::Error { message: "boom".to_owned() }
		));
	}

	#[test]
	fn t_validation_failures() {
		let mut program = Program::new("test");
		program.register(
			CommandBuilder::new("add <...files>", "").with_action(|_| Ok(())).build()
		).expect("Registration failed.");
		program.register(
			CommandBuilder::new("init", "").with_action(|_| Ok(())).build()
		).expect("Registration failed.");
		program.register(
			CommandBuilder::new("commit", "")
				.with_option(crate::OptionSpec::new("-m, --message <message>", ""))
				.with_action(|_| Ok(()))
				.build()
		).expect("Registration failed.");

		assert!(matches!(
			block_on(program.run(["add"])),
			Err(Error::MissingArgument(_)),
		));
		assert!(matches!(
			block_on(program.run(["init", "--bogus"])),
			Err(Error::UnknownOption(key)) if key == "--bogus",
		));
		assert!(matches!(
			block_on(program.run(["commit"])),
			Err(Error::MissingOptionValue(_)),
		));
		assert!(matches!(
			block_on(program.run(["commit", "-m"])),
			Err(Error::MissingOptionValue(_)),
		));

		// And the happy paths for the same commands.
		assert!(block_on(program.run(["add", "a.txt"])).is_ok());
		assert!(block_on(program.run(["commit", "-m", "message"])).is_ok());
	}

	#[test]
	fn t_version_flag() {
		let seen: Recorder<Value> = Recorder::default();
		let seen2 = Arc::clone(&seen);

		let mut program = Program::new("test").with_version("1.2.3");
		assert_eq!(program.version(), Some("1.2.3"));

		program.register(
			CommandBuilder::new("go", "")
				.with_action(move |invocation| {
					record(&seen2, invocation.flags["version"].clone());
					Ok(())
				})
				.build()
		).expect("Registration failed.");

		// The global flag parses and clears the unknown-option check.
		let outcome = block_on(program.run(["go", "--version"])).expect("Run failed.");
		assert_eq!(outcome, Outcome::Completed);
		assert_eq!(recorded(&seen), vec![Value::Bool(true)]);
	}

	#[test]
	fn t_plugins() {
		/// # Canned Plugin.
		struct Canned(Recorder<Vec<Value>>);

		impl Plugin for Canned {
			fn name(&self) -> &str { "canned" }
			fn setup(&self) -> BoxFuture<'_, Contribution> {
				let seen = Arc::clone(&self.0);
				Box::pin(futures::future::ready(
					Contribution::default()
						.with_tool("answer", 42_u32)
						.with_command(
							CommandBuilder::new("contributed", "")
								.with_action(move |invocation| {
									assert_eq!(
										invocation.tools.get::<u32>("answer"),
										Some(&42),
									);
									record(&seen, invocation.args);
									Ok(())
								})
								.build()
						)
				))
			}
		}

		for mode in [BootstrapMode::Sequential, BootstrapMode::Concurrent] {
			let seen: Recorder<Vec<Value>> = Recorder::default();

			let mut program = Program::new("test")
				.with_plugin(Canned(Arc::clone(&seen)))
				.with_bootstrap(mode);

			let outcome = block_on(program.run(["contributed"])).expect("Run failed.");
			assert_eq!(outcome, Outcome::Completed, "mode {mode:?}");
			assert_eq!(recorded(&seen).len(), 1, "mode {mode:?}");

			// Bootstrap is once-per-program.
			let outcome = block_on(program.run(["contributed"])).expect("Run failed.");
			assert_eq!(outcome, Outcome::Completed, "mode {mode:?}");
		}
	}

	#[test]
	fn t_command_source() {
		/// # Canned Source.
		struct Canned;

		impl CommandSource for Canned {
			fn load(&self) -> BoxFuture<'_, Result<Vec<Command>, BoxError>> {
				Box::pin(futures::future::ready(Ok(vec![
					CommandBuilder::new("loaded", "").with_action(|_| Ok(())).build(),
				])))
			}
		}

		let mut program = Program::new("test").with_command_source(Canned);
		let outcome = block_on(program.run(["loaded"])).expect("Run failed.");
		assert_eq!(outcome, Outcome::Completed);

		/// # Broken Source.
		struct Broken;

		impl CommandSource for Broken {
			fn load(&self) -> BoxFuture<'_, Result<Vec<Command>, BoxError>> {
				Box::pin(futures::future::ready(Err("manifest unreadable".into())))
			}
		}

		let mut program = Program::new("test").with_command_source(Broken);
		assert!(matches!(
			block_on(program.run(["anything"])),
			Err(Error::Source(_)),
		));
	}

	#[test]
	fn t_double_dash() {
		let mut program = Program::new("test").with_double_dash(true);
		program.register(
			CommandBuilder::new("exec", "").with_action(|_| Ok(())).build()
		).expect("Registration failed.");

		// Everything after `--` is quarantined from flag parsing; in
		// particular, `--bogus` never reaches the unknown-option check.
		let outcome = block_on(program.run(["exec", "--", "--bogus"]))
			.expect("Run failed.");
		assert_eq!(outcome, Outcome::Completed);
	}
}
