/*!
# Paisley: Plugins and Command Sources.

Plugins are named units of setup work that run once, during program
bootstrap, before any argument ever gets parsed. Each one hands back a
[`Contribution`] — tools, global options, commands — which the program folds
in, in registration order.

Command sources are the simpler cousin: an async loader that produces
commands from somewhere external (a manifest, a directory scan, the
network), with no other say in program shape.
*/

use crate::{
	BoxError,
	Command,
	OptionSpec,
	Tools,
};
use futures::future::BoxFuture;
use std::fmt;



/// # Program Plugin.
///
/// Implementors declare a stable [`name`](Plugin::name) (later registrations
/// under the same name replace earlier ones, keeping their queue position)
/// and a [`setup`](Plugin::setup) pass producing a [`Contribution`].
pub trait Plugin: Send + Sync {
	/// # Plugin Name.
	fn name(&self) -> &str;

	/// # Set Up.
	///
	/// Runs once at bootstrap; the returned contribution gets folded into
	/// the program before argument parsing begins.
	fn setup(&self) -> BoxFuture<'_, Contribution>;
}


/// # External Command Source.
///
/// Loaded at bootstrap, after plugins; every produced command goes through
/// the normal registration path (duplicates and all).
pub trait CommandSource: Send + Sync {
	/// # Load Commands.
	///
	/// ## Errors
	///
	/// Implementors may fail for any reason; the program surfaces it as
	/// [`Error::Source`](crate::Error::Source).
	fn load(&self) -> BoxFuture<'_, Result<Vec<Command>, BoxError>>;
}



#[derive(Default)]
/// # Plugin Contribution.
///
/// Everything one plugin's setup pass wants folded into the program.
pub struct Contribution {
	/// # Capability Additions.
	pub tools: Tools,

	/// # Program-Wide Options.
	pub global_options: Vec<OptionSpec>,

	/// # Commands to Register.
	pub commands: Vec<Command>,
}

impl fmt::Debug for Contribution {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Contribution")
			.field("tools", &self.tools)
			.field("global_options", &self.global_options)
			.field("commands", &self.commands.len())
			.finish()
	}
}

impl Contribution {
	#[must_use]
	/// # With Tool.
	pub fn with_tool<T: std::any::Any + Send + Sync>(mut self, key: &str, value: T) -> Self {
		self.tools.insert(key, value);
		self
	}

	#[must_use]
	/// # With Program-Wide Option.
	pub fn with_global_option(mut self, option: OptionSpec) -> Self {
		self.global_options.push(option);
		self
	}

	#[must_use]
	/// # With Command.
	pub fn with_command(mut self, command: Command) -> Self {
		self.commands.push(command);
		self
	}
}



#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
/// # Plugin Bootstrap Mode.
pub enum BootstrapMode {
	#[default]
	/// # One at a Time.
	///
	/// Setup passes run to completion in registration order, so plugins
	/// with external side effects never overlap.
	Sequential,

	/// # All at Once.
	///
	/// Setup passes run concurrently; contributions still fold in
	/// registration order, so merge results match sequential mode whenever
	/// the passes themselves are independent.
	Concurrent,
}



#[derive(Default)]
/// # Registered Plugin Set.
///
/// Keyed by plugin name. Re-registering a name swaps the plugin in place,
/// preserving its original queue position.
pub(crate) struct PluginSet(Vec<Box<dyn Plugin>>);

impl fmt::Debug for PluginSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list()
			.entries(self.0.iter().map(|p| p.name()))
			.finish()
	}
}

impl PluginSet {
	/// # Register a Plugin.
	pub(crate) fn register(&mut self, plugin: Box<dyn Plugin>) {
		if let Some(existing) = self.0.iter_mut().find(|p| p.name() == plugin.name()) {
			*existing = plugin;
		}
		else { self.0.push(plugin); }
	}

	#[must_use]
	/// # Number of Plugins.
	pub(crate) fn len(&self) -> usize { self.0.len() }

	#[must_use]
	/// # Empty?
	pub(crate) fn is_empty(&self) -> bool { self.0.is_empty() }

	/// # Bootstrap!
	///
	/// Run every setup pass per `mode` and return the contributions in
	/// registration order.
	pub(crate) async fn bootstrap(&self, mode: BootstrapMode) -> Vec<Contribution> {
		match mode {
			BootstrapMode::Sequential => {
				let mut out = Vec::with_capacity(self.0.len());
				for plugin in &self.0 { out.push(plugin.setup().await); }
				out
			},
			BootstrapMode::Concurrent => futures::future::join_all(
				self.0.iter().map(|p| p.setup())
			).await,
		}
	}
}



#[cfg(test)]
mod test {
	use super::*;

	/// # Canned Plugin.
	struct Canned(&'static str, u32);

	impl Plugin for Canned {
		fn name(&self) -> &str { self.0 }
		fn setup(&self) -> BoxFuture<'_, Contribution> {
			Box::pin(futures::future::ready(
				Contribution::default().with_tool("n", self.1)
			))
		}
	}

	#[test]
	fn t_replace_in_place() {
		let mut plugins = PluginSet::default();
		plugins.register(Box::new(Canned("a", 1)));
		plugins.register(Box::new(Canned("b", 2)));
		plugins.register(Box::new(Canned("a", 3)));

		assert_eq!(plugins.len(), 2);

		// The replacement kept "a" first in the queue.
		let contributions = futures::executor::block_on(
			plugins.bootstrap(BootstrapMode::Sequential)
		);
		let values: Vec<Option<&u32>> = contributions.iter()
			.map(|c| c.tools.get::<u32>("n"))
			.collect();
		assert_eq!(values, vec![Some(&3), Some(&2)]);
	}

	#[test]
	fn t_bootstrap_modes_agree() {
		let mut plugins = PluginSet::default();
		plugins.register(Box::new(Canned("a", 1)));
		plugins.register(Box::new(Canned("b", 2)));

		for mode in [BootstrapMode::Sequential, BootstrapMode::Concurrent] {
			let contributions = futures::executor::block_on(plugins.bootstrap(mode));
			let values: Vec<Option<&u32>> = contributions.iter()
				.map(|c| c.tools.get::<u32>("n"))
				.collect();
			assert_eq!(values, vec![Some(&1), Some(&2)], "mode {mode:?}");
		}
	}
}
