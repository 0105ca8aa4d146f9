/*!
# Paisley: Parser Configuration.
*/

use serde_json::Value;
use std::{
	collections::{
		BTreeMap,
		BTreeSet,
	},
	fmt,
	sync::Arc,
};



/// # Unknown-Flag Callback.
///
/// Invoked for every flag-like token not covered by the alias, boolean, or
/// string declarations, with the raw argument, the key it would be written
/// under (when there is one), and the value it would receive. Returning
/// `false` suppresses that key without aborting the parse.
///
/// Bare (non-flag) tokens are run through the same callback with no key or
/// value, in which case `false` drops them from the positional output.
pub type UnknownHandler = Arc<dyn Fn(&str, Option<&str>, Option<&Value>) -> bool + Send + Sync>;



#[derive(Default)]
/// # Parser Configuration.
///
/// Declarations that shape a [`parse`](crate::parse) pass: aliases,
/// boolean/string/collectable/negatable key lists, default values, and the
/// scan-level toggles. Everything is optional; an empty configuration
/// parses flags best-effort with numeric coercion and nothing else.
///
/// ## Examples
///
/// ```
/// use paisley::ParserConfig;
///
/// let config = ParserConfig::default()
///     .with_boolean("force")
///     .with_alias("force", ["f"])
///     .with_collect("include")
///     .with_default("level", 3.into());
///
/// let parsed = paisley::parse(["-f", "in.txt"], &config);
/// assert_eq!(parsed.flags["force"], true);
/// assert_eq!(parsed.flags["f"], true);
/// assert_eq!(parsed.flags["level"], 3);
/// ```
pub struct ParserConfig {
	/// # Alias Table.
	///
	/// Canonical name to equivalent names; expanded symmetrically before
	/// scanning so every spelling fans out to every other.
	pub(super) aliases: BTreeMap<String, Vec<String>>,

	/// # Boolean Keys.
	pub(super) boolean: BTreeSet<String>,

	/// # String Keys.
	///
	/// Exempt from numeric coercion. The pseudo-key `_` exempts the
	/// positional output instead.
	pub(super) string: BTreeSet<String>,

	/// # Collectable Keys.
	pub(super) collect: BTreeSet<String>,

	/// # Negatable Keys.
	pub(super) negatable: BTreeSet<String>,

	/// # Default Values.
	///
	/// Applied after the scan for any key still absent.
	pub(super) defaults: BTreeMap<String, Value>,

	/// # Stop at First Positional?
	pub(super) stop_early: bool,

	/// # Separate Double-Dash Bucket?
	///
	/// When set, tokens after a literal `--` land in [`Parsed::rest`](crate::Parsed)
	/// instead of being merged into the positional output.
	pub(super) double_dash: bool,

	/// # Unknown-Flag Callback.
	pub(super) unknown: Option<UnknownHandler>,
}

impl fmt::Debug for ParserConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ParserConfig")
			.field("aliases", &self.aliases)
			.field("boolean", &self.boolean)
			.field("string", &self.string)
			.field("collect", &self.collect)
			.field("negatable", &self.negatable)
			.field("defaults", &self.defaults)
			.field("stop_early", &self.stop_early)
			.field("double_dash", &self.double_dash)
			.field("unknown", &self.unknown.is_some())
			.finish()
	}
}

impl ParserConfig {
	#[must_use]
	/// # With Alias(es).
	///
	/// Declare equivalent names for `key`. Every spelling receives the
	/// identical value at write time.
	pub fn with_alias<I, S>(mut self, key: &str, aliases: I) -> Self
	where I: IntoIterator<Item=S>, S: Into<String> {
		self.aliases.entry(key.to_owned())
			.or_default()
			.extend(aliases.into_iter().map(Into::into));
		self
	}

	#[must_use]
	/// # With Boolean Key.
	///
	/// Boolean keys never consume a lookahead token and default to `false`
	/// when absent.
	pub fn with_boolean(mut self, key: &str) -> Self {
		self.boolean.insert(key.to_owned());
		self
	}

	#[must_use]
	/// # With Boolean Keys.
	pub fn with_booleans<I, S>(mut self, keys: I) -> Self
	where I: IntoIterator<Item=S>, S: Into<String> {
		self.boolean.extend(keys.into_iter().map(Into::into));
		self
	}

	#[must_use]
	/// # With String Key.
	///
	/// String keys keep their raw text even when it looks numeric.
	pub fn with_string(mut self, key: &str) -> Self {
		self.string.insert(key.to_owned());
		self
	}

	#[must_use]
	/// # With Collectable Key.
	///
	/// Repeat occurrences accumulate into an array instead of overwriting.
	pub fn with_collect(mut self, key: &str) -> Self {
		self.collect.insert(key.to_owned());
		self
	}

	#[must_use]
	/// # With Negatable Key.
	///
	/// A `--no-<key>` token sets `<key>` to `false` instead of tripping the
	/// unknown-flag path.
	pub fn with_negatable(mut self, key: &str) -> Self {
		self.negatable.insert(key.to_owned());
		self
	}

	#[must_use]
	/// # With Default Value.
	pub fn with_default(mut self, key: &str, value: Value) -> Self {
		self.defaults.insert(key.to_owned(), value);
		self
	}

	#[must_use]
	/// # Stop at First Positional.
	///
	/// Halt flag parsing at the first non-flag token; everything after it
	/// is appended to the positional output verbatim.
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
}
