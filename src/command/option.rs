/*!
# Paisley: Option Specifications.
*/

use super::pattern;
use serde_json::Value;



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Option Kind.
///
/// Derived from the declaration's bracket style: `<...>` requires a value,
/// `[...]` makes one optional, and no brackets at all means a boolean flag.
pub enum OptionKind {
	/// # Boolean Flag.
	Boolean,

	/// # Value Required.
	Required,

	/// # Value Optional.
	Optional,
}



#[derive(Debug, Clone)]
/// # Option Specification.
///
/// Parsed from a raw declaration string like `-m, --message <message>`,
/// `--no-commit`, or `--env.name <name>`.
///
/// Name variants are camel-cased and sorted shortest-first; the longest one
/// is the canonical name. A `no-` prefix on any variant marks the option
/// negated (and strips the prefix), which also forces a `true` default when
/// none was given.
///
/// ## Examples
///
/// ```
/// use paisley::{OptionKind, OptionSpec};
///
/// let opt = OptionSpec::new("-m, --message <message>", "Commit message.");
/// assert_eq!(opt.name(), "message");
/// assert_eq!(opt.aliases(), ["m", "message"]);
/// assert_eq!(opt.kind(), OptionKind::Required);
///
/// let opt = OptionSpec::new("--no-commit", "Skip the commit.");
/// assert!(opt.is_negated());
/// assert_eq!(opt.kind(), OptionKind::Boolean);
/// assert_eq!(opt.default(), Some(&true.into()));
/// ```
pub struct OptionSpec {
	/// # Raw Declaration.
	raw: String,

	/// # Description.
	description: String,

	/// # Canonical Name.
	name: String,

	/// # Name Variants.
	///
	/// Shortest-first; the canonical name is last.
	aliases: Vec<String>,

	/// # Kind.
	kind: OptionKind,

	/// # Variadic Value?
	variadic: bool,

	/// # Negated?
	negated: bool,

	/// # Default Value.
	default: Option<Value>,
}

impl OptionSpec {
	#[must_use]
	/// # New Option.
	///
	/// Parse a raw declaration string. The mini-grammar is forgiving; junk
	/// shapes just produce odd names rather than errors, in keeping with
	/// the parser's own degrade-don't-die policy.
	pub fn new(raw: &str, description: &str) -> Self {
		// A dot-star declaration (`--env.* [value]`) collapses to its root.
		let raw: String = raw.replace(".*", "");

		let mut negated = false;
		let mut aliases: Vec<String> = pattern::remove_brackets(&raw)
			.split(',')
			.filter_map(|v| {
				let mut name = v.trim().trim_start_matches('-');
				if let Some(stripped) = name.strip_prefix("no-") {
					negated = true;
					name = stripped;
				}

				if name.is_empty() { None }
				else { Some(pattern::camelcase_option_name(name)) }
			})
			.collect();
		aliases.sort_by_key(String::len);

		let name = aliases.last().cloned().unwrap_or_default();

		let kind =
			if raw.contains('<') { OptionKind::Required }
			else if raw.contains('[') { OptionKind::Optional }
			else { OptionKind::Boolean };

		let variadic = pattern::find_all_brackets(&raw)
			.iter()
			.any(|a| a.variadic);

		Self {
			raw,
			description: description.to_owned(),
			name,
			aliases,
			kind,
			variadic,
			negated,
			default: negated.then(|| Value::Bool(true)),
		}
	}

	#[must_use]
	/// # With Default Value.
	pub fn with_default(mut self, value: Value) -> Self {
		self.default = Some(value);
		self
	}

	#[must_use]
	/// # Raw Declaration.
	pub fn raw(&self) -> &str { &self.raw }

	#[must_use]
	/// # Description.
	pub fn description(&self) -> &str { &self.description }

	#[must_use]
	/// # Canonical Name.
	pub fn name(&self) -> &str { &self.name }

	#[must_use]
	/// # Name Variants.
	pub fn aliases(&self) -> &[String] { &self.aliases }

	#[must_use]
	/// # Kind.
	pub const fn kind(&self) -> OptionKind { self.kind }

	#[must_use]
	/// # Boolean Flag?
	pub fn is_boolean(&self) -> bool { matches!(self.kind, OptionKind::Boolean) }

	#[must_use]
	/// # Value Required?
	pub fn is_required(&self) -> bool { matches!(self.kind, OptionKind::Required) }

	#[must_use]
	/// # Variadic?
	pub const fn is_variadic(&self) -> bool { self.variadic }

	#[must_use]
	/// # Negated?
	pub const fn is_negated(&self) -> bool { self.negated }

	#[must_use]
	/// # Default Value.
	pub const fn default(&self) -> Option<&Value> { self.default.as_ref() }

	#[must_use]
	/// # Known Name Variant?
	///
	/// Dotted lookups match on the root segment.
	pub fn matches(&self, name: &str) -> bool {
		let root = name.split('.').next().unwrap_or(name);
		self.aliases.iter().any(|a| a == root || a.split('.').next() == Some(root))
	}
}
