/*!
# Paisley: Flag Parser.

A stateful, single-pass scanner that converts a flat argument vector into
positional values plus a flag mapping, with one token of lookahead.

Malformed flag syntax never raises; unrecognized shapes degrade to a
best-effort positional or boolean interpretation, because CLI input is
unpredictable and hard failures on syntax make for lousy UX. The only veto
point is the caller-supplied [unknown-flag callback](UnknownHandler).
*/

mod config;
mod num;

pub use config::{
	ParserConfig,
	UnknownHandler,
};
use serde_json::{
	Map,
	Value,
};
use std::collections::{
	BTreeMap,
	BTreeSet,
};



#[derive(Debug, Clone, Default, PartialEq)]
/// # Parsed Result.
///
/// Positional values (strings, or numbers when they match the numeric
/// grammar), the flag mapping, and — when double-dash handling is enabled —
/// the untouched tokens that followed the `--` terminator.
pub struct Parsed {
	/// # Positional Values.
	pub args: Vec<Value>,

	/// # Flag Mapping.
	///
	/// Values are booleans, strings, numbers, arrays (collectable keys), or
	/// nested mappings (dotted keys).
	pub flags: Map<String, Value>,

	/// # Everything After `--`.
	///
	/// Only populated when [`ParserConfig::with_double_dash`] is set;
	/// otherwise post-terminator tokens are merged into [`Parsed::args`]
	/// as-are.
	pub rest: Vec<String>,
}



/// # Parse Arguments.
///
/// Scan `args` left-to-right against `config` and return the structured
/// result. See the [module docs](self) and [`ParserConfig`] for the full
/// rundown of the recognized shapes.
///
/// ## Examples
///
/// ```
/// use paisley::ParserConfig;
///
/// let parsed = paisley::parse(
///     ["add", "--user.name=sid", "-p", "55", "one", "two"],
///     &ParserConfig::default(),
/// );
///
/// let expected: Vec<serde_json::Value> = vec!["add".into(), "one".into(), "two".into()];
/// assert_eq!(parsed.args, expected);
/// assert_eq!(parsed.flags["user"]["name"], "sid");
/// assert_eq!(parsed.flags["p"], 55); // Numeric coercion.
/// ```
pub fn parse<I>(args: I, config: &ParserConfig) -> Parsed
where I: IntoIterator, I::Item: Into<String> {
	let mut tokens: Vec<String> = args.into_iter().map(Into::into).collect();

	// Tokens after a literal "--" bypass flag parsing entirely.
	let not_flags: Vec<String> = tokens.iter()
		.position(|t| t == "--")
		.map_or_else(Vec::new, |pos| {
			let trailing = tokens.split_off(pos + 1);
			tokens.truncate(pos);
			trailing
		});

	let mut scan = Scanner::new(config);
	let mut out = Parsed::default();

	let mut i = 0;
	while i < tokens.len() {
		let arg = &tokens[i];
		let consumed = scan.token(arg, tokens.get(i + 1), &mut out.args);
		i += 1 + usize::from(consumed);

		// Everything left over is positional, flag-shaped or not.
		if config.stop_early && scan.stopped {
			out.args.extend(tokens[i..].iter().cloned().map(Value::String));
			break;
		}
	}

	scan.backfill();
	out.flags = scan.flags;

	if config.double_dash { out.rest = not_flags; }
	else {
		out.args.extend(not_flags.into_iter().map(Value::String));
	}

	out
}



/// # Scan State.
///
/// The normalized configuration — alias closure expanded, with
/// string/collect/negatable membership propagated across aliases — plus the
/// flag mapping being accumulated.
struct Scanner<'a> {
	/// # Alias Closure.
	aliases: BTreeMap<String, Vec<String>>,

	/// # Boolean Keys.
	///
	/// Deliberately *not* propagated across aliases; the scanner asks
	/// [`Scanner::alias_is_boolean`] at decision points instead.
	bools: BTreeSet<String>,

	/// # String Keys.
	strings: BTreeSet<String>,

	/// # Collectable Keys.
	collect: BTreeSet<String>,

	/// # Negatable Keys.
	negatable: BTreeSet<String>,

	/// # Default Values.
	defaults: &'a BTreeMap<String, Value>,

	/// # Unknown-Flag Callback.
	unknown: Option<&'a UnknownHandler>,

	/// # Accumulated Flags.
	flags: Map<String, Value>,

	/// # Hit a Positional While Stopping Early?
	stopped: bool,
}

impl<'a> Scanner<'a> {
	/// # New Scanner.
	///
	/// Expand the alias table symmetrically and propagate the string,
	/// collect, and negatable declarations across it.
	fn new(config: &'a ParserConfig) -> Self {
		let mut aliases: BTreeMap<String, Vec<String>> = BTreeMap::new();
		for (key, vals) in &config.aliases {
			aliases.insert(key.clone(), vals.clone());
			for alias in vals {
				let mut back = vec![key.clone()];
				back.extend(vals.iter().filter(|v| *v != alias).cloned());
				aliases.insert(alias.clone(), back);
			}
		}

		/// # Propagate a Key Set Across the Alias Closure.
		fn spread(src: &BTreeSet<String>, aliases: &BTreeMap<String, Vec<String>>)
		-> BTreeSet<String> {
			let mut out = src.clone();
			for key in src {
				if let Some(more) = aliases.get(key) {
					out.extend(more.iter().cloned());
				}
			}
			out
		}

		Self {
			bools: config.boolean.clone(),
			strings: spread(&config.string, &aliases),
			collect: spread(&config.collect, &aliases),
			negatable: spread(&config.negatable, &aliases),
			aliases,
			defaults: &config.defaults,
			unknown: config.unknown.as_ref(),
			flags: Map::new(),
			stopped: false,
		}
	}

	/// # Scan One Token.
	///
	/// Classify `arg` by prefix shape and write the corresponding flag or
	/// positional value. Returns `true` if the lookahead token was consumed
	/// as a value.
	fn token(&mut self, arg: &str, next: Option<&String>, positional: &mut Vec<Value>)
	-> bool {
		// Empty tokens not associated with a key are pointless.
		if arg.is_empty() { return false; }

		// --key=value.
		if let Some((key, value)) = arg.strip_prefix("--").and_then(|r| r.split_once('=')) {
			if ! key.is_empty() {
				if self.bools.contains(key) {
					// Boolean-typed keys coerce through a truth test rather
					// than keeping the literal string.
					self.set_arg(key, Value::Bool(value != "false"), Some(arg), true);
				}
				else {
					let key = crate::command::pattern::camelcase_option_name(key);
					self.set_arg(&key, Value::String(value.to_owned()), Some(arg), true);
				}
				return false;
			}
		}

		// --no-key, when key is registered negatable.
		if let Some(key) = arg.strip_prefix("--no-") {
			if ! key.is_empty() && self.negatable.contains(key) {
				self.set_arg(key, Value::Bool(false), Some(arg), false);
				return false;
			}
		}

		// --key, value maybe following.
		if let Some(key) = arg.strip_prefix("--") {
			if ! key.is_empty() {
				return self.long_key(key, arg, next);
			}
		}

		// -abc short-flag cluster.
		if 1 < arg.len() && arg.starts_with('-') && ! arg[1..].starts_with('-') {
			return self.cluster(arg, next);
		}

		// A bare positional token, subject to the same veto as flags.
		if self.unknown.map_or(true, |cb| cb(arg, None, None)) {
			if ! self.strings.contains("_") && num::is_number(arg) {
				positional.push(num::to_number(arg).map_or_else(
					|| Value::String(arg.to_owned()),
					Value::Number,
				));
			}
			else { positional.push(Value::String(arg.to_owned())); }
		}
		self.stopped = true;

		false
	}

	/// # Long Key Without `=`.
	///
	/// Look ahead one token: a non-flag-shaped follower is consumed as the
	/// value unless the key (or any of its aliases) is boolean-declared, in
	/// which case literal `true`/`false` followers still coerce.
	fn long_key(&mut self, key: &str, arg: &str, next: Option<&String>) -> bool {
		if let Some(next) = next {
			if
				! next.starts_with('-') &&
				! self.bools.contains(key) &&
				! self.alias_is_boolean(key)
			{
				self.set_arg(key, Value::String(next.clone()), Some(arg), true);
				return true;
			}

			if next == "true" || next == "false" {
				self.set_arg(key, Value::Bool(next == "true"), Some(arg), true);
				return true;
			}
		}

		self.set_arg(key, self.flag_fallback(key), Some(arg), true);
		false
	}

	/// # Short-Flag Cluster.
	///
	/// Each letter is a candidate flag. An embedded `=`, a numeric suffix,
	/// or a non-word boundary terminates the cluster and assigns the
	/// remainder to the current letter; otherwise every letter goes boolean
	/// and the final one may still consume the lookahead token.
	fn cluster(&mut self, arg: &str, next_token: Option<&String>) -> bool {
		let chars: Vec<char> = arg.chars().collect();
		let letters = &chars[1..chars.len() - 1];

		let mut broken = false;
		for (j, letter) in letters.iter().copied().enumerate() {
			let key = letter.to_string();
			let suffix: String = chars[j + 2..].iter().collect();

			if suffix == "-" {
				self.set_arg(&key, Value::String(suffix), Some(arg), true);
				continue;
			}

			if letter.is_ascii_alphabetic() && suffix.contains('=') {
				let value = suffix.split_once('=').map_or(String::new(), |(_, v)| v.to_owned());
				self.set_arg(&key, Value::String(value), Some(arg), true);
				broken = true;
				break;
			}

			if letter.is_ascii_alphabetic() && num::has_numeric_tail(&suffix) {
				self.set_arg(&key, Value::String(suffix), Some(arg), true);
				broken = true;
				break;
			}

			// A non-word neighbor means the rest is a value.
			if letters.get(j + 1).is_some_and(|&c| ! (c.is_ascii_alphanumeric() || c == '_')) {
				self.set_arg(&key, Value::String(suffix), Some(arg), true);
				broken = true;
				break;
			}

			self.set_arg(&key, self.flag_fallback(&key), Some(arg), true);
		}

		// The last letter might still want the next token.
		let Some(key) = chars.last().map(char::to_string) else { return false; };
		if ! broken && key != "-" {
			if let Some(next) = next_token {
				if
					! flag_shaped(next) &&
					! self.bools.contains(&key) &&
					! self.alias_is_boolean(&key)
				{
					self.set_arg(&key, Value::String(next.clone()), Some(arg), true);
					return true;
				}

				if next == "true" || next == "false" {
					self.set_arg(&key, Value::Bool(next == "true"), Some(arg), true);
					return true;
				}
			}

			self.set_arg(&key, self.flag_fallback(&key), Some(arg), true);
		}

		false
	}

	/// # Valueless Fallback.
	///
	/// A flag with no value is boolean `true`, or the empty string if the
	/// key is string-declared.
	fn flag_fallback(&self, key: &str) -> Value {
		if self.strings.contains(key) { Value::String(String::new()) }
		else { Value::Bool(true) }
	}

	/// # Is Any Alias Boolean?
	fn alias_is_boolean(&self, key: &str) -> bool {
		self.aliases.get(key)
			.is_some_and(|a| a.iter().any(|x| self.bools.contains(x)))
	}

	/// # Declared Key?
	///
	/// Keys covered by the boolean, string, or alias declarations skip the
	/// unknown-flag callback.
	fn arg_defined(&self, key: &str) -> bool {
		self.bools.contains(key) ||
		self.strings.contains(key) ||
		self.aliases.contains_key(key)
	}

	/// # Write a Flag.
	///
	/// Apply the unknown-flag veto, numeric coercion, and alias fan-out,
	/// then write the final value under every spelling of the key.
	fn set_arg(&mut self, key: &str, value: Value, arg: Option<&str>, collect: bool) {
		if let Some(arg) = arg {
			if ! self.arg_defined(key) {
				if let Some(cb) = self.unknown {
					if ! cb(arg, Some(key), Some(&value)) { return; }
				}
			}
		}

		let value = match value {
			Value::String(s) =>
				if ! self.strings.contains(key) && num::is_number(&s) {
					num::to_number(&s).map_or(Value::String(s), Value::Number)
				}
				else { Value::String(s) },
			other => other,
		};

		self.set_key(key, value.clone(), collect);
		if let Some(aliases) = self.aliases.get(key).cloned() {
			for alias in aliases {
				self.set_key(&alias, value.clone(), collect);
			}
		}
	}

	/// # Write a Key.
	///
	/// Dotted names build/extend a nested mapping; collect semantics apply
	/// at the leaf.
	fn set_key(&mut self, name: &str, value: Value, collect: bool) {
		let collectable = collect && self.collect.contains(name);

		let mut cur = &mut self.flags;
		let mut parts = name.split('.').peekable();
		while let Some(part) = parts.next() {
			if parts.peek().is_none() {
				write_leaf(cur, part, value, collectable);
				return;
			}

			// Descend, replacing any non-mapping intermediate.
			if ! cur.get(part).is_some_and(Value::is_object) {
				cur.insert(part.to_owned(), Value::Object(Map::new()));
			}
			let Some(Value::Object(next)) = cur.get_mut(part) else { return; };
			cur = next;
		}
	}

	/// # Post-Scan Backfill.
	///
	/// Apply defaults for absent declared keys, then `false` (or `[]` if
	/// collectable) for absent booleans and `[]` for absent collectable
	/// strings, so declared keys are never missing from the result.
	fn backfill(&mut self) {
		for (key, value) in self.defaults {
			if ! has_key(&self.flags, key) {
				self.set_key(key, value.clone(), true);

				if let Some(aliases) = self.aliases.get(key).cloned() {
					for alias in aliases {
						self.set_key(&alias, value.clone(), true);
					}
				}
			}
		}

		for key in self.bools.clone() {
			if ! has_key(&self.flags, &key) {
				let value =
					if self.collect.contains(&key) { Value::Array(Vec::new()) }
					else { Value::Bool(false) };
				self.set_key(&key, value, false);
			}
		}

		for key in self.strings.clone() {
			if self.collect.contains(&key) && ! has_key(&self.flags, &key) {
				self.set_key(&key, Value::Array(Vec::new()), false);
			}
		}
	}
}



/// # Write a Leaf Value.
///
/// Collectable keys accumulate: first write wraps into an array, later
/// writes append, and a pre-existing scalar gets folded in.
fn write_leaf(map: &mut Map<String, Value>, key: &str, value: Value, collectable: bool) {
	if ! collectable {
		map.insert(key.to_owned(), value);
		return;
	}

	match map.get_mut(key) {
		None => { map.insert(key.to_owned(), Value::Array(vec![value])); },
		Some(Value::Array(list)) => { list.push(value); },
		Some(other) => {
			let old = other.take();
			*other = Value::Array(vec![old, value]);
		},
	}
}

/// # Dotted Key Present?
fn has_key(map: &Map<String, Value>, name: &str) -> bool {
	let mut cur = map;
	let mut parts = name.split('.').peekable();
	while let Some(part) = parts.next() {
		if parts.peek().is_none() { return cur.contains_key(part); }
		match cur.get(part) {
			Some(Value::Object(next)) => { cur = next; },
			_ => return false,
		}
	}

	false
}

/// # Flag-Shaped?
///
/// One or two dashes followed by something other than another dash. Used
/// for cluster lookahead; a lone `-` is *not* flag-shaped.
fn flag_shaped(token: &str) -> bool {
	let stripped = token.strip_prefix("--").or_else(|| token.strip_prefix('-'));
	stripped.is_some_and(|rest| ! rest.is_empty() && ! rest.starts_with('-'))
}



#[cfg(test)]
mod test {
	use super::*;

	/// # Shorthand Config.
	fn cfg() -> ParserConfig { ParserConfig::default() }

	/// # Shorthand Parse.
	fn p(args: &[&str], config: &ParserConfig) -> Parsed {
		parse(args.iter().copied(), config)
	}

	#[test]
	fn t_boolean_no_lookahead() {
		// A boolean-declared key must not consume the next token.
		let parsed = p(&["--foo", "bar"], &cfg().with_boolean("foo"));
		assert_eq!(parsed.flags["foo"], true);
		assert_eq!(parsed.args, vec![Value::String("bar".to_owned())]);

		// Undeclared, it does.
		let parsed = p(&["--foo", "bar"], &cfg());
		assert_eq!(parsed.flags["foo"], "bar");
		assert!(parsed.args.is_empty());
	}

	#[test]
	fn t_boolean_absent_backfill() {
		let parsed = p(
			&["-x", "-z", "one"],
			&cfg().with_booleans(["x", "y", "z"]),
		);
		assert_eq!(parsed.flags["x"], true);
		assert_eq!(parsed.flags["y"], false); // Declared but absent.
		assert_eq!(parsed.flags["z"], true);
		assert_eq!(parsed.args, vec![Value::String("one".to_owned())]);
	}

	#[test]
	fn t_boolean_equals_truth_test() {
		let config = cfg().with_boolean("verbose");
		assert_eq!(p(&["--verbose=false"], &config).flags["verbose"], false);
		assert_eq!(p(&["--verbose=true"], &config).flags["verbose"], true);
		assert_eq!(p(&["--verbose=nope"], &config).flags["verbose"], true);
	}

	#[test]
	fn t_boolean_literal_lookahead() {
		// true/false literals coerce even for boolean-declared keys.
		let parsed = p(&["--verbose", "false"], &cfg().with_boolean("verbose"));
		assert_eq!(parsed.flags["verbose"], false);
		assert!(parsed.args.is_empty());
	}

	#[test]
	fn t_alias_fan_out() {
		let parsed = p(
			&["-h", "v"],
			&cfg().with_boolean("herp").with_alias("herp", ["h"]),
		);
		assert_eq!(parsed.flags["herp"], true);
		assert_eq!(parsed.flags["h"], true);
		assert_eq!(parsed.args, vec![Value::String("v".to_owned())]);

		// Same through the long spelling.
		let parsed = p(
			&["--herp", "v"],
			&cfg().with_boolean("herp").with_alias("herp", ["h"]),
		);
		assert_eq!(parsed.flags["herp"], true);
		assert_eq!(parsed.flags["h"], true);
	}

	#[test]
	fn t_dotted_keys() {
		let parsed = p(&["--user.name=sid"], &cfg());
		assert_eq!(parsed.flags["user"]["name"], "sid");
		assert!(parsed.args.is_empty());

		// Deeper, with sibling merge.
		let parsed = p(&["--a.b.c=1", "--a.b.d", "2"], &cfg());
		assert_eq!(parsed.flags["a"]["b"]["c"], 1);
		assert_eq!(parsed.flags["a"]["b"]["d"], 2);
	}

	#[test]
	fn t_numeric_coercion() {
		let parsed = p(&["-p", "55"], &cfg());
		assert_eq!(parsed.flags["p"], 55);

		// String-declared keys are exempt.
		let parsed = p(&["-p", "55"], &cfg().with_string("p"));
		assert_eq!(parsed.flags["p"], "55");

		// Positionals coerce too, unless `_` is string-declared.
		let parsed = p(&["55", "0xff", "1.5"], &cfg());
		assert_eq!(
			parsed.args,
			vec![Value::from(55), Value::from(255), Value::from(1.5)],
		);

		let parsed = p(&["55"], &cfg().with_string("_"));
		assert_eq!(parsed.args, vec![Value::String("55".to_owned())]);
	}

	#[test]
	fn t_equals_syntax() {
		let parsed = p(&["--tacos=good", "--count=3"], &cfg());
		assert_eq!(parsed.flags["tacos"], "good");
		assert_eq!(parsed.flags["count"], 3);

		// Keys camel-case on the way in.
		let parsed = p(&["--clear-screen=yes"], &cfg());
		assert_eq!(parsed.flags["clearScreen"], "yes");
	}

	#[test]
	fn t_cluster() {
		// Boolean letters, then a final letter consuming the lookahead.
		let parsed = p(&["-abc", "val"], &cfg());
		assert_eq!(parsed.flags["a"], true);
		assert_eq!(parsed.flags["b"], true);
		assert_eq!(parsed.flags["c"], "val");

		// A numeric suffix terminates the cluster.
		let parsed = p(&["-t2"], &cfg());
		assert_eq!(parsed.flags["t"], 2);

		// So does an embedded equals.
		let parsed = p(&["-k=val"], &cfg());
		assert_eq!(parsed.flags["k"], "val");

		// And a non-word boundary.
		let parsed = p(&["-x/foo/bar"], &cfg());
		assert_eq!(parsed.flags["x"], "/foo/bar");
	}

	#[test]
	fn t_negation() {
		let config = cfg().with_negatable("commit").with_default("commit", Value::Bool(true));
		let parsed = p(&["--no-commit"], &config);
		assert_eq!(parsed.flags["commit"], false);

		// Unregistered negation falls through to a plain (unknown) flag.
		let parsed = p(&["--no-frobnicate"], &cfg());
		assert_eq!(parsed.flags["no-frobnicate"], true);
	}

	#[test]
	fn t_collect() {
		let config = cfg().with_collect("include");
		let parsed = p(&["--include", "a", "--include", "b"], &config);
		assert_eq!(
			parsed.flags["include"],
			Value::Array(vec!["a".into(), "b".into()]),
		);

		// Single occurrence still wraps.
		let parsed = p(&["--include", "a"], &config);
		assert_eq!(parsed.flags["include"], Value::Array(vec!["a".into()]));

		// Absent collectable booleans land as [] rather than false.
		let config = cfg().with_boolean("tag").with_collect("tag");
		let parsed = p(&[] as &[&str], &config);
		assert_eq!(parsed.flags["tag"], Value::Array(Vec::new()));

		// Negation bypasses collection.
		let config = cfg().with_collect("commit").with_negatable("commit");
		let parsed = p(&["--commit", "a", "--no-commit"], &config);
		assert_eq!(parsed.flags["commit"], false);
	}

	#[test]
	fn t_defaults() {
		let config = cfg()
			.with_default("level", 3.into())
			.with_default("env.name", "dev".into())
			.with_alias("level", ["l"]);

		let parsed = p(&[] as &[&str], &config);
		assert_eq!(parsed.flags["level"], 3);
		assert_eq!(parsed.flags["l"], 3); // Defaults fan out too.
		assert_eq!(parsed.flags["env"]["name"], "dev");

		// Explicit values win.
		let parsed = p(&["-l", "9"], &config);
		assert_eq!(parsed.flags["level"], 9);
		assert_eq!(parsed.flags["l"], 9);
	}

	#[test]
	fn t_stop_early() {
		let parsed = p(
			&["--verbose", "build", "--target", "x"],
			&cfg().with_boolean("verbose").with_stop_early(true),
		);
		assert_eq!(parsed.flags["verbose"], true);
		assert!(! parsed.flags.contains_key("target"));
		assert_eq!(
			parsed.args,
			vec![
				Value::String("build".to_owned()),
				Value::String("--target".to_owned()),
				Value::String("x".to_owned()),
			],
		);
	}

	#[test]
	fn t_double_dash() {
		// Disabled: trailing tokens merge into the positionals.
		let parsed = p(&["a", "--", "--b", "c"], &cfg());
		assert_eq!(
			parsed.args,
			vec![
				Value::String("a".to_owned()),
				Value::String("--b".to_owned()),
				Value::String("c".to_owned()),
			],
		);
		assert!(parsed.rest.is_empty());

		// Enabled: they get their own bucket, verbatim.
		let parsed = p(&["a", "--", "--b", "c"], &cfg().with_double_dash(true));
		assert_eq!(parsed.args, vec![Value::String("a".to_owned())]);
		assert_eq!(parsed.rest, vec!["--b".to_owned(), "c".to_owned()]);
	}

	#[test]
	fn t_unknown_veto() {
		use std::sync::Arc;

		// Suppress anything it hasn't seen declared.
		let config = cfg()
			.with_boolean("ok")
			.with_unknown(Arc::new(|_, key, _| key.is_none()));

		// The veto suppresses the write, but the lookahead token was still
		// consumed as the (discarded) value, so nothing lands positional.
		let parsed = p(&["--ok", "--bogus", "plain"], &config);
		assert_eq!(parsed.flags["ok"], true);
		assert!(! parsed.flags.contains_key("bogus"));
		assert!(parsed.args.is_empty());

		// A flag-shaped follower is never consumed, vetoed or not.
		let parsed = p(&["--bogus", "--ok"], &config);
		assert!(! parsed.flags.contains_key("bogus"));
		assert_eq!(parsed.flags["ok"], true);

		// Vetoing positionals works too.
		let config = cfg().with_unknown(Arc::new(|_, key, _| key.is_some()));
		let parsed = p(&["--bogus", "x", "plain"], &config);
		assert_eq!(parsed.flags["bogus"], "x");
		assert!(parsed.args.is_empty());
	}

	#[test]
	fn t_idempotent_positionals() {
		// Re-parsing a flag-free positional sequence yields the same thing.
		let parsed = p(&["one", "two", "3"], &cfg());
		let again = parse(
			parsed.args.iter().map(|v| match v {
				Value::String(s) => s.clone(),
				other => other.to_string(),
			}),
			&cfg(),
		);
		assert_eq!(parsed.args, again.args);
	}

	#[test]
	fn t_string_fallback_empty() {
		// A valueless string-declared key lands as "" rather than true.
		let parsed = p(&["--name"], &cfg().with_string("name"));
		assert_eq!(parsed.flags["name"], "");
	}
}
