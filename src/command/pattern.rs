/*!
# Paisley: Declaration Patterns.

Helpers for the string mini-grammar used by command patterns and option
declarations: `<name>` (required), `[name]` (optional), `[...name]` /
`<...name>` (variadic), and kebab-case to camelCase key normalization.
*/

use super::ArgSpec;



/// # Strip Bracket Syntax.
///
/// Return everything before the first `<` or `[`, trimmed. This is how a
/// raw pattern like `add <...files>` becomes the matchable name `add`.
pub(crate) fn remove_brackets(raw: &str) -> &str {
	raw.find(['<', '[']).map_or(raw, |pos| &raw[..pos]).trim()
}

/// # Collect Bracketed Arguments.
///
/// Scan a raw pattern left-to-right and return a spec for every `<...>`
/// and `[...]` group, in the order written. A leading ellipsis marks the
/// argument variadic.
pub(crate) fn find_all_brackets(raw: &str) -> Vec<ArgSpec> {
	let mut out = Vec::new();
	let mut rest = raw;

	while let Some(open) = rest.find(['<', '[']) {
		let required = rest.as_bytes()[open] == b'<';
		let close = if required { '>' } else { ']' };

		let Some(len) = rest[open + 1..].find(close) else { break; };
		let body = &rest[open + 1..open + 1 + len];
		rest = &rest[open + 1 + len + 1..];

		if body.is_empty() { continue; }

		let (name, variadic) = body.strip_prefix("...")
			.map_or((body, false), |stripped| (stripped, true));

		out.push(ArgSpec {
			name: name.to_owned(),
			required,
			variadic,
		});
	}

	out
}

/// # CamelCase.
///
/// Collapse `kebab-case` into `camelCase`: a dash sandwiched between two
/// lowercase ASCII letters is dropped and the trailing letter upper-cased.
/// Everything else passes through untouched.
pub(crate) fn camelcase(raw: &str) -> String {
	let mut out = String::with_capacity(raw.len());
	let mut chars = raw.chars().peekable();

	while let Some(c) = chars.next() {
		if c == '-' {
			if let Some(&next) = chars.peek() {
				if next.is_ascii_lowercase() && out.ends_with(|p: char| p.is_ascii_lowercase()) {
					out.push(next.to_ascii_uppercase());
					chars.next();
					continue;
				}
			}
		}
		out.push(c);
	}

	out
}

/// # CamelCase an Option Name.
///
/// Dotted keys are nested; only the first segment gets camel-cased so the
/// leaf structure survives round trips through the parser.
pub(crate) fn camelcase_option_name(name: &str) -> String {
	match name.split_once('.') {
		Some((head, tail)) => {
			let mut out = camelcase(head);
			out.push('.');
			out.push_str(tail);
			out
		},
		None => camelcase(name),
	}
}
