/*!
# Paisley: Numeric Literals.

Whether or not a raw CLI value gets upgraded from string to number is part
of the parser's external contract, so the grammar lives here in one place:
an optionally-signed integer or decimal with an optional exponent, or a
`0x`-prefixed hex literal.
*/

use serde_json::Number;



/// # Numeric Literal?
///
/// Returns `true` if the string matches the numeric-literal grammar, i.e.
/// would be coerced to a number by [`to_number`].
pub(crate) fn is_number(raw: &str) -> bool {
	is_hex(raw.as_bytes()) || is_decimal(raw.as_bytes())
}

/// # Coerce to Number.
///
/// Convert a raw string into a [`Number`], if it matches the grammar and
/// fits a representable value. Hex literals and plain integers parse as
/// integers; everything else goes through `f64`. Out-of-range values come
/// back `None` and are left as strings by the caller.
pub(crate) fn to_number(raw: &str) -> Option<Number> {
	let bytes = raw.as_bytes();

	if is_hex(bytes) {
		return u64::from_str_radix(&raw[2..], 16).ok().map(Number::from);
	}

	if ! is_decimal(bytes) { return None; }

	// Integers keep their integer-ness when they fit.
	if bytes.iter().all(|b| b.is_ascii_digit() || matches!(b, b'-' | b'+')) {
		if let Ok(n) = raw.parse::<i64>() { return Some(Number::from(n)); }
	}

	raw.parse::<f64>().ok().and_then(Number::from_f64)
}

/// # Numeric Tail?
///
/// Returns `true` if the string *ends* with an unsigned-or-negative integer,
/// optionally fractioned and/or exponented. This is the cluster-scan rule
/// that lets `-t2` assign `2` to `t`; it is looser on the left (anything may
/// precede the number) and stricter than the main grammar on the right (no
/// leading `.`, no `+` signs, lowercase exponent only).
pub(crate) fn has_numeric_tail(raw: &str) -> bool {
	(0..raw.len()).any(|start| raw.is_char_boundary(start) && is_tail(raw[start..].as_bytes()))
}

/// # Tail Literal?
///
/// `-?\d+(\.\d*)?(e-?\d+)?`, anchored both ends.
const fn is_tail(mut bytes: &[u8]) -> bool {
	if let [b'-', rest @ ..] = bytes { bytes = rest; }

	let [b'0'..=b'9', rest @ ..] = bytes else { return false; };
	bytes = rest;
	while let [b'0'..=b'9', rest @ ..] = bytes { bytes = rest; }

	if let [b'.', rest @ ..] = bytes {
		bytes = rest;
		while let [b'0'..=b'9', r @ ..] = bytes { bytes = r; }
	}

	if let [b'e', rest @ ..] = bytes {
		bytes = rest;
		if let [b'-', rest @ ..] = bytes { bytes = rest; }

		let [b'0'..=b'9', rest @ ..] = bytes else { return false; };
		bytes = rest;
		while let [b'0'..=b'9', rest @ ..] = bytes { bytes = rest; }
	}

	bytes.is_empty()
}

/// # Hex Literal?
///
/// `0x` or `0X` followed by at least one hex digit.
const fn is_hex(mut bytes: &[u8]) -> bool {
	let [b'0', b'x' | b'X', rest @ ..] = bytes else { return false; };
	if rest.is_empty() { return false; }
	bytes = rest;

	while let [a, rest @ ..] = bytes {
		if ! a.is_ascii_hexdigit() { return false; }
		bytes = rest;
	}

	true
}

/// # Decimal Literal?
///
/// Optional sign, then either `digits[.digits*]` or `.digits+`, then an
/// optional `e`/`E` exponent with its own optional sign.
const fn is_decimal(mut bytes: &[u8]) -> bool {
	// Strip the sign, if any.
	if let [b'-' | b'+', rest @ ..] = bytes { bytes = rest; }

	// The integer part.
	let mut digits = 0_usize;
	while let [b'0'..=b'9', rest @ ..] = bytes {
		digits += 1;
		bytes = rest;
	}

	// The fractional part.
	if let [b'.', rest @ ..] = bytes {
		bytes = rest;
		while let [b'0'..=b'9', rest @ ..] = bytes {
			digits += 1;
			bytes = rest;
		}
	}

	// Gotta have at least one digit by now.
	if digits == 0 { return false; }

	// The exponent.
	if let [b'e' | b'E', rest @ ..] = bytes {
		bytes = rest;
		if let [b'-' | b'+', rest @ ..] = bytes { bytes = rest; }

		let [b'0'..=b'9', rest @ ..] = bytes else { return false; };
		bytes = rest;
		while let [b'0'..=b'9', rest @ ..] = bytes { bytes = rest; }
		return bytes.is_empty();
	}

	bytes.is_empty()
}
