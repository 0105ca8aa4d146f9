/*!
# Paisley: Errors.
*/

use thiserror::Error;



/// # Boxed Error.
///
/// The catch-all payload for failures originating outside the library:
/// command handlers and command sources.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;



#[derive(Debug, Error)]
#[non_exhaustive]
/// # Error!
///
/// Everything here is fatal to the current `run` invocation. The first five
/// variants are library-raised and always propagate; [`Error::Handler`] and
/// [`Error::Source`] wrap failures from user code, which the program can be
/// configured to capture instead. See [`Error::is_library`].
pub enum Error {
	/// # Duplicate Command.
	#[error("a command is already registered by the name `{0}`")]
	DuplicateCommand(String),

	/// # Missing Required Argument(s).
	#[error("missing required argument(s) for command `{0}`")]
	MissingArgument(String),

	/// # Unknown Option.
	#[error("unknown option `{0}`")]
	UnknownOption(String),

	/// # Missing Option Value.
	#[error("option `{0}` value is missing")]
	MissingOptionValue(String),

	/// # No Handler Attached.
	#[error("command `{0}` is not implemented")]
	NotImplemented(String),

	/// # Handler Failure.
	#[error("command handler failed: {0}")]
	Handler(#[source] BoxError),

	/// # Command Source Failure.
	#[error("command source failed: {0}")]
	Source(#[source] BoxError),
}

impl Error {
	#[must_use]
	/// # Library-Raised?
	///
	/// `true` for errors raised by the library's own bookkeeping, as opposed
	/// to failures bubbling out of user-supplied handlers or sources.
	pub const fn is_library(&self) -> bool {
		! matches!(self, Self::Handler(_) | Self::Source(_))
	}
}
