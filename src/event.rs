/*!
# Paisley: Lifecycle Events.

Collaborators get told what the program is up to through a closed event
type rather than stringly-typed channel names. Observers are plain
callbacks, invoked synchronously in subscription order with no payload
transformation.
*/

use std::fmt;



/// # Observer Callback.
pub type Observer = Box<dyn Fn(&Event) + Send + Sync>;



#[derive(Debug, Clone, Eq, PartialEq)]
#[non_exhaustive]
/// # Lifecycle Event.
pub enum Event {
	/// # Command Registered.
	Registered {
		/// # Canonical Command Name.
		command: String,
	},

	/// # Run Starting.
	BeforeRun,

	/// # Dispatching to a Command.
	Dispatch {
		/// # Canonical Command Name.
		command: String,
	},

	/// # No Command Matched.
	NoMatch,

	/// # Run Finished.
	AfterRun,

	/// # Captured Handler Failure.
	Error {
		/// # Rendered Failure Message.
		message: String,
	},
}



#[derive(Default)]
/// # Observer List.
pub(crate) struct Observers(Vec<Observer>);

impl fmt::Debug for Observers {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Observers({})", self.0.len())
	}
}

impl Observers {
	/// # Subscribe.
	pub(crate) fn subscribe(&mut self, observer: Observer) {
		self.0.push(observer);
	}

	/// # Emit an Event.
	///
	/// Observers run synchronously, in subscription order.
	pub(crate) fn emit(&self, event: &Event) {
		for observer in &self.0 { observer(event); }
	}
}



#[cfg(test)]
mod test {
	use super::*;
	use std::sync::{
		Arc,
		Mutex,
	};

	#[test]
	fn t_subscription_order() {
		let seen = Arc::new(Mutex::new(Vec::new()));

		let mut observers = Observers::default();
		for tag in ["first", "second"] {
			let seen = Arc::clone(&seen);
			observers.subscribe(Box::new(move |e: &Event| {
				if let Ok(mut s) = seen.lock() { s.push((tag, e.clone())); }
			}));
		}

		observers.emit(&Event::BeforeRun);
		observers.emit(&Event::NoMatch);

		let seen = seen.lock().map(|s| s.clone()).unwrap_or_default();
		assert_eq!(
			seen,
			vec![
				("first", Event::BeforeRun),
				("second", Event::BeforeRun),
				("first", Event::NoMatch),
				("second", Event::NoMatch),
			],
		);
	}
}
