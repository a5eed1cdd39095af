use std::time::Duration;

/// Default deadline for [`ActorContext::ask`](crate::ActorContext::ask).
pub const DEFAULT_ASK_TIMEOUT: Duration = Duration::from_millis(1000);

/// Configuration shared by every actor of one system.
#[derive(Debug, Clone)]
pub struct ActorSystemConfig {
	pub(crate) name: String,
	pub(crate) ask_timeout: Duration,
}

impl ActorSystemConfig {
	/// Sets the system name, used as the root actor's name and path prefix.
	///
	/// # Panics
	///
	/// Panics if `name` is empty or contains `/`.
	#[must_use]
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		let name = name.into();
		assert!(!name.is_empty() && !name.contains('/'), "system name must be a non-empty path segment");
		self.name = name;
		self
	}

	/// Sets the default ask deadline.
	///
	/// # Panics
	///
	/// Panics if `timeout` is zero.
	#[must_use]
	pub fn with_ask_timeout(mut self, timeout: Duration) -> Self {
		assert!(!timeout.is_zero(), "ask timeout must be > 0");
		self.ask_timeout = timeout;
		self
	}

	/// Returns the system name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the default ask deadline.
	pub fn ask_timeout(&self) -> Duration {
		self.ask_timeout
	}
}

impl Default for ActorSystemConfig {
	fn default() -> Self {
		Self {
			name: "system".to_string(),
			ask_timeout: DEFAULT_ASK_TIMEOUT,
		}
	}
}
