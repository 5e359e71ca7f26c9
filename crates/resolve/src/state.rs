use unionkit_cases::Union;

use crate::flow::Flow;

/// Mutable state of one resolution pass. Created per call and dropped at its end.
pub(crate) struct ResolverState<K, R> {
	pub(crate) current: Union<K>,
	value: Option<R>,
	broken: bool,
	otherwise_seen: bool,
}

impl<K, R> ResolverState<K, R> {
	pub(crate) fn new(current: Union<K>) -> Self {
		Self {
			current,
			value: None,
			broken: false,
			otherwise_seen: false,
		}
	}

	#[inline]
	pub(crate) fn is_broken(&self) -> bool {
		self.broken
	}

	#[inline]
	pub(crate) fn has_value(&self) -> bool {
		self.value.is_some()
	}

	pub(crate) fn accept_and_break(&mut self, value: R) {
		self.value = Some(value);
		self.broken = true;
	}

	pub(crate) fn mark_otherwise(&mut self) {
		self.otherwise_seen = true;
	}

	/// Applies a clause outcome. `Value` is handed to `on_value`; `Break` ends the pass.
	pub(crate) fn settle<T>(&mut self, flow: Flow<T>, on_value: impl FnOnce(&mut Self, T)) {
		match flow {
			Flow::Value(value) => on_value(self, value),
			Flow::Continue => {}
			Flow::Break => self.broken = true,
		}
	}

	/// Ends the pass and returns the recorded result, if any.
	pub(crate) fn finish(self, pass: &'static str) -> Option<R> {
		tracing::trace!(
			pass,
			resolved = self.value.is_some(),
			broken = self.broken,
			otherwise_seen = self.otherwise_seen,
			"resolution pass finished"
		);
		self.value
	}

	#[inline]
	pub(crate) fn otherwise_seen(&self) -> bool {
		self.otherwise_seen
	}
}
