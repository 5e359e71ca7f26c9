/// What a clause body tells the pass that ran it.
///
/// Signals are plain values consumed by the resolver method that invoked the body, so
/// they never leak into an enclosing pass and survive `.await` points unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow<R> {
	/// The clause produced a result.
	Value(R),
	/// Abandon this clause only; the pass moves on to the next one.
	Continue,
	/// Abandon the whole pass, keeping whatever result it already has.
	Break,
}

impl Flow<()> {
	/// Normal completion of a side-effect-only body.
	pub const DONE: Self = Flow::Value(());
}

impl<R> Flow<R> {
	#[inline]
	pub fn is_break(&self) -> bool {
		matches!(self, Self::Break)
	}

	pub fn map<U>(self, f: impl FnOnce(R) -> U) -> Flow<U> {
		match self {
			Self::Value(value) => Flow::Value(f(value)),
			Self::Continue => Flow::Continue,
			Self::Break => Flow::Break,
		}
	}
}

impl From<()> for Flow<()> {
	fn from((): ()) -> Self {
		Flow::DONE
	}
}
