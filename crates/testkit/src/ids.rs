//! Mock identity assignment.

/// Monotonically increasing identity counter.
///
/// The counter is a plain value owned by whoever assigns identities, so two
/// executors never share hidden state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdSequence {
    next: i64,
}

impl IdSequence {
    /// Creates a sequence whose first identity is `start`.
    pub fn new(start: i64) -> Self {
        Self { next: start }
    }

    /// Returns the next identity and advances.
    pub fn next_id(&mut self) -> i64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Returns the identity the next call will hand out.
    #[inline]
    pub fn peek(&self) -> i64 {
        self.next
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new(1)
    }
}
