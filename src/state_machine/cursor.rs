/// Lower bound (Unix seconds) of the next fetch window.
///
/// Only moves forward: advancing to an earlier time is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cursor(i64);

impl Cursor {
    pub fn new(from_date: i64) -> Self {
        Self(from_date)
    }

    pub fn get(&self) -> i64 {
        self.0
    }

    pub fn advance(&mut self, now: i64) {
        self.0 = self.0.max(now);
    }
}
