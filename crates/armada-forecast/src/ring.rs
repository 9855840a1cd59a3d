/// Maps turn offsets (0 = the current turn) onto fixed physical slots of a
/// circular buffer, so advancing the frame one turn is a single index bump
/// rather than a shift of every per-turn array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnRing {
    start: usize,
    len: usize,
}

impl TurnRing {
    pub fn new(len: usize) -> Self {
        debug_assert!(len > 0, "ring must cover at least the current turn");
        TurnRing { start: 0, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Physical slot for a turn offset.
    pub fn index(&self, offset: usize) -> usize {
        debug_assert!(offset < self.len, "offset {offset} beyond horizon {}", self.len);
        (self.start + offset) % self.len
    }

    /// Rotate the frame one turn forward: yesterday's offset 1 becomes
    /// today's offset 0, and the slot that held offset 0 is recycled as the
    /// farthest offset.
    pub fn advance(&mut self) {
        self.start = (self.start + 1) % self.len;
    }
}
