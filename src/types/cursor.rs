/// Index into a fixed-length sequence that wraps back to zero at the end.
///
/// For an empty sequence the cursor stays at zero and `current` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclicCursor {
    index: usize,
    len: usize,
}

impl CyclicCursor {
    pub fn new(len: usize) -> Self {
        CyclicCursor { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn current(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.index)
    }

    /// Jumps to `index`, wrapped into range. No-op when empty.
    pub fn set(&mut self, index: usize) {
        if self.len > 0 {
            self.index = index % self.len;
        }
    }

    /// Moves to the next position, wrapping at the end. No-op when empty.
    pub fn advance(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }
}
