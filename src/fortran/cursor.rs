//! Stack of speculative cursor frames.
//!
//! Every grammar production pushes a frame before attempting a match and
//! resolves it exactly once before returning: `commit` keeps the advanced
//! offset, `rollback` restores the position from before the push. The stack
//! is strictly LIFO and mirrors call nesting, so the depth after any
//! production call equals the depth before it.

/// Nested speculative positions into the source buffer.
///
/// The top frame is the current cursor. The stack is never empty; the root
/// frame is created at offset 0 and survives the whole parse.
#[derive(Debug, Clone)]
pub struct CursorStack {
    frames: Vec<usize>,
}

impl CursorStack {
    pub fn new() -> Self {
        CursorStack { frames: vec![0] }
    }

    /// Current offset (the top frame).
    pub fn offset(&self) -> usize {
        *self.frames.last().expect("cursor stack is never empty")
    }

    /// Move the current frame to an absolute offset.
    pub fn set(&mut self, offset: usize) {
        *self.frames.last_mut().expect("cursor stack is never empty") = offset;
    }

    /// Advance the current frame by a number of code points.
    pub fn advance(&mut self, count: usize) {
        let offset = self.offset();
        self.set(offset + count);
    }

    /// Open a speculative frame duplicating the current offset.
    ///
    /// Returns the offset the new frame starts at.
    pub fn push(&mut self) -> usize {
        let offset = self.offset();
        self.frames.push(offset);
        offset
    }

    /// Close the top frame, folding its advanced offset into the parent.
    pub fn commit(&mut self) {
        debug_assert!(self.frames.len() > 1, "commit without a matching push");
        let child = self.frames.pop().expect("cursor stack is never empty");
        self.set(child);
    }

    /// Close the top frame, discarding any speculative advancement.
    pub fn rollback(&mut self) {
        debug_assert!(self.frames.len() > 1, "rollback without a matching push");
        self.frames.pop();
    }

    /// Number of open frames, root included.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

impl Default for CursorStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_duplicates_current_offset() {
        let mut cursors = CursorStack::new();
        cursors.set(7);
        assert_eq!(cursors.push(), 7);
        assert_eq!(cursors.offset(), 7);
        assert_eq!(cursors.depth(), 2);
    }

    #[test]
    fn test_commit_keeps_advancement() {
        let mut cursors = CursorStack::new();
        cursors.push();
        cursors.advance(5);
        cursors.commit();
        assert_eq!(cursors.offset(), 5);
        assert_eq!(cursors.depth(), 1);
    }

    #[test]
    fn test_rollback_discards_advancement() {
        let mut cursors = CursorStack::new();
        cursors.set(3);
        cursors.push();
        cursors.advance(10);
        cursors.rollback();
        assert_eq!(cursors.offset(), 3);
        assert_eq!(cursors.depth(), 1);
    }

    #[test]
    fn test_nested_frames_resolve_independently() {
        let mut cursors = CursorStack::new();
        cursors.push();
        cursors.advance(2);
        cursors.push();
        cursors.advance(4);
        // Inner attempt fails, outer succeeds.
        cursors.rollback();
        assert_eq!(cursors.offset(), 2);
        cursors.commit();
        assert_eq!(cursors.offset(), 2);
        assert_eq!(cursors.depth(), 1);
    }
}
