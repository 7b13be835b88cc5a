//! Code fence detection for view block recognition.
//!
//! Fences in `CommonMark` use three or more backticks or tildes. A closing
//! fence must use the same character and be at least as long as the opening
//! one.

/// An opening code fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fence {
    /// Fence character (backtick or tilde).
    pub ch: char,
    /// Number of fence characters.
    pub len: usize,
}

impl Fence {
    /// Parse an opening fence at the start of `trimmed`.
    ///
    /// Returns the fence and the info string that follows it.
    pub(crate) fn open(trimmed: &str) -> Option<(Self, &str)> {
        let ch = trimmed.chars().next()?;
        if ch != '`' && ch != '~' {
            return None;
        }

        let len = trimmed.chars().take_while(|&c| c == ch).count();
        if len < 3 {
            return None;
        }
        // Fence characters are ASCII, so `len` is also a byte offset.
        Some((Self { ch, len }, &trimmed[len..]))
    }

    /// Check whether `trimmed` closes this fence.
    ///
    /// Only whitespace may follow the closing fence characters.
    pub(crate) fn is_closed_by(self, trimmed: &str) -> bool {
        let count = trimmed.chars().take_while(|&c| c == self.ch).count();
        count >= self.len && trimmed[count..].chars().all(char::is_whitespace)
    }
}

/// Tracks whether line-by-line processing is inside a fenced code block.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<Fence>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Update fence state with the next line.
    ///
    /// Returns `true` if the line opened or closed a fence.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();
        match self.open {
            Some(fence) => {
                if fence.is_closed_by(trimmed) {
                    self.open = None;
                    return true;
                }
                false
            }
            None => {
                self.open = Fence::open(trimmed).map(|(fence, _)| fence);
                self.open.is_some()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_backtick_fence_with_info() {
        let (fence, info) = Fence::open("```likec4-view browser=false").unwrap();
        assert_eq!(fence, Fence { ch: '`', len: 3 });
        assert_eq!(info, "likec4-view browser=false");
    }

    #[test]
    fn test_open_long_tilde_fence() {
        let (fence, info) = Fence::open("~~~~~likec4-view").unwrap();
        assert_eq!(fence, Fence { ch: '~', len: 5 });
        assert_eq!(info, "likec4-view");
    }

    #[test]
    fn test_two_backticks_not_fence() {
        assert!(Fence::open("``likec4-view").is_none());
        assert!(Fence::open("likec4-view").is_none());
        assert!(Fence::open("").is_none());
    }

    #[test]
    fn test_closing_fence_rules() {
        let fence = Fence { ch: '`', len: 4 };
        assert!(fence.is_closed_by("````"));
        assert!(fence.is_closed_by("`````  "));
        assert!(!fence.is_closed_by("```"));
        assert!(!fence.is_closed_by("~~~~"));
        assert!(!fence.is_closed_by("```` trailing"));
    }

    #[test]
    fn test_tracker_skips_fenced_content() {
        let mut tracker = FenceTracker::new();
        assert!(!tracker.in_fence());

        assert!(tracker.update("````markdown"));
        assert!(tracker.in_fence());

        // Shorter fence inside does not close the outer block
        assert!(!tracker.update("```likec4-view"));
        assert!(!tracker.update("```"));
        assert!(tracker.in_fence());

        assert!(tracker.update("````"));
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_tracker_regular_lines() {
        let mut tracker = FenceTracker::new();
        assert!(!tracker.update("Some text with ``code``"));
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_tracker_indented_fence() {
        let mut tracker = FenceTracker::new();
        assert!(tracker.update("  ~~~python"));
        assert!(tracker.in_fence());
        assert!(tracker.update("~~~"));
        assert!(!tracker.in_fence());
    }
}
