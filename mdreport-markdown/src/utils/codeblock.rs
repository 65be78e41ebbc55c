/// State tracking for backtick code fences in Markdown.
///
/// Tracks whether a line sits inside a fenced block and remembers the length
/// of the opening fence so that only a matching (or longer) fence closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FenceTracker {
  in_code_block: bool,
  fence_count:   usize,
}

/// What a single line means for the fence state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceEvent<'a> {
  /// The line opens a fence. Carries the (possibly empty) info string.
  Open(&'a str),
  /// The line closes the current fence.
  Close,
  /// The line is ordinary text, inside or outside a fence.
  Text,
}

impl FenceTracker {
  /// Create a new fence tracker.
  #[must_use]
  pub const fn new() -> Self {
    Self {
      in_code_block: false,
      fence_count:   0,
    }
  }

  /// Check if currently inside a code block.
  #[must_use]
  pub const fn in_code_block(&self) -> bool {
    self.in_code_block
  }

  /// Classify a line and return the updated state.
  ///
  /// Call this for each line, in order, to keep the state accurate.
  #[must_use]
  pub fn process_line<'a>(&self, line: &'a str) -> (Self, FenceEvent<'a>) {
    let trimmed = line.trim();
    let fence_count = trimmed.chars().take_while(|&c| c == '`').count();

    if fence_count < 3 {
      return (*self, FenceEvent::Text);
    }

    let info = trimmed[fence_count..].trim();

    if !self.in_code_block {
      // Backticks in the info string would make this inline code
      if info.contains('`') {
        return (*self, FenceEvent::Text);
      }
      let opened = Self {
        in_code_block: true,
        fence_count,
      };
      return (opened, FenceEvent::Open(info));
    }

    if info.is_empty() && fence_count >= self.fence_count {
      return (Self::new(), FenceEvent::Close);
    }

    (*self, FenceEvent::Text)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_fence_tracker_basic() {
    let tracker = FenceTracker::new();
    assert!(!tracker.in_code_block());

    let (tracker, event) = tracker.process_line("```rust");
    assert_eq!(event, FenceEvent::Open("rust"));
    assert!(tracker.in_code_block());

    let (tracker, event) = tracker.process_line("fn main() {}");
    assert_eq!(event, FenceEvent::Text);
    assert!(tracker.in_code_block());

    let (tracker, event) = tracker.process_line("```");
    assert_eq!(event, FenceEvent::Close);
    assert!(!tracker.in_code_block());
  }

  #[test]
  fn test_fence_tracker_count() {
    let (tracker, _) = FenceTracker::new().process_line("````");
    assert!(tracker.in_code_block());

    // 3 backticks don't close a 4-backtick fence
    let (tracker, event) = tracker.process_line("```");
    assert_eq!(event, FenceEvent::Text);
    assert!(tracker.in_code_block());

    let (tracker, event) = tracker.process_line("````");
    assert_eq!(event, FenceEvent::Close);
    assert!(!tracker.in_code_block());
  }

  #[test]
  fn test_fence_tracker_indented() {
    let (tracker, event) = FenceTracker::new().process_line("    ```bash");
    assert_eq!(event, FenceEvent::Open("bash"));

    let (tracker, event) = tracker.process_line("    ```");
    assert_eq!(event, FenceEvent::Close);
    assert!(!tracker.in_code_block());
  }

  #[test]
  fn test_fence_with_info_does_not_close() {
    let (tracker, _) = FenceTracker::new().process_line("```");
    let (tracker, event) = tracker.process_line("```mermaid");
    assert_eq!(event, FenceEvent::Text);
    assert!(tracker.in_code_block());
  }

  #[test]
  fn test_inline_triple_backticks_are_text() {
    let (tracker, event) = FenceTracker::new().process_line("```x``` inline");
    assert_eq!(event, FenceEvent::Text);
    assert!(!tracker.in_code_block());
  }
}
