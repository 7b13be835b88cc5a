//! Recognition and replacement of `likec4-view` fenced blocks.
//!
//! A view block is exactly three lines:
//!
//! ````markdown
//! ```likec4-view [options]
//! <view id>
//! ```
//! ````
//!
//! The closing fence must repeat the opening indentation exactly and use the
//! same fence character, at least as long as the opening fence. Blocks with
//! more than one content line, a blank content line, or a mismatched closing
//! fence are ordinary code blocks and stay untouched, as do view blocks
//! nested inside other fenced code blocks.

use crate::fence::{Fence, FenceTracker};
use crate::options::ViewOptions;

/// Info string tag that marks a view block.
const BLOCK_TAG: &str = "likec4-view";

/// A `likec4-view` block located in page markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewBlock<'a> {
    /// Byte offset of the first character of the opening fence line.
    pub start: usize,
    /// Byte offset just past the closing fence (before its line ending).
    pub end: usize,
    /// Indentation shared by the opening and closing fence.
    pub indent: &'a str,
    /// Option text after the `likec4-view` tag, trimmed.
    pub options_text: &'a str,
    /// View id from the content line, trimmed.
    pub view_id: &'a str,
}

impl ViewBlock<'_> {
    /// Parse the block's options.
    #[must_use]
    pub fn options(&self) -> ViewOptions {
        ViewOptions::parse(self.options_text, self.view_id)
    }
}

/// A line of input with its byte offset; `text` excludes the line ending.
struct Line<'a> {
    start: usize,
    text: &'a str,
}

fn split_lines(input: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut start = 0;
    for raw in input.split_inclusive('\n') {
        let text = raw.strip_suffix('\n').unwrap_or(raw);
        let text = text.strip_suffix('\r').unwrap_or(text);
        lines.push(Line { start, text });
        start += raw.len();
    }
    lines
}

/// Try to match a view block starting at `lines[0]`.
fn match_block<'a>(lines: &[Line<'a>]) -> Option<ViewBlock<'a>> {
    let [opening, content, closing, ..] = lines else {
        return None;
    };

    let body = opening.text.trim_start_matches([' ', '\t']);
    let indent = &opening.text[..opening.text.len() - body.len()];

    let (fence, info) = Fence::open(body)?;
    let options_text = info.strip_prefix(BLOCK_TAG)?;

    let view_id = content.text.trim();
    if view_id.is_empty() {
        return None;
    }

    let closing_body = closing.text.strip_prefix(indent)?;
    if !closing_body.starts_with(fence.ch) || !fence.is_closed_by(closing_body) {
        return None;
    }

    Some(ViewBlock {
        start: opening.start,
        end: closing.start + closing.text.len(),
        indent,
        options_text: options_text.trim(),
        view_id,
    })
}

/// Find all view blocks in `markdown`, in document order.
#[must_use]
pub fn find_view_blocks(markdown: &str) -> Vec<ViewBlock<'_>> {
    let lines = split_lines(markdown);
    let mut blocks = Vec::new();
    let mut fence = FenceTracker::new();
    let mut i = 0;

    while i < lines.len() {
        if !fence.in_fence()
            && let Some(block) = match_block(&lines[i..])
        {
            blocks.push(block);
            i += 3;
            continue;
        }
        fence.update(lines[i].text);
        i += 1;
    }

    blocks
}

/// Rewrites view blocks in page markdown.
///
/// The `render` callback receives the parsed options of each block, left to
/// right, and returns the replacement markup. The block's indentation is kept
/// in front of the replacement; everything outside view blocks is copied
/// through unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct ViewBlockRewriter;

impl ViewBlockRewriter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Replace every view block in `markdown` with the output of `render`.
    #[must_use]
    pub fn rewrite<F>(&self, markdown: &str, mut render: F) -> String
    where
        F: FnMut(ViewOptions) -> String,
    {
        let blocks = find_view_blocks(markdown);
        if blocks.is_empty() {
            return markdown.to_owned();
        }

        let mut output = String::with_capacity(markdown.len());
        let mut last = 0;
        for block in blocks {
            output.push_str(&markdown[last..block.start]);
            output.push_str(block.indent);
            output.push_str(&render(block.options()));
            last = block.end;
        }
        output.push_str(&markdown[last..]);
        output
    }
}
