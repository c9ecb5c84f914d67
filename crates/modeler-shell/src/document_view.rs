use diagram::Document;
use ropey::Rope;

/// Read-only scrolling view over the current diagram source.
///
/// The rope is rebuilt only when the document revision changes, so redraws
/// between content changes cost nothing.
#[derive(Clone)]
pub struct DocumentView {
    rope: Rope,
    revision: Option<u64>,
    viewport_offset: usize,
    viewport_height: usize,
}

impl DocumentView {
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            revision: None,
            viewport_offset: 0,
            viewport_height: 24, // Updated on draw
        }
    }

    /// Pick up `doc` if it is a different revision. Returns whether the view changed.
    pub fn sync(&mut self, doc: &Document) -> bool {
        if self.revision == Some(doc.revision) {
            return false;
        }

        self.rope = Rope::from_str(&doc.xml);
        self.revision = Some(doc.revision);
        self.clamp_offset();
        true
    }

    pub fn revision(&self) -> Option<u64> {
        self.revision
    }

    pub fn line_count(&self) -> usize {
        // ropey counts the empty line after a trailing newline
        let lines = self.rope.len_lines();
        if lines > 1 && self.rope.line(lines - 1).len_chars() == 0 {
            lines - 1
        } else {
            lines
        }
    }

    pub fn viewport_offset(&self) -> usize {
        self.viewport_offset
    }

    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height.max(1);
        self.clamp_offset();
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.viewport_offset = self.viewport_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.viewport_offset = self.viewport_offset.saturating_add(lines);
        self.clamp_offset();
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.viewport_height);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.viewport_height);
    }

    pub fn scroll_to_top(&mut self) {
        self.viewport_offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.viewport_offset = self.max_offset();
    }

    /// Lines currently in the viewport, without their line breaks.
    pub fn visible_lines(&self) -> Vec<String> {
        let end = (self.viewport_offset + self.viewport_height).min(self.line_count());
        (self.viewport_offset..end)
            .map(|i| {
                let line = self.rope.line(i).to_string();
                line.trim_end_matches(['\n', '\r']).to_string()
            })
            .collect()
    }

    fn max_offset(&self) -> usize {
        self.line_count().saturating_sub(self.viewport_height)
    }

    fn clamp_offset(&mut self) {
        self.viewport_offset = self.viewport_offset.min(self.max_offset());
    }
}

impl Default for DocumentView {
    fn default() -> Self {
        Self::new()
    }
}
