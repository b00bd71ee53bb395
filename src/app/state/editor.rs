use iced::widget::text_editor::{self, Action, Edit, Motion};
use prompter_core::layout::marker_spans;
use prompter_core::{CueDirection, ScriptId};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub(in crate::app) const CUE_POINT: &str = ">>>";

/// Script editor buffer with debounced autosave.
#[derive(Debug, Default)]
pub(in crate::app) struct EditorState {
    pub(in crate::app) visible: bool,
    pub(in crate::app) content: text_editor::Content,
    pub(in crate::app) name: String,
    pub(in crate::app) script_id: Option<ScriptId>,
    pub(in crate::app) dirty: bool,
    pub(in crate::app) last_edit_at: Option<Instant>,
}

impl EditorState {
    pub(in crate::app) fn load(&mut self, script_id: ScriptId, name: &str, content: &str) {
        self.content = text_editor::Content::with_text(content);
        self.name = name.to_string();
        self.script_id = Some(script_id);
        self.dirty = false;
        self.last_edit_at = None;
    }

    pub(in crate::app) fn mark_edited(&mut self, now: Instant) {
        self.dirty = true;
        self.last_edit_at = Some(now);
    }

    /// True once the buffer has been idle for `delay` since the last edit.
    pub(in crate::app) fn autosave_due(&self, now: Instant, delay: Duration) -> bool {
        self.dirty
            && self
                .last_edit_at
                .is_some_and(|at| now.saturating_duration_since(at) >= delay)
    }

    /// Editor text without the trailing newline the widget appends.
    pub(in crate::app) fn text(&self) -> String {
        let mut text = self.content.text();
        if text.ends_with('\n') {
            text.pop();
        }
        text
    }

    /// Byte offset of the cursor in [`EditorState::text`].
    pub(in crate::app) fn cursor_offset(&self) -> usize {
        let (line, column) = self.content.cursor_position();
        let text = self.text();
        let line_start: usize = text
            .split('\n')
            .take(line)
            .map(|previous| previous.len() + 1)
            .sum();
        (line_start + column).min(text.len())
    }

    pub(in crate::app) fn insert_cue_point(&mut self) {
        self.content
            .perform(Action::Edit(Edit::Paste(Arc::new(CUE_POINT.to_string()))));
    }

    /// Select the next or previous marker after the cursor, wrapping around.
    /// Returns false when the buffer has no markers.
    pub(in crate::app) fn select_cue(&mut self, direction: CueDirection) -> bool {
        let text = self.text();
        let spans = marker_spans(&text);
        let cursor = self.cursor_offset();
        let target = match direction {
            CueDirection::Next => spans
                .iter()
                .find(|span| span.start > cursor)
                .or_else(|| spans.first()),
            CueDirection::Prev => spans
                .iter()
                .rev()
                .find(|span| span.end < cursor)
                .or_else(|| spans.last()),
        };
        let Some(target) = target.cloned() else {
            return false;
        };

        // Rebuild with the cursor on the marker: start from the tail, paste
        // the head in front of it, then select the marker itself.
        self.content = text_editor::Content::with_text(&text[target.start..]);
        if target.start > 0 {
            self.content.perform(Action::Edit(Edit::Paste(Arc::new(
                text[..target.start].to_string(),
            ))));
        }
        for _ in text[target.clone()].chars() {
            self.content.perform(Action::Select(Motion::Right));
        }
        true
    }

    /// Uppercase the selection, or the whole buffer when nothing is selected.
    pub(in crate::app) fn smart_caps(&mut self) {
        match self.content.selection().filter(|selected| !selected.is_empty()) {
            Some(selected) => self
                .content
                .perform(Action::Edit(Edit::Paste(Arc::new(uppercase_keeping_markers(
                    &selected,
                ))))),
            None => {
                self.content =
                    text_editor::Content::with_text(&uppercase_keeping_markers(&self.text()));
            }
        }
    }
}

/// `&gt;&gt;&gt;` must stay lowercase to remain a marker.
fn uppercase_keeping_markers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    for span in marker_spans(text) {
        out.push_str(&text[copied..span.start].to_uppercase());
        out.push_str(&text[span.clone()]);
        copied = span.end;
    }
    out.push_str(&text[copied..].to_uppercase());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caps_leave_escaped_markers_intact() {
        assert_eq!(
            uppercase_keeping_markers("hi &gt;&gt;&gt; there >>> end"),
            "HI &gt;&gt;&gt; THERE >>> END"
        );
    }

    #[test]
    fn cursor_offset_counts_previous_lines() {
        let mut editor = EditorState::default();
        editor.content = text_editor::Content::with_text("ab\ncd");
        editor.content.perform(Action::Move(Motion::DocumentEnd));
        assert_eq!(editor.cursor_offset(), 5);
    }
}
