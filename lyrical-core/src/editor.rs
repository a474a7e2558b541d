//! Cue editing state machine.
//!
//! ```text
//! BROWSING -> SELECTING -> { EDITING_TEXT | SHIFTING } -> SELECTING -> BROWSING
//! BROWSING -> INSERTING -> BROWSING
//! BROWSING -> EDITING_METADATA -> BROWSING
//! ```
//!
//! Every pending change (text draft, accumulated shift, recorded insertion)
//! can be dropped with [`CueEditor::cancel`] until it is committed.

use crate::cue::{Cue, ShiftMode};
use crate::error::EditError;
use crate::sheet::{CueSheet, MetadataField};
use crate::tracker::CueTracker;
use std::fmt;
use tracing::debug;

/// Current editor mode, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorMode {
    Browsing,
    Selecting,
    EditingText,
    Shifting,
    Inserting,
    EditingMetadata,
}

impl EditorMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Browsing => "browsing",
            Self::Selecting => "selecting line",
            Self::EditingText => "editing line",
            Self::Shifting => "moving line",
            Self::Inserting => "inserting",
            Self::EditingMetadata => "editing song info",
        }
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Browsing,
    Selecting {
        index: usize,
    },
    EditingText {
        index: usize,
        draft: String,
    },
    Shifting {
        index: usize,
        mode: ShiftMode,
        accumulated_ms: i64,
    },
    Inserting {
        pending: Option<Cue>,
    },
    EditingMetadata {
        field: MetadataField,
        draft: Option<String>,
    },
}

impl State {
    const fn mode(&self) -> EditorMode {
        match self {
            Self::Browsing => EditorMode::Browsing,
            Self::Selecting { .. } => EditorMode::Selecting,
            Self::EditingText { .. } => EditorMode::EditingText,
            Self::Shifting { .. } => EditorMode::Shifting,
            Self::Inserting { .. } => EditorMode::Inserting,
            Self::EditingMetadata { .. } => EditorMode::EditingMetadata,
        }
    }
}

/// Edits a [`CueSheet`] that is being tracked.
///
/// The editor never seeks or re-sorts. Structural edits (insert, delete) reset
/// the tracker they are given since indices move.
#[derive(Debug, Clone)]
pub struct CueEditor {
    state: State,
    dirty: bool,
}

impl Default for CueEditor {
    fn default() -> Self {
        Self {
            state: State::Browsing,
            dirty: false,
        }
    }
}

impl CueEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn mode(&self) -> EditorMode {
        self.state.mode()
    }

    /// The cue being selected, edited, or shifted
    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        match self.state {
            State::Selecting { index }
            | State::EditingText { index, .. }
            | State::Shifting { index, .. } => Some(index),
            _ => None,
        }
    }

    /// True when the sheet changed since the last [`mark_clean`](Self::mark_clean)
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Text being typed for the selected cue or metadata field
    #[must_use]
    pub fn draft(&self) -> Option<&str> {
        match &self.state {
            State::EditingText { draft, .. }
            | State::EditingMetadata {
                draft: Some(draft), ..
            } => Some(draft.as_str()),
            _ => None,
        }
    }

    /// Mutable access to the draft for an external text-entry widget
    pub fn draft_mut(&mut self) -> Option<&mut String> {
        match &mut self.state {
            State::EditingText { draft, .. }
            | State::EditingMetadata {
                draft: Some(draft), ..
            } => Some(draft),
            _ => None,
        }
    }

    /// Shift mode and accumulated delta while shifting
    #[must_use]
    pub const fn shift_progress(&self) -> Option<(ShiftMode, i64)> {
        match self.state {
            State::Shifting {
                mode,
                accumulated_ms,
                ..
            } => Some((mode, accumulated_ms)),
            _ => None,
        }
    }

    /// The cue being recorded while inserting
    #[must_use]
    pub const fn pending_insert(&self) -> Option<&Cue> {
        match &self.state {
            State::Inserting { pending } => pending.as_ref(),
            _ => None,
        }
    }

    /// The metadata field highlighted while editing song info
    #[must_use]
    pub const fn metadata_field(&self) -> Option<MetadataField> {
        match self.state {
            State::EditingMetadata { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Select the cue nearest to `timestamp_ms` using the greedy scan of
    /// [`CueSheet::nearest_index`], entering selection mode.
    ///
    /// # Errors
    ///
    /// Fails outside browsing mode or when the sheet has no cues.
    pub fn select_nearest(&mut self, sheet: &CueSheet, timestamp_ms: i64) -> Result<usize, EditError> {
        self.require(EditorMode::Browsing, "select a line")?;
        let index = sheet.nearest_index(timestamp_ms).ok_or(EditError::NoCues)?;
        debug!("Selected line {index} nearest to {timestamp_ms}ms");
        self.state = State::Selecting { index };
        Ok(index)
    }

    /// Move the selection one cue earlier, stopping at the first cue
    ///
    /// # Errors
    ///
    /// Fails outside selection mode.
    pub fn select_previous(&mut self) -> Result<usize, EditError> {
        let invalid = self.invalid("select the previous line");
        let State::Selecting { index } = &mut self.state else {
            return Err(invalid);
        };
        *index = index.saturating_sub(1);
        Ok(*index)
    }

    /// Move the selection one cue later, stopping at the last cue
    ///
    /// # Errors
    ///
    /// Fails outside selection mode.
    pub fn select_next(&mut self, sheet: &CueSheet) -> Result<usize, EditError> {
        let last = sheet.len().saturating_sub(1);
        let invalid = self.invalid("select the next line");
        let State::Selecting { index } = &mut self.state else {
            return Err(invalid);
        };
        *index = (*index + 1).min(last);
        Ok(*index)
    }

    /// Start editing the selected cue's text, seeding the draft with it
    ///
    /// # Errors
    ///
    /// Fails outside selection mode or if the selection no longer exists.
    pub fn begin_text_edit(&mut self, sheet: &CueSheet) -> Result<&str, EditError> {
        let index = self.selected_in(EditorMode::Selecting, "edit a line")?;
        let cue = sheet.get(index).ok_or(EditError::IndexOutOfRange {
            index,
            len: sheet.len(),
        })?;
        self.state = State::EditingText {
            index,
            draft: cue.text.clone(),
        };
        Ok(self.draft().unwrap_or_default())
    }

    /// Write the draft (with line breaks removed) into the cue
    ///
    /// # Errors
    ///
    /// Fails outside text editing or if the cue no longer exists.
    pub fn commit_text(&mut self, sheet: &mut CueSheet) -> Result<usize, EditError> {
        let invalid = self.invalid("commit line text");
        let State::EditingText { index, draft } = &self.state else {
            return Err(invalid);
        };
        let index = *index;
        sheet.set_text(index, single_line(draft))?;
        self.state = State::Selecting { index };
        self.dirty = true;
        Ok(index)
    }

    /// Start shifting the selected cue
    ///
    /// # Errors
    ///
    /// Fails outside selection mode.
    pub fn begin_shift(&mut self, mode: ShiftMode) -> Result<(), EditError> {
        let index = self.selected_in(EditorMode::Selecting, "move a line")?;
        self.state = State::Shifting {
            index,
            mode,
            accumulated_ms: 0,
        };
        Ok(())
    }

    /// Shift the selected cue by `delta_ms`. The step size is the caller's
    /// choice; the total is remembered so [`cancel`](Self::cancel) can revert it.
    ///
    /// # Errors
    ///
    /// Fails outside shifting mode or if the cue no longer exists.
    pub fn shift(&mut self, sheet: &mut CueSheet, delta_ms: i64) -> Result<(), EditError> {
        let invalid = self.invalid("move a line");
        let State::Shifting {
            index,
            mode,
            accumulated_ms,
        } = &mut self.state
        else {
            return Err(invalid);
        };
        sheet.shift(*index, *mode, delta_ms)?;
        *accumulated_ms += delta_ms;
        self.dirty = true;
        Ok(())
    }

    /// Keep the shifted times and return to selection
    ///
    /// # Errors
    ///
    /// Fails outside shifting mode.
    pub fn commit_shift(&mut self) -> Result<usize, EditError> {
        let index = self.selected_in(EditorMode::Shifting, "commit a move")?;
        self.state = State::Selecting { index };
        Ok(index)
    }

    /// Delete the selected cue and return to browsing
    ///
    /// # Errors
    ///
    /// Fails outside selection mode or if the cue no longer exists.
    pub fn delete_selected(
        &mut self,
        sheet: &mut CueSheet,
        tracker: &mut CueTracker,
    ) -> Result<Cue, EditError> {
        let index = self.selected_in(EditorMode::Selecting, "delete a line")?;
        let removed = sheet.remove(index)?;
        tracker.reset();
        self.state = State::Browsing;
        self.dirty = true;
        debug!("Deleted line {index}");
        Ok(removed)
    }

    /// Enter insertion mode
    ///
    /// # Errors
    ///
    /// Fails outside browsing mode.
    pub fn begin_insert(&mut self) -> Result<(), EditError> {
        self.require(EditorMode::Browsing, "insert a line")?;
        self.state = State::Inserting { pending: None };
        Ok(())
    }

    /// Record the current timestamp while the record key is held: the first
    /// call sets the begin point, later calls move the end point.
    ///
    /// # Errors
    ///
    /// Fails outside insertion mode.
    pub fn record_insert(&mut self, timestamp_ms: i64) -> Result<(), EditError> {
        let invalid = self.invalid("record a line");
        let State::Inserting { pending } = &mut self.state else {
            return Err(invalid);
        };
        match pending {
            Some(cue) => cue.end = timestamp_ms,
            None => *pending = Some(Cue::new(timestamp_ms, timestamp_ms, "")),
        }
        Ok(())
    }

    /// Insert the recorded cue, if any, when the record key is released.
    /// Stays in insertion mode so more lines can be recorded.
    ///
    /// # Errors
    ///
    /// Fails outside insertion mode.
    pub fn finish_insert(
        &mut self,
        sheet: &mut CueSheet,
        tracker: &mut CueTracker,
    ) -> Result<Option<usize>, EditError> {
        let invalid = self.invalid("finish recording a line");
        let State::Inserting { pending } = &mut self.state else {
            return Err(invalid);
        };
        let Some(cue) = pending.take() else {
            return Ok(None);
        };
        Ok(Some(self.insert_cue(sheet, tracker, cue)))
    }

    /// Insert a cue directly, keeping begin order. `begin_ms <= end_ms` is the
    /// caller's responsibility.
    ///
    /// # Errors
    ///
    /// Fails outside insertion mode.
    pub fn insert(
        &mut self,
        sheet: &mut CueSheet,
        tracker: &mut CueTracker,
        begin_ms: i64,
        end_ms: i64,
        text: impl Into<String>,
    ) -> Result<usize, EditError> {
        self.require(EditorMode::Inserting, "insert a line")?;
        Ok(self.insert_cue(sheet, tracker, Cue::new(begin_ms, end_ms, text)))
    }

    /// Enter song info editing with the first field highlighted
    ///
    /// # Errors
    ///
    /// Fails outside browsing mode.
    pub fn begin_metadata_edit(&mut self) -> Result<(), EditError> {
        self.require(EditorMode::Browsing, "edit song info")?;
        self.state = State::EditingMetadata {
            field: MetadataField::Title,
            draft: None,
        };
        Ok(())
    }

    /// Highlight a different metadata field
    ///
    /// # Errors
    ///
    /// Fails outside song info editing, or while a field is being typed.
    pub fn select_metadata_field(&mut self, next: MetadataField) -> Result<(), EditError> {
        let invalid = self.invalid("select a metadata field");
        let State::EditingMetadata { field, draft: None } = &mut self.state else {
            return Err(invalid);
        };
        *field = next;
        Ok(())
    }

    /// Start typing into the highlighted field, seeding the draft with its value
    ///
    /// # Errors
    ///
    /// Fails outside song info editing.
    pub fn begin_metadata_field_edit(&mut self, sheet: &CueSheet) -> Result<&str, EditError> {
        let invalid = self.invalid("edit a metadata field");
        let State::EditingMetadata { field, draft } = &mut self.state else {
            return Err(invalid);
        };
        let draft = draft.insert(sheet.metadata.field(*field).to_string());
        Ok(draft.as_str())
    }

    /// Write the field draft into the sheet metadata
    ///
    /// # Errors
    ///
    /// Fails unless a metadata field is being typed.
    pub fn commit_metadata_field(&mut self, sheet: &mut CueSheet) -> Result<MetadataField, EditError> {
        let invalid = self.invalid("commit a metadata field");
        let State::EditingMetadata { field, draft } = &mut self.state else {
            return Err(invalid);
        };
        let field = *field;
        let Some(value) = draft.take() else {
            return Err(invalid);
        };
        sheet.metadata.set_field(field, single_line(&value));
        self.dirty = true;
        Ok(field)
    }

    /// Escape: drop the pending change and step back one mode.
    ///
    /// Shifting reverts the cue by the accumulated delta.
    ///
    /// # Errors
    ///
    /// Fails while browsing, where there is nothing to cancel.
    pub fn cancel(&mut self, sheet: &mut CueSheet) -> Result<EditorMode, EditError> {
        if self.state == State::Browsing {
            return Err(self.invalid("cancel"));
        }
        self.state = match &mut self.state {
            State::Browsing | State::Selecting { .. } | State::Inserting { .. } => State::Browsing,
            State::EditingText { index, .. } => State::Selecting { index: *index },
            State::Shifting {
                index,
                mode,
                accumulated_ms,
            } => {
                let index = *index;
                sheet.shift(index, *mode, -*accumulated_ms)?;
                self.dirty = true;
                State::Selecting { index }
            }
            State::EditingMetadata { draft, field } => {
                if draft.is_some() {
                    State::EditingMetadata {
                        field: *field,
                        draft: None,
                    }
                } else {
                    State::Browsing
                }
            }
        };
        Ok(self.mode())
    }

    fn insert_cue(&mut self, sheet: &mut CueSheet, tracker: &mut CueTracker, cue: Cue) -> usize {
        let index = sheet.insert(cue);
        tracker.reset();
        self.dirty = true;
        debug!("Inserted line at {index}");
        index
    }

    pub(crate) fn require(&self, mode: EditorMode, operation: &'static str) -> Result<(), EditError> {
        if self.mode() == mode {
            Ok(())
        } else {
            Err(self.invalid(operation))
        }
    }

    fn selected_in(&self, mode: EditorMode, operation: &'static str) -> Result<usize, EditError> {
        self.require(mode, operation)?;
        self.selected().ok_or_else(|| self.invalid(operation))
    }

    pub(crate) const fn invalid(&self, operation: &'static str) -> EditError {
        EditError::InvalidState {
            operation,
            mode: self.state.mode(),
        }
    }
}

/// Line text and metadata values are stored one per line in `song.ini`
fn single_line(draft: &str) -> String {
    draft.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::Metadata;

    fn sheet() -> CueSheet {
        CueSheet::from_sorted(
            Metadata::default(),
            vec![
                Cue::new(0, 1000, "a"),
                Cue::new(1000, 2000, "b"),
                Cue::new(5000, 6000, "c"),
            ],
        )
    }

    fn selecting(index: usize) -> CueEditor {
        CueEditor {
            state: State::Selecting { index },
            dirty: false,
        }
    }

    #[test]
    fn test_starts_browsing_and_clean() {
        let editor = CueEditor::new();
        assert_eq!(editor.mode(), EditorMode::Browsing);
        assert_eq!(editor.selected(), None);
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_select_nearest_enters_selection() {
        let sheet = sheet();
        let mut editor = CueEditor::new();

        assert_eq!(editor.select_nearest(&sheet, 1900), Ok(1));
        assert_eq!(editor.mode(), EditorMode::Selecting);
        assert_eq!(editor.selected(), Some(1));
    }

    #[test]
    fn test_select_nearest_requires_browsing_and_cues() {
        let mut editor = CueEditor::new();
        assert_eq!(
            editor.select_nearest(&CueSheet::default(), 0),
            Err(EditError::NoCues)
        );
        assert_eq!(editor.mode(), EditorMode::Browsing);

        let mut editor = selecting(0);
        assert_eq!(
            editor.select_nearest(&sheet(), 0),
            Err(EditError::InvalidState {
                operation: "select a line",
                mode: EditorMode::Selecting,
            })
        );
    }

    #[test]
    fn test_previous_and_next_clamp() {
        let sheet = sheet();
        let mut editor = selecting(1);

        assert_eq!(editor.select_next(&sheet), Ok(2));
        assert_eq!(editor.select_next(&sheet), Ok(2));
        assert_eq!(editor.select_previous(), Ok(1));
        assert_eq!(editor.select_previous(), Ok(0));
        assert_eq!(editor.select_previous(), Ok(0));
    }

    #[test]
    fn test_text_edit_commit_strips_newlines() {
        let mut sheet = sheet();
        let mut editor = selecting(1);

        assert_eq!(editor.begin_text_edit(&sheet), Ok("b"));
        editor.draft_mut().unwrap().push_str(" line\ntwo");
        assert_eq!(editor.commit_text(&mut sheet), Ok(1));

        assert_eq!(sheet.get(1).unwrap().text, "b linetwo");
        assert_eq!(editor.mode(), EditorMode::Selecting);
        assert!(editor.is_dirty());
    }

    #[test]
    fn test_text_edit_cancel_keeps_text() {
        let mut sheet = sheet();
        let mut editor = selecting(0);

        editor.begin_text_edit(&sheet).unwrap();
        editor.draft_mut().unwrap().clear();
        assert_eq!(editor.cancel(&mut sheet), Ok(EditorMode::Selecting));

        assert_eq!(sheet.get(0).unwrap().text, "a");
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_shift_accumulates_and_commits() {
        let mut sheet = sheet();
        let mut editor = selecting(2);

        editor.begin_shift(ShiftMode::Begin).unwrap();
        editor.shift(&mut sheet, 10).unwrap();
        editor.shift(&mut sheet, 100).unwrap();
        editor.shift(&mut sheet, -1).unwrap();
        assert_eq!(editor.shift_progress(), Some((ShiftMode::Begin, 109)));

        assert_eq!(editor.commit_shift(), Ok(2));
        assert_eq!(sheet.get(2).unwrap(), &Cue::new(5109, 6000, "c"));
        assert_eq!(editor.shift_progress(), None);
    }

    #[test]
    fn test_shift_cancel_reverts_exactly() {
        let original = sheet();
        let mut sheet = original.clone();
        let mut editor = selecting(1);

        editor.begin_shift(ShiftMode::Whole).unwrap();
        for _ in 0..7 {
            editor.shift(&mut sheet, -10).unwrap();
        }
        editor.shift(&mut sheet, 100).unwrap();
        assert_eq!(sheet.get(1).unwrap().begin, 1030);

        assert_eq!(editor.cancel(&mut sheet), Ok(EditorMode::Selecting));
        assert_eq!(sheet, original);
    }

    #[test]
    fn test_shift_requires_shift_mode() {
        let mut sheet = sheet();
        let mut editor = selecting(0);
        assert!(matches!(
            editor.shift(&mut sheet, 10),
            Err(EditError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_delete_resets_tracker() {
        let mut sheet = sheet();
        let mut tracker = CueTracker::new();
        tracker.update(sheet.cues(), 5500);
        let mut editor = selecting(0);

        let removed = editor.delete_selected(&mut sheet, &mut tracker).unwrap();

        assert_eq!(removed.text, "a");
        assert_eq!(sheet.len(), 2);
        assert_eq!(tracker.active_index(), None);
        assert_eq!(editor.mode(), EditorMode::Browsing);
        assert!(editor.is_dirty());
    }

    #[test]
    fn test_record_insert_flow() {
        let mut sheet = sheet();
        let mut tracker = CueTracker::new();
        tracker.update(sheet.cues(), 5500);
        let mut editor = CueEditor::new();

        editor.begin_insert().unwrap();
        editor.record_insert(2500).unwrap();
        editor.record_insert(2600).unwrap();
        editor.record_insert(2800).unwrap();
        assert_eq!(editor.pending_insert(), Some(&Cue::new(2500, 2800, "")));

        assert_eq!(editor.finish_insert(&mut sheet, &mut tracker), Ok(Some(2)));
        assert_eq!(sheet.get(2).unwrap(), &Cue::new(2500, 2800, ""));
        assert_eq!(tracker.active_index(), None);
        assert_eq!(editor.mode(), EditorMode::Inserting);

        // Releasing again without recording inserts nothing
        assert_eq!(editor.finish_insert(&mut sheet, &mut tracker), Ok(None));
        assert_eq!(sheet.len(), 4);
    }

    #[test]
    fn test_direct_insert() {
        let mut sheet = sheet();
        let mut tracker = CueTracker::new();
        let mut editor = CueEditor::new();

        assert!(editor
            .insert(&mut sheet, &mut tracker, 2500, 2800, "x")
            .is_err());

        editor.begin_insert().unwrap();
        assert_eq!(
            editor.insert(&mut sheet, &mut tracker, 2500, 2800, "x"),
            Ok(2)
        );
        assert_eq!(sheet.get(2).unwrap().text, "x");
    }

    #[test]
    fn test_cancel_insert_drops_pending() {
        let mut sheet = sheet();
        let mut editor = CueEditor::new();

        editor.begin_insert().unwrap();
        editor.record_insert(100).unwrap();
        assert_eq!(editor.cancel(&mut sheet), Ok(EditorMode::Browsing));
        assert_eq!(sheet.len(), 3);
        assert_eq!(editor.pending_insert(), None);
    }

    #[test]
    fn test_metadata_edit_flow() {
        let mut sheet = sheet();
        let mut editor = CueEditor::new();

        editor.begin_metadata_edit().unwrap();
        editor.select_metadata_field(MetadataField::Artist).unwrap();
        assert_eq!(
            editor.begin_metadata_field_edit(&sheet),
            Ok("(Unknown artist)")
        );
        assert!(editor.select_metadata_field(MetadataField::Title).is_err());

        *editor.draft_mut().unwrap() = "Band".to_string();
        assert_eq!(
            editor.commit_metadata_field(&mut sheet),
            Ok(MetadataField::Artist)
        );
        assert_eq!(sheet.metadata.artist, "Band");
        assert_eq!(editor.metadata_field(), Some(MetadataField::Artist));

        assert_eq!(editor.cancel(&mut sheet), Ok(EditorMode::Browsing));
    }

    #[test]
    fn test_metadata_commit_strips_newlines() {
        let mut sheet = sheet();
        let mut editor = CueEditor::new();

        editor.begin_metadata_edit().unwrap();
        editor.begin_metadata_field_edit(&sheet).unwrap();
        *editor.draft_mut().unwrap() = "Tune\nRemix\r".to_string();
        assert_eq!(
            editor.commit_metadata_field(&mut sheet),
            Ok(MetadataField::Title)
        );
        assert_eq!(sheet.metadata.title, "TuneRemix");

        let reloaded = crate::codec::decode(&crate::codec::encode(&sheet));
        assert!(reloaded.warnings.is_empty());
        assert_eq!(reloaded.sheet.metadata.title, "TuneRemix");
    }

    #[test]
    fn test_metadata_cancel_discards_draft() {
        let mut sheet = sheet();
        let mut editor = CueEditor::new();

        editor.begin_metadata_edit().unwrap();
        editor.begin_metadata_field_edit(&sheet).unwrap();
        editor.draft_mut().unwrap().push('!');
        assert_eq!(editor.cancel(&mut sheet), Ok(EditorMode::EditingMetadata));
        assert_eq!(sheet.metadata.title, "(Unknown title)");
        assert_eq!(editor.draft(), None);
    }

    #[test]
    fn test_cancel_while_browsing_fails() {
        let mut editor = CueEditor::new();
        assert!(editor.cancel(&mut sheet()).is_err());
    }

    #[test]
    fn test_error_message_names_mode() {
        let mut editor = CueEditor::new();
        let err = editor.begin_shift(ShiftMode::End).unwrap_err();
        assert_eq!(err.to_string(), "Cannot move a line while browsing");
    }
}
