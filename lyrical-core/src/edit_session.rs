//! The cue editor driven against a playing song.
//!
//! Selection follows the timeline: selecting a line seeks to its begin and
//! pauses, and stepping through lines seeks along with the selection.

use crate::clock::{Clock, ClockState, SystemClock};
use crate::config::{EditorConfig, ShiftStep};
use crate::cue::{Cue, ShiftMode};
use crate::editor::{CueEditor, EditorMode};
use crate::error::Result;
use crate::session::{Frame, SongSession};
use crate::sheet::MetadataField;
use std::path::PathBuf;
use tracing::debug;

/// Direction of the browse keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    const fn is_forward(self) -> bool {
        matches!(self, Self::Forward)
    }
}

#[derive(Debug)]
pub struct EditSession<C: Clock = SystemClock> {
    session: SongSession<C>,
    editor: CueEditor,
    config: EditorConfig,
}

impl<C: Clock> EditSession<C> {
    #[must_use]
    pub fn new(session: SongSession<C>, config: EditorConfig) -> Self {
        Self {
            session,
            editor: CueEditor::new(),
            config,
        }
    }

    #[must_use]
    pub const fn session(&self) -> &SongSession<C> {
        &self.session
    }

    #[must_use]
    pub const fn editor(&self) -> &CueEditor {
        &self.editor
    }

    #[must_use]
    pub const fn mode(&self) -> EditorMode {
        self.editor.mode()
    }

    /// True when there are changes that [`save`](Self::save) has not written
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.editor.is_dirty()
    }

    pub fn frame(&mut self) -> Frame {
        self.session.frame()
    }

    /// Play, pause, or resume. Only while browsing.
    ///
    /// # Errors
    ///
    /// Fails outside browsing mode.
    pub fn toggle_playback(&mut self) -> Result<ClockState> {
        self.editor.require(EditorMode::Browsing, "toggle playback")?;
        self.session.toggle_playback()
    }

    /// Browse keys. While browsing they skip by the configured amount; while
    /// selecting they move the selection and seek to the newly selected line.
    ///
    /// # Errors
    ///
    /// Fails in any other mode.
    pub fn step(&mut self, direction: Direction) -> Result<Frame> {
        match self.editor.mode() {
            EditorMode::Browsing => {
                let delta = if direction.is_forward() {
                    self.config.skip_ms
                } else {
                    -self.config.skip_ms
                };
                self.session.skip(self.session.timestamp_ms() + delta)
            }
            EditorMode::Selecting => {
                let before = self.editor.selected();
                let index = match direction {
                    Direction::Backward => self.editor.select_previous()?,
                    Direction::Forward => self.editor.select_next(self.session.sheet())?,
                };
                if before == Some(index) {
                    return Ok(self.session.frame());
                }
                self.skip_to_cue(index)
            }
            _ => Err(self.editor.invalid("step through the song").into()),
        }
    }

    /// Select the line nearest to the current position, seek to its begin,
    /// and pause.
    ///
    /// # Errors
    ///
    /// Fails outside browsing mode or when there are no lines.
    pub fn select_nearest(&mut self) -> Result<usize> {
        let timestamp_ms = self.session.timestamp_ms();
        let index = self.editor.select_nearest(self.session.sheet(), timestamp_ms)?;
        self.skip_to_cue(index)?;
        self.session.ensure_paused()?;
        Ok(index)
    }

    /// # Errors
    ///
    /// Fails outside selection mode.
    pub fn begin_text_edit(&mut self) -> Result<&str> {
        Ok(self.editor.begin_text_edit(self.session.sheet())?)
    }

    /// Text being typed, for an external text-entry widget
    pub fn draft_mut(&mut self) -> Option<&mut String> {
        self.editor.draft_mut()
    }

    /// # Errors
    ///
    /// Fails outside text editing.
    pub fn commit_text(&mut self) -> Result<usize> {
        let (sheet, _) = self.session.edit_parts();
        Ok(self.editor.commit_text(sheet)?)
    }

    /// # Errors
    ///
    /// Fails outside selection mode.
    pub fn begin_shift(&mut self, mode: ShiftMode) -> Result<()> {
        Ok(self.editor.begin_shift(mode)?)
    }

    /// Shift the selected line one step earlier or later
    ///
    /// # Errors
    ///
    /// Fails outside shifting mode.
    pub fn shift(&mut self, direction: Direction, step: ShiftStep) -> Result<i64> {
        let delta_ms = self.config.shift_delta(step, direction.is_forward());
        let (sheet, _) = self.session.edit_parts();
        self.editor.shift(sheet, delta_ms)?;
        Ok(delta_ms)
    }

    /// # Errors
    ///
    /// Fails outside shifting mode.
    pub fn commit_shift(&mut self) -> Result<usize> {
        Ok(self.editor.commit_shift()?)
    }

    /// # Errors
    ///
    /// Fails outside selection mode.
    pub fn delete_selected(&mut self) -> Result<Cue> {
        let (sheet, tracker) = self.session.edit_parts();
        Ok(self.editor.delete_selected(sheet, tracker)?)
    }

    /// # Errors
    ///
    /// Fails outside browsing mode.
    pub fn begin_insert(&mut self) -> Result<()> {
        Ok(self.editor.begin_insert()?)
    }

    /// Record key held: stamp the current position into the pending line
    ///
    /// # Errors
    ///
    /// Fails outside insertion mode.
    pub fn record_insert(&mut self) -> Result<()> {
        Ok(self.editor.record_insert(self.session.timestamp_ms())?)
    }

    /// Record key released: insert the pending line, if any
    ///
    /// # Errors
    ///
    /// Fails outside insertion mode.
    pub fn finish_insert(&mut self) -> Result<Option<usize>> {
        let (sheet, tracker) = self.session.edit_parts();
        Ok(self.editor.finish_insert(sheet, tracker)?)
    }

    /// Make the current position the song's preview start
    ///
    /// # Errors
    ///
    /// Fails while a line's text is being typed or song info is open.
    pub fn set_preview_point(&mut self) -> Result<i64> {
        if matches!(
            self.editor.mode(),
            EditorMode::EditingText | EditorMode::EditingMetadata
        ) {
            return Err(self.editor.invalid("set the preview point").into());
        }
        let timestamp_ms = self.session.timestamp_ms();
        let (sheet, _) = self.session.edit_parts();
        sheet.metadata.preview_timestamp_ms = timestamp_ms;
        self.editor.mark_dirty();
        debug!("Preview point set to {timestamp_ms}ms");
        Ok(timestamp_ms)
    }

    /// Open the song info form, pausing playback
    ///
    /// # Errors
    ///
    /// Fails outside browsing mode.
    pub fn begin_metadata_edit(&mut self) -> Result<()> {
        self.editor.begin_metadata_edit()?;
        self.session.ensure_paused()?;
        Ok(())
    }

    /// # Errors
    ///
    /// Fails outside the song info form or while a field is being typed.
    pub fn select_metadata_field(&mut self, field: MetadataField) -> Result<()> {
        Ok(self.editor.select_metadata_field(field)?)
    }

    /// # Errors
    ///
    /// Fails outside the song info form.
    pub fn begin_metadata_field_edit(&mut self) -> Result<&str> {
        Ok(self.editor.begin_metadata_field_edit(self.session.sheet())?)
    }

    /// # Errors
    ///
    /// Fails unless a metadata field is being typed.
    pub fn commit_metadata_field(&mut self) -> Result<MetadataField> {
        let (sheet, _) = self.session.edit_parts();
        Ok(self.editor.commit_metadata_field(sheet)?)
    }

    /// Drop the pending change and step back one mode
    ///
    /// # Errors
    ///
    /// Fails while browsing.
    pub fn cancel(&mut self) -> Result<EditorMode> {
        let (sheet, _) = self.session.edit_parts();
        Ok(self.editor.cancel(sheet)?)
    }

    /// Write the song and clear the dirty flag
    ///
    /// # Errors
    ///
    /// Returns an I/O error if saving fails; the changes stay dirty.
    pub fn save(&mut self) -> Result<PathBuf> {
        let dir = self.session.save()?;
        self.editor.mark_clean();
        Ok(dir)
    }

    fn skip_to_cue(&mut self, index: usize) -> Result<Frame> {
        let begin = self.session.sheet().get(index).map_or(0, |cue| cue.begin);
        self.session.skip(begin)
    }
}
