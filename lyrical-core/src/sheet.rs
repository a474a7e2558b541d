use crate::cue::{Cue, ShiftMode};
use crate::error::EditError;

/// Song metadata stored in the `[Metadata]` section of a cue sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub artist: String,
    pub language: String,
    pub charter: String,
    /// Audio file, relative to the song directory
    pub file_path: String,
    /// Correction applied to the playback clock (milliseconds, can be negative)
    pub offset_ms: i64,
    /// Where song previews start playing
    pub preview_timestamp_ms: i64,
    /// Background image, relative to the song directory (empty for none)
    pub background: String,
    /// Derived from the last cue on save
    pub length_secs: i64,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            title: "(Unknown title)".to_string(),
            artist: "(Unknown artist)".to_string(),
            language: "(Unknown language)".to_string(),
            charter: "(Unknown charter)".to_string(),
            file_path: String::new(),
            offset_ms: 0,
            preview_timestamp_ms: 0,
            background: String::new(),
            length_secs: 0,
        }
    }
}

/// Text fields of the metadata that the editor exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataField {
    Title,
    Artist,
    Language,
    Charter,
}

impl MetadataField {
    /// All editable fields, in display order
    pub const ALL: [Self; 4] = [Self::Title, Self::Artist, Self::Language, Self::Charter];

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Artist => "Artist",
            Self::Language => "Language",
            Self::Charter => "Charter",
        }
    }
}

impl Metadata {
    #[must_use]
    pub fn field(&self, field: MetadataField) -> &str {
        match field {
            MetadataField::Title => &self.title,
            MetadataField::Artist => &self.artist,
            MetadataField::Language => &self.language,
            MetadataField::Charter => &self.charter,
        }
    }

    pub fn set_field(&mut self, field: MetadataField, value: impl Into<String>) {
        let value = value.into();
        match field {
            MetadataField::Title => self.title = value,
            MetadataField::Artist => self.artist = value,
            MetadataField::Language => self.language = value,
            MetadataField::Charter => self.charter = value,
        }
    }
}

/// Song metadata plus its cues, ordered by `begin`.
///
/// Insert and remove keep the order. [`CueSheet::shift`] does not re-sort, so
/// callers must keep shifts small enough not to cross a neighbor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CueSheet {
    pub metadata: Metadata,
    cues: Vec<Cue>,
}

impl CueSheet {
    #[must_use]
    pub fn new(metadata: Metadata) -> Self {
        Self {
            metadata,
            cues: Vec::new(),
        }
    }

    /// Build a sheet from cues already in begin order. The order is not checked.
    #[must_use]
    pub const fn from_sorted(metadata: Metadata, cues: Vec<Cue>) -> Self {
        Self { metadata, cues }
    }

    #[must_use]
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Cue> {
        self.cues.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Length in whole seconds, derived from the last cue's end
    #[must_use]
    pub fn computed_length_secs(&self) -> i64 {
        self.cues.last().map_or(0, |cue| cue.end / 1000)
    }

    /// Store the derived length in the metadata
    pub fn refresh_length(&mut self) {
        self.metadata.length_secs = self.computed_length_secs();
    }

    /// Insert a cue after every cue whose begin is earlier, returning its index.
    ///
    /// A cue with the same begin as existing cues lands before them.
    pub fn insert(&mut self, cue: Cue) -> usize {
        let index = self
            .cues
            .iter()
            .take_while(|existing| cue.begin > existing.begin)
            .count();
        self.cues.insert(index, cue);
        index
    }

    /// Remove the cue at `index`
    ///
    /// # Errors
    ///
    /// Returns [`EditError::IndexOutOfRange`] if `index` is not a valid cue index.
    pub fn remove(&mut self, index: usize) -> Result<Cue, EditError> {
        self.check_index(index)?;
        Ok(self.cues.remove(index))
    }

    /// Shift one or both endpoints of the cue at `index`. Never re-sorts.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::IndexOutOfRange`] if `index` is not a valid cue index.
    pub fn shift(&mut self, index: usize, mode: ShiftMode, delta_ms: i64) -> Result<(), EditError> {
        self.cue_mut(index)?.shift(mode, delta_ms);
        Ok(())
    }

    /// Replace the text of the cue at `index`
    ///
    /// # Errors
    ///
    /// Returns [`EditError::IndexOutOfRange`] if `index` is not a valid cue index.
    pub fn set_text(&mut self, index: usize, text: impl Into<String>) -> Result<(), EditError> {
        self.cue_mut(index)?.text = text.into();
        Ok(())
    }

    /// Greedy nearest-cue lookup used for "jump to selection".
    ///
    /// Scans in order and stops at the first cue whose closer endpoint is not
    /// nearer than the best seen so far. On irregular timelines this can stop
    /// before the globally nearest cue.
    #[must_use]
    pub fn nearest_index(&self, timestamp_ms: i64) -> Option<usize> {
        let mut selected = None;
        let mut smallest_delta = i64::MAX;
        for (i, cue) in self.cues.iter().enumerate() {
            let delta = cue.endpoint_distance(timestamp_ms);
            if delta < smallest_delta {
                selected = Some(i);
                smallest_delta = delta;
            } else {
                break;
            }
        }
        selected
    }

    /// Check whether cues are in begin order (callers that shift can use this)
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.cues.windows(2).all(|pair| pair[0].begin <= pair[1].begin)
    }

    fn cue_mut(&mut self, index: usize) -> Result<&mut Cue, EditError> {
        let len = self.cues.len();
        self.cues
            .get_mut(index)
            .ok_or(EditError::IndexOutOfRange { index, len })
    }

    fn check_index(&self, index: usize) -> Result<(), EditError> {
        if index < self.cues.len() {
            Ok(())
        } else {
            Err(EditError::IndexOutOfRange {
                index,
                len: self.cues.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CueSheet {
        CueSheet::from_sorted(
            Metadata::default(),
            vec![
                Cue::new(0, 1000, "a"),
                Cue::new(1000, 2000, "b"),
                Cue::new(5000, 6000, "c"),
            ],
        )
    }

    #[test]
    fn test_insert_between_cues() {
        let mut sheet = sample();
        let index = sheet.insert(Cue::new(2500, 2800, "x"));

        assert_eq!(index, 2);
        assert_eq!(sheet.get(1).unwrap().text, "b");
        assert_eq!(sheet.get(2).unwrap().text, "x");
        assert_eq!(sheet.get(3).unwrap().text, "c");
        assert!(sheet.is_sorted());
    }

    #[test]
    fn test_insert_at_edges() {
        let mut sheet = sample();
        assert_eq!(sheet.insert(Cue::new(9000, 9500, "last")), 3);
        assert_eq!(sheet.insert(Cue::new(-50, 0, "first")), 0);
        assert_eq!(sheet.len(), 5);
    }

    #[test]
    fn test_insert_equal_begin_lands_before() {
        let mut sheet = sample();
        assert_eq!(sheet.insert(Cue::new(1000, 1500, "dup")), 1);
        assert_eq!(sheet.get(2).unwrap().text, "b");
    }

    #[test]
    fn test_insert_into_empty() {
        let mut sheet = CueSheet::default();
        assert_eq!(sheet.insert(Cue::new(100, 200, "only")), 0);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut sheet = sample();
        assert_eq!(
            sheet.remove(3),
            Err(EditError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(sheet.remove(0).unwrap().text, "a");
        assert_eq!(sheet.len(), 2);
    }

    #[test]
    fn test_shift_does_not_resort() {
        let mut sheet = sample();
        sheet.shift(0, ShiftMode::Whole, 3000).unwrap();

        assert_eq!(sheet.get(0).unwrap().begin, 3000);
        assert!(!sheet.is_sorted());
    }

    #[test]
    fn test_nearest_walks_forward_while_improving() {
        let sheet = sample();
        // b (end=2000, delta 2000) improves on a; c (begin=5000, delta 1000) improves on b
        assert_eq!(sheet.nearest_index(4000), Some(2));
        assert_eq!(sheet.nearest_index(0), Some(0));
        assert_eq!(sheet.nearest_index(1900), Some(1));
    }

    #[test]
    fn test_nearest_stops_at_first_non_improvement() {
        let sheet = CueSheet::from_sorted(
            Metadata::default(),
            vec![
                Cue::new(3500, 3600, "close"),
                Cue::new(3600, 10_000, "as close"),
                Cue::new(3990, 4010, "closest"),
            ],
        );

        // The scan stops at the second cue (delta 400, not better than 400)
        // and never reaches the third cue (delta 10).
        assert_eq!(sheet.nearest_index(4000), Some(0));
    }

    #[test]
    fn test_nearest_empty() {
        assert_eq!(CueSheet::default().nearest_index(100), None);
    }

    #[test]
    fn test_computed_length() {
        let mut sheet = sample();
        assert_eq!(sheet.computed_length_secs(), 6);
        sheet.refresh_length();
        assert_eq!(sheet.metadata.length_secs, 6);
        assert_eq!(CueSheet::default().computed_length_secs(), 0);
    }

    #[test]
    fn test_metadata_fields() {
        let mut metadata = Metadata::default();
        assert_eq!(metadata.field(MetadataField::Title), "(Unknown title)");

        metadata.set_field(MetadataField::Charter, "me");
        assert_eq!(metadata.charter, "me");
    }
}
