//! Text (de)serialization of the `song.ini` cue-sheet format.
//!
//! ```text
//! [Version=1]
//! [Metadata]
//! Title=...
//! [Lines]
//! <begin ms>,<end ms>,<text>
//! ```
//!
//! Decoding never fails: malformed lines are skipped, logged, and reported
//! back as [`ParseWarning`]s so the caller can show them.

use crate::cue::Cue;
use crate::sheet::{CueSheet, Metadata};
use std::fmt;
use tracing::warn;

/// Format version written in the header line
pub const FORMAT_VERSION: u32 = 1;

const METADATA_HEADER: &str = "[Metadata]";
const LINES_HEADER: &str = "[Lines]";

/// A line that was skipped while decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line number in the input
    pub line_number: usize,
    pub kind: ParseWarningKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarningKind {
    /// A metadata line without `=`
    MissingSeparator { line: String },
    /// A metadata key this format does not define
    UnknownKey { key: String },
    /// A numeric metadata value that is not an integer
    InvalidNumber { key: String, value: String },
    /// A `[Lines]` row with fewer than three comma-separated tokens
    NotEnoughTokens { line: String },
    /// A `[Lines]` row whose begin or end is not an integer
    InvalidTime { line: String },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line_number)?;
        match &self.kind {
            ParseWarningKind::MissingSeparator { line } => {
                write!(f, "invalid metadata line (not enough tokens): {line}")
            }
            ParseWarningKind::UnknownKey { key } => write!(f, "invalid metadata key: {key}"),
            ParseWarningKind::InvalidNumber { key, value } => {
                write!(f, "metadata {key} is not an integer: {value}")
            }
            ParseWarningKind::NotEnoughTokens { line } => {
                write!(f, "invalid lines row (not enough tokens): {line}")
            }
            ParseWarningKind::InvalidTime { line } => {
                write!(f, "invalid lines row (bad timestamp): {line}")
            }
        }
    }
}

/// Result of decoding a cue sheet
#[derive(Debug, Clone, Default)]
pub struct Decoded {
    pub sheet: CueSheet,
    pub warnings: Vec<ParseWarning>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Metadata,
    Lines,
}

/// Decode a full cue sheet
#[must_use]
pub fn decode(input: &str) -> Decoded {
    decode_inner(input, false)
}

/// Decode only the `[Metadata]` section, stopping at `[Lines]`
#[must_use]
pub fn decode_metadata(input: &str) -> (Metadata, Vec<ParseWarning>) {
    let decoded = decode_inner(input, true);
    (decoded.sheet.metadata, decoded.warnings)
}

fn decode_inner(input: &str, metadata_only: bool) -> Decoded {
    let mut metadata = Metadata::default();
    let mut cues = Vec::new();
    let mut warnings = Vec::new();
    let mut section = Section::None;

    for (i, line) in input.lines().enumerate() {
        let line_number = i + 1;
        if line.is_empty() {
            continue;
        }

        if line == METADATA_HEADER {
            section = Section::Metadata;
            continue;
        }
        if line == LINES_HEADER {
            if metadata_only {
                break;
            }
            section = Section::Lines;
            continue;
        }

        let kind = match section {
            // Header lines like [Version=1] and anything else before a section
            Section::None => None,
            Section::Metadata => apply_metadata_line(&mut metadata, line),
            Section::Lines => match parse_cue_line(line) {
                Ok(cue) => {
                    cues.push(cue);
                    None
                }
                Err(kind) => Some(kind),
            },
        };

        if let Some(kind) = kind {
            let warning = ParseWarning { line_number, kind };
            warn!("Skipping cue sheet {warning}");
            warnings.push(warning);
        }
    }

    Decoded {
        sheet: CueSheet::from_sorted(metadata, cues),
        warnings,
    }
}

fn apply_metadata_line(metadata: &mut Metadata, line: &str) -> Option<ParseWarningKind> {
    let Some((key, value)) = line.split_once('=') else {
        return Some(ParseWarningKind::MissingSeparator {
            line: line.to_string(),
        });
    };

    let parse_int = |target: &mut i64| match value.trim().parse::<i64>() {
        Ok(parsed) => {
            *target = parsed;
            None
        }
        Err(_) => Some(ParseWarningKind::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        }),
    };

    match key {
        "Title" => metadata.title = value.to_string(),
        "Artist" => metadata.artist = value.to_string(),
        "Language" => metadata.language = value.to_string(),
        "Charter" => metadata.charter = value.to_string(),
        "File" => metadata.file_path = value.to_string(),
        "Background" => metadata.background = value.to_string(),
        "Length" => return parse_int(&mut metadata.length_secs),
        "Offset" => return parse_int(&mut metadata.offset_ms),
        "Preview" => return parse_int(&mut metadata.preview_timestamp_ms),
        _ => {
            return Some(ParseWarningKind::UnknownKey {
                key: key.to_string(),
            })
        }
    }
    None
}

fn parse_cue_line(line: &str) -> Result<Cue, ParseWarningKind> {
    // At most three tokens so the text itself may contain commas
    let mut tokens = line.splitn(3, ',');
    let (Some(begin), Some(end), Some(text)) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(ParseWarningKind::NotEnoughTokens {
            line: line.to_string(),
        });
    };

    match (begin.trim().parse::<i64>(), end.trim().parse::<i64>()) {
        (Ok(begin), Ok(end)) => Ok(Cue::new(begin, end, text)),
        _ => Err(ParseWarningKind::InvalidTime {
            line: line.to_string(),
        }),
    }
}

/// Encode a cue sheet. `Length` is derived from the last cue, and cues are
/// written in sheet order without sorting.
#[must_use]
pub fn encode(sheet: &CueSheet) -> String {
    let metadata = &sheet.metadata;
    let mut out = format!(
        "[Version={FORMAT_VERSION}]\n\
         {METADATA_HEADER}\n\
         Title={}\n\
         Artist={}\n\
         Language={}\n\
         Length={}\n\
         Charter={}\n\
         File={}\n\
         Offset={}\n\
         Preview={}\n\
         Background={}\n\
         {LINES_HEADER}\n",
        metadata.title,
        metadata.artist,
        metadata.language,
        sheet.computed_length_secs(),
        metadata.charter,
        metadata.file_path,
        metadata.offset_ms,
        metadata.preview_timestamp_ms,
        metadata.background,
    );
    out.extend(
        sheet
            .cues()
            .iter()
            .map(|cue| format!("{},{},{}\n", cue.begin, cue.end, cue.text)),
    );
    out
}
