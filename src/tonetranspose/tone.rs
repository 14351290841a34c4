use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::tonetranspose::error::TransposeError;

pub const MIN_PITCH: i32 = 1;
pub const MAX_PITCH: i32 = 12;

const SHARP_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
const FLAT_NAMES: [&str; 12] = ["C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B"];
const ENHARMONIC_NAMES: [&str; 12] = [
    "C", "Db_C#", "D", "Eb_D#", "E", "F", "Gb_F#", "G", "Ab_G#", "A", "Bb_A#", "B",
];

/// White keys follow the C major scale
const KEY_COLORS: [KeyColor; 12] = [
    KeyColor::White,
    KeyColor::Black,
    KeyColor::White,
    KeyColor::Black,
    KeyColor::White,
    KeyColor::White,
    KeyColor::Black,
    KeyColor::White,
    KeyColor::Black,
    KeyColor::White,
    KeyColor::Black,
    KeyColor::White,
];

/// How a note name is spelled, and which spelling to use when rendering one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum NoteNameType {
    Flat,
    Sharp,
    #[default]
    Enharmonic,
}

impl FromStr for NoteNameType {
    type Err = TransposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" => Ok(NoteNameType::Flat),
            "sharp" => Ok(NoteNameType::Sharp),
            "enharmonic" => Ok(NoteNameType::Enharmonic),
            other => Err(TransposeError::Parse(format!("unknown note name type {:?}", other))),
        }
    }
}

impl TryFrom<String> for NoteNameType {
    type Error = TransposeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyColor {
    White,
    Black,
}

impl KeyColor {
    pub fn code(&self) -> char {
        match self {
            KeyColor::White => 'w',
            KeyColor::Black => 'b',
        }
    }
}

impl fmt::Display for KeyColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            KeyColor::White => "white",
            KeyColor::Black => "black",
        })
    }
}

pub fn is_valid_pitch(pitch_number: i32) -> bool {
    (MIN_PITCH..=MAX_PITCH).contains(&pitch_number)
}

fn flat_index(note_name: &str) -> Option<usize> {
    FLAT_NAMES.iter().position(|name| *name == note_name)
}

fn sharp_index(note_name: &str) -> Option<usize> {
    SHARP_NAMES.iter().position(|name| *name == note_name)
}

pub fn is_valid_note_name(note_name: &str) -> bool {
    flat_index(note_name).is_some() || sharp_index(note_name).is_some()
}

/// Stops at the first name found in neither spelling table.
pub fn are_valid_note_names<I, S>(note_names: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    note_names.into_iter().all(|name| is_valid_note_name(name.as_ref()))
}

/// Natural notes and unrecognised names both come back as `Enharmonic`.
pub fn classify_name(note_name: &str) -> NoteNameType {
    match (flat_index(note_name).is_some(), sharp_index(note_name).is_some()) {
        (true, false) => NoteNameType::Flat,
        (false, true) => NoteNameType::Sharp,
        _ => NoteNameType::Enharmonic,
    }
}

pub fn classify_names<I, S>(note_names: I) -> NoteNameType
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let (mut flats, mut sharps) = (false, false);
    for name in note_names {
        match classify_name(name.as_ref()) {
            NoteNameType::Flat => flats = true,
            NoteNameType::Sharp => sharps = true,
            NoteNameType::Enharmonic => {}
        }
    }
    match (flats, sharps) {
        (true, false) => NoteNameType::Flat,
        (false, true) => NoteNameType::Sharp,
        _ => NoteNameType::Enharmonic,
    }
}

pub fn key_color(pitch_number: i32) -> Result<KeyColor, TransposeError> {
    if !is_valid_pitch(pitch_number) {
        return Err(TransposeError::InvalidPitchNumber(pitch_number));
    }
    Ok(color_at(pitch_number))
}

fn color_at(pitch_number: i32) -> KeyColor {
    KEY_COLORS[(pitch_number - 1) as usize]
}

/// One of the 12 chromatic pitch classes, numbered 1 (C) to 12 (B).
///
/// Equality only looks at the pitch number; the spelling the caller used is
/// kept for rebuilding groups but does not make two tones different.
#[derive(Debug, Clone)]
pub struct Tone {
    pitch_number: u8,
    user_defined: Option<String>,
}

impl Tone {
    pub fn new(pitch_number: i32) -> Result<Tone, TransposeError> {
        if !is_valid_pitch(pitch_number) {
            return Err(TransposeError::InvalidPitchNumber(pitch_number));
        }
        Ok(Tone {
            pitch_number: pitch_number as u8,
            user_defined: None,
        })
    }

    /// Looks the name up in the flat table first, then the sharp table.
    pub fn from_name(note_name: &str) -> Result<Tone, TransposeError> {
        let index = flat_index(note_name)
            .or_else(|| sharp_index(note_name))
            .ok_or_else(|| TransposeError::InvalidNoteName(note_name.to_string()))?;
        Ok(Tone {
            pitch_number: index as u8 + 1,
            user_defined: Some(note_name.to_string()),
        })
    }

    pub fn pitch_number(&self) -> i32 {
        i32::from(self.pitch_number)
    }

    fn index(&self) -> usize {
        usize::from(self.pitch_number - 1)
    }

    pub fn flat_name(&self) -> &'static str {
        FLAT_NAMES[self.index()]
    }

    pub fn sharp_name(&self) -> &'static str {
        SHARP_NAMES[self.index()]
    }

    pub fn enharmonic_name(&self) -> &'static str {
        ENHARMONIC_NAMES[self.index()]
    }

    pub fn note_name(&self, note_name_type: NoteNameType) -> &'static str {
        match note_name_type {
            NoteNameType::Flat => self.flat_name(),
            NoteNameType::Sharp => self.sharp_name(),
            NoteNameType::Enharmonic => self.enharmonic_name(),
        }
    }

    /// The exact spelling this tone was created from, if it came from a name.
    pub fn user_defined_name(&self) -> Option<&str> {
        self.user_defined.as_deref()
    }

    pub fn key_color(&self) -> KeyColor {
        color_at(self.pitch_number())
    }

    pub fn is_natural(&self) -> bool {
        self.flat_name() == self.sharp_name()
    }
}

impl Eq for Tone {}

impl PartialEq for Tone {
    fn eq(&self, other: &Self) -> bool {
        self.pitch_number == other.pitch_number
    }
}

impl FromStr for Tone {
    type Err = TransposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tone::from_name(s.trim())
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.enharmonic_name())
    }
}
