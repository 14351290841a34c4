use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use crate::tonetranspose::error::TransposeError;
use crate::tonetranspose::noteparser;
use crate::tonetranspose::tone::{are_valid_note_names, classify_names, is_valid_note_name, NoteNameType, Tone};
use crate::tonetranspose::transpose::transpose_pitch;
use crate::tonetranspose::util::{bracketed, ModeCache};

/// A chord or scale shape anchored at a root.
///
/// `tone_pattern` holds each member's signed semitone offset from the root
/// (not wrapped, so -11..=11) and `key_pattern` one `w`/`b` per member. Both
/// have one entry per member tone, in the order the members were given.
#[derive(Debug, Clone)]
pub struct ToneGroup {
    root_tone: Tone,
    tones: Vec<Tone>,
    tone_pattern: Vec<i32>,
    key_pattern: String,
    note_names: Vec<String>,
    rendered: ModeCache<String>,
}

impl ToneGroup {
    fn new(root_tone: Tone, tones: Vec<Tone>, tone_pattern: Vec<i32>, note_names: Vec<String>) -> ToneGroup {
        let key_pattern = tones.iter().map(|tone| tone.key_color().code()).collect();
        ToneGroup {
            root_tone,
            tones,
            tone_pattern,
            key_pattern,
            note_names,
            rendered: ModeCache::new(),
        }
    }

    /// True if `from_input` would succeed for these names.
    pub fn is_valid_input<S: AsRef<str>>(root_note: &str, note_names: &[S]) -> bool {
        is_valid_note_name(root_note) && are_valid_note_names(note_names)
    }

    /// Builds the reference group; nothing is built if any name is unknown.
    /// Duplicate members are kept.
    pub fn from_input<S: AsRef<str>>(root_note: &str, note_names: &[S]) -> Result<ToneGroup, TransposeError> {
        if let Some(invalid) = std::iter::once(root_note)
            .chain(note_names.iter().map(AsRef::as_ref))
            .find(|name| !is_valid_note_name(name))
        {
            return Err(TransposeError::InvalidNoteName(invalid.to_string()));
        }

        let root_tone = Tone::from_name(root_note)?;
        let mut tones = Vec::with_capacity(note_names.len());
        let mut tone_pattern = Vec::with_capacity(note_names.len());
        for name in note_names {
            let tone = Tone::from_name(name.as_ref())?;
            tone_pattern.push(tone.pitch_number() - root_tone.pitch_number());
            tones.push(tone);
        }
        let names = note_names.iter().map(|name| name.as_ref().to_string()).collect();
        Ok(ToneGroup::new(root_tone, tones, tone_pattern, names))
    }

    /// The same shape rooted at `root_pitch`.
    ///
    /// Transposing to the group's own root returns an unchanged copy. Other
    /// roots get member names spelled the way the original names lean: sharp
    /// if they used sharps only, flat otherwise.
    pub fn transposed_to(&self, root_pitch: i32) -> Result<ToneGroup, TransposeError> {
        if root_pitch == self.root_tone.pitch_number() {
            return Ok(self.clone());
        }
        let root_tone = Tone::new(root_pitch)?;
        let tones = self
            .tone_pattern
            .iter()
            .map(|steps| transpose_pitch(root_pitch, *steps).and_then(Tone::new))
            .collect::<Result<Vec<Tone>, TransposeError>>()?;
        let spelling = classify_names(&self.note_names);
        let note_names = tones
            .iter()
            .map(|tone| match spelling {
                NoteNameType::Sharp => tone.sharp_name().to_string(),
                _ => tone.flat_name().to_string(),
            })
            .collect();
        Ok(ToneGroup::new(root_tone, tones, self.tone_pattern.clone(), note_names))
    }

    pub fn root_tone(&self) -> &Tone {
        &self.root_tone
    }

    pub fn tones(&self) -> &[Tone] {
        &self.tones
    }

    pub fn tone_pattern(&self) -> &[i32] {
        &self.tone_pattern
    }

    pub fn key_pattern(&self) -> &str {
        &self.key_pattern
    }

    pub fn note_names(&self) -> &[String] {
        &self.note_names
    }

    pub fn len(&self) -> usize {
        self.tones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }

    /// Member names joined with `", "`, recomputed only when `note_name_type`
    /// differs from the previous call.
    pub fn render(&self, note_name_type: NoteNameType) -> String {
        self.rendered.get_or_compute(note_name_type, || {
            self.tones.iter().map(|tone| tone.note_name(note_name_type)).join(", ")
        })
    }

    pub fn describe_pattern(&self) -> String {
        bracketed(&self.tone_pattern)
    }
}

impl PartialEq for ToneGroup {
    fn eq(&self, other: &Self) -> bool {
        self.root_tone == other.root_tone && self.tones == other.tones && self.tone_pattern == other.tone_pattern
    }
}

impl Eq for ToneGroup {}

impl fmt::Display for ToneGroup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render(NoteNameType::Enharmonic))
    }
}

/// Parses `"<root>: <note> <note> ..."`, e.g. `"D: D F# A"`.
impl FromStr for ToneGroup {
    type Err = TransposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (root, notes) = noteparser::parse_tone_group(s)?;
        ToneGroup::from_input(&root, &notes)
    }
}
