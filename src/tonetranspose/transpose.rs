use tracing::debug;

use crate::tonetranspose::error::TransposeError;
use crate::tonetranspose::interval::{interval_counts, intervals};
use crate::tonetranspose::pianokeys::{summarize, PianoKeys, SummaryOptions};
use crate::tonetranspose::tone::{is_valid_pitch, NoteNameType, Tone, MAX_PITCH, MIN_PITCH};
use crate::tonetranspose::tonegroup::ToneGroup;
use crate::tonetranspose::util::ModeCache;

/// Moves `root_pitch` by `steps` semitones, wrapping into 1..=12.
///
/// `steps` is a member offset from `ToneGroup`, so -11..=11.
pub fn transpose_pitch(root_pitch: i32, steps: i32) -> Result<i32, TransposeError> {
    if !is_valid_pitch(root_pitch) {
        return Err(TransposeError::InvalidPitchNumber(root_pitch));
    }
    let transposed = if steps < 0 {
        (MAX_PITCH + steps) + root_pitch
    } else {
        root_pitch + steps
    };
    Ok(if transposed > MAX_PITCH { transposed - MAX_PITCH } else { transposed })
}

fn build_positions(tone_group: &ToneGroup) -> Result<Vec<ToneGroup>, TransposeError> {
    debug!(
        root = tone_group.root_tone().flat_name(),
        pattern = %tone_group.describe_pattern(),
        "building transpositions"
    );
    (MIN_PITCH..=MAX_PITCH)
        .map(|pitch_number| tone_group.transposed_to(pitch_number))
        .collect()
}

/// All 12 positions of one tone group, plus the summaries derived from them.
pub struct Transpose {
    tone_group: ToneGroup,
    positions: Vec<ToneGroup>,
    piano_keys: Vec<PianoKeys>,
    intervals: ModeCache<Vec<String>>,
}

impl Transpose {
    pub fn new<S: AsRef<str>>(root_note: &str, note_names: &[S]) -> Result<Transpose, TransposeError> {
        Transpose::from_tone_group(ToneGroup::from_input(root_note, note_names)?)
    }

    pub fn from_tone_group(tone_group: ToneGroup) -> Result<Transpose, TransposeError> {
        let positions = build_positions(&tone_group)?;
        Ok(Transpose {
            tone_group,
            positions,
            piano_keys: Vec::new(),
            intervals: ModeCache::new(),
        })
    }

    pub fn tone_group(&self) -> &ToneGroup {
        &self.tone_group
    }

    /// One group per root pitch, ordered C..B.
    pub fn all_positions(&self) -> &[ToneGroup] {
        &self.positions
    }

    /// Drops every cached result and builds the positions again.
    pub fn rebuild(&mut self) -> Result<&[ToneGroup], TransposeError> {
        self.piano_keys.clear();
        self.intervals.clear();
        self.positions = build_positions(&self.tone_group)?;
        Ok(&self.positions)
    }

    pub fn get_transposition(&self, pitch_number: i32) -> Result<&ToneGroup, TransposeError> {
        if !is_valid_pitch(pitch_number) {
            return Err(TransposeError::InvalidPitchIndex(pitch_number));
        }
        self.all_positions()
            .get((pitch_number - MIN_PITCH) as usize)
            .ok_or(TransposeError::InvalidPitchIndex(pitch_number))
    }

    pub fn get_transposition_for_named_key(&self, note_name: &str) -> Result<&ToneGroup, TransposeError> {
        let tone = Tone::from_name(note_name)?;
        self.get_transposition(tone.pitch_number())
    }

    /// Groups the positions by key pattern. Replaces the previous summary.
    pub fn key_patterns(&mut self, options: SummaryOptions) -> &[PianoKeys] {
        let summary = summarize(self.all_positions(), options);
        debug!(groups = summary.len(), ?options, "summarized key patterns");
        self.piano_keys = summary;
        &self.piano_keys
    }

    /// The summary from the last `key_patterns` call.
    pub fn piano_keys(&self) -> &[PianoKeys] {
        &self.piano_keys
    }

    /// Interval label of each member against the root, in member order.
    pub fn intervals(&self, note_name_type: NoteNameType) -> Vec<String> {
        self.intervals.get_or_compute(note_name_type, || {
            debug!(?note_name_type, "labelling intervals");
            intervals(&self.tone_group, note_name_type)
        })
    }

    pub fn interval_counts(&self, note_name_type: NoteNameType) -> Vec<(String, usize)> {
        interval_counts(&self.intervals(note_name_type))
    }
}
