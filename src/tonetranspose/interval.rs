//! Scale-degree labels for the distance between a root and a chord tone.

use tracing::warn;

use crate::tonetranspose::error::TransposeError;
use crate::tonetranspose::tone::{NoteNameType, Tone, MAX_PITCH};
use crate::tonetranspose::tonegroup::ToneGroup;

const FLAT_LABELS: [&str; 13] = ["R", "b2", "2", "b3", "3", "4", "b5", "5", "b6", "6", "b7", "7", "R"];
const SHARP_LABELS: [&str; 13] = ["R", "#R", "2", "#2", "3", "4", "#4", "5", "#5", "6", "#6", "7", "R"];
/// Sharp spelling first, unlike enharmonic note names which lead with the flat.
const ENHARMONIC_LABELS: [&str; 13] = [
    "R", "#R_b2", "2", "#2_b3", "3", "4", "#4_b5", "5", "#5_b6", "6", "#6_b7", "7", "R",
];

/// Label for a signed semitone distance from the root.
///
/// Negative distances count down from the octave. A distance that still
/// falls outside 0..=12 is returned as the number itself; offsets between
/// two valid tones never get there.
pub fn interval_label(distance_root_to_note: i32, note_name_type: NoteNameType) -> String {
    let distance = if distance_root_to_note < 0 {
        MAX_PITCH + distance_root_to_note
    } else {
        distance_root_to_note
    };
    if !(0..=MAX_PITCH).contains(&distance) {
        warn!(distance_root_to_note, "no interval label for distance");
        return distance_root_to_note.to_string();
    }
    let labels = match note_name_type {
        NoteNameType::Flat => &FLAT_LABELS,
        NoteNameType::Sharp => &SHARP_LABELS,
        NoteNameType::Enharmonic => &ENHARMONIC_LABELS,
    };
    labels[distance as usize].to_string()
}

/// Labels for each member of `tone_group`, in member order.
pub fn intervals(tone_group: &ToneGroup, note_name_type: NoteNameType) -> Vec<String> {
    tone_group
        .tone_pattern()
        .iter()
        .map(|distance| interval_label(*distance, note_name_type))
        .collect()
}

pub fn intervals_for_names<S: AsRef<str>>(
    root_note: &str,
    note_names: &[S],
    note_name_type: NoteNameType,
) -> Result<Vec<String>, TransposeError> {
    let root_tone = Tone::from_name(root_note)?;
    note_names
        .iter()
        .map(|name| {
            let tone = Tone::from_name(name.as_ref())?;
            Ok(interval_label(tone.pitch_number() - root_tone.pitch_number(), note_name_type))
        })
        .collect()
}

/// How often each label occurs, in first-seen order.
pub fn interval_counts<S: AsRef<str>>(labels: &[S]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for label in labels {
        let label: &str = label.as_ref();
        match counts.iter_mut().find(|(seen, _)| seen == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label.to_string(), 1)),
        }
    }
    counts
}
