use std::str::FromStr;

use itertools::Itertools;
use tracing::debug;

use crate::tonetranspose::error::TransposeError;
use crate::tonetranspose::noteparser;
use crate::tonetranspose::tone::{is_valid_pitch, NoteNameType, Tone, MAX_PITCH, MIN_PITCH};
use crate::tonetranspose::tonegroup::ToneGroup;
use crate::tonetranspose::transpose::transpose_pitch;

/// Tone groups that move together under a shared key.
#[derive(Debug, Clone)]
pub struct Progression {
    key: Tone,
    tone_groups: Vec<ToneGroup>,
}

/// A progression moved so its key sits on one pitch.
#[derive(Debug, Clone)]
pub struct ProgressionPosition {
    pub key: Tone,
    pub tone_groups: Vec<ToneGroup>,
}

impl ProgressionPosition {
    /// Roots of every group, joined with `", "`.
    pub fn root_names(&self, note_name_type: NoteNameType) -> String {
        self.tone_groups
            .iter()
            .map(|group| group.root_tone().note_name(note_name_type))
            .join(", ")
    }
}

impl Progression {
    pub fn new(key_note: &str, tone_groups: Vec<ToneGroup>) -> Result<Progression, TransposeError> {
        Ok(Progression {
            key: Tone::from_name(key_note)?,
            tone_groups,
        })
    }

    pub fn key(&self) -> &Tone {
        &self.key
    }

    pub fn tone_groups(&self) -> &[ToneGroup] {
        &self.tone_groups
    }

    /// The progression with its key moved to `pitch_number`. Each group keeps
    /// its signed distance from the key.
    pub fn position(&self, pitch_number: i32) -> Result<ProgressionPosition, TransposeError> {
        if !is_valid_pitch(pitch_number) {
            return Err(TransposeError::InvalidPitchIndex(pitch_number));
        }
        let tone_groups = self
            .tone_groups
            .iter()
            .map(|group| {
                let distance = group.root_tone().pitch_number() - self.key.pitch_number();
                group.transposed_to(transpose_pitch(pitch_number, distance)?)
            })
            .collect::<Result<Vec<ToneGroup>, TransposeError>>()?;
        Ok(ProgressionPosition {
            key: Tone::new(pitch_number)?,
            tone_groups,
        })
    }

    pub fn position_for_named_key(&self, note_name: &str) -> Result<ProgressionPosition, TransposeError> {
        self.position(Tone::from_name(note_name)?.pitch_number())
    }

    /// All 12 positions, ordered by key pitch C..B.
    pub fn positions(&self) -> Result<Vec<ProgressionPosition>, TransposeError> {
        debug!(key = self.key.flat_name(), groups = self.tone_groups.len(), "moving progression");
        (MIN_PITCH..=MAX_PITCH).map(|pitch_number| self.position(pitch_number)).collect()
    }
}

/// Parses `"<key> | <root>: <notes> | ..."`, e.g. `"C | D: D F# A | G: G B D"`.
impl FromStr for Progression {
    type Err = TransposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, groups) = noteparser::parse_progression(s)?;
        let tone_groups = groups
            .iter()
            .map(|(root, notes)| ToneGroup::from_input(root, notes))
            .collect::<Result<Vec<ToneGroup>, TransposeError>>()?;
        Progression::new(&key, tone_groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progression() -> Progression {
        Progression::new(
            "C",
            vec![
                ToneGroup::from_input("D", &["D", "E", "A"]).unwrap(),
                ToneGroup::from_input("G", &["G", "B", "D"]).unwrap(),
                ToneGroup::from_input("C", &["C", "E", "G"]).unwrap(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn roots_move_together() {
        let progression = progression();
        assert_eq!(progression.position(3).unwrap().root_names(NoteNameType::Flat), "E, A, D");
        assert_eq!(progression.position(1).unwrap().root_names(NoteNameType::Flat), "D, G, C");
        assert_eq!(progression.position(12).unwrap().root_names(NoteNameType::Sharp), "C#, F#, B");
    }

    #[test]
    fn twelve_positions() {
        let positions = progression().positions().unwrap();
        assert_eq!(positions.len(), 12);
        for (index, position) in positions.iter().enumerate() {
            assert_eq!(position.key.pitch_number(), index as i32 + 1);
            assert_eq!(position.tone_groups.len(), 3);
        }
        assert_eq!(positions[7].tone_groups[1].render(NoteNameType::Flat), "D, Gb, A");
    }

    #[test]
    fn keeps_group_shapes() {
        let progression = progression();
        let moved = progression.position_for_named_key("Eb").unwrap();
        for (moved_group, group) in moved.tone_groups.iter().zip(progression.tone_groups()) {
            assert_eq!(moved_group.tone_pattern(), group.tone_pattern());
        }
        assert_eq!(moved.tone_groups[2].render(NoteNameType::Flat), "Eb, G, Bb");
    }

    #[test]
    fn invalid_lookups() {
        let progression = progression();
        assert_eq!(progression.position(0).err(), Some(TransposeError::InvalidPitchIndex(0)));
        assert_eq!(
            Progression::new("H", vec![]).err(),
            Some(TransposeError::InvalidNoteName("H".to_string()))
        );
    }

    #[test]
    fn from_str() {
        let progression: Progression = "C | D: D E A | G: G B D | C: C E G".parse().unwrap();
        assert_eq!(progression.tone_groups().len(), 3);
        assert_eq!(progression.position(3).unwrap().root_names(NoteNameType::Flat), "E, A, D");
        assert!("C | D: D E# A".parse::<Progression>().is_err());
    }
}
