use std::cmp::Ordering;
use std::str::FromStr;

use itertools::Itertools;
use serde::Deserialize;

use crate::tonetranspose::error::TransposeError;
use crate::tonetranspose::tone::{KeyColor, NoteNameType};
use crate::tonetranspose::tonegroup::ToneGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum SortKeys {
    KeyPattern,
    #[default]
    Count,
    WhiteCount,
    BlackCount,
}

impl FromStr for SortKeys {
    type Err = TransposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['_', '-'], "").as_str() {
            "keypattern" | "pattern" => Ok(SortKeys::KeyPattern),
            "count" => Ok(SortKeys::Count),
            "whitecount" | "white" => Ok(SortKeys::WhiteCount),
            "blackcount" | "black" => Ok(SortKeys::BlackCount),
            _ => Err(TransposeError::Parse(format!("unknown sort key {:?}", s))),
        }
    }
}

impl TryFrom<String> for SortKeys {
    type Error = TransposeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Direction {
    Ascending,
    #[default]
    Descending,
}

impl FromStr for Direction {
    type Err = TransposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascending" | "asc" => Ok(Direction::Ascending),
            "descending" | "desc" => Ok(Direction::Descending),
            _ => Err(TransposeError::Parse(format!("unknown direction {:?}", s))),
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = TransposeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SummaryOptions {
    pub note_name_type: NoteNameType,
    pub sort_keys: SortKeys,
    pub direction: Direction,
}

impl SummaryOptions {
    pub fn new(note_name_type: NoteNameType, sort_keys: SortKeys, direction: Direction) -> Self {
        SummaryOptions {
            note_name_type,
            sort_keys,
            direction,
        }
    }
}

/// The transpositions that land on one black/white key pattern.
#[derive(Debug, Clone)]
pub struct PianoKeys {
    pub key_pattern: String,
    pub count: usize,
    /// Root names joined with `,`, in ascending root pitch order
    pub root_notes: String,
    pub tone_groups: Vec<ToneGroup>,
    pub white_count: usize,
    pub black_count: usize,
}

impl PianoKeys {
    fn new(key_pattern: &str, tone_groups: Vec<ToneGroup>, note_name_type: NoteNameType) -> PianoKeys {
        let root_notes = tone_groups
            .iter()
            .map(|group| group.root_tone().note_name(note_name_type))
            .join(",");
        PianoKeys {
            key_pattern: key_pattern.to_string(),
            count: tone_groups.len(),
            root_notes,
            tone_groups,
            white_count: key_pattern.chars().filter(|c| *c == KeyColor::White.code()).count(),
            black_count: key_pattern.chars().filter(|c| *c == KeyColor::Black.code()).count(),
        }
    }
}

/// Groups `positions` by exact key pattern and sorts the groups.
///
/// Groups start out in first-seen order; the sort is stable, so ties keep
/// that order in either direction.
pub fn summarize(positions: &[ToneGroup], options: SummaryOptions) -> Vec<PianoKeys> {
    let mut grouped: Vec<(&str, Vec<ToneGroup>)> = Vec::new();
    for position in positions {
        match grouped.iter_mut().find(|(pattern, _)| *pattern == position.key_pattern()) {
            Some((_, members)) => members.push(position.clone()),
            None => grouped.push((position.key_pattern(), vec![position.clone()])),
        }
    }

    let mut piano_keys: Vec<PianoKeys> = grouped
        .into_iter()
        .map(|(pattern, members)| PianoKeys::new(pattern, members, options.note_name_type))
        .collect();
    sort_piano_keys(&mut piano_keys, options.sort_keys, options.direction);
    piano_keys
}

fn sort_piano_keys(piano_keys: &mut [PianoKeys], sort_keys: SortKeys, direction: Direction) {
    piano_keys.sort_by(|a, b| {
        let ordering: Ordering = match sort_keys {
            SortKeys::KeyPattern => a.key_pattern.cmp(&b.key_pattern),
            SortKeys::Count => a.count.cmp(&b.count),
            SortKeys::WhiteCount => a.white_count.cmp(&b.white_count),
            SortKeys::BlackCount => a.black_count.cmp(&b.black_count),
        };
        match direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tonetranspose::transpose::Transpose;

    fn c_major_summary(options: SummaryOptions) -> Vec<PianoKeys> {
        let transpose = Transpose::new("C", &["C", "E", "G"]).unwrap();
        summarize(transpose.all_positions(), options)
    }

    fn patterns(piano_keys: &[PianoKeys]) -> Vec<&str> {
        piano_keys.iter().map(|keys| keys.key_pattern.as_str()).collect()
    }

    #[test]
    fn tone_group_summary_data() {
        let summary = c_major_summary(SummaryOptions::new(NoteNameType::Flat, SortKeys::Count, Direction::Descending));
        let rows: Vec<(&str, usize, &str)> = summary
            .iter()
            .map(|keys| (keys.key_pattern.as_str(), keys.count, keys.root_notes.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("www", 3, "C,F,G"),
                ("bwb", 3, "Db,Eb,Ab"),
                ("wbw", 3, "D,E,A"),
                ("bbb", 1, "Gb"),
                ("bww", 1, "Bb"),
                ("wbb", 1, "B"),
            ]
        );
        assert_eq!(summary.iter().map(|keys| keys.count).sum::<usize>(), 12);
        assert_eq!(summary.iter().map(|keys| keys.tone_groups.len()).sum::<usize>(), 12);
    }

    #[test]
    fn root_notes_follow_note_name_type() {
        let summary = c_major_summary(SummaryOptions::new(NoteNameType::Sharp, SortKeys::Count, Direction::Descending));
        assert_eq!(summary[1].root_notes, "C#,D#,G#");
        let summary = c_major_summary(SummaryOptions::default());
        assert_eq!(summary[1].root_notes, "Db_C#,Eb_D#,Ab_G#");
        assert_eq!(summary[3].root_notes, "Gb_F#");
    }

    #[test]
    fn white_and_black_counts() {
        let summary = c_major_summary(SummaryOptions::default());
        for keys in &summary {
            assert_eq!(keys.white_count + keys.black_count, 3);
        }
        let bwb = summary.iter().find(|keys| keys.key_pattern == "bwb").unwrap();
        assert_eq!((bwb.white_count, bwb.black_count), (1, 2));
    }

    #[test]
    fn sort_orders() {
        let by_pattern = c_major_summary(SummaryOptions::new(NoteNameType::Flat, SortKeys::KeyPattern, Direction::Ascending));
        assert_eq!(patterns(&by_pattern), vec!["bbb", "bwb", "bww", "wbb", "wbw", "www"]);

        let by_pattern = c_major_summary(SummaryOptions::new(NoteNameType::Flat, SortKeys::KeyPattern, Direction::Descending));
        assert_eq!(patterns(&by_pattern), vec!["www", "wbw", "wbb", "bww", "bwb", "bbb"]);

        let by_white = c_major_summary(SummaryOptions::new(NoteNameType::Flat, SortKeys::WhiteCount, Direction::Descending));
        assert_eq!(patterns(&by_white), vec!["www", "wbw", "bww", "bwb", "wbb", "bbb"]);

        let by_black = c_major_summary(SummaryOptions::new(NoteNameType::Flat, SortKeys::BlackCount, Direction::Ascending));
        assert_eq!(patterns(&by_black), vec!["www", "wbw", "bww", "bwb", "wbb", "bbb"]);

        let by_count = c_major_summary(SummaryOptions::new(NoteNameType::Flat, SortKeys::Count, Direction::Ascending));
        assert_eq!(patterns(&by_count), vec!["bbb", "bww", "wbb", "www", "bwb", "wbw"]);
    }

    #[test]
    fn single_pattern_for_chromatic_cluster() {
        let transpose = Transpose::new("C", &["C"]).unwrap();
        let summary = summarize(transpose.all_positions(), SummaryOptions::default());
        assert_eq!(patterns(&summary), vec!["w", "b"]);
        assert_eq!(summary[0].count, 7);
        assert_eq!(summary[1].count, 5);
    }

    #[test]
    fn option_parsing() {
        assert_eq!("white_count".parse::<SortKeys>().unwrap(), SortKeys::WhiteCount);
        assert_eq!("KeyPattern".parse::<SortKeys>().unwrap(), SortKeys::KeyPattern);
        assert_eq!("asc".parse::<Direction>().unwrap(), Direction::Ascending);
        assert!("sideways".parse::<Direction>().is_err());
        assert!("size".parse::<SortKeys>().is_err());
    }
}
