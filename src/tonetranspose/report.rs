use crate::tonetranspose::pianokeys::PianoKeys;
use crate::tonetranspose::progression::ProgressionPosition;
use crate::tonetranspose::tone::NoteNameType;
use crate::tonetranspose::tonegroup::ToneGroup;
use crate::tonetranspose::util::bracketed;

/// `"<root> | <members>"` for each position
pub fn position_lines(positions: &[ToneGroup], note_name_type: NoteNameType) -> Vec<String> {
    positions
        .iter()
        .map(|position| format!("{} | {}", position.root_tone().note_name(note_name_type), position.render(note_name_type)))
        .collect()
}

/// `"<pattern> | <count> | <roots>"` for each summary row
pub fn key_pattern_lines(piano_keys: &[PianoKeys]) -> Vec<String> {
    piano_keys
        .iter()
        .map(|keys| format!("{} | {} | {}", keys.key_pattern, keys.count, keys.root_notes))
        .collect()
}

pub fn interval_line(labels: &[String]) -> String {
    bracketed(labels)
}

pub fn interval_count_line(counts: &[(String, usize)]) -> String {
    bracketed(counts.iter().map(|(label, count)| format!("{}: {}", label, count)))
}

/// `"<key> | <roots>"` for each progression position
pub fn progression_lines(positions: &[ProgressionPosition], note_name_type: NoteNameType) -> Vec<String> {
    positions
        .iter()
        .map(|position| format!("{} | {}", position.key.note_name(note_name_type), position.root_names(note_name_type)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tonetranspose::pianokeys::SummaryOptions;
    use crate::tonetranspose::progression::Progression;
    use crate::tonetranspose::transpose::Transpose;

    #[test]
    fn print_positions() {
        let transpose = Transpose::new("C", &["C", "E", "G"]).unwrap();
        let lines = position_lines(transpose.all_positions(), NoteNameType::Flat);
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "C | C, E, G");
        assert_eq!(lines[6], "Gb | Gb, Bb, Db");
    }

    #[test]
    fn print_key_pattern() {
        let mut transpose = Transpose::new("C", &["C", "E", "G"]).unwrap();
        let options = SummaryOptions { note_name_type: NoteNameType::Flat, ..SummaryOptions::default() };
        let lines = key_pattern_lines(transpose.key_patterns(options));
        assert_eq!(lines[0], "www | 3 | C,F,G");
        assert_eq!(lines[5], "wbb | 1 | B");
    }

    #[test]
    fn print_intervals() {
        let transpose = Transpose::new("C", &["C", "E", "G", "C"]).unwrap();
        assert_eq!(interval_line(&transpose.intervals(NoteNameType::Flat)), "[R, 3, 5, R]");
        assert_eq!(
            interval_count_line(&transpose.interval_counts(NoteNameType::Flat)),
            "[R: 2, 3: 1, 5: 1]"
        );
    }

    #[test]
    fn print_progression() {
        let progression: Progression = "C | D: D E A | G: G B D | C: C E G".parse().unwrap();
        let lines = progression_lines(&progression.positions().unwrap(), NoteNameType::Flat);
        assert_eq!(lines[2], "D | E, A, D");
    }
}
