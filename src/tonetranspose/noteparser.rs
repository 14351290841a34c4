use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use crate::tonetranspose::error::TransposeError;

#[derive(Parser)]
#[grammar = "tonetranspose/notes.pest"]
pub struct NoteParser;

pub type GroupInput = (String, Vec<String>);

fn parse_rule(rule: Rule, s: &str) -> Result<Pair<'_, Rule>, TransposeError> {
    NoteParser::parse(rule, s.trim())
        .map_err(|e| TransposeError::Parse(e.to_string()))?
        .next()
        .ok_or_else(|| TransposeError::Parse(format!("nothing to parse in {:?}", s)))
}

fn note_names(pair: Pair<Rule>) -> Vec<String> {
    pair.into_inner().map(|name| name.as_str().to_string()).collect()
}

fn group_input(pair: Pair<Rule>) -> Result<GroupInput, TransposeError> {
    let mut inner = pair.into_inner();
    match (inner.next(), inner.next()) {
        (Some(root), Some(notes)) if notes.as_rule() == Rule::NOTES => Ok((root.as_str().to_string(), note_names(notes))),
        (root, notes) => Err(TransposeError::Parse(format!("malformed tone group: {:?} {:?}", root, notes))),
    }
}

/// `"C E G"` or `"C, E, G"`. Names are not checked against the pitch tables.
pub fn parse_note_names(s: &str) -> Result<Vec<String>, TransposeError> {
    Ok(note_names(parse_rule(Rule::FULL_NOTES, s)?))
}

/// `"C: C E G"` into the root name and the member names.
pub fn parse_tone_group(s: &str) -> Result<GroupInput, TransposeError> {
    group_input(parse_rule(Rule::FULL_TONE_GROUP, s)?)
}

/// `"C | D: D F# A | G: G B D"` into the key name and each group's input.
pub fn parse_progression(s: &str) -> Result<(String, Vec<GroupInput>), TransposeError> {
    let mut inner = parse_rule(Rule::FULL_PROGRESSION, s)?.into_inner();
    let key = inner
        .next()
        .ok_or_else(|| TransposeError::Parse(format!("missing key in {:?}", s)))?
        .as_str()
        .to_string();
    let groups = inner.map(group_input).collect::<Result<Vec<GroupInput>, TransposeError>>()?;
    Ok((key, groups))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_lists() {
        assert_eq!(parse_note_names("C E G").unwrap(), vec!["C", "E", "G"]);
        assert_eq!(parse_note_names(" C,Eb, G ").unwrap(), vec!["C", "Eb", "G"]);
        assert_eq!(parse_note_names("B1b F#").unwrap(), vec!["B1b", "F#"]);
        assert!(parse_note_names("").is_err());
        assert!(parse_note_names("C ; E").is_err());
    }

    #[test]
    fn tone_groups() {
        assert_eq!(
            parse_tone_group("D: D F# A").unwrap(),
            ("D".to_string(), vec!["D".to_string(), "F#".to_string(), "A".to_string()])
        );
        assert!(parse_tone_group("D D F# A").is_err());
    }

    #[test]
    fn progressions() {
        let (key, groups) = parse_progression("C | D: D E A | G: G B D | C: C E G").unwrap();
        assert_eq!(key, "C");
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[1].0, "G");
        assert_eq!(groups[2].1, vec!["C", "E", "G"]);
        assert!(parse_progression("C").is_err());
    }
}
