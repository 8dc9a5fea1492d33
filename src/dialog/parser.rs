//! Single-line transcript parsing: `[Role]: Utterance`.

/// Token separating the bracketed role from the utterance.
pub const SEPARATOR: &str = "]: ";

/// One parsed transcript line, borrowing from the raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogLine<'a> {
    pub role: &'a str,
    pub utterance: &'a str,
}

impl<'a> DialogLine<'a> {
    /// A line counts as a dialog turn only when both halves are non-empty.
    pub fn is_turn(&self) -> bool {
        !self.role.is_empty() && !self.utterance.is_empty()
    }
}

/// Split a raw line into role and utterance on the first `]: `.
///
/// The line is trimmed first, the role loses its leading `[`, and the utterance is
/// trimmed. Returns `None` when the separator is absent.
pub fn parse_line(line: &str) -> Option<DialogLine<'_>> {
    let (head, tail) = line.trim().split_once(SEPARATOR)?;
    Some(DialogLine {
        role: head.trim_start_matches('['),
        utterance: tail.trim(),
    })
}

/// Like [`parse_line`], but drops lines with an empty role or utterance.
pub fn parse_turn(line: &str) -> Option<DialogLine<'_>> {
    parse_line(line).filter(DialogLine::is_turn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_role_and_utterance() {
        let line = parse_line("[Pracodawca]: Potrzebuję to na EOD").unwrap();
        assert_eq!(line.role, "Pracodawca");
        assert_eq!(line.utterance, "Potrzebuję to na EOD");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let line = parse_line("   [Korpotłumacz]:    Na dziś.  \n").unwrap();
        assert_eq!(line.role, "Korpotłumacz");
        assert_eq!(line.utterance, "Na dziś.");
    }

    #[test]
    fn splits_on_first_separator_only() {
        let line = parse_line("[A]: cytat: [B]: dalej").unwrap();
        assert_eq!(line.role, "A");
        assert_eq!(line.utterance, "cytat: [B]: dalej");
    }

    #[test]
    fn lines_without_separator_yield_none() {
        for raw in [
            "",
            "just prose",
            "[Pracodawca] no colon",
            "[Pracodawca]:no space",
            "Pracodawca: plain colon",
        ] {
            assert!(parse_line(raw).is_none(), "{raw:?} should not parse");
        }
    }

    #[test]
    fn separator_with_nothing_after_trims_away() {
        // trailing whitespace is trimmed before splitting, so "]: " disappears
        assert!(parse_line("[Pracodawca]: ").is_none());
    }

    #[test]
    fn role_without_bracket_is_kept() {
        let line = parse_line("Narrator]: tekst").unwrap();
        assert_eq!(line.role, "Narrator");
    }

    #[test]
    fn parse_turn_rejects_empty_role() {
        assert!(parse_line("[]: tekst").is_some());
        assert!(parse_turn("[]: tekst").is_none());
        assert!(parse_turn("[X]: tekst").is_some());
    }
}
