use serde::Serialize;

/// A run of text, flagged when it matched the search term
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub matched: bool,
}

/// Text split into matched and unmatched runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Highlighted {
    pub segments: Vec<Segment>,
}

fn same_char(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

fn matches_at(text: &[char], at: usize, term: &[char]) -> bool {
    text.len() - at >= term.len()
        && text[at..at + term.len()]
            .iter()
            .zip(term)
            .all(|(&a, &b)| same_char(a, b))
}

/// Whether `term` is empty or only whitespace
pub fn is_blank(term: &str) -> bool {
    term.trim().is_empty()
}

/// Case-insensitive substring test
pub fn contains(text: &str, term: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let term: Vec<char> = term.chars().collect();
    if term.is_empty() {
        return true;
    }
    (0..text.len()).any(|at| matches_at(&text, at, &term))
}

impl Highlighted {
    pub fn plain(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        Self {
            segments: vec![Segment {
                text: text.to_string(),
                matched: false,
            }],
        }
    }

    /// Marks every non-overlapping occurrence of `term`, scanning left to right
    pub fn matching(text: &str, term: &str) -> Self {
        if is_blank(term) {
            return Self::plain(text);
        }

        let chars: Vec<char> = text.chars().collect();
        let needle: Vec<char> = term.chars().collect();
        let mut segments = Vec::new();
        let mut pending = String::new();
        let mut at = 0;

        while at < chars.len() {
            if matches_at(&chars, at, &needle) {
                if !pending.is_empty() {
                    segments.push(Segment {
                        text: std::mem::take(&mut pending),
                        matched: false,
                    });
                }
                segments.push(Segment {
                    text: chars[at..at + needle.len()].iter().collect(),
                    matched: true,
                });
                at += needle.len();
            } else {
                pending.push(chars[at]);
                at += 1;
            }
        }
        if !pending.is_empty() {
            segments.push(Segment {
                text: pending,
                matched: false,
            });
        }

        Self { segments }
    }

    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn has_match(&self) -> bool {
        self.segments.iter().any(|s| s.matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked(highlighted: &Highlighted) -> Vec<(&str, bool)> {
        highlighted
            .segments
            .iter()
            .map(|s| (s.text.as_str(), s.matched))
            .collect()
    }

    #[test]
    fn marks_every_occurrence_keeping_original_case() {
        let highlighted = Highlighted::matching("Lions of Lionsgate", "lions");
        assert_eq!(
            marked(&highlighted),
            vec![("Lions", true), (" of ", false), ("Lions", true), ("gate", false)]
        );
        assert_eq!(highlighted.text(), "Lions of Lionsgate");
    }

    #[test]
    fn occurrences_do_not_overlap() {
        let highlighted = Highlighted::matching("aaa", "aa");
        assert_eq!(marked(&highlighted), vec![("aa", true), ("a", false)]);
    }

    #[test]
    fn blank_term_leaves_text_plain() {
        let highlighted = Highlighted::matching("Detroit Lions", "   ");
        assert_eq!(marked(&highlighted), vec![("Detroit Lions", false)]);
        assert!(!highlighted.has_match());
    }

    #[test]
    fn regex_characters_match_literally() {
        let highlighted = Highlighted::matching("A.C. Milan (ITA)", "(ita)");
        assert_eq!(marked(&highlighted), vec![("A.C. Milan ", false), ("(ITA)", true)]);
    }

    #[test]
    fn contains_ignores_case() {
        assert!(contains("Detroit Lions", "LIONS"));
        assert!(contains("Atlético", "ATLÉ"));
        assert!(!contains("Detroit Lions", "tigers"));
        assert!(contains("anything", ""));
    }
}
