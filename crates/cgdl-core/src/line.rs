use serde::{Deserialize, Serialize};

use crate::normalize_display;

/// The only signal interpreted by the reader; everything else is payload.
pub const PROPERTY_SIGNAL: &str = "{}";

/// One classified source line: an optional two-character signal plus text.
///
/// `signal` is either empty or exactly two characters. `text` is the
/// display-normalized remainder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct Line {
    pub signal: String,
    pub text: String,
}

impl Line {
    #[must_use]
    pub fn new(signal: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            signal: signal.into(),
            text: text.into(),
        }
    }

    /// Classifies a raw line and normalizes its text.
    #[must_use]
    pub fn parse(raw_line: &str) -> Self {
        let (signal, text) = Self::split_signal(raw_line);
        Self::new(signal, normalize_display(text))
    }

    /// Splits off the signal without normalizing the remainder.
    ///
    /// Leading whitespace is skipped for detection. When the first two
    /// characters after it are both command punctuation they form the
    /// signal; otherwise the signal is empty and the whole left-trimmed line
    /// is text.
    #[must_use]
    pub fn split_signal(raw_line: &str) -> (&str, &str) {
        let trimmed = raw_line.trim_start();
        let mut chars = trimmed.char_indices();
        if let (Some((_, first)), Some((second_at, second))) = (chars.next(), chars.next())
            && is_command_punct(first)
            && is_command_punct(second)
        {
            let split_at = second_at + second.len_utf8();
            return (&trimmed[..split_at], &trimmed[split_at..]);
        }
        ("", trimmed)
    }

    #[must_use]
    pub fn has_signal(&self) -> bool {
        !self.signal.is_empty()
    }

    #[must_use]
    pub fn is_property(&self) -> bool {
        self.signal == PROPERTY_SIGNAL
    }
}

/// Hyphen, apostrophe and underscore read as word characters, never as
/// command punctuation. Letters and digits of any script are word
/// characters too, so accented or non-Latin text never forms a signal.
#[must_use]
pub fn is_command_punct(ch: char) -> bool {
    !matches!(ch, '-' | '\'' | '_') && !ch.is_whitespace() && !ch.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::{Line, is_command_punct};

    #[test]
    fn detects_two_character_signal() {
        let line = Line::parse("{} country =   France ");
        assert_eq!(line.signal, "{}");
        assert_eq!(line.text, "country = France");
        assert!(line.is_property());
    }

    #[test]
    fn leading_whitespace_is_ignored_for_detection() {
        let line = Line::parse("   !! do   something");
        assert_eq!(line.signal, "!!");
        assert_eq!(line.text, "do something");
    }

    #[test]
    fn word_punctuation_never_forms_a_signal() {
        for raw in ["--flag", "''quoted", "__init", "-!", "!-"] {
            let line = Line::parse(raw);
            assert_eq!(line.signal, "", "unexpected signal for {raw:?}");
            assert_eq!(line.text, raw);
        }
    }

    #[test]
    fn plain_text_has_no_signal() {
        let line = Line::parse("  Some   free text ");
        assert!(!line.has_signal());
        assert_eq!(line.text, "Some free text");
    }

    #[test]
    fn punctuation_followed_by_space_has_no_signal() {
        let line = Line::parse(": Label");
        assert_eq!(line.signal, "");
        assert_eq!(line.text, ": Label");
    }

    #[test]
    fn signal_without_text() {
        let line = Line::parse("??");
        assert_eq!(line.signal, "??");
        assert_eq!(line.text, "");
        assert_eq!(Line::parse("?").signal, "");
    }

    #[test]
    fn multibyte_punctuation_is_split_on_char_boundaries() {
        let (signal, text) = Line::split_signal("→→ next");
        assert_eq!(signal, "→→");
        assert_eq!(text, " next");
    }

    #[test]
    fn non_ascii_letters_never_form_a_signal() {
        for raw in ["éé x", "名前 ok", "Ωμ: value"] {
            let line = Line::parse(raw);
            assert_eq!(line.signal, "", "unexpected signal for {raw:?}");
            assert_eq!(line.text, raw);
        }
        assert!(!is_command_punct('é'));
        assert!(!is_command_punct('٣'));
    }

    #[test]
    fn command_punct_classification() {
        assert!(is_command_punct('{'));
        assert!(is_command_punct('@'));
        assert!(!is_command_punct('a'));
        assert!(!is_command_punct('7'));
        assert!(!is_command_punct(' '));
        assert!(!is_command_punct('_'));
    }
}
