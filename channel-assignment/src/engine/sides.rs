use std::sync::OnceLock;

use regex::Regex;

use super::types::{Channel, Side};

fn left_pattern() -> &'static Regex {
    static LEFT: OnceLock<Regex> = OnceLock::new();
    LEFT.get_or_init(|| Regex::new(r"(?i)left|\bl\b").expect("static regex"))
}

fn right_pattern() -> &'static Regex {
    static RIGHT: OnceLock<Regex> = OnceLock::new();
    RIGHT.get_or_init(|| Regex::new(r"(?i)right|\br\b").expect("static regex"))
}

/// Guesses the stereo side from a free-text input label.
/// "Keyboard Left", "Keys L" -> Left; "Synth Right", "Keys R" -> Right.
/// Labels matching both or neither pattern return None.
pub fn side_from_label(label: &str) -> Option<Side> {
    match (left_pattern().is_match(label), right_pattern().is_match(label)) {
        (true, false) => Some(Side::Left),
        (false, true) => Some(Side::Right),
        _ => None,
    }
}

/// Explicit side wins over the label
pub fn channel_side(channel: &Channel) -> Option<Side> {
    channel.side.or_else(|| side_from_label(&channel.label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_from_label() {
        assert_eq!(side_from_label("Keyboard Left"), Some(Side::Left));
        assert_eq!(side_from_label("Synth Right"), Some(Side::Right));
        assert_eq!(side_from_label("keys l"), Some(Side::Left));
        assert_eq!(side_from_label("Keys (R)"), Some(Side::Right));
        assert_eq!(side_from_label("Piano-L"), Some(Side::Left));
    }

    #[test]
    fn test_letters_inside_words_are_not_sides() {
        // "Keyboard" holds an 'r', "Organ Leslie" holds an 'l'
        assert_eq!(side_from_label("Keyboard"), None);
        assert_eq!(side_from_label("Organ Leslie"), None);
        assert_eq!(side_from_label("Keyboard Mono"), None);
    }

    #[test]
    fn test_ambiguous_label_has_no_side() {
        assert_eq!(side_from_label("Keys L/R"), None);
        assert_eq!(side_from_label("Left Right Sum"), None);
    }

    #[test]
    fn test_explicit_side_overrides_label() {
        let channel = Channel::new("keyboard-1", "Keyboard Left", true).with_side(Side::Right);
        assert_eq!(channel_side(&channel), Some(Side::Right));

        let unlabeled = Channel::new("keyboard-2", "Nord Stage", true).with_side(Side::Left);
        assert_eq!(channel_side(&unlabeled), Some(Side::Left));
    }
}
