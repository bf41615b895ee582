/// `U+XXXX` readout for an emoji string. Zero-width joiners are dropped so
/// composed sequences like 👩‍💻 list only their visible parts.
pub fn emoji_codes(s: &str) -> Vec<String> {
    s.chars()
        .filter(|&c| c != '\u{200D}')
        .map(|c| format!("U+{:X}", c as u32))
        .collect()
}

/// Display form of a code list, matching the on-screen readout.
pub fn format_codes(codes: &[String]) -> String {
    codes.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emoji_codes_basic() {
        assert_eq!(emoji_codes("😊✨"), vec!["U+1F60A", "U+2728"]);
    }

    #[test]
    fn test_emoji_codes_skip_zwj() {
        // 😵‍💫 is 😵 + ZWJ + 💫
        assert_eq!(emoji_codes("😵\u{200D}💫"), vec!["U+1F635", "U+1F4AB"]);
    }

    #[test]
    fn test_emoji_codes_empty() {
        assert!(emoji_codes("").is_empty());
    }

    #[test]
    fn test_format_codes() {
        let codes = emoji_codes("😊✨");
        assert_eq!(format_codes(&codes), "U+1F60A, U+2728");
    }
}
