//! Display casing for suggestions
//!
//! The store only holds lowercase words, so the casing of a suggestion is
//! rebuilt from what the user typed.

/// Re-case `word` after the pattern of `typed`:
/// - all upper-case input (at least one cased letter, none lower-case) upper-cases the word
/// - otherwise an upper-case first character capitalizes the word
/// - otherwise the word is lower-cased
pub fn match_case(word: &str, typed: &str) -> String {
    if is_all_upper(typed) {
        return word.to_uppercase();
    }

    let starts_upper = typed.chars().next().is_some_and(char::is_uppercase);
    if starts_upper {
        let mut chars = word.chars();
        return match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.as_str().to_lowercase().chars())
                .collect(),
            None => String::new(),
        };
    }

    word.to_lowercase()
}

fn is_all_upper(typed: &str) -> bool {
    typed.chars().any(char::is_uppercase) && !typed.chars().any(char::is_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalized_input() {
        assert_eq!(match_case("hello", "Wor"), "Hello");
        assert_eq!(match_case("HELLO", "Wor"), "Hello");
    }

    #[test]
    fn test_upper_input() {
        assert_eq!(match_case("hello", "WOR"), "HELLO");
        assert_eq!(match_case("hello", "W"), "HELLO");
        assert_eq!(match_case("don't", "DON'"), "DON'T");
    }

    #[test]
    fn test_lower_input() {
        assert_eq!(match_case("hello", "wor"), "hello");
        assert_eq!(match_case("Hello", "wOR"), "hello");
    }

    #[test]
    fn test_uncased_input_lowercases() {
        assert_eq!(match_case("hello", "123"), "hello");
        assert_eq!(match_case("hello", ""), "hello");
    }

    #[test]
    fn test_non_ascii() {
        assert_eq!(match_case("école", "É"), "ÉCOLE");
        assert_eq!(match_case("école", "Éc"), "École");
        assert_eq!(match_case("straße", "STR"), "STRASSE");
    }

    #[test]
    fn test_empty_word() {
        assert_eq!(match_case("", "Abc"), "");
    }
}
