//! Word inflection used to infer foreign-key names.

/// Turns a plural table or relation name into its singular form.
pub trait Inflector: Send + Sync {
    /// Returns the singular form of `word`.
    fn singularize(&self, word: &str) -> String;
}

/// Rule-based English singularization.
///
/// Covers the regular suffixes and a handful of irregular nouns. Words it
/// does not recognize as plural are returned unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishInflector;

const IRREGULAR: &[(&str, &str)] = &[
    ("people", "person"),
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
];

const UNCOUNTABLE: &[&str] = &["data", "equipment", "information", "news", "series", "species"];

impl EnglishInflector {
    /// Creates the inflector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Inflector for EnglishInflector {
    fn singularize(&self, word: &str) -> String {
        let lower = word.to_ascii_lowercase();
        if UNCOUNTABLE.contains(&lower.as_str()) {
            return word.to_string();
        }
        if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == lower) {
            return match_case(word, singular);
        }

        // Suffix lengths are ASCII, so byte slicing stays on char boundaries.
        let stem = |n: usize| word[..word.len() - n].to_string();
        if lower.ends_with("ies") && lower.len() > 3 {
            return format!("{}{}", stem(3), if is_upper(word) { "Y" } else { "y" });
        }
        if lower.ends_with("ves") && lower.len() > 3 {
            return format!("{}{}", stem(3), if is_upper(word) { "F" } else { "f" });
        }
        for suffix in ["sses", "shes", "ches", "xes", "zes"] {
            if lower.ends_with(suffix) {
                return stem(2);
            }
        }
        if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
            return word.to_string();
        }
        if lower.ends_with('s') && lower.len() > 1 {
            return stem(1);
        }
        word.to_string()
    }
}

fn is_upper(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase)
}

fn match_case(original: &str, replacement: &str) -> String {
    if is_upper(original) {
        return replacement.to_ascii_uppercase();
    }
    let mut chars = replacement.chars();
    match (original.chars().next(), chars.next()) {
        (Some(first), Some(r)) if first.is_uppercase() => {
            r.to_uppercase().chain(chars).collect()
        }
        _ => replacement.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn singular(word: &str) -> String {
        EnglishInflector::new().singularize(word)
    }

    #[test]
    fn test_regular_plurals() {
        assert_eq!(singular("users"), "user");
        assert_eq!(singular("Users"), "User");
        assert_eq!(singular("companies"), "company");
        assert_eq!(singular("boxes"), "box");
        assert_eq!(singular("addresses"), "address");
        assert_eq!(singular("branches"), "branch");
        assert_eq!(singular("wolves"), "wolf");
    }

    #[test]
    fn test_irregular_and_uncountable() {
        assert_eq!(singular("people"), "person");
        assert_eq!(singular("Children"), "Child");
        assert_eq!(singular("PEOPLE"), "PERSON");
        assert_eq!(singular("news"), "news");
    }

    #[test]
    fn test_non_plurals_unchanged() {
        assert_eq!(singular("a"), "a");
        assert_eq!(singular("author"), "author");
        assert_eq!(singular("status"), "status");
        assert_eq!(singular("class"), "class");
        assert_eq!(singular("s"), "s");
    }
}
