//! English noun pluralization for collection names.
//!
//! Rule order: uncountables, irregulars, then suffix rules, then a plain `s`.
//! The tables cover the nouns that show up in schema names (people, roles,
//! categories); they are not a full morphology engine.

/// Nouns whose plural equals the singular.
const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "fish",
    "information",
    "media",
    "money",
    "news",
    "series",
    "sheep",
    "species",
    "staff",
];

/// Irregular singular/plural pairs.
const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("man", "men"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("person", "people"),
    ("tooth", "teeth"),
    ("woman", "women"),
];

/// Words ending in `o` that take `es` (most `o` words just take `s`).
const O_TO_OES: &[&str] = &["echo", "hero", "potato", "tomato", "torpedo", "veto"];

/// Words ending in `f`/`fe` that keep the `f` (roof → roofs).
const F_TO_FS: &[&str] = &["belief", "chef", "chief", "proof", "roof", "safe"];

/// Pluralize a single English noun.
///
/// The input is expected to be a bare word (one dot-delimited name segment);
/// casing of the original word is preserved where the rule appends a suffix.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let lower = word.to_ascii_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    for (singular, plural) in IRREGULAR {
        if lower == *singular {
            return match_case(plural, word);
        }
        // Compound irregulars: "chairman" → "chairmen". Two-letter suffixes
        // ("ox") are excluded so "box" stays regular, and "human" is not a
        // compound of "man".
        if singular.len() >= 3
            && lower != "human"
            && let Some(stem) = lower.strip_suffix(singular)
            && !stem.is_empty()
        {
            return format!("{}{}", &word[..stem.len()], plural);
        }
    }

    if let Some(stem) = strip_any(&lower, &["y"]) {
        let before = stem.chars().last();
        if before.is_some_and(|c| !is_vowel(c)) {
            return format!("{}ies", &word[..word.len() - 1]);
        }
    }

    if strip_any(&lower, &["s", "x", "z", "ch", "sh"]).is_some() {
        // "analysis" → "analyses", "bus" → "buses"
        if let Some(stem) = lower.strip_suffix("is") {
            return format!("{}es", &word[..stem.len()]);
        }
        return format!("{word}es");
    }

    if O_TO_OES.contains(&lower.as_str()) {
        return format!("{word}es");
    }

    if !F_TO_FS.contains(&lower.as_str()) {
        if lower.ends_with("fe") {
            return format!("{}ves", &word[..word.len() - 2]);
        }
        if lower.ends_with('f') && !lower.ends_with("ff") {
            return format!("{}ves", &word[..word.len() - 1]);
        }
    }

    format!("{word}s")
}

/// Apply the source word's leading capitalization to a replacement word.
fn match_case(replacement: &str, source: &str) -> String {
    if source.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        let mut chars = replacement.chars();
        match chars.next() {
            Some(first) => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
            None => String::new(),
        }
    } else {
        replacement.to_string()
    }
}

fn strip_any<'a>(word: &'a str, suffixes: &[&str]) -> Option<&'a str> {
    suffixes.iter().find_map(|s| word.strip_suffix(s))
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_nouns() {
        assert_eq!(pluralize("user"), "users");
        assert_eq!(pluralize("comment"), "comments");
        assert_eq!(pluralize("gender"), "genders");
        assert_eq!(pluralize("role"), "roles");
        assert_eq!(pluralize("post"), "posts");
    }

    #[test]
    fn test_sibilant_endings() {
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("bus"), "buses");
        assert_eq!(pluralize("status"), "statuses");
        assert_eq!(pluralize("match"), "matches");
        assert_eq!(pluralize("dish"), "dishes");
    }

    #[test]
    fn test_is_endings() {
        assert_eq!(pluralize("analysis"), "analyses");
        assert_eq!(pluralize("axis"), "axes");
    }

    #[test]
    fn test_y_endings() {
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("city"), "cities");
        // vowel + y stays regular
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("key"), "keys");
    }

    #[test]
    fn test_f_endings() {
        assert_eq!(pluralize("leaf"), "leaves");
        assert_eq!(pluralize("knife"), "knives");
        assert_eq!(pluralize("roof"), "roofs");
        assert_eq!(pluralize("staff"), "staff");
        assert_eq!(pluralize("cliff"), "cliffs");
    }

    #[test]
    fn test_o_endings() {
        assert_eq!(pluralize("hero"), "heroes");
        assert_eq!(pluralize("photo"), "photos");
    }

    #[test]
    fn test_irregulars() {
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("child"), "children");
        assert_eq!(pluralize("Person"), "People");
        assert_eq!(pluralize("chairman"), "chairmen");
        assert_eq!(pluralize("human"), "humans");
    }

    #[test]
    fn test_uncountables() {
        assert_eq!(pluralize("sheep"), "sheep");
        assert_eq!(pluralize("news"), "news");
        assert_eq!(pluralize("series"), "series");
    }

    #[test]
    fn test_empty_word() {
        assert_eq!(pluralize(""), "");
    }
}
