// src/utils/text.rs

use std::sync::LazyLock;

use regex::Regex;

static UNDERSCORES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());
static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());
static UNSAFE_FILE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\\/:*?"<>|\x00-\x1f]"#).unwrap());

/// Category keys use underscores for spaces (`Famous_People` -> `Famous People`).
pub fn display_name(category: &str) -> String {
    let s = UNDERSCORES.replace_all(category, " ");
    SPACES.replace_all(s.trim(), " ").into_owned()
}

/// Strips characters that are not allowed in file names on common filesystems.
pub fn sanitize_file_component(input: &str) -> String {
    let s = UNSAFE_FILE_CHARS.replace_all(input, "");
    SPACES.replace_all(s.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn underscores_become_spaces() {
        assert_eq!(display_name("Famous_People"), "Famous People");
        assert_eq!(display_name("_Odd__Name_"), "Odd Name");
        assert_eq!(display_name("Plain"), "Plain");
    }

    #[test]
    fn file_components_lose_path_separators() {
        assert_eq!(sanitize_file_component("Trivia/Night: 2"), "TriviaNight 2");
        assert_eq!(sanitize_file_component("  Quiz  Night  "), "Quiz Night");
    }
}
