//! Ingredient text handling.
//!
//! User input and a recipe's stored ingredient string are both
//! comma-separated lists. Comparison always goes through [`normalize_token`],
//! so "  Ghee" typed by the user and "ghee" flagged by the backend are the
//! same ingredient.

/// Trim and lower-case a single ingredient name
pub fn normalize_token(token: &str) -> String {
    token.trim().to_lowercase()
}

/// Split comma-separated ingredient text into trimmed, non-empty names,
/// keeping the original casing for display.
pub fn split_ingredients(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Parse user input into the normalized ingredient list sent to the backend.
///
/// # Example
/// ```
/// use thenu_cookbook::ingredients::parse_ingredients;
///
/// assert_eq!(parse_ingredients(" Milk, ,sugar "), vec!["milk", "sugar"]);
/// ```
pub fn parse_ingredients(raw: &str) -> Vec<String> {
    split_ingredients(raw)
        .into_iter()
        .map(normalize_token)
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_list() {
        assert_eq!(
            parse_ingredients("milk, sugar, ghee"),
            vec!["milk", "sugar", "ghee"]
        );
    }

    #[test]
    fn test_parse_empty_and_blank_input() {
        assert!(parse_ingredients("").is_empty());
        assert!(parse_ingredients("   ").is_empty());
        assert!(parse_ingredients(" , ,, ").is_empty());
    }

    #[test]
    fn test_parse_never_yields_padded_or_empty_tokens() {
        let inputs = [
            "  Milk ,Sugar,,  GHEE  ",
            "\tcurd,\nrice ",
            ",leading, trailing,",
            "single",
        ];

        for input in inputs {
            for token in parse_ingredients(input) {
                assert!(!token.is_empty(), "empty token from {input:?}");
                assert_eq!(token, token.trim(), "padded token from {input:?}");
                assert_eq!(token, token.to_lowercase());
            }
        }
    }

    #[test]
    fn test_split_keeps_casing() {
        assert_eq!(
            split_ingredients(" Milk, Sugar ,, Ghee"),
            vec!["Milk", "Sugar", "Ghee"]
        );
    }

    #[test]
    fn test_user_input_and_recipe_text_normalize_alike() {
        // The same ingredient written differently on each side must compare equal
        let typed = parse_ingredients("  Green Chilli ");
        let stored: Vec<String> = split_ingredients("Onion, GREEN CHILLI")
            .into_iter()
            .map(normalize_token)
            .collect();

        assert!(stored.contains(&typed[0]));
    }
}
