use serde::Serialize;

pub(crate) fn json_error(message: &str) -> String {
    #[derive(Serialize)]
    struct CliError<'a> {
        success: bool,
        error: &'a str,
    }
    serde_json::to_string(&CliError {
        success: false,
        error: message,
    })
    .unwrap_or_else(|_| format!("{{\"success\":false,\"error\":\"{message}\"}}"))
}

/// Join an ingredient list into one display cell, shortened for the table.
pub(crate) fn format_ingredients(ingredients: &[String]) -> String {
    truncate(&ingredients.join(", "), 60)
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate("bloem", 10), "bloem");
    }

    #[test]
    fn test_truncate_long_string() {
        let out = truncate("aardappelen met boerenkool", 10);
        assert_eq!(out.chars().count(), 10);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_format_ingredients_joins_with_comma() {
        let ingredients = vec!["bloem".to_string(), "melk".to_string()];
        assert_eq!(format_ingredients(&ingredients), "bloem, melk");
    }

    #[test]
    fn test_json_error_shape() {
        let raw = json_error("Recipe not found");
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Recipe not found");
    }
}
