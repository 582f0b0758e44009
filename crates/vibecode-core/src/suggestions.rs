/// Upper bound on suggestions returned for one request.
pub const MAX_SUGGESTIONS: usize = 5;

/// How many canned suggestions are served when the upstream is unavailable.
pub const MOCK_SUGGESTION_COUNT: usize = 3;

const MOCK_SUGGESTIONS: [&str; 5] = [
    "Add responsive design with media queries",
    "Improve accessibility with ARIA labels",
    "Add error handling for better user experience",
    "Optimize performance with lazy loading",
    "Add animations for better UX",
];

pub fn mock_suggestions() -> Vec<String> {
    MOCK_SUGGESTIONS
        .iter()
        .take(MOCK_SUGGESTION_COUNT)
        .map(|s| s.to_string())
        .collect()
}

/// Drop blank entries and cap the list at [`MAX_SUGGESTIONS`].
pub fn normalize_suggestions(suggestions: Vec<String>) -> Vec<String> {
    suggestions
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .take(MAX_SUGGESTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_list_is_first_three() {
        let suggestions = mock_suggestions();
        assert_eq!(suggestions.len(), MOCK_SUGGESTION_COUNT);
        assert_eq!(suggestions[0], "Add responsive design with media queries");
        assert_eq!(suggestions[2], "Add error handling for better user experience");
    }

    #[test]
    fn normalize_trims_filters_and_caps() {
        let raw = vec![
            " one ".to_string(),
            "".to_string(),
            "two".to_string(),
            "three".to_string(),
            "   ".to_string(),
            "four".to_string(),
            "five".to_string(),
            "six".to_string(),
        ];

        assert_eq!(
            normalize_suggestions(raw),
            vec!["one", "two", "three", "four", "five"]
        );
    }
}
