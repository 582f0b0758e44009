//! Keyword classifier that picks a fallback template for a description.

use serde::Serialize;

/// Archetypes the template library knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TemplateName {
    TodoApp,
    Calculator,
    WeatherApp,
    LandingPage,
    ChatApp,
    Generic,
}

impl TemplateName {
    pub const ALL: [TemplateName; 6] = [
        TemplateName::TodoApp,
        TemplateName::Calculator,
        TemplateName::WeatherApp,
        TemplateName::LandingPage,
        TemplateName::ChatApp,
        TemplateName::Generic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TodoApp => "todoApp",
            Self::Calculator => "calculator",
            Self::WeatherApp => "weatherApp",
            Self::LandingPage => "landingPage",
            Self::ChatApp => "chatApp",
            Self::Generic => "generic",
        }
    }
}

impl std::fmt::Display for TemplateName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword groups in priority order. The first group with any keyword
/// contained in the lower-cased description wins.
const KEYWORD_GROUPS: &[(&[&str], TemplateName)] = &[
    (&["todo", "task"], TemplateName::TodoApp),
    (&["calculator"], TemplateName::Calculator),
    (&["weather"], TemplateName::WeatherApp),
    (&["landing", "homepage"], TemplateName::LandingPage),
    (&["chat", "message"], TemplateName::ChatApp),
];

pub fn classify(description: &str) -> TemplateName {
    let lowered = description.to_lowercase();

    KEYWORD_GROUPS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, name)| *name)
        .unwrap_or(TemplateName::Generic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_each_group() {
        assert_eq!(classify("a todo list"), TemplateName::TodoApp);
        assert_eq!(classify("track my tasks"), TemplateName::TodoApp);
        assert_eq!(classify("scientific calculator"), TemplateName::Calculator);
        assert_eq!(classify("weather dashboard"), TemplateName::WeatherApp);
        assert_eq!(classify("a landing page for my startup"), TemplateName::LandingPage);
        assert_eq!(classify("personal homepage"), TemplateName::LandingPage);
        assert_eq!(classify("group chat"), TemplateName::ChatApp);
        assert_eq!(classify("message board"), TemplateName::ChatApp);
    }

    #[test]
    fn is_case_insensitive() {
        assert_eq!(classify("TODO"), TemplateName::TodoApp);
        assert_eq!(classify("My Weather App"), TemplateName::WeatherApp);
    }

    #[test]
    fn first_group_wins() {
        assert_eq!(classify("todo calculator"), TemplateName::TodoApp);
        assert_eq!(classify("calculator todo"), TemplateName::TodoApp);
        assert_eq!(classify("chat about the weather"), TemplateName::WeatherApp);
        assert_eq!(classify("landing page with a calculator"), TemplateName::Calculator);
    }

    #[test]
    fn substring_containment_only() {
        // "multitasking" contains "task".
        assert_eq!(classify("multitasking helper"), TemplateName::TodoApp);
        // no fuzzy matching
        assert_eq!(classify("calculater"), TemplateName::Generic);
    }

    #[test]
    fn unmatched_falls_to_generic() {
        assert_eq!(classify(""), TemplateName::Generic);
        assert_eq!(classify("xyzzy"), TemplateName::Generic);
        assert_eq!(classify("I want a pink banana"), TemplateName::Generic);
    }

    #[test]
    fn display_uses_wire_names() {
        assert_eq!(TemplateName::TodoApp.to_string(), "todoApp");
        assert_eq!(format!("{} template", TemplateName::Generic), "generic template");
        for name in TemplateName::ALL {
            assert_eq!(
                serde_json::to_value(name).unwrap(),
                serde_json::Value::String(name.to_string())
            );
        }
    }
}
