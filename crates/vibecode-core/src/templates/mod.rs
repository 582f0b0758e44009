//! Canned application templates used when the upstream provider is not
//! available.
//!
//! Every template is embedded at compile time. Rendering is a pure function
//! of `(name, description)`: no clock reads, no randomness. The Todo script
//! does generate `Date.now()` item ids, but only when it runs in the browser.

use crate::bundle::CodeBundle;
use crate::classifier::TemplateName;

const TODO_HTML: &str = include_str!("assets/todo.html");
const TODO_CSS: &str = include_str!("assets/todo.css");
const TODO_JS: &str = include_str!("assets/todo.js");

const CALCULATOR_HTML: &str = include_str!("assets/calculator.html");
const CALCULATOR_CSS: &str = include_str!("assets/calculator.css");
const CALCULATOR_JS: &str = include_str!("assets/calculator.js");

const WEATHER_HTML: &str = include_str!("assets/weather.html");
const WEATHER_CSS: &str = include_str!("assets/weather.css");
const WEATHER_JS: &str = include_str!("assets/weather.js");

const LANDING_HTML: &str = include_str!("assets/landing.html");
const LANDING_CSS: &str = include_str!("assets/landing.css");
const LANDING_JS: &str = include_str!("assets/landing.js");

const CHAT_HTML: &str = include_str!("assets/chat.html");
const CHAT_CSS: &str = include_str!("assets/chat.css");
const CHAT_JS: &str = include_str!("assets/chat.js");

const GENERIC_HTML: &str = include_str!("assets/generic.html");
const GENERIC_CSS: &str = include_str!("assets/generic.css");
const GENERIC_JS: &str = include_str!("assets/generic.js");

const THEME_SLOT: &str = "{{theme}}";
const DESCRIPTION_SLOT: &str = "{{description}}";

/// Body class marker the Todo template uses for its dark palette.
pub const DARK_THEME_CLASS: &str = "dark-theme";

pub fn render(name: TemplateName, description: &str) -> CodeBundle {
    match name {
        TemplateName::TodoApp => render_todo(description),
        TemplateName::Calculator => CodeBundle::new(CALCULATOR_HTML, CALCULATOR_CSS, CALCULATOR_JS),
        TemplateName::WeatherApp => CodeBundle::new(WEATHER_HTML, WEATHER_CSS, WEATHER_JS),
        TemplateName::LandingPage => CodeBundle::new(LANDING_HTML, LANDING_CSS, LANDING_JS),
        TemplateName::ChatApp => CodeBundle::new(CHAT_HTML, CHAT_CSS, CHAT_JS),
        TemplateName::Generic => render_generic(description),
    }
}

fn render_todo(description: &str) -> CodeBundle {
    let theme = if description.to_lowercase().contains("dark") {
        "dark"
    } else {
        "light"
    };

    CodeBundle::new(TODO_HTML.replace(THEME_SLOT, theme), TODO_CSS, TODO_JS)
}

fn render_generic(description: &str) -> CodeBundle {
    // Descriptions come from untrusted callers and end up inside a live preview.
    let markup = GENERIC_HTML.replace(DESCRIPTION_SLOT, &escape_html(description));
    CodeBundle::new(markup, GENERIC_CSS, GENERIC_JS)
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_renders_all_fields() {
        for name in TemplateName::ALL {
            let bundle = render(name, "anything");
            assert!(bundle.markup.starts_with("<!DOCTYPE html>"), "{name} markup");
            assert!(!bundle.styles.is_empty(), "{name} styles");
            assert!(!bundle.script.is_empty(), "{name} script");
            assert!(!bundle.markup.contains("{{"), "{name} left a slot unfilled");
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        for name in TemplateName::ALL {
            assert_eq!(render(name, "Dark todo <b>"), render(name, "Dark todo <b>"));
        }
    }

    #[test]
    fn todo_theme_follows_dark_keyword() {
        let dark = render(TemplateName::TodoApp, "a DARK themed todo list");
        assert!(dark.markup.contains(r#"<body class="dark-theme">"#));

        let light = render(TemplateName::TodoApp, "a todo list");
        assert!(light.markup.contains(r#"<body class="light-theme">"#));
        assert_eq!(dark.styles, light.styles);
        assert_eq!(dark.script, light.script);
    }

    #[test]
    fn todo_script_persists_under_fixed_key() {
        let bundle = render(TemplateName::TodoApp, "todo");
        assert!(bundle.script.contains("localStorage.setItem('todos'"));
        assert!(bundle.script.contains("localStorage.getItem('todos')"));
    }

    #[test]
    fn constant_templates_ignore_description() {
        for name in [
            TemplateName::Calculator,
            TemplateName::WeatherApp,
            TemplateName::LandingPage,
            TemplateName::ChatApp,
        ] {
            assert_eq!(render(name, "one"), render(name, "two dark"));
        }
    }

    #[test]
    fn generic_embeds_plain_description_verbatim() {
        let bundle = render(TemplateName::Generic, "I want a pink banana");
        assert!(bundle.markup.contains(r#"Based on: "I want a pink banana""#));
    }

    #[test]
    fn generic_escapes_markup_in_description() {
        let bundle = render(TemplateName::Generic, r#"<script>alert("x")</script> & 'co'"#);

        assert!(!bundle.markup.contains("<script>alert"));
        assert!(bundle
            .markup
            .contains("&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#x27;co&#x27;"));
    }
}
