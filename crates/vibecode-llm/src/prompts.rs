//! Fixed prompt text and sampling settings sent to the provider.

use vibecode_core::GenerationKind;

pub const GENERATE_MAX_TOKENS: u32 = 4000;
pub const GENERATE_TEMPERATURE: f32 = 0.7;

pub const SUGGEST_MAX_TOKENS: u32 = 1000;
pub const SUGGEST_TEMPERATURE: f32 = 0.5;

const HTML_SYSTEM_PROMPT: &str = "You are an expert HTML developer. Generate clean, semantic, modern HTML code based on the user's description. \
Include proper DOCTYPE, meta tags, and structure. Make it responsive and accessible. \
Only return the HTML code, no explanations.";

const CSS_SYSTEM_PROMPT: &str = "You are an expert CSS developer. Generate modern, responsive CSS code that matches the user's description. \
Use modern CSS features like flexbox, grid, animations, and CSS variables. \
Make it visually appealing and mobile-friendly. Only return the CSS code, no explanations.";

const JAVASCRIPT_SYSTEM_PROMPT: &str = "You are an expert JavaScript developer. Generate clean, modern JavaScript code that implements the functionality described by the user. \
Use ES6+ features, proper error handling, and good practices. \
Make it interactive and user-friendly. Only return the JavaScript code, no explanations.";

const FULL_APP_SYSTEM_PROMPT: &str = r#"You are an expert full-stack developer. Based on the user's description, generate a complete web application with HTML, CSS, and JavaScript.
Return a JSON object with three properties: "html", "css", and "javascript".
Make it modern, responsive, accessible, and fully functional.

The response format should be:
{
    "html": "<!DOCTYPE html>...",
    "css": "/* CSS styles */...",
    "javascript": "// JavaScript code..."
}"#;

const SUGGEST_SYSTEM_PROMPT: &str = "You are a code review expert. Analyze the provided code and suggest 3-5 specific improvements. \
Focus on best practices, performance, accessibility, and user experience. Return a JSON array of suggestion strings.";

pub fn system_prompt(kind: GenerationKind) -> &'static str {
    match kind {
        GenerationKind::Html => HTML_SYSTEM_PROMPT,
        GenerationKind::Css => CSS_SYSTEM_PROMPT,
        GenerationKind::Javascript => JAVASCRIPT_SYSTEM_PROMPT,
        GenerationKind::FullApp => FULL_APP_SYSTEM_PROMPT,
    }
}

pub fn user_prompt(kind: GenerationKind, description: &str) -> String {
    let target = match kind {
        GenerationKind::FullApp => "complete web application",
        other => other.as_str(),
    };
    format!("Create a {target} based on this description: {description}")
}

pub fn suggest_system_prompt() -> &'static str {
    SUGGEST_SYSTEM_PROMPT
}

pub fn suggest_user_prompt(code_type: &str, code: &str) -> String {
    format!("Analyze this {code_type} code and suggest improvements:\n\n{code}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_app_prompt_asks_for_json_bundle() {
        let prompt = system_prompt(GenerationKind::FullApp);
        assert!(prompt.contains(r#""html", "css", and "javascript""#));
    }

    #[test]
    fn user_prompt_names_the_target() {
        assert_eq!(
            user_prompt(GenerationKind::FullApp, "a clock"),
            "Create a complete web application based on this description: a clock"
        );
        assert_eq!(
            user_prompt(GenerationKind::Css, "a clock"),
            "Create a css based on this description: a clock"
        );
    }

    #[test]
    fn suggest_prompt_embeds_code() {
        let prompt = suggest_user_prompt("html", "<p>x</p>");
        assert_eq!(prompt, "Analyze this html code and suggest improvements:\n\n<p>x</p>");
    }
}
