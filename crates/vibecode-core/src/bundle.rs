use serde::{Deserialize, Serialize};

/// The three-file web artifact produced for every generation request.
///
/// Fields are independent opaque strings. An empty field is still a valid
/// bundle; nothing here checks that the markup references the styles or
/// script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBundle {
    #[serde(rename = "html", default)]
    pub markup: String,
    #[serde(rename = "css", default)]
    pub styles: String,
    #[serde(rename = "javascript", alias = "js", default)]
    pub script: String,
}

impl CodeBundle {
    pub fn new(
        markup: impl Into<String>,
        styles: impl Into<String>,
        script: impl Into<String>,
    ) -> Self {
        Self {
            markup: markup.into(),
            styles: styles.into(),
            script: script.into(),
        }
    }

    /// A bundle carrying content for a single [`GenerationKind`].
    ///
    /// `FullApp` content has no single home, so it lands in `markup`.
    pub fn single(kind: GenerationKind, content: impl Into<String>) -> Self {
        let content = content.into();
        match kind {
            GenerationKind::Css => Self::new("", content, ""),
            GenerationKind::Javascript => Self::new("", "", content),
            GenerationKind::Html | GenerationKind::FullApp => Self::new(content, "", ""),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.markup.trim().is_empty() && self.styles.trim().is_empty() && self.script.trim().is_empty()
    }
}

/// What the caller asked the upstream provider to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GenerationKind {
    Html,
    Css,
    Javascript,
    #[default]
    FullApp,
}

impl GenerationKind {
    /// Lenient parse of the request `type` field. Unknown values select
    /// `FullApp`.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("html") => Self::Html,
            Some(v) if v.eq_ignore_ascii_case("css") => Self::Css,
            Some(v) if v.eq_ignore_ascii_case("javascript") || v.eq_ignore_ascii_case("js") => {
                Self::Javascript
            }
            _ => Self::FullApp,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Css => "css",
            Self::Javascript => "javascript",
            Self::FullApp => "fullApp",
        }
    }
}

impl std::fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
