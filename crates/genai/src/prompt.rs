//! Prompt template rendering.

use playforge_core::ContentType;

/// Built-in template used whenever the configured prompt is absent or empty.
///
/// The template must keep the model on a strict JSON-only contract: the
/// generator parses the raw completion text as JSON and rejects anything
/// else.
pub const DEFAULT_PROMPT_TEMPLATE: &str = "\
You are a game content designer. Create one {{type}} game in language {{lang}}.

Respond with exactly one JSON object and nothing else (no prose, no code
fences). The object must have these top-level keys:
  \"type\": \"{{type}}\"
  \"lang\": \"{{lang}}\"
  \"spec\": an object describing the playable content.

Spec guidance per type:
- word_search: \"grid\" (array of equal-length uppercase letter rows) and
  \"words\" (the hidden words, each actually placed in the grid).
- quiz_mcq: \"questions\", an array of at least 5 entries, each with
  \"question\", \"options\" (4 strings) and \"answerIndex\".
- memory_match: \"pairs\", an array of at least 6 matching pairs.
- space_shooter: \"waves\" describing enemy waves and \"playerLives\".
- jigsaw: \"imageUrl\" (placeholder string, it will be replaced), \"rows\"
  and \"cols\" between 3 and 6.
- true_false: \"statements\", at least 8 entries with \"text\" and \"answer\".
- odd_one_out: \"rounds\", at least 5 entries, each with \"options\" (4
  strings) and \"oddIndex\".

Keep all human-readable text in {{lang}}. Keep the content family-friendly.
";

/// A generation prompt with `{{type}}` / `{{lang}}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Use `configured` if non-empty, otherwise the built-in default.
    pub fn or_default(configured: &str) -> Self {
        if configured.trim().is_empty() {
            Self::new(DEFAULT_PROMPT_TEMPLATE)
        } else {
            Self::new(configured)
        }
    }

    /// Substitute every `{{type}}` / `{{lang}}` occurrence.
    pub fn render(&self, content_type: ContentType, lang: &str) -> String {
        self.template
            .replace("{{type}}", content_type.as_str())
            .replace("{{lang}}", lang)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT_TEMPLATE)
    }
}
