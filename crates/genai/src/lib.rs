//! `playforge-genai`
//!
//! **Responsibility:** boundary to the external AI generation services.
//!
//! This crate is intentionally **not** part of the domain model:
//! - It must not depend on stores or orchestration.
//! - It must not persist anything.
//! - It turns prompts into validated **generated content**, nothing more.
//!
//! Callers (infra) own identity assignment, enrichment wiring, and
//! persistence.

pub mod content;
pub mod image;
pub mod prompt;
pub mod text;

pub use content::{parse_generated_content, GeneratedContent};
pub use image::{
    random_fallback_image_url, HttpImageGenerator, ImageGenConfig, ImageGenerator, ImageError,
    StaticImageGenerator, FALLBACK_IMAGE_URLS, JIGSAW_IMAGE_PROMPT,
};
pub use prompt::{PromptTemplate, DEFAULT_PROMPT_TEMPLATE};
pub use text::{
    GenerationError, HttpTextGenerator, StaticTextGenerator, TextGenConfig, TextGenerator,
};
