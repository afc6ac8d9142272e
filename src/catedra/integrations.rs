//! Offline stand-ins for the site's external services.
//!
//! LLM, email, upload and image generation all answer locally with
//! placeholder results derived from their input. Nothing here touches the
//! network, and the same input always produces the same output.
//!
//! These are library API for embedding applications; the CLI does not call
//! them.

use serde::Serialize;
use tracing::debug;

const PREVIEW_CHARS: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailReceipt {
    pub accepted: bool,
    pub to: String,
    pub subject: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedFile {
    pub file_url: String,
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedImage {
    pub url: String,
}

pub fn invoke_llm(prompt: &str) -> String {
    debug!(chars = prompt.chars().count(), "llm stub invoked");
    format!("[respuesta simulada] {}", preview(prompt))
}

pub fn send_email(to: &str, subject: &str, body: &str) -> EmailReceipt {
    debug!(to, subject, body_chars = body.chars().count(), "email stub invoked");
    EmailReceipt {
        accepted: true,
        to: to.to_string(),
        subject: subject.to_string(),
    }
}

pub fn upload_file(name: &str, bytes: &[u8]) -> UploadedFile {
    debug!(name, size = bytes.len(), "upload stub invoked");
    UploadedFile {
        file_url: format!("memory://uploads/{}", slugify(name)),
        size: bytes.len(),
    }
}

pub fn generate_image(prompt: &str) -> GeneratedImage {
    debug!(chars = prompt.chars().count(), "image stub invoked");
    GeneratedImage {
        url: format!("memory://generated/{}.png", slugify(prompt)),
    }
}

fn preview(text: &str) -> String {
    let mut preview: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().count() > PREVIEW_CHARS {
        preview.push('…');
    }
    preview
}

fn slugify(text: &str) -> String {
    let slug: String = text
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '.' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "file".to_string()
    } else {
        slug.to_string()
    }
}
