use anyhow::Context;
use tracing::{info, warn};

use super::client::ImageAnalyzer;
use super::dto::{ModelReply, PARSE_FAILURE_MESSAGE};

/// Removes an enclosing Markdown code fence (with or without a language tag).
pub fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);

    let body = match rest.find('\n') {
        Some(i) if rest[..i].trim().chars().all(|c| c.is_ascii_alphanumeric()) => &rest[i + 1..],
        Some(_) => rest,
        None => rest.strip_prefix("json").unwrap_or(rest),
    };
    body.trim()
}

/// Never fails: text that is not JSON comes back as `ModelReply::Unparsed`.
pub fn parse_model_reply(content: &str) -> ModelReply {
    match serde_json::from_str(strip_code_fences(content)) {
        Ok(value) => ModelReply::Parsed(value),
        Err(e) => {
            warn!(error = %e, raw = %content, "model reply is not valid json");
            ModelReply::Unparsed {
                error: PARSE_FAILURE_MESSAGE,
                raw_content: content.to_string(),
            }
        }
    }
}

pub async fn analyze_plate(
    analyzer: &dyn ImageAnalyzer,
    image: &[u8],
) -> anyhow::Result<ModelReply> {
    let content = analyzer
        .analyze_image(image)
        .await
        .context("image analysis failed")?;
    info!(reply_chars = content.len(), "model replied");
    Ok(parse_model_reply(&content))
}
