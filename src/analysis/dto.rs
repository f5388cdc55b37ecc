use serde::Serialize;
use serde_json::Value;

pub const PARSE_FAILURE_MESSAGE: &str = "Falha ao processar resposta da IA";

/// What `POST /analyze-image` answers with on a 200.
#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModelReply {
    /// The model's JSON, passed through as-is.
    Parsed(Value),
    Unparsed {
        error: &'static str,
        raw_content: String,
    },
}

