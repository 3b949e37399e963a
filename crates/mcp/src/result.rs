use kanban_core::error::CoreError;
use kanban_service::{ServiceError, ServiceResult};
use serde::Serialize;

/// One block of tool output. Only text is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

/// The `tools/call` result envelope: `{ content: [...], isError }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl ToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: true,
        }
    }

    /// Pretty-printed JSON of `value` as a text block.
    pub fn json<T: Serialize>(value: &T) -> ServiceResult<Self> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| CoreError::Internal(format!("Failed to encode tool output: {e}")))?;
        Ok(Self::text(text))
    }

    /// Concatenated text of every content block.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .map(|ToolContent::Text { text }| text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Render a failed operation as a readable message.
///
/// Domain errors keep their message; storage and internal failures are
/// logged and replaced with a generic line.
pub(crate) fn format_service_error(tool: &str, err: &ServiceError) -> String {
    match err {
        ServiceError::Core(CoreError::NotFound { entity, id }) => {
            format!("{entity} with id {id} not found")
        }
        ServiceError::Core(CoreError::Validation(msg)) => msg.clone(),
        ServiceError::Core(CoreError::Internal(msg)) => {
            tracing::error!(tool, error = %msg, "Tool failed");
            "An internal error occurred".to_string()
        }
        ServiceError::Storage(e) => {
            tracing::error!(tool, error = %e, "Tool failed on storage");
            "An internal error occurred".to_string()
        }
    }
}
