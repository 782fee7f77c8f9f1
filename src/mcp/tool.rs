//! Tool catalog entries and invocation results.

use serde::Serialize;
use serde_json::Value;

use super::error::ToolError;
use super::widget::Widget;

/// Behavior hints advertised with a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolAnnotations {
    pub read_only_hint: bool,
}

/// A tool as advertised by `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub title: String,
    pub description: String,
    /// JSON Schema of the arguments object.
    pub input_schema: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<ToolAnnotations>,
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            description: description.into(),
            input_schema,
            annotations: None,
            meta: None,
        }
    }

    /// Mark the tool as not mutating any state.
    pub fn read_only(mut self) -> Self {
        self.annotations = Some(ToolAnnotations {
            read_only_hint: true,
        });
        self
    }

    /// Attach the widget that renders this tool's output.
    pub fn with_widget(mut self, widget: &Widget) -> Self {
        self.meta = Some(widget.meta());
        self
    }
}

/// One content block of a tool result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    Text { text: String },
}

/// The result of a tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOutput {
    pub content: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl ToolOutput {
    /// A plain text result.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Content::Text { text: text.into() }],
            structured_content: None,
            meta: None,
        }
    }

    /// Attach a structured payload for the widget.
    pub fn with_structured<S: Serialize>(mut self, payload: &S) -> Result<Self, ToolError> {
        self.structured_content = Some(serde_json::to_value(payload)?);
        Ok(self)
    }

    /// Attach the rendering widget's metadata.
    pub fn with_widget(mut self, widget: &Widget) -> Self {
        self.meta = Some(widget.meta());
        self
    }

    /// All text content joined by newlines.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .map(|content| match content {
                Content::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
