//! Widget resources: descriptors, metadata and HTML loading.
//!
//! Each widget is a prebuilt HTML bundle served as an MCP resource under
//! `ui://widget/<id>.html`. Tools that render into a widget carry its
//! metadata on their catalog entry and on every result.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tracing::warn;

/// MIME type of widget resources.
pub const WIDGET_MIME_TYPE: &str = "text/html+skybridge";

/// A browser-rendered widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Widget {
    pub id: &'static str,
    pub title: &'static str,
    pub template_uri: &'static str,
    pub invoking: &'static str,
    pub invoked: &'static str,
}

pub const CLAIMS_DASHBOARD: Widget = Widget {
    id: "claims-dashboard",
    title: "Claims Dashboard",
    template_uri: "ui://widget/claims-dashboard.html",
    invoking: "Loading claims dashboard…",
    invoked: "Claims dashboard ready",
};

pub const CLAIM_DETAIL: Widget = Widget {
    id: "claim-detail",
    title: "Claim Detail",
    template_uri: "ui://widget/claim-detail.html",
    invoking: "Loading claim details…",
    invoked: "Claim details ready",
};

pub const CONTRACTORS_LIST: Widget = Widget {
    id: "contractors-list",
    title: "Contractors List",
    template_uri: "ui://widget/contractors-list.html",
    invoking: "Loading contractors…",
    invoked: "Contractors ready",
};

pub const ALL_WIDGETS: [Widget; 3] = [CLAIMS_DASHBOARD, CLAIM_DETAIL, CONTRACTORS_LIST];

impl Widget {
    /// The `_meta` object attached to descriptors and tool results.
    pub fn meta(&self) -> Value {
        json!({
            "openai/outputTemplate": self.template_uri,
            "openai/toolInvocation/invoking": self.invoking,
            "openai/toolInvocation/invoked": self.invoked,
            "openai/widgetAccessible": true,
        })
    }

    /// Look a widget up by its template URI.
    pub fn by_uri(uri: &str) -> Option<&'static Widget> {
        ALL_WIDGETS.iter().find(|w| w.template_uri == uri)
    }

    fn description(&self) -> String {
        format!("{} widget markup", self.title)
    }
}

/// Serves widget HTML from an assets directory.
#[derive(Debug, Clone)]
pub struct WidgetCatalog {
    assets_dir: PathBuf,
}

impl WidgetCatalog {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
        }
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    /// Entries for `resources/list`.
    pub fn resources(&self) -> Vec<Value> {
        ALL_WIDGETS
            .iter()
            .map(|w| {
                json!({
                    "uri": w.template_uri,
                    "name": w.title,
                    "description": w.description(),
                    "mimeType": WIDGET_MIME_TYPE,
                    "_meta": w.meta(),
                })
            })
            .collect()
    }

    /// Entries for `resources/templates/list`.
    pub fn templates(&self) -> Vec<Value> {
        ALL_WIDGETS
            .iter()
            .map(|w| {
                json!({
                    "uriTemplate": w.template_uri,
                    "name": w.title,
                    "description": w.description(),
                    "mimeType": WIDGET_MIME_TYPE,
                    "_meta": w.meta(),
                })
            })
            .collect()
    }

    /// The `resources/read` result for a widget URI, or `None` when no
    /// widget has that URI.
    pub async fn read(&self, uri: &str) -> Option<Value> {
        let widget = Widget::by_uri(uri)?;
        let html = self.html(widget).await;
        Some(json!({
            "contents": [{
                "uri": widget.template_uri,
                "text": html,
                "mimeType": WIDGET_MIME_TYPE,
                "_meta": widget.meta(),
            }]
        }))
    }

    /// The widget's HTML, read fresh from disk.
    ///
    /// A missing or unreadable bundle yields a placeholder page.
    pub async fn html(&self, widget: &Widget) -> String {
        let path = self.assets_dir.join(format!("{}.html", widget.id));
        match tokio::fs::read_to_string(&path).await {
            Ok(html) => html,
            Err(e) => {
                warn!(widget = widget.id, path = %path.display(), error = %e, "widget bundle unavailable");
                placeholder(widget.id)
            }
        }
    }
}

fn placeholder(id: &str) -> String {
    format!(
        "<html><body><p>Widget \"{id}\" not built yet. Build the widget bundles into the assets directory.</p></body></html>"
    )
}
