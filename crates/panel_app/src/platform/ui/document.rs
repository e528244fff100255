use std::collections::BTreeMap;

use chrono::Utc;
use panel_engine::ArtifactWriter;
use panel_logging::{panel_error, panel_info};

use super::constants::*;
use super::layout;
use super::view::{PanelView, ViewCommand};

pub const DOCUMENT_FILENAME: &str = "panel.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub loading: bool,
    pub label: String,
}

/// In-memory model of the panel page, written to `panel.html` on every flush.
pub struct PanelDocument {
    writer: ArtifactWriter,
    hidden: BTreeMap<ElementId, bool>,
    text: BTreeMap<ElementId, String>,
    values: BTreeMap<ElementId, String>,
    progress_fill: f64,
    submit: SubmitControl,
    table_body: String,
    last_summary: String,
}

impl PanelDocument {
    pub fn new(writer: ArtifactWriter) -> Self {
        let hidden = [PANEL_STATUS, PANEL_RESULTS, PANEL_ERROR, BUTTON_RESET]
            .into_iter()
            .map(|element| (element, true))
            .collect();
        Self {
            writer,
            hidden,
            text: BTreeMap::new(),
            values: BTreeMap::new(),
            progress_fill: 0.0,
            submit: SubmitControl {
                enabled: true,
                loading: false,
                label: String::new(),
            },
            table_body: String::new(),
            last_summary: String::new(),
        }
    }

    pub fn is_hidden(&self, element: ElementId) -> bool {
        self.hidden.get(&element).copied().unwrap_or(false)
    }

    pub fn text(&self, element: ElementId) -> &str {
        self.text.get(&element).map(String::as_str).unwrap_or("")
    }

    pub fn value(&self, element: ElementId) -> &str {
        self.values.get(&element).map(String::as_str).unwrap_or("")
    }

    pub fn progress_fill(&self) -> f64 {
        self.progress_fill
    }

    pub fn submit(&self) -> &SubmitControl {
        &self.submit
    }

    pub fn table_body(&self) -> &str {
        &self.table_body
    }

    pub fn to_html(&self) -> String {
        layout::page(self, &Utc::now().to_rfc3339())
    }

    // One line for the terminal; only logged when it changes.
    fn summary(&self) -> String {
        if !self.is_hidden(PANEL_ERROR) {
            return format!("Error: {}", self.text(LABEL_ERROR));
        }
        let mut parts = Vec::new();
        if !self.is_hidden(PANEL_STATUS) {
            parts.push(format!(
                "{} [{}]",
                self.text(LABEL_STATUS),
                self.text(LABEL_PROGRESS)
            ));
        }
        if !self.is_hidden(PANEL_RESULTS) {
            parts.push(self.text(LABEL_RESULTS_COUNT).to_string());
        }
        if !self.text(LABEL_DOWNLOAD).is_empty() {
            parts.push(self.text(LABEL_DOWNLOAD).to_string());
        }
        parts.join(" | ")
    }
}

impl PanelView for PanelDocument {
    fn apply(&mut self, command: ViewCommand) {
        match command {
            ViewCommand::SetHidden { element, hidden } => {
                self.hidden.insert(element, hidden);
            }
            ViewCommand::SetText { element, text } => {
                self.text.insert(element, text);
            }
            ViewCommand::SetInputValue { element, value } => {
                self.values.insert(element, value);
            }
            ViewCommand::SetProgressFill { percent } => {
                self.progress_fill = percent.clamp(0.0, 100.0);
            }
            ViewCommand::SetSubmit {
                enabled,
                loading,
                label,
            } => {
                self.submit = SubmitControl {
                    enabled,
                    loading,
                    label,
                };
            }
            ViewCommand::ReplaceTableBody { html } => {
                self.table_body = html;
            }
        }
    }

    fn flush(&mut self) {
        let summary = self.summary();
        if summary != self.last_summary {
            if !summary.is_empty() {
                panel_info!("{}", summary);
            }
            self.last_summary = summary;
        }

        if let Err(err) = self.writer.save(DOCUMENT_FILENAME, self.to_html().as_bytes()) {
            panel_error!(
                "Failed to write {} to {:?}: {}",
                DOCUMENT_FILENAME,
                self.writer.dir(),
                err
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn commands_update_elements() {
        let temp = TempDir::new().unwrap();
        let mut doc = PanelDocument::new(ArtifactWriter::new(temp.path().to_path_buf()));
        assert!(doc.is_hidden(PANEL_STATUS));

        doc.apply(ViewCommand::SetHidden {
            element: PANEL_STATUS,
            hidden: false,
        });
        doc.apply(ViewCommand::SetText {
            element: LABEL_STATUS,
            text: "Город 1/3: Москва".to_string(),
        });
        doc.apply(ViewCommand::SetProgressFill { percent: 140.0 });

        assert!(!doc.is_hidden(PANEL_STATUS));
        assert_eq!(doc.text(LABEL_STATUS), "Город 1/3: Москва");
        assert_eq!(doc.progress_fill(), 100.0);
    }

    #[test]
    fn flush_writes_escaped_page() {
        let temp = TempDir::new().unwrap();
        let mut doc = PanelDocument::new(ArtifactWriter::new(temp.path().to_path_buf()));
        doc.apply(ViewCommand::SetHidden {
            element: PANEL_ERROR,
            hidden: false,
        });
        doc.apply(ViewCommand::SetText {
            element: LABEL_ERROR,
            text: "<img src=x onerror=alert(1)>".to_string(),
        });
        doc.flush();

        let page = fs::read_to_string(temp.path().join(DOCUMENT_FILENAME)).unwrap();
        assert!(page.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(!page.contains("<img"));
    }
}
