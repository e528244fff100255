use super::constants::ElementId;

/// One mutation of the bound view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCommand {
    SetHidden { element: ElementId, hidden: bool },
    SetText { element: ElementId, text: String },
    SetInputValue { element: ElementId, value: String },
    SetProgressFill { percent: f64 },
    SetSubmit {
        enabled: bool,
        loading: bool,
        label: String,
    },
    /// Already-escaped `<tr>` markup.
    ReplaceTableBody { html: String },
}

/// The concrete surface the panel draws on.
pub trait PanelView {
    fn apply(&mut self, command: ViewCommand);

    /// Called once after each batch of commands.
    fn flush(&mut self) {}
}
