use panel_core::{html, text, PanelViewModel};

use super::constants::*;
use super::view::ViewCommand;

pub fn render(view: &PanelViewModel) -> Vec<ViewCommand> {
    let mut cmds = Vec::new();

    for (element, visible) in [
        (PANEL_STATUS, view.panels.status),
        (PANEL_RESULTS, view.panels.results),
        (PANEL_ERROR, view.panels.error),
        (BUTTON_RESET, view.panels.reset_control),
    ] {
        cmds.push(ViewCommand::SetHidden {
            element,
            hidden: !visible,
        });
    }

    for (element, value) in [
        (INPUT_COUNTRY, &view.form.country),
        (INPUT_CITY, &view.form.city),
        (INPUT_CATEGORY, &view.form.category),
        (INPUT_MAX_RESULTS, &view.form.max_results),
    ] {
        cmds.push(ViewCommand::SetInputValue {
            element,
            value: value.clone(),
        });
    }

    cmds.push(ViewCommand::SetSubmit {
        enabled: view.submit.enabled,
        loading: view.submit.loading,
        label: view.submit.label.to_string(),
    });

    cmds.push(ViewCommand::SetText {
        element: LABEL_STATUS,
        text: view.status_message.clone(),
    });
    cmds.push(ViewCommand::SetProgressFill {
        percent: view.progress.fill_percent,
    });
    cmds.push(ViewCommand::SetText {
        element: LABEL_PROGRESS,
        text: view.progress.label.clone(),
    });

    cmds.push(ViewCommand::SetText {
        element: LABEL_ERROR,
        text: view.error_message.clone().unwrap_or_default(),
    });

    cmds.push(ViewCommand::SetText {
        element: LABEL_RESULTS_COUNT,
        text: view.results_count.clone(),
    });
    cmds.push(ViewCommand::ReplaceTableBody {
        html: html::results_table_body(&view.results),
    });

    cmds.push(ViewCommand::SetText {
        element: LABEL_DOWNLOAD,
        text: view
            .last_download
            .as_deref()
            .map(text::download_saved)
            .unwrap_or_default(),
    });

    cmds
}
