use panel_core::html::escape_html;
use panel_core::WHOLE_COUNTRY_SENTINEL;

use super::constants::*;
use super::document::PanelDocument;

/// Seconds between automatic reloads of the written page.
const REFRESH_SECS: u32 = 1;

pub fn page(doc: &PanelDocument, updated: &str) -> String {
    let submit = doc.submit();
    let submit_label = if submit.loading {
        format!("<span class=\"loading\"></span>{}", escape_html(&submit.label))
    } else {
        escape_html(&submit.label)
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="ru">
<head>
<meta charset="utf-8">
<meta http-equiv="refresh" content="{refresh}">
<title>2GIS Lead Search</title>
</head>
<body>
<form id="searchForm">
{country}
{city}
{category}
{max_results}
<button id="{search_id}" type="submit"{disabled}>{submit_label}</button>
<button id="{reset_id}" type="button"{reset_hidden}>Reset</button>
</form>
<section id="{status_id}"{status_hidden}>
<p id="{status_msg_id}">{status_msg}</p>
<div class="progress"><div id="{fill_id}" style="width: {fill:.1}%"></div></div>
<p id="{progress_id}">{progress}</p>
<p id="{download_id}">{download}</p>
</section>
<section id="{error_id}"{error_hidden}>
<p id="{error_msg_id}">{error_msg}</p>
</section>
<section id="{results_id}"{results_hidden}>
<h2 id="{count_id}">{count}</h2>
<button id="{download_btn_id}" type="button">Download Excel</button>
<table>
<thead><tr><th>Company</th><th>City</th><th>Phone</th><th>Address</th><th>Rating</th><th>Votes</th></tr></thead>
<tbody id="resultsBody">
{body}</tbody>
</table>
</section>
<footer>Updated {updated}</footer>
</body>
</html>
"#,
        refresh = REFRESH_SECS,
        country = input(doc, INPUT_COUNTRY, "Country"),
        city = city_input(doc),
        category = input(doc, INPUT_CATEGORY, "Category"),
        max_results = input(doc, INPUT_MAX_RESULTS, "Max results"),
        search_id = BUTTON_SEARCH.as_str(),
        disabled = if submit.enabled { "" } else { " disabled" },
        submit_label = submit_label,
        reset_id = BUTTON_RESET.as_str(),
        reset_hidden = hidden_attr(doc, BUTTON_RESET),
        status_id = PANEL_STATUS.as_str(),
        status_hidden = hidden_attr(doc, PANEL_STATUS),
        status_msg_id = LABEL_STATUS.as_str(),
        status_msg = escape_html(doc.text(LABEL_STATUS)),
        fill_id = PROGRESS_FILL.as_str(),
        fill = doc.progress_fill(),
        progress_id = LABEL_PROGRESS.as_str(),
        progress = escape_html(doc.text(LABEL_PROGRESS)),
        download_id = LABEL_DOWNLOAD.as_str(),
        download = escape_html(doc.text(LABEL_DOWNLOAD)),
        error_id = PANEL_ERROR.as_str(),
        error_hidden = hidden_attr(doc, PANEL_ERROR),
        error_msg_id = LABEL_ERROR.as_str(),
        error_msg = escape_html(doc.text(LABEL_ERROR)),
        results_id = PANEL_RESULTS.as_str(),
        results_hidden = hidden_attr(doc, PANEL_RESULTS),
        count_id = LABEL_RESULTS_COUNT.as_str(),
        count = escape_html(doc.text(LABEL_RESULTS_COUNT)),
        download_btn_id = BUTTON_DOWNLOAD.as_str(),
        body = doc.table_body(),
        updated = escape_html(updated),
    )
}

fn hidden_attr(doc: &PanelDocument, element: ElementId) -> &'static str {
    if doc.is_hidden(element) {
        " hidden"
    } else {
        ""
    }
}

fn input(doc: &PanelDocument, element: ElementId, label: &str) -> String {
    format!(
        "<label>{label} <input id=\"{id}\" value=\"{value}\"></label>",
        id = element.as_str(),
        value = escape_html(doc.value(element)),
    )
}

fn city_input(doc: &PanelDocument) -> String {
    let value = doc.value(INPUT_CITY);
    let shown = if value == WHOLE_COUNTRY_SENTINEL {
        "Whole country"
    } else {
        value
    };
    format!(
        "<label>City <input id=\"{id}\" value=\"{value}\"></label>",
        id = INPUT_CITY.as_str(),
        value = escape_html(shown),
    )
}
