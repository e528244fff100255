//! HTML fragments for the results table.
use crate::view_model::ResultRowView;

/// Escape text so it can be inserted into element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render the full `<tbody>` content, one `<tr>` per row in input order.
pub fn results_table_body(rows: &[ResultRowView]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str("<tr>");
        out.push_str("<td><strong>");
        out.push_str(&escape_html(&row.name));
        out.push_str("</strong></td>");
        for cell in [&row.city, &row.phone, &row.address, &row.rating, &row.votes] {
            out.push_str("<td>");
            out.push_str(&escape_html(cell));
            out.push_str("</td>");
        }
        out.push_str("</tr>\n");
    }
    out
}
