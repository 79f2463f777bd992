//! HTML assembly for the timesheet viewer and its print page.
//!
//! Templates live under `assets/dtr/` and carry `{{PLACEHOLDER}}` markers.
//! Every value taken from the store or the request is escaped before it is
//! substituted.

use crate::config::PrintSettings;
use crate::dtr::{DtrRow, DtrSheet};
use crate::utils::html::{escape, query_string};

const PAGE_TEMPLATE: &str = include_str!("../../assets/dtr/page.html");
const PRINT_TEMPLATE: &str = include_str!("../../assets/dtr/print.html");
const LOGO_PATH: &str = "/assets/dtrsystemicon.svg";

/// Everything shown on the main viewer page
#[derive(Debug)]
pub struct PageView<'a> {
    /// Names matching the current search
    pub names: &'a [String],
    pub selected: Option<&'a str>,
    pub search: &'a str,
    pub sheet: &'a DtrSheet,
    pub print: &'a PrintSettings,
}

/// Render the viewer page: searchable name list and the selected timesheet
pub fn render_page(view: &PageView<'_>) -> String {
    let selected = view.selected.unwrap_or("");
    let month = view.sheet.month_path.as_str();

    let names: String = view
        .names
        .iter()
        .map(|name| {
            let href = query_string(&[("name", name.as_str()), ("q", view.search), ("month", month)]);
            let class = if Some(name.as_str()) == view.selected {
                " class=\"selected\""
            } else {
                ""
            };
            format!(
                "<li><a href=\"/?{}\"{}>{}</a></li>\n",
                escape(&href),
                class,
                escape(name)
            )
        })
        .collect();

    let search_fields = hidden_field("name", selected) + &hidden_field("month", month);
    let month_fields = hidden_field("name", selected) + &hidden_field("q", view.search);
    let print_query = query_string(&[("name", selected), ("month", month)]);

    PAGE_TEMPLATE
        .replace("{{HIDDEN_FIELDS}}", &search_fields)
        .replace("{{SEARCH}}", &escape(view.search))
        .replace("{{NAMES}}", &names)
        .replace("{{MONTH_FIELDS}}", &month_fields)
        .replace("{{MONTH}}", &escape(month))
        .replace("{{PRINT_QUERY}}", &escape(&print_query))
        .replace("{{SHEET}}", &render_sheet(view.sheet, view.print))
}

/// Render the standalone page that opens the print dialog on load
pub fn render_print(sheet: &DtrSheet, print: &PrintSettings) -> String {
    let title = if sheet.employee.is_empty() {
        format!("DTR {}", sheet.month_heading)
    } else {
        format!("DTR {} - {}", sheet.employee, sheet.month_heading)
    };

    PRINT_TEMPLATE
        .replace("{{TITLE}}", &escape(&title))
        .replace("{{SHEET}}", &render_sheet(sheet, print))
}

/// Render the printable timesheet block
pub fn render_sheet(sheet: &DtrSheet, print: &PrintSettings) -> String {
    let mut html = String::from("<div class=\"dtr-sheet\">\n");

    html.push_str("<div class=\"dtr-header\">\n");
    html.push_str(&format!("<img src=\"{}\" alt=\"Logo\">\n", LOGO_PATH));
    html.push_str("<h1>DAILY TIME RECORD (DTR)</h1>\n");
    if !print.office_name.is_empty() {
        html.push_str(&format!("<p>{}</p>\n", escape(&print.office_name)));
    }
    html.push_str(&format!("<p>{}</p>\n</div>\n", escape(&sheet.month_heading)));

    html.push_str(&format!(
        "<div class=\"dtr-name\"><strong>Name:</strong> <span class=\"dtr-line\">{}</span></div>\n",
        escape(&sheet.employee)
    ));

    html.push_str(
        "<table>\n<thead><tr>\
         <th>Date</th><th>A.M.</th><th>Time-in</th><th>Time-out</th>\
         <th>P.M.</th><th>Time-in</th><th>Time-out</th><th class=\"signature\">Signature</th>\
         </tr></thead>\n<tbody>\n",
    );
    for row in &sheet.rows {
        html.push_str(&render_row(row));
    }
    html.push_str("</tbody>\n</table>\n");

    html.push_str("<div class=\"dtr-footer\">\n");
    html.push_str(&format!(
        "<div><strong>TOTAL: </strong><span class=\"dtr-line\">{}</span></div>\n",
        sheet.total
    ));
    html.push_str(&format!(
        "<p class=\"dtr-certify\">*{}*</p>\n",
        escape(&print.certification)
    ));
    html.push_str(&format!(
        "<div class=\"dtr-signatory\"><p class=\"name\">{}</p><p class=\"title\">{}</p></div>\n",
        escape(&print.signatory_name),
        escape(&print.signatory_title)
    ));
    html.push_str("</div>\n</div>\n");

    html
}

fn render_row(row: &DtrRow) -> String {
    let cell = |value: &Option<String>| escape(value.as_deref().unwrap_or(""));

    format!(
        "<tr><td>{}</td><td></td><td>{}</td><td>{}</td><td></td><td>{}</td><td>{}</td><td></td></tr>\n",
        escape(&row.label),
        cell(&row.record.am_in),
        cell(&row.record.am_out),
        cell(&row.record.pm_in),
        cell(&row.record.pm_out),
    )
}

fn hidden_field(name: &str, value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    format!(
        "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
        name,
        escape(value)
    )
}
