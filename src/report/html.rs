//! HTML rendering of the dashboard sheet.
//!
//! Produces a self-contained document with one table; every cell carries its
//! style inline so the file renders the same anywhere.

use super::Report;
use super::builder::{Cell, GridRow};
use super::style::CellStyle;
use std::fmt::{self, Write};

/// Render the report's dashboard as an HTML document
pub fn render(report: &Report) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_document(&mut out, report)?;
    Ok(out)
}

/// Write the full document to any formatter sink
pub fn write_document(out: &mut impl Write, report: &Report) -> fmt::Result {
    let sheet = &report.dashboard;

    out.write_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n")?;
    writeln!(
        out,
        "<title>{} {}</title>",
        escape(&sheet.name),
        escape(&report.raw_sheet.name)
    )?;
    out.write_str(
        "<style>table{border-collapse:collapse;font-family:Calibri,Arial,sans-serif;font-size:11pt}\
         td{border:1px solid #BFBFBF;padding:2px 8px;white-space:nowrap}\
         td.num{text-align:right}tr.spacer td{border:none;height:1em}</style>\n",
    )?;
    out.write_str("</head>\n<body>\n")?;
    writeln!(out, "<table id=\"{}\">", escape(&sheet.name))?;

    for block in &sheet.blocks {
        let width = block.width();
        for row in &block.rows {
            match row {
                GridRow::Title { text, span, style } => writeln!(
                    out,
                    "<tr><td colspan=\"{}\" style=\"{};text-align:center\">{}</td></tr>",
                    span,
                    css(style),
                    escape(text)
                )?,
                GridRow::Header(cells) => write_row(out, cells, None)?,
                GridRow::Metric { cells, .. } => write_row(out, cells, Some(1))?,
                GridRow::Spacer => writeln!(
                    out,
                    "<tr class=\"spacer\"><td colspan=\"{}\"></td></tr>",
                    width
                )?,
            }
        }
    }

    out.write_str("</table>\n</body>\n</html>\n")
}

/// Cells from `numeric_from` onwards are right-aligned
fn write_row(out: &mut impl Write, cells: &[Cell], numeric_from: Option<usize>) -> fmt::Result {
    out.write_str("<tr>")?;
    for (i, cell) in cells.iter().enumerate() {
        let class = match numeric_from {
            Some(from) if i >= from => " class=\"num\"",
            _ => "",
        };
        write!(
            out,
            "<td{} style=\"{}\">{}</td>",
            class,
            css(&cell.style),
            escape(&cell.value.display())
        )?;
    }
    out.write_str("</tr>\n")
}

fn css(style: &CellStyle) -> String {
    format!(
        "background-color:{};color:{};font-weight:{}",
        style.background,
        style.font_color,
        if style.bold { "bold" } else { "normal" }
    )
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
