use std::fmt::Write;

use livemark_editor_core::{Alignment, TableData};

use crate::inline::{TABLE_CELL, render_inline};

/// Pipe table as HTML. Short rows are padded, long rows cut to the header width.
pub fn table_html(table: &TableData) -> String {
    let columns = table.headers.len();
    let mut out = String::from(r#"<table class="md-table"><thead><tr>"#);
    for (col, header) in table.headers.iter().enumerate() {
        push_cell(&mut out, "th", header, alignment(table, col));
    }
    out.push_str("</tr></thead><tbody>");

    for row in &table.rows {
        out.push_str("<tr>");
        for col in 0..columns {
            let cell = row.get(col).map(String::as_str).unwrap_or_default();
            push_cell(&mut out, "td", cell, alignment(table, col));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}

fn alignment(table: &TableData, col: usize) -> Alignment {
    table.alignments.get(col).copied().unwrap_or_default()
}

fn push_cell(out: &mut String, tag: &str, cell: &str, align: Alignment) {
    let _ = write!(
        out,
        r#"<{tag} style="text-align: {}">{}</{tag}>"#,
        align.as_css(),
        render_inline(cell, TABLE_CELL)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TableData {
        TableData {
            headers: vec!["Name".into(), "Qty".into(), "Note".into()],
            alignments: vec![Alignment::Left, Alignment::Right, Alignment::Center],
            rows: vec![
                vec!["**apple**".into(), "3".into(), "`ripe`".into()],
                vec!["pear".into()],
            ],
        }
    }

    #[test]
    fn test_alignment_and_padding() {
        insta::assert_snapshot!(table_html(&table()), @r#"<table class="md-table"><thead><tr><th style="text-align: left">Name</th><th style="text-align: right">Qty</th><th style="text-align: center">Note</th></tr></thead><tbody><tr><td style="text-align: left"><strong>apple</strong></td><td style="text-align: right">3</td><td style="text-align: center"><code>ripe</code></td></tr><tr><td style="text-align: left">pear</td><td style="text-align: right"></td><td style="text-align: center"></td></tr></tbody></table>"#);
    }

    #[test]
    fn test_cells_are_escaped() {
        let table = TableData {
            headers: vec!["<h>".into()],
            alignments: vec![Alignment::Left],
            rows: vec![vec!["a & b".into(), "extra".into()]],
        };
        let html = table_html(&table);
        assert!(html.contains("&lt;h&gt;"));
        assert!(html.contains("a &amp; b"));
        assert!(!html.contains("extra"));
    }
}
