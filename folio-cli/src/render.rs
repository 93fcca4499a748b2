//! Plain-text rendering of tables and dashboard cards.

use std::fmt::Write;

use folio_lib::model::PortfolioStat;
use folio_table::CellValue;
use folio_table::TableEngine;
use folio_table::TablePage;
use folio_table::TableView;
use unicode_width::UnicodeWidthStr;

const COLUMN_GAP: &str = "  ";

/// Pad `text` to `width` display columns.
fn pad(text: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(text.width()));
    if right_align {
        format!("{}{}", fill, text)
    } else {
        format!("{}{}", text, fill)
    }
}

fn is_numeric(value: &CellValue) -> bool {
    matches!(
        value,
        CellValue::Int(_) | CellValue::Float(_) | CellValue::Decimal(_)
    )
}

/// Render a table view with a title, headers, rows and pagination footer.
pub fn table<R>(title: &str, engine: &TableEngine<R>, view: &TableView<'_, R>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);

    let page = match view {
        TableView::Loading => {
            let _ = writeln!(out, "Loading...");
            return out;
        }
        TableView::Empty => {
            let _ = writeln!(out, "No data available");
            return out;
        }
        TableView::Ready(page) => page,
    };

    let labels: Vec<String> = engine
        .headers()
        .iter()
        .map(|cell| match cell.indicator {
            Some(indicator) => format!("{} {}", cell.header, indicator.symbol()),
            None => cell.header.to_string(),
        })
        .collect();

    let cells: Vec<Vec<CellValue>> = page.rows().iter().map(|row| engine.resolve_row(row)).collect();
    let texts: Vec<Vec<String>> = cells
        .iter()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect();

    let widths: Vec<usize> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            texts
                .iter()
                .filter_map(|row| row.get(i))
                .map(|text| text.width())
                .chain(std::iter::once(label.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header_line: Vec<String> = labels
        .iter()
        .zip(&widths)
        .map(|(label, &width)| pad(label, width, false))
        .collect();
    let _ = writeln!(out, "{}", header_line.join(COLUMN_GAP).trim_end());
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    let _ = writeln!(out, "{}", rule.join(COLUMN_GAP));

    for (values, row_texts) in cells.iter().zip(&texts) {
        let line: Vec<String> = row_texts
            .iter()
            .zip(values)
            .zip(&widths)
            .map(|((text, value), &width)| pad(text, width, is_numeric(value)))
            .collect();
        let _ = writeln!(out, "{}", line.join(COLUMN_GAP).trim_end());
    }

    out.push_str(&footer(page, engine.options().page_size_options.as_slice()));
    out
}

fn footer<R>(page: &TablePage<'_, R>, page_size_options: &[usize]) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    if let Some((first, last)) = page.display_range() {
        let _ = write!(
            out,
            "Showing {} to {} of {} results",
            first,
            last,
            page.total_items()
        );
    }
    let _ = writeln!(
        out,
        "  |  Page {} of {}",
        page.page_index() + 1,
        page.page_count().max(1)
    );

    let options: Vec<String> = page_size_options.iter().map(ToString::to_string).collect();
    let _ = writeln!(
        out,
        "Rows per page: {} (options: {})",
        page.page_size(),
        options.join(", ")
    );

    let controls = [
        ("first", page.can_previous_page()),
        ("prev", page.can_previous_page()),
        ("next", page.can_next_page()),
        ("last", page.can_next_page()),
    ];
    let enabled: Vec<&str> = controls
        .iter()
        .filter(|(_, enabled)| *enabled)
        .map(|(name, _)| *name)
        .collect();
    if !enabled.is_empty() {
        let _ = writeln!(out, "Navigate: {}", enabled.join(" "));
    }
    out
}

/// Render the dashboard summary cards.
pub fn stats(stats: &[PortfolioStat]) -> String {
    let label_width = stats.iter().map(|s| s.label.width()).max().unwrap_or(0);
    let value_width = stats.iter().map(|s| s.value.width()).max().unwrap_or(0);

    let mut out = String::new();
    for stat in stats {
        let marker = if stat.positive { "▲" } else { "▼" };
        let _ = writeln!(
            out,
            "{}  {}  {} {}",
            pad(&stat.label, label_width, false),
            pad(&stat.value, value_width, true),
            marker,
            stat.change
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use folio_table::Column;
    use folio_table::Columns;
    use folio_table::ProcessingMode;
    use folio_table::RenderInput;
    use folio_table::TableOptions;

    use super::*;

    fn engine() -> TableEngine<(&'static str, i64)> {
        let columns = Columns::new(vec![
            Column::new("name", "Name", |r: &(&'static str, i64)| CellValue::from(r.0)),
            Column::new("qty", "Qty", |r: &(&'static str, i64)| CellValue::from(r.1)),
        ])
        .expect("columns");
        TableEngine::new(
            columns,
            TableOptions::default()
                .page_size(2)
                .sorting(ProcessingMode::ClientComputed)
                .pagination(ProcessingMode::ClientComputed),
        )
    }

    #[test]
    fn test_table_layout() {
        let rows = vec![("ä", 5), ("bb", 12), ("c", 7)];
        let mut engine = engine();
        engine.toggle_sort("qty");
        let view = engine.render(&rows, &RenderInput::new());
        let text = table("Items", &engine, &view);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Items");
        assert_eq!(lines[1], "Name ↕  Qty ↑");
        assert_eq!(lines[2], "------  -----");
        assert_eq!(lines[3], "ä           5");
        assert_eq!(lines[4], "c           7");
        assert!(text.contains("Showing 1 to 2 of 3 results  |  Page 1 of 2"));
        assert!(text.contains("Navigate: next last"));
    }

    #[test]
    fn test_placeholders() {
        let mut engine = engine();
        let rows: Vec<(&'static str, i64)> = vec![];
        let view = engine.render(&rows, &RenderInput::new());
        assert_eq!(table("Items", &engine, &view), "Items\nNo data available\n");
        let view = engine.render(&rows, &RenderInput::new().loading(true));
        assert_eq!(table("Items", &engine, &view), "Items\nLoading...\n");
    }

    #[test]
    fn test_stats_cards() {
        let text = stats(&[
            PortfolioStat::new("Total Value", "$90,572.00", "+3.25%", true),
            PortfolioStat::new("Pending Orders", "2", "2 filled", false),
        ]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Total Value     $90,572.00  ▲ +3.25%");
        assert_eq!(lines[1], "Pending Orders           2  ▼ 2 filled");
    }
}
