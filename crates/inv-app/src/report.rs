//! Plain-text rendering of query results

use inv_query::{Action, Align, Column, QueryOptions, QueryResult, TableConfig};

const ACTIONS_LABEL: &str = "操作";

/// Terminal columns taken by `text`; East Asian wide characters count twice
pub fn display_width(text: &str) -> usize {
    text.chars().map(|ch| if is_wide(ch) { 2 } else { 1 }).sum()
}

fn is_wide(ch: char) -> bool {
    matches!(
        ch as u32,
        0x1100..=0x115F
            | 0x2E80..=0x303E
            | 0x3041..=0x33FF
            | 0x3400..=0x4DBF
            | 0x4E00..=0x9FFF
            | 0xA000..=0xA4CF
            | 0xAC00..=0xD7A3
            | 0xF900..=0xFAFF
            | 0xFE30..=0xFE4F
            | 0xFF00..=0xFF60
            | 0xFFE0..=0xFFE6
            | 0x1F300..=0x1FAFF
            | 0x20000..=0x2FFFD
            | 0x30000..=0x3FFFD
    )
}

fn pad(text: &str, width: usize, align: Align) -> String {
    let gap = width.saturating_sub(display_width(text));
    match align {
        Align::Left => format!("{text}{}", " ".repeat(gap)),
        Align::Right => format!("{}{text}", " ".repeat(gap)),
        Align::Center => {
            let left = gap / 2;
            format!("{}{text}{}", " ".repeat(left), " ".repeat(gap - left))
        }
    }
}

/// Render one page as an aligned table with a pagination footer
pub fn render_table<R>(
    columns: &[Column<R>],
    actions: &[Action<R>],
    result: &QueryResult<'_, R>,
    options: &QueryOptions,
    config: &TableConfig,
) -> String {
    let mut header: Vec<String> = columns
        .iter()
        .map(|column| match (&options.sort_key, column.sortable) {
            (Some(key), true) if *key == column.key => {
                format!("{} {}", column.label, options.sort_direction.marker())
            }
            _ => column.label.clone(),
        })
        .collect();
    let mut aligns: Vec<Align> = columns.iter().map(|column| column.align).collect();

    let mut cells: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| columns.iter().map(|column| column.value(row)).collect())
        .collect();

    if !actions.is_empty() {
        header.push(ACTIONS_LABEL.to_string());
        aligns.push(Align::Left);
        for (line, row) in cells.iter_mut().zip(&result.rows) {
            let enabled: Vec<&str> = actions
                .iter()
                .filter(|action| action.is_enabled(row))
                .map(|action| action.label.as_str())
                .collect();
            line.push(enabled.join(" / "));
        }
    }

    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(idx, label)| {
            cells
                .iter()
                .map(|line| display_width(&line[idx]))
                .chain(std::iter::once(display_width(label)))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let separator = if config.show_border { " | " } else { "  " };
    let format_line = |line: &[String]| -> String {
        line.iter()
            .zip(&widths)
            .zip(&aligns)
            .map(|((text, width), align)| pad(text, *width, *align))
            .collect::<Vec<_>>()
            .join(separator)
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&format_line(&header));
    out.push('\n');
    if config.show_border {
        let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        out.push_str(&rule.join("-+-"));
        out.push('\n');
    }
    for line in &cells {
        out.push_str(&format_line(line));
        out.push('\n');
    }
    out.push_str(&footer(result, config));
    out.push('\n');
    out
}

fn footer<R>(result: &QueryResult<'_, R>, config: &TableConfig) -> String {
    match result.display_range() {
        None => config.empty_message.clone(),
        Some((first, last)) if result.page_size > 0 => format!(
            "{}件中 {}-{}件を表示 (ページ {}/{})",
            result.total_count, first, last, result.page, result.total_pages
        ),
        Some(_) => format!("{}件", result.total_count),
    }
}

/// Two-column label/value block, labels padded to the widest one
pub fn render_summary(lines: &[(&str, String)]) -> String {
    let width = lines
        .iter()
        .map(|(label, _)| display_width(label))
        .max()
        .unwrap_or_default();
    lines
        .iter()
        .map(|(label, value)| format!("{}  {}\n", pad(label, width, Align::Left), value))
        .collect()
}
