//! Rendering primitives for CLI output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, ContentArrangement, Table as ComfyTable};

use super::context::UiContext;
use super::theme::{dim, styled, Badge};

/// Render a badge with optional message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let colored_badge = styled(kind.text(), kind.style(), ctx.color);
    if message.is_empty() {
        colored_badge
    } else {
        format!("{} {}", colored_badge, message)
    }
}

/// Render a key-value pair.
///
/// Pretty mode: "Key: value" with dim key
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let styled_key = styled(&format!("{}:", key), dim(), ctx.color);
        format!("{} {}", styled_key, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render a hint line.
pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        format!("{} {}", styled("Hint:", dim(), ctx.color), text)
    } else {
        format!("hint={}", text)
    }
}

/// Render a table.
///
/// Pretty mode: bordered table with a header row
/// Plain mode: tab-separated values, no header
pub fn table(ctx: &UiContext, headers: &[&str], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = ComfyTable::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| {
            let cell = Cell::new(h);
            if ctx.color {
                cell.add_attribute(Attribute::Bold)
            } else {
                cell
            }
        })
        .collect();
    table.set_header(header_cells);
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

/// Print an error (and optional hint) to stderr.
pub fn print_error(ctx: &UiContext, message: &str, hint: Option<&str>) {
    eprintln!("{}", badge(ctx, Badge::Err, message));
    if let Some(h) = hint {
        eprintln!("{}", h);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::mode::OutputMode;

    fn plain() -> UiContext {
        UiContext {
            is_tty: false,
            color: false,
            quiet: false,
            mode: OutputMode::Plain,
        }
    }

    fn pretty() -> UiContext {
        UiContext {
            mode: OutputMode::Pretty,
            ..plain()
        }
    }

    #[test]
    fn test_kv_modes() {
        assert_eq!(kv(&plain(), "Created At", "now"), "created_at=now");
        assert_eq!(kv(&pretty(), "Label", "api"), "Label: api");
    }

    #[test]
    fn test_plain_table_has_no_header() {
        let rows = vec![vec!["api".to_string(), "2026-01-01".to_string()]];
        assert_eq!(table(&plain(), &["LABEL", "CREATED"], &rows), "api\t2026-01-01");
    }

    #[test]
    fn test_pretty_table_has_header() {
        let rows = vec![vec!["api".to_string()]];
        let rendered = table(&pretty(), &["LABEL"], &rows);
        assert!(rendered.contains("LABEL"));
        assert!(rendered.contains("api"));
    }

    #[test]
    fn test_badge_plain() {
        assert_eq!(badge(&plain(), Badge::Ok, "done"), "[OK] done");
    }
}
