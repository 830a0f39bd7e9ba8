use crate::catalog::CatalogEntry;
use crate::constants::{TABLE_MAX_KEYWORDS, TABLE_NAME_MAX_CHARS, TABLE_SUMMARY_MAX_CHARS};

pub const TABLE_HEADER: &str = "ID | Name | Keywords | Summary";
const TABLE_RULE: &str = "---|------|----------|--------";

/// Compact pipe table of the catalog; row `i` (0-based, header excluded) is `entries[i]`.
pub fn build_table(entries: &[CatalogEntry]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 2);
    lines.push(TABLE_HEADER.to_string());
    lines.push(TABLE_RULE.to_string());

    for entry in entries {
        let name = truncate_chars(&entry.name, TABLE_NAME_MAX_CHARS);
        let keywords = entry
            .keywords
            .iter()
            .take(TABLE_MAX_KEYWORDS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let summary = truncate_chars(&entry.summary, TABLE_SUMMARY_MAX_CHARS);

        lines.push(format!(
            "{} | {} | {} | {}",
            entry.id,
            escape_cell(name),
            escape_cell(&keywords),
            escape_cell(summary)
        ));
    }

    lines.join("\n")
}

/// First `max` characters of `text`, on a char boundary.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|")
}
