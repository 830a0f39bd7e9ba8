//! Literal scanning of `<!-- KIND:NAME -->` delimiter comments.

pub const ENDPOINT_MARKER: &str = "<!-- ENDPOINT:";
pub const SECTION_MARKER: &str = "<!-- SECTION:";
pub const SUBSECTION_MARKER: &str = "<!-- SUBSECTION:";
const MARKER_CLOSE: &str = " -->";

/// An endpoint section ends at the nearest of these (or end of document).
const ENDPOINT_TERMINATORS: [&str; 3] = [ENDPOINT_MARKER, SECTION_MARKER, SUBSECTION_MARKER];

/// Sections that describe endpoints themselves and are never harvested as
/// auxiliary context.
pub const SKIPPED_SECTIONS: [&str; 2] = ["API_ENDPOINTS", "HEADER"];

/// A non-endpoint `<!-- SECTION:NAME -->` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuxiliarySection {
    pub name: String,
    pub body: String,
}

/// The `<!-- ENDPOINT:<tag> -->` block, start marker included, trimmed.
pub fn endpoint_section<'a>(content: &'a str, tag: &str) -> Option<&'a str> {
    let start_marker = format!("{ENDPOINT_MARKER}{tag}{MARKER_CLOSE}");
    let start = content.find(&start_marker)?;
    let search_from = start + start_marker.len();

    let end = ENDPOINT_TERMINATORS
        .iter()
        .filter_map(|marker| content[search_from..].find(marker))
        .min()
        .map(|offset| search_from + offset)
        .unwrap_or(content.len());

    let section = content[start..end].trim();
    if section.is_empty() {
        None
    } else {
        Some(section)
    }
}

/// Every `<!-- SECTION:NAME -->` block except [`SKIPPED_SECTIONS`], each running to
/// the next section marker or end of document.
pub fn auxiliary_sections(content: &str) -> Vec<AuxiliarySection> {
    let mut sections = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = content[cursor..].find(SECTION_MARKER) {
        let start = cursor + offset;
        let name_start = start + SECTION_MARKER.len();
        cursor = name_start;

        let Some(close) = content[name_start..].find(MARKER_CLOSE) else {
            break;
        };
        let name = &content[name_start..name_start + close];
        if name.is_empty() || name.contains('>') {
            continue;
        }

        let body_from = name_start + close + MARKER_CLOSE.len();
        let end = content[body_from..]
            .find(SECTION_MARKER)
            .map(|o| body_from + o)
            .unwrap_or(content.len());

        if !SKIPPED_SECTIONS.contains(&name) {
            sections.push(AuxiliarySection {
                name: name.to_string(),
                body: content[start..end].trim().to_string(),
            });
        }
        cursor = end;
    }

    sections
}

/// Renders sections as `=== NAME ===` blocks separated by blank lines.
pub fn render_auxiliary(sections: &[AuxiliarySection]) -> String {
    sections
        .iter()
        .map(|s| format!("=== {} ===\n{}", s.name, s.body))
        .collect::<Vec<_>>()
        .join("\n\n")
}
