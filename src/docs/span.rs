use super::error::{DocsError, DocsResult};

/// Extracts lines `start..=end` (1-indexed, inclusive) from `body`, widened by
/// `context` lines on each side and clamped to the document.
///
/// Line terminators are kept, so the result is a verbatim slice of `body`. A span
/// that starts past the last line, is inverted, or selects only blank text is an
/// error.
pub fn extract_span(body: &str, start: usize, end: usize, context: usize) -> DocsResult<String> {
    let lines: Vec<&str> = body.split_inclusive('\n').collect();
    let total = lines.len();

    let start_idx = start.saturating_sub(1);
    if start > end || start_idx >= total {
        return Err(DocsError::SpanOutOfRange { start, end, total });
    }
    let end_idx = end.min(total);

    let context_start = start_idx.saturating_sub(context);
    let context_end = (end_idx + context).min(total);

    let span: String = lines[context_start..context_end].concat();
    if span.trim().is_empty() {
        return Err(DocsError::SpanOutOfRange { start, end, total });
    }

    Ok(span)
}
