// Normalization of model output before JSON parsing

const FENCE: &str = "```";

/// Strip a markdown code fence (and its language tag) around a model response.
///
/// Handles a fence at the start of the text, a fenced block preceded by prose,
/// and an unterminated opening fence. Text that already starts as a JSON
/// object or array is only trimmed, even if its strings contain backticks.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();

    let after_open = match trimmed.strip_prefix(FENCE) {
        Some(rest) => rest,
        None if trimmed.starts_with('{') || trimmed.starts_with('[') => return trimmed,
        None => match trimmed.find(FENCE) {
            Some(idx) => &trimmed[idx + FENCE.len()..],
            None => return trimmed,
        },
    };

    let body = match after_open.find(FENCE) {
        Some(end) => &after_open[..end],
        None => after_open,
    };

    strip_language_tag(body).trim()
}

fn strip_language_tag(body: &str) -> &str {
    // "json" may sit directly against the payload, e.g. ```json{"a":1}```
    if let Some(tag) = body.get(..4) {
        if tag.eq_ignore_ascii_case("json") {
            return &body[4..];
        }
    }

    let tag_len = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(body.len());
    let rest = &body[tag_len..];

    // Any other tag only counts when it ends its own line
    if tag_len > 0 && (rest.starts_with('\n') || rest.starts_with("\r\n")) {
        rest
    } else {
        body
    }
}
