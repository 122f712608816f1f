use ahash::AHashSet;

/// A `{{ ... }}` placeholder extracted from template text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVariable {
    /// Trimmed text between the braces, e.g. `previous_output.deal_size`.
    pub raw: String,
    /// Segment before the first `.`, when one exists.
    pub namespace: Option<String>,
    /// Segment after the first `.`, or the whole raw text when there is no dot.
    pub field_path: String,
}

/// Scans `text` for `{{...}}` placeholders.
///
/// The scan is non-greedy and does not support nested braces: each `{{`
/// pairs with the next `}}`. Whitespace inside the braces is trimmed, and
/// duplicates (by trimmed content) are dropped while preserving first-seen
/// order. An unterminated `{{` ends the scan.
pub fn extract_variables(text: &str) -> Vec<TemplateVariable> {
    let mut seen: AHashSet<String> = AHashSet::new();
    let mut variables = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            break;
        };
        let raw = after[..end].trim().to_string();
        rest = &after[end + 2..];

        if !seen.insert(raw.clone()) {
            continue;
        }
        let (namespace, field_path) = match raw.split_once('.') {
            Some((namespace, path)) => (Some(namespace.to_string()), path.to_string()),
            None => (None, raw.clone()),
        };
        variables.push(TemplateVariable {
            raw,
            namespace,
            field_path,
        });
    }
    variables
}
