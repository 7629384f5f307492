//! Summary template rendering.
//!
//! Grammar: `{{#if NAME}} CONTENT {{/if}}` conditional blocks and `{{NAME}}`
//! variable references. Conditionals resolve before variables, innermost
//! resolvable block first, repeated until no blocks remain; then variables
//! substitute; then runs of three or more newlines collapse to two and the
//! result is trimmed.
//!
//! Malformed input is not an error: an unmatched `{{#if NAME}}` never forms a
//! block, the variable pass does not match it either, and it survives in the
//! output verbatim.

use std::collections::BTreeMap;

/// Named values available to a template. `None` and the falsy strings
/// (empty, literal "0") hide conditional blocks and substitute as empty.
pub type TemplateValues = BTreeMap<String, Option<String>>;

const IF_OPEN: &str = "{{#if";
const IF_CLOSE: &str = "{{/if}}";

pub fn render(template: &str, values: &TemplateValues) -> String {
    let resolved = resolve_conditionals(template, values);
    let substituted = substitute_variables(&resolved, values);
    collapse_blank_lines(&substituted)
}

fn is_truthy(values: &TemplateValues, name: &str) -> bool {
    matches!(values.get(name), Some(Some(v)) if !v.is_empty() && v != "0")
}

fn is_name(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Resolve conditional blocks to fixed point. Each pass replaces every block
/// whose content holds no further `{{#if` opener; outer blocks resolve on a
/// later pass once their children are gone.
fn resolve_conditionals(template: &str, values: &TemplateValues) -> String {
    let mut current = template.to_string();
    loop {
        let (next, changed) = resolve_pass(&current, values);
        if !changed {
            return next;
        }
        current = next;
    }
}

fn resolve_pass(input: &str, values: &TemplateValues) -> (String, bool) {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    let mut changed = false;

    while let Some(start) = rest.find(IF_OPEN) {
        out.push_str(&rest[..start]);
        let opener = &rest[start..];

        let Some(body_offset) = parse_opener(opener) else {
            // Not a well-formed opener; emit the marker and keep scanning.
            out.push_str(IF_OPEN);
            rest = &opener[IF_OPEN.len()..];
            continue;
        };

        let name = opener_name(opener, body_offset);
        let body = &opener[body_offset..];
        let close = body.find(IF_CLOSE);
        let nested = body.find(IF_OPEN);

        match close {
            Some(close_at) if nested.map_or(true, |n| n > close_at) => {
                if is_truthy(values, name) {
                    out.push_str(body[..close_at].trim());
                }
                rest = &body[close_at + IF_CLOSE.len()..];
                changed = true;
            }
            _ => {
                // Unmatched or still-nested: leave the opener in place so a
                // later pass (or the final output) sees it untouched.
                out.push_str(&opener[..body_offset]);
                rest = body;
            }
        }
    }

    out.push_str(rest);
    (out, changed)
}

/// Validate `{{#if NAME}}` at the start of `input`; returns the offset just
/// past the opener's closing braces.
fn parse_opener(input: &str) -> Option<usize> {
    let after_marker = &input[IF_OPEN.len()..];
    let ws = after_marker.len() - after_marker.trim_start().len();
    if ws == 0 {
        return None;
    }
    let after_ws = &after_marker[ws..];
    let end = after_ws.find("}}")?;
    if !is_name(&after_ws[..end]) {
        return None;
    }
    Some(IF_OPEN.len() + ws + end + 2)
}

fn opener_name(opener: &str, body_offset: usize) -> &str {
    opener[IF_OPEN.len()..body_offset - 2].trim()
}

fn substitute_variables(input: &str, values: &TemplateValues) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let inner = &rest[start + 2..];

        match inner.find("}}") {
            Some(end) if is_name(&inner[..end]) => {
                let name = &inner[..end];
                if is_truthy(values, name) {
                    if let Some(Some(value)) = values.get(name) {
                        out.push_str(value);
                    }
                }
                rest = &inner[end + 2..];
            }
            _ => {
                // Not a variable reference; emit one brace and rescan from
                // the next character.
                out.push('{');
                rest = &rest[start + 1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Collapse runs of 3+ newlines to exactly 2 and trim the ends.
fn collapse_blank_lines(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut run = 0usize;

    for ch in input.chars() {
        if ch == '\n' {
            run += 1;
            continue;
        }
        push_newlines(&mut out, run);
        run = 0;
        out.push(ch);
    }
    push_newlines(&mut out, run);

    out.trim().to_string()
}

fn push_newlines(out: &mut String, run: usize) {
    let count = if run >= 3 { 2 } else { run };
    for _ in 0..count {
        out.push('\n');
    }
}
