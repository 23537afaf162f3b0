//! Applying resolved edits to a document
//!
//! A batch is resolved in full against the pre-mutation state, then applied in
//! descending order of resolved start line, so an edit lower in the file can
//! never shift the line numbers of one above it. At equal start line
//! insertions apply before replacements and removals, so application order
//! never depends on submission order. Requests whose resolved lines overlap
//! conflict: the one applied first wins and the later ones are rejected,
//! since a span resolved before any mutation may have shifted or been
//! consumed once an overlapping edit lands. Outcomes are reported in request
//! order. A single edit either fully applies or leaves the document
//! untouched; the batch as a whole is not transactional.

use crate::document::{Document, LineSpan, NodeKind, Wrapper};
use crate::error::{EditError, EditResult};
use crate::parser::scan::span_is_balanced;

use super::resolver::{Location, resolve};
use super::{EditAction, EditOutcome, EditRequest};

const LIST_END: &str = "\\resumeItemListEnd";
const ITEM: &str = "\\resumeItem{";
const DEFAULT_ITEM_INDENT: &str = "    ";

/// Apply a batch of edit requests, returning one outcome per request in
/// request order
///
/// Any applied edit invalidates the document's node tree; identifiers only
/// become available again after a re-parse.
pub fn apply_batch(doc: &mut Document, requests: &[EditRequest]) -> Vec<EditOutcome> {
    let mut plans: Vec<EditResult<Location>> = requests
        .iter()
        .map(|request| {
            request
                .validate()
                .and_then(|()| resolve(doc, &request.target))
        })
        .collect();

    let mut order: Vec<usize> = (0..requests.len())
        .filter(|&i| plans[i].is_ok())
        .collect();
    order.sort_by_key(|&i| {
        let line = plans[i].as_ref().map_or(0, Location::start_line);
        std::cmp::Reverse((line, action_rank(requests[i].action)))
    });

    let mut mutated = false;
    let mut touched: Vec<LineSpan> = Vec::new();
    for i in order {
        let Ok(location) = plans[i].clone() else {
            continue;
        };
        let request = &requests[i];
        let footprint = location.footprint();
        if touched.iter().any(|span| !span.disjoint(footprint)) {
            plans[i] = Err(EditError::conflicting(request.target.to_string()));
            continue;
        }
        match apply_one(doc, &location, request.action, request.text.as_deref()) {
            Ok(()) => {
                mutated = true;
                touched.push(footprint);
            }
            Err(err) => plans[i] = Err(err),
        }
    }

    let outcomes = requests
        .iter()
        .zip(&plans)
        .map(|(request, plan)| match plan {
            Ok(_) => EditOutcome::applied(&request.target),
            Err(err) => EditOutcome::rejected(&request.target, err),
        })
        .collect();

    if mutated {
        doc.invalidate_tree();
    }
    outcomes
}

/// Applied first at equal start line, so an insertion lands before the line
/// it anchors to is replaced or removed
const fn action_rank(action: EditAction) -> u8 {
    match action {
        EditAction::InsertAfter => 2,
        EditAction::Modify => 1,
        EditAction::Remove => 0,
    }
}

fn apply_one(
    doc: &mut Document,
    location: &Location,
    action: EditAction,
    text: Option<&str>,
) -> EditResult<()> {
    match location {
        Location::Line { index } => apply_line(doc, *index, action, text),
        Location::Node {
            id,
            kind,
            span,
            indent,
            wrapper,
        } => {
            if span.end >= doc.line_count()
                || !span_is_balanced(&doc.lines()[span.start..=span.end])
            {
                return Err(EditError::unbalanced_wrapper(id.to_string()));
            }
            apply_node(doc, *kind, *span, indent, wrapper, action, text);
            Ok(())
        }
    }
}

/// Degraded mode: every action touches exactly one physical line
#[allow(clippy::cast_possible_truncation)]
fn apply_line(
    doc: &mut Document,
    index: usize,
    action: EditAction,
    text: Option<&str>,
) -> EditResult<()> {
    if index >= doc.line_count() {
        return Err(EditError::line_out_of_range(
            index as u64 + 1,
            doc.line_count() as u64,
        ));
    }
    match action {
        EditAction::Modify => {
            let line = single_line(text)?;
            doc.splice(LineSpan::new(index, index), vec![line]);
        }
        EditAction::Remove => {
            doc.splice(LineSpan::new(index, index), Vec::new());
        }
        EditAction::InsertAfter => {
            let line = single_line(text)?;
            doc.insert_lines(index + 1, vec![line]);
        }
    }
    Ok(())
}

fn apply_node(
    doc: &mut Document,
    kind: NodeKind,
    span: LineSpan,
    indent: &str,
    wrapper: &Wrapper,
    action: EditAction,
    text: Option<&str>,
) {
    let text = text.unwrap_or("");
    match action {
        EditAction::Modify => {
            doc.splice(span, wrap_replacement(indent, wrapper, text));
        }
        EditAction::Remove => {
            doc.splice(span, Vec::new());
        }
        EditAction::InsertAfter => match kind {
            NodeKind::Item => {
                let line = format!("{indent}{}", wrapper.wrap(&flatten(text)));
                doc.insert_lines(span.end + 1, vec![line]);
            }
            NodeKind::Entry => insert_bullet_into_entry(doc, span, indent, text),
            NodeKind::Section => {
                doc.insert_lines(span.end + 1, plain_lines(indent, text));
            }
        },
    }
}

/// Re-wrap replacement text in the node's original command and indentation
fn wrap_replacement(indent: &str, wrapper: &Wrapper, text: &str) -> Vec<String> {
    match wrapper {
        Wrapper::Bullet | Wrapper::Skill { .. } => {
            vec![format!("{indent}{}", wrapper.wrap(&flatten(text)))]
        }
        Wrapper::Plain => plain_lines(indent, text),
    }
}

/// Append a bullet inside an entry's item list, just before
/// `\resumeItemListEnd`; entries without a list get the bullet right after
/// their span instead
fn insert_bullet_into_entry(doc: &mut Document, span: LineSpan, entry_indent: &str, text: &str) {
    let lines = &doc.lines()[span.start..=span.end];
    let list_end = lines.iter().position(|l| l.contains(LIST_END));
    let bullet_indent = lines
        .iter()
        .find(|l| l.contains(ITEM))
        .map_or_else(|| format!("{entry_indent}{DEFAULT_ITEM_INDENT}"), |l| indent_of(l));

    let line = format!("{bullet_indent}{}", Wrapper::Bullet.wrap(&flatten(text)));
    match list_end {
        Some(offset) => doc.insert_lines(span.start + offset, vec![line]),
        None => doc.insert_lines(span.end + 1, vec![line]),
    }
}

fn plain_lines(indent: &str, text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| format!("{indent}{line}"))
        .collect()
}

fn single_line(text: Option<&str>) -> EditResult<String> {
    let text = text.unwrap_or("");
    if text.contains('\n') {
        return Err(EditError::malformed(
            "line-mode text must be a single physical line",
        ));
    }
    Ok(text.to_string())
}

fn indent_of(line: &str) -> String {
    line[..line.len() - line.trim_start().len()].to_string()
}

/// Collapse multi-line suggestion text to a single line for wrapped commands
fn flatten(text: &str) -> String {
    if text.contains('\n') {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        text.to_string()
    }
}
