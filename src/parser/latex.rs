//! Structural LaTeX résumé parser
//!
//! One forward pass over the lines with a stack of open contexts (current
//! section, current entry). Every node receives a freshly minted identifier at
//! creation time, before its children are discovered, so no backtracking
//! relabeling is ever needed. Lines outside any recognized structure (the
//! preamble, spacing commands) stay in the raw line sequence un-wrapped and
//! can only be reached by line-number addressing.

use regex::Regex;

use crate::document::{Document, LineSpan, Node, NodeId, NodeKind, NodeTree, Wrapper};
use crate::error::{ParseError, ParseResult};

use super::scan::scan_groups;

const SUBHEADING: &str = "\\resumeSubheading";
const PROJECT_HEADING: &str = "\\resumeProjectHeading";
const ITEM: &str = "\\resumeItem{";
const ITEM_COMMAND: &str = "\\resumeItem";
const LIST_START: &str = "\\resumeItemListStart";
const LIST_END: &str = "\\resumeItemListEnd";
const END_DOCUMENT: &str = "\\end{document}";

/// Parser for LaTeX résumés using the `\section` / `\resumeSubheading` /
/// `\resumeItem` command family
pub struct ResumeParser {
    section_re: Regex,
    skill_re: Regex,
    textbf_re: Regex,
}

/// An entry whose span end is not yet known
struct OpenEntry {
    id: NodeId,
    /// Span end to use when no item list closes the entry
    end_hint: usize,
    /// Line where `\resumeItemListStart` was seen, if any
    list_open: Option<usize>,
}

impl ResumeParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            section_re: Regex::new(r"\\section\*?\{([^}]*)\}").unwrap(),
            skill_re: Regex::new(r"\\textbf\{[^}]+\}\{:").unwrap(),
            textbf_re: Regex::new(r"\\textbf\{([^}]*)\}").unwrap(),
        }
    }

    /// Parse a LaTeX source string into a document with a node tree overlay
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if a structural command's braces never balance
    /// within the recovery window, or if an item list is opened and never
    /// closed. No partial document is produced on failure.
    pub fn parse(&self, text: &str) -> ParseResult<Document> {
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        let tree = self.build_tree(&lines)?;
        let mut doc = Document::from_text(text);
        doc.set_tree(tree);
        Ok(doc)
    }

    fn build_tree(&self, lines: &[String]) -> ParseResult<NodeTree> {
        let mut tree = NodeTree::new();
        let mut open_section: Option<NodeId> = None;
        let mut open_entry: Option<OpenEntry> = None;

        let mut i = 0;
        while i < lines.len() {
            let line = &lines[i];

            // commented-out markup is not structure
            if line.trim_start().starts_with('%') {
                i += 1;
                continue;
            }

            if line.contains(END_DOCUMENT) {
                close_entry(&mut tree, &mut open_entry)?;
                close_section(&mut tree, &mut open_section, i.saturating_sub(1));
                return Ok(tree);
            }

            if let Some(caps) = self.section_re.captures(line) {
                close_entry(&mut tree, &mut open_entry)?;
                close_section(&mut tree, &mut open_section, i.saturating_sub(1));

                let id = tree.mint_id();
                tree.insert(Node {
                    id: id.clone(),
                    kind: NodeKind::Section,
                    span: LineSpan::new(i, i),
                    indent: indent_of(line),
                    label: caps[1].to_string(),
                    wrapper: Wrapper::Plain,
                    parent: None,
                    children: Vec::new(),
                });
                open_section = Some(id);
                i += 1;
                continue;
            }

            // everything below only exists inside a section
            let Some(section_id) = open_section.clone() else {
                i += 1;
                continue;
            };

            if let Some((marker, col)) = entry_marker(line) {
                close_entry(&mut tree, &mut open_entry)?;

                let extent = scan_groups(lines, i, col)
                    .ok_or_else(|| ParseError::unbalanced_braces(line_no(i), marker))?;
                let id = tree.mint_id();
                tree.insert(Node {
                    id: id.clone(),
                    kind: NodeKind::Entry,
                    span: LineSpan::new(i, extent.end_line),
                    indent: indent_of(line),
                    label: self.entry_label(marker, &extent.groups),
                    wrapper: Wrapper::Plain,
                    parent: Some(section_id),
                    children: Vec::new(),
                });
                open_entry = Some(OpenEntry {
                    id,
                    end_hint: extent.end_line,
                    list_open: None,
                });
                i = extent.end_line + 1;
                continue;
            }

            if line.contains(LIST_START) {
                if let Some(entry) = open_entry.as_mut() {
                    entry.list_open = Some(i);
                }
                i += 1;
                continue;
            }

            if line.contains(LIST_END) {
                if let Some(entry) = open_entry.take()
                    && let Some(node) = tree.get_mut(&entry.id)
                {
                    node.span.end = i;
                }
                i += 1;
                continue;
            }

            if let Some(col) = line.find(ITEM) {
                let extent = scan_groups(lines, i, col + ITEM_COMMAND.len())
                    .ok_or_else(|| ParseError::unbalanced_braces(line_no(i), ITEM_COMMAND))?;
                let parent = match open_entry.as_mut() {
                    Some(entry) => {
                        entry.end_hint = entry.end_hint.max(extent.end_line);
                        entry.id.clone()
                    }
                    None => section_id,
                };
                tree.insert(Node {
                    id: tree.mint_id(),
                    kind: NodeKind::Item,
                    span: LineSpan::new(i, extent.end_line),
                    indent: indent_of(line),
                    label: flatten(&extent.groups[0]),
                    wrapper: Wrapper::Bullet,
                    parent: Some(parent),
                    children: Vec::new(),
                });
                i = extent.end_line + 1;
                continue;
            }

            if let Some(m) = self.skill_re.find(line) {
                let extent = scan_groups(lines, i, m.start() + "\\textbf".len())
                    .ok_or_else(|| ParseError::unbalanced_braces(line_no(i), "\\textbf"))?;
                let category = extent.groups.first().cloned().unwrap_or_default();
                let skills = extent
                    .groups
                    .get(1)
                    .map(|g| g.trim_start_matches(':').trim().to_string())
                    .unwrap_or_default();
                let parent = match open_entry.as_mut() {
                    Some(entry) => {
                        entry.end_hint = entry.end_hint.max(extent.end_line);
                        entry.id.clone()
                    }
                    None => section_id,
                };
                tree.insert(Node {
                    id: tree.mint_id(),
                    kind: NodeKind::Item,
                    span: LineSpan::new(i, extent.end_line),
                    indent: indent_of(line),
                    label: format!("{category}: {}", flatten(&skills)),
                    wrapper: Wrapper::Skill { category },
                    parent: Some(parent),
                    children: Vec::new(),
                });
                i = extent.end_line + 1;
                continue;
            }

            i += 1;
        }

        close_entry(&mut tree, &mut open_entry)?;
        close_section(&mut tree, &mut open_section, lines.len().saturating_sub(1));
        Ok(tree)
    }

    fn entry_label(&self, marker: &str, groups: &[String]) -> String {
        if marker == SUBHEADING && groups.len() >= 2 {
            return format!("{} at {}", flatten(&groups[0]), flatten(&groups[1]));
        }
        let first = groups.first().map(String::as_str).unwrap_or_default();
        // project headings usually bold their name: \textbf{Name} $|$ Tech
        self.textbf_re
            .captures(first)
            .map_or_else(|| flatten(first), |caps| flatten(&caps[1]))
    }
}

impl Default for ResumeParser {
    fn default() -> Self {
        Self::new()
    }
}

fn entry_marker(line: &str) -> Option<(&'static str, usize)> {
    if let Some(col) = line.find(SUBHEADING) {
        return Some((SUBHEADING, col + SUBHEADING.len()));
    }
    if let Some(col) = line.find(PROJECT_HEADING) {
        return Some((PROJECT_HEADING, col + PROJECT_HEADING.len()));
    }
    None
}

fn close_entry(tree: &mut NodeTree, open_entry: &mut Option<OpenEntry>) -> ParseResult<()> {
    if let Some(entry) = open_entry.take() {
        if let Some(start) = entry.list_open {
            return Err(ParseError::unclosed_list(line_no(start)));
        }
        if let Some(node) = tree.get_mut(&entry.id) {
            node.span.end = entry.end_hint;
        }
    }
    Ok(())
}

fn close_section(tree: &mut NodeTree, open_section: &mut Option<NodeId>, end_line: usize) {
    if let Some(id) = open_section.take()
        && let Some(node) = tree.get_mut(&id)
    {
        node.span.end = end_line.max(node.span.start);
    }
}

fn indent_of(line: &str) -> String {
    line[..line.len() - line.trim_start().len()].to_string()
}

/// Collapse a group's text to a single line with single spaces
fn flatten(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[allow(clippy::cast_possible_truncation)]
const fn line_no(index: usize) -> u64 {
    index as u64 + 1
}
