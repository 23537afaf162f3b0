//! Brace-balanced scanning of LaTeX command arguments
//!
//! Structural commands own their text until the argument braces balance to
//! zero, which is what lets a bullet contain braces or span several lines
//! without prematurely closing its span. Escaped braces (`\{`, `\}`) do not
//! count toward the depth.

/// Bounded recovery window: a command whose braces do not balance within this
/// many lines is reported as unbalanced instead of swallowing the document.
const MAX_COMMAND_LINES: usize = 100;

/// The extent of one command's balanced argument groups
#[derive(Debug, Clone)]
pub(crate) struct CommandExtent {
    /// 0-based line index of the final closing brace
    pub end_line: usize,
    /// Content of each top-level `{...}` group, in order
    pub groups: Vec<String>,
}

/// Scan the argument groups of a command starting on `start_line` at byte
/// offset `start_col` (just past the command name). Consecutive groups may be
/// separated by whitespace, including line breaks. Returns `None` when the
/// braces never balance inside the recovery window or when the next section
/// begins first.
pub(crate) fn scan_groups(
    lines: &[String],
    start_line: usize,
    start_col: usize,
) -> Option<CommandExtent> {
    let mut groups: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut depth: usize = 0;
    let mut seen_group = false;
    let mut end_line = start_line;
    let mut row = start_line;

    while row < lines.len() && row - start_line <= MAX_COMMAND_LINES {
        let line = &lines[row];
        if row > start_line && line.trim_start().starts_with("\\section") {
            return None;
        }

        let slice = if row == start_line {
            &line[start_col.min(line.len())..]
        } else {
            line.as_str()
        };

        if row > start_line && depth > 0 {
            current.push('\n');
        }

        let mut backslashes = 0usize;
        let mut finished = false;
        for ch in slice.chars() {
            if ch == '\\' {
                backslashes += 1;
                if depth > 0 {
                    current.push(ch);
                }
                continue;
            }
            let escaped = backslashes % 2 == 1;
            backslashes = 0;

            if ch == '{' && !escaped {
                depth += 1;
                seen_group = true;
                if depth > 1 {
                    current.push(ch);
                }
            } else if ch == '}' && !escaped {
                if depth == 0 {
                    return None;
                }
                depth -= 1;
                if depth == 0 {
                    groups.push(std::mem::take(&mut current));
                    end_line = row;
                } else {
                    current.push(ch);
                }
            } else if depth > 0 {
                current.push(ch);
            } else if !ch.is_whitespace() {
                if seen_group {
                    finished = true;
                    break;
                }
                return None;
            }
        }

        if finished {
            break;
        }
        if depth == 0 && seen_group {
            // continue only when the next line opens another group
            let next_opens = lines
                .get(row + 1)
                .is_some_and(|l| l.trim_start().starts_with('{'));
            if !next_opens {
                break;
            }
        }
        row += 1;
    }

    if depth == 0 && !groups.is_empty() {
        Some(CommandExtent { end_line, groups })
    } else {
        None
    }
}

/// Whether a node's owned lines still brace-balance (never dipping negative)
pub(crate) fn span_is_balanced(lines: &[String]) -> bool {
    let mut depth: i64 = 0;
    for line in lines {
        let mut backslashes = 0usize;
        for ch in line.chars() {
            if ch == '\\' {
                backslashes += 1;
                continue;
            }
            let escaped = backslashes % 2 == 1;
            backslashes = 0;
            match ch {
                '{' if !escaped => depth += 1,
                '}' if !escaped => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => {}
            }
        }
    }
    depth == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.split('\n').map(str::to_string).collect()
    }

    #[test]
    fn single_group_on_one_line() {
        let lines = lines("\\resumeItem{Built data pipelines}");
        let extent = scan_groups(&lines, 0, "\\resumeItem".len()).unwrap();
        assert_eq!(extent.end_line, 0);
        assert_eq!(extent.groups, vec!["Built data pipelines"]);
    }

    #[test]
    fn nested_braces_stay_inside_the_group() {
        let lines = lines("\\resumeItem{Used \\textbf{Python} daily}");
        let extent = scan_groups(&lines, 0, "\\resumeItem".len()).unwrap();
        assert_eq!(extent.groups, vec!["Used \\textbf{Python} daily"]);
    }

    #[test]
    fn group_spanning_multiple_lines() {
        let lines = lines("\\resumeItem{Built pipelines\n    across three teams}");
        let extent = scan_groups(&lines, 0, "\\resumeItem".len()).unwrap();
        assert_eq!(extent.end_line, 1);
        assert_eq!(extent.groups.len(), 1);
        assert!(extent.groups[0].contains("three teams"));
    }

    #[test]
    fn multiple_groups_are_collected_in_order() {
        let lines = lines("\\resumeSubheading{Engineer}{TekLink}{2024}{Remote}");
        let extent = scan_groups(&lines, 0, "\\resumeSubheading".len()).unwrap();
        assert_eq!(extent.groups, vec!["Engineer", "TekLink", "2024", "Remote"]);
    }

    #[test]
    fn groups_may_continue_on_the_next_line() {
        let lines = lines("\\resumeSubheading{Engineer}{TekLink}\n{2024}{Remote}");
        let extent = scan_groups(&lines, 0, "\\resumeSubheading".len()).unwrap();
        assert_eq!(extent.end_line, 1);
        assert_eq!(extent.groups.len(), 4);
    }

    #[test]
    fn escaped_braces_do_not_close_the_group() {
        let lines = lines("\\resumeItem{50\\% uplift in \\{metrics\\}}");
        let extent = scan_groups(&lines, 0, "\\resumeItem".len()).unwrap();
        assert_eq!(extent.groups, vec!["50\\% uplift in \\{metrics\\}"]);
    }

    #[test]
    fn unbalanced_group_is_rejected() {
        let lines = lines("\\resumeItem{never closed");
        assert!(scan_groups(&lines, 0, "\\resumeItem".len()).is_none());
    }

    #[test]
    fn scan_stops_at_the_next_section() {
        let lines = lines("\\resumeItem{never closed\n\\section{Skills}");
        assert!(scan_groups(&lines, 0, "\\resumeItem".len()).is_none());
    }

    #[test]
    fn trailing_text_after_last_group_ends_the_scan() {
        let lines = lines("\\textbf{Cloud}{: AWS, GCP} \\\\");
        let extent = scan_groups(&lines, 0, "\\textbf".len()).unwrap();
        assert_eq!(extent.end_line, 0);
        assert_eq!(extent.groups, vec!["Cloud", ": AWS, GCP"]);
    }

    #[test]
    fn balanced_span_check() {
        assert!(span_is_balanced(&lines("\\resumeItem{a {b} c}")));
        assert!(!span_is_balanced(&lines("\\resumeItem{a {b c}")));
        assert!(!span_is_balanced(&lines("} stray close {")));
        assert!(span_is_balanced(&lines("no braces at all")));
        assert!(span_is_balanced(&lines("escaped \\{ only \\}")));
    }
}
