//! Escaping of LaTeX special characters in suggestion text
//!
//! Suggestion sources produce plain prose; any LaTeX-significant character in
//! it must be escaped before the text is spliced into the document, or the
//! result stops compiling. Escaping runs in a single pass so an inserted
//! backslash is never re-escaped.

/// Escape LaTeX special characters in plain text
#[must_use]
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\textbackslash{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '%' => out.push_str("\\%"),
            '$' => out.push_str("\\$"),
            '#' => out.push_str("\\#"),
            '_' => out.push_str("\\_"),
            '&' => out.push_str("\\&"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_common_specials() {
        assert_eq!(
            escape_latex("50% of R&D on S3_bucket #4"),
            "50\\% of R\\&D on S3\\_bucket \\#4"
        );
    }

    #[test]
    fn escapes_braces_and_dollar() {
        assert_eq!(escape_latex("{a} costs $5"), "\\{a\\} costs \\$5");
    }

    #[test]
    fn backslash_is_not_double_escaped() {
        assert_eq!(escape_latex("a\\b"), "a\\textbackslash{}b");
    }

    #[test]
    fn tilde_and_caret_use_text_commands() {
        assert_eq!(
            escape_latex("~5x faster^2"),
            "\\textasciitilde{}5x faster\\textasciicircum{}2"
        );
    }

    #[test]
    fn plain_text_is_unchanged() {
        let text = "Built ETL data pipelines using Azure Data Factory and Python";
        assert_eq!(escape_latex(text), text);
    }
}
