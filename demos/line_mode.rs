//! Example showing the line-number fallback mode
//!
//! When a document does not follow the structural conventions, it can still
//! be edited by 1-based line number against a numbered listing.

use tailor::ffi::{FfiEditAction, FfiEditRequest, TailorDocument};

fn main() {
    println!("=== Line-Number Fallback Example ===\n");

    let doc = TailorDocument::new();

    // A hand-rolled template with no \resumeItem / \resumeSubheading markers
    let resume = r"\documentclass{article}
\begin{document}
\textbf{Jane Doe} \\
Data Engineer \\
Python, SQL, AWS
\end{document}";

    doc.load_plain(resume);
    println!("✓ Loaded {} lines in plain mode", doc.line_count());
    println!("Parsed: {}\n", doc.is_parsed());

    // The numbered listing is what a suggestion source sees in this mode
    println!("{}\n", doc.numbered_text().unwrap());

    let outcomes = doc
        .apply_edits(vec![
            FfiEditRequest {
                target_id: None,
                target_line: Some(5),
                action: FfiEditAction::Modify,
                text: Some(r"Python, SQL, AWS, Azure Data Factory".to_string()),
            },
            FfiEditRequest {
                target_id: None,
                target_line: Some(4),
                action: FfiEditAction::InsertAfter,
                text: Some(r"5 years of experience \\".to_string()),
            },
            FfiEditRequest {
                target_id: None,
                target_line: Some(99),
                action: FfiEditAction::Remove,
                text: None,
            },
        ])
        .unwrap();

    for outcome in &outcomes {
        if outcome.applied {
            println!("✓ Applied edit to {}", outcome.target);
        } else {
            println!(
                "✗ Rejected edit to {}: {}",
                outcome.target,
                outcome.reason.as_deref().unwrap_or("unknown")
            );
        }
    }

    println!("\n=== Final document ===\n{}", doc.render().unwrap());
}
