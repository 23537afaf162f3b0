//! Example showing a full edit session against the FFI interface
//! (TailorDocument)
//!
//! This demonstrates the cross-platform interface that would be used
//! from Swift, Kotlin, Python, etc.

use tailor::ffi::{FfiEditAction, FfiEditRequest, TailorDocument, escape_latex_text};

fn main() {
    println!("=== TailorDocument FFI Example ===\n");

    let doc = TailorDocument::new();
    println!("✓ Created new TailorDocument");

    let resume = r"\documentclass{article}
\begin{document}

\section{Work Experience}
  \resumeSubheading{Data Engineer}{TekLink International (HGS)}{Jan 2024}{Remote}
  \resumeItemListStart
    \resumeItem{Built data pipelines}
    \resumeItem{Deployed ML models}
  \resumeItemListEnd

\section{Skills}
  \textbf{Languages}{: Python, SQL} \\
  \textbf{Cloud}{: AWS, Azure} \\

\end{document}";

    match doc.parse(resume) {
        Ok(node_count) => {
            println!("✓ Parsed resume into {node_count} nodes\n");
        }
        Err(e) => {
            eprintln!("Error parsing: {e}");
            return;
        }
    }

    // The outline is what a suggestion source sees
    println!("{}\n", doc.outline_text().unwrap());

    // Pick targets by identifier from the outline
    let outline = doc.outline().unwrap();
    let first_item = outline
        .iter()
        .find(|n| n.text.contains("Built data pipelines"))
        .unwrap();
    let second_item = outline
        .iter()
        .find(|n| n.text.contains("Deployed ML models"))
        .unwrap();

    // Escape a plain-prose suggestion before it enters the document
    let suggestion = escape_latex_text(
        "Built ETL data pipelines using Azure Data Factory & Python".to_string(),
    );

    let outcomes = doc
        .apply_edits(vec![
            FfiEditRequest {
                target_id: Some(first_item.id.clone()),
                target_line: None,
                action: FfiEditAction::Modify,
                text: Some(suggestion),
            },
            FfiEditRequest {
                target_id: Some(second_item.id.clone()),
                target_line: None,
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

    // Identifiers are invalidated by mutation; re-parse mints a fresh set
    println!("\nParsed after edits: {}", doc.is_parsed());
    let node_count = doc.reparse().unwrap();
    println!("✓ Re-parsed into {node_count} nodes");

    println!("\n=== Final document ===\n{}", doc.render().unwrap());
}
