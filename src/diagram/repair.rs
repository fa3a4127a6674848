// src/diagram/repair.rs
//
// Deterministic syntax repair for generated Mermaid diagrams. Generation
// output is not guaranteed well-formed, so the known failure modes (doubled
// pipes, unescaped braces, missing trailing slash, missing header) are
// rewritten line by line. This is naive text rewriting, not diagram parsing:
// it guarantees syntactic recoverability, not graph well-formedness.

/// Repair a single diagram line
pub fn repair_line(line: &str) -> String {
    // Collapse doubled edge-label delimiters until none remain
    let mut line = line.to_string();
    while line.contains("||") {
        line = line.replace("||", "|");
    }

    // Curly braces break mermaid node labels; the prompt asks for apostrophes
    // but re-apply the substitution in case the model did not comply
    let mut line = line.replace('{', "'").replace('}', "'");

    // Every edge line must name a path terminated by a slash
    if line.contains("-->") && !line.trim_end().ends_with('/') {
        line = format!("{}/", line.trim_end());
    }

    line
}

/// Repair every line of a diagram and separate the header from the body
pub fn repair(diagram: &str) -> String {
    let mut lines: Vec<String> = diagram.lines().map(repair_line).collect();

    // Mermaid expects a blank line between `graph TD` and the first node
    if lines.len() > 1 && lines[0].starts_with("graph TD") && !lines[1].is_empty() {
        lines.insert(1, String::new());
    }

    lines.join("\n")
}

/// Strip surrounding whitespace and an optional ```mermaid code fence
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```mermaid") {
        text = rest.trim_start();
    }
    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest.trim_end();
    }
    text
}

/// Normalize a raw provider response into the strict diagram grammar
pub fn normalize(raw: &str) -> String {
    let text = strip_code_fence(raw);

    let text = if text.starts_with("graph TD") {
        text.to_string()
    } else {
        format!("graph TD\n{}", text)
    };

    repair(&text)
}
