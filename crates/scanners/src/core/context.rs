use crate::syntax::{node_text, ParsedSource};
use std::collections::HashSet;
use tree_sitter::Node;

/// How many lines of context surround a finding's anchor line in its
/// snippet.
pub const SNIPPET_RADIUS: usize = 1;

/// Per-scan analysis state: the raw source split into lines, the names of
/// contract-level storage variables, and the declared compiler version
/// constraint. Built once by a forward pass over declaration-level nodes,
/// read-only afterwards, and discarded when the scan ends.
#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    source_lines: Vec<String>,
    state_variables: HashSet<String>,
    pragma_version: Option<String>,
}

impl AnalysisContext {
    /// Single forward pass over top-level declarations. Runs to completion
    /// before any function body is scanned, so every rule sees the full
    /// state-variable set regardless of declaration order in the source.
    pub fn build(parsed: &ParsedSource, source: &str) -> Self {
        let mut context = Self {
            source_lines: split_lines(source),
            state_variables: HashSet::new(),
            pragma_version: None,
        };

        let root = parsed.root();
        let mut cursor = root.walk();
        for node in root.named_children(&mut cursor) {
            match node.kind() {
                "pragma_directive" => context.record_pragma(node, source),
                "contract_declaration" | "library_declaration" | "interface_declaration" => {
                    context.collect_state_variables(node, source);
                }
                _ => {}
            }
        }

        context
    }

    // Only `pragma solidity …` carries a compiler constraint; experimental
    // feature pragmas are skipped. The last directive wins.
    fn record_pragma(&mut self, node: Node, source: &str) {
        let text = node_text(node, source);
        let Some(rest) = text.trim_start().strip_prefix("pragma") else {
            return;
        };
        let rest = rest.trim_start();
        let Some(constraint) = rest.strip_prefix("solidity") else {
            return;
        };
        if constraint
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            return;
        }
        let constraint = constraint.trim().trim_end_matches(';').trim();
        if !constraint.is_empty() {
            self.pragma_version = Some(constraint.to_string());
        }
    }

    fn collect_state_variables(&mut self, declaration: Node, source: &str) {
        let mut cursor = declaration.walk();
        let Some(body) = declaration
            .named_children(&mut cursor)
            .find(|n| n.kind() == "contract_body")
        else {
            return;
        };

        let mut body_cursor = body.walk();
        for member in body.named_children(&mut body_cursor) {
            if member.kind() != "state_variable_declaration" {
                continue;
            }
            if let Some(name) = member.child_by_field_name("name") {
                let name = node_text(name, source);
                if !name.is_empty() {
                    self.state_variables.insert(name.to_string());
                }
            }
        }
    }

    pub fn is_state_variable(&self, name: &str) -> bool {
        self.state_variables.contains(name)
    }

    pub fn state_variables(&self) -> &HashSet<String> {
        &self.state_variables
    }

    pub fn pragma_version(&self) -> Option<&str> {
        self.pragma_version.as_deref()
    }

    pub fn source_lines(&self) -> &[String] {
        &self.source_lines
    }

    /// The snippet window around a 1-based source line: the line itself plus
    /// `SNIPPET_RADIUS` lines either side, clipped to the file, joined with
    /// newlines. Lines outside the file yield no snippet.
    pub fn snippet(&self, line: usize) -> Option<String> {
        if line == 0 || line > self.source_lines.len() {
            return None;
        }
        let index = line - 1;
        let start = index.saturating_sub(SNIPPET_RADIUS);
        let end = (index + SNIPPET_RADIUS).min(self.source_lines.len() - 1);
        Some(self.source_lines[start..=end].join("\n"))
    }
}

fn split_lines(source: &str) -> Vec<String> {
    source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}
