//! Solidity parsing boundary.
//!
//! tree-sitter recovers from most malformed input by inserting error nodes,
//! so "unparseable" is defined here as: no tree at all, an all-error root,
//! or an error-carrying tree from which not a single top-level declaration
//! was recovered. Anything better than that is returned as a (possibly
//! partial) tree and analysis proceeds over whatever nodes are present.

use thiserror::Error;
use tree_sitter::{Node, Parser, Tree};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to load Solidity grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    #[error("source could not be parsed")]
    NoTree,

    #[error("no Solidity declarations could be recovered from the source")]
    Unusable,
}

/// A parsed source file. Holds the tree so borrowed nodes stay valid for
/// the duration of one scan.
pub struct ParsedSource {
    tree: Tree,
}

impl ParsedSource {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }
}

const DECLARATION_KINDS: &[&str] = &[
    "pragma_directive",
    "import_directive",
    "contract_declaration",
    "library_declaration",
    "interface_declaration",
];

pub fn parse(source: &str) -> Result<ParsedSource, ParseError> {
    let mut parser = Parser::new();
    let language = tree_sitter_solidity::LANGUAGE.into();
    parser.set_language(&language)?;

    let tree = parser.parse(source, None).ok_or(ParseError::NoTree)?;
    let root = tree.root_node();

    if root.is_error() {
        return Err(ParseError::Unusable);
    }
    if root.has_error() && !has_recovered_declaration(root) {
        return Err(ParseError::Unusable);
    }

    Ok(ParsedSource { tree })
}

fn has_recovered_declaration(root: Node) -> bool {
    let mut cursor = root.walk();
    let found = root
        .named_children(&mut cursor)
        .any(|node| DECLARATION_KINDS.contains(&node.kind()));
    found
}

pub(crate) fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_source_parses() {
        let source = "pragma solidity ^0.8.0;\ncontract Empty {}\n";
        let parsed = parse(source).unwrap();
        assert_eq!(parsed.root().kind(), "source_file");
    }

    #[test]
    fn garbage_source_is_rejected() {
        let source = "¤¤¤ not solidity at all {{{";
        assert!(matches!(parse(source), Err(ParseError::Unusable)));
    }

    #[test]
    fn partial_source_with_recovered_declarations_is_usable() {
        // Trailing garbage after a valid contract still yields a usable tree.
        let source = "pragma solidity ^0.8.0;\ncontract Ok { uint256 total; }\n%%%%";
        assert!(parse(source).is_ok());
    }
}
