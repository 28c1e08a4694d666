use crate::core::context::AnalysisContext;
use crate::syntax::{node_text, ParsedSource};
use tree_sitter::Node;

/// Member names treated as low-level calls. `transfer`/`transferFrom` are
/// excluded: at the syntax level they are indistinguishable from ERC-20
/// interface methods.
pub const LOW_LEVEL_CALLS: &[&str] = &["call", "delegatecall", "callcode", "staticcall", "send"];

const ARITHMETIC_OPERATORS: &[&str] = &["+", "-", "*", "/"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    External,
    Internal,
    Private,
    /// No visibility keyword present. Treated as public-facing.
    Default,
}

impl Visibility {
    pub fn is_public_facing(&self) -> bool {
        matches!(self, Self::Public | Self::External | Self::Default)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    Pure,
    View,
    Payable,
    Nonpayable,
}

/// Everything the rule detectors need to know about one function
/// declaration: its metadata, and the three ordered site lists collected in
/// a single traversal of its body. Lines are 1-based source lines.
#[derive(Debug, Clone)]
pub struct FunctionScan {
    pub name: Option<String>,
    pub line: usize,
    pub is_constructor: bool,
    pub visibility: Visibility,
    pub mutability: Mutability,
    pub modifiers: Vec<String>,
    pub has_body: bool,
    /// Lines of assignments whose target resolves to a state variable.
    pub state_assignments: Vec<usize>,
    /// Lines of member accesses naming a low-level call.
    pub external_calls: Vec<usize>,
    /// Lines of `+ - * /` binary operations.
    pub arithmetic_sites: Vec<usize>,
}

/// Walks every function-like declaration in source order and collects one
/// `FunctionScan` per declaration. Runs after the context pass, so the
/// state-variable set is complete before any body is visited.
pub fn scan_functions(
    parsed: &ParsedSource,
    context: &AnalysisContext,
    source: &str,
) -> Vec<FunctionScan> {
    let mut scans = Vec::new();

    let root = parsed.root();
    let mut cursor = root.walk();
    for declaration in root.named_children(&mut cursor) {
        // Free functions (file level) are scanned like members.
        if declaration.kind() == "function_definition" {
            scans.push(scan_function(declaration, context, source));
            continue;
        }
        if !matches!(
            declaration.kind(),
            "contract_declaration" | "library_declaration" | "interface_declaration"
        ) {
            continue;
        }

        let mut decl_cursor = declaration.walk();
        let Some(body) = declaration
            .named_children(&mut decl_cursor)
            .find(|n| n.kind() == "contract_body")
        else {
            continue;
        };

        let mut body_cursor = body.walk();
        for member in body.named_children(&mut body_cursor) {
            match member.kind() {
                "function_definition" | "constructor_definition" | "fallback_receive_definition" => {
                    scans.push(scan_function(member, context, source));
                }
                _ => {}
            }
        }
    }

    scans
}

fn scan_function(declaration: Node, context: &AnalysisContext, source: &str) -> FunctionScan {
    let name = declaration
        .child_by_field_name("name")
        .map(|n| node_text(n, source).to_string())
        .filter(|n| !n.is_empty());

    let mut visibility = Visibility::Default;
    let mut mutability = Mutability::Nonpayable;
    let mut modifiers = Vec::new();

    let mut cursor = declaration.walk();
    for child in declaration.named_children(&mut cursor) {
        match child.kind() {
            "visibility" => {
                visibility = match node_text(child, source) {
                    "public" => Visibility::Public,
                    "external" => Visibility::External,
                    "internal" => Visibility::Internal,
                    "private" => Visibility::Private,
                    _ => visibility,
                };
            }
            "state_mutability" => {
                mutability = match node_text(child, source) {
                    "pure" => Mutability::Pure,
                    "view" | "constant" => Mutability::View,
                    "payable" => Mutability::Payable,
                    _ => mutability,
                };
            }
            "modifier_invocation" => {
                let text = node_text(child, source);
                let name = text.split('(').next().unwrap_or(text).trim();
                if !name.is_empty() {
                    modifiers.push(name.to_string());
                }
            }
            _ => {}
        }
    }

    let body = declaration.child_by_field_name("body").or_else(|| {
        let mut cursor = declaration.walk();
        let found = declaration
            .named_children(&mut cursor)
            .find(|n| n.kind() == "function_body");
        found
    });

    let mut scan = FunctionScan {
        name,
        line: declaration.start_position().row + 1,
        is_constructor: declaration.kind() == "constructor_definition",
        visibility,
        mutability,
        modifiers,
        has_body: body.is_some(),
        state_assignments: Vec::new(),
        external_calls: Vec::new(),
        arithmetic_sites: Vec::new(),
    };

    if let Some(body) = body {
        collect_sites(body, &mut scan, context, source);
    }

    scan
}

// One top-down, left-to-right traversal of the body. All three site lists
// are filled here so later rules never touch the tree.
fn collect_sites(node: Node, scan: &mut FunctionScan, context: &AnalysisContext, source: &str) {
    match node.kind() {
        "expression_statement" => {
            if let Some(inner) = node.named_child(0).map(unwrap_expression) {
                if matches!(
                    inner.kind(),
                    "assignment_expression" | "augmented_assignment_expression"
                ) {
                    if let Some(line) = state_assignment_line(inner, context, source) {
                        scan.state_assignments.push(line);
                    }
                }
            }
        }
        "member_expression" => {
            if let Some(property) = node.child_by_field_name("property") {
                if LOW_LEVEL_CALLS.contains(&node_text(property, source)) {
                    scan.external_calls.push(node.start_position().row + 1);
                }
            }
        }
        "binary_expression" => {
            if let Some(operator) = node.child_by_field_name("operator") {
                if ARITHMETIC_OPERATORS.contains(&node_text(operator, source)) {
                    scan.arithmetic_sites.push(node.start_position().row + 1);
                }
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_sites(child, scan, context, source);
    }
}

/// An assignment writes state only when its target is a bare identifier
/// naming a state variable, or a single-level member access on one.
/// Indexing and deeper chains are deliberately not treated as state writes.
fn state_assignment_line(
    assignment: Node,
    context: &AnalysisContext,
    source: &str,
) -> Option<usize> {
    let left = assignment.child_by_field_name("left").map(unwrap_expression)?;

    let target = match left.kind() {
        "identifier" => node_text(left, source),
        "member_expression" => {
            let object = left.child_by_field_name("object").map(unwrap_expression)?;
            if object.kind() != "identifier" {
                return None;
            }
            node_text(object, source)
        }
        _ => return None,
    };

    context
        .is_state_variable(target)
        .then(|| assignment.start_position().row + 1)
}

// The grammar wraps operands in `expression` (and sometimes parenthesized)
// nodes; descend to the concrete expression underneath.
fn unwrap_expression(node: Node) -> Node {
    let mut current = node;
    while matches!(current.kind(), "expression" | "parenthesized_expression") {
        match current.named_child(0) {
            Some(inner) => current = inner,
            None => break,
        }
    }
    current
}
