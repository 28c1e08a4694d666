use crate::core::context::AnalysisContext;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of vulnerability classes the engine reports.
///
/// Each kind carries its fixed rationale text and the lookup metadata the
/// guideline resolver needs, so a finding's `why` is a function of its kind
/// alone (the parser-error path is the one exception, embedding the parser
/// message).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VulnerabilityKind {
    Reentrancy,
    #[serde(rename = "Low-Level Call Usage")]
    LowLevelCallUsage,
    #[serde(rename = "Missing Access Control")]
    MissingAccessControl,
    #[serde(rename = "Unchecked Arithmetic")]
    UncheckedArithmetic,
    #[serde(rename = "Parser Error")]
    ParserError,
}

impl VulnerabilityKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Reentrancy => "Reentrancy",
            Self::LowLevelCallUsage => "Low-Level Call Usage",
            Self::MissingAccessControl => "Missing Access Control",
            Self::UncheckedArithmetic => "Unchecked Arithmetic",
            Self::ParserError => "Parser Error",
        }
    }

    pub fn why(&self) -> &'static str {
        match self {
            Self::Reentrancy => {
                "State changes after external calls may be re-entered by malicious contracts."
            }
            Self::LowLevelCallUsage => {
                "Low-level calls (`call`, `delegatecall`, `send`) bypass Solidity safety checks and require manual handling."
            }
            Self::MissingAccessControl => {
                "Public or external function lacks `onlyOwner`/`onlyRole` style access control checks."
            }
            Self::UncheckedArithmetic => {
                "Arithmetic operations in Solidity <0.8 can overflow without SafeMath or explicit checks."
            }
            Self::ParserError => "Source could not be parsed.",
        }
    }

    /// Search terms used when matching this kind against knowledge-base
    /// project descriptions.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Reentrancy => &["reentrancy", "smart contract", "blockchain", "re-entrancy"],
            Self::LowLevelCallUsage => &["low level call", "solidity", "call()", "delegatecall"],
            Self::MissingAccessControl => &["access control", "authorization", "least privilege"],
            Self::UncheckedArithmetic => &["integer overflow", "safemath", "arithmetic", "overflow"],
            Self::ParserError => &["smart contract", "secure coding", "linting"],
        }
    }

    /// Deterministic guideline text used whenever the remote lookup is
    /// unavailable, errors, or times out.
    pub fn fallback_guideline(&self) -> &'static str {
        match self {
            Self::Reentrancy => {
                "Review OWASP Smart Contract Reentrancy guidance: prioritize state updates before external calls and implement reentrancy guards."
            }
            Self::LowLevelCallUsage => {
                "OWASP recommends wrapping low-level calls with strict success checks and prefer high-level interfaces over `.call()`."
            }
            Self::MissingAccessControl => {
                "Enforce least privilege per OWASP access control guidelines. Ensure all state-changing functions validate authorized callers."
            }
            Self::UncheckedArithmetic => {
                "Apply OWASP integer overflow mitigations: use Solidity >=0.8.0 or SafeMath libraries for arithmetic operations."
            }
            Self::ParserError => {
                "OWASP secure coding practices recommend validating compiler compatibility and linting contracts before analysis."
            }
        }
    }
}

impl fmt::Display for VulnerabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(rename = "name")]
    pub kind: VulnerabilityKind,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub line: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub code_snippet: Option<String>,

    pub why: String,
}

impl Finding {
    /// A finding anchored at a source line, with its snippet drawn from the
    /// scanned source.
    pub fn located(kind: VulnerabilityKind, line: usize, context: &AnalysisContext) -> Self {
        Self {
            kind,
            line: Some(line),
            code_snippet: context.snippet(line),
            why: kind.why().to_string(),
        }
    }

    /// The synthetic finding returned when the source cannot be parsed.
    /// Carries no location and embeds the parser's message.
    pub fn parser_error(message: impl fmt::Display) -> Self {
        Self {
            kind: VulnerabilityKind::ParserError,
            line: None,
            code_snippet: None,
            why: format!("Parsing error: {message}"),
        }
    }

    pub fn dedup_key(&self) -> String {
        let line = self
            .line
            .map(|l| l.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        format!(
            "{}:{}:{}",
            self.kind.name(),
            line,
            self.code_snippet.as_deref().unwrap_or("")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedFinding {
    #[serde(flatten)]
    pub finding: Finding,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub owasp_guideline: Option<String>,
}

impl EnrichedFinding {
    pub fn new(finding: Finding, guideline: String) -> Self {
        Self {
            finding,
            owasp_guideline: Some(guideline),
        }
    }

    pub fn with_static_guideline(finding: Finding) -> Self {
        let guideline = finding.kind.fallback_guideline().to_string();
        Self::new(finding, guideline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_round_trip_through_serde() {
        for kind in [
            VulnerabilityKind::Reentrancy,
            VulnerabilityKind::LowLevelCallUsage,
            VulnerabilityKind::MissingAccessControl,
            VulnerabilityKind::UncheckedArithmetic,
            VulnerabilityKind::ParserError,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
            let parsed: VulnerabilityKind = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn unlocated_findings_use_the_unknown_key() {
        let finding = Finding::parser_error("unexpected end of input");
        assert!(finding.line.is_none());
        assert!(finding.code_snippet.is_none());
        assert!(finding.why.starts_with("Parsing error: "));
        assert_eq!(finding.dedup_key(), "Parser Error:unknown:");
    }

    #[test]
    fn serialized_finding_uses_wire_field_names() {
        let finding = Finding {
            kind: VulnerabilityKind::Reentrancy,
            line: Some(12),
            code_snippet: Some("balance = 0;".to_string()),
            why: VulnerabilityKind::Reentrancy.why().to_string(),
        };
        let value = serde_json::to_value(&finding).unwrap();
        assert_eq!(value["name"], "Reentrancy");
        assert_eq!(value["line"], 12);
        assert_eq!(value["code_snippet"], "balance = 0;");
        assert!(value["why"].is_string());
    }
}
