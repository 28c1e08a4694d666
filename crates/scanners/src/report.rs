use crate::core::EnrichedFinding;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Safe,
    Unsafe,
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "safe"),
            Self::Unsafe => write!(f, "unsafe"),
        }
    }
}

/// The caller-facing result of one scan: enriched findings plus an overall
/// verdict. No findings means safe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub vulnerabilities: Vec<EnrichedFinding>,
    pub status: ScanStatus,
}

impl ScanReport {
    pub fn new(vulnerabilities: Vec<EnrichedFinding>) -> Self {
        let status = if vulnerabilities.is_empty() {
            ScanStatus::Safe
        } else {
            ScanStatus::Unsafe
        };
        Self {
            vulnerabilities,
            status,
        }
    }

    pub fn is_safe(&self) -> bool {
        self.status == ScanStatus::Safe
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_markdown(&self) -> String {
        let mut md = String::from("# Scan Report\n\n");
        md.push_str(&format!("**Status:** {}\n\n", self.status));

        if self.vulnerabilities.is_empty() {
            md.push_str("No vulnerabilities detected.\n");
            return md;
        }

        md.push_str("## Findings\n\n");
        for enriched in &self.vulnerabilities {
            let finding = &enriched.finding;
            md.push_str(&format!("### {}\n\n", finding.kind));
            if let Some(line) = finding.line {
                md.push_str(&format!("**Line:** {line}\n"));
            }
            md.push_str(&format!("**Why:** {}\n\n", finding.why));
            if let Some(ref snippet) = finding.code_snippet {
                md.push_str(&format!("```solidity\n{snippet}\n```\n\n"));
            }
            if let Some(ref guideline) = enriched.owasp_guideline {
                md.push_str(&format!("**Guideline:** {guideline}\n\n"));
            }
        }

        md
    }
}
