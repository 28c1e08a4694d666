/// Tests for version-aware arithmetic detection.
use soliscan_scanners::{DetectionEngine, Finding, VulnerabilityKind};

fn arithmetic_findings(source: &str) -> Vec<Finding> {
    DetectionEngine::new()
        .analyze(source)
        .into_iter()
        .filter(|f| f.kind == VulnerabilityKind::UncheckedArithmetic)
        .collect()
}

#[test]
fn pre_0_8_arithmetic_without_safemath_is_flagged() {
    const TEST_CONTRACT: &str = r#"
pragma solidity ^0.7.6;

contract LegacyToken {
    uint256 balance;

    function credit(uint256 amount) public {
        balance = balance + amount;
    }
}
"#;

    let findings = arithmetic_findings(TEST_CONTRACT);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].line, Some(8));
    assert!(findings[0]
        .code_snippet
        .as_deref()
        .unwrap()
        .contains("balance = balance + amount;"));
}

#[test]
fn a_safemath_directive_anywhere_in_the_file_suppresses_the_rule() {
    const TEST_CONTRACT: &str = r#"
pragma solidity ^0.7.6;

contract Helper {
    using SafeMath for uint256;
}

contract LegacyToken {
    uint256 balance;

    function credit(uint256 amount) public {
        balance = balance + amount;
    }
}
"#;

    assert!(
        arithmetic_findings(TEST_CONTRACT).is_empty(),
        "one directive silences the rule for every function in the file"
    );
}

#[test]
fn built_in_overflow_checks_silence_the_rule() {
    const TEST_CONTRACT: &str = r#"
pragma solidity ^0.8.10;

contract ModernToken {
    uint256 balance;

    function credit(uint256 amount) public {
        balance = balance + amount;
    }
}
"#;

    assert!(arithmetic_findings(TEST_CONTRACT).is_empty());
}

#[test]
fn a_missing_pragma_is_treated_as_unprotected() {
    const TEST_CONTRACT: &str = r#"
contract VersionlessToken {
    uint256 balance;

    function credit(uint256 amount) public {
        balance = balance + amount;
    }
}
"#;

    let findings = arithmetic_findings(TEST_CONTRACT);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].line, Some(5));
}

#[test]
fn each_arithmetic_site_is_reported() {
    const TEST_CONTRACT: &str = r#"
pragma solidity ^0.6.12;

contract Calculator {
    uint256 total;

    function mix(uint256 a, uint256 b) public {
        total = a * b;
        total = total - a;
    }
}
"#;

    let findings = arithmetic_findings(TEST_CONTRACT);
    let lines: Vec<Option<usize>> = findings.iter().map(|f| f.line).collect();
    assert_eq!(lines, vec![Some(8), Some(9)]);
}
