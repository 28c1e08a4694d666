/// Tests for low-level call detection.
use soliscan_scanners::{DetectionEngine, Finding, VulnerabilityKind};

fn call_findings(source: &str) -> Vec<Finding> {
    DetectionEngine::new()
        .analyze(source)
        .into_iter()
        .filter(|f| f.kind == VulnerabilityKind::LowLevelCallUsage)
        .collect()
}

#[test]
fn raw_call_family_is_flagged_per_site() {
    const TEST_CONTRACT: &str = r#"
pragma solidity ^0.8.0;

contract Forwarder {
    function forward(address target, bytes memory data) public {
        target.call(data);
        target.delegatecall(data);
        target.staticcall(data);
    }
}
"#;

    let findings = call_findings(TEST_CONTRACT);
    let lines: Vec<Option<usize>> = findings.iter().map(|f| f.line).collect();
    assert_eq!(lines, vec![Some(6), Some(7), Some(8)]);
}

#[test]
fn send_is_flagged_but_transfer_is_not() {
    const TEST_CONTRACT: &str = r#"
pragma solidity ^0.8.0;

contract Payments {
    function pay(address payable who, uint256 amount) public {
        who.transfer(amount);
        who.send(amount);
    }
}
"#;

    let findings = call_findings(TEST_CONTRACT);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].line, Some(7));
}

#[test]
fn erc20_style_transfer_from_is_not_flagged() {
    const TEST_CONTRACT: &str = r#"
pragma solidity ^0.8.0;

contract TokenMover {
    IERC20 token;

    function move(address from, address to, uint256 amount) public {
        token.transferFrom(from, to, amount);
    }
}
"#;

    assert!(call_findings(TEST_CONTRACT).is_empty());
}

#[test]
fn calls_inside_constructors_are_flagged() {
    const TEST_CONTRACT: &str = r#"
pragma solidity ^0.8.0;

contract Bootstrapper {
    constructor(address target) {
        target.call("");
    }
}
"#;

    let findings = call_findings(TEST_CONTRACT);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].line, Some(6));
}
