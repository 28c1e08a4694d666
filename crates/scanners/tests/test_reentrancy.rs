/// Tests for the line-order reentrancy heuristic.
use soliscan_scanners::{DetectionEngine, Finding, VulnerabilityKind};

fn findings_of_kind(source: &str, kind: VulnerabilityKind) -> Vec<Finding> {
    DetectionEngine::new()
        .analyze(source)
        .into_iter()
        .filter(|f| f.kind == kind)
        .collect()
}

#[test]
fn call_followed_by_state_assignment_is_flagged_at_the_assignment() {
    const TEST_CONTRACT: &str = r#"
pragma solidity ^0.8.0;

contract Vault {
    uint256 public totalDeposits;

    function flush(address payable target, uint256 amount) public {
        target.call{value: amount}("");
        totalDeposits = 0;
    }
}
"#;

    let findings = findings_of_kind(TEST_CONTRACT, VulnerabilityKind::Reentrancy);
    assert_eq!(findings.len(), 1, "expected exactly one reentrancy finding");

    let finding = &findings[0];
    assert_eq!(finding.line, Some(9));

    let snippet = finding.code_snippet.as_deref().unwrap();
    assert!(snippet.contains("totalDeposits = 0;"));
    assert!(snippet.contains("target.call"));
}

#[test]
fn call_without_a_later_assignment_is_not_flagged() {
    const TEST_CONTRACT: &str = r#"
pragma solidity ^0.8.0;

contract Vault {
    uint256 public totalDeposits;

    function flush(address payable target, uint256 amount) public {
        totalDeposits = 0;
        target.call{value: amount}("");
    }
}
"#;

    let findings = findings_of_kind(TEST_CONTRACT, VulnerabilityKind::Reentrancy);
    assert!(
        findings.is_empty(),
        "state update before the call follows checks-effects-interactions"
    );
}

#[test]
fn multiple_calls_reporting_the_same_assignment_collapse_to_one() {
    const TEST_CONTRACT: &str = r#"
pragma solidity ^0.8.0;

contract Splitter {
    uint256 public pending;

    function drain(address payable a, address payable b) public {
        a.call{value: 1}("");
        b.call{value: 1}("");
        pending = 0;
    }
}
"#;

    let findings = findings_of_kind(TEST_CONTRACT, VulnerabilityKind::Reentrancy);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].line, Some(10));
}

#[test]
fn assignments_in_other_functions_do_not_pair_with_the_call() {
    const TEST_CONTRACT: &str = r#"
pragma solidity ^0.8.0;

contract Ledger {
    uint256 public balance;

    function ping(address payable target) public {
        target.call("");
    }

    function settle() public {
        balance = 0;
    }
}
"#;

    let findings = findings_of_kind(TEST_CONTRACT, VulnerabilityKind::Reentrancy);
    assert!(findings.is_empty(), "site lists are per function");
}

#[test]
fn indexed_balance_writes_are_not_treated_as_state_assignments() {
    const TEST_CONTRACT: &str = r#"
pragma solidity ^0.8.0;

contract Bank {
    mapping(address => uint256) public balances;

    function withdraw(uint256 amount) public {
        msg.sender.call{value: amount}("");
        balances[msg.sender] = 0;
    }
}
"#;

    let findings = findings_of_kind(TEST_CONTRACT, VulnerabilityKind::Reentrancy);
    assert!(
        findings.is_empty(),
        "indexed left-hand sides are out of scope for assignment resolution"
    );
}
