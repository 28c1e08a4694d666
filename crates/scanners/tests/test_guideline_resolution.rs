/// Resolver behavior: fallbacks, keyword matching, memoization, timeouts.
use soliscan_scanners::guidelines::{
    GuidelineResolver, ProjectDetail, ProjectDirectory, StaticProjectDirectory,
};
use soliscan_scanners::{Finding, VulnerabilityKind};
use std::sync::Arc;
use std::time::Duration;

fn finding(kind: VulnerabilityKind) -> Finding {
    Finding {
        kind,
        line: Some(3),
        code_snippet: Some("balance = 0;".to_string()),
        why: kind.why().to_string(),
    }
}

fn reentrancy_project() -> ProjectDetail {
    ProjectDetail {
        key: "smart-contract-top-10".to_string(),
        name: "Smart Contract Top 10".to_string(),
        description: "Guidance on reentrancy attacks and state ordering in smart contracts."
            .to_string(),
    }
}

#[tokio::test]
async fn offline_resolver_answers_with_the_static_table() {
    let resolver = GuidelineResolver::offline();
    let findings = vec![
        finding(VulnerabilityKind::Reentrancy),
        finding(VulnerabilityKind::MissingAccessControl),
    ];

    let enriched = resolver.enrich(findings).await;

    assert_eq!(enriched.len(), 2);
    assert_eq!(
        enriched[0].owasp_guideline.as_deref(),
        Some(VulnerabilityKind::Reentrancy.fallback_guideline())
    );
    assert_eq!(
        enriched[1].owasp_guideline.as_deref(),
        Some(VulnerabilityKind::MissingAccessControl.fallback_guideline())
    );
}

#[tokio::test]
async fn matching_project_description_becomes_the_guideline() {
    let directory = Arc::new(StaticProjectDirectory::new(vec![reentrancy_project()]));
    let resolver = GuidelineResolver::new(directory);

    let enriched = resolver
        .enrich(vec![finding(VulnerabilityKind::Reentrancy)])
        .await;

    assert_eq!(enriched.len(), 1);
    assert_eq!(
        enriched[0].owasp_guideline.as_deref(),
        Some("Guidance on reentrancy attacks and state ordering in smart contracts.")
    );
}

#[tokio::test]
async fn unmatched_kinds_fall_back() {
    let directory = Arc::new(StaticProjectDirectory::new(vec![ProjectDetail {
        key: "container-security".to_string(),
        name: "Container Security".to_string(),
        description: "Kubernetes hardening guidance.".to_string(),
    }]));
    let resolver = GuidelineResolver::new(directory);

    let enriched = resolver
        .enrich(vec![finding(VulnerabilityKind::MissingAccessControl)])
        .await;

    assert_eq!(
        enriched[0].owasp_guideline.as_deref(),
        Some(VulnerabilityKind::MissingAccessControl.fallback_guideline())
    );
}

#[tokio::test]
async fn a_kind_is_looked_up_once_per_scan_and_details_are_cached_across_scans() {
    let directory = Arc::new(StaticProjectDirectory::new(vec![reentrancy_project()]));
    let resolver = GuidelineResolver::new(Arc::clone(&directory) as Arc<dyn ProjectDirectory>);

    let findings = vec![
        finding(VulnerabilityKind::Reentrancy),
        finding(VulnerabilityKind::Reentrancy),
    ];
    let enriched = resolver.enrich(findings).await;

    assert_eq!(enriched.len(), 2);
    assert_eq!(directory.list_calls(), 1);
    assert_eq!(
        directory.detail_calls(),
        1,
        "two findings of one kind trigger a single lookup"
    );

    resolver
        .enrich(vec![finding(VulnerabilityKind::Reentrancy)])
        .await;

    assert_eq!(directory.list_calls(), 2, "listing happens per scan");
    assert_eq!(
        directory.detail_calls(),
        1,
        "project details are remembered across scans"
    );
}

#[tokio::test(start_paused = true)]
async fn a_slow_directory_degrades_to_the_static_table() {
    let directory = Arc::new(
        StaticProjectDirectory::new(vec![reentrancy_project()])
            .with_delay(Duration::from_secs(30)),
    );
    let resolver = GuidelineResolver::new(directory);

    let enriched = resolver
        .enrich(vec![finding(VulnerabilityKind::Reentrancy)])
        .await;

    assert_eq!(
        enriched[0].owasp_guideline.as_deref(),
        Some(VulnerabilityKind::Reentrancy.fallback_guideline())
    );
}

#[tokio::test]
async fn no_findings_means_no_lookups() {
    let directory = Arc::new(StaticProjectDirectory::new(vec![reentrancy_project()]));
    let resolver = GuidelineResolver::new(Arc::clone(&directory) as Arc<dyn ProjectDirectory>);

    let enriched = resolver.enrich(Vec::new()).await;

    assert!(enriched.is_empty());
    assert_eq!(directory.list_calls(), 0);
}
