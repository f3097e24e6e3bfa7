use mono_release::boundary::BoundaryWarning;
use mono_release::domain::prerelease::validate_tag;
use mono_release::ui;

// ============================================================================
// BoundaryWarning Display Tests
// ============================================================================

#[test]
fn test_boundary_warning_no_new_commits_display() {
    let warning = BoundaryWarning::NoNewCommits {
        since: "v1.0.0".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("No new commits"),
        "Message should contain 'No new commits', got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("v1.0.0"),
        "Message should contain tag 'v1.0.0', got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_reference_not_in_history_display() {
    let warning = BoundaryWarning::ReferenceNotInHistory {
        reference: "release/2.x".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("release/2.x"),
        "Message should contain the reference, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("not part of the current history"),
        "Message should explain the problem, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_no_previous_tag_display() {
    let display_msg = BoundaryWarning::NoPreviousTag.to_string();
    assert!(
        display_msg.contains("full history"),
        "Message should mention the full history, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_self_dependency_display() {
    let warning = BoundaryWarning::SelfDependency {
        workspace: "package-a".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(display_msg.contains("package-a"));
    assert!(display_msg.contains("depends on itself"));
}

#[test]
fn test_display_boundary_warning_does_not_panic() {
    // Output goes to stderr
    ui::display_boundary_warning(&BoundaryWarning::NoImpactingCommits { commit_count: 4 });
}

// ============================================================================
// Pre-release tag validation
// ============================================================================

#[test]
fn test_validate_tag_accepts_identifiers() {
    assert!(validate_tag("alpha").is_ok());
    assert!(validate_tag("rc-1").is_ok());
    assert!(validate_tag("next2").is_ok());
}

#[test]
fn test_validate_tag_rejects_invalid() {
    assert!(validate_tag("").is_err());
    assert!(validate_tag("al pha").is_err());
    assert!(validate_tag("beta.1").is_err());
    assert!(validate_tag("ünïcode").is_err());
}
