use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SceneError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SceneError::geometry("x")
            .to_string()
            .contains("geometry error:")
    );
    assert!(SceneError::media("x").to_string().contains("media error:"));
    assert!(SceneError::asset("x").to_string().contains("asset error:"));
    assert!(SceneError::timeout("x").to_string().contains("timeout:"));
    assert!(
        SceneError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert_eq!(SceneError::Cancelled.to_string(), "cancelled");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SceneError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn deadline_covers_timeout_and_cancel_only() {
    assert!(SceneError::timeout("shape").is_deadline());
    assert!(SceneError::Cancelled.is_deadline());
    assert!(!SceneError::asset("shape").is_deadline());
}
