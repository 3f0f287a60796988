use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PolyfitError::unsupported_format("x")
            .to_string()
            .contains("unsupported format:")
    );
    assert!(PolyfitError::decode("x").to_string().contains("decode error:"));
    assert!(
        PolyfitError::incomparable("x")
            .to_string()
            .contains("incomparable canvases:")
    );
    assert!(PolyfitError::draw("x").to_string().contains("draw error:"));
    assert!(
        PolyfitError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PolyfitError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PolyfitError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_diff_and_draw_failures_are_per_evaluation() {
    assert!(PolyfitError::incomparable("w").is_per_evaluation());
    assert!(PolyfitError::draw("io").is_per_evaluation());
    assert!(!PolyfitError::decode("missing").is_per_evaluation());
    assert!(!PolyfitError::unsupported_format("luma8").is_per_evaluation());
    assert!(!PolyfitError::validation("size").is_per_evaluation());
}
