use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FramecueError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        FramecueError::timing("x")
            .to_string()
            .contains("timing error:")
    );
    assert!(
        FramecueError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(FramecueError::media("x").to_string().contains("media error:"));
    assert!(
        FramecueError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FramecueError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
