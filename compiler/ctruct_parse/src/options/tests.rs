use super::*;

#[test]
fn test_defaults_are_unlimited() {
    let options = ParseOptions::default();
    assert!(!options.is_cancelled());
    assert!(!options.error_limit_reached(usize::MAX - 1));
}

#[test]
fn test_max_errors() {
    let options = ParseOptions::new().with_max_errors(2);
    assert!(!options.error_limit_reached(1));
    assert!(options.error_limit_reached(2));
}

#[test]
fn test_cancellation_is_shared() {
    let token = CancellationToken::new();
    let options = ParseOptions::new().with_cancellation(token.clone());
    assert!(!options.is_cancelled());
    token.cancel();
    assert!(options.is_cancelled());
}
