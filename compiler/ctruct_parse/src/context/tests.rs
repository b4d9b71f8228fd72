use super::*;

#[test]
fn test_default_allows_greater() {
    assert!(ParseContext::default().allows_greater());
    assert!(ParseContext::empty().allows_greater());
}

#[test]
fn test_no_greater() {
    let ctx = ParseContext::NO_GREATER | ParseContext::IN_FUNCTION_BODY;
    assert!(!ctx.allows_greater());
    assert!((ctx - ParseContext::NO_GREATER).allows_greater());
    assert!(ctx.contains(ParseContext::IN_FUNCTION_BODY));
}
