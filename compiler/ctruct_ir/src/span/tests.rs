use super::*;

#[test]
fn test_span_basic() {
    let span = Span::new(10, 20);
    assert_eq!(span.len(), 10);
    assert!(!span.is_empty());
    assert!(span.contains(15));
    assert!(!span.contains(20));
}

#[test]
fn test_span_merge() {
    let a = Span::new(10, 20);
    let b = Span::new(15, 30);
    let merged = a.merge(b);
    assert_eq!(merged, Span::new(10, 30));
    assert!(merged.contains_span(a));
    assert!(merged.contains_span(b));
}

#[test]
fn test_span_point_is_empty() {
    let span = Span::point(7);
    assert!(span.is_empty());
    assert_eq!(span.to_range(), 7..7);
}

#[test]
fn test_span_try_from_range_success() {
    let Ok(span) = Span::try_from_range(50..100) else {
        panic!("expected Ok for valid range");
    };
    assert_eq!(span, Span::new(50, 100));
}

#[test]
fn test_span_try_from_range_start_too_large() {
    let large_start = u32::MAX as usize + 1;
    let result = Span::try_from_range(large_start..large_start + 10);
    assert!(matches!(result, Err(SpanError::StartTooLarge(_))));
}

#[test]
fn test_span_try_from_range_end_too_large() {
    let large_end = u32::MAX as usize + 1;
    let result = Span::try_from_range(0..large_end);
    assert!(matches!(result, Err(SpanError::EndTooLarge(_))));
}

#[test]
fn test_span_error_display() {
    let msg = SpanError::StartTooLarge(0x1_0000_0000).to_string();
    assert!(msg.contains("start"));
    assert!(msg.contains("u32::MAX"));
}

#[test]
fn test_position_display() {
    assert_eq!(Position::new(3, 14, 40).to_string(), "3:14");
}
