use super::*;

/// Mimics a nested-parenthesis production: one frame per `(`.
fn nesting_depth(bytes: &[u8]) -> usize {
    ensure_sufficient_stack(|| match bytes.split_first() {
        Some((b'(', rest)) => 1 + nesting_depth(rest),
        _ => 0,
    })
}

#[test]
fn shallow_nesting() {
    assert_eq!(nesting_depth(b"((( x )))"), 3);
}

#[test]
fn deep_nesting_does_not_overflow() {
    // 200k frames overflow a default 8MB main-thread stack without growth.
    let source = vec![b'('; 200_000];
    assert_eq!(nesting_depth(&source), 200_000);
}

#[test]
fn result_passes_through() {
    let result: Result<u32, &str> = ensure_sufficient_stack(|| Ok(7));
    assert_eq!(result, Ok(7));
}
