//! Span definitions per operation: turn, mask, classify, generate, search.
//!
//! Spans never carry PII: only ids, lengths, counts, and provider names.

/// Create a turn span.
#[macro_export]
macro_rules! turn_span {
    ($session_id:expr, $turn:expr) => {
        ::tracing::info_span!("cloak.turn", session_id = %$session_id, turn = $turn)
    };
}

/// Create a masking span.
#[macro_export]
macro_rules! mask_span {
    ($text_len:expr) => {
        ::tracing::info_span!("cloak.mask", text_len = $text_len)
    };
}

/// Create a classifier span.
#[macro_export]
macro_rules! classify_span {
    ($provider:expr) => {
        ::tracing::info_span!("cloak.classify", provider = %$provider)
    };
}

/// Create a generation span.
#[macro_export]
macro_rules! generate_span {
    ($provider:expr, $max_tokens:expr) => {
        ::tracing::info_span!("cloak.generate", provider = %$provider, max_tokens = $max_tokens)
    };
}

/// Create a search span.
#[macro_export]
macro_rules! search_span {
    ($provider:expr) => {
        ::tracing::info_span!("cloak.search", provider = %$provider)
    };
}
