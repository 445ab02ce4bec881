//! Cross-crate scenario tests only; see `tests/`.
