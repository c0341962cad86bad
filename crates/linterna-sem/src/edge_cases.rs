//! Edge case tests for linterna-sem
