//! Edge case tests for linterna-par
