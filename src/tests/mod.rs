//! Internal test modules - whitebox tests with crate access
//!
//! Cross-module tests that drive the binding, the cache and a list together.
