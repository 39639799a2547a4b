//! Test modules for the persistent queue
//!
//! Tests are organized by functional area. All of them run against
//! `MemoryStore` so they can inspect raw keys and inject store failures;
//! the fjall-backed behaviour is covered by the integration tests.

mod failure_windows;
mod helpers;
