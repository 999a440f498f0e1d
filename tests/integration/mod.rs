//! Integration Tests Module
//!
//! Cross-surface integration tests: the popup lifecycle against a real
//! file store, the capture/consume draft handoff between the background
//! task and the popup, and the catalog import round-trip.

// Seed -> render -> clear -> reseed lifecycle tests
mod lifecycle_test;

// Background capture and paste flow tests
mod capture_paste_test;

// Catalog import round-trip tests
mod import_test;
