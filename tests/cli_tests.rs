//! Integration tests for the daybook CLI
//!
//! Every test runs the binary against its own temporary journal root.

mod cli;
