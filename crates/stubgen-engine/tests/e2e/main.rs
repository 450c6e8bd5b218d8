//! End-to-end tests for the stub generator
//!
//! These tests generate wrapper source from descriptors, compile it and
//! drive the resulting wrappers against mock source objects.

mod harness;

mod concurrency;
mod diagnostics;
mod indexed;
mod wrappers;
