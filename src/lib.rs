//! Benchmark harness package for the `surd` workspace.
//!
//! The benchmarks live in `benches/`; this library only re-exports the
//! facade so they can share a single import path.

pub use surd::*;
