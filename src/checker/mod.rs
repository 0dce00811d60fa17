// src/checker/mod.rs
// =============================================================================
// Network verification of extracted links.
//
// Submodules:
// - verify: URL deduplication, skip mode, the bounded fan-out, run budget
// - http: the single-URL check and response/failure classification
//
// Only `verify` is public; how a single URL gets checked is this
// module's business.
// =============================================================================

mod http;
mod verify;

pub use verify::verify;
