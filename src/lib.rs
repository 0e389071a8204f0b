//! Stacker (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, the
//! integration tests and the benchmarks share a single import path:
//! `stacker::{core, engine, input, session, term, types}`.

pub use stacker_core as core;
pub use stacker_engine as engine;
pub use stacker_input as input;
pub use stacker_session as session;
pub use stacker_term as term;
pub use stacker_types as types;
