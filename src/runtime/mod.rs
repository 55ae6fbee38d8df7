//! Runtime module
//!
//! Task and stream primitives shared by the scoring pipeline and the
//! GitHub collaborators.

pub mod async_task;

pub use async_task::{AsyncStream, AsyncTask, EmitterBuilder, Timed};
