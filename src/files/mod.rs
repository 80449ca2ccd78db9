//! Static file serving
//!
//! Maps request targets onto files under the document root and turns them
//! into responses.

pub mod handler;
pub mod resolver;

pub use handler::{HandleError, StaticFiles};
pub use resolver::{ResolveError, Resolved, Resolver};
