//! # Graph Model
//!
//! Plain value types shared by the graph, the algorithms and their callers.
//!
//! Design rule: nothing here borrows a graph. A `VertexId` is a key, not a
//! reference, and a `Path` is a finished result that outlives the search.

pub mod vertex;
pub mod path;

pub use vertex::{VertexId, Weight, Distance, INFINITY};
pub use path::Path;
