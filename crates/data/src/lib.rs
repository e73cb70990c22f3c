//! Catalog retrieval and the fault-tolerant card selection entry points.

pub mod load;
pub mod pipeline;
pub mod schema;

pub use load::*;
pub use pipeline::*;
pub use schema::*;
