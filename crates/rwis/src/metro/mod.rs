//! METRo-facing model: input tags, data sources and the per-location
//! description of where each input comes from.

mod description;
mod location;
mod tags;

pub use description::*;
pub use location::*;
pub use tags::*;
