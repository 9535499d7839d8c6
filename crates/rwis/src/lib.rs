pub mod catalog;
mod inputs;
pub mod metro;
pub mod resolver;
pub mod store;
mod utils;

pub use catalog::{Catalog, CatalogError, ConversionError, InvalidValue};
pub use inputs::*;
pub use metro::*;
pub use resolver::*;
pub use store::{DescriptionStore, MemoryStore, TimedValue, ValueStore};
pub use utils::*;
