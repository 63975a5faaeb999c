//! Component descriptors, the generator contract, and the registry.

mod descriptor;
mod generator;
mod registry;

pub use descriptor::*;
pub use generator::*;
pub use registry::*;
