//! Dataset adapters and the registry that builds them by name.

mod ade20k;
mod dataset;
mod record;
mod registry;
mod utils;

pub use ade20k::*;
pub use dataset::*;
pub use record::*;
pub use registry::*;
pub use utils::*;
