pub mod executable;
pub mod operations;
pub mod types;

pub use executable::*;
pub use operations::*;
pub use types::{ClientOptions, EnhancementLevel, IrInfo, ModuleDescriptor};
