pub mod enhancement;
pub mod name_deriver;
pub mod name_normalizer;
pub mod parameters;
pub mod spec_to_ir;

pub use enhancement::compose;
pub use spec_to_ir::{TransformOptions, transform, transform_with_options};
