// Core modules implementing key normalization, field resolution, and error modeling.
pub mod error;
pub mod field;
pub mod normalize;
pub mod resolve;
