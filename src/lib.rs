pub mod align;
pub mod config;
pub mod input;
pub mod store;
pub mod validate;

pub type DynResult<T> = Result<T, Box<dyn std::error::Error>>;
