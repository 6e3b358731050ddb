pub mod env;

pub use env::{EnvUtils, EnvVarError};
