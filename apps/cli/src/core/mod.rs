pub mod error;
pub mod uv;
