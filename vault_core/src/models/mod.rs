pub mod files;
pub mod request;

pub use files::*;
pub use request::ApiResponse;
