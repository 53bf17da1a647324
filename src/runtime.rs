mod context;
mod error;
mod io_service;


pub use context::ViewerContext;
pub use error::{AppError, Result};
pub use io_service::IoService;
