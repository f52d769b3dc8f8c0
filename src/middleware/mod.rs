pub mod diagnostics;
pub mod panic;
pub mod response;

pub use diagnostics::expose_diagnostics;
pub use panic::handle_panic;
pub use response::{ApiResponse, ApiResult};
