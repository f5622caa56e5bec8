mod authorize_handler;
mod login_handler;
mod logout_handler;
mod register_handler;

pub use authorize_handler::*;
pub use login_handler::*;
pub use logout_handler::*;
pub use register_handler::*;
