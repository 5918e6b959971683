pub mod app_state;
pub mod message;
pub mod session;

pub use app_state::AppState;
pub use message::{Level, Message};
pub use session::SessionStore;
