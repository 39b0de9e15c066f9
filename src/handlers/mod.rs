pub mod chat;
pub mod login;
pub mod pages;
pub mod register;

pub use chat::chat;
pub use login::login;
pub use pages::{admin_page, mod_page, user_page};
pub use register::register;
