pub mod auth;
pub mod info;
pub mod tag;

pub use auth::handle_auth;
pub use info::handle_info;
pub use tag::handle_tag;
