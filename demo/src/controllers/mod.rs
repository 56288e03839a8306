pub mod user;

pub use user::UserController;
