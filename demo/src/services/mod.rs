pub mod user;

pub use user::{SimpleUserService, UserService};
