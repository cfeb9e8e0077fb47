pub mod serve;
pub mod users;

pub use serve::serve;
pub use users::list_users;
