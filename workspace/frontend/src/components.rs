pub mod access;
pub mod history;
pub mod layout;
pub mod users;
pub mod wizard;
