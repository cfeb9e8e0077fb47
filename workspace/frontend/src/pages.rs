pub mod forecast;
pub mod history;
pub mod home;
pub mod login;
pub mod users;
