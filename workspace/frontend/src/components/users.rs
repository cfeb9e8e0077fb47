mod form;
pub mod view;

pub use view::UsersView;
