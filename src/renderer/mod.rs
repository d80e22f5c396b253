pub mod colours;
pub mod format;
pub mod layout;
pub mod page;
pub mod widgets;
