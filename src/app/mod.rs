pub mod menu_view;
pub mod repl;

pub use menu_view::MenuView;
