pub mod app;
pub mod event;
pub mod input;
pub mod keymap;
pub mod theme;
pub mod themes;
pub mod widgets;

pub use app::{App, Command};
pub use theme::Theme;
pub use themes::{available_themes, load_theme};
