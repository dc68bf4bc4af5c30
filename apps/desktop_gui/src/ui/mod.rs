//! UI layer: app shell, page renderers, theme and shared widgets.

pub mod app;
pub mod panels;
pub mod theme;
pub mod widgets;

pub use app::RotaDesktopApp;
