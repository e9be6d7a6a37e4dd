pub mod app;
pub mod listeners;
pub mod scene;
pub mod theme;
