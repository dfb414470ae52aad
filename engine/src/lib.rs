pub mod app;
pub mod audio;
pub mod geometry;
pub mod graphics;
pub mod input;
pub mod pixels_renderer;
pub mod surface;
pub mod text;
pub mod texture;
