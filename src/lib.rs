pub mod canvas;
pub mod config;
pub mod error;
pub mod layout;
pub mod noise_field;
pub mod offsets;
pub mod painter;
pub mod session;
pub mod stroke_transform;
