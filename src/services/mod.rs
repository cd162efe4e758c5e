pub mod render;
pub mod server;
pub mod validation;
