pub mod formats;
pub mod settings;
