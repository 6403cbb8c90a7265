pub mod app;
pub mod csv_loader;
pub mod keypad;
pub mod logging;
pub mod settings;
pub mod utils;
