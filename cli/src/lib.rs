pub mod cmd;
pub mod config;
pub mod server;
pub mod ui;
pub mod util;
