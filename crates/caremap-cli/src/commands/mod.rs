pub mod directory;
pub mod route;
pub mod server;
