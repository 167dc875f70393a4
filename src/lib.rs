pub mod config;
pub mod equity;
pub mod load;
pub mod model;
pub mod recommend;
pub mod render;
pub mod season;
pub mod server;
pub mod summary;
pub mod table;
