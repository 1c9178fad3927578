pub mod app_state;
pub mod client_ip;
pub mod config;
pub mod errors;
pub mod extract;
