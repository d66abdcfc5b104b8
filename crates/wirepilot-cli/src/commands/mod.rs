pub mod apps;
pub mod connect;
pub mod servers;
pub mod settings;
pub mod status;
