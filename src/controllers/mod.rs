pub mod auth_controller;
pub mod log_controller;
pub mod vehicle_controller;
