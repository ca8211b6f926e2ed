pub mod auth_dto;
pub mod log_dto;
pub mod vehicle_dto;
