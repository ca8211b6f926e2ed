pub mod errors;
pub mod jwt;
pub mod multipart;
pub mod validation;
