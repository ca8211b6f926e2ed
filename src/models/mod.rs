pub mod log;
pub mod mechanic;
pub mod part;
pub mod tag;
pub mod user;
pub mod vehicle;
