pub mod routes;
pub mod startup;
pub mod errors;
pub mod dto;
pub mod openapi;

pub use startup::run;
