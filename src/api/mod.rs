/*
 * Responsibility
 * - HTTP API 層 (dto / extractors / handlers) と routes() の re-export
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;
