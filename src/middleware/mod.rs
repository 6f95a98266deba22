pub mod cors_middleware;
pub mod logger_middleware;
