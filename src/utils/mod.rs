pub mod app_error;
pub mod config;
pub mod dob;
pub mod form;
pub mod picture_store;
pub mod player_repository;
