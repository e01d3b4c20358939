pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod mock;
pub mod models;
pub mod repository;
pub mod services;
pub mod state;
