pub mod config;
pub mod content;
pub mod db;
pub mod export;
pub mod models;
pub mod routes;
