pub mod client;
pub mod config;
pub mod controller;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod store;
