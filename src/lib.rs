pub mod auth;
pub mod config;
pub mod db;
pub mod employee_handlers;
pub mod error;
pub mod models;
pub mod password;
pub mod result;
pub mod service;
