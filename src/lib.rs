pub mod auth;
pub mod config;
pub mod entities;
pub mod error;
pub mod graphql;
pub mod services;
