//! Authentication core and field validation for the taskboard REST API.

pub mod app;
pub mod auth;
pub mod config;
pub mod state;
pub mod tasks;
pub mod validator;
