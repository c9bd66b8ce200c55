pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod proto;
pub mod repository;
pub mod services;
pub mod storage;
pub mod usecases;
pub mod validation;

pub use config::Config;
pub use error::{AppError, AppResult};
