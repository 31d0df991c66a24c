//! Domain models and request/response DTOs.

pub mod appointment;
pub mod health;
pub mod notification;
pub mod pet;
pub mod subscription;
pub mod user;
