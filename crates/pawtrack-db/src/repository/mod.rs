//! Repository layer — query functions organized by domain.

pub mod appointments;
pub mod health_records;
pub mod notifications;
pub mod pets;
pub mod plans;
pub mod profiles;
pub mod subscriptions;
pub mod users;
pub mod vaccinations;
