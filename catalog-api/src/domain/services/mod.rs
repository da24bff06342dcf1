pub mod health_service;
pub mod item_service;
