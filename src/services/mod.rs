//! Services Layer
//!
//! This module contains pure business logic extracted from HTTP handlers.

pub mod customer_service;

pub use customer_service::CustomerService;
