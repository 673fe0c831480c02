//! # Business Logic Services
//!
//! This module contains the core business logic services of the application.
//! Services encapsulate domain-specific functionality and provide clean interfaces
//! for use by HTTP handlers and other application components.
//!
//! ## Available Services
//!
//! - **Slot matcher** (`slot_matcher`) - Slot eligibility and first-common-slot search
//! - **Scheduling** (`scheduling`) - Availability submission and the match state machine
//! - **Like graph** (`like_graph`) - Like edges and mutual-match detection
//! - **Store** (`store`) - Storage trait with in-memory and PostgreSQL backends
//! - **JWT** (`jwt`) - Access token creation and validation

pub mod jwt;
pub mod like_graph;
pub mod scheduling;
pub mod slot_matcher;
pub mod store;
