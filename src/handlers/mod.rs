//! # HTTP Request Handlers
//!
//! This module contains all HTTP request handlers of the application.
//! Each handler extracts the caller and path, delegates to a service, and
//! lets [`AppError`](crate::error::AppError) shape failures.
//!
//! ## Available Handlers
//!
//! - **Health Check** (`health_check`) - Application health monitoring
//! - **Likes** (`likes`) - Liking and unliking users
//! - **Matches** (`matches`) - Match list, detail, and availability submission

mod health_check;
mod likes;
mod matches;

pub use health_check::*;
pub use likes::*;
pub use matches::*;
