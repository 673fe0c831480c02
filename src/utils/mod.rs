//! # Utility Modules
//!
//! This module contains utility functions, constants, and validators used
//! throughout the application.
//!
//! ## Available Utilities
//!
//! - **Clock** (`clock`) - Current calendar date for slot eligibility
//! - **Constants** (`constant`) - Application-wide configuration constants
//! - **Validators** (`validator`) - Wire-format regex patterns

pub mod clock;
pub mod constant;
pub mod validator;
