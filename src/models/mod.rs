//! Data model for the user directory.
//!
//! This module handles:
//! - The `User` record and the payload accepted on create/update
//! - The uniform `{code, message, data}` response envelope
//! - Response message catalogue

pub mod response;
pub mod user;

pub use response::{ApiResponse, DeletedUser, HealthStatus, Message};
pub use user::{parse_user_id, User, UserPayload};
