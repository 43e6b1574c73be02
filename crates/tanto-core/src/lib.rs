//! Shared configuration and error plumbing for the tanto workspace.

pub mod config;
pub mod error;
