//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own persistence and LLM orchestration so route handlers
//! can stay focused on protocol translation and status mapping.

pub mod generate;
pub mod persistence;
