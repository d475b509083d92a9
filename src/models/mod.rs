//! Data models for the relay.
//!
//! This module contains the type definitions used by:
//! - The upstream Google Gemini API (`gemini`)
//! - The grievance prompt, department list and result summary (`grievance`)

// Author: kelexine (https://github.com/kelexine)

pub mod gemini;
pub mod grievance;

pub use gemini::{Content, GenerateContentRequest, InlineData, Part};
pub use grievance::{classification_request, Department, GrievanceSummary, CLASSIFICATION_PROMPT};
