//! Bulk uploader for the HammerTech API
//!
//! Reads rows from an Excel sheet and creates worker profiles, projects or
//! employer profiles, one request per row.

pub mod api;
pub mod cli;
pub mod config;
pub mod upload;
