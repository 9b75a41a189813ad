//! Subcommand arguments and handlers

pub mod info;
pub mod template;
pub mod upload;

pub use info::{handle_columns_command, handle_regions_command};
pub use template::{TemplateCommands, handle_template_command};
pub use upload::{UploadCommands, handle_upload_command};
