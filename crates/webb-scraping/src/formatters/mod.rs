//! Output formatting for scraped targets.

mod json;
mod markdown;

pub use json::{approval_flags, target_report};
pub use markdown::{format_failure_markdown, format_properties_markdown, format_target_markdown};
