//! Terminal output helpers
//!
//! Uses `cliclack` styling in interactive terminals and falls back to plain
//! bracketed prefixes when output is piped or running under CI, so listings
//! stay parseable by scripts.

mod context;
mod output;

pub use context::UiContext;
pub use output::{
    intro, key_value_status, page_footer, step_info, step_ok, step_ok_detail, step_warn_hint,
};
