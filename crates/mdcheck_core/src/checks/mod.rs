//! Built-in checks.
//!
//! Each check is a single-pass scan over the document, keeping whatever
//! state it needs in a local accumulator, and querying the token tree where
//! block structure matters. Checks never share state with each other and
//! never mutate the document.

mod code_fence_style;
mod heading_increment;
mod heading_style;
mod hr_style;
mod line_length;
mod no_hard_tabs;
mod no_multiple_blanks;
mod no_trailing_spaces;

pub use code_fence_style::CodeFenceStyle;
pub use heading_increment::HeadingIncrement;
pub use heading_style::HeadingStyle;
pub use hr_style::HrStyle;
pub use line_length::LineLength;
pub use no_hard_tabs::NoHardTabs;
pub use no_multiple_blanks::NoMultipleBlanks;
pub use no_trailing_spaces::NoTrailingSpaces;

use std::sync::Arc;

use crate::check::Check;
use crate::error::EngineError;
use crate::registry::CheckRegistry;

/// All built-in checks, in rule-number order.
pub fn all_checks() -> Vec<Arc<dyn Check>> {
    vec![
        Arc::new(HeadingIncrement),
        Arc::new(HeadingStyle),
        Arc::new(NoTrailingSpaces),
        Arc::new(NoHardTabs),
        Arc::new(NoMultipleBlanks),
        Arc::new(LineLength),
        Arc::new(HrStyle),
        Arc::new(CodeFenceStyle),
    ]
}

/// A registry preloaded with every built-in check.
pub fn builtin_registry() -> Result<CheckRegistry, EngineError> {
    let mut registry = CheckRegistry::new();
    for check in all_checks() {
        registry.register(check)?;
    }
    Ok(registry)
}
