//! Targets command implementation
//!
//! Lists the target identifiers `run --targets` accepts, besides the
//! `supported_targets` and `preview_targets` keywords.

use console::style;

use crate::target::Target;

/// Target identifiers to list, supported first
pub fn listed_targets(include_preview: bool) -> Vec<Target> {
    let mut targets = Target::SUPPORTED.to_vec();
    if include_preview {
        targets.extend_from_slice(Target::PREVIEW);
    }
    targets
}

/// Print known target identifiers, one per line
pub fn cmd_targets(include_preview: bool) {
    for target in listed_targets(include_preview) {
        if target.is_preview() {
            println!("{} {}", target, style("(preview)").dim());
        } else {
            println!("{}", target);
        }
    }
}
