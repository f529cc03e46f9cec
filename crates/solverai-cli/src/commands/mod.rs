pub mod delete;
pub mod find;
pub mod problem;
pub mod solve;

use colored::Colorize;
use solverai_client::{ResourceIds, ResourceKind};

use crate::print_info;

/// Log the identifiers of every kind, problems last.
pub(crate) fn print_ids(ids: &ResourceIds) {
    for kind in ResourceKind::MODULES.into_iter().chain([ResourceKind::Problem]) {
        let listed: Vec<String> = ids.get(kind).iter().map(ToString::to_string).collect();
        print_info!("  {}: {}", kind.to_string().bold(), listed.join(", "));
    }
}
