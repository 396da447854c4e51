//! Check command - dry scan reporting link resolution without writing.

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::cli::CheckArgs;
use crate::config::RelinkConfig;
use crate::core::{ScanReport, build_url_index, load_document, scan_links};
use crate::log;
use crate::utils::plural_count;

/// Unresolved targets shown without `--all`.
const UNRESOLVED_DISPLAY_LIMIT: usize = 20;

/// Run the check command
pub fn run_check(config: &RelinkConfig, args: &CheckArgs) -> Result<()> {
    let input = config.input_path(args.input.as_deref());

    log!("load"; "reading {}", input.display());
    let doc = load_document(&input)?;

    let index = build_url_index(&doc);
    let report = scan_links(&doc, &index);

    log!("check"; "{} visited, {} indexed, {} scanned",
        plural_count(report.records, "record"),
        report.indexed,
        plural_count(report.content_fields, "content field"));
    log!("check"; "{} would be rewritten", plural_count(report.resolved, "link"));

    print_unresolved(&report, args.all);

    Ok(())
}

/// Print unresolved web links, most frequent first.
fn print_unresolved(report: &ScanReport, all: bool) {
    if report.unresolved.is_empty() {
        log!("check"; "no unresolved web links");
        return;
    }

    log!("check"; "{} unresolved ({} distinct):",
        plural_count(report.unresolved_total(), "web link"),
        report.unresolved.len());

    let mut entries: Vec<_> = report.unresolved.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let shown = if all {
        entries.len()
    } else {
        entries.len().min(UNRESOLVED_DISPLAY_LIMIT)
    };
    for (target, count) in &entries[..shown] {
        eprintln!("- {} {}", target, format!("(x{count})").dimmed());
    }
    if shown < entries.len() {
        eprintln!("  and {} more (use --all)", entries.len() - shown);
    }
}
