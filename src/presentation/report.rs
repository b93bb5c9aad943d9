//! Plain-text rendering of the audit report for standard output.

use std::fmt::Write as _;

use crate::application::search::BlockSearchReport;

/// One post ID per line, then a count summary; or a single warning line
/// when the window matched nothing.
pub fn render(report: &BlockSearchReport) -> String {
    let mut out = String::new();

    if report.post_ids.is_empty() {
        let _ = writeln!(
            out,
            "Warning: no published posts contain the `{}` block between {} and {}.",
            report.block_name,
            report.window.after(),
            report.window.before(),
        );
        return out;
    }

    for id in &report.post_ids {
        let _ = writeln!(out, "{id}");
    }
    let _ = writeln!(
        out,
        "Success: {} posts found containing the `{}` block.",
        report.post_ids.len(),
        report.block_name,
    );
    out
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;
    use crate::domain::dates::DateWindow;

    fn window() -> DateWindow {
        DateWindow::resolve(
            Some("2024-01-31"),
            Some("2024-01-01"),
            date!(2024 - 06 - 01),
        )
        .expect("window")
    }

    #[test]
    fn matches_print_ids_then_a_count_summary() {
        let report = BlockSearchReport {
            block_name: "readmore/featured-link".to_string(),
            window: window(),
            post_ids: vec![12, 7],
        };

        insta::assert_snapshot!(render(&report), @r"
        12
        7
        Success: 2 posts found containing the `readmore/featured-link` block.
        ");
    }

    #[test]
    fn an_empty_window_prints_a_single_warning_line() {
        let report = BlockSearchReport {
            block_name: "readmore/featured-link".to_string(),
            window: window(),
            post_ids: Vec::new(),
        };

        let out = render(&report);
        assert_eq!(
            out,
            "Warning: no published posts contain the `readmore/featured-link` block \
             between 2024-01-01 and 2024-01-31.\n"
        );
    }
}
