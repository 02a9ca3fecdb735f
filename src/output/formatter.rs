use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::processing::{StatKey, SummaryStats};
use crate::render::format::format_thousands;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format the headline counts for the terminal, one stat per line
///
/// Merged counts are highlighted like they are on the card.
pub fn format_stats_summary(username: &str, stats: &SummaryStats, use_colors: bool) -> String {
    let label_width = StatKey::ALL
        .iter()
        .map(|key| key.label().chars().count())
        .max()
        .unwrap_or(0);

    let header = format!("PR contributions for {}", username);
    let mut lines = vec![if use_colors {
        header.bold().to_string()
    } else {
        header
    }];

    for key in StatKey::ALL {
        let label = format!("{:<width$}", key.label(), width = label_width);
        let value = format_thousands(key.value(stats) as u64);
        let line = if !use_colors {
            format!("  {}  {}", label, value)
        } else if key.is_merged() {
            format!("  {}  {}", label.dimmed(), value.magenta().bold())
        } else {
            format!("  {}  {}", label.dimmed(), value.cyan())
        };
        lines.push(line);
    }

    lines.join("\n")
}
