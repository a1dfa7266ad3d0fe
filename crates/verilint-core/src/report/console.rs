use std::sync::Arc;

use crate::report::progress::{ProgressEvent, ProgressSink};

const RULE_WIDTH: usize = 60;

/// Render one progress event as console lines. Deterministic, unit-testable.
#[must_use]
pub fn format_event(event: &ProgressEvent) -> Vec<String> {
    match event {
        ProgressEvent::RunStarted { total } => vec![
            format!("Starting Verilog Code Analysis with LLM ({} modules)", total),
            "=".repeat(RULE_WIDTH),
        ],
        ProgressEvent::BatchStarted { prefix, .. } => {
            vec![format!("Starting {} batch analysis...", prefix)]
        }
        ProgressEvent::ModuleStarted { module, timestamp } => {
            vec![format!("{} {} analysis begin", timestamp, module)]
        }
        ProgressEvent::ModuleFinished {
            module,
            timestamp,
            duration_secs,
            status,
            main_line,
        } => {
            let status_line = match main_line {
                Some(main) => {
                    format!("  -> {}: {} (main line {})", module, status, main)
                }
                _ => format!("  -> {}: {}", module, status),
            };
            vec![
                format!(
                    "{} {} analysis end (Duration: {:.3}s)",
                    timestamp, module, duration_secs
                ),
                status_line,
            ]
        }
        ProgressEvent::BatchFinished {
            prefix,
            duration_secs,
            report,
        } => vec![
            format!("---> {:.3}s {} batch completed", duration_secs, prefix),
            format!("Results written to {}", report.display()),
            String::new(),
        ],
        ProgressEvent::RunFinished { summary, report } => vec![
            "=".repeat(RULE_WIDTH),
            format!("Total Analysis Time: {:.3}s", summary.duration_secs),
            format!("Results saved to: {}", report.display()),
            format!(
                "Summary: {} modules, {} with defects, {} clean, {} errors",
                summary.modules, summary.defects_found, summary.no_defects, summary.errors
            ),
            "Analysis Complete!".to_string(),
        ],
    }
}

/// Sink that prints every event to stderr.
pub fn console_sink() -> ProgressSink {
    Arc::new(|event: &ProgressEvent| {
        for line in format_event(event) {
            eprintln!("{}", line);
        }
    })
}
