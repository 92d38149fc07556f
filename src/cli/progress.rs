use kyc_core::{ProgressView, StepStatus};

use crate::cli::output;

const BAR_WIDTH: usize = 28;

/// Headline with a completion bar, followed by one marker per step.
pub fn render_lines(view: &ProgressView, plain: bool) -> Vec<String> {
    let percent = usize::from(view.percent());
    let filled = percent * BAR_WIDTH / 100;
    let (full, empty) = if plain { ('#', '-') } else { ('█', '░') };
    let bar: String = std::iter::repeat(full)
        .take(filled)
        .chain(std::iter::repeat(empty).take(BAR_WIDTH - filled))
        .collect();

    let mut lines = vec![format!("{}  [{bar}] {percent}%", view.headline())];
    let markers: Vec<String> = view
        .steps
        .iter()
        .map(|progress| {
            let marker = match (progress.status, plain) {
                (StepStatus::Completed, true) => "[x]",
                (StepStatus::Current, true) => "[>]",
                (StepStatus::Upcoming, true) => "[ ]",
                (StepStatus::Completed, false) => "✓",
                (StepStatus::Current, false) => "●",
                (StepStatus::Upcoming, false) => "○",
            };
            format!("{marker} {}", progress.step.number())
        })
        .collect();
    lines.push(markers.join("  "));
    lines
}

pub fn render(view: &ProgressView) {
    let plain = output::preferences().plain;
    for line in render_lines(view, plain) {
        output::line(line);
    }
}
