//! Stage progress bar. Silently absent when output is quiet, JSON, or not a
//! terminal, so pipelines and scripts see clean streams.

use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};
use lift_engine::{ProgressSink, Stage};

use crate::cli::OutputFormat;

pub struct StageProgress {
    bar: Option<ProgressBar>,
}

impl StageProgress {
    #[must_use]
    pub fn new(quiet: bool, format: OutputFormat) -> Self {
        if quiet || format == OutputFormat::Json || !std::io::stderr().is_terminal() {
            return Self { bar: None };
        }

        let bar = ProgressBar::new(Stage::TOTAL);
        bar.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self { bar: Some(bar) }
    }
}

impl ProgressSink for StageProgress {
    fn stage(&self, stage: Stage, done: u64, total: u64) {
        let Some(bar) = &self.bar else {
            return;
        };

        bar.set_length(total);
        bar.set_position(done);
        match stage {
            Stage::Done => bar.finish_with_message(stage.as_str()),
            Stage::Failed => bar.abandon_with_message(stage.as_str()),
            _ => bar.set_message(stage.as_str()),
        }
    }
}
