use crossweave::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

struct ProgressView {
    pb: ProgressBar,
    /// Name of the phase currently running, shown as the bar's prefix.
    phase: &'static str,
}

#[derive(Clone)]
pub struct CliProgressHandler {
    view: Arc<Mutex<ProgressView>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0)
            .with_style(Self::spinner_style())
            .with_message("Initializing...");
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        pb.disable_steady_tick();
        pb.finish_and_clear();

        Self {
            view: Arc::new(Mutex::new(ProgressView { pb, phase: "" })),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let view = self.view.clone();

        Box::new(move |progress: Progress| {
            let Ok(mut guard) = view.lock() else {
                warn!("Progress view mutex was poisoned. Cannot update progress.");
                return;
            };
            let view = &mut *guard;

            match progress {
                Progress::PhaseStart { name } => {
                    view.phase = name;
                    view.pb.reset();
                    view.pb.set_length(0);
                    view.pb.set_style(Self::spinner_style());
                    view.pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    view.pb.set_message(name.to_string());
                }
                Progress::PhaseFinish => {
                    view.pb.disable_steady_tick();
                    view.pb.finish_with_message(format!("✓ {}", view.phase));
                }
                Progress::TaskStart { total_steps } => {
                    view.pb.disable_steady_tick();
                    view.pb.reset();
                    view.pb.set_length(total_steps);
                    view.pb.set_position(0);
                    view.pb.set_style(Self::bar_style());
                    view.pb.set_message(view.phase.to_string());
                }
                Progress::TaskIncrement => {
                    view.pb.inc(1);
                }
                Progress::TaskFinish => {
                    let length = view.pb.length().unwrap_or(0);
                    if view.pb.position() < length {
                        view.pb.set_position(length);
                    }
                    view.pb.finish();
                }
                Progress::StatusUpdate { text } => {
                    view.pb.set_message(format!("{}: {}", view.phase, text));
                }
                Progress::Message(msg) => {
                    if !view.pb.is_finished() {
                        view.pb.println(format!("  {}", msg));
                    } else {
                        view.pb.set_message(msg);
                    }
                }
            }
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .expect("Failed to create spinner style template")
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<12} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("Failed to create bar style template")
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                },
            )
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
