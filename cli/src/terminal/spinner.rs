use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

static SPINNER: Mutex<Option<ProgressBar>> = Mutex::new(None);

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

fn init_spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICK_STRINGS);

    pb.set_style(style);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Shows the loading indicator. Replaces any spinner already running.
pub fn start(message: impl Into<String>) {
    let mut slot = SPINNER.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(old) = slot.take() {
        old.finish_and_clear();
    }
    *slot = Some(init_spinner(message.into()));
}

pub fn stop() {
    let mut slot = SPINNER.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(pb) = slot.take() {
        pb.finish_and_clear();
    }
}

/// Log writer that keeps output from tearing through a running spinner.
pub struct SpinnerWriter;

impl std::io::Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf);
        let msg = msg.trim_end();
        let slot = SPINNER.lock().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(pb) => pb.suspend(|| println!("{msg}")),
            None => println!("{msg}"),
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
