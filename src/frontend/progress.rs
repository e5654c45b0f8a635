use std::io::Write;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

pub const STAGES: [&str; 4] = [
    "🔍 Gathering fund information...",
    "📰 Analyzing market sentiment...",
    "🌍 Evaluating macroeconomic factors...",
    "📝 Compiling final report...",
];

const FRAMES: [char; 4] = ['|', '/', '-', '\\'];
const STAGE_INTERVAL: Duration = Duration::from_secs(20);

/// Stage shown after `elapsed`. Cosmetic only: the server reports no progress.
pub fn stage_for(elapsed: Duration) -> &'static str {
    let index = (elapsed.as_secs() / STAGE_INTERVAL.as_secs()) as usize;
    STAGES[index.min(STAGES.len() - 1)]
}

/// Spinner on stderr while a request is in flight.
pub struct Progress {
    handle: JoinHandle<()>,
}

impl Progress {
    pub fn start() -> Self {
        let handle = tokio::spawn(async {
            let started = Instant::now();
            let mut ticker = tokio::time::interval(Duration::from_millis(150));
            let mut frame = 0usize;
            loop {
                ticker.tick().await;
                let elapsed = started.elapsed();
                let mut stderr = std::io::stderr();
                let _ = write!(
                    stderr,
                    "\r\x1b[2K{} {} ({}s)",
                    FRAMES[frame % FRAMES.len()],
                    stage_for(elapsed),
                    elapsed.as_secs()
                );
                let _ = stderr.flush();
                frame += 1;
            }
        });
        Self { handle }
    }

    pub fn finish(self) {
        self.handle.abort();
        let mut stderr = std::io::stderr();
        let _ = write!(stderr, "\r\x1b[2K");
        let _ = stderr.flush();
    }
}
