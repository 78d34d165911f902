use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::modules::content::application::hooks::lock_state;

/// How long the "message sent" notice stays up.
pub const SUBMITTED_NOTICE: Duration = Duration::from_secs(5);

#[derive(Debug, Default)]
struct FlagState {
    raised: bool,
    generation: u64,
}

/// Transient "submitted" notice that lowers itself after a fixed delay.
///
/// The timer only holds a weak reference, so dropping the flag first leaves
/// nothing to update and nothing to fail.
#[derive(Debug)]
pub struct SubmittedFlag {
    state: Arc<Mutex<FlagState>>,
    duration: Duration,
}

impl Default for SubmittedFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmittedFlag {
    pub fn new() -> Self {
        Self::with_duration(SUBMITTED_NOTICE)
    }

    pub fn with_duration(duration: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(FlagState::default())),
            duration,
        }
    }

    pub fn is_raised(&self) -> bool {
        lock_state(&self.state).raised
    }

    /// Raises the flag and schedules it to clear. A later raise restarts the
    /// countdown; the earlier timer then does nothing.
    pub fn raise(&self) -> JoinHandle<()> {
        let generation = {
            let mut state = lock_state(&self.state);
            state.raised = true;
            state.generation += 1;
            state.generation
        };

        let weak = Arc::downgrade(&self.state);
        let duration = self.duration;
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            if let Some(state) = weak.upgrade() {
                let mut state = lock_state(&state);
                if state.generation == generation {
                    state.raised = false;
                }
            }
        })
    }
}
