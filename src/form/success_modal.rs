use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};
use tokio::{runtime::Handle, task::JoinHandle};

pub const AUTO_CLOSE_AFTER: Duration = Duration::from_secs(10);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalState {
    Hidden,
    Visible,
}

/// Confirmation notice shown after a successful subscription.
///
/// Closes on explicit dismissal or once [`AUTO_CLOSE_AFTER`] elapses, whichever
/// comes first. Page scrolling is suspended for as long as the notice is visible.
pub struct SuccessModal {
    inner: Arc<Mutex<ModalInner>>,
    auto_close_after: Duration,
}

struct ModalInner {
    state: ModalState,
    message: Option<String>,
    scroll_locked: bool,
    // Bumped on every show so a timer from an earlier cycle cannot close a later one.
    cycle: u64,
    timer: Option<JoinHandle<()>>,
}

impl ModalInner {
    fn hide(&mut self) {
        self.state = ModalState::Hidden;
        self.message = None;
        self.scroll_locked = false;
    }
}

impl Default for SuccessModal {
    fn default() -> Self {
        Self::with_auto_close(AUTO_CLOSE_AFTER)
    }
}

impl SuccessModal {
    pub fn with_auto_close(auto_close_after: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ModalInner {
                state: ModalState::Hidden,
                message: None,
                scroll_locked: false,
                cycle: 0,
                timer: None,
            })),
            auto_close_after,
        }
    }

    pub fn state(&self) -> ModalState {
        self.lock().state
    }

    pub fn is_visible(&self) -> bool {
        self.state() == ModalState::Visible
    }

    pub fn message(&self) -> Option<String> {
        self.lock().message.clone()
    }

    pub fn scroll_locked(&self) -> bool {
        self.lock().scroll_locked
    }

    pub fn auto_close_after(&self) -> Duration {
        self.auto_close_after
    }

    #[tracing::instrument(name = "Showing confirmation notice", skip(self, message))]
    pub fn show(&self, message: impl Into<String>) {
        let mut inner = self.lock();
        if let Some(timer) = inner.timer.take() {
            timer.abort();
        }

        inner.cycle += 1;
        inner.state = ModalState::Visible;
        inner.message = Some(message.into());
        inner.scroll_locked = true;

        match Handle::try_current() {
            Ok(handle) => {
                let timer = handle.spawn(auto_close(
                    Arc::downgrade(&self.inner),
                    inner.cycle,
                    self.auto_close_after,
                ));
                inner.timer = Some(timer);
            }
            Err(e) => tracing::warn!(
                error.message = %e,
                "No async runtime available. The notice stays open until dismissed."
            ),
        }
    }

    #[tracing::instrument(name = "Dismissing confirmation notice", skip(self))]
    pub fn dismiss(&self) {
        let mut inner = self.lock();
        if inner.state == ModalState::Hidden {
            return;
        }

        if let Some(timer) = inner.timer.take() {
            timer.abort();
        }
        inner.hide();
    }

    fn lock(&self) -> MutexGuard<'_, ModalInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for SuccessModal {
    fn drop(&mut self) {
        let mut inner = self.lock();
        if let Some(timer) = inner.timer.take() {
            timer.abort();
        }
    }
}

async fn auto_close(inner: Weak<Mutex<ModalInner>>, cycle: u64, after: Duration) {
    tokio::time::sleep(after).await;

    let Some(inner) = inner.upgrade() else {
        return;
    };
    let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
    if inner.cycle == cycle && inner.state == ModalState::Visible {
        tracing::info!("Confirmation notice timed out");
        inner.timer = None;
        inner.hide();
    }
}
