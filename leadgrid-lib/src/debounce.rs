//! Input debouncing.

use std::time::Duration;

use tokio::time::Instant;

/// Default debounce delay of a search box.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Holds back rapidly changing input until it has been quiet for a while.
///
/// Every [`push`](Self::push) replaces the pending value and restarts the
/// timer; the value is released once `delay` has passed without another
/// push. The debouncer owns no task: the caller polls it with
/// [`take_ready`](Self::take_ready) from its event loop, or awaits
/// [`settled`](Self::settled).
///
/// Time comes from `tokio::time`, so tests can drive it with a paused clock.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use leadgrid_lib::debounce::Debouncer;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut search = Debouncer::new(Duration::from_millis(10));
/// search.push("ja".to_string());
/// search.push("jane".to_string());
/// assert_eq!(search.take_ready(), None);
///
/// assert_eq!(search.settled().await, Some("jane".to_string()));
/// assert!(!search.is_pending());
/// # }
/// ```
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

impl<T> Debouncer<T> {
    /// Creates a debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Quiet period before a value is released.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records a new value, replacing any pending one, and restarts the timer.
    pub fn push(&mut self, value: T) {
        self.pending = Some(Pending {
            value,
            deadline: Instant::now() + self.delay,
        });
    }

    /// When the pending value will be released, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// Returns `true` if a value is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Takes the pending value if its quiet period is over.
    pub fn take_ready(&mut self) -> Option<T> {
        let deadline = self.deadline()?;
        if Instant::now() < deadline {
            return None;
        }
        self.pending.take().map(|pending| pending.value)
    }

    /// Waits for the quiet period to end and takes the pending value.
    ///
    /// Returns `None` immediately when nothing is pending.
    pub async fn settled(&mut self) -> Option<T> {
        let deadline = self.deadline()?;
        tokio::time::sleep_until(deadline).await;
        self.pending.take().map(|pending| pending.value)
    }

    /// Drops the pending value without releasing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}
