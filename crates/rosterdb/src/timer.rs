//! Scoped wall-clock timer

use std::time::{Duration, Instant};

use tracing::info;

type Reporter = Box<dyn FnOnce(&str, Duration) + Send>;

/// Measures the time until it is dropped, then reports it
///
/// The report runs on every exit from the enclosing scope, including `?`
/// returns and panics that unwind.
pub struct Timer {
    name: String,
    start: Instant,
    reporter: Option<Reporter>,
}

impl Timer {
    /// Start a timer that logs `"<name> took <secs>s"` when dropped
    pub fn start<N: Into<String>>(name: N) -> Self {
        Self::with_reporter(name, log_report)
    }

    /// Start a timer with a custom report callback
    pub fn with_reporter<N, F>(name: N, reporter: F) -> Self
    where
        N: Into<String>,
        F: FnOnce(&str, Duration) + Send + 'static,
    {
        Self {
            name: name.into(),
            start: Instant::now(),
            reporter: Some(Box::new(reporter)),
        }
    }

    /// Label used in the report
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Time since the timer started
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if let Some(report) = self.reporter.take() {
            report(&self.name, self.start.elapsed());
        }
    }
}

fn log_report(name: &str, elapsed: Duration) {
    info!("{} took {:.2}s", name, elapsed.as_secs_f64());
}

/// Run `f` under a [`Timer`] and hand back its result untouched
pub fn timed<T, F>(name: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let _timer = Timer::start(name);
    f()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use parking_lot::Mutex;
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::Arc;

    type Reports = Arc<Mutex<Vec<(String, Duration)>>>;

    fn recording_timer(name: &str, reports: &Reports) -> Timer {
        let reports = Arc::clone(reports);
        Timer::with_reporter(name, move |name, elapsed| {
            reports.lock().push((name.to_string(), elapsed));
        })
    }

    #[test]
    fn test_reports_on_scope_exit() {
        let reports = Reports::default();
        {
            let timer = recording_timer("listing", &reports);
            assert_eq!(timer.name(), "listing");
            std::thread::sleep(Duration::from_millis(5));
            assert!(reports.lock().is_empty());
        }

        let reports = reports.lock();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].0, "listing");
        assert!(reports[0].1 >= Duration::from_millis(5));
    }

    #[test]
    fn test_reports_on_error_return() {
        let reports = Reports::default();

        let run = |reports: &Reports| -> Result<()> {
            let _timer = recording_timer("failing", reports);
            Err::<(), _>(Error::InvalidInput("nope".to_string()))?;
            Ok(())
        };

        assert!(matches!(run(&reports), Err(Error::InvalidInput(_))));
        assert_eq!(reports.lock().len(), 1);
    }

    #[test]
    fn test_reports_on_panic() {
        let reports = Reports::default();

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let _timer = recording_timer("panicking", &reports);
            panic!("boom");
        }));

        assert!(result.is_err());
        assert_eq!(reports.lock()[0].0, "panicking");
    }

    #[test]
    fn test_timed_passes_result_through() {
        assert_eq!(timed("sum", || 2 + 2), 4);

        let result: Result<u32> = timed("failing", || Err(Error::Parse("bad".to_string())));
        assert!(matches!(result, Err(Error::Parse(msg)) if msg == "bad"));
    }
}
