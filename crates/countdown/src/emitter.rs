//! Periodic countdown task.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use thiserror::Error;
use tokio::sync::{Notify, mpsc};

use orderform_locale::Messages;

use crate::clock::Clock;
use crate::deadline::{CountdownSettings, ExpiryPolicy};
use crate::remaining::render;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CountdownError {
    #[error("countdown display is no longer attached")]
    SinkClosed,
}

/// Where the banner text goes.
pub trait CountdownSink: Send + 'static {
    fn show_countdown(&mut self, text: &str) -> Result<(), CountdownError>;
}

impl CountdownSink for mpsc::UnboundedSender<String> {
    fn show_countdown(&mut self, text: &str) -> Result<(), CountdownError> {
        self.send(text.to_string())
            .map_err(|_| CountdownError::SinkClosed)
    }
}

/// One rendered tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    Running(String),
    Expired(String),
}

impl Tick {
    pub fn text(&self) -> &str {
        match self {
            Tick::Running(text) | Tick::Expired(text) => text,
        }
    }
}

pub struct CountdownEmitter<C: Clock> {
    deadline: DateTime<Utc>,
    expiry: ExpiryPolicy,
    tick: Duration,
    messages: Messages,
    clock: C,
}

impl<C: Clock> CountdownEmitter<C> {
    /// Resolve the configured deadline against the clock's current local time.
    pub fn new(settings: &CountdownSettings, clock: C) -> Self {
        let now_local = clock.now().with_timezone(&Local);
        let deadline = settings.deadline.resolve(&now_local);
        Self {
            deadline,
            expiry: settings.expiry,
            tick: Duration::from_millis(settings.tick_ms.max(1)),
            messages: Messages::for_locale(settings.locale),
            clock,
        }
    }

    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Render the banner for the clock's current time.
    pub fn tick(&self) -> Tick {
        let distance_ms = (self.deadline - self.clock.now()).num_milliseconds();
        let text = render(distance_ms, &self.messages);
        if distance_ms <= 0 {
            Tick::Expired(text)
        } else {
            Tick::Running(text)
        }
    }

    /// Emit on a fixed tick until shutdown, the sink detaches, or (with
    /// `ExpiryPolicy::Stop`) the deadline passes.
    ///
    /// The first emission happens immediately.
    pub async fn run<S: CountdownSink>(
        self,
        mut sink: S,
        shutdown: Arc<Notify>,
    ) -> Result<(), CountdownError> {
        tracing::debug!(deadline = %self.deadline, "countdown started");

        let mut interval = tokio::time::interval(self.tick);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut announced_expiry = false;

        loop {
            tokio::select! {
                _ = shutdown.notified() => {
                    tracing::debug!("countdown received shutdown signal");
                    return Ok(());
                }
                _ = interval.tick() => {
                    let tick = self.tick();
                    sink.show_countdown(tick.text())?;

                    if let Tick::Expired(_) = tick {
                        if !announced_expiry {
                            tracing::info!(deadline = %self.deadline, "offer countdown expired");
                            announced_expiry = true;
                        }
                        if self.expiry == ExpiryPolicy::Stop {
                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deadline::Deadline;
    use orderform_locale::Locale;
    use std::sync::Mutex;

    /// Wall time that advances with tokio's (possibly paused) clock.
    struct TokioClock {
        origin: DateTime<Utc>,
        started: tokio::time::Instant,
    }

    impl TokioClock {
        fn at(origin: DateTime<Utc>) -> Self {
            Self {
                origin,
                started: tokio::time::Instant::now(),
            }
        }
    }

    impl Clock for TokioClock {
        fn now(&self) -> DateTime<Utc> {
            let elapsed = tokio::time::Instant::now() - self.started;
            self.origin + chrono::Duration::from_std(elapsed).unwrap_or_default()
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSink(Arc<Mutex<Vec<String>>>);

    impl CountdownSink for RecordingSink {
        fn show_countdown(&mut self, text: &str) -> Result<(), CountdownError> {
            self.0.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn origin() -> DateTime<Utc> {
        "2026-10-19T12:00:00Z".parse().unwrap()
    }

    fn settings(expiry: ExpiryPolicy) -> CountdownSettings {
        CountdownSettings {
            deadline: Deadline::At {
                at: origin() + chrono::Duration::seconds(3),
            },
            expiry,
            tick_ms: 1_000,
            locale: Locale::English,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stops_after_expiry_with_stop_policy() {
        let emitter = CountdownEmitter::new(&settings(ExpiryPolicy::Stop), TokioClock::at(origin()));
        let sink = RecordingSink::default();
        let shutdown = Arc::new(Notify::new());

        emitter.run(sink.clone(), shutdown).await.unwrap();

        let seen = sink.0.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![
                "Time left: 0h 0m 3s".to_string(),
                "Time left: 0h 0m 2s".to_string(),
                "Time left: 0h 0m 1s".to_string(),
                "⏰ The offer has ended".to_string(),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn repeat_policy_keeps_emitting_until_shutdown() {
        let emitter =
            CountdownEmitter::new(&settings(ExpiryPolicy::Repeat), TokioClock::at(origin()));
        let sink = RecordingSink::default();
        let shutdown = Arc::new(Notify::new());

        let task = tokio::spawn(emitter.run(sink.clone(), shutdown.clone()));
        tokio::time::sleep(Duration::from_millis(6_500)).await;
        shutdown.notify_one();
        task.await.unwrap().unwrap();

        let seen = sink.0.lock().unwrap().clone();
        assert_eq!(seen.len(), 7);
        assert!(seen[3..].iter().all(|t| t == "⏰ The offer has ended"));
    }

    #[tokio::test(start_paused = true)]
    async fn detached_channel_ends_the_task() {
        let emitter =
            CountdownEmitter::new(&settings(ExpiryPolicy::Repeat), TokioClock::at(origin()));
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let result = emitter.run(tx, Arc::new(Notify::new())).await;
        assert_eq!(result, Err(CountdownError::SinkClosed));
    }

    #[test]
    fn tick_reports_expiry() {
        struct Fixed(DateTime<Utc>);
        impl Clock for Fixed {
            fn now(&self) -> DateTime<Utc> {
                self.0
            }
        }

        let emitter = CountdownEmitter::new(&settings(ExpiryPolicy::Stop), Fixed(origin()));
        assert!(matches!(emitter.tick(), Tick::Running(_)));

        let late = CountdownEmitter::new(
            &settings(ExpiryPolicy::Stop),
            Fixed(origin() + chrono::Duration::hours(1)),
        );
        assert_eq!(
            late.tick(),
            Tick::Expired("⏰ The offer has ended".to_string())
        );
    }
}
