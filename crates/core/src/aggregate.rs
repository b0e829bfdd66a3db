//! Aggregate traits for the form's state machines.

/// Aggregate root marker + minimal interface.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;

    /// Monotonically increasing version of the aggregate's state.
    ///
    /// Corresponds to the number of events applied since construction.
    fn version(&self) -> u64;
}

/// Aggregate execution semantics (pure, deterministic).
///
/// - **Decision logic**: `handle(&self, cmd)` returns events.
/// - **State mutation**: `apply(&mut self, event)` evolves state.
///
/// A command that is ignored by policy (e.g. selecting an unavailable variant)
/// yields an empty event list rather than an error.
pub trait Aggregate: AggregateRoot {
    type Command: Clone + core::fmt::Debug;
    type Event: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    /// Evolve in-memory state from a single event.
    fn apply(&mut self, event: &Self::Event);

    /// Decide which events to emit given the current state and a command.
    ///
    /// This must not mutate state. State evolution is done through `apply`.
    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;
}

/// Execute an aggregate command deterministically (no IO, no async).
///
/// 1. **Decide**: calls `aggregate.handle(command)` (pure, no mutation)
/// 2. **Evolve**: applies each event via `aggregate.apply(event)`
///
/// Returns the events that were applied so callers can reflect them elsewhere.
pub fn execute<A>(aggregate: &mut A, command: &A::Command) -> Result<Vec<A::Event>, A::Error>
where
    A: Aggregate,
{
    let events = A::handle(aggregate, command)?;
    for ev in &events {
        A::apply(aggregate, ev);
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Counter {
        value: u32,
        version: u64,
    }

    #[derive(Debug, Clone)]
    enum CounterCommand {
        Bump(u32),
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum CounterEvent {
        Bumped(u32),
    }

    impl AggregateRoot for Counter {
        type Id = u8;

        fn id(&self) -> &Self::Id {
            &0
        }

        fn version(&self) -> u64 {
            self.version
        }
    }

    impl Aggregate for Counter {
        type Command = CounterCommand;
        type Event = CounterEvent;
        type Error = String;

        fn apply(&mut self, event: &Self::Event) {
            match event {
                CounterEvent::Bumped(by) => self.value += by,
            }
            self.version += 1;
        }

        fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
            match command {
                CounterCommand::Bump(0) => Ok(Vec::new()),
                CounterCommand::Bump(by) if *by > 10 => Err("too large".to_string()),
                CounterCommand::Bump(by) => Ok(vec![CounterEvent::Bumped(*by)]),
            }
        }
    }

    #[test]
    fn execute_applies_emitted_events() {
        let mut counter = Counter { value: 0, version: 0 };
        let events = execute(&mut counter, &CounterCommand::Bump(3)).unwrap();
        assert_eq!(events, vec![CounterEvent::Bumped(3)]);
        assert_eq!(counter.value, 3);
        assert_eq!(counter.version(), 1);
    }

    #[test]
    fn execute_leaves_state_untouched_on_error_or_noop() {
        let mut counter = Counter { value: 5, version: 2 };
        assert!(execute(&mut counter, &CounterCommand::Bump(11)).is_err());
        assert!(execute(&mut counter, &CounterCommand::Bump(0)).unwrap().is_empty());
        assert_eq!(counter, Counter { value: 5, version: 2 });
    }
}
