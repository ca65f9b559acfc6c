use failsafe::backoff::{self, Exponential};
use failsafe::failure_policy::{self, ConsecutiveFailures};
use failsafe::{Config, StateMachine};
use std::time::Duration;

/// Circuit breaker type guarding calls to the upstream lead source.
pub type SourceCircuitBreaker = StateMachine<ConsecutiveFailures<Exponential>, ()>;

/// Creates a circuit breaker for upstream fetches.
///
/// # Configuration
///
/// - **Failure threshold**: 5 consecutive failures triggers OPEN state.
/// - **Backoff**: Exponential backoff from 10s to 60s before attempting recovery.
///
/// While OPEN, fetches fail immediately instead of waiting on the upstream
/// timeout. The breaker never retries a failed fetch itself.
pub fn create_source_circuit_breaker() -> SourceCircuitBreaker {
    let backoff_strategy = backoff::exponential(
        Duration::from_secs(10), // Initial delay
        Duration::from_secs(60), // Maximum delay
    );

    let failure_policy = failure_policy::consecutive_failures(5, backoff_strategy);

    Config::new().failure_policy(failure_policy).build()
}
