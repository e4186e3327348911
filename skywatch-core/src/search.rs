//! Search lifecycle state machine.
//!
//! [`SearchController`] owns everything the search view displays: the raw
//! input text, the committed query, the pending flag and the single outcome
//! slot (snapshot or failure, never both). It performs no I/O itself: a
//! trigger hands back a [`SearchTicket`] and the caller runs the fetch,
//! feeding the result to [`SearchController::resolve`]. The ticket carries
//! the generation it was issued under, so superseded or post-teardown
//! responses are discarded instead of clobbering newer state.

use crate::model::WeatherSnapshot;
use crate::provider::ProviderError;

/// Category of a user-visible failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Search was triggered with empty or whitespace-only input. No request
    /// is ever made for this case.
    ValidationEmpty,
    /// The provider does not know the requested city.
    NotFound,
    /// Anything else: transport failure, unexpected status, malformed body.
    Generic,
}

/// A terminal, user-visible failure for one search cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    fn validation_empty() -> Self {
        Self {
            kind: FailureKind::ValidationEmpty,
            message: "Please enter a city name.".to_string(),
        }
    }

    fn from_provider(err: &ProviderError) -> Self {
        match err {
            ProviderError::NotFound(_) => Self {
                kind: FailureKind::NotFound,
                message: "City not found. Please try another city.".to_string(),
            },
            _ => Self {
                kind: FailureKind::Generic,
                message: "An error occurred while fetching the weather data.".to_string(),
            },
        }
    }
}

/// Authorization for exactly one outbound fetch. Issued by
/// [`SearchController::search_requested`]; the generation inside it is what
/// lets the controller tell a live response from a stale one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    query: String,
    generation: u64,
}

impl SearchTicket {
    /// The committed city name to fetch weather for.
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// What the view should render right now. Variants are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase<'a> {
    Idle,
    Loading,
    Failed(&'a Failure),
    Ready(&'a WeatherSnapshot),
}

/// State machine driving the type / trigger / fetch / render cycle.
#[derive(Debug, Clone)]
pub struct SearchController {
    raw_input: String,
    active_query: String,
    pending: bool,
    snapshot: Option<WeatherSnapshot>,
    failure: Option<Failure>,
    // Bumped on every trigger and on reset-to-idle; a resolve whose ticket
    // carries an older generation is a no-op.
    generation: u64,
    // Cleared by teardown. The Rust rendition of an unmount guard.
    live: bool,
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchController {
    pub fn new() -> Self {
        Self {
            raw_input: String::new(),
            active_query: String::new(),
            pending: false,
            snapshot: None,
            failure: None,
            generation: 0,
            live: true,
        }
    }

    /// The user edited the input field. Clearing the field resets the whole
    /// view to idle and supersedes any fetch still in flight.
    pub fn input_changed(&mut self, text: &str) {
        self.raw_input = text.to_string();

        if text.trim().is_empty() {
            self.snapshot = None;
            self.failure = None;
            self.pending = false;
            self.generation += 1;
        }
    }

    /// The user asked for a search (button or Enter key; both land here).
    ///
    /// Returns a ticket when a fetch should be issued. Empty input yields
    /// `None` and a `ValidationEmpty` failure instead; no request is made.
    /// Triggering again while a fetch is pending supersedes it: the older
    /// ticket's response will be discarded when it eventually arrives.
    pub fn search_requested(&mut self) -> Option<SearchTicket> {
        let trimmed = self.raw_input.trim();

        if trimmed.is_empty() {
            self.failure = Some(Failure::validation_empty());
            self.active_query.clear();
            self.snapshot = None;
            self.pending = false;
            self.generation += 1;
            return None;
        }

        self.active_query = trimmed.to_string();
        self.failure = None;
        self.snapshot = None;
        self.pending = true;
        self.generation += 1;

        Some(SearchTicket {
            query: self.active_query.clone(),
            generation: self.generation,
        })
    }

    /// Apply the outcome of the fetch authorized by `ticket`.
    ///
    /// Silently discards the outcome when the view has been torn down or the
    /// ticket was superseded by a newer trigger or a reset. Stale responses
    /// must never overwrite newer state.
    pub fn resolve(&mut self, ticket: &SearchTicket, outcome: Result<WeatherSnapshot, ProviderError>) {
        if !self.live || ticket.generation != self.generation {
            return;
        }

        self.pending = false;
        match outcome {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                self.failure = None;
            }
            Err(err) => {
                self.failure = Some(Failure::from_provider(&err));
                self.snapshot = None;
            }
        }
    }

    /// The view is going away. Any response still in flight is dropped on
    /// arrival without touching state.
    pub fn teardown(&mut self) {
        self.live = false;
    }

    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    pub fn active_query(&self) -> &str {
        &self.active_query
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn failure(&self) -> Option<&Failure> {
        self.failure.as_ref()
    }

    /// Collapse the state into the one thing the view renders.
    pub fn phase(&self) -> Phase<'_> {
        if self.pending {
            Phase::Loading
        } else if let Some(failure) = &self.failure {
            Phase::Failed(failure)
        } else if let Some(snapshot) = &self.snapshot {
            Phase::Ready(snapshot)
        } else {
            Phase::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn london_snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            place: "London".to_string(),
            country: "GB".to_string(),
            temp_c: 15.0,
            feels_like_c: 14.2,
            description: "clear sky".to_string(),
            icon_id: "01d".to_string(),
        }
    }

    #[test]
    fn trigger_commits_trimmed_query_and_sets_pending() {
        let mut ctl = SearchController::new();
        ctl.input_changed("  London  ");

        let ticket = ctl.search_requested().expect("non-empty input must yield a ticket");

        assert_eq!(ticket.query(), "London");
        assert_eq!(ctl.active_query(), "London");
        assert!(ctl.is_pending());
        assert_eq!(ctl.phase(), Phase::Loading);
    }

    #[test]
    fn trigger_clears_prior_failure() {
        let mut ctl = SearchController::new();
        ctl.search_requested();
        assert!(ctl.failure().is_some());

        ctl.input_changed("Paris");
        ctl.search_requested().expect("ticket");
        assert!(ctl.failure().is_none());
    }

    #[test]
    fn empty_input_trigger_is_validation_failure_without_ticket() {
        let mut ctl = SearchController::new();
        ctl.input_changed("   ");

        assert!(ctl.search_requested().is_none());
        let failure = ctl.failure().expect("failure must be set");
        assert_eq!(failure.kind, FailureKind::ValidationEmpty);
        assert_eq!(failure.message, "Please enter a city name.");
        assert!(!ctl.is_pending());
        assert!(ctl.active_query().is_empty());
    }

    #[test]
    fn clearing_input_resets_to_idle_from_success_state() {
        let mut ctl = SearchController::new();
        ctl.input_changed("London");
        let ticket = ctl.search_requested().expect("ticket");
        ctl.resolve(&ticket, Ok(london_snapshot()));
        assert!(matches!(ctl.phase(), Phase::Ready(_)));

        ctl.input_changed("");

        assert_eq!(ctl.phase(), Phase::Idle);
        assert!(ctl.snapshot().is_none());
        assert!(ctl.failure().is_none());
        assert!(!ctl.is_pending());
    }

    #[test]
    fn clearing_input_supersedes_in_flight_fetch() {
        let mut ctl = SearchController::new();
        ctl.input_changed("London");
        let ticket = ctl.search_requested().expect("ticket");

        ctl.input_changed("");
        ctl.resolve(&ticket, Ok(london_snapshot()));

        assert_eq!(ctl.phase(), Phase::Idle);
        assert!(ctl.snapshot().is_none());
    }

    #[test]
    fn success_resolution_populates_snapshot() {
        let mut ctl = SearchController::new();
        ctl.input_changed("London");
        let ticket = ctl.search_requested().expect("ticket");

        ctl.resolve(&ticket, Ok(london_snapshot()));

        assert!(!ctl.is_pending());
        let snap = ctl.snapshot().expect("snapshot must be set");
        assert_eq!(snap.location_line(), "London, GB");
        assert_eq!(snap.temperature_line(), "15°C | 59°F");
        assert_eq!(snap.description, "clear sky");
        assert!(ctl.failure().is_none());
    }

    #[test]
    fn stale_ticket_resolution_is_discarded() {
        let mut ctl = SearchController::new();
        ctl.input_changed("London");
        let first = ctl.search_requested().expect("ticket");

        // A new trigger supersedes the first fetch.
        ctl.input_changed("Paris");
        let second = ctl.search_requested().expect("ticket");

        ctl.resolve(&first, Ok(london_snapshot()));
        assert!(ctl.is_pending(), "stale outcome must not end the live cycle");
        assert!(ctl.snapshot().is_none());

        let paris = WeatherSnapshot {
            place: "Paris".to_string(),
            country: "FR".to_string(),
            ..london_snapshot()
        };
        ctl.resolve(&second, Ok(paris));
        assert_eq!(ctl.snapshot().expect("snapshot").place, "Paris");
    }

    #[test]
    fn not_found_resolution_sets_not_found_failure() {
        let mut ctl = SearchController::new();
        ctl.input_changed("Zzzzznotacity");
        let ticket = ctl.search_requested().expect("ticket");

        ctl.resolve(
            &ticket,
            Err(ProviderError::NotFound("Zzzzznotacity".to_string())),
        );

        let failure = ctl.failure().expect("failure must be set");
        assert_eq!(failure.kind, FailureKind::NotFound);
        assert_eq!(failure.message, "City not found. Please try another city.");
        assert!(ctl.snapshot().is_none());
        assert!(!ctl.is_pending());
    }

    #[test]
    fn other_errors_resolve_to_generic_failure() {
        let mut ctl = SearchController::new();
        ctl.input_changed("London");
        let ticket = ctl.search_requested().expect("ticket");

        ctl.resolve(
            &ticket,
            Err(ProviderError::Parse("unexpected end of input".to_string())),
        );

        let failure = ctl.failure().expect("failure must be set");
        assert_eq!(failure.kind, FailureKind::Generic);
        assert_eq!(
            failure.message,
            "An error occurred while fetching the weather data."
        );
        assert!(ctl.snapshot().is_none());
    }

    #[test]
    fn teardown_discards_in_flight_resolution() {
        let mut ctl = SearchController::new();
        ctl.input_changed("Paris");
        let ticket = ctl.search_requested().expect("ticket");

        ctl.teardown();
        let before = ctl.clone();
        ctl.resolve(&ticket, Ok(london_snapshot()));

        // No state mutation of any kind after teardown.
        assert_eq!(ctl.snapshot(), before.snapshot());
        assert_eq!(ctl.failure(), before.failure());
        assert_eq!(ctl.is_pending(), before.is_pending());
    }

    #[test]
    fn retrigger_while_pending_keeps_single_outcome() {
        let mut ctl = SearchController::new();
        ctl.input_changed("London");
        let first = ctl.search_requested().expect("ticket");
        let second = ctl.search_requested().expect("ticket");

        assert_ne!(first, second);

        ctl.resolve(&second, Ok(london_snapshot()));
        assert!(matches!(ctl.phase(), Phase::Ready(_)));

        // First fetch lost the race; its error must not replace the result.
        ctl.resolve(&first, Err(ProviderError::Request("timed out".to_string())));
        assert!(matches!(ctl.phase(), Phase::Ready(_)));
    }
}
