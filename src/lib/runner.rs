use crate::*;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{spawn, JoinHandle};
use std::time::{Duration, Instant};

type Completion = (SearchTicket, Result<Vec<GeocodeResult>, LookupError>);

/// Runs geocoding lookups on worker threads and hands the answers back to a [`SearchWidget`].
///
/// The owner dispatches tickets and polls for completions; the widget decides
/// which answers are still current.
pub struct SearchRunner {
    geocoder: Arc<dyn Geocoder + Send + Sync>,
    workers: Vec<(u64, JoinHandle<()>)>,
    channel: (Sender<Completion>, Receiver<Completion>),
}

impl SearchRunner {
    pub fn new(geocoder: Arc<dyn Geocoder + Send + Sync>) -> Self {
        Self {
            geocoder,
            workers: vec![],
            channel: unbounded(),
        }
    }

    /// Number of lookups that have not been finalized yet.
    pub fn pending(&self) -> usize {
        self.workers.len()
    }

    /// Spawns a worker performing the lookup for `ticket`.
    pub fn dispatch(&mut self, ticket: SearchTicket) {
        let generation = ticket.generation;
        let geocoder = self.geocoder.clone();
        let tx = self.channel.0.clone();

        self.workers.push((
            generation,
            spawn(move || {
                // Every worker reports back, even one whose lookup panicked.
                let result = catch_unwind(AssertUnwindSafe(|| geocoder.search(&ticket.query, 1)))
                    .unwrap_or_else(|_| {
                        log::error!("Search worker for '{}' panicked.", ticket.query);
                        Err(LookupError::Transport {
                            url: ticket.query.clone(),
                            reason: "the lookup panicked".to_string(),
                        })
                    });
                if tx.send((ticket, result)).is_err() {
                    log::debug!("Could not deliver the search result. The runner was most likely dropped.");
                }
            }),
        ));
    }

    /// Validates `query` with the widget and dispatches it if accepted.
    pub fn submit(&mut self, widget: &mut SearchWidget, query: &str) -> Option<SearchOutcome> {
        match widget.begin(query) {
            Some(ticket) => {
                self.dispatch(ticket);
                None
            }
            None => Some(SearchOutcome::Rejected(QUERY_TOO_SHORT.to_string())),
        }
    }

    fn finalize(&mut self, widget: &mut SearchWidget, completion: Completion) -> SearchOutcome {
        let (ticket, result) = completion;
        if let Some(i) = self.workers.iter().position(|w| w.0 == ticket.generation) {
            let (_, handle) = self.workers.remove(i);
            if let Err(e) = handle.join() {
                log::error!(
                    "Failed to join search worker for '{}'. Reason:\r\n{:?}",
                    ticket.query,
                    e
                );
            }
        }
        widget.complete(&ticket, result)
    }

    /// Applies every completed lookup without blocking.
    pub fn finalize_completed(&mut self, widget: &mut SearchWidget) -> Vec<SearchOutcome> {
        let completions: Vec<Completion> = self.channel.1.try_iter().collect();
        completions
            .into_iter()
            .map(|c| self.finalize(widget, c))
            .collect()
    }

    /// Blocks until every dispatched lookup completed or `timeout` elapsed.
    pub fn wait_all(&mut self, widget: &mut SearchWidget, timeout: Duration) -> Vec<SearchOutcome> {
        let deadline = Instant::now() + timeout;
        let mut outcomes = vec![];
        while !self.workers.is_empty() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.channel.1.recv_timeout(remaining) {
                Ok(completion) => outcomes.push(self.finalize(widget, completion)),
                Err(RecvTimeoutError::Timeout) => {
                    log::warn!("{} search(es) still running after {:?}.", self.workers.len(), timeout);
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        outcomes
    }
}

#[cfg(test)]
struct SlowGeocoder;

#[cfg(test)]
impl Geocoder for SlowGeocoder {
    fn search(&self, query: &str, _limit: usize) -> Result<Vec<GeocodeResult>, LookupError> {
        let (delay, coordinates) = match query {
            "Lisbon" => (150, Coordinates::new(38.7077507, -9.1365919)),
            _ => (0, Coordinates::new(35.6895, 139.6917)),
        };
        std::thread::sleep(Duration::from_millis(delay));
        Ok(vec![GeocodeResult {
            name: Some(query.to_string()),
            coordinates,
            country: None,
            display_name: query.to_string(),
        }])
    }
}

#[test]
fn a_slow_first_search_cannot_overwrite_a_later_one() {
    let mut runner = SearchRunner::new(Arc::new(SlowGeocoder));
    let mut widget = SearchWidget::new();

    assert!(runner.submit(&mut widget, "Lisbon").is_none());
    assert!(runner.submit(&mut widget, "Tokyo").is_none());
    assert_eq!(runner.pending(), 2);

    let outcomes = runner.wait_all(&mut widget, Duration::from_secs(10));

    assert_eq!(outcomes.len(), 2);
    assert_eq!(runner.pending(), 0);
    assert!(outcomes.contains(&SearchOutcome::Stale));
    assert_eq!(widget.view().center, Coordinates::new(35.6895, 139.6917));
    assert_eq!(widget.selected().map(|m| m.name.as_str()), Some("Tokyo"));
    assert!(!widget.is_searching());
}

#[cfg(test)]
struct PanickingGeocoder;

#[cfg(test)]
impl Geocoder for PanickingGeocoder {
    fn search(&self, query: &str, _limit: usize) -> Result<Vec<GeocodeResult>, LookupError> {
        panic!("no geocoder for {}", query);
    }
}

#[test]
fn a_panicking_lookup_still_completes() {
    let mut runner = SearchRunner::new(Arc::new(PanickingGeocoder));
    let mut widget = SearchWidget::new();

    assert!(runner.submit(&mut widget, "Atlantis").is_none());
    let outcomes = runner.wait_all(&mut widget, Duration::from_secs(10));

    assert_eq!(outcomes, vec![SearchOutcome::Failed(SEARCH_UNREACHABLE.to_string())]);
    assert_eq!(runner.pending(), 0);
    assert!(!widget.is_searching());
}

#[test]
fn rejected_queries_are_not_dispatched() {
    let mut runner = SearchRunner::new(Arc::new(SlowGeocoder));
    let mut widget = SearchWidget::new();
    assert_eq!(
        runner.submit(&mut widget, "x"),
        Some(SearchOutcome::Rejected(QUERY_TOO_SHORT.to_string()))
    );
    assert_eq!(runner.pending(), 0);
    assert!(runner.finalize_completed(&mut widget).is_empty());
}
