use crate::client::transport::{ClientError, ScoringTransport};
use crate::core::{apply_client_filter, apply_sort, SortMode};
use crate::models::{AttributeKey, PreferenceSelection, ScoredNeighborhood};
use thiserror::Error;

/// Where the current search stands
///
/// `Succeeded` and `Failed` behave like `Idle`: a new search may start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Visible notice raised when a search fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureNotice {
    pub message: String,
}

/// Handle for one issued search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    preferences: Vec<AttributeKey>,
}

impl SearchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn preferences(&self) -> &[AttributeKey] {
        &self.preferences
    }
}

/// What happened to a completed response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Failed,
    /// A newer request was issued (or the session was cleared) meanwhile
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("a search is already in progress")]
    SearchInFlight,
}

/// Client-side search state: selection, query, sort mode and last results
///
/// Every request gets a sequence number; a response only lands if its number
/// is still the latest one issued.
#[derive(Debug, Default)]
pub struct SearchSession {
    selection: PreferenceSelection,
    query: String,
    sort_mode: SortMode,
    results: Vec<ScoredNeighborhood>,
    phase: SearchPhase,
    latest_seq: u64,
    notices: Vec<FailureNotice>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &PreferenceSelection {
        &self.selection
    }

    pub fn toggle_preference(&mut self, key: AttributeKey) {
        self.selection.toggle(key);
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SearchPhase::Loading
    }

    /// Last fetched result set, in server order
    pub fn results(&self) -> &[ScoredNeighborhood] {
        &self.results
    }

    /// Results after the name filter and the chosen sort
    pub fn visible_results(&self) -> Vec<ScoredNeighborhood> {
        apply_sort(&apply_client_filter(&self.results, &self.query), self.sort_mode)
    }

    pub fn notices(&self) -> &[FailureNotice] {
        &self.notices
    }

    /// Hand pending notices to the caller for display
    pub fn take_notices(&mut self) -> Vec<FailureNotice> {
        std::mem::take(&mut self.notices)
    }

    /// Enter `Loading` for the current selection
    ///
    /// Clears the displayed results. Refused while another search is loading.
    pub fn begin_search(&mut self) -> Result<SearchTicket, SessionError> {
        if self.is_loading() {
            return Err(SessionError::SearchInFlight);
        }

        self.latest_seq += 1;
        self.phase = SearchPhase::Loading;
        self.results.clear();

        Ok(SearchTicket {
            seq: self.latest_seq,
            preferences: self.selection.to_vec(),
        })
    }

    /// Apply the outcome of the request behind `ticket`
    pub fn complete_search(
        &mut self,
        ticket: &SearchTicket,
        outcome: Result<Vec<ScoredNeighborhood>, ClientError>,
    ) -> Completion {
        if ticket.seq != self.latest_seq || !self.is_loading() {
            tracing::debug!(
                "Discarding response for search #{} (latest is #{})",
                ticket.seq,
                self.latest_seq
            );
            return Completion::Discarded;
        }

        match outcome {
            Ok(results) => {
                tracing::debug!("Search #{} returned {} results", ticket.seq, results.len());
                self.results = results;
                self.phase = SearchPhase::Succeeded;
                Completion::Applied
            }
            Err(e) => {
                tracing::warn!("Search #{} failed: {}", ticket.seq, e);
                self.results.clear();
                self.phase = SearchPhase::Failed;
                self.notices.push(FailureNotice {
                    message: e.user_message(),
                });
                Completion::Failed
            }
        }
    }

    /// Run one full search lifecycle against `transport`
    pub async fn submit_search<T>(&mut self, transport: &T) -> Result<Completion, SessionError>
    where
        T: ScoringTransport + ?Sized,
    {
        let ticket = self.begin_search()?;
        let outcome = transport.rank(ticket.preferences()).await;
        Ok(self.complete_search(&ticket, outcome))
    }

    /// Return to the initial state
    ///
    /// Any request still in flight is invalidated; its response is discarded.
    pub fn clear_all(&mut self) {
        self.selection.clear();
        self.query.clear();
        self.sort_mode = SortMode::default();
        self.results.clear();
        self.phase = SearchPhase::Idle;
        self.latest_seq += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NeighborhoodRecord;

    fn entry(name: &str, score: f64) -> ScoredNeighborhood {
        ScoredNeighborhood {
            record: NeighborhoodRecord {
                id: name.to_lowercase(),
                name: name.to_string(),
                safety: score,
                cafes: 0.0,
                parks: 0.0,
                schools: 0.0,
                public_transport: 0.0,
            },
            score,
        }
    }

    #[test]
    fn test_begin_search_clears_and_gates() {
        let mut session = SearchSession::new();
        let first = session.begin_search().unwrap();
        session.complete_search(&first, Ok(vec![entry("Oakwood", 3.0)]));
        assert_eq!(session.results().len(), 1);

        let _ticket = session.begin_search().unwrap();
        assert!(session.is_loading());
        assert!(session.results().is_empty());
        assert_eq!(session.begin_search(), Err(SessionError::SearchInFlight));
    }

    #[test]
    fn test_failure_leaves_empty_results_and_notice() {
        let mut session = SearchSession::new();
        let ticket = session.begin_search().unwrap();

        let outcome = Err(ClientError::Status {
            status: 500,
            message: "Something went wrong".to_string(),
        });

        assert_eq!(session.complete_search(&ticket, outcome), Completion::Failed);
        assert!(!session.is_loading());
        assert_eq!(session.phase(), SearchPhase::Failed);
        assert!(session.results().is_empty());
        assert_eq!(session.notices().len(), 1);

        // a failed search does not block the next one
        assert!(session.begin_search().is_ok());
    }

    #[test]
    fn test_response_after_clear_is_discarded() {
        let mut session = SearchSession::new();
        let stale = session.begin_search().unwrap();
        session.clear_all();

        let fresh = session.begin_search().unwrap();
        assert!(fresh.seq() > stale.seq());

        assert_eq!(
            session.complete_search(&stale, Ok(vec![entry("Old", 1.0)])),
            Completion::Discarded
        );
        assert!(session.is_loading());

        assert_eq!(
            session.complete_search(&fresh, Ok(vec![entry("New", 2.0)])),
            Completion::Applied
        );
        assert_eq!(session.results()[0].name(), "New");
    }

    #[test]
    fn test_ticket_carries_selection() {
        let mut session = SearchSession::new();
        session.toggle_preference(AttributeKey::Schools);
        session.toggle_preference(AttributeKey::Safety);

        let ticket = session.begin_search().unwrap();
        assert_eq!(ticket.preferences(), &[AttributeKey::Safety, AttributeKey::Schools]);
    }

    #[test]
    fn test_visible_results_filter_then_sort() {
        let mut session = SearchSession::new();
        let ticket = session.begin_search().unwrap();
        session.complete_search(
            &ticket,
            Ok(vec![entry("Oaktown", 9.0), entry("Riverside", 8.0), entry("Oakwood", 7.0)]),
        );

        session.set_query("oak");
        let names: Vec<String> = session
            .visible_results()
            .iter()
            .map(|e| e.name().to_string())
            .collect();
        assert_eq!(names, vec!["Oaktown", "Oakwood"]);

        session.set_sort_mode(SortMode::Name);
        let names: Vec<String> = session
            .visible_results()
            .iter()
            .map(|e| e.name().to_string())
            .collect();
        assert_eq!(names, vec!["Oaktown", "Oakwood"]);
        assert_eq!(session.results().len(), 3);
    }
}
