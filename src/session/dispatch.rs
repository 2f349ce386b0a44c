use super::outcome::SearchOutcome;
use super::selector::SourceSelection;
use crate::service::search::SearchService;
use dracin_source_manager::prelude::{SearchResult, SourceError, SourceId};
use tokio::sync::{mpsc, watch};

/// Identifies one dispatched search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub sequence: u64,
    pub source: SourceId,
    pub query: String,
}

#[derive(Debug)]
pub struct Completion {
    pub ticket: Ticket,
    pub result: Result<SearchResult, SourceError>,
}

/// Search state machine.
///
/// Each dispatch gets a new sequence number. Searches run concurrently but a
/// completion only reaches the outcome when it belongs to the latest dispatch
/// and its source is still the active one.
pub struct Dispatcher {
    service: SearchService,
    selection: SourceSelection,
    sequence: u64,
    outcome: watch::Sender<SearchOutcome>,
    sender: mpsc::UnboundedSender<Completion>,
    receiver: mpsc::UnboundedReceiver<Completion>,
}

impl Dispatcher {
    pub fn new(service: SearchService, selection: SourceSelection) -> Self {
        let (outcome, _) = watch::channel(SearchOutcome::Idle);
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            service,
            selection,
            sequence: 0,
            outcome,
            sender,
            receiver,
        }
    }

    pub fn outcome(&self) -> SearchOutcome {
        self.outcome.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchOutcome> {
        self.outcome.subscribe()
    }

    pub fn dispatch(&mut self, query: &str) -> Option<Ticket> {
        self.sequence += 1;
        if query.is_empty() {
            self.outcome.send_replace(SearchOutcome::Idle);
            return None;
        }

        let ticket = Ticket {
            sequence: self.sequence,
            source: self.selection.current(),
            query: query.to_string(),
        };
        tracing::debug!(
            "dispatching #{} {:?} to {}",
            ticket.sequence,
            ticket.query,
            ticket.source
        );
        self.outcome.send_replace(SearchOutcome::Loading);

        let service = self.service.clone();
        let sender = self.sender.clone();
        let pending = ticket.clone();
        tokio::spawn(async move {
            let result = service.search(pending.source, &pending.query).await;
            let _ = sender.send(Completion {
                ticket: pending,
                result,
            });
        });
        Some(ticket)
    }

    pub(crate) async fn next_completion(&mut self) -> Option<Completion> {
        self.receiver.recv().await
    }

    /// Returns `true` when the completion updated the outcome.
    pub fn complete(&mut self, completion: Completion) -> bool {
        let Completion { ticket, result } = completion;
        if ticket.sequence != self.sequence || ticket.source != self.selection.current() {
            tracing::debug!(
                "discarding stale #{} {:?} from {}, latest is #{}",
                ticket.sequence,
                ticket.query,
                ticket.source,
                self.sequence
            );
            return false;
        }
        self.outcome.send_replace(SearchOutcome::resolve(result));
        true
    }
}
