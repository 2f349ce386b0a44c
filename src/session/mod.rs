use crate::service::search::SearchService;
use dracin_source_manager::prelude::{SourceDescriptor, SourceId};
use std::time::Duration;
use tokio::sync::{mpsc, watch};

pub mod debounce;
pub mod dispatch;
pub mod outcome;
pub mod selector;

use debounce::Debouncer;
use dispatch::Dispatcher;
use outcome::SearchOutcome;
use selector::SourceSelector;

#[derive(Clone, Debug, serde::Deserialize)]
pub struct SessionConfig {
    #[serde(default = "SessionConfig::default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce_ms: Self::default_debounce_ms(),
        }
    }
}

impl SessionConfig {
    fn default_debounce_ms() -> u64 {
        300
    }

    pub fn build(&self, service: SearchService) -> Session {
        Session::new(service, Duration::from_millis(self.debounce_ms))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryState {
    pub raw_input: String,
    pub stabilized_query: String,
}

#[derive(Debug)]
enum Step {
    Query(String),
    Completion(dispatch::Completion),
}

/// One user searching: keystrokes in, search outcome out.
pub struct Session {
    query: QueryState,
    debouncer: Debouncer,
    stabilized: mpsc::UnboundedReceiver<String>,
    published: watch::Sender<String>,
    selector: SourceSelector,
    dispatcher: Dispatcher,
}

impl Session {
    pub fn new(service: SearchService, window: Duration) -> Self {
        let (debouncer, stabilized) = Debouncer::new(window);
        let (published, _) = watch::channel(String::new());
        let selector = SourceSelector::default();
        let dispatcher = Dispatcher::new(service, selector.selection());
        Self {
            query: QueryState::default(),
            debouncer,
            stabilized,
            published,
            selector,
            dispatcher,
        }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn current_source(&self) -> SourceId {
        self.selector.current()
    }

    pub fn descriptor(&self) -> &'static SourceDescriptor {
        self.selector.descriptor()
    }

    pub fn outcome(&self) -> SearchOutcome {
        self.dispatcher.outcome()
    }

    pub fn subscribe_outcome(&self) -> watch::Receiver<SearchOutcome> {
        self.dispatcher.subscribe()
    }

    pub fn subscribe_query(&self) -> watch::Receiver<String> {
        self.published.subscribe()
    }

    pub fn input(&mut self, raw: &str) {
        self.query.raw_input = raw.to_string();
        self.debouncer.push(raw);
    }

    /// Switching source searches the current query again on the new source.
    pub fn select(&mut self, id: SourceId) {
        if self.selector.set_current(id) {
            let query = self.query.stabilized_query.clone();
            self.dispatcher.dispatch(&query);
        }
    }

    /// Waits for the next stabilized query or search completion and applies it.
    pub async fn step(&mut self) {
        let step = tokio::select! {
            Some(query) = self.stabilized.recv() => Step::Query(query),
            Some(completion) = self.dispatcher.next_completion() => Step::Completion(completion),
            else => return,
        };
        match step {
            Step::Query(query) => {
                tracing::trace!("stabilized query {query:?} from {:?}", self.query.raw_input);
                self.query.stabilized_query = query.clone();
                self.published.send_replace(query.clone());
                self.dispatcher.dispatch(&query);
            }
            Step::Completion(completion) => {
                self.dispatcher.complete(completion);
            }
        }
    }
}
