use super::SearchResponse;
use crate::handler::AppState;
use crate::session::Session;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use dracin_source_prelude::SourceId;

#[derive(Debug, PartialEq, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    Input { value: String },
    Select { source: SourceId },
}

pub async fn handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| run(socket, state))
}

fn snapshot(session: &Session) -> Option<String> {
    let res = SearchResponse {
        source: session.current_source(),
        query: session.query().stabilized_query.clone(),
        outcome: session.outcome(),
    };
    serde_json::to_string(&res)
        .map_err(|err| tracing::error!("unable to serialize outcome: {err}"))
        .ok()
}

fn apply(session: &mut Session, text: &str) {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::Input { value }) => session.input(&value),
        Ok(ClientMessage::Select { source }) => {
            session.select(source);
            tracing::debug!("live session on {}", session.descriptor().display_name);
        }
        Err(err) => tracing::debug!("ignoring client message {text:?}: {err}"),
    }
}

enum Event {
    Client(Option<Result<Message, axum::Error>>),
    Stepped,
    Changed,
}

async fn run(mut socket: WebSocket, state: AppState) {
    let mut session = state.session.build(state.search.clone());
    let mut outcome = session.subscribe_outcome();
    let mut query = session.subscribe_query();
    tracing::debug!("live session started");

    loop {
        let event = tokio::select! {
            msg = socket.recv() => Event::Client(msg),
            _ = session.step() => Event::Stepped,
            Ok(()) = outcome.changed() => Event::Changed,
            Ok(()) = query.changed() => Event::Changed,
        };
        match event {
            Event::Client(Some(Ok(Message::Text(text)))) => apply(&mut session, &text),
            Event::Client(Some(Ok(Message::Close(_)))) | Event::Client(None) => break,
            Event::Client(Some(Ok(_))) | Event::Stepped => {}
            Event::Client(Some(Err(err))) => {
                tracing::debug!("live session socket error: {err}");
                break;
            }
            Event::Changed => {
                let Some(payload) = snapshot(&session) else {
                    continue;
                };
                if socket.send(Message::Text(payload)).await.is_err() {
                    break;
                }
            }
        }
    }

    tracing::debug!("live session closed");
}
