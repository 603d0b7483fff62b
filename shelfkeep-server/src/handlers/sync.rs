//! Server-Sent Events handler for live catalog changes

use crate::state::{AppState, ServerEvent};
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Event name and JSON payload for one change
fn encode_event(event: ServerEvent) -> (&'static str, String) {
    match event {
        ServerEvent::BookAdded { isbn, title } => (
            "book_added",
            serde_json::json!({ "isbn": isbn, "title": title }).to_string(),
        ),
        ServerEvent::BookRemoved { isbn } => (
            "book_removed",
            serde_json::json!({ "isbn": isbn }).to_string(),
        ),
        ServerEvent::MemberAdded { member_id, name } => (
            "member_added",
            serde_json::json!({ "member_id": member_id, "name": name }).to_string(),
        ),
        ServerEvent::MemberRemoved { member_id } => (
            "member_removed",
            serde_json::json!({ "member_id": member_id }).to_string(),
        ),
        ServerEvent::BookBorrowed {
            isbn,
            member_id,
            due_date,
        } => (
            "book_borrowed",
            serde_json::json!({ "isbn": isbn, "member_id": member_id, "due_date": due_date })
                .to_string(),
        ),
        ServerEvent::BookReturned { isbn, member_id } => (
            "book_returned",
            serde_json::json!({ "isbn": isbn, "member_id": member_id }).to_string(),
        ),
        ServerEvent::Error { message } => (
            "error",
            serde_json::json!({ "message": message }).to_string(),
        ),
    }
}

/// SSE endpoint for real-time updates
pub async fn sync_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe();
    let stream = BroadcastStream::new(rx);

    let event_stream = stream.filter_map(|result| match result {
        Ok(event) => {
            let (event_type, data) = encode_event(event);
            Some(Ok(Event::default().event(event_type).data(data)))
        }
        Err(_) => None, // Lagged, skip
    });

    Sse::new(event_stream).keep_alive(KeepAlive::default())
}
