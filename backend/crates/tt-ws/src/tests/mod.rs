
use crate::ConnectionHandle;

use axum::extract::ws::Message;
use tokio::sync::mpsc;

/// A registered-looking connection whose outbound queue the test can read
pub(crate) fn test_connection(capacity: usize) -> (ConnectionHandle, mpsc::Receiver<Message>) {
    let (tx, rx) = mpsc::channel(capacity);
    (ConnectionHandle::new(tx), rx)
}

pub(crate) fn text_of(message: Message) -> String {
    match message {
        Message::Text(text) => text.as_str().to_string(),
        other => panic!("expected text frame, got {:?}", other),
    }
}
