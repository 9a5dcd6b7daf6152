use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};

/// Consumes an async stream into a single Bytes object. Only meant for response bodies, which the
/// service keeps small. Upload bodies must never pass through here.
pub(crate) async fn consume_stream_into_bytes<S, E>(mut stream: S) -> Result<Bytes, E>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
{
    let mut bytes_mut = BytesMut::new();

    while let Some(item) = stream.next().await {
        let bytes = item?;
        bytes_mut.extend_from_slice(&bytes);
    }

    Ok(bytes_mut.freeze())
}

/// Reads at most `limit` bytes from the front of a stream and drops the rest unread. Used for
/// error bodies, which are only ever reported in truncated form.
pub(crate) async fn consume_stream_prefix<S, E>(mut stream: S, limit: usize) -> Result<Bytes, E>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
{
    let mut bytes_mut = BytesMut::new();

    while bytes_mut.len() < limit {
        match stream.next().await {
            Some(item) => bytes_mut.extend_from_slice(&item?),
            None => break,
        }
    }

    bytes_mut.truncate(limit);
    Ok(bytes_mut.freeze())
}

/// Keeps logged and reported response bodies to a sane size, never splitting a character.
pub(crate) fn truncate_for_display(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
