//! Chunked emission of a final answer.

use futures_core::Stream;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Re-segment text into chunks of `size` characters.
///
/// Chunks are separated by `delay`. Concatenating every chunk gives back
/// the input; empty input yields nothing. Cancellation stops emission
/// before the next chunk.
pub fn chunks(
    text: String,
    size: usize,
    delay: Duration,
    cancel: CancellationToken,
) -> impl Stream<Item = String> + Send {
    let size = size.max(1);
    async_stream::stream! {
        let chars = text.chars().collect::<Vec<_>>();
        for (index, chunk) in chars.chunks(size).enumerate() {
            if index > 0 {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    _ = tokio::time::sleep(delay) => {}
                }
            }
            if cancel.is_cancelled() {
                break;
            }
            yield chunk.iter().collect::<String>();
        }
    }
}
