//! Line-oriented replay of engine and server traffic through the client.
//!
//! Each input line is one JSON object: `{"hit": ..}`, `{"inbound": ..}` or
//! `{"advanceClock": ms}`. Outbound envelopes are written one per line.

use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::messages::AnyMessage;
use crate::shared::{ClientError, ClientState};
use crate::world::{Clock, HitEvent, ManualClock};

/// One line of replay input
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReplayLine {
    /// Engine hit callback
    Hit(HitEvent),
    /// Message as received from the server
    Inbound(AnyMessage),
    /// Move the replay clock forward by this many milliseconds
    AdvanceClock(u64),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub lines: u64,
    pub skipped: u64,
    pub sent: u64,
}

/// Feeds `input` through `state` until it runs dry.
///
/// Lines are read as raw bytes; anything that is not a valid replay line,
/// including invalid UTF-8, is logged and skipped. Only I/O failures stop the replay.
pub async fn replay<R, W>(
    state: &ClientState,
    clock: &ManualClock,
    outbound: &mut mpsc::UnboundedReceiver<String>,
    input: R,
    output: &mut W,
) -> Result<ReplaySummary, ClientError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut summary = ReplaySummary::default();
    let mut segments = input.split(b'\n');

    while let Some(line) = segments.next_segment().await? {
        summary.lines += 1;
        if line.iter().all(|b| b.is_ascii_whitespace()) {
            continue;
        }

        match serde_json::from_slice::<ReplayLine>(&line) {
            Ok(ReplayLine::Hit(event)) => {
                state.hits.on_hit(&event);
            }
            Ok(ReplayLine::Inbound(message)) => {
                state.router.route(message);
            }
            Ok(ReplayLine::AdvanceClock(delta_ms)) => {
                clock.advance(delta_ms);
                debug!(now_ms = clock.now_ms(), "Clock advanced");
            }
            Err(e) => {
                summary.skipped += 1;
                warn!(line = summary.lines, error = %e, "Skipping unreadable replay line");
            }
        }

        summary.sent += flush_outbound(outbound, output).await?;
    }

    info!(
        lines = summary.lines,
        skipped = summary.skipped,
        sent = summary.sent,
        "Replay finished"
    );
    Ok(summary)
}

async fn flush_outbound<W>(
    outbound: &mut mpsc::UnboundedReceiver<String>,
    output: &mut W,
) -> Result<u64, ClientError>
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0;
    while let Ok(envelope) = outbound.try_recv() {
        output.write_all(envelope.as_bytes()).await?;
        output.write_all(b"\n").await?;
        written += 1;
    }
    output.flush().await?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::world::{InMemoryEngine, LocalId};
    use std::sync::Arc;

    async fn run(input: &[u8]) -> (ReplaySummary, Vec<serde_json::Value>) {
        let engine = InMemoryEngine::new().with_weapon(LocalId(2));
        let clock = Arc::new(ManualClock::new(0));
        let state = ClientState::new(&ClientConfig::default(), Arc::new(engine), clock.clone());
        let (_subscription, mut outbound) = state.attach_outbound();

        let mut output = Vec::new();
        let summary = replay(&state, &clock, &mut outbound, input, &mut output)
            .await
            .unwrap();

        let sent = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        (summary, sent)
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_is_skipped() {
        let input = b"{\"advanceClock\":5}\n\xff\xfe bad\n{\"hit\":{\"aggressor\":20,\"target\":1,\"source\":2}}";

        let (summary, sent) = run(input).await;

        assert_eq!(
            summary,
            ReplaySummary {
                lines: 3,
                skipped: 1,
                sent: 1
            }
        );
        assert_eq!(sent[0]["message"]["t"], "OnHit");
    }

    #[tokio::test]
    async fn test_malformed_json_and_blank_lines_do_not_stop_replay() {
        let input = b"\n{\"hit\":\n   \n{\"inbound\":{\"t\":\"HostStart\",\"data\":{\"target\":16}}}\n{\"hit\":{\"aggressor\":20,\"target\":1,\"source\":2}}\r\n";

        let (summary, sent) = run(input).await;

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.sent, 1);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["reliability"], "reliable");
    }
}
