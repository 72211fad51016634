/// WebSocket client for Twelve Data real-time prices.
///
/// One subscription runs two tasks:
/// - a read loop that decodes inbound text frames, keeps `price` events and
///   forwards them into a bounded queue (a full queue blocks the loop rather
///   than dropping ticks)
/// - a keepalive loop that sends heartbeats on a fixed period and, on
///   cancellation, sends a Close frame and gives the read loop a bounded grace
///   period to finish
///
/// The read loop signals the keepalive loop through a one-shot when it exits.
/// Connection lifecycle beyond that (reconnect, resubscribe) is left to the caller.
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use log::{debug, warn};
use serde_json::{json, Value};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio_stream::Stream;
use tokio_tungstenite::tungstenite::Message as WsMsg;
use url::Url;

use crate::config::Config;
use crate::errors::TwelveDataError;
use crate::models::PriceEvent;

type Socket =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;
type WsSink = SplitSink<Socket, WsMsg>;
type WsStream = SplitStream<Socket>;

/// Discriminator of the only event type forwarded to subscribers.
pub const PRICE_EVENT: &str = "price";

/// Lower bound applied to [`WsConfig::heartbeat_interval`].
pub const MIN_HEARTBEAT_INTERVAL: Duration = Duration::from_millis(10);

/// Configuration for a price subscription.
#[derive(Debug, Clone)]
pub struct WsConfig {
    /// Interval between heartbeat frames (default: 10s, minimum 10ms).
    pub heartbeat_interval: Duration,
    /// How long to wait for the read loop after sending Close (default: 1s).
    pub close_grace: Duration,
    /// Capacity of the outbound event queue (default: 100, minimum 1).
    pub buffer: usize,
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval: Duration::from_secs(10),
            close_grace: Duration::from_secs(1),
            buffer: 100,
        }
    }
}

/// Stream of price ticks for one subscription. Ends when the connection does.
pub struct PriceStream {
    rx: mpsc::Receiver<PriceEvent>,
}

impl PriceStream {
    /// Wait for the next tick.
    pub async fn recv(&mut self) -> Option<PriceEvent> {
        self.rx.recv().await
    }
}

impl Stream for PriceStream {
    type Item = PriceEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

/// Handle to a running price subscription.
///
/// Dropping the handle cancels the subscription the same way [`close`](Self::close) does,
/// without waiting for it.
pub struct PriceSubscription {
    sink: Arc<Mutex<WsSink>>,
    cancel: Option<oneshot::Sender<()>>,
    supervisor: Option<JoinHandle<()>>,
}

impl PriceSubscription {
    /// Stop receiving ticks for `symbols` on this connection.
    pub async fn unsubscribe(&self, symbols: &[&str]) -> Result<(), TwelveDataError> {
        debug!("ws.unsubscribe symbols={:?}", symbols);
        send_json(&self.sink, &control_frame("unsubscribe", symbols)).await
    }

    /// Whether the keepalive loop is still running.
    pub fn is_active(&self) -> bool {
        self.supervisor
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Send a Close frame and wait for both loops to finish.
    pub async fn close(mut self) -> Result<(), TwelveDataError> {
        debug!("ws.close");
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
        if let Some(handle) = self.supervisor.take() {
            handle
                .await
                .map_err(|e| TwelveDataError::WebSocketError(e.to_string()))?;
        }
        Ok(())
    }
}

/// Subscribe to price ticks using the WebSocket URL and key from `config`.
pub async fn subscribe_prices(
    config: &Config,
    symbols: &[&str],
    ws_config: WsConfig,
) -> Result<(PriceSubscription, PriceStream), TwelveDataError> {
    let mut url = Url::parse(&config.ws_url)?;
    url.query_pairs_mut()
        .append_pair("apikey", &config.api_key);
    subscribe_prices_at(url.as_str(), symbols, ws_config).await
}

/// Subscribe to price ticks at a fully formed WebSocket URL.
pub async fn subscribe_prices_at(
    url: &str,
    symbols: &[&str],
    ws_config: WsConfig,
) -> Result<(PriceSubscription, PriceStream), TwelveDataError> {
    if symbols.is_empty() {
        return Err(TwelveDataError::Other(
            "subscribe_prices requires at least one symbol".into(),
        ));
    }

    let (socket, _) = tokio_tungstenite::connect_async(url).await?;
    let (sink, stream) = socket.split();
    let sink = Arc::new(Mutex::new(sink));

    debug!("ws.subscribe symbols={:?}", symbols);
    send_json(&sink, &control_frame("subscribe", symbols)).await?;

    let (tx, rx) = mpsc::channel(ws_config.buffer.max(1));
    let (done_tx, done_rx) = oneshot::channel();
    let reader = tokio::spawn(async move {
        read_loop(stream, tx).await;
        let _ = done_tx.send(());
    });

    let (cancel_tx, cancel_rx) = oneshot::channel();
    let supervisor = tokio::spawn(keepalive_loop(
        sink.clone(),
        reader,
        done_rx,
        cancel_rx,
        ws_config,
    ));

    Ok((
        PriceSubscription {
            sink,
            cancel: Some(cancel_tx),
            supervisor: Some(supervisor),
        },
        PriceStream { rx },
    ))
}

fn control_frame(action: &str, symbols: &[&str]) -> Value {
    json!({
        "action": action,
        "params": {
            "symbols": symbols.join(",")
        }
    })
}

async fn send_json(sink: &Mutex<WsSink>, value: &Value) -> Result<(), TwelveDataError> {
    let text = serde_json::to_string(value)?;
    let mut guard = sink.lock().await;
    guard
        .send(WsMsg::Text(text))
        .await
        .map_err(|e| TwelveDataError::WebSocketError(e.to_string()))
}

async fn read_loop(mut stream: WsStream, tx: mpsc::Sender<PriceEvent>) {
    while let Some(msg) = stream.next().await {
        let msg = match msg {
            Ok(m) => m,
            Err(e) => {
                warn!("ws.read_failed error={}", e);
                break;
            }
        };

        match msg {
            WsMsg::Text(text) => {
                let Some(event) = decode_frame(&text) else {
                    continue;
                };
                // Blocks while the queue is full.
                if tx.send(event).await.is_err() {
                    debug!("ws.read_loop consumer_dropped");
                    break;
                }
            }
            WsMsg::Close(frame) => {
                debug!("ws.read_loop close frame={:?}", frame);
                break;
            }
            _ => {}
        }
    }
}

/// Decode one inbound text frame. Only `price` events come back; other event
/// types are dropped and malformed frames are logged and skipped.
fn decode_frame(text: &str) -> Option<PriceEvent> {
    let value: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            warn!("ws.frame malformed error={} frame={}", e, text);
            return None;
        }
    };

    let event = value.get("event").and_then(Value::as_str).unwrap_or("");
    if event != PRICE_EVENT {
        debug!("ws.frame dropped event={:?}", event);
        return None;
    }

    match serde_json::from_value::<PriceEvent>(value) {
        Ok(tick) => Some(tick),
        Err(e) => {
            warn!("ws.frame undecodable_price error={} frame={}", e, text);
            None
        }
    }
}

async fn keepalive_loop(
    sink: Arc<Mutex<WsSink>>,
    reader: JoinHandle<()>,
    mut done: oneshot::Receiver<()>,
    mut cancel: oneshot::Receiver<()>,
    config: WsConfig,
) {
    let heartbeat = json!({ "action": "heartbeat" });
    // `interval` panics on a zero period.
    let period = config.heartbeat_interval.max(MIN_HEARTBEAT_INTERVAL);
    let mut interval = tokio::time::interval(period);
    interval.tick().await; // skip first immediate tick

    loop {
        tokio::select! {
            _ = &mut done => {
                debug!("ws.keepalive reader_finished");
                return;
            }
            _ = &mut cancel => break,
            _ = interval.tick() => {
                if let Err(e) = send_json(&sink, &heartbeat).await {
                    warn!("ws.heartbeat_failed error={}", e);
                }
            }
        }
    }

    // Cancelled: close handshake with a bounded wait.
    {
        let mut guard = sink.lock().await;
        if let Err(e) = guard.send(WsMsg::Close(None)).await {
            debug!("ws.close_send_failed error={}", e);
        }
    }
    match tokio::time::timeout(config.close_grace, &mut done).await {
        Ok(_) => debug!("ws.keepalive closed"),
        Err(_) => {
            warn!("ws.keepalive close_timeout aborting_reader");
            reader.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_frame_is_forwarded() {
        let frame = r#"{"event":"price","symbol":"AAPL","currency":"USD","exchange":"NASDAQ","type":"Common Stock","timestamp":1715347800,"price":183.05,"day_volume":50759500}"#;
        let tick = decode_frame(frame).unwrap();
        assert_eq!(tick.event_type, "price");
        assert_eq!(tick.symbol, "AAPL");
        assert_eq!(tick.instrument_type.as_deref(), Some("Common Stock"));
        assert_eq!(tick.timestamp, 1715347800);
        assert_eq!(tick.price, 183.05);
        assert_eq!(tick.day_volume, Some(50759500));
    }

    #[test]
    fn forex_tick_without_volume_is_forwarded() {
        let frame = r#"{"event":"price","symbol":"EUR/USD","currency_base":"Euro","currency_quote":"US Dollar","type":"Physical Currency","timestamp":1715347800,"price":1.0771}"#;
        let tick = decode_frame(frame).unwrap();
        assert_eq!(tick.day_volume, None);
        assert_eq!(tick.exchange, None);
    }

    #[test]
    fn other_events_are_dropped() {
        let status = r#"{"event":"subscribe-status","status":"ok","success":[{"symbol":"AAPL"}],"fails":[]}"#;
        let heartbeat = r#"{"event":"heartbeat","status":"ok"}"#;
        assert!(decode_frame(status).is_none());
        assert!(decode_frame(heartbeat).is_none());
    }

    #[test]
    fn malformed_frames_are_skipped() {
        assert!(decode_frame("not json").is_none());
        assert!(decode_frame(r#"{"event":"price","symbol":"AAPL"}"#).is_none());
    }

    #[test]
    fn control_frame_joins_symbols() {
        let frame = control_frame("subscribe", &["AAPL", "EUR/USD"]);
        assert_eq!(
            frame,
            json!({"action": "subscribe", "params": {"symbols": "AAPL,EUR/USD"}})
        );
    }
}
