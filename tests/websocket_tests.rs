//! Price stream tests against an in-process mock WebSocket server.
//!
//! The mock server records every text frame the client sends and, once the
//! subscribe frame has arrived, pushes a scripted list of frames back.
use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::Message as WsMsg;

use twelvedata_sdk::{subscribe_prices, subscribe_prices_at, Config, WsConfig};

struct MockServer {
    url: String,
    inbound: mpsc::UnboundedReceiver<Value>,
}

impl MockServer {
    /// Next text frame the client sent, parsed as JSON.
    async fn next_frame(&mut self) -> Value {
        tokio::time::timeout(Duration::from_secs(5), self.inbound.recv())
            .await
            .expect("timed out waiting for a client frame")
            .expect("mock server stopped")
    }
}

async fn start_mock_server(script: Vec<String>) -> MockServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (inbound_tx, inbound) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let Ok((stream, _)) = listener.accept().await else {
            return;
        };
        let Ok(ws_stream) = accept_async(stream).await else {
            return;
        };
        let (mut sender, mut receiver) = ws_stream.split();
        let mut script = Some(script);

        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                WsMsg::Text(text) => {
                    let frame: Value = serde_json::from_str(&text).unwrap();
                    let _ = inbound_tx.send(frame);
                    if let Some(frames) = script.take() {
                        for frame in frames {
                            let _ = sender.send(WsMsg::Text(frame)).await;
                        }
                    }
                }
                WsMsg::Close(_) => {
                    let _ = sender.send(WsMsg::Close(None)).await;
                    break;
                }
                _ => {}
            }
        }
    });

    MockServer {
        url: format!("ws://{addr}"),
        inbound,
    }
}

fn price_frame(symbol: &str, timestamp: i64, price: f64) -> String {
    json!({
        "event": "price",
        "symbol": symbol,
        "currency": "USD",
        "exchange": "NASDAQ",
        "type": "Common Stock",
        "timestamp": timestamp,
        "price": price,
        "day_volume": 1000
    })
    .to_string()
}

fn quiet_config() -> WsConfig {
    WsConfig {
        heartbeat_interval: Duration::from_secs(60),
        close_grace: Duration::from_millis(500),
        buffer: 100,
    }
}

#[tokio::test]
async fn subscribe_frame_lists_symbols() {
    let mut server = start_mock_server(Vec::new()).await;

    let (subscription, _ticks) =
        subscribe_prices_at(&server.url, &["AAPL", "EUR/USD"], quiet_config())
            .await
            .unwrap();

    let frame = server.next_frame().await;
    assert_eq!(
        frame,
        json!({"action": "subscribe", "params": {"symbols": "AAPL,EUR/USD"}})
    );
    assert!(subscription.is_active());
    subscription.close().await.unwrap();
}

#[tokio::test]
async fn only_price_events_reach_the_stream() {
    let script = vec![
        json!({"event": "subscribe-status", "status": "ok", "success": [{"symbol": "AAPL"}], "fails": []}).to_string(),
        price_frame("AAPL", 1715347800, 183.05),
        "this is not json".to_string(),
        json!({"event": "heartbeat", "status": "ok"}).to_string(),
        json!({"event": "price", "symbol": "AAPL"}).to_string(),
        price_frame("AAPL", 1715347801, 183.10),
    ];
    let server = start_mock_server(script).await;

    let (subscription, mut ticks) = subscribe_prices_at(&server.url, &["AAPL"], quiet_config())
        .await
        .unwrap();

    let first = tokio::time::timeout(Duration::from_secs(5), ticks.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.event_type, "price");
    assert_eq!(first.timestamp, 1715347800);
    assert_eq!(first.price, 183.05);
    assert_eq!(first.day_volume, Some(1000));

    let second = tokio::time::timeout(Duration::from_secs(5), ticks.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.timestamp, 1715347801);

    subscription.close().await.unwrap();
    let rest = tokio::time::timeout(Duration::from_secs(5), ticks.next())
        .await
        .unwrap();
    assert!(rest.is_none());
}

#[tokio::test]
async fn full_queue_delays_but_does_not_drop() {
    let script: Vec<String> = (0..5)
        .map(|i| price_frame("AAPL", 1715347800 + i, 183.0 + i as f64))
        .collect();
    let server = start_mock_server(script).await;

    let config = WsConfig {
        buffer: 1,
        ..quiet_config()
    };
    let (subscription, mut ticks) = subscribe_prices_at(&server.url, &["AAPL"], config)
        .await
        .unwrap();

    // Let the server flush everything while nobody is reading.
    tokio::time::sleep(Duration::from_millis(200)).await;

    let mut timestamps = Vec::new();
    for _ in 0..5 {
        let tick = tokio::time::timeout(Duration::from_secs(5), ticks.recv())
            .await
            .unwrap()
            .unwrap();
        timestamps.push(tick.timestamp);
    }
    assert_eq!(
        timestamps,
        vec![1715347800, 1715347801, 1715347802, 1715347803, 1715347804]
    );

    subscription.close().await.unwrap();
}

#[tokio::test]
async fn heartbeats_are_sent_periodically() {
    let mut server = start_mock_server(Vec::new()).await;
    let config = WsConfig {
        heartbeat_interval: Duration::from_millis(50),
        ..quiet_config()
    };

    let (subscription, _ticks) = subscribe_prices_at(&server.url, &["AAPL"], config)
        .await
        .unwrap();

    assert_eq!(server.next_frame().await["action"], "subscribe");
    assert_eq!(server.next_frame().await, json!({"action": "heartbeat"}));
    assert_eq!(server.next_frame().await, json!({"action": "heartbeat"}));

    subscription.close().await.unwrap();
}

#[tokio::test]
async fn unsubscribe_sends_control_frame() {
    let mut server = start_mock_server(Vec::new()).await;

    let (subscription, _ticks) =
        subscribe_prices_at(&server.url, &["AAPL", "MSFT"], quiet_config())
            .await
            .unwrap();
    assert_eq!(server.next_frame().await["action"], "subscribe");

    subscription.unsubscribe(&["MSFT"]).await.unwrap();
    assert_eq!(
        server.next_frame().await,
        json!({"action": "unsubscribe", "params": {"symbols": "MSFT"}})
    );

    subscription.close().await.unwrap();
}

#[tokio::test]
async fn close_finishes_within_grace_period() {
    let server = start_mock_server(vec![price_frame("AAPL", 1715347800, 183.05)]).await;

    let (subscription, mut ticks) = subscribe_prices_at(&server.url, &["AAPL"], quiet_config())
        .await
        .unwrap();
    let _ = tokio::time::timeout(Duration::from_secs(5), ticks.recv()).await;

    tokio::time::timeout(Duration::from_secs(3), subscription.close())
        .await
        .expect("close did not finish")
        .unwrap();

    let end = tokio::time::timeout(Duration::from_secs(3), ticks.recv())
        .await
        .unwrap();
    assert!(end.is_none());
}

#[tokio::test]
async fn server_disconnect_ends_the_stream() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        let _ = ws.next().await;
        let _ = ws.send(WsMsg::Text(price_frame("AAPL", 1, 1.0))).await;
        let _ = ws.close(None).await;
    });

    let (subscription, mut ticks) =
        subscribe_prices_at(&format!("ws://{addr}"), &["AAPL"], quiet_config())
            .await
            .unwrap();

    let tick = tokio::time::timeout(Duration::from_secs(5), ticks.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(tick.timestamp, 1);
    let end = tokio::time::timeout(Duration::from_secs(5), ticks.recv())
        .await
        .unwrap();
    assert!(end.is_none());

    // The keepalive loop notices the reader is gone and stops on its own.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!subscription.is_active());
}

#[tokio::test]
async fn empty_symbol_list_is_rejected() {
    let err = subscribe_prices_at("ws://127.0.0.1:9", &[], quiet_config())
        .await
        .err()
        .unwrap();
    assert!(err.to_string().contains("at least one symbol"));
}

#[tokio::test]
async fn subscribe_prices_appends_api_key() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (path_tx, path_rx) = tokio::sync::oneshot::channel();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let callback = move |request: &Request,
                             response: Response|
              -> Result<Response, ErrorResponse> {
            let _ = path_tx.send(request.uri().to_string());
            Ok(response)
        };
        let mut ws = tokio_tungstenite::accept_hdr_async(stream, callback)
            .await
            .unwrap();
        while let Some(Ok(msg)) = ws.next().await {
            if msg.is_close() {
                break;
            }
        }
    });

    let config = Config::new("stream-key").with_ws_url(format!("ws://{addr}/v1/quotes/price"));
    let (subscription, _ticks) = subscribe_prices(&config, &["AAPL"], quiet_config())
        .await
        .unwrap();

    let uri = tokio::time::timeout(Duration::from_secs(5), path_rx)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(uri, "/v1/quotes/price?apikey=stream-key");

    subscription.close().await.unwrap();
}

#[tokio::test]
async fn zero_heartbeat_interval_is_clamped() {
    let mut server = start_mock_server(Vec::new()).await;
    let config = WsConfig {
        heartbeat_interval: Duration::ZERO,
        ..quiet_config()
    };

    let (subscription, _ticks) = subscribe_prices_at(&server.url, &["AAPL"], config)
        .await
        .unwrap();

    assert_eq!(server.next_frame().await["action"], "subscribe");
    assert_eq!(server.next_frame().await, json!({"action": "heartbeat"}));
    assert!(subscription.is_active());

    tokio::time::timeout(Duration::from_secs(3), subscription.close())
        .await
        .expect("close did not finish")
        .unwrap();
}
