use futures_util::{SinkExt, StreamExt};
use kiosk_proto::Frame;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, warn};

const OUTBOUND_QUEUE_CAPACITY: usize = 256;

pub struct Transport {
    pub outbound: mpsc::Sender<Frame>,
    pub inbound: mpsc::Receiver<Frame>,
}

/// Opens the device's duplex websocket session (spec §4.3): connects with
/// the bearer token in `Authorization`, then splits into a writer task
/// (outbound frames, encoded and sent) and reader task (inbound frames,
/// decoded and forwarded). The tungstenite client answers server pings with
/// pongs automatically at the protocol layer; we don't have to.
pub async fn connect(server_url: &str, token: &str) -> anyhow::Result<Transport> {
    let mut request = server_url.into_client_request()?;
    let header_value = HeaderValue::from_str(&format!("Bearer {token}"))?;
    request.headers_mut().insert("Authorization", header_value);

    let (ws_stream, _response) = tokio_tungstenite::connect_async(request).await?;
    let (mut write, mut read) = ws_stream.split();

    let (outbound_tx, mut outbound_rx) = mpsc::channel::<Frame>(OUTBOUND_QUEUE_CAPACITY);
    let (inbound_tx, inbound_rx) = mpsc::channel::<Frame>(OUTBOUND_QUEUE_CAPACITY);

    tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            let Ok(text) = serde_json::to_string(&frame) else { continue };
            if write.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    tokio::spawn(async move {
        while let Some(msg) = read.next().await {
            match msg {
                Ok(Message::Text(text)) => match serde_json::from_str::<Frame>(&text) {
                    Ok(frame) => {
                        if inbound_tx.send(frame).await.is_err() {
                            break;
                        }
                    }
                    Err(err) => warn!(error = %err, "malformed frame from server"),
                },
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(err) => {
                    debug!(error = %err, "websocket read error, closing");
                    break;
                }
            }
        }
    });

    Ok(Transport {
        outbound: outbound_tx,
        inbound: inbound_rx,
    })
}
