use std::future::Future;

use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, trace};

use crate::error::StreamError;

/// Single-consumer source of inbound text messages.
///
/// `next_message` resolves to `None` once the peer has ended the stream.
/// `close` releases the connection; a consumer blocked in `next_message`
/// must not be left waiting after it.
pub trait MessageSource {
    /// Await the next inbound message.
    fn next_message(&mut self) -> impl Future<Output = Option<Result<String, StreamError>>>;

    /// Close the underlying connection.
    fn close(&mut self) -> impl Future<Output = ()>;
}

/// WebSocket client backed by `tokio-tungstenite`.
pub struct WsMessageSource {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsMessageSource {
    /// Open the connection and complete the WebSocket handshake.
    pub async fn connect(url: &str) -> Result<Self, StreamError> {
        let (ws, response) = connect_async(url).await.map_err(StreamError::from_connect)?;
        debug!(status = %response.status(), "websocket handshake complete");
        Ok(Self { ws })
    }
}

impl MessageSource for WsMessageSource {
    async fn next_message(&mut self) -> Option<Result<String, StreamError>> {
        loop {
            let frame = match self.ws.next().await? {
                Ok(frame) => frame,
                Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => return None,
                Err(err) => return Some(Err(StreamError::from_receive(err))),
            };

            match frame {
                Message::Text(text) => return Some(Ok(text)),
                Message::Binary(bytes) => {
                    return Some(String::from_utf8(bytes).map_err(|e| StreamError::Decode {
                        message: format!("binary frame is not UTF-8: {e}"),
                    }));
                }
                Message::Close(frame) => {
                    debug!(?frame, "peer closed stream");
                    return None;
                }
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {
                    trace!("control frame");
                }
            }
        }
    }

    async fn close(&mut self) {
        if let Err(err) = self.ws.close(None).await {
            debug!(error = %err, "close handshake failed");
        }
    }
}
