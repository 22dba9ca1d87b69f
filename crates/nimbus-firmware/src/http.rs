//! HTTP transport for the weather fetch, built on reqwless over embassy-net.

use embassy_net::Stack;
use embassy_net::dns::DnsSocket;
use embassy_net::tcp::client::{TcpClient, TcpClientState};
use embedded_io_async::Read;
use log::{info, warn};
use reqwless::client::HttpClient;
use reqwless::request::Method;

use nimbus_core::response::ResponseBuffer;
use nimbus_core::weather::{FetchTransport, TransportError};

/// Scratch space for response headers. The body is streamed separately into
/// the session's bounded buffer.
const RX_BUFFER_SIZE: usize = 1024;

/// Read granularity for the body stream.
const CHUNK_SIZE: usize = 64;

/// One-request-at-a-time HTTP GET transport.
///
/// Success means the transaction completed at the transport level; the HTTP
/// status code is logged but not validated, matching the session's contract.
pub struct ReqwlessTransport {
    stack: Stack<'static>,
}

impl ReqwlessTransport {
    pub fn new(stack: Stack<'static>) -> Self {
        Self { stack }
    }
}

impl FetchTransport for ReqwlessTransport {
    async fn fetch(&mut self, url: &str, buffer: &mut ResponseBuffer) -> Result<(), TransportError> {
        let state = TcpClientState::<1, 1024, 1024>::new();
        let tcp = TcpClient::new(self.stack, &state);
        let dns = DnsSocket::new(self.stack);
        let mut client = HttpClient::new(&tcp, &dns);

        let mut request = client.request(Method::GET, url).await.map_err(|err| {
            warn!("HTTP connect failed: {:?}", err);
            TransportError::Connect
        })?;

        let mut rx_buffer = [0u8; RX_BUFFER_SIZE];
        let response = request.send(&mut rx_buffer).await.map_err(|err| {
            warn!("HTTP request failed: {:?}", err);
            TransportError::Request
        })?;

        info!("HTTP GET {} -> {:?}", url, response.status);

        let mut body = response.body().reader();
        let mut chunk = [0u8; CHUNK_SIZE];
        loop {
            let read = body.read(&mut chunk).await.map_err(|err| {
                warn!("HTTP body read failed: {:?}", err);
                TransportError::Request
            })?;
            if read == 0 {
                break;
            }
            buffer.append(&chunk[..read]);
        }

        Ok(())
    }
}
