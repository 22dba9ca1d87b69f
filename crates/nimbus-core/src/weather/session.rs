//! Fetch session: owns the response buffer and runs one fetch-parse cycle.

use log::{info, warn};
use thiserror_no_std::Error;

use super::{ParseError, WeatherReading, parse};
use crate::response::ResponseBuffer;

/// Endpoint queried by the stock firmware.
pub const DEFAULT_WEATHER_URL: &str = "http://service.thinknode.cc/api/users/weather";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    #[error("could not open HTTP connection")]
    Connect,
    #[error("HTTP transaction failed")]
    Request,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherError {
    #[error("transport: {0}")]
    Transport(#[from] TransportError),
    #[error("parse: {0}")]
    Parse(#[from] ParseError),
}

/// Where the last fetch cycle got to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Fetching,
    Parsing,
    Ready,
    Failed,
}

/// Seam between the session and the platform's HTTP client.
///
/// A transport performs one blocking GET and streams each received body chunk
/// into the buffer via [`ResponseBuffer::append`]. Success means the
/// transaction completed at the transport level only; the HTTP status code is
/// deliberately not validated here (the stock endpoint's error bodies are
/// JSON-shaped and fail in the parser instead).
pub trait FetchTransport {
    fn fetch(
        &mut self,
        url: &str,
        buffer: &mut ResponseBuffer,
    ) -> impl Future<Output = Result<(), TransportError>>;
}

/// One weather consumer's fetch session.
///
/// The session exclusively owns its response buffer; `&mut self` on
/// [`get_weather`](Self::get_weather) guarantees at most one fetch in flight.
/// Construction cannot fail: the buffer is inline storage, so the
/// allocate/free lifecycle of the original collapses into plain ownership.
pub struct WeatherSession {
    url: &'static str,
    buffer: ResponseBuffer,
    state: FetchState,
}

impl WeatherSession {
    pub const fn new(url: &'static str) -> Self {
        Self {
            url,
            buffer: ResponseBuffer::new(),
            state: FetchState::Idle,
        }
    }

    pub fn state(&self) -> FetchState {
        self.state
    }

    /// Bytes accumulated by the last fetch. Mostly useful for diagnostics.
    pub fn response_len(&self) -> usize {
        self.buffer.len()
    }

    /// Runs one reset → fetch → parse cycle.
    ///
    /// The buffer is cleared before the transport writes, so back-to-back
    /// calls never see leftovers from a previous response. On transport
    /// failure the parser is not consulted at all.
    pub async fn get_weather<T: FetchTransport>(
        &mut self,
        transport: &mut T,
    ) -> Result<WeatherReading, WeatherError> {
        self.state = FetchState::Fetching;
        self.buffer.reset();

        if let Err(err) = transport.fetch(self.url, &mut self.buffer).await {
            warn!("weather fetch failed: {}", err);
            self.state = FetchState::Failed;
            return Err(err.into());
        }

        self.state = FetchState::Parsing;
        let result = match self.buffer.as_str() {
            Some(text) => parse(text),
            // Non-UTF-8 bytes can never be the JSON we want.
            None => Err(ParseError::MalformedJson),
        };

        match result {
            Ok(reading) => {
                info!(
                    "weather: {:.1}°C, \"{}\", observed at {}",
                    reading.temp_c, reading.condition, reading.timestamp
                );
                self.state = FetchState::Ready;
                Ok(reading)
            }
            Err(err) => {
                warn!("weather parse failed: {}", err);
                self.state = FetchState::Failed;
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    /// Appends a fixed payload and counts invocations.
    struct StaticTransport {
        payload: &'static [u8],
        calls: usize,
    }

    impl StaticTransport {
        fn new(payload: &'static [u8]) -> Self {
            Self { payload, calls: 0 }
        }
    }

    impl FetchTransport for StaticTransport {
        async fn fetch(
            &mut self,
            _url: &str,
            buffer: &mut ResponseBuffer,
        ) -> Result<(), TransportError> {
            self.calls += 1;
            buffer.append(self.payload);
            Ok(())
        }
    }

    struct FailingTransport;

    impl FetchTransport for FailingTransport {
        async fn fetch(
            &mut self,
            _url: &str,
            _buffer: &mut ResponseBuffer,
        ) -> Result<(), TransportError> {
            Err(TransportError::Request)
        }
    }

    #[test]
    fn test_successful_cycle_yields_reading() {
        let mut session = WeatherSession::new(DEFAULT_WEATHER_URL);
        let mut transport = StaticTransport::new(
            br#"{"data":{"temp":21.5,"weather":"Cloudy","timestamp":1700000000}}"#,
        );

        let reading = block_on(session.get_weather(&mut transport)).unwrap();
        assert_eq!(reading.temp_c, 21.5);
        assert_eq!(reading.condition.as_str(), "Cloudy");
        assert_eq!(reading.timestamp, 1700000000);
        assert_eq!(session.state(), FetchState::Ready);
        assert_eq!(transport.calls, 1);
    }

    #[test]
    fn test_transport_failure_skips_parser() {
        let mut session = WeatherSession::new(DEFAULT_WEATHER_URL);

        let err = block_on(session.get_weather(&mut FailingTransport)).unwrap_err();
        // A transport error surfaces as-is; a parser run on the empty buffer
        // would have produced a Parse variant instead.
        assert_eq!(
            err,
            WeatherError::Transport(TransportError::Request)
        );
        assert_eq!(session.state(), FetchState::Failed);
        assert_eq!(session.response_len(), 0);
    }

    #[test]
    fn test_parse_failure_marks_session_failed() {
        let mut session = WeatherSession::new(DEFAULT_WEATHER_URL);
        let mut transport = StaticTransport::new(br#"{"foo":1}"#);

        let err = block_on(session.get_weather(&mut transport)).unwrap_err();
        assert_eq!(err, WeatherError::Parse(ParseError::MissingDataNode));
        assert_eq!(session.state(), FetchState::Failed);
    }

    #[test]
    fn test_consecutive_fetches_start_from_cleared_buffer() {
        let mut session = WeatherSession::new(DEFAULT_WEATHER_URL);

        // First response is longer than the second; any leftover bytes would
        // corrupt the second parse.
        let mut first = StaticTransport::new(
            br#"{"data":{"temp":1.0,"weather":"First And Rather Long","timestamp":1}}"#,
        );
        let mut second =
            StaticTransport::new(br#"{"data":{"temp":2.0,"weather":"Second","timestamp":2}}"#);

        let reading = block_on(session.get_weather(&mut first)).unwrap();
        assert_eq!(reading.temp_c, 1.0);

        let reading = block_on(session.get_weather(&mut second)).unwrap();
        assert_eq!(reading.temp_c, 2.0);
        assert_eq!(reading.condition.as_str(), "Second");
        assert_eq!(session.response_len(), second.payload.len());
    }

    #[test]
    fn test_session_recovers_after_failure() {
        let mut session = WeatherSession::new(DEFAULT_WEATHER_URL);

        assert!(block_on(session.get_weather(&mut FailingTransport)).is_err());

        let mut transport = StaticTransport::new(
            br#"{"data":{"temp":3.5,"weather":"Clear","timestamp":3}}"#,
        );
        let reading = block_on(session.get_weather(&mut transport)).unwrap();
        assert_eq!(reading.temp_c, 3.5);
        assert_eq!(session.state(), FetchState::Ready);
    }
}
