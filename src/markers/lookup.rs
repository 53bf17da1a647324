use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use log::debug;

use super::LookupError;

pub const DEFAULT_LOOKUP_HOST: &str = "talairach.org";
pub const DEFAULT_LOOKUP_PORT: u16 = 1600;
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_RESPONSE_BYTES: usize = 1000;

/// Resolves an integer scanner coordinate to an anatomical label.
pub trait CoordinateLookup: Send + Sync {
    fn lookup(&self, coords: [i64; 3]) -> Result<String, LookupError>;
}

/// Centers are truncated toward zero before they are sent.
pub fn truncate_center(center: [f64; 3]) -> [i64; 3] {
    [center[0] as i64, center[1] as i64, center[2] as i64]
}

pub fn request_line(coords: [i64; 3]) -> String {
    format!("1,{},{},{}", coords[0], coords[1], coords[2])
}

/// Talairach daemon client: one connection per request, no retry.
#[derive(Debug, Clone)]
pub struct TalairachClient {
    host: String,
    port: u16,
    timeout: Duration,
}

impl Default for TalairachClient {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKUP_HOST, DEFAULT_LOOKUP_PORT, DEFAULT_LOOKUP_TIMEOUT)
    }
}

impl TalairachClient {
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl CoordinateLookup for TalairachClient {
    fn lookup(&self, coords: [i64; 3]) -> Result<String, LookupError> {
        let address = (self.host.as_str(), self.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| LookupError::NoAddress(self.host.clone()))?;
        let mut stream = TcpStream::connect_timeout(&address, self.timeout)?;
        stream.set_read_timeout(Some(self.timeout))?;
        stream.set_write_timeout(Some(self.timeout))?;
        stream.write_all(request_line(coords).as_bytes())?;

        let mut buffer = [0_u8; MAX_RESPONSE_BYTES];
        let read = stream.read(&mut buffer)?;
        debug!(
            "event=coordinate_lookup module=markers status=ok endpoint={} bytes={read}",
            self.endpoint()
        );
        Ok(String::from_utf8_lossy(&buffer[..read]).trim().to_string())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineLookup;

impl CoordinateLookup for OfflineLookup {
    fn lookup(&self, _coords: [i64; 3]) -> Result<String, LookupError> {
        Err(LookupError::Disabled)
    }
}
