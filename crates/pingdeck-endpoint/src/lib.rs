//! Endpoint construction and client-side validation.
//!
//! Turns the current form state into the relative path the backend expects,
//! or nothing when the inputs are not dispatchable. The caller disables the
//! trigger action whenever this returns `None`.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use pingdeck_model::{ProbeRequest, Protocol};

// Everything outside RFC 3986 unreserved characters gets escaped, so a
// space becomes %20 rather than +.
const QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub fn build(request: &ProbeRequest) -> Option<String> {
    build_endpoint(&request.host, request.protocol, &request.port)
}

/// `ping/<protocol>?host=<encoded>` for the host-keyed protocols,
/// `ping/rdns?ip=<encoded>` for reverse DNS, and
/// `ping/tcp?host=<encoded>&port=<port>` once the port validates.
pub fn build_endpoint(host: &str, protocol: Protocol, port_text: &str) -> Option<String> {
    let host = host.trim();
    if host.is_empty() {
        return None;
    }
    let target = utf8_percent_encode(host, QUERY);

    match protocol {
        Protocol::Tcp => {
            let port = parse_port(port_text)?;
            Some(format!("ping/tcp?host={target}&port={port}"))
        }
        _ => Some(format!(
            "ping/{protocol}?{}={target}",
            protocol.target_key()
        )),
    }
}

/// Accepts a numeric string for a port in [1, 65535]; anything else is
/// rejected rather than clamped.
pub fn parse_port(text: &str) -> Option<u16> {
    text.trim().parse::<u16>().ok().filter(|port| *port >= 1)
}
