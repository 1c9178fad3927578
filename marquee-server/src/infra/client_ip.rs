//! Client identity used to key ratings.

use std::net::{IpAddr, SocketAddr};

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, request::Parts},
};
use tracing::warn;

use crate::infra::{app_state::AppState, config::SecurityConfig, errors::AppError};

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Address of the client making the request.
///
/// The TCP peer by default. With `security.trust_proxy_headers` enabled the
/// `X-Forwarded-For` entry `security.trusted_proxy_hops` places from the
/// right is used. Entries further left are client supplied and never read.
/// A header too short for the configured hops, or an unparsable entry,
/// falls back to the peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientIp(pub IpAddr);

impl ClientIp {
    pub fn as_key(&self) -> String {
        self.0.to_string()
    }
}

impl FromRequestParts<AppState> for ClientIp {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());

        match resolve_client_ip(&parts.headers, peer, state.security()) {
            Some(ip) => Ok(ClientIp(ip)),
            None => {
                warn!("request without connection info; cannot identify client");
                Err(AppError::internal("Client address unavailable"))
            }
        }
    }
}

pub fn resolve_client_ip(
    headers: &HeaderMap,
    peer: Option<IpAddr>,
    security: SecurityConfig,
) -> Option<IpAddr> {
    if security.trust_proxy_headers
        && let Some(forwarded) = forwarded_ip(headers, security.trusted_proxy_hops)
    {
        return Some(forwarded);
    }
    peer
}

fn forwarded_ip(headers: &HeaderMap, hops: usize) -> Option<IpAddr> {
    let entries: Vec<&str> = headers
        .get_all(FORWARDED_FOR)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .collect();

    let index = entries.len().checked_sub(hops.max(1))?;
    entries[index].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(forwarded: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(FORWARDED_FOR, HeaderValue::from_str(forwarded).unwrap());
        headers
    }

    fn peer() -> Option<IpAddr> {
        Some("10.0.0.7".parse().unwrap())
    }

    fn trusted(hops: usize) -> SecurityConfig {
        SecurityConfig {
            trust_proxy_headers: true,
            trusted_proxy_hops: hops,
        }
    }

    #[test]
    fn peer_address_is_used_by_default() {
        let ip = resolve_client_ip(&headers("203.0.113.9"), peer(), SecurityConfig::default());
        assert_eq!(ip, peer());
    }

    #[test]
    fn right_most_entry_is_the_address_the_proxy_appended() {
        let ip = resolve_client_ip(&headers("1.1.1.1, 203.0.113.9"), peer(), trusted(1));
        assert_eq!(ip, Some("203.0.113.9".parse().unwrap()));

        let forged = resolve_client_ip(&headers("9.9.9.9, 203.0.113.9"), peer(), trusted(1));
        assert_eq!(forged, ip);
    }

    #[test]
    fn entries_across_repeated_headers_count_as_one_list() {
        let mut headers = headers("1.1.1.1");
        headers.append(FORWARDED_FOR, HeaderValue::from_static("203.0.113.9"));
        let ip = resolve_client_ip(&headers, peer(), trusted(1));
        assert_eq!(ip, Some("203.0.113.9".parse().unwrap()));
    }

    #[test]
    fn additional_hops_skip_trusted_proxies_from_the_right() {
        let header = headers("1.1.1.1, 203.0.113.9, 198.51.100.1");
        let ip = resolve_client_ip(&header, peer(), trusted(2));
        assert_eq!(ip, Some("203.0.113.9".parse().unwrap()));
    }

    #[test]
    fn header_shorter_than_hops_falls_back_to_peer() {
        let ip = resolve_client_ip(&headers("203.0.113.9"), peer(), trusted(2));
        assert_eq!(ip, peer());
    }

    #[test]
    fn ipv6_forwarded_entries_parse() {
        let ip = resolve_client_ip(&headers("2001:db8::1"), peer(), trusted(1));
        assert_eq!(ip, Some("2001:db8::1".parse().unwrap()));
    }

    #[test]
    fn unparsable_entry_falls_back_to_peer() {
        let ip = resolve_client_ip(&headers("203.0.113.9, garbage"), peer(), trusted(1));
        assert_eq!(ip, peer());
        assert_eq!(resolve_client_ip(&HeaderMap::new(), peer(), trusted(1)), peer());
    }

    #[test]
    fn missing_peer_without_header_is_none() {
        assert_eq!(resolve_client_ip(&HeaderMap::new(), None, trusted(1)), None);
    }
}
