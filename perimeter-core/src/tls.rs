//! TLS detail probe.
//!
//! Completes one handshake without certificate verification and reports the
//! negotiated protocol, cipher and leaf certificate metadata.

use crate::error::ProbeError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use openssl::ssl::{SslConnector, SslMethod, SslVerifyMode};
use serde::{Deserialize, Serialize};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::debug;
use url::Url;
use x509_parser::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherInfo {
    pub name: String,
    pub protocol: String,
    pub bits: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateInfo {
    pub subject: String,
    pub issuer: String,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    pub serial_number: String,
    pub subject_alt_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsDetails {
    pub protocol: String,
    pub cipher: Option<CipherInfo>,
    pub certificate: Option<CertificateInfo>,
}

#[async_trait]
pub trait TlsProbe: Send + Sync {
    async fn fetch_tls_details(&self, url: &str, timeout: Duration)
    -> Result<TlsDetails, ProbeError>;
}

/// Host and port a TLS connection for `url` should go to. Without an
/// explicit port, `http` targets use 80 and everything else 443.
pub fn tls_endpoint(url: &str) -> Result<(String, u16), ProbeError> {
    let parsed = Url::parse(url).map_err(|e| ProbeError::InvalidTarget(format!("{url}: {e}")))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| ProbeError::InvalidTarget(format!("{url}: no hostname")))?
        .trim_start_matches('[')
        .trim_end_matches(']')
        .to_string();
    let port = parsed
        .port()
        .unwrap_or(if parsed.scheme() == "http" { 80 } else { 443 });
    Ok((host, port))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct OpensslTlsProbe;

impl OpensslTlsProbe {
    fn handshake(host: &str, port: u16, timeout: Duration) -> Result<TlsDetails, ProbeError> {
        let addr = (host, port).to_socket_addrs()?.next().ok_or_else(|| {
            ProbeError::InvalidTarget(format!("{host}:{port} did not resolve"))
        })?;

        let stream = TcpStream::connect_timeout(&addr, timeout)?;
        stream.set_read_timeout(Some(timeout))?;
        stream.set_write_timeout(Some(timeout))?;

        let mut builder = SslConnector::builder(SslMethod::tls())?;
        builder.set_verify(SslVerifyMode::NONE);
        let mut config = builder.build().configure()?;
        config.set_verify_hostname(false);

        let tls = config
            .connect(host, stream)
            .map_err(|e| ProbeError::Handshake(e.to_string()))?;
        let ssl = tls.ssl();

        let cipher = ssl.current_cipher().map(|c| CipherInfo {
            name: c.name().to_string(),
            protocol: c.version().to_string(),
            bits: c.bits().secret,
        });

        debug!(
            "TLS handshake with {}:{} negotiated {}",
            host,
            port,
            ssl.version_str()
        );

        Ok(TlsDetails {
            protocol: ssl.version_str().to_string(),
            cipher,
            certificate: match ssl.peer_certificate() {
                Some(cert) => Some(certificate_info(&cert.to_der()?)?),
                None => None,
            },
        })
    }
}

#[async_trait]
impl TlsProbe for OpensslTlsProbe {
    async fn fetch_tls_details(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<TlsDetails, ProbeError> {
        let (host, port) = tls_endpoint(url)?;
        tokio::task::spawn_blocking(move || Self::handshake(&host, port, timeout)).await?
    }
}

fn asn1_time_to_utc(time: &ASN1Time) -> DateTime<Utc> {
    DateTime::from_timestamp(time.timestamp(), 0).unwrap_or_default()
}

fn certificate_info(der: &[u8]) -> Result<CertificateInfo, ProbeError> {
    let (_, x509) = parse_x509_certificate(der)
        .map_err(|e| ProbeError::Certificate(e.to_string()))?;

    let subject_alt_names = match x509.subject_alternative_name() {
        Ok(Some(san)) => san
            .value
            .general_names
            .iter()
            .filter_map(|name| match name {
                GeneralName::DNSName(dns) => Some(dns.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };

    let validity = x509.validity();
    Ok(CertificateInfo {
        subject: x509.subject().to_string(),
        issuer: x509.issuer().to_string(),
        not_before: asn1_time_to_utc(&validity.not_before),
        not_after: asn1_time_to_utc(&validity.not_after),
        serial_number: x509.raw_serial_as_string(),
        subject_alt_names,
    })
}
