//! SMTP relay settings for a region

use serde::{Deserialize, Serialize};

/// Ports accepting STARTTLS
pub const STARTTLS_PORTS: [u16; 2] = [25, 587];
/// Port for implicit TLS (TLS wrapper)
pub const TLS_WRAPPER_PORT: u16 = 465;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmtpSettings {
    pub host: String,
    pub starttls_ports: Vec<u16>,
    pub tls_wrapper_port: u16,
}

impl SmtpSettings {
    pub fn for_region(region: &str) -> Self {
        Self {
            host: format!("email-smtp.{}.amazonaws.com", region),
            starttls_ports: STARTTLS_PORTS.to_vec(),
            tls_wrapper_port: TLS_WRAPPER_PORT,
        }
    }
}
