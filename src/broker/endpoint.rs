use rumqttc::Transport;
use url::Url;

use crate::utils::error::ConnectError;

/// Transport family selected by the url scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Tcp,
    Tls,
    Ws,
    Wss,
}

impl Scheme {
    fn from_url_scheme(scheme: &str) -> Option<Self> {
        match scheme {
            "tcp" | "mqtt" => Some(Scheme::Tcp),
            "ssl" | "tls" | "mqtts" => Some(Scheme::Tls),
            "ws" => Some(Scheme::Ws),
            "wss" => Some(Scheme::Wss),
            _ => None,
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Tcp => 1883,
            Scheme::Tls => 8883,
            Scheme::Ws => 80,
            Scheme::Wss => 443,
        }
    }
}

/// Where the broker lives, in the shape `rumqttc::MqttOptions` wants it.
///
/// For websocket transports `host` is the whole url, path included, since the
/// client library builds the upgrade request from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerEndpoint {
    pub scheme: Scheme,
    pub host: String,
    pub port: u16,
}

impl BrokerEndpoint {
    pub fn parse(raw: &str) -> Result<Self, ConnectError> {
        let invalid = |reason: String| ConnectError::InvalidUrl {
            url: raw.to_string(),
            reason,
        };

        let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
        let scheme = Scheme::from_url_scheme(url.scheme())
            .ok_or_else(|| invalid(format!("unsupported scheme '{}'", url.scheme())))?;
        let port = url.port().unwrap_or(scheme.default_port());

        let host = match scheme {
            Scheme::Ws | Scheme::Wss => raw.to_string(),
            Scheme::Tcp | Scheme::Tls => url
                .host_str()
                .filter(|host| !host.is_empty())
                .ok_or_else(|| invalid("missing host".to_string()))?
                .to_string(),
        };

        Ok(BrokerEndpoint { scheme, host, port })
    }

    pub fn transport(&self) -> Transport {
        match self.scheme {
            Scheme::Tcp => Transport::Tcp,
            Scheme::Tls => Transport::tls_with_default_config(),
            Scheme::Ws => Transport::Ws,
            Scheme::Wss => Transport::wss_with_default_config(),
        }
    }
}
