use std::{fmt, net::IpAddr, sync::LazyLock};

use regex::Regex;

// tried in order, first match wins
static USERNAME_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"invalid user (\S+)").expect("regex"),
        Regex::new(r"Failed password for (\S+)").expect("regex"),
    ]
});

static ADDRESS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"from (\S+)").expect("regex"));

const LOCALHOST: [&str; 2] = ["127.0.0.1", "::1"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressKind {
    Ipv4,
    Ipv6,
    Invalid,
    None,
}

impl AddressKind {
    pub fn classify(token: &str) -> Self {
        // a zone suffix (`fe80::1%eth0`) is only valid on IPv6 and must be non-empty
        let (addr, scoped) = match token.split_once('%') {
            Some((addr, zone)) if !zone.is_empty() => (addr, true),
            Some(_) => return AddressKind::Invalid,
            None => (token, false),
        };
        match addr.parse::<IpAddr>() {
            Ok(IpAddr::V4(_)) if !scoped => AddressKind::Ipv4,
            Ok(IpAddr::V6(_)) => AddressKind::Ipv6,
            _ => AddressKind::Invalid,
        }
    }
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AddressKind::Ipv4 => "IPv4",
            AddressKind::Ipv6 => "IPv6",
            AddressKind::Invalid => "Invalid IP",
            AddressKind::None => "None",
        })
    }
}

/// One "Failed password" line broken into the parts worth showing.
///
/// Built once per line and never modified afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailedLoginEvent {
    pub raw_line: String,
    pub username: Option<String>,
    pub source_address: Option<String>,
    pub address_kind: AddressKind,
    pub is_localhost: bool,
    /// First three whitespace tokens, e.g. `Oct 19 10:02:11`. Not validated.
    pub timestamp: String,
}

impl FailedLoginEvent {
    pub fn parse(line: &str) -> Self {
        let username = USERNAME_PATTERNS
            .iter()
            .find_map(|re| re.captures(line))
            .map(|caps| caps[1].to_string());

        let source_address = ADDRESS_PATTERN
            .captures(line)
            .map(|caps| caps[1].to_string());

        let (address_kind, is_localhost) = match source_address.as_deref() {
            Some(addr) => (AddressKind::classify(addr), LOCALHOST.contains(&addr)),
            None => (AddressKind::None, false),
        };

        let timestamp = line.split_whitespace().take(3).collect::<Vec<_>>().join(" ");

        Self {
            raw_line: line.to_string(),
            username,
            source_address,
            address_kind,
            is_localhost,
            timestamp,
        }
    }

    /// `(IPv4)` style annotation, with ` - Localhost` appended for loopback.
    pub fn address_annotation(&self) -> String {
        if self.is_localhost {
            format!("({} - Localhost)", self.address_kind)
        } else {
            format!("({})", self.address_kind)
        }
    }
}
