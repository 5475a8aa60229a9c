// # Records
//
// Normalized record-sets: one `Record` per `(name, type)` holding every value
// of that set. Names are relative to the zone, with the apex spelled as the
// empty string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Record types zonesync can model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address
    A,
    /// IPv6 address
    Aaaa,
    /// Apex alias (CNAME-like, resolved by the provider)
    Alias,
    /// Certification Authority Authorization
    Caa,
    /// Canonical name
    Cname,
    /// Delegation name
    Dname,
    /// Mail exchange
    Mx,
    /// Name server
    Ns,
    /// Pointer
    Ptr,
    /// Service locator
    Srv,
    /// SSH public key fingerprint
    Sshfp,
    /// TLS certificate association
    Tlsa,
    /// Text
    Txt,
}

impl RecordType {
    /// Every modelled record type, in mnemonic order
    pub const ALL: [RecordType; 13] = [
        RecordType::A,
        RecordType::Aaaa,
        RecordType::Alias,
        RecordType::Caa,
        RecordType::Cname,
        RecordType::Dname,
        RecordType::Mx,
        RecordType::Ns,
        RecordType::Ptr,
        RecordType::Srv,
        RecordType::Sshfp,
        RecordType::Tlsa,
        RecordType::Txt,
    ];

    /// The upper-case mnemonic, as used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Alias => "ALIAS",
            RecordType::Caa => "CAA",
            RecordType::Cname => "CNAME",
            RecordType::Dname => "DNAME",
            RecordType::Mx => "MX",
            RecordType::Ns => "NS",
            RecordType::Ptr => "PTR",
            RecordType::Srv => "SRV",
            RecordType::Sshfp => "SSHFP",
            RecordType::Tlsa => "TLSA",
            RecordType::Txt => "TXT",
        }
    }

    /// Whether values of this type name another host
    ///
    /// Providers may return these relative to the zone; they are made
    /// absolute before entering the model.
    pub fn is_target_bearing(&self) -> bool {
        matches!(
            self,
            RecordType::Alias
                | RecordType::Cname
                | RecordType::Dname
                | RecordType::Mx
                | RecordType::Ns
                | RecordType::Srv
        )
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        RecordType::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| Error::invalid_record(format!("unsupported record type: {}", s)))
    }
}

/// One CAA value
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CaaValue {
    pub flags: u8,
    pub tag: String,
    pub value: String,
}

/// One MX value
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MxValue {
    pub preference: u16,
    pub exchange: String,
}

/// One SRV value
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SrvValue {
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub target: String,
}

/// One SSHFP value
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SshfpValue {
    pub algorithm: u8,
    pub fingerprint_type: u8,
    pub fingerprint: String,
}

/// One TLSA value
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TlsaValue {
    pub certificate_usage: u8,
    pub selector: u8,
    pub matching_type: u8,
    pub certificate_association_data: String,
}

/// Typed payload of a record-set
///
/// ALIAS, CNAME, DNAME and PTR hold a single value; every other type holds
/// a value set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "UPPERCASE")]
pub enum RecordData {
    A(Vec<String>),
    Aaaa(Vec<String>),
    Alias(String),
    Caa(Vec<CaaValue>),
    Cname(String),
    Dname(String),
    Mx(Vec<MxValue>),
    Ns(Vec<String>),
    Ptr(String),
    Srv(Vec<SrvValue>),
    Sshfp(Vec<SshfpValue>),
    Tlsa(Vec<TlsaValue>),
    Txt(Vec<String>),
}

impl RecordData {
    /// The record type this payload belongs to
    pub fn record_type(&self) -> RecordType {
        match self {
            RecordData::A(_) => RecordType::A,
            RecordData::Aaaa(_) => RecordType::Aaaa,
            RecordData::Alias(_) => RecordType::Alias,
            RecordData::Caa(_) => RecordType::Caa,
            RecordData::Cname(_) => RecordType::Cname,
            RecordData::Dname(_) => RecordType::Dname,
            RecordData::Mx(_) => RecordType::Mx,
            RecordData::Ns(_) => RecordType::Ns,
            RecordData::Ptr(_) => RecordType::Ptr,
            RecordData::Srv(_) => RecordType::Srv,
            RecordData::Sshfp(_) => RecordType::Sshfp,
            RecordData::Tlsa(_) => RecordType::Tlsa,
            RecordData::Txt(_) => RecordType::Txt,
        }
    }

    /// Number of values held
    pub fn len(&self) -> usize {
        match self {
            RecordData::Alias(_)
            | RecordData::Cname(_)
            | RecordData::Dname(_)
            | RecordData::Ptr(_) => 1,
            RecordData::A(v) | RecordData::Aaaa(v) | RecordData::Ns(v) | RecordData::Txt(v) => {
                v.len()
            }
            RecordData::Caa(v) => v.len(),
            RecordData::Mx(v) => v.len(),
            RecordData::Srv(v) => v.len(),
            RecordData::Sshfp(v) => v.len(),
            RecordData::Tlsa(v) => v.len(),
        }
    }

    /// Whether the value set is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sort and de-duplicate value sets so equal sets compare equal
    fn normalize(&mut self) {
        fn set<T: Ord>(values: &mut Vec<T>) {
            values.sort();
            values.dedup();
        }

        match self {
            RecordData::A(v) | RecordData::Aaaa(v) | RecordData::Ns(v) | RecordData::Txt(v) => {
                set(v)
            }
            RecordData::Caa(v) => set(v),
            RecordData::Mx(v) => set(v),
            RecordData::Srv(v) => set(v),
            RecordData::Sshfp(v) => set(v),
            RecordData::Tlsa(v) => set(v),
            RecordData::Alias(_)
            | RecordData::Cname(_)
            | RecordData::Dname(_)
            | RecordData::Ptr(_) => {}
        }
    }
}

/// A normalized record-set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Name relative to the zone; empty at the apex
    pub name: String,
    /// Time-to-live in seconds
    pub ttl: u32,
    /// Typed values
    pub data: RecordData,
}

impl Record {
    /// Build a record, normalizing its value set and validating it
    ///
    /// With `lenient` set, validation problems are logged and the record is
    /// returned anyway.
    pub fn new(
        name: impl Into<String>,
        ttl: u32,
        mut data: RecordData,
        lenient: bool,
    ) -> Result<Self> {
        data.normalize();
        let record = Self {
            name: name.into(),
            ttl,
            data,
        };

        let reasons = record.validate();
        if !reasons.is_empty() {
            let msg = format!(
                "{} {}: {}",
                record.display_name(),
                record.record_type(),
                reasons.join(", ")
            );
            if !lenient {
                return Err(Error::invalid_record(msg));
            }
            tracing::warn!("Keeping invalid record (lenient): {}", msg);
        }

        Ok(record)
    }

    /// The record's type
    pub fn record_type(&self) -> RecordType {
        self.data.record_type()
    }

    /// Key identifying the record-set within its zone
    pub fn key(&self) -> (String, RecordType) {
        (self.name.clone(), self.record_type())
    }

    /// Name for log output, with the apex shown as `@`
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { "@" } else { &self.name }
    }

    /// Collect every validation problem with this record
    pub fn validate(&self) -> Vec<String> {
        let mut reasons = Vec::new();

        if self.data.is_empty() {
            reasons.push("missing value(s)".to_string());
        }

        match &self.data {
            RecordData::A(values) => {
                for v in values {
                    if v.parse::<Ipv4Addr>().is_err() {
                        reasons.push(format!("invalid IPv4 address \"{}\"", v));
                    }
                }
            }
            RecordData::Aaaa(values) => {
                for v in values {
                    if v.parse::<Ipv6Addr>().is_err() {
                        reasons.push(format!("invalid IPv6 address \"{}\"", v));
                    }
                }
            }
            RecordData::Alias(v) => {
                if !self.name.is_empty() {
                    reasons.push("non-root ALIAS not allowed".to_string());
                }
                check_fqdn(&mut reasons, "value", v);
            }
            RecordData::Cname(v) => {
                if self.name.is_empty() {
                    reasons.push("root CNAME not allowed".to_string());
                }
                check_fqdn(&mut reasons, "value", v);
            }
            RecordData::Dname(v) | RecordData::Ptr(v) => check_fqdn(&mut reasons, "value", v),
            RecordData::Ns(values) => {
                for v in values {
                    check_fqdn(&mut reasons, "value", v);
                }
            }
            RecordData::Txt(values) => {
                for v in values {
                    if has_unescaped_semicolon(v) {
                        reasons.push(format!("unescaped ; in \"{}\"", v));
                    }
                }
            }
            RecordData::Caa(values) => {
                for v in values {
                    if v.tag.is_empty() {
                        reasons.push("missing tag".to_string());
                    }
                }
            }
            RecordData::Mx(values) => {
                for v in values {
                    check_fqdn(&mut reasons, "exchange", &v.exchange);
                }
            }
            RecordData::Srv(values) => {
                if !is_service_name(&self.name) {
                    reasons.push(format!("invalid SRV name \"{}\"", self.name));
                }
                for v in values {
                    check_fqdn(&mut reasons, "target", &v.target);
                }
            }
            RecordData::Sshfp(values) => {
                for v in values {
                    if v.fingerprint.is_empty() {
                        reasons.push("missing fingerprint".to_string());
                    }
                }
            }
            RecordData::Tlsa(values) => {
                for v in values {
                    if v.certificate_association_data.is_empty() {
                        reasons.push("missing certificate_association_data".to_string());
                    }
                }
            }
        }

        reasons
    }
}

fn check_fqdn(reasons: &mut Vec<String>, field: &str, value: &str) {
    if value.is_empty() {
        reasons.push(format!("missing {}", field));
    } else if !value.ends_with('.') {
        reasons.push(format!("{} \"{}\" missing trailing .", field, value));
    }
}

fn has_unescaped_semicolon(value: &str) -> bool {
    let mut escaped = false;
    for c in value.chars() {
        match c {
            '\\' => escaped = !escaped,
            ';' if !escaped => return true,
            _ => escaped = false,
        }
    }
    false
}

// `_service._proto`, optionally followed by more labels
fn is_service_name(name: &str) -> bool {
    let mut labels = name.split('.');
    let service = labels.next().unwrap_or_default();
    let proto = labels.next().unwrap_or_default();
    service.len() > 1 && service.starts_with('_') && proto.len() > 1 && proto.starts_with('_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_type_mnemonics() {
        for t in RecordType::ALL {
            assert_eq!(t.as_str().parse::<RecordType>().unwrap(), t);
        }
        assert_eq!(RecordType::Aaaa.to_string(), "AAAA");
        assert!("LOC".parse::<RecordType>().is_err());
        assert!("a".parse::<RecordType>().is_err());
    }

    #[test]
    fn test_target_bearing_types() {
        let bearing: Vec<_> = RecordType::ALL
            .into_iter()
            .filter(RecordType::is_target_bearing)
            .collect();
        assert_eq!(
            bearing,
            vec![
                RecordType::Alias,
                RecordType::Cname,
                RecordType::Dname,
                RecordType::Mx,
                RecordType::Ns,
                RecordType::Srv,
            ]
        );
    }

    #[test]
    fn test_values_are_sorted_and_deduplicated() {
        let record = Record::new(
            "www",
            300,
            RecordData::A(vec!["2.2.3.4".into(), "1.2.3.4".into(), "2.2.3.4".into()]),
            false,
        )
        .unwrap();
        assert_eq!(record.data, RecordData::A(vec!["1.2.3.4".into(), "2.2.3.4".into()]));
    }

    #[test]
    fn test_invalid_address_rejected_unless_lenient() {
        let data = RecordData::A(vec!["6.2.3.4.".into()]);
        let err = Record::new("www", 300, data.clone(), false).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(_)));
        assert!(err.to_string().contains("invalid IPv4 address"));

        let record = Record::new("www", 300, data, true).unwrap();
        assert_eq!(record.data.len(), 1);
    }

    #[test]
    fn test_relative_targets_rejected() {
        let err = Record::new("cname", 300, RecordData::Cname("unit.tests".into()), false)
            .unwrap_err();
        assert!(err.to_string().contains("missing trailing ."));

        let mx = RecordData::Mx(vec![MxValue {
            preference: 10,
            exchange: "smtp-1".into(),
        }]);
        assert!(Record::new("mx", 300, mx, false).is_err());
    }

    #[test]
    fn test_apex_rules() {
        assert!(Record::new("", 300, RecordData::Cname("other.tests.".into()), false).is_err());
        assert!(Record::new("www", 300, RecordData::Alias("other.tests.".into()), false).is_err());
        assert!(Record::new("", 300, RecordData::Alias("other.tests.".into()), false).is_ok());
    }

    #[test]
    fn test_txt_semicolons_must_be_escaped() {
        let ok = RecordData::Txt(vec!["v=DKIM1\\;k=rsa".into()]);
        assert!(Record::new("txt", 600, ok, false).is_ok());

        let bad = RecordData::Txt(vec!["v=DKIM1;k=rsa".into()]);
        assert!(Record::new("txt", 600, bad, false).is_err());
    }

    #[test]
    fn test_srv_name_and_root_target() {
        let srv = RecordData::Srv(vec![SrvValue {
            priority: 0,
            weight: 0,
            port: 0,
            target: ".".into(),
        }]);
        assert!(Record::new("_imap._tcp", 600, srv.clone(), false).is_ok());
        assert!(Record::new("imap", 600, srv, false).is_err());
    }

    #[test]
    fn test_empty_values_rejected() {
        assert!(Record::new("ns", 300, RecordData::Ns(vec![]), false).is_err());
    }
}
