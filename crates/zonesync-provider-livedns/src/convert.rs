//! Record-set translation between the wire and the zone model
//!
//! [`data_for`] and [`values_for`] are the two halves of the per-type
//! mapping; each is one exhaustive match over the record type, so adding a
//! type to the model forces both directions to be written.
//!
//! | Type                       | Wire value                          |
//! |----------------------------|-------------------------------------|
//! | A, AAAA, NS, TXT           | the value itself (TXT `;` ↔ `\;`)   |
//! | ALIAS, CNAME, DNAME, PTR   | single value                        |
//! | CAA                        | `<flags> <tag> "<value>"`           |
//! | MX                         | `<preference> <exchange>`           |
//! | SRV                        | `<priority> <weight> <port> <target>` |
//! | SSHFP                      | `<algorithm> <fp_type> <fingerprint>` |
//! | TLSA                       | `<usage> <selector> <matching> <data>` |

use zonesync_core::zone::{CaaValue, MxValue, SrvValue, SshfpValue, TlsaValue};
use zonesync_core::{Error, Record, RecordData, RecordType, Result};

use crate::wire::{WireRecord, apex_name};

/// Build a model record from wire values already normalized by the client
pub fn record_for(
    name: &str,
    record_type: RecordType,
    ttl: u32,
    values: &[String],
    lenient: bool,
) -> Result<Record> {
    let data = data_for(record_type, values, lenient)?;
    Record::new(name, ttl, data, lenient)
}

/// Build the wire payload creating `record`
pub fn params_for(record: &Record) -> WireRecord {
    WireRecord {
        rrset_name: apex_name(&record.name).to_string(),
        rrset_ttl: record.ttl,
        rrset_type: record.record_type().to_string(),
        rrset_values: values_for(&record.data),
    }
}

/// Wire values → typed record data
///
/// A malformed value fails the conversion, or is dropped with a warning
/// when `lenient` is set.
pub fn data_for(record_type: RecordType, values: &[String], lenient: bool) -> Result<RecordData> {
    let data = match record_type {
        RecordType::A => RecordData::A(values.to_vec()),
        RecordType::Aaaa => RecordData::Aaaa(values.to_vec()),
        RecordType::Ns => RecordData::Ns(values.to_vec()),
        RecordType::Txt => RecordData::Txt(values.iter().map(|v| v.replace(';', "\\;")).collect()),
        RecordType::Alias => RecordData::Alias(single(record_type, values)?),
        RecordType::Cname => RecordData::Cname(single(record_type, values)?),
        RecordType::Dname => RecordData::Dname(single(record_type, values)?),
        RecordType::Ptr => RecordData::Ptr(single(record_type, values)?),
        RecordType::Caa => RecordData::Caa(parse_each(record_type, values, lenient, |v| {
            let [flags, tag, value] = fields::<3>(v)?;
            Some(CaaValue {
                flags: flags.parse().ok()?,
                tag: tag.to_string(),
                value: unquote(value).to_string(),
            })
        })?),
        RecordType::Mx => RecordData::Mx(parse_each(record_type, values, lenient, |v| {
            let [preference, exchange] = fields::<2>(v)?;
            Some(MxValue {
                preference: preference.parse().ok()?,
                exchange: exchange.to_string(),
            })
        })?),
        RecordType::Srv => RecordData::Srv(parse_each(record_type, values, lenient, |v| {
            let [priority, weight, port, target] = fields::<4>(v)?;
            Some(SrvValue {
                priority: priority.parse().ok()?,
                weight: weight.parse().ok()?,
                port: port.parse().ok()?,
                target: target.to_string(),
            })
        })?),
        RecordType::Sshfp => RecordData::Sshfp(parse_each(record_type, values, lenient, |v| {
            let [algorithm, fingerprint_type, fingerprint] = fields::<3>(v)?;
            Some(SshfpValue {
                algorithm: algorithm.parse().ok()?,
                fingerprint_type: fingerprint_type.parse().ok()?,
                fingerprint: fingerprint.to_string(),
            })
        })?),
        RecordType::Tlsa => RecordData::Tlsa(parse_each(record_type, values, lenient, |v| {
            let [certificate_usage, selector, matching_type, data] = fields::<4>(v)?;
            Some(TlsaValue {
                certificate_usage: certificate_usage.parse().ok()?,
                selector: selector.parse().ok()?,
                matching_type: matching_type.parse().ok()?,
                certificate_association_data: data.to_string(),
            })
        })?),
    };

    Ok(data)
}

/// Typed record data → wire values
pub fn values_for(data: &RecordData) -> Vec<String> {
    match data {
        RecordData::A(values) | RecordData::Aaaa(values) | RecordData::Ns(values) => values.clone(),
        RecordData::Txt(values) => values.iter().map(|v| v.replace("\\;", ";")).collect(),
        RecordData::Alias(value)
        | RecordData::Cname(value)
        | RecordData::Dname(value)
        | RecordData::Ptr(value) => vec![value.clone()],
        RecordData::Caa(values) => values
            .iter()
            .map(|v| format!("{} {} \"{}\"", v.flags, v.tag, v.value))
            .collect(),
        RecordData::Mx(values) => values
            .iter()
            .map(|v| format!("{} {}", v.preference, v.exchange))
            .collect(),
        RecordData::Srv(values) => values
            .iter()
            .map(|v| format!("{} {} {} {}", v.priority, v.weight, v.port, v.target))
            .collect(),
        RecordData::Sshfp(values) => values
            .iter()
            .map(|v| format!("{} {} {}", v.algorithm, v.fingerprint_type, v.fingerprint))
            .collect(),
        RecordData::Tlsa(values) => values
            .iter()
            .map(|v| {
                format!(
                    "{} {} {} {}",
                    v.certificate_usage,
                    v.selector,
                    v.matching_type,
                    v.certificate_association_data
                )
            })
            .collect(),
    }
}

fn single(record_type: RecordType, values: &[String]) -> Result<String> {
    values
        .first()
        .cloned()
        .ok_or_else(|| Error::invalid_record(format!("{} record-set has no value", record_type)))
}

fn parse_each<T>(
    record_type: RecordType,
    values: &[String],
    lenient: bool,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Vec<T>> {
    let mut parsed = Vec::with_capacity(values.len());
    for value in values {
        match parse(value.as_str()) {
            Some(v) => parsed.push(v),
            None if lenient => {
                tracing::warn!("Dropping malformed {} value (lenient): {:?}", record_type, value)
            }
            None => {
                return Err(Error::invalid_record(format!(
                    "malformed {} value: {:?}",
                    record_type, value
                )));
            }
        }
    }
    Ok(parsed)
}

// Split on the first N-1 spaces; the last field keeps any remaining spaces
fn fields<const N: usize>(value: &str) -> Option<[&str; N]> {
    let parts: Vec<&str> = value.splitn(N, ' ').collect();
    parts.try_into().ok()
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
