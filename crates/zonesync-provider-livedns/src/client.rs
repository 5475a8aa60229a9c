// # LiveDNS Client
//
// All network I/O against the LiveDNS v5 API.
//
// ## Responsibilities
//
// - Map non-2xx statuses onto the error taxonomy (400, 401, 403, 404, other)
// - Walk paginated listings using `page`/`per_page` and the `total-count`
//   response header
// - Normalize record-sets as they are read: `@` becomes the empty name and
//   relative targets become absolute
//
// ## API Reference
//
// - Get zone: GET `/livedns/domains/:fqdn`
// - Create zone: POST `/livedns/domains`
// - List domains: GET `/livedns/domains?page=..&per_page=..`
// - List records: GET `/livedns/domains/:fqdn/records?page=..&per_page=..`
// - Create record-set: POST `/livedns/domains/:fqdn/records`
// - Delete record-set: DELETE `/livedns/domains/:fqdn/records/:name/:type`

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use zonesync_core::{Error, RecordType, Result};

use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
use crate::wire::{APEX, DomainEntry, WireRecord, apex_name};

const DOMAINS_PATH: &str = "/livedns/domains";

/// Client for the LiveDNS REST API
///
/// # Trust Level: Untrusted
///
/// The client makes exactly the requests its callers ask for, one at a
/// time, and surfaces every failure. It does not retry, back off or cache.
#[derive(Debug)]
pub struct LiveDnsClient<T = HttpTransport> {
    transport: T,
    per_page: u32,
}

impl<T: Transport> LiveDnsClient<T> {
    /// Create a client that lists `per_page` items per request
    pub fn new(transport: T, per_page: u32) -> Self {
        Self {
            transport,
            per_page,
        }
    }

    /// Fetch zone metadata
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when the zone does not exist.
    pub async fn zone(&self, zone_name: &str) -> Result<Value> {
        let response = self
            .request(ApiRequest::get(format!("{}/{}", DOMAINS_PATH, zone_name)))
            .await?;
        json_body(&response)
    }

    /// Create a zone with an empty initial record set
    pub async fn create_zone(&self, zone_name: &str) -> Result<Value> {
        let body = json!({ "fqdn": zone_name, "zone": {} });
        let response = self.request(ApiRequest::post(DOMAINS_PATH, body)).await?;
        json_body(&response)
    }

    /// Names of every domain visible to the token
    pub async fn domains(&self) -> Result<Vec<String>> {
        let domains: Vec<DomainEntry> = self.paginate(DOMAINS_PATH).await?;
        Ok(domains.into_iter().map(|d| d.fqdn).collect())
    }

    /// Every record-set of a zone, normalized
    ///
    /// `@` names become empty and target-bearing values lacking a trailing
    /// dot are made absolute by appending `.<zone_name>.`.
    pub async fn zone_records(&self, zone_name: &str) -> Result<Vec<WireRecord>> {
        let path = format!("{}/{}/records", DOMAINS_PATH, zone_name);
        let mut records: Vec<WireRecord> = self.paginate(&path).await?;

        for record in &mut records {
            normalize_record(record, zone_name);
        }

        Ok(records)
    }

    /// Create a record-set
    pub async fn create_record(&self, zone_name: &str, record: &WireRecord) -> Result<()> {
        let path = format!("{}/{}/records", DOMAINS_PATH, zone_name);
        self.request(ApiRequest::post(path, serde_json::to_value(record)?))
            .await?;
        Ok(())
    }

    /// Delete the whole record-set at `(record_name, record_type)`
    ///
    /// An empty `record_name` addresses the apex.
    pub async fn delete_record(
        &self,
        zone_name: &str,
        record_name: &str,
        record_type: &str,
    ) -> Result<()> {
        let path = format!(
            "{}/{}/records/{}/{}",
            DOMAINS_PATH,
            zone_name,
            apex_name(record_name),
            record_type
        );
        self.request(ApiRequest::delete(path)).await?;
        Ok(())
    }

    /// Send a request and turn non-2xx statuses into errors carrying the body
    async fn request(&self, request: ApiRequest) -> Result<ApiResponse> {
        let response = self.transport.send(request).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(Error::from_status(response.status, response.body))
        }
    }

    /// Collect every page of a listing
    ///
    /// Pages are requested from 1 until the number of items collected reaches
    /// the advertised `total-count`. A response without the header counts as
    /// the last page. A page with no items also ends the walk, so an
    /// overstated total cannot cause an endless loop.
    async fn paginate<D: DeserializeOwned>(&self, path: &str) -> Result<Vec<D>> {
        let mut items: Vec<D> = Vec::new();
        let mut page = 1;
        let mut total = 1;

        while items.len() < total {
            let response = self
                .request(ApiRequest::get(path).with_page(page, self.per_page))
                .await?;

            total = response.total_count.unwrap_or(items.len());

            let current: Vec<D> = serde_json::from_str(&response.body)?;
            if current.is_empty() {
                if items.len() < total {
                    tracing::warn!(
                        "{}: page {} is empty but only {} of {} items were received",
                        path,
                        page,
                        items.len(),
                        total
                    );
                }
                break;
            }

            items.extend(current);
            page += 1;
        }

        Ok(items)
    }
}

fn json_body(response: &ApiResponse) -> Result<Value> {
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&response.body)?)
}

fn normalize_record(record: &mut WireRecord, zone_name: &str) {
    if record.rrset_name == APEX {
        record.rrset_name.clear();
    }

    let target_bearing = record
        .rrset_type
        .parse::<RecordType>()
        .is_ok_and(|t| t.is_target_bearing());
    if target_bearing {
        for value in &mut record.rrset_values {
            if !value.ends_with('.') {
                *value = format!("{}.{}.", value, zone_name);
            }
        }
    }
}
