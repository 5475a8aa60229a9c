//! Test doubles and common utilities for LiveDNS contract tests
//!
//! [`MockTransport`] answers requests from a routing table and records
//! every request it sees, so tests can assert on the exact API traffic.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use zonesync_core::error::Result;
use zonesync_core::{Record, RecordData, Zone};
use zonesync_provider_livedns::{ApiRequest, ApiResponse, LiveDnsProvider, Method, Transport};

pub const ZONE: &str = "unit.tests.";
pub const RECORDS_PATH: &str = "/livedns/domains/unit.tests/records";
pub const ZONE_PATH: &str = "/livedns/domains/unit.tests";
pub const DOMAINS_PATH: &str = "/livedns/domains";

pub const NOT_FOUND_BODY: &str = r#"{"code": 404, "message": "The resource could not be found.",
    "object": "HTTPNotFound", "cause": "Not Found"}"#;

struct Route {
    method: Method,
    path: String,
    page: Option<u32>,
    responses: VecDeque<ApiResponse>,
}

#[derive(Default)]
struct MockState {
    routes: Vec<Route>,
    requests: Vec<ApiRequest>,
}

/// A scripted Transport that records requests
///
/// Routes match on method, path and (optionally) page. A route given
/// several responses returns them in order and then keeps repeating the
/// last one. Unrouted requests get a 500.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` (any page) with `response`
    pub fn on(&self, method: Method, path: &str, response: ApiResponse) -> &Self {
        self.add_route(method, path, None, response)
    }

    /// Answer GET `path` for one specific page with `response`
    pub fn on_page(&self, path: &str, page: u32, response: ApiResponse) -> &Self {
        self.add_route(Method::Get, path, Some(page), response)
    }

    /// Every request seen so far, in order
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Number of requests seen so far
    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    /// Requests made with `method`, as `(path, page)` pairs
    pub fn calls(&self, method: Method) -> Vec<(String, Option<u32>)> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method)
            .map(|r| {
                let page = r.page();
                (r.path, page)
            })
            .collect()
    }

    /// Forget recorded requests, keeping the routes
    pub fn clear_requests(&self) {
        self.state.lock().unwrap().requests.clear();
    }

    fn add_route(
        &self,
        method: Method,
        path: &str,
        page: Option<u32>,
        response: ApiResponse,
    ) -> &Self {
        let mut state = self.state.lock().unwrap();
        let existing = state
            .routes
            .iter()
            .position(|r| r.method == method && r.path == path && r.page == page);
        match existing {
            Some(i) => state.routes[i].responses.push_back(response),
            None => state.routes.push(Route {
                method,
                path: path.to_string(),
                page,
                responses: VecDeque::from([response]),
            }),
        }
        drop(state);
        self
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());

        let page = request.page();
        let route = state.routes.iter_mut().find(|r| {
            r.method == request.method
                && r.path == request.path
                && r.page.is_none_or(|p| Some(p) == page)
        });

        let response = match route {
            Some(route) if route.responses.len() > 1 => route.responses.pop_front(),
            Some(route) => route.responses.front().cloned(),
            None => None,
        };

        Ok(response.unwrap_or_else(|| {
            ApiResponse::new(
                500,
                format!("unexpected request: {:?} {}", request.method, request.path),
            )
        }))
    }
}

/// Provider over a fresh mock transport, paging by `per_page`
pub fn provider(per_page: u32) -> (LiveDnsProvider<MockTransport>, MockTransport) {
    let transport = MockTransport::new();
    let provider = LiveDnsProvider::with_transport("test_id", transport.clone(), per_page);
    (provider, transport)
}

/// 200 response carrying `body` as JSON
pub fn ok_json(body: Value) -> ApiResponse {
    ApiResponse::new(200, body.to_string())
}

/// 200 page of a listing advertising `total` items
pub fn page(items: Value, total: usize) -> ApiResponse {
    ok_json(items).with_total_count(total)
}

pub fn not_found() -> ApiResponse {
    ApiResponse::new(404, NOT_FOUND_BODY)
}

pub fn created() -> ApiResponse {
    ApiResponse::new(201, r#"{"message": "Created"}"#)
}

/// One wire record-set as JSON
pub fn rrset(name: &str, ttl: u32, rtype: &str, values: &[&str]) -> Value {
    json!({
        "rrset_name": name,
        "rrset_ttl": ttl,
        "rrset_type": rtype,
        "rrset_values": values,
    })
}

/// A realistic record listing for `unit.tests`, as the API returns it
pub fn unit_tests_records() -> Value {
    json!([
        rrset("@", 300, "A", &["1.2.3.4", "1.2.3.5"]),
        rrset("@", 3600, "CAA", &["0 issue \"ca.unit.tests\""]),
        rrset("@", 3600, "SSHFP", &[
            "1 1 7491973e5f8b39d5327cd4e08bc81b05f7710b49",
            "1 1 bf6b6825d2977c511a475bbefb88aad54a92ac73",
        ]),
        rrset("@", 10800, "LOC", &["52 22 23.000 N 4 53 32.000 E -2.00m 0.00m 10000m 10m"]),
        rrset("_srv._tcp", 600, "SRV", &["10 20 30 foo-1", "12 20 30 foo-2.unit.tests."]),
        rrset("_25._tcp.mx1", 3600, "TLSA", &["3 1 1 8a9a70596e869bed72c69d97a8895dfa"]),
        rrset("aaaa", 600, "AAAA", &["2601:644:500:e210:62f8:1dff:feb8:947a"]),
        rrset("cname", 300, "CNAME", &["www"]),
        rrset("mx", 300, "MX", &["10 smtp-4", "20 smtp-2.unit.tests."]),
        rrset("ptr", 300, "PTR", &["foo.bar.com."]),
        rrset("txt", 600, "TXT", &["Bah bah black sheep", "v=DKIM1;k=rsa;s=email"]),
        rrset("www", 300, "A", &["2.2.3.6"]),
    ])
}

/// Build a record, panicking on invalid data
pub fn record(name: &str, ttl: u32, data: RecordData) -> Record {
    Record::new(name, ttl, data, false).expect("valid record")
}

/// Build a validated A record
pub fn a(name: &str, ttl: u32, values: &[&str]) -> Record {
    record(name, ttl, RecordData::A(values.iter().map(|v| v.to_string()).collect()))
}

/// Build a `unit.tests.` zone holding `records`
pub fn zone_with(records: Vec<Record>) -> Zone {
    let mut zone = Zone::new(ZONE).expect("valid zone name");
    for record in records {
        zone.add_record(record, false).expect("record added");
    }
    zone
}
