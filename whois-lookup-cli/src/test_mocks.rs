use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use whois_lookup_toolbox::{ToolboxError, ToolboxResult, WhoisLookup, WhoisResult};

/// Test-only lookup backed by a fixed table; unknown domains fail with
/// `ApiError("Domain not found")`.
#[derive(Default)]
pub struct FakeLookup {
    results: HashMap<String, WhoisResult>,
    calls: Mutex<Vec<String>>,
}

impl FakeLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(mut self, domain: &str, result: WhoisResult) -> Self {
        self.results.insert(domain.to_string(), result);
        self
    }

    /// Domains passed to `lookup`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WhoisLookup for FakeLookup {
    async fn lookup(&self, domain: &str) -> ToolboxResult<WhoisResult> {
        self.calls.lock().unwrap().push(domain.to_string());
        self.results
            .get(domain)
            .cloned()
            .ok_or_else(|| ToolboxError::ApiError("Domain not found".to_string()))
    }
}

pub fn sample_result(domain: &str) -> WhoisResult {
    WhoisResult {
        domain: domain.to_string(),
        registrar: Some("Example Registrar Inc.".to_string()),
        created_date: Some("1995-08-14T04:00:00Z".to_string()),
        expiry_date: Some("2030-08-13T04:00:00Z".to_string()),
        updated_date: None,
        status: vec!["clientTransferProhibited".to_string()],
        nameservers: vec!["ns1.example.net".to_string(), "ns2.example.net".to_string()],
        registrant: None,
        admin: None,
        tech: None,
    }
}
