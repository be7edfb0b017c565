//! Network request extraction from the `.network` log.
//!
//! The network log is independent of the main event stream: requests are
//! returned in archive-encounter order, unsorted.

use crate::parser::archive::TraceArchive;
use crate::parser::events::json_lines;
use crate::parser::schema::NetworkRequest;
use crate::utils::config::{NETWORK_SUFFIX, TIMING_PHASES};
use crate::utils::error::ParseError;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NetworkEntry {
    #[serde(rename = "type")]
    entry_type: Option<String>,
    snapshot: Option<ResourceSnapshot>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResourceSnapshot {
    request: Option<RequestPart>,
    response: Option<ResponsePart>,
    timings: Option<Map<String, Value>>,
    #[serde(rename = "_failureText")]
    failure_text: Option<String>,
    #[serde(rename = "_wasAborted")]
    was_aborted: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RequestPart {
    method: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ResponsePart {
    status: Option<i64>,
    status_text: Option<String>,
    headers: Option<Vec<Header>>,
    content: Option<Content>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Header {
    name: Option<String>,
    value: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Content {
    size: Option<i64>,
}

/// Extract every resource snapshot from the archive's network logs
///
/// **Public** - main entry point for network extraction
///
/// # Errors
/// * `ParseError::MalformedLine` - a network log line is not valid JSON
pub fn extract_network_requests(archive: &TraceArchive) -> Result<Vec<NetworkRequest>, ParseError> {
    let mut requests = Vec::new();

    for member in archive.members_with_suffix(NETWORK_SUFFIX) {
        for (line, value) in json_lines(&member.name, &member.data)? {
            let entry = match NetworkEntry::deserialize(&value) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping network entry at line {} in {}: {}", line, member.name, e);
                    continue;
                }
            };

            if entry.entry_type.as_deref() != Some("resource-snapshot") {
                continue;
            }

            requests.push(to_request(entry.snapshot.unwrap_or_default()));
        }
    }

    debug!("Extracted {} network requests", requests.len());
    Ok(requests)
}

/// Convert one snapshot into a request record
///
/// **Private** - internal conversion
fn to_request(snapshot: ResourceSnapshot) -> NetworkRequest {
    let request = snapshot.request.unwrap_or_default();
    let response = snapshot.response.unwrap_or_default();

    NetworkRequest {
        method: request.method.unwrap_or_else(|| "GET".to_string()),
        url: request.url.unwrap_or_default(),
        status: response.status.unwrap_or(0),
        status_text: response.status_text.unwrap_or_default(),
        failure_text: snapshot.failure_text,
        was_aborted: snapshot.was_aborted.unwrap_or(false),
        duration_ms: total_duration(snapshot.timings.as_ref()),
        response_size: response.content.and_then(|c| c.size).unwrap_or(0),
        content_type: content_type(response.headers.as_deref().unwrap_or_default()),
    }
}

/// Sum the named timing phases; missing or non-numeric phases count as 0
///
/// **Private** - internal utility
fn total_duration(timings: Option<&Map<String, Value>>) -> f64 {
    let Some(timings) = timings else {
        return 0.0;
    };

    TIMING_PHASES
        .iter()
        .filter_map(|phase| timings.get(*phase).and_then(Value::as_f64))
        .sum()
}

/// First header named content-type, case-insensitively
///
/// **Private** - internal utility
fn content_type(headers: &[Header]) -> Option<String> {
    headers
        .iter()
        .find(|header| {
            header
                .name
                .as_deref()
                .is_some_and(|name| name.eq_ignore_ascii_case("content-type"))
        })
        .and_then(|header| header.value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::archive::ArchiveMember;
    use serde_json::json;

    fn archive_with_network(lines: &[Value]) -> TraceArchive {
        let data = lines
            .iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>()
            .join("\n");

        TraceArchive::from_members(vec![ArchiveMember {
            name: "trace.network".to_string(),
            data: data.into_bytes(),
        }])
    }

    #[test]
    fn test_full_snapshot() {
        let archive = archive_with_network(&[json!({
            "type": "resource-snapshot",
            "snapshot": {
                "request": {"method": "POST", "url": "https://example.com/api"},
                "response": {
                    "status": 201,
                    "statusText": "Created",
                    "headers": [
                        {"name": "X-Other", "value": "1"},
                        {"name": "CONTENT-TYPE", "value": "application/json"},
                        {"name": "content-type", "value": "text/plain"}
                    ],
                    "content": {"size": 2048}
                },
                "timings": {"dns": 1.5, "connect": 2.0, "ssl": 0.5, "send": 1.0,
                            "wait": 10.0, "receive": 5.0, "blocked": 100.0}
            }
        })]);

        let requests = extract_network_requests(&archive).unwrap();
        let request = &requests[0];

        assert_eq!(request.method, "POST");
        assert_eq!(request.status, 201);
        assert_eq!(request.status_text, "Created");
        assert_eq!(request.duration_ms, 20.0);
        assert_eq!(request.response_size, 2048);
        assert_eq!(request.content_type.as_deref(), Some("application/json"));
        assert!(!request.is_failed());
    }

    #[test]
    fn test_defaults_and_missing_phases() {
        let archive = archive_with_network(&[json!({
            "type": "resource-snapshot",
            "snapshot": {"timings": {"wait": 7.0}, "_failureText": "net::ERR_CONNECTION_REFUSED",
                         "_wasAborted": true}
        })]);

        let request = &extract_network_requests(&archive).unwrap()[0];

        assert_eq!(request.method, "GET");
        assert_eq!(request.url, "");
        assert_eq!(request.status, 0);
        assert_eq!(request.duration_ms, 7.0);
        assert_eq!(request.response_size, 0);
        assert_eq!(request.content_type, None);
        assert!(request.was_aborted);
        assert!(request.is_failed());
    }

    #[test]
    fn test_non_snapshot_entries_skipped_and_order_kept() {
        let archive = archive_with_network(&[
            json!({"type": "resource-snapshot", "snapshot": {"request": {"url": "b"}, "timestamp": 9.0}}),
            json!({"type": "request-started", "timestamp": 1.0}),
            json!({"type": "resource-snapshot", "snapshot": {"request": {"url": "a"}, "timestamp": 1.0}}),
        ]);

        let urls: Vec<String> = extract_network_requests(&archive)
            .unwrap()
            .into_iter()
            .map(|r| r.url)
            .collect();

        assert_eq!(urls, vec!["b", "a"]);
    }

    #[test]
    fn test_missing_network_member() {
        let archive = TraceArchive::default();
        assert!(extract_network_requests(&archive).unwrap().is_empty());
    }
}
