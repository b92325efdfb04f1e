use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use crate::error::ProviderError;
use crate::fetch::{HttpClient, fetch_bytes};
use crate::parser::{RtpiResponse, parse_response};
use crate::services::arrivals_api::{ArrivalEntry, ArrivalsApi};

const DEFAULT_ENDPOINT: &str = "https://data.smartdublin.ie/cgi-bin/rtpi/realtimebusinformation";

const OK_CODE: &str = "0";
// RTPI reports "no arrivals for this stop" as an error code.
const NO_RESULTS_CODE: &str = "1";

/// [`ArrivalsApi`] implementation over the data.smartdublin.ie RTPI
/// realtime-bus-information endpoint.
pub struct SmartDublinClient<C> {
    base_url: String,
    http: C,
}

impl<C> SmartDublinClient<C> {
    pub fn new(http: C) -> Self {
        Self::with_base_url(http, DEFAULT_ENDPOINT)
    }

    /// Points the client at a different endpoint (used against test servers).
    pub fn with_base_url(http: C, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    fn request_url(&self, stop_id: &str, route_filter: &str) -> Result<Url, ProviderError> {
        let mut params = vec![("stopid", stop_id), ("format", "json")];
        if !route_filter.is_empty() {
            params.push(("routeid", route_filter));
        }
        Url::parse_with_params(&self.base_url, params)
            .map_err(|e| ProviderError::InvalidUrl(e.to_string()))
    }
}

/// Checks the RTPI error code and maps the raw rows to [`ArrivalEntry`]
/// values, rejecting rows that lack a due time or route.
fn entries_from_response(resp: RtpiResponse) -> Result<Vec<ArrivalEntry>, ProviderError> {
    if resp.errorcode == NO_RESULTS_CODE {
        return Ok(Vec::new());
    }
    if resp.errorcode != OK_CODE {
        return Err(ProviderError::Api {
            code: resp.errorcode,
            message: resp.errormessage,
        });
    }

    resp.results
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            let due_in = row.duetime.ok_or(ProviderError::MissingField {
                index,
                field: "duetime",
            })?;
            let route = row.route.ok_or(ProviderError::MissingField {
                index,
                field: "route",
            })?;
            Ok(ArrivalEntry { due_in, route })
        })
        .collect()
}

#[async_trait]
impl<C: HttpClient> ArrivalsApi for SmartDublinClient<C> {
    #[tracing::instrument(skip(self))]
    async fn stop_arrivals(
        &self,
        stop_id: &str,
        route_filter: &str,
    ) -> Result<Vec<ArrivalEntry>, ProviderError> {
        let url = self.request_url(stop_id, route_filter)?;
        let bytes = fetch_bytes(&self.http, url).await?;
        debug!(bytes = bytes.len(), "RTPI response received");

        entries_from_response(parse_response(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::RtpiResult;

    struct NoopHttp;

    #[async_trait]
    impl HttpClient for NoopHttp {
        async fn execute(&self, _req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            unreachable!("request_url tests never hit the network")
        }
    }

    fn row(duetime: Option<&str>, route: Option<&str>) -> RtpiResult {
        RtpiResult {
            duetime: duetime.map(str::to_string),
            route: route.map(str::to_string),
        }
    }

    fn response(errorcode: &str, results: Vec<RtpiResult>) -> RtpiResponse {
        RtpiResponse {
            errorcode: errorcode.to_string(),
            errormessage: String::new(),
            results,
        }
    }

    #[test]
    fn test_request_url_without_route_filter() {
        let client = SmartDublinClient::new(NoopHttp);
        let url = client.request_url("12345", "").unwrap();

        assert_eq!(
            url.as_str(),
            "https://data.smartdublin.ie/cgi-bin/rtpi/realtimebusinformation?stopid=12345&format=json"
        );
    }

    #[test]
    fn test_request_url_with_route_filter() {
        let client = SmartDublinClient::new(NoopHttp);
        let url = client.request_url("12345", "46A").unwrap();

        assert_eq!(
            url.as_str(),
            "https://data.smartdublin.ie/cgi-bin/rtpi/realtimebusinformation?stopid=12345&format=json&routeid=46A"
        );
    }

    #[test]
    fn test_entries_preserve_provider_order() {
        let resp = response(
            "0",
            vec![row(Some("5"), Some("46A")), row(Some("12"), Some("15"))],
        );

        let entries = entries_from_response(resp).unwrap();
        assert_eq!(
            entries,
            vec![
                ArrivalEntry {
                    due_in: "5".to_string(),
                    route: "46A".to_string()
                },
                ArrivalEntry {
                    due_in: "12".to_string(),
                    route: "15".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_no_results_code_is_empty_not_error() {
        let resp = response("1", vec![]);
        assert!(entries_from_response(resp).unwrap().is_empty());
    }

    #[test]
    fn test_other_error_codes_are_reported() {
        let mut resp = response("500", vec![]);
        resp.errormessage = "internal error".to_string();

        match entries_from_response(resp) {
            Err(ProviderError::Api { code, message }) => {
                assert_eq!(code, "500");
                assert_eq!(message, "internal error");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_duetime_is_reported_with_index() {
        let resp = response(
            "0",
            vec![row(Some("5"), Some("46A")), row(None, Some("15"))],
        );

        match entries_from_response(resp) {
            Err(ProviderError::MissingField { index, field }) => {
                assert_eq!(index, 1);
                assert_eq!(field, "duetime");
            }
            other => panic!("expected MissingField error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_route_is_reported() {
        let resp = response("0", vec![row(Some("5"), None)]);

        match entries_from_response(resp) {
            Err(ProviderError::MissingField { field, .. }) => assert_eq!(field, "route"),
            other => panic!("expected MissingField error, got {other:?}"),
        }
    }
}
