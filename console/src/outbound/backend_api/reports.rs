//! `ReportSource` over `/invoicing/reports/*`.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::{Method, StatusCode, Url};

use super::client::BackendApiClient;
use super::dto::OrderResponseDto;
use crate::domain::ports::{BackendError, ReportSource};
use crate::domain::{ReportCriteria, ReportQuery, ReportRow};

/// Local date-time with millisecond precision, as the backend parses it.
const WIRE_DATE_TIME: &str = "%Y-%m-%dT%H:%M:%S%.3f";

fn endpoint_segment(criteria: &ReportCriteria) -> &'static str {
    match criteria {
        ReportCriteria::ByTaxId { .. } => "by-nit",
        ReportCriteria::ByModule { .. } => "by-module",
        ReportCriteria::General => "general",
        ReportCriteria::ByProvider { .. } => "by-provider",
        ReportCriteria::ByItemCategory { .. } => "by-item-category",
    }
}

fn append_query(url: &mut Url, query: &ReportQuery) {
    let mut pairs = url.query_pairs_mut();
    match &query.criteria {
        ReportCriteria::ByTaxId { nit } => {
            pairs.append_pair("nit", nit);
        }
        ReportCriteria::ByModule { module } => {
            pairs.append_pair("moduleRole", module.as_str());
        }
        ReportCriteria::General => {}
        ReportCriteria::ByProvider { provider_name } => {
            pairs.append_pair("providerName", provider_name);
        }
        ReportCriteria::ByItemCategory { category } => {
            pairs.append_pair("category", category);
        }
    }
    if let Some(start) = query.bounds.start() {
        pairs.append_pair("startDate", &wire_date_time(start));
    }
    if let Some(end) = query.bounds.end() {
        pairs.append_pair("endDate", &wire_date_time(end));
    }
    drop(pairs);
    if url.query() == Some("") {
        url.set_query(None);
    }
}

fn wire_date_time(instant: NaiveDateTime) -> String {
    instant.format(WIRE_DATE_TIME).to_string()
}

#[async_trait]
impl ReportSource for BackendApiClient {
    async fn fetch_report(&self, query: &ReportQuery) -> Result<Vec<ReportRow>, BackendError> {
        let mut url = self.endpoint(["invoicing", "reports", endpoint_segment(&query.criteria)])?;
        append_query(&mut url, query);

        let response = self.send::<()>(Method::GET, url, None).await?;
        if response.status == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }
        let orders = response.into_success()?.decode::<Vec<OrderResponseDto>>()?;
        Ok(orders.into_iter().map(ReportRow::from).collect())
    }
}
