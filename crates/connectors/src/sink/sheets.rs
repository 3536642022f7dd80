use crate::sink::{GridSink, error::SinkError};
use async_trait::async_trait;
use model::records::grid::Grid;
use reqwest::{Client, Url};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com/v4";

/// Target of the spreadsheet publisher.
#[derive(Clone)]
pub struct SheetsSettings {
    pub api_base: String,
    pub spreadsheet_id: String,
    pub sheet_name: String,
    /// Pre-issued OAuth bearer token.
    pub access_token: String,
    pub banner_cell: String,
    pub grid_anchor: String,
}

impl SheetsSettings {
    pub fn new(spreadsheet_id: &str, sheet_name: &str, access_token: &str) -> Self {
        SheetsSettings {
            api_base: DEFAULT_API_BASE.to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            sheet_name: sheet_name.to_string(),
            access_token: access_token.to_string(),
            banner_cell: "A1".to_string(),
            grid_anchor: "A2".to_string(),
        }
    }

    /// A1 notation for `cell` on the configured tab, or the whole tab.
    pub fn range(&self, cell: Option<&str>) -> String {
        let tab = format!("'{}'", self.sheet_name.replace('\'', "''"));
        match cell {
            Some(cell) => format!("{tab}!{cell}"),
            None => tab,
        }
    }
}

impl fmt::Debug for SheetsSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetsSettings")
            .field("api_base", &self.api_base)
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("sheet_name", &self.sheet_name)
            .field("access_token", &"<redacted>")
            .field("banner_cell", &self.banner_cell)
            .field("grid_anchor", &self.grid_anchor)
            .finish()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange<'a> {
    range: &'a str,
    major_dimension: &'static str,
    values: &'a [Vec<String>],
}

/// Publishes to one tab of a spreadsheet through the Sheets v4 values API:
/// clear the tab, write the banner cell, write the grid at the anchor.
pub struct SheetsSink {
    client: Client,
    settings: SheetsSettings,
}

impl SheetsSink {
    pub fn new(settings: SheetsSettings) -> Self {
        SheetsSink {
            client: Client::new(),
            settings,
        }
    }

    fn values_url(&self, range: &str, suffix: &str) -> Result<Url, SinkError> {
        let mut url = Url::parse(&self.settings.api_base)
            .map_err(|e| SinkError::InvalidUrl(format!("{}: {e}", self.settings.api_base)))?;
        url.path_segments_mut()
            .map_err(|_| SinkError::InvalidUrl(self.settings.api_base.clone()))?
            .pop_if_empty()
            .extend(["spreadsheets", self.settings.spreadsheet_id.as_str(), "values"])
            .push(&format!("{range}{suffix}"));
        Ok(url)
    }

    pub async fn clear(&self) -> Result<(), SinkError> {
        let range = self.settings.range(None);
        let url = self.values_url(&range, ":clear")?;
        debug!("Clearing {}", range);

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.settings.access_token)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        check_status("clear", response).await
    }

    pub async fn update(&self, cell: &str, values: &[Vec<String>]) -> Result<(), SinkError> {
        let range = self.settings.range(Some(cell));
        let mut url = self.values_url(&range, "")?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");
        debug!("Writing {} row(s) to {}", values.len(), range);

        let body = ValueRange {
            range: &range,
            major_dimension: "ROWS",
            values,
        };
        let response = self
            .client
            .put(url)
            .bearer_auth(&self.settings.access_token)
            .json(&body)
            .send()
            .await?;
        check_status("update", response).await
    }
}

async fn check_status(
    operation: &'static str,
    response: reqwest::Response,
) -> Result<(), SinkError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(SinkError::Rejected {
        operation,
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl GridSink for SheetsSink {
    async fn publish(&self, banner: &str, grid: &Grid) -> Result<(), SinkError> {
        self.clear().await?;
        self.update(&self.settings.banner_cell, &[vec![banner.to_string()]])
            .await?;
        self.update(&self.settings.grid_anchor, grid.rows()).await?;

        info!(
            "Published {} rows to '{}' ({})",
            grid.height(),
            self.settings.sheet_name,
            self.settings.spreadsheet_id
        );
        Ok(())
    }
}
