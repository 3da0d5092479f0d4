use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use hr_dash::fetch::{BasicClient, Bearer, fetch_json};
use hr_dash::sheets::SheetKind;
use hr_dash::source::SheetSource;
use hr_dash::table::RawTable;

/// OAuth credential bundle stored on disk as a JSON file.
///
/// The bundle carries a refresh token scoped to read-only access on the
/// spreadsheet and its storage backend; it is exchanged for a short-lived
/// access token at connect time.
#[derive(Deserialize)]
pub struct SheetCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl SheetCredentials {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read credentials file '{path}'"))?;
        serde_json::from_str(&content)
            .with_context(|| format!("credentials file '{path}' is not valid JSON"))
    }
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    refresh_token: &'a str,
    grant_type: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Read-only client for the Google Sheets values API.
pub struct GoogleSheetsClient {
    base_url: String,
    spreadsheet_id: String,
    http: Bearer<BasicClient>,
}

impl GoogleSheetsClient {
    pub async fn connect(credentials: &SheetCredentials, spreadsheet_id: String) -> Result<Self> {
        let access_token = Self::exchange_token(credentials).await?;

        Ok(Self {
            base_url: "https://sheets.googleapis.com".to_string(),
            spreadsheet_id,
            http: Bearer::new(BasicClient::new(), &access_token),
        })
    }

    async fn exchange_token(credentials: &SheetCredentials) -> Result<String> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let token_request = TokenRequest {
            client_id: &credentials.client_id,
            client_secret: &credentials.client_secret,
            refresh_token: &credentials.refresh_token,
            grant_type: "refresh_token",
        };

        let response = client
            .post("https://oauth2.googleapis.com/token")
            .form(&token_request)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send token request: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Token exchange failed with status {}: {}",
                status,
                body
            ));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to parse token response: {}", e))?;

        Ok(token_response.access_token)
    }
}

#[async_trait]
impl SheetSource for GoogleSheetsClient {
    async fn fetch_sheet(&self, kind: SheetKind) -> Result<RawTable> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}?valueRenderOption=FORMATTED_VALUE",
            self.base_url,
            self.spreadsheet_id,
            kind.as_tab_title()
        );

        let json = fetch_json(&self.http, &url).await?;
        Ok(values_to_table(&json))
    }
}

/// Converts a `values.get` response into a [`RawTable`].
///
/// The API returns `{"values": [[...], ...]}` where the first row is the
/// header; trailing empty cells are omitted per row, which `from_records`
/// pads back out. A missing or empty grid yields an empty table.
fn values_to_table(json: &serde_json::Value) -> RawTable {
    let Some(grid) = json["values"].as_array() else {
        return RawTable::default();
    };

    let mut rows_iter = grid.iter().map(|row| {
        row.as_array()
            .map(|cells| {
                cells
                    .iter()
                    .map(|c| match c {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<String>>()
            })
            .unwrap_or_default()
    });

    let Some(columns) = rows_iter.next() else {
        return RawTable::default();
    };

    RawTable::from_records(columns, rows_iter.collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_values_to_table_pads_ragged_rows() {
        let json = json!({
            "range": "CLIMATE!A1:Z100",
            "values": [
                ["Carimbo de data/hora", "COLABORADOR", "Satisfação pelas atividades realizadas"],
                ["13/05/2024 08:00:00", "Ana", "9"],
                ["14/05/2024 08:00:00", "Bruno"],
            ]
        });

        let table = values_to_table(&json);

        assert_eq!(table.columns.len(), 3);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[1], vec!["14/05/2024 08:00:00", "Bruno", ""]);
    }

    #[test]
    fn test_values_to_table_numbers_become_strings() {
        let json = json!({"values": [["Iniciativa"], [7], [9.5]]});
        let table = values_to_table(&json);

        assert_eq!(table.rows[0][0], "7");
        assert_eq!(table.rows[1][0], "9.5");
    }

    #[test]
    fn test_values_to_table_empty_grid() {
        assert!(values_to_table(&json!({})).is_empty());
        assert!(values_to_table(&json!({"values": []})).is_empty());
    }
}
