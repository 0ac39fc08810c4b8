use crate::domain::catalog::StatusFilter;
use crate::entities::offer_entity as offers;
use crate::error::{AppError, AppResult};
use crate::models::ExportQuery;
use crate::services::CatalogService;
use crate::utils::parse_client_datetime;
use chrono::{DateTime, Utc};

/// Column order is a stable contract with downstream spreadsheet tooling;
/// reorder only with a version bump.
pub const EXPORT_HEADER: &str = "id,title,description,price_cents,original_price_cents,qty_left,qty_total,expires_at,archived_at,created_at";

#[derive(Clone)]
pub struct ExportService {
    catalog: CatalogService,
}

impl ExportService {
    pub fn new(catalog: CatalogService) -> Self {
        Self { catalog }
    }

    /// Renders the merchant's offers (all by default, optionally narrowed
    /// by status and creation date range) as CSV in feed order.
    pub async fn export_offers_csv(&self, query: &ExportQuery) -> AppResult<String> {
        let from = parse_range_bound(query.date_from.as_deref(), "from")?;
        let to = parse_range_bound(query.date_to.as_deref(), "to")?;
        let status = query.status.unwrap_or(StatusFilter::All);

        let rows = self
            .catalog
            .merchant_rows(&query.restaurant_id, status)
            .await?;
        let rows: Vec<offers::Model> = rows
            .into_iter()
            .filter(|o| from.is_none_or(|f| o.created_at >= f))
            .filter(|o| to.is_none_or(|t| o.created_at <= t))
            .collect();
        Ok(render_csv(&rows))
    }
}

fn parse_range_bound(
    value: Option<&str>,
    field: &'static str,
) -> AppResult<Option<DateTime<Utc>>> {
    match value {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_client_datetime(s)
            .map(Some)
            .ok_or_else(|| AppError::validation(field, "must be an ISO-8601 date or date-time")),
    }
}

pub fn render_csv(rows: &[offers::Model]) -> String {
    let mut out = String::from(EXPORT_HEADER);
    out.push('\n');
    for offer in rows {
        let fields = [
            csv_field(&offer.id),
            csv_field(&offer.title),
            csv_field(offer.description.as_deref().unwrap_or("")),
            offer.price_cents.to_string(),
            offer
                .original_price_cents
                .map(|v| v.to_string())
                .unwrap_or_default(),
            offer.qty_left.to_string(),
            offer.qty_total.to_string(),
            offer
                .expires_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
            offer
                .archived_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
            offer.created_at.to_rfc3339(),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

fn csv_field(raw: &str) -> String {
    if raw.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(id: &str, title: &str) -> offers::Model {
        offers::Model {
            id: id.to_string(),
            restaurant_id: "RID_1a2b3c4d".to_string(),
            title: title.to_string(),
            description: None,
            price_cents: 500,
            original_price_cents: None,
            qty_total: 3,
            qty_left: 2,
            expires_at: None,
            archived_at: None,
            created_at: "2025-08-01T12:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_header_row_and_column_order() {
        let csv = render_csv(&[]);
        assert_eq!(
            csv,
            "id,title,description,price_cents,original_price_cents,qty_left,qty_total,expires_at,archived_at,created_at\n"
        );
    }

    #[test]
    fn test_optional_fields_render_empty() {
        let csv = render_csv(&[offer("o1", "Pasta box")]);
        let line = csv.lines().nth(1).unwrap();
        assert_eq!(line, "o1,Pasta box,,500,,2,3,,,2025-08-01T12:00:00+00:00");
    }

    #[test]
    fn test_fields_with_delimiters_are_quoted() {
        let mut o = offer("o1", "Soup, bread \"combo\"");
        o.description = Some("line one\nline two".to_string());
        let csv = render_csv(&[o]);
        let line = csv.lines().nth(1).unwrap();
        assert!(line.starts_with("o1,\"Soup, bread \"\"combo\"\"\",\"line one"));
    }

    #[test]
    fn test_bad_range_bound_is_a_validation_error() {
        assert!(parse_range_bound(Some("not-a-date"), "from").is_err());
        assert!(parse_range_bound(Some("2025-08-01"), "from").unwrap().is_some());
        assert!(parse_range_bound(None, "from").unwrap().is_none());
        assert!(parse_range_bound(Some(" "), "to").unwrap().is_none());
    }
}
