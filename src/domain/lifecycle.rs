//! Pure offer lifecycle rules. Everything here is a function of its
//! arguments: `now` is always passed in, and persistence happens in the
//! service layer. Both feeds and every merchant write path go through
//! these functions, so the public and merchant views can never disagree
//! about what counts as active.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::parse::{ParsePolicy, parse_money, parse_qty};
use crate::entities::offer_entity;
use crate::error::{AppError, AppResult};
use crate::models::{CreateOfferRequest, UpdateOfferRequest};
use crate::utils::{generate_offer_id, parse_client_datetime};

/// An offer is purchasable iff it is not archived, not expired, and has
/// stock. Computed at read time, never stored.
pub fn is_available(offer: &offer_entity::Model, now: DateTime<Utc>) -> bool {
    offer.archived_at.is_none()
        && offer.expires_at.is_none_or(|t| t > now)
        && offer.qty_left > 0
}

pub fn is_owned_by(offer: &offer_entity::Model, restaurant_id: &str) -> bool {
    offer.restaurant_id == restaurant_id
}

/// Validate creation input and build the full new row.
pub fn validate_create(
    request: &CreateOfferRequest,
    policy: ParsePolicy,
    now: DateTime<Utc>,
) -> AppResult<offer_entity::Model> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::validation("title", "title must not be empty"));
    }

    let price_cents = request
        .price_cents
        .as_ref()
        .and_then(parse_money)
        .filter(|p| *p > 0)
        .ok_or_else(|| {
            AppError::validation("price_cents", "price_cents must be a positive integer")
        })?;

    let original_price_cents =
        coerce_optional_money(request.original_price_cents.as_ref(), "original_price_cents", policy)?;

    // Absent, zero, negative and non-numeric all fall back to a single unit.
    let qty_total = request
        .qty_total
        .as_ref()
        .and_then(parse_qty)
        .filter(|q| *q > 0)
        .unwrap_or(1);
    let qty_left = request
        .qty_left
        .as_ref()
        .and_then(parse_qty)
        .unwrap_or(qty_total)
        .clamp(0, qty_total);

    let expires_at =
        coerce_optional_timestamp(request.expires_at.as_deref(), "expires_at", policy)?;

    Ok(offer_entity::Model {
        id: generate_offer_id(),
        restaurant_id: request.restaurant_id.clone(),
        title: title.to_string(),
        description: request
            .description
            .clone()
            .filter(|d| !d.is_empty()),
        price_cents,
        original_price_cents,
        qty_total,
        qty_left,
        expires_at,
        archived_at: None,
        created_at: now,
    })
}

/// Apply a partial update and return the full new row. Absent fields stay
/// untouched; an explicit null clears only the nullable fields. Price
/// positivity and qty cross-field bounds are intentionally not re-checked
/// here (creation-time constraints only).
pub fn apply_update(
    existing: &offer_entity::Model,
    patch: &UpdateOfferRequest,
    policy: ParsePolicy,
) -> AppResult<offer_entity::Model> {
    let mut updated = existing.clone();

    if let Some(title) = &patch.title {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::validation("title", "title must not be empty"));
        }
        updated.title = title.to_string();
    }

    match &patch.description {
        None => {}
        Some(None) => updated.description = None,
        Some(Some(d)) => updated.description = Some(d.clone()).filter(|d| !d.is_empty()),
    }

    if let Some(value) = &patch.price_cents {
        match parse_money(value) {
            Some(price) => updated.price_cents = price,
            None => reject_or_skip(value, "price_cents", policy)?,
        }
    }

    match &patch.original_price_cents {
        None => {}
        Some(None) => updated.original_price_cents = None,
        Some(Some(value)) => {
            updated.original_price_cents =
                coerce_optional_money(Some(value), "original_price_cents", policy)?;
        }
    }

    if let Some(value) = &patch.qty_total {
        match parse_qty(value) {
            Some(q) => updated.qty_total = q.max(1),
            None => reject_or_skip(value, "qty_total", policy)?,
        }
    }
    if let Some(value) = &patch.qty_left {
        match parse_qty(value) {
            Some(q) => updated.qty_left = q.max(0),
            None => reject_or_skip(value, "qty_left", policy)?,
        }
    }

    if patch.expires_at.is_some() {
        updated.expires_at =
            coerce_optional_timestamp(patch.expires_at.as_deref(), "expires_at", policy)?;
    }

    // patch.restaurant_id is the ownership claim checked upstream; the
    // stored owner is immutable.
    Ok(updated)
}

/// Soft-delete. Re-archiving keeps the original timestamp.
pub fn archive(offer: &offer_entity::Model, now: DateTime<Utc>) -> offer_entity::Model {
    let mut updated = offer.clone();
    if updated.archived_at.is_none() {
        updated.archived_at = Some(now);
    }
    updated
}

/// Undo archival. Expiry and quantity are deliberately not re-checked:
/// archival and availability are orthogonal, so a restored offer may
/// still be invisible to buyers.
pub fn restore(offer: &offer_entity::Model) -> offer_entity::Model {
    let mut updated = offer.clone();
    updated.archived_at = None;
    updated
}

fn coerce_optional_money(
    value: Option<&Value>,
    field: &'static str,
    policy: ParsePolicy,
) -> AppResult<Option<i64>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => match parse_money(v) {
            Some(n) => Ok(Some(n)),
            None => match policy {
                ParsePolicy::Strict => {
                    Err(AppError::validation(field, "must be an integer"))
                }
                ParsePolicy::Lenient => {
                    log::warn!("Dropping unparsable {field} value: {v}");
                    Ok(None)
                }
            },
        },
    }
}

fn coerce_optional_timestamp(
    value: Option<&str>,
    field: &'static str,
    policy: ParsePolicy,
) -> AppResult<Option<DateTime<Utc>>> {
    match value {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => match parse_client_datetime(s) {
            Some(t) => Ok(Some(t)),
            None => match policy {
                ParsePolicy::Strict => Err(AppError::validation(
                    field,
                    "must be an ISO-8601 timestamp",
                )),
                ParsePolicy::Lenient => {
                    log::warn!("Dropping unparsable {field} value: {s}");
                    Ok(None)
                }
            },
        },
    }
}

fn reject_or_skip(value: &Value, field: &'static str, policy: ParsePolicy) -> AppResult<()> {
    match policy {
        ParsePolicy::Strict => Err(AppError::validation(field, "must be an integer")),
        ParsePolicy::Lenient => {
            log::warn!("Ignoring unparsable {field} value: {value}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn create_request() -> CreateOfferRequest {
        CreateOfferRequest {
            restaurant_id: "RID_1a2b3c4d".to_string(),
            title: "Pasta box".to_string(),
            description: None,
            price_cents: Some(json!(500)),
            original_price_cents: None,
            qty_total: Some(json!(3)),
            qty_left: None,
            expires_at: None,
        }
    }

    fn empty_patch() -> UpdateOfferRequest {
        UpdateOfferRequest {
            restaurant_id: "RID_1a2b3c4d".to_string(),
            title: None,
            description: None,
            price_cents: None,
            original_price_cents: None,
            qty_total: None,
            qty_left: None,
            expires_at: None,
        }
    }

    #[test]
    fn test_create_fills_quantity_and_defaults() {
        let now = Utc::now();
        let offer = validate_create(&create_request(), ParsePolicy::Lenient, now).unwrap();
        assert_eq!(offer.qty_total, 3);
        assert_eq!(offer.qty_left, 3);
        assert_eq!(offer.price_cents, 500);
        assert!(offer.archived_at.is_none());
        assert!(offer.expires_at.is_none());
        assert_eq!(offer.created_at, now);
        assert!(is_available(&offer, now));
    }

    #[test]
    fn test_create_rejects_empty_title() {
        let mut request = create_request();
        request.title = "   ".to_string();
        let err = validate_create(&request, ParsePolicy::Lenient, Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            AppError::ValidationError { field: "title", .. }
        ));
    }

    #[test]
    fn test_create_rejects_non_positive_price() {
        let mut request = create_request();
        request.price_cents = Some(json!(0));
        let err = validate_create(&request, ParsePolicy::Lenient, Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            AppError::ValidationError {
                field: "price_cents",
                ..
            }
        ));

        let mut request = create_request();
        request.price_cents = None;
        assert!(validate_create(&request, ParsePolicy::Lenient, Utc::now()).is_err());
    }

    #[test]
    fn test_create_coerces_string_price() {
        let mut request = create_request();
        request.price_cents = Some(json!("750"));
        let offer = validate_create(&request, ParsePolicy::Lenient, Utc::now()).unwrap();
        assert_eq!(offer.price_cents, 750);
    }

    #[test]
    fn test_create_clamps_quantities() {
        let mut request = create_request();
        request.qty_total = Some(json!(0));
        let offer = validate_create(&request, ParsePolicy::Lenient, Utc::now()).unwrap();
        assert_eq!(offer.qty_total, 1);
        assert_eq!(offer.qty_left, 1);

        let mut request = create_request();
        request.qty_total = Some(json!(2));
        request.qty_left = Some(json!(10));
        let offer = validate_create(&request, ParsePolicy::Lenient, Utc::now()).unwrap();
        assert_eq!(offer.qty_left, 2);

        let mut request = create_request();
        request.qty_left = Some(json!(-1));
        let offer = validate_create(&request, ParsePolicy::Lenient, Utc::now()).unwrap();
        assert_eq!(offer.qty_left, 0);
    }

    #[test]
    fn test_create_lenient_drops_bad_optional_fields() {
        let mut request = create_request();
        request.original_price_cents = Some(json!("a lot"));
        request.expires_at = Some("whenever".to_string());
        let offer = validate_create(&request, ParsePolicy::Lenient, Utc::now()).unwrap();
        assert!(offer.original_price_cents.is_none());
        assert!(offer.expires_at.is_none());
    }

    #[test]
    fn test_create_strict_rejects_bad_optional_fields() {
        let mut request = create_request();
        request.expires_at = Some("whenever".to_string());
        let err = validate_create(&request, ParsePolicy::Strict, Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            AppError::ValidationError {
                field: "expires_at",
                ..
            }
        ));

        let mut request = create_request();
        request.original_price_cents = Some(json!("a lot"));
        assert!(validate_create(&request, ParsePolicy::Strict, Utc::now()).is_err());
    }

    #[test]
    fn test_create_parses_expiry_with_z_suffix() {
        let mut request = create_request();
        request.expires_at = Some("2031-01-01T10:00:00Z".to_string());
        let offer = validate_create(&request, ParsePolicy::Lenient, Utc::now()).unwrap();
        assert!(offer.expires_at.is_some());
    }

    #[test]
    fn test_availability_predicate() {
        let now = Utc::now();
        let offer = validate_create(&create_request(), ParsePolicy::Lenient, now).unwrap();
        assert!(is_available(&offer, now));

        // already expired at creation time
        let mut expired = offer.clone();
        expired.expires_at = Some(now - Duration::seconds(1));
        assert!(!is_available(&expired, now));

        let mut sold_out = offer.clone();
        sold_out.qty_left = 0;
        assert!(!is_available(&sold_out, now));

        // archival wins regardless of stock and expiry
        let archived = archive(&offer, now);
        assert!(!is_available(&archived, now));
    }

    #[test]
    fn test_archive_and_restore_are_idempotent() {
        let now = Utc::now();
        let offer = validate_create(&create_request(), ParsePolicy::Lenient, now).unwrap();

        let once = archive(&offer, now);
        let twice = archive(&once, now + Duration::seconds(30));
        assert_eq!(once, twice);
        assert_eq!(once.archived_at, Some(now));

        let restored = restore(&twice);
        assert!(restored.archived_at.is_none());
        assert_eq!(restore(&restored), restored);
        assert!(is_available(&restored, now));
    }

    #[test]
    fn test_restore_does_not_revalidate_availability() {
        let now = Utc::now();
        let mut offer = validate_create(&create_request(), ParsePolicy::Lenient, now).unwrap();
        offer.qty_left = 0;
        let restored = restore(&archive(&offer, now));
        assert!(restored.archived_at.is_none());
        assert!(!is_available(&restored, now));
    }

    #[test]
    fn test_update_touches_only_present_fields() {
        let now = Utc::now();
        let existing = validate_create(&create_request(), ParsePolicy::Lenient, now).unwrap();

        let mut patch = empty_patch();
        patch.price_cents = Some(json!("450"));
        let updated = apply_update(&existing, &patch, ParsePolicy::Lenient).unwrap();
        assert_eq!(updated.price_cents, 450);
        assert_eq!(updated.title, existing.title);
        assert_eq!(updated.qty_total, existing.qty_total);
        assert_eq!(updated.id, existing.id);
        assert_eq!(updated.restaurant_id, existing.restaurant_id);
    }

    #[test]
    fn test_update_explicit_null_clears_nullable_fields() {
        let now = Utc::now();
        let mut request = create_request();
        request.description = Some("leftover pasta".to_string());
        request.original_price_cents = Some(json!(900));
        let existing = validate_create(&request, ParsePolicy::Lenient, now).unwrap();

        let mut patch = empty_patch();
        patch.description = Some(None);
        patch.original_price_cents = Some(None);
        let updated = apply_update(&existing, &patch, ParsePolicy::Lenient).unwrap();
        assert!(updated.description.is_none());
        assert!(updated.original_price_cents.is_none());
    }

    #[test]
    fn test_update_rejects_empty_title() {
        let now = Utc::now();
        let existing = validate_create(&create_request(), ParsePolicy::Lenient, now).unwrap();
        let mut patch = empty_patch();
        patch.title = Some("  ".to_string());
        assert!(apply_update(&existing, &patch, ParsePolicy::Lenient).is_err());
    }

    #[test]
    fn test_update_never_moves_ownership() {
        let now = Utc::now();
        let existing = validate_create(&create_request(), ParsePolicy::Lenient, now).unwrap();
        let mut patch = empty_patch();
        patch.restaurant_id = "RID_someone_else".to_string();
        patch.title = Some("New title".to_string());
        let updated = apply_update(&existing, &patch, ParsePolicy::Lenient).unwrap();
        assert_eq!(updated.restaurant_id, existing.restaurant_id);
    }

    #[test]
    fn test_ownership_is_exact_match() {
        let now = Utc::now();
        let offer = validate_create(&create_request(), ParsePolicy::Lenient, now).unwrap();
        assert!(is_owned_by(&offer, "RID_1a2b3c4d"));
        assert!(!is_owned_by(&offer, "RID_1A2B3C4D"));
        assert!(!is_owned_by(&offer, ""));
    }
}
