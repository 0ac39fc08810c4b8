//! Pure half of the catalog queries: visibility filters and feed ordering.
//! The service layer pushes matching predicate hints down to the store,
//! but these functions are re-applied in-process and are the source of
//! truth for what each feed contains.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use utoipa::ToSchema;

use crate::domain::lifecycle::is_available;
use crate::entities::offer_entity;

pub const FEED_LIMIT_DEFAULT: u32 = 100;
pub const FEED_LIMIT_MAX: u32 = 500;

pub fn clamp_limit(limit: Option<u32>) -> u64 {
    u64::from(limit.unwrap_or(FEED_LIMIT_DEFAULT).clamp(1, FEED_LIMIT_MAX))
}

/// Soonest-expiring first; open-ended offers last; id breaks ties so the
/// order is stable across requests.
pub fn feed_order(a: &offer_entity::Model, b: &offer_entity::Model) -> Ordering {
    match (a.expires_at, b.expires_at) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.id.cmp(&b.id)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    }
}

/// The buyer feed: available offers only, optionally scoped to one
/// restaurant, feed-ordered and bounded.
pub fn public_view(
    candidates: Vec<offer_entity::Model>,
    now: DateTime<Utc>,
    limit: Option<u32>,
    restaurant_id: Option<&str>,
) -> Vec<offer_entity::Model> {
    let mut rows: Vec<offer_entity::Model> = candidates
        .into_iter()
        .filter(|o| is_available(o, now))
        .filter(|o| restaurant_id.is_none_or(|rid| o.restaurant_id == rid))
        .collect();
    rows.sort_by(feed_order);
    rows.truncate(clamp_limit(limit) as usize);
    rows
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    Active,
    Archived,
    All,
}

impl StatusFilter {
    /// `Active` uses the same availability predicate as the public feed,
    /// so a merchant's "active" tab and the buyer feed agree. `Archived`
    /// matches regardless of expiry or stock.
    pub fn matches(&self, offer: &offer_entity::Model, now: DateTime<Utc>) -> bool {
        match self {
            StatusFilter::Active => is_available(offer, now),
            StatusFilter::Archived => offer.archived_at.is_some(),
            StatusFilter::All => true,
        }
    }
}

/// The merchant feed: the owner's offers through a status filter, in the
/// same order as the public feed.
pub fn merchant_view(
    candidates: Vec<offer_entity::Model>,
    status: StatusFilter,
    now: DateTime<Utc>,
) -> Vec<offer_entity::Model> {
    let mut rows: Vec<offer_entity::Model> = candidates
        .into_iter()
        .filter(|o| status.matches(o, now))
        .collect();
    rows.sort_by(feed_order);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lifecycle;
    use chrono::Duration;

    fn offer(id: &str, rid: &str, expires_at: Option<DateTime<Utc>>) -> offer_entity::Model {
        offer_entity::Model {
            id: id.to_string(),
            restaurant_id: rid.to_string(),
            title: "Box".to_string(),
            description: None,
            price_cents: 500,
            original_price_cents: None,
            qty_total: 3,
            qty_left: 3,
            expires_at,
            archived_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_feed_order_soonest_first_nulls_last() {
        let now = Utc::now();
        let soon = offer("b", "RID_1", Some(now + Duration::hours(1)));
        let later = offer("a", "RID_1", Some(now + Duration::hours(2)));
        let open_1 = offer("c", "RID_1", None);
        let open_2 = offer("d", "RID_1", None);

        let mut rows = vec![open_2.clone(), later.clone(), open_1.clone(), soon.clone()];
        rows.sort_by(feed_order);
        let ids: Vec<&str> = rows.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn test_feed_order_breaks_expiry_ties_by_id() {
        let t = Utc::now() + Duration::hours(1);
        let x = offer("x", "RID_1", Some(t));
        let y = offer("y", "RID_1", Some(t));
        assert_eq!(feed_order(&x, &y), Ordering::Less);
        assert_eq!(feed_order(&y, &x), Ordering::Greater);
    }

    #[test]
    fn test_public_view_matches_availability_exactly() {
        let now = Utc::now();
        let visible = offer("a", "RID_1", Some(now + Duration::hours(1)));
        let expired = offer("b", "RID_1", Some(now - Duration::seconds(1)));
        let mut sold_out = offer("c", "RID_1", None);
        sold_out.qty_left = 0;
        let archived = lifecycle::archive(&offer("d", "RID_1", None), now);

        let candidates = vec![
            visible.clone(),
            expired.clone(),
            sold_out.clone(),
            archived.clone(),
        ];
        let view = public_view(candidates.clone(), now, None, None);

        for candidate in &candidates {
            let in_feed = view.iter().any(|o| o.id == candidate.id);
            assert_eq!(in_feed, lifecycle::is_available(candidate, now));
        }
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, "a");
    }

    #[test]
    fn test_public_view_restaurant_filter_and_limit() {
        let now = Utc::now();
        let a = offer("a", "RID_1", None);
        let b = offer("b", "RID_2", None);
        let c = offer("c", "RID_1", None);

        let view = public_view(vec![a, b, c], now, None, Some("RID_1"));
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|o| o.restaurant_id == "RID_1"));

        let many: Vec<_> = (0..10).map(|i| offer(&format!("o{i:02}"), "RID_1", None)).collect();
        assert_eq!(public_view(many.clone(), now, Some(4), None).len(), 4);
        // zero and oversized limits clamp instead of erroring
        assert_eq!(public_view(many.clone(), now, Some(0), None).len(), 1);
        assert_eq!(public_view(many, now, Some(9999), None).len(), 10);
    }

    #[test]
    fn test_status_filter_semantics() {
        let now = Utc::now();
        let active = offer("a", "RID_1", None);
        let mut expired = offer("b", "RID_1", Some(now - Duration::seconds(1)));
        let archived = lifecycle::archive(&offer("c", "RID_1", None), now);

        assert!(StatusFilter::Active.matches(&active, now));
        assert!(!StatusFilter::Active.matches(&expired, now));
        assert!(!StatusFilter::Active.matches(&archived, now));

        assert!(!StatusFilter::Archived.matches(&active, now));
        assert!(StatusFilter::Archived.matches(&archived, now));
        // archived + expired still shows under the archived tab
        expired.archived_at = Some(now);
        assert!(StatusFilter::Archived.matches(&expired, now));

        assert!(StatusFilter::All.matches(&active, now));
        assert!(StatusFilter::All.matches(&expired, now));
    }

    #[test]
    fn test_status_filter_parses_lowercase() {
        let status: StatusFilter = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(status, StatusFilter::Archived);
        assert_eq!(StatusFilter::default(), StatusFilter::Active);
        assert!(serde_json::from_str::<StatusFilter>("\"gone\"").is_err());
    }

    #[test]
    fn test_merchant_view_is_feed_ordered() {
        let now = Utc::now();
        let later = offer("a", "RID_1", Some(now + Duration::hours(2)));
        let soon = offer("b", "RID_1", Some(now + Duration::hours(1)));
        let open = offer("c", "RID_1", None);

        let view = merchant_view(vec![later, open, soon], StatusFilter::All, now);
        let ids: Vec<&str> = view.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }
}
