//! Expiry windows

use chrono::{DateTime, Utc};
use inv_core::Product;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Whole days until `expiry`, rounded up; negative once expired
pub fn days_until_expiry(expiry: DateTime<Utc>) -> i64 {
    days_until_expiry_at(expiry, Utc::now())
}

/// [`days_until_expiry`] against an explicit clock
pub fn days_until_expiry_at(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (expiry - now).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY).ceil() as i64
}

/// Usual window is `AnalyticsPolicy::default().expiry_warning_days` (3 days)
pub fn is_expiring_soon(expiry: DateTime<Utc>, warning_days: i64) -> bool {
    is_expiring_soon_at(expiry, Utc::now(), warning_days)
}

/// True when at most `warning_days` remain; already expired counts too
pub fn is_expiring_soon_at(expiry: DateTime<Utc>, now: DateTime<Utc>, warning_days: i64) -> bool {
    days_until_expiry_at(expiry, now) <= warning_days
}

/// Products with an expiry date inside the warning window, soonest first
pub fn expiring_products(products: &[Product], now: DateTime<Utc>, warning_days: i64) -> Vec<&Product> {
    let mut expiring: Vec<(&Product, DateTime<Utc>)> = products
        .iter()
        .filter_map(|product| product.expiry_date.map(|expiry| (product, expiry)))
        .filter(|(_, expiry)| is_expiring_soon_at(*expiry, now, warning_days))
        .collect();
    expiring.sort_by_key(|(_, expiry)| *expiry);
    expiring.into_iter().map(|(product, _)| product).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stock::tests::product;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 5, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_days_round_up() {
        assert_eq!(days_until_expiry_at(now() + Duration::hours(1), now()), 1);
        assert_eq!(days_until_expiry_at(now() + Duration::days(3), now()), 3);
        assert_eq!(days_until_expiry_at(now(), now()), 0);
        assert_eq!(days_until_expiry_at(now() - Duration::hours(36), now()), -1);
    }

    #[test]
    fn test_warning_boundary_inclusive() {
        assert!(is_expiring_soon_at(now() + Duration::days(3), now(), 3));
        assert!(!is_expiring_soon_at(now() + Duration::days(3) + Duration::minutes(1), now(), 3));
        assert!(is_expiring_soon_at(now() - Duration::days(2), now(), 3));
    }

    #[test]
    fn test_default_policy_window() {
        let days = crate::AnalyticsPolicy::default().expiry_warning_days;
        assert_eq!(days, 3);
        assert!(is_expiring_soon_at(now() + Duration::days(3), now(), days));
        assert!(!is_expiring_soon_at(now() + Duration::days(4), now(), days));
    }

    #[test]
    fn test_expiring_products_sorted() {
        let mut later = product("later", 1.0, 1.0, 5.0, 1.0);
        later.expiry_date = Some(now() + Duration::days(2));
        let mut sooner = product("sooner", 1.0, 1.0, 5.0, 1.0);
        sooner.expiry_date = Some(now() + Duration::hours(5));
        let mut far = product("far", 1.0, 1.0, 5.0, 1.0);
        far.expiry_date = Some(now() + Duration::days(30));
        let none = product("none", 1.0, 1.0, 5.0, 1.0);

        let products = vec![later, none, far, sooner];
        let ids: Vec<&str> = expiring_products(&products, now(), 3)
            .into_iter()
            .map(|product| product.id.as_str())
            .collect();
        assert_eq!(ids, vec!["sooner", "later"]);
    }
}
