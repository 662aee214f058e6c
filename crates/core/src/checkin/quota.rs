//! Quota amount rendering for messages and audit content.

use checkin_shared::CheckinConfig;
use rust_decimal::Decimal;

/// Renders a quota amount the way the deployment displays balances.
///
/// With `display_in_currency` the amount is divided by `quota_per_unit` and
/// shown with six decimals; otherwise the raw point count is shown.
#[must_use]
pub fn format_quota(quota: i64, config: &CheckinConfig) -> String {
    if config.display_in_currency && config.quota_per_unit > 0 {
        let amount = (Decimal::from(quota) / Decimal::from(config.quota_per_unit)).round_dp(6);
        format!("${amount:.6}")
    } else {
        format!("{quota} points")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points() {
        let config = CheckinConfig::default();
        assert_eq!(format_quota(1000, &config), "1000 points");
    }

    #[test]
    fn test_currency() {
        let config = CheckinConfig {
            display_in_currency: true,
            quota_per_unit: 500_000,
            ..CheckinConfig::default()
        };
        assert_eq!(format_quota(1000, &config), "$0.002000");
        assert_eq!(format_quota(1_250_000, &config), "$2.500000");
    }

    #[test]
    fn test_currency_falls_back_without_divisor() {
        let config = CheckinConfig {
            display_in_currency: true,
            quota_per_unit: 0,
            ..CheckinConfig::default()
        };
        assert_eq!(format_quota(42, &config), "42 points");
    }
}
