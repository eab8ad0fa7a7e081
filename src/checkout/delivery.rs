//! Delivery fees for cash-on-delivery orders: a small fixed table keyed by
//! delivery region, with a flat fallback rate for unlisted regions.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::DeliveryConfig;

static BASE_RATES: Lazy<HashMap<&'static str, Decimal>> = Lazy::new(|| {
    HashMap::from([
        ("new york", dec!(5.00)),
        ("los angeles", dec!(7.00)),
        ("chicago", dec!(7.00)),
        ("houston", dec!(8.00)),
    ])
});

const FALLBACK_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Region → delivery fee lookup. Keys are matched case-insensitively after
/// trimming.
#[derive(Debug, Clone)]
pub struct DeliveryRates {
    rates: HashMap<String, Decimal>,
    default_rate: Decimal,
}

impl Default for DeliveryRates {
    fn default() -> Self {
        Self {
            rates: BASE_RATES
                .iter()
                .map(|(region, rate)| ((*region).to_string(), *rate))
                .collect(),
            default_rate: FALLBACK_RATE,
        }
    }
}

impl DeliveryRates {
    /// Builds the table from configuration, overlaying configured region
    /// rates on top of the built-in ones.
    pub fn from_config(config: &DeliveryConfig) -> Self {
        let mut table = Self::default();
        table.default_rate = config.default_rate;
        for (region, rate) in &config.region_rates {
            table.rates.insert(region.trim().to_lowercase(), *rate);
        }
        table
    }

    /// Fee for delivering to `region`; the default rate when unlisted.
    pub fn rate_for(&self, region: &str) -> Decimal {
        let key = region.trim().to_lowercase();
        self.rates
            .get(&key)
            .copied()
            .unwrap_or(self.default_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_region_uses_table_rate() {
        let rates = DeliveryRates::default();
        assert_eq!(rates.rate_for("New York"), dec!(5.00));
        assert_eq!(rates.rate_for("  chicago "), dec!(7.00));
    }

    #[test]
    fn unlisted_region_falls_back_to_default_rate() {
        let rates = DeliveryRates::default();
        assert_eq!(rates.rate_for("Springfield"), dec!(10.00));
        assert_eq!(rates.rate_for(""), dec!(10.00));
    }

    #[test]
    fn config_overrides_win_over_built_in_rates() {
        let config = DeliveryConfig {
            default_rate: dec!(12.00),
            region_rates: HashMap::from([
                ("New York".to_string(), dec!(4.50)),
                ("boston".to_string(), dec!(6.00)),
            ]),
        };

        let rates = DeliveryRates::from_config(&config);
        assert_eq!(rates.rate_for("new york"), dec!(4.50));
        assert_eq!(rates.rate_for("Boston"), dec!(6.00));
        assert_eq!(rates.rate_for("Houston"), dec!(8.00));
        assert_eq!(rates.rate_for("nowhere"), dec!(12.00));
    }
}
