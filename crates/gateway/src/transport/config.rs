//! Subject names and matching
//!
//! Subjects are dot-separated tokens. Patterns may use `*` for exactly one
//! token and a trailing `>` for one or more remaining tokens.

use hermes_core::DataType;

/// Logical subjects adapter output is published on
pub struct Subjects;

impl Subjects {
    /// Generated data for a security and kind: `md.BTC-USD.ticks`
    pub fn market_data(security_id: &str, data_type: DataType) -> String {
        format!("md.{}.{}", security_id, data_type)
    }

    /// Every kind of generated data for one security: `md.BTC-USD.*`
    pub fn market_data_for(security_id: &str) -> String {
        format!("md.{}.*", security_id)
    }

    /// All generated data
    pub const MARKET_DATA_ALL: &'static str = "md.>";

    /// Generator requests for a security: `generators.BTC-USD`
    pub fn generators(security_id: &str) -> String {
        format!("generators.{}", security_id)
    }

    /// Subscription responses from the backend
    pub const SUBSCRIPTIONS: &'static str = "control.subscriptions";

    /// Simulated time advances
    pub const TIME: &'static str = "control.time";

    /// Whether `subject` is covered by `pattern`
    pub fn matches(pattern: &str, subject: &str) -> bool {
        let mut subject_tokens = subject.split('.');

        for token in pattern.split('.') {
            match (token, subject_tokens.next()) {
                (">", Some(_)) => return true,
                (_, None) => return false,
                ("*", Some(_)) => continue,
                (expected, Some(actual)) if expected == actual => continue,
                _ => return false,
            }
        }

        subject_tokens.next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subjects() {
        assert_eq!(
            Subjects::market_data("BTC-USD", DataType::Ticks),
            "md.BTC-USD.ticks"
        );
        assert_eq!(
            Subjects::market_data("ETH-USD", DataType::OrderLog),
            "md.ETH-USD.orderlog"
        );
        assert_eq!(Subjects::market_data_for("SOL-USD"), "md.SOL-USD.*");
        assert_eq!(Subjects::generators("SOL-USD"), "generators.SOL-USD");
    }

    #[test]
    fn test_matching() {
        let ticks = Subjects::market_data("BTC-USD", DataType::Ticks);
        let depth = Subjects::market_data("ETH-USD", DataType::MarketDepth);

        assert!(Subjects::matches(&ticks, &ticks));
        assert!(Subjects::matches(&Subjects::market_data_for("BTC-USD"), &ticks));
        assert!(!Subjects::matches(&Subjects::market_data_for("BTC-USD"), &depth));
        assert!(Subjects::matches(Subjects::MARKET_DATA_ALL, &ticks));
        assert!(Subjects::matches(Subjects::MARKET_DATA_ALL, &depth));
        assert!(!Subjects::matches(Subjects::MARKET_DATA_ALL, Subjects::SUBSCRIPTIONS));
        assert!(!Subjects::matches(Subjects::MARKET_DATA_ALL, "md"));
        assert!(!Subjects::matches("md.*", &ticks));
        assert!(!Subjects::matches(&ticks, "md.BTC-USD"));
    }
}
