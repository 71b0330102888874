//! Shipping and payment method enums.
//!
//! These mirror the values the storefront persists in order snapshots, so
//! the serde names are part of the stored-data format.

use serde::{Deserialize, Serialize};

/// How an order is shipped. Shipping cost is flat per method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMethod {
    /// Standard shipping, 4-5 business days.
    #[default]
    Standard,
    /// Express shipping, 2-3 business days.
    Express,
}

impl std::fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Express => write!(f, "express"),
        }
    }
}

impl std::str::FromStr for ShippingMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "express" => Ok(Self::Express),
            _ => Err(format!("invalid shipping method: {s}")),
        }
    }
}

/// How an order is paid. Cash on delivery carries a flat surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    /// Credit card, validated client-side before submission.
    #[default]
    #[serde(rename = "credit")]
    CreditCard,
    /// Cash on delivery.
    #[serde(rename = "cod")]
    CashOnDelivery,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreditCard => write!(f, "credit"),
            Self::CashOnDelivery => write!(f, "cod"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit" => Ok(Self::CreditCard),
            "cod" => Ok(Self::CashOnDelivery),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shipping_method_roundtrip() {
        let json = serde_json::to_string(&ShippingMethod::Express).unwrap();
        assert_eq!(json, "\"express\"");
        let parsed: ShippingMethod = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ShippingMethod::Express);
    }

    #[test]
    fn test_payment_method_serde_names() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CreditCard).unwrap(),
            "\"credit\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CashOnDelivery).unwrap(),
            "\"cod\""
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "express".parse::<ShippingMethod>().unwrap(),
            ShippingMethod::Express
        );
        assert_eq!(
            "cod".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::CashOnDelivery
        );
        assert!("overnight".parse::<ShippingMethod>().is_err());
        assert!("check".parse::<PaymentMethod>().is_err());
    }
}
