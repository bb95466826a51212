//! Payment Model
//!
//! Payment records are write-only: exactly one row per order, created in
//! the same transaction as the order header. There is no processor
//! integration; the method is a fixed classification label.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Accepted payment method labels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    #[serde(rename = "Cash")]
    Cash,
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Debit Card")]
    DebitCard,
    #[serde(rename = "Online")]
    Online,
}

impl PaymentMethod {
    /// Wire/database label for this method
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::CreditCard => "Credit Card",
            Self::DebitCard => "Debit Card",
            Self::Online => "Online",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cash" => Ok(Self::Cash),
            "Credit Card" => Ok(Self::CreditCard),
            "Debit Card" => Ok(Self::DebitCard),
            "Online" => Ok(Self::Online),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for method in [
            PaymentMethod::Cash,
            PaymentMethod::CreditCard,
            PaymentMethod::DebitCard,
            PaymentMethod::Online,
        ] {
            assert_eq!(PaymentMethod::from_str(method.as_str()), Ok(method));
        }
    }

    #[test]
    fn test_unknown_label_rejected() {
        assert!(PaymentMethod::from_str("Barter").is_err());
        assert!(PaymentMethod::from_str("cash").is_err());
    }
}
