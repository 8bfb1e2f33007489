//! Strongly-typed identifiers used across the analytic domain.
//!
//! Items and sites are keyed by integers assigned upstream by the POS system;
//! transactions by an opaque string. The core never mints identifiers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;

/// Identifier of a sellable item (already resolved by the external lookup
/// component; free-text names never reach the core).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);

/// Identifier of a store/site.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(i64);

macro_rules! impl_i64_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = AnalyticsError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = i64::from_str(s)
                    .map_err(|e| AnalyticsError::invalid_row(format!("{}: {}", $name, e)))?;
                Ok(Self(raw))
            }
        }
    };
}

impl_i64_newtype!(ItemId, "ItemId");
impl_i64_newtype!(SiteId, "SiteId");

/// Identifier of a point-of-sale transaction (receipt).
///
/// Opaque: receipt numbering schemes vary per site, so this is kept as the
/// upstream string and only ever compared for equality/ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_parses_from_str() {
        let id: ItemId = "1042".parse().unwrap();
        assert_eq!(id, ItemId::new(1042));
    }

    #[test]
    fn item_id_rejects_garbage() {
        let err = "snack".parse::<ItemId>().unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidRowData(_)));
    }

    #[test]
    fn ids_serialize_transparently() {
        assert_eq!(serde_json::to_string(&ItemId::new(7)).unwrap(), "7");
        assert_eq!(
            serde_json::to_string(&TransactionId::new("T-99")).unwrap(),
            "\"T-99\""
        );
    }
}
