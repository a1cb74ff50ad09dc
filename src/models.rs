// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

macro_rules! text_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(ParseEnumError { kind: $kind, value: s.to_string() }),
                }
            }
        }
    };
}

text_enum!(Platform, "platform", {
    Youtube => "youtube",
    Soop => "soop",
    Chzzk => "chzzk",
    Instagram => "instagram",
    Tiktok => "tiktok",
    Other => "other",
});

text_enum!(SoopTier, "SOOP tier", {
    Normal => "normal",
    Best => "best",
    Partner => "partner",
});

text_enum!(ChzzkTier, "Chzzk tier", {
    Rookie => "rookie",
    Pro => "pro",
    Partner => "partner",
});

text_enum!(YoutubeIncomeType, "YouTube income type", {
    Ad => "ad",
    Superchat => "superchat",
    Membership => "membership",
});

text_enum!(IncomeKind, "income type", {
    Platform => "platform",
    Ad => "ad",
});

text_enum!(InputMethod, "input method", {
    Direct => "direct",
    RawCount => "raw_count",
});

text_enum!(PaymentType, "payment type", {
    Fixed => "fixed",
    Percentage => "percentage",
    Hybrid => "hybrid",
});

text_enum!(ExpenseType, "expense type", {
    Collaborator => "collaborator",
    Other => "other",
});

impl Platform {
    pub const ALL: [Platform; 6] = [
        Platform::Youtube,
        Platform::Soop,
        Platform::Chzzk,
        Platform::Instagram,
        Platform::Tiktok,
        Platform::Other,
    ];
}

/// A single revenue entry. Tip-platform entries created from a raw unit
/// count carry the full commission/withholding breakdown; direct entries
/// only carry `amount`. Dates stay as text so rows with broken dates can
/// still be listed and flagged instead of failing every query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Income {
    pub id: i64,
    pub r#type: IncomeKind,
    pub source: Option<Platform>,
    pub income_type: Option<YoutubeIncomeType>,
    pub input_method: Option<InputMethod>,
    pub raw_count: Option<i64>,
    pub raw_amount: Option<i64>,
    pub commission_rate: Option<f64>,
    pub commission_amount: Option<i64>,
    pub withholding_tax: Option<i64>,
    pub amount: i64,  // net take-home, KRW
    pub date: String, // YYYY-MM-DD
    pub memo: Option<String>,
}

/// Sponsorship/ad deal. The only entity with a paid/unpaid lifecycle:
/// it counts toward income only once `is_paid` is set and `payment_date`
/// falls in the aggregation window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: i64,
    pub brand_name: String,
    pub amount: i64,
    pub payment_date: Option<String>,
    pub is_paid: bool,
    pub memo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub r#type: ExpenseType,
    pub collaborator_id: Option<i64>,
    pub description: Option<String>,
    pub amount: i64,
    pub date: String,
    pub is_paid: bool,
    pub memo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collaborator {
    pub id: i64,
    pub name: String,
    pub role: Option<String>,
    pub payment_type: PaymentType,
    pub base_amount: Option<i64>,
    pub percentage: Option<f64>,
    pub memo: Option<String>,
}
