//! Plan policy - subscription tiers mapped to feature/limit tables
//!
//! Pure and deterministic: limits are recomputed on demand, never persisted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sentinel for "no numeric ceiling". Kept as an unreachable count rather
/// than a float infinity so arithmetic and display stay well-behaved.
pub const UNLIMITED: u32 = u32::MAX;

/// Subscription tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Free,
    Pro,
    Business,
}

impl Plan {
    /// All tiers, lowest to highest
    pub const ALL: [Self; 3] = [Self::Free, Self::Pro, Self::Business];

    /// Stable lowercase name used in storage and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Business => "business",
        }
    }

    /// Human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Pro => "Pro",
            Self::Business => "Business",
        }
    }

    /// Parse a stored plan value; unrecognized input falls back to Free
    pub fn from_str_lossy(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Self::Free),
            "pro" => Ok(Self::Pro),
            "business" => Ok(Self::Business),
            _ => Err(()),
        }
    }
}

/// Feature/limit table for one tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanLimits {
    pub max_links: u32,
    pub max_themes: u32,
    pub has_full_analytics: bool,
    pub has_csv_export: bool,
    pub has_qr_code: bool,
    pub has_custom_og: bool,
    pub has_scheduled_links: bool,
    pub has_remove_branding: bool,
    pub has_short_username: bool,
}

const FREE_LIMITS: PlanLimits = PlanLimits {
    max_links: 5,
    max_themes: 3,
    has_full_analytics: false,
    has_csv_export: false,
    has_qr_code: false,
    has_custom_og: false,
    has_scheduled_links: false,
    has_remove_branding: false,
    has_short_username: false,
};

const PRO_LIMITS: PlanLimits = PlanLimits {
    max_links: 15,
    max_themes: 10,
    has_full_analytics: true,
    has_csv_export: false,
    has_qr_code: true,
    has_custom_og: true,
    has_scheduled_links: true,
    has_remove_branding: false,
    has_short_username: true,
};

const BUSINESS_LIMITS: PlanLimits = PlanLimits {
    max_links: UNLIMITED,
    max_themes: UNLIMITED,
    has_full_analytics: true,
    has_csv_export: true,
    has_qr_code: true,
    has_custom_og: true,
    has_scheduled_links: true,
    has_remove_branding: true,
    has_short_username: true,
};

/// Get the feature/limit table for a tier
pub fn plan_limits(plan: Plan) -> PlanLimits {
    match plan {
        Plan::Free => FREE_LIMITS,
        Plan::Pro => PRO_LIMITS,
        Plan::Business => BUSINESS_LIMITS,
    }
}

/// Boolean capability flags of [`PlanLimits`], named for upsell lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    FullAnalytics,
    CsvExport,
    QrCode,
    CustomOg,
    ScheduledLinks,
    RemoveBranding,
    ShortUsername,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullAnalytics => "full_analytics",
            Self::CsvExport => "csv_export",
            Self::QrCode => "qr_code",
            Self::CustomOg => "custom_og",
            Self::ScheduledLinks => "scheduled_links",
            Self::RemoveBranding => "remove_branding",
            Self::ShortUsername => "short_username",
        }
    }
}

impl FromStr for Capability {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full_analytics" => Ok(Self::FullAnalytics),
            "csv_export" => Ok(Self::CsvExport),
            "qr_code" => Ok(Self::QrCode),
            "custom_og" => Ok(Self::CustomOg),
            "scheduled_links" => Ok(Self::ScheduledLinks),
            "remove_branding" => Ok(Self::RemoveBranding),
            "short_username" => Ok(Self::ShortUsername),
            _ => Err(()),
        }
    }
}

impl PlanLimits {
    /// Check a capability flag on this table
    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::FullAnalytics => self.has_full_analytics,
            Capability::CsvExport => self.has_csv_export,
            Capability::QrCode => self.has_qr_code,
            Capability::CustomOg => self.has_custom_og,
            Capability::ScheduledLinks => self.has_scheduled_links,
            Capability::RemoveBranding => self.has_remove_branding,
            Capability::ShortUsername => self.has_short_username,
        }
    }
}

/// Lowest tier that unlocks a capability, scanning free -> pro -> business.
///
/// Every capability is unlocked on Business, so the scan always terminates.
pub fn required_plan(capability: Capability) -> Plan {
    for plan in Plan::ALL {
        if plan_limits(plan).has(capability) {
            return plan;
        }
    }
    Plan::Business
}

/// Monthly/yearly price for a tier, in USD
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanPrice {
    pub monthly: f64,
    pub yearly: f64,
}

/// Published prices for a tier
pub fn plan_price(plan: Plan) -> PlanPrice {
    match plan {
        Plan::Free => PlanPrice {
            monthly: 0.0,
            yearly: 0.0,
        },
        Plan::Pro => PlanPrice {
            monthly: 3.99,
            yearly: 39.99,
        },
        Plan::Business => PlanPrice {
            monthly: 9.99,
            yearly: 99.99,
        },
    }
}
