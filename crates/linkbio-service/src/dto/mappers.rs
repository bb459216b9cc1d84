//! Mappers converting domain entities to response DTOs

use linkbio_core::entities::{Link, Profile};
use linkbio_core::plan::{plan_price, Plan, PlanLimits, UNLIMITED};
use linkbio_core::value_objects::Theme;

use super::responses::{LinkResponse, PlanLimitsResponse, ProfileResponse, ThemeResponse};

impl From<&Theme> for ThemeResponse {
    fn from(theme: &Theme) -> Self {
        Self {
            name: theme.name().to_string(),
            colors: theme.palette().cloned(),
        }
    }
}

impl From<&Profile> for ProfileResponse {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            username: profile.username.clone(),
            display_name: profile.display_name.clone(),
            bio: profile.bio.clone(),
            email: profile.email.clone(),
            avatar_url: profile.avatar_url.clone(),
            theme: ThemeResponse::from(&profile.theme),
            plan: profile.plan.as_str().to_string(),
            page_views: profile.page_views,
            created_at: profile.created_at,
        }
    }
}

impl From<&Link> for LinkResponse {
    fn from(link: &Link) -> Self {
        Self {
            key: link.key.to_string(),
            title: link.title.clone(),
            url: link.url.clone(),
            icon: link.icon.clone(),
            position: link.position,
            is_active: link.is_active,
            click_count: link.click_count,
            scheduled_at: link.scheduled_at,
            created_at: link.created_at,
            is_draft: link.is_draft(),
        }
    }
}

/// Render the unlimited sentinel as an absent ceiling
fn ceiling(limit: u32) -> Option<u32> {
    (limit != UNLIMITED).then_some(limit)
}

impl PlanLimitsResponse {
    pub fn new(plan: Plan, limits: &PlanLimits) -> Self {
        let price = plan_price(plan);
        Self {
            plan: plan.as_str().to_string(),
            display_name: plan.display_name().to_string(),
            price_monthly: price.monthly,
            price_yearly: price.yearly,
            max_links: ceiling(limits.max_links),
            max_themes: ceiling(limits.max_themes),
            has_full_analytics: limits.has_full_analytics,
            has_csv_export: limits.has_csv_export,
            has_qr_code: limits.has_qr_code,
            has_custom_og: limits.has_custom_og,
            has_scheduled_links: limits.has_scheduled_links,
            has_remove_branding: limits.has_remove_branding,
            has_short_username: limits.has_short_username,
        }
    }
}
