//! Profile entity <-> model mapper

use linkbio_core::{Palette, Plan, Profile, Theme};

use crate::models::ProfileModel;

/// Convert ProfileModel to Profile entity
impl From<ProfileModel> for Profile {
    fn from(model: ProfileModel) -> Self {
        // A malformed stored palette degrades the theme the same way an
        // unknown theme name does
        let palette = model
            .custom_colors
            .and_then(|v| serde_json::from_value::<Palette>(v).ok());

        Profile {
            id: model.id,
            username: model.username,
            display_name: model.display_name,
            bio: model.bio,
            email: model.email,
            avatar_url: model.avatar_url,
            theme: Theme::from_parts(&model.theme, palette),
            plan: Plan::from_str_lossy(&model.plan),
            page_views: model.page_views,
            created_at: model.created_at,
        }
    }
}

/// Split a theme into its storable parts (name column, palette column)
pub fn theme_columns(theme: &Theme) -> (String, Option<serde_json::Value>) {
    let palette = theme
        .palette()
        .and_then(|p| serde_json::to_value(p).ok());
    (theme.name().to_string(), palette)
}
