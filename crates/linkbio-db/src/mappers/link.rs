//! Link entity <-> model mapper

use linkbio_core::{Link, LinkKey};

use crate::models::LinkModel;

/// Convert LinkModel to Link entity
///
/// Rows coming out of the store are confirmed by definition, so the key is
/// always `Persisted`.
impl From<LinkModel> for Link {
    fn from(model: LinkModel) -> Self {
        Link {
            key: LinkKey::Persisted(model.id),
            profile_id: model.profile_id,
            title: model.title,
            url: model.url,
            icon: model.icon,
            position: model.position,
            is_active: model.is_active,
            click_count: model.click_count,
            scheduled_at: model.scheduled_at,
            created_at: model.created_at,
        }
    }
}
