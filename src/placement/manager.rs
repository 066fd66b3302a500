use chrono::Utc;

use crate::database::Database;
use crate::error::Error;
use crate::form::schema;
use crate::form::{CampaignDraft, ValidatedDraft};

use super::tracking::{generate_tracking_code, tracking_url};
use super::{Placement, PlacementId, PlacementStatus};

pub const MAX_TRACKING_CODE_ATTEMPTS: usize = 5;

pub fn validate_draft(draft: &CampaignDraft) -> Result<ValidatedDraft, Error> {
    schema::validate(draft).map_err(|violations| Error::DraftViolatesSchema { violations })
}

fn new_tracking_code() -> String {
    generate_tracking_code(&mut rand::thread_rng())
}

#[tracing::instrument(skip(db))]
pub async fn create_placement(
    db: &dyn Database,
    draft: ValidatedDraft,
) -> Result<Placement, Error> {
    for _ in 0..MAX_TRACKING_CODE_ATTEMPTS {
        let tracking_code = new_tracking_code();

        if db
            .placements()
            .fetch_placement_by_tracking_code(&tracking_code)
            .await?
            .is_some()
        {
            tracing::debug!(%tracking_code, "tracking code collision");
            continue;
        }

        let now = Utc::now();
        let placement = Placement {
            id: PlacementId::new(),
            tracking_url: tracking_url(draft.draft(), &tracking_code)?,
            tracking_code,
            status: PlacementStatus::Draft,
            draft: draft.draft().clone(),
            created_at: now,
            modified_at: now,
        };

        match db.placements().insert_placement(&placement).await {
            Ok(()) => {
                tracing::info!(
                    placement_id = %placement.id,
                    tracking_code = %placement.tracking_code,
                    "created placement"
                );
                return Ok(placement);
            }
            Err(Error::DuplicateTrackingCode { tracking_code }) => {
                tracing::debug!(%tracking_code, "tracking code collision on insert");
            }
            Err(err) => return Err(err),
        }
    }

    Err(Error::TrackingCodesExhausted {
        attempts: MAX_TRACKING_CODE_ATTEMPTS,
    })
}

#[tracing::instrument(skip(db))]
pub async fn get_placements(db: &dyn Database) -> Result<Vec<Placement>, Error> {
    let placements = db.placements().fetch_placements().await?;

    Ok(placements)
}

#[tracing::instrument(skip(db))]
pub async fn get_placement_by_id(
    db: &dyn Database,
    placement_id: PlacementId,
) -> Result<Placement, Error> {
    let placement = db
        .placements()
        .fetch_placement_by_id(placement_id)
        .await?
        .ok_or(Error::PlacementNotFound { placement_id })?;

    Ok(placement)
}

#[tracing::instrument(skip(db))]
pub async fn get_placement_by_tracking_code(
    db: &dyn Database,
    tracking_code: &str,
) -> Result<Placement, Error> {
    let placement = db
        .placements()
        .fetch_placement_by_tracking_code(tracking_code)
        .await?
        .ok_or_else(|| Error::TrackingCodeNotFound {
            tracking_code: tracking_code.to_string(),
        })?;

    Ok(placement)
}

#[tracing::instrument(skip(db))]
pub async fn update_placement_status(
    db: &dyn Database,
    placement_id: PlacementId,
    status: PlacementStatus,
) -> Result<Placement, Error> {
    let placement = get_placement_by_id(db, placement_id).await?;

    if placement.status == status {
        return Ok(placement);
    }
    if placement.status == PlacementStatus::Archived {
        return Err(Error::PlacementIsArchived { placement_id });
    }

    db.placements()
        .update_placement_status(placement, status)
        .await
}
