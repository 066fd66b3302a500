use std::collections::BTreeMap;

use actix_web::web::{Json, Query};
use actix_web::{get, post};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::resolver;

use super::{CampaignDraft, Field, FieldErrors, FieldStatus, FormController};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SourcesQuery {
    pub campaign_type: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AdTypesQuery {
    pub campaign_type: String,
    pub campaign_source: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AdTypeDetailsQuery {
    pub campaign_type: String,
    pub ad_type: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SubLedgersQuery {
    pub cost_center: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationReportBody {
    pub valid: bool,
    pub errors: FieldErrors,
    pub statuses: BTreeMap<Field, FieldStatus>,
}

#[get("/api/options/campaign-types")]
#[tracing::instrument]
pub async fn get_campaign_types() -> Result<Json<Vec<&'static str>>, Error> {
    Ok(Json(resolver::campaign_types()))
}

#[get("/api/options/sources")]
#[tracing::instrument]
pub async fn get_sources(
    query: Query<SourcesQuery>,
) -> Result<Json<Vec<&'static str>>, Error> {
    Ok(Json(resolver::sources(query.campaign_type.trim())))
}

#[get("/api/options/ad-types")]
#[tracing::instrument]
pub async fn get_ad_types(
    query: Query<AdTypesQuery>,
) -> Result<Json<Vec<&'static str>>, Error> {
    Ok(Json(resolver::ad_types(
        query.campaign_type.trim(),
        query.campaign_source.trim(),
    )))
}

#[get("/api/options/ad-type-details")]
#[tracing::instrument]
pub async fn get_ad_type_details(
    query: Query<AdTypeDetailsQuery>,
) -> Result<Json<Vec<&'static str>>, Error> {
    Ok(Json(resolver::ad_type_details(
        query.campaign_type.trim(),
        query.ad_type.trim(),
    )))
}

#[get("/api/options/cost-centers")]
#[tracing::instrument]
pub async fn get_cost_centers() -> Result<Json<Vec<&'static str>>, Error> {
    Ok(Json(resolver::cost_centers()))
}

#[get("/api/options/sub-ledgers")]
#[tracing::instrument]
pub async fn get_sub_ledgers(
    query: Query<SubLedgersQuery>,
) -> Result<Json<Vec<&'static str>>, Error> {
    Ok(Json(resolver::sub_ledgers(query.cost_center.trim())))
}

/// Runs the full schema over a draft and reports every field's state,
/// without storing anything.
#[post("/api/placements/validate")]
#[tracing::instrument]
pub async fn validate_draft(
    body: Json<CampaignDraft>,
) -> Result<Json<ValidationReportBody>, Error> {
    let mut form = FormController::load(body.into_inner());

    let errors = match form.validate() {
        Ok(_) => FieldErrors::new(),
        Err(errors) => {
            form.mark_errors(&errors);
            errors
        }
    };

    Ok(Json(ValidationReportBody {
        valid: errors.is_empty(),
        errors,
        statuses: form.statuses(),
    }))
}
