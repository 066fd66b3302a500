use serde::Serialize;
use url::Url;

use crate::resolver;

use super::{CampaignDraft, Field, FieldErrors};

const ALWAYS_REQUIRED: &[Field] = &[
    Field::BaseUrl,
    Field::Brand1,
    Field::ProductCategory,
    Field::CampaignOwner,
    Field::StartDate,
    Field::CampaignNotes,
    Field::ProjectReferenceNumber,
    Field::Industry,
    Field::Tactic,
];

/// A draft that passed [`validate`]. Text values are trimmed and the names
/// behind disabled partner/third-party toggles are dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidatedDraft(CampaignDraft);

impl ValidatedDraft {
    pub fn draft(&self) -> &CampaignDraft {
        &self.0
    }

    pub fn into_inner(self) -> CampaignDraft {
        self.0
    }
}

pub fn is_required(draft: &CampaignDraft, field: Field) -> bool {
    match field {
        Field::SubLedger => !draft.is_empty(Field::CostCenter),
        Field::PartnerName => draft.partnering,
        Field::ThirdPartyName => draft.third_party,
        _ => ALWAYS_REQUIRED.contains(&field),
    }
}

fn membership(value: &str, choices: &[&str], what: &str) -> Option<String> {
    if choices.contains(&value) {
        None
    } else {
        Some(format!("\"{}\" is not a valid {}", value, what))
    }
}

/// Checks a single field against the schema, returning the violation
/// message if it fails.
pub fn validate_field(draft: &CampaignDraft, field: Field) -> Option<String> {
    if draft.is_empty(field) {
        if is_required(draft, field) {
            return Some("This field is required".to_string());
        }

        return None;
    }

    let value = draft.text(field);
    match field {
        Field::BaseUrl => match Url::parse(value) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => None,
            Ok(_) => Some("The base url must use http or https".to_string()),
            Err(_) => Some("The base url must be an absolute url".to_string()),
        },
        Field::CampaignType => membership(value, &resolver::campaign_types(), "campaign type"),
        Field::CampaignSource => membership(
            value,
            &resolver::sources(draft.text(Field::CampaignType)),
            "source for the selected campaign type",
        ),
        Field::AdType => membership(
            value,
            &resolver::ad_types(
                draft.text(Field::CampaignType),
                draft.text(Field::CampaignSource),
            ),
            "ad type for the selected source",
        ),
        Field::AdTypeDetail => membership(
            value,
            &resolver::ad_type_details(draft.text(Field::CampaignType), draft.text(Field::AdType)),
            "ad type detail for the selected ad type",
        ),
        Field::CostCenter => membership(value, &resolver::cost_centers(), "cost center"),
        Field::SubLedger => membership(
            value,
            &resolver::sub_ledgers(draft.text(Field::CostCenter)),
            "sub-ledger for the selected cost center",
        ),
        _ => None,
    }
}

pub fn validate(draft: &CampaignDraft) -> Result<ValidatedDraft, FieldErrors> {
    let errors: FieldErrors = Field::ALL
        .iter()
        .filter_map(|&field| validate_field(draft, field).map(|message| (field, message)))
        .collect();

    if !errors.is_empty() {
        return Err(errors);
    }

    let mut normalized = draft.clone();
    for &field in Field::ALL.iter() {
        if let Some(text) = normalized.text_mut(field) {
            *text = text.trim().to_string();
        }
    }
    if !normalized.partnering {
        normalized.clear(Field::PartnerName);
    }
    if !normalized.third_party {
        normalized.clear(Field::ThirdPartyName);
    }

    Ok(ValidatedDraft(normalized))
}
