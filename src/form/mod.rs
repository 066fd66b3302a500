use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub mod controller;
pub mod endpoints;
pub mod schema;
pub mod submission;
pub use endpoints::*;

pub use controller::FormController;
pub use schema::ValidatedDraft;

/// Violation messages keyed by the offending field.
pub type FieldErrors = BTreeMap<Field, String>;

/// The in-progress campaign form. Every text field is free-form until
/// validated; empty strings mean "not provided".
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CampaignDraft {
    pub base_url: String,
    pub anchor_tag: String,
    pub campaign_type: String,
    pub campaign_source: String,
    pub ad_type: String,
    pub ad_type_detail: String,
    pub targeting: bool,
    pub brand1: String,
    pub brand2: String,
    pub brand3: String,
    pub product_category: String,
    pub product_brand: String,
    pub campaign_owner: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub campaign_notes: String,
    pub project_reference_number: String,
    pub budget: String,
    pub industry: String,
    pub tactic: String,
    pub cost_center: String,
    pub sub_ledger: String,
    pub partnering: bool,
    pub partner_name: String,
    pub third_party: bool,
    pub third_party_name: String,
}

enum Slot<'a> {
    Text(&'a mut String),
    Flag(&'a mut bool),
    Date(&'a mut Option<NaiveDate>),
}

impl CampaignDraft {
    pub fn value(&self, field: Field) -> FieldValue {
        match field {
            Field::BaseUrl => FieldValue::Text(self.base_url.clone()),
            Field::AnchorTag => FieldValue::Text(self.anchor_tag.clone()),
            Field::CampaignType => FieldValue::Text(self.campaign_type.clone()),
            Field::CampaignSource => FieldValue::Text(self.campaign_source.clone()),
            Field::AdType => FieldValue::Text(self.ad_type.clone()),
            Field::AdTypeDetail => FieldValue::Text(self.ad_type_detail.clone()),
            Field::Targeting => FieldValue::Flag(self.targeting),
            Field::Brand1 => FieldValue::Text(self.brand1.clone()),
            Field::Brand2 => FieldValue::Text(self.brand2.clone()),
            Field::Brand3 => FieldValue::Text(self.brand3.clone()),
            Field::ProductCategory => FieldValue::Text(self.product_category.clone()),
            Field::ProductBrand => FieldValue::Text(self.product_brand.clone()),
            Field::CampaignOwner => FieldValue::Text(self.campaign_owner.clone()),
            Field::StartDate => FieldValue::Date(self.start_date),
            Field::EndDate => FieldValue::Date(self.end_date),
            Field::CampaignNotes => FieldValue::Text(self.campaign_notes.clone()),
            Field::ProjectReferenceNumber => {
                FieldValue::Text(self.project_reference_number.clone())
            }
            Field::Budget => FieldValue::Text(self.budget.clone()),
            Field::Industry => FieldValue::Text(self.industry.clone()),
            Field::Tactic => FieldValue::Text(self.tactic.clone()),
            Field::CostCenter => FieldValue::Text(self.cost_center.clone()),
            Field::SubLedger => FieldValue::Text(self.sub_ledger.clone()),
            Field::Partnering => FieldValue::Flag(self.partnering),
            Field::PartnerName => FieldValue::Text(self.partner_name.clone()),
            Field::ThirdParty => FieldValue::Flag(self.third_party),
            Field::ThirdPartyName => FieldValue::Text(self.third_party_name.clone()),
        }
    }

    /// The trimmed contents of a text field, or `""` for flags and dates.
    pub fn text(&self, field: Field) -> &str {
        let text = match field {
            Field::BaseUrl => &self.base_url,
            Field::AnchorTag => &self.anchor_tag,
            Field::CampaignType => &self.campaign_type,
            Field::CampaignSource => &self.campaign_source,
            Field::AdType => &self.ad_type,
            Field::AdTypeDetail => &self.ad_type_detail,
            Field::Brand1 => &self.brand1,
            Field::Brand2 => &self.brand2,
            Field::Brand3 => &self.brand3,
            Field::ProductCategory => &self.product_category,
            Field::ProductBrand => &self.product_brand,
            Field::CampaignOwner => &self.campaign_owner,
            Field::CampaignNotes => &self.campaign_notes,
            Field::ProjectReferenceNumber => &self.project_reference_number,
            Field::Budget => &self.budget,
            Field::Industry => &self.industry,
            Field::Tactic => &self.tactic,
            Field::CostCenter => &self.cost_center,
            Field::SubLedger => &self.sub_ledger,
            Field::PartnerName => &self.partner_name,
            Field::ThirdPartyName => &self.third_party_name,
            Field::Targeting
            | Field::StartDate
            | Field::EndDate
            | Field::Partnering
            | Field::ThirdParty => return "",
        };

        text.trim()
    }

    pub fn is_empty(&self, field: Field) -> bool {
        self.value(field).is_empty()
    }

    fn slot(&mut self, field: Field) -> Slot<'_> {
        match field {
            Field::BaseUrl => Slot::Text(&mut self.base_url),
            Field::AnchorTag => Slot::Text(&mut self.anchor_tag),
            Field::CampaignType => Slot::Text(&mut self.campaign_type),
            Field::CampaignSource => Slot::Text(&mut self.campaign_source),
            Field::AdType => Slot::Text(&mut self.ad_type),
            Field::AdTypeDetail => Slot::Text(&mut self.ad_type_detail),
            Field::Targeting => Slot::Flag(&mut self.targeting),
            Field::Brand1 => Slot::Text(&mut self.brand1),
            Field::Brand2 => Slot::Text(&mut self.brand2),
            Field::Brand3 => Slot::Text(&mut self.brand3),
            Field::ProductCategory => Slot::Text(&mut self.product_category),
            Field::ProductBrand => Slot::Text(&mut self.product_brand),
            Field::CampaignOwner => Slot::Text(&mut self.campaign_owner),
            Field::StartDate => Slot::Date(&mut self.start_date),
            Field::EndDate => Slot::Date(&mut self.end_date),
            Field::CampaignNotes => Slot::Text(&mut self.campaign_notes),
            Field::ProjectReferenceNumber => Slot::Text(&mut self.project_reference_number),
            Field::Budget => Slot::Text(&mut self.budget),
            Field::Industry => Slot::Text(&mut self.industry),
            Field::Tactic => Slot::Text(&mut self.tactic),
            Field::CostCenter => Slot::Text(&mut self.cost_center),
            Field::SubLedger => Slot::Text(&mut self.sub_ledger),
            Field::Partnering => Slot::Flag(&mut self.partnering),
            Field::PartnerName => Slot::Text(&mut self.partner_name),
            Field::ThirdParty => Slot::Flag(&mut self.third_party),
            Field::ThirdPartyName => Slot::Text(&mut self.third_party_name),
        }
    }

    pub fn set(&mut self, field: Field, value: FieldValue) -> Result<(), Error> {
        match (self.slot(field), value) {
            (Slot::Text(slot), FieldValue::Text(value)) => *slot = value,
            (Slot::Flag(slot), FieldValue::Flag(value)) => *slot = value,
            (Slot::Date(slot), FieldValue::Date(value)) => *slot = value,
            _ => return Err(Error::FieldTypeMismatch { field }),
        }

        Ok(())
    }

    /// The text slot behind a field, or `None` for flags and dates.
    pub fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match self.slot(field) {
            Slot::Text(slot) => Some(slot),
            Slot::Flag(_) | Slot::Date(_) => None,
        }
    }

    /// Resets a field to its empty value.
    pub fn clear(&mut self, field: Field) {
        match self.slot(field) {
            Slot::Text(slot) => slot.clear(),
            Slot::Flag(slot) => *slot = false,
            Slot::Date(slot) => *slot = None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    BaseUrl,
    AnchorTag,
    CampaignType,
    CampaignSource,
    AdType,
    AdTypeDetail,
    Targeting,
    Brand1,
    Brand2,
    Brand3,
    ProductCategory,
    ProductBrand,
    CampaignOwner,
    StartDate,
    EndDate,
    CampaignNotes,
    ProjectReferenceNumber,
    Budget,
    Industry,
    Tactic,
    CostCenter,
    SubLedger,
    Partnering,
    PartnerName,
    ThirdParty,
    ThirdPartyName,
}

impl Field {
    pub const ALL: [Field; 26] = [
        Field::BaseUrl,
        Field::AnchorTag,
        Field::CampaignType,
        Field::CampaignSource,
        Field::AdType,
        Field::AdTypeDetail,
        Field::Targeting,
        Field::Brand1,
        Field::Brand2,
        Field::Brand3,
        Field::ProductCategory,
        Field::ProductBrand,
        Field::CampaignOwner,
        Field::StartDate,
        Field::EndDate,
        Field::CampaignNotes,
        Field::ProjectReferenceNumber,
        Field::Budget,
        Field::Industry,
        Field::Tactic,
        Field::CostCenter,
        Field::SubLedger,
        Field::Partnering,
        Field::PartnerName,
        Field::ThirdParty,
        Field::ThirdPartyName,
    ];

    /// Fields that are reset whenever this field's value changes.
    pub fn dependents(self) -> &'static [Field] {
        match self {
            Field::CampaignType => &[Field::CampaignSource, Field::AdType, Field::AdTypeDetail],
            Field::CampaignSource => &[Field::AdType, Field::AdTypeDetail],
            Field::AdType => &[Field::AdTypeDetail],
            Field::CostCenter => &[Field::SubLedger],
            Field::Partnering => &[Field::PartnerName],
            Field::ThirdParty => &[Field::ThirdPartyName],
            _ => &[],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Date(Option<NaiveDate>),
    Text(String),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::Flag(flag) => !flag,
            FieldValue::Date(date) => date.is_none(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> FieldValue {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> FieldValue {
        FieldValue::Text(text)
    }
}

impl From<bool> for FieldValue {
    fn from(flag: bool) -> FieldValue {
        FieldValue::Flag(flag)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(date: NaiveDate) -> FieldValue {
        FieldValue::Date(Some(date))
    }
}

impl From<Option<NaiveDate>> for FieldValue {
    fn from(date: Option<NaiveDate>) -> FieldValue {
        FieldValue::Date(date)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldStatus {
    Error,
    RequiredUnmet,
    Completed,
    Default,
}
