use std::collections::BTreeMap;

use crate::error::Error;
use crate::resolver;

use super::schema::{self, ValidatedDraft};
use super::{CampaignDraft, Field, FieldErrors, FieldStatus, FieldValue};

/// Owns the values of a single campaign form and keeps dependent fields
/// consistent as their parents change.
///
/// All mutation goes through [`FormController::set_field`]; the controller
/// assumes a single writer.
#[derive(Clone, Debug)]
pub struct FormController {
    draft: CampaignDraft,
    // last committed value of each cascade parent
    committed: BTreeMap<Field, FieldValue>,
    errors: FieldErrors,
}

impl Default for FormController {
    fn default() -> FormController {
        FormController::new()
    }
}

impl FormController {
    /// An empty form. Its empty values count as committed, so the first
    /// value given to a parent field resets whatever its dependents hold.
    pub fn new() -> FormController {
        FormController::load(CampaignDraft::default())
    }

    /// Starts from a pre-filled draft. The loaded values count as committed,
    /// so no cascade fires for them.
    pub fn load(draft: CampaignDraft) -> FormController {
        let committed = Field::ALL
            .iter()
            .filter(|field| !field.dependents().is_empty())
            .map(|&field| (field, draft.value(field)))
            .collect();

        FormController {
            draft,
            committed,
            errors: FieldErrors::new(),
        }
    }

    pub fn draft(&self) -> &CampaignDraft {
        &self.draft
    }

    pub fn value(&self, field: Field) -> FieldValue {
        self.draft.value(field)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Commits a new value and returns the dependent fields that were reset
    /// as a consequence.
    #[tracing::instrument(skip(self, value))]
    pub fn set_field(
        &mut self,
        field: Field,
        value: impl Into<FieldValue>,
    ) -> Result<Vec<Field>, Error> {
        let value = value.into();
        self.draft.set(field, value.clone())?;

        let mut cleared = vec![];
        if !field.dependents().is_empty() {
            let previous = self.committed.insert(field, value.clone());
            if matches!(previous, Some(previous) if previous != value) {
                for &dependent in field.dependents() {
                    if !self.draft.is_empty(dependent) {
                        tracing::debug!(?dependent, "clearing stale dependent field");
                    }
                    self.draft.clear(dependent);
                    self.errors.remove(&dependent);
                    if let Some(committed) = self.committed.get_mut(&dependent) {
                        *committed = self.draft.value(dependent);
                    }
                    cleared.push(dependent);
                }
            }
        }

        self.revalidate(field);
        for &dependent in field.dependents() {
            if self.errors.contains_key(&dependent) {
                self.revalidate(dependent);
            }
        }

        Ok(cleared)
    }

    fn revalidate(&mut self, field: Field) {
        if self.draft.is_empty(field) {
            self.errors.remove(&field);
            return;
        }

        match schema::validate_field(&self.draft, field) {
            Some(message) => {
                self.errors.insert(field, message);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    pub fn is_required(&self, field: Field) -> bool {
        schema::is_required(&self.draft, field)
    }

    pub fn status(&self, field: Field) -> FieldStatus {
        if self.errors.contains_key(&field) {
            FieldStatus::Error
        } else if !self.draft.is_empty(field) {
            FieldStatus::Completed
        } else if self.is_required(field) {
            FieldStatus::RequiredUnmet
        } else {
            FieldStatus::Default
        }
    }

    pub fn statuses(&self) -> BTreeMap<Field, FieldStatus> {
        Field::ALL
            .iter()
            .map(|&field| (field, self.status(field)))
            .collect()
    }

    /// The options currently available for a dropdown field. Fields without
    /// a fixed choice set yield nothing.
    pub fn choices(&self, field: Field) -> Vec<&'static str> {
        let draft = &self.draft;
        match field {
            Field::CampaignType => resolver::campaign_types(),
            Field::CampaignSource => resolver::sources(draft.text(Field::CampaignType)),
            Field::AdType => resolver::ad_types(
                draft.text(Field::CampaignType),
                draft.text(Field::CampaignSource),
            ),
            Field::AdTypeDetail => resolver::ad_type_details(
                draft.text(Field::CampaignType),
                draft.text(Field::AdType),
            ),
            Field::CostCenter => resolver::cost_centers(),
            Field::SubLedger => resolver::sub_ledgers(draft.text(Field::CostCenter)),
            _ => vec![],
        }
    }

    /// Runs the full schema without touching field values.
    pub fn validate(&self) -> Result<ValidatedDraft, FieldErrors> {
        schema::validate(&self.draft)
    }

    pub(crate) fn mark_errors(&mut self, errors: &FieldErrors) {
        for (field, message) in errors {
            self.errors.insert(*field, message.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::schema::tests::valid_draft;

    #[test]
    fn changing_campaign_type_clears_hierarchy() {
        let mut form = FormController::new();
        form.set_field(Field::CampaignType, "Display Ads").unwrap();
        form.set_field(Field::CampaignSource, "Google").unwrap();
        form.set_field(Field::AdType, "Banner").unwrap();
        form.set_field(Field::AdTypeDetail, "Standard Banner").unwrap();

        let cleared = form.set_field(Field::CampaignType, "Email Campaign").unwrap();

        assert_eq!(
            cleared,
            vec![Field::CampaignSource, Field::AdType, Field::AdTypeDetail]
        );
        assert_eq!(form.draft().campaign_source, "");
        assert_eq!(form.draft().ad_type, "");
        assert_eq!(form.draft().ad_type_detail, "");
        assert_eq!(form.draft().campaign_type, "Email Campaign");
    }

    #[test]
    fn changing_source_keeps_campaign_type() {
        let mut form = FormController::load(valid_draft());

        let cleared = form.set_field(Field::CampaignSource, "LinkedIn").unwrap();

        assert_eq!(cleared, vec![Field::AdType, Field::AdTypeDetail]);
        assert_eq!(form.draft().campaign_type, "Display Ads");
        assert_eq!(form.choices(Field::AdType), vec!["Banner", "Sponsored Content"]);
    }

    #[test]
    fn setting_same_value_does_not_cascade() {
        let mut form = FormController::load(valid_draft());

        let cleared = form.set_field(Field::CampaignType, "Display Ads").unwrap();

        assert!(cleared.is_empty());
        assert_eq!(form.draft(), &valid_draft());
    }

    #[test]
    fn loading_prefilled_draft_does_not_cascade() {
        let mut draft = valid_draft();
        draft.cost_center = "Engineering".to_string();
        draft.sub_ledger = "ENG-100 Platform".to_string();

        let form = FormController::load(draft.clone());

        assert_eq!(form.draft(), &draft);
        assert_eq!(form.status(Field::SubLedger), FieldStatus::Completed);
    }

    #[test]
    fn first_parent_commit_on_fresh_form_clears_children() {
        let mut form = FormController::new();
        form.set_field(Field::SubLedger, "ENG-100 Platform").unwrap();

        let cleared = form.set_field(Field::CostCenter, "Sales").unwrap();

        assert_eq!(cleared, vec![Field::SubLedger]);
        assert_eq!(form.draft().sub_ledger, "");
        assert_eq!(form.status(Field::SubLedger), FieldStatus::RequiredUnmet);
    }

    #[test]
    fn fresh_form_campaign_type_clears_source_and_ad_type() {
        let mut form = FormController::new();
        form.set_field(Field::CampaignSource, "Google").unwrap();
        form.set_field(Field::AdType, "Banner").unwrap();

        let cleared = form.set_field(Field::CampaignType, "Email Campaign").unwrap();

        assert_eq!(
            cleared,
            vec![Field::CampaignSource, Field::AdType, Field::AdTypeDetail]
        );
        assert_eq!(form.draft().campaign_source, "");
        assert_eq!(form.draft().ad_type, "");
        assert_eq!(form.status(Field::CampaignSource), FieldStatus::Default);
    }

    #[test]
    fn cost_center_change_clears_sub_ledger() {
        let mut form = FormController::load(valid_draft());
        form.set_field(Field::CostCenter, "Engineering").unwrap();
        form.set_field(Field::SubLedger, "ENG-100 Platform").unwrap();

        let cleared = form.set_field(Field::CostCenter, "Sales").unwrap();

        assert_eq!(cleared, vec![Field::SubLedger]);
        assert_eq!(form.status(Field::SubLedger), FieldStatus::RequiredUnmet);
    }

    #[test]
    fn sub_ledger_required_tracks_cost_center() {
        let mut form = FormController::load(valid_draft());
        assert!(!form.is_required(Field::SubLedger));
        assert_eq!(form.status(Field::SubLedger), FieldStatus::Default);

        form.set_field(Field::CostCenter, "Engineering").unwrap();
        assert!(form.is_required(Field::SubLedger));
        assert_eq!(form.status(Field::SubLedger), FieldStatus::RequiredUnmet);

        form.set_field(Field::CostCenter, "").unwrap();
        assert!(!form.is_required(Field::SubLedger));
    }

    #[test]
    fn disabling_partnering_clears_partner_name() {
        let mut form = FormController::load(valid_draft());
        form.set_field(Field::Partnering, true).unwrap();
        form.set_field(Field::PartnerName, "Acme").unwrap();
        assert_eq!(form.status(Field::PartnerName), FieldStatus::Completed);

        let cleared = form.set_field(Field::Partnering, false).unwrap();

        assert_eq!(cleared, vec![Field::PartnerName]);
        assert_eq!(form.status(Field::PartnerName), FieldStatus::Default);
    }

    #[test]
    fn statuses_cover_all_four_states() {
        let mut form = FormController::new();
        form.set_field(Field::BaseUrl, "not a url").unwrap();
        form.set_field(Field::Brand1, "Brand A").unwrap();

        assert_eq!(form.status(Field::BaseUrl), FieldStatus::Error);
        assert_eq!(form.status(Field::Brand1), FieldStatus::Completed);
        assert_eq!(form.status(Field::CampaignOwner), FieldStatus::RequiredUnmet);
        assert_eq!(form.status(Field::Brand2), FieldStatus::Default);

        form.set_field(Field::BaseUrl, "https://example.com").unwrap();
        assert_eq!(form.status(Field::BaseUrl), FieldStatus::Completed);
    }

    #[test]
    fn child_without_parent_is_an_error() {
        let mut form = FormController::new();
        form.set_field(Field::CampaignSource, "Google").unwrap();

        assert_eq!(form.status(Field::CampaignSource), FieldStatus::Error);

        form.set_field(Field::CampaignType, "Paid Search").unwrap();
        form.set_field(Field::CampaignSource, "Google").unwrap();

        assert_eq!(form.status(Field::CampaignSource), FieldStatus::Completed);
    }

    #[test]
    fn choices_follow_parents() {
        let mut form = FormController::new();
        assert!(form.choices(Field::CampaignSource).is_empty());

        form.set_field(Field::CampaignType, "Paid Search").unwrap();
        assert_eq!(form.choices(Field::CampaignSource), vec!["Bing", "Google"]);
        assert!(form.choices(Field::Brand1).is_empty());
    }

    #[test]
    fn mismatched_value_is_rejected_without_change() {
        let mut form = FormController::load(valid_draft());

        let result = form.set_field(Field::CampaignType, true);

        assert_eq!(
            result,
            Err(Error::FieldTypeMismatch {
                field: Field::CampaignType
            })
        );
        assert_eq!(form.draft(), &valid_draft());
    }
}
