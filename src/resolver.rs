use crate::hierarchy::{CampaignTypeEntry, Choices, CAMPAIGN_TYPES, COST_CENTERS};

fn sorted(choices: impl IntoIterator<Item = &'static str>) -> Vec<&'static str> {
    let mut choices: Vec<_> = choices.into_iter().collect();
    choices.sort_unstable();
    choices.dedup();
    choices
}

fn campaign_type(name: &str) -> Option<&'static CampaignTypeEntry> {
    if name.is_empty() {
        return None;
    }

    CAMPAIGN_TYPES.get(name)
}

fn listed(choices: Option<&'static Choices>) -> Vec<&'static str> {
    sorted(choices.into_iter().flat_map(|choices| choices.iter().copied()))
}

pub fn campaign_types() -> Vec<&'static str> {
    sorted(CAMPAIGN_TYPES.keys())
}

pub fn sources(campaign_type_name: &str) -> Vec<&'static str> {
    listed(campaign_type(campaign_type_name).map(|entry| &entry.sources))
}

/// Ad types are only offered for a source that actually belongs to the
/// selected campaign type.
pub fn ad_types(campaign_type_name: &str, campaign_source: &str) -> Vec<&'static str> {
    let entry = match campaign_type(campaign_type_name) {
        Some(entry) => entry,
        None => return vec![],
    };

    if campaign_source.is_empty() || !entry.sources.contains(&campaign_source) {
        return vec![];
    }

    listed(entry.ad_types.get(campaign_source))
}

pub fn ad_type_details(campaign_type_name: &str, ad_type: &str) -> Vec<&'static str> {
    if ad_type.is_empty() {
        return vec![];
    }

    listed(campaign_type(campaign_type_name).and_then(|entry| entry.ad_type_details.get(ad_type)))
}

pub fn cost_centers() -> Vec<&'static str> {
    sorted(COST_CENTERS.keys())
}

pub fn sub_ledgers(cost_center: &str) -> Vec<&'static str> {
    if cost_center.is_empty() {
        return vec![];
    }

    listed(COST_CENTERS.get(cost_center))
}
