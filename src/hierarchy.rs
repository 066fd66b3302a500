//! Static parent → child valid-value mappings that drive the dependent
//! dropdowns of the campaign form.
//!
//! Two independent chains are described here:
//!
//! - campaign type → source → ad type, with ad type details keyed by
//!   (campaign type, ad type)
//! - cost center → sub-ledger
//!
//! The tables are immutable. Lookups never fail: a key that is not present
//! simply has no entry.

/// A read-only string-keyed mapping over static data.
#[derive(Copy, Clone, Debug)]
pub struct Table<V: 'static> {
    entries: &'static [(&'static str, V)],
}

impl<V: 'static> Table<V> {
    pub const fn new(entries: &'static [(&'static str, V)]) -> Table<V> {
        Table { entries }
    }

    pub fn get(&self, key: &str) -> Option<&'static V> {
        self.entries
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(name, _)| *name)
    }
}

pub type Choices = &'static [&'static str];

#[derive(Copy, Clone, Debug)]
pub struct CampaignTypeEntry {
    pub sources: Choices,
    pub ad_types: Table<Choices>,
    pub ad_type_details: Table<Choices>,
}

pub static CAMPAIGN_TYPES: Table<CampaignTypeEntry> = Table::new(&[
    (
        "Display Ads",
        CampaignTypeEntry {
            sources: &["Google", "LinkedIn", "Programmatic", "Yahoo"],
            ad_types: Table::new(&[
                ("Google", &["Banner", "Rich Media", "Video"]),
                ("LinkedIn", &["Banner", "Sponsored Content"]),
                ("Programmatic", &["Banner", "Native", "Video"]),
                ("Yahoo", &["Banner", "Native"]),
            ]),
            ad_type_details: Table::new(&[
                (
                    "Banner",
                    &["Standard Banner", "Animated Banner", "Leaderboard", "Skyscraper"],
                ),
                ("Rich Media", &["Expandable", "Interstitial"]),
                ("Video", &["Pre-Roll", "Mid-Roll", "Outstream"]),
                ("Sponsored Content", &["Single Image", "Carousel"]),
                ("Native", &["In-Feed", "Content Recommendation"]),
            ]),
        },
    ),
    (
        "Email Campaign",
        CampaignTypeEntry {
            sources: &["Newsletter", "Partner Email", "Marketing Automation"],
            ad_types: Table::new(&[
                ("Newsletter", &["Dedicated Send", "Sponsored Section"]),
                ("Partner Email", &["Dedicated Send"]),
                ("Marketing Automation", &["Nurture", "Promotional"]),
            ]),
            ad_type_details: Table::new(&[
                ("Dedicated Send", &["Text Link", "Hero Image"]),
                ("Sponsored Section", &["Text Link", "Banner Slot"]),
                ("Nurture", &["Welcome Series", "Re-Engagement"]),
                ("Promotional", &["Product Launch", "Event Invite"]),
            ]),
        },
    ),
    (
        "Paid Search",
        CampaignTypeEntry {
            sources: &["Bing", "Google"],
            ad_types: Table::new(&[
                ("Bing", &["Text Ad", "Shopping"]),
                ("Google", &["Text Ad", "Shopping", "Performance Max"]),
            ]),
            ad_type_details: Table::new(&[
                ("Text Ad", &["Responsive Search Ad", "Expanded Text Ad"]),
                ("Shopping", &["Product Listing", "Showcase"]),
                ("Performance Max", &["Asset Group"]),
            ]),
        },
    ),
    (
        "Paid Social",
        CampaignTypeEntry {
            sources: &["Facebook", "Instagram", "LinkedIn", "X"],
            ad_types: Table::new(&[
                ("Facebook", &["Image", "Video", "Carousel"]),
                ("Instagram", &["Story", "Reel", "Image"]),
                ("LinkedIn", &["Sponsored Content", "Message Ad"]),
                ("X", &["Promoted Post"]),
            ]),
            ad_type_details: Table::new(&[
                ("Image", &["Single Image"]),
                ("Video", &["In-Stream", "Feed Video"]),
                ("Carousel", &["Multi-Product"]),
                ("Story", &["Full Screen"]),
                ("Reel", &["Short Form"]),
                ("Sponsored Content", &["Single Image", "Carousel", "Document"]),
                ("Message Ad", &["Conversation Ad"]),
                ("Promoted Post", &["Text", "Image", "Video"]),
            ]),
        },
    ),
]);

pub static COST_CENTERS: Table<Choices> = Table::new(&[
    (
        "Engineering",
        &["ENG-100 Platform", "ENG-200 Infrastructure", "ENG-300 Research"],
    ),
    (
        "Marketing",
        &["MKT-100 Brand", "MKT-200 Demand Generation", "MKT-300 Events"],
    ),
    ("Product", &["PRD-100 Hardware", "PRD-200 Software"]),
    ("Sales", &["SLS-100 Field Sales", "SLS-200 Inside Sales"]),
]);
