use rand::Rng;
use url::Url;

use crate::error::Error;
use crate::form::{CampaignDraft, Field};

pub const TRACKING_CODE_LENGTH: usize = 10;

// excludes 0, 1, I and O
const TRACKING_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

pub fn generate_tracking_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..TRACKING_CODE_LENGTH)
        .map(|_| TRACKING_CODE_ALPHABET[rng.gen_range(0..TRACKING_CODE_ALPHABET.len())] as char)
        .collect()
}

/// Builds the link handed out for a placement: the base url with utm
/// parameters appended and the anchor tag as its fragment. Query
/// parameters already present on the base url are kept.
pub fn tracking_url(draft: &CampaignDraft, tracking_code: &str) -> Result<String, Error> {
    let mut url = Url::parse(draft.text(Field::BaseUrl)).map_err(|err| {
        Error::ExistentialState(format!("validated base url failed to parse: {}", err))
    })?;

    let params = [
        ("utm_source", draft.text(Field::CampaignSource)),
        ("utm_medium", draft.text(Field::AdType)),
        ("utm_content", draft.text(Field::AdTypeDetail)),
        ("utm_campaign", tracking_code),
    ];

    {
        let mut query = url.query_pairs_mut();
        for (key, value) in params.iter() {
            if !value.is_empty() {
                query.append_pair(key, value);
            }
        }
    }

    let anchor = draft.text(Field::AnchorTag).trim_start_matches('#');
    if !anchor.is_empty() {
        url.set_fragment(Some(anchor));
    }

    Ok(url.into())
}
