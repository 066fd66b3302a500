use crate::database::Database;
use crate::error::Error;
use crate::reference::{manager, ReferenceKind};
use crate::resolver;

const DEFAULT_CATEGORIES: &[&str] = &["Accessories", "Hardware", "Services", "Software"];

/// Inserts the default lookup rows that are missing. Existing rows are
/// never touched.
#[tracing::instrument(skip(db))]
pub async fn seed(db: &dyn Database) -> Result<(), Error> {
    let defaults = [
        (ReferenceKind::ChannelType, resolver::campaign_types()),
        (ReferenceKind::Category, DEFAULT_CATEGORIES.to_vec()),
    ];

    for (kind, names) in defaults.iter() {
        for name in names {
            if manager::reference_exists(db, *kind, name).await? {
                continue;
            }

            manager::create_reference(db, *kind, name).await?;
        }
    }

    Ok(())
}
