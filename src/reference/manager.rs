use chrono::Utc;

use crate::database::Database;
use crate::error::Error;

use super::{ReferenceEntity, ReferenceId, ReferenceKind};

/// Trims a user-supplied name, rejecting it if nothing is left.
pub fn normalize_name(kind: ReferenceKind, name: &str) -> Result<String, Error> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidReferenceName { kind });
    }

    Ok(name.to_string())
}

#[tracing::instrument(skip(db))]
pub async fn get_references(
    db: &dyn Database,
    kind: ReferenceKind,
) -> Result<Vec<ReferenceEntity>, Error> {
    let references = db.references().fetch_references(kind).await?;

    Ok(references)
}

#[tracing::instrument(skip(db))]
pub async fn reference_exists(
    db: &dyn Database,
    kind: ReferenceKind,
    name: &str,
) -> Result<bool, Error> {
    let name = normalize_name(kind, name)?;
    let reference = db.references().fetch_reference_by_name(kind, &name).await?;

    Ok(reference.is_some())
}

#[tracing::instrument(skip(db))]
pub async fn create_reference(
    db: &dyn Database,
    kind: ReferenceKind,
    name: &str,
) -> Result<ReferenceEntity, Error> {
    let name = normalize_name(kind, name)?;

    if db
        .references()
        .fetch_reference_by_name(kind, &name)
        .await?
        .is_some()
    {
        return Err(Error::DuplicateReferenceName { kind, name });
    }

    let now = Utc::now();
    let reference = ReferenceEntity {
        id: ReferenceId::new(),
        name,
        created_at: now,
        modified_at: now,
    };

    db.references().insert_reference(kind, &reference).await?;

    tracing::info!(reference_id = %reference.id, ?kind, "created reference");

    Ok(reference)
}

#[tracing::instrument(skip(db))]
pub async fn get_reference_by_id(
    db: &dyn Database,
    kind: ReferenceKind,
    reference_id: ReferenceId,
) -> Result<ReferenceEntity, Error> {
    let reference = db
        .references()
        .fetch_reference_by_id(kind, reference_id)
        .await?
        .ok_or(Error::ReferenceNotFound { kind, reference_id })?;

    Ok(reference)
}

#[tracing::instrument(skip(db))]
pub async fn rename_reference(
    db: &dyn Database,
    kind: ReferenceKind,
    reference_id: ReferenceId,
    name: &str,
) -> Result<ReferenceEntity, Error> {
    let name = normalize_name(kind, name)?;
    let reference = get_reference_by_id(db, kind, reference_id).await?;

    if reference.name == name {
        return Ok(reference);
    }

    let existing = db.references().fetch_reference_by_name(kind, &name).await?;
    if existing.is_some() {
        return Err(Error::DuplicateReferenceName { kind, name });
    }

    db.references()
        .update_reference_name(kind, reference, name)
        .await
}

#[tracing::instrument(skip(db))]
pub async fn delete_reference(
    db: &dyn Database,
    kind: ReferenceKind,
    reference_id: ReferenceId,
) -> Result<(), Error> {
    let deleted = db.references().delete_reference(kind, reference_id).await?;
    if !deleted {
        return Err(Error::ReferenceNotFound { kind, reference_id });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test::MockDatabase;
    use crate::database::MemoryDatabase;
    use std::sync::{Arc, Mutex};

    fn acme() -> ReferenceEntity {
        let now = Utc::now();
        ReferenceEntity {
            id: ReferenceId::new(),
            name: "Acme".to_string(),
            created_at: now,
            modified_at: now,
        }
    }

    #[tokio::test]
    async fn can_create_reference() {
        let mut db = MockDatabase::new();
        let called_insert = Arc::new(Mutex::new(false));
        let called_insert_clone = Arc::clone(&called_insert);
        db.references.on_fetch_reference_by_name = Box::new(|(kind, name)| {
            assert_eq!(kind, ReferenceKind::Partner);
            assert_eq!(name, "Acme");
            Ok(None)
        });
        db.references.on_insert_reference = Box::new(move |(kind, reference)| {
            *called_insert_clone.lock().unwrap() = true;
            assert_eq!(kind, ReferenceKind::Partner);
            assert_eq!(reference.name, "Acme".to_string());
            assert_eq!(reference.created_at, reference.modified_at);
            Ok(())
        });

        let reference = create_reference(&db, ReferenceKind::Partner, "  Acme ")
            .await
            .unwrap();

        assert_eq!(reference.name, "Acme".to_string());
        assert!(
            *called_insert.lock().unwrap(),
            "db.insert_reference was not called"
        );
    }

    #[tokio::test]
    async fn create_reference_rejects_blank_name_without_store_call() {
        // every hook panics by default
        let db = MockDatabase::new();

        let result = create_reference(&db, ReferenceKind::Partner, "   ").await;

        assert_eq!(
            result.unwrap_err(),
            Error::InvalidReferenceName {
                kind: ReferenceKind::Partner
            }
        );
    }

    #[tokio::test]
    async fn create_reference_rejects_existing_name() {
        let mut db = MockDatabase::new();
        db.references.on_fetch_reference_by_name = Box::new(|_| Ok(Some(acme())));

        let result = create_reference(&db, ReferenceKind::ThirdParty, "Acme").await;

        assert_eq!(
            result.unwrap_err(),
            Error::DuplicateReferenceName {
                kind: ReferenceKind::ThirdParty,
                name: "Acme".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn create_then_exists_then_duplicate() {
        let db = MemoryDatabase::new();

        create_reference(&db, ReferenceKind::Partner, "Acme")
            .await
            .unwrap();

        assert!(reference_exists(&db, ReferenceKind::Partner, "Acme")
            .await
            .unwrap());
        assert!(!reference_exists(&db, ReferenceKind::Partner, "acme")
            .await
            .unwrap());
        assert!(!reference_exists(&db, ReferenceKind::ThirdParty, "Acme")
            .await
            .unwrap());
        assert_eq!(
            create_reference(&db, ReferenceKind::Partner, "Acme")
                .await
                .unwrap_err(),
            Error::DuplicateReferenceName {
                kind: ReferenceKind::Partner,
                name: "Acme".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn get_references_are_ordered_by_name() {
        let db = MemoryDatabase::new();
        for name in &["Zeta", "Acme", "Midway"] {
            create_reference(&db, ReferenceKind::Category, name)
                .await
                .unwrap();
        }

        let names: Vec<_> = get_references(&db, ReferenceKind::Category)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();

        assert_eq!(names, vec!["Acme", "Midway", "Zeta"]);
    }

    #[tokio::test]
    async fn reference_exists_rejects_missing_name() {
        let db = MockDatabase::new();

        let result = reference_exists(&db, ReferenceKind::Partner, "").await;

        assert_eq!(
            result.unwrap_err(),
            Error::InvalidReferenceName {
                kind: ReferenceKind::Partner
            }
        );
    }

    #[tokio::test]
    async fn rename_reference_checks_duplicates() {
        let db = MemoryDatabase::new();
        let acme = create_reference(&db, ReferenceKind::Partner, "Acme")
            .await
            .unwrap();
        create_reference(&db, ReferenceKind::Partner, "Globex")
            .await
            .unwrap();

        let result = rename_reference(&db, ReferenceKind::Partner, acme.id, "Globex").await;
        assert_eq!(
            result.unwrap_err(),
            Error::DuplicateReferenceName {
                kind: ReferenceKind::Partner,
                name: "Globex".to_string(),
            }
        );

        let renamed = rename_reference(&db, ReferenceKind::Partner, acme.id, "Initech")
            .await
            .unwrap();
        assert_eq!(renamed.id, acme.id);
        assert_eq!(renamed.name, "Initech");
        assert!(!reference_exists(&db, ReferenceKind::Partner, "Acme")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn delete_reference_returns_error_if_doesnt_exist() {
        let mut db = MockDatabase::new();
        let test_reference_id = ReferenceId::new();
        db.references.on_delete_reference = Box::new(move |(kind, reference_id)| {
            assert_eq!(kind, ReferenceKind::ChannelType);
            assert_eq!(reference_id, test_reference_id);
            Ok(false)
        });

        let result = delete_reference(&db, ReferenceKind::ChannelType, test_reference_id).await;

        assert_eq!(
            result.unwrap_err(),
            Error::ReferenceNotFound {
                kind: ReferenceKind::ChannelType,
                reference_id: test_reference_id,
            }
        );
    }
}
