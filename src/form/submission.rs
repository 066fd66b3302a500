use super::{FieldErrors, FormController, ValidatedDraft};

/// Validates everything the controller holds. On success `on_accept` sees
/// the finalized draft before it is returned; on failure the violating
/// fields are marked as errors and nothing else changes.
///
/// Persisting the accepted draft is left to the caller.
#[tracing::instrument(skip(controller, on_accept))]
pub fn submit<F>(
    controller: &mut FormController,
    on_accept: F,
) -> Result<ValidatedDraft, FieldErrors>
where
    F: FnOnce(&ValidatedDraft),
{
    match controller.validate() {
        Ok(validated) => {
            on_accept(&validated);
            Ok(validated)
        }
        Err(errors) => {
            tracing::debug!(count = errors.len(), "draft rejected");
            controller.mark_errors(&errors);
            Err(errors)
        }
    }
}
