use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::engine::{ImportError, Upload};
use crate::i18n::MessageResolver;
use crate::models::{Deal, ImportResult};
use crate::parser::parse_deals;
use crate::storage::Storage;
use crate::types::DealId;
use crate::validator::DealValidator;

/// Imports uploaded deal files into storage, one request at a time.
///
/// The engine holds no state between requests; storage is the only shared
/// resource.
pub struct ImportEngine {
    storage: Arc<dyn Storage>,
    messages: Arc<dyn MessageResolver>,
    validator: DealValidator
}

impl ImportEngine {
    /// Creates a new engine writing to `storage` and wording its row messages with `messages`.
    pub fn new(storage: Arc<dyn Storage>, messages: Arc<dyn MessageResolver>) -> Self {
        Self {
            storage,
            messages,
            validator: DealValidator::new()
        }
    }

    /// Resolver used for row messages, also used to word request-level errors.
    pub fn messages(&self) -> &dyn MessageResolver {
        self.messages.as_ref()
    }

    /// Runs a full import using the current local time as processing time.
    pub fn import(&self, upload: &Upload) -> Result<ImportResult, ImportError> {
        self.import_at(upload, Local::now().naive_local())
    }

    /// Runs a full import: preflight, parse, then per-row validation,
    /// deduplication and persistence.
    ///
    /// # Errors
    /// Returns `ImportError` if:
    /// - The upload has no bytes.
    /// - The content type or file name is not CSV.
    /// - The file is structurally malformed (nothing is persisted).
    /// - Storage fails (rows saved before the failure stay saved).
    pub fn import_at(&self, upload: &Upload, now: NaiveDateTime) -> Result<ImportResult, ImportError> {
        Self::preflight(upload)?;

        let rows = parse_deals(&upload.bytes).inspect_err(|error| {
            warn!("Rejected malformed CSV upload {:?}: {error}", upload.file_name);
        })?;

        let mut result = ImportResult::default();
        let mut seen = HashSet::<DealId>::new();

        for raw in rows {
            self.process(Deal::from(raw), now, &mut seen, &mut result)?;
        }

        info!(
            "CSV import completed: {} saved, {} duplicates, {} invalid.",
            result.saved, result.duplicates, result.invalid
        );

        Ok(result)
    }

    fn preflight(upload: &Upload) -> Result<(), ImportError> {
        if upload.is_empty() {
            warn!("Rejected empty upload {:?}", upload.file_name);
            return Err(ImportError::EmptyInput);
        }

        if !upload.has_csv_content_type() || !upload.has_csv_file_name() {
            warn!("Rejected non-CSV upload {:?} with content type {:?}", upload.file_name, upload.content_type);
            return Err(ImportError::UnsupportedMediaType {
                content_type: upload.content_type.clone(),
                file_name: upload.file_name.clone()
            });
        }

        Ok(())
    }

    fn process(&self, deal: Deal, now: NaiveDateTime, seen: &mut HashSet<DealId>, result: &mut ImportResult) -> Result<(), ImportError> {
        let has_id = !deal.deal_id.trim().is_empty();

        // Blank ids never enter the seen-set, so they are never in-file duplicates.
        if has_id && !seen.insert(deal.deal_id.clone()) {
            result.record_duplicate(self.messages.get_with_args("import.duplicate_in_file", &[("id", deal.deal_id.as_str())]));
            return Ok(());
        }

        if let Some(failure) = self.validator.validate(&deal, now) {
            let reason = self.messages.get(&failure.message_key());
            result.record_invalid(self.messages.get_with_args("import.invalid", &[("reason", reason.as_str()), ("id", deal.deal_id.as_str())]));
            return Ok(());
        }

        if self.storage.exists(&deal.deal_id)? {
            result.record_duplicate(self.messages.get_with_args("import.duplicate", &[("id", deal.deal_id.as_str())]));
            return Ok(());
        }

        self.storage.save(&deal)?;
        result.record_saved();

        debug!("Deal [{}] saved", deal.deal_id);

        Ok(())
    }
}
