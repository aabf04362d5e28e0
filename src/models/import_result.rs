use serde::Serialize;

/// Aggregated outcome of one import request.
///
/// `errors` holds one message per duplicate or invalid row, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportResult {
    pub saved: usize,
    pub duplicates: usize,
    pub invalid: usize,
    pub errors: Vec<String>
}

impl ImportResult {
    pub fn total(&self) -> usize {
        self.saved + self.duplicates + self.invalid
    }

    pub(crate) fn record_saved(&mut self) {
        self.saved += 1;
    }

    pub(crate) fn record_duplicate(&mut self, message: String) {
        self.duplicates += 1;
        self.errors.push(message);
    }

    pub(crate) fn record_invalid(&mut self, message: String) {
        self.invalid += 1;
        self.errors.push(message);
    }
}
