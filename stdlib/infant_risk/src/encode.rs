use infant_model::{ModelError, ModelRow};

use crate::record::InputRecord;

/// Encode a record into the model's training schema.
///
/// The bank-account flag becomes 0/1, counts pass through, and the wealth
/// selection is mirrored (Poorest is sent as Richest and so on) because the
/// classifier was trained on the reversed labels.
pub fn encode(record: &InputRecord) -> Result<ModelRow, ModelError> {
    ModelRow::builder()
        .bank_account(record.has_bank_account)
        .household_members(record.household_size)
        .birth_order(record.birth_order)
        .antenatal_visits(record.antenatal_visits)
        .wealth_index(record.wealth.mirrored())
        .build()
}
