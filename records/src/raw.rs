use serde_derive::{Serialize, Deserialize};

// A single message record as attached to a payment: a decimal string type
// and a hex encoded value.
#[derive(Serialize, Deserialize, Eq, PartialEq, Debug, Clone)]
pub struct RawRecord {
    pub record_type: String,
    pub value: String,
}

impl RawRecord {
    pub fn new(record_type: &str, value: String) -> Self {
        RawRecord {
            record_type: record_type.to_owned(),
            value: value,
        }
    }

    // First record of the given type, if any.
    pub fn find<'a>(records: &'a [RawRecord], record_type: &str) -> Option<&'a RawRecord> {
        records.iter().find(|r| r.record_type == record_type)
    }
}
