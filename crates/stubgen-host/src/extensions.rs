//! Helpers over wrapped record lists

use stubgen_engine::{RuntimeError, Value, Wrapper};

use crate::error::{HostError, HostResult};
use crate::records::{Record, MODE_REPLACE};

/// Relative tolerance for times read back from a saved list.
const TIME_TOLERANCE: f64 = 1e-5;

fn same_time(expected: f64, actual: f64) -> bool {
    (expected - actual).abs() <= (expected * TIME_TOLERANCE).abs()
}

fn same_record(expected: &Record, actual: &Record) -> bool {
    expected.caption == actual.caption
        && same_time(expected.start, actual.start)
        && same_time(expected.end, actual.end)
}

/// Record access through a wrapper around a record list.
pub trait RecordListExt {
    /// Number of records.
    fn record_count(&self) -> Result<usize, RuntimeError>;

    /// The record at `index`.
    fn record(&self, index: usize) -> Result<Record, RuntimeError>;

    /// Every record, in order.
    fn records(&self) -> Result<Vec<Record>, RuntimeError>;

    /// Save to a temporary file, clear, load back and compare.
    ///
    /// Times may drift by a relative 1e-5; captions must match exactly.
    ///
    /// Returns the number of records that survived the round trip.
    fn verify_round_trip(&self) -> HostResult<usize>;
}

impl RecordListExt for Wrapper {
    fn record_count(&self) -> Result<usize, RuntimeError> {
        let count = self.get("Count")?.as_int()?;
        usize::try_from(count)
            .map_err(|_| RuntimeError::Native(format!("negative count {}", count)))
    }

    fn record(&self, index: usize) -> Result<Record, RuntimeError> {
        let mut args = [Value::Int(index as i64), Value::Null, Value::Null, Value::Null];
        self.invoke("GetCaption", &mut args)?;
        let caption = args[1].as_str()?;
        Ok(Record {
            start: args[2].as_double()?,
            end: args[3].as_double()?,
            caption: (!caption.is_empty()).then(|| caption.to_string()),
        })
    }

    fn records(&self) -> Result<Vec<Record>, RuntimeError> {
        (0..self.record_count()?).map(|i| self.record(i)).collect()
    }

    fn verify_round_trip(&self) -> HostResult<usize> {
        let before = self.records()?;
        let file = tempfile::Builder::new()
            .prefix("records-")
            .suffix(".json")
            .tempfile()?;
        let path = file.path().to_string_lossy().into_owned();

        self.invoke("SaveToFile", &mut [Value::from(path.as_str()), Value::Int(MODE_REPLACE)])?;
        self.invoke("ClearAll", &mut [])?;
        let cleared = self.record_count()?;
        if cleared != 0 {
            return Err(HostError::Verification(format!(
                "{} record(s) left after ClearAll",
                cleared
            )));
        }
        self.invoke("LoadFromFile", &mut [Value::from(path.as_str()), Value::Int(MODE_REPLACE)])?;

        let after = self.records()?;
        if after.len() != before.len() {
            return Err(HostError::Verification(format!(
                "expected {} record(s) after reload, found {}",
                before.len(),
                after.len()
            )));
        }
        if let Some(i) = before
            .iter()
            .zip(&after)
            .position(|(a, b)| !same_record(a, b))
        {
            return Err(HostError::Verification(format!(
                "record {} changed: {:?} became {:?}",
                i, before[i], after[i]
            )));
        }
        log::debug!("verified {} record(s) through {}", after.len(), path);
        Ok(after.len())
    }
}
