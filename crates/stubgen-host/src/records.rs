//! Record-list component
//!
//! An in-process list of `(start, end)` time ranges, used for highlight,
//! exclusion and caption highlight lists. Caption highlights also carry their
//! caption text. Lists persist to JSON arrays of
//! `{ "start": .., "end": .., "caption": .. }` objects, `caption` omitted when absent.

use std::fs;

use serde::{Deserialize, Serialize};
use stubgen_engine::{
    MethodDescriptor, Object, PropertyDescriptor, RuntimeError, TypeDescriptor, TypeRef, Value,
};

/// Type name of record lists.
pub const RECORD_LIST: &str = "RecordList";

/// `LoadFromFile` mode replacing the current records.
pub const MODE_REPLACE: i64 = 0;
/// `LoadFromFile` mode appending to the current records.
pub const MODE_APPEND: i64 = 1;

/// One time range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub start: f64,
    pub end: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl Record {
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            caption: None,
        }
    }

    /// A caption highlight.
    pub fn captioned(caption: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            caption: Some(caption.into()),
            ..Self::new(start, end)
        }
    }
}

/// A list of records.
#[derive(Debug, Clone, Default)]
pub struct RecordList {
    kind: String,
    records: Vec<Record>,
}

impl RecordList {
    /// Create an empty list; `kind` only appears in its text form.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            records: Vec::new(),
        }
    }

    pub fn with_records(mut self, records: impl IntoIterator<Item = Record>) -> Self {
        self.records.extend(records);
        self
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Members a wrapper of a record list may forward to.
    pub fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new(RECORD_LIST)
            .with_property(PropertyDescriptor::new("Count", TypeRef::Int).readable())
            .with_method(
                MethodDescriptor::new("GetRecord")
                    .param("index", TypeRef::Int)
                    .out_param("start", TypeRef::Double)
                    .out_param("end", TypeRef::Double),
            )
            .with_method(
                MethodDescriptor::new("AddRecord")
                    .param("start", TypeRef::Double)
                    .param("end", TypeRef::Double),
            )
            .with_method(
                MethodDescriptor::new("SaveToFile")
                    .param("path", TypeRef::String)
                    .param("mode", TypeRef::Int),
            )
            .with_method(
                MethodDescriptor::new("LoadFromFile")
                    .param("path", TypeRef::String)
                    .param("mode", TypeRef::Int),
            )
            .with_method(
                MethodDescriptor::new("GetCaption")
                    .param("index", TypeRef::Int)
                    .out_param("caption", TypeRef::String)
                    .out_param("start", TypeRef::Double)
                    .out_param("end", TypeRef::Double),
            )
            .with_method(
                MethodDescriptor::new("AddCaption")
                    .param("caption", TypeRef::String)
                    .param("start", TypeRef::Double)
                    .param("end", TypeRef::Double),
            )
            .with_method(MethodDescriptor::new("ClearAll"))
    }

    fn record(&self, index: &Value) -> Result<&Record, RuntimeError> {
        let n = index.as_int()?;
        usize::try_from(n)
            .ok()
            .and_then(|i| self.records.get(i))
            .ok_or_else(|| {
                RuntimeError::Native(format!(
                    "record index {} out of range for {} {}",
                    n,
                    self.records.len(),
                    self.kind
                ))
            })
    }

    fn save(&self, path: &str) -> Result<(), RuntimeError> {
        let json = serde_json::to_string_pretty(&self.records).map_err(native)?;
        fs::write(path, json).map_err(native)?;
        log::debug!("saved {} {} to {}", self.records.len(), self.kind, path);
        Ok(())
    }

    fn load(&mut self, path: &str, mode: i64) -> Result<(), RuntimeError> {
        let text = fs::read_to_string(path).map_err(native)?;
        let loaded: Vec<Record> = serde_json::from_str(&text).map_err(native)?;
        match mode {
            MODE_REPLACE => self.records = loaded,
            MODE_APPEND => self.records.extend(loaded),
            other => return Err(RuntimeError::Native(format!("unknown load mode {}", other))),
        }
        log::debug!("loaded {} from {} ({} now)", self.kind, path, self.records.len());
        Ok(())
    }
}

fn native(err: impl std::fmt::Display) -> RuntimeError {
    RuntimeError::Native(err.to_string())
}

impl Object for RecordList {
    fn type_name(&self) -> &str {
        RECORD_LIST
    }

    fn get(&self, name: &str) -> Result<Value, RuntimeError> {
        match name {
            "Count" => Ok(Value::Int(self.records.len() as i64)),
            _ => Err(RuntimeError::missing_member(RECORD_LIST, name)),
        }
    }

    fn set(&mut self, name: &str, _value: Value) -> Result<(), RuntimeError> {
        Err(RuntimeError::missing_member(RECORD_LIST, name))
    }

    fn invoke(&mut self, name: &str, args: &mut [Value]) -> Result<Value, RuntimeError> {
        match name {
            "get_Count" => {
                RuntimeError::check_arity(name, 0, args)?;
                self.get("Count")
            }
            "GetRecord" => {
                RuntimeError::check_arity(name, 3, args)?;
                let record = self.record(&args[0])?;
                args[1] = Value::Double(record.start);
                args[2] = Value::Double(record.end);
                Ok(Value::Null)
            }
            "GetCaption" => {
                RuntimeError::check_arity(name, 4, args)?;
                let record = self.record(&args[0])?;
                args[1] = Value::from(record.caption.as_deref().unwrap_or_default());
                args[2] = Value::Double(record.start);
                args[3] = Value::Double(record.end);
                Ok(Value::Null)
            }
            "AddRecord" => {
                RuntimeError::check_arity(name, 2, args)?;
                self.records
                    .push(Record::new(args[0].as_double()?, args[1].as_double()?));
                Ok(Value::Null)
            }
            "AddCaption" => {
                RuntimeError::check_arity(name, 3, args)?;
                self.records.push(Record::captioned(
                    args[0].as_str()?,
                    args[1].as_double()?,
                    args[2].as_double()?,
                ));
                Ok(Value::Null)
            }
            "SaveToFile" => {
                RuntimeError::check_arity(name, 2, args)?;
                self.save(args[0].as_str()?)?;
                Ok(Value::Null)
            }
            "LoadFromFile" => {
                RuntimeError::check_arity(name, 2, args)?;
                let mode = args[1].as_int()?;
                self.load(args[0].as_str()?, mode)?;
                Ok(Value::Null)
            }
            "ClearAll" => {
                RuntimeError::check_arity(name, 0, args)?;
                self.records.clear();
                Ok(Value::Null)
            }
            _ => Err(RuntimeError::missing_member(RECORD_LIST, name)),
        }
    }

    fn display(&self) -> String {
        format!("{}({}, {})", RECORD_LIST, self.kind, self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> RecordList {
        RecordList::new("highlights").with_records([
            Record::new(0.0, 1.5),
            Record::captioned("intro", 3.0, 4.25),
        ])
    }

    #[test]
    fn test_get_record_writes_out_arguments() {
        let mut list = list();
        let mut args = [Value::Int(1), Value::Null, Value::Null];
        list.invoke("GetRecord", &mut args).unwrap();
        assert_eq!(args[1], Value::Double(3.0));
        assert_eq!(args[2], Value::Double(4.25));
    }

    #[test]
    fn test_caption_records() {
        let mut list = list();
        list.invoke(
            "AddCaption",
            &mut [Value::from("outro"), Value::Double(8.0), Value::Double(9.5)],
        )
        .unwrap();

        let mut args = [Value::Int(2), Value::Null, Value::Null, Value::Null];
        list.invoke("GetCaption", &mut args).unwrap();
        assert_eq!(args[1], Value::from("outro"));
        assert_eq!(args[3], Value::Double(9.5));

        let mut args = [Value::Int(0), Value::Null, Value::Null, Value::Null];
        list.invoke("GetCaption", &mut args).unwrap();
        assert_eq!(args[1], Value::from(""));
    }

    #[test]
    fn test_out_of_range_record() {
        let mut list = list();
        let err = list
            .invoke("GetRecord", &mut [Value::Int(5), Value::Null, Value::Null])
            .unwrap_err();
        assert!(matches!(err, RuntimeError::Native(m) if m.contains("out of range")));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        let path = path.to_str().unwrap();

        let mut list = list();
        list.invoke("SaveToFile", &mut [Value::from(path), Value::Int(0)])
            .unwrap();
        list.invoke("ClearAll", &mut []).unwrap();
        assert_eq!(list.get("Count").unwrap(), Value::Int(0));

        list.invoke("LoadFromFile", &mut [Value::from(path), Value::Int(MODE_REPLACE)])
            .unwrap();
        list.invoke("LoadFromFile", &mut [Value::from(path), Value::Int(MODE_APPEND)])
            .unwrap();
        assert_eq!(list.records().len(), 4);
        assert_eq!(list.records()[2], Record::new(0.0, 1.5));
        assert_eq!(list.records()[3], Record::captioned("intro", 3.0, 4.25));

        let text = std::fs::read_to_string(path).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(raw[1]["end"], serde_json::json!(4.25));
        assert_eq!(raw[1]["caption"], serde_json::json!("intro"));
        assert!(raw[0].get("caption").is_none());
    }

    #[test]
    fn test_descriptor_matches_members() {
        let descriptor = RecordList::descriptor();
        assert!(descriptor.property("Count").unwrap().readable);
        assert!(descriptor.method("get_Count").is_some());
        let get = descriptor.method("GetRecord").unwrap();
        assert!(get.params[1].is_out() && get.params[2].is_out());
    }
}
