use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "dni")]
    pub national_id: NationalId,
    #[serde(rename = "ciclo")]
    pub cycle: String,
    #[serde(rename = "sede")]
    pub campus: String,
    #[serde(rename = "asistencias", default)]
    pub attendance: Vec<AttendanceEntry>,
    #[serde(
        rename = "totalRegistros",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub total_records: Option<u64>,
    /// Fields the endpoint sends that the dashboard does not render.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StudentRecord {
    pub fn most_recent(&self) -> Option<&AttendanceEntry> {
        self.attendance.first()
    }

    /// Total reported by the endpoint, falling back to what was delivered.
    pub fn total_record_count(&self) -> u64 {
        self.total_records
            .unwrap_or(self.attendance.len() as u64)
    }

    pub fn is_truncated(&self) -> bool {
        self.total_record_count() > self.attendance.len() as u64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "hora")]
    pub time: String,
    #[serde(rename = "estado", default, skip_serializing_if = "Option::is_none")]
    pub raw_status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AttendanceEntry {
    pub fn status(&self) -> AttendanceStatus {
        self.raw_status
            .as_deref()
            .map(AttendanceStatus::classify)
            .unwrap_or(AttendanceStatus::Unknown)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceStatus {
    OnTime,
    Late,
    Unknown,
}

impl AttendanceStatus {
    pub fn classify(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "puntual" | "a tiempo" | "on time" | "ontime" | "temprano" => Self::OnTime,
            "tarde" | "tardanza" | "late" => Self::Late,
            _ => Self::Unknown,
        }
    }
}

/// The `dni` field as the spreadsheet sent it: sheets emit it as text or as a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NationalId {
    Text(String),
    Number(Number),
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}
