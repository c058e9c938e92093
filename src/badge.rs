use crate::models::AttendanceStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Warning,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub tone: Tone,
    pub label: &'static str,
    pub glyph: Option<&'static str>,
}

impl Badge {
    pub fn for_status(status: AttendanceStatus) -> Self {
        match status {
            AttendanceStatus::OnTime => Self {
                tone: Tone::Positive,
                label: "PUNTUAL",
                glyph: None,
            },
            AttendanceStatus::Late => Self {
                tone: Tone::Warning,
                label: "TARDE",
                glyph: Some("⚠"),
            },
            AttendanceStatus::Unknown => Self {
                tone: Tone::Neutral,
                label: "ASISTIDO",
                glyph: None,
            },
        }
    }

    pub fn render(&self) -> String {
        match self.glyph {
            Some(glyph) => format!("[{glyph} {}]", self.label),
            None => format!("[{}]", self.label),
        }
    }
}
