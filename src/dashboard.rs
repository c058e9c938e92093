use std::fmt::Write;

use crate::badge::{Badge, Tone};
use crate::filter::{AttendanceFilter, Clock};
use crate::lookup::Session;
use crate::models::{AttendanceEntry, StudentRecord};

pub const INVALID_SESSION: &str = "Sesión no válida...";
pub const NO_ACTIVITY: &str = "Sin actividad";

/// Read-only view over a session's student record.
pub struct Dashboard {
    session: Option<Session>,
    filter: AttendanceFilter,
}

impl Dashboard {
    pub fn new(session: Option<Session>) -> Self {
        Self {
            session,
            filter: AttendanceFilter::All,
        }
    }

    pub fn filter(&self) -> AttendanceFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: AttendanceFilter) {
        self.filter = filter;
    }

    pub fn student(&self) -> Option<&StudentRecord> {
        self.session.as_ref().map(|session| &session.student)
    }

    pub fn visible_entries(&self, clock: &impl Clock) -> Vec<&AttendanceEntry> {
        match self.student() {
            Some(student) => self.filter.apply(&student.attendance, clock),
            None => Vec::new(),
        }
    }

    /// Ends the session, returning it to the caller.
    pub fn logout(self) -> Option<Session> {
        self.session
    }

    pub fn render(&self, clock: &impl Clock) -> String {
        let Some(student) = self.student() else {
            return format!("{INVALID_SESSION}\n");
        };

        let mut output = String::new();
        let initial = student
            .name
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default();

        let _ = writeln!(output, "Academia  ({initial})");
        let _ = writeln!(output);
        let _ = writeln!(output, "ESTUDIANTE");
        let _ = writeln!(output, "{}", student.name.to_uppercase());
        let _ = writeln!(
            output,
            "DNI {}  |  Ciclo actual {}  |  Sede {}",
            student.national_id,
            student.cycle.to_uppercase(),
            student.campus.to_uppercase()
        );

        let _ = writeln!(output);
        let _ = writeln!(output, "ÚLTIMO REGISTRO");
        match student.most_recent() {
            Some(last) => {
                let (clock_part, meridiem) = split_time(&last.time);
                if meridiem.is_empty() {
                    let _ = writeln!(output, "{clock_part}");
                } else {
                    let _ = writeln!(output, "{clock_part} {}", meridiem.to_uppercase());
                }
                let _ = writeln!(output, "{}", last.date);
                let _ = writeln!(output, "● REGISTRADO");
            }
            None => {
                let _ = writeln!(output, "{NO_ACTIVITY}");
            }
        }

        let visible = self.filter.apply(&student.attendance, clock);
        let _ = writeln!(output);
        let _ = writeln!(output, "HISTORIAL DE ASISTENCIA ({})", self.filter);

        if student.is_truncated() {
            let _ = writeln!(
                output,
                "Mostrando {} de {} registros.",
                student.attendance.len(),
                student.total_record_count()
            );
        }

        if visible.is_empty() {
            let _ = writeln!(output, "No hay registros para este periodo.");
            return output;
        }

        let late = visible
            .iter()
            .filter(|entry| Badge::for_status(entry.status()).tone == Tone::Warning)
            .count();
        if late > 0 {
            let _ = writeln!(output, "Tardanzas en el periodo: {late}");
        }

        for entry in visible {
            let badge = Badge::for_status(entry.status());
            let _ = writeln!(
                output,
                "- {}  Ingreso Campus  {}  {}",
                entry.date,
                entry.time,
                badge.render()
            );
        }

        output
    }
}

fn split_time(raw: &str) -> (&str, &str) {
    let mut parts = raw.split_whitespace();
    let clock = parts.next().unwrap_or("");
    let meridiem = parts.next().unwrap_or("");
    (clock, meridiem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FixedClock;
    use chrono::NaiveDate;
    use serde_json::json;

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2026, 10, 14).unwrap())
    }

    fn session(payload: serde_json::Value) -> Session {
        Session {
            student: serde_json::from_value(payload).unwrap(),
        }
    }

    fn three_entries() -> Session {
        session(json!({
            "nombre": "lucía quispe",
            "dni": "12345678",
            "ciclo": "2026-ii",
            "sede": "centro",
            "asistencias": [
                {"fecha": "14-10-2026", "hora": "07:55 am", "estado": "PUNTUAL"},
                {"fecha": "02-10-2026", "hora": "08:20 AM", "estado": "TARDE"},
                {"fecha": "30-09-2026", "hora": "08:01 AM"}
            ],
            "totalRegistros": 30
        }))
    }

    #[test]
    fn missing_session_renders_fallback() {
        let dashboard = Dashboard::new(None);
        assert_eq!(dashboard.render(&clock()), "Sesión no válida...\n");
        assert!(dashboard.visible_entries(&clock()).is_empty());
    }

    #[test]
    fn renders_profile_and_most_recent_record() {
        let dashboard = Dashboard::new(Some(three_entries()));
        let output = dashboard.render(&clock());

        assert!(output.contains("Academia  (L)"));
        assert!(output.contains("LUCÍA QUISPE"));
        assert!(output.contains("DNI 12345678  |  Ciclo actual 2026-II  |  Sede CENTRO"));
        assert!(output.contains("ÚLTIMO REGISTRO\n07:55 AM\n14-10-2026\n● REGISTRADO"));
        assert!(output.contains("- 02-10-2026  Ingreso Campus  08:20 AM  [⚠ TARDE]"));
        assert!(output.contains("- 30-09-2026  Ingreso Campus  08:01 AM  [ASISTIDO]"));
        assert!(output.contains("Tardanzas en el periodo: 1"));
    }

    #[test]
    fn surfaces_truncated_history() {
        let output = Dashboard::new(Some(three_entries())).render(&clock());
        assert!(output.contains("Mostrando 3 de 30 registros."));
    }

    #[test]
    fn empty_history_shows_no_activity() {
        let dashboard = Dashboard::new(Some(session(json!({
            "nombre": "Ana", "dni": "11112222", "ciclo": "I", "sede": "Norte",
            "asistencias": []
        }))));
        let output = dashboard.render(&clock());

        assert!(output.contains("ÚLTIMO REGISTRO\nSin actividad"));
        assert!(output.contains("No hay registros para este periodo."));
        assert!(!output.contains("Mostrando"));
    }

    #[test]
    fn filter_changes_visible_history() {
        let mut dashboard = Dashboard::new(Some(three_entries()));
        dashboard.set_filter(AttendanceFilter::ThisWeek);
        let output = dashboard.render(&clock());

        assert_eq!(dashboard.visible_entries(&clock()).len(), 1);
        assert!(output.contains("HISTORIAL DE ASISTENCIA (esta semana)"));
        assert!(!output.contains("- 02-10-2026"));

        dashboard.set_filter(AttendanceFilter::Month(8));
        let visible = dashboard.visible_entries(&clock());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].date, "30-09-2026");
    }

    #[test]
    fn logout_returns_the_session() {
        let dashboard = Dashboard::new(Some(three_entries()));
        let session = dashboard.logout().unwrap();
        assert_eq!(session.student.national_id.to_string(), "12345678");
    }
}
