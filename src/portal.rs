use std::io::{BufRead, Write};

use anyhow::Context;
use tracing::{debug, info};

use crate::client::LookupSource;
use crate::dashboard::Dashboard;
use crate::filter::{AttendanceFilter, Clock};
use crate::lookup;

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Filter(AttendanceFilter),
    Logout,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Command::Unknown(String::new());
    };

    match verb.to_lowercase().as_str() {
        "todo" | "todos" => Command::Filter(AttendanceFilter::All),
        "semana" => Command::Filter(AttendanceFilter::ThisWeek),
        "mes" => match words.next().and_then(|index| index.parse::<u32>().ok()) {
            Some(index) => AttendanceFilter::month(index)
                .map(Command::Filter)
                .unwrap_or_else(|| Command::Unknown(line.trim().to_string())),
            None => Command::Unknown(line.trim().to_string()),
        },
        "salir" => Command::Logout,
        _ => Command::Unknown(line.trim().to_string()),
    }
}

/// Runs login → dashboard cycles until the input is exhausted.
pub async fn run<S, C, R, W>(source: &S, clock: &C, input: R, mut out: W) -> anyhow::Result<()>
where
    S: LookupSource + ?Sized,
    C: Clock,
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "DNI del alumno: ")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("failed to read DNI")?;

        let session = match lookup::submit(source, &line, |message| {
            eprintln!("{message}");
        })
        .await
        {
            Ok(session) => session,
            Err(error) => {
                writeln!(out, "{error}")?;
                continue;
            }
        };

        let mut dashboard = Dashboard::new(Some(session));
        write!(out, "{}", dashboard.render(clock))?;

        loop {
            writeln!(out, "[todo | semana | mes <0-11> | salir]")?;
            out.flush()?;
            let Some(line) = lines.next() else {
                return Ok(());
            };
            let line = line.context("failed to read command")?;

            match parse_command(&line) {
                Command::Filter(filter) => {
                    dashboard.set_filter(filter);
                    debug!(filter = %dashboard.filter(), "filter changed");
                    write!(out, "{}", dashboard.render(clock))?;
                }
                Command::Logout => {
                    if let Some(session) = dashboard.logout() {
                        info!(dni = %session.student.national_id, "session closed");
                    }
                    writeln!(out, "Sesión cerrada.")?;
                    break;
                }
                Command::Unknown(text) => {
                    writeln!(out, "Comando no reconocido: {text}")?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dni::Dni;
    use crate::error::LookupError;
    use crate::filter::FixedClock;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use std::io::Cursor;

    struct Directory;

    #[async_trait]
    impl LookupSource for Directory {
        async fn fetch(&self, dni: &Dni) -> Result<Value, LookupError> {
            if dni.as_str() != "12345678" {
                return Ok(json!({"error": true, "mensaje": "DNI no registrado"}));
            }
            Ok(json!({
                "nombre": "Ana Torres", "dni": "12345678", "ciclo": "IV", "sede": "Sur",
                "asistencias": [
                    {"fecha": "14-10-2026", "hora": "07:50 AM", "estado": "PUNTUAL"},
                    {"fecha": "03-03-2026", "hora": "08:30 AM", "estado": "TARDE"}
                ]
            }))
        }
    }

    #[test]
    fn parses_dashboard_commands() {
        assert_eq!(parse_command("todo"), Command::Filter(AttendanceFilter::All));
        assert_eq!(parse_command(" SEMANA "), Command::Filter(AttendanceFilter::ThisWeek));
        assert_eq!(parse_command("mes 2"), Command::Filter(AttendanceFilter::Month(2)));
        assert_eq!(parse_command("mes 12"), Command::Unknown("mes 12".to_string()));
        assert_eq!(parse_command("mes"), Command::Unknown("mes".to_string()));
        assert_eq!(parse_command("salir"), Command::Logout);
    }

    #[tokio::test]
    async fn walks_through_login_filter_and_logout() {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2026, 10, 14).unwrap());
        let input = Cursor::new("1234\n87654321\n12345678\nmes 2\nayuda\nsalir\n");
        let mut out = Vec::new();

        run(&Directory, &clock, input, &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("El DNI debe tener 8 dígitos."));
        assert!(text.contains("DNI no registrado"));
        assert!(text.contains("ANA TORRES"));
        assert!(text.contains("HISTORIAL DE ASISTENCIA (mes de marzo)"));
        assert!(text.contains("- 03-03-2026  Ingreso Campus  08:30 AM  [⚠ TARDE]"));
        assert!(text.contains("Comando no reconocido: ayuda"));
        assert!(text.ends_with("Sesión cerrada.\nDNI del alumno: "));
    }
}
