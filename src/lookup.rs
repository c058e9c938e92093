use tracing::{info, warn};

use crate::client::{interpret_body, LookupSource};
use crate::dni::Dni;
use crate::error::LookupError;
use crate::models::StudentRecord;
use crate::progress::{ProgressTicker, LOADING_MESSAGES, TICK_PERIOD};

/// Result of one successful lookup, handed to the dashboard by value.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub student: StudentRecord,
}

/// Validates the identifier and performs exactly one lookup against `source`.
///
/// `on_progress` receives the rotating loading messages while the request is
/// pending. It is not called after this future completes; dropping the future
/// mid-request cancels the ticker without waiting for it.
pub async fn submit<S, F>(source: &S, input: &str, on_progress: F) -> Result<Session, LookupError>
where
    S: LookupSource + ?Sized,
    F: FnMut(&str) + Send + 'static,
{
    let dni = Dni::parse(input)?;

    let ticker = ProgressTicker::start(TICK_PERIOD, LOADING_MESSAGES, on_progress);
    let body = source.fetch(&dni).await;
    ticker.stop().await;

    match body.and_then(interpret_body) {
        Ok(student) => {
            info!(dni = %dni, records = student.attendance.len(), "student found");
            Ok(Session { student })
        }
        Err(error) => {
            warn!(dni = %dni, %error, "lookup failed");
            Err(error)
        }
    }
}
