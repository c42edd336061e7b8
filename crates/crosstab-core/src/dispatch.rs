//! Test-family routing.
//!
//! The single entry point of the engine: a request's (family, subtype)
//! pair picks one of the four computors, and every failure leaves as an
//! [`EngineError`] variant. Computors are trusted not to panic, but a
//! panic anywhere in the numeric stack is still caught here and reported
//! as an internal failure instead of unwinding through the serving layer.

use std::panic::{self, AssertUnwindSafe};

use log::{error, warn};

use crate::computor;
use crate::error::EngineError;
use crate::report::TestReport;
use crate::request::TestRequest;

/// The one test family this engine implements.
pub const TEST_FAMILY: &str = "chi-square";

/// Routable subtypes within the family.
pub const SUBTYPES: [&str; 4] = [
    "goodness-of-fit",
    "independence",
    "homogeneity",
    "fishers-exact",
];

/// Route a request to its computor and run it.
pub fn dispatch(request: &TestRequest) -> Result<TestReport, EngineError> {
    let family = request.test_type.as_deref().unwrap_or("");
    let subtype = request.subtype.as_deref().unwrap_or("");

    if family != TEST_FAMILY {
        let err = EngineError::UnsupportedTest(family.to_string());
        warn!("rejected request: family={family:?} subtype={subtype:?}: {err}");
        return Err(err);
    }

    let computor = match subtype {
        "goodness-of-fit" => computor::goodness_of_fit::run,
        "independence" => computor::independence::run,
        "homogeneity" => computor::homogeneity::run,
        "fishers-exact" => computor::fishers_exact::run,
        _ => {
            let err = EngineError::UnsupportedSubtype(subtype.to_string());
            warn!("rejected request: family={family:?} subtype={subtype:?}: {err}");
            return Err(err);
        }
    };

    match panic::catch_unwind(AssertUnwindSafe(|| computor(request))) {
        Ok(Ok(report)) => Ok(report),
        Ok(Err(err)) => {
            warn!("computor failed: family={family:?} subtype={subtype:?}: {err}");
            Err(err)
        }
        Err(payload) => {
            let err = EngineError::Internal(panic_message(payload));
            error!("computor panicked: family={family:?} subtype={subtype:?}: {err}");
            Err(err)
        }
    }
}

/// Best-effort printable message from a panic payload.
fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected panic".to_string()
    }
}
