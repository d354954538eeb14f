use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Run the full Morby Method deal analysis over a JSON-encoded
/// `DealInputs`, returning the JSON-encoded output envelope.
#[napi]
pub fn analyze_deal(input_json: String) -> NapiResult<String> {
    let input: morby_core::deal::DealInputs =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = morby_core::deal::analyze_deal(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Month-by-month amortization schedule for a JSON-encoded `ScheduleInput`.
#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: morby_core::schedule::ScheduleInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        morby_core::schedule::amortization_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
