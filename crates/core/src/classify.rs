//! Classification of raw service responses into domain outcomes.
//!
//! Every response body passes through here exactly once, right after it is downloaded.
//! Downstream code only ever sees [`PredictionReceipt`] or [`GeneAnalysisOutcome`].
//!
//! Schema mismatches are reported with the path of the offending field (e.g.
//! `standard_treatments[0].name`) using `serde_path_to_error`.

use crate::constants::{DEFAULT_ALERT_MESSAGE, DEFAULT_PREDICTION_MESSAGE};
use crate::model::{
    GeneAnalysisOutcome, GeneAnalysisResult, MutationIndicators, PredictionReceipt,
    ShortSequenceAlert, Treatment, TumorPrediction,
};
use crate::ClientError;
use api_shared::{
    GeneAnalysisRes, MutationIndicatorsRes, TreatmentRes, UploadMriRes, ALERT_KEY, ERROR_KEY,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Classify the body of a successful upload response.
///
/// # Errors
///
/// - [`ClientError::ServiceRejected`] if the body carries an `error` key,
/// - [`ClientError::SchemaMismatch`] if `predicted_class` is missing or not a string,
/// - [`ClientError::MalformedResponse`] if the label is blank or the body is not an object.
pub fn classify_prediction_response(url: &str, body: &str) -> Result<PredictionReceipt, ClientError> {
    let object = parse_object(url, body)?;

    if let Some(error) = object.get(ERROR_KEY) {
        return Err(ClientError::ServiceRejected {
            url: url.to_string(),
            message: value_text(error).unwrap_or_else(|| "unspecified error".into()),
        });
    }

    let wire: UploadMriRes = deserialize_at_path(url, object)?;
    let prediction =
        TumorPrediction::new(&wire.predicted_class).ok_or_else(|| ClientError::MalformedResponse {
            url: url.to_string(),
            reason: "predicted_class is empty".into(),
        })?;

    let message = if wire.message.trim().is_empty() {
        DEFAULT_PREDICTION_MESSAGE.to_string()
    } else {
        wire.message
    };

    Ok(PredictionReceipt {
        message,
        prediction,
        file_path: wire.file_path,
    })
}

/// Classify the body of a successful analysis response.
///
/// The presence of the `alert` key is the only discriminator: with it the body is a
/// [`ShortSequenceAlert`] whatever else it carries; without it the body is read as a result.
/// A result missing its `tumor_type` is attributed to `requested_tumor_type`.
pub fn classify_analysis_response(
    url: &str,
    requested_tumor_type: &str,
    body: &str,
) -> Result<GeneAnalysisOutcome, ClientError> {
    let object = parse_object(url, body)?;

    if let Some(alert) = object.get(ALERT_KEY) {
        let message = value_text(alert).unwrap_or_else(|| DEFAULT_ALERT_MESSAGE.into());
        return Ok(GeneAnalysisOutcome::Alert(ShortSequenceAlert { message }));
    }

    let wire: GeneAnalysisRes = deserialize_at_path(url, object)?;
    Ok(GeneAnalysisOutcome::Result(result_from_wire(
        wire,
        requested_tumor_type,
    )))
}

fn parse_object(url: &str, body: &str) -> Result<Map<String, Value>, ClientError> {
    let value: Value =
        serde_json::from_str(body).map_err(|source| ClientError::ResponseDeserialize {
            url: url.to_string(),
            raw: body.to_string(),
            source,
        })?;

    match value {
        Value::Object(object) => Ok(object),
        other => Err(ClientError::MalformedResponse {
            url: url.to_string(),
            reason: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
    }
}

fn deserialize_at_path<T: DeserializeOwned>(
    url: &str,
    object: Map<String, Value>,
) -> Result<T, ClientError> {
    serde_path_to_error::deserialize(Value::Object(object)).map_err(|err| {
        let path = err.path().to_string();
        let path = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        ClientError::SchemaMismatch {
            url: url.to_string(),
            path,
            message: err.into_inner().to_string(),
        }
    })
}

/// Readable text of an `alert`/`error` value; `None` for `null` or blank strings.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn result_from_wire(wire: GeneAnalysisRes, requested_tumor_type: &str) -> GeneAnalysisResult {
    let tumor_type = if wire.tumor_type.trim().is_empty() {
        requested_tumor_type.to_string()
    } else {
        wire.tumor_type
    };

    GeneAnalysisResult {
        tumor_type,
        // Non-finite values cannot come from JSON, but a NaN would poison formatting.
        gc_content: wire.gc_content.filter(|gc| gc.is_finite()),
        mutation_indicators: wire.mutation_indicators.map(indicators_from_wire),
        standard_treatments: wire
            .standard_treatments
            .into_iter()
            .map(treatment_from_wire)
            .collect(),
        personalized_treatments: wire
            .personalized_treatments
            .into_iter()
            .map(treatment_from_wire)
            .collect(),
    }
}

fn treatment_from_wire(wire: TreatmentRes) -> Treatment {
    Treatment {
        name: wire.name,
        mechanism: wire.mechanism,
        reason: wire.reason.filter(|r| !r.trim().is_empty()),
    }
}

fn indicators_from_wire(wire: MutationIndicatorsRes) -> MutationIndicators {
    MutationIndicators {
        tp53_mutation: wire.tp53_mutation,
        idh_mutation: wire.idh_mutation,
        mgmt_methylated: wire.mgmt_methylated,
    }
}
