//! JSON bodies exchanged with the prediction and gene-analysis services.
//!
//! The analysis endpoint answers with one of two shapes. [`AnalyzeGeneSequenceRes`] is an
//! untagged enum so the service can emit either; clients must check for [`crate::ALERT_KEY`]
//! before reading a body as [`GeneAnalysisRes`].

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Reads an explicit `null` the same way as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Health response body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Successful MRI upload response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadMriRes {
    /// Human-readable status message.
    #[serde(default)]
    pub message: String,

    /// Predicted tumor-type label.
    pub predicted_class: String,

    /// Where the service stored the upload, when it reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

/// Request body for the gene-sequence analysis endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeGeneSequenceReq {
    pub tumor_type: String,
    pub dna_sequence: String,
}

/// A treatment recommendation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TreatmentRes {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub mechanism: String,

    /// Only present on personalized treatments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Sequence-derived markers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MutationIndicatorsRes {
    #[serde(default)]
    pub tp53_mutation: bool,
    #[serde(default)]
    pub idh_mutation: bool,
    #[serde(default)]
    pub mgmt_methylated: bool,
}

/// Result shape of the analysis response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeneAnalysisRes {
    /// Empty when the service omitted it or sent `null`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tumor_type: String,

    /// Serialised as `null` when no bases could be counted.
    #[serde(default)]
    pub gc_content: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutation_indicators: Option<MutationIndicatorsRes>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub standard_treatments: Vec<TreatmentRes>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub personalized_treatments: Vec<TreatmentRes>,
}

/// Alert shape of the analysis response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShortSequenceAlertRes {
    pub alert: String,
}

/// Either shape of the analysis response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum AnalyzeGeneSequenceRes {
    Alert(ShortSequenceAlertRes),
    Result(GeneAnalysisRes),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_gc_content_is_serialised_explicitly() {
        let res = GeneAnalysisRes {
            tumor_type: "glioma".into(),
            gc_content: None,
            mutation_indicators: None,
            standard_treatments: vec![],
            personalized_treatments: vec![],
        };
        let json = serde_json::to_value(&res).unwrap();
        assert!(json.get("gc_content").unwrap().is_null());
        assert!(json.get("mutation_indicators").is_none());
    }

    #[test]
    fn alert_variant_serialises_as_bare_alert_object() {
        let res = AnalyzeGeneSequenceRes::Alert(ShortSequenceAlertRes {
            alert: "Sequence too short".into(),
        });
        let json = serde_json::to_string(&res).unwrap();
        assert_eq!(json, r#"{"alert":"Sequence too short"}"#);
    }

    #[test]
    fn standard_treatment_omits_reason() {
        let treatment = TreatmentRes {
            name: "Temozolomide".into(),
            mechanism: "DNA alkylation".into(),
            reason: None,
        };
        let json = serde_json::to_value(&treatment).unwrap();
        assert!(json.get("reason").is_none());
    }

    #[test]
    fn missing_treatment_lists_default_to_empty() {
        let res: GeneAnalysisRes =
            serde_json::from_str(r#"{"tumor_type":"glioma","gc_content":0.5}"#).unwrap();
        assert!(res.standard_treatments.is_empty());
        assert!(res.personalized_treatments.is_empty());
    }

    #[test]
    fn null_fields_read_as_absent() {
        let res: GeneAnalysisRes = serde_json::from_str(
            r#"{"tumor_type":null,"gc_content":null,
                "standard_treatments":null,"personalized_treatments":[{"name":"APR-246","mechanism":null}]}"#,
        )
        .unwrap();
        assert_eq!(res.tumor_type, "");
        assert!(res.standard_treatments.is_empty());
        assert_eq!(res.personalized_treatments[0].mechanism, "");
    }

    #[test]
    fn upload_response_tolerates_missing_file_path() {
        let res: UploadMriRes =
            serde_json::from_str(r#"{"message":"ok","predicted_class":"Glioma"}"#).unwrap();
        assert_eq!(res.predicted_class, "Glioma");
        assert!(res.file_path.is_none());
    }
}
