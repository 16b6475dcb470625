//! Plain-text rendering of workflow outcomes.
//!
//! Rendering never fails: an unavailable GC content shows as [`GC_CONTENT_PLACEHOLDER`] and
//! an empty treatment list as [`EMPTY_LIST_PLACEHOLDER`].

use crate::constants::{EMPTY_LIST_PLACEHOLDER, GC_CONTENT_PLACEHOLDER};
use crate::model::{GeneAnalysisResult, MutationIndicators, ShortSequenceAlert, Treatment};
use crate::workflow::{AnalysisView, Workflow, WorkflowState};

pub fn format_gc_content(gc_content: Option<f64>) -> String {
    match gc_content {
        Some(gc) if gc.is_finite() => format!("{gc:.2}"),
        _ => GC_CONTENT_PLACEHOLDER.to_string(),
    }
}

/// `name - mechanism`, followed by the reason in parentheses when there is one.
pub fn format_treatment(treatment: &Treatment) -> String {
    let mut line = treatment.name.clone();
    if !treatment.mechanism.is_empty() {
        line.push_str(" - ");
        line.push_str(&treatment.mechanism);
    }
    if let Some(reason) = &treatment.reason {
        line.push_str(&format!(" ({reason})"));
    }
    line
}

/// One line per treatment, or a single placeholder line for an empty list.
pub fn render_treatment_list(treatments: &[Treatment]) -> Vec<String> {
    if treatments.is_empty() {
        return vec![EMPTY_LIST_PLACEHOLDER.to_string()];
    }
    treatments.iter().map(format_treatment).collect()
}

fn render_indicators(indicators: &MutationIndicators) -> String {
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };
    format!(
        "TP53 mutation: {}, IDH mutation: {}, MGMT methylated: {}",
        yes_no(indicators.tp53_mutation),
        yes_no(indicators.idh_mutation),
        yes_no(indicators.mgmt_methylated)
    )
}

pub fn render_result(result: &GeneAnalysisResult) -> String {
    let mut out = format!(
        "Tumor type: {}\nGC content: {}\n",
        result.tumor_type,
        format_gc_content(result.gc_content)
    );
    if let Some(indicators) = &result.mutation_indicators {
        out.push_str(&render_indicators(indicators));
        out.push('\n');
    }

    out.push_str("Standard treatments:\n");
    for line in render_treatment_list(&result.standard_treatments) {
        out.push_str(&format!("  - {line}\n"));
    }
    out.push_str("Personalized treatments:\n");
    for line in render_treatment_list(&result.personalized_treatments) {
        out.push_str(&format!("  - {line}\n"));
    }
    out
}

pub fn render_alert(alert: &ShortSequenceAlert) -> String {
    format!("Alert: {}\n", alert.message)
}

pub fn describe_state(state: &WorkflowState) -> String {
    match state {
        WorkflowState::AnalysisRejected(alert) => format!("{state}: {}", alert.message),
        other => other.to_string(),
    }
}

/// Full status view: state, current prediction and the displayed analysis outcome.
pub fn render_workflow(workflow: &Workflow) -> String {
    let mut out = format!("State: {}\n", describe_state(&workflow.state()));
    if let Some(prediction) = workflow.prediction() {
        out.push_str(&format!("Predicted tumor type: {prediction}\n"));
    }
    match workflow.analysis() {
        Some(AnalysisView::Ready(result)) => out.push_str(&render_result(result)),
        Some(AnalysisView::Rejected(alert)) => out.push_str(&render_alert(alert)),
        None => {}
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temozolomide() -> Treatment {
        Treatment {
            name: "Temozolomide".into(),
            mechanism: "DNA alkylation".into(),
            reason: None,
        }
    }

    #[test]
    fn gc_content_uses_two_decimals() {
        assert_eq!(format_gc_content(Some(0.55)), "0.55");
        assert_eq!(format_gc_content(Some(0.5)), "0.50");
        assert_eq!(format_gc_content(Some(2.0 / 3.0)), "0.67");
    }

    #[test]
    fn unavailable_gc_content_is_placeholder() {
        assert_eq!(format_gc_content(None), "N/A");
        assert_eq!(format_gc_content(Some(f64::NAN)), "N/A");
    }

    #[test]
    fn personalized_treatment_shows_reason() {
        let treatment = Treatment {
            name: "Vorasidenib".into(),
            mechanism: "IDH inhibitor".into(),
            reason: Some("IDH mutation detected".into()),
        };
        assert_eq!(
            format_treatment(&treatment),
            "Vorasidenib - IDH inhibitor (IDH mutation detected)"
        );
        assert_eq!(format_treatment(&temozolomide()), "Temozolomide - DNA alkylation");
    }

    #[test]
    fn empty_list_renders_placeholder() {
        assert_eq!(render_treatment_list(&[]), vec!["No items".to_string()]);
    }

    #[test]
    fn result_with_null_gc_and_empty_lists_renders() {
        let result = GeneAnalysisResult {
            tumor_type: "glioma".into(),
            gc_content: None,
            mutation_indicators: None,
            standard_treatments: Vec::new(),
            personalized_treatments: Vec::new(),
        };
        let text = render_result(&result);
        assert!(text.contains("GC content: N/A"));
        assert_eq!(text.matches("No items").count(), 2);
    }

    #[test]
    fn result_lists_treatments_in_order() {
        let result = GeneAnalysisResult {
            tumor_type: "glioma".into(),
            gc_content: Some(0.55),
            mutation_indicators: Some(MutationIndicators {
                mgmt_methylated: true,
                ..Default::default()
            }),
            standard_treatments: vec![temozolomide()],
            personalized_treatments: Vec::new(),
        };
        let text = render_result(&result);
        assert_eq!(
            text,
            "Tumor type: glioma\n\
             GC content: 0.55\n\
             TP53 mutation: no, IDH mutation: no, MGMT methylated: yes\n\
             Standard treatments:\n  - Temozolomide - DNA alkylation\n\
             Personalized treatments:\n  - No items\n"
        );
    }

    #[test]
    fn idle_workflow_renders_state_only() {
        assert_eq!(render_workflow(&Workflow::new()), "State: idle\n");
    }

    #[test]
    fn rejected_state_names_the_alert() {
        let state = WorkflowState::AnalysisRejected(ShortSequenceAlert {
            message: "Sequence too short".into(),
        });
        assert_eq!(describe_state(&state), "analysis rejected: Sequence too short");
    }
}
