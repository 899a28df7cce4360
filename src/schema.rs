//! JSON report records.
//!
//! Flat, string-rendered views of reductions and inferences for `--json`
//! output. Terms and types appear in their `Display` form, so the records
//! carry no library types and serialize the same way everywhere.

use serde::Serialize;

use crate::beta::Strategy;
use crate::error::TypeError;
use crate::infer::Inference;
use crate::normal::{Reduction, ReductionStep};
use crate::render::{redex_span, render, render_debruijn, Notation};
use crate::term::{RedexPath, Term};

/// One contraction in a reported trace
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub step_k: usize,
    pub term: String,
    pub redex_path: RedexPath,
    /// Byte range of the redex in `term`
    pub target_span: Option<(usize, usize)>,
}

impl StepRecord {
    pub fn new(step_k: usize, step: &ReductionStep) -> Self {
        let rendered = render(&step.term, Notation::Named);
        let target_span = redex_span(&rendered, Some(&step.redex_path));
        StepRecord {
            step_k,
            term: rendered.text,
            redex_path: step.redex_path.clone(),
            target_span,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReductionReport {
    pub strategy: Strategy,
    pub input: String,
    pub result: String,
    pub debruijn: String,
    pub steps: usize,
    pub terminated: bool,
    pub total_time_ms: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<StepRecord>,
}

impl ReductionReport {
    pub fn new(input: &Term, strategy: Strategy, reduction: &Reduction) -> Self {
        ReductionReport {
            strategy,
            input: input.to_string(),
            result: reduction.term.to_string(),
            debruijn: render_debruijn(&reduction.term).text,
            steps: reduction.steps,
            terminated: reduction.terminated,
            total_time_ms: reduction.total_time_ms,
            trace: reduction
                .trace
                .iter()
                .enumerate()
                .map(|(k, step)| StepRecord::new(k, step))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InferenceReport {
    pub term: String,
    #[serde(rename = "type")]
    pub ty: Option<String>,
    pub error: Option<String>,
}

impl InferenceReport {
    pub fn new(term: &Term, outcome: &Result<Inference, TypeError>) -> Self {
        let (ty, error) = match outcome {
            Ok(found) => (Some(found.principal().to_string()), None),
            Err(err) => (None, Some(err.to_string())),
        };
        InferenceReport {
            term: term.to_string(),
            ty,
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReductionConfig;
    use crate::env::TypeEnv;
    use crate::infer::infer;
    use crate::normal::Reducer;
    use crate::prelude;

    #[test]
    fn test_reduction_report() {
        let term = Term::apply(prelude::k(), [prelude::identity(), Term::var("z")]);
        let config = ReductionConfig {
            trace: true,
            ..Default::default()
        };
        let reduction = Reducer::new(config).reduce(&term);
        let report = ReductionReport::new(&term, Strategy::NormalOrder, &reduction);

        assert_eq!(report.result, "λx. x");
        assert_eq!(report.debruijn, "λ.0");
        assert_eq!(report.steps, 2);
        assert_eq!(report.trace.len(), 2);

        // the first redex is `K I`, which starts the text
        let first = &report.trace[0];
        let (start, end) = first.target_span.expect("redex is rendered");
        assert_eq!(start, 0);
        assert_eq!(&first.term[start..end], "(λx. λy. x) (λx. x)");

        let json = serde_json::to_value(&report).expect("serializable");
        assert_eq!(json["strategy"], "normal-order");
        assert_eq!(json["terminated"], true);
        assert_eq!(json["trace"][1]["redex_path"], serde_json::json!([]));
    }

    #[test]
    fn test_empty_trace_is_omitted() {
        let term = prelude::identity();
        let reduction = Reducer::new(ReductionConfig::default()).reduce(&term);
        let json = serde_json::to_value(ReductionReport::new(&term, Strategy::NormalOrder, &reduction))
            .expect("serializable");
        assert!(json.get("trace").is_none());
    }

    #[test]
    fn test_inference_report() {
        let term = prelude::k();
        let report = InferenceReport::new(&term, &infer(&TypeEnv::empty(), &term));
        assert_eq!(report.ty.as_deref(), Some("a -> b -> a"));
        assert!(report.error.is_none());

        let bad = prelude::self_apply();
        let report = InferenceReport::new(&bad, &infer(&TypeEnv::empty(), &bad));
        assert!(report.ty.is_none());
        let json = serde_json::to_value(&report).expect("serializable");
        assert!(json["type"].is_null());
        assert!(json["error"].is_string());
    }
}
