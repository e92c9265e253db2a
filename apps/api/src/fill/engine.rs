//! Fill orchestration: one pass over a captured form.
//!
//! flatten profile → walk controls in document order → resolve a key per
//! control → write the value → synthesize experience text once at the end.
//! A pass never fails: unmatched controls and blank values are skipped.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::fill::experience::synthesize_experience;
use crate::fill::filler::fill_control;
use crate::fill::flatten::{flatten_profile, FlatValue};
use crate::fill::matcher::KeyMatcher;
use crate::fill::writer::FillSink;
use crate::models::form::FormSnapshot;
use crate::models::profile::Profile;

/// Outcome counters for one fill pass.
#[derive(Debug, Clone, Serialize)]
pub struct FillReport {
    pub pass_id: Uuid,
    pub controls: usize,
    pub matched: usize,
    pub filled: usize,
    pub unmatched: usize,
    pub experience_targets: usize,
    pub completed_at: DateTime<Utc>,
}

/// What a control would resolve to, without writing anything.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Detection {
    pub index: usize,
    pub identifier: String,
    pub key: Option<String>,
    pub value: Option<FlatValue>,
}

pub struct FillEngine {
    matcher: KeyMatcher,
}

impl FillEngine {
    pub fn new(matcher: KeyMatcher) -> Self {
        Self { matcher }
    }

    /// Runs a full fill pass, recording writes and events into `sink` and
    /// mirroring them onto `snapshot`.
    pub fn fill_form<S>(&self, profile: &Profile, snapshot: &mut FormSnapshot, sink: &mut S) -> FillReport
    where
        S: FillSink + ?Sized,
    {
        let pass_id = Uuid::new_v4();
        let flat = flatten_profile(profile);
        let keys: Vec<&str> = flat.keys().collect();

        let mut matched = 0;
        let mut filled = 0;

        for (index, control) in snapshot.controls.iter_mut().enumerate() {
            let Some(key) = self.matcher.match_key(control.identifier(), &keys) else {
                continue;
            };
            let Some(value) = flat.get(key) else {
                continue;
            };
            matched += 1;
            debug!(%pass_id, index, identifier = control.identifier(), key, "Matched control");

            if fill_control(index, control, value, sink) {
                filled += 1;
            }
        }

        let experience_targets = synthesize_experience(&profile.experience, snapshot, sink);

        let controls = snapshot.controls.len();
        let report = FillReport {
            pass_id,
            controls,
            matched,
            filled,
            unmatched: controls - matched,
            experience_targets,
            completed_at: Utc::now(),
        };
        info!(
            %pass_id,
            controls,
            matched,
            filled,
            experience_targets,
            "Fill pass complete"
        );
        report
    }

    /// Resolves every control without touching it.
    pub fn detect(&self, profile: &Profile, snapshot: &FormSnapshot) -> Vec<Detection> {
        let flat = flatten_profile(profile);
        let keys: Vec<&str> = flat.keys().collect();

        snapshot
            .controls
            .iter()
            .enumerate()
            .map(|(index, control)| {
                let identifier = control.identifier();
                let key = self.matcher.match_key(identifier, &keys);
                Detection {
                    index,
                    identifier: identifier.to_string(),
                    key: key.map(str::to_string),
                    value: key.and_then(|k| flat.get(k)).cloned(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fill::synonyms::default_synonyms;
    use crate::fill::writer::{FillAction, FillPlan};
    use crate::models::form::{FormControl, SelectOption};
    use serde_json::json;

    fn engine() -> FillEngine {
        FillEngine::new(KeyMatcher::new(default_synonyms()))
    }

    fn control(tag: &str, control_type: Option<&str>, name: &str) -> FormControl {
        FormControl {
            tag_name: tag.to_string(),
            control_type: control_type.map(str::to_string),
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn sample_profile() -> Profile {
        serde_json::from_value(json!({
            "basic": {
                "name": "Ann Lee",
                "email": "ann@example.com",
                "phone": "",
                "country": "united states"
            },
            "preferences": {"prefEmployment": "Full Time", "noticePeriod": "30 days"},
            "custom": [
                {"id": "cf_1", "label": "Relocate", "key": "relocate", "type": "checkbox", "value": false}
            ],
            "experience": [
                {"company": "Acme", "role": "Engineer", "startDate": "2020", "endDate": "2022", "description": "Built things"}
            ]
        }))
        .unwrap()
    }

    fn sample_form() -> FormSnapshot {
        let mut country = control("SELECT", None, "country_code");
        country.options = vec![
            SelectOption { value: "CA".to_string(), text: "Canada".to_string() },
            SelectOption { value: "US".to_string(), text: "United States".to_string() },
        ];
        let mut relocate = control("INPUT", Some("checkbox"), "willing_to_relocate");
        relocate.checked = true;
        let mut notes = control("TEXTAREA", None, "work_summary");
        notes.value = "Already written".to_string();

        FormSnapshot {
            controls: vec![
                control("INPUT", Some("text"), "applicant_full_name"),
                control("INPUT", Some("email"), "user_email_address"),
                control("INPUT", Some("tel"), "mobile"),
                country,
                relocate,
                control("INPUT", Some("text"), "captcha"),
                control("TEXTAREA", None, "workHistory"),
                notes,
            ],
        }
    }

    #[test]
    fn test_full_pass() {
        let mut form = sample_form();
        let mut plan = FillPlan::default();
        let report = engine().fill_form(&sample_profile(), &mut form, &mut plan);

        assert_eq!(form.controls[0].value, "Ann Lee");
        assert_eq!(form.controls[1].value, "ann@example.com");
        // Blank phone is dropped during flattening; the control is untouched.
        assert!(form.controls[2].value.is_empty());
        assert_eq!(plan.input_events(2) + plan.change_events(2), 0);
        assert_eq!(form.controls[3].value, "US");
        assert!(!form.controls[4].checked);
        assert_eq!(plan.change_events(4), 1);
        assert!(form.controls[5].value.is_empty());
        assert_eq!(form.controls[6].value, "Engineer @ Acme (2020 - 2022)\n  Built things");
        assert_eq!(form.controls[7].value, "Already written");

        assert_eq!(report.controls, 8);
        assert_eq!(report.matched, 4);
        assert_eq!(report.filled, 4);
        assert_eq!(report.unmatched, 4);
        assert_eq!(report.experience_targets, 1);
    }

    #[test]
    fn test_second_pass_rewrites_text_inputs_but_not_textareas() {
        let engine = engine();
        let profile = sample_profile();
        let mut form = sample_form();

        let mut first = FillPlan::default();
        engine.fill_form(&profile, &mut form, &mut first);
        let after_first = form.clone();

        let mut second = FillPlan::default();
        let report = engine.fill_form(&profile, &mut form, &mut second);

        // Content is stable across passes.
        assert_eq!(form, after_first);
        // Text inputs are not blank-guarded: same value, events fire again.
        assert_eq!(second.input_events(0), 1);
        assert_eq!(second.change_events(0), 1);
        assert!(second
            .actions()
            .contains(&FillAction::SetValue { index: 0, value: "Ann Lee".to_string() }));
        // The synthesized textarea is now non-empty and stays untouched.
        assert_eq!(second.input_events(6), 0);
        assert_eq!(second.change_events(6), 0);
        assert_eq!(report.experience_targets, 0);
    }

    #[test]
    fn test_textarea_filled_by_key_is_not_overwritten_by_experience() {
        let profile: Profile = serde_json::from_value(json!({
            "basic": {"summary": "Backend engineer"},
            "experience": [{"company": "Acme", "role": "Engineer"}]
        }))
        .unwrap();
        let mut form = FormSnapshot {
            controls: vec![control("TEXTAREA", None, "summary")],
        };
        let mut plan = FillPlan::default();
        let report = engine().fill_form(&profile, &mut form, &mut plan);

        assert_eq!(form.controls[0].value, "Backend engineer");
        assert_eq!(plan.change_events(0), 1);
        assert_eq!(report.experience_targets, 0);
    }

    #[test]
    fn test_custom_key_shadows_basic_value() {
        let profile: Profile = serde_json::from_value(json!({
            "basic": {"email": "home@example.com"},
            "custom": [{"id": "cf_1", "label": "Work email", "key": "email", "type": "text", "value": "work@example.com"}]
        }))
        .unwrap();
        let mut form = FormSnapshot {
            controls: vec![control("INPUT", Some("email"), "email")],
        };
        let mut plan = FillPlan::default();
        engine().fill_form(&profile, &mut form, &mut plan);
        assert_eq!(form.controls[0].value, "work@example.com");
    }

    #[test]
    fn test_empty_profile_writes_nothing() {
        let mut form = sample_form();
        let before = form.clone();
        let mut plan = FillPlan::default();
        let report = engine().fill_form(&Profile::default(), &mut form, &mut plan);
        assert!(plan.is_empty());
        assert_eq!(form, before);
        assert_eq!(report.matched, 0);
        assert_eq!(report.unmatched, before.controls.len());
    }

    #[test]
    fn test_controls_without_identifier_are_skipped() {
        let mut form = FormSnapshot {
            controls: vec![FormControl {
                tag_name: "INPUT".to_string(),
                ..Default::default()
            }],
        };
        let mut plan = FillPlan::default();
        let report = engine().fill_form(&sample_profile(), &mut form, &mut plan);
        assert!(plan.is_empty());
        assert_eq!(report.unmatched, 1);
    }

    #[test]
    fn test_detect_reports_without_writing() {
        let form = sample_form();
        let detections = engine().detect(&sample_profile(), &form);

        assert_eq!(detections.len(), form.controls.len());
        assert_eq!(detections[0].key.as_deref(), Some("name"));
        assert_eq!(detections[0].value, Some(FlatValue::Text("Ann Lee".to_string())));
        assert_eq!(detections[2].key, None);
        assert_eq!(detections[4].key.as_deref(), Some("relocate"));
        assert_eq!(detections[4].value, Some(FlatValue::Bool(false)));
        assert_eq!(detections[5].key, None);
    }
}
