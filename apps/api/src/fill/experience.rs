//! Experience synthesis: renders the work-history list as free text for
//! "describe your experience" style textareas.

use tracing::debug;

use crate::fill::normalize::normalize;
use crate::fill::writer::FillSink;
use crate::models::form::FormSnapshot;
use crate::models::profile::ExperienceEntry;

/// A textarea qualifies when its normalized identifier contains one of these.
const EXPERIENCE_HINTS: &[&str] = &[
    "experience",
    "work",
    "summary",
    "responsibilities",
    "achievements",
];

/// One paragraph per entry, in the given order, joined by newlines:
/// `<role> @ <company> (<start> - <end>)\n  <description>`.
///
/// The date part lists whichever dates are present and is dropped when
/// neither is. Missing role or company fall back to `Role` / `Company`.
pub fn render_experience(entries: &[ExperienceEntry]) -> String {
    entries
        .iter()
        .map(render_entry)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_entry(entry: &ExperienceEntry) -> String {
    let role = non_empty(&entry.role).unwrap_or("Role");
    let company = non_empty(&entry.company).unwrap_or("Company");
    let dates = [non_empty(&entry.start_date), non_empty(&entry.end_date)]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" - ");
    let description = non_empty(&entry.description).unwrap_or("");

    if dates.is_empty() {
        format!("{role} @ {company}\n  {description}")
    } else {
        format!("{role} @ {company} ({dates})\n  {description}")
    }
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

pub fn is_experience_textarea(identifier: &str) -> bool {
    let hint = normalize(identifier);
    EXPERIENCE_HINTS.iter().any(|h| hint.contains(h))
}

/// Writes the rendered experience into every empty textarea whose identifier
/// hints at work history. Returns the number of textareas written.
///
/// Textareas that already hold text, including text written earlier in the
/// same pass, are left alone.
pub fn synthesize_experience<S>(entries: &[ExperienceEntry], snapshot: &mut FormSnapshot, sink: &mut S) -> usize
where
    S: FillSink + ?Sized,
{
    if entries.is_empty() {
        return 0;
    }

    let text = render_experience(entries);
    let mut written = 0;

    for (index, control) in snapshot.controls.iter_mut().enumerate() {
        if !control.is_textarea() || !control.value.is_empty() {
            continue;
        }
        if !is_experience_textarea(control.identifier()) {
            continue;
        }

        debug!(index, identifier = control.identifier(), "Writing experience block");
        control.value = text.clone();
        sink.set_value(index, &text);
        sink.notify_input(index);
        sink.notify_change(index);
        written += 1;
    }

    written
}
