use tracing::debug;

use crate::fill::flatten::FlatValue;
use crate::fill::normalize::normalize;
use crate::fill::writer::FillSink;
use crate::models::form::{ControlKind, FormControl, SelectOption};

/// Writes `value` into the control at `index` the way its type expects and
/// dispatches the events page scripts listen for.
///
/// The snapshot copy of the control is updated alongside the sink, so later
/// steps of the same pass see the new state. Returns whether anything was
/// written. Blank text is never written.
pub fn fill_control<S>(index: usize, control: &mut FormControl, value: &FlatValue, sink: &mut S) -> bool
where
    S: FillSink + ?Sized,
{
    if matches!(value, FlatValue::Text(s) if s.is_empty()) {
        return false;
    }

    match control.kind() {
        ControlKind::Select => fill_select(index, control, value, sink),
        ControlKind::Checkbox => {
            let checked = value.is_truthy();
            control.checked = checked;
            sink.set_checked(index, checked);
            sink.notify_change(index);
            true
        }
        ControlKind::Radio => {
            if normalize(control.value.as_str()) != normalize(&*value.as_text()) {
                return false;
            }
            control.checked = true;
            sink.set_checked(index, true);
            sink.notify_change(index);
            true
        }
        ControlKind::TextLike => {
            let text = value.as_text();
            control.value = text.to_string();
            sink.set_value(index, &text);
            sink.notify_input(index);
            sink.notify_change(index);
            true
        }
    }
}

fn fill_select<S>(index: usize, control: &mut FormControl, value: &FlatValue, sink: &mut S) -> bool
where
    S: FillSink + ?Sized,
{
    let target = normalize(&*value.as_text());
    let Some(option_value) = pick_option(&control.options, &target).map(|o| o.value.clone()) else {
        debug!(index, target = %target, "No select option matches");
        return false;
    };

    control.value = option_value;
    sink.set_value(index, &control.value);
    sink.notify_input(index);
    sink.notify_change(index);
    true
}

/// Exact match on normalized value or text first, then the first option whose
/// normalized text contains the target.
fn pick_option<'a>(options: &'a [SelectOption], target: &str) -> Option<&'a SelectOption> {
    options
        .iter()
        .find(|o| normalize(o.value.as_str()) == target || normalize(o.text.as_str()) == target)
        .or_else(|| {
            options
                .iter()
                .find(|o| normalize(o.text.as_str()).contains(target))
        })
}
