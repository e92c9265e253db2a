use serde::{Deserialize, Serialize};

/// A `<select>` option as read from the page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
}

/// One `input`, `textarea` or `select` element captured by the content script.
///
/// Field names follow the DOM property names so the content script can
/// serialize elements without renaming anything.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FormControl {
    pub tag_name: String,
    #[serde(rename = "type")]
    pub control_type: Option<String>,
    pub name: Option<String>,
    pub id: Option<String>,
    pub placeholder: Option<String>,
    pub value: String,
    pub checked: bool,
    pub options: Vec<SelectOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Select,
    Checkbox,
    Radio,
    TextLike,
}

impl FormControl {
    /// First non-empty of `name`, `id`, `placeholder`; empty when none is set.
    pub fn identifier(&self) -> &str {
        [&self.name, &self.id, &self.placeholder]
            .into_iter()
            .filter_map(|s| s.as_deref())
            .find(|s| !s.is_empty())
            .unwrap_or("")
    }

    pub fn is_textarea(&self) -> bool {
        self.tag_name.eq_ignore_ascii_case("textarea")
    }

    /// The `type` attribute decides the kind; the tag name stands in when it is
    /// missing. A `<select>` is always a select, whatever its attributes say.
    pub fn kind(&self) -> ControlKind {
        if self.tag_name.eq_ignore_ascii_case("select") {
            return ControlKind::Select;
        }
        let declared = self
            .control_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.tag_name);
        match declared.to_ascii_lowercase().as_str() {
            "checkbox" => ControlKind::Checkbox,
            "radio" => ControlKind::Radio,
            _ => ControlKind::TextLike,
        }
    }
}

/// Every form control on the page, in document order, captured at the start
/// of a fill pass. A control's position in `controls` is its address in the
/// returned action plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FormSnapshot {
    pub controls: Vec<FormControl>,
}
