use serde::{Deserialize, Serialize};

/// A raw key-press as delivered by the UI layer.
///
/// Field names follow the DOM `KeyboardEvent` so the front-end can forward
/// events without reshaping them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawKeyEvent {
    /// Logical key, e.g. `"a"`, `"ArrowLeft"`, `" "`, `"F5"`.
    pub key: String,
    /// Physical key position, e.g. `"KeyA"`, `"Digit1"`, `"Space"`.
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub ctrl_key: bool,
    #[serde(default)]
    pub meta_key: bool,
    #[serde(default)]
    pub alt_key: bool,
    #[serde(default)]
    pub shift_key: bool,
    /// Element holding focus when the key was pressed, if any.
    #[serde(default)]
    pub target: Option<FocusedElement>,
}

impl RawKeyEvent {
    pub fn new(key: &str, code: &str) -> Self {
        Self {
            key: key.to_string(),
            code: code.to_string(),
            ..Default::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl_key = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta_key = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt_key = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift_key = true;
        self
    }

    pub fn focused_on(mut self, target: FocusedElement) -> Self {
        self.target = Some(target);
        self
    }

    /// Whether focus is in a control that accepts typed text.
    pub fn is_typing(&self) -> bool {
        self.target.as_ref().map_or(false, FocusedElement::is_typable)
    }
}

/// The focused element, reduced to what typable-focus detection needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusedElement {
    pub tag_name: String,
    #[serde(default)]
    pub is_content_editable: bool,
}

impl FocusedElement {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            is_content_editable: false,
        }
    }

    pub fn content_editable(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            is_content_editable: true,
        }
    }

    /// Inputs, textareas and editable regions swallow plain key presses.
    pub fn is_typable(&self) -> bool {
        self.is_content_editable
            || self.tag_name.eq_ignore_ascii_case("input")
            || self.tag_name.eq_ignore_ascii_case("textarea")
    }
}
