//! Layer-name conventions.
//!
//! All UI semantics are inferred from layer names: prefixes and suffixes
//! select the widget kind, `@` markers tag special roles within a widget.
//! Classification is centralized here so the rules stay testable
//! independently of the tree walk.

/// Group name prefix identified as a nested component.
pub const COMPONENT_PREFIX: &str = "Com";

/// Group name suffix identified as a button.
pub const BUTTON_SUFFIX: &str = "Btn";

/// Group name suffix identified as a checkbox button.
pub const CHECK_BUTTON_SUFFIX: &str = "CheckBtn";

/// Group name suffix identified as a radio button.
pub const RADIO_BUTTON_SUFFIX: &str = "@RadioBtn";

/// Group name suffix identified as a radio-group container.
pub const RADIO_GROUP_SUFFIX: &str = "@RadioGroup";

/// Group name suffix identified as a slider.
pub const SLIDER_SUFFIX: &str = "Slider";

/// Group name suffix identified as a progress bar.
pub const PROGRESS_BAR_SUFFIX: &str = "ProBar";

/// Layer name markers for each button status, in controller page order.
pub const BUTTON_STATE_MARKERS: [&str; 2] = ["@up", "@down"];

/// Widget kind of a group layer, inferred from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// Nested component (full recursive conversion).
    Component,
    /// Button, including checkbox and radio variants.
    Button,
    ProgressBar,
    Slider,
    /// Radio-group container; emits a controller, no placement of its own.
    RadioGroup,
    /// Transparent grouping, recursed into without synthesis.
    Plain,
}

/// Classify a group layer by name. First match wins.
pub fn classify_group(name: &str) -> GroupKind {
    if name.starts_with(COMPONENT_PREFIX) {
        GroupKind::Component
    } else if name.ends_with(BUTTON_SUFFIX) {
        GroupKind::Button
    } else if name.ends_with(PROGRESS_BAR_SUFFIX) {
        GroupKind::ProgressBar
    } else if name.ends_with(SLIDER_SUFFIX) {
        GroupKind::Slider
    } else if name.ends_with(RADIO_GROUP_SUFFIX) {
        GroupKind::RadioGroup
    } else {
        GroupKind::Plain
    }
}

pub fn is_check_button(name: &str) -> bool {
    name.ends_with(CHECK_BUTTON_SUFFIX)
}

pub fn is_radio_button(name: &str) -> bool {
    name.ends_with(RADIO_BUTTON_SUFFIX)
}

/// Special role of a layer within its enclosing widget, tagged by an `@`
/// marker in the name. Affects the placement's name and attributes, not the
/// widget classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialUsage {
    /// `@title`: the layer supplies the widget's title text.
    Title,
    /// `@icon`: the layer supplies the widget's icon; placed as a loader.
    Icon,
    /// `grip@`: the draggable handle of a slider or progress bar.
    Grip,
    /// `@bar`: the fill track of a slider or progress bar.
    Bar,
}

impl SpecialUsage {
    pub fn as_str(self) -> &'static str {
        match self {
            SpecialUsage::Title => "title",
            SpecialUsage::Icon => "icon",
            SpecialUsage::Grip => "grip",
            SpecialUsage::Bar => "bar",
        }
    }
}

/// Detect a special-usage marker in a layer name.
pub fn special_usage(name: &str) -> Option<SpecialUsage> {
    if name.contains("@title") {
        Some(SpecialUsage::Title)
    } else if name.contains("@icon") {
        Some(SpecialUsage::Icon)
    } else if name.contains("grip@") {
        Some(SpecialUsage::Grip)
    } else if name.contains("@bar") {
        Some(SpecialUsage::Bar)
    } else {
        None
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// The word-character run immediately before the first `@` in a name
/// (the `label@...` declaration pattern), if any.
pub fn label_before_at(name: &str) -> Option<&str> {
    let bytes = name.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'@' {
            continue;
        }
        let mut start = i;
        while start > 0 && is_word_byte(bytes[start - 1]) {
            start -= 1;
        }
        if start < i {
            return Some(&name[start..i]);
        }
    }
    None
}

/// Resolve the controller name a radio group (or a radio button's parent
/// group) declares: the group name with its first `@` removed when a
/// `label@` declaration is present, else a generated `c<n>` name based on
/// how many controllers the enclosing component already has.
pub fn controller_name(group_name: &str, existing_controllers: usize) -> String {
    if label_before_at(group_name).is_some() {
        group_name.replacen('@', "", 1)
    } else {
        format!("c{}", existing_controllers + 1)
    }
}
