use std::fmt;

use serde::Serialize;

use super::{child_texts, expect_tag, required_text, Render};
use crate::markup::NodeRef;
use crate::matcher::TextValue;
use crate::Result;

/// A written form of the headword (`<k_ele>`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KanjiForm {
    /// `<keb>`
    pub value: String,
    /// `<ke_inf>` annotations, e.g. "word containing out-dated kanji or kanji usage"
    pub info: Vec<String>,
    /// `<ke_pri>` priority codes, e.g. "ichi1"
    pub priority: Vec<String>,
}

impl KanjiForm {
    pub const TAG: &'static str = "k_ele";

    pub fn from_node(node: NodeRef<'_>) -> Result<Self> {
        expect_tag(node, Self::TAG)?;
        Ok(Self {
            value: required_text(node, "keb")?,
            info: child_texts(node, "ke_inf"),
            priority: child_texts(node, "ke_pri"),
        })
    }
}

impl TextValue for KanjiForm {
    fn value(&self) -> &str {
        &self.value
    }
}

impl Render for KanjiForm {
    fn as_text(&self) -> String {
        format!("{} (info: {:?}, priority: {:?})", self.value, self.info, self.priority)
    }
}

impl fmt::Display for KanjiForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
