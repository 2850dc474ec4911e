use std::fmt;

use serde::Serialize;

use super::{child_texts, expect_tag, required_text, Render};
use crate::markup::NodeRef;
use crate::matcher::TextValue;
use crate::Result;

/// A kana reading of the headword (`<r_ele>`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReadingForm {
    /// `<reb>`
    pub value: String,
    /// `<re_nokanji>`: present when the reading is not a true reading of any kanji form.
    /// Usually empty text; `None` only when the element is absent.
    pub no_kanji: Option<String>,
    /// `<re_restr>` kanji forms this reading is limited to
    pub restrictions: Vec<String>,
    /// `<re_inf>`
    pub info: Vec<String>,
    /// `<re_pri>`
    pub priority: Vec<String>,
}

impl ReadingForm {
    pub const TAG: &'static str = "r_ele";

    pub fn from_node(node: NodeRef<'_>) -> Result<Self> {
        expect_tag(node, Self::TAG)?;
        Ok(Self {
            value: required_text(node, "reb")?,
            no_kanji: node.child("re_nokanji").map(|child| child.text().to_string()),
            restrictions: child_texts(node, "re_restr"),
            info: child_texts(node, "re_inf"),
            priority: child_texts(node, "re_pri"),
        })
    }

    /// Whether this reading applies to the given kanji form.
    pub fn applies_to(&self, kanji: &str) -> bool {
        self.no_kanji.is_none() && (self.restrictions.is_empty() || self.restrictions.iter().any(|r| r == kanji))
    }
}

impl TextValue for ReadingForm {
    fn value(&self) -> &str {
        &self.value
    }
}

impl Render for ReadingForm {
    fn as_text(&self) -> String {
        format!(
            "{} (no_kanji: {:?}, restrictions: {:?}, info: {:?}, priority: {:?})",
            self.value,
            self.no_kanji,
            self.restrictions,
            self.info,
            self.priority
        )
    }
}

impl fmt::Display for ReadingForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
