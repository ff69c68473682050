use std::fmt;

use crate::Source;

/// One line of a [`BindingReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BindingEntry {
    pub kind: String,
    pub signature: String,
    pub callback: String,
    pub source: Source,
}

/// Plain-data description of a [`Binding`](crate::Binding).
///
/// Two bindings built from the same kinds and the same callback sequence
/// produce equal reports, which makes reports convenient for logging and for
/// comparing bindings in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BindingReport {
    pub entries: Vec<BindingEntry>,
}

impl BindingReport {
    pub fn defaults(&self) -> impl Iterator<Item = &BindingEntry> {
        self.entries.iter().filter(|e| e.source == Source::Default)
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for BindingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(
                f,
                "{}{} -> {} [{}]",
                entry.kind, entry.signature, entry.callback, entry.source
            )?;
        }
        Ok(())
    }
}
