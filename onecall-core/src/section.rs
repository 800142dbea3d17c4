//! Selection of response sections and the provider's `exclude` parameter.

use bitflags::bitflags;
use std::fmt;

/// One independently selectable part of the One Call response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Current,
    Minutely,
    Hourly,
    Daily,
    Alerts,
}

impl Section {
    /// Every section, in the order the `exclude` parameter lists them.
    pub const ALL: [Section; 5] = [
        Section::Current,
        Section::Minutely,
        Section::Hourly,
        Section::Daily,
        Section::Alerts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Current => "current",
            Section::Minutely => "minutely",
            Section::Hourly => "hourly",
            Section::Daily => "daily",
            Section::Alerts => "alerts",
        }
    }

    pub const fn flag(self) -> Sections {
        match self {
            Section::Current => Sections::CURRENT,
            Section::Minutely => Sections::MINUTELY,
            Section::Hourly => Sections::HOURLY,
            Section::Daily => Sections::DAILY,
            Section::Alerts => Sections::ALERTS,
        }
    }

    /// Case-insensitive lookup; `None` for anything that is not a section name.
    pub fn from_name(name: &str) -> Option<Section> {
        let name = name.trim();
        Section::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Set of sections the caller wants returned.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Sections: u8 {
        const CURRENT  = 1 << 0;
        const MINUTELY = 1 << 1;
        const HOURLY   = 1 << 2;
        const DAILY    = 1 << 3;
        const ALERTS   = 1 << 4;
    }
}

impl Default for Sections {
    fn default() -> Self {
        Sections::all()
    }
}

impl From<Section> for Sections {
    fn from(section: Section) -> Self {
        section.flag()
    }
}

impl FromIterator<Section> for Sections {
    fn from_iter<I: IntoIterator<Item = Section>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Sections::empty(), |acc, s| acc | s.flag())
    }
}

impl Sections {
    /// Build a wanted-set from section names. Unknown names are ignored,
    /// so they simply count as "not requested".
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|n| Section::from_name(n.as_ref()))
            .collect()
    }

    /// Sections NOT wanted, in fixed order.
    pub fn excluded(self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|s| !self.contains(s.flag()))
            .collect()
    }

    /// Value of the `exclude` query parameter. Empty when everything is wanted,
    /// which means the parameter is omitted.
    pub fn exclude_param(self) -> String {
        self.excluded()
            .iter()
            .map(Section::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}
