// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Display-name normalization and model-name stemming.

/// Strips an editor duplicate disambiguator (`.` followed by three or more
/// ASCII digits) from the end of a display name.
///
/// ```
/// use mapstudio_core::strip_disambiguator;
/// assert_eq!(strip_disambiguator("Gate.001"), "Gate");
/// assert_eq!(strip_disambiguator("Gate.01"), "Gate.01");
/// assert_eq!(strip_disambiguator("v1.2000"), "v1");
/// ```
pub fn strip_disambiguator(display_name: &str) -> &str {
    let Some(dot) = display_name.rfind('.') else {
        return display_name;
    };
    let suffix = &display_name[dot + 1..];
    if suffix.len() >= 3 && suffix.bytes().all(|b| b.is_ascii_digit()) {
        &display_name[..dot]
    } else {
        display_name
    }
}

/// Rule deriving a model's canonical name from a referrer's record name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StemRule {
    /// Keep everything before the first occurrence of the separator.
    BeforeSeparator(char),
    /// Keep the first `n` characters.
    Prefix(usize),
}

impl StemRule {
    /// Applies the rule to a (disambiguator-free) record name.
    pub fn stem<'a>(self, name: &'a str) -> &'a str {
        match self {
            Self::BeforeSeparator(sep) => name.split(sep).next().unwrap_or(name),
            Self::Prefix(n) => match name.char_indices().nth(n) {
                Some((end, _)) => &name[..end],
                None => name,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_only_removes_numeric_suffix() {
        assert_eq!(strip_disambiguator("Fog1"), "Fog1");
        assert_eq!(strip_disambiguator("Fog1.123"), "Fog1");
        assert_eq!(strip_disambiguator("Fog1.12a"), "Fog1.12a");
        assert_eq!(strip_disambiguator(".0001"), "");
    }

    #[test]
    fn separator_stem_keeps_leading_segment() {
        let rule = StemRule::BeforeSeparator('_');
        assert_eq!(rule.stem("h0010B0_0001"), "h0010B0");
        assert_eq!(rule.stem("o1234"), "o1234");
    }

    #[test]
    fn prefix_stem_is_char_based() {
        let rule = StemRule::Prefix(5);
        assert_eq!(rule.stem("c1234_0000"), "c1234");
        assert_eq!(rule.stem("c12"), "c12");
        assert_eq!(rule.stem("éééééé"), "ééééé");
    }
}
