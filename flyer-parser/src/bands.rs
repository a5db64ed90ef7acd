use std::borrow::Cow;

use crate::SchoolYear;

/// Column header and event vocabulary shared by a group of school years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeBand {
    /// Header shared by every year in the band; `None` means each year has
    /// its own `<n>年生` header.
    shared_marker: Option<&'static str>,
    pub vocabulary: &'static [&'static str],
}

pub const LOWER_GRADES: GradeBand = GradeBand {
    shared_marker: Some("1・2年生"),
    vocabulary: &["ふむふむ", "わくわく"],
};

pub const UPPER_GRADES: GradeBand = GradeBand {
    shared_marker: None,
    vocabulary: &[
        "授業",
        "テスト",
        "模試",
        "講習",
        "保護者会",
        "再開",
        "休講",
        "休校",
    ],
};

/// Texts that are never events, even when they contain a vocabulary word.
pub const IGNORED: &[&str] = &["口座振替日", "授業は", "次回 「"];

impl GradeBand {
    #[must_use]
    pub fn marker(&self, school_year: SchoolYear) -> Cow<'static, str> {
        match self.shared_marker {
            Some(marker) => Cow::Borrowed(marker),
            None => Cow::Owned(school_year.to_string()),
        }
    }

    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.vocabulary.iter().any(|keyword| text.contains(keyword))
    }
}

impl SchoolYear {
    #[must_use]
    pub fn band(self) -> &'static GradeBand {
        if self.is_lower() {
            &LOWER_GRADES
        } else {
            &UPPER_GRADES
        }
    }
}

#[must_use]
pub fn is_ignored(text: &str) -> bool {
    IGNORED.iter().any(|keyword| text.contains(keyword))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1, "1・2年生")]
    #[case(2, "1・2年生")]
    #[case(3, "3年生")]
    #[case(4, "4年生")]
    #[case(5, "5年生")]
    #[case(6, "6年生")]
    fn markers(#[case] year: u8, #[case] marker: &str) {
        let year = SchoolYear::new(year).unwrap();
        assert_eq!(year.band().marker(year), marker);
    }

    #[rstest]
    #[case(LOWER_GRADES, "わくわく算数", true)]
    #[case(LOWER_GRADES, "授業", false)]
    #[case(UPPER_GRADES, "全国テスト", true)]
    #[case(UPPER_GRADES, "ふむふむ", false)]
    fn vocabularies(#[case] band: GradeBand, #[case] text: &str, #[case] expected: bool) {
        assert_eq!(band.matches(text), expected);
    }

    #[rstest]
    #[case("口座振替日", true)]
    #[case("授業はありません", true)]
    #[case("次回 「わくわく」", true)]
    #[case("授業", false)]
    fn ignored(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(is_ignored(text), expected);
    }
}
