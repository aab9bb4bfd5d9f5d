//! Korean numeral rendering of won amounts.
//!
//! Amounts are read in groups of four digits (base 10,000), each non-zero
//! group followed by its unit word: 만, 억, 조, 경.

/// Digit words for 0-9.
const DIGIT_WORDS: [&str; 10] = ["영", "일", "이", "삼", "사", "오", "육", "칠", "팔", "구"];

/// Positional words inside a group, indexed by distance from the group's
/// last digit. Units carry no word.
const POSITION_WORDS: [&str; 4] = ["", "십", "백", "천"];

/// Group unit words, indexed by group position counted from the right.
///
/// `u64::MAX` has 20 digits, so five groups cover every input.
const GROUP_UNITS: [&str; 5] = ["", "만", "억", "조", "경"];

/// Renders a whole-won amount as Korean numeral text.
///
/// Zero digits and all-zero groups are skipped, and the digit word is
/// dropped in front of 십 when the tens digit is 1. Every other digit keeps
/// its digit word, including a leading 1 in the units position of a group,
/// so `10_000` renders as `일만`.
///
/// `0` renders as an empty string because no group is ever non-zero. This
/// is a known gap; callers that display the text should handle it.
///
/// # Examples
///
/// ```
/// use loan_engine::calculation::format_currency_numeral;
///
/// assert_eq!(format_currency_numeral(13_302_100), "일천삼백삼십만이천일백");
/// assert_eq!(format_currency_numeral(110_000_000), "일억일천만");
/// assert_eq!(format_currency_numeral(0), "");
/// ```
pub fn format_currency_numeral(amount: u64) -> String {
    let digits = amount.to_string();
    let bytes = digits.as_bytes();

    // The leading group takes the remainder so the others are exactly four wide.
    let lead = match bytes.len() % 4 {
        0 => 4,
        n => n,
    };
    let mut groups: Vec<&[u8]> = vec![&bytes[..lead]];
    groups.extend(bytes[lead..].chunks(4));

    let group_count = groups.len();
    let mut rendered = String::new();

    for (index, group) in groups.iter().enumerate() {
        if group.iter().all(|&b| b == b'0') {
            continue;
        }

        let width = group.len();
        for (offset, &byte) in group.iter().enumerate() {
            let digit = usize::from(byte - b'0');
            if digit == 0 {
                continue;
            }

            let position = width - offset - 1;
            if !(position == 1 && digit == 1) {
                rendered.push_str(DIGIT_WORDS[digit]);
            }
            rendered.push_str(POSITION_WORDS[position]);
        }

        rendered.push_str(GROUP_UNITS[group_count - index - 1]);
    }

    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Reads numeral text back into a number.
    ///
    /// Only used to check that distinct amounts never share a rendering.
    fn parse_numeral(text: &str) -> u64 {
        let mut total = 0u64;
        let mut group = 0u64;
        let mut digit: Option<u64> = None;

        for ch in text.chars() {
            let s = ch.to_string();
            if let Some(d) = DIGIT_WORDS.iter().position(|w| *w == s) {
                digit = Some(d as u64);
            } else if let Some(p) = POSITION_WORDS.iter().position(|w| *w == s) {
                group += digit.take().unwrap_or(1) * 10u64.pow(p as u32);
            } else if let Some(u) = GROUP_UNITS.iter().position(|w| *w == s) {
                group += digit.take().unwrap_or(0);
                total += group * 10_000u64.pow(u as u32);
                group = 0;
            } else {
                panic!("unexpected character {ch:?} in {text:?}");
            }
        }

        total + group + digit.unwrap_or(0)
    }

    #[test]
    fn test_zero_renders_empty() {
        assert_eq!(format_currency_numeral(0), "");
    }

    #[test]
    fn test_single_digits() {
        assert_eq!(format_currency_numeral(1), "일");
        assert_eq!(format_currency_numeral(7), "칠");
    }

    #[test]
    fn test_ten_omits_leading_one() {
        assert_eq!(format_currency_numeral(10), "십");
        assert_eq!(format_currency_numeral(19), "십구");
        assert_eq!(format_currency_numeral(20), "이십");
    }

    #[test]
    fn test_hundreds_and_thousands_keep_leading_one() {
        assert_eq!(format_currency_numeral(100), "일백");
        assert_eq!(format_currency_numeral(1000), "일천");
        assert_eq!(format_currency_numeral(1111), "일천일백십일");
    }

    #[test]
    fn test_internal_zero_digits_are_skipped() {
        assert_eq!(format_currency_numeral(1001), "일천일");
        assert_eq!(format_currency_numeral(9090), "구천구십");
    }

    #[test]
    fn test_ten_thousand_keeps_unit_digit() {
        assert_eq!(format_currency_numeral(10_000), "일만");
    }

    #[test]
    fn test_ten_in_upper_group_omits_leading_one() {
        assert_eq!(format_currency_numeral(100_000), "십만");
        assert_eq!(format_currency_numeral(150_000), "십오만");
    }

    #[test]
    fn test_all_zero_group_is_skipped() {
        assert_eq!(format_currency_numeral(100_000_001), "일억일");
        assert_eq!(format_currency_numeral(200_000_000), "이억");
    }

    #[test]
    fn test_converted_loan_amounts() {
        assert_eq!(format_currency_numeral(13_302_100), "일천삼백삼십만이천일백");
        assert_eq!(
            format_currency_numeral(14_519_570),
            "일천사백오십일만구천오백칠십"
        );
    }

    #[test]
    fn test_trillion_and_above() {
        assert_eq!(format_currency_numeral(1_0000_0000_0000), "일조");
        assert_eq!(format_currency_numeral(3_0000_0000_0000_0000), "삼경");
    }

    #[test]
    fn test_largest_u64_is_rendered() {
        // 1844 6744 0737 0955 1615
        assert_eq!(
            format_currency_numeral(u64::MAX),
            "일천팔백사십사경육천칠백사십사조칠백삼십칠억구백오십오만일천육백십오"
        );
    }

    #[test]
    fn test_parser_reads_back_examples() {
        for amount in [1, 10, 11, 10_000, 100_010, 13_302_100, 99_999_999] {
            assert_eq!(parse_numeral(&format_currency_numeral(amount)), amount);
        }
    }

    proptest! {
        #[test]
        fn prop_rendering_reads_back_to_the_same_amount(amount in 1u64..=99_999_999) {
            let text = format_currency_numeral(amount);
            prop_assert!(!text.is_empty());
            prop_assert_eq!(parse_numeral(&text), amount);
        }

        #[test]
        fn prop_distinct_amounts_never_collide(a in 1u64..=99_999_999, b in 1u64..=99_999_999) {
            prop_assume!(a != b);
            prop_assert_ne!(format_currency_numeral(a), format_currency_numeral(b));
        }
    }
}
