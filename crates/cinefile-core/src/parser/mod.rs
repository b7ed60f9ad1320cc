pub mod fallback;
pub mod movie;
pub mod release;

pub use fallback::{FallbackTitleParser, TitleYear};
pub use movie::{extract_movie_info, MovieParser, MovieParserConfig};
pub use release::ReleaseParser;

/// First run of four ASCII digits after any leading non-digits:
/// `"(1957)"` -> 1957, `"2011–2019"` -> 2011, `"N/A"` -> `None`.
pub(crate) fn leading_year(text: &str) -> Option<u16> {
    let digits: String = text
        .trim_start_matches(|c: char| !c.is_ascii_digit())
        .chars()
        .take_while(char::is_ascii_digit)
        .take(4)
        .collect();

    if digits.len() == 4 {
        digits.parse().ok()
    } else {
        None
    }
}
