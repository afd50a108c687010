//! Utility functions.

/// Trim whitespace from the start and end of a string.
pub fn trim(s: &str) -> &str {
    s.trim()
}

/// Capitalize the first character of space-delimited words.
///
/// With `positions` set to `None` every word is capitalized; otherwise only
/// the words at the given zero-based positions are. Positions past the last
/// word are ignored, and the rest of each word is left untouched.
///
/// ```
/// use tbone::util::capitalize;
///
/// assert_eq!(capitalize("hello big world", None), "Hello Big World");
/// assert_eq!(capitalize("hello big world", Some(&[1])), "hello Big world");
/// ```
pub fn capitalize(s: &str, positions: Option<&[usize]>) -> String {
    let mut words: Vec<String> = s.split(' ').map(str::to_string).collect();
    let all: Vec<usize>;
    let positions = match positions {
        Some(positions) => positions,
        None => {
            all = (0..words.len()).collect();
            &all
        }
    };
    for &position in positions {
        if let Some(word) = words.get_mut(position) {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                let capitalized: String = first.to_uppercase().chain(chars).collect();
                *word = capitalized;
            }
        }
    }
    words.join(" ")
}
