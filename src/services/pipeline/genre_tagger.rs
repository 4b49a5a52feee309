use crate::models::{Genre, GenreFlags};

/// Maps free-text genre strings onto the fixed genre flags.
///
/// A flag is set when any input string contains the genre keyword as a
/// case-insensitive substring, so "album rock" and "indie pop" both count.
pub fn tag<S: AsRef<str>>(genres: &[S]) -> GenreFlags {
    let mut flags = GenreFlags::default();

    for genre in genres {
        let genre = genre.as_ref().to_lowercase();
        for candidate in Genre::ALL {
            if genre.contains(candidate.keyword()) {
                flags.set(candidate);
            }
        }
    }

    flags
}
