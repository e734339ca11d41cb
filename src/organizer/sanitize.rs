//! Path component sanitizing.

/// Turn arbitrary metadata into a single safe path component.
///
/// `:`, `/` and `\` become `-`, surrounding whitespace is trimmed, and every
/// character outside `[A-Za-z0-9 _-()[]]` is dropped. Empty in, empty out.
pub fn sanitize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ':' | '/' | '\\' => '-',
            _ => c,
        })
        .filter(|c| is_allowed(*c))
        .collect()
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-' | '(' | ')' | '[' | ']')
}

/// First name of a multi-artist credit.
///
/// `,` is checked before `/`; whichever separator is found first in that
/// order splits the string and the leading segment wins.
pub fn first_artist(artist: &str) -> &str {
    for sep in [',', '/'] {
        if let Some((first, _)) = artist.split_once(sep) {
            return first.trim();
        }
    }
    artist.trim()
}
