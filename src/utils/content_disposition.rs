//! `Content-Disposition` header construction for downloads.

/// Builds an `attachment` disposition for `filename`.
///
/// The quoted `filename` parameter keeps only printable ASCII minus `"`,
/// `;` and `\`; the full name travels RFC 5987 percent-encoded in
/// `filename*`.
pub fn attachment(filename: &str) -> String {
    let ascii_safe: String = filename
        .chars()
        .filter(|c| (c.is_ascii_graphic() || *c == ' ') && !matches!(c, '"' | ';' | '\\'))
        .collect();
    let ascii_name = match ascii_safe.trim() {
        "" => "download",
        name => name,
    };

    let encoded: String = filename
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'!'
            | b'#'
            | b'$'
            | b'&'
            | b'+'
            | b'-'
            | b'.'
            | b'^'
            | b'_'
            | b'`'
            | b'|'
            | b'~' => String::from(b as char),
            _ => format!("%{b:02X}"),
        })
        .collect();

    format!("attachment; filename=\"{ascii_name}\"; filename*=UTF-8''{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_ascii_name() {
        assert_eq!(
            attachment("cube.STL"),
            "attachment; filename=\"cube.STL\"; filename*=UTF-8''cube.STL"
        );
    }

    #[test]
    fn spaces_are_kept_quoted_and_encoded() {
        assert_eq!(
            attachment("my cube.stl"),
            "attachment; filename=\"my cube.stl\"; filename*=UTF-8''my%20cube.stl"
        );
    }

    #[test]
    fn unsafe_characters_are_dropped_from_quoted_name() {
        let value = attachment("a\"b;c.obj");
        assert!(value.starts_with("attachment; filename=\"abc.obj\";"));
        assert!(value.ends_with("a%22b%3Bc.obj"));
    }

    #[test]
    fn non_ascii_name_falls_back() {
        let value = attachment("тест.stl");
        assert!(value.contains("filename=\".stl\""));
        assert!(value.contains("filename*=UTF-8''%D1%82%D0%B5%D1%81%D1%82.stl"));
    }

    #[test]
    fn empty_ascii_part_uses_default() {
        assert!(attachment("模型").contains("filename=\"download\""));
    }
}
