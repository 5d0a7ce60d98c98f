//! Serialized form of an opaque ID: `type|id` or `type|id|metadata`.
//!
//! Inside the type and id fields a literal `|` is written `\|` and a literal
//! `\` is written `\\`. Any other backslash is kept as-is when reading, so
//! fields without either character serialize exactly as the plain
//! delimiter-joined form. The metadata field is everything after the second
//! unescaped delimiter and is never escaped.

/// Field delimiter.
pub const DELIMITER: char = '|';

const ESCAPE: char = '\\';

/// Fields recovered from a serialized opaque ID.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fields<'a> {
    /// First field. Always present, possibly empty.
    pub type_tag: String,
    /// Second field, if a delimiter followed the type.
    pub id: Option<String>,
    /// Raw remainder after the second delimiter.
    pub metadata: Option<&'a str>,
}

/// Joins the fields into the serialized form.
pub fn join(type_tag: &str, id: &str, metadata: Option<&str>) -> String {
    let mut out = String::with_capacity(
        type_tag.len() + id.len() + metadata.map_or(0, |m| m.len() + 1) + 1,
    );
    push_escaped(&mut out, type_tag);
    out.push(DELIMITER);
    push_escaped(&mut out, id);
    if let Some(metadata) = metadata {
        out.push(DELIMITER);
        out.push_str(metadata);
    }
    out
}

/// Splits a serialized form into its fields.
///
/// Never fails: a string without a delimiter yields only the type field.
pub fn split(serialized: &str) -> Fields<'_> {
    let (type_tag, rest) = read_field(serialized);
    let Some(rest) = rest else {
        return Fields {
            type_tag,
            ..Fields::default()
        };
    };

    let (id, metadata) = read_field(rest);
    Fields {
        type_tag,
        id: Some(id),
        metadata,
    }
}

fn push_escaped(out: &mut String, field: &str) {
    for c in field.chars() {
        if c == DELIMITER || c == ESCAPE {
            out.push(ESCAPE);
        }
        out.push(c);
    }
}

/// Reads one escaped field, returning it and the input after its delimiter.
fn read_field(input: &str) -> (String, Option<&str>) {
    let mut field = String::new();
    let mut chars = input.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            ESCAPE => match chars.peek() {
                Some(&(_, next)) if next == DELIMITER || next == ESCAPE => {
                    field.push(next);
                    chars.next();
                }
                _ => field.push(ESCAPE),
            },
            DELIMITER => return (field, Some(&input[i + DELIMITER.len_utf8()..])),
            _ => field.push(c),
        }
    }

    (field, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_plain_fields() {
        assert_eq!(join("Type", "abc", None), "Type|abc");
        assert_eq!(join("", "12345", None), "|12345");
        assert_eq!(
            join("Type", "abc", Some(r#"{"name":"Test"}"#)),
            r#"Type|abc|{"name":"Test"}"#
        );
    }

    #[test]
    fn test_join_escapes_delimiter_and_backslash() {
        assert_eq!(join("A|B", r"x\y", None), r"A\|B|x\\y");
    }

    #[test]
    fn test_split_without_delimiter() {
        let fields = split("garbage");
        assert_eq!(fields.type_tag, "garbage");
        assert_eq!(fields.id, None);
        assert_eq!(fields.metadata, None);
    }

    #[test]
    fn test_split_two_fields() {
        let fields = split("Type|abc");
        assert_eq!(fields.type_tag, "Type");
        assert_eq!(fields.id.as_deref(), Some("abc"));
        assert_eq!(fields.metadata, None);
    }

    #[test]
    fn test_split_keeps_metadata_tail_intact() {
        let fields = split(r#"Type|abc|{"note":"a|b"}"#);
        assert_eq!(fields.id.as_deref(), Some("abc"));
        assert_eq!(fields.metadata, Some(r#"{"note":"a|b"}"#));
    }

    #[test]
    fn test_split_empty_metadata_field() {
        let fields = split("Type|abc|");
        assert_eq!(fields.metadata, Some(""));
    }

    #[test]
    fn test_split_unescapes() {
        let serialized = join("we|rd", r"a\|b", Some("{}"));
        let fields = split(&serialized);
        assert_eq!(fields.type_tag, "we|rd");
        assert_eq!(fields.id.as_deref(), Some(r"a\|b"));
        assert_eq!(fields.metadata, Some("{}"));
    }

    #[test]
    fn test_split_keeps_unknown_escapes() {
        let fields = split(r"T|C:\temp\x");
        assert_eq!(fields.id.as_deref(), Some(r"C:\temp\x"));

        let fields = split(r"T|trailing\");
        assert_eq!(fields.id.as_deref(), Some(r"trailing\"));
    }

    #[test]
    fn test_split_multibyte_fields() {
        let fields = split("Ünïcode|ид|{}");
        assert_eq!(fields.type_tag, "Ünïcode");
        assert_eq!(fields.id.as_deref(), Some("ид"));
        assert_eq!(fields.metadata, Some("{}"));
    }
}
