use crate::constants::{CSV_FIELD_SEPARATOR, CSV_QUOTE_CHAR};

/// Splits one CSV line into trimmed field values.
///
/// A quote opens a quoted span only at the start of a field and closes it only
/// at the end of one; `""` inside a span is a literal quote. Malformed quoting
/// never fails, it degrades to a best-effort split. Lines must already be
/// separated, a quoted field cannot span a newline.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    let mut fields = Vec::new();
    let mut current_field = String::new();
    let mut in_quotes = false;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        let at_field_start = i == 0 || chars[i - 1] == CSV_FIELD_SEPARATOR;
        let next = chars.get(i + 1).copied();
        let at_field_end = next.map_or(true, |c| c == CSV_FIELD_SEPARATOR);

        match ch {
            CSV_QUOTE_CHAR if !in_quotes && at_field_start => in_quotes = true,
            CSV_QUOTE_CHAR if in_quotes && next == Some(CSV_QUOTE_CHAR) => {
                current_field.push(CSV_QUOTE_CHAR);
                i += 1;
            }
            CSV_QUOTE_CHAR if in_quotes && at_field_end => in_quotes = false,
            CSV_FIELD_SEPARATOR if !in_quotes => {
                fields.push(current_field.trim().to_string());
                current_field.clear();
            }
            _ => current_field.push(ch),
        }

        i += 1;
    }

    fields.push(current_field.trim().to_string());
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_fields() {
        assert_eq!(
            parse_csv_line("2024,1, IIT Bombay ,CSE"),
            vec!["2024", "1", "IIT Bombay", "CSE"]
        );
    }

    #[test]
    fn test_single_field_unchanged() {
        for value in ["OPEN", "Gender-Neutral", "  Round 3  ", ""] {
            assert_eq!(parse_csv_line(value), vec![value.trim()]);
        }
    }

    #[test]
    fn test_quoted_comma_and_escaped_quote() {
        assert_eq!(parse_csv_line(r#""a,b""c""#), vec![r#"a,b"c"#]);
    }

    #[test]
    fn test_quoted_course_field() {
        let line = r#"2024,1,Indian Institute of Technology Bombay,"Computer Science and Engineering (4 Years, Bachelor of Technology)",AI,OPEN,Gender-Neutral,1,63"#;
        let fields = parse_csv_line(line);

        assert_eq!(fields.len(), 9);
        assert_eq!(
            fields[3],
            "Computer Science and Engineering (4 Years, Bachelor of Technology)"
        );
        assert_eq!(fields[8], "63");
    }

    #[test]
    fn test_empty_fields_preserved() {
        assert_eq!(parse_csv_line(",,"), vec!["", "", ""]);
        assert_eq!(parse_csv_line(r#""",x"#), vec!["", "x"]);
    }

    #[test]
    fn test_mid_field_quote_is_literal() {
        assert_eq!(parse_csv_line(r#"ab"c,d"#), vec![r#"ab"c"#, "d"]);
    }

    #[test]
    fn test_unterminated_quote_degrades() {
        // Everything after the opening quote lands in one field.
        assert_eq!(parse_csv_line(r#"x,"open,ended"#), vec!["x", "open,ended"]);
    }
}
