/// Split a delimited multi-value string, dropping empty segments.
///
/// `None` and the empty string yield `None` rather than an empty list, so a
/// field fed from a blank property stays unset.
pub fn split_non_empty(value: Option<&str>, delimiter: char) -> Option<Vec<String>> {
    let value = value.filter(|v| !v.is_empty())?;
    Some(
        value
            .split(delimiter)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_drops_empty_segments() {
        assert_eq!(
            split_non_empty(Some("cooking|reading|"), '|'),
            Some(vec!["cooking".to_string(), "reading".to_string()])
        );
        assert_eq!(
            split_non_empty(Some(";go;;rust;"), ';'),
            Some(vec!["go".to_string(), "rust".to_string()])
        );
    }

    #[test]
    fn test_split_blank_input_is_unset() {
        assert_eq!(split_non_empty(None, '|'), None);
        assert_eq!(split_non_empty(Some(""), '|'), None);
    }

    #[test]
    fn test_split_without_delimiter_keeps_whole_string() {
        assert_eq!(
            split_non_empty(Some("go;rust;"), '|'),
            Some(vec!["go;rust;".to_string()])
        );
    }

    #[test]
    fn test_split_only_delimiters_gives_empty_list() {
        assert_eq!(split_non_empty(Some("|||"), '|'), Some(Vec::new()));
    }

    #[test]
    fn test_resplitting_a_segment_is_stable() {
        let inputs = ["a;b;c", ";;x;;y", "single", "trailing;", "; ;"];
        for input in inputs {
            for segment in split_non_empty(Some(input), ';').unwrap_or_default() {
                assert_eq!(
                    split_non_empty(Some(segment.as_str()), ';'),
                    Some(vec![segment.clone()])
                );
            }
        }
    }
}
