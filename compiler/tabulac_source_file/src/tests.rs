use std::path::PathBuf;

use proptest::prelude::*;

use crate::{Location, SourceFile, Span};

fn line_string_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        proptest::char::any()
            .prop_filter("only non-control character", |x| !x.is_control()),
        0..=30,
    )
    .prop_map(|vec| vec.into_iter().collect::<String>())
}

fn lines_strategy() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(line_string_strategy(), 1..=100)
}

proptest! {
    #[test]
    fn line_test(lines in lines_strategy()) {
        let source = lines.join("\n");
        let source_file = SourceFile::new(source, PathBuf::new());

        // line number check
        prop_assert_eq!(source_file.line_count(), lines.len());

        // line content check
        for (i, line) in lines.iter().enumerate() {
            if i < lines.len() - 1 {
                prop_assert_eq!(
                    source_file.get_line(i).unwrap(),
                    line.clone() + "\n"
                );
            } else {
                prop_assert_eq!(source_file.get_line(i).unwrap(), line);
            }
        }
    }

    #[test]
    fn get_location_test(lines in lines_strategy()) {
        let source = lines.join("\n");
        let source_file = SourceFile::new(source.clone(), PathBuf::new());

        let mut line = 0;
        let mut column = 0;

        for (byte_index, c) in source.char_indices() {
            prop_assert_eq!(
                source_file.get_location(byte_index).unwrap(),
                Location { line, column }
            );
            prop_assert_eq!(
                source_file.get_line_of_byte_index(byte_index).unwrap(),
                line
            );

            // update line and column
            if c == '\n' {
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }
    }
}

#[test]
fn empty_source_has_one_empty_line() {
    let source_file = SourceFile::new(String::new(), PathBuf::new());

    assert_eq!(source_file.line_count(), 1);
    assert_eq!(source_file.get_line(0), Some(""));
    assert_eq!(source_file.get_line(1), None);
}

#[test]
fn crlf_counts_as_one_line_break() {
    let source_file =
        SourceFile::new("ab\r\ncd\rEf".to_string(), PathBuf::new());

    assert_eq!(source_file.line_count(), 3);
    assert_eq!(source_file.get_line(0), Some("ab\r\n"));
    assert_eq!(source_file.get_line(1), Some("cd\r"));
    assert_eq!(source_file.get_line(2), Some("Ef"));

    assert_eq!(
        source_file.get_location(4),
        Some(Location { line: 1, column: 0 })
    );
}

#[test]
fn span_str_covers_byte_range() {
    let source_file =
        SourceFile::new("Table users {}".to_string(), PathBuf::new());

    assert_eq!(source_file.get_span_str(Span::new(6, 11)), Some("users"));
    assert_eq!(source_file.get_span_str(Span::new(6, 100)), None);
}

#[test]
#[should_panic(expected = "start index is greater than end index")]
fn reversed_span_panics() {
    let _ = Span::new(4, 2);
}
