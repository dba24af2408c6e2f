use ariadne::{Color, Label, Report, ReportKind, Source};
use relocator_signature::SignatureError;

const SOURCE_NAME: &str = "<input>";

/// Character span for a byte offset reported by the parser.
///
/// ariadne indexes by character, and a malformed input may end right at the
/// offset, so the span always covers one character past the end.
fn char_span(source: &str, offset: usize) -> std::ops::Range<usize> {
    let start = source
        .get(..offset)
        .map(|prefix| prefix.chars().count())
        .unwrap_or_else(|| source.chars().count());
    start..start + 1
}

/// Print `err` for `source` to stderr, pointing at the offending offset when
/// there is one.
pub fn print_signature_error(err: &SignatureError, source: &str) {
    let SignatureError::Malformed {
        reading,
        message,
        offset,
    } = err
    else {
        eprintln!("error: {}", err);
        return;
    };

    let span = char_span(source, *offset);
    // pad so a span at end of input still has a character to underline
    let padded = format!("{} ", source);
    let result = Report::build(ReportKind::Error, SOURCE_NAME, span.start)
        .with_message(format!("invalid {}", reading))
        .with_label(
            Label::new((SOURCE_NAME, span))
                .with_message(message)
                .with_color(Color::Red),
        )
        .finish()
        .eprint((SOURCE_NAME, Source::from(padded)));
    if result.is_err() {
        eprintln!("error: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_counts_characters() {
        assert_eq!(char_span("LA;", 1), 1..2);
        assert_eq!(char_span("Lé/x;", 3), 2..3);
    }

    #[test]
    fn span_at_end_of_input() {
        assert_eq!(char_span("Ljava/lang/String", 17), 17..18);
        assert_eq!(char_span("", 0), 0..1);
    }

    #[test]
    fn span_inside_a_character_falls_back_to_the_end() {
        assert_eq!(char_span("é", 1), 1..2);
    }
}
