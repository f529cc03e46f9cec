//! Parser for the list literals the compute service embeds in its results.
//!
//! The values arrive as text such as `[1.0, 2.5]`, `(3, 4)` or `['x1', "x2"]`. Elements are
//! numbers, quoted strings, `True`, `False` or `None`. Nested lists are not accepted.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{escaped_transform, tag, take_till1},
    character::complete::{char, multispace0},
    combinator::{all_consuming, map, opt, value},
    multi::separated_list1,
    number::complete::double,
    sequence::{delimited, pair, terminated},
};

use super::results::ResultValue;

/// Parse a whole list literal. Surrounding whitespace is allowed.
pub(crate) fn parse_list(input: &str) -> Result<Vec<ResultValue>, String> {
    all_consuming(delimited(multispace0, list, multispace0))(input)
        .map(|(_, values)| values)
        .map_err(|e| format!("not a list literal ({e})"))
}

fn list(input: &str) -> IResult<&str, Vec<ResultValue>> {
    alt((sequence('[', ']'), sequence('(', ')')))(input)
}

fn sequence<'a>(
    open: char,
    close: char,
) -> impl FnMut(&'a str) -> IResult<&'a str, Vec<ResultValue>> {
    delimited(
        pair(char(open), multispace0),
        map(opt(elements), Option::unwrap_or_default),
        pair(multispace0, char(close)),
    )
}

// A trailing comma needs at least one element before it.
fn elements(input: &str) -> IResult<&str, Vec<ResultValue>> {
    terminated(separated_list1(padded(','), scalar), opt(padded(',')))(input)
}

fn padded<'a>(c: char) -> impl FnMut(&'a str) -> IResult<&'a str, char> {
    delimited(multispace0, char(c), multispace0)
}

fn scalar(input: &str) -> IResult<&str, ResultValue> {
    alt((
        value(ResultValue::Bool(true), tag("True")),
        value(ResultValue::Bool(false), tag("False")),
        value(ResultValue::Null, tag("None")),
        map(quoted('\''), ResultValue::Text),
        map(quoted('"'), ResultValue::Text),
        map(double, ResultValue::Number),
    ))(input)
}

fn quoted<'a>(quote: char) -> impl FnMut(&'a str) -> IResult<&'a str, String> {
    // escaped_transform rejects an empty body, hence the opt.
    delimited(
        char(quote),
        map(
            opt(escaped_transform(
                take_till1(move |c: char| c == quote || c == '\\'),
                '\\',
                alt((
                    value("\\", char('\\')),
                    value("'", char('\'')),
                    value("\"", char('"')),
                    value("\n", char('n')),
                    value("\t", char('t')),
                )),
            )),
            Option::unwrap_or_default,
        ),
        char(quote),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn numbers(values: &[f64]) -> Vec<ResultValue> {
        values.iter().copied().map(ResultValue::Number).collect()
    }

    #[rstest]
    #[case("[1, 2]", numbers(&[1.0, 2.0]))]
    #[case("[1.5, -2e3, 0.25]", numbers(&[1.5, -2000.0, 0.25]))]
    #[case("(3, 4)", numbers(&[3.0, 4.0]))]
    #[case("(7,)", numbers(&[7.0]))]
    #[case("  [ 1 ,2 , ]  ", numbers(&[1.0, 2.0]))]
    #[case("[]", vec![])]
    fn numeric_lists(#[case] input: &str, #[case] expected: Vec<ResultValue>) {
        assert_eq!(parse_list(input).unwrap(), expected);
    }

    #[test]
    fn names_with_either_quote() {
        let values = parse_list(r#"['x1', "x 2", '', 'it\'s']"#).unwrap();
        assert_eq!(
            values,
            vec![
                ResultValue::Text("x1".into()),
                ResultValue::Text("x 2".into()),
                ResultValue::Text(String::new()),
                ResultValue::Text("it's".into()),
            ]
        );
    }

    #[test]
    fn python_constants() {
        let values = parse_list("[True, False, None, 1]").unwrap();
        assert_eq!(
            values,
            vec![
                ResultValue::Bool(true),
                ResultValue::Bool(false),
                ResultValue::Null,
                ResultValue::Number(1.0),
            ]
        );
    }

    #[rstest]
    #[case("")]
    #[case("1, 2")]
    #[case("[1, 2")]
    #[case("[[1], [2]]")]
    #[case("[1 2]")]
    #[case("['open]")]
    #[case("[1] trailing")]
    #[case("[,]")]
    #[case("( , )")]
    #[case("[1,,]")]
    fn malformed_literals_are_rejected(#[case] input: &str) {
        assert!(parse_list(input).is_err());
    }
}
