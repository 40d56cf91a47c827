use winnow::ascii::till_line_ending;
use winnow::combinator::{alt, cut_err, delimited, opt, preceded, repeat, separated};
use winnow::error::{ErrMode, ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, take_while};

use crate::{CompareOp, Expr, Value};

// -- Whitespace & comments --------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    let _: () = repeat(
        0..,
        alt((
            take_while(1.., |c: char| c.is_ascii_whitespace()).void(),
            ('#', till_line_ending).void(),
        )),
    )
    .parse_next(input)?;
    Ok(())
}

// -- Identifiers & keywords -------------------------------------------------

/// A field name. Dots and digits are allowed after the first character so that
/// nested paths like `user.tags.0` parse as one name.
fn ident<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '.'),
    )
        .take()
        .parse_next(input)
}

/// A whole word matching `kw` case-insensitively, so `android` is not `and`.
fn keyword(kw: &'static str) -> impl FnMut(&mut &str) -> ModalResult<()> {
    move |input: &mut &str| {
        let checkpoint = input.checkpoint();
        let word = ident.parse_next(input)?;
        if word.eq_ignore_ascii_case(kw) {
            Ok(())
        } else {
            input.reset(&checkpoint);
            Err(ErrMode::from_input(input))
        }
    }
}

// -- Values -----------------------------------------------------------------

fn string_literal(input: &mut &str) -> ModalResult<String> {
    '"'.parse_next(input)?;
    let mut s = String::new();
    loop {
        let ch = any.parse_next(input)?;
        match ch {
            '"' => return Ok(s),
            '\\' => {
                let esc = any.parse_next(input)?;
                match esc {
                    '"' => s.push('"'),
                    '\\' => s.push('\\'),
                    'n' => s.push('\n'),
                    't' => s.push('\t'),
                    other => {
                        s.push('\\');
                        s.push(other);
                    }
                }
            }
            c => s.push(c),
        }
    }
}

fn number(input: &mut &str) -> ModalResult<Value> {
    let text = (
        opt('-'),
        take_while(1.., |c: char| c.is_ascii_digit()),
        opt(('.', take_while(1.., |c: char| c.is_ascii_digit()))),
    )
        .take()
        .parse_next(input)?;
    if text.contains('.') {
        let f: f64 = text.parse().map_err(|_| ErrMode::from_input(input).cut())?;
        Ok(Value::Float(f))
    } else {
        let i: i64 = text.parse().map_err(|_| ErrMode::from_input(input).cut())?;
        Ok(Value::Int(i))
    }
}

fn list(input: &mut &str) -> ModalResult<Value> {
    let items: Vec<Value> =
        delimited('[', separated(0.., value, (ws, ',')), (ws, cut_err(']'))).parse_next(input)?;
    Ok(Value::List(items))
}

fn value(input: &mut &str) -> ModalResult<Value> {
    ws.parse_next(input)?;
    alt((
        string_literal.map(Value::String),
        keyword("true").value(Value::Bool(true)),
        keyword("false").value(Value::Bool(false)),
        keyword("null").value(Value::Null),
        number,
        list,
    ))
    .context(StrContext::Expected(StrContextValue::Description("value")))
    .parse_next(input)
}

// -- Comparison operators ---------------------------------------------------

fn compare_op(input: &mut &str) -> ModalResult<CompareOp> {
    alt((
        ">=".value(CompareOp::Gte),
        ">".value(CompareOp::Gt),
        "<=".value(CompareOp::Lte),
        "<".value(CompareOp::Lt),
        "==".value(CompareOp::Eq),
    ))
    .parse_next(input)
}

// -- Expressions (precedence: OR < AND < NOT < primary) ---------------------

fn comparison(input: &mut &str) -> ModalResult<Expr> {
    let name = ident.parse_next(input)?;
    let checkpoint = input.checkpoint();
    ws.parse_next(input)?;

    if opt("===").parse_next(input)?.is_some() {
        let value = cut_err(value).parse_next(input)?;
        return Ok(Expr::StrictEq {
            field: name.to_owned(),
            value,
        });
    }
    if let Ok(op) = compare_op.parse_next(input) {
        ws.parse_next(input)?;
        if opt('@').parse_next(input)?.is_some() {
            let right = cut_err(ident)
                .context(StrContext::Expected(StrContextValue::Description("field name")))
                .parse_next(input)?;
            return Ok(Expr::CompareFields {
                left: name.to_owned(),
                op,
                right: right.to_owned(),
            });
        }
        let value = cut_err(value).parse_next(input)?;
        return Ok(Expr::Compare {
            field: name.to_owned(),
            op,
            value,
        });
    }
    if keyword("in").parse_next(input).is_ok() {
        let list = cut_err(value).parse_next(input)?;
        return Ok(Expr::In {
            field: name.to_owned(),
            list,
        });
    }

    input.reset(&checkpoint);
    if name.eq_ignore_ascii_case("true") {
        Ok(Expr::True)
    } else {
        Err(ErrMode::from_input(input).cut())
    }
}

fn primary(input: &mut &str) -> ModalResult<Expr> {
    ws.parse_next(input)?;
    alt((delimited('(', expr, (ws, cut_err(')'))), comparison))
        .context(StrContext::Expected(StrContextValue::Description("expression")))
        .parse_next(input)
}

/// `not x` negates one operand; `not (a, b, ...)` is "none of" over the list.
fn unary(input: &mut &str) -> ModalResult<Expr> {
    ws.parse_next(input)?;
    if opt(keyword("not")).parse_next(input)?.is_none() {
        return primary(input);
    }
    ws.parse_next(input)?;
    let checkpoint = input.checkpoint();
    let list: Option<Vec<Expr>> =
        opt(delimited('(', separated(2.., expr, (ws, ',')), (ws, ')'))).parse_next(input)?;
    match list {
        Some(children) => Ok(Expr::Not(children)),
        None => {
            input.reset(&checkpoint);
            let inner = cut_err(unary).parse_next(input)?;
            Ok(Expr::Not(vec![inner]))
        }
    }
}

fn flatten(mut exprs: Vec<Expr>, make: fn(Vec<Expr>) -> Expr) -> Expr {
    if exprs.len() == 1 {
        exprs.remove(0)
    } else {
        make(exprs)
    }
}

fn and_expr(input: &mut &str) -> ModalResult<Expr> {
    let first = unary(input)?;
    let rest: Vec<Expr> =
        repeat(0.., preceded((ws, keyword("and")), cut_err(unary))).parse_next(input)?;
    let mut all = vec![first];
    all.extend(rest);
    Ok(flatten(all, Expr::And))
}

fn or_expr(input: &mut &str) -> ModalResult<Expr> {
    let first = and_expr(input)?;
    let rest: Vec<Expr> =
        repeat(0.., preceded((ws, keyword("or")), cut_err(and_expr))).parse_next(input)?;
    let mut all = vec![first];
    all.extend(rest);
    Ok(flatten(all, Expr::Or))
}

fn expr(input: &mut &str) -> ModalResult<Expr> {
    ws.parse_next(input)?;
    or_expr(input)
}

// -- Top-level parser -------------------------------------------------------

pub fn matcher_expr(input: &mut &str) -> ModalResult<Expr> {
    let parsed = expr(input)?;
    ws.parse_next(input)?;
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use crate::parse::parse;

    use super::*;

    fn cmp(field: &str, op: CompareOp, value: impl Into<Value>) -> Expr {
        Expr::Compare {
            field: field.to_owned(),
            op,
            value: value.into(),
        }
    }

    #[test]
    fn parse_single_comparison() {
        let expr = parse("user.age >= 18").unwrap();
        assert_eq!(expr, cmp("user.age", CompareOp::Gte, 18));
    }

    #[test]
    fn parse_all_comparison_ops() {
        let ops = [
            ("==", CompareOp::Eq),
            (">", CompareOp::Gt),
            (">=", CompareOp::Gte),
            ("<", CompareOp::Lt),
            ("<=", CompareOp::Lte),
        ];
        for (sym, expected_op) in ops {
            let expr = parse(&format!("x {sym} 1")).unwrap();
            assert_eq!(expr, cmp("x", expected_op, 1), "failed for {sym}");
        }
    }

    #[test]
    fn parse_all_value_types() {
        let cases = [
            ("42", Value::Int(42)),
            ("-5", Value::Int(-5)),
            ("3.25", Value::Float(3.25)),
            ("-0.5", Value::Float(-0.5)),
            ("true", Value::Bool(true)),
            ("false", Value::Bool(false)),
            ("null", Value::Null),
            (r#""hello""#, Value::from("hello")),
            ("[1, \"a\"]", Value::List(vec![Value::Int(1), Value::from("a")])),
            ("[]", Value::List(vec![])),
        ];
        for (literal, expected) in cases {
            let expr = parse(&format!("x == {literal}")).unwrap();
            assert_eq!(
                expr,
                cmp("x", CompareOp::Eq, expected),
                "failed for {literal}"
            );
        }
    }

    #[test]
    fn parse_strict_eq() {
        let expr = parse("tags === [\"a\"]").unwrap();
        assert_eq!(
            expr,
            Expr::StrictEq {
                field: "tags".into(),
                value: Value::from(vec!["a"]),
            }
        );
    }

    #[test]
    fn parse_in() {
        let expr = parse("age in [18, 21, 30]").unwrap();
        assert_eq!(
            expr,
            Expr::In {
                field: "age".into(),
                list: Value::from(vec![18, 21, 30]),
            }
        );
    }

    #[test]
    fn parse_field_reference() {
        let expr = parse("min <= @max").unwrap();
        assert_eq!(
            expr,
            Expr::CompareFields {
                left: "min".into(),
                op: CompareOp::Lte,
                right: "max".into(),
            }
        );
    }

    #[test]
    fn parse_true() {
        assert_eq!(parse("true").unwrap(), Expr::True);
        assert_eq!(
            parse("true and x == 1").unwrap(),
            Expr::And(vec![Expr::True, cmp("x", CompareOp::Eq, 1)])
        );
    }

    #[test]
    fn parse_variadic_and_or() {
        let expr = parse("a == 1 and b == 2 and c == 3").unwrap();
        assert!(
            matches!(expr, Expr::And(ref children) if children.len() == 3)
        );
        let expr = parse("a == 1 OR b == 2").unwrap();
        assert!(
            matches!(expr, Expr::Or(ref children) if children.len() == 2)
        );
    }

    #[test]
    fn parse_precedence_and_before_or() {
        let expr = parse("a == 1 or b == 2 and c == 3").unwrap();
        match expr {
            Expr::Or(children) => {
                assert_eq!(children[0], cmp("a", CompareOp::Eq, 1));
                assert!(matches!(children[1], Expr::And(_)));
            }
            other => panic!("expected Or, got {other:?}"),
        }
    }

    #[test]
    fn parse_parenthesized_grouping() {
        let expr = parse("(a == 1 or b == 2) and c == 3").unwrap();
        match expr {
            Expr::And(children) => {
                assert!(matches!(children[0], Expr::Or(_)));
                assert_eq!(children[1], cmp("c", CompareOp::Eq, 3));
            }
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn parse_not_single() {
        let expr = parse("NOT x == 1").unwrap();
        assert_eq!(expr, Expr::Not(vec![cmp("x", CompareOp::Eq, 1)]));
        let expr = parse("not (x == 1 or y == 2)").unwrap();
        assert!(
            matches!(expr, Expr::Not(ref children) if children.len() == 1)
        );
    }

    #[test]
    fn parse_not_list() {
        let expr = parse("not (x == 1, y == 2)").unwrap();
        assert_eq!(
            expr,
            Expr::Not(vec![cmp("x", CompareOp::Eq, 1), cmp("y", CompareOp::Eq, 2)])
        );
    }

    #[test]
    fn keywords_need_word_boundaries() {
        let expr = parse("notes == 1 and android == 2").unwrap();
        assert_eq!(
            expr,
            Expr::And(vec![
                cmp("notes", CompareOp::Eq, 1),
                cmp("android", CompareOp::Eq, 2)
            ])
        );
    }

    #[test]
    fn parse_comments_ignored() {
        let expr = parse("# adults only\nage >= 18 # inclusive\n").unwrap();
        assert_eq!(expr, cmp("age", CompareOp::Gte, 18));
    }

    #[test]
    fn parse_string_with_escapes() {
        let expr = parse(r#"x == "a\"b\\c""#).unwrap();
        assert_eq!(expr, cmp("x", CompareOp::Eq, "a\"b\\c"));
    }

    #[test]
    fn rejects_bare_field() {
        assert!(parse("age").is_err());
    }

    #[test]
    fn rejects_missing_value() {
        assert!(parse("age >=").is_err());
    }

    #[test]
    fn rejects_trailing_input() {
        assert!(parse("age >= 1 )").is_err());
    }

    #[test]
    fn rejects_unclosed_list() {
        assert!(parse("age in [1, 2").is_err());
    }
}
