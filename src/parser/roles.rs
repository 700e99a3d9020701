// Role expression parser
//
// Format: kind(role: column, role: column + column, ...)

use super::ast::{Binding, RoleExpr};
use super::lexer::{identifier, kebab_word, string_literal, ws};
use nom::{
    branch::alt,
    character::complete::{alpha1, char},
    combinator::eof,
    multi::{separated_list0, separated_list1},
    IResult,
};

/// Parse a column reference, bare or quoted
fn parse_column(input: &str) -> IResult<&str, String> {
    ws(alt((string_literal, identifier)))(input)
}

/// Parse one binding
/// Format: role: col or role: col + col
pub fn parse_binding(input: &str) -> IResult<&str, Binding> {
    let (input, role) = ws(alpha1)(input)?;
    let (input, _) = ws(char(':'))(input)?;
    let (input, columns) = separated_list1(ws(char('+')), parse_column)(input)?;

    Ok((
        input,
        Binding {
            role: role.to_string(),
            columns,
        },
    ))
}

/// Parse a complete role expression, requiring the whole input
pub fn parse_role_expr(input: &str) -> IResult<&str, RoleExpr> {
    let (input, kind) = ws(kebab_word)(input)?;
    let (input, _) = ws(char('('))(input)?;
    let (input, bindings) = separated_list0(ws(char(',')), parse_binding)(input)?;
    let (input, _) = ws(char(')'))(input)?;
    let (input, _) = ws(eof)(input)?;

    Ok((
        input,
        RoleExpr {
            kind: kind.to_string(),
            bindings,
        },
    ))
}
