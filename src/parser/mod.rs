// Role expression parser module
//
// Lets callers describe a selection in one line, e.g.
// `linear-regression(response: y, predictor: x1 + x2)`.

pub mod ast;
pub mod lexer;
pub mod roles;

pub use ast::{Binding, RoleExpr};
pub use roles::parse_role_expr;

use crate::error::{GainsError, Result};
use crate::kind::VisualizationKind;
use crate::selection::{Role, RoleSelection};

/// Parse a role expression and apply its bindings to an empty selection.
///
/// Bindings are applied left to right with [`RoleSelection::assign`], so a
/// later binding can vacate an earlier one exactly as a click would.
pub fn parse_roles(input: &str) -> Result<(VisualizationKind, RoleSelection)> {
    let expr = match parse_role_expr(input) {
        Ok((_, expr)) => expr,
        Err(e) => return Err(GainsError::RoleExpression(format!("{e}"))),
    };

    let kind: VisualizationKind = expr.kind.parse()?;
    let mut selection = RoleSelection::new();
    for binding in &expr.bindings {
        let role: Role = binding.role.parse()?;
        if role != Role::Predictor && binding.columns.len() > 1 {
            return Err(GainsError::RoleExpression(format!(
                "role '{role}' takes a single column"
            )));
        }
        for column in &binding.columns {
            selection.assign(kind, role, column)?;
        }
    }

    tracing::debug!(%kind, complete = selection.is_complete(kind), "parsed role expression");
    Ok((kind, selection))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roles_regression() {
        let (kind, sel) = parse_roles("linear-regression(response: y, predictor: x1 + x2)").unwrap();
        assert_eq!(kind, VisualizationKind::LinearRegression);
        assert_eq!(sel.response.as_deref(), Some("y"));
        assert_eq!(sel.predictors, vec!["x1".to_string(), "x2".to_string()]);
    }

    #[test]
    fn test_parse_roles_incomplete_is_allowed() {
        let (kind, sel) = parse_roles("pie-chart(category: k)").unwrap();
        assert_eq!(kind, VisualizationKind::PieChart);
        assert!(!sel.is_complete(kind));
    }

    #[test]
    fn test_parse_roles_unknown_kind() {
        let err = parse_roles("violin(value: a)").unwrap_err();
        assert!(matches!(err, GainsError::UnknownKind(_)));
    }

    #[test]
    fn test_parse_roles_foreign_role() {
        let err = parse_roles("dot-plot(category: a)").unwrap_err();
        assert!(matches!(err, GainsError::RoleNotApplicable { .. }));
    }

    #[test]
    fn test_parse_roles_single_slot_rejects_sum() {
        let err = parse_roles("histogram(value: a + b)").unwrap_err();
        assert!(matches!(err, GainsError::RoleExpression(_)));
    }

    #[test]
    fn test_parse_roles_syntax_error() {
        let err = parse_roles("bar-chart(category fruit)").unwrap_err();
        assert!(matches!(err, GainsError::RoleExpression(_)));
    }
}
