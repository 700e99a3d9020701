// Syntax tree for role expressions

/// `kind(role: column, role: a + b, ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct RoleExpr {
    /// Kind identifier as written, e.g. `bar-chart`
    pub kind: String,
    pub bindings: Vec<Binding>,
}

/// One `role: column [+ column ...]` entry
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub role: String,
    pub columns: Vec<String>,
}
