//! AST pretty printer
//!
//! Expressions and literals render back to source-like text through
//! [`Display`](fmt::Display). Explicit groups keep their parentheses and no
//! others are added. Whole programs render as an indented tree:
//!
//! ```text
//! Source
//! ├── VAL limit = 10
//! └── FUN main()
//!     └── WHILE i < limit
//!         └── i = i + 1;
//! ```

use crate::parser::ast::*;
use std::fmt;

fn escape_into(out: &mut String, value: &str, quote: char) {
    for ch in value.chars() {
        match ch {
            '\u{8}' => out.push_str("\\b"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Nil => f.write_str("NIL"),
            Literal::Boolean(true) => f.write_str("TRUE"),
            Literal::Boolean(false) => f.write_str("FALSE"),
            Literal::Integer(value) => write!(f, "{}", value),
            Literal::Decimal(value) => f.write_str(&value.to_plain_string()),
            Literal::Character(value) => {
                let mut out = String::from('\'');
                escape_into(&mut out, &value.to_string(), '\'');
                out.push('\'');
                f.write_str(&out)
            }
            Literal::String(value) => {
                let mut out = String::from('"');
                escape_into(&mut out, value, '"');
                out.push('"');
                f.write_str(&out)
            }
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expression]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(literal) => write!(f, "{}", literal),
            Expression::Group(inner) => write!(f, "({})", inner),
            Expression::Binary {
                operator,
                left,
                right,
            } => write!(f, "{} {} {}", left, operator, right),
            Expression::Access { name, offset: None } => f.write_str(name),
            Expression::Access {
                name,
                offset: Some(offset),
            } => write!(f, "{}[{}]", name, offset),
            Expression::Function { name, arguments } => {
                write!(f, "{}(", name)?;
                write_list(f, arguments)?;
                f.write_str(")")
            }
            Expression::PlcList(elements) => {
                f.write_str("[")?;
                write_list(f, elements)?;
                f.write_str("]")
            }
        }
    }
}

/// One labelled node of a rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub label: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    pub fn leaf(label: impl Into<String>) -> Self {
        Self::new(label, Vec::new())
    }

    /// Render this node and its descendants with box-drawing connectors.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.label);
        out.push('\n');
        self.render_children("", &mut out);
        out
    }

    fn render_children(&self, prefix: &str, out: &mut String) {
        for (i, child) in self.children.iter().enumerate() {
            let is_last = i + 1 == self.children.len();
            out.push_str(prefix);
            out.push_str(if is_last { "└── " } else { "├── " });
            out.push_str(&child.label);
            out.push('\n');

            let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
            child.render_children(&child_prefix, out);
        }
    }
}

fn global_node(global: &Global) -> TreeNode {
    let label = match (&global.value, global.mutable) {
        (Some(list @ Expression::PlcList(_)), _) => format!("LIST {} = {}", global.name, list),
        (Some(value), true) => format!("VAR {} = {}", global.name, value),
        (None, _) => format!("VAR {}", global.name),
        (Some(value), false) => format!("VAL {} = {}", global.name, value),
    };
    TreeNode::leaf(label)
}

fn function_node(function: &Function) -> TreeNode {
    TreeNode::new(
        format!("FUN {}({})", function.name, function.parameters.join(", ")),
        statement_nodes(&function.statements),
    )
}

fn statement_nodes(statements: &[Statement]) -> Vec<TreeNode> {
    statements.iter().map(statement_node).collect()
}

fn statement_node(statement: &Statement) -> TreeNode {
    match statement {
        Statement::Expression(expression) => TreeNode::leaf(format!("{};", expression)),
        Statement::Declaration { name, value: None } => TreeNode::leaf(format!("LET {};", name)),
        Statement::Declaration {
            name,
            value: Some(value),
        } => TreeNode::leaf(format!("LET {} = {};", name, value)),
        Statement::Assignment { receiver, value } => {
            TreeNode::leaf(format!("{} = {};", receiver, value))
        }
        Statement::If {
            condition,
            then_statements,
            else_statements,
        } => {
            let mut children = vec![TreeNode::new("DO", statement_nodes(then_statements))];
            if !else_statements.is_empty() {
                children.push(TreeNode::new("ELSE", statement_nodes(else_statements)));
            }
            TreeNode::new(format!("IF {}", condition), children)
        }
        Statement::Switch { condition, cases } => TreeNode::new(
            format!("SWITCH {}", condition),
            cases
                .iter()
                .map(|case| {
                    let label = match &case.condition {
                        Some(value) => format!("CASE {}:", value),
                        None => "DEFAULT".to_string(),
                    };
                    TreeNode::new(label, statement_nodes(&case.statements))
                })
                .collect(),
        ),
        Statement::While {
            condition,
            statements,
        } => TreeNode::new(format!("WHILE {}", condition), statement_nodes(statements)),
        Statement::Return(value) => TreeNode::leaf(format!("RETURN {};", value)),
    }
}

impl From<&Source> for TreeNode {
    fn from(source: &Source) -> Self {
        let children = source
            .globals
            .iter()
            .map(global_node)
            .chain(source.functions.iter().map(function_node))
            .collect();
        TreeNode::new("Source", children)
    }
}

/// Render a whole program as an indented tree.
pub fn render_tree(source: &Source) -> String {
    TreeNode::from(source).render()
}
