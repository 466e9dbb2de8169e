//! Static interpretation of a parsed configuration module.

use std::collections::HashMap;

use oxc_ast::ast::{
    ArrayExpression, ArrayExpressionElement, AssignmentExpression, AssignmentTarget,
    BindingPatternKind, ExportDefaultDeclaration, Expression, ObjectExpression, ObjectPropertyKind,
    Program, PropertyKey, Statement, TemplateLiteral, UnaryExpression, VariableDeclaration,
};
use oxc_syntax::operator::{AssignmentOperator, UnaryOperator};
use serde_json::{Map, Number, Value};

use crate::format::module::ModuleError;

type Eval = Result<Option<Value>, ModuleError>;

/// A top-level binding.
#[derive(Debug)]
enum Binding {
    /// Value known statically; `None` is `undefined`.
    Known(Option<Value>),
    /// Declared but initialised with something that cannot be evaluated.
    Opaque,
}

/// Walks top-level statements and collects the module's export.
#[derive(Debug, Default)]
pub(super) struct Evaluator {
    scope: HashMap<String, Binding>,
    exports: Option<Value>,
}

impl Evaluator {
    /// Evaluates `program` and returns its export, or `None` when nothing
    /// (or `undefined`) was exported.
    pub(super) fn run(mut self, program: &Program<'_>) -> Eval {
        for statement in &program.body {
            self.statement(statement)?;
        }
        Ok(self.exports)
    }

    fn statement(&mut self, statement: &Statement<'_>) -> Result<(), ModuleError> {
        match statement {
            Statement::VariableDeclaration(declaration) => self.declare(declaration),
            Statement::ExpressionStatement(expression) => match &expression.expression {
                Expression::AssignmentExpression(assignment) => self.assign(assignment),
                _ => Err(unsupported("top-level expression")),
            },
            Statement::ExportDefaultDeclaration(declaration) => self.export_default(declaration),
            Statement::ExportNamedDeclaration(_) | Statement::ExportAllDeclaration(_) => Err(
                ModuleError::evaluation("named exports are not supported; use `export default`"),
            ),
            // Inert unless referenced, and references to them fail as unknown bindings.
            Statement::EmptyStatement(_)
            | Statement::FunctionDeclaration(_)
            | Statement::ClassDeclaration(_)
            | Statement::ImportDeclaration(_) => Ok(()),
            _ => Err(unsupported("statement")),
        }
    }

    fn declare(&mut self, declaration: &VariableDeclaration<'_>) -> Result<(), ModuleError> {
        for declarator in &declaration.declarations {
            let BindingPatternKind::BindingIdentifier(id) = &declarator.id.kind else {
                return Err(unsupported("destructuring declaration"));
            };
            let binding = match &declarator.init {
                None => Binding::Known(None),
                Some(init) => self.expression(init).map_or(Binding::Opaque, Binding::Known),
            };
            self.scope.insert(id.name.to_string(), binding);
        }
        Ok(())
    }

    fn assign(&mut self, assignment: &AssignmentExpression<'_>) -> Result<(), ModuleError> {
        if assignment.operator != AssignmentOperator::Assign {
            return Err(unsupported("compound assignment"));
        }
        let AssignmentTarget::StaticMemberExpression(target) = &assignment.left else {
            return Err(unsupported("assignment target"));
        };
        let property = target.property.name.as_str();
        match &target.object {
            Expression::Identifier(object) if object.name == "module" && property == "exports" => {
                self.exports = self.expression(&assignment.right)?;
                Ok(())
            }
            Expression::Identifier(object) if object.name == "exports" => {
                let value = self.expression(&assignment.right)?;
                self.set_export_key(property, value)
            }
            Expression::StaticMemberExpression(inner)
                if inner.property.name == "exports"
                    && matches!(&inner.object, Expression::Identifier(id) if id.name == "module") =>
            {
                let value = self.expression(&assignment.right)?;
                self.set_export_key(property, value)
            }
            _ => Err(unsupported("assignment outside module.exports")),
        }
    }

    fn set_export_key(&mut self, key: &str, value: Option<Value>) -> Result<(), ModuleError> {
        let exports = self
            .exports
            .get_or_insert_with(|| Value::Object(Map::new()));
        let Value::Object(map) = exports else {
            return Err(ModuleError::evaluation(format!(
                "cannot set export '{key}' on a non-object module.exports"
            )));
        };
        map.remove(key);
        if let Some(item) = value {
            map.insert(key.to_owned(), item);
        }
        Ok(())
    }

    fn export_default(&mut self, declaration: &ExportDefaultDeclaration<'_>) -> Result<(), ModuleError> {
        let Some(expression) = declaration.declaration.as_expression() else {
            return Err(unsupported("default export declaration"));
        };
        self.exports = self.expression(expression)?;
        Ok(())
    }

    fn expression(&self, expression: &Expression<'_>) -> Eval {
        match expression {
            Expression::NullLiteral(_) => Ok(Some(Value::Null)),
            Expression::BooleanLiteral(literal) => Ok(Some(Value::Bool(literal.value))),
            Expression::StringLiteral(literal) => {
                Ok(Some(Value::String(literal.value.to_string())))
            }
            Expression::NumericLiteral(literal) => number(literal.value).map(Some),
            Expression::TemplateLiteral(template) => template_string(template).map(Some),
            Expression::ObjectExpression(object) => self.object(object).map(Some),
            Expression::ArrayExpression(array) => self.array(array).map(Some),
            Expression::UnaryExpression(unary) => self.unary(unary),
            Expression::ParenthesizedExpression(inner) => self.expression(&inner.expression),
            Expression::Identifier(id) => self.lookup(id.name.as_str()),
            Expression::StaticMemberExpression(member) => {
                match self.expression(&member.object)? {
                    Some(Value::Object(map)) => Ok(map.get(member.property.name.as_str()).cloned()),
                    _ => Err(unsupported("member access on a non-object")),
                }
            }
            _ => Err(unsupported("expression")),
        }
    }

    fn lookup(&self, name: &str) -> Eval {
        match self.scope.get(name) {
            Some(Binding::Known(value)) => Ok(value.clone()),
            Some(Binding::Opaque) => Err(ModuleError::evaluation(format!(
                "binding '{name}' is not a static value"
            ))),
            None if name == "undefined" => Ok(None),
            None => Err(ModuleError::evaluation(format!("'{name}' is not defined"))),
        }
    }

    fn object(&self, object: &ObjectExpression<'_>) -> Result<Value, ModuleError> {
        let mut map = Map::new();
        for entry in &object.properties {
            match entry {
                ObjectPropertyKind::ObjectProperty(property) => {
                    if property.computed {
                        return Err(unsupported("computed property key"));
                    }
                    let key = property_key(&property.key)?;
                    // `undefined` values are dropped, as JSON serialisation does.
                    let value = self.expression(&property.value)?;
                    map.remove(&key);
                    if let Some(item) = value {
                        map.insert(key, item);
                    }
                }
                ObjectPropertyKind::SpreadProperty(spread) => {
                    match self.expression(&spread.argument)? {
                        Some(Value::Object(other)) => map.extend(other),
                        None | Some(Value::Null) => {}
                        Some(_) => return Err(unsupported("spread of a non-object")),
                    }
                }
            }
        }
        Ok(Value::Object(map))
    }

    fn array(&self, array: &ArrayExpression<'_>) -> Result<Value, ModuleError> {
        let mut items = Vec::with_capacity(array.elements.len());
        for element in &array.elements {
            match element {
                ArrayExpressionElement::SpreadElement(spread) => {
                    match self.expression(&spread.argument)? {
                        Some(Value::Array(other)) => items.extend(other),
                        _ => return Err(unsupported("spread of a non-array")),
                    }
                }
                ArrayExpressionElement::Elision(_) => items.push(Value::Null),
                other => {
                    let Some(expression) = other.as_expression() else {
                        return Err(unsupported("array element"));
                    };
                    items.push(self.expression(expression)?.unwrap_or(Value::Null));
                }
            }
        }
        Ok(Value::Array(items))
    }

    fn unary(&self, unary: &UnaryExpression<'_>) -> Eval {
        match unary.operator {
            UnaryOperator::Void => Ok(None),
            UnaryOperator::LogicalNot => {
                let value = self.expression(&unary.argument)?;
                Ok(Some(Value::Bool(!truthy(value.as_ref()))))
            }
            UnaryOperator::UnaryNegation | UnaryOperator::UnaryPlus => {
                let Some(Value::Number(n)) = self.expression(&unary.argument)? else {
                    return Err(unsupported("arithmetic on a non-number"));
                };
                let magnitude = n.as_f64().unwrap_or(f64::NAN);
                if unary.operator == UnaryOperator::UnaryNegation {
                    number(negate(magnitude)).map(Some)
                } else {
                    number(magnitude).map(Some)
                }
            }
            _ => Err(unsupported("unary operator")),
        }
    }
}

fn property_key(key: &PropertyKey<'_>) -> Result<String, ModuleError> {
    match key {
        PropertyKey::StaticIdentifier(id) => Ok(id.name.to_string()),
        PropertyKey::StringLiteral(literal) => Ok(literal.value.to_string()),
        PropertyKey::NumericLiteral(literal) => number(literal.value).map(|n| n.to_string()),
        _ => Err(unsupported("property key")),
    }
}

fn template_string(template: &TemplateLiteral<'_>) -> Result<Value, ModuleError> {
    if !template.expressions.is_empty() {
        return Err(unsupported("template substitution"));
    }
    let mut text = String::new();
    for quasi in &template.quasis {
        let Some(cooked) = &quasi.value.cooked else {
            return Err(unsupported("invalid template escape"));
        };
        text.push_str(cooked.as_str());
    }
    Ok(Value::String(text))
}

/// Integral values become JSON integers so `3` round-trips as `3`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "the value is integral and within i64 range"
)]
fn number(value: f64) -> Result<Value, ModuleError> {
    const LIMIT: f64 = 9_007_199_254_740_992.0;
    if value.fract() == 0.0 && value.abs() <= LIMIT {
        return Ok(Value::from(value as i64));
    }
    Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| ModuleError::evaluation("non-finite numbers cannot be represented"))
}

#[expect(clippy::float_arithmetic, reason = "unary minus on a literal")]
fn negate(value: f64) -> f64 {
    -value
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

fn unsupported(what: &str) -> ModuleError {
    ModuleError::evaluation(format!(
        "unsupported {what}; configuration modules must export static values"
    ))
}
