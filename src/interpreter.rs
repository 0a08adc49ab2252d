use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::mem;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info};

use crate::class::{LoxClass, LoxInstance};
use crate::environment::Environment;
use crate::error::{LoxError, Result};
use crate::expr::{Expr, ExprId};
use crate::function::LoxFunction;
use crate::resolver::Bindings;
use crate::stmt::{FunctionDecl, Stmt};
use crate::token::{Token, TokenType};
use crate::value::Value;

/// Non-local exit from evaluation.
///
/// `return` is not an error, but it travels the same way: up through the
/// recursive evaluation until something catches it — the nearest function
/// call frame for `Return`, the driver for `Error`.  `From<LoxError>` keeps
/// `?` working on both.
#[derive(Debug)]
pub enum Unwind {
    Return(Value),
    Error(LoxError),
}

impl From<LoxError> for Unwind {
    fn from(err: LoxError) -> Self {
        Unwind::Error(err)
    }
}

/// Tree-walking evaluator.
///
/// `print` output goes to the injected writer; diagnostics never do.  The
/// interpreter is long-lived: a REPL feeds it one resolved program per line
/// and globals accumulate across them.
pub struct Interpreter<'out, W: Write> {
    output: &'out mut W,
    globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<ExprId, usize>,
}

impl<'out, W: Write> Interpreter<'out, W> {
    pub fn new(output: &'out mut W) -> Self {
        let globals = Rc::new(RefCell::new(Environment::new()));

        globals.borrow_mut().define(
            "clock",
            Value::NativeFunction {
                name: "clock".to_string(),
                arity: 0,
                func: clock_native,
            },
        );

        info!("Interpreter initialized");

        Interpreter {
            output,
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
        }
    }

    /// Absorbs the resolver's binding table.  Ids are globally unique, so
    /// successive REPL lines extend rather than overwrite.
    pub fn note_locals(&mut self, bindings: Bindings) {
        debug!("Noting {} local binding(s)", bindings.len());

        self.locals.extend(bindings);
    }

    /// Executes a resolved program in order.  The first runtime error stops
    /// execution and surfaces here.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<()> {
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => {}

                // The resolver rejects top-level `return`; a stray unwind
                // reaching this far is simply dropped.
                Err(Unwind::Return(_)) => {}

                Err(Unwind::Error(err)) => return Err(err),
            }
        }

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Statements
    // ─────────────────────────────────────────────────────────────────────

    fn execute(&mut self, stmt: &Stmt) -> std::result::Result<(), Unwind> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
            }

            Stmt::Print(expr) => {
                let value: Value = self.evaluate(expr)?;
                writeln!(self.output, "{}", value).map_err(LoxError::from)?;
            }

            Stmt::Var { name, initializer } => {
                let value: Value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                self.environment.borrow_mut().define(&name.lexeme, value);
            }

            Stmt::Block(statements) => {
                let frame = Rc::new(RefCell::new(Environment::with_enclosing(Rc::clone(
                    &self.environment,
                ))));

                self.execute_block(statements, frame)?;
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)?;
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)?;
                }
            }

            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    self.execute(body)?;
                }
            }

            Stmt::Function(declaration) => {
                let function = LoxFunction::new(
                    Rc::clone(declaration),
                    Rc::clone(&self.environment),
                    false,
                );

                self.environment
                    .borrow_mut()
                    .define(&declaration.name.lexeme, Value::Function(Rc::new(function)));
            }

            Stmt::Return { value, .. } => {
                let value: Value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                return Err(Unwind::Return(value));
            }

            Stmt::Class {
                name,
                superclass,
                methods,
            } => {
                self.execute_class(name, superclass.as_ref(), methods)?;
            }
        }

        Ok(())
    }

    /// Runs a statement list in the given frame, restoring the previous
    /// frame on every exit path.
    pub(crate) fn execute_block(
        &mut self,
        statements: &[Stmt],
        frame: Rc<RefCell<Environment>>,
    ) -> std::result::Result<(), Unwind> {
        let previous: Rc<RefCell<Environment>> = mem::replace(&mut self.environment, frame);

        let result = statements.iter().try_for_each(|stmt| self.execute(stmt));

        self.environment = previous;

        result
    }

    fn execute_class(
        &mut self,
        name: &Token,
        superclass: Option<&Expr>,
        methods: &[Rc<FunctionDecl>],
    ) -> std::result::Result<(), Unwind> {
        let superclass_value: Option<Rc<LoxClass>> = match superclass {
            Some(expr) => match self.evaluate(expr)? {
                Value::Class(class) => Some(class),

                _ => {
                    let line: usize = match expr {
                        Expr::Variable {
                            name: superclass_name,
                            ..
                        } => superclass_name.line,
                        _ => name.line,
                    };

                    return Err(
                        LoxError::runtime(line, "Superclass must be a class.").into()
                    );
                }
            },

            None => None,
        };

        // Two-step definition lets methods close over the class's own name.
        self.environment
            .borrow_mut()
            .define(&name.lexeme, Value::Nil);

        let method_closure: Rc<RefCell<Environment>> = match &superclass_value {
            Some(class) => {
                let enclosing = Rc::new(RefCell::new(Environment::with_enclosing(Rc::clone(
                    &self.environment,
                ))));

                enclosing
                    .borrow_mut()
                    .define("super", Value::Class(Rc::clone(class)));

                enclosing
            }

            None => Rc::clone(&self.environment),
        };

        let mut method_table: HashMap<String, Rc<LoxFunction>> = HashMap::new();
        for declaration in methods {
            let is_initializer: bool = declaration.name.lexeme == "init";

            let method = LoxFunction::new(
                Rc::clone(declaration),
                Rc::clone(&method_closure),
                is_initializer,
            );

            method_table.insert(declaration.name.lexeme.clone(), Rc::new(method));
        }

        let class = LoxClass::new(name.lexeme.clone(), superclass_value, method_table);

        debug!("Defined class {}", name.lexeme);

        self.environment
            .borrow_mut()
            .assign(&name.lexeme, Value::Class(Rc::new(class)));

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Expressions
    // ─────────────────────────────────────────────────────────────────────

    pub fn evaluate(&mut self, expr: &Expr) -> std::result::Result<Value, Unwind> {
        match expr {
            Expr::Literal(token) => Ok(self.evaluate_literal(token)?),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Unary { operator, right } => {
                let value: Value = self.evaluate(right)?;

                Ok(self.evaluate_unary(operator, value)?)
            }

            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left_value: Value = self.evaluate(left)?;
                let right_value: Value = self.evaluate(right)?;

                Ok(self.evaluate_binary(operator, left_value, right_value)?)
            }

            // Short-circuiting: the result is an operand value, never a
            // coerced boolean.
            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left_value: Value = self.evaluate(left)?;

                match operator.token_type {
                    TokenType::OR if left_value.is_truthy() => Ok(left_value),
                    TokenType::AND if !left_value.is_truthy() => Ok(left_value),
                    _ => self.evaluate(right),
                }
            }

            Expr::Variable { id, name } => self.look_up_variable(name, *id),

            Expr::Assign { id, name, value } => {
                let value: Value = self.evaluate(value)?;

                let assigned: bool = match self.locals.get(id) {
                    Some(&distance) => self.environment.borrow_mut().assign_at(
                        distance,
                        &name.lexeme,
                        value.clone(),
                    ),

                    None => self.globals.borrow_mut().assign(&name.lexeme, value.clone()),
                };

                if !assigned {
                    return Err(LoxError::runtime(
                        name.line,
                        format!("Undefined variable '{}'.", name.lexeme),
                    )
                    .into());
                }

                Ok(value)
            }

            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee_value: Value = self.evaluate(callee)?;

                let mut argument_values: Vec<Value> = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    argument_values.push(self.evaluate(argument)?);
                }

                self.call_value(callee_value, argument_values, paren)
            }

            Expr::Get { object, name } => match self.evaluate(object)? {
                Value::Instance(instance) => Ok(LoxInstance::get(&instance, name)?),

                _ => Err(LoxError::runtime(name.line, "Only instances have properties.").into()),
            },

            Expr::Set {
                object,
                name,
                value,
            } => match self.evaluate(object)? {
                Value::Instance(instance) => {
                    let value: Value = self.evaluate(value)?;

                    instance.borrow_mut().set(name, value.clone());

                    Ok(value)
                }

                _ => Err(LoxError::runtime(name.line, "Only instances have properties.").into()),
            },

            Expr::This { id, keyword } => self.look_up_variable(keyword, *id),

            Expr::Super {
                id,
                keyword,
                method,
            } => self.evaluate_super(*id, keyword, method),
        }
    }

    fn evaluate_literal(&self, token: &Token) -> Result<Value> {
        match &token.token_type {
            TokenType::NUMBER(n) => Ok(Value::Number(*n)),
            TokenType::STRING(s) => Ok(Value::String(s.clone())),
            TokenType::TRUE => Ok(Value::Bool(true)),
            TokenType::FALSE => Ok(Value::Bool(false)),
            TokenType::NIL => Ok(Value::Nil),
            _ => Err(LoxError::runtime(token.line, "Invalid literal.")),
        }
    }

    fn evaluate_unary(&self, operator: &Token, value: Value) -> Result<Value> {
        match operator.token_type {
            TokenType::MINUS => match value {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(LoxError::runtime(operator.line, "Operand must be a number.")),
            },

            TokenType::BANG => Ok(Value::Bool(!value.is_truthy())),

            _ => Err(LoxError::runtime(operator.line, "Invalid unary operator.")),
        }
    }

    fn evaluate_binary(&self, operator: &Token, left: Value, right: Value) -> Result<Value> {
        match operator.token_type {
            // `+` doubles as string concatenation.
            TokenType::PLUS => match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),

                (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),

                _ => Err(LoxError::runtime(
                    operator.line,
                    "Operands must be two numbers or two strings.",
                )),
            },

            TokenType::MINUS => {
                let (a, b) = number_operands(operator, left, right)?;
                Ok(Value::Number(a - b))
            }

            TokenType::STAR => {
                let (a, b) = number_operands(operator, left, right)?;
                Ok(Value::Number(a * b))
            }

            // IEEE division: `1/0` is inf, `0/0` is NaN.
            TokenType::SLASH => {
                let (a, b) = number_operands(operator, left, right)?;
                Ok(Value::Number(a / b))
            }

            TokenType::GREATER => {
                let (a, b) = number_operands(operator, left, right)?;
                Ok(Value::Bool(a > b))
            }

            TokenType::GREATER_EQUAL => {
                let (a, b) = number_operands(operator, left, right)?;
                Ok(Value::Bool(a >= b))
            }

            TokenType::LESS => {
                let (a, b) = number_operands(operator, left, right)?;
                Ok(Value::Bool(a < b))
            }

            TokenType::LESS_EQUAL => {
                let (a, b) = number_operands(operator, left, right)?;
                Ok(Value::Bool(a <= b))
            }

            TokenType::EQUAL_EQUAL => Ok(Value::Bool(left == right)),

            TokenType::BANG_EQUAL => Ok(Value::Bool(left != right)),

            _ => Err(LoxError::runtime(operator.line, "Invalid binary operator.")),
        }
    }

    /// Resolved locals read at their recorded depth; everything else is a
    /// global.
    fn look_up_variable(
        &self,
        name: &Token,
        id: ExprId,
    ) -> std::result::Result<Value, Unwind> {
        let value: Option<Value> = match self.locals.get(&id) {
            Some(&distance) => self.environment.borrow().get_at(distance, &name.lexeme),
            None => self.globals.borrow().get(&name.lexeme),
        };

        value.ok_or_else(|| {
            LoxError::runtime(
                name.line,
                format!("Undefined variable '{}'.", name.lexeme),
            )
            .into()
        })
    }

    fn call_value(
        &mut self,
        callee: Value,
        arguments: Vec<Value>,
        paren: &Token,
    ) -> std::result::Result<Value, Unwind> {
        match callee {
            Value::NativeFunction { arity, func, .. } => {
                check_arity(arity, arguments.len(), paren)?;

                Ok(func(&arguments)?)
            }

            Value::Function(function) => {
                check_arity(function.arity(), arguments.len(), paren)?;

                function.call(self, arguments)
            }

            Value::Class(class) => {
                check_arity(class.arity(), arguments.len(), paren)?;

                let instance = Rc::new(RefCell::new(LoxInstance::new(Rc::clone(&class))));

                if let Some(initializer) = class.find_method("init") {
                    initializer
                        .bind(Value::Instance(Rc::clone(&instance)))
                        .call(self, arguments)?;
                }

                Ok(Value::Instance(instance))
            }

            _ => Err(
                LoxError::runtime(paren.line, "Can only call functions and classes.").into(),
            ),
        }
    }

    /// `super` and `this` sit in adjacent frames: `super` at the resolved
    /// distance, `this` one frame nearer the use site.
    fn evaluate_super(
        &mut self,
        id: ExprId,
        keyword: &Token,
        method: &Token,
    ) -> std::result::Result<Value, Unwind> {
        let distance: usize = self
            .locals
            .get(&id)
            .copied()
            .ok_or_else(|| LoxError::runtime(keyword.line, "Undefined variable 'super'."))?;

        let superclass: Rc<LoxClass> =
            match self.environment.borrow().get_at(distance, "super") {
                Some(Value::Class(class)) => class,
                _ => {
                    return Err(
                        LoxError::runtime(keyword.line, "Undefined variable 'super'.").into(),
                    )
                }
            };

        let object: Value = self
            .environment
            .borrow()
            .get_at(distance - 1, "this")
            .ok_or_else(|| LoxError::runtime(keyword.line, "Undefined variable 'this'."))?;

        let found = superclass.find_method(&method.lexeme).ok_or_else(|| {
            LoxError::runtime(
                method.line,
                format!("Undefined property '{}'.", method.lexeme),
            )
        })?;

        Ok(Value::Function(Rc::new(found.bind(object))))
    }
}

fn check_arity(expected: usize, got: usize, paren: &Token) -> Result<()> {
    if expected != got {
        return Err(LoxError::runtime(
            paren.line,
            format!("Expected {} arguments but got {}.", expected, got),
        ));
    }

    Ok(())
}

fn number_operands(operator: &Token, left: Value, right: Value) -> Result<(f64, f64)> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((a, b)),

        _ => Err(LoxError::runtime(
            operator.line,
            "Operands must be numbers.",
        )),
    }
}

fn clock_native(_args: &[Value]) -> Result<Value> {
    let seconds: f64 = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64();

    Ok(Value::Number(seconds))
}
