use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use log::debug;

use crate::environment::Environment;
use crate::interpreter::{Interpreter, Unwind};
use crate::stmt::FunctionDecl;
use crate::value::Value;

/// A user-defined function: its declaration plus the environment frame that
/// was current when the declaration executed.
#[derive(Debug)]
pub struct LoxFunction {
    declaration: Rc<FunctionDecl>,
    closure: Rc<RefCell<Environment>>,
    is_initializer: bool,
}

impl LoxFunction {
    pub fn new(
        declaration: Rc<FunctionDecl>,
        closure: Rc<RefCell<Environment>>,
        is_initializer: bool,
    ) -> Self {
        LoxFunction {
            declaration,
            closure,
            is_initializer,
        }
    }

    pub fn name(&self) -> &str {
        &self.declaration.name.lexeme
    }

    pub fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    /// Produces a copy whose closure is a one-frame extension binding
    /// `this` to the given instance.  Method access on instances and
    /// `super.method` both go through here.
    pub fn bind(&self, instance: Value) -> LoxFunction {
        let environment = Rc::new(RefCell::new(Environment::with_enclosing(Rc::clone(
            &self.closure,
        ))));

        environment.borrow_mut().define("this", instance);

        LoxFunction {
            declaration: Rc::clone(&self.declaration),
            closure: environment,
            is_initializer: self.is_initializer,
        }
    }

    /// Runs the body in a fresh frame over the closure with parameters
    /// bound positionally.  A `return` unwind stops here; initializers
    /// yield the bound `this` no matter how the body exits.
    pub fn call<W: Write>(
        &self,
        interpreter: &mut Interpreter<'_, W>,
        arguments: Vec<Value>,
    ) -> Result<Value, Unwind> {
        debug!(
            "Calling <fn {}> with {} argument(s)",
            self.name(),
            arguments.len()
        );

        let frame = Rc::new(RefCell::new(Environment::with_enclosing(Rc::clone(
            &self.closure,
        ))));

        for (param, argument) in self.declaration.params.iter().zip(arguments) {
            frame.borrow_mut().define(&param.lexeme, argument);
        }

        match interpreter.execute_block(&self.declaration.body, frame) {
            Ok(()) => {}

            Err(Unwind::Return(value)) => {
                if !self.is_initializer {
                    return Ok(value);
                }
                // An initializer's bare `return;` still yields the instance.
            }

            Err(unwind) => return Err(unwind),
        }

        if self.is_initializer {
            return Ok(self.bound_this());
        }

        Ok(Value::Nil)
    }

    /// The `this` binding an initializer returns.  Initializers only exist
    /// bound, so the closure's innermost frame always holds it.
    fn bound_this(&self) -> Value {
        self.closure
            .borrow()
            .get_at(0, "this")
            .unwrap_or(Value::Nil)
    }
}
