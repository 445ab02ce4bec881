//! Boolean-expression evaluator over a mutable variable environment. Used by
//! `wat-provenance`'s disjoint-witness scenario: an `Or` of two `And`s whose
//! witnesses under `wat` are disjoint sub-traces, one per disjunct.

use std::collections::HashMap;

use wat_machine::StateMachine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Top,
    Bot,
    Var(String),
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Not(Box<Expr>),
}

impl Expr {
    pub fn var(x: impl Into<String>) -> Expr {
        Expr::Var(x.into())
    }

    pub fn not(e: Expr) -> Expr {
        Expr::Not(Box::new(e))
    }

    /// A variable absent from `env` evaluates to `false`.
    pub fn eval(&self, env: &HashMap<String, bool>) -> bool {
        match self {
            Expr::Top => true,
            Expr::Bot => false,
            Expr::Var(x) => *env.get(x).unwrap_or(&false),
            Expr::And(children) => children.iter().all(|c| c.eval(env)),
            Expr::Or(children) => children.iter().any(|c| c.eval(env)),
            Expr::Not(child) => !child.eval(env),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Eval(Expr),
    Set(String),
    Unset(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Eval(bool),
    Set,
    Unset,
}

#[derive(Default)]
pub struct Bexpr {
    env: HashMap<String, bool>,
}

impl Bexpr {
    pub fn new() -> Bexpr {
        Bexpr::default()
    }

    pub fn eval_req(&self, e: Expr) -> Input {
        Input::Eval(e)
    }

    pub fn set(&self, k: impl Into<String>) -> Input {
        Input::Set(k.into())
    }

    pub fn unset(&self, k: impl Into<String>) -> Input {
        Input::Unset(k.into())
    }
}

impl StateMachine for Bexpr {
    type Input = Input;
    type Output = Output;

    fn reset(&mut self) {
        self.env.clear();
    }

    fn transition(&mut self, input: &Input) -> Output {
        match input {
            Input::Eval(e) => Output::Eval(e.eval(&self.env)),
            Input::Set(k) => {
                self.env.insert(k.clone(), true);
                Output::Set
            }
            Input::Unset(k) => {
                self.env.insert(k.clone(), false);
                Output::Unset
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variable_defaults_to_false() {
        let env = HashMap::new();
        assert!(!Expr::var("a").eval(&env));
    }

    #[test]
    fn or_of_ands_is_true_when_either_conjunct_holds() {
        let mut b = Bexpr::new();
        let e = Expr::Or(vec![
            Expr::And(vec![Expr::var("a"), Expr::var("d")]),
            Expr::And(vec![Expr::var("b"), Expr::var("c")]),
        ]);
        let trace = b.run(&[b.set("a"), b.set("b"), b.set("c"), b.set("d"), b.eval_req(e)]);
        assert_eq!(trace[4].1, Output::Eval(true));
    }

    #[test]
    fn not_negates_the_child() {
        let mut b = Bexpr::new();
        let trace = b.run(&[b.set("a"), b.eval_req(Expr::not(Expr::var("a")))]);
        assert_eq!(trace[1].1, Output::Eval(false));
    }
}
