//! Last-writer-wins key-value store. The canonical black-box fixture for
//! `wat-provenance`'s scenario tests.

use std::collections::HashMap;

use wat_machine::StateMachine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Get(String),
    Set(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Get(Option<String>),
    Set,
}

#[derive(Default)]
pub struct Kvs {
    kvs: HashMap<String, String>,
}

impl Kvs {
    pub fn new() -> Kvs {
        Kvs::default()
    }

    pub fn get(&self, k: impl Into<String>) -> Input {
        Input::Get(k.into())
    }

    pub fn set(&self, k: impl Into<String>, v: impl Into<String>) -> Input {
        Input::Set(k.into(), v.into())
    }
}

impl StateMachine for Kvs {
    type Input = Input;
    type Output = Output;

    fn reset(&mut self) {
        self.kvs.clear();
    }

    fn transition(&mut self, input: &Input) -> Output {
        match input {
            Input::Get(k) => Output::Get(self.kvs.get(k).cloned()),
            Input::Set(k, v) => {
                self.kvs.insert(k.clone(), v.clone());
                Output::Set
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_returns_the_set_value() {
        let mut kvs = Kvs::new();
        let trace = kvs.run(&[kvs.set("x", "1"), kvs.get("x")]);
        assert_eq!(trace[1].1, Output::Get(Some("1".to_string())));
    }

    #[test]
    fn get_of_unset_key_is_none() {
        let mut kvs = Kvs::new();
        let trace = kvs.run(&[kvs.get("x")]);
        assert_eq!(trace[0].1, Output::Get(None));
    }

    #[test]
    fn later_set_wins() {
        let mut kvs = Kvs::new();
        let trace = kvs.run(&[kvs.set("x", "1"), kvs.set("x", "2"), kvs.get("x")]);
        assert_eq!(trace[2].1, Output::Get(Some("2".to_string())));
    }
}
