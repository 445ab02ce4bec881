//! An ordered list with push/pop from both ends, value removal, and indexed
//! access. `set(x, i)` is preserved here exactly as the source specifies it:
//! it **deletes** the element at `i` rather than replacing it with `x` — an
//! Open Question the spec flags rather than resolves, so the behavior stays
//! as observed rather than "fixed" to the name's apparent intent.

use wat_machine::StateMachine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Lpush(String),
    Lpop,
    Rpush(String),
    Rpop,
    Remove(String),
    Set(String, i64),
    Index(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Lpush(bool),
    Lpop(Option<String>),
    Rpush(bool),
    Rpop(Option<String>),
    Remove(bool),
    Set(bool),
    Index(Option<String>),
}

#[derive(Default)]
pub struct Lists {
    xs: Vec<String>,
}

impl Lists {
    pub fn new() -> Lists {
        Lists::default()
    }

    pub fn lpush(&self, x: impl Into<String>) -> Input {
        Input::Lpush(x.into())
    }

    pub fn lpop(&self) -> Input {
        Input::Lpop
    }

    pub fn rpush(&self, x: impl Into<String>) -> Input {
        Input::Rpush(x.into())
    }

    pub fn rpop(&self) -> Input {
        Input::Rpop
    }

    pub fn remove(&self, x: impl Into<String>) -> Input {
        Input::Remove(x.into())
    }

    pub fn set(&self, x: impl Into<String>, i: i64) -> Input {
        Input::Set(x.into(), i)
    }

    pub fn index(&self, i: i64) -> Input {
        Input::Index(i)
    }

    fn in_bounds(&self, i: i64) -> Option<usize> {
        if i >= 0 && (i as usize) < self.xs.len() {
            Some(i as usize)
        } else {
            None
        }
    }
}

impl StateMachine for Lists {
    type Input = Input;
    type Output = Output;

    fn reset(&mut self) {
        self.xs.clear();
    }

    fn transition(&mut self, input: &Input) -> Output {
        match input {
            Input::Lpush(x) => {
                self.xs.insert(0, x.clone());
                Output::Lpush(true)
            }
            Input::Lpop => Output::Lpop(if self.xs.is_empty() { None } else { Some(self.xs.remove(0)) }),
            Input::Rpush(x) => {
                self.xs.push(x.clone());
                Output::Rpush(true)
            }
            Input::Rpop => Output::Rpop(self.xs.pop()),
            Input::Remove(x) => {
                if let Some(i) = self.xs.iter().position(|e| e == x) {
                    self.xs.remove(i);
                }
                Output::Remove(true)
            }
            Input::Set(_, i) => match self.in_bounds(*i) {
                Some(idx) => {
                    self.xs.remove(idx);
                    Output::Set(true)
                }
                None => Output::Set(false),
            },
            Input::Index(i) => Output::Index(self.in_bounds(*i).map(|idx| self.xs[idx].clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lpush_and_rpush_order_correctly() {
        let mut l = Lists::new();
        let trace = l.run(&[l.rpush("b"), l.rpush("c"), l.lpush("a"), l.index(0), l.index(2)]);
        assert_eq!(trace[3].1, Output::Index(Some("a".to_string())));
        assert_eq!(trace[4].1, Output::Index(Some("c".to_string())));
    }

    #[test]
    fn remove_drops_the_first_matching_value() {
        let mut l = Lists::new();
        let trace = l.run(&[l.rpush("a"), l.rpush("b"), l.remove("a"), l.index(0)]);
        assert_eq!(trace[3].1, Output::Index(Some("b".to_string())));
    }

    #[test]
    fn set_deletes_the_element_at_the_index_rather_than_replacing_it() {
        let mut l = Lists::new();
        let trace = l.run(&[l.rpush("a"), l.rpush("b"), l.set("z", 0), l.index(0)]);
        assert_eq!(trace[2].1, Output::Set(true));
        assert_eq!(trace[3].1, Output::Index(Some("b".to_string())));
    }

    #[test]
    fn set_out_of_bounds_fails_without_mutating() {
        let mut l = Lists::new();
        let trace = l.run(&[l.rpush("a"), l.set("z", 5), l.index(0)]);
        assert_eq!(trace[1].1, Output::Set(false));
        assert_eq!(trace[2].1, Output::Index(Some("a".to_string())));
    }

    #[test]
    fn pop_on_empty_list_is_none() {
        let mut l = Lists::new();
        let trace = l.run(&[l.lpop(), l.rpop()]);
        assert_eq!(trace[0].1, Output::Lpop(None));
        assert_eq!(trace[1].1, Output::Rpop(None));
    }
}
