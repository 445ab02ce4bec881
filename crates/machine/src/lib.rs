pub type Trace<I, O> = Vec<(I, O)>;

pub type EnumeratedTrace<I, O> = Vec<(usize, I, O)>;

pub fn enumerate_trace<I: Clone, O: Clone>(trace: &Trace<I, O>) -> EnumeratedTrace<I, O> {
    trace
        .iter()
        .enumerate()
        .map(|(j, (i, o))| (j, i.clone(), o.clone()))
        .collect()
}

pub fn unenumerate_trace<I: Clone, O: Clone>(trace: &EnumeratedTrace<I, O>) -> Trace<I, O> {
    trace.iter().map(|(_, i, o)| (i.clone(), o.clone())).collect()
}

pub trait StateMachine {
    type Input;
    type Output: PartialEq;

    fn reset(&mut self);

    fn transition(&mut self, input: &Self::Input) -> Self::Output;

    fn run(&mut self, inputs: &[Self::Input]) -> Trace<Self::Input, Self::Output>
    where
        Self::Input: Clone,
    {
        self.reset();
        inputs
            .iter()
            .map(|i| {
                let o = self.transition(i);
                (i.clone(), o)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        total: i64,
    }

    impl StateMachine for Counter {
        type Input = i64;
        type Output = i64;

        fn reset(&mut self) {
            self.total = 0;
        }

        fn transition(&mut self, input: &i64) -> i64 {
            self.total += input;
            self.total
        }
    }

    #[test]
    fn run_resets_before_replaying() {
        let mut m = Counter { total: 999 };
        let trace = m.run(&[1, 2, 3]);
        assert_eq!(trace, vec![(1, 1), (2, 3), (3, 6)]);
    }

    #[test]
    fn run_is_deterministic_regardless_of_prior_state() {
        let mut m = Counter { total: 0 };
        let first = m.run(&[1, 2, 3]);
        m.transition(&100);
        let second = m.run(&[1, 2, 3]);
        assert_eq!(first, second);
    }

    #[test]
    fn enumerate_then_unenumerate_round_trips() {
        let trace: Trace<i64, i64> = vec![(1, 1), (2, 3)];
        let enumerated = enumerate_trace(&trace);
        assert_eq!(enumerated, vec![(0, 1, 1), (1, 2, 3)]);
        assert_eq!(unenumerate_trace(&enumerated), trace);
    }
}
