use std::collections::HashSet;

use wat_machine::{enumerate_trace, EnumeratedTrace, StateMachine, Trace};

pub(crate) fn powerset(indexes: &[usize], min_size: usize) -> Vec<Vec<usize>> {
    let n = indexes.len();
    let mut sized: Vec<(usize, Vec<usize>)> = Vec::with_capacity(1 << n);
    for mask in 0u32..(1u32 << n) {
        let count = mask.count_ones() as usize;
        if count < min_size {
            continue;
        }
        let subset = (0..n)
            .filter(|i| mask & (1 << i) != 0)
            .map(|i| indexes[i])
            .collect();
        sized.push((count, subset));
    }
    sized.sort();
    sized.into_iter().map(|(_, subset)| subset).collect()
}

pub(crate) fn subtraces<I: Clone, O: Clone>(trace: &EnumeratedTrace<I, O>) -> Vec<EnumeratedTrace<I, O>> {
    let indexes: Vec<usize> = (0..trace.len()).collect();
    powerset(&indexes, 0)
        .into_iter()
        .map(|index_set| index_set.into_iter().map(|i| trace[i].clone()).collect())
        .collect()
}

pub(crate) fn supertraces<I: Clone, O: Clone>(
    subtrace: &EnumeratedTrace<I, O>,
    trace: &EnumeratedTrace<I, O>,
) -> Vec<EnumeratedTrace<I, O>> {
    let subtrace_index_set: HashSet<usize> = subtrace.iter().map(|(j, _, _)| *j).collect();
    let indexes: Vec<usize> = (0..trace.len()).collect();
    powerset(&indexes, subtrace.len())
        .into_iter()
        .filter(|index_set| subtrace_index_set.iter().all(|j| index_set.contains(j)))
        .map(|index_set| index_set.into_iter().map(|i| trace[i].clone()).collect())
        .collect()
}

pub(crate) fn trace_happens_before<I, O>(a: &EnumeratedTrace<I, O>, b: &EnumeratedTrace<I, O>) -> bool {
    let (j, _, _) = a.last().expect("nonempty trace");
    let (k, _, _) = b.first().expect("nonempty trace");
    j < k
}

pub(crate) fn trace_satisfies_io<M>(
    m: &mut M,
    trace: &EnumeratedTrace<M::Input, M::Output>,
    io: &(M::Input, M::Output),
) -> bool
where
    M: StateMachine,
    M::Input: Clone + PartialEq,
    M::Output: Clone,
{
    let inputs: Vec<M::Input> = trace.iter().map(|(_, i, _)| i.clone()).collect();
    m.run(&inputs);
    io.1 == m.transition(&io.0)
}

pub(crate) fn subtrace_closed_under_superset<M>(
    m: &mut M,
    subtrace: &EnumeratedTrace<M::Input, M::Output>,
    trace: &EnumeratedTrace<M::Input, M::Output>,
    io: &(M::Input, M::Output),
) -> bool
where
    M: StateMachine,
    M::Input: Clone + PartialEq,
    M::Output: Clone,
{
    supertraces(subtrace, trace)
        .iter()
        .all(|supertrace| trace_satisfies_io(m, supertrace, io))
}

pub(crate) fn subtrace_is_witness<M>(
    m: &mut M,
    subtrace: &EnumeratedTrace<M::Input, M::Output>,
    trace: &EnumeratedTrace<M::Input, M::Output>,
    io: &(M::Input, M::Output),
) -> bool
where
    M: StateMachine,
    M::Input: Clone + PartialEq,
    M::Output: Clone,
{
    if !subtrace_closed_under_superset(m, subtrace, trace, io) {
        return false;
    }
    subtraces(subtrace)
        .iter()
        .all(|subsubtrace| subsubtrace == subtrace || !subtrace_closed_under_superset(m, subsubtrace, trace, io))
}

fn enumerated_wat<M>(
    m: &mut M,
    trace: &EnumeratedTrace<M::Input, M::Output>,
    io: (M::Input, M::Output),
) -> Vec<EnumeratedTrace<M::Input, M::Output>>
where
    M: StateMachine,
    M::Input: Clone + PartialEq,
    M::Output: Clone,
{
    let witnesses: Vec<EnumeratedTrace<M::Input, M::Output>> = subtraces(trace)
        .into_iter()
        .filter(|subtrace| subtrace_is_witness(m, subtrace, trace, &io))
        .collect();

    witnesses
        .iter()
        .filter(|w| {
            !witnesses
                .iter()
                .any(|w2| *w != w2 && trace_happens_before(w, w2))
        })
        .cloned()
        .collect()
}

pub fn wat<M>(m: &mut M, trace: &Trace<M::Input, M::Output>, j: usize) -> Vec<EnumeratedTrace<M::Input, M::Output>>
where
    M: StateMachine,
    M::Input: Clone + PartialEq,
    M::Output: Clone,
{
    let prefix: Trace<M::Input, M::Output> = trace[..j].to_vec();
    let enumerated_prefix = enumerate_trace(&prefix);
    let (i, o) = trace[j].clone();
    enumerated_wat(m, &enumerated_prefix, (i, o))
}
