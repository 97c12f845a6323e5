//! Helpers shared by compiler tests.

use std::collections::BTreeSet;

use cascadia_core::{Automaton, StateId};

fn closure(fst: &Automaton, states: BTreeSet<StateId>) -> BTreeSet<StateId> {
    let mut seen = states.clone();
    let mut stack: Vec<StateId> = states.into_iter().collect();

    while let Some(state) = stack.pop() {
        for arc in fst.arcs(state) {
            if arc.ilabel.is_epsilon() && seen.insert(arc.nextstate) {
                stack.push(arc.nextstate);
            }
        }
    }
    seen
}

/// Whether the automaton accepts the space-separated word sequence on its
/// input side.
pub fn accepts(fst: &Automaton, input: &str) -> bool {
    let Some(start) = fst.start() else {
        return false;
    };
    let mut current = closure(fst, BTreeSet::from([start]));

    for word in input.split_whitespace() {
        let Some(label) = fst.input_symbols().find(word) else {
            return false;
        };
        let next: BTreeSet<StateId> = current
            .iter()
            .flat_map(|&state| fst.arcs(state))
            .filter(|arc| arc.ilabel == label)
            .map(|arc| arc.nextstate)
            .collect();
        current = closure(fst, next);
    }

    current.iter().any(|&state| fst.is_final(state))
}

/// Cheapest accepting path cost for the input, if accepted.
pub fn path_cost(fst: &Automaton, input: &str) -> Option<f64> {
    fn walk(fst: &Automaton, state: StateId, words: &[&str], depth: usize) -> Option<f64> {
        if depth > 64 {
            return None;
        }
        let mut best = match (words.is_empty(), fst.final_weight(state)) {
            (true, Some(weight)) => Some(weight),
            _ => None,
        };
        for arc in fst.arcs(state) {
            let (label, _) = fst.arc_symbols(arc);
            let rest = if arc.ilabel.is_epsilon() {
                Some(words)
            } else if words.first() == Some(&label) {
                Some(&words[1..])
            } else {
                None
            };
            if let Some(rest) = rest
                && let Some(cost) = walk(fst, arc.nextstate, rest, depth + 1)
            {
                let total = cost + arc.weight;
                best = Some(best.map_or(total, |b: f64| b.min(total)));
            }
        }
        best
    }

    let words: Vec<&str> = input.split_whitespace().collect();
    walk(fst, fst.start()?, &words, 0)
}
