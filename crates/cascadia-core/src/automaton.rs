//! Weighted automata built by the compilers.
//!
//! An automaton owns its input and output symbol tables plus a table of
//! state names, so compilers can refer to states by meaning (an n-gram
//! history, a phone pair) and labels by text. Acceptors share one table for
//! input and output.

use std::fmt::{self, Write};

use indexmap::IndexMap;

use crate::{Label, Semiring, SymbolTable};

/// Id of a state in one automaton. Ids are assigned monotonically from 0.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct StateId(u32);

impl StateId {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Create a StateId from a raw index. Use only when reading states back.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A weighted transition. `weight` is a cost in the automaton's semiring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arc {
    pub ilabel: Label,
    pub olabel: Label,
    pub weight: f64,
    pub nextstate: StateId,
}

#[derive(Debug, Clone)]
pub struct Automaton {
    semiring: Semiring,
    acceptor: bool,
    isyms: SymbolTable,
    osyms: SymbolTable,
    state_names: IndexMap<String, StateId>,
    /// Outgoing arcs per state, in insertion order.
    arcs: Vec<Vec<Arc>>,
    finals: IndexMap<StateId, f64>,
    start: Option<StateId>,
}

impl Automaton {
    /// New transducer with separate input and output tables.
    pub fn transducer(semiring: Semiring, epsilon: &str) -> Self {
        Self::with_tables(semiring, SymbolTable::new(epsilon), SymbolTable::new(epsilon))
    }

    /// New acceptor: output labels are drawn from the input table.
    pub fn acceptor(semiring: Semiring, epsilon: &str) -> Self {
        let mut fst = Self::transducer(semiring, epsilon);
        fst.acceptor = true;
        fst
    }

    /// New acceptor over a pre-populated table (e.g. a shared word table).
    pub fn acceptor_with_symbols(semiring: Semiring, symbols: SymbolTable) -> Self {
        let epsilon = symbols.epsilon().to_owned();
        let mut fst = Self::with_tables(semiring, symbols, SymbolTable::new(&epsilon));
        fst.acceptor = true;
        fst
    }

    /// New transducer over pre-populated symbol tables.
    pub fn with_tables(semiring: Semiring, isyms: SymbolTable, osyms: SymbolTable) -> Self {
        Self {
            semiring,
            acceptor: false,
            isyms,
            osyms,
            state_names: IndexMap::new(),
            arcs: Vec::new(),
            finals: IndexMap::new(),
            start: None,
        }
    }

    pub fn semiring(&self) -> Semiring {
        self.semiring
    }

    pub fn is_acceptor(&self) -> bool {
        self.acceptor
    }

    pub fn input_symbols(&self) -> &SymbolTable {
        &self.isyms
    }

    pub fn output_symbols(&self) -> &SymbolTable {
        if self.acceptor { &self.isyms } else { &self.osyms }
    }

    pub fn input_symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.isyms
    }

    pub fn output_symbols_mut(&mut self) -> &mut SymbolTable {
        if self.acceptor {
            &mut self.isyms
        } else {
            &mut self.osyms
        }
    }

    /// Allocate a fresh anonymous state.
    pub fn new_state(&mut self) -> StateId {
        let id = StateId(self.arcs.len() as u32);
        self.arcs.push(Vec::new());
        id
    }

    /// Get the state bound to `name`, allocating it on first use.
    pub fn named_state(&mut self, name: &str) -> StateId {
        if let Some(&id) = self.state_names.get(name) {
            return id;
        }
        let id = self.new_state();
        self.state_names.insert(name.to_owned(), id);
        id
    }

    pub fn find_state(&self, name: &str) -> Option<StateId> {
        self.state_names.get(name).copied()
    }

    pub fn state_name(&self, state: StateId) -> Option<&str> {
        self.state_names
            .iter()
            .find(|&(_, &id)| id == state)
            .map(|(name, _)| name.as_str())
    }

    pub fn set_start(&mut self, state: StateId) {
        self.ensure_state(state);
        self.start = Some(state);
    }

    pub fn start(&self) -> Option<StateId> {
        self.start
    }

    /// Add an arc, registering unseen labels in the symbol tables.
    ///
    /// # Panics
    /// Panics if either endpoint was never allocated.
    pub fn add_arc(&mut self, src: StateId, isym: &str, osym: &str, weight: f64, dst: StateId) {
        let ilabel = self.isyms.intern(isym);
        let olabel = self.output_symbols_mut().intern(osym);
        self.add_arc_labels(src, ilabel, olabel, weight, dst);
    }

    /// Add an arc whose labels were already interned.
    pub fn add_arc_labels(
        &mut self,
        src: StateId,
        ilabel: Label,
        olabel: Label,
        weight: f64,
        dst: StateId,
    ) {
        self.ensure_state(src);
        self.ensure_state(dst);
        self.arcs[src.index()].push(Arc {
            ilabel,
            olabel,
            weight,
            nextstate: dst,
        });
    }

    pub fn set_final(&mut self, state: StateId, weight: f64) {
        self.ensure_state(state);
        self.finals.insert(state, weight);
    }

    pub fn final_weight(&self, state: StateId) -> Option<f64> {
        self.finals.get(&state).copied()
    }

    pub fn is_final(&self, state: StateId) -> bool {
        self.finals.contains_key(&state)
    }

    pub fn finals(&self) -> impl Iterator<Item = (StateId, f64)> + '_ {
        self.finals.iter().map(|(&s, &w)| (s, w))
    }

    pub fn num_states(&self) -> usize {
        self.arcs.len()
    }

    pub fn num_arcs(&self) -> usize {
        self.arcs.iter().map(Vec::len).sum()
    }

    pub fn arcs(&self, state: StateId) -> &[Arc] {
        self.ensure_state(state);
        &self.arcs[state.index()]
    }

    /// Rescale each state's outgoing arc costs so their log-semiring sum is
    /// one. Final weights are left alone, as are states whose arcs sum to
    /// zero probability. Returns the number of states rescaled.
    pub fn normalize(&mut self) -> usize {
        let mut rescaled = 0;
        for arcs in &mut self.arcs {
            let Some(total) = log_sum(arcs.iter().map(|arc| arc.weight)) else {
                continue;
            };
            for arc in arcs.iter_mut() {
                arc.weight -= total;
            }
            rescaled += 1;
        }
        rescaled
    }

    pub fn states(&self) -> impl Iterator<Item = StateId> {
        (0..self.arcs.len() as u32).map(StateId)
    }

    /// Resolve an arc's labels to text.
    pub fn arc_symbols(&self, arc: &Arc) -> (&str, &str) {
        (
            self.isyms.resolve(arc.ilabel),
            self.output_symbols().resolve(arc.olabel),
        )
    }

    /// State-name table as `name\tid` lines; unnamed states are skipped.
    pub fn state_symbols(&self) -> String {
        let mut out = String::new();
        for (name, id) in &self.state_names {
            writeln!(out, "{name}\t{id}").expect("String write never fails");
        }
        out
    }

    /// Serialize to the toolkit text format.
    ///
    /// The first source state in the text is taken as the start state, so the
    /// start state's arcs come first, followed by every other state in id
    /// order, then the finals. Zero weights are omitted. Acceptor arcs carry
    /// a single label column, so the fourth column is always a weight.
    ///
    /// # Panics
    /// Panics if no start state was set.
    pub fn serialize(&self) -> String {
        let start = self.ensure_start();
        let mut out = String::new();

        let order = std::iter::once(start).chain(self.states().filter(|&s| s != start));
        for src in order {
            for arc in &self.arcs[src.index()] {
                let (isym, osym) = self.arc_symbols(arc);
                write!(out, "{src}\t{}\t{isym}", arc.nextstate).expect("String write never fails");
                if !self.acceptor {
                    write!(out, "\t{osym}").expect("String write never fails");
                }
                write_weight(&mut out, arc.weight);
            }
        }

        if self.arcs[start.index()].is_empty() && !self.is_final(start) {
            // Keep the start state first even when it has nothing to say.
            writeln!(out, "{start}\tInfinity").expect("String write never fails");
        }

        for (state, weight) in self.finals() {
            write!(out, "{state}").expect("String write never fails");
            write_weight(&mut out, weight);
        }

        out
    }
}

/// Log-semiring sum of costs, `-ln(sum(exp(-w)))`; `None` when infinite.
fn log_sum(costs: impl Iterator<Item = f64> + Clone) -> Option<f64> {
    let best = costs.clone().fold(f64::INFINITY, f64::min);
    if !best.is_finite() {
        return None;
    }
    let scaled: f64 = costs.map(|w| (best - w).exp()).sum();
    let total = best - scaled.ln();
    total.is_finite().then_some(total)
}

fn write_weight(out: &mut String, weight: f64) {
    if weight == 0.0 {
        out.push('\n');
    } else {
        writeln!(out, "\t{weight}").expect("String write never fails");
    }
}
