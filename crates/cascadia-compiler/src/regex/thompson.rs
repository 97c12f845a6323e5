//! Thompson construction over a postfix expression.
//!
//! Nodes follow the usual NFA shape: a symbol node has one outgoing
//! pointer, a split node two epsilon pointers, and a single accept node
//! closes the machine. A fragment carries the pointers still waiting to
//! be connected; patching consumes them.

use cascadia_core::{Automaton, Semiring, StateId, SymbolTable};

use super::error::{RegexError, RegexErrorKind};
use super::postfix::{Item, Operand, Postfix};

type NodeId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Out,
    Out1,
}

#[derive(Debug)]
enum Node {
    Symbol { operand: Operand, out: Option<NodeId> },
    Split { out: Option<NodeId>, out1: Option<NodeId> },
    Accept,
}

#[derive(Debug)]
struct Fragment {
    start: NodeId,
    dangling: Vec<(NodeId, Slot)>,
}

#[derive(Debug, Default)]
pub(crate) struct Nfa {
    nodes: Vec<Node>,
    start: NodeId,
}

impl Nfa {
    pub(crate) fn build(postfix: &Postfix) -> Result<Self, RegexError> {
        let mut nfa = Nfa::default();
        let mut stack: Vec<Fragment> = Vec::new();

        for item in &postfix.items {
            let fragment = match item {
                Item::Operand(operand) => {
                    let node = nfa.push(Node::Symbol {
                        operand: operand.clone(),
                        out: None,
                    });
                    Fragment {
                        start: node,
                        dangling: vec![(node, Slot::Out)],
                    }
                }
                Item::Concat => {
                    let right = pop(&mut stack)?;
                    let left = pop(&mut stack)?;
                    nfa.patch(left.dangling, right.start);
                    Fragment {
                        start: left.start,
                        dangling: right.dangling,
                    }
                }
                Item::Alt => {
                    let right = pop(&mut stack)?;
                    let mut left = pop(&mut stack)?;
                    let split = nfa.push(Node::Split {
                        out: Some(left.start),
                        out1: Some(right.start),
                    });
                    left.dangling.extend(right.dangling);
                    Fragment {
                        start: split,
                        dangling: left.dangling,
                    }
                }
                Item::Optional => {
                    let mut inner = pop(&mut stack)?;
                    let split = nfa.push(Node::Split {
                        out: Some(inner.start),
                        out1: None,
                    });
                    inner.dangling.push((split, Slot::Out1));
                    Fragment {
                        start: split,
                        dangling: inner.dangling,
                    }
                }
                Item::Star => {
                    let inner = pop(&mut stack)?;
                    let split = nfa.push(Node::Split {
                        out: Some(inner.start),
                        out1: None,
                    });
                    nfa.patch(inner.dangling, split);
                    Fragment {
                        start: split,
                        dangling: vec![(split, Slot::Out1)],
                    }
                }
                Item::Plus => {
                    let inner = pop(&mut stack)?;
                    let split = nfa.push(Node::Split {
                        out: Some(inner.start),
                        out1: None,
                    });
                    nfa.patch(inner.dangling, split);
                    Fragment {
                        start: inner.start,
                        dangling: vec![(split, Slot::Out1)],
                    }
                }
            };
            stack.push(fragment);
        }

        let Some(fragment) = stack.pop() else {
            return Err(RegexError::new(RegexErrorKind::EmptyExpression, 0..0));
        };
        if !stack.is_empty() {
            return Err(RegexError::new(RegexErrorKind::MissingOperand, 0..0));
        }

        let accept = nfa.push(Node::Accept);
        nfa.patch(fragment.dangling, accept);
        nfa.start = fragment.start;
        Ok(nfa)
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn patch(&mut self, dangling: Vec<(NodeId, Slot)>, target: NodeId) {
        for (node, slot) in dangling {
            match (&mut self.nodes[node], slot) {
                (Node::Symbol { out, .. }, Slot::Out) | (Node::Split { out, .. }, Slot::Out) => {
                    *out = Some(target);
                }
                (Node::Split { out1, .. }, Slot::Out1) => *out1 = Some(target),
                _ => {}
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// One state per node; symbol nodes read their word, split nodes read
    /// epsilon, and the accept node is the only final state.
    pub(crate) fn materialize(&self, semiring: Semiring, words: SymbolTable) -> Automaton {
        let eps = words.epsilon().to_owned();
        let epsilon = eps.as_str();
        let mut fst = Automaton::acceptor_with_symbols(semiring, words);
        let states: Vec<StateId> = self.nodes.iter().map(|_| fst.new_state()).collect();
        fst.set_start(states[self.start]);

        for (id, node) in self.nodes.iter().enumerate() {
            let src = states[id];
            match node {
                Node::Symbol { operand, out } => {
                    if let Some(out) = out {
                        let label = operand.word.as_deref().unwrap_or(epsilon);
                        fst.add_arc(src, label, label, operand.weight, states[*out]);
                    }
                }
                Node::Split { out, out1 } => {
                    for target in [out, out1].into_iter().flatten() {
                        fst.add_arc(src, epsilon, epsilon, 0.0, states[*target]);
                    }
                }
                Node::Accept => fst.set_final(src, 0.0),
            }
        }

        fst
    }
}

fn pop(stack: &mut Vec<Fragment>) -> Result<Fragment, RegexError> {
    stack
        .pop()
        .ok_or_else(|| RegexError::new(RegexErrorKind::MissingOperand, 0..0))
}
