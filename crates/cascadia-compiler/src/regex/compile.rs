use cascadia_core::{Automaton, SymbolTable};
use tracing::{debug, warn};

use super::config::RegexConfig;
use super::grammar_file::expand_grammar;
use super::postfix::Postfix;
use super::thompson::Nfa;
use crate::Result;

pub struct RegexCompiler {
    config: RegexConfig,
}

impl RegexCompiler {
    pub fn new(config: RegexConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RegexConfig {
        &self.config
    }

    /// Compile one expression such as `(call | dial) ( home | work[2.3] )?`.
    pub fn compile(&self, expr: &str) -> Result<Automaton> {
        self.build(expr, SymbolTable::new(&self.config.epsilon))
    }

    /// Compile over a shared word table, normally the lexicon's output
    /// table, so word ids agree with L. Words the table lacks are appended.
    pub fn compile_with_symbols(&self, expr: &str, words: SymbolTable) -> Result<Automaton> {
        let known = words.len();
        let fst = self.build(expr, words)?;
        for (_, word) in fst.input_symbols().iter().skip(known) {
            warn!(word, "grammar word missing from the word table");
        }
        Ok(fst)
    }

    /// Compile a grammar file of `$ID ::= expr` definitions, or a bare
    /// expression when the file defines nothing.
    pub fn compile_grammar(&self, text: &str) -> Result<Automaton> {
        self.compile(&expand_grammar(text)?)
    }

    pub fn compile_grammar_with_symbols(&self, text: &str, words: SymbolTable) -> Result<Automaton> {
        self.compile_with_symbols(&expand_grammar(text)?, words)
    }

    fn build(&self, expr: &str, words: SymbolTable) -> Result<Automaton> {
        let postfix = Postfix::parse(expr)?;
        let nfa = Nfa::build(&postfix)?;
        debug!(%postfix, nodes = nfa.len(), "built regex nfa");
        Ok(nfa.materialize(self.config.semiring, words))
    }
}
