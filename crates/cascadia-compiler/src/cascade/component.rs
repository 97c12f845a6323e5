//! Declared components and the alphabets they connect.

use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;

/// Label alphabet on one side of a component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alphabet {
    /// HMM state or transition ids.
    Hmm,
    /// Physical (tied) context-dependent units.
    Physical,
    /// Logical context-dependent units.
    Logical,
    Phones,
    Words,
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Alphabet::Hmm => "hmm",
            Alphabet::Physical => "physical",
            Alphabet::Logical => "logical",
            Alphabet::Phones => "phones",
            Alphabet::Words => "words",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    Ilabel,
    Olabel,
}

impl SortType {
    pub fn as_str(self) -> &'static str {
        match self {
            SortType::Ilabel => "ilabel",
            SortType::Olabel => "olabel",
        }
    }
}

/// Where a component's binary automaton comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// Compiled from the text format before evaluation.
    Text {
        fst: PathBuf,
        isyms: Option<PathBuf>,
        osyms: Option<PathBuf>,
        acceptor: bool,
    },
    /// Already at `<prefix>.<name>.fst`.
    Prebuilt,
}

impl Source {
    pub fn text(fst: impl Into<PathBuf>) -> Self {
        Source::Text {
            fst: fst.into(),
            isyms: None,
            osyms: None,
            acceptor: false,
        }
    }

    pub fn isyms(mut self, path: impl Into<PathBuf>) -> Self {
        if let Source::Text { isyms, .. } = &mut self {
            *isyms = Some(path.into());
        }
        self
    }

    pub fn osyms(mut self, path: impl Into<PathBuf>) -> Self {
        if let Source::Text { osyms, .. } = &mut self {
            *osyms = Some(path.into());
        }
        self
    }

    pub fn acceptor(mut self) -> Self {
        if let Source::Text { acceptor, .. } = &mut self {
            *acceptor = true;
        }
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    pub(crate) symbol: char,
    pub(crate) input: Alphabet,
    pub(crate) output: Alphabet,
    pub(crate) source: Source,
    pub(crate) closure: bool,
    pub(crate) sort: SortType,
}

impl Component {
    pub fn new(symbol: char, input: Alphabet, output: Alphabet, source: Source) -> Self {
        Self {
            symbol,
            input,
            output,
            source,
            closure: false,
            sort: SortType::Ilabel,
        }
    }

    /// Close the compiled automaton under concatenation (`fstclosure`).
    pub fn closure(mut self, value: bool) -> Self {
        self.closure = value;
        self
    }

    pub fn sort(mut self, value: SortType) -> Self {
        self.sort = value;
        self
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }

    /// Artifact name: the lowercased component letter.
    pub fn name(&self) -> String {
        self.symbol.to_ascii_lowercase().to_string()
    }

    pub fn input(&self) -> Alphabet {
        self.input
    }

    pub fn output(&self) -> Alphabet {
        self.output
    }

    pub fn source(&self) -> &Source {
        &self.source
    }
}

/// Transducer converting one alphabet into another, composed in front of
/// an operand whose input alphabet does not match its left partner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mapper {
    pub(crate) name: String,
    pub(crate) from: Alphabet,
    pub(crate) to: Alphabet,
    pub(crate) source: Source,
}

impl Mapper {
    pub fn new(name: impl Into<String>, from: Alphabet, to: Alphabet, source: Source) -> Self {
        Self {
            name: name.into(),
            from,
            to,
            source,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Clone, Debug, Default)]
pub struct ComponentSet {
    components: IndexMap<char, Component>,
    mappers: Vec<Mapper>,
}

impl ComponentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, component: Component) -> Option<Component> {
        self.components.insert(component.symbol, component)
    }

    pub fn add_mapper(&mut self, mapper: Mapper) {
        self.mappers.push(mapper);
    }

    pub fn get(&self, symbol: char) -> Option<&Component> {
        self.components.get(&symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// Mapper whose output feeds `to` from an operand producing `from`.
    pub fn find_mapper(&self, from: Alphabet, to: Alphabet) -> Option<&Mapper> {
        self.mappers.iter().find(|m| m.from == from && m.to == to)
    }

    /// Components as written by the compilers under `prefix`.
    ///
    /// `logical_context` declares C over logical units, in which case the
    /// `d` mapper (physical to logical, from the context compiler) bridges
    /// H into it.
    pub fn standard(prefix: &str, logical_context: bool) -> Self {
        let file = |name: &str| PathBuf::from(format!("{prefix}.{name}"));
        let context_input = if logical_context {
            Alphabet::Logical
        } else {
            Alphabet::Physical
        };

        let mut set = ComponentSet::new();
        set.insert(
            Component::new(
                'H',
                Alphabet::Hmm,
                Alphabet::Physical,
                Source::text(file("h.fst.txt"))
                    .isyms(file("h.isyms"))
                    .osyms(file("h.osyms")),
            )
            .sort(SortType::Olabel),
        );
        set.insert(
            Component::new(
                'C',
                context_input,
                Alphabet::Phones,
                Source::text(file("c.fst.txt"))
                    .isyms(file("c.isyms"))
                    .osyms(file("l.isyms")),
            )
            .sort(SortType::Olabel),
        );
        set.insert(
            Component::new(
                'L',
                Alphabet::Phones,
                Alphabet::Words,
                Source::text(file("l.fst.txt"))
                    .isyms(file("l.isyms"))
                    .osyms(file("words.syms")),
            )
            .closure(true)
            .sort(SortType::Olabel),
        );
        set.insert(Component::new(
            'G',
            Alphabet::Words,
            Alphabet::Words,
            Source::text(file("g.fst.txt")).isyms(file("words.syms")).acceptor(),
        ));
        set.insert(Component::new(
            'T',
            Alphabet::Words,
            Alphabet::Words,
            Source::text(file("t.fst.txt"))
                .isyms(file("words.syms"))
                .osyms(file("t.osyms")),
        ));
        if logical_context {
            set.add_mapper(Mapper::new(
                "d",
                Alphabet::Physical,
                Alphabet::Logical,
                Source::text(file("d.fst.txt"))
                    .isyms(file("d.isyms"))
                    .osyms(file("c.isyms")),
            ));
        }
        set
    }
}
