//! `SubPatternEngine` — derives the fifteen sub-pattern tuple sets from a
//! `RelationGraph` (spec §3, §4.2).
//!
//! Pure and total: a missing relation class yields an empty sub-pattern set,
//! never an error. Iteration order is never observable — every sub-pattern
//! is a `HashSet` of tuples, compared as a set.
//!
//! Two points are load-bearing (spec §4.2, §9):
//!
//! - `CI` canonicalization: the naive join produces each unordered child
//!   pair twice (once per ordering); the canonical form sorts the two child
//!   slots before inserting, so each `{c1, c2}` appears once per parent.
//! - `SASS` is computed independently of `SAGG` and then has `SAGG`
//!   subtracted — never computed by looking `SAGG` up mid-loop.

use std::collections::{HashMap, HashSet};

use super::graph::RelationGraph;
use super::ids::ClassId;

pub type C2 = (ClassId, ClassId);
pub type C3 = (ClassId, ClassId, ClassId);
pub type C1 = (ClassId,);

#[derive(Debug, Clone, Default)]
pub struct SubPatternSets {
    pub ica: HashSet<C3>,
    pub ci: HashSet<C3>,
    pub iagg: HashSet<C2>,
    pub ipag: HashSet<C3>,
    pub mli: HashSet<C3>,
    pub iass: HashSet<C2>,
    pub sagg: HashSet<C1>,
    pub iiagg: HashSet<C3>,
    pub sass: HashSet<C1>,
    pub icd: HashSet<C3>,
    pub dci: HashSet<C3>,
    pub ipas: HashSet<C3>,
    pub agpi: HashSet<C3>,
    pub ipd: HashSet<C3>,
    pub dpi: HashSet<C3>,
}

/// `I` grouped by parent and by child; built once per `derive` call so each
/// join below is a direct lookup rather than a scan, per the performance
/// note in spec §4.2.
struct InheritanceIndex {
    by_parent: HashMap<ClassId, Vec<ClassId>>,
    by_child: HashMap<ClassId, Vec<ClassId>>,
}

impl InheritanceIndex {
    fn build(inheritance: &HashSet<(ClassId, ClassId)>) -> Self {
        let mut by_parent: HashMap<ClassId, Vec<ClassId>> = HashMap::new();
        let mut by_child: HashMap<ClassId, Vec<ClassId>> = HashMap::new();
        for (parent, child) in inheritance {
            by_parent.entry(parent.clone()).or_default().push(child.clone());
            by_child.entry(child.clone()).or_default().push(parent.clone());
        }
        Self { by_parent, by_child }
    }

    fn children_of(&self, parent: &ClassId) -> &[ClassId] {
        self.by_parent.get(parent).map(Vec::as_slice).unwrap_or(&[])
    }

    fn parents_of(&self, child: &ClassId) -> &[ClassId] {
        self.by_child.get(child).map(Vec::as_slice).unwrap_or(&[])
    }
}

pub struct SubPatternEngine;

impl SubPatternEngine {
    pub fn derive(graph: &RelationGraph) -> SubPatternSets {
        let inh = InheritanceIndex::build(graph.inheritance());

        let sagg = Self::sagg(graph);
        let sass = Self::sass(graph, &sagg);

        SubPatternSets {
            ica: Self::ica(graph),
            ci: Self::ci(&inh),
            iagg: Self::iagg(graph),
            ipag: Self::ipag(graph),
            mli: Self::mli(&inh),
            iass: Self::iass(graph),
            sagg,
            iiagg: Self::iiagg(graph, &inh),
            sass,
            icd: Self::icd(graph),
            dci: Self::dci(graph),
            ipas: Self::ipas(graph),
            agpi: Self::agpi(graph),
            ipd: Self::ipd(graph),
            dpi: Self::dpi(graph),
        }
    }

    /// ICA: p→c in I, and (h,c) in A.
    fn ica(graph: &RelationGraph) -> HashSet<C3> {
        let mut out = HashSet::new();
        for (p, c) in graph.inheritance() {
            for (h, target) in graph.association() {
                if target == c {
                    out.insert((p.clone(), c.clone(), h.clone()));
                }
            }
        }
        out
    }

    /// CI: (p,c1),(p,c2) in I, c1≠c2; symmetric pairs {c1,c2} collapsed to
    /// one representative per parent by sorting the child slots.
    fn ci(inh: &InheritanceIndex) -> HashSet<C3> {
        let mut out = HashSet::new();
        for (parent, children) in &inh.by_parent {
            for i in 0..children.len() {
                for j in (i + 1)..children.len() {
                    let c1 = &children[i];
                    let c2 = &children[j];
                    if c1 == c2 {
                        continue;
                    }
                    let (lo, hi) = if c1 <= c2 {
                        (c1.clone(), c2.clone())
                    } else {
                        (c2.clone(), c1.clone())
                    };
                    out.insert((parent.clone(), lo, hi));
                }
            }
        }
        out
    }

    /// IAGG: (p,c) in I and (p,c) in G.
    fn iagg(graph: &RelationGraph) -> HashSet<C2> {
        graph
            .inheritance()
            .intersection(graph.aggregation())
            .cloned()
            .collect()
    }

    /// IPAG: (p,c) in I and (p,x) in G with x≠c.
    fn ipag(graph: &RelationGraph) -> HashSet<C3> {
        let mut out = HashSet::new();
        for (p, c) in graph.inheritance() {
            for (whole, x) in graph.aggregation() {
                if whole == p && x != c {
                    out.insert((p.clone(), c.clone(), x.clone()));
                }
            }
        }
        out
    }

    /// MLI: (g,p) in I and (p,c) in I.
    fn mli(inh: &InheritanceIndex) -> HashSet<C3> {
        let mut out = HashSet::new();
        for (grandparent, parents) in &inh.by_parent {
            for parent in parents {
                for child in inh.children_of(parent) {
                    out.insert((grandparent.clone(), parent.clone(), child.clone()));
                }
            }
        }
        out
    }

    /// IASS: (p,c) in I and (c,p) in A.
    fn iass(graph: &RelationGraph) -> HashSet<C2> {
        let mut out = HashSet::new();
        for (p, c) in graph.inheritance() {
            if graph.association().contains(&(c.clone(), p.clone())) {
                out.insert((p.clone(), c.clone()));
            }
        }
        out
    }

    /// SAGG: (x,x) in G.
    fn sagg(graph: &RelationGraph) -> HashSet<C1> {
        graph
            .aggregation()
            .iter()
            .filter(|(a, b)| a == b)
            .map(|(a, _)| (a.clone(),))
            .collect()
    }

    /// IIAGG: (p,c) in I, (c,gc) in I, and (gc,p) in G.
    fn iiagg(graph: &RelationGraph, inh: &InheritanceIndex) -> HashSet<C3> {
        let mut out = HashSet::new();
        for (p, c) in graph.inheritance() {
            for gc in inh.children_of(c) {
                if graph.aggregation().contains(&(gc.clone(), p.clone())) {
                    out.insert((p.clone(), c.clone(), gc.clone()));
                }
            }
        }
        out
    }

    /// SASS: (x,x) in A, minus whatever is already in SAGG. Computed after
    /// both SAGG and the raw self-association set are known, never by
    /// looking SAGG up mid-loop.
    fn sass(graph: &RelationGraph, sagg: &HashSet<C1>) -> HashSet<C1> {
        graph
            .association()
            .iter()
            .filter(|(a, b)| a == b)
            .map(|(a, _)| (a.clone(),))
            .filter(|x| !sagg.contains(x))
            .collect()
    }

    /// ICD: (p,c) in I and (d,c) in D.
    fn icd(graph: &RelationGraph) -> HashSet<C3> {
        let mut out = HashSet::new();
        for (p, c) in graph.inheritance() {
            for (d, used) in graph.dependency() {
                if used == c {
                    out.insert((p.clone(), c.clone(), d.clone()));
                }
            }
        }
        out
    }

    /// DCI: (p,c) in I and (c,d) in D.
    fn dci(graph: &RelationGraph) -> HashSet<C3> {
        let mut out = HashSet::new();
        for (p, c) in graph.inheritance() {
            for (user, d) in graph.dependency() {
                if user == c {
                    out.insert((p.clone(), c.clone(), d.clone()));
                }
            }
        }
        out
    }

    /// IPAS: (p,c) in I and (h,p) in A.
    fn ipas(graph: &RelationGraph) -> HashSet<C3> {
        let mut out = HashSet::new();
        for (p, c) in graph.inheritance() {
            for (h, target) in graph.association() {
                if target == p {
                    out.insert((p.clone(), c.clone(), h.clone()));
                }
            }
        }
        out
    }

    /// AGPI: (p,c) in I and (w,p) in G.
    fn agpi(graph: &RelationGraph) -> HashSet<C3> {
        let mut out = HashSet::new();
        for (p, c) in graph.inheritance() {
            for (whole, part) in graph.aggregation() {
                if part == p {
                    out.insert((p.clone(), c.clone(), whole.clone()));
                }
            }
        }
        out
    }

    /// IPD: (p,c) in I and (d,p) in D.
    fn ipd(graph: &RelationGraph) -> HashSet<C3> {
        let mut out = HashSet::new();
        for (p, c) in graph.inheritance() {
            for (user, used) in graph.dependency() {
                if used == p {
                    out.insert((p.clone(), c.clone(), user.clone()));
                }
            }
        }
        out
    }

    /// DPI: (p,c) in I and (p,t) in D.
    fn dpi(graph: &RelationGraph) -> HashSet<C3> {
        let mut out = HashSet::new();
        for (p, c) in graph.inheritance() {
            for (user, t) in graph.dependency() {
                if user == p {
                    out.insert((p.clone(), c.clone(), t.clone()));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cid(s: &str) -> ClassId {
        ClassId::from(s)
    }

    #[test]
    fn empty_graph_has_empty_sub_patterns() {
        let g = RelationGraph::default();
        let sp = SubPatternEngine::derive(&g);
        assert!(sp.ica.is_empty());
        assert!(sp.ci.is_empty());
        assert!(sp.iagg.is_empty());
        assert!(sp.ipag.is_empty());
        assert!(sp.mli.is_empty());
        assert!(sp.iass.is_empty());
        assert!(sp.sagg.is_empty());
        assert!(sp.iiagg.is_empty());
        assert!(sp.sass.is_empty());
        assert!(sp.icd.is_empty());
        assert!(sp.dci.is_empty());
        assert!(sp.ipas.is_empty());
        assert!(sp.agpi.is_empty());
        assert!(sp.ipd.is_empty());
        assert!(sp.dpi.is_empty());
    }

    #[test]
    fn single_self_association_yields_only_sass() {
        let mut b = RelationGraph::builder();
        b.associate("X", "X");
        let g = b.build();
        let sp = SubPatternEngine::derive(&g);
        assert_eq!(sp.sass, HashSet::from([(cid("X"),)]));
        assert!(sp.sagg.is_empty());
        assert!(sp.ci.is_empty());
    }

    #[test]
    fn single_inheritance_edge_needs_a_sibling_for_ci() {
        let mut b = RelationGraph::builder();
        b.inherit("P", "C");
        let g = b.build();
        let sp = SubPatternEngine::derive(&g);
        assert!(sp.ci.is_empty());
        assert!(sp.ica.is_empty());
    }

    #[test]
    fn ci_is_canonical_and_symmetric_per_parent() {
        let mut b = RelationGraph::builder();
        b.inherit("P", "A");
        b.inherit("P", "B");
        let g = b.build();
        let sp = SubPatternEngine::derive(&g);
        assert_eq!(sp.ci.len(), 1);
        let tuple = sp.ci.iter().next().unwrap();
        assert_eq!(tuple.0, cid("P"));
        assert_eq!(
            (tuple.1.clone(), tuple.2.clone()),
            (cid("A"), cid("B"))
        );
    }

    #[test]
    fn ci_dedups_three_siblings_into_three_pairs() {
        let mut b = RelationGraph::builder();
        b.inherit("P", "A");
        b.inherit("P", "B");
        b.inherit("P", "C");
        let g = b.build();
        let sp = SubPatternEngine::derive(&g);
        // {A,B}, {A,C}, {B,C} — exactly 3 unordered pairs.
        assert_eq!(sp.ci.len(), 3);
    }

    #[test]
    fn adapter_witness_is_ica_not_in_ci() {
        let mut b = RelationGraph::builder();
        b.inherit("P", "A");
        b.inherit("P", "B");
        b.associate("H", "A");
        let g = b.build();
        let sp = SubPatternEngine::derive(&g);
        assert_eq!(sp.ica, HashSet::from([(cid("P"), cid("A"), cid("H"))]));
        assert!(!sp.ci.contains(&(cid("P"), cid("A"), cid("H"))));
    }

    #[test]
    fn sass_excludes_sagg() {
        let mut b = RelationGraph::builder();
        b.associate("X", "X");
        b.aggregate("X", "X");
        let g = b.build();
        let sp = SubPatternEngine::derive(&g);
        assert_eq!(sp.sagg, HashSet::from([(cid("X"),)]));
        assert!(sp.sass.is_empty());
    }

    #[test]
    fn decorator_scenario_produces_expected_sub_patterns() {
        let mut b = RelationGraph::builder();
        b.inherit("Comp", "ConcA");
        b.inherit("Comp", "Dec");
        b.inherit("Dec", "DecA");
        b.aggregate("Comp", "Dec");
        let g = b.build();
        let sp = SubPatternEngine::derive(&g);
        assert_eq!(
            sp.mli,
            HashSet::from([(cid("Comp"), cid("Dec"), cid("DecA"))])
        );
        assert_eq!(sp.iagg, HashSet::from([(cid("Comp"), cid("Dec"))]));
        assert_eq!(sp.ci.len(), 1);
        let tuple = sp.ci.iter().next().unwrap();
        assert_eq!(tuple.0, cid("Comp"));
    }

    #[test]
    fn facade_scenario_produces_three_icd_tuples() {
        let mut b = RelationGraph::builder();
        b.inherit("P", "C");
        b.depend("S1", "C");
        b.depend("S2", "C");
        b.depend("S3", "C");
        let g = b.build();
        let sp = SubPatternEngine::derive(&g);
        assert_eq!(
            sp.icd,
            HashSet::from([
                (cid("P"), cid("C"), cid("S1")),
                (cid("P"), cid("C"), cid("S2")),
                (cid("P"), cid("C"), cid("S3")),
            ])
        );
    }
}
