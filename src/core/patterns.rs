//! `PatternDetector` — derives the twenty-three Gang-of-Four pattern
//! occurrence sets from the sub-pattern tuples (spec §4.3).
//!
//! Each rule below is a direct transcription of the witness shape and
//! equality constraints it implements; the comment above each function
//! names the pattern and restates its shape so the join can be checked
//! against it line by line. A few rules correct ambiguous or buggy idioms
//! in older descriptions of this analysis (precedence-ambiguous `x and y in
//! S`, an always-true `IASS` disjunction in `Proxy`, `Composite`'s third
//! witness recording the wrong tuple) — the versions here implement the
//! restated, unambiguous semantics, not the buggy ones.

use std::collections::BTreeMap;

use serde::Serialize;

use super::ids::ClassId;
use super::subpatterns::{SubPatternSets, C1, C2, C3};

/// One sub-pattern tuple, tagged by its arity, so a [`PatternOccurrence`]
/// can bundle witnesses of different shapes uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Witness {
    One(C1),
    Two(C2),
    Three(C3),
}

impl From<C1> for Witness {
    fn from(t: C1) -> Self {
        Witness::One(t)
    }
}

impl From<C2> for Witness {
    fn from(t: C2) -> Self {
        Witness::Two(t)
    }
}

impl From<C3> for Witness {
    fn from(t: C3) -> Self {
        Witness::Three(t)
    }
}

/// A labeled bundle of sub-pattern tuples witnessing one occurrence of a
/// design pattern at specific classes. Equality is structural: two
/// occurrences are the same iff they bundle the same labeled witnesses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PatternOccurrence {
    pub witnesses: Vec<(String, Witness)>,
}

impl PatternOccurrence {
    fn new(witnesses: Vec<(String, Witness)>) -> Self {
        Self { witnesses }
    }

    /// Every class identifier appearing in any witness tuple, flattened.
    pub fn classes(&self) -> std::collections::HashSet<ClassId> {
        let mut out = std::collections::HashSet::new();
        for (_, witness) in &self.witnesses {
            match witness {
                Witness::One((a,)) => {
                    out.insert(a.clone());
                }
                Witness::Two((a, b)) => {
                    out.insert(a.clone());
                    out.insert(b.clone());
                }
                Witness::Three((a, b, c)) => {
                    out.insert(a.clone());
                    out.insert(b.clone());
                    out.insert(c.clone());
                }
            }
        }
        out
    }
}

pub type PatternOccurrences = BTreeMap<&'static str, Vec<PatternOccurrence>>;

/// Appends `occ` to `out` only if an identical record is not already present.
fn push_unique(out: &mut Vec<PatternOccurrence>, occ: PatternOccurrence) {
    if !out.contains(&occ) {
        out.push(occ);
    }
}

pub struct PatternDetector;

impl PatternDetector {
    pub fn detect(sp: &SubPatternSets) -> PatternOccurrences {
        let mut out = PatternOccurrences::new();
        out.insert("Singleton", Self::singleton(sp));
        out.insert("Template", Self::template(sp));
        out.insert("Composite", Self::composite(sp));
        out.insert("Adapter", Self::adapter(sp));
        out.insert("Bridge", Self::bridge(sp));
        out.insert("Proxy", Self::proxy(sp));
        out.insert("Decorator", Self::decorator(sp));
        out.insert("Flyweight", Self::flyweight(sp));
        out.insert("Facade", Self::facade(sp));
        out.insert("AbstractFactory", Self::abstract_factory(sp));
        out.insert("Builder", Self::builder(sp));
        out.insert("Factory", Self::factory(sp));
        out.insert("Prototype", Self::prototype(sp));
        out.insert("ChainOfResponsibility", Self::chain_of_responsibility(sp));
        out.insert("Command", Self::command(sp));
        out.insert("Interpreter", Self::interpreter(sp));
        out.insert("Iterator", Self::iterator(sp));
        out.insert("Mediator", Self::mediator(sp));
        out.insert("Memento", Self::memento(sp));
        out.insert("Observer", Self::observer(sp));
        out.insert("State", Self::state(sp));
        out.insert("Strategy", Self::strategy(sp));
        out.insert("Visitor", Self::visitor(sp));
        out
    }

    /// Singleton: every `s ∈ SASS` witnesses `{SASS: s}`.
    fn singleton(sp: &SubPatternSets) -> Vec<PatternOccurrence> {
        sp.sass
            .iter()
            .map(|s| PatternOccurrence::new(vec![("SASS".to_string(), s.clone().into())]))
            .collect()
    }

    /// Template: every `ci ∈ CI` witnesses `{CI: ci}`.
    fn template(sp: &SubPatternSets) -> Vec<PatternOccurrence> {
        sp.ci
            .iter()
            .map(|ci| PatternOccurrence::new(vec![("CI".to_string(), ci.clone().into())]))
            .collect()
    }

    /// Composite has three independent witness shapes:
    /// (a) every `sagg ∈ SAGG`;
    /// (b) `ci ∈ CI`, `iagg ∈ IAGG`, where the `IAGG` child — `iagg.1` if
    ///     `iagg.0 == ci.0` else `iagg.0` — is one of `ci`'s two children;
    /// (c) `ci ∈ CI`, `iiagg ∈ IIAGG` with `iiagg.2 ∈ {ci.1, ci.2}`.
    fn composite(sp: &SubPatternSets) -> Vec<PatternOccurrence> {
        let mut out = Vec::new();
        for sagg in &sp.sagg {
            push_unique(
                &mut out,
                PatternOccurrence::new(vec![("SAGG".to_string(), sagg.clone().into())]),
            );
        }
        for ci in &sp.ci {
            for iagg in &sp.iagg {
                let chosen = if iagg.0 == ci.0 { &iagg.1 } else { &iagg.0 };
                if *chosen == ci.1 || *chosen == ci.2 {
                    push_unique(
                        &mut out,
                        PatternOccurrence::new(vec![
                            ("CI".to_string(), ci.clone().into()),
                            ("IAGG".to_string(), iagg.clone().into()),
                        ]),
                    );
                }
            }
            for iiagg in &sp.iiagg {
                if iiagg.2 == ci.1 || iiagg.2 == ci.2 {
                    push_unique(
                        &mut out,
                        PatternOccurrence::new(vec![
                            ("CI".to_string(), ci.clone().into()),
                            ("IIAGG".to_string(), iiagg.clone().into()),
                        ]),
                    );
                }
            }
        }
        out
    }

    /// Adapter: every `ica ∈ ICA` not also present (as the same triple) in `CI`.
    fn adapter(sp: &SubPatternSets) -> Vec<PatternOccurrence> {
        sp.ica
            .iter()
            .filter(|ica| !sp.ci.contains(*ica))
            .map(|ica| PatternOccurrence::new(vec![("ICA".to_string(), ica.clone().into())]))
            .collect()
    }

    /// Bridge: `ci ∈ CI`, `ipag ∈ IPAG`, `ci.0 == ipag.2`, and neither of
    /// `ci`'s children appears anywhere in `ipag`.
    fn bridge(sp: &SubPatternSets) -> Vec<PatternOccurrence> {
        let mut out = Vec::new();
        for ci in &sp.ci {
            for ipag in &sp.ipag {
                if ci.0 != ipag.2 {
                    continue;
                }
                let in_ipag = |x: &ClassId| *x == ipag.0 || *x == ipag.1 || *x == ipag.2;
                if !in_ipag(&ci.1) && !in_ipag(&ci.2) {
                    out.push(PatternOccurrence::new(vec![
                        ("CI".to_string(), ci.clone().into()),
                        ("IPAG".to_string(), ipag.clone().into()),
                    ]));
                }
            }
        }
        out
    }

    /// Proxy: `ci=(s,rs,px) ∈ CI`, matched either via an `ICA` rooted at
    /// `s` that reaches both children, or via an `IASS` rooted at `s` whose
    /// second slot lands on one of the two children.
    fn proxy(sp: &SubPatternSets) -> Vec<PatternOccurrence> {
        let mut out = Vec::new();
        for ci in &sp.ci {
            let (s, rs, px) = ci;
            for ica in &sp.ica {
                if ica.0 == *s {
                    let reaches = |x: &ClassId| ica.1 == *x || ica.2 == *x;
                    if reaches(rs) && reaches(px) {
                        out.push(PatternOccurrence::new(vec![
                            ("CI".to_string(), ci.clone().into()),
                            ("ICA".to_string(), ica.clone().into()),
                        ]));
                    }
                }
            }
            for iass in &sp.iass {
                if iass.0 == *s && (iass.1 == *rs || iass.1 == *px) {
                    out.push(PatternOccurrence::new(vec![
                        ("CI".to_string(), ci.clone().into()),
                        ("IASS".to_string(), iass.clone().into()),
                    ]));
                }
            }
        }
        out
    }

    /// Decorator: `mli=(comp,dec,_) ∈ MLI`, a `ci` rooted at `comp` whose
    /// children include `dec`, and an `iagg=(comp,dec) ∈ IAGG`.
    fn decorator(sp: &SubPatternSets) -> Vec<PatternOccurrence> {
        let mut out = Vec::new();
        for mli in &sp.mli {
            let (comp, dec, _grandchild) = mli;
            for ci in &sp.ci {
                if ci.0 != *comp || (ci.1 != *dec && ci.2 != *dec) {
                    continue;
                }
                for iagg in &sp.iagg {
                    if iagg.0 == *comp && iagg.1 == *dec {
                        out.push(PatternOccurrence::new(vec![
                            ("MLI".to_string(), mli.clone().into()),
                            ("CI".to_string(), ci.clone().into()),
                            ("IAGG".to_string(), iagg.clone().into()),
                        ]));
                    }
                }
            }
        }
        out
    }

    /// Flyweight: `ci ∈ CI`, `agpi=(ci.0,x,w) ∈ AGPI` where `x` is one of
    /// `ci`'s children and `w` is neither.
    fn flyweight(sp: &SubPatternSets) -> Vec<PatternOccurrence> {
        let mut out = Vec::new();
        for ci in &sp.ci {
            for agpi in &sp.agpi {
                if agpi.0 != ci.0 {
                    continue;
                }
                let in_children = |x: &ClassId| *x == ci.1 || *x == ci.2;
                if in_children(&agpi.1) && !in_children(&agpi.2) {
                    out.push(PatternOccurrence::new(vec![
                        ("CI".to_string(), ci.clone().into()),
                        ("AGPI".to_string(), agpi.clone().into()),
                    ]));
                }
            }
        }
        out
    }

    /// Facade: group `ICD` tuples by their shared `(p,c)`; any group with
    /// three or more distinct `d` values witnesses one occurrence bundling
    /// every tuple in the group.
    fn facade(sp: &SubPatternSets) -> Vec<PatternOccurrence> {
        let mut groups: BTreeMap<(ClassId, ClassId), Vec<C3>> = BTreeMap::new();
        for icd in &sp.icd {
            groups
                .entry((icd.0.clone(), icd.1.clone()))
                .or_default()
                .push(icd.clone());
        }
        let mut out = Vec::new();
        for mut tuples in groups.into_values() {
            if tuples.len() < 3 {
                continue;
            }
            tuples.sort();
            let witnesses = tuples
                .into_iter()
                .enumerate()
                .map(|(i, t)| (format!("ICD{i}"), Witness::from(t)))
                .collect();
            out.push(PatternOccurrence::new(witnesses));
        }
        out
    }

    /// AbstractFactory: `icd=(ap,cf,pa) ∈ ICD`, `dci=(ap',pb,cf) ∈ DCI`,
    /// a `ci` rooted at `ap` whose children include both `pa` and `pb`.
    fn abstract_factory(sp: &SubPatternSets) -> Vec<PatternOccurrence> {
        let mut out = Vec::new();
        for icd in &sp.icd {
            let (ap, cf, pa) = icd;
            for dci in &sp.dci {
                if dci.2 != *cf {
                    continue;
                }
                let pb = &dci.1;
                for ci in &sp.ci {
                    if ci.0 != *ap {
                        continue;
                    }
                    let in_children = |x: &ClassId| *x == ci.1 || *x == ci.2;
                    if in_children(pa) && in_children(pb) {
                        out.push(PatternOccurrence::new(vec![
                            ("ICD".to_string(), icd.clone().into()),
                            ("DCI".to_string(), dci.clone().into()),
                            ("CI".to_string(), ci.clone().into()),
                        ]));
                    }
                }
            }
        }
        out
    }

    /// Builder: `ica=(b,cb,pr) ∈ ICA`, `agpi=(b,cb,w) ∈ AGPI` with `w != pr`.
    fn builder(sp: &SubPatternSets) -> Vec<PatternOccurrence> {
        let mut out = Vec::new();
        for ica in &sp.ica {
            let (b, cb, pr) = ica;
            for agpi in &sp.agpi {
                if agpi.0 == *b && agpi.1 == *cb && agpi.2 != *pr {
                    out.push(PatternOccurrence::new(vec![
                        ("ICA".to_string(), ica.clone().into()),
                        ("AGPI".to_string(), agpi.clone().into()),
                    ]));
                }
            }
        }
        out
    }

    /// Factory: `dci=(_,cp,cc) ∈ DCI`, `icd=(p,cc,cp) ∈ ICD` with `p`
    /// absent from the `dci` triple.
    fn factory(sp: &SubPatternSets) -> Vec<PatternOccurrence> {
        let mut out = Vec::new();
        for dci in &sp.dci {
            let (dci0, cp, cc) = dci;
            for icd in &sp.icd {
                if icd.1 != *cc || icd.2 != *cp {
                    continue;
                }
                let in_dci = |x: &ClassId| *x == *dci0 || *x == *cp || *x == *cc;
                if !in_dci(&icd.0) {
                    out.push(PatternOccurrence::new(vec![
                        ("DCI".to_string(), dci.clone().into()),
                        ("ICD".to_string(), icd.clone().into()),
                    ]));
                }
            }
        }
        out
    }

    /// Prototype: `agpi=(pr,cpa,x) ∈ AGPI`, a `ci` rooted at `pr` whose
    /// children include `cpa`, with `x` absent from `ci` entirely.
    fn prototype(sp: &SubPatternSets) -> Vec<PatternOccurrence> {
        let mut out = Vec::new();
        for agpi in &sp.agpi {
            let (pr, cpa, x) = agpi;
            for ci in &sp.ci {
                if ci.0 != *pr || (ci.1 != *cpa && ci.2 != *cpa) {
                    continue;
                }
                if *x != ci.0 && *x != ci.1 && *x != ci.2 {
                    out.push(PatternOccurrence::new(vec![
                        ("AGPI".to_string(), agpi.clone().into()),
                        ("CI".to_string(), ci.clone().into()),
                    ]));
                }
            }
        }
        out
    }

    /// ChainOfResponsibility: `sass ∈ SASS`, `ci ∈ CI`, `sass.0 == ci.0`.
    fn chain_of_responsibility(sp: &SubPatternSets) -> Vec<PatternOccurrence> {
        let mut out = Vec::new();
        for sass in &sp.sass {
            for ci in &sp.ci {
                if sass.0 == ci.0 {
                    out.push(PatternOccurrence::new(vec![
                        ("SASS".to_string(), sass.clone().into()),
                        ("CI".to_string(), ci.clone().into()),
                    ]));
                }
            }
        }
        out
    }

    /// Command: `agpi=(cm,ccm,x) ∈ AGPI`, `ica=(cm,ccm,h) ∈ ICA` with `h != x`.
    fn command(sp: &SubPatternSets) -> Vec<PatternOccurrence> {
        let mut out = Vec::new();
        for agpi in &sp.agpi {
            let (cm, ccm, x) = agpi;
            for ica in &sp.ica {
                if ica.0 == *cm && ica.1 == *ccm && ica.2 != *x {
                    out.push(PatternOccurrence::new(vec![
                        ("AGPI".to_string(), agpi.clone().into()),
                        ("ICA".to_string(), ica.clone().into()),
                    ]));
                }
            }
        }
        out
    }

    /// Interpreter: `iagg=(ae,nt) ∈ IAGG`, `ipd=(ae,_,ct) ∈ IPD`, a `ci`
    /// rooted at `ae` whose children include `nt`, with `ct` absent from
    /// `ci` entirely.
    fn interpreter(sp: &SubPatternSets) -> Vec<PatternOccurrence> {
        let mut out = Vec::new();
        for iagg in &sp.iagg {
            let (ae, nt) = iagg;
            for ipd in &sp.ipd {
                if ipd.0 != *ae {
                    continue;
                }
                let ct = &ipd.2;
                for ci in &sp.ci {
                    if ci.0 != *ae || (ci.1 != *nt && ci.2 != *nt) {
                        continue;
                    }
                    if *ct != ci.0 && *ct != ci.1 && *ct != ci.2 {
                        out.push(PatternOccurrence::new(vec![
                            ("IAGG".to_string(), iagg.clone().into()),
                            ("IPD".to_string(), ipd.clone().into()),
                            ("CI".to_string(), ci.clone().into()),
                        ]));
                    }
                }
            }
        }
        out
    }

    /// Iterator: an `ica` triple that is also present in `DCI`, plus an
    /// `icd` tuple reaching back into it with an outsider first slot.
    fn iterator(sp: &SubPatternSets) -> Vec<PatternOccurrence> {
        let mut out = Vec::new();
        for ica in &sp.ica {
            if !sp.dci.contains(ica) {
                continue;
            }
            let (it, ci_it, cag) = ica;
            for icd in &sp.icd {
                if icd.1 != *cag || icd.2 != *ci_it {
                    continue;
                }
                if icd.0 != *it && icd.0 != *ci_it && icd.0 != *cag {
                    out.push(PatternOccurrence::new(vec![
                        ("ICA".to_string(), ica.clone().into()),
                        ("DCI".to_string(), ica.clone().into()),
                        ("ICD".to_string(), icd.clone().into()),
                    ]));
                }
            }
        }
        out
    }

    /// Mediator: `ica=(med,_,cca) ∈ ICA`, `ipas=(col,ccb,med) ∈ IPAS`, a
    /// `ci` rooted at `col` whose children include both `cca` and `ccb`.
    fn mediator(sp: &SubPatternSets) -> Vec<PatternOccurrence> {
        let mut out = Vec::new();
        for ica in &sp.ica {
            let (med, _ignored, cca) = ica;
            for ipas in &sp.ipas {
                if ipas.2 != *med {
                    continue;
                }
                let (col, ccb, _) = ipas;
                for ci in &sp.ci {
                    if ci.0 != *col {
                        continue;
                    }
                    let in_children = |x: &ClassId| *x == ci.1 || *x == ci.2;
                    if in_children(cca) && in_children(ccb) {
                        out.push(PatternOccurrence::new(vec![
                            ("ICA".to_string(), ica.clone().into()),
                            ("IPAS".to_string(), ipas.clone().into()),
                            ("CI".to_string(), ci.clone().into()),
                        ]));
                    }
                }
            }
        }
        out
    }

    /// Memento: `agpi=(m,mi,x) ∈ AGPI`, `dpi=(m,mi,y) ∈ DPI` with `y != x`.
    fn memento(sp: &SubPatternSets) -> Vec<PatternOccurrence> {
        let mut out = Vec::new();
        for agpi in &sp.agpi {
            let (m, mi, x) = agpi;
            for dpi in &sp.dpi {
                if dpi.0 == *m && dpi.1 == *mi && dpi.2 != *x {
                    out.push(PatternOccurrence::new(vec![
                        ("AGPI".to_string(), agpi.clone().into()),
                        ("DPI".to_string(), dpi.clone().into()),
                    ]));
                }
            }
        }
        out
    }

    /// Observer: `icd=(o,co,cs) ∈ ICD`, `agpi=(o,co,z) ∈ AGPI` with `z != cs`.
    fn observer(sp: &SubPatternSets) -> Vec<PatternOccurrence> {
        let mut out = Vec::new();
        for icd in &sp.icd {
            let (o, co, cs) = icd;
            for agpi in &sp.agpi {
                if agpi.0 == *o && agpi.1 == *co && agpi.2 != *cs {
                    out.push(PatternOccurrence::new(vec![
                        ("ICD".to_string(), icd.clone().into()),
                        ("AGPI".to_string(), agpi.clone().into()),
                    ]));
                }
            }
        }
        out
    }

    /// State: `agpi=(s,cs,_) ∈ AGPI`, a `ci` rooted at `s` whose children
    /// include `cs`. Structurally identical to [`Self::strategy`].
    fn state(sp: &SubPatternSets) -> Vec<PatternOccurrence> {
        Self::state_or_strategy(sp)
    }

    /// Strategy: identical shape to [`Self::state`] — the two patterns are
    /// distinguished only by programmer intent, not by structure.
    fn strategy(sp: &SubPatternSets) -> Vec<PatternOccurrence> {
        Self::state_or_strategy(sp)
    }

    fn state_or_strategy(sp: &SubPatternSets) -> Vec<PatternOccurrence> {
        let mut out = Vec::new();
        for agpi in &sp.agpi {
            let (s, cs, _ignored) = agpi;
            for ci in &sp.ci {
                if ci.0 == *s && (ci.1 == *cs || ci.2 == *cs) {
                    out.push(PatternOccurrence::new(vec![
                        ("AGPI".to_string(), agpi.clone().into()),
                        ("CI".to_string(), ci.clone().into()),
                    ]));
                }
            }
        }
        out
    }

    /// Visitor: `icd=(v,cv,ce) ∈ ICD`, `dpi=(v,cv,t) ∈ DPI`,
    /// `agpi=(t,ce,_) ∈ AGPI`.
    fn visitor(sp: &SubPatternSets) -> Vec<PatternOccurrence> {
        let mut out = Vec::new();
        for icd in &sp.icd {
            let (v, cv, ce) = icd;
            for dpi in &sp.dpi {
                if dpi.0 != *v || dpi.1 != *cv {
                    continue;
                }
                let t = &dpi.2;
                for agpi in &sp.agpi {
                    if agpi.0 == *t && agpi.1 == *ce {
                        out.push(PatternOccurrence::new(vec![
                            ("ICD".to_string(), icd.clone().into()),
                            ("DPI".to_string(), dpi.clone().into()),
                            ("AGPI".to_string(), agpi.clone().into()),
                        ]));
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::RelationGraph;
    use crate::core::subpatterns::SubPatternEngine;
    use std::collections::HashSet;

    fn cid(s: &str) -> ClassId {
        ClassId::from(s)
    }

    #[test]
    fn empty_graph_yields_no_occurrences() {
        let g = RelationGraph::default();
        let sp = SubPatternEngine::derive(&g);
        let occs = PatternDetector::detect(&sp);
        for (_, list) in &occs {
            assert!(list.is_empty());
        }
    }

    /// End-to-end scenario 1: Singleton only.
    #[test]
    fn singleton_only_scenario() {
        let mut b = RelationGraph::builder();
        b.associate("X", "X");
        let g = b.build();
        let sp = SubPatternEngine::derive(&g);
        let occs = PatternDetector::detect(&sp);
        assert_eq!(occs["Singleton"].len(), 1);
        assert_eq!(
            occs["Singleton"][0].witnesses,
            vec![("SASS".to_string(), Witness::One((cid("X"),)))]
        );
        for name in ["Template", "Adapter", "Composite"] {
            assert!(occs[name].is_empty(), "{name} should be empty");
        }
    }

    /// End-to-end scenario 2: Template only.
    #[test]
    fn template_only_scenario() {
        let mut b = RelationGraph::builder();
        b.inherit("P", "A");
        b.inherit("P", "B");
        let g = b.build();
        let sp = SubPatternEngine::derive(&g);
        let occs = PatternDetector::detect(&sp);
        assert_eq!(occs["Template"].len(), 1);
        assert!(occs["Adapter"].is_empty());
    }

    /// End-to-end scenario 3: Adapter vs non-Adapter.
    #[test]
    fn adapter_scenario() {
        let mut b = RelationGraph::builder();
        b.inherit("P", "A");
        b.inherit("P", "B");
        b.associate("H", "A");
        let g = b.build();
        let sp = SubPatternEngine::derive(&g);
        assert_eq!(sp.ica, HashSet::from([(cid("P"), cid("A"), cid("H"))]));
        let occs = PatternDetector::detect(&sp);
        assert_eq!(occs["Adapter"].len(), 1);
        assert_eq!(
            occs["Adapter"][0].witnesses,
            vec![("ICA".to_string(), Witness::Three((cid("P"), cid("A"), cid("H"))))]
        );
    }

    /// End-to-end scenario 4: Composite via SAGG.
    #[test]
    fn composite_via_sagg_scenario() {
        let mut b = RelationGraph::builder();
        b.aggregate("Node", "Node");
        let g = b.build();
        let sp = SubPatternEngine::derive(&g);
        let occs = PatternDetector::detect(&sp);
        assert_eq!(occs["Composite"].len(), 1);
        assert_eq!(
            occs["Composite"][0].witnesses,
            vec![("SAGG".to_string(), Witness::One((cid("Node"),)))]
        );
    }

    /// End-to-end scenario 5: Decorator.
    #[test]
    fn decorator_scenario() {
        let mut b = RelationGraph::builder();
        b.inherit("Comp", "ConcA");
        b.inherit("Comp", "Dec");
        b.inherit("Dec", "DecA");
        b.aggregate("Comp", "Dec");
        let g = b.build();
        let sp = SubPatternEngine::derive(&g);
        let occs = PatternDetector::detect(&sp);
        assert_eq!(occs["Decorator"].len(), 1);
        let witnesses = &occs["Decorator"][0].witnesses;
        assert!(witnesses
            .iter()
            .any(|(label, _)| *label == "MLI"));
        assert!(witnesses.iter().any(|(label, _)| *label == "CI"));
        assert!(witnesses.iter().any(|(label, _)| *label == "IAGG"));
    }

    /// End-to-end scenario 6: Facade.
    #[test]
    fn facade_scenario() {
        let mut b = RelationGraph::builder();
        b.inherit("P", "C");
        b.depend("S1", "C");
        b.depend("S2", "C");
        b.depend("S3", "C");
        let g = b.build();
        let sp = SubPatternEngine::derive(&g);
        let occs = PatternDetector::detect(&sp);
        assert_eq!(occs["Facade"].len(), 1);
        assert_eq!(occs["Facade"][0].witnesses.len(), 3);
    }

    #[test]
    fn state_and_strategy_are_structurally_identical() {
        let mut b = RelationGraph::builder();
        b.inherit("S", "A");
        b.inherit("S", "B");
        b.aggregate("Ctx", "S");
        let g = b.build();
        let sp = SubPatternEngine::derive(&g);
        let occs = PatternDetector::detect(&sp);
        assert_eq!(occs["State"], occs["Strategy"]);
        assert!(!occs["State"].is_empty());
    }

    #[test]
    fn proxy_via_iass_branch() {
        let mut b = RelationGraph::builder();
        b.inherit("S", "RS");
        b.inherit("S", "PX");
        b.associate("RS", "S");
        let g = b.build();
        let sp = SubPatternEngine::derive(&g);
        assert_eq!(sp.iass, HashSet::from([(cid("S"), cid("RS"))]));
        let occs = PatternDetector::detect(&sp);
        assert_eq!(occs["Proxy"].len(), 1);
    }
}
