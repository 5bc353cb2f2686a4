//! Word alignment models (IBM Models 1, 2 and 3)
//!
//! All models are trained with expectation maximization on a sentence-aligned
//! corpus. Each model is seeded from the one below it. The trained lexical probabilities `t(source | target)` are exported
//! as a [`TranslationTable`]; the NULL target used during training is not
//! exported.

use std::collections::HashMap;

use codemix_config::constants::smt::MAX_FERTILITY;
use codemix_config::AlignmentAlgorithm;

/// Probabilities never drop below this floor
pub const MIN_PROB: f64 = 1.0e-12;

/// Target id reserved for the NULL word
const NULL: usize = 0;

/// Lexical translation probabilities: source unit -> target unit -> probability
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    entries: HashMap<String, HashMap<String, f64>>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: impl Into<String>, target: impl Into<String>, probability: f64) {
        self.entries
            .entry(source.into())
            .or_default()
            .insert(target.into(), probability);
    }

    /// Candidate targets for a source unit
    pub fn candidates(&self, source: &str) -> Option<&HashMap<String, f64>> {
        self.entries.get(source)
    }

    pub fn probability(&self, source: &str, target: &str) -> Option<f64> {
        self.entries.get(source)?.get(target).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &HashMap<String, f64>)> {
        self.entries.iter()
    }

    /// Number of source units
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Train the chosen alignment model and export its translation table
pub fn train_alignment(
    algorithm: AlignmentAlgorithm,
    corpus: &[(Vec<String>, Vec<String>)],
    iterations: usize,
) -> TranslationTable {
    let indexed = IndexedCorpus::new(corpus);
    let table = match algorithm {
        AlignmentAlgorithm::Ibm1 => {
            let mut model = Ibm1::new(&indexed);
            for _ in 0..iterations {
                model.train_iteration(&indexed);
            }
            model.t
        }
        AlignmentAlgorithm::Ibm2 => {
            let mut model = Ibm2::new(&indexed, iterations);
            for _ in 0..iterations {
                model.train_iteration(&indexed);
            }
            model.t
        }
        AlignmentAlgorithm::Ibm3 => {
            let mut model = Ibm3::new(&indexed, iterations);
            for _ in 0..iterations {
                model.train_iteration(&indexed);
            }
            model.t
        }
    };
    indexed.export(&table)
}

/// Interned vocabulary
#[derive(Debug, Default)]
struct Lexicon {
    ids: HashMap<String, usize>,
    words: Vec<String>,
}

impl Lexicon {
    fn intern(&mut self, word: &str) -> usize {
        if let Some(&id) = self.ids.get(word) {
            return id;
        }
        let id = self.words.len();
        self.words.push(word.to_string());
        self.ids.insert(word.to_string(), id);
        id
    }
}

/// Corpus with units replaced by ids; target id 0 is NULL
struct IndexedCorpus {
    pairs: Vec<(Vec<usize>, Vec<usize>)>,
    source: Lexicon,
    target: Lexicon,
}

impl IndexedCorpus {
    fn new(corpus: &[(Vec<String>, Vec<String>)]) -> Self {
        let mut source = Lexicon::default();
        let mut target = Lexicon::default();
        target.intern("<null>");

        let pairs = corpus
            .iter()
            .map(|(src, tgt)| {
                let src_ids = src.iter().map(|w| source.intern(w)).collect();
                let mut tgt_ids = Vec::with_capacity(tgt.len() + 1);
                tgt_ids.push(NULL);
                tgt_ids.extend(tgt.iter().map(|w| target.intern(w)));
                (src_ids, tgt_ids)
            })
            .collect();

        Self {
            pairs,
            source,
            target,
        }
    }

    fn export(&self, t: &HashMap<(usize, usize), f64>) -> TranslationTable {
        let mut table = TranslationTable::new();
        for (&(s, tgt), &p) in t {
            if tgt == NULL {
                continue;
            }
            table.insert(
                self.source.words[s].clone(),
                self.target.words[tgt].clone(),
                p,
            );
        }
        table
    }
}

/// IBM Model 1: lexical translation probabilities only
struct Ibm1 {
    t: HashMap<(usize, usize), f64>,
}

impl Ibm1 {
    fn new(corpus: &IndexedCorpus) -> Self {
        let initial = 1.0 / corpus.source.words.len().max(1) as f64;
        let mut t = HashMap::new();
        for (src, tgt) in &corpus.pairs {
            for &s in src {
                for &w in tgt {
                    t.insert((s, w), initial);
                }
            }
        }
        Self { t }
    }

    fn prob(&self, s: usize, w: usize) -> f64 {
        self.t.get(&(s, w)).copied().unwrap_or(MIN_PROB)
    }

    fn train_iteration(&mut self, corpus: &IndexedCorpus) {
        let mut counts: HashMap<(usize, usize), f64> = HashMap::new();
        let mut totals = vec![0.0; corpus.target.words.len()];

        for (src, tgt) in &corpus.pairs {
            for &s in src {
                let norm: f64 = tgt.iter().map(|&w| self.prob(s, w)).sum();
                for &w in tgt {
                    let count = self.prob(s, w) / norm;
                    *counts.entry((s, w)).or_insert(0.0) += count;
                    totals[w] += count;
                }
            }
        }

        for ((s, w), count) in counts {
            self.t.insert((s, w), (count / totals[w]).max(MIN_PROB));
        }
    }
}

/// Key for alignment probabilities: (target position, source position,
/// target length, source length); target position 0 is NULL
type AlignmentKey = (usize, usize, usize, usize);

/// IBM Model 2: lexical probabilities plus alignment probabilities
struct Ibm2 {
    t: HashMap<(usize, usize), f64>,
    a: HashMap<AlignmentKey, f64>,
}

impl Ibm2 {
    /// Lexical probabilities are bootstrapped from IBM Model 1
    fn new(corpus: &IndexedCorpus, iterations: usize) -> Self {
        let mut ibm1 = Ibm1::new(corpus);
        for _ in 0..2 * iterations {
            ibm1.train_iteration(corpus);
        }

        let mut a = HashMap::new();
        for (src, tgt) in &corpus.pairs {
            let l = tgt.len() - 1;
            let m = src.len();
            let initial = 1.0 / (l + 1) as f64;
            for j in 1..=m {
                for i in 0..=l {
                    a.insert((i, j, l, m), initial);
                }
            }
        }

        Self { t: ibm1.t, a }
    }

    fn prob(&self, s: usize, w: usize) -> f64 {
        self.t.get(&(s, w)).copied().unwrap_or(MIN_PROB)
    }

    fn alignment(&self, key: AlignmentKey) -> f64 {
        self.a.get(&key).copied().unwrap_or(MIN_PROB)
    }

    fn train_iteration(&mut self, corpus: &IndexedCorpus) {
        let mut counts_t: HashMap<(usize, usize), f64> = HashMap::new();
        let mut totals_t = vec![0.0; corpus.target.words.len()];
        let mut counts_a: HashMap<AlignmentKey, f64> = HashMap::new();
        let mut totals_a: HashMap<(usize, usize, usize), f64> = HashMap::new();

        for (src, tgt) in &corpus.pairs {
            let l = tgt.len() - 1;
            let m = src.len();
            for (j, &s) in src.iter().enumerate().map(|(j, s)| (j + 1, s)) {
                let norm: f64 = tgt
                    .iter()
                    .enumerate()
                    .map(|(i, &w)| self.prob(s, w) * self.alignment((i, j, l, m)))
                    .sum();
                for (i, &w) in tgt.iter().enumerate() {
                    let count = self.prob(s, w) * self.alignment((i, j, l, m)) / norm;
                    *counts_t.entry((s, w)).or_insert(0.0) += count;
                    totals_t[w] += count;
                    *counts_a.entry((i, j, l, m)).or_insert(0.0) += count;
                    *totals_a.entry((j, l, m)).or_insert(0.0) += count;
                }
            }
        }

        for ((s, w), count) in counts_t {
            self.t.insert((s, w), (count / totals_t[w]).max(MIN_PROB));
        }
        for ((i, j, l, m), count) in counts_a {
            let total = totals_a[&(j, l, m)];
            self.a.insert((i, j, l, m), (count / total).max(MIN_PROB));
        }
    }
}

/// Key for distortion probabilities: (source position, target position,
/// target length, source length)
type DistortionKey = (usize, usize, usize, usize);

/// Key for fertility probabilities: (fertility, target id)
type FertilityKey = (usize, usize);

/// IBM Model 3: adds fertility, distortion and NULL insertion
///
/// Summing over every alignment is intractable, so each iteration collects
/// counts from the neighbourhood of a hill-climbed best alignment.
struct Ibm3 {
    t: HashMap<(usize, usize), f64>,
    /// IBM Model 2 alignment probabilities, used to pick the starting alignment
    a: HashMap<AlignmentKey, f64>,
    d: HashMap<DistortionKey, f64>,
    n: HashMap<FertilityKey, f64>,
    /// Probability of inserting a NULL-aligned source unit
    p1: f64,
}

impl Ibm3 {
    /// Lexical and alignment probabilities are bootstrapped from IBM Model 2
    fn new(corpus: &IndexedCorpus, iterations: usize) -> Self {
        let mut ibm2 = Ibm2::new(corpus, iterations);
        for _ in 0..iterations {
            ibm2.train_iteration(corpus);
        }

        let mut d = HashMap::new();
        for (src, tgt) in &corpus.pairs {
            let l = tgt.len() - 1;
            let m = src.len();
            let initial = 1.0 / m.max(1) as f64;
            for j in 1..=m {
                for i in 1..=l {
                    d.insert((j, i, l, m), initial);
                }
            }
        }

        let initial = 1.0 / (MAX_FERTILITY + 1) as f64;
        let mut n = HashMap::new();
        for w in 1..corpus.target.words.len() {
            for phi in 0..=MAX_FERTILITY {
                n.insert((phi, w), initial);
            }
        }

        Self {
            t: ibm2.t,
            a: ibm2.a,
            d,
            n,
            p1: 0.5,
        }
    }

    fn prob(&self, s: usize, w: usize) -> f64 {
        self.t.get(&(s, w)).copied().unwrap_or(MIN_PROB)
    }

    fn alignment(&self, key: AlignmentKey) -> f64 {
        self.a.get(&key).copied().unwrap_or(MIN_PROB)
    }

    fn distortion(&self, key: DistortionKey) -> f64 {
        self.d.get(&key).copied().unwrap_or(MIN_PROB)
    }

    fn fertility(&self, phi: usize, w: usize) -> f64 {
        self.n.get(&(phi, w)).copied().unwrap_or(MIN_PROB)
    }

    /// Log-probability of `src` given `tgt` under one alignment, where
    /// `alignment[j]` is the target position of source unit `j`
    fn log_probability(&self, src: &[usize], tgt: &[usize], alignment: &[usize]) -> f64 {
        let l = tgt.len() - 1;
        let m = src.len();

        let fertility = fertilities(alignment, l);
        let null_fertility = fertility[NULL];
        if 2 * null_fertility > m {
            return f64::NEG_INFINITY;
        }

        let mut log_p = ln_binomial(m - null_fertility, null_fertility)
            + null_fertility as f64 * self.p1.ln()
            + (m - 2 * null_fertility) as f64 * (1.0 - self.p1).ln();

        for i in 1..=l {
            log_p += ln_factorial(fertility[i]) + self.fertility(fertility[i], tgt[i]).ln();
        }
        for (j, (&s, &i)) in src.iter().zip(alignment).enumerate() {
            log_p += self.prob(s, tgt[i]).ln();
            if i != NULL {
                log_p += self.distortion((j + 1, i, l, m)).ln();
            }
        }
        log_p
    }

    /// Most probable alignment under the IBM Model 2 parameters
    fn best_ibm2_alignment(&self, src: &[usize], tgt: &[usize]) -> Vec<usize> {
        let l = tgt.len() - 1;
        let m = src.len();
        src.iter()
            .enumerate()
            .map(|(j, &s)| {
                let score = |i: usize| self.prob(s, tgt[i]) * self.alignment((i, j + 1, l, m));
                (0..=l)
                    .max_by(|&x, &y| score(x).total_cmp(&score(y)))
                    .unwrap_or(NULL)
            })
            .collect()
    }

    /// Greedily follow the best move or swap until none improves
    fn hill_climb(&self, src: &[usize], tgt: &[usize], mut alignment: Vec<usize>) -> Vec<usize> {
        let l = tgt.len() - 1;
        let mut best = self.log_probability(src, tgt, &alignment);
        loop {
            let candidate = neighbours(&alignment, l)
                .into_iter()
                .map(|a| {
                    let p = self.log_probability(src, tgt, &a);
                    (a, p)
                })
                .max_by(|x, y| x.1.total_cmp(&y.1));
            match candidate {
                Some((a, p)) if p > best => {
                    alignment = a;
                    best = p;
                }
                _ => return alignment,
            }
        }
    }

    fn train_iteration(&mut self, corpus: &IndexedCorpus) {
        let vocab = corpus.target.words.len();
        let mut counts_t: HashMap<(usize, usize), f64> = HashMap::new();
        let mut totals_t = vec![0.0; vocab];
        let mut counts_d: HashMap<DistortionKey, f64> = HashMap::new();
        let mut totals_d: HashMap<(usize, usize, usize), f64> = HashMap::new();
        let mut counts_n: HashMap<FertilityKey, f64> = HashMap::new();
        let mut totals_n = vec![0.0; vocab];
        let (mut count_p0, mut count_p1) = (0.0, 0.0);

        for (src, tgt) in &corpus.pairs {
            let l = tgt.len() - 1;
            let m = src.len();

            let best = self.hill_climb(src, tgt, self.best_ibm2_alignment(src, tgt));
            let mut samples = neighbours(&best, l);
            samples.push(best);

            let scored: Vec<(Vec<usize>, f64)> = samples
                .into_iter()
                .map(|a| {
                    let p = self.log_probability(src, tgt, &a);
                    (a, p)
                })
                .filter(|(_, p)| p.is_finite())
                .collect();
            let Some(max) = scored.iter().map(|(_, p)| *p).max_by(f64::total_cmp) else {
                continue;
            };
            let weights: Vec<f64> = scored.iter().map(|(_, p)| (p - max).exp()).collect();
            let norm: f64 = weights.iter().sum();

            for ((alignment, _), weight) in scored.iter().zip(weights) {
                let weight = weight / norm;
                for (j, (&s, &i)) in src.iter().zip(alignment).enumerate() {
                    *counts_t.entry((s, tgt[i])).or_insert(0.0) += weight;
                    totals_t[tgt[i]] += weight;
                    if i != NULL {
                        *counts_d.entry((j + 1, i, l, m)).or_insert(0.0) += weight;
                        *totals_d.entry((i, l, m)).or_insert(0.0) += weight;
                    }
                }

                let fertility = fertilities(alignment, l);
                for i in 1..=l {
                    *counts_n.entry((fertility[i], tgt[i])).or_insert(0.0) += weight;
                    totals_n[tgt[i]] += weight;
                }
                let null_fertility = fertility[NULL] as f64;
                count_p1 += null_fertility * weight;
                count_p0 += (m as f64 - 2.0 * null_fertility) * weight;
            }
        }

        for ((s, w), count) in counts_t {
            self.t.insert((s, w), (count / totals_t[w]).max(MIN_PROB));
        }
        for (key @ (_, i, l, m), count) in counts_d {
            let total = totals_d[&(i, l, m)];
            self.d.insert(key, (count / total).max(MIN_PROB));
        }
        for ((phi, w), count) in counts_n {
            self.n.insert((phi, w), (count / totals_n[w]).max(MIN_PROB));
        }
        if count_p0 + count_p1 > 0.0 {
            self.p1 = (count_p1 / (count_p0 + count_p1)).clamp(MIN_PROB, 1.0 - MIN_PROB);
        }
    }
}

/// Number of source units aligned to each target position
fn fertilities(alignment: &[usize], l: usize) -> Vec<usize> {
    let mut fertility = vec![0; l + 1];
    for &i in alignment {
        fertility[i] += 1;
    }
    fertility
}

/// Every alignment one move or one swap away from `alignment`
fn neighbours(alignment: &[usize], l: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    for j in 0..alignment.len() {
        for i in (0..=l).filter(|&i| i != alignment[j]) {
            let mut moved = alignment.to_vec();
            moved[j] = i;
            out.push(moved);
        }
    }
    for j1 in 0..alignment.len() {
        for j2 in j1 + 1..alignment.len() {
            if alignment[j1] != alignment[j2] {
                let mut swapped = alignment.to_vec();
                swapped.swap(j1, j2);
                out.push(swapped);
            }
        }
    }
    out
}

fn ln_factorial(k: usize) -> f64 {
    (2..=k).map(|x| (x as f64).ln()).sum()
}

fn ln_binomial(n: usize, k: usize) -> f64 {
    ln_factorial(n) - ln_factorial(k) - ln_factorial(n - k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sent(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn corpus() -> Vec<(Vec<String>, Vec<String>)> {
        vec![
            (sent("sy mau makan"), sent("saya mau makan")),
            (sent("sy mau minum"), sent("saya mau minum")),
            (sent("gw mau tidur"), sent("saya mau tidur")),
            (sent("sy lapar"), sent("saya lapar")),
        ]
    }

    fn best_target(table: &TranslationTable, source: &str) -> String {
        table
            .candidates(source)
            .unwrap()
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(t, _)| t.clone())
            .unwrap()
    }

    #[test]
    fn test_ibm1_learns_slang_mapping() {
        let table = train_alignment(AlignmentAlgorithm::Ibm1, &corpus(), 10);
        assert_eq!(best_target(&table, "sy"), "saya");
        assert_eq!(best_target(&table, "mau"), "mau");
        assert_eq!(best_target(&table, "lapar"), "lapar");
    }

    #[test]
    fn test_ibm2_learns_slang_mapping() {
        let table = train_alignment(AlignmentAlgorithm::Ibm2, &corpus(), 5);
        assert_eq!(best_target(&table, "sy"), "saya");
        assert_eq!(best_target(&table, "makan"), "makan");
    }

    #[test]
    fn test_ibm3_learns_slang_mapping() {
        let table = train_alignment(AlignmentAlgorithm::Ibm3, &corpus(), 5);
        assert_eq!(best_target(&table, "sy"), "saya");
        assert_eq!(best_target(&table, "makan"), "makan");
        assert_eq!(best_target(&table, "lapar"), "lapar");
        for (_, candidates) in table.iter() {
            assert!(!candidates.contains_key("<null>"));
            assert!(candidates.values().all(|&p| p >= MIN_PROB && p <= 1.0 + 1e-9));
        }
    }

    #[test]
    fn test_neighbours_cover_moves_and_swaps() {
        // 2 source units, 2 target words plus NULL: 2 * 2 moves and 1 swap
        let all = neighbours(&[1, 2], 2);
        assert_eq!(all.len(), 5);
        assert!(all.contains(&vec![2, 1]));
        assert!(all.contains(&vec![0, 2]));
        assert!(!all.contains(&vec![1, 2]));
    }

    #[test]
    fn test_ln_binomial() {
        assert!((ln_binomial(4, 2) - 6f64.ln()).abs() < 1e-12);
        assert_eq!(ln_binomial(3, 0), 0.0);
    }

    #[test]
    fn test_null_is_not_exported() {
        let table = train_alignment(AlignmentAlgorithm::Ibm1, &corpus(), 3);
        for (_, candidates) in table.iter() {
            assert!(!candidates.contains_key("<null>"));
        }
    }

    #[test]
    fn test_probabilities_respect_floor() {
        let table = train_alignment(AlignmentAlgorithm::Ibm1, &corpus(), 10);
        for (_, candidates) in table.iter() {
            for &p in candidates.values() {
                assert!(p >= MIN_PROB);
                assert!(p <= 1.0 + 1e-9);
            }
        }
    }

    #[test]
    fn test_empty_corpus() {
        let table = train_alignment(AlignmentAlgorithm::Ibm2, &[], 3);
        assert!(table.is_empty());
        let table = train_alignment(AlignmentAlgorithm::Ibm3, &[], 3);
        assert!(table.is_empty());
    }
}
