//! Perfect matching on the odd-degree vertices of the spanning tree.
//!
//! [`min_weight_perfect_matching`] is exact: it runs Edmonds' blossom
//! algorithm (primal-dual, `O(k³)`) for a maximum-cardinality,
//! maximum-weight matching under the weights `W - d(u, v)`. On a complete
//! graph with an even vertex count every maximum-cardinality matching is
//! perfect, so maximising `Σ (W - d)` minimises `Σ d`.
//!
//! Distances are scaled to integers before the search so that dual
//! variables stay exact. The scale maps the largest distance to about
//! `2^40`, which keeps every dual well inside `i64` and loses less than
//! `2^-40` of the largest distance per edge.
//!
//! [`greedy_matching`] is the cheap alternative: the lowest unmatched vertex
//! takes its nearest unmatched partner. It carries no approximation bound.

use tspforge_core::{DistanceMatrix, Result, TspForgeError};

/// Integer image of the largest distance.
const SCALE_TARGET: f64 = (1u64 << 40) as f64;

const NONE: usize = usize::MAX;

/// Exact minimum-weight perfect matching over `vertices`.
///
/// Returns `vertices.len() / 2` pairs of city indices. `vertices` must have
/// even length.
pub fn min_weight_perfect_matching(
    matrix: &DistanceMatrix,
    vertices: &[usize],
) -> Result<Vec<(usize, usize)>> {
    let k = vertices.len();
    if k % 2 != 0 {
        return Err(TspForgeError::Internal(format!(
            "cannot perfectly match {k} vertices"
        )));
    }
    if k == 0 {
        return Ok(Vec::new());
    }
    if k == 2 {
        return Ok(vec![(vertices[0], vertices[1])]);
    }

    let mut max_distance = 0.0f64;
    for (a, &u) in vertices.iter().enumerate() {
        for &v in &vertices[a + 1..] {
            max_distance = max_distance.max(matrix.get(u, v));
        }
    }
    let scale = if max_distance > 0.0 {
        SCALE_TARGET / max_distance
    } else {
        1.0
    };

    let mut scaled = Vec::with_capacity(k * (k - 1) / 2);
    let mut ceiling = 0i64;
    for a in 0..k {
        for b in a + 1..k {
            let q = (matrix.get(vertices[a], vertices[b]) * scale).round() as i64;
            ceiling = ceiling.max(q);
            scaled.push((a, b, q));
        }
    }
    let edges = scaled
        .into_iter()
        .map(|(a, b, q)| (a, b, ceiling + 1 - q))
        .collect();

    let mate = Blossom::new(k, edges).solve();

    let mut pairs = Vec::with_capacity(k / 2);
    for (a, &m) in mate.iter().enumerate() {
        if m == NONE {
            return Err(TspForgeError::Internal(format!(
                "matching left city {} unmatched",
                vertices[a]
            )));
        }
        if a < m {
            pairs.push((vertices[a], vertices[m]));
        }
    }
    Ok(pairs)
}

/// Greedy perfect matching over `vertices`.
///
/// Repeatedly pairs the first unmatched vertex (in `vertices` order) with
/// its nearest unmatched vertex; distance ties go to the earlier vertex.
pub fn greedy_matching(
    matrix: &DistanceMatrix,
    vertices: &[usize],
) -> Result<Vec<(usize, usize)>> {
    if vertices.len() % 2 != 0 {
        return Err(TspForgeError::Internal(format!(
            "cannot perfectly match {} vertices",
            vertices.len()
        )));
    }

    let mut matched = vec![false; vertices.len()];
    let mut pairs = Vec::with_capacity(vertices.len() / 2);
    for a in 0..vertices.len() {
        if matched[a] {
            continue;
        }
        matched[a] = true;

        let u = vertices[a];
        let mut nearest = NONE;
        let mut nearest_distance = f64::INFINITY;
        for b in a + 1..vertices.len() {
            if !matched[b] && matrix.get(u, vertices[b]) < nearest_distance {
                nearest = b;
                nearest_distance = matrix.get(u, vertices[b]);
            }
        }
        if nearest == NONE {
            return Err(TspForgeError::Internal(format!(
                "no partner left for city {u}"
            )));
        }
        matched[nearest] = true;
        pairs.push((u, vertices[nearest]));
    }
    Ok(pairs)
}

/// Primal-dual state of Edmonds' weighted matching.
///
/// Vertices are `0..n`; blossoms take ids `n..2n`. Edge `e` has endpoints
/// `2e` and `2e + 1`, and `p ^ 1` is the opposite endpoint of `p`.
/// Labels: 0 free, 1 outer (S), 2 inner (T), bit 4 marks a blossom visited
/// by [`Blossom::scan_blossom`].
struct Blossom {
    n: usize,
    edges: Vec<(usize, usize, i64)>,
    endpoint: Vec<usize>,
    neighbend: Vec<Vec<usize>>,
    /// Remote endpoint of each vertex's matched edge.
    mate: Vec<usize>,
    label: Vec<u8>,
    labelend: Vec<usize>,
    inblossom: Vec<usize>,
    blossomparent: Vec<usize>,
    blossomchilds: Vec<Vec<usize>>,
    blossombase: Vec<usize>,
    blossomendps: Vec<Vec<usize>>,
    bestedge: Vec<usize>,
    blossombestedges: Vec<Option<Vec<usize>>>,
    unusedblossoms: Vec<usize>,
    dualvar: Vec<i64>,
    allowedge: Vec<bool>,
    queue: Vec<usize>,
}

impl Blossom {
    fn new(n: usize, edges: Vec<(usize, usize, i64)>) -> Self {
        let max_weight = edges.iter().map(|&(_, _, w)| w).max().unwrap_or(0).max(0);

        let mut endpoint = Vec::with_capacity(2 * edges.len());
        let mut neighbend = vec![Vec::new(); n];
        for (k, &(i, j, _)) in edges.iter().enumerate() {
            endpoint.push(i);
            endpoint.push(j);
            neighbend[i].push(2 * k + 1);
            neighbend[j].push(2 * k);
        }

        let mut dualvar = vec![max_weight; n];
        dualvar.resize(2 * n, 0);

        Self {
            n,
            allowedge: vec![false; edges.len()],
            edges,
            endpoint,
            neighbend,
            mate: vec![NONE; n],
            label: vec![0; 2 * n],
            labelend: vec![NONE; 2 * n],
            inblossom: (0..n).collect(),
            blossomparent: vec![NONE; 2 * n],
            blossomchilds: vec![Vec::new(); 2 * n],
            blossombase: (0..n).chain(std::iter::repeat(NONE).take(n)).collect(),
            blossomendps: vec![Vec::new(); 2 * n],
            bestedge: vec![NONE; 2 * n],
            blossombestedges: vec![None; 2 * n],
            unusedblossoms: (n..2 * n).collect(),
            dualvar,
            queue: Vec::new(),
        }
    }

    /// Runs to a maximum-cardinality, maximum-weight matching and returns
    /// each vertex's partner (or `NONE`).
    fn solve(mut self) -> Vec<usize> {
        let n = self.n;
        for _ in 0..n {
            self.label.fill(0);
            self.bestedge.fill(NONE);
            for b in n..2 * n {
                self.blossombestedges[b] = None;
            }
            self.allowedge.fill(false);
            self.queue.clear();

            for v in 0..n {
                if self.mate[v] == NONE && self.label[self.inblossom[v]] == 0 {
                    self.assign_label(v, 1, NONE);
                }
            }

            let mut augmented = false;
            loop {
                while !augmented {
                    let Some(v) = self.queue.pop() else { break };
                    for idx in 0..self.neighbend[v].len() {
                        let p = self.neighbend[v][idx];
                        let k = p / 2;
                        let w = self.endpoint[p];
                        if self.inblossom[v] == self.inblossom[w] {
                            continue;
                        }

                        let mut kslack = 0;
                        if !self.allowedge[k] {
                            kslack = self.slack(k);
                            if kslack <= 0 {
                                self.allowedge[k] = true;
                            }
                        }

                        if self.allowedge[k] {
                            if self.label[self.inblossom[w]] == 0 {
                                self.assign_label(w, 2, p ^ 1);
                            } else if self.label[self.inblossom[w]] == 1 {
                                let base = self.scan_blossom(v, w);
                                if base != NONE {
                                    self.add_blossom(base, k);
                                } else {
                                    self.augment_matching(k);
                                    augmented = true;
                                    break;
                                }
                            } else if self.label[w] == 0 {
                                self.label[w] = 2;
                                self.labelend[w] = p ^ 1;
                            }
                        } else if self.label[self.inblossom[w]] == 1 {
                            let b = self.inblossom[v];
                            if self.bestedge[b] == NONE || kslack < self.slack(self.bestedge[b]) {
                                self.bestedge[b] = k;
                            }
                        } else if self.label[w] == 0
                            && (self.bestedge[w] == NONE || kslack < self.slack(self.bestedge[w]))
                        {
                            self.bestedge[w] = k;
                        }
                    }
                }

                if augmented {
                    break;
                }

                // No augmenting path under the current duals: pick the
                // smallest dual adjustment that exposes a new tight edge.
                let mut deltatype = 0;
                let mut delta = 0i64;
                let mut deltaedge = NONE;
                let mut deltablossom = NONE;

                for v in 0..n {
                    if self.label[self.inblossom[v]] == 0 && self.bestedge[v] != NONE {
                        let d = self.slack(self.bestedge[v]);
                        if deltatype == 0 || d < delta {
                            delta = d;
                            deltatype = 2;
                            deltaedge = self.bestedge[v];
                        }
                    }
                }

                for b in 0..2 * n {
                    if self.blossomparent[b] == NONE
                        && self.label[b] == 1
                        && self.bestedge[b] != NONE
                    {
                        let d = self.slack(self.bestedge[b]) / 2;
                        if deltatype == 0 || d < delta {
                            delta = d;
                            deltatype = 3;
                            deltaedge = self.bestedge[b];
                        }
                    }
                }

                for b in n..2 * n {
                    if self.blossombase[b] != NONE
                        && self.blossomparent[b] == NONE
                        && self.label[b] == 2
                        && (deltatype == 0 || self.dualvar[b] < delta)
                    {
                        delta = self.dualvar[b];
                        deltatype = 4;
                        deltablossom = b;
                    }
                }

                if deltatype == 0 {
                    deltatype = 1;
                    delta = self.dualvar[..n].iter().copied().min().unwrap_or(0).max(0);
                }

                for v in 0..n {
                    match self.label[self.inblossom[v]] {
                        1 => self.dualvar[v] -= delta,
                        2 => self.dualvar[v] += delta,
                        _ => {}
                    }
                }
                for b in n..2 * n {
                    if self.blossombase[b] != NONE && self.blossomparent[b] == NONE {
                        match self.label[b] {
                            1 => self.dualvar[b] += delta,
                            2 => self.dualvar[b] -= delta,
                            _ => {}
                        }
                    }
                }

                match deltatype {
                    1 => break,
                    2 => {
                        self.allowedge[deltaedge] = true;
                        let (mut i, j, _) = self.edges[deltaedge];
                        if self.label[self.inblossom[i]] == 0 {
                            i = j;
                        }
                        self.queue.push(i);
                    }
                    3 => {
                        self.allowedge[deltaedge] = true;
                        let (i, _, _) = self.edges[deltaedge];
                        self.queue.push(i);
                    }
                    _ => self.expand_blossom(deltablossom, false),
                }
            }

            if !augmented {
                break;
            }

            for b in n..2 * n {
                if self.blossomparent[b] == NONE
                    && self.blossombase[b] != NONE
                    && self.label[b] == 1
                    && self.dualvar[b] == 0
                {
                    self.expand_blossom(b, true);
                }
            }
        }

        self.mate
            .iter()
            .map(|&p| if p == NONE { NONE } else { self.endpoint[p] })
            .collect()
    }

    fn slack(&self, k: usize) -> i64 {
        let (i, j, wt) = self.edges[k];
        self.dualvar[i] + self.dualvar[j] - 2 * wt
    }

    fn blossom_leaves(&self, b: usize) -> Vec<usize> {
        let mut leaves = Vec::new();
        let mut stack = vec![b];
        while let Some(t) = stack.pop() {
            if t < self.n {
                leaves.push(t);
            } else {
                stack.extend(self.blossomchilds[t].iter().rev());
            }
        }
        leaves
    }

    fn child_at(&self, b: usize, j: isize) -> usize {
        let childs = &self.blossomchilds[b];
        childs[j.rem_euclid(childs.len() as isize) as usize]
    }

    fn endp_at(&self, b: usize, j: isize) -> usize {
        let endps = &self.blossomendps[b];
        endps[j.rem_euclid(endps.len() as isize) as usize]
    }

    fn assign_label(&mut self, w: usize, t: u8, p: usize) {
        let b = self.inblossom[w];
        self.label[w] = t;
        self.label[b] = t;
        self.labelend[w] = p;
        self.labelend[b] = p;
        self.bestedge[w] = NONE;
        self.bestedge[b] = NONE;
        if t == 1 {
            let leaves = self.blossom_leaves(b);
            self.queue.extend(leaves);
        } else if t == 2 {
            let base = self.blossombase[b];
            let mate = self.mate[base];
            self.assign_label(self.endpoint[mate], 1, mate ^ 1);
        }
    }

    /// Traces back from `v` and `w` to find either a new blossom (its base)
    /// or an augmenting path (`NONE`).
    fn scan_blossom(&mut self, v: usize, w: usize) -> usize {
        let mut path = Vec::new();
        let mut base = NONE;
        let (mut v, mut w) = (v, w);
        while v != NONE || w != NONE {
            let b = self.inblossom[v];
            if self.label[b] & 4 != 0 {
                base = self.blossombase[b];
                break;
            }
            path.push(b);
            self.label[b] = 5;
            if self.labelend[b] == NONE {
                v = NONE;
            } else {
                let t = self.endpoint[self.labelend[b]];
                let bt = self.inblossom[t];
                v = self.endpoint[self.labelend[bt]];
            }
            if w != NONE {
                std::mem::swap(&mut v, &mut w);
            }
        }
        for b in path {
            self.label[b] = 1;
        }
        base
    }

    /// Shrinks the odd cycle closed by edge `k` into a new blossom.
    fn add_blossom(&mut self, base: usize, k: usize) {
        let (mut v, mut w, _) = self.edges[k];
        let bb = self.inblossom[base];
        let mut bv = self.inblossom[v];
        let mut bw = self.inblossom[w];

        let b = self
            .unusedblossoms
            .pop()
            .expect("at most n / 2 blossoms are live at once");
        self.blossombase[b] = base;
        self.blossomparent[b] = NONE;
        self.blossomparent[bb] = b;

        let mut path = Vec::new();
        let mut endps = Vec::new();
        while bv != bb {
            self.blossomparent[bv] = b;
            path.push(bv);
            endps.push(self.labelend[bv]);
            v = self.endpoint[self.labelend[bv]];
            bv = self.inblossom[v];
        }
        path.push(bb);
        path.reverse();
        endps.reverse();
        endps.push(2 * k);
        while bw != bb {
            self.blossomparent[bw] = b;
            path.push(bw);
            endps.push(self.labelend[bw] ^ 1);
            w = self.endpoint[self.labelend[bw]];
            bw = self.inblossom[w];
        }

        self.blossomchilds[b] = path.clone();
        self.blossomendps[b] = endps;
        self.label[b] = 1;
        self.labelend[b] = self.labelend[bb];
        self.dualvar[b] = 0;

        for leaf in self.blossom_leaves(b) {
            if self.label[self.inblossom[leaf]] == 2 {
                self.queue.push(leaf);
            }
            self.inblossom[leaf] = b;
        }

        let mut bestedgeto = vec![NONE; 2 * self.n];
        for &child in &path {
            let nblists: Vec<Vec<usize>> = match self.blossombestedges[child].take() {
                Some(list) => vec![list],
                None => self
                    .blossom_leaves(child)
                    .into_iter()
                    .map(|leaf| self.neighbend[leaf].iter().map(|&p| p / 2).collect())
                    .collect(),
            };
            for nblist in nblists {
                for k in nblist {
                    let (i, j, _) = self.edges[k];
                    let j = if self.inblossom[j] == b { i } else { j };
                    let bj = self.inblossom[j];
                    if bj != b
                        && self.label[bj] == 1
                        && (bestedgeto[bj] == NONE || self.slack(k) < self.slack(bestedgeto[bj]))
                    {
                        bestedgeto[bj] = k;
                    }
                }
            }
            self.bestedge[child] = NONE;
        }

        let list: Vec<usize> = bestedgeto.into_iter().filter(|&k| k != NONE).collect();
        self.bestedge[b] = NONE;
        for &k in &list {
            if self.bestedge[b] == NONE || self.slack(k) < self.slack(self.bestedge[b]) {
                self.bestedge[b] = k;
            }
        }
        self.blossombestedges[b] = Some(list);
    }

    /// Dissolves blossom `b`, relabelling its children when expanded
    /// mid-stage.
    fn expand_blossom(&mut self, b: usize, endstage: bool) {
        let n = self.n;
        let childs = self.blossomchilds[b].clone();
        for &s in &childs {
            self.blossomparent[s] = NONE;
            if s < n {
                self.inblossom[s] = s;
            } else if endstage && self.dualvar[s] == 0 {
                self.expand_blossom(s, endstage);
            } else {
                for leaf in self.blossom_leaves(s) {
                    self.inblossom[leaf] = s;
                }
            }
        }

        if !endstage && self.label[b] == 2 {
            let entrychild = self.inblossom[self.endpoint[self.labelend[b] ^ 1]];
            let len = childs.len() as isize;
            let mut j = childs
                .iter()
                .position(|&c| c == entrychild)
                .expect("entry child belongs to the blossom") as isize;
            let (jstep, endptrick): (isize, usize) = if j & 1 != 0 {
                j -= len;
                (1, 0)
            } else {
                (-1, 1)
            };
            let trick = endptrick as isize;

            let mut p = self.labelend[b];
            while j != 0 {
                let q = self.endp_at(b, j - trick) ^ endptrick;
                self.label[self.endpoint[p ^ 1]] = 0;
                self.label[self.endpoint[q ^ 1]] = 0;
                self.assign_label(self.endpoint[p ^ 1], 2, p);
                self.allowedge[q / 2] = true;
                j += jstep;
                p = self.endp_at(b, j - trick) ^ endptrick;
                self.allowedge[p / 2] = true;
                j += jstep;
            }

            let bv = self.child_at(b, j);
            let entry = self.endpoint[p ^ 1];
            self.label[entry] = 2;
            self.label[bv] = 2;
            self.labelend[entry] = p;
            self.labelend[bv] = p;
            self.bestedge[bv] = NONE;
            j += jstep;

            while self.child_at(b, j) != entrychild {
                let bv = self.child_at(b, j);
                if self.label[bv] == 1 {
                    j += jstep;
                    continue;
                }
                let reached = self
                    .blossom_leaves(bv)
                    .into_iter()
                    .find(|&leaf| self.label[leaf] != 0);
                if let Some(v) = reached {
                    self.label[v] = 0;
                    let partner = self.endpoint[self.mate[self.blossombase[bv]]];
                    self.label[partner] = 0;
                    self.assign_label(v, 2, self.labelend[v]);
                }
                j += jstep;
            }
        }

        self.label[b] = 0;
        self.labelend[b] = NONE;
        self.blossomchilds[b].clear();
        self.blossomendps[b].clear();
        self.blossombase[b] = NONE;
        self.blossombestedges[b] = None;
        self.bestedge[b] = NONE;
        self.unusedblossoms.push(b);
    }

    /// Flips matched and unmatched edges along the alternating path from
    /// vertex `v` to the base of blossom `b`, then rotates `b` so `v` is the
    /// new base.
    fn augment_blossom(&mut self, b: usize, v: usize) {
        let n = self.n;
        let mut t = v;
        while self.blossomparent[t] != b {
            t = self.blossomparent[t];
        }
        if t >= n {
            self.augment_blossom(t, v);
        }

        let len = self.blossomchilds[b].len() as isize;
        let i = self.blossomchilds[b]
            .iter()
            .position(|&c| c == t)
            .expect("sub-blossom belongs to the blossom");
        let mut j = i as isize;
        let (jstep, endptrick): (isize, usize) = if j & 1 != 0 {
            j -= len;
            (1, 0)
        } else {
            (-1, 1)
        };
        let trick = endptrick as isize;

        while j != 0 {
            j += jstep;
            let t = self.child_at(b, j);
            let p = self.endp_at(b, j - trick) ^ endptrick;
            if t >= n {
                self.augment_blossom(t, self.endpoint[p]);
            }
            j += jstep;
            let t = self.child_at(b, j);
            if t >= n {
                self.augment_blossom(t, self.endpoint[p ^ 1]);
            }
            self.mate[self.endpoint[p]] = p ^ 1;
            self.mate[self.endpoint[p ^ 1]] = p;
        }

        self.blossomchilds[b].rotate_left(i);
        self.blossomendps[b].rotate_left(i);
        self.blossombase[b] = self.blossombase[self.blossomchilds[b][0]];
    }

    /// Augments the matching along the path through edge `k`.
    fn augment_matching(&mut self, k: usize) {
        let n = self.n;
        let (v, w, _) = self.edges[k];
        for (mut s, mut p) in [(v, 2 * k + 1), (w, 2 * k)] {
            loop {
                let bs = self.inblossom[s];
                if bs >= n {
                    self.augment_blossom(bs, s);
                }
                self.mate[s] = p;
                if self.labelend[bs] == NONE {
                    break;
                }
                let t = self.endpoint[self.labelend[bs]];
                let bt = self.inblossom[t];
                s = self.endpoint[self.labelend[bt]];
                let j = self.endpoint[self.labelend[bt] ^ 1];
                if bt >= n {
                    self.augment_blossom(bt, j);
                }
                self.mate[j] = self.labelend[bt];
                p = self.labelend[bt] ^ 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use tspforge_test::fixtures;

    /// Exhaustive minimum perfect matching cost by bitmask DP.
    fn oracle(matrix: &DistanceMatrix, vertices: &[usize]) -> f64 {
        let k = vertices.len();
        let full = (1usize << k) - 1;
        let mut best = vec![f64::INFINITY; 1 << k];
        best[0] = 0.0;
        for mask in 0..=full {
            if best[mask].is_infinite() || mask == full {
                continue;
            }
            let a = (!mask).trailing_zeros() as usize;
            for b in a + 1..k {
                if mask & (1 << b) == 0 {
                    let next = mask | (1 << a) | (1 << b);
                    let cost = best[mask] + matrix.get(vertices[a], vertices[b]);
                    if cost < best[next] {
                        best[next] = cost;
                    }
                }
            }
        }
        best[full]
    }

    fn weight(matrix: &DistanceMatrix, pairs: &[(usize, usize)]) -> f64 {
        pairs.iter().map(|&(u, v)| matrix.get(u, v)).sum()
    }

    fn assert_perfect(pairs: &[(usize, usize)], vertices: &[usize]) {
        let mut covered: Vec<usize> = pairs.iter().flat_map(|&(u, v)| [u, v]).collect();
        covered.sort_unstable();
        let mut expected = vertices.to_vec();
        expected.sort_unstable();
        assert_eq!(covered, expected);
    }

    fn random_symmetric(n: usize, seed: u64) -> DistanceMatrix {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut rows = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in i + 1..n {
                let d = rng.random_range(1..100) as f64;
                rows[i][j] = d;
                rows[j][i] = d;
            }
        }
        DistanceMatrix::new(rows).unwrap()
    }

    #[test]
    fn test_exact_matches_oracle_on_euclidean() {
        for seed in 0..20 {
            let matrix = fixtures::euclidean(12, seed);
            let vertices: Vec<usize> = (0..12).collect();
            let pairs = min_weight_perfect_matching(&matrix, &vertices).unwrap();

            assert_perfect(&pairs, &vertices);
            let expected = oracle(&matrix, &vertices);
            assert!(
                (weight(&matrix, &pairs) - expected).abs() <= 1e-6 * expected.max(1.0),
                "seed {seed}: {} vs {expected}",
                weight(&matrix, &pairs)
            );
        }
    }

    #[test]
    fn test_exact_matches_oracle_on_integer_weights() {
        // Small integer weights create many ties and nested blossoms.
        for seed in 0..40 {
            let size = 4 + 2 * (seed as usize % 5);
            let matrix = random_symmetric(size, seed);
            let vertices: Vec<usize> = (0..size).collect();
            let pairs = min_weight_perfect_matching(&matrix, &vertices).unwrap();

            assert_perfect(&pairs, &vertices);
            assert_eq!(weight(&matrix, &pairs), oracle(&matrix, &vertices), "seed {seed}");
        }
    }

    #[test]
    fn test_exact_on_subset() {
        let matrix = fixtures::five_cities();
        let vertices = [0, 1, 2, 4];
        let pairs = min_weight_perfect_matching(&matrix, &vertices).unwrap();
        assert_perfect(&pairs, &vertices);
        // {0,1} + {2,4} = 10 + 20
        assert_eq!(weight(&matrix, &pairs), 30.0);
    }

    #[test]
    fn test_exact_trivial_sizes() {
        let matrix = fixtures::four_cities();
        assert!(min_weight_perfect_matching(&matrix, &[]).unwrap().is_empty());
        assert_eq!(min_weight_perfect_matching(&matrix, &[1, 3]).unwrap(), vec![(1, 3)]);
        assert!(matches!(
            min_weight_perfect_matching(&matrix, &[0, 1, 2]),
            Err(TspForgeError::Internal(_))
        ));
    }

    #[test]
    fn test_exact_all_equal_distances() {
        let matrix = fixtures::uniform(8, 5.0);
        let vertices: Vec<usize> = (0..8).collect();
        let pairs = min_weight_perfect_matching(&matrix, &vertices).unwrap();
        assert_perfect(&pairs, &vertices);
        assert_eq!(weight(&matrix, &pairs), 20.0);
    }

    #[test]
    fn test_greedy_pairs_nearest() {
        let matrix = fixtures::five_cities();
        let pairs = greedy_matching(&matrix, &[0, 1, 2, 4]).unwrap();
        assert_eq!(pairs, vec![(0, 1), (2, 4)]);
    }

    #[test]
    fn test_greedy_can_be_suboptimal() {
        // Points on a line at 0, 2, 3, 5. Starting from the point at 2,
        // greedy grabs its neighbour at 3 and strands the two ends.
        let matrix =
            DistanceMatrix::from_points(&[(0.0, 0.0), (2.0, 0.0), (3.0, 0.0), (5.0, 0.0)]).unwrap();
        let vertices = [1, 2, 0, 3];
        let greedy = greedy_matching(&matrix, &vertices).unwrap();
        assert_eq!(greedy, vec![(1, 2), (0, 3)]);
        assert_eq!(weight(&matrix, &greedy), 6.0);

        let exact = min_weight_perfect_matching(&matrix, &vertices).unwrap();
        assert_eq!(weight(&matrix, &exact), 4.0);
    }
}
