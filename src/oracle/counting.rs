//! A deterministic backtracking solution counter.
//!
//! The backend enumerates assignments dimension by dimension, respecting
//! the bijection baseline by construction (each dimension is searched as a
//! permutation, pinned dimensions are fixed up front) and pruning with
//! interval bounds on every linear row: a partial assignment is abandoned
//! as soon as some row can no longer be satisfied by any completion. The
//! search stops as soon as the requested solution count is reached, so a
//! satisfiability check never enumerates past the second solution.

use tracing::debug;

use crate::{
    error::{GenerateError, Result},
    oracle::{
        linear::{LinearConstraint, Relation},
        Assignment, Oracle, PuzzleModel, SolveOutcome,
    },
};

pub const DEFAULT_NODE_LIMIT: u64 = 10_000_000;

/// Counters for one search run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStats {
    pub nodes_visited: u64,
    pub backtracks: u64,
    pub prunings: u64,
}

/// The shipped [`Oracle`] backend.
#[derive(Debug, Clone, Copy)]
pub struct CountingOracle {
    node_limit: u64,
}

impl CountingOracle {
    /// `node_limit` bounds the search tree; exceeding it fails the check
    /// with an oracle error rather than running away.
    pub fn new(node_limit: u64) -> Self {
        Self { node_limit }
    }

    /// Counts satisfying assignments, stopping once `limit` of them have
    /// been seen. Returns the (possibly capped) count and the first
    /// solution found, if any. `limit` is clamped to at least 1.
    pub fn count_solutions(
        &self,
        model: &PuzzleModel,
        limit: u64,
    ) -> Result<(u64, Option<Assignment>)> {
        let mut search = Search::new(model, self.node_limit, limit.max(1));
        let result = search.run();
        debug!(
            nodes = search.stats.nodes_visited,
            backtracks = search.stats.backtracks,
            prunings = search.stats.prunings,
            count = search.count,
            "counting search finished"
        );
        result?;
        Ok((search.count, search.first.take()))
    }
}

impl Default for CountingOracle {
    fn default() -> Self {
        Self::new(DEFAULT_NODE_LIMIT)
    }
}

impl Oracle for CountingOracle {
    fn check(&self, model: &PuzzleModel) -> Result<SolveOutcome> {
        let (count, first) = self.count_solutions(model, 2)?;
        Ok(match count {
            0 => SolveOutcome::Infeasible,
            1 => SolveOutcome::Unique(first.unwrap()),
            _ => SolveOutcome::Multiple,
        })
    }
}

const UNSET: usize = usize::MAX;

/// Per-row search state: `sum` is the contribution of decided variables,
/// `lo`/`hi` bound what the undecided variables can still add.
#[derive(Debug, Clone, Copy)]
struct RowState {
    sum: i64,
    lo: i64,
    hi: i64,
}

struct Search<'m> {
    model: &'m PuzzleModel,
    rels: Vec<(Relation, i64)>,
    states: Vec<RowState>,
    touch: Vec<Vec<(usize, i64)>>,
    grid: Vec<Vec<usize>>,
    used: Vec<Vec<bool>>,
    cells: Vec<(usize, usize)>,
    trail: Vec<(usize, RowState)>,
    stats: SearchStats,
    node_limit: u64,
    limit: u64,
    count: u64,
    first: Option<Assignment>,
}

impl<'m> Search<'m> {
    fn new(model: &'m PuzzleModel, node_limit: u64, limit: u64) -> Self {
        let n = model.num_persons();
        let m = model.num_dimensions();

        let rows: Vec<&LinearConstraint> = model.rows().collect();
        let mut rels = Vec::with_capacity(rows.len());
        let mut states = Vec::with_capacity(rows.len());
        let mut touch = vec![Vec::new(); model.num_vars()];
        for (i, row) in rows.iter().enumerate() {
            let (lo, hi) = row.expr.bounds();
            rels.push((row.relation, row.rhs));
            states.push(RowState { sum: 0, lo, hi });
            for &(coef, var) in &row.expr.terms {
                touch[var as usize].push((i, coef));
            }
        }

        let cells = (0..m)
            .filter(|&d| !model.is_pinned(d))
            .flat_map(|d| (0..n).map(move |p| (d, p)))
            .collect();

        Self {
            model,
            rels,
            states,
            touch,
            grid: vec![vec![UNSET; n]; m],
            used: vec![vec![false; n]; m],
            cells,
            trail: Vec::new(),
            stats: SearchStats::default(),
            node_limit,
            limit,
            count: 0,
            first: None,
        }
    }

    fn run(&mut self) -> Result<()> {
        // The pinned dimensions hold the identity; their contributions flow
        // into the row states through the same path as searched cells.
        for dim in 0..self.model.num_dimensions() {
            if !self.model.is_pinned(dim) {
                continue;
            }
            for person in 0..self.model.num_persons() {
                let (ok, _) = self.assign(dim, person, person);
                if !ok {
                    return Ok(());
                }
            }
        }
        self.dfs(0)?;
        Ok(())
    }

    fn dfs(&mut self, cell: usize) -> Result<bool> {
        if cell == self.cells.len() {
            self.count += 1;
            if self.first.is_none() {
                self.first = Some(Assignment {
                    values: self.grid.clone(),
                });
            }
            return Ok(self.count >= self.limit);
        }

        self.stats.nodes_visited += 1;
        if self.stats.nodes_visited > self.node_limit {
            return Err(GenerateError::Oracle {
                reason: format!("node budget of {} exceeded", self.node_limit),
                variables: self.model.num_vars(),
                accepted: self.model.accepted(),
            }
            .into());
        }

        let (dim, person) = self.cells[cell];
        for value in 0..self.model.num_persons() {
            if self.used[dim][value] {
                continue;
            }
            let (ok, mark) = self.assign(dim, person, value);
            let stop = if ok {
                self.dfs(cell + 1)?
            } else {
                self.stats.prunings += 1;
                false
            };
            self.undo(dim, person, value, mark);
            if stop {
                return Ok(true);
            }
            self.stats.backtracks += 1;
        }
        Ok(false)
    }

    /// Decides every variable of the cell (one set, the rest cleared) and
    /// reports whether all touched rows remain satisfiable, along with the
    /// trail mark for `undo`.
    fn assign(&mut self, dim: usize, person: usize, value: usize) -> (bool, usize) {
        let mark = self.trail.len();
        for w in 0..self.model.num_persons() {
            let var = self.model.var(person, dim, w) as usize;
            let set = w == value;
            for &(row, coef) in &self.touch[var] {
                self.trail.push((row, self.states[row]));
                let st = &mut self.states[row];
                if coef < 0 {
                    st.lo -= coef;
                } else {
                    st.hi -= coef;
                }
                if set {
                    st.sum += coef;
                }
            }
        }

        let mut ok = true;
        for idx in mark..self.trail.len() {
            if !self.feasible(self.trail[idx].0) {
                ok = false;
                break;
            }
        }

        self.grid[dim][person] = value;
        self.used[dim][value] = true;
        (ok, mark)
    }

    fn undo(&mut self, dim: usize, person: usize, value: usize, mark: usize) {
        self.grid[dim][person] = UNSET;
        self.used[dim][value] = false;
        while self.trail.len() > mark {
            let (row, state) = self.trail.pop().unwrap();
            self.states[row] = state;
        }
    }

    fn feasible(&self, row: usize) -> bool {
        let st = self.states[row];
        let (relation, rhs) = self.rels[row];
        match relation {
            Relation::Eq => st.sum + st.lo <= rhs && st.sum + st.hi >= rhs,
            Relation::Le => st.sum + st.lo <= rhs,
            Relation::Ge => st.sum + st.hi >= rhs,
        }
    }
}
